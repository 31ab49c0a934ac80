use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use lyceum_auth_types::identity::Identity;

use crate::error::AdminServiceError;
use crate::state::AppState;
use crate::usecase::role::{
    GrantRoleInput, GrantRoleUseCase, ListPermissionsUseCase, ListRolesUseCase, RevokeRoleUseCase,
};

// ── GET /api/v1/roles ────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct RoleResponse {
    pub id: String,
    pub name: String,
    pub display_name: String,
    pub scope: String,
}

pub async fn list_roles(
    State(state): State<AppState>,
) -> Result<Json<Vec<RoleResponse>>, AdminServiceError> {
    let usecase = ListRolesUseCase {
        catalog: state.catalog_repo(),
    };
    let roles = usecase.execute().await?;
    Ok(Json(
        roles
            .into_iter()
            .map(|r| RoleResponse {
                id: r.id.to_string(),
                name: r.name,
                display_name: r.display_name,
                scope: r.scope,
            })
            .collect(),
    ))
}

// ── GET /api/v1/permissions ──────────────────────────────────────────────────

#[derive(Serialize)]
pub struct PermissionResponse {
    pub id: String,
    pub name: String,
    pub action: String,
    pub scope: String,
}

pub async fn list_permissions(
    State(state): State<AppState>,
) -> Result<Json<Vec<PermissionResponse>>, AdminServiceError> {
    let usecase = ListPermissionsUseCase {
        catalog: state.catalog_repo(),
    };
    let permissions = usecase.execute().await?;
    Ok(Json(
        permissions
            .into_iter()
            .map(|p| PermissionResponse {
                id: p.id.to_string(),
                name: p.name,
                action: p.action,
                scope: p.scope,
            })
            .collect(),
    ))
}

// ── POST /api/v1/users/{id}/roles ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct GrantRoleRequest {
    pub role_id: Uuid,
    pub school_id: Option<Uuid>,
    pub academic_unit_id: Option<Uuid>,
}

#[derive(Serialize)]
pub struct GrantResponse {
    pub id: String,
    pub user_id: String,
    pub role_id: String,
    pub school_id: Option<String>,
    pub academic_unit_id: Option<String>,
    #[serde(serialize_with = "lyceum_core::serde::to_rfc3339_ms")]
    pub granted_at: chrono::DateTime<chrono::Utc>,
}

pub async fn grant_role(
    identity: Identity,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<GrantRoleRequest>,
) -> Result<(StatusCode, Json<GrantResponse>), AdminServiceError> {
    let usecase = GrantRoleUseCase {
        grants: state.grant_repo(),
        catalog: state.catalog_repo(),
        users: state.user_repo(),
    };
    let grant = usecase
        .execute(GrantRoleInput {
            user_id,
            role_id: body.role_id,
            school_id: body.school_id,
            academic_unit_id: body.academic_unit_id,
            granted_by: Some(identity.0.user_id),
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(GrantResponse {
            id: grant.id.to_string(),
            user_id: grant.user_id.to_string(),
            role_id: grant.role_id.to_string(),
            school_id: grant.school_id.map(|id| id.to_string()),
            academic_unit_id: grant.academic_unit_id.map(|id| id.to_string()),
            granted_at: grant.granted_at,
        }),
    ))
}

// ── DELETE /api/v1/user-roles/{id} ───────────────────────────────────────────

pub async fn revoke_role(
    State(state): State<AppState>,
    Path(grant_id): Path<Uuid>,
) -> Result<StatusCode, AdminServiceError> {
    let usecase = RevokeRoleUseCase {
        grants: state.grant_repo(),
    };
    usecase.execute(grant_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
