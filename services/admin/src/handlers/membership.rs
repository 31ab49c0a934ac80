use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::Membership;
use crate::error::AdminServiceError;
use crate::state::AppState;
use crate::usecase::membership::{
    CreateMembershipInput, CreateMembershipUseCase, ExpireMembershipUseCase, GetMembershipUseCase,
    ListUserMembershipsUseCase,
};

#[derive(Serialize)]
pub struct MembershipResponse {
    pub id: String,
    pub user_id: String,
    pub school_id: String,
    pub academic_unit_id: Option<String>,
    pub role: String,
    #[serde(serialize_with = "lyceum_core::serde::to_rfc3339_ms")]
    pub enrolled_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "lyceum_core::serde::to_rfc3339_ms_opt")]
    pub withdrawn_at: Option<chrono::DateTime<chrono::Utc>>,
    pub is_active: bool,
    pub metadata: serde_json::Value,
    #[serde(serialize_with = "lyceum_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

fn membership_response(membership: Membership) -> MembershipResponse {
    MembershipResponse {
        id: membership.id.to_string(),
        user_id: membership.user_id.to_string(),
        school_id: membership.school_id.to_string(),
        academic_unit_id: membership.academic_unit_id.map(|id| id.to_string()),
        role: membership.role,
        enrolled_at: membership.enrolled_at,
        withdrawn_at: membership.withdrawn_at,
        is_active: membership.is_active,
        metadata: membership.metadata,
        created_at: membership.created_at,
    }
}

// ── POST /api/v1/memberships ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateMembershipRequest {
    pub user_id: Uuid,
    pub school_id: Uuid,
    pub academic_unit_id: Option<Uuid>,
    pub role: String,
    pub metadata: Option<serde_json::Value>,
}

pub async fn create_membership(
    State(state): State<AppState>,
    Json(body): Json<CreateMembershipRequest>,
) -> Result<(StatusCode, Json<MembershipResponse>), AdminServiceError> {
    let usecase = CreateMembershipUseCase {
        memberships: state.membership_repo(),
        users: state.user_repo(),
        units: state.unit_repo(),
    };
    let membership = usecase
        .execute(CreateMembershipInput {
            user_id: body.user_id,
            school_id: body.school_id,
            academic_unit_id: body.academic_unit_id,
            role: body.role,
            metadata: body.metadata,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(membership_response(membership))))
}

// ── GET /api/v1/memberships/{id} ─────────────────────────────────────────────

pub async fn get_membership(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MembershipResponse>, AdminServiceError> {
    let usecase = GetMembershipUseCase {
        memberships: state.membership_repo(),
    };
    let membership = usecase.execute(id).await?;
    Ok(Json(membership_response(membership)))
}

// ── GET /api/v1/users/{id}/memberships ───────────────────────────────────────

pub async fn list_user_memberships(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<MembershipResponse>>, AdminServiceError> {
    let usecase = ListUserMembershipsUseCase {
        memberships: state.membership_repo(),
    };
    let memberships = usecase.execute(user_id).await?;
    Ok(Json(
        memberships.into_iter().map(membership_response).collect(),
    ))
}

// ── POST /api/v1/memberships/{id}/expire ─────────────────────────────────────

pub async fn expire_membership(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AdminServiceError> {
    let usecase = ExpireMembershipUseCase {
        memberships: state.membership_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
