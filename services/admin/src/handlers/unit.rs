use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::tree::UnitNode;
use crate::domain::types::AcademicUnit;
use crate::error::AdminServiceError;
use crate::state::AppState;
use crate::usecase::academic_unit::{
    CreateUnitInput, CreateUnitUseCase, DeleteUnitUseCase, GetUnitUseCase, HierarchyPathUseCase,
    ListUnitsUseCase, RestoreUnitUseCase, UnitTreeUseCase, UpdateUnitInput, UpdateUnitUseCase,
};

#[derive(Serialize)]
pub struct UnitResponse {
    pub id: String,
    pub parent_unit_id: Option<String>,
    pub school_id: String,
    #[serde(rename = "type")]
    pub unit_type: String,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub metadata: serde_json::Value,
    pub is_active: bool,
    #[serde(serialize_with = "lyceum_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "lyceum_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
    /// `null` for live units; a restored unit reads back with the tombstone
    /// cleared.
    #[serde(serialize_with = "lyceum_core::serde::to_rfc3339_ms_opt")]
    pub deleted_at: Option<chrono::DateTime<chrono::Utc>>,
}

fn unit_response(unit: AcademicUnit) -> UnitResponse {
    UnitResponse {
        id: unit.id.to_string(),
        parent_unit_id: unit.parent_unit_id.map(|id| id.to_string()),
        school_id: unit.school_id.to_string(),
        unit_type: unit.unit_type,
        name: unit.name,
        code: unit.code,
        description: unit.description,
        metadata: unit.metadata,
        is_active: unit.is_active,
        created_at: unit.created_at,
        updated_at: unit.updated_at,
        deleted_at: unit.deleted_at,
    }
}

// ── POST /api/v1/schools/{school_id}/units ───────────────────────────────────

#[derive(Deserialize)]
pub struct CreateUnitRequest {
    pub parent_unit_id: Option<Uuid>,
    #[serde(rename = "type")]
    pub unit_type: String,
    pub name: String,
    pub code: Option<String>,
    pub description: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

pub async fn create_unit(
    State(state): State<AppState>,
    Path(school_id): Path<Uuid>,
    Json(body): Json<CreateUnitRequest>,
) -> Result<(StatusCode, Json<UnitResponse>), AdminServiceError> {
    let usecase = CreateUnitUseCase {
        schools: state.school_repo(),
        units: state.unit_repo(),
    };
    let unit = usecase
        .execute(CreateUnitInput {
            school_id,
            parent_unit_id: body.parent_unit_id,
            unit_type: body.unit_type,
            name: body.name,
            code: body.code,
            description: body.description,
            metadata: body.metadata,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(unit_response(unit))))
}

// ── GET /api/v1/schools/{school_id}/units ────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct ListUnitsQuery {
    #[serde(rename = "type")]
    pub unit_type: Option<String>,
}

pub async fn list_units(
    State(state): State<AppState>,
    Path(school_id): Path<Uuid>,
    Query(query): Query<ListUnitsQuery>,
) -> Result<Json<Vec<UnitResponse>>, AdminServiceError> {
    let usecase = ListUnitsUseCase {
        units: state.unit_repo(),
    };
    let units = usecase.execute(school_id, query.unit_type.as_deref()).await?;
    Ok(Json(units.into_iter().map(unit_response).collect()))
}

// ── GET /api/v1/schools/{school_id}/units/tree ───────────────────────────────

pub async fn unit_tree(
    State(state): State<AppState>,
    Path(school_id): Path<Uuid>,
) -> Result<Json<Vec<UnitNode>>, AdminServiceError> {
    let usecase = UnitTreeUseCase {
        units: state.unit_repo(),
    };
    let tree = usecase.execute(school_id).await?;
    Ok(Json(tree))
}

// ── GET /api/v1/units/{id} ───────────────────────────────────────────────────

pub async fn get_unit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UnitResponse>, AdminServiceError> {
    let usecase = GetUnitUseCase {
        units: state.unit_repo(),
    };
    let unit = usecase.execute(id).await?;
    Ok(Json(unit_response(unit)))
}

// ── GET /api/v1/units/{id}/hierarchy-path ────────────────────────────────────

pub async fn hierarchy_path(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<UnitResponse>>, AdminServiceError> {
    let usecase = HierarchyPathUseCase {
        units: state.unit_repo(),
    };
    let path = usecase.execute(id).await?;
    Ok(Json(path.into_iter().map(unit_response).collect()))
}

// ── PUT /api/v1/units/{id} ─────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct UpdateUnitRequest {
    /// An empty string clears the parent, making the unit a root.
    pub parent_unit_id: Option<String>,
    #[serde(rename = "type")]
    pub unit_type: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub metadata: Option<serde_json::Value>,
}

pub async fn update_unit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateUnitRequest>,
) -> Result<Json<UnitResponse>, AdminServiceError> {
    let usecase = UpdateUnitUseCase {
        units: state.unit_repo(),
    };
    let unit = usecase
        .execute(
            id,
            UpdateUnitInput {
                parent_unit_id: body.parent_unit_id,
                unit_type: body.unit_type,
                name: body.name,
                description: body.description,
                is_active: body.is_active,
                metadata: body.metadata,
            },
        )
        .await?;
    Ok(Json(unit_response(unit)))
}

// ── DELETE /api/v1/units/{id} ────────────────────────────────────────────────

pub async fn delete_unit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AdminServiceError> {
    let usecase = DeleteUnitUseCase {
        units: state.unit_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /api/v1/units/{id}/restore ──────────────────────────────────────────

pub async fn restore_unit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UnitResponse>, AdminServiceError> {
    let usecase = RestoreUnitUseCase {
        units: state.unit_repo(),
    };
    let unit = usecase.execute(id).await?;
    Ok(Json(unit_response(unit)))
}
