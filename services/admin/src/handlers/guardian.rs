use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::GuardianRelation;
use crate::error::AdminServiceError;
use crate::state::AppState;
use crate::usecase::guardian::{
    CreateGuardianRelationInput, CreateGuardianRelationUseCase, DeactivateGuardianRelationUseCase,
    ListStudentGuardiansUseCase,
};

#[derive(Serialize)]
pub struct GuardianRelationResponse {
    pub id: String,
    pub guardian_id: String,
    pub student_id: String,
    pub relation_type: Option<String>,
    pub is_active: bool,
    #[serde(serialize_with = "lyceum_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

fn relation_response(relation: GuardianRelation) -> GuardianRelationResponse {
    GuardianRelationResponse {
        id: relation.id.to_string(),
        guardian_id: relation.guardian_id.to_string(),
        student_id: relation.student_id.to_string(),
        relation_type: relation.relation_type,
        is_active: relation.is_active,
        created_at: relation.created_at,
    }
}

// ── POST /api/v1/guardians ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateGuardianRelationRequest {
    pub guardian_id: Uuid,
    pub student_id: Uuid,
    pub relation_type: Option<String>,
}

pub async fn create_guardian_relation(
    State(state): State<AppState>,
    Json(body): Json<CreateGuardianRelationRequest>,
) -> Result<(StatusCode, Json<GuardianRelationResponse>), AdminServiceError> {
    let usecase = CreateGuardianRelationUseCase {
        guardians: state.guardian_repo(),
        users: state.user_repo(),
    };
    let relation = usecase
        .execute(CreateGuardianRelationInput {
            guardian_id: body.guardian_id,
            student_id: body.student_id,
            relation_type: body.relation_type,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(relation_response(relation))))
}

// ── GET /api/v1/students/{id}/guardians ──────────────────────────────────────

pub async fn list_student_guardians(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<Vec<GuardianRelationResponse>>, AdminServiceError> {
    let usecase = ListStudentGuardiansUseCase {
        guardians: state.guardian_repo(),
    };
    let relations = usecase.execute(student_id).await?;
    Ok(Json(relations.into_iter().map(relation_response).collect()))
}

// ── DELETE /api/v1/guardians/{id} ────────────────────────────────────────────

pub async fn deactivate_guardian_relation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AdminServiceError> {
    let usecase = DeactivateGuardianRelationUseCase {
        guardians: state.guardian_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
