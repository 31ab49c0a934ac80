use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::Subject;
use crate::error::AdminServiceError;
use crate::state::AppState;
use crate::usecase::subject::{
    CreateSubjectInput, CreateSubjectUseCase, DeleteSubjectUseCase, GetSubjectUseCase,
    ListSubjectsUseCase, UpdateSubjectInput, UpdateSubjectUseCase,
};

#[derive(Serialize)]
pub struct SubjectResponse {
    pub id: String,
    pub school_id: String,
    pub name: String,
    pub code: Option<String>,
    pub description: Option<String>,
    pub metadata: serde_json::Value,
    pub is_active: bool,
    #[serde(serialize_with = "lyceum_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "lyceum_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

fn subject_response(subject: Subject) -> SubjectResponse {
    SubjectResponse {
        id: subject.id.to_string(),
        school_id: subject.school_id.to_string(),
        name: subject.name,
        code: subject.code,
        description: subject.description,
        metadata: subject.metadata,
        is_active: subject.is_active,
        created_at: subject.created_at,
        updated_at: subject.updated_at,
    }
}

// ── POST /api/v1/schools/{school_id}/subjects ────────────────────────────────

#[derive(Deserialize)]
pub struct CreateSubjectRequest {
    pub name: String,
    pub code: Option<String>,
    pub description: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

pub async fn create_subject(
    State(state): State<AppState>,
    Path(school_id): Path<Uuid>,
    Json(body): Json<CreateSubjectRequest>,
) -> Result<(StatusCode, Json<SubjectResponse>), AdminServiceError> {
    let usecase = CreateSubjectUseCase {
        schools: state.school_repo(),
        subjects: state.subject_repo(),
    };
    let subject = usecase
        .execute(CreateSubjectInput {
            school_id,
            name: body.name,
            code: body.code,
            description: body.description,
            metadata: body.metadata,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(subject_response(subject))))
}

// ── GET /api/v1/schools/{school_id}/subjects ─────────────────────────────────

pub async fn list_subjects(
    State(state): State<AppState>,
    Path(school_id): Path<Uuid>,
) -> Result<Json<Vec<SubjectResponse>>, AdminServiceError> {
    let usecase = ListSubjectsUseCase {
        subjects: state.subject_repo(),
    };
    let subjects = usecase.execute(school_id).await?;
    Ok(Json(subjects.into_iter().map(subject_response).collect()))
}

// ── GET /api/v1/subjects/{id} ────────────────────────────────────────────────

pub async fn get_subject(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SubjectResponse>, AdminServiceError> {
    let usecase = GetSubjectUseCase {
        subjects: state.subject_repo(),
    };
    let subject = usecase.execute(id).await?;
    Ok(Json(subject_response(subject)))
}

// ── PUT /api/v1/subjects/{id} ──────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct UpdateSubjectRequest {
    pub name: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub metadata: Option<serde_json::Value>,
}

pub async fn update_subject(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateSubjectRequest>,
) -> Result<Json<SubjectResponse>, AdminServiceError> {
    let usecase = UpdateSubjectUseCase {
        subjects: state.subject_repo(),
    };
    let subject = usecase
        .execute(
            id,
            UpdateSubjectInput {
                name: body.name,
                code: body.code,
                description: body.description,
                is_active: body.is_active,
                metadata: body.metadata,
            },
        )
        .await?;
    Ok(Json(subject_response(subject)))
}

// ── DELETE /api/v1/subjects/{id} ─────────────────────────────────────────────

pub async fn delete_subject(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AdminServiceError> {
    let usecase = DeleteSubjectUseCase {
        subjects: state.subject_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
