use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::School;
use crate::error::AdminServiceError;
use crate::state::AppState;
use crate::usecase::school::{
    CreateSchoolInput, CreateSchoolUseCase, DeleteSchoolUseCase, GetSchoolUseCase,
    ListSchoolsUseCase, UpdateSchoolInput, UpdateSchoolUseCase,
};

#[derive(Serialize)]
pub struct SchoolResponse {
    pub id: String,
    pub name: String,
    pub code: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subscription_tier: String,
    pub max_teachers: i32,
    pub max_students: i32,
    pub is_active: bool,
    pub metadata: serde_json::Value,
    #[serde(serialize_with = "lyceum_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "lyceum_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

fn school_response(school: School) -> SchoolResponse {
    SchoolResponse {
        id: school.id.to_string(),
        name: school.name,
        code: school.code,
        address: school.address,
        city: school.city,
        country: school.country,
        email: school.email,
        phone: school.phone,
        subscription_tier: school.subscription_tier,
        max_teachers: school.max_teachers,
        max_students: school.max_students,
        is_active: school.is_active,
        metadata: school.metadata,
        created_at: school.created_at,
        updated_at: school.updated_at,
    }
}

// ── POST /api/v1/schools ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateSchoolRequest {
    pub name: String,
    pub code: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subscription_tier: Option<String>,
    pub max_teachers: Option<i32>,
    pub max_students: Option<i32>,
    pub metadata: Option<serde_json::Value>,
}

pub async fn create_school(
    State(state): State<AppState>,
    Json(body): Json<CreateSchoolRequest>,
) -> Result<(StatusCode, Json<SchoolResponse>), AdminServiceError> {
    let usecase = CreateSchoolUseCase {
        repo: state.school_repo(),
        defaults: state.school_defaults.clone(),
    };
    let school = usecase
        .execute(CreateSchoolInput {
            name: body.name,
            code: body.code,
            address: body.address,
            city: body.city,
            country: body.country,
            email: body.email,
            phone: body.phone,
            subscription_tier: body.subscription_tier,
            max_teachers: body.max_teachers,
            max_students: body.max_students,
            metadata: body.metadata,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(school_response(school))))
}

// ── GET /api/v1/schools ──────────────────────────────────────────────────────

pub async fn list_schools(
    State(state): State<AppState>,
) -> Result<Json<Vec<SchoolResponse>>, AdminServiceError> {
    let usecase = ListSchoolsUseCase {
        repo: state.school_repo(),
    };
    let schools = usecase.execute().await?;
    Ok(Json(schools.into_iter().map(school_response).collect()))
}

// ── GET /api/v1/schools/{id} ─────────────────────────────────────────────────

pub async fn get_school(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SchoolResponse>, AdminServiceError> {
    let usecase = GetSchoolUseCase {
        repo: state.school_repo(),
    };
    let school = usecase.execute(id).await?;
    Ok(Json(school_response(school)))
}

// ── PUT /api/v1/schools/{id} ───────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct UpdateSchoolRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subscription_tier: Option<String>,
    pub max_teachers: Option<i32>,
    pub max_students: Option<i32>,
    pub is_active: Option<bool>,
    pub metadata: Option<serde_json::Value>,
}

pub async fn update_school(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateSchoolRequest>,
) -> Result<Json<SchoolResponse>, AdminServiceError> {
    let usecase = UpdateSchoolUseCase {
        repo: state.school_repo(),
    };
    let school = usecase
        .execute(
            id,
            UpdateSchoolInput {
                name: body.name,
                address: body.address,
                city: body.city,
                country: body.country,
                email: body.email,
                phone: body.phone,
                subscription_tier: body.subscription_tier,
                max_teachers: body.max_teachers,
                max_students: body.max_students,
                is_active: body.is_active,
                metadata: body.metadata,
            },
        )
        .await?;
    Ok(Json(school_response(school)))
}

// ── DELETE /api/v1/schools/{id} ──────────────────────────────────────────────

pub async fn delete_school(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AdminServiceError> {
    let usecase = DeleteSchoolUseCase {
        repo: state.school_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
