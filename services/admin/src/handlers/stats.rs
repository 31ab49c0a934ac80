use axum::{Json, extract::State};
use serde::Serialize;

use crate::error::AdminServiceError;
use crate::state::AppState;
use crate::usecase::stats::PlatformStatsUseCase;

// ── GET /api/v1/stats ────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct PlatformStatsResponse {
    pub total_users: u64,
    pub active_users: u64,
    pub total_schools: u64,
    pub total_subjects: u64,
    pub total_guardian_relations: u64,
}

pub async fn platform_stats(
    State(state): State<AppState>,
) -> Result<Json<PlatformStatsResponse>, AdminServiceError> {
    let usecase = PlatformStatsUseCase {
        stats: state.stats_repo(),
    };
    let stats = usecase.execute().await?;
    Ok(Json(PlatformStatsResponse {
        total_users: stats.total_users,
        active_users: stats.active_users,
        total_schools: stats.total_schools,
        total_subjects: stats.total_subjects,
        total_guardian_relations: stats.total_guardian_relations,
    }))
}
