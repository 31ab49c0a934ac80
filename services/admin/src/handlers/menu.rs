use axum::{Json, extract::State};

use lyceum_auth_types::identity::Identity;

use crate::error::AdminServiceError;
use crate::state::AppState;
use crate::usecase::menu::{MenuEntry, MenuForUserUseCase};

// ── GET /api/v1/menu ─────────────────────────────────────────────────────────

/// Navigation menu filtered to the caller's own permission set. Requires a
/// valid token but no particular permission.
pub async fn menu(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<MenuEntry>>, AdminServiceError> {
    let usecase = MenuForUserUseCase {
        resources: state.resource_repo(),
    };
    let entries = usecase
        .execute(&identity.0.active_context.permissions)
        .await?;
    Ok(Json(entries))
}
