//! Bearer-token validation and the per-route permission gate.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use lyceum_auth_types::token::{TokenInfo, validate_access_token};

use crate::error::AdminServiceError;
use crate::state::AppState;

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Validates the bearer access token and injects [`TokenInfo`] into request
/// extensions for downstream extractors. Any validation failure is a plain
/// 401; the failure detail is only surfaced by the verify endpoint.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AdminServiceError> {
    let token = bearer_token(&request).ok_or(AdminServiceError::Unauthorized)?;
    let info = validate_access_token(token, &state.jwt_secret, &state.jwt_issuer)
        .map_err(|_| AdminServiceError::Unauthorized)?;
    request.extensions_mut().insert(info);
    Ok(next.run(request).await)
}

/// Exact-string permission check against the token's embedded context. Runs
/// after [`require_auth`]; a request that skipped it carries no identity and
/// is rejected.
pub async fn require_permission(
    permission: &'static str,
    request: Request,
    next: Next,
) -> Result<Response, AdminServiceError> {
    let info = request
        .extensions()
        .get::<TokenInfo>()
        .ok_or(AdminServiceError::Unauthorized)?;
    if !info.active_context.has_permission(permission) {
        return Err(AdminServiceError::Forbidden {
            permission: permission.to_owned(),
        });
    }
    Ok(next.run(request).await)
}
