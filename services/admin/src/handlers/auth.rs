use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use lyceum_auth_types::context::ActiveContext;
use lyceum_auth_types::identity::Identity;
use lyceum_auth_types::token::{REFRESH_TOKEN_EXP_SECS, validate_access_token};

use crate::domain::repository::UserRepository as _;
use crate::domain::types::LAST_LOGIN_TOUCH_DEADLINE_SECS;
use crate::error::AdminServiceError;
use crate::state::AppState;
use crate::usecase::auth::{LoginInput, LoginUseCase};

// ── POST /api/v1/auth/login ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginUser {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub school_id: Option<String>,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    /// Access-token expiry (seconds since UNIX epoch).
    pub expires_at: u64,
    pub refresh_expires_in: u64,
    pub user: LoginUser,
    pub active_context: ActiveContext,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AdminServiceError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        grants: state.grant_repo(),
        jwt_secret: state.jwt_secret.clone(),
        jwt_issuer: state.jwt_issuer.clone(),
    };
    let output = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;

    // Last-login touch is detached from the response path; a slow or failed
    // write must not fail the login.
    let user_id = output.user.id;
    let repo = state.user_repo();
    tokio::spawn(async move {
        let deadline = std::time::Duration::from_secs(LAST_LOGIN_TOUCH_DEADLINE_SECS);
        match tokio::time::timeout(deadline, repo.touch_updated_at(user_id)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!(%user_id, error = %e, "last-login touch failed"),
            Err(_) => tracing::warn!(%user_id, "last-login touch timed out"),
        }
    });

    Ok(Json(LoginResponse {
        access_token: output.access_token,
        refresh_token: output.refresh_token,
        token_type: "Bearer",
        expires_at: output.access_token_exp,
        refresh_expires_in: REFRESH_TOKEN_EXP_SECS,
        user: LoginUser {
            id: output.user.id.to_string(),
            email: output.user.email,
            first_name: output.user.first_name,
            last_name: output.user.last_name,
            school_id: output.user.school_id.map(|id| id.to_string()),
        },
        active_context: output.active_context,
    }))
}

// ── POST /api/v1/auth/refresh ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RefreshRequest {
    #[allow(dead_code)]
    pub refresh_token: String,
}

/// Refresh tokens are minted for API shape only and never stored, so no
/// presented token can be honored.
pub async fn refresh(
    Json(_body): Json<RefreshRequest>,
) -> Result<StatusCode, AdminServiceError> {
    Err(AdminServiceError::InvalidRefreshToken)
}

// ── POST /api/v1/auth/verify ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyRequest {
    pub token: String,
}

#[derive(Serialize)]
pub struct VerifyResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_context: Option<ActiveContext>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
}

/// Introspection for sibling services. Always 200; validity lives in the body.
pub async fn verify(
    State(state): State<AppState>,
    Json(body): Json<VerifyRequest>,
) -> Json<VerifyResponse> {
    match validate_access_token(&body.token, &state.jwt_secret, &state.jwt_issuer) {
        Ok(info) => Json(VerifyResponse {
            valid: true,
            user_id: Some(info.user_id.to_string()),
            email: Some(info.email),
            expires_at: Some(info.expires_at),
            active_context: Some(info.active_context),
            error: None,
        }),
        Err(e) => Json(VerifyResponse {
            valid: false,
            user_id: None,
            email: None,
            expires_at: None,
            active_context: None,
            error: Some(e.tag()),
        }),
    }
}

// ── POST /api/v1/auth/logout ─────────────────────────────────────────────────

/// Stateless tokens cannot be revoked server-side; logout acknowledges the
/// client discarding its tokens.
pub async fn logout(_identity: Identity) -> StatusCode {
    StatusCode::OK
}
