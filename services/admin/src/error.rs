use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Admin service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum AdminServiceError {
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{field} already exists")]
    AlreadyExists { field: &'static str, value: String },
    #[error("unauthorized")]
    Unauthorized,
    #[error("missing permission {permission}")]
    Forbidden { permission: String },
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("user is inactive")]
    UserInactive,
    #[error("invalid refresh token")]
    InvalidRefreshToken,
    #[error("user has no roles assigned")]
    NoRolesAssigned,
    #[error("data corruption: {0}")]
    DataCorruption(&'static str),
    /// Repository-layer failure. The `From` impl routes every `?` on an
    /// `anyhow` chain here; only `infra/db.rs` produces those.
    #[error("database error")]
    Database(#[from] anyhow::Error),
    #[error("internal error")]
    Internal(anyhow::Error),
}

impl AdminServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION",
            Self::NotFound(_) => "NOT_FOUND",
            Self::AlreadyExists { .. } => "ALREADY_EXISTS",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden { .. } => "FORBIDDEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::UserInactive => "USER_INACTIVE",
            Self::InvalidRefreshToken => "INVALID_REFRESH_TOKEN",
            Self::NoRolesAssigned => "NO_ROLES_ASSIGNED",
            Self::DataCorruption(_) => "DATA_CORRUPTION",
            Self::Database(_) => "DATABASE",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for AdminServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::AlreadyExists { .. } => StatusCode::CONFLICT,
            Self::Unauthorized | Self::InvalidCredentials | Self::InvalidRefreshToken => {
                StatusCode::UNAUTHORIZED
            }
            Self::Forbidden { .. } | Self::UserInactive => StatusCode::FORBIDDEN,
            Self::NoRolesAssigned
            | Self::DataCorruption(_)
            | Self::Database(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        match &self {
            Self::Database(e) => {
                tracing::error!(error = %e, kind = "DATABASE", "database error");
            }
            Self::Internal(e) => {
                tracing::error!(error = %e, kind = "INTERNAL", "internal error");
            }
            Self::NoRolesAssigned | Self::DataCorruption(_) => {
                tracing::error!(kind = self.kind(), "{self}");
            }
            _ => {}
        }
        let details = match &self {
            Self::Validation { field, .. } => {
                Some(serde_json::json!({ "field": field }))
            }
            Self::AlreadyExists { field, value } => {
                let mut map = serde_json::Map::new();
                map.insert((*field).to_owned(), serde_json::Value::String(value.clone()));
                Some(serde_json::Value::Object(map))
            }
            Self::Forbidden { permission } => {
                Some(serde_json::json!({ "permission": permission }))
            }
            _ => None,
        };
        let mut body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        if let Some(details) = details {
            body["details"] = details;
        }
        (status, axum::Json(body)).into_response()
    }
}
