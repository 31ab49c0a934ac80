//! JWT access-token validation.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;
#[cfg(any(feature = "USE_ONLY_IN_ADMIN_SERVICE", test))]
use serde::Serialize;
use uuid::Uuid;

use crate::context::ActiveContext;

/// Default access-token lifetime in seconds (15 minutes).
pub const ACCESS_TOKEN_EXP_SECS: u64 = 15 * 60;

/// Default refresh-token lifetime in seconds (7 days). The refresh token is
/// an opaque string minted for client-side API shape only; the server never
/// honors it.
pub const REFRESH_TOKEN_EXP_SECS: u64 = 7 * 24 * 60 * 60;

/// Clock-skew tolerance applied to `exp` and `iat` checks.
pub const CLOCK_SKEW_LEEWAY_SECS: u64 = 30;

/// Caller identity extracted from a validated access token.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub user_id: Uuid,
    pub email: String,
    /// Expiration timestamp (seconds since UNIX epoch).
    pub expires_at: u64,
    pub active_context: ActiveContext,
}

/// Errors returned by [`validate_access_token`].
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("issuer mismatch")]
    IssuerMismatch,
    #[error("token not yet valid")]
    NotYetValid,
    #[error("malformed token")]
    Malformed,
}

impl AuthError {
    /// Stable tag used in verify responses.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::InvalidSignature => "invalid_signature",
            Self::Expired => "expired",
            Self::IssuerMismatch => "issuer_mismatch",
            Self::NotYetValid => "not_yet_valid",
            Self::Malformed => "malformed",
        }
    }
}

/// JWT claims payload shared by token issuance (admin service) and validation
/// (sibling services).
///
/// # Feature gate
///
/// [`Deserialize`] is always available — all consumers validate tokens.
/// [`Serialize`] requires the **`USE_ONLY_IN_ADMIN_SERVICE`** cargo feature.
/// Only the admin service enables it because it is the sole token issuer.
#[derive(Debug, Deserialize)]
#[cfg_attr(any(feature = "USE_ONLY_IN_ADMIN_SERVICE", test), derive(Serialize))]
pub struct JwtClaims {
    /// Issuer.
    pub iss: String,
    /// User ID (UUID string).
    pub sub: String,
    pub email: String,
    /// Issued-at timestamp (seconds since UNIX epoch).
    pub iat: u64,
    /// Expiration timestamp (seconds since UNIX epoch).
    pub exp: u64,
    pub active_context: ActiveContext,
}

fn now_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

// ── Core decode (private) ────────────────────────────────────────────────

/// Decode and validate a JWT, returning raw claims.
///
/// Validation: HS256, signature, issuer equality, exp and iat checked with
/// [`CLOCK_SKEW_LEEWAY_SECS`] tolerance, required claims: `exp` + `sub`.
fn decode_jwt(token: &str, secret: &str, issuer: &str) -> Result<JwtClaims, AuthError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.leeway = CLOCK_SKEW_LEEWAY_SECS;
    validation.set_issuer(&[issuer]);
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub", "iss"]);

    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidIssuer => AuthError::IssuerMismatch,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    // jsonwebtoken does not check iat against the clock; enforce
    // issued-at <= now (with leeway) ourselves.
    if data.claims.iat > now_secs() + CLOCK_SKEW_LEEWAY_SECS {
        return Err(AuthError::NotYetValid);
    }

    Ok(data.claims)
}

// ── Public: all consumers ────────────────────────────────────────────────

/// Validate a bearer access token, returning the caller identity and the
/// active context embedded at issuance.
///
/// This is the primary public API for token validation. Sibling services
/// call this on every request with the shared HMAC secret.
pub fn validate_access_token(
    token: &str,
    secret: &str,
    issuer: &str,
) -> Result<TokenInfo, AuthError> {
    let claims = decode_jwt(token, secret, issuer)?;
    let user_id = claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| AuthError::Malformed)?;
    Ok(TokenInfo {
        user_id,
        email: claims.email,
        expires_at: claims.exp,
        active_context: claims.active_context,
    })
}
