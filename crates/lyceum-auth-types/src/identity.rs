//! Request extractor for the identity injected by the bearer middleware.

use axum::extract::FromRequestParts;
use http::StatusCode;
use http::request::Parts;

use crate::token::TokenInfo;

/// Caller identity placed into request extensions by the bearer-token
/// middleware after successful validation.
///
/// Returns 401 when no identity is present — the route is reachable without
/// having passed the auth middleware.
#[derive(Debug, Clone)]
pub struct Identity(pub TokenInfo);

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // In Rust 1.82+ precise capturing, `async fn` captures lifetimes differently,
    // causing E0195. Fix: extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let info = parts.extensions.get::<TokenInfo>().cloned();
        async move {
            let info = info.ok_or(StatusCode::UNAUTHORIZED)?;
            Ok(Self(info))
        }
    }
}
