//! Test utilities for Lyceum services.
//!
//! Provides bearer-token minting and a `TestApp` wrapper around an axum
//! router. Import in `#[cfg(test)]` blocks and `tests/` only, never in
//! production code.

pub mod app;
pub mod auth;
