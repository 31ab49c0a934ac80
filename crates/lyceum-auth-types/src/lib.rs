//! Auth types shared across Lyceum services.
//!
//! Provides JWT validation, the active-context claim model, and the
//! `Identity` request extractor. Token issuance lives in the admin service;
//! sibling services depend on this crate to verify tokens with the shared
//! HMAC secret.

pub mod context;
pub mod identity;
pub mod token;
