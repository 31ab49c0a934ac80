//! Domain helpers shared across the Lyceum platform.
//!
//! This crate contains only pure functions with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never in `infra/` or `handlers/`.

pub mod permission;
