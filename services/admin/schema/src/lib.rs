//! sea-orm entities for the admin service.
//!
//! Tables live in three Postgres schemas: `auth` (identities and grants),
//! `academic` (tenant data), and `iam` (the role/permission catalog).

pub mod academic_units;
pub mod guardian_relations;
pub mod memberships;
pub mod permissions;
pub mod resource_permissions;
pub mod resources;
pub mod roles;
pub mod schools;
pub mod subjects;
pub mod user_roles;
pub mod users;
