use sea_orm_migration::prelude::*;

mod m20260801_000001_create_schemas;
mod m20260801_000002_create_users;
mod m20260801_000003_create_schools;
mod m20260801_000004_create_academic_units;
mod m20260801_000005_create_subjects;
mod m20260801_000006_create_memberships;
mod m20260801_000007_create_guardian_relations;
mod m20260801_000008_create_iam_catalog;
mod m20260801_000009_create_user_roles;
mod m20260801_000010_add_partial_unique_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000001_create_schemas::Migration),
            Box::new(m20260801_000002_create_users::Migration),
            Box::new(m20260801_000003_create_schools::Migration),
            Box::new(m20260801_000004_create_academic_units::Migration),
            Box::new(m20260801_000005_create_subjects::Migration),
            Box::new(m20260801_000006_create_memberships::Migration),
            Box::new(m20260801_000007_create_guardian_relations::Migration),
            Box::new(m20260801_000008_create_iam_catalog::Migration),
            Box::new(m20260801_000009_create_user_roles::Migration),
            Box::new(m20260801_000010_add_partial_unique_indexes::Migration),
        ]
    }
}

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
