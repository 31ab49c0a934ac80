use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();
        conn.execute_unprepared("CREATE SCHEMA IF NOT EXISTS auth").await?;
        conn.execute_unprepared("CREATE SCHEMA IF NOT EXISTS academic").await?;
        conn.execute_unprepared("CREATE SCHEMA IF NOT EXISTS iam").await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();
        conn.execute_unprepared("DROP SCHEMA IF EXISTS iam CASCADE").await?;
        conn.execute_unprepared("DROP SCHEMA IF EXISTS academic CASCADE").await?;
        conn.execute_unprepared("DROP SCHEMA IF EXISTS auth CASCADE").await?;
        Ok(())
    }
}
