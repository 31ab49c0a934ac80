use sea_orm_migration::prelude::*;

/// Uniqueness that only applies to live rows. Tombstoned (or revoked) rows
/// keep their values so a later restore can detect collisions, which rules
/// out plain unique constraints here.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();
        conn.execute_unprepared(
            "CREATE UNIQUE INDEX uq_users_email_live \
             ON auth.users (email) \
             WHERE deleted_at IS NULL",
        )
        .await?;
        conn.execute_unprepared(
            "CREATE UNIQUE INDEX uq_schools_code_live \
             ON academic.schools (code) \
             WHERE deleted_at IS NULL",
        )
        .await?;
        conn.execute_unprepared(
            "CREATE UNIQUE INDEX uq_academic_units_school_code_live \
             ON academic.academic_units (school_id, code) \
             WHERE deleted_at IS NULL",
        )
        .await?;
        conn.execute_unprepared(
            "CREATE UNIQUE INDEX uq_subjects_school_name_live \
             ON academic.subjects (school_id, name) \
             WHERE deleted_at IS NULL",
        )
        .await?;
        conn.execute_unprepared(
            "CREATE UNIQUE INDEX uq_user_roles_grant_live \
             ON auth.user_roles (user_id, role_id, \
                 COALESCE(school_id, '00000000-0000-0000-0000-000000000000'), \
                 COALESCE(academic_unit_id, '00000000-0000-0000-0000-000000000000')) \
             WHERE is_active",
        )
        .await?;
        conn.execute_unprepared(
            "CREATE UNIQUE INDEX uq_guardian_relations_pair_live \
             ON academic.guardian_relations (guardian_id, student_id) \
             WHERE is_active",
        )
        .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();
        conn.execute_unprepared("DROP INDEX IF EXISTS academic.uq_guardian_relations_pair_live")
            .await?;
        conn.execute_unprepared("DROP INDEX IF EXISTS auth.uq_user_roles_grant_live")
            .await?;
        conn.execute_unprepared("DROP INDEX IF EXISTS academic.uq_subjects_school_name_live")
            .await?;
        conn.execute_unprepared("DROP INDEX IF EXISTS academic.uq_academic_units_school_code_live")
            .await?;
        conn.execute_unprepared("DROP INDEX IF EXISTS academic.uq_schools_code_live")
            .await?;
        conn.execute_unprepared("DROP INDEX IF EXISTS auth.uq_users_email_live")
            .await?;
        Ok(())
    }
}
