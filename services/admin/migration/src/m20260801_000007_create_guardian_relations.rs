use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table((Alias::new("academic"), GuardianRelations::Table))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GuardianRelations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GuardianRelations::GuardianId).uuid().not_null())
                    .col(ColumnDef::new(GuardianRelations::StudentId).uuid().not_null())
                    .col(ColumnDef::new(GuardianRelations::RelationType).string())
                    .col(
                        ColumnDef::new(GuardianRelations::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(GuardianRelations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(GuardianRelations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                (Alias::new("academic"), GuardianRelations::Table),
                                GuardianRelations::GuardianId,
                            )
                            .to((Alias::new("auth"), Users::Table), Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                (Alias::new("academic"), GuardianRelations::Table),
                                GuardianRelations::StudentId,
                            )
                            .to((Alias::new("auth"), Users::Table), Users::Id),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table((Alias::new("academic"), GuardianRelations::Table))
                    .col(GuardianRelations::StudentId)
                    .name("idx_guardian_relations_student_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table((Alias::new("academic"), GuardianRelations::Table))
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum GuardianRelations {
    Table,
    Id,
    GuardianId,
    StudentId,
    RelationType,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
