use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table((Alias::new("academic"), AcademicUnits::Table))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AcademicUnits::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    // No FK on parent_unit_id: soft delete leaves orphans by
                    // design and restore may point at a tombstoned parent.
                    .col(ColumnDef::new(AcademicUnits::ParentUnitId).uuid())
                    .col(ColumnDef::new(AcademicUnits::SchoolId).uuid().not_null())
                    .col(ColumnDef::new(AcademicUnits::Type).string().not_null())
                    .col(ColumnDef::new(AcademicUnits::Name).string().not_null())
                    .col(ColumnDef::new(AcademicUnits::Code).string().not_null())
                    .col(ColumnDef::new(AcademicUnits::Description).string())
                    .col(
                        ColumnDef::new(AcademicUnits::Metadata)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'{}'::jsonb")),
                    )
                    .col(
                        ColumnDef::new(AcademicUnits::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(AcademicUnits::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(AcademicUnits::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(AcademicUnits::DeletedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                (Alias::new("academic"), AcademicUnits::Table),
                                AcademicUnits::SchoolId,
                            )
                            .to((Alias::new("academic"), Schools::Table), Schools::Id),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table((Alias::new("academic"), AcademicUnits::Table))
                    .col(AcademicUnits::SchoolId)
                    .name("idx_academic_units_school_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table((Alias::new("academic"), AcademicUnits::Table))
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum AcademicUnits {
    Table,
    Id,
    ParentUnitId,
    SchoolId,
    Type,
    Name,
    Code,
    Description,
    Metadata,
    IsActive,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(Iden)]
enum Schools {
    Table,
    Id,
}
