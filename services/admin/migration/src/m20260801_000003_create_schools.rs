use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table((Alias::new("academic"), Schools::Table))
                    .if_not_exists()
                    .col(ColumnDef::new(Schools::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Schools::Name).string().not_null())
                    // Uniqueness among live rows only; see the partial-index migration.
                    .col(ColumnDef::new(Schools::Code).string().not_null())
                    .col(ColumnDef::new(Schools::Address).string())
                    .col(ColumnDef::new(Schools::City).string())
                    .col(ColumnDef::new(Schools::Country).string().not_null())
                    .col(ColumnDef::new(Schools::Email).string())
                    .col(ColumnDef::new(Schools::Phone).string())
                    .col(ColumnDef::new(Schools::SubscriptionTier).string().not_null())
                    .col(ColumnDef::new(Schools::MaxTeachers).integer().not_null())
                    .col(ColumnDef::new(Schools::MaxStudents).integer().not_null())
                    .col(
                        ColumnDef::new(Schools::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Schools::Metadata)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'{}'::jsonb")),
                    )
                    .col(
                        ColumnDef::new(Schools::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Schools::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Schools::DeletedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table((Alias::new("academic"), Schools::Table))
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum Schools {
    Table,
    Id,
    Name,
    Code,
    Address,
    City,
    Country,
    Email,
    Phone,
    SubscriptionTier,
    MaxTeachers,
    MaxStudents,
    IsActive,
    Metadata,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
