use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table((Alias::new("academic"), Memberships::Table))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Memberships::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Memberships::UserId).uuid().not_null())
                    .col(ColumnDef::new(Memberships::SchoolId).uuid().not_null())
                    .col(ColumnDef::new(Memberships::AcademicUnitId).uuid())
                    .col(ColumnDef::new(Memberships::Role).string().not_null())
                    .col(
                        ColumnDef::new(Memberships::EnrolledAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Memberships::WithdrawnAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Memberships::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Memberships::Metadata)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'{}'::jsonb")),
                    )
                    .col(
                        ColumnDef::new(Memberships::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Memberships::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                (Alias::new("academic"), Memberships::Table),
                                Memberships::UserId,
                            )
                            .to((Alias::new("auth"), Users::Table), Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                (Alias::new("academic"), Memberships::Table),
                                Memberships::SchoolId,
                            )
                            .to((Alias::new("academic"), Schools::Table), Schools::Id),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table((Alias::new("academic"), Memberships::Table))
                    .col(Memberships::UserId)
                    .name("idx_memberships_user_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table((Alias::new("academic"), Memberships::Table))
                    .col(Memberships::SchoolId)
                    .name("idx_memberships_school_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table((Alias::new("academic"), Memberships::Table))
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum Memberships {
    Table,
    Id,
    UserId,
    SchoolId,
    AcademicUnitId,
    Role,
    EnrolledAt,
    WithdrawnAt,
    IsActive,
    Metadata,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Schools {
    Table,
    Id,
}
