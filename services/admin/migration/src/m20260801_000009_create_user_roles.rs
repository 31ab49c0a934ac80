use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table((Alias::new("auth"), UserRoles::Table))
                    .if_not_exists()
                    .col(ColumnDef::new(UserRoles::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(UserRoles::UserId).uuid().not_null())
                    .col(ColumnDef::new(UserRoles::RoleId).uuid().not_null())
                    .col(ColumnDef::new(UserRoles::SchoolId).uuid())
                    .col(ColumnDef::new(UserRoles::AcademicUnitId).uuid())
                    .col(
                        ColumnDef::new(UserRoles::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(UserRoles::GrantedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(UserRoles::GrantedBy).uuid())
                    .col(ColumnDef::new(UserRoles::RevokedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(UserRoles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(UserRoles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from((Alias::new("auth"), UserRoles::Table), UserRoles::UserId)
                            .to((Alias::new("auth"), Users::Table), Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from((Alias::new("auth"), UserRoles::Table), UserRoles::RoleId)
                            .to((Alias::new("iam"), Roles::Table), Roles::Id),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table((Alias::new("auth"), UserRoles::Table))
                    .col(UserRoles::UserId)
                    .name("idx_user_roles_user_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table((Alias::new("auth"), UserRoles::Table))
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum UserRoles {
    Table,
    Id,
    UserId,
    RoleId,
    SchoolId,
    AcademicUnitId,
    IsActive,
    GrantedAt,
    GrantedBy,
    RevokedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Roles {
    Table,
    Id,
}
