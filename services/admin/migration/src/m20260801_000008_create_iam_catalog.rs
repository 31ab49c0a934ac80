use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table((Alias::new("iam"), Roles::Table))
                    .if_not_exists()
                    .col(ColumnDef::new(Roles::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Roles::Name).string().not_null())
                    .col(ColumnDef::new(Roles::DisplayName).string().not_null())
                    .col(ColumnDef::new(Roles::Scope).string().not_null())
                    .col(
                        ColumnDef::new(Roles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Roles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table((Alias::new("iam"), Roles::Table))
                    .col(Roles::Name)
                    .col(Roles::Scope)
                    .unique()
                    .name("uq_roles_name_scope")
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table((Alias::new("iam"), Resources::Table))
                    .if_not_exists()
                    .col(ColumnDef::new(Resources::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Resources::Key).string().not_null().unique_key())
                    .col(ColumnDef::new(Resources::DisplayName).string().not_null())
                    .col(ColumnDef::new(Resources::ParentId).uuid())
                    .col(ColumnDef::new(Resources::Scope).string().not_null())
                    .col(
                        ColumnDef::new(Resources::IsMenuVisible)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Resources::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Resources::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table((Alias::new("iam"), Permissions::Table))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Permissions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Permissions::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Permissions::ResourceId).uuid().not_null())
                    .col(ColumnDef::new(Permissions::Action).string().not_null())
                    .col(ColumnDef::new(Permissions::Scope).string().not_null())
                    .col(
                        ColumnDef::new(Permissions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Permissions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                (Alias::new("iam"), Permissions::Table),
                                Permissions::ResourceId,
                            )
                            .to((Alias::new("iam"), Resources::Table), Resources::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table((Alias::new("iam"), ResourcePermissions::Table))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ResourcePermissions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ResourcePermissions::RoleId).uuid().not_null())
                    .col(
                        ColumnDef::new(ResourcePermissions::PermissionId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ResourcePermissions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ResourcePermissions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                (Alias::new("iam"), ResourcePermissions::Table),
                                ResourcePermissions::RoleId,
                            )
                            .to((Alias::new("iam"), Roles::Table), Roles::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                (Alias::new("iam"), ResourcePermissions::Table),
                                ResourcePermissions::PermissionId,
                            )
                            .to((Alias::new("iam"), Permissions::Table), Permissions::Id),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table((Alias::new("iam"), ResourcePermissions::Table))
                    .col(ResourcePermissions::RoleId)
                    .col(ResourcePermissions::PermissionId)
                    .unique()
                    .name("uq_resource_permissions_role_permission")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table((Alias::new("iam"), ResourcePermissions::Table))
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table((Alias::new("iam"), Permissions::Table))
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table((Alias::new("iam"), Resources::Table))
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table((Alias::new("iam"), Roles::Table))
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum Roles {
    Table,
    Id,
    Name,
    DisplayName,
    Scope,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Resources {
    Table,
    Id,
    Key,
    DisplayName,
    ParentId,
    Scope,
    IsMenuVisible,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Permissions {
    Table,
    Id,
    Name,
    ResourceId,
    Action,
    Scope,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum ResourcePermissions {
    Table,
    Id,
    RoleId,
    PermissionId,
    CreatedAt,
    UpdatedAt,
}
