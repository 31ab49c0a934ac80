use sea_orm::entity::prelude::*;

/// Permission catalog row. `name` is globally unique, form `<resource>:<action>`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(schema_name = "iam", table_name = "permissions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub resource_id: Uuid,
    pub action: String,
    pub scope: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::resources::Entity",
        from = "Column::ResourceId",
        to = "super::resources::Column::Id"
    )]
    Resource,
    #[sea_orm(has_many = "super::resource_permissions::Entity")]
    ResourcePermissions,
}

impl Related<super::resources::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Resource.def()
    }
}

impl Related<super::resource_permissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ResourcePermissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
