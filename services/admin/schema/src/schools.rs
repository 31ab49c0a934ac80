use sea_orm::entity::prelude::*;

/// Tenant record. Uniqueness key is `code`. Soft-deletable.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(schema_name = "academic", table_name = "schools")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub code: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subscription_tier: String,
    pub max_teachers: i32,
    pub max_students: i32,
    pub is_active: bool,
    pub metadata: Json,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::academic_units::Entity")]
    AcademicUnits,
}

impl Related<super::academic_units::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AcademicUnits.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
