use sea_orm::entity::prelude::*;

/// Node in a school's organizational tree (campus, grade, class, ...).
/// `code` is unique within `(school_id, not-deleted)` via a partial index.
/// Soft delete does not cascade; orphaned children surface as tree roots.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(schema_name = "academic", table_name = "academic_units")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub parent_unit_id: Option<Uuid>,
    pub school_id: Uuid,
    #[sea_orm(column_name = "type")]
    pub unit_type: String,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub metadata: Json,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::schools::Entity",
        from = "Column::SchoolId",
        to = "super::schools::Column::Id"
    )]
    School,
}

impl Related<super::schools::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::School.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
