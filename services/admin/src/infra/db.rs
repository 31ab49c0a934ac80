use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, NullOrdering};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use lyceum_admin_schema::{
    academic_units, guardian_relations, memberships, permissions, resource_permissions, resources,
    roles, schools, subjects, user_roles, users,
};

use crate::domain::repository::{
    CatalogRepository, GrantRepository, GuardianRepository, MembershipRepository,
    ResourceRepository, SchoolRepository, StatsRepository, SubjectRepository, UnitRepository,
    UserRepository,
};
use crate::domain::types::{
    AcademicUnit, GuardianRelation, Membership, Permission, PlatformStats, Resource, Role, School,
    Subject, User, UserRole,
};
use crate::error::AdminServiceError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AdminServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .filter(users::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_id(
        &self,
        id: Uuid,
        include_deleted: bool,
    ) -> Result<Option<User>, AdminServiceError> {
        let mut query = users::Entity::find_by_id(id);
        if !include_deleted {
            query = query.filter(users::Column::DeletedAt.is_null());
        }
        let model = query.one(&self.db).await.context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn list(&self) -> Result<Vec<User>, AdminServiceError> {
        let models = users::Entity::find()
            .filter(users::Column::DeletedAt.is_null())
            .order_by_asc(users::Column::Email)
            .all(&self.db)
            .await
            .context("list users")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, AdminServiceError> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .filter(users::Column::DeletedAt.is_null())
            .count(&self.db)
            .await
            .context("check email exists")?;
        Ok(count > 0)
    }

    async fn create(&self, user: &User) -> Result<(), AdminServiceError> {
        users::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            is_active: Set(user.is_active),
            school_id: Set(user.school_id),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
            deleted_at: Set(user.deleted_at),
        }
        .insert(&self.db)
        .await
        .context("create user")?;
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), AdminServiceError> {
        users::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            is_active: Set(user.is_active),
            school_id: Set(user.school_id),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
            deleted_at: Set(user.deleted_at),
        }
        .update(&self.db)
        .await
        .context("update user")?;
        Ok(())
    }

    async fn soft_delete(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, AdminServiceError> {
        let result = users::Entity::update_many()
            .col_expr(users::Column::DeletedAt, Expr::value(at))
            .col_expr(users::Column::UpdatedAt, Expr::value(at))
            .filter(users::Column::Id.eq(id))
            .filter(users::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .context("soft delete user")?;
        Ok(result.rows_affected > 0)
    }

    async fn touch_updated_at(&self, id: Uuid) -> Result<(), AdminServiceError> {
        users::Entity::update_many()
            .col_expr(users::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(users::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("touch user updated_at")?;
        Ok(())
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        password_hash: model.password_hash,
        first_name: model.first_name,
        last_name: model.last_name,
        is_active: model.is_active,
        school_id: model.school_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
        deleted_at: model.deleted_at,
    }
}

// ── Grant repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbGrantRepository {
    pub db: DatabaseConnection,
}

impl GrantRepository for DbGrantRepository {
    async fn find_active_grants(
        &self,
        user_id: Uuid,
        school_id: Option<Uuid>,
    ) -> Result<Vec<(UserRole, Role)>, AdminServiceError> {
        let mut query = user_roles::Entity::find()
            .find_also_related(roles::Entity)
            .filter(user_roles::Column::UserId.eq(user_id))
            .filter(user_roles::Column::IsActive.eq(true));
        // Grant scope must match the user's home tenant exactly.
        query = match school_id {
            Some(school_id) => query.filter(user_roles::Column::SchoolId.eq(school_id)),
            None => query.filter(user_roles::Column::SchoolId.is_null()),
        };
        let rows = query
            .order_by_asc(user_roles::Column::GrantedAt)
            .order_by_asc(user_roles::Column::RoleId)
            .all(&self.db)
            .await
            .context("find active grants")?;

        rows.into_iter()
            .map(|(grant, role)| {
                let role = role.ok_or(AdminServiceError::DataCorruption("grant without role"))?;
                Ok((grant_from_model(grant), role_from_model(role)))
            })
            .collect()
    }

    async fn permission_names_for_roles(
        &self,
        role_ids: &[Uuid],
    ) -> Result<Vec<String>, AdminServiceError> {
        let rows = resource_permissions::Entity::find()
            .find_also_related(permissions::Entity)
            .filter(resource_permissions::Column::RoleId.is_in(role_ids.to_vec()))
            .all(&self.db)
            .await
            .context("load permission names for roles")?;
        Ok(rows
            .into_iter()
            .filter_map(|(_, permission)| permission.map(|p| p.name))
            .collect())
    }

    async fn find_active(
        &self,
        user_id: Uuid,
        role_id: Uuid,
        school_id: Option<Uuid>,
        academic_unit_id: Option<Uuid>,
    ) -> Result<Option<UserRole>, AdminServiceError> {
        let mut query = user_roles::Entity::find()
            .filter(user_roles::Column::UserId.eq(user_id))
            .filter(user_roles::Column::RoleId.eq(role_id))
            .filter(user_roles::Column::IsActive.eq(true));
        query = match school_id {
            Some(school_id) => query.filter(user_roles::Column::SchoolId.eq(school_id)),
            None => query.filter(user_roles::Column::SchoolId.is_null()),
        };
        query = match academic_unit_id {
            Some(unit_id) => query.filter(user_roles::Column::AcademicUnitId.eq(unit_id)),
            None => query.filter(user_roles::Column::AcademicUnitId.is_null()),
        };
        let model = query.one(&self.db).await.context("find active grant")?;
        Ok(model.map(grant_from_model))
    }

    async fn create(&self, grant: &UserRole) -> Result<(), AdminServiceError> {
        user_roles::ActiveModel {
            id: Set(grant.id),
            user_id: Set(grant.user_id),
            role_id: Set(grant.role_id),
            school_id: Set(grant.school_id),
            academic_unit_id: Set(grant.academic_unit_id),
            is_active: Set(grant.is_active),
            granted_at: Set(grant.granted_at),
            granted_by: Set(grant.granted_by),
            revoked_at: Set(grant.revoked_at),
            created_at: Set(grant.granted_at),
            updated_at: Set(grant.granted_at),
        }
        .insert(&self.db)
        .await
        .context("create role grant")?;
        Ok(())
    }

    async fn revoke(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, AdminServiceError> {
        let result = user_roles::Entity::update_many()
            .col_expr(user_roles::Column::IsActive, Expr::value(false))
            .col_expr(user_roles::Column::RevokedAt, Expr::value(at))
            .col_expr(user_roles::Column::UpdatedAt, Expr::value(at))
            .filter(user_roles::Column::Id.eq(id))
            .filter(user_roles::Column::IsActive.eq(true))
            .exec(&self.db)
            .await
            .context("revoke role grant")?;
        Ok(result.rows_affected > 0)
    }
}

fn grant_from_model(model: user_roles::Model) -> UserRole {
    UserRole {
        id: model.id,
        user_id: model.user_id,
        role_id: model.role_id,
        school_id: model.school_id,
        academic_unit_id: model.academic_unit_id,
        is_active: model.is_active,
        granted_at: model.granted_at,
        granted_by: model.granted_by,
        revoked_at: model.revoked_at,
    }
}

fn role_from_model(model: roles::Model) -> Role {
    Role {
        id: model.id,
        name: model.name,
        display_name: model.display_name,
        scope: model.scope,
    }
}

// ── Catalog repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCatalogRepository {
    pub db: DatabaseConnection,
}

impl CatalogRepository for DbCatalogRepository {
    async fn list_roles(&self) -> Result<Vec<Role>, AdminServiceError> {
        let models = roles::Entity::find()
            .order_by_asc(roles::Column::Name)
            .all(&self.db)
            .await
            .context("list roles")?;
        Ok(models.into_iter().map(role_from_model).collect())
    }

    async fn list_permissions(&self) -> Result<Vec<Permission>, AdminServiceError> {
        let models = permissions::Entity::find()
            .order_by_asc(permissions::Column::Name)
            .all(&self.db)
            .await
            .context("list permissions")?;
        Ok(models
            .into_iter()
            .map(|m| Permission {
                id: m.id,
                name: m.name,
                resource_id: m.resource_id,
                action: m.action,
                scope: m.scope,
            })
            .collect())
    }

    async fn find_role(&self, id: Uuid) -> Result<Option<Role>, AdminServiceError> {
        let model = roles::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find role by id")?;
        Ok(model.map(role_from_model))
    }
}

// ── School repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSchoolRepository {
    pub db: DatabaseConnection,
}

impl SchoolRepository for DbSchoolRepository {
    async fn find_by_id(
        &self,
        id: Uuid,
        include_deleted: bool,
    ) -> Result<Option<School>, AdminServiceError> {
        let mut query = schools::Entity::find_by_id(id);
        if !include_deleted {
            query = query.filter(schools::Column::DeletedAt.is_null());
        }
        let model = query.one(&self.db).await.context("find school by id")?;
        Ok(model.map(school_from_model))
    }

    async fn list(&self) -> Result<Vec<School>, AdminServiceError> {
        let models = schools::Entity::find()
            .filter(schools::Column::DeletedAt.is_null())
            .order_by_asc(schools::Column::Name)
            .all(&self.db)
            .await
            .context("list schools")?;
        Ok(models.into_iter().map(school_from_model).collect())
    }

    async fn code_exists(&self, code: &str) -> Result<bool, AdminServiceError> {
        let count = schools::Entity::find()
            .filter(schools::Column::Code.eq(code))
            .filter(schools::Column::DeletedAt.is_null())
            .count(&self.db)
            .await
            .context("check school code exists")?;
        Ok(count > 0)
    }

    async fn create(&self, school: &School) -> Result<(), AdminServiceError> {
        school_active_model(school)
            .insert(&self.db)
            .await
            .context("create school")?;
        Ok(())
    }

    async fn update(&self, school: &School) -> Result<(), AdminServiceError> {
        school_active_model(school)
            .update(&self.db)
            .await
            .context("update school")?;
        Ok(())
    }

    async fn soft_delete(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, AdminServiceError> {
        let result = schools::Entity::update_many()
            .col_expr(schools::Column::DeletedAt, Expr::value(at))
            .col_expr(schools::Column::UpdatedAt, Expr::value(at))
            .filter(schools::Column::Id.eq(id))
            .filter(schools::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .context("soft delete school")?;
        Ok(result.rows_affected > 0)
    }
}

fn school_active_model(school: &School) -> schools::ActiveModel {
    schools::ActiveModel {
        id: Set(school.id),
        name: Set(school.name.clone()),
        code: Set(school.code.clone()),
        address: Set(school.address.clone()),
        city: Set(school.city.clone()),
        country: Set(school.country.clone()),
        email: Set(school.email.clone()),
        phone: Set(school.phone.clone()),
        subscription_tier: Set(school.subscription_tier.clone()),
        max_teachers: Set(school.max_teachers),
        max_students: Set(school.max_students),
        is_active: Set(school.is_active),
        metadata: Set(school.metadata.clone()),
        created_at: Set(school.created_at),
        updated_at: Set(school.updated_at),
        deleted_at: Set(school.deleted_at),
    }
}

fn school_from_model(model: schools::Model) -> School {
    School {
        id: model.id,
        name: model.name,
        code: model.code,
        address: model.address,
        city: model.city,
        country: model.country,
        email: model.email,
        phone: model.phone,
        subscription_tier: model.subscription_tier,
        max_teachers: model.max_teachers,
        max_students: model.max_students,
        is_active: model.is_active,
        metadata: model.metadata,
        created_at: model.created_at,
        updated_at: model.updated_at,
        deleted_at: model.deleted_at,
    }
}

// ── Unit repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUnitRepository {
    pub db: DatabaseConnection,
}

impl UnitRepository for DbUnitRepository {
    async fn find_by_id(
        &self,
        id: Uuid,
        include_deleted: bool,
    ) -> Result<Option<AcademicUnit>, AdminServiceError> {
        let mut query = academic_units::Entity::find_by_id(id);
        if !include_deleted {
            query = query.filter(academic_units::Column::DeletedAt.is_null());
        }
        let model = query.one(&self.db).await.context("find unit by id")?;
        Ok(model.map(unit_from_model))
    }

    async fn find_by_school(
        &self,
        school_id: Uuid,
    ) -> Result<Vec<AcademicUnit>, AdminServiceError> {
        // Postgres sorts ASC with NULLS LAST; roots must come first.
        let models = academic_units::Entity::find()
            .filter(academic_units::Column::SchoolId.eq(school_id))
            .filter(academic_units::Column::DeletedAt.is_null())
            .order_by_with_nulls(
                academic_units::Column::ParentUnitId,
                Order::Asc,
                NullOrdering::First,
            )
            .order_by_asc(academic_units::Column::Name)
            .all(&self.db)
            .await
            .context("list units by school")?;
        Ok(models.into_iter().map(unit_from_model).collect())
    }

    async fn find_by_type(
        &self,
        school_id: Uuid,
        unit_type: &str,
    ) -> Result<Vec<AcademicUnit>, AdminServiceError> {
        let models = academic_units::Entity::find()
            .filter(academic_units::Column::SchoolId.eq(school_id))
            .filter(academic_units::Column::UnitType.eq(unit_type))
            .filter(academic_units::Column::DeletedAt.is_null())
            .order_by_asc(academic_units::Column::Name)
            .all(&self.db)
            .await
            .context("list units by type")?;
        Ok(models.into_iter().map(unit_from_model).collect())
    }

    async fn code_exists(&self, school_id: Uuid, code: &str) -> Result<bool, AdminServiceError> {
        let count = academic_units::Entity::find()
            .filter(academic_units::Column::SchoolId.eq(school_id))
            .filter(academic_units::Column::Code.eq(code))
            .filter(academic_units::Column::DeletedAt.is_null())
            .count(&self.db)
            .await
            .context("check unit code exists")?;
        Ok(count > 0)
    }

    async fn create(&self, unit: &AcademicUnit) -> Result<(), AdminServiceError> {
        unit_active_model(unit)
            .insert(&self.db)
            .await
            .context("create unit")?;
        Ok(())
    }

    async fn update(&self, unit: &AcademicUnit) -> Result<(), AdminServiceError> {
        unit_active_model(unit)
            .update(&self.db)
            .await
            .context("update unit")?;
        Ok(())
    }

    async fn soft_delete(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, AdminServiceError> {
        let result = academic_units::Entity::update_many()
            .col_expr(academic_units::Column::DeletedAt, Expr::value(at))
            .col_expr(academic_units::Column::UpdatedAt, Expr::value(at))
            .filter(academic_units::Column::Id.eq(id))
            .filter(academic_units::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .context("soft delete unit")?;
        Ok(result.rows_affected > 0)
    }

    async fn restore(&self, id: Uuid) -> Result<bool, AdminServiceError> {
        let result = academic_units::Entity::update_many()
            .col_expr(
                academic_units::Column::DeletedAt,
                Expr::value(None::<DateTime<Utc>>),
            )
            .col_expr(academic_units::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(academic_units::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("restore unit")?;
        Ok(result.rows_affected > 0)
    }
}

fn unit_active_model(unit: &AcademicUnit) -> academic_units::ActiveModel {
    academic_units::ActiveModel {
        id: Set(unit.id),
        parent_unit_id: Set(unit.parent_unit_id),
        school_id: Set(unit.school_id),
        unit_type: Set(unit.unit_type.clone()),
        name: Set(unit.name.clone()),
        code: Set(unit.code.clone()),
        description: Set(unit.description.clone()),
        metadata: Set(unit.metadata.clone()),
        is_active: Set(unit.is_active),
        created_at: Set(unit.created_at),
        updated_at: Set(unit.updated_at),
        deleted_at: Set(unit.deleted_at),
    }
}

fn unit_from_model(model: academic_units::Model) -> AcademicUnit {
    AcademicUnit {
        id: model.id,
        parent_unit_id: model.parent_unit_id,
        school_id: model.school_id,
        unit_type: model.unit_type,
        name: model.name,
        code: model.code,
        description: model.description,
        metadata: model.metadata,
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
        deleted_at: model.deleted_at,
    }
}

// ── Subject repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSubjectRepository {
    pub db: DatabaseConnection,
}

impl SubjectRepository for DbSubjectRepository {
    async fn find_by_id(
        &self,
        id: Uuid,
        include_deleted: bool,
    ) -> Result<Option<Subject>, AdminServiceError> {
        let mut query = subjects::Entity::find_by_id(id);
        if !include_deleted {
            query = query.filter(subjects::Column::DeletedAt.is_null());
        }
        let model = query.one(&self.db).await.context("find subject by id")?;
        Ok(model.map(subject_from_model))
    }

    async fn list_by_school(&self, school_id: Uuid) -> Result<Vec<Subject>, AdminServiceError> {
        let models = subjects::Entity::find()
            .filter(subjects::Column::SchoolId.eq(school_id))
            .filter(subjects::Column::DeletedAt.is_null())
            .order_by_asc(subjects::Column::Name)
            .all(&self.db)
            .await
            .context("list subjects by school")?;
        Ok(models.into_iter().map(subject_from_model).collect())
    }

    async fn name_exists(&self, school_id: Uuid, name: &str) -> Result<bool, AdminServiceError> {
        let count = subjects::Entity::find()
            .filter(subjects::Column::SchoolId.eq(school_id))
            .filter(subjects::Column::Name.eq(name))
            .filter(subjects::Column::DeletedAt.is_null())
            .count(&self.db)
            .await
            .context("check subject name exists")?;
        Ok(count > 0)
    }

    async fn create(&self, subject: &Subject) -> Result<(), AdminServiceError> {
        subject_active_model(subject)
            .insert(&self.db)
            .await
            .context("create subject")?;
        Ok(())
    }

    async fn update(&self, subject: &Subject) -> Result<(), AdminServiceError> {
        subject_active_model(subject)
            .update(&self.db)
            .await
            .context("update subject")?;
        Ok(())
    }

    async fn soft_delete(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, AdminServiceError> {
        let result = subjects::Entity::update_many()
            .col_expr(subjects::Column::DeletedAt, Expr::value(at))
            .col_expr(subjects::Column::UpdatedAt, Expr::value(at))
            .filter(subjects::Column::Id.eq(id))
            .filter(subjects::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .context("soft delete subject")?;
        Ok(result.rows_affected > 0)
    }
}

fn subject_active_model(subject: &Subject) -> subjects::ActiveModel {
    subjects::ActiveModel {
        id: Set(subject.id),
        school_id: Set(subject.school_id),
        name: Set(subject.name.clone()),
        code: Set(subject.code.clone()),
        description: Set(subject.description.clone()),
        metadata: Set(subject.metadata.clone()),
        is_active: Set(subject.is_active),
        created_at: Set(subject.created_at),
        updated_at: Set(subject.updated_at),
        deleted_at: Set(subject.deleted_at),
    }
}

fn subject_from_model(model: subjects::Model) -> Subject {
    Subject {
        id: model.id,
        school_id: model.school_id,
        name: model.name,
        code: model.code,
        description: model.description,
        metadata: model.metadata,
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
        deleted_at: model.deleted_at,
    }
}

// ── Membership repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbMembershipRepository {
    pub db: DatabaseConnection,
}

impl MembershipRepository for DbMembershipRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Membership>, AdminServiceError> {
        let model = memberships::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find membership by id")?;
        Ok(model.map(membership_from_model))
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Membership>, AdminServiceError> {
        let models = memberships::Entity::find()
            .filter(memberships::Column::UserId.eq(user_id))
            .order_by_desc(memberships::Column::EnrolledAt)
            .all(&self.db)
            .await
            .context("list memberships by user")?;
        Ok(models.into_iter().map(membership_from_model).collect())
    }

    async fn create(&self, membership: &Membership) -> Result<(), AdminServiceError> {
        memberships::ActiveModel {
            id: Set(membership.id),
            user_id: Set(membership.user_id),
            school_id: Set(membership.school_id),
            academic_unit_id: Set(membership.academic_unit_id),
            role: Set(membership.role.clone()),
            enrolled_at: Set(membership.enrolled_at),
            withdrawn_at: Set(membership.withdrawn_at),
            is_active: Set(membership.is_active),
            metadata: Set(membership.metadata.clone()),
            created_at: Set(membership.created_at),
            updated_at: Set(membership.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create membership")?;
        Ok(())
    }

    async fn expire(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, AdminServiceError> {
        let result = memberships::Entity::update_many()
            .col_expr(memberships::Column::WithdrawnAt, Expr::value(at))
            .col_expr(memberships::Column::IsActive, Expr::value(false))
            .col_expr(memberships::Column::UpdatedAt, Expr::value(at))
            .filter(memberships::Column::Id.eq(id))
            .filter(memberships::Column::IsActive.eq(true))
            .exec(&self.db)
            .await
            .context("expire membership")?;
        Ok(result.rows_affected > 0)
    }
}

fn membership_from_model(model: memberships::Model) -> Membership {
    Membership {
        id: model.id,
        user_id: model.user_id,
        school_id: model.school_id,
        academic_unit_id: model.academic_unit_id,
        role: model.role,
        enrolled_at: model.enrolled_at,
        withdrawn_at: model.withdrawn_at,
        is_active: model.is_active,
        metadata: model.metadata,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Guardian repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbGuardianRepository {
    pub db: DatabaseConnection,
}

impl GuardianRepository for DbGuardianRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<GuardianRelation>, AdminServiceError> {
        let model = guardian_relations::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find guardian relation by id")?;
        Ok(model.map(relation_from_model))
    }

    async fn list_by_student(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<GuardianRelation>, AdminServiceError> {
        let models = guardian_relations::Entity::find()
            .filter(guardian_relations::Column::StudentId.eq(student_id))
            .filter(guardian_relations::Column::IsActive.eq(true))
            .order_by_asc(guardian_relations::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list guardians by student")?;
        Ok(models.into_iter().map(relation_from_model).collect())
    }

    async fn active_pair_exists(
        &self,
        guardian_id: Uuid,
        student_id: Uuid,
    ) -> Result<bool, AdminServiceError> {
        let count = guardian_relations::Entity::find()
            .filter(guardian_relations::Column::GuardianId.eq(guardian_id))
            .filter(guardian_relations::Column::StudentId.eq(student_id))
            .filter(guardian_relations::Column::IsActive.eq(true))
            .count(&self.db)
            .await
            .context("check active guardian pair")?;
        Ok(count > 0)
    }

    async fn create(&self, relation: &GuardianRelation) -> Result<(), AdminServiceError> {
        guardian_relations::ActiveModel {
            id: Set(relation.id),
            guardian_id: Set(relation.guardian_id),
            student_id: Set(relation.student_id),
            relation_type: Set(relation.relation_type.clone()),
            is_active: Set(relation.is_active),
            created_at: Set(relation.created_at),
            updated_at: Set(relation.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create guardian relation")?;
        Ok(())
    }

    async fn deactivate(&self, id: Uuid) -> Result<bool, AdminServiceError> {
        let result = guardian_relations::Entity::update_many()
            .col_expr(guardian_relations::Column::IsActive, Expr::value(false))
            .col_expr(guardian_relations::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(guardian_relations::Column::Id.eq(id))
            .filter(guardian_relations::Column::IsActive.eq(true))
            .exec(&self.db)
            .await
            .context("deactivate guardian relation")?;
        Ok(result.rows_affected > 0)
    }
}

fn relation_from_model(model: guardian_relations::Model) -> GuardianRelation {
    GuardianRelation {
        id: model.id,
        guardian_id: model.guardian_id,
        student_id: model.student_id,
        relation_type: model.relation_type,
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Resource repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbResourceRepository {
    pub db: DatabaseConnection,
}

impl ResourceRepository for DbResourceRepository {
    async fn list_menu_visible(&self) -> Result<Vec<Resource>, AdminServiceError> {
        let models = resources::Entity::find()
            .filter(resources::Column::IsMenuVisible.eq(true))
            .order_by_asc(resources::Column::DisplayName)
            .all(&self.db)
            .await
            .context("list menu-visible resources")?;
        Ok(models
            .into_iter()
            .map(|m| Resource {
                id: m.id,
                key: m.key,
                display_name: m.display_name,
                parent_id: m.parent_id,
                scope: m.scope,
                is_menu_visible: m.is_menu_visible,
            })
            .collect())
    }
}

// ── Stats repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbStatsRepository {
    pub db: DatabaseConnection,
}

impl StatsRepository for DbStatsRepository {
    async fn platform_stats(&self) -> Result<PlatformStats, AdminServiceError> {
        let total_users = users::Entity::find()
            .filter(users::Column::DeletedAt.is_null())
            .count(&self.db)
            .await
            .context("count users")?;
        let active_users = users::Entity::find()
            .filter(users::Column::DeletedAt.is_null())
            .filter(users::Column::IsActive.eq(true))
            .count(&self.db)
            .await
            .context("count active users")?;
        let total_schools = schools::Entity::find()
            .filter(schools::Column::DeletedAt.is_null())
            .count(&self.db)
            .await
            .context("count schools")?;
        let total_subjects = subjects::Entity::find()
            .filter(subjects::Column::DeletedAt.is_null())
            .count(&self.db)
            .await
            .context("count subjects")?;
        let total_guardian_relations = guardian_relations::Entity::find()
            .count(&self.db)
            .await
            .context("count guardian relations")?;

        Ok(PlatformStats {
            total_users,
            active_users,
            total_schools,
            total_subjects,
            total_guardian_relations,
        })
    }
}
