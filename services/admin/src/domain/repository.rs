#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::types::{
    AcademicUnit, GuardianRelation, Membership, Permission, PlatformStats, Resource, Role, School,
    Subject, User, UserRole,
};
use crate::error::AdminServiceError;

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    /// Lookup by case-folded email. Excludes tombstoned rows.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AdminServiceError>;
    async fn find_by_id(
        &self,
        id: Uuid,
        include_deleted: bool,
    ) -> Result<Option<User>, AdminServiceError>;
    async fn list(&self) -> Result<Vec<User>, AdminServiceError>;
    async fn email_exists(&self, email: &str) -> Result<bool, AdminServiceError>;
    async fn create(&self, user: &User) -> Result<(), AdminServiceError>;
    async fn update(&self, user: &User) -> Result<(), AdminServiceError>;
    /// Tombstone. Returns `false` when no live row matched.
    async fn soft_delete(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, AdminServiceError>;
    /// Best-effort last-login touch; bumps `updated_at` only.
    async fn touch_updated_at(&self, id: Uuid) -> Result<(), AdminServiceError>;
}

/// Repository for role grants and the role→permission linkage.
pub trait GrantRepository: Send + Sync {
    /// Active grants for a user in the given tenant scope, each paired with
    /// its role, ordered by `granted_at ASC, role_id ASC`.
    async fn find_active_grants(
        &self,
        user_id: Uuid,
        school_id: Option<Uuid>,
    ) -> Result<Vec<(UserRole, Role)>, AdminServiceError>;

    /// Permission names reachable from the given roles (may contain duplicates).
    async fn permission_names_for_roles(
        &self,
        role_ids: &[Uuid],
    ) -> Result<Vec<String>, AdminServiceError>;

    /// Active grant matching the exact `(user, role, school, unit)` quadruple.
    async fn find_active(
        &self,
        user_id: Uuid,
        role_id: Uuid,
        school_id: Option<Uuid>,
        academic_unit_id: Option<Uuid>,
    ) -> Result<Option<UserRole>, AdminServiceError>;

    async fn create(&self, grant: &UserRole) -> Result<(), AdminServiceError>;

    /// Revoke a grant (`is_active = false`, `revoked_at` set). Returns `false`
    /// when no active grant matched.
    async fn revoke(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, AdminServiceError>;
}

/// Read-only access to the role/permission catalog.
pub trait CatalogRepository: Send + Sync {
    async fn list_roles(&self) -> Result<Vec<Role>, AdminServiceError>;
    async fn list_permissions(&self) -> Result<Vec<Permission>, AdminServiceError>;
    async fn find_role(&self, id: Uuid) -> Result<Option<Role>, AdminServiceError>;
}

/// Repository for tenants.
pub trait SchoolRepository: Send + Sync {
    async fn find_by_id(
        &self,
        id: Uuid,
        include_deleted: bool,
    ) -> Result<Option<School>, AdminServiceError>;
    async fn list(&self) -> Result<Vec<School>, AdminServiceError>;
    async fn code_exists(&self, code: &str) -> Result<bool, AdminServiceError>;
    async fn create(&self, school: &School) -> Result<(), AdminServiceError>;
    async fn update(&self, school: &School) -> Result<(), AdminServiceError>;
    async fn soft_delete(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, AdminServiceError>;
}

/// Repository for academic units.
pub trait UnitRepository: Send + Sync {
    async fn find_by_id(
        &self,
        id: Uuid,
        include_deleted: bool,
    ) -> Result<Option<AcademicUnit>, AdminServiceError>;
    /// Non-deleted units of a school, ordered `parent_unit_id NULLS FIRST, name`.
    async fn find_by_school(&self, school_id: Uuid)
    -> Result<Vec<AcademicUnit>, AdminServiceError>;
    async fn find_by_type(
        &self,
        school_id: Uuid,
        unit_type: &str,
    ) -> Result<Vec<AcademicUnit>, AdminServiceError>;
    /// Uniqueness pre-check within `(school_id, not-deleted)`.
    async fn code_exists(&self, school_id: Uuid, code: &str) -> Result<bool, AdminServiceError>;
    async fn create(&self, unit: &AcademicUnit) -> Result<(), AdminServiceError>;
    async fn update(&self, unit: &AcademicUnit) -> Result<(), AdminServiceError>;
    async fn soft_delete(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, AdminServiceError>;
    /// Clear the tombstone. Returns `false` when the row does not exist.
    async fn restore(&self, id: Uuid) -> Result<bool, AdminServiceError>;
}

/// Repository for subjects.
pub trait SubjectRepository: Send + Sync {
    async fn find_by_id(
        &self,
        id: Uuid,
        include_deleted: bool,
    ) -> Result<Option<Subject>, AdminServiceError>;
    async fn list_by_school(&self, school_id: Uuid) -> Result<Vec<Subject>, AdminServiceError>;
    async fn name_exists(&self, school_id: Uuid, name: &str) -> Result<bool, AdminServiceError>;
    async fn create(&self, subject: &Subject) -> Result<(), AdminServiceError>;
    async fn update(&self, subject: &Subject) -> Result<(), AdminServiceError>;
    async fn soft_delete(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, AdminServiceError>;
}

/// Repository for memberships.
pub trait MembershipRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Membership>, AdminServiceError>;
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Membership>, AdminServiceError>;
    async fn create(&self, membership: &Membership) -> Result<(), AdminServiceError>;
    /// Sets `withdrawn_at` and clears `is_active`. Returns `false` when no
    /// active membership matched.
    async fn expire(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, AdminServiceError>;
}

/// Repository for guardian–student relations.
pub trait GuardianRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<GuardianRelation>, AdminServiceError>;
    async fn list_by_student(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<GuardianRelation>, AdminServiceError>;
    async fn active_pair_exists(
        &self,
        guardian_id: Uuid,
        student_id: Uuid,
    ) -> Result<bool, AdminServiceError>;
    async fn create(&self, relation: &GuardianRelation) -> Result<(), AdminServiceError>;
    /// Deactivate a relation. Returns `false` when no active row matched.
    async fn deactivate(&self, id: Uuid) -> Result<bool, AdminServiceError>;
}

/// Read-only access to the resource registry.
pub trait ResourceRepository: Send + Sync {
    async fn list_menu_visible(&self) -> Result<Vec<Resource>, AdminServiceError>;
}

/// Global counters.
pub trait StatsRepository: Send + Sync {
    async fn platform_stats(&self) -> Result<PlatformStats, AdminServiceError>;
}
