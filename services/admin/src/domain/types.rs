use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

/// Admin-managed user account. `email` is the authentication key.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    /// Argon2id PHC string.
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    /// Home tenant; `None` for platform admins.
    pub school_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Tenant record. Uniqueness key is `code`.
#[derive(Debug, Clone)]
pub struct School {
    pub id: Uuid,
    pub name: String,
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
    pub metadata: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Node in a school's organizational tree (campus, grade, class, ...).
#[derive(Debug, Clone)]
pub struct AcademicUnit {
    pub id: Uuid,
    pub parent_unit_id: Option<Uuid>,
    pub school_id: Uuid,
    pub unit_type: String,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub metadata: Value,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Teaching subject, unique within `(school_id, name)` among live rows.
#[derive(Debug, Clone)]
pub struct Subject {
    pub id: Uuid,
    pub school_id: Uuid,
    pub name: String,
    pub code: Option<String>,
    pub description: Option<String>,
    pub metadata: Value,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Binds a user to a school and optional academic unit with a role tag.
/// `withdrawn_at` set implies `is_active = false`.
#[derive(Debug, Clone)]
pub struct Membership {
    pub id: Uuid,
    pub user_id: Uuid,
    pub school_id: Uuid,
    pub academic_unit_id: Option<Uuid>,
    pub role: String,
    pub enrolled_at: DateTime<Utc>,
    pub withdrawn_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub metadata: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Guardian–student relation. At most one active pair at a time.
#[derive(Debug, Clone)]
pub struct GuardianRelation {
    pub id: Uuid,
    pub guardian_id: Uuid,
    pub student_id: Uuid,
    pub relation_type: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Role catalog row.
#[derive(Debug, Clone)]
pub struct Role {
    pub id: Uuid,
    pub name: String,
    pub display_name: String,
    pub scope: String,
}

/// Permission catalog row, named `<resource>:<action>`.
#[derive(Debug, Clone)]
pub struct Permission {
    pub id: Uuid,
    pub name: String,
    pub resource_id: Uuid,
    pub action: String,
    pub scope: String,
}

/// Role grant for a user in a `(school, academic unit)` context.
#[derive(Debug, Clone)]
pub struct UserRole {
    pub id: Uuid,
    pub user_id: Uuid,
    pub role_id: Uuid,
    pub school_id: Option<Uuid>,
    pub academic_unit_id: Option<Uuid>,
    pub is_active: bool,
    pub granted_at: DateTime<Utc>,
    pub granted_by: Option<Uuid>,
    pub revoked_at: Option<DateTime<Utc>>,
}

/// Resource registry row; vertex of the authorization menu tree.
#[derive(Debug, Clone)]
pub struct Resource {
    pub id: Uuid,
    pub key: String,
    pub display_name: String,
    pub parent_id: Option<Uuid>,
    pub scope: String,
    pub is_menu_visible: bool,
}

/// Five scalar counters, tombstoned rows excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformStats {
    pub total_users: u64,
    pub active_users: u64,
    pub total_schools: u64,
    pub total_subjects: u64,
    pub total_guardian_relations: u64,
}

/// Minimum school and unit name length.
pub const MIN_NAME_LEN: usize = 3;

/// Minimum school code length.
pub const MIN_CODE_LEN: usize = 3;

/// Minimum subject name length.
pub const MIN_SUBJECT_NAME_LEN: usize = 2;

/// Minimum password length for admin-created accounts.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Length of a generated unit code when the caller omits one.
pub const GENERATED_CODE_LEN: usize = 8;

/// Upper bound on parent-chain walks. Covers any practical hierarchy and
/// bounds the walk when the stored parents are corrupted into a cycle.
pub const MAX_HIERARCHY_DEPTH: usize = 64;

/// Deadline for the detached last-login touch after a successful login.
pub const LAST_LOGIN_TOUCH_DEADLINE_SECS: u64 = 5;
