use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use lyceum_admin::domain::repository::{
    CatalogRepository, GrantRepository, GuardianRepository, MembershipRepository,
    SchoolRepository, SubjectRepository, UnitRepository, UserRepository,
};
use lyceum_admin::domain::types::{
    AcademicUnit, GuardianRelation, Membership, Permission, Role, School, Subject, User, UserRole,
};
use lyceum_admin::error::AdminServiceError;
use lyceum_admin::password;

// ── MockUserRepo ─────────────────────────────────────────────────────────────

pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn handle(&self) -> Arc<Mutex<Vec<User>>> {
        Arc::clone(&self.users)
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AdminServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email && u.deleted_at.is_none())
            .cloned())
    }

    async fn find_by_id(
        &self,
        id: Uuid,
        include_deleted: bool,
    ) -> Result<Option<User>, AdminServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id && (include_deleted || u.deleted_at.is_none()))
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, AdminServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.deleted_at.is_none())
            .cloned()
            .collect())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, AdminServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .any(|u| u.email == email && u.deleted_at.is_none()))
    }

    async fn create(&self, user: &User) -> Result<(), AdminServiceError> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), AdminServiceError> {
        let mut users = self.users.lock().unwrap();
        if let Some(existing) = users.iter_mut().find(|u| u.id == user.id) {
            *existing = user.clone();
        }
        Ok(())
    }

    async fn soft_delete(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, AdminServiceError> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.id == id && u.deleted_at.is_none()) {
            Some(user) => {
                user.deleted_at = Some(at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn touch_updated_at(&self, id: Uuid) -> Result<(), AdminServiceError> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            user.updated_at = Utc::now();
        }
        Ok(())
    }
}

// ── MockGrantRepo ────────────────────────────────────────────────────────────

pub struct MockGrantRepo {
    pub grants: Arc<Mutex<Vec<UserRole>>>,
    pub roles: Vec<Role>,
    pub role_permissions: HashMap<Uuid, Vec<String>>,
}

impl MockGrantRepo {
    pub fn new(
        grants: Vec<UserRole>,
        roles: Vec<Role>,
        role_permissions: HashMap<Uuid, Vec<String>>,
    ) -> Self {
        Self {
            grants: Arc::new(Mutex::new(grants)),
            roles,
            role_permissions,
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![], vec![], HashMap::new())
    }

    pub fn handle(&self) -> Arc<Mutex<Vec<UserRole>>> {
        Arc::clone(&self.grants)
    }
}

impl GrantRepository for MockGrantRepo {
    async fn find_active_grants(
        &self,
        user_id: Uuid,
        school_id: Option<Uuid>,
    ) -> Result<Vec<(UserRole, Role)>, AdminServiceError> {
        let mut rows: Vec<UserRole> = self
            .grants
            .lock()
            .unwrap()
            .iter()
            .filter(|g| g.user_id == user_id && g.is_active && g.school_id == school_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            a.granted_at
                .cmp(&b.granted_at)
                .then(a.role_id.cmp(&b.role_id))
        });
        rows.into_iter()
            .map(|grant| {
                let role = self
                    .roles
                    .iter()
                    .find(|r| r.id == grant.role_id)
                    .cloned()
                    .ok_or(AdminServiceError::DataCorruption("grant without role"))?;
                Ok((grant, role))
            })
            .collect()
    }

    async fn permission_names_for_roles(
        &self,
        role_ids: &[Uuid],
    ) -> Result<Vec<String>, AdminServiceError> {
        Ok(role_ids
            .iter()
            .filter_map(|id| self.role_permissions.get(id))
            .flatten()
            .cloned()
            .collect())
    }

    async fn find_active(
        &self,
        user_id: Uuid,
        role_id: Uuid,
        school_id: Option<Uuid>,
        academic_unit_id: Option<Uuid>,
    ) -> Result<Option<UserRole>, AdminServiceError> {
        Ok(self
            .grants
            .lock()
            .unwrap()
            .iter()
            .find(|g| {
                g.user_id == user_id
                    && g.role_id == role_id
                    && g.school_id == school_id
                    && g.academic_unit_id == academic_unit_id
                    && g.is_active
            })
            .cloned())
    }

    async fn create(&self, grant: &UserRole) -> Result<(), AdminServiceError> {
        self.grants.lock().unwrap().push(grant.clone());
        Ok(())
    }

    async fn revoke(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, AdminServiceError> {
        let mut grants = self.grants.lock().unwrap();
        match grants.iter_mut().find(|g| g.id == id && g.is_active) {
            Some(grant) => {
                grant.is_active = false;
                grant.revoked_at = Some(at);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ── MockCatalogRepo ──────────────────────────────────────────────────────────

pub struct MockCatalogRepo {
    pub roles: Vec<Role>,
    pub permissions: Vec<Permission>,
}

impl MockCatalogRepo {
    pub fn new(roles: Vec<Role>) -> Self {
        Self {
            roles,
            permissions: vec![],
        }
    }
}

impl CatalogRepository for MockCatalogRepo {
    async fn list_roles(&self) -> Result<Vec<Role>, AdminServiceError> {
        Ok(self.roles.clone())
    }

    async fn list_permissions(&self) -> Result<Vec<Permission>, AdminServiceError> {
        Ok(self.permissions.clone())
    }

    async fn find_role(&self, id: Uuid) -> Result<Option<Role>, AdminServiceError> {
        Ok(self.roles.iter().find(|r| r.id == id).cloned())
    }
}

// ── MockSchoolRepo ───────────────────────────────────────────────────────────

pub struct MockSchoolRepo {
    pub schools: Arc<Mutex<Vec<School>>>,
}

impl MockSchoolRepo {
    pub fn new(schools: Vec<School>) -> Self {
        Self {
            schools: Arc::new(Mutex::new(schools)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn handle(&self) -> Arc<Mutex<Vec<School>>> {
        Arc::clone(&self.schools)
    }
}

impl SchoolRepository for MockSchoolRepo {
    async fn find_by_id(
        &self,
        id: Uuid,
        include_deleted: bool,
    ) -> Result<Option<School>, AdminServiceError> {
        Ok(self
            .schools
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id && (include_deleted || s.deleted_at.is_none()))
            .cloned())
    }

    async fn list(&self) -> Result<Vec<School>, AdminServiceError> {
        Ok(self
            .schools
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.deleted_at.is_none())
            .cloned()
            .collect())
    }

    async fn code_exists(&self, code: &str) -> Result<bool, AdminServiceError> {
        Ok(self
            .schools
            .lock()
            .unwrap()
            .iter()
            .any(|s| s.code == code && s.deleted_at.is_none()))
    }

    async fn create(&self, school: &School) -> Result<(), AdminServiceError> {
        self.schools.lock().unwrap().push(school.clone());
        Ok(())
    }

    async fn update(&self, school: &School) -> Result<(), AdminServiceError> {
        let mut schools = self.schools.lock().unwrap();
        if let Some(existing) = schools.iter_mut().find(|s| s.id == school.id) {
            *existing = school.clone();
        }
        Ok(())
    }

    async fn soft_delete(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, AdminServiceError> {
        let mut schools = self.schools.lock().unwrap();
        match schools.iter_mut().find(|s| s.id == id && s.deleted_at.is_none()) {
            Some(school) => {
                school.deleted_at = Some(at);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ── MockUnitRepo ─────────────────────────────────────────────────────────────

pub struct MockUnitRepo {
    pub units: Arc<Mutex<Vec<AcademicUnit>>>,
}

impl MockUnitRepo {
    pub fn new(units: Vec<AcademicUnit>) -> Self {
        Self {
            units: Arc::new(Mutex::new(units)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn handle(&self) -> Arc<Mutex<Vec<AcademicUnit>>> {
        Arc::clone(&self.units)
    }
}

impl UnitRepository for MockUnitRepo {
    async fn find_by_id(
        &self,
        id: Uuid,
        include_deleted: bool,
    ) -> Result<Option<AcademicUnit>, AdminServiceError> {
        Ok(self
            .units
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id && (include_deleted || u.deleted_at.is_none()))
            .cloned())
    }

    async fn find_by_school(
        &self,
        school_id: Uuid,
    ) -> Result<Vec<AcademicUnit>, AdminServiceError> {
        let mut units: Vec<AcademicUnit> = self
            .units
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.school_id == school_id && u.deleted_at.is_none())
            .cloned()
            .collect();
        // parent NULLS FIRST, then name, like the live query.
        units.sort_by(|a, b| {
            a.parent_unit_id
                .is_some()
                .cmp(&b.parent_unit_id.is_some())
                .then_with(|| a.parent_unit_id.cmp(&b.parent_unit_id))
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(units)
    }

    async fn find_by_type(
        &self,
        school_id: Uuid,
        unit_type: &str,
    ) -> Result<Vec<AcademicUnit>, AdminServiceError> {
        Ok(self
            .units
            .lock()
            .unwrap()
            .iter()
            .filter(|u| {
                u.school_id == school_id && u.unit_type == unit_type && u.deleted_at.is_none()
            })
            .cloned()
            .collect())
    }

    async fn code_exists(&self, school_id: Uuid, code: &str) -> Result<bool, AdminServiceError> {
        Ok(self
            .units
            .lock()
            .unwrap()
            .iter()
            .any(|u| u.school_id == school_id && u.code == code && u.deleted_at.is_none()))
    }

    async fn create(&self, unit: &AcademicUnit) -> Result<(), AdminServiceError> {
        self.units.lock().unwrap().push(unit.clone());
        Ok(())
    }

    async fn update(&self, unit: &AcademicUnit) -> Result<(), AdminServiceError> {
        let mut units = self.units.lock().unwrap();
        if let Some(existing) = units.iter_mut().find(|u| u.id == unit.id) {
            *existing = unit.clone();
        }
        Ok(())
    }

    async fn soft_delete(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, AdminServiceError> {
        let mut units = self.units.lock().unwrap();
        match units.iter_mut().find(|u| u.id == id && u.deleted_at.is_none()) {
            Some(unit) => {
                unit.deleted_at = Some(at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn restore(&self, id: Uuid) -> Result<bool, AdminServiceError> {
        let mut units = self.units.lock().unwrap();
        match units.iter_mut().find(|u| u.id == id) {
            Some(unit) => {
                unit.deleted_at = None;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ── MockSubjectRepo ──────────────────────────────────────────────────────────

pub struct MockSubjectRepo {
    pub subjects: Arc<Mutex<Vec<Subject>>>,
}

impl MockSubjectRepo {
    pub fn new(subjects: Vec<Subject>) -> Self {
        Self {
            subjects: Arc::new(Mutex::new(subjects)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }
}

impl SubjectRepository for MockSubjectRepo {
    async fn find_by_id(
        &self,
        id: Uuid,
        include_deleted: bool,
    ) -> Result<Option<Subject>, AdminServiceError> {
        Ok(self
            .subjects
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id && (include_deleted || s.deleted_at.is_none()))
            .cloned())
    }

    async fn list_by_school(&self, school_id: Uuid) -> Result<Vec<Subject>, AdminServiceError> {
        Ok(self
            .subjects
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.school_id == school_id && s.deleted_at.is_none())
            .cloned()
            .collect())
    }

    async fn name_exists(&self, school_id: Uuid, name: &str) -> Result<bool, AdminServiceError> {
        Ok(self
            .subjects
            .lock()
            .unwrap()
            .iter()
            .any(|s| s.school_id == school_id && s.name == name && s.deleted_at.is_none()))
    }

    async fn create(&self, subject: &Subject) -> Result<(), AdminServiceError> {
        self.subjects.lock().unwrap().push(subject.clone());
        Ok(())
    }

    async fn update(&self, subject: &Subject) -> Result<(), AdminServiceError> {
        let mut subjects = self.subjects.lock().unwrap();
        if let Some(existing) = subjects.iter_mut().find(|s| s.id == subject.id) {
            *existing = subject.clone();
        }
        Ok(())
    }

    async fn soft_delete(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, AdminServiceError> {
        let mut subjects = self.subjects.lock().unwrap();
        match subjects.iter_mut().find(|s| s.id == id && s.deleted_at.is_none()) {
            Some(subject) => {
                subject.deleted_at = Some(at);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ── MockMembershipRepo ───────────────────────────────────────────────────────

pub struct MockMembershipRepo {
    pub memberships: Arc<Mutex<Vec<Membership>>>,
}

impl MockMembershipRepo {
    pub fn new(memberships: Vec<Membership>) -> Self {
        Self {
            memberships: Arc::new(Mutex::new(memberships)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn handle(&self) -> Arc<Mutex<Vec<Membership>>> {
        Arc::clone(&self.memberships)
    }
}

impl MembershipRepository for MockMembershipRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Membership>, AdminServiceError> {
        Ok(self
            .memberships
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .cloned())
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Membership>, AdminServiceError> {
        Ok(self
            .memberships
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create(&self, membership: &Membership) -> Result<(), AdminServiceError> {
        self.memberships.lock().unwrap().push(membership.clone());
        Ok(())
    }

    async fn expire(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, AdminServiceError> {
        let mut memberships = self.memberships.lock().unwrap();
        match memberships.iter_mut().find(|m| m.id == id && m.is_active) {
            Some(membership) => {
                membership.withdrawn_at = Some(at);
                membership.is_active = false;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ── MockGuardianRepo ─────────────────────────────────────────────────────────

pub struct MockGuardianRepo {
    pub relations: Arc<Mutex<Vec<GuardianRelation>>>,
}

impl MockGuardianRepo {
    pub fn new(relations: Vec<GuardianRelation>) -> Self {
        Self {
            relations: Arc::new(Mutex::new(relations)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn handle(&self) -> Arc<Mutex<Vec<GuardianRelation>>> {
        Arc::clone(&self.relations)
    }
}

impl GuardianRepository for MockGuardianRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<GuardianRelation>, AdminServiceError> {
        Ok(self
            .relations
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn list_by_student(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<GuardianRelation>, AdminServiceError> {
        Ok(self
            .relations
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.student_id == student_id && r.is_active)
            .cloned()
            .collect())
    }

    async fn active_pair_exists(
        &self,
        guardian_id: Uuid,
        student_id: Uuid,
    ) -> Result<bool, AdminServiceError> {
        Ok(self
            .relations
            .lock()
            .unwrap()
            .iter()
            .any(|r| r.guardian_id == guardian_id && r.student_id == student_id && r.is_active))
    }

    async fn create(&self, relation: &GuardianRelation) -> Result<(), AdminServiceError> {
        self.relations.lock().unwrap().push(relation.clone());
        Ok(())
    }

    async fn deactivate(&self, id: Uuid) -> Result<bool, AdminServiceError> {
        let mut relations = self.relations.lock().unwrap();
        match relations.iter_mut().find(|r| r.id == id && r.is_active) {
            Some(relation) => {
                relation.is_active = false;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ── Test fixture helpers ─────────────────────────────────────────────────────

pub const TEST_PASSWORD: &str = "correct-horse-battery";

pub fn test_user(email: &str) -> User {
    let now = Utc::now();
    User {
        id: Uuid::new_v4(),
        email: email.to_owned(),
        password_hash: password::hash_password(TEST_PASSWORD).unwrap(),
        first_name: "Test".to_owned(),
        last_name: "User".to_owned(),
        is_active: true,
        school_id: None,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    }
}

pub fn test_school(code: &str) -> School {
    let now = Utc::now();
    School {
        id: Uuid::new_v4(),
        name: format!("School {code}"),
        code: code.to_owned(),
        address: None,
        city: None,
        country: "US".to_owned(),
        email: None,
        phone: None,
        subscription_tier: "basic".to_owned(),
        max_teachers: 50,
        max_students: 1000,
        is_active: true,
        metadata: serde_json::json!({}),
        created_at: now,
        updated_at: now,
        deleted_at: None,
    }
}

pub fn test_unit(school_id: Uuid, name: &str, parent: Option<Uuid>) -> AcademicUnit {
    let now = Utc::now();
    AcademicUnit {
        id: Uuid::new_v4(),
        parent_unit_id: parent,
        school_id,
        unit_type: "class".to_owned(),
        name: name.to_owned(),
        code: name.to_uppercase().replace(' ', "-"),
        description: None,
        metadata: serde_json::json!({}),
        is_active: true,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    }
}

pub fn test_role(name: &str) -> Role {
    Role {
        id: Uuid::new_v4(),
        name: name.to_owned(),
        display_name: name.to_owned(),
        scope: "platform".to_owned(),
    }
}

pub fn test_grant(user_id: Uuid, role_id: Uuid, school_id: Option<Uuid>) -> UserRole {
    UserRole {
        id: Uuid::new_v4(),
        user_id,
        role_id,
        school_id,
        academic_unit_id: None,
        is_active: true,
        granted_at: Utc::now(),
        granted_by: None,
        revoked_at: None,
    }
}
