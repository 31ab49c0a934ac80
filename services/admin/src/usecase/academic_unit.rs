use chrono::Utc;
use rand::Rng as _;
use rand::distr::Alphanumeric;
use uuid::Uuid;

use crate::domain::repository::{SchoolRepository, UnitRepository};
use crate::domain::tree::{UnitNode, build_tree};
use crate::domain::types::{
    AcademicUnit, GENERATED_CODE_LEN, MAX_HIERARCHY_DEPTH, MIN_NAME_LEN,
};
use crate::error::AdminServiceError;

fn generate_code() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_CODE_LEN)
        .map(char::from)
        .collect::<String>()
        .to_uppercase()
}

/// True when `candidate` sits in the subtree rooted at `subject`, i.e. walking
/// `parent_unit_id` upward from `candidate` reaches `subject`. The walk is
/// capped so corrupted parent chains cannot loop forever.
async fn is_self_or_descendant<R: UnitRepository>(
    repo: &R,
    subject: Uuid,
    candidate: Uuid,
) -> Result<bool, AdminServiceError> {
    if candidate == subject {
        return Ok(true);
    }
    let mut current = candidate;
    for _ in 0..MAX_HIERARCHY_DEPTH {
        let unit = match repo.find_by_id(current, true).await? {
            Some(unit) => unit,
            None => return Ok(false),
        };
        match unit.parent_unit_id {
            Some(parent) if parent == subject => return Ok(true),
            Some(parent) => current = parent,
            None => return Ok(false),
        }
    }
    Err(AdminServiceError::DataCorruption("unit parent cycle"))
}

// ── CreateUnit ───────────────────────────────────────────────────────────────

pub struct CreateUnitInput {
    pub school_id: Uuid,
    pub parent_unit_id: Option<Uuid>,
    pub unit_type: String,
    pub name: String,
    pub code: Option<String>,
    pub description: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

pub struct CreateUnitUseCase<S: SchoolRepository, U: UnitRepository> {
    pub schools: S,
    pub units: U,
}

impl<S: SchoolRepository, U: UnitRepository> CreateUnitUseCase<S, U> {
    pub async fn execute(&self, input: CreateUnitInput) -> Result<AcademicUnit, AdminServiceError> {
        if input.name.chars().count() < MIN_NAME_LEN {
            return Err(AdminServiceError::Validation {
                field: "name",
                message: format!("name must be at least {MIN_NAME_LEN} characters"),
            });
        }
        if input.unit_type.is_empty() {
            return Err(AdminServiceError::Validation {
                field: "type",
                message: "type must not be empty".into(),
            });
        }

        self.schools
            .find_by_id(input.school_id, false)
            .await?
            .ok_or(AdminServiceError::NotFound("school"))?;

        if let Some(parent_id) = input.parent_unit_id {
            let parent = self
                .units
                .find_by_id(parent_id, false)
                .await?
                .ok_or_else(|| AdminServiceError::Validation {
                    field: "parent_unit_id",
                    message: "parent unit does not exist".into(),
                })?;
            if parent.school_id != input.school_id {
                return Err(AdminServiceError::Validation {
                    field: "parent_unit_id",
                    message: "parent unit belongs to a different school".into(),
                });
            }
        }

        let code = match input.code.filter(|c| !c.is_empty()) {
            Some(code) => code,
            None => generate_code(),
        };
        if self.units.code_exists(input.school_id, &code).await? {
            return Err(AdminServiceError::AlreadyExists {
                field: "code",
                value: code,
            });
        }

        let now = Utc::now();
        let unit = AcademicUnit {
            id: Uuid::new_v4(),
            parent_unit_id: input.parent_unit_id,
            school_id: input.school_id,
            unit_type: input.unit_type,
            name: input.name,
            code,
            description: input.description,
            metadata: input.metadata.unwrap_or_else(|| serde_json::json!({})),
            is_active: true,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.units.create(&unit).await?;
        Ok(unit)
    }
}

// ── GetUnit / ListUnits ──────────────────────────────────────────────────────

pub struct GetUnitUseCase<U: UnitRepository> {
    pub units: U,
}

impl<U: UnitRepository> GetUnitUseCase<U> {
    pub async fn execute(&self, id: Uuid) -> Result<AcademicUnit, AdminServiceError> {
        self.units
            .find_by_id(id, false)
            .await?
            .ok_or(AdminServiceError::NotFound("academic unit"))
    }
}

pub struct ListUnitsUseCase<U: UnitRepository> {
    pub units: U,
}

impl<U: UnitRepository> ListUnitsUseCase<U> {
    pub async fn execute(
        &self,
        school_id: Uuid,
        unit_type: Option<&str>,
    ) -> Result<Vec<AcademicUnit>, AdminServiceError> {
        match unit_type {
            Some(t) => self.units.find_by_type(school_id, t).await,
            None => self.units.find_by_school(school_id).await,
        }
    }
}

// ── UnitTree ─────────────────────────────────────────────────────────────────

pub struct UnitTreeUseCase<U: UnitRepository> {
    pub units: U,
}

impl<U: UnitRepository> UnitTreeUseCase<U> {
    pub async fn execute(&self, school_id: Uuid) -> Result<Vec<UnitNode>, AdminServiceError> {
        let units = self.units.find_by_school(school_id).await?;
        Ok(build_tree(&units))
    }
}

// ── HierarchyPath ────────────────────────────────────────────────────────────

pub struct HierarchyPathUseCase<U: UnitRepository> {
    pub units: U,
}

impl<U: UnitRepository> HierarchyPathUseCase<U> {
    /// Root-first path from the unit's root ancestor down to the unit itself.
    pub async fn execute(&self, id: Uuid) -> Result<Vec<AcademicUnit>, AdminServiceError> {
        let unit = self
            .units
            .find_by_id(id, false)
            .await?
            .ok_or(AdminServiceError::NotFound("academic unit"))?;

        let mut path = vec![unit];
        let mut seen = std::collections::HashSet::from([id]);
        while let Some(parent_id) = path.last().and_then(|u| u.parent_unit_id) {
            if path.len() >= MAX_HIERARCHY_DEPTH || !seen.insert(parent_id) {
                return Err(AdminServiceError::DataCorruption("unit parent cycle"));
            }
            // A tombstoned parent ends the path; the walk covers live units only.
            match self.units.find_by_id(parent_id, false).await? {
                Some(parent) => path.push(parent),
                None => break,
            }
        }
        path.reverse();
        Ok(path)
    }
}

// ── UpdateUnit ───────────────────────────────────────────────────────────────

/// `parent_unit_id: Some("")` is the sentinel for "make root".
#[derive(Default)]
pub struct UpdateUnitInput {
    pub parent_unit_id: Option<String>,
    pub unit_type: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub metadata: Option<serde_json::Value>,
}

pub struct UpdateUnitUseCase<U: UnitRepository> {
    pub units: U,
}

impl<U: UnitRepository> UpdateUnitUseCase<U> {
    pub async fn execute(
        &self,
        id: Uuid,
        input: UpdateUnitInput,
    ) -> Result<AcademicUnit, AdminServiceError> {
        let mut unit = self
            .units
            .find_by_id(id, false)
            .await?
            .ok_or(AdminServiceError::NotFound("academic unit"))?;

        if let Some(raw) = input.parent_unit_id {
            if raw.is_empty() {
                unit.parent_unit_id = None;
            } else {
                let parent_id: Uuid = raw.parse().map_err(|_| AdminServiceError::Validation {
                    field: "parent_unit_id",
                    message: "parent_unit_id must be a UUID".into(),
                })?;
                let parent = self
                    .units
                    .find_by_id(parent_id, false)
                    .await?
                    .ok_or_else(|| AdminServiceError::Validation {
                        field: "parent_unit_id",
                        message: "parent unit does not exist".into(),
                    })?;
                if parent.school_id != unit.school_id {
                    return Err(AdminServiceError::Validation {
                        field: "parent_unit_id",
                        message: "parent unit belongs to a different school".into(),
                    });
                }
                if is_self_or_descendant(&self.units, id, parent_id).await? {
                    return Err(AdminServiceError::Validation {
                        field: "parent_unit_id",
                        message: "parent unit would create a cycle".into(),
                    });
                }
                unit.parent_unit_id = Some(parent_id);
            }
        }
        if let Some(unit_type) = input.unit_type {
            unit.unit_type = unit_type;
        }
        if let Some(name) = input.name {
            if name.chars().count() < MIN_NAME_LEN {
                return Err(AdminServiceError::Validation {
                    field: "name",
                    message: format!("name must be at least {MIN_NAME_LEN} characters"),
                });
            }
            unit.name = name;
        }
        if let Some(description) = input.description {
            unit.description = Some(description);
        }
        if let Some(is_active) = input.is_active {
            unit.is_active = is_active;
        }
        if let Some(metadata) = input.metadata {
            unit.metadata = metadata;
        }
        unit.updated_at = Utc::now();

        self.units.update(&unit).await?;
        Ok(unit)
    }
}

// ── DeleteUnit / RestoreUnit ─────────────────────────────────────────────────

pub struct DeleteUnitUseCase<U: UnitRepository> {
    pub units: U,
}

impl<U: UnitRepository> DeleteUnitUseCase<U> {
    /// Tombstone without cascading; children are left orphaned on purpose so
    /// an accidental delete can be undone.
    pub async fn execute(&self, id: Uuid) -> Result<(), AdminServiceError> {
        let deleted = self.units.soft_delete(id, Utc::now()).await?;
        if !deleted {
            return Err(AdminServiceError::NotFound("academic unit"));
        }
        Ok(())
    }
}

pub struct RestoreUnitUseCase<U: UnitRepository> {
    pub units: U,
}

impl<U: UnitRepository> RestoreUnitUseCase<U> {
    /// Clears the tombstone. Succeeds even when the stored parent is still
    /// tombstoned; until the parent is restored too, the unit surfaces as a
    /// root in tree views.
    pub async fn execute(&self, id: Uuid) -> Result<AcademicUnit, AdminServiceError> {
        self.units
            .find_by_id(id, true)
            .await?
            .ok_or(AdminServiceError::NotFound("academic unit"))?;
        self.units.restore(id).await?;
        self.units
            .find_by_id(id, false)
            .await?
            .ok_or(AdminServiceError::NotFound("academic unit"))
    }
}
