use chrono::Utc;
use uuid::Uuid;

use crate::config::SchoolDefaults;
use crate::domain::repository::SchoolRepository;
use crate::domain::types::{MIN_CODE_LEN, MIN_NAME_LEN, School};
use crate::error::AdminServiceError;

// ── CreateSchool ─────────────────────────────────────────────────────────────

pub struct CreateSchoolInput {
    pub name: String,
    pub code: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subscription_tier: Option<String>,
    pub max_teachers: Option<i32>,
    pub max_students: Option<i32>,
    pub metadata: Option<serde_json::Value>,
}

pub struct CreateSchoolUseCase<R: SchoolRepository> {
    pub repo: R,
    pub defaults: SchoolDefaults,
}

impl<R: SchoolRepository> CreateSchoolUseCase<R> {
    pub async fn execute(&self, input: CreateSchoolInput) -> Result<School, AdminServiceError> {
        if input.name.chars().count() < MIN_NAME_LEN {
            return Err(AdminServiceError::Validation {
                field: "name",
                message: format!("name must be at least {MIN_NAME_LEN} characters"),
            });
        }
        if input.code.chars().count() < MIN_CODE_LEN {
            return Err(AdminServiceError::Validation {
                field: "code",
                message: format!("code must be at least {MIN_CODE_LEN} characters"),
            });
        }
        if self.repo.code_exists(&input.code).await? {
            return Err(AdminServiceError::AlreadyExists {
                field: "code",
                value: input.code,
            });
        }

        let now = Utc::now();
        let school = School {
            id: Uuid::new_v4(),
            name: input.name,
            code: input.code,
            address: input.address,
            city: input.city,
            country: input
                .country
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| self.defaults.country.clone()),
            email: input.email,
            phone: input.phone,
            subscription_tier: input
                .subscription_tier
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| self.defaults.subscription_tier.clone()),
            max_teachers: input
                .max_teachers
                .filter(|n| *n > 0)
                .unwrap_or(self.defaults.max_teachers),
            max_students: input
                .max_students
                .filter(|n| *n > 0)
                .unwrap_or(self.defaults.max_students),
            is_active: true,
            metadata: input.metadata.unwrap_or_else(|| serde_json::json!({})),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.repo.create(&school).await?;
        Ok(school)
    }
}

// ── GetSchool / ListSchools ──────────────────────────────────────────────────

pub struct GetSchoolUseCase<R: SchoolRepository> {
    pub repo: R,
}

impl<R: SchoolRepository> GetSchoolUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<School, AdminServiceError> {
        self.repo
            .find_by_id(id, false)
            .await?
            .ok_or(AdminServiceError::NotFound("school"))
    }
}

pub struct ListSchoolsUseCase<R: SchoolRepository> {
    pub repo: R,
}

impl<R: SchoolRepository> ListSchoolsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<School>, AdminServiceError> {
        self.repo.list().await
    }
}

// ── UpdateSchool ─────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct UpdateSchoolInput {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subscription_tier: Option<String>,
    pub max_teachers: Option<i32>,
    pub max_students: Option<i32>,
    pub is_active: Option<bool>,
    pub metadata: Option<serde_json::Value>,
}

pub struct UpdateSchoolUseCase<R: SchoolRepository> {
    pub repo: R,
}

impl<R: SchoolRepository> UpdateSchoolUseCase<R> {
    pub async fn execute(
        &self,
        id: Uuid,
        input: UpdateSchoolInput,
    ) -> Result<School, AdminServiceError> {
        let mut school = self
            .repo
            .find_by_id(id, false)
            .await?
            .ok_or(AdminServiceError::NotFound("school"))?;

        if let Some(name) = input.name {
            if name.chars().count() < MIN_NAME_LEN {
                return Err(AdminServiceError::Validation {
                    field: "name",
                    message: format!("name must be at least {MIN_NAME_LEN} characters"),
                });
            }
            school.name = name;
        }
        if let Some(address) = input.address {
            school.address = Some(address);
        }
        if let Some(city) = input.city {
            school.city = Some(city);
        }
        if let Some(country) = input.country {
            school.country = country;
        }
        if let Some(email) = input.email {
            school.email = Some(email);
        }
        if let Some(phone) = input.phone {
            school.phone = Some(phone);
        }
        if let Some(tier) = input.subscription_tier {
            school.subscription_tier = tier;
        }
        if let Some(max_teachers) = input.max_teachers {
            school.max_teachers = max_teachers;
        }
        if let Some(max_students) = input.max_students {
            school.max_students = max_students;
        }
        if let Some(is_active) = input.is_active {
            school.is_active = is_active;
        }
        if let Some(metadata) = input.metadata {
            school.metadata = metadata;
        }
        school.updated_at = Utc::now();

        self.repo.update(&school).await?;
        Ok(school)
    }
}

// ── DeleteSchool ─────────────────────────────────────────────────────────────

pub struct DeleteSchoolUseCase<R: SchoolRepository> {
    pub repo: R,
}

impl<R: SchoolRepository> DeleteSchoolUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<(), AdminServiceError> {
        let deleted = self.repo.soft_delete(id, Utc::now()).await?;
        if !deleted {
            return Err(AdminServiceError::NotFound("school"));
        }
        Ok(())
    }
}
