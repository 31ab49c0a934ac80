use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{SchoolRepository, SubjectRepository};
use crate::domain::types::{MIN_SUBJECT_NAME_LEN, Subject};
use crate::error::AdminServiceError;

// ── CreateSubject ────────────────────────────────────────────────────────────

pub struct CreateSubjectInput {
    pub school_id: Uuid,
    pub name: String,
    pub code: Option<String>,
    pub description: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

pub struct CreateSubjectUseCase<S: SchoolRepository, R: SubjectRepository> {
    pub schools: S,
    pub subjects: R,
}

impl<S: SchoolRepository, R: SubjectRepository> CreateSubjectUseCase<S, R> {
    pub async fn execute(&self, input: CreateSubjectInput) -> Result<Subject, AdminServiceError> {
        if input.name.chars().count() < MIN_SUBJECT_NAME_LEN {
            return Err(AdminServiceError::Validation {
                field: "name",
                message: format!("name must be at least {MIN_SUBJECT_NAME_LEN} characters"),
            });
        }
        self.schools
            .find_by_id(input.school_id, false)
            .await?
            .ok_or(AdminServiceError::NotFound("school"))?;
        if self
            .subjects
            .name_exists(input.school_id, &input.name)
            .await?
        {
            return Err(AdminServiceError::AlreadyExists {
                field: "name",
                value: input.name,
            });
        }

        let now = Utc::now();
        let subject = Subject {
            id: Uuid::new_v4(),
            school_id: input.school_id,
            name: input.name,
            code: input.code,
            description: input.description,
            metadata: input.metadata.unwrap_or_else(|| serde_json::json!({})),
            is_active: true,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.subjects.create(&subject).await?;
        Ok(subject)
    }
}

// ── GetSubject / ListSubjects ────────────────────────────────────────────────

pub struct GetSubjectUseCase<R: SubjectRepository> {
    pub subjects: R,
}

impl<R: SubjectRepository> GetSubjectUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<Subject, AdminServiceError> {
        self.subjects
            .find_by_id(id, false)
            .await?
            .ok_or(AdminServiceError::NotFound("subject"))
    }
}

pub struct ListSubjectsUseCase<R: SubjectRepository> {
    pub subjects: R,
}

impl<R: SubjectRepository> ListSubjectsUseCase<R> {
    pub async fn execute(&self, school_id: Uuid) -> Result<Vec<Subject>, AdminServiceError> {
        self.subjects.list_by_school(school_id).await
    }
}

// ── UpdateSubject ────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct UpdateSubjectInput {
    pub name: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub metadata: Option<serde_json::Value>,
}

pub struct UpdateSubjectUseCase<R: SubjectRepository> {
    pub subjects: R,
}

impl<R: SubjectRepository> UpdateSubjectUseCase<R> {
    pub async fn execute(
        &self,
        id: Uuid,
        input: UpdateSubjectInput,
    ) -> Result<Subject, AdminServiceError> {
        let mut subject = self
            .subjects
            .find_by_id(id, false)
            .await?
            .ok_or(AdminServiceError::NotFound("subject"))?;

        if let Some(name) = input.name {
            if name.chars().count() < MIN_SUBJECT_NAME_LEN {
                return Err(AdminServiceError::Validation {
                    field: "name",
                    message: format!("name must be at least {MIN_SUBJECT_NAME_LEN} characters"),
                });
            }
            if name != subject.name
                && self.subjects.name_exists(subject.school_id, &name).await?
            {
                return Err(AdminServiceError::AlreadyExists {
                    field: "name",
                    value: name,
                });
            }
            subject.name = name;
        }
        if let Some(code) = input.code {
            subject.code = Some(code);
        }
        if let Some(description) = input.description {
            subject.description = Some(description);
        }
        if let Some(is_active) = input.is_active {
            subject.is_active = is_active;
        }
        if let Some(metadata) = input.metadata {
            subject.metadata = metadata;
        }
        subject.updated_at = Utc::now();

        self.subjects.update(&subject).await?;
        Ok(subject)
    }
}

// ── DeleteSubject ────────────────────────────────────────────────────────────

pub struct DeleteSubjectUseCase<R: SubjectRepository> {
    pub subjects: R,
}

impl<R: SubjectRepository> DeleteSubjectUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<(), AdminServiceError> {
        let deleted = self.subjects.soft_delete(id, Utc::now()).await?;
        if !deleted {
            return Err(AdminServiceError::NotFound("subject"));
        }
        Ok(())
    }
}
