use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{GuardianRepository, UserRepository};
use crate::domain::types::GuardianRelation;
use crate::error::AdminServiceError;

// ── CreateGuardianRelation ───────────────────────────────────────────────────

pub struct CreateGuardianRelationInput {
    pub guardian_id: Uuid,
    pub student_id: Uuid,
    pub relation_type: Option<String>,
}

pub struct CreateGuardianRelationUseCase<G: GuardianRepository, U: UserRepository> {
    pub guardians: G,
    pub users: U,
}

impl<G: GuardianRepository, U: UserRepository> CreateGuardianRelationUseCase<G, U> {
    pub async fn execute(
        &self,
        input: CreateGuardianRelationInput,
    ) -> Result<GuardianRelation, AdminServiceError> {
        if input.guardian_id == input.student_id {
            return Err(AdminServiceError::Validation {
                field: "student_id",
                message: "guardian and student must differ".into(),
            });
        }
        self.users
            .find_by_id(input.guardian_id, false)
            .await?
            .ok_or(AdminServiceError::NotFound("user"))?;
        self.users
            .find_by_id(input.student_id, false)
            .await?
            .ok_or(AdminServiceError::NotFound("user"))?;
        if self
            .guardians
            .active_pair_exists(input.guardian_id, input.student_id)
            .await?
        {
            return Err(AdminServiceError::AlreadyExists {
                field: "guardian_relation",
                value: format!("{}:{}", input.guardian_id, input.student_id),
            });
        }

        let now = Utc::now();
        let relation = GuardianRelation {
            id: Uuid::new_v4(),
            guardian_id: input.guardian_id,
            student_id: input.student_id,
            relation_type: input.relation_type,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.guardians.create(&relation).await?;
        Ok(relation)
    }
}

// ── ListStudentGuardians / DeactivateGuardianRelation ────────────────────────

pub struct ListStudentGuardiansUseCase<G: GuardianRepository> {
    pub guardians: G,
}

impl<G: GuardianRepository> ListStudentGuardiansUseCase<G> {
    pub async fn execute(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<GuardianRelation>, AdminServiceError> {
        self.guardians.list_by_student(student_id).await
    }
}

pub struct DeactivateGuardianRelationUseCase<G: GuardianRepository> {
    pub guardians: G,
}

impl<G: GuardianRepository> DeactivateGuardianRelationUseCase<G> {
    pub async fn execute(&self, id: Uuid) -> Result<(), AdminServiceError> {
        let deactivated = self.guardians.deactivate(id).await?;
        if !deactivated {
            return Err(AdminServiceError::NotFound("guardian relation"));
        }
        Ok(())
    }
}
