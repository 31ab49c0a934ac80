use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{MembershipRepository, UnitRepository, UserRepository};
use crate::domain::types::Membership;
use crate::error::AdminServiceError;

// ── CreateMembership ─────────────────────────────────────────────────────────

pub struct CreateMembershipInput {
    pub user_id: Uuid,
    pub school_id: Uuid,
    pub academic_unit_id: Option<Uuid>,
    pub role: String,
    pub metadata: Option<serde_json::Value>,
}

pub struct CreateMembershipUseCase<M: MembershipRepository, U: UserRepository, A: UnitRepository> {
    pub memberships: M,
    pub users: U,
    pub units: A,
}

impl<M: MembershipRepository, U: UserRepository, A: UnitRepository>
    CreateMembershipUseCase<M, U, A>
{
    pub async fn execute(
        &self,
        input: CreateMembershipInput,
    ) -> Result<Membership, AdminServiceError> {
        if input.role.is_empty() {
            return Err(AdminServiceError::Validation {
                field: "role",
                message: "role must not be empty".into(),
            });
        }
        self.users
            .find_by_id(input.user_id, false)
            .await?
            .ok_or(AdminServiceError::NotFound("user"))?;
        if let Some(unit_id) = input.academic_unit_id {
            let unit = self
                .units
                .find_by_id(unit_id, false)
                .await?
                .ok_or(AdminServiceError::NotFound("academic unit"))?;
            if unit.school_id != input.school_id {
                return Err(AdminServiceError::Validation {
                    field: "academic_unit_id",
                    message: "academic unit belongs to a different school".into(),
                });
            }
        }

        let now = Utc::now();
        let membership = Membership {
            id: Uuid::new_v4(),
            user_id: input.user_id,
            school_id: input.school_id,
            academic_unit_id: input.academic_unit_id,
            role: input.role,
            enrolled_at: now,
            withdrawn_at: None,
            is_active: true,
            metadata: input.metadata.unwrap_or_else(|| serde_json::json!({})),
            created_at: now,
            updated_at: now,
        };
        self.memberships.create(&membership).await?;
        Ok(membership)
    }
}

// ── GetMembership / ListUserMemberships ──────────────────────────────────────

pub struct GetMembershipUseCase<M: MembershipRepository> {
    pub memberships: M,
}

impl<M: MembershipRepository> GetMembershipUseCase<M> {
    pub async fn execute(&self, id: Uuid) -> Result<Membership, AdminServiceError> {
        self.memberships
            .find_by_id(id)
            .await?
            .ok_or(AdminServiceError::NotFound("membership"))
    }
}

pub struct ListUserMembershipsUseCase<M: MembershipRepository> {
    pub memberships: M,
}

impl<M: MembershipRepository> ListUserMembershipsUseCase<M> {
    pub async fn execute(&self, user_id: Uuid) -> Result<Vec<Membership>, AdminServiceError> {
        self.memberships.list_by_user(user_id).await
    }
}

// ── ExpireMembership ─────────────────────────────────────────────────────────

pub struct ExpireMembershipUseCase<M: MembershipRepository> {
    pub memberships: M,
}

impl<M: MembershipRepository> ExpireMembershipUseCase<M> {
    /// Sets `withdrawn_at = now` and `is_active = false`.
    pub async fn execute(&self, id: Uuid) -> Result<(), AdminServiceError> {
        let expired = self.memberships.expire(id, Utc::now()).await?;
        if !expired {
            return Err(AdminServiceError::NotFound("membership"));
        }
        Ok(())
    }
}
