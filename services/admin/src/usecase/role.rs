use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{CatalogRepository, GrantRepository, UserRepository};
use crate::domain::types::{Permission, Role, UserRole};
use crate::error::AdminServiceError;

// ── Catalog reads ────────────────────────────────────────────────────────────

pub struct ListRolesUseCase<C: CatalogRepository> {
    pub catalog: C,
}

impl<C: CatalogRepository> ListRolesUseCase<C> {
    pub async fn execute(&self) -> Result<Vec<Role>, AdminServiceError> {
        self.catalog.list_roles().await
    }
}

pub struct ListPermissionsUseCase<C: CatalogRepository> {
    pub catalog: C,
}

impl<C: CatalogRepository> ListPermissionsUseCase<C> {
    pub async fn execute(&self) -> Result<Vec<Permission>, AdminServiceError> {
        self.catalog.list_permissions().await
    }
}

// ── GrantRole ────────────────────────────────────────────────────────────────

pub struct GrantRoleInput {
    pub user_id: Uuid,
    pub role_id: Uuid,
    pub school_id: Option<Uuid>,
    pub academic_unit_id: Option<Uuid>,
    pub granted_by: Option<Uuid>,
}

pub struct GrantRoleUseCase<G: GrantRepository, C: CatalogRepository, U: UserRepository> {
    pub grants: G,
    pub catalog: C,
    pub users: U,
}

impl<G: GrantRepository, C: CatalogRepository, U: UserRepository> GrantRoleUseCase<G, C, U> {
    pub async fn execute(&self, input: GrantRoleInput) -> Result<UserRole, AdminServiceError> {
        self.users
            .find_by_id(input.user_id, false)
            .await?
            .ok_or(AdminServiceError::NotFound("user"))?;
        self.catalog
            .find_role(input.role_id)
            .await?
            .ok_or(AdminServiceError::NotFound("role"))?;
        if self
            .grants
            .find_active(
                input.user_id,
                input.role_id,
                input.school_id,
                input.academic_unit_id,
            )
            .await?
            .is_some()
        {
            return Err(AdminServiceError::AlreadyExists {
                field: "user_role",
                value: format!("{}:{}", input.user_id, input.role_id),
            });
        }

        let grant = UserRole {
            id: Uuid::new_v4(),
            user_id: input.user_id,
            role_id: input.role_id,
            school_id: input.school_id,
            academic_unit_id: input.academic_unit_id,
            is_active: true,
            granted_at: Utc::now(),
            granted_by: input.granted_by,
            revoked_at: None,
        };
        self.grants.create(&grant).await?;
        Ok(grant)
    }
}

// ── RevokeRole ───────────────────────────────────────────────────────────────

pub struct RevokeRoleUseCase<G: GrantRepository> {
    pub grants: G,
}

impl<G: GrantRepository> RevokeRoleUseCase<G> {
    pub async fn execute(&self, grant_id: Uuid) -> Result<(), AdminServiceError> {
        let revoked = self.grants.revoke(grant_id, Utc::now()).await?;
        if !revoked {
            return Err(AdminServiceError::NotFound("role grant"));
        }
        Ok(())
    }
}
