use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::UserRepository;
use crate::domain::types::{MIN_PASSWORD_LEN, User};
use crate::error::AdminServiceError;
use crate::password;

// ── CreateUser ───────────────────────────────────────────────────────────────

pub struct CreateUserInput {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub school_id: Option<Uuid>,
}

pub struct CreateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> CreateUserUseCase<R> {
    pub async fn execute(&self, input: CreateUserInput) -> Result<User, AdminServiceError> {
        let email = input.email.trim().to_lowercase();
        if !email.contains('@') {
            return Err(AdminServiceError::Validation {
                field: "email",
                message: "email is not valid".into(),
            });
        }
        if input.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AdminServiceError::Validation {
                field: "password",
                message: format!("password must be at least {MIN_PASSWORD_LEN} characters"),
            });
        }
        if self.repo.email_exists(&email).await? {
            return Err(AdminServiceError::AlreadyExists {
                field: "email",
                value: email,
            });
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email,
            password_hash: password::hash_password(&input.password)?,
            first_name: input.first_name,
            last_name: input.last_name,
            is_active: true,
            school_id: input.school_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.repo.create(&user).await?;
        Ok(user)
    }
}

// ── GetUser / ListUsers ──────────────────────────────────────────────────────

pub struct GetUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetUserUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<User, AdminServiceError> {
        self.repo
            .find_by_id(id, false)
            .await?
            .ok_or(AdminServiceError::NotFound("user"))
    }
}

pub struct ListUsersUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ListUsersUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<User>, AdminServiceError> {
        self.repo.list().await
    }
}

// ── UpdateUser ───────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct UpdateUserInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<String>,
    pub is_active: Option<bool>,
    pub school_id: Option<Option<Uuid>>,
}

pub struct UpdateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> UpdateUserUseCase<R> {
    pub async fn execute(&self, id: Uuid, input: UpdateUserInput) -> Result<User, AdminServiceError> {
        let mut user = self
            .repo
            .find_by_id(id, false)
            .await?
            .ok_or(AdminServiceError::NotFound("user"))?;

        if let Some(first_name) = input.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = input.last_name {
            user.last_name = last_name;
        }
        if let Some(new_password) = input.password {
            if new_password.chars().count() < MIN_PASSWORD_LEN {
                return Err(AdminServiceError::Validation {
                    field: "password",
                    message: format!("password must be at least {MIN_PASSWORD_LEN} characters"),
                });
            }
            user.password_hash = password::hash_password(&new_password)?;
        }
        if let Some(is_active) = input.is_active {
            user.is_active = is_active;
        }
        if let Some(school_id) = input.school_id {
            user.school_id = school_id;
        }
        user.updated_at = Utc::now();

        self.repo.update(&user).await?;
        Ok(user)
    }
}

// ── DeleteUser ───────────────────────────────────────────────────────────────

pub struct DeleteUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> DeleteUserUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<(), AdminServiceError> {
        let deleted = self.repo.soft_delete(id, Utc::now()).await?;
        if !deleted {
            return Err(AdminServiceError::NotFound("user"));
        }
        Ok(())
    }
}
