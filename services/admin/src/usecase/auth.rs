use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use jsonwebtoken::{EncodingKey, Header, encode};
use rand::RngCore as _;
use uuid::Uuid;

use lyceum_auth_types::context::ActiveContext;
use lyceum_auth_types::token::{ACCESS_TOKEN_EXP_SECS, JwtClaims};

use crate::domain::repository::{GrantRepository, UserRepository};
use crate::domain::types::User;
use crate::error::AdminServiceError;
use crate::password;

fn now_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

/// Sign an HS256 access token carrying the active context.
/// A zero `lifetime_secs` selects the default lifetime.
pub fn issue_access_token(
    user: &User,
    context: &ActiveContext,
    secret: &str,
    issuer: &str,
    lifetime_secs: u64,
) -> Result<(String, u64), AdminServiceError> {
    let lifetime = if lifetime_secs == 0 {
        ACCESS_TOKEN_EXP_SECS
    } else {
        lifetime_secs
    };
    let iat = now_secs();
    let exp = iat + lifetime;
    let claims = JwtClaims {
        iss: issuer.to_owned(),
        sub: user.id.to_string(),
        email: user.email.clone(),
        iat,
        exp,
        active_context: context.clone(),
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AdminServiceError::Internal(e.into()))?;
    Ok((token, exp))
}

/// Mint the opaque 32-byte refresh token. Emitted for client-side API shape
/// only; the refresh endpoint never honors it.
pub fn mint_refresh_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Resolve the caller's active context at login: active grants in the user's
/// home tenant scope, primary role by `granted_at ASC, role_id ASC`, and the
/// sorted, de-duplicated union of reachable permission names.
pub async fn resolve_active_context<G: GrantRepository>(
    grants: &G,
    user: &User,
) -> Result<ActiveContext, AdminServiceError> {
    let rows = grants.find_active_grants(user.id, user.school_id).await?;
    let (_, primary_role) = rows.first().ok_or(AdminServiceError::NoRolesAssigned)?;

    let role_ids: Vec<Uuid> = rows.iter().map(|(grant, _)| grant.role_id).collect();
    let mut permissions = grants.permission_names_for_roles(&role_ids).await?;
    permissions.sort();
    permissions.dedup();

    Ok(ActiveContext {
        role_id: primary_role.id,
        role_name: primary_role.name.clone(),
        school_id: user.school_id,
        permissions,
    })
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub struct LoginOutput {
    pub user: User,
    pub active_context: ActiveContext,
    pub access_token: String,
    pub access_token_exp: u64,
    pub refresh_token: String,
}

pub struct LoginUseCase<U: UserRepository, G: GrantRepository> {
    pub users: U,
    pub grants: G,
    pub jwt_secret: String,
    pub jwt_issuer: String,
}

impl<U: UserRepository, G: GrantRepository> LoginUseCase<U, G> {
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, AdminServiceError> {
        let email = input.email.trim().to_lowercase();

        let user = match self.users.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                // Burn one KDF evaluation so an unknown email costs the same
                // as a wrong password.
                let _ = password::verify_password(&input.password, password::DUMMY_HASH);
                return Err(AdminServiceError::InvalidCredentials);
            }
        };

        if !user.is_active {
            return Err(AdminServiceError::UserInactive);
        }

        if !password::verify_password(&input.password, &user.password_hash)? {
            return Err(AdminServiceError::InvalidCredentials);
        }

        let active_context = resolve_active_context(&self.grants, &user).await?;
        let (access_token, access_token_exp) = issue_access_token(
            &user,
            &active_context,
            &self.jwt_secret,
            &self.jwt_issuer,
            0,
        )?;
        let refresh_token = mint_refresh_token();

        Ok(LoginOutput {
            user,
            active_context,
            access_token,
            access_token_exp,
            refresh_token,
        })
    }
}
