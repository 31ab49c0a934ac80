//! Bearer-token minting for integration tests.
//!
//! Tests sign real HS256 tokens with a throwaway secret so the full
//! middleware stack (validation + permission gate) runs unmodified.

use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use lyceum_auth_types::context::ActiveContext;
use lyceum_auth_types::token::JwtClaims;

/// Secret and issuer shared between the test router and minted tokens.
pub const TEST_JWT_SECRET: &str = "lyceum-test-secret";
pub const TEST_JWT_ISSUER: &str = "lyceum-admin";

fn now_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

/// Builder for test access tokens.
pub struct TokenMint {
    pub user_id: Uuid,
    pub email: String,
    pub role_name: String,
    pub school_id: Option<Uuid>,
    pub permissions: Vec<String>,
}

impl TokenMint {
    pub fn new(permissions: &[&str]) -> Self {
        Self {
            user_id: Uuid::new_v4(),
            email: "tester@example.com".to_owned(),
            role_name: "admin".to_owned(),
            school_id: None,
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn with_school(mut self, school_id: Uuid) -> Self {
        self.school_id = Some(school_id);
        self
    }

    /// Sign a token valid for one hour with [`TEST_JWT_SECRET`].
    pub fn sign(&self) -> String {
        self.sign_with_lifetime(3600)
    }

    /// Sign a token with an arbitrary lifetime; negative values produce an
    /// already-expired token.
    pub fn sign_with_lifetime(&self, lifetime_secs: i64) -> String {
        let iat = now_secs();
        let exp = iat.saturating_add_signed(lifetime_secs);
        let claims = JwtClaims {
            iss: TEST_JWT_ISSUER.to_owned(),
            sub: self.user_id.to_string(),
            email: self.email.clone(),
            iat,
            exp,
            active_context: ActiveContext {
                role_id: Uuid::new_v4(),
                role_name: self.role_name.clone(),
                school_id: self.school_id,
                permissions: self.permissions.clone(),
            },
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
        )
        .unwrap()
    }
}
