/// Tenant defaults applied when a create-school request leaves the
/// corresponding fields zero or empty.
#[derive(Debug, Clone)]
pub struct SchoolDefaults {
    pub country: String,
    pub subscription_tier: String,
    pub max_teachers: i32,
    pub max_students: i32,
}

/// Admin service configuration loaded from environment variables.
///
/// Everything has a default except the database password and the JWT secret.
#[derive(Debug)]
pub struct AdminConfig {
    /// Deployment environment tag (`development`, `staging`, `production`).
    pub app_env: String,
    /// TCP port to listen on (default 8081). Env var: `SERVER_PORT`.
    pub server_port: u16,
    /// Per-request deadline in seconds (default 15). Env var: `SERVER_READ_TIMEOUT_SECS`.
    pub read_timeout_secs: u64,
    /// Response write deadline in seconds (default 15). Env var: `SERVER_WRITE_TIMEOUT_SECS`.
    pub write_timeout_secs: u64,
    pub db_host: String,
    pub db_port: u16,
    pub db_database: String,
    pub db_user: String,
    pub db_password: String,
    pub db_max_open: u32,
    pub db_max_idle: u32,
    pub db_ssl_mode: String,
    /// HMAC secret shared with sibling services for token validation.
    pub jwt_secret: String,
    /// `iss` claim stamped into every access token.
    pub jwt_issuer: String,
    pub school_defaults: SchoolDefaults,
    /// Comma-separated allowed CORS origins; `*` allows any.
    pub cors_allowed_origins: Vec<String>,
}

impl AdminConfig {
    pub fn from_env() -> Self {
        Self {
            app_env: env_or("APP_ENV", "development"),
            server_port: env_parsed("SERVER_PORT", 8081),
            read_timeout_secs: env_parsed("SERVER_READ_TIMEOUT_SECS", 15),
            write_timeout_secs: env_parsed("SERVER_WRITE_TIMEOUT_SECS", 15),
            db_host: env_or("DATABASE_POSTGRES_HOST", "localhost"),
            db_port: env_parsed("DATABASE_POSTGRES_PORT", 5432),
            db_database: env_or("DATABASE_POSTGRES_DATABASE", "lyceum"),
            db_user: env_or("DATABASE_POSTGRES_USER", "lyceum"),
            db_password: std::env::var("DATABASE_POSTGRES_PASSWORD")
                .expect("DATABASE_POSTGRES_PASSWORD"),
            db_max_open: env_parsed("DATABASE_POSTGRES_MAX_OPEN", 20),
            db_max_idle: env_parsed("DATABASE_POSTGRES_MAX_IDLE", 5),
            db_ssl_mode: env_or("DATABASE_POSTGRES_SSL_MODE", "disable"),
            jwt_secret: std::env::var("AUTH_JWT_SECRET").expect("AUTH_JWT_SECRET"),
            jwt_issuer: env_or("AUTH_JWT_ISSUER", "lyceum-admin"),
            school_defaults: SchoolDefaults {
                country: env_or("DEFAULTS_SCHOOL_COUNTRY", "US"),
                subscription_tier: env_or("DEFAULTS_SCHOOL_TIER", "basic"),
                max_teachers: env_parsed("DEFAULTS_SCHOOL_MAX_TEACHERS", 50),
                max_students: env_parsed("DEFAULTS_SCHOOL_MAX_STUDENTS", 1000),
            },
            cors_allowed_origins: env_or("CORS_ALLOWED_ORIGINS", "*")
                .split(',')
                .map(|s| s.trim().to_owned())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// Single in-process deadline for a request. Axum has no separate socket
    /// read/write phases to time out, so the two knobs collapse into one
    /// deadline covering the whole request; the stricter value wins.
    pub fn request_deadline(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.read_timeout_secs.min(self.write_timeout_secs))
    }

    /// Connection URL for sea-orm.
    pub fn database_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}?sslmode={}",
            self.db_user,
            self.db_password,
            self.db_host,
            self.db_port,
            self.db_database,
            self.db_ssl_mode,
        )
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
