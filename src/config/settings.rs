//! Application settings loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use super::constants::{
    DEFAULT_ADMIN_EMAIL, DEFAULT_DATABASE_URL, DEFAULT_DB_ACQUIRE_TIMEOUT_SECONDS,
    DEFAULT_DB_MAX_CONNECTIONS, DEFAULT_DB_MIN_CONNECTIONS, DEFAULT_JWT_EXPIRATION_HOURS,
    DEFAULT_REQUEST_TIMEOUT_SECONDS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    MIN_JWT_SECRET_LENGTH,
};
use crate::errors::{AppError, AppResult};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub server_host: String,
    pub server_port: u16,
    pub request_timeout_secs: u64,
    pub admin_email: String,
    admin_password: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("admin_email", &self.admin_email)
            .field("admin_password", &"[REDACTED]")
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `JWT_SECRET` and `ADMIN_DEFAULT_PASSWORD` fall back to development
    /// defaults in debug builds only.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = required_secret("JWT_SECRET", "dev-secret-key-minimum-32-chars!!")?;
        let admin_password = required_secret("ADMIN_DEFAULT_PASSWORD", "admin")?;

        Self::builder(jwt_secret)
            .database_url(
                env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            )
            .pool(
                parse_var("DATABASE_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS),
                parse_var("DATABASE_MIN_CONNECTIONS", DEFAULT_DB_MIN_CONNECTIONS),
                parse_var("DATABASE_ACQUIRE_TIMEOUT_SECS", DEFAULT_DB_ACQUIRE_TIMEOUT_SECONDS),
            )
            .jwt_expiration_hours(parse_var("JWT_EXPIRATION_HOURS", DEFAULT_JWT_EXPIRATION_HOURS))
            .server(
                env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
                parse_var("SERVER_PORT", DEFAULT_SERVER_PORT),
            )
            .request_timeout_secs(parse_var(
                "REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECONDS,
            ))
            .admin(
                env::var("ADMIN_DEFAULT_EMAIL").unwrap_or_else(|_| DEFAULT_ADMIN_EMAIL.to_string()),
                admin_password,
            )
            .build()
    }

    /// Start a configuration with defaults for everything but the signing secret.
    pub fn builder(jwt_secret: impl Into<String>) -> ConfigBuilder {
        ConfigBuilder {
            config: Self {
                database_url: DEFAULT_DATABASE_URL.to_string(),
                db_max_connections: DEFAULT_DB_MAX_CONNECTIONS,
                db_min_connections: DEFAULT_DB_MIN_CONNECTIONS,
                db_acquire_timeout_secs: DEFAULT_DB_ACQUIRE_TIMEOUT_SECONDS,
                jwt_secret: jwt_secret.into(),
                jwt_expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
                server_host: DEFAULT_SERVER_HOST.to_string(),
                server_port: DEFAULT_SERVER_PORT,
                request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECONDS,
                admin_email: DEFAULT_ADMIN_EMAIL.to_string(),
                admin_password: String::new(),
            },
        }
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Plaintext password of the seeded administrator.
    pub fn admin_password(&self) -> &str {
        &self.admin_password
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn db_acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.db_acquire_timeout_secs)
    }
}

/// Fluent construction of a [`Config`], used by tests and embedders.
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.config.database_url = url.into();
        self
    }

    pub fn pool(mut self, max: u32, min: u32, acquire_timeout_secs: u64) -> Self {
        self.config.db_max_connections = max;
        self.config.db_min_connections = min;
        self.config.db_acquire_timeout_secs = acquire_timeout_secs;
        self
    }

    pub fn jwt_expiration_hours(mut self, hours: i64) -> Self {
        self.config.jwt_expiration_hours = hours;
        self
    }

    pub fn server(mut self, host: impl Into<String>, port: u16) -> Self {
        self.config.server_host = host.into();
        self.config.server_port = port;
        self
    }

    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.config.request_timeout_secs = secs;
        self
    }

    pub fn admin(mut self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.config.admin_email = email.into();
        self.config.admin_password = password.into();
        self
    }

    /// Validate and finish the configuration.
    pub fn build(self) -> AppResult<Config> {
        let config = self.config;

        if config.jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::internal(format!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            )));
        }
        if config.db_max_connections == 0 || config.db_min_connections > config.db_max_connections {
            return Err(AppError::internal(
                "DATABASE_MIN_CONNECTIONS must not exceed a non-zero DATABASE_MAX_CONNECTIONS",
            ));
        }

        Ok(config)
    }
}

/// Read a secret that may only default in development builds.
fn required_secret(name: &str, dev_default: &str) -> AppResult<String> {
    match env::var(name) {
        Ok(value) => Ok(value),
        Err(_) if cfg!(debug_assertions) => {
            tracing::warn!("{} not set, using insecure default for development", name);
            Ok(dev_default.to_string())
        }
        Err(_) => Err(AppError::internal(format!(
            "{} environment variable must be set in production",
            name
        ))),
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-for-testing-only-32chars";

    #[test]
    fn test_builder_defaults() {
        let config = Config::builder(SECRET).build().unwrap();
        assert_eq!(config.server_addr(), "0.0.0.0:3000");
        assert_eq!(config.db_max_connections, DEFAULT_DB_MAX_CONNECTIONS);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.jwt_secret_bytes(), SECRET.as_bytes());
    }

    #[test]
    fn test_short_secret_rejected() {
        assert!(Config::builder("short").build().is_err());
    }

    #[test]
    fn test_invalid_pool_bounds_rejected() {
        assert!(Config::builder(SECRET).pool(0, 0, 5).build().is_err());
        assert!(Config::builder(SECRET).pool(2, 5, 5).build().is_err());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = Config::builder(SECRET)
            .admin("root@example.com", "hunter2")
            .build()
            .unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains(SECRET));
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("root@example.com"));
    }
}
