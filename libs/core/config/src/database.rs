use crate::{env_or_default, env_parse_or, ConfigError, FromEnv};
use std::env;

/// Connection parameters for the product store.
///
/// Every part has a default so the service starts against a local PostgreSQL
/// without any environment set. `DATABASE_URL`, when present, wins over the
/// individual parts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
    url_override: Option<String>,
}

impl DatabaseConfig {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        name: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            name: name.into(),
            user: user.into(),
            password: password.into(),
            url_override: None,
        }
    }

    /// PostgreSQL connection URL
    ///
    /// User and password are percent-encoded so reserved characters survive.
    pub fn url(&self) -> String {
        match &self.url_override {
            Some(url) => url.clone(),
            None => format!(
                "postgres://{}:{}@{}:{}/{}",
                urlencoding::encode(&self.user),
                urlencoding::encode(&self.password),
                self.host,
                self.port,
                self.name
            ),
        }
    }

    /// Connection URL with the password masked, for logs.
    pub fn redacted_url(&self) -> String {
        match &self.url_override {
            Some(_) => "DATABASE_URL (redacted)".to_string(),
            None => format!(
                "postgres://{}:***@{}:{}/{}",
                self.user, self.host, self.port, self.name
            ),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::new("localhost", 5432, "productdb", "postgres", "postgres")
    }
}

impl FromEnv for DatabaseConfig {
    /// - DB_HOST (default: localhost)
    /// - DB_PORT (default: 5432)
    /// - DB_NAME (default: productdb)
    /// - DB_USER (default: postgres)
    /// - DB_PASSWORD (default: postgres)
    /// - DATABASE_URL (optional, overrides the above)
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env_or_default("DB_HOST", "localhost"),
            port: env_parse_or("DB_PORT", "5432")?,
            name: env_or_default("DB_NAME", "productdb"),
            user: env_or_default("DB_USER", "postgres"),
            password: env_or_default("DB_PASSWORD", "postgres"),
            url_override: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
        })
    }
}
