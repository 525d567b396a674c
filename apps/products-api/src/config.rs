//! Configuration for Products API

use core_config::{app_info, database::DatabaseConfig, server::ServerConfig, AppInfo, FromEnv};
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    /// Connection target with the password masked, for logs
    pub database_target: String,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?;
        let database_target = DatabaseConfig::from_env()?.redacted_url();
        let server = ServerConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            database,
            database_target,
            server,
            environment,
        })
    }
}
