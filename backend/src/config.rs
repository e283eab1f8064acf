//! Configuration management for the PharmaFlow server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with PHARMA__ prefix
//! 4. `PORT`, as injected by hosting platforms

use std::path::PathBuf;

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Inventory file location
    pub storage: StorageConfig,

    /// Dashboard login
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// JSON file holding the inventory
    pub data_path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub admin_email: String,

    pub admin_password: String,

    /// Secret key for signing session tokens
    pub jwt_secret: String,

    /// Session lifetime in seconds
    pub session_ttl_secs: i64,

    /// Require a session token on the inventory endpoints
    pub require_for_inventory: bool,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("PHARMA_ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let auth = AuthConfig::default();

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3001)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("storage.data_path", "inventario.json")?
            .set_default("auth.admin_email", auth.admin_email)?
            .set_default("auth.admin_password", auth.admin_password)?
            .set_default("auth.jwt_secret", auth.jwt_secret)?
            .set_default("auth.session_ttl_secs", auth.session_ttl_secs)?
            .set_default("auth.require_for_inventory", false)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (PHARMA__ prefix)
            .add_source(
                Environment::with_prefix("PHARMA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .build()?;

        config.try_deserialize()
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3001,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("inventario.json"),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_email: "admin@pharmaflow.com".to_string(),
            admin_password: "admin123".to_string(),
            jwt_secret: "development-secret-key".to_string(),
            session_ttl_secs: 86_400,
            require_for_inventory: false,
        }
    }
}
