//! Application configuration module
//!
//! Configuration is read once at startup from environment variables using the
//! `config` and `dotenvy` crates and is immutable afterwards. Variable names are
//! flat (`PORT`, `STRIPE_SECRET_KEY`, ...) and map to lowercase struct fields.
//!
//! # Example
//!
//! ```no_run
//! use payment_intents_server::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod error;
mod payment;
mod server;

pub use error::{ConfigError, ValidationError};
pub use payment::PaymentConfig;
pub use server::{LogFormat, ServerConfig};

use std::collections::HashMap;
use std::path::PathBuf;

/// Root application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server configuration (host, port, logging, timeouts)
    pub server: ServerConfig,

    /// Payment configuration (Stripe keys, webhook secret)
    pub payment: PaymentConfig,

    /// Directory served as static assets (`STATIC_DIR`)
    pub static_dir: PathBuf,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads the process environment
    /// 3. Deserializes into typed configuration structs
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        Self::from_environment(config::Environment::default())
    }

    /// Load configuration from an explicit variable map instead of the
    /// process environment.
    pub fn from_source(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::from_environment(config::Environment::default().source(Some(vars)))
    }

    fn from_environment(source: config::Environment) -> Result<Self, ConfigError> {
        let settings = config::Config::builder().add_source(source).build()?;

        let static_dir = settings.get_string("static_dir")?;

        Ok(Self {
            server: settings.clone().try_deserialize()?,
            payment: settings.try_deserialize()?,
            static_dir: resolve_static_dir(&static_dir),
        })
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.payment.validate()?;
        if self.static_dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("STATIC_DIR"));
        }
        Ok(())
    }
}

/// Relative static directories are resolved against the working directory.
fn resolve_static_dir(raw: &str) -> PathBuf {
    if raw.is_empty() {
        return PathBuf::new();
    }
    let path = PathBuf::from(raw);
    if path.is_absolute() {
        return path;
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(&path))
        .unwrap_or(path)
}
