//! Application settings resolved once at startup.
//!
//! Defaults cover local development. Every value can be overridden by an
//! optional `settings` file or by `BEANERY_*` environment variables
//! (e.g. `BEANERY_PORT=8080`, `BEANERY_JWT_SECRET=...`).

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Development-only signing secret; override it outside local setups.
pub const DEV_JWT_SECRET: &str = "beanery-dev-secret";

#[derive(Debug, Deserialize)]
pub struct Settings {
    /// Database connection URL.
    pub database: String,
    pub bind: String,
    pub port: u16,
    /// Allowed CORS origin; `"*"` allows any.
    pub cors_origin: String,
    pub jwt_secret: String,
    /// Tracing filter level.
    pub level: String,
    pub production: bool,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("database", "sqlite:./beanery.db?mode=rwc")?
            .set_default("bind", "127.0.0.1")?
            .set_default("port", 3001)?
            .set_default("cors_origin", "http://localhost:3000")?
            .set_default("jwt_secret", DEV_JWT_SECRET)?
            .set_default("level", "info")?
            .set_default("production", false)?
            .add_source(File::with_name("settings").required(false))
            .add_source(Environment::with_prefix("BEANERY"))
            .build()?;

        settings.try_deserialize()
    }
}
