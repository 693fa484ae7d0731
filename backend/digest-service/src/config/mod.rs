use anyhow::{ensure, Context};
use serde::Deserialize;
use tracing::warn;

/// Placeholder secret used when `JWT__SECRET` is not provided.
pub const DEVELOPMENT_SECRET: &str = "development-secret-change-in-production";

/// Upper bound on token lifetime (one year).
pub const MAX_EXPIRY_MINUTES: u64 = 365 * 24 * 60;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_expiry_minutes")]
    pub expiry_minutes: u64,
}

impl JwtConfig {
    /// Token lifetime, or `None` when `expiry_minutes` does not fit a `chrono::Duration`.
    pub fn expiry(&self) -> Option<chrono::Duration> {
        i64::try_from(self.expiry_minutes)
            .ok()
            .and_then(chrono::Duration::try_minutes)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_expiry_minutes() -> u64 {
    60
}

impl Config {
    /// Load from `.env` and process environment (`SERVER__PORT`, `JWT__SECRET`, ...).
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_environment(config::Environment::default())
    }

    pub fn from_environment(env: config::Environment) -> anyhow::Result<Self> {
        let config = config::Config::builder()
            .add_source(env.separator("__"))
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port() as i64)?
            .set_default("jwt.secret", DEVELOPMENT_SECRET)?
            .set_default("jwt.expiry_minutes", default_expiry_minutes() as i64)?
            .build()
            .context("Failed to build configuration")?;

        let config: Config = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        ensure!(!self.jwt.secret.is_empty(), "JWT secret must not be empty");
        ensure!(
            self.jwt.expiry_minutes > 0,
            "JWT expiry must be at least one minute"
        );
        ensure!(
            self.jwt.expiry_minutes <= MAX_EXPIRY_MINUTES,
            "JWT expiry must not exceed {} minutes",
            MAX_EXPIRY_MINUTES
        );

        if self.jwt.secret == DEVELOPMENT_SECRET {
            warn!("Using development JWT secret - set JWT__SECRET in production");
        }

        Ok(())
    }
}
