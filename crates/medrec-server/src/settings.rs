//! Runtime server configuration.
//!
//! Read from an optional TOML file layered under `MEDREC_*` environment
//! variables, e.g. `MEDREC_JWT_SECRET` overrides `jwt_secret`.

use std::path::{Path, PathBuf};

use chrono::Duration;
use medrec_core::user::{NewUser, Role};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to load configuration: {0}")]
  Load(#[from] config::ConfigError),

  #[error("jwt_secret must be set and non-empty")]
  MissingSecret,

  #[error("token_ttl_hours must be greater than zero")]
  ZeroTtl,
}

/// An account inserted at startup if its email is not yet known.
#[derive(Debug, Deserialize, Clone)]
pub struct SeedUser {
  pub email:         String,
  /// argon2 PHC string; generate one with `medrec --hash-password`.
  pub password_hash: String,
  pub role:          Role,
}

impl From<SeedUser> for NewUser {
  fn from(u: SeedUser) -> Self {
    NewUser {
      email:         u.email,
      password_hash: u.password_hash,
      role:          u.role,
    }
  }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:            String,
  #[serde(default = "default_port")]
  pub port:            u16,
  /// SQLite file; `:memory:` for a throwaway store.
  #[serde(default = "default_store_path")]
  pub store_path:      PathBuf,
  #[serde(default)]
  pub jwt_secret:      String,
  #[serde(default = "default_ttl_hours")]
  pub token_ttl_hours: u32,
  #[serde(default)]
  pub users:           Vec<SeedUser>,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }
fn default_store_path() -> PathBuf { PathBuf::from("medrec.db") }
fn default_ttl_hours() -> u32 { 24 }

/// `MEDREC_JWT_SECRET` maps to `jwt_secret`, `MEDREC_PORT` to `port`, etc.
fn environment() -> config::Environment {
  config::Environment::with_prefix("MEDREC")
}

impl ServerConfig {
  /// Load from `path` (if it exists) and the `MEDREC_` environment.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let builder = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(environment());
    Self::from_builder(builder)
  }

  pub fn from_builder(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
  ) -> Result<Self, ConfigError> {
    let cfg: ServerConfig = builder.build()?.try_deserialize()?;
    cfg.validate()?;
    Ok(cfg)
  }

  fn validate(&self) -> Result<(), ConfigError> {
    if self.jwt_secret.is_empty() {
      return Err(ConfigError::MissingSecret);
    }
    if self.token_ttl_hours == 0 {
      return Err(ConfigError::ZeroTtl);
    }
    Ok(())
  }

  pub fn token_ttl(&self) -> Duration {
    Duration::hours(i64::from(self.token_ttl_hours))
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}
