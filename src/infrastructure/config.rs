use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

fn default_db_connect_timeout() -> u64 {
  5
}

fn default_db_acquire_timeout() -> u64 {
  3
}

fn default_token_ttl() -> u64 {
  86400
}

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  pub server: ServerConfig,
  pub database: DatabaseConfig,
  pub security: SecurityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host: String,
  pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
  pub url: String,
  pub max_connections: u32,
  #[serde(default = "default_db_connect_timeout")]
  pub connect_timeout_seconds: u64,
  #[serde(default = "default_db_acquire_timeout")]
  pub acquire_timeout_seconds: u64,
}

/// Token signing and access control
#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
  pub jwt_secret: String,
  /// Used as the token issuer
  pub app_name: String,
  #[serde(default = "default_token_ttl")]
  pub token_ttl_seconds: u64,
  /// When set, only this role may add medicines
  #[serde(default)]
  pub medicine_role_id: Option<i32>,
}

impl Config {
  /// Load configuration from files and environment variables
  ///
  /// Later sources override earlier ones:
  /// 1. config/default.toml
  /// 2. config/local.toml (if exists)
  /// 3. config/{RUN_MODE}.toml (if exists, RUN_MODE defaults to `development`)
  /// 4. Environment variables with the CLINIC_ prefix, `__` between sections:
  ///    `CLINIC_SERVER__PORT=8080`, `CLINIC_SECURITY__JWT_SECRET=...`
  pub fn load() -> Result<Self, ConfigError> {
    let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    let config = ConfigBuilder::builder()
      .add_source(File::with_name("config/default").required(true))
      .add_source(File::with_name("config/local").required(false))
      .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
      .add_source(
        Environment::with_prefix("CLINIC")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()?;

    config.try_deserialize()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_config_structure() {
    let toml = r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [database]
            url = "postgres://localhost/clinic"
            max_connections = 5

            [security]
            jwt_secret = "secret"
            app_name = "clinic"
        "#;

    let config: Config = toml::from_str(toml).expect("Failed to parse config");

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.database.url, "postgres://localhost/clinic");
    assert_eq!(config.database.max_connections, 5);
    assert_eq!(config.database.connect_timeout_seconds, 5);
    assert_eq!(config.database.acquire_timeout_seconds, 3);
    assert_eq!(config.security.app_name, "clinic");
    assert_eq!(config.security.token_ttl_seconds, 86400);
    assert_eq!(config.security.medicine_role_id, None);
  }

  #[test]
  fn test_medicine_role_gate_is_optional() {
    let toml = r#"
            [server]
            host = "0.0.0.0"
            port = 9000

            [database]
            url = "postgres://localhost/clinic"
            max_connections = 1

            [security]
            jwt_secret = "secret"
            app_name = "clinic"
            token_ttl_seconds = 60
            medicine_role_id = 1
        "#;

    let config: Config = toml::from_str(toml).expect("Failed to parse config");

    assert_eq!(config.security.token_ttl_seconds, 60);
    assert_eq!(config.security.medicine_role_id, Some(1));
  }
}
