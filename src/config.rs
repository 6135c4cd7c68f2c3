//! Application configuration
//!
//! Loaded from a TOML file. Every section and field has a default, so a
//! missing file or a partial file both yield a usable configuration.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//! shutdown_timeout = 30
//!
//! [database]
//! backend = "sqlite"
//! url = "sqlite://./roomescape.db?mode=rwc"
//!
//! [logging]
//! level = "info"
//! format = "pretty"
//!
//! [booking]
//! reject_past_dates = false
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::infrastructure::DatabaseConfig;
use crate::shared::InfraError;

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "ROOMESCAPE_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSettings,
    pub logging: LoggingConfig,
    pub booking: BookingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub backend: StorageBackend,
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        let db = DatabaseConfig::default();
        Self {
            backend: StorageBackend::Sqlite,
            url: db.url,
            max_connections: db.max_connections,
            connect_timeout_secs: db.connect_timeout.as_secs(),
            acquire_timeout_secs: db.acquire_timeout.as_secs(),
        }
    }
}

impl DatabaseSettings {
    pub fn to_database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.url.clone(),
            max_connections: self.max_connections,
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            acquire_timeout: Duration::from_secs(self.acquire_timeout_secs),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    pub reject_past_dates: bool,
}

impl AppConfig {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, InfraError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Write as TOML, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), InfraError> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), InfraError> {
        if self.server.port == 0 {
            return Err(InfraError::InvalidConfig(
                "server.port must be non-zero".to_string(),
            ));
        }
        if self.database.backend == StorageBackend::Sqlite {
            if self.database.url.trim().is_empty() {
                return Err(InfraError::InvalidConfig(
                    "database.url is required for the sqlite backend".to_string(),
                ));
            }
            if self.database.max_connections == 0 {
                return Err(InfraError::InvalidConfig(
                    "database.max_connections must be at least 1".to_string(),
                ));
            }
        }
        match self.logging.format.to_lowercase().as_str() {
            "pretty" | "json" => Ok(()),
            other => Err(InfraError::InvalidConfig(format!(
                "logging.format must be \"pretty\" or \"json\", got \"{}\"",
                other
            ))),
        }
    }
}

/// `$ROOMESCAPE_CONFIG`, else `<config_dir>/roomescape/config.toml`
pub fn default_config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("roomescape")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.backend, StorageBackend::Sqlite);
        assert!(!config.booking.reject_past_dates);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            r#"
[server]
port = 9090

[database]
backend = "memory"

[booking]
reject_past_dates = true
"#,
        );

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.backend, StorageBackend::Memory);
        assert!(config.booking.reject_past_dates);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn unknown_backend_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "[database]\nbackend = \"postgres\"\n");
        assert!(matches!(
            AppConfig::load(&path),
            Err(InfraError::ConfigParse(_))
        ));
    }

    #[test]
    fn invalid_values_fail_validation() {
        let dir = TempDir::new().unwrap();

        let path = write(&dir, "[server]\nport = 0\n");
        assert!(matches!(
            AppConfig::load(&path),
            Err(InfraError::InvalidConfig(_))
        ));

        let path = write(&dir, "[logging]\nformat = \"xml\"\n");
        assert!(matches!(
            AppConfig::load(&path),
            Err(InfraError::InvalidConfig(_))
        ));

        let path = write(&dir, "[database]\nurl = \"  \"\n");
        assert!(matches!(
            AppConfig::load(&path),
            Err(InfraError::InvalidConfig(_))
        ));
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.server.port = 7000;
        config.logging.format = "json".to_string();
        config.save(&path).unwrap();

        assert_eq!(AppConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn database_settings_convert_to_connection_config() {
        let settings = DatabaseSettings {
            max_connections: 3,
            connect_timeout_secs: 2,
            ..DatabaseSettings::default()
        };
        let db = settings.to_database_config();
        assert_eq!(db.max_connections, 3);
        assert_eq!(db.connect_timeout, Duration::from_secs(2));
        assert_eq!(db.url, settings.url);
    }
}
