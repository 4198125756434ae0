use std::path::PathBuf;

use serde::Deserialize;

use crate::domain::registration::RegistrationRules;
use crate::domain::DomainError;
use crate::infrastructure::storage::{PostgresConfig, StorageConfig, StorageType};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub storage: StorageSettings,
    pub registration: RegistrationSettings,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// `memory` or `postgres`
    pub backend: String,
    pub database_url: Option<String>,
    pub max_connections: u32,
    /// Seconds to wait for a pooled connection
    pub acquire_timeout_secs: u64,
    pub table: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RegistrationSettings {
    pub email_domain: String,
    pub max_members: usize,
    /// Wallet registry file; unset disables wallet recording
    pub wallet_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            database_url: None,
            max_connections: 10,
            acquire_timeout_secs: 30,
            table: "teams".to_string(),
        }
    }
}

impl Default for RegistrationSettings {
    fn default() -> Self {
        Self {
            email_domain: "pes.edu".to_string(),
            max_members: 4,
            wallet_file: Some(PathBuf::from("data/teamWallets.json")),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        }
    }
}

impl StorageSettings {
    /// Resolve the backend selection into a storage configuration
    pub fn storage_config(&self) -> Result<StorageConfig, DomainError> {
        let backend = StorageType::parse(&self.backend).ok_or_else(|| {
            DomainError::configuration(format!("Unknown storage backend '{}'", self.backend))
        })?;

        match backend {
            StorageType::InMemory => Ok(StorageConfig::in_memory()),
            StorageType::Postgres => {
                let url = self.database_url.clone().ok_or_else(|| {
                    DomainError::configuration("storage.database_url is required for postgres")
                })?;
                Ok(StorageConfig::postgres(
                    PostgresConfig::new(url)
                        .with_max_connections(self.max_connections)
                        .with_acquire_timeout(self.acquire_timeout_secs),
                ))
            }
        }
    }
}

impl RegistrationSettings {
    pub fn rules(&self) -> Result<RegistrationRules, DomainError> {
        RegistrationRules::new(&self.email_domain, self.max_members)
    }
}

impl AppConfig {
    /// Load `config/default`, `config/local`, then `APP__*` environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
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
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 4000);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.storage.table, "teams");
        assert_eq!(config.registration.email_domain, "pes.edu");
        assert_eq!(config.cors.allowed_origins, vec!["http://localhost:5173"]);
    }

    #[test]
    fn test_storage_config_memory() {
        let settings = StorageSettings::default();
        let storage = settings.storage_config().unwrap();
        assert_eq!(storage.storage_type(), StorageType::InMemory);
    }

    #[test]
    fn test_storage_config_postgres_requires_url() {
        let mut settings = StorageSettings {
            backend: "postgres".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            settings.storage_config(),
            Err(DomainError::Configuration { .. })
        ));

        settings.database_url = Some("postgres://localhost/ignite".to_string());
        match settings.storage_config().unwrap() {
            StorageConfig::Postgres(pg) => {
                assert_eq!(pg.url, "postgres://localhost/ignite");
                assert_eq!(pg.max_connections, 10);
                assert_eq!(pg.acquire_timeout_secs, 30);
            }
            other => panic!("expected postgres config, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_backend() {
        let settings = StorageSettings {
            backend: "mongodb".to_string(),
            ..Default::default()
        };
        assert!(settings.storage_config().is_err());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(
                "[server]\nport = 9000\n\n[registration]\nmax_members = 3\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.registration.max_members, 3);
        assert_eq!(config.registration.email_domain, "pes.edu");
    }
}
