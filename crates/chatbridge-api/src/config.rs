use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use chatbridge_llm::{DEFAULT_MODEL_URL, HUGGINGFACE_API_KEY_ENV};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    pub mongodb: MongoDbConfig,
    #[serde(default)]
    pub inference: InferenceConfig,
    #[serde(default)]
    pub bridge: BridgeConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    pub logging: LoggingConfig,

    // Secrets (from ENV only)
    #[serde(default)]
    pub mongodb_uri: String,
    #[serde(default)]
    pub huggingface_api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Origins allowed to reach the HTTP surface
///
/// Disabled means permissive: every origin may open a chat socket.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub enabled: bool,
    pub origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            origins: vec!["*".to_string()],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
pub enum StorageBackend {
    #[default]
    #[serde(rename = "mongodb")]
    MongoDb,
    #[serde(rename = "memory")]
    Memory,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoDbConfig {
    pub database: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InferenceConfig {
    pub model_url: String,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            model_url: DEFAULT_MODEL_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BridgeConfig {
    /// Reject upgrades without a user identity instead of recording user 0
    pub require_identity: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Header set by the upstream auth proxy carrying the numeric user id
    pub user_id_header: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            user_id_header: "x-user-id".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Config {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml
    /// 2. config/{ENV}.toml (if ENV is set)
    /// 3. Environment variables prefixed with CHATBRIDGE_, sections split by
    ///    a double underscore (CHATBRIDGE_SERVER__PORT=9000)
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());

        let builder = ConfigLoader::builder()
            // 1. Load default config
            .add_source(File::with_name("config/default").required(false))
            // 2. Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            // 3. Environment variables override everything
            .add_source(
                Environment::with_prefix("CHATBRIDGE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;

        let mut cfg: Config = config.try_deserialize()?;
        cfg.load_secrets()?;

        Ok(cfg)
    }

    /// Load config from a specific path (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let builder = ConfigLoader::builder().add_source(File::from(path.as_ref()));

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Read secrets from ENV (never from TOML)
    ///
    /// The inference credential is optional here: its absence is reported on
    /// every chat turn instead of blocking startup.
    fn load_secrets(&mut self) -> Result<(), ConfigError> {
        if self.storage.backend == StorageBackend::MongoDb {
            self.mongodb_uri = std::env::var("MONGODB_URI").map_err(|_| {
                ConfigError::Message("MONGODB_URI environment variable is required".to_string())
            })?;
        }
        self.huggingface_api_key = std::env::var(HUGGINGFACE_API_KEY_ENV)
            .ok()
            .filter(|key| !key.is_empty());
        Ok(())
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
            port = 3000

            [cors]
            enabled = true
            origins = ["http://localhost:3000"]

            [storage]
            backend = "memory"

            [mongodb]
            database = "test"

            [inference]
            model_url = "http://localhost:8081/models/test"

            [bridge]
            require_identity = true

            [auth]
            user_id_header = "x-authenticated-user"

            [logging]
            level = "debug"
            format = "json"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.mongodb.database, "test");
        assert_eq!(config.inference.model_url, "http://localhost:8081/models/test");
        assert!(config.bridge.require_identity);
        assert_eq!(config.auth.user_id_header, "x-authenticated-user");
        assert!(config.huggingface_api_key.is_none());
    }

    #[test]
    fn test_optional_sections_default() {
        let toml = r#"
            [server]
            host = "0.0.0.0"
            port = 8080

            [mongodb]
            database = "chatbridge"

            [logging]
            level = "info"
            format = "pretty"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert!(!config.cors.enabled);
        assert_eq!(config.storage.backend, StorageBackend::MongoDb);
        assert_eq!(config.inference.model_url, DEFAULT_MODEL_URL);
        assert!(!config.bridge.require_identity);
        assert_eq!(config.auth.user_id_header, "x-user-id");
    }

    #[test]
    fn test_shipped_default_file_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/default.toml");
        let config = Config::from_file(path).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.mongodb.database, "chatbridge");
        assert_eq!(config.logging.format, "pretty");
    }
}
