use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use repset_core::providers::GOOGLE_SEARCH_ENDPOINT;

const DEFAULT_CONFIG_LOCATIONS: &[&str] = &["repset.toml", "config/repset.toml"];

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_FALLBACK_PATH: &str = "fallback_routines.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub search: SearchConfig,
    pub fallback: FallbackConfig,
    /// Whether a .env file was found and loaded during boot.
    pub env_file_loaded: bool,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub api_key: String,
    pub cx: String,
    pub endpoint: String,
}

#[derive(Debug, Clone)]
pub struct FallbackConfig {
    /// JSON file holding the routines served when the store is unreachable
    /// at startup.
    pub routines_path: PathBuf,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid SERVER_PORT value: {0}")]
    InvalidPort(String),

    #[error("failed to load .env file: {0}")]
    EnvFile(#[from] dotenvy::Error),
}

/// On-disk TOML shape; every field optional so a partial file composes with
/// environment overrides.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    server: FileServerConfig,
    database: FileDatabaseConfig,
    search: FileSearchConfig,
    fallback: FileFallbackConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileServerConfig {
    host: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileDatabaseConfig {
    url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileSearchConfig {
    api_key: Option<String>,
    cx: Option<String>,
    endpoint: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileFallbackConfig {
    routines_path: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Load configuration: .env file first, then an optional TOML file,
    /// then environment variables on top.
    pub fn load(&self) -> Result<Config, ConfigError> {
        let env_file_loaded = dotenvy::dotenv().map(|_| true).or_else(|err| match err {
            dotenvy::Error::Io(_) => Ok(false),
            other => Err(other),
        })?;

        let file = self.load_file_config()?;

        let host = env_var("SERVER_HOST")
            .or(file.server.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match env_var("SERVER_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => file.server.port.unwrap_or(DEFAULT_PORT),
        };

        let database_url = env_var("DATABASE_URL").or(file.database.url);

        let search = SearchConfig {
            api_key: env_var("GOOGLE_API_KEY")
                .or(file.search.api_key)
                .unwrap_or_default(),
            cx: env_var("GOOGLE_CX").or(file.search.cx).unwrap_or_default(),
            endpoint: env_var("GOOGLE_SEARCH_ENDPOINT")
                .or(file.search.endpoint)
                .unwrap_or_else(|| GOOGLE_SEARCH_ENDPOINT.to_string()),
        };

        let routines_path = env_var("FALLBACK_ROUTINES_PATH")
            .map(PathBuf::from)
            .or(file.fallback.routines_path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FALLBACK_PATH));

        Ok(Config {
            server: ServerConfig { host, port },
            database: DatabaseConfig { url: database_url },
            search,
            fallback: FallbackConfig { routines_path },
            env_file_loaded,
        })
    }

    fn load_file_config(&self) -> Result<FileConfig, ConfigError> {
        let explicit = self
            .config_path
            .clone()
            .or_else(|| env_var("REPSET_CONFIG").map(PathBuf::from));

        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::Io {
                        source: std::io::Error::new(
                            std::io::ErrorKind::NotFound,
                            "config file not found",
                        ),
                        path,
                    });
                }
                Some(path)
            }
            None => DEFAULT_CONFIG_LOCATIONS
                .iter()
                .map(Path::new)
                .find(|candidate| candidate.exists())
                .map(Path::to_path_buf),
        };

        let Some(path) = path else {
            return Ok(FileConfig::default());
        };

        let contents = fs::read_to_string(&path).map_err(|err| ConfigError::Io {
            path: path.clone(),
            source: err,
        })?;
        toml::from_str(&contents).map_err(|err| ConfigError::Parse { path, source: err })
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}
