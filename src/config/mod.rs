//! Client settings persisted in `config.toml` and the process-wide API base URL.

mod base_url;
mod defaults;

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_dirs;

pub(crate) use base_url::parse_http_url;
pub use base_url::{DEPLOYMENT_ENV, Deployment, process_base_url, resolve_base_url};
use defaults::*;

/// Default filename used to store the client settings.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Settings loaded from `config.toml`; every key has a default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientSettings {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub http: HttpSettings,
    #[serde(default)]
    pub login: LoginSettings,
}

/// Where the backend lives for each deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Forces a deployment instead of deriving it from the environment or build.
    #[serde(default)]
    pub deployment: Option<Deployment>,
    /// Origin serving both the client and the `/api` prefix in production.
    #[serde(default = "default_production_origin")]
    pub production_origin: String,
    /// Explicit backend address used outside production.
    #[serde(default = "default_development_base_url")]
    pub development_base_url: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            deployment: None,
            production_origin: default_production_origin(),
            development_base_url: default_development_base_url(),
        }
    }
}

/// Transport limits applied by the shared HTTP agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpSettings {
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,
    #[serde(default = "default_write_timeout_secs")]
    pub write_timeout_secs: u64,
    /// Attempts for the model and employee list requests, including the first.
    #[serde(default = "default_list_retry_attempts")]
    pub list_retry_attempts: usize,
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
    #[serde(default = "default_retry_max_delay_ms")]
    pub retry_max_delay_ms: u64,
    /// Upper bound on any response body.
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: usize,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout_secs(),
            read_timeout_secs: default_read_timeout_secs(),
            write_timeout_secs: default_write_timeout_secs(),
            list_retry_attempts: default_list_retry_attempts(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            retry_max_delay_ms: default_retry_max_delay_ms(),
            max_response_bytes: default_max_response_bytes(),
        }
    }
}

/// Credentials accepted by the login view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginSettings {
    #[serde(default = "default_login_username")]
    pub username: String,
    #[serde(default = "default_login_password")]
    pub password: String,
}

impl Default for LoginSettings {
    fn default() -> Self {
        Self {
            username: default_login_username(),
            password: default_login_password(),
        }
    }
}

impl ClientSettings {
    fn normalized(mut self) -> Self {
        self.http.list_retry_attempts = clamp_retry_attempts(self.http.list_retry_attempts);
        self.http.max_response_bytes = self.http.max_response_bytes.max(MIN_RESPONSE_BYTES);
        self
    }
}

/// Errors that may occur while loading or saving client settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unable to create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize config to TOML at {path}: {source}")]
    SerializeToml {
        path: PathBuf,
        source: toml::ser::Error,
    },
    #[error("Invalid backend URL {value:?}: {source}")]
    InvalidUrl {
        value: String,
        source: url::ParseError,
    },
    #[error("Backend URL must use http or https: {0}")]
    UnsupportedScheme(String),
    #[error(transparent)]
    AppDir(#[from] app_dirs::AppDirError),
}

/// Resolve the configuration file path, ensuring the parent directory exists.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(app_dirs::app_root_dir()?.join(CONFIG_FILE_NAME))
}

/// Load settings from the app directory, returning defaults if the file is missing.
pub fn load_or_default() -> Result<ClientSettings, ConfigError> {
    load_from_path(&config_path()?)
}

/// Load settings from a specific file, returning defaults if it does not exist.
pub fn load_from_path(path: &Path) -> Result<ClientSettings, ConfigError> {
    if !path.exists() {
        return Ok(ClientSettings::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str::<ClientSettings>(&text)
        .map(ClientSettings::normalized)
        .map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        })
}

/// Persist settings to the app directory.
pub fn save(settings: &ClientSettings) -> Result<PathBuf, ConfigError> {
    let path = config_path()?;
    save_to_path(settings, &path)?;
    Ok(path)
}

/// Write settings to `path` atomically, creating parent directories as needed.
pub fn save_to_path(settings: &ClientSettings, path: &Path) -> Result<(), ConfigError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::CreateDir {
        path: dir.clone(),
        source,
    })?;
    let data = toml::to_string_pretty(settings).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    let write_error = |source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut file = tempfile::NamedTempFile::new_in(&dir).map_err(write_error)?;
    file.write_all(data.as_bytes()).map_err(write_error)?;
    file.persist(path)
        .map_err(|err| write_error(err.error))?;
    Ok(())
}
