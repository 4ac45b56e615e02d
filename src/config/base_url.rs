use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use url::Url;

use super::{ClientSettings, ConfigError};

/// Environment variable selecting the deployment (`production` or `development`).
pub const DEPLOYMENT_ENV: &str = "ATTRITION_ENV";
/// Path prefix the backend is mounted under when served from the client's origin.
const PRODUCTION_PREFIX: &str = "/api";

static PROCESS_BASE_URL: OnceLock<String> = OnceLock::new();

/// Deployment flavor deciding which backend address is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Deployment {
    Production,
    Development,
}

impl Deployment {
    /// Parse an environment value such as `production` or `dev`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Some(Self::Production),
            "development" | "dev" | "test" => Some(Self::Development),
            _ => None,
        }
    }

    /// Pick the deployment: environment first, then settings, then the build profile.
    pub fn detect(env_value: Option<&str>, configured: Option<Deployment>) -> Self {
        env_value
            .and_then(Self::parse)
            .or(configured)
            .unwrap_or_else(Self::for_build)
    }

    fn for_build() -> Self {
        if cfg!(debug_assertions) {
            Self::Development
        } else {
            Self::Production
        }
    }
}

/// Compute the base URL (no trailing slash) for `deployment`.
pub fn resolve_base_url(
    settings: &ClientSettings,
    deployment: Deployment,
) -> Result<String, ConfigError> {
    match deployment {
        Deployment::Production => {
            let origin = parse_http_url(&settings.api.production_origin)?;
            let joined = origin
                .join(PRODUCTION_PREFIX)
                .map_err(|source| ConfigError::InvalidUrl {
                    value: settings.api.production_origin.clone(),
                    source,
                })?;
            Ok(trim_base(joined))
        }
        Deployment::Development => {
            let url = parse_http_url(&settings.api.development_base_url)?;
            Ok(trim_base(url))
        }
    }
}

/// Return the base URL for this process, resolving it on first use.
///
/// Later calls return the first resolved value even if settings change.
pub fn process_base_url(settings: &ClientSettings) -> Result<&'static str, ConfigError> {
    if let Some(url) = PROCESS_BASE_URL.get() {
        return Ok(url.as_str());
    }
    let env_value = std::env::var(DEPLOYMENT_ENV).ok();
    let deployment = Deployment::detect(env_value.as_deref(), settings.api.deployment);
    let resolved = resolve_base_url(settings, deployment)?;
    tracing::info!("Using {deployment:?} backend at {resolved}");
    let _ = PROCESS_BASE_URL.set(resolved);
    Ok(PROCESS_BASE_URL.get().map(String::as_str).unwrap_or_default())
}

pub(crate) fn parse_http_url(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value.trim()).map_err(|source| ConfigError::InvalidUrl {
        value: value.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ConfigError::UnsupportedScheme(value.to_string())),
    }
}

fn trim_base(url: Url) -> String {
    url.as_str().trim_end_matches('/').to_string()
}
