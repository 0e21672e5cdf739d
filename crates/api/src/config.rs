//! Runtime configuration, read from environment variables.

use std::{net::SocketAddr, path::PathBuf, time::Duration};

use thiserror::Error;

use arena_auth::DEFAULT_REDIRECT;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

/// Where the permission catalog comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogLocation {
    /// JSON file holding the backend's permission list.
    File(PathBuf),
    /// Backend endpoint returning the permission list.
    Url(String),
    /// No source configured; the catalog stays empty and every route denies.
    None,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub catalog: CatalogLocation,
    /// Bearer token used when fetching the catalog over HTTP.
    pub catalog_token: Option<String>,
    /// JSON seed of `{token, user}` pairs for the user directory.
    pub users_path: Option<PathBuf>,
    pub refresh_every: Duration,
    pub default_redirect: String,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (tests pass a map here).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8080".to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                key: "BIND_ADDR",
                message: e.to_string(),
            })?;

        // A file path wins over a URL when both are set.
        let catalog = match (get("CATALOG_PATH"), get("CATALOG_URL")) {
            (Some(path), _) => CatalogLocation::File(PathBuf::from(path)),
            (None, Some(url)) => CatalogLocation::Url(url),
            (None, None) => CatalogLocation::None,
        };

        let refresh_secs = match get("CATALOG_REFRESH_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                key: "CATALOG_REFRESH_SECS",
                message: e.to_string(),
            })?,
            None => 60,
        };
        if refresh_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "CATALOG_REFRESH_SECS",
                message: "must be greater than zero".to_string(),
            });
        }

        let default_redirect = get("DEFAULT_REDIRECT").unwrap_or_else(|| DEFAULT_REDIRECT.to_string());
        if !default_redirect.starts_with('/') {
            return Err(ConfigError::Invalid {
                key: "DEFAULT_REDIRECT",
                message: "must be an absolute path".to_string(),
            });
        }

        Ok(Self {
            bind_addr,
            catalog,
            catalog_token: get("CATALOG_TOKEN"),
            users_path: get("USERS_PATH").map(PathBuf::from),
            refresh_every: Duration::from_secs(refresh_secs),
            default_redirect,
        })
    }
}
