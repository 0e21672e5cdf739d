//! Service wiring: catalog source, catalog cache, user directory.
//!
//! The catalog cache is the "fetch collaborator": it owns the snapshot
//! (`data`, `is_loading`, `error`) and the route map derived from it, and a
//! background task refreshes both on an interval. Handlers read a consistent
//! pair under one lock and run the pure resolver on it.

use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::{RwLock, RwLockReadGuard};

use arena_auth::{CatalogSnapshot, PermissionCatalog, PermissionRecord, RoutePermissionMap};

use crate::config::{ApiConfig, CatalogLocation};
use crate::directory::{InMemoryUserDirectory, UserDirectory};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid catalog payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Backend responses come either as a bare array or wrapped in `data`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogPayload {
    Bare(Vec<PermissionRecord>),
    Wrapped { data: Vec<PermissionRecord> },
}

impl From<CatalogPayload> for Vec<PermissionRecord> {
    fn from(payload: CatalogPayload) -> Self {
        match payload {
            CatalogPayload::Bare(records) | CatalogPayload::Wrapped { data: records } => records,
        }
    }
}

pub fn parse_catalog(raw: &str) -> Result<Vec<PermissionRecord>, CatalogError> {
    let payload: CatalogPayload = serde_json::from_str(raw)?;
    Ok(payload.into())
}

#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<PermissionRecord>, CatalogError>;
}

/// Fixed catalog (tests, or when no source is configured).
#[derive(Debug, Clone, Default)]
pub struct StaticCatalogSource {
    records: Vec<PermissionRecord>,
}

impl StaticCatalogSource {
    pub fn new(records: Vec<PermissionRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl CatalogSource for StaticCatalogSource {
    async fn fetch(&self) -> Result<Vec<PermissionRecord>, CatalogError> {
        Ok(self.records.clone())
    }
}

/// Catalog read from a JSON file on every refresh.
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn fetch(&self) -> Result<Vec<PermissionRecord>, CatalogError> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        parse_catalog(&raw)
    }
}

/// Catalog fetched from the booking backend's permissions endpoint.
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: reqwest::Client,
    url: String,
    token: Option<String>,
}

impl HttpCatalogSource {
    pub fn new(url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            token,
        }
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch(&self) -> Result<Vec<PermissionRecord>, CatalogError> {
        let mut req = self.client.get(&self.url);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        let raw = req.send().await?.error_for_status()?.text().await?;
        parse_catalog(&raw)
    }
}

/// Snapshot plus the route map derived from it.
#[derive(Debug, Default)]
pub struct CatalogState {
    pub snapshot: CatalogSnapshot,
    pub routes: RoutePermissionMap,
}

pub struct CatalogCache {
    source: Arc<dyn CatalogSource>,
    state: RwLock<CatalogState>,
}

impl CatalogCache {
    /// Starts in the loading state with an empty route map (everything denies).
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            state: RwLock::new(CatalogState {
                snapshot: CatalogSnapshot::loading(),
                routes: RoutePermissionMap::default(),
            }),
        }
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, CatalogState> {
        self.state.read().await
    }

    /// Fetch once. On failure the previous catalog stays in place and the
    /// error is recorded on the snapshot.
    pub async fn refresh(&self) -> Result<usize, CatalogError> {
        match self.source.fetch().await {
            Ok(records) => {
                let catalog = PermissionCatalog::new(records);
                let routes = RoutePermissionMap::build(&catalog);
                let count = catalog.len();

                let mut state = self.state.write().await;
                state.snapshot = CatalogSnapshot::loaded(catalog, Utc::now());
                state.routes = routes;

                tracing::info!(permissions = count, routes = state.routes.len(), "catalog refreshed");
                Ok(count)
            }
            Err(e) => {
                tracing::warn!("catalog refresh failed: {e}");
                self.state.write().await.snapshot.failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Refresh on a fixed interval, starting immediately.
    pub fn spawn_refresh(self: Arc<Self>, every: Duration) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                // failure already logged and recorded on the snapshot
                let _ = self.refresh().await;
            }
        })
    }
}

pub struct AppServices {
    pub catalog: Arc<CatalogCache>,
    pub users: Arc<dyn UserDirectory>,
    pub default_redirect: String,
}

impl AppServices {
    pub fn new(
        catalog: Arc<CatalogCache>,
        users: Arc<dyn UserDirectory>,
        default_redirect: impl Into<String>,
    ) -> Self {
        Self {
            catalog,
            users,
            default_redirect: default_redirect.into(),
        }
    }

    /// Wire services from configuration. The catalog is not fetched here;
    /// call `CatalogCache::refresh` or `spawn_refresh`.
    pub fn from_config(config: &ApiConfig) -> anyhow::Result<Self> {
        let source: Arc<dyn CatalogSource> = match &config.catalog {
            CatalogLocation::File(path) => Arc::new(FileCatalogSource::new(path.clone())),
            CatalogLocation::Url(url) => {
                Arc::new(HttpCatalogSource::new(url.clone(), config.catalog_token.clone()))
            }
            CatalogLocation::None => {
                tracing::warn!("no catalog source configured; every gated route will deny");
                Arc::new(StaticCatalogSource::default())
            }
        };

        let users = match &config.users_path {
            Some(path) => InMemoryUserDirectory::from_json_file(path)
                .with_context(|| format!("loading users from {}", path.display()))?,
            None => InMemoryUserDirectory::new(),
        };
        tracing::info!(users = users.len(), "user directory loaded");

        Ok(Self::new(
            Arc::new(CatalogCache::new(source)),
            Arc::new(users),
            config.default_redirect.clone(),
        ))
    }
}
