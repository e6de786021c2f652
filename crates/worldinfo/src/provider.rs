//! Snapshot providers.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use stormscout_core::snapshot::RawSnapshot;

use crate::api::{EpicApi, WorldInfoError};
use crate::cache::SnapshotCache;
use crate::credentials::DeviceAuth;

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Mission data unavailable: {0}")]
    Unavailable(String),

    #[error("World info fetch failed: {0}")]
    Fetch(#[from] WorldInfoError),

    #[error("World info fetch timed out after {0:?}")]
    Timeout(Duration),

    #[error("Snapshot cache I/O error: {0}")]
    Cache(#[from] std::io::Error),
}

/// Source of world-info snapshots.
#[async_trait]
pub trait SnapshotProvider: Send + Sync {
    async fn fetch_snapshot(&self) -> Result<RawSnapshot, SnapshotError>;
}

/// Serves the cached snapshot without touching the network.
pub struct CachedSnapshotProvider {
    cache: Arc<SnapshotCache>,
}

impl CachedSnapshotProvider {
    pub fn new(cache: Arc<SnapshotCache>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl SnapshotProvider for CachedSnapshotProvider {
    async fn fetch_snapshot(&self) -> Result<RawSnapshot, SnapshotError> {
        self.cache.read().await?.ok_or_else(|| {
            let path = self.cache.path().display();
            SnapshotError::Unavailable(format!("no cached snapshot at {path}"))
        })
    }
}

/// Authenticates, fetches a fresh snapshot and writes it to the cache.
pub struct LiveSnapshotProvider {
    api: EpicApi,
    credentials_path: PathBuf,
    cache: Arc<SnapshotCache>,
    timeout: Duration,
}

impl LiveSnapshotProvider {
    pub fn new(
        api: EpicApi,
        credentials_path: impl Into<PathBuf>,
        cache: Arc<SnapshotCache>,
        timeout: Duration,
    ) -> Self {
        Self {
            api,
            credentials_path: credentials_path.into(),
            cache,
            timeout,
        }
    }

    async fn fetch_uncached(&self) -> Result<String, SnapshotError> {
        let auth = DeviceAuth::load(&self.credentials_path).await?;
        let token = self.api.authenticate(&auth).await?;
        Ok(self.api.fetch_world_info(&token).await?)
    }
}

#[async_trait]
impl SnapshotProvider for LiveSnapshotProvider {
    async fn fetch_snapshot(&self) -> Result<RawSnapshot, SnapshotError> {
        let body = tokio::time::timeout(self.timeout, self.fetch_uncached())
            .await
            .map_err(|_| SnapshotError::Timeout(self.timeout))??;

        let snapshot = RawSnapshot::new(body, Utc::now());
        if let Err(e) = self.cache.write(&snapshot).await {
            tracing::warn!(
                error = %e,
                path = %self.cache.path().display(),
                "Failed to cache snapshot"
            );
        }
        tracing::info!(bytes = snapshot.body.len(), "World info synced");
        Ok(snapshot)
    }
}
