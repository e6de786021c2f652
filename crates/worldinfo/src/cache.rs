//! On-disk snapshot cache.
//!
//! The body is written verbatim; the fetch time goes to a sidecar
//! `<file>.meta.json`. When the sidecar is missing the file's modification
//! time is used.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stormscout_core::snapshot::RawSnapshot;

#[derive(Debug, Serialize, Deserialize)]
struct CacheMeta {
    fetched_at: DateTime<Utc>,
}

pub struct SnapshotCache {
    path: PathBuf,
}

impl SnapshotCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn meta_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".meta.json");
        PathBuf::from(name)
    }

    pub async fn write(&self, snapshot: &RawSnapshot) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, &snapshot.body).await?;

        let meta = CacheMeta {
            fetched_at: snapshot.fetched_at,
        };
        let json = serde_json::to_string(&meta).map_err(std::io::Error::other)?;
        tokio::fs::write(self.meta_path(), json).await
    }

    /// Read the cached snapshot. `Ok(None)` when nothing is cached.
    pub async fn read(&self) -> std::io::Result<Option<RawSnapshot>> {
        let body = match tokio::fs::read_to_string(&self.path).await {
            Ok(body) => body,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };

        let fetched_at = match self.read_meta().await {
            Some(meta) => meta.fetched_at,
            None => tokio::fs::metadata(&self.path)
                .await?
                .modified()
                .map(DateTime::<Utc>::from)
                .unwrap_or_else(|_| Utc::now()),
        };

        Ok(Some(RawSnapshot { body, fetched_at }))
    }

    async fn read_meta(&self) -> Option<CacheMeta> {
        let text = tokio::fs::read_to_string(self.meta_path()).await.ok()?;
        serde_json::from_str(&text).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn round_trips_body_and_fetch_time() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path().join("data/daily_missions.json"));
        assert!(cache.read().await.unwrap().is_none());

        let fetched_at = Utc::now() - Duration::hours(3);
        cache.write(&RawSnapshot::new("{}", fetched_at)).await.unwrap();

        let read = cache.read().await.unwrap().unwrap();
        assert_eq!(read.body, "{}");
        assert_eq!(read.fetched_at, fetched_at);
    }

    #[tokio::test]
    async fn missing_meta_falls_back_to_mtime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("daily_missions.json");
        std::fs::write(&path, "{}").unwrap();

        let read = SnapshotCache::new(&path).read().await.unwrap().unwrap();
        assert!(Utc::now() - read.fetched_at < Duration::minutes(5));
    }
}
