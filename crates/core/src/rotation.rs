//! Rotation change detection.
//!
//! A fingerprint of the last published snapshot gates unsolicited
//! announcements so one mission rotation is announced once. Store failures
//! never abort a cycle: a failed read counts as "no prior fingerprint"
//! (publish again) and a failed write is logged.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tokio::sync::{Mutex, MutexGuard};

use crate::snapshot::WorldSnapshot;

// ---------------------------------------------------------------------------
// Fingerprints
// ---------------------------------------------------------------------------

/// How a snapshot is fingerprinted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FingerprintStrategy {
    /// SHA-256 of the raw snapshot text.
    ContentHash,
    /// The snapshot's `nextRefresh` marker, falling back to the content
    /// hash when the marker is absent or the text does not parse.
    #[default]
    NextRefresh,
}

impl std::str::FromStr for FingerprintStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "content_hash" | "hash" => Ok(Self::ContentHash),
            "next_refresh" | "refresh" => Ok(Self::NextRefresh),
            other => Err(format!("unknown fingerprint strategy: {other}")),
        }
    }
}

/// Hex-encoded SHA-256 digest.
pub fn sha256_hex(data: &[u8]) -> String {
    let hash = Sha256::digest(data);
    format!("{hash:x}")
}

impl FingerprintStrategy {
    pub fn fingerprint(self, content: &str) -> String {
        if self == Self::NextRefresh {
            if let Some(marker) = WorldSnapshot::parse(content)
                .ok()
                .as_ref()
                .and_then(WorldSnapshot::next_refresh)
            {
                return format!("refresh:{marker}");
            }
        }
        format!("sha256:{}", sha256_hex(content.as_bytes()))
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum FingerprintError {
    #[error("Fingerprint I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Fingerprint file is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Persisted fingerprint record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingerprintRecord {
    pub last_posted: String,
    pub committed_at: DateTime<Utc>,
}

/// Single-value persistence for the last published fingerprint.
#[async_trait]
pub trait FingerprintStore: Send + Sync {
    async fn load(&self) -> Result<Option<FingerprintRecord>, FingerprintError>;
    async fn save(&self, record: &FingerprintRecord) -> Result<(), FingerprintError>;
}

/// JSON file store.
pub struct FileFingerprintStore {
    path: PathBuf,
}

impl FileFingerprintStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl FingerprintStore for FileFingerprintStore {
    async fn load(&self) -> Result<Option<FingerprintRecord>, FingerprintError> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&text)?))
    }

    async fn save(&self, record: &FingerprintRecord) -> Result<(), FingerprintError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(record)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

/// In-memory store.
#[derive(Default)]
pub struct MemoryFingerprintStore {
    inner: std::sync::Mutex<Option<FingerprintRecord>>,
}

#[async_trait]
impl FingerprintStore for MemoryFingerprintStore {
    async fn load(&self) -> Result<Option<FingerprintRecord>, FingerprintError> {
        Ok(self.inner.lock().map(|g| g.clone()).unwrap_or(None))
    }

    async fn save(&self, record: &FingerprintRecord) -> Result<(), FingerprintError> {
        if let Ok(mut guard) = self.inner.lock() {
            *guard = Some(record.clone());
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Detector
// ---------------------------------------------------------------------------

/// Decides whether a snapshot is a new rotation and records publishes.
///
/// Callers hold the guard from [`RotationDetector::lock_cycle`] across
/// check, publish and commit so concurrent triggers cannot interleave.
#[derive(Clone)]
pub struct RotationDetector {
    store: Arc<dyn FingerprintStore>,
    strategy: FingerprintStrategy,
    cycle: Arc<Mutex<()>>,
}

impl RotationDetector {
    pub fn new(store: Arc<dyn FingerprintStore>, strategy: FingerprintStrategy) -> Self {
        Self {
            store,
            strategy,
            cycle: Arc::new(Mutex::new(())),
        }
    }

    pub fn strategy(&self) -> FingerprintStrategy {
        self.strategy
    }

    pub async fn lock_cycle(&self) -> MutexGuard<'_, ()> {
        self.cycle.lock().await
    }

    /// `true` when forced, when no fingerprint is stored, when the stored
    /// one differs, or when the store cannot be read.
    pub async fn should_publish(&self, content: &str, force: bool) -> bool {
        if force {
            return true;
        }
        let current = self.strategy.fingerprint(content);
        match self.store.load().await {
            Ok(Some(record)) => record.last_posted != current,
            Ok(None) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read rotation fingerprint, publishing");
                true
            }
        }
    }

    /// Record `content` as published. Returns whether the write succeeded.
    pub async fn commit(&self, content: &str) -> bool {
        let record = FingerprintRecord {
            last_posted: self.strategy.fingerprint(content),
            committed_at: Utc::now(),
        };
        match self.store.save(&record).await {
            Ok(()) => {
                tracing::info!(fingerprint = %record.last_posted, "Rotation fingerprint committed");
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to persist rotation fingerprint");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const SNAP_A: &str = r#"{"missionAlerts":[{"theaterId":"T","nextRefresh":"2026-10-18T00:00:00Z"}]}"#;
    const SNAP_A2: &str = r#"{"missionAlerts":[{"theaterId":"T","nextRefresh":"2026-10-18T00:00:00Z"}],"x":1}"#;
    const SNAP_B: &str = r#"{"missionAlerts":[{"theaterId":"T","nextRefresh":"2026-10-19T00:00:00Z"}]}"#;

    struct BrokenStore;

    #[async_trait]
    impl FingerprintStore for BrokenStore {
        async fn load(&self) -> Result<Option<FingerprintRecord>, FingerprintError> {
            Err(std::io::Error::other("disk on fire").into())
        }
        async fn save(&self, _: &FingerprintRecord) -> Result<(), FingerprintError> {
            Err(std::io::Error::other("disk on fire").into())
        }
    }

    fn detector(strategy: FingerprintStrategy) -> RotationDetector {
        RotationDetector::new(Arc::new(MemoryFingerprintStore::default()), strategy)
    }

    // -- fingerprints --------------------------------------------------------

    #[test]
    fn sha256_of_empty_input() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn next_refresh_falls_back_to_hash() {
        let s = FingerprintStrategy::NextRefresh;
        assert_eq!(s.fingerprint(SNAP_A), "refresh:2026-10-18T00:00:00Z");
        assert!(s.fingerprint("not json").starts_with("sha256:"));
        assert_eq!(
            "content_hash".parse::<FingerprintStrategy>(),
            Ok(FingerprintStrategy::ContentHash)
        );
        assert!("bogus".parse::<FingerprintStrategy>().is_err());
    }

    // -- detector ------------------------------------------------------------

    #[tokio::test]
    async fn publishes_once_per_rotation() {
        let d = detector(FingerprintStrategy::ContentHash);
        assert!(d.should_publish(SNAP_A, false).await);
        assert!(d.commit(SNAP_A).await);
        assert!(!d.should_publish(SNAP_A, false).await);
        assert!(!d.should_publish(SNAP_A, false).await);
        assert!(d.should_publish(SNAP_A, true).await);
        assert!(d.should_publish(SNAP_B, false).await);
    }

    #[tokio::test]
    async fn next_refresh_ignores_unrelated_content_changes() {
        let d = detector(FingerprintStrategy::NextRefresh);
        d.commit(SNAP_A).await;
        assert!(!d.should_publish(SNAP_A2, false).await);
        assert!(d.should_publish(SNAP_B, false).await);
    }

    #[tokio::test]
    async fn store_failures_are_not_fatal() {
        let d = RotationDetector::new(Arc::new(BrokenStore), FingerprintStrategy::ContentHash);
        assert!(d.should_publish(SNAP_A, false).await);
        assert!(!d.commit(SNAP_A).await);
    }

    #[tokio::test]
    async fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileFingerprintStore::new(dir.path().join("state/last_reset.json"));
        assert_matches!(store.load().await, Ok(None));

        let d = RotationDetector::new(Arc::new(store), FingerprintStrategy::ContentHash);
        d.commit(SNAP_A).await;
        assert!(!d.should_publish(SNAP_A, false).await);

        let reopened = FileFingerprintStore::new(dir.path().join("state/last_reset.json"));
        let record = reopened.load().await.unwrap().unwrap();
        assert!(record.last_posted.starts_with("sha256:"));
    }

    #[tokio::test]
    async fn malformed_file_reads_as_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("last_reset.json");
        std::fs::write(&path, "{ nope").unwrap();
        assert_matches!(
            FileFingerprintStore::new(&path).load().await,
            Err(FingerprintError::Malformed(_))
        );
    }
}
