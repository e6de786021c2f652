//! Snapshot acquisition from the Epic world-info service.
//!
//! [`LiveSnapshotProvider`] authenticates with device-auth credentials,
//! fetches the world-info document and caches it on disk.
//! [`CachedSnapshotProvider`] serves the last cached copy.

pub mod api;
pub mod cache;
pub mod credentials;
pub mod provider;

pub use api::{EpicApi, WorldInfoError};
pub use cache::SnapshotCache;
pub use credentials::DeviceAuth;
pub use provider::{CachedSnapshotProvider, LiveSnapshotProvider, SnapshotError, SnapshotProvider};
