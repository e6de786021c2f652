//! Mission alert engine and community tracking logic.
//!
//! Everything here is pure or touches only local files: item and zone
//! resolution, reward matching, alert scanning, pagination, rotation
//! fingerprints, and the host/leech tracking rules.

pub mod catalog;
pub mod category;
pub mod error;
pub mod export;
pub mod filters;
pub mod item;
pub mod leaderboard;
pub mod milestones;
pub mod missions;
pub mod render;
pub mod resolver;
pub mod rotation;
pub mod scan;
pub mod snapshot;
pub mod tracking;
pub mod types;
pub mod zones;
