use std::sync::Arc;

use stormscout_events::EventBus;
use stormscout_worldinfo::SnapshotProvider;

use crate::config::BotConfig;
use crate::engine::announce::AlertAnnouncer;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: stormscout_db::DbPool,
    pub config: Arc<BotConfig>,
    /// Event bus for mission, milestone and rotation events.
    pub event_bus: Arc<EventBus>,
    /// Serves alert queries from the cached snapshot.
    pub snapshots: Arc<dyn SnapshotProvider>,
    /// Live world-info sync; `None` when no Epic client token is configured.
    pub live_sync: Option<Arc<dyn SnapshotProvider>>,
    /// Rotation announcer; `None` when no alert webhook is configured.
    pub announcer: Option<Arc<AlertAnnouncer>>,
}
