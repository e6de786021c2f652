//! Daily rotation announcements.
//!
//! Runs one cycle at startup, then once a day at the configured UTC time.
//! Each cycle syncs the snapshot when live sync is configured (falling back
//! to the cached copy on failure) and hands off to the [`AlertAnnouncer`].

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveTime, Utc};
use stormscout_worldinfo::SnapshotProvider;
use tokio_util::sync::CancellationToken;

use crate::engine::announce::{AlertAnnouncer, CycleOutcome};

/// Next occurrence of `at` strictly after `now`.
pub fn next_run(now: DateTime<Utc>, at: NaiveTime) -> DateTime<Utc> {
    let today = now.date_naive().and_time(at).and_utc();
    if today > now {
        today
    } else {
        today + chrono::Duration::days(1)
    }
}

/// One sync + announce cycle. Errors are logged, never propagated.
pub async fn run_once(
    live_sync: Option<&dyn SnapshotProvider>,
    announcer: &AlertAnnouncer,
) -> Option<CycleOutcome> {
    if let Some(live) = live_sync {
        if let Err(e) = live.fetch_snapshot().await {
            tracing::warn!(error = %e, "World info sync failed, using cached snapshot");
        }
    }

    match announcer.run_cycle(false).await {
        Ok(outcome) => {
            tracing::info!(?outcome, "Auto-alert cycle complete");
            Some(outcome)
        }
        Err(e) => {
            tracing::error!(error = %e, "Auto-alert cycle failed");
            None
        }
    }
}

/// Run the auto-alert loop until `cancel` is triggered.
pub async fn run(
    live_sync: Option<Arc<dyn SnapshotProvider>>,
    announcer: Arc<AlertAnnouncer>,
    schedule: NaiveTime,
    cancel: CancellationToken,
) {
    tracing::info!(schedule = %schedule, "Auto-alert job started");

    run_once(live_sync.as_deref(), &announcer).await;

    loop {
        let now = Utc::now();
        let next = next_run(now, schedule);
        let delay = (next - now).to_std().unwrap_or(Duration::ZERO);
        tracing::debug!(next_run = %next, "Auto-alert job sleeping");

        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Auto-alert job stopping");
                break;
            }
            _ = tokio::time::sleep(delay) => {
                run_once(live_sync.as_deref(), &announcer).await;
            }
        }
    }
}
