//! Rotation announcements.
//!
//! One cycle fetches a snapshot, asks the [`RotationDetector`] whether it
//! is a new rotation, publishes a report per configured category (or a
//! single status message when none has matches) and commits the
//! fingerprint only after every publish succeeded. A failed cycle leaves
//! the fingerprint untouched so the next trigger retries.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::Serialize;
use stormscout_core::category::{find_category, RewardCategory, DEFAULT_COLOR};
use stormscout_core::render::{AlertReport, RenderOptions};
use stormscout_core::rotation::RotationDetector;
use stormscout_core::scan::scan;
use stormscout_events::bus::event_types;
use stormscout_events::{Announcement, AnnouncementSink, BotEvent, EventBus};
use stormscout_worldinfo::SnapshotProvider;

use crate::error::AppResult;

pub const STATUS_TITLE: &str = "Mission Reset Status";

/// What one announce cycle did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CycleOutcome {
    /// Same rotation as the last publish.
    Unchanged,
    /// Reports were posted for `categories`.
    Published {
        categories: Vec<String>,
        committed: bool,
    },
    /// Nothing matched; the status message was posted.
    NothingFound { committed: bool },
}

/// Resolve configured category keys, skipping unknown ones.
pub fn resolve_categories(keys: &[String]) -> Vec<&'static RewardCategory> {
    keys.iter()
        .filter_map(|key| {
            let category = find_category(key);
            if category.is_none() {
                tracing::warn!(key = %key, "Unknown auto-alert category, skipping");
            }
            category
        })
        .collect()
}

/// `V-Bucks or Upgrade Llama Tokens`, `A, B or C`.
fn join_names(categories: &[&RewardCategory]) -> String {
    match categories.split_last() {
        None => "rewards".to_string(),
        Some((last, [])) => last.name.to_string(),
        Some((last, rest)) => {
            let head: Vec<&str> = rest.iter().map(|c| c.name).collect();
            format!("{} or {}", head.join(", "), last.name)
        }
    }
}

pub fn status_announcement(categories: &[&RewardCategory]) -> Announcement {
    Announcement::new(
        STATUS_TITLE,
        format!(
            "The missions have refreshed, but **no {}** were found in today's rotation.",
            join_names(categories)
        ),
        DEFAULT_COLOR,
    )
}

/// Publishes rotation reports to an [`AnnouncementSink`].
pub struct AlertAnnouncer {
    provider: Arc<dyn SnapshotProvider>,
    detector: RotationDetector,
    sink: Arc<dyn AnnouncementSink>,
    categories: Vec<&'static RewardCategory>,
    render: RenderOptions,
    stale_after: Duration,
    event_bus: Option<Arc<EventBus>>,
}

impl AlertAnnouncer {
    pub fn new(
        provider: Arc<dyn SnapshotProvider>,
        detector: RotationDetector,
        sink: Arc<dyn AnnouncementSink>,
        categories: Vec<&'static RewardCategory>,
    ) -> Self {
        Self {
            provider,
            detector,
            sink,
            categories,
            render: RenderOptions::default(),
            stale_after: Duration::hours(24),
            event_bus: None,
        }
    }

    pub fn with_render_options(mut self, render: RenderOptions) -> Self {
        self.render = render;
        self
    }

    pub fn with_stale_after(mut self, stale_after: Duration) -> Self {
        self.stale_after = stale_after;
        self
    }

    pub fn with_event_bus(mut self, event_bus: Arc<EventBus>) -> Self {
        self.event_bus = Some(event_bus);
        self
    }

    /// Run one check → publish → commit cycle. `force` publishes even when
    /// the rotation has not changed.
    pub async fn run_cycle(&self, force: bool) -> AppResult<CycleOutcome> {
        let _cycle = self.detector.lock_cycle().await;

        let raw = self.provider.fetch_snapshot().await?;
        if !self.detector.should_publish(&raw.body, force).await {
            tracing::info!("Rotation unchanged, skipping announcements");
            return Ok(CycleOutcome::Unchanged);
        }

        let snapshot = raw.parse()?;
        let stale = raw.is_stale(Utc::now(), self.stale_after);
        let reports: Vec<AlertReport> = self
            .categories
            .iter()
            .map(|category| {
                let mut report =
                    AlertReport::build(category, &scan(&snapshot, category), &self.render, stale);
                report.title = format!("{} Found!", category.name);
                report
            })
            .filter(|report| !report.empty)
            .collect();

        if reports.is_empty() {
            self.sink
                .announce(&status_announcement(&self.categories))
                .await?;
            tracing::info!("No announced rewards this rotation, status message posted");
        }
        for report in &reports {
            self.sink.publish_report(report).await?;
            tracing::info!(
                category = %report.category,
                pages = report.pages.len(),
                total = report.total,
                "Rotation report published"
            );
        }

        let committed = self.detector.commit(&raw.body).await;
        if let Some(bus) = &self.event_bus {
            bus.publish(
                BotEvent::new(event_types::ROTATION_PUBLISHED).with_payload(serde_json::json!({
                    "reports": reports.len(),
                    "forced": force,
                })),
            );
        }

        if reports.is_empty() {
            return Ok(CycleOutcome::NothingFound { committed });
        }
        Ok(CycleOutcome::Published {
            categories: reports.into_iter().map(|r| r.category).collect(),
            committed,
        })
    }
}
