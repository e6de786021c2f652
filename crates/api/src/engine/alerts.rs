//! On-demand alert queries.

use chrono::{DateTime, Duration, Utc};
use stormscout_core::category::{find_category, RewardCategory};
use stormscout_core::error::CoreError;
use stormscout_core::render::{AlertReport, RenderOptions};
use stormscout_core::scan::scan;
use stormscout_core::snapshot::RawSnapshot;
use stormscout_worldinfo::SnapshotProvider;

use crate::error::AppResult;

/// Look up a category key, rejecting unknown keys.
pub fn require_category(key: &str) -> Result<&'static RewardCategory, CoreError> {
    find_category(key).ok_or_else(|| CoreError::NotFound {
        entity: "RewardCategory",
        id: key.to_string(),
    })
}

/// Scan one snapshot for one category and render the report.
pub fn build_report(
    raw: &RawSnapshot,
    category: &RewardCategory,
    opts: &RenderOptions,
    stale_after: Duration,
    now: DateTime<Utc>,
) -> Result<AlertReport, CoreError> {
    let snapshot = raw.parse()?;
    let result = scan(&snapshot, category);
    let stale = raw.is_stale(now, stale_after);
    if stale {
        tracing::warn!(
            fetched_at = %raw.fetched_at,
            age_hours = raw.age(now).num_hours(),
            "Serving stale snapshot"
        );
    }

    tracing::debug!(
        category = category.key,
        zones = result.groups.len(),
        total = result.grand_total,
        dropped_alerts = result.dropped_alerts,
        "Alert scan complete"
    );

    Ok(AlertReport::build(category, &result, opts, stale))
}

/// Answer an alert query from whatever snapshot `provider` serves.
pub async fn query_alerts(
    provider: &dyn SnapshotProvider,
    category: &RewardCategory,
    opts: &RenderOptions,
    stale_after: Duration,
) -> AppResult<AlertReport> {
    let raw = provider.fetch_snapshot().await?;
    Ok(build_report(&raw, category, opts, stale_after, Utc::now())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fixtures::{vbucks_snapshot, StaticProvider};
    use assert_matches::assert_matches;
    use stormscout_core::category::EMPTY_COLOR;

    #[test]
    fn unknown_category_is_not_found() {
        assert_matches!(
            require_category("nope"),
            Err(CoreError::NotFound { entity: "RewardCategory", .. })
        );
        assert_eq!(require_category("CURRENCY_MTXSWAP").unwrap().name, "V-Bucks");
    }

    #[test]
    fn report_for_matching_snapshot() {
        let raw = RawSnapshot::new(vbucks_snapshot(50), Utc::now());
        let report = build_report(
            &raw,
            require_category("currency_mtxswap").unwrap(),
            &RenderOptions::default(),
            Duration::hours(24),
            Utc::now(),
        )
        .unwrap();

        assert!(!report.empty);
        assert_eq!(report.title, "STW Alerts For: V-Bucks");
        assert_eq!(report.total, 50);
        assert_eq!(report.footer, "Total Items: 50");
        assert!(report.pages[0].contains("**50x**"));
    }

    #[test]
    fn old_snapshot_is_flagged_stale() {
        let raw = RawSnapshot::new(vbucks_snapshot(50), Utc::now() - Duration::hours(30));
        let report = build_report(
            &raw,
            require_category("currency_mtxswap").unwrap(),
            &RenderOptions::default(),
            Duration::hours(24),
            Utc::now(),
        )
        .unwrap();
        assert!(report.footer.ends_with(" • Data may be outdated"));
    }

    #[test]
    fn no_matches_renders_empty_report() {
        let raw = RawSnapshot::new(vbucks_snapshot(50), Utc::now());
        let report = build_report(
            &raw,
            require_category("reagent_alteration_ele_fire").unwrap(),
            &RenderOptions::default(),
            Duration::hours(24),
            Utc::now(),
        )
        .unwrap();
        assert!(report.empty);
        assert_eq!(report.color, EMPTY_COLOR);
        assert!(report.pages[0].contains("No missions found for **Fire-Up**"));
    }

    #[test]
    fn malformed_snapshot_is_an_error() {
        let raw = RawSnapshot::new("not json", Utc::now());
        assert_matches!(
            build_report(
                &raw,
                require_category("all").unwrap(),
                &RenderOptions::default(),
                Duration::hours(24),
                Utc::now(),
            ),
            Err(CoreError::Snapshot(_))
        );
    }

    #[tokio::test]
    async fn query_reads_from_provider() {
        let provider = StaticProvider::new(vbucks_snapshot(80));
        let report = query_alerts(
            &provider,
            require_category("currency_mtxswap").unwrap(),
            &RenderOptions::default(),
            Duration::hours(24),
        )
        .await
        .unwrap();
        assert_eq!(report.total, 80);
    }
}
