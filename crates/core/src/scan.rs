//! Alert scan: joins alerts to their missions and groups matching lines by
//! zone.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::category::RewardCategory;
use crate::filters::{aggregate, exclude_gold, total_quantity};
use crate::item::RawRewardItem;
use crate::missions::mission_icon;
use crate::resolver::resolve;
use crate::snapshot::{AlertTile, MissionTile, WorldSnapshot};
use crate::zones::{
    display_power_level, resolve_power_level, resolve_zone_name, zone_rank, UNKNOWN_ZONE,
};

/// One rendered mission line and the value it sorts by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanLine {
    pub text: String,
    pub sort_value: u64,
}

/// Lines for one zone, in encounter order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ZoneGroup {
    pub lines: Vec<ScanLine>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanResult {
    pub groups: BTreeMap<String, ZoneGroup>,
    /// Sum of matched quantities across every line.
    pub grand_total: u64,
    /// Alerts without a mission on the same tile.
    pub dropped_alerts: usize,
}

impl ScanResult {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Zones in canonical difficulty order; zones outside it follow,
    /// alphabetically.
    pub fn ordered_zones(&self) -> Vec<(&str, &ZoneGroup)> {
        let mut zones: Vec<_> = self.groups.iter().map(|(k, v)| (k.as_str(), v)).collect();
        zones.sort_by(|(a, _), (b, _)| zone_rank(a).cmp(&zone_rank(b)).then_with(|| a.cmp(b)));
        zones
    }
}

/// Missions are keyed by theater id and tile index.
type MissionKey<'a> = (&'a str, i64);

fn mission_lookup(snapshot: &WorldSnapshot) -> HashMap<MissionKey<'_>, &MissionTile> {
    snapshot
        .missions
        .iter()
        .flat_map(|t| {
            t.available_missions
                .iter()
                .map(move |m| ((t.theater_id.as_str(), m.tile_index), m))
        })
        .collect()
}

/// Join an alert to its mission. `None` is an expected outcome under
/// snapshot churn.
fn join<'s, 'a>(
    lookup: &HashMap<MissionKey<'s>, &'a MissionTile>,
    theater_id: &'s str,
    alert: &AlertTile,
) -> Option<&'a MissionTile> {
    lookup.get(&(theater_id, alert.tile_index)).copied()
}

fn format_rewards(
    items: &[RawRewardItem],
    mut emphasize: impl FnMut(&RawRewardItem) -> bool,
) -> String {
    items
        .iter()
        .map(|i| {
            let icon = resolve(&i.item_type).icon;
            if emphasize(i) {
                format!("**{}x** {icon}", i.quantity)
            } else {
                format!("{}x {icon}", i.quantity)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build the reward text and sort value for one joined alert, or `None`
/// when the mission does not qualify.
fn evaluate(
    category: &RewardCategory,
    power_level: u32,
    mission: &MissionTile,
    alert: &AlertTile,
) -> Option<(String, u64)> {
    if let Some(required) = category.required_power_level() {
        if power_level != required {
            return None;
        }
        // Base rewards answer "what floor loot is here".
        let rewards = aggregate(&exclude_gold(&mission.mission_rewards.items));
        let value = total_quantity(&rewards);
        return Some((format_rewards(&rewards, |_| true), value));
    }

    let alert_items = &alert.mission_alert_rewards.items;
    let matched: Vec<bool> = alert_items
        .iter()
        .map(|i| category.matches(&resolve(&i.item_type)))
        .collect();
    if !matched.iter().any(|m| *m) {
        return None;
    }

    let value = alert_items
        .iter()
        .zip(&matched)
        .filter(|(_, m)| **m)
        .map(|(i, _)| i.quantity)
        .sum();

    let mut flags = matched.iter();
    let text = format_rewards(alert_items, |_| flags.next().copied().unwrap_or(false));
    Some((text, value))
}

/// Scan a snapshot for one reward category.
pub fn scan(snapshot: &WorldSnapshot, category: &RewardCategory) -> ScanResult {
    let lookup = mission_lookup(snapshot);
    let mut result = ScanResult::default();

    for group in &snapshot.mission_alerts {
        let theater_id = group.theater_id.as_str();

        for alert in &group.available_mission_alerts {
            let Some(mission) = join(&lookup, theater_id, alert) else {
                result.dropped_alerts += 1;
                continue;
            };

            let pl = resolve_power_level(theater_id, &mission.mission_difficulty_info.row_name);
            let Some((rewards, value)) = evaluate(category, pl, mission, alert) else {
                continue;
            };
            if rewards.is_empty() {
                continue;
            }

            let icon = mission_icon(&mission.mission_generator, &alert.name);
            let text = format!("{icon} ⚡ `{}` | {rewards}", display_power_level(pl));

            let zone = match resolve_zone_name(theater_id) {
                UNKNOWN_ZONE => snapshot
                    .theater_display_name(theater_id)
                    .unwrap_or(UNKNOWN_ZONE),
                name => name,
            };

            result.grand_total += value;
            result
                .groups
                .entry(zone.to_string())
                .or_default()
                .lines
                .push(ScanLine {
                    text,
                    sort_value: value,
                });
        }
    }

    if result.dropped_alerts > 0 {
        tracing::debug!(
            category = category.key,
            dropped = result.dropped_alerts,
            "Alerts without a matching mission tile"
        );
    }
    result
}
