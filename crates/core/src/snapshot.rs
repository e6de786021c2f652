//! World-info snapshot model.
//!
//! Only the fields the alert scan reads are modelled; everything else in
//! the upstream document is ignored. Missing arrays and objects default to
//! empty so a partially populated snapshot still scans.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use crate::error::CoreError;
use crate::item::RawRewardItem;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorldSnapshot {
    pub theaters: Vec<TheaterInfo>,
    pub missions: Vec<TheaterMissions>,
    pub mission_alerts: Vec<TheaterAlerts>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TheaterInfo {
    pub unique_id: String,
    pub display_name: LocalizedText,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LocalizedText {
    pub en: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TheaterMissions {
    pub theater_id: String,
    pub available_missions: Vec<MissionTile>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MissionTile {
    pub tile_index: i64,
    pub mission_generator: String,
    #[serde(alias = "difficultyInfo")]
    pub mission_difficulty_info: DifficultyInfo,
    pub mission_rewards: RewardList,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DifficultyInfo {
    pub row_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RewardList {
    pub items: Vec<RawRewardItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TheaterAlerts {
    pub theater_id: String,
    pub available_mission_alerts: Vec<AlertTile>,
    pub next_refresh: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlertTile {
    pub name: String,
    pub tile_index: i64,
    pub mission_alert_rewards: RewardList,
}

impl WorldSnapshot {
    pub fn parse(text: &str) -> Result<Self, CoreError> {
        serde_json::from_str(text).map_err(|e| CoreError::Snapshot(e.to_string()))
    }

    /// Rotation reset marker: the first alert group's `nextRefresh`.
    pub fn next_refresh(&self) -> Option<&str> {
        self.mission_alerts
            .first()
            .and_then(|g| g.next_refresh.as_deref())
            .filter(|s| !s.is_empty())
    }

    /// English display name the snapshot gives a theater, if any.
    pub fn theater_display_name(&self, theater_id: &str) -> Option<&str> {
        self.theaters
            .iter()
            .find(|t| t.unique_id.eq_ignore_ascii_case(theater_id))
            .and_then(|t| t.display_name.en.as_deref())
            .filter(|s| !s.is_empty())
    }
}

/// Snapshot text as delivered by a provider, with its fetch time.
#[derive(Debug, Clone)]
pub struct RawSnapshot {
    pub body: String,
    pub fetched_at: DateTime<Utc>,
}

impl RawSnapshot {
    pub fn new(body: impl Into<String>, fetched_at: DateTime<Utc>) -> Self {
        Self {
            body: body.into(),
            fetched_at,
        }
    }

    pub fn parse(&self) -> Result<WorldSnapshot, CoreError> {
        WorldSnapshot::parse(&self.body)
    }

    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.fetched_at
    }

    pub fn is_stale(&self, now: DateTime<Utc>, threshold: Duration) -> bool {
        self.age(now) > threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn parses_nested_document() {
        let doc = json!({
            "theaters": [{ "uniqueId": "ABC", "displayName": { "en": "Frostnite" } }],
            "missions": [{
                "theaterId": "ABC",
                "availableMissions": [{
                    "tileIndex": 4,
                    "missionGenerator": "/Game/MissionGen_RtD.MissionGen_RtD_C",
                    "missionDifficultyInfo": { "rowName": "Theater_Hard_Group_Zone3" },
                    "missionRewards": { "items": [{ "itemType": "AccountResource:heroxp", "quantity": 10 }] }
                }]
            }],
            "missionAlerts": [{
                "theaterId": "ABC",
                "nextRefresh": "2026-10-18T00:00:00.000Z",
                "availableMissionAlerts": [{ "name": "x", "tileIndex": 4 }]
            }],
            "unrelated": true
        });
        let snap = WorldSnapshot::parse(&doc.to_string()).unwrap();
        let tile = &snap.missions[0].available_missions[0];
        assert_eq!(tile.mission_difficulty_info.row_name, "Theater_Hard_Group_Zone3");
        assert_eq!(tile.mission_rewards.items[0].quantity, 10);
        assert!(snap.mission_alerts[0].available_mission_alerts[0]
            .mission_alert_rewards
            .items
            .is_empty());
        assert_eq!(snap.next_refresh(), Some("2026-10-18T00:00:00.000Z"));
        assert_eq!(snap.theater_display_name("abc"), Some("Frostnite"));
    }

    #[test]
    fn accepts_short_difficulty_key() {
        let doc = json!({ "missions": [{ "theaterId": "T", "availableMissions": [
            { "tileIndex": 1, "difficultyInfo": { "rowName": "Theater_Start_Group_Zone1" } }
        ]}]});
        let snap = WorldSnapshot::parse(&doc.to_string()).unwrap();
        assert_eq!(
            snap.missions[0].available_missions[0].mission_difficulty_info.row_name,
            "Theater_Start_Group_Zone1"
        );
        assert_eq!(snap.next_refresh(), None);
    }

    #[test]
    fn rejects_invalid_json() {
        assert_matches!(WorldSnapshot::parse("{not json"), Err(CoreError::Snapshot(_)));
    }

    #[test]
    fn staleness() {
        let fetched = Utc::now() - Duration::hours(30);
        let raw = RawSnapshot::new("{}", fetched);
        assert!(raw.is_stale(Utc::now(), Duration::hours(24)));
        assert!(!raw.is_stale(Utc::now(), Duration::hours(48)));
    }
}
