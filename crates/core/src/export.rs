//! Downloadable copies of the cached world-info snapshot.
//!
//! `normal` is the body as synced. `remove_all_mods` drops every
//! `missionGuid`. `dev_missions` rewrites event, quest and theater markers
//! to their standard-theater forms.

use std::str::FromStr;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::{NoExpand, Regex, RegexBuilder};
use serde::Serialize;
use serde_json::Value;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFilter {
    #[default]
    Normal,
    RemoveAllMods,
    DevMissions,
}

impl ExportFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::RemoveAllMods => "remove_all_mods",
            Self::DevMissions => "dev_missions",
        }
    }

    /// `world-info-raw-2026-10-18.json` and friends.
    pub fn file_name(self, date: NaiveDate) -> String {
        let tag = match self {
            Self::Normal => "raw",
            Self::RemoveAllMods => "no_mods",
            Self::DevMissions => "dev_missions",
        };
        format!("world-info-{tag}-{}.json", date.format("%Y-%m-%d"))
    }
}

impl FromStr for ExportFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "normal" => Ok(Self::Normal),
            "remove_all_mods" => Ok(Self::RemoveAllMods),
            "dev_missions" => Ok(Self::DevMissions),
            other => Err(CoreError::Validation(format!(
                "Unknown filter: {other} (expected normal, remove_all_mods or dev_missions)"
            ))),
        }
    }
}

/// Ordered case-insensitive rewrites applied to the compact JSON text.
const DEV_REWRITES: &[(&str, &str)] = &[
    ("EventFlag", "NotEventFlag"),
    ("activeQuestDefinitions", "NotactiveQuestDefinitions"),
    ("requirements", "Notrequirements"),
    (
        "/Script/Engine.DataTable'/Game/Balance/DataTables/GameDifficultyGrowthBounds.GameDifficultyGrowthBounds'",
        "powerlevel",
    ),
    (r#""theaterType"\s*:\s*"Tutorial""#, r#""theaterType": "Standard""#),
    (r#""bHideLikeTestTheater":\s*true"#, r#""bHideLikeTestTheater": false"#),
    (
        r#""missionGenerator"\s*:\s*"None""#,
        r#""missionGenerator": "/SaveTheWorld/World/MissionGens/MissionGen_T1_HT_EvacuateTheSurvivors.MissionGen_T1_HT_EvacuateTheSurvivors_C""#,
    ),
    (r#""Theater_Phoenix_Zone02""#, r#""Theater_Start_Zone2""#),
    (r#""Theater_Phoenix_Zone03""#, r#""Theater_Start_Zone3""#),
    (r#""Theater_Phoenix_Group_Zone03""#, r#""Theater_Start_Group_Zone3""#),
    (r#""Theater_Phoenix_Zone05""#, r#""Theater_Start_Zone5""#),
    (r#""Theater_Phoenix_Group_Zone05""#, r#""Theater_Start_Group_Zone5""#),
    (r#""Theater_Phoenix_Zone07""#, r#""Theater_Normal_Zone2""#),
    (r#""Theater_Phoenix_Group_Zone07""#, r#""Theater_Normal_Group_Zone2""#),
    (r#""Theater_Phoenix_Zone09""#, r#""Theater_Normal_Zone4""#),
    (r#""Theater_Phoenix_Group_Zone09""#, r#""Theater_Normal_Group_Zone4""#),
    (r#""Theater_Phoenix_Zone11""#, r#""Theater_Hard_Zone1""#),
    (r#""Theater_Phoenix_Group_Zone11""#, r#""Theater_Hard_Group_Zone1""#),
    (r#""Theater_Phoenix_Zone13""#, r#""Theater_Hard_Zone3""#),
    (r#""Theater_Phoenix_Group_Zone13""#, r#""Theater_Hard_Group_Zone3""#),
    (r#""Theater_Phoenix_Zone15""#, r#""Theater_Hard_Zone5""#),
    (r#""Theater_Phoenix_Group_Zone15""#, r#""Theater_Hard_Group_Zone5""#),
    (r#""Theater_Phoenix_Zone17""#, r#""Theater_Nightmare_Zone2""#),
    (r#""Theater_Phoenix_Group_Zone17""#, r#""Theater_Nightmare_Group_Zone2""#),
    (r#""Theater_Phoenix_Zone19""#, r#""Theater_Nightmare_Zone4""#),
    (r#""Theater_Phoenix_Group_Zone19""#, r#""Theater_Nightmare_Group_Zone4""#),
    (r#""Theater_Phoenix_Zone21""#, r#""Theater_Endgame_Zone1""#),
    (r#""Theater_Phoenix_Group_Zone21""#, r#""Theater_Endgame_Group_Zone1""#),
    (r#""Theater_Phoenix_Zone23""#, r#""Theater_Endgame_Zone3""#),
    (r#""Theater_Phoenix_Group_Zone23""#, r#""Theater_Endgame_Group_Zone3""#),
    (r#""Theater_Phoenix_Zone25""#, r#""Theater_Endgame_Zone5""#),
    (r#""Theater_Phoenix_Group_Zone25""#, r#""Theater_Endgame_Group_Zone5""#),
    (r#""theaterSlot"\s*:\s*2"#, r#""theaterSlot": 0"#),
    ("HV3_01", "Start_Zone4"),
    ("HV3_02", "Start_Zone5"),
    ("HV3_03", "Normal_Zone2"),
    ("HV3_04", "Normal_Zone4"),
    ("HV3_05", "Hard_Zone1"),
    ("HV3_06", "Hard_Zone3"),
    ("HV3_07", "Hard_Zone5"),
    ("HV3_08", "Nightmare_Zone2"),
    ("HV3_09", "Nightmare_Zone4"),
    ("HV3_10", "Endgame_Zone1"),
    ("HV3_11", "Endgame_Zone3"),
    ("HV3_12", "Endgame_Zone5"),
    ("_Starlight_Start_Zone2", "_Start_Zone3"),
    ("_StarlightTimed_Start_Zone2", "_Start_Zone3"),
    ("Theater_Starlight_", "Theater_"),
    ("_StarlightTimed_", "_"),
    ("Theater_Endless_", "Theater_"),
    ("Theater_Mayday_Start_Zone5", "Theater_Start_Zone5"),
    ("Theater_Mayday_Normal_Zone3", "Theater_Normal_Zone3"),
    ("Theater_Mayday_Normal_Zone5", "Theater_Normal_Zone5"),
    ("Theater_Mayday_Hard_Zone3", "Theater_Hard_Zone3"),
    ("Theater_Mayday_Hard_Zone5", "Theater_Hard_Zone5"),
    ("Theater_Mayday_Nightmare_Zone3", "Theater_Nightmare_Zone3"),
    ("Theater_Mayday_Nightmare_Zone5", "Theater_Nightmare_Zone5"),
    ("Theater_Mayday_Endgame_Zone5", "Theater_Endgame_Zone5"),
];

static DEV_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    DEV_REWRITES
        .iter()
        .map(|&(pattern, replacement)| {
            let regex = RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .expect("valid regex");
            (regex, replacement)
        })
        .collect()
});

/// Snapshot body prepared for download with `filter` applied.
///
/// `normal` returns the body untouched. The other filters re-serialise
/// pretty-printed JSON.
pub fn export_snapshot(body: &str, filter: ExportFilter) -> Result<String, CoreError> {
    if filter == ExportFilter::Normal {
        return Ok(body.to_string());
    }

    let mut data: Value =
        serde_json::from_str(body).map_err(|e| CoreError::Snapshot(e.to_string()))?;

    if filter == ExportFilter::DevMissions {
        data = dev_missions(data)?;
    } else {
        strip_mission_guids(&mut data);
    }

    serde_json::to_string_pretty(&data).map_err(|e| CoreError::Snapshot(e.to_string()))
}

fn strip_mission_guids(data: &mut Value) {
    let Some(groups) = data.get_mut("missions").and_then(Value::as_array_mut) else {
        return;
    };
    for group in groups {
        if let Some(group) = group.as_object_mut() {
            group.remove("missionGuid");
        }
        let Some(missions) = group.get_mut("availableMissions").and_then(Value::as_array_mut)
        else {
            continue;
        };
        for mission in missions.iter_mut().filter_map(Value::as_object_mut) {
            mission.remove("missionGuid");
        }
    }
}

/// Apply [`DEV_REWRITES`] to the compact text. A rewrite that breaks the
/// JSON leaves the data as it was.
fn dev_missions(data: Value) -> Result<Value, CoreError> {
    let mut text = serde_json::to_string(&data).map_err(|e| CoreError::Snapshot(e.to_string()))?;
    for (regex, replacement) in DEV_PATTERNS.iter() {
        text = regex.replace_all(&text, NoExpand(*replacement)).into_owned();
    }

    match serde_json::from_str(&text) {
        Ok(rewritten) => Ok(rewritten),
        Err(e) => {
            tracing::warn!(error = %e, "Dev mission rewrite produced invalid JSON, exporting unchanged");
            Ok(data)
        }
    }
}
