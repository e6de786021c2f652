//! Mission-type resolution from mission-generator paths.
//!
//! Generator paths look like
//! `/SaveTheWorld/World/MissionGens/MissionGen_T1_HT_EvacuateTheSurvivors.MissionGen_T1_HT_EvacuateTheSurvivors_C`.
//! The mission type is found by substring search over a fixed key table,
//! longest key first so `EtS_C` is not shadowed by a shorter key.

use std::sync::LazyLock;

use serde::Serialize;

/// Alert name that always denotes a Mythic Storm King mission, whatever
/// generator the tile uses.
pub const MYTHIC_STORM_KING_ALERT: &str = "MissionAlert_DudebroCategory_03";

/// Icon used when a generator path matches no known key.
pub const UNKNOWN_MISSION_ICON: &str = "❓";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionKind {
    FightTheStorm1,
    FightTheStorm2,
    FightTheStorm3,
    FightTheStorm4,
    DeliverTheBomb,
    DestroyTheEncampments,
    EliminateAndCollect,
    EvacuateTheShelter,
    RescueTheSurvivors,
    BuildTheRadarGrid,
    RefuelTheHomebase,
    Resupply,
    HuntTheTitan,
    LaunchTheRocket,
    RetrieveTheData,
    RideTheLightning,
    RepairTheShelter,
    MythicStormKing,
    Unknown,
}

impl MissionKind {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::FightTheStorm1 => "Fight the Storm (1 Atlas)",
            Self::FightTheStorm2 => "Fight the Storm (2 Atlases)",
            Self::FightTheStorm3 => "Fight the Storm (3 Atlases)",
            Self::FightTheStorm4 => "Fight the Storm (4 Atlases)",
            Self::DeliverTheBomb => "Deliver the Bomb",
            Self::DestroyTheEncampments => "Destroy the Encampments",
            Self::EliminateAndCollect => "Eliminate and Collect",
            Self::EvacuateTheShelter => "Evacuate the Shelter",
            Self::RescueTheSurvivors => "Rescue the Survivors",
            Self::BuildTheRadarGrid => "Build the Radar Grid",
            Self::RefuelTheHomebase => "Refuel the Homebase",
            Self::Resupply => "Resupply",
            Self::HuntTheTitan => "Hunt The Titan",
            Self::LaunchTheRocket => "Launch the Rocket",
            Self::RetrieveTheData => "Retrieve the Data",
            Self::RideTheLightning => "Ride the Lightning",
            Self::RepairTheShelter => "Repair the Shelter",
            Self::MythicStormKing => "Mythic Storm King",
            Self::Unknown => "Mission",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::FightTheStorm1 => "<:cat1:1457699998933450807>",
            Self::FightTheStorm2 => "<:cat2:1457700175572373667>",
            Self::FightTheStorm3 => "<:cat3:1457700186833817620>",
            Self::FightTheStorm4 => "<:cat4:1457699986211868779>",
            Self::DeliverTheBomb => "<:dtb:1457706552516546725>",
            Self::DestroyTheEncampments => "<:encamp:1457707158786281492>",
            Self::EliminateAndCollect => "<:elim:1457706540235755561>",
            Self::EvacuateTheShelter => "<:evac:1457705381080858819>",
            Self::RescueTheSurvivors => "<:sur:1457705319718195332>",
            Self::BuildTheRadarGrid => "<:radar:1457705350613565615>",
            Self::RefuelTheHomebase => "<:refuel:1457705306313199698>",
            Self::Resupply => "<:resup:1457706566903009381>",
            Self::HuntTheTitan => "<:htt:1458731598311723139>",
            Self::LaunchTheRocket => "<:ltr:1458162046439915753>",
            Self::RetrieveTheData => "<:rtd:1457705334071099494>",
            Self::RideTheLightning => "<:rtl:1457705404053065739>",
            Self::RepairTheShelter => "<:rts:1457705367482929309>",
            Self::MythicStormKing => "<:msk:1458162028228116554>",
            Self::Unknown => UNKNOWN_MISSION_ICON,
        }
    }
}

static GENERATOR_KEYS: &[(&str, MissionKind)] = &[
    ("Cat1FtS", MissionKind::FightTheStorm1),
    ("GateSingle", MissionKind::FightTheStorm1),
    ("1Gate", MissionKind::FightTheStorm1),
    ("Cat2FtS", MissionKind::FightTheStorm2),
    ("2Gates", MissionKind::FightTheStorm2),
    ("Cat3FtS", MissionKind::FightTheStorm3),
    ("3Gates", MissionKind::FightTheStorm3),
    ("Cat4FtS", MissionKind::FightTheStorm4),
    ("4Gates", MissionKind::FightTheStorm4),
    ("DtB", MissionKind::DeliverTheBomb),
    ("DeliverTheBomb", MissionKind::DeliverTheBomb),
    ("DtE", MissionKind::DestroyTheEncampments),
    ("DestroyTheEncampments", MissionKind::DestroyTheEncampments),
    ("EliminateAndCollect", MissionKind::EliminateAndCollect),
    ("EtS_C", MissionKind::EvacuateTheShelter),
    ("EtShelter", MissionKind::EvacuateTheShelter),
    ("EvacuateTheSurvivors", MissionKind::RescueTheSurvivors),
    ("EtSurvivors", MissionKind::RescueTheSurvivors),
    ("BuildtheRadarGrid", MissionKind::BuildTheRadarGrid),
    ("BuildTheRadar", MissionKind::BuildTheRadarGrid),
    ("RefuelTheBase", MissionKind::RefuelTheHomebase),
    ("FuelTheHomebase", MissionKind::RefuelTheHomebase),
    ("Resupply", MissionKind::Resupply),
    ("HTM", MissionKind::HuntTheTitan),
    ("HuntTheTitan", MissionKind::HuntTheTitan),
    ("LtR", MissionKind::LaunchTheRocket),
    ("LaunchTheRocket", MissionKind::LaunchTheRocket),
    ("RtD", MissionKind::RetrieveTheData),
    ("RetrieveTheData", MissionKind::RetrieveTheData),
    ("RtL", MissionKind::RideTheLightning),
    ("LtB", MissionKind::RideTheLightning),
    ("LaunchTheBalloon", MissionKind::RideTheLightning),
    ("RideTheLightning", MissionKind::RideTheLightning),
    ("RtS", MissionKind::RepairTheShelter),
    ("PowerTheStormShield", MissionKind::RepairTheShelter),
    ("RepairTheShelter", MissionKind::RepairTheShelter),
    ("Dudebro", MissionKind::MythicStormKing),
];

/// Generator keys sorted longest first.
static KEYS_BY_LENGTH: LazyLock<Vec<(&'static str, MissionKind)>> = LazyLock::new(|| {
    let mut keys = GENERATOR_KEYS.to_vec();
    keys.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    keys
});

/// Resolve a mission-generator path to a mission kind.
pub fn resolve_mission_kind(generator: &str) -> MissionKind {
    KEYS_BY_LENGTH
        .iter()
        .find(|(key, _)| generator.contains(key))
        .map(|(_, kind)| *kind)
        .unwrap_or(MissionKind::Unknown)
}

/// Icon for a mission tile, honouring the Mythic Storm King alert override.
pub fn mission_icon(generator: &str, alert_name: &str) -> &'static str {
    if alert_name == MYTHIC_STORM_KING_ALERT {
        return MissionKind::MythicStormKing.icon();
    }
    resolve_mission_kind(generator).icon()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_generator_substring() {
        let path = "/SaveTheWorld/World/MissionGens/MissionGen_T1_HT_DtB.MissionGen_T1_HT_DtB_C";
        assert_eq!(resolve_mission_kind(path), MissionKind::DeliverTheBomb);
    }

    #[test]
    fn longer_key_shadows_shorter_prefix() {
        let path = "MissionGen_EvacuateTheSurvivors_C";
        assert_eq!(resolve_mission_kind(path), MissionKind::RescueTheSurvivors);
        assert_eq!(
            resolve_mission_kind("MissionGen_LaunchTheRocket_C"),
            MissionKind::LaunchTheRocket
        );
    }

    #[test]
    fn unknown_generator_gets_question_icon() {
        assert_eq!(resolve_mission_kind("MissionGen_Whatever_C"), MissionKind::Unknown);
        assert_eq!(mission_icon("MissionGen_Whatever_C", "Alert"), UNKNOWN_MISSION_ICON);
    }

    #[test]
    fn storm_king_alert_overrides_generator() {
        let icon = mission_icon("MissionGen_T1_HT_DtB_C", MYTHIC_STORM_KING_ALERT);
        assert_eq!(icon, MissionKind::MythicStormKing.icon());
    }
}
