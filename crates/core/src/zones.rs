//! Zone names and power levels.
//!
//! Theater identifiers are opaque 32-character hex strings. Power level is
//! derived from the mission's difficulty row name, e.g.
//! `Theater_Endgame_Group_Zone6`, after stripping theater/group tokens.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Returned by [`resolve_zone_name`] for unmapped theaters.
pub const UNKNOWN_ZONE: &str = "Unknown Zone";

/// Canonical difficulty progression used to order zones for display.
pub const ZONE_ORDER: &[&str] = &[
    "Stonewood",
    "Plankerton",
    "Canny Valley",
    "Twine Peaks",
    "Ventures",
];

pub const STONEWOOD: &str = "33A2311D4AE64B361CCE27BC9F313C8B";
pub const PLANKERTON: &str = "D477605B4FA48648107B649CE97FCF27";
pub const CANNY_VALLEY: &str = "E6ECBD064B153234656CB4BDE6743870";
pub const TWINE_PEAKS: &str = "D9A801C5444D1C74D1B7DAB5C7C12C5B";
pub const VENTURES: &str = "D61659064BED28BEA91FD2A343C126B7";

static THEATERS: &[(&str, &str)] = &[
    (STONEWOOD, "Stonewood"),
    (PLANKERTON, "Plankerton"),
    (CANNY_VALLEY, "Canny Valley"),
    (TWINE_PEAKS, "Twine Peaks"),
    (VENTURES, "Ventures"),
];

/// Power-level tables, one per theater. Ordered so the cross-theater
/// fallback search is deterministic.
static POWER_LEVELS: &[(&str, &[(&str, u32)])] = &[
    (
        STONEWOOD,
        &[
            ("Start_Zone1", 1),
            ("Start_Zone2", 3),
            ("Start_Zone3", 5),
            ("Start_Zone4", 9),
            ("Start_Zone5", 15),
            ("Normal_Zone1", 19),
        ],
    ),
    (
        PLANKERTON,
        &[
            ("Normal_Zone1", 19),
            ("Normal_Zone2", 23),
            ("Normal_Zone3", 28),
            ("Normal_Zone4", 34),
            ("Normal_Zone5", 40),
            ("Hard_Zone1", 46),
        ],
    ),
    (
        CANNY_VALLEY,
        &[
            ("Hard_Zone1", 46),
            ("Hard_Zone2", 52),
            ("Hard_Zone3", 58),
            ("Hard_Zone4", 64),
            ("Hard_Zone5", 70),
        ],
    ),
    (
        TWINE_PEAKS,
        &[
            ("Nightmare_Zone1", 76),
            ("Nightmare_Zone2", 82),
            ("Nightmare_Zone3", 88),
            ("Nightmare_Zone4", 94),
            ("Nightmare_Zone5", 100),
            ("Endgame_Zone1", 108),
            ("Endgame_Zone2", 116),
            ("Endgame_Zone3", 124),
            ("Endgame_Zone4", 132),
            ("Endgame_Zone5", 140),
            ("Endgame_Zone6", 160),
        ],
    ),
    (
        VENTURES,
        &[
            ("Phoenix_Zone02", 3),
            ("Phoenix_Zone03", 5),
            ("Phoenix_Zone05", 15),
            ("Phoenix_Zone07", 23),
            ("Phoenix_Zone09", 34),
            ("Phoenix_Zone11", 46),
            ("Phoenix_Zone13", 58),
            ("Phoenix_Zone15", 70),
            ("Phoenix_Zone17", 82),
            ("Phoenix_Zone19", 94),
            ("Phoenix_Zone21", 108),
            ("Phoenix_Zone23", 124),
            ("Phoenix_Zone25", 140),
        ],
    ),
    ("MSK_FALLBACK", &[("Hard_Zone5_Dudebro", 122)]),
];

static THEATER_INDEX: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| THEATERS.iter().copied().collect());

static POWER_LEVEL_INDEX: LazyLock<HashMap<&'static str, HashMap<&'static str, u32>>> =
    LazyLock::new(|| {
        POWER_LEVELS
            .iter()
            .map(|(theater, rows)| (*theater, rows.iter().copied().collect()))
            .collect()
    });

/// The two top difficulty tiers are special-cased upstream, so they are
/// resolved before any table lookup.
const TOP_TIER_OVERRIDES: &[(&str, u32)] = &[("Endgame_Zone6", 160), ("Endgame_Zone5", 140)];

/// Strip theater/group tokens from a difficulty row name.
///
/// `"Theater_Endgame_Group_Zone6"` becomes `"Endgame_Zone6"`. Each token is
/// removed at most once.
pub fn clean_row_name(row_name: &str) -> String {
    row_name
        .replacen("Theater_", "", 1)
        .replacen("_Group", "", 1)
        .replacen("Group_", "", 1)
}

fn theater_table(theater_id: &str) -> Option<&'static HashMap<&'static str, u32>> {
    POWER_LEVEL_INDEX
        .get(theater_id)
        .or_else(|| POWER_LEVEL_INDEX.get(theater_id.to_ascii_uppercase().as_str()))
}

/// Resolve a mission's power level. Returns 0 when nothing matches.
pub fn resolve_power_level(theater_id: &str, row_name: &str) -> u32 {
    if row_name.is_empty() {
        return 0;
    }

    let clean = clean_row_name(row_name);

    if let Some((_, pl)) = TOP_TIER_OVERRIDES.iter().find(|(row, _)| *row == clean) {
        return *pl;
    }

    if let Some(table) = theater_table(theater_id) {
        if let Some(pl) = table.get(clean.as_str()).or_else(|| table.get(row_name)) {
            return *pl;
        }
    }

    // Row names are reused across theaters; search every table in order.
    for (_, rows) in POWER_LEVELS {
        if let Some((_, pl)) = rows.iter().find(|(row, _)| *row == clean) {
            return *pl;
        }
    }

    tracing::warn!(
        row_name,
        clean_row_name = %clean,
        theater_id,
        "Unknown power level"
    );
    0
}

/// Resolve a theater identifier to its zone name.
pub fn resolve_zone_name(theater_id: &str) -> &'static str {
    THEATER_INDEX
        .get(theater_id)
        .or_else(|| THEATER_INDEX.get(theater_id.to_ascii_uppercase().as_str()))
        .copied()
        .unwrap_or(UNKNOWN_ZONE)
}

/// Position of a zone in [`ZONE_ORDER`]; zones outside the list rank last.
pub fn zone_rank(zone_name: &str) -> usize {
    ZONE_ORDER
        .iter()
        .position(|z| z.eq_ignore_ascii_case(zone_name))
        .unwrap_or(ZONE_ORDER.len())
}

/// Display form of a power level: `"??"` when unknown.
pub fn display_power_level(pl: u32) -> String {
    if pl > 0 {
        pl.to_string()
    } else {
        "??".to_string()
    }
}
