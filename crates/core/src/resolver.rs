//! Item resolution.
//!
//! [`resolve`] turns an opaque reward identifier into a [`GameItem`]. It is
//! total: unknown identifiers degrade to an `unknown` item with the generic
//! icon and are logged at debug level.

use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::{self, CatalogHit};
use crate::item::{rarity_icon, GameItem, ItemCategory, Rarity, GENERIC_ICON};

/// Quality suffixes, most specific first.
const QUALITY_SUFFIXES: &[&str] = &["_extreme", "_veryhigh", "_high", "_medium", "_low"];

const EVENT_PREFIX: &str = "zcp_";

static TIER_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_t\d+$").expect("valid regex"));

// ---------------------------------------------------------------------------
// Normalization steps
// ---------------------------------------------------------------------------

/// One rewrite applied to a canonical identifier before re-trying the
/// catalog lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalization {
    /// Drop the event-pack `zcp_` prefix.
    StripEventPrefix,
    /// Drop one quality suffix such as `_veryhigh`.
    StripQualitySuffix,
    /// Drop a trailing `_t<digits>` tier suffix.
    StripTier,
}

/// Steps in application order. Each step runs at most once and operates
/// on the output of the previous one.
pub const NORMALIZATION_STEPS: &[Normalization] = &[
    Normalization::StripEventPrefix,
    Normalization::StripQualitySuffix,
    Normalization::StripTier,
];

impl Normalization {
    /// Apply the step. Returns `None` when it does not change `id`.
    pub fn apply(self, id: &str) -> Option<String> {
        match self {
            Self::StripEventPrefix => id.strip_prefix(EVENT_PREFIX).map(str::to_string),
            Self::StripQualitySuffix => QUALITY_SUFFIXES
                .iter()
                .find_map(|suffix| id.strip_suffix(suffix))
                .map(str::to_string),
            Self::StripTier => {
                let stripped = TIER_SUFFIX.replace(id, "");
                (stripped.len() != id.len()).then(|| stripped.into_owned())
            }
        }
    }
}

/// Strip any namespace up to the last `:` or `/` and lower-case.
pub fn canonical_id(raw: &str) -> String {
    let tail = raw.rsplit([':', '/']).next().unwrap_or(raw);
    tail.trim().to_ascii_lowercase()
}

/// Look the canonical id up, then retry after each normalization step.
/// The first hit wins.
fn lookup_normalized(id: &str) -> Option<CatalogHit> {
    if let Some(hit) = catalog::lookup(id) {
        return Some(hit);
    }

    let mut current = id.to_string();
    for step in NORMALIZATION_STEPS {
        let Some(next) = step.apply(&current) else {
            continue;
        };
        current = next;
        if let Some(hit) = catalog::lookup(&current) {
            return Some(hit);
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Resolve a raw reward identifier. Never fails.
pub fn resolve(raw: &str) -> GameItem {
    let id = canonical_id(raw);

    let mut item = match lookup_normalized(&id) {
        Some(hit) => from_hit(raw, &id, hit),
        None => from_heuristics(raw, id),
    };

    if let Some(icon) = catalog::custom_icon(&item.id) {
        item.icon = icon.to_string();
    }
    item
}

fn from_hit(raw: &str, id: &str, hit: CatalogHit) -> GameItem {
    let entry = hit.entry;
    let mut rarity = entry.rarity.unwrap_or_else(|| Rarity::from_identifier(id));

    if matches!(entry.category, ItemCategory::Survivor | ItemCategory::Defender)
        && (entry.name.contains("Mythic") || raw.to_ascii_lowercase().contains("mythic"))
    {
        rarity = Rarity::Mythic;
    }

    let icon = match entry.icon {
        Some(icon) => icon.to_string(),
        None => rarity_icon(entry.category, rarity),
    };

    GameItem {
        id: hit.key.to_string(),
        raw_id: raw.to_string(),
        name: entry.name.to_string(),
        icon,
        rarity,
        category: entry.category,
    }
}

fn from_heuristics(raw: &str, id: String) -> GameItem {
    let rarity = Rarity::from_identifier(&id);

    let family = if id.starts_with("hid_") {
        Some((ItemCategory::Hero, "Unknown Hero"))
    } else if id.starts_with("sid_")
        && ["floor", "wall", "ceiling"].iter().any(|t| id.contains(t))
    {
        Some((ItemCategory::Trap, "Unknown Trap"))
    } else if id.starts_with("sid_") || id.starts_with("eid_") {
        Some((ItemCategory::Schematic, "Unknown Schematic"))
    } else if id.starts_with("did_") {
        Some((ItemCategory::Defender, "Unknown Defender"))
    } else if id.contains("manager") {
        Some((ItemCategory::Survivor, "Lead Survivor"))
    } else if id.contains("worker") {
        Some((ItemCategory::Survivor, "Survivor"))
    } else if id.starts_with("mission_") {
        Some((ItemCategory::Mission, "Mission Item"))
    } else {
        None
    };

    match family {
        Some((category, name)) => GameItem {
            icon: rarity_icon(category, rarity),
            name: name.to_string(),
            raw_id: raw.to_string(),
            id,
            rarity,
            category,
        },
        None => {
            tracing::debug!(raw_id = raw, "Unresolved item identifier");
            let name = if id.is_empty() {
                "Unknown Item".to_string()
            } else {
                id.clone()
            };
            GameItem {
                id,
                raw_id: raw.to_string(),
                name,
                icon: GENERIC_ICON.to_string(),
                rarity: Rarity::Common,
                category: ItemCategory::Unknown,
            }
        }
    }
}
