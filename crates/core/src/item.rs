//! Resolved game item types.
//!
//! A [`GameItem`] is the display-ready form of an opaque reward identifier
//! such as `"AccountResource:currency_mtxswap"`. Items are produced by
//! [`crate::resolver::resolve`] and are never constructed from user input.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Rarity
// ---------------------------------------------------------------------------

/// Item rarity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Mythic,
}

impl Rarity {
    /// Map an embedded rarity code token (`c`, `uc`, `r`, `vr`, `sr`, `ur`)
    /// to a rarity. Tokens are compared lower-cased.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "c" => Some(Self::Common),
            "uc" => Some(Self::Uncommon),
            "r" => Some(Self::Rare),
            "vr" => Some(Self::Epic),
            "sr" => Some(Self::Legendary),
            "ur" => Some(Self::Mythic),
            _ => None,
        }
    }

    /// Scan the underscore-delimited segments of an identifier for the first
    /// known rarity code. Defaults to [`Rarity::Common`].
    pub fn from_identifier(id: &str) -> Self {
        id.split('_')
            .find_map(|segment| Self::from_code(&segment.to_ascii_lowercase()))
            .unwrap_or(Self::Common)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare",
            Self::Epic => "epic",
            Self::Legendary => "legendary",
            Self::Mythic => "mythic",
        }
    }

    /// Coloured marker prefixed to rarity-based icons.
    fn marker(self) -> &'static str {
        match self {
            Self::Common => "⚪",
            Self::Uncommon => "🟢",
            Self::Rare => "🔵",
            Self::Epic => "🟣",
            Self::Legendary => "🟠",
            Self::Mythic => "🟡",
        }
    }
}

// ---------------------------------------------------------------------------
// ItemCategory
// ---------------------------------------------------------------------------

/// Semantic category of a resolved item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemCategory {
    Hero,
    Schematic,
    Trap,
    Survivor,
    Defender,
    Resource,
    Mission,
    Unknown,
}

impl ItemCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::Schematic => "schematic",
            Self::Trap => "trap",
            Self::Survivor => "survivor",
            Self::Defender => "defender",
            Self::Resource => "resource",
            Self::Mission => "mission",
            Self::Unknown => "unknown",
        }
    }

    /// Custom emoji for categories that render with a rarity marker.
    fn glyph(self) -> Option<&'static str> {
        match self {
            Self::Hero => Some("<:heros:1459264287825727540>"),
            Self::Schematic => Some("<:weapons:1459264305097867370>"),
            Self::Trap => Some("<:trap:1459848437100187843>"),
            Self::Survivor => Some("<:surv:1458442238185967830>"),
            Self::Defender => Some("<:defender:1459848452963041281>"),
            Self::Resource | Self::Mission | Self::Unknown => None,
        }
    }
}

/// Generic icon used for unresolved items.
pub const GENERIC_ICON: &str = "📦";

/// Build the rarity-based icon for a category, e.g. `🟠<:heros:…>`.
///
/// Categories without a glyph fall back to [`GENERIC_ICON`].
pub fn rarity_icon(category: ItemCategory, rarity: Rarity) -> String {
    match category.glyph() {
        Some(glyph) => format!("{}{glyph}", rarity.marker()),
        None => GENERIC_ICON.to_string(),
    }
}

// ---------------------------------------------------------------------------
// GameItem
// ---------------------------------------------------------------------------

/// A reward identifier resolved to display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameItem {
    /// Canonical short identifier (lower-cased, namespace stripped, or the
    /// matched table key for prefix families).
    pub id: String,
    /// The identifier exactly as it appeared in the snapshot.
    pub raw_id: String,
    /// Human-readable name. Never empty.
    pub name: String,
    /// Emoji or custom emoji reference.
    pub icon: String,
    pub rarity: Rarity,
    pub category: ItemCategory,
}

// ---------------------------------------------------------------------------
// RawRewardItem
// ---------------------------------------------------------------------------

/// A reward entry as it appears in the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRewardItem {
    pub item_type: String,
    #[serde(default)]
    pub quantity: u64,
}

impl RawRewardItem {
    pub fn new(item_type: impl Into<String>, quantity: u64) -> Self {
        Self {
            item_type: item_type.into(),
            quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rarity_codes_map_to_tiers() {
        assert_eq!(Rarity::from_code("sr"), Some(Rarity::Legendary));
        assert_eq!(Rarity::from_code("vr"), Some(Rarity::Epic));
        assert_eq!(Rarity::from_code("ur"), Some(Rarity::Mythic));
        assert_eq!(Rarity::from_code("t01"), None);
    }

    #[test]
    fn rarity_scans_segments_in_order() {
        assert_eq!(
            Rarity::from_identifier("hid_commando_007_sr_t05"),
            Rarity::Legendary
        );
        assert_eq!(Rarity::from_identifier("workerbasic_vr_t02"), Rarity::Epic);
        assert_eq!(Rarity::from_identifier("heroxp"), Rarity::Common);
    }

    #[test]
    fn rarity_icon_combines_marker_and_glyph() {
        let icon = rarity_icon(ItemCategory::Hero, Rarity::Legendary);
        assert!(icon.starts_with("🟠"));
        assert!(icon.contains("heros"));
        assert_eq!(
            rarity_icon(ItemCategory::Resource, Rarity::Epic),
            GENERIC_ICON
        );
    }

    #[test]
    fn raw_reward_item_deserializes_camel_case() {
        let item: RawRewardItem =
            serde_json::from_str(r#"{"itemType":"AccountResource:heroxp","quantity":300}"#)
                .unwrap();
        assert_eq!(item, RawRewardItem::new("AccountResource:heroxp", 300));
    }
}
