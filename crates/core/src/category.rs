//! Reward categories a user can search alerts for.
//!
//! Each category carries its match rule as data, so adding a category is a
//! new registry row rather than another branch in the scanner.

use serde::Serialize;

use crate::catalog::{self, icons};
use crate::item::{GameItem, ItemCategory, Rarity};

/// Key of the pseudo-category that accepts every alert reward.
pub const ALL_KEY: &str = "all";

/// Legendary rarity code as it appears inside raw identifiers.
const LEGENDARY_MARKER: &str = "_sr";

/// Embed colour used when a category has no colour of its own.
pub const DEFAULT_COLOR: u32 = 0x5865F2;

/// Embed colour for empty results.
pub const EMPTY_COLOR: u32 = 0xFF0000;

/// How a category decides whether a reward matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum MatchRule {
    /// Structural: the mission's power level equals the value. Item
    /// payloads are not inspected.
    PowerLevel(u32),
    /// Named mythic lead survivors.
    MythicLead,
    /// Legendary items of the given category (hero or schematic).
    LegendaryOf(ItemCategory),
    /// Canonical id equals, or raw id contains, the needle.
    Identifier(&'static str),
    /// Every reward matches.
    Any,
}

/// A user-selectable reward filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RewardCategory {
    pub key: &'static str,
    pub name: &'static str,
    pub rule: MatchRule,
    pub color: u32,
    pub icon: Option<&'static str>,
}

const fn identifier(
    key: &'static str,
    name: &'static str,
    color: u32,
    icon: &'static str,
) -> RewardCategory {
    RewardCategory {
        key,
        name,
        rule: MatchRule::Identifier(key),
        color,
        icon: Some(icon),
    }
}

static CATEGORIES: &[RewardCategory] = &[
    identifier("currency_mtxswap", "V-Bucks", 0x00EAFF, icons::VBUCKS),
    RewardCategory {
        key: "filter_mythic_lead",
        name: "Mythic Leads",
        rule: MatchRule::MythicLead,
        color: 0xFFD700,
        icon: Some(icons::MYTHIC),
    },
    identifier("voucher_cardpack_bronze", "Upgrade Llama Tokens", 0xFFD700, icons::UPGRADE_LLAMA),
    identifier("voucher_basicpack", "Mini Llamas", 0x9B59B6, icons::MINI_LLAMA),
    identifier("sid_blunt_club_light", "Masters Driver", 0xE67E22, icons::DRIVER),
    identifier("sid_blunt_light_rocketbat", "Fortsville Slugger 3000", 0xE67E22, icons::SLUGGER),
    identifier("hid_constructor_008", "Power B.A.S.E. Knox", 0xE67E22, icons::KNOX),
    RewardCategory {
        key: "workerbasic_sr_t0",
        name: "Legendary Survivor",
        rule: MatchRule::Identifier("workerbasic_sr_t0"),
        color: 0xE67E22,
        icon: None,
    },
    RewardCategory {
        key: "filter_leg_schematic",
        name: "Legendary Schematics",
        rule: MatchRule::LegendaryOf(ItemCategory::Schematic),
        color: 0xE67E22,
        icon: None,
    },
    RewardCategory {
        key: "filter_leg_hero",
        name: "Legendary Heroes",
        rule: MatchRule::LegendaryOf(ItemCategory::Hero),
        color: 0xE67E22,
        icon: None,
    },
    identifier("reagent_alteration_ele_fire", "Fire-Up", 0xE74C3C, icons::FIRE_UP),
    identifier("reagent_alteration_ele_water", "Frost-Up", 0x3498DB, icons::ICE_UP),
    identifier("reagent_alteration_ele_nature", "Amp-Up", 0x2ECC71, icons::AMP_UP),
    RewardCategory {
        key: "filter_160",
        name: "160s",
        rule: MatchRule::PowerLevel(160),
        color: DEFAULT_COLOR,
        icon: None,
    },
    RewardCategory {
        key: ALL_KEY,
        name: "All Rewards",
        rule: MatchRule::Any,
        color: DEFAULT_COLOR,
        icon: None,
    },
];

/// Every registered category, in menu order.
pub fn categories() -> &'static [RewardCategory] {
    CATEGORIES
}

/// Case-insensitive lookup by key.
pub fn find_category(key: &str) -> Option<&'static RewardCategory> {
    let key = key.trim();
    CATEGORIES.iter().find(|c| c.key.eq_ignore_ascii_case(key))
}

impl RewardCategory {
    /// Power level this category selects missions by, if structural.
    pub fn required_power_level(&self) -> Option<u32> {
        match self.rule {
            MatchRule::PowerLevel(pl) => Some(pl),
            _ => None,
        }
    }

    /// Whether a resolved reward item is accepted.
    ///
    /// Structural categories accept every item; mission selection happens
    /// in the scanner.
    pub fn matches(&self, item: &GameItem) -> bool {
        let raw = item.raw_id.to_ascii_lowercase();
        match self.rule {
            MatchRule::PowerLevel(_) | MatchRule::Any => true,
            MatchRule::MythicLead => {
                catalog::is_mythic_lead(&item.id)
                    || (item.category == ItemCategory::Survivor && item.rarity == Rarity::Mythic)
                    || (raw.contains("manager") && raw.contains(LEGENDARY_MARKER))
            }
            MatchRule::LegendaryOf(category) => {
                let family = match category {
                    ItemCategory::Hero => "hid_",
                    ItemCategory::Schematic => "sid_",
                    _ => return item.category == category && item.rarity == Rarity::Legendary,
                };
                (item.category == category && item.rarity == Rarity::Legendary)
                    || (raw.contains(family) && raw.contains(LEGENDARY_MARKER))
            }
            MatchRule::Identifier(needle) => item.id == needle || raw.contains(needle),
        }
    }

    /// Convenience: resolve then match.
    pub fn matches_raw(&self, raw_id: &str) -> bool {
        self.matches(&crate::resolver::resolve(raw_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(key: &str) -> &'static RewardCategory {
        find_category(key).unwrap()
    }

    #[test]
    fn registry_has_every_menu_entry() {
        assert_eq!(categories().len(), 15);
        assert_eq!(cat("CURRENCY_MTXSWAP").name, "V-Bucks");
        assert_eq!(cat("filter_160").required_power_level(), Some(160));
        assert!(find_category("nope").is_none());
    }

    #[test]
    fn vbucks_matches_by_identifier() {
        let vbucks = cat("currency_mtxswap");
        assert!(vbucks.matches_raw("AccountResource:currency_mtxswap"));
        assert!(!vbucks.matches_raw("AccountResource:eventcurrency_scaling"));
    }

    #[test]
    fn mythic_lead_rules() {
        let leads = cat("filter_mythic_lead");
        assert!(leads.matches_raw("Worker:managerexplorer_sr_eagle_t05"));
        // Not in the named set, but a legendary manager.
        assert!(leads.matches_raw("Worker:managernewclass_sr_someone_t05"));
        assert!(!leads.matches_raw("Worker:managerdoctor_vr_t02"));
    }

    #[test]
    fn legendary_families_use_raw_fallback() {
        let heroes = cat("filter_leg_hero");
        assert!(heroes.matches_raw("Hero:hid_constructor_008_sr_t05"));
        assert!(heroes.matches_raw("Hero:hid_unknown_sr_t01"));
        assert!(!heroes.matches_raw("Hero:hid_constructor_008_vr_t05"));

        let schematics = cat("filter_leg_schematic");
        assert!(schematics.matches_raw("Schematic:sid_assault_auto_sr_ore_t05"));
        assert!(!schematics.matches_raw("Hero:hid_constructor_008_sr_t05"));
    }

    #[test]
    fn legendary_survivor_needle_matches_tiered_ids() {
        let survivor = cat("workerbasic_sr_t0");
        assert!(survivor.matches_raw("Worker:workerbasic_sr_t01"));
        assert!(!survivor.matches_raw("Worker:workerbasic_vr_t01"));
    }

    #[test]
    fn all_accepts_everything() {
        assert!(cat(ALL_KEY).matches_raw("Token:whatever"));
    }
}
