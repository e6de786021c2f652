//! Static item tables used by the resolver.
//!
//! Two kinds of table live here:
//!
//! - **Exact** entries keyed by the full canonical identifier (currencies,
//!   XP, evolution materials, llamas, survivors, mythic leads).
//! - **Prefix** families (heroes, weapon and trap schematics, defenders)
//!   where the upstream identifier carries rarity and tier suffixes after
//!   the key, e.g. `hid_constructor_008_sr_t05`.
//!
//! All tables are process-wide and read-only.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::item::{ItemCategory, Rarity};

// ---------------------------------------------------------------------------
// Icons
// ---------------------------------------------------------------------------

pub mod icons {
    pub const VBUCKS: &str = "<:vbucks:1457696912621834436>";
    pub const GOLD: &str = "<:gold:1458176540130017363>";
    pub const XRAY_TICKET: &str = "<a:rickets:1458179312883601428>";
    pub const PDOR: &str = "<:pdor:1457763893509230622>";
    pub const LIAB: &str = "<:liab:1457763908248010927>";
    pub const EYE: &str = "<:eye:1457763941051797708>";
    pub const SHARD: &str = "<:shard:1457763923397709946>";
    pub const UC_PERK: &str = "<:ucperk:1458453604787552362>";
    pub const RARE_PERK: &str = "<:cperk:1458453583392673853>";
    pub const EPIC_PERK: &str = "<:ep:1457763879055786026>";
    pub const LEG_PERK: &str = "<:lp:1457763973784146013>";
    pub const RE_PERK: &str = "<:reperk:1458176552855670836>";
    pub const FIRE_UP: &str = "<:fireup:1458177350570217472>";
    pub const ICE_UP: &str = "<:iceup:1458177333033697543>";
    pub const AMP_UP: &str = "<:ampup:1458177320933130271>";
    pub const HERO_XP: &str = "<:heroxp:1457764481835995228>";
    pub const SCHEMATIC_XP: &str = "<:ruben:1457764464609726587>";
    pub const SURVIVOR_XP: &str = "<:suxp:1457764500081217627>";
    pub const VENTURE_XP: &str = "<:ventxp:1458176649131462686>";
    pub const MINI_LLAMA: &str = "<:ml:1458495881878831258>";
    pub const UPGRADE_LLAMA: &str = "<:llama:1457700803254026241>";
    pub const TRAINING_MANUAL: &str = "<:pmanual:1458441804813963274>";
    pub const WEAPON_DESIGN: &str = "<:mmanuals:1458441788749516862>";
    pub const TRAP_DESIGN: &str = "<:tmanuals:1458441775231402076>";
    pub const MYTHIC: &str = "🌟";
    pub const KNOX: &str = "<:knox:1459508528518529166>";
    pub const SLUGGER: &str = "<:slugger:1457711578404098089>";
    pub const DRIVER: &str = "<:driver:1457711561756901409>";
}

// ---------------------------------------------------------------------------
// Exact entries
// ---------------------------------------------------------------------------

/// Metadata for a known identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub category: ItemCategory,
    /// Fixed icon. `None` means "derive from category and rarity".
    pub icon: Option<&'static str>,
    /// Fixed rarity. `None` means "derive from the identifier".
    pub rarity: Option<Rarity>,
}

const fn resource(name: &'static str, icon: &'static str) -> CatalogEntry {
    CatalogEntry {
        name,
        category: ItemCategory::Resource,
        icon: Some(icon),
        rarity: None,
    }
}

const fn survivor(name: &'static str) -> CatalogEntry {
    CatalogEntry {
        name,
        category: ItemCategory::Survivor,
        icon: None,
        rarity: None,
    }
}

const fn mythic_lead(name: &'static str) -> CatalogEntry {
    CatalogEntry {
        name,
        category: ItemCategory::Survivor,
        icon: Some(icons::MYTHIC),
        rarity: Some(Rarity::Mythic),
    }
}

/// Identifiers of the named mythic lead survivors.
pub const MYTHIC_LEAD_IDS: &[&str] = &[
    "managerdoctor_sr_kingsly",
    "managerdoctor_sr_noctor",
    "managerdoctor_sr_treky",
    "managerengineer_sr_countess",
    "managerengineer_sr_maths",
    "managerengineer_sr_sobs",
    "managerexplorer_sr_birdie",
    "managerexplorer_sr_eagle",
    "managerexplorer_sr_spacebound",
    "managergadgeteer_sr_fixer",
    "managergadgeteer_sr_flak",
    "managergadgeteer_sr_zapps",
    "managerinventor_sr_frequency",
    "managerinventor_sr_rad",
    "managerinventor_sr_square",
    "managermartialartist_sr_dragon",
    "managermartialartist_sr_samurai",
    "managermartialartist_sr_tiger",
    "managersoldier_sr_malcolm",
    "managersoldier_sr_princess",
    "managersoldier_sr_ramsie",
    "managertrainer_sr_jumpy",
    "managertrainer_sr_raider",
    "managertrainer_sr_yoglattes",
];

static EXACT_ENTRIES: &[(&str, CatalogEntry)] = &[
    // Currencies
    ("currency_mtxswap", resource("V-Bucks", icons::VBUCKS)),
    ("currency_xrayllama", resource("X-Ray Tickets", icons::XRAY_TICKET)),
    ("eventcurrency_scaling", resource("Gold", icons::GOLD)),
    ("campaign_event_currency", resource("Event Tickets", icons::XRAY_TICKET)),
    ("eventcurrency_summer", resource("Summer Tickets", icons::XRAY_TICKET)),
    ("eventcurrency_spring", resource("Spring Tickets", icons::XRAY_TICKET)),
    ("eventcurrency_snowballs", resource("Snowflake Tickets", icons::XRAY_TICKET)),
    ("eventcurrency_roadtrip", resource("Road Trip Tickets", icons::XRAY_TICKET)),
    ("eventcurrency_adventure", resource("Adventure Tickets", icons::XRAY_TICKET)),
    ("eventcurrency_lunar", resource("Lunar Tickets", icons::XRAY_TICKET)),
    ("eventcurrency_blockbuster", resource("Blockbuster Tickets", icons::XRAY_TICKET)),
    // Evolution materials
    ("reagent_c_t01", resource("Pure Drop of Rain", icons::PDOR)),
    ("reagent_c_t02", resource("Lightning in a Bottle", icons::LIAB)),
    ("reagent_c_t03", resource("Eye of the Storm", icons::EYE)),
    ("reagent_c_t04", resource("Storm Shard", icons::SHARD)),
    // Perk materials
    ("reagent_alteration_upgrade_uc", resource("Uncommon PERK-UP!", icons::UC_PERK)),
    ("reagent_alteration_upgrade_r", resource("Rare PERK-UP!", icons::RARE_PERK)),
    ("reagent_alteration_upgrade_vr", resource("Epic PERK-UP!", icons::EPIC_PERK)),
    ("reagent_alteration_upgrade_sr", resource("Legendary PERK-UP!", icons::LEG_PERK)),
    ("reagent_alteration_generic", resource("RE-PERK!", icons::RE_PERK)),
    ("reagent_alteration_ele_fire", resource("FIRE UP", icons::FIRE_UP)),
    ("reagent_alteration_ele_water", resource("FROST UP", icons::ICE_UP)),
    ("reagent_alteration_ele_nature", resource("AMP UP", icons::AMP_UP)),
    // Experience
    ("heroxp", resource("Hero XP", icons::HERO_XP)),
    ("hero_xp", resource("Hero XP", icons::HERO_XP)),
    ("schematicxp", resource("Schematic XP", icons::SCHEMATIC_XP)),
    ("schematic_xp", resource("Schematic XP", icons::SCHEMATIC_XP)),
    ("personnelxp", resource("Survivor XP", icons::SURVIVOR_XP)),
    ("survivor_xp", resource("Survivor XP", icons::SURVIVOR_XP)),
    ("phoenixxp", resource("Venture XP", icons::VENTURE_XP)),
    // Llamas and manuals
    ("voucher_basicpack", resource("Mini Llama", icons::MINI_LLAMA)),
    ("voucher_cardpack_bronze", resource("Upgrade Llama", icons::UPGRADE_LLAMA)),
    ("reagent_people", resource("Training Manual", icons::TRAINING_MANUAL)),
    ("reagent_weapons", resource("Weapon Designs", icons::WEAPON_DESIGN)),
    ("reagent_traps", resource("Trap Designs", icons::TRAP_DESIGN)),
    // Survivors
    ("workerbasic_sr", survivor("Legendary Survivor")),
    ("workerbasic_vr", survivor("Epic Survivor")),
    ("workerbasic_r", survivor("Rare Survivor")),
    ("workerbasic_uc", survivor("Uncommon Survivor")),
    ("workerbasic_c", survivor("Survivor")),
    // Mythic leads
    ("managerdoctor_sr_kingsly", mythic_lead("Dr. Kingsly")),
    ("managerdoctor_sr_noctor", mythic_lead("Dr. Noctor")),
    ("managerdoctor_sr_treky", mythic_lead("Dr. Treky")),
    ("managerengineer_sr_countess", mythic_lead("The Countess")),
    ("managerengineer_sr_maths", mythic_lead("Maths")),
    ("managerengineer_sr_sobs", mythic_lead("Sobs")),
    ("managerexplorer_sr_birdie", mythic_lead("Birdie")),
    ("managerexplorer_sr_eagle", mythic_lead("Eagle Eye")),
    ("managerexplorer_sr_spacebound", mythic_lead("Spacebound")),
    ("managergadgeteer_sr_fixer", mythic_lead("The Fixer")),
    ("managergadgeteer_sr_flak", mythic_lead("Flak")),
    ("managergadgeteer_sr_zapps", mythic_lead("Zapps")),
    ("managerinventor_sr_frequency", mythic_lead("Frequency")),
    ("managerinventor_sr_rad", mythic_lead("Rad")),
    ("managerinventor_sr_square", mythic_lead("Square")),
    ("managermartialartist_sr_dragon", mythic_lead("Dragon")),
    ("managermartialartist_sr_samurai", mythic_lead("Samurai")),
    ("managermartialartist_sr_tiger", mythic_lead("Tiger")),
    ("managersoldier_sr_malcolm", mythic_lead("Malcolm")),
    ("managersoldier_sr_princess", mythic_lead("Princess")),
    ("managersoldier_sr_ramsie", mythic_lead("Ramsie")),
    ("managertrainer_sr_jumpy", mythic_lead("Jumpy")),
    ("managertrainer_sr_raider", mythic_lead("Raider")),
    ("managertrainer_sr_yoglattes", mythic_lead("Yoglattes")),
];

static EXACT: LazyLock<HashMap<&'static str, CatalogEntry>> =
    LazyLock::new(|| EXACT_ENTRIES.iter().copied().collect());

// ---------------------------------------------------------------------------
// Prefix families
// ---------------------------------------------------------------------------

static PREFIX_ENTRIES: &[(&str, &str, ItemCategory)] = &[
    // Heroes
    ("hid_constructor_008", "Power B.A.S.E. Knox", ItemCategory::Hero),
    ("hid_constructor_rushbase", "Rushbase Kyle", ItemCategory::Hero),
    ("hid_constructor_hammerplasma", "Plasma Specialist Kyle", ItemCategory::Hero),
    ("hid_commando_007", "Urban Assault Headhunter", ItemCategory::Hero),
    ("hid_commando_gcgrenade", "Grenadier Headhunter", ItemCategory::Hero),
    ("hid_commando_shockdamage", "Shock Trooper Renegade", ItemCategory::Hero),
    ("hid_ninja_swordmaster", "Swordmaster Ken", ItemCategory::Hero),
    ("hid_ninja_starsassassin", "Dim Mak Mari", ItemCategory::Hero),
    ("hid_outlander_zonepistol", "Enforcer Grizzly", ItemCategory::Hero),
    ("hid_outlander_sphereharvester", "Trailblazer Quinn", ItemCategory::Hero),
    // Weapon schematics
    ("sid_blunt_club_light", "Masters Driver", ItemCategory::Schematic),
    ("sid_blunt_light_rocketbat", "Fortsville Slugger 3000", ItemCategory::Schematic),
    ("sid_assault_auto", "Auto Assault Rifle", ItemCategory::Schematic),
    ("sid_assault_burst", "Burst Assault Rifle", ItemCategory::Schematic),
    ("sid_shotgun_tactical", "Tactical Shotgun", ItemCategory::Schematic),
    ("sid_sniper_boltaction", "Bolt-Action Sniper", ItemCategory::Schematic),
    ("sid_pistol_handcannon", "Hand Cannon", ItemCategory::Schematic),
    ("sid_edged_sword_medium", "Medium Sword", ItemCategory::Schematic),
    ("sid_piercing_spear", "Spear", ItemCategory::Schematic),
    ("sid_launcher_rocket", "Rocket Launcher", ItemCategory::Schematic),
    // Trap schematics
    ("sid_floor_spikes", "Floor Spikes", ItemCategory::Trap),
    ("sid_floor_launcher", "Floor Launcher", ItemCategory::Trap),
    ("sid_wall_launcher", "Wall Launcher", ItemCategory::Trap),
    ("sid_wall_electric", "Wall Dynamo", ItemCategory::Trap),
    ("sid_wall_darts", "Wall Darts", ItemCategory::Trap),
    ("sid_ceiling_electric_single", "Ceiling Zapper", ItemCategory::Trap),
    ("sid_ceiling_gas", "Ceiling Gas Trap", ItemCategory::Trap),
    // Defenders
    ("did_defenderassault_basic", "Assault Defender", ItemCategory::Defender),
    ("did_defendersniper_basic", "Sniper Defender", ItemCategory::Defender),
    ("did_defendershotgun_basic", "Shotgun Defender", ItemCategory::Defender),
    ("did_defenderpistol_basic", "Pistol Defender", ItemCategory::Defender),
    ("did_defendermelee_basic", "Melee Defender", ItemCategory::Defender),
];

/// Icons that replace the rarity-based icon for specific items.
static CUSTOM_ICONS: &[(&str, &str)] = &[
    ("hid_constructor_008", icons::KNOX),
    ("sid_blunt_light_rocketbat", icons::SLUGGER),
    ("sid_blunt_club_light", icons::DRIVER),
];

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// A successful table lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogHit {
    /// The table key that matched (the canonical short identifier).
    pub key: &'static str,
    pub entry: CatalogEntry,
}

/// Look up a canonical (lower-cased, namespace-stripped) identifier.
///
/// Exact entries win over prefix families so currencies and XP are never
/// read as schematics. Among prefix families the longest matching key wins.
pub fn lookup(id: &str) -> Option<CatalogHit> {
    if let Some((&key, entry)) = EXACT.get_key_value(id) {
        return Some(CatalogHit {
            key,
            entry: *entry,
        });
    }

    PREFIX_ENTRIES
        .iter()
        .filter(|(key, _, _)| id.starts_with(key))
        .max_by_key(|(key, _, _)| key.len())
        .map(|&(key, name, category)| CatalogHit {
            key,
            entry: CatalogEntry {
                name,
                category,
                icon: None,
                rarity: None,
            },
        })
}

/// Custom icon for an identifier, matched by prefix.
pub fn custom_icon(id: &str) -> Option<&'static str> {
    CUSTOM_ICONS
        .iter()
        .find(|(key, _)| id.starts_with(key))
        .map(|(_, icon)| *icon)
}

pub fn is_mythic_lead(id: &str) -> bool {
    MYTHIC_LEAD_IDS.contains(&id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_entry_beats_prefix_family() {
        let hit = lookup("schematicxp").unwrap();
        assert_eq!(hit.entry.category, ItemCategory::Resource);
        assert_eq!(hit.entry.name, "Schematic XP");
    }

    #[test]
    fn longest_prefix_wins() {
        let hit = lookup("sid_ceiling_electric_single_vr_t04").unwrap();
        assert_eq!(hit.key, "sid_ceiling_electric_single");
        assert_eq!(hit.entry.category, ItemCategory::Trap);
    }

    #[test]
    fn unknown_identifier_misses() {
        assert!(lookup("totally_unknown_thing").is_none());
    }

    #[test]
    fn every_mythic_lead_has_an_exact_entry() {
        for id in MYTHIC_LEAD_IDS {
            let hit = lookup(id).unwrap_or_else(|| panic!("{id} missing"));
            assert_eq!(hit.entry.rarity, Some(Rarity::Mythic));
        }
    }

    #[test]
    fn custom_icons_match_by_prefix() {
        assert_eq!(custom_icon("sid_blunt_club_light_sr_ore_t05"), Some(icons::DRIVER));
        assert_eq!(custom_icon("sid_assault_auto_sr_ore_t05"), None);
    }
}
