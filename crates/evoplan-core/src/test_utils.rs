//! Shared fixtures for unit tests, integration tests, and downstream crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]`.

use crate::catalog::{Catalog, CatalogBuilder};
use crate::model::{EvolutionTier, MaterialMetadata, Requirements, Unit};
use crate::rarity::Rarity;

// ===========================================================================
// Unit ids
// ===========================================================================

/// Three tiers, every material catalogued.
pub const AQUA_DISCIPLE: &str = "aqua-disciple";
/// Three tiers with an uncatalogued material, a zero-count string, and a
/// material repeated across tiers.
pub const EMBER_SCOUT: &str = "ember-scout";
/// Has tiers but `can_evolve == false`.
pub const VILLAGE_GUARD: &str = "village-guard";
/// Evolvable flag set, but no chain registered.
pub const WANDERING_MONK: &str = "wandering-monk";

// ===========================================================================
// Material names
// ===========================================================================

pub const WATER_ESSENCE: &str = "Water Essence";
pub const TRAINING_MANUAL: &str = "Training Manual";
pub const DEMON_BLOOD: &str = "Demon Blood";
pub const SUN_STONE: &str = "Sun Stone";
pub const MASTERS_TEACHINGS: &str = "Master's Teachings";
pub const DEMON_KING_BLOOD: &str = "Demon King Blood";
pub const FIRE_ESSENCE: &str = "Fire Essence";
/// Referenced by [`EMBER_SCOUT`] but absent from the material table.
pub const PHANTOM_ASH: &str = "Phantom Ash";

// ===========================================================================
// Constructors
// ===========================================================================

pub fn unit(id: &str, can_evolve: bool) -> Unit {
    Unit {
        id: id.to_string(),
        name: id.replace('-', " "),
        rarity: "SR".to_string(),
        element: "Water".to_string(),
        can_evolve,
    }
}

pub fn material(name: &str, rarity: Rarity, drop_rate_percent: f64, sources: &[&str]) -> MaterialMetadata {
    MaterialMetadata {
        name: name.to_string(),
        rarity,
        drop_rate_percent,
        source_locations: sources.iter().map(|s| s.to_string()).collect(),
        monetary_cost: 0,
    }
}

pub fn evolution_tier(
    tier_number: u32,
    display_name: &str,
    currency_cost: u64,
    token_cost: u32,
    raw_materials: &[&str],
) -> EvolutionTier {
    EvolutionTier {
        tier_number,
        display_name: display_name.to_string(),
        stat_multiplier: 1.5_f64.powi(tier_number as i32 - 1),
        requirements: Requirements {
            min_level: 1 + 30 * (tier_number - 1),
            currency_cost,
            token_cost,
            raw_materials: raw_materials.iter().map(|s| s.to_string()).collect(),
        },
    }
}

/// The Aqua Disciple chain: 800 / 1500 / 2200 currency, 50 tokens at tier 3.
pub fn aqua_disciple_tiers() -> Vec<EvolutionTier> {
    vec![
        evolution_tier(1, "Aqua Disciple", 800, 0, &[]),
        evolution_tier(
            2,
            "Tide Adept",
            1500,
            0,
            &["Water Essence x3", "Training Manual", "Demon Blood"],
        ),
        evolution_tier(
            3,
            "Abyssal Sage",
            2200,
            50,
            &["Sun Stone x2", "Master's Teachings", "Demon King Blood", "Fire Essence x5"],
        ),
    ]
}

pub fn ember_scout_tiers() -> Vec<EvolutionTier> {
    vec![
        evolution_tier(1, "Ember Scout", 500, 0, &[]),
        evolution_tier(
            2,
            "Flame Ranger",
            1200,
            0,
            &["Fire Essence x4", "Phantom Ash x2", "Cinder Shard x0"],
        ),
        evolution_tier(3, "Inferno Warden", 3000, 20, &["Fire Essence x6", "Demon Blood"]),
    ]
}

/// Material table used by every fixture. [`PHANTOM_ASH`] is deliberately
/// missing.
pub fn fixture_materials() -> Vec<MaterialMetadata> {
    vec![
        material(WATER_ESSENCE, Rarity::Common, 60.0, &["Daily Dungeon", "Story Mode"]),
        material(TRAINING_MANUAL, Rarity::Uncommon, 40.0, &["Story Mode"]),
        material(DEMON_BLOOD, Rarity::Rare, 20.0, &["Raid Boss"]),
        material(SUN_STONE, Rarity::Epic, 10.0, &["Challenge Tower", "Event Shop"]),
        material(MASTERS_TEACHINGS, Rarity::Legendary, 5.0, &["Event Shop"]),
        material(DEMON_KING_BLOOD, Rarity::Mythic, 2.0, &["Raid Boss"]),
        material(FIRE_ESSENCE, Rarity::Common, 60.0, &["Daily Dungeon"]),
    ]
}

/// Builder pre-loaded with every fixture table.
pub fn fixture_builder() -> CatalogBuilder {
    let mut b = CatalogBuilder::new();
    b.add_unit(unit(AQUA_DISCIPLE, true))
        .add_unit(unit(EMBER_SCOUT, true))
        .add_unit(unit(VILLAGE_GUARD, false))
        .add_unit(unit(WANDERING_MONK, true));
    b.add_chain(AQUA_DISCIPLE, aqua_disciple_tiers())
        .add_chain(EMBER_SCOUT, ember_scout_tiers())
        .add_chain(
            VILLAGE_GUARD,
            vec![
                evolution_tier(1, "Village Guard", 0, 0, &[]),
                evolution_tier(2, "Town Captain", 900, 0, &["Training Manual x2"]),
            ],
        );
    for m in fixture_materials() {
        b.add_material(m);
    }
    b
}

/// The frozen fixture catalog.
pub fn fixture_catalog() -> Catalog {
    fixture_builder()
        .build()
        .expect("fixture tables are valid")
}
