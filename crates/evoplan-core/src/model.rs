//! Static data model: units, evolution tiers, and material metadata.
//!
//! These are the read-only records owned by the external catalogs. The
//! engine never mutates them; derived results live in the planning crates.

use serde::{Deserialize, Serialize};

use crate::rarity::Rarity;

// ---------------------------------------------------------------------------
// Units
// ---------------------------------------------------------------------------

/// A collectible unit as listed in the unit catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// Catalog key.
    pub id: String,

    /// Human-readable name.
    pub name: String,

    /// Unit rarity label as the game shows it. Opaque to the engine.
    pub rarity: String,

    /// Element label. Opaque to the engine.
    pub element: String,

    /// Units with `can_evolve == false` never resolve to a chain, even if
    /// evolution tiers are registered for them.
    pub can_evolve: bool,
}

// ---------------------------------------------------------------------------
// Evolution tiers
// ---------------------------------------------------------------------------

/// What it takes to reach a tier from the one before it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirements {
    /// Minimum unit level before the evolution can be performed. Always >= 1.
    pub min_level: u32,

    /// Soft currency cost.
    pub currency_cost: u64,

    /// Premium token cost. Reported separately from currency.
    #[serde(default)]
    pub token_cost: u32,

    /// Material strings in `"Name xN"` or `"Name"` form, in table order.
    #[serde(default)]
    pub raw_materials: Vec<String>,
}

impl Requirements {
    /// Requirements of a base form: level 1, nothing to pay.
    pub fn base() -> Self {
        Self {
            min_level: 1,
            currency_cost: 0,
            token_cost: 0,
            raw_materials: Vec::new(),
        }
    }
}

/// One step of a unit's evolution chain. Tier 1 is the unevolved base form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionTier {
    /// 1-indexed tier number. Consecutive within a chain.
    pub tier_number: u32,

    /// Name of the unit at this tier.
    pub display_name: String,

    /// Stat multiplier relative to the base form. Always > 0.
    pub stat_multiplier: f64,

    pub requirements: Requirements,
}

// ---------------------------------------------------------------------------
// Materials
// ---------------------------------------------------------------------------

/// Catalog entry for a farmable material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialMetadata {
    pub name: String,

    pub rarity: Rarity,

    /// Chance per farming attempt of obtaining one unit, in percent.
    /// Always in (0, 100].
    pub drop_rate_percent: f64,

    /// Where the material can be farmed, preferred source first. Never empty.
    pub source_locations: Vec<String>,

    /// Listed market value of one unit.
    #[serde(default)]
    pub monetary_cost: u64,
}

impl MaterialMetadata {
    /// The preferred farming location.
    pub fn primary_source(&self) -> Option<&str> {
        self.source_locations.first().map(String::as_str)
    }

    /// Every location after the primary one.
    pub fn alternative_sources(&self) -> &[String] {
        self.source_locations.get(1..).unwrap_or(&[])
    }
}
