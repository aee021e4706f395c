//! Serde data file structs for the static tables.
//!
//! These define the on-disk format for units, evolution chains, materials,
//! and planner tunables. They are deserialized from RON, JSON, or TOML data
//! files and then resolved into core types by the loader.

use evoplan_core::Rarity;
use evoplan_cost::PriceTable;
use evoplan_farming::FarmingConfig;
use serde::Deserialize;
use std::collections::BTreeMap;

// ===========================================================================
// Units
// ===========================================================================

/// A unit entry in `units.*`.
#[derive(Debug, Clone, Deserialize)]
pub struct UnitData {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub rarity: String,
    #[serde(default)]
    pub element: String,
    /// Most units cannot evolve, so this defaults to false.
    #[serde(default)]
    pub can_evolve: bool,
}

// ===========================================================================
// Evolutions
// ===========================================================================

/// An evolution chain entry in `evolutions.*`, referencing a unit by id.
#[derive(Debug, Clone, Deserialize)]
pub struct EvolutionData {
    pub unit: String,
    pub tiers: Vec<TierData>,
}

/// One tier of an evolution chain.
#[derive(Debug, Clone, Deserialize)]
pub struct TierData {
    pub tier: u32,
    pub name: String,
    #[serde(default = "default_multiplier")]
    pub stat_multiplier: f64,
    #[serde(default = "default_min_level")]
    pub min_level: u32,
    #[serde(default)]
    pub currency_cost: u64,
    #[serde(default)]
    pub token_cost: u32,
    /// `"Name xN"` or `"Name"` strings.
    #[serde(default)]
    pub materials: Vec<String>,
    /// Material count as written in the source table, if it records one.
    /// Checked against the count recomputed from `materials`.
    #[serde(default)]
    pub declared_materials: Option<u64>,
}

fn default_multiplier() -> f64 {
    1.0
}

fn default_min_level() -> u32 {
    1
}

// ===========================================================================
// Materials
// ===========================================================================

/// A material entry in `materials.*`.
#[derive(Debug, Clone, Deserialize)]
pub struct MaterialData {
    pub name: String,
    pub rarity: Rarity,
    /// Percent chance per run, in (0, 100].
    pub drop_rate: f64,
    /// Farming locations, preferred first.
    pub sources: Vec<String>,
    #[serde(default)]
    pub cost: u64,
}

// ===========================================================================
// Planner tunables
// ===========================================================================

/// Contents of the optional `planner.*` file. Every section is optional and
/// only the keys present override the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlannerData {
    pub prices: PriceTable,
    pub farming: FarmingConfig,
    /// Location label to advisory tip. Merged over the built-in tips.
    pub tips: BTreeMap<String, String>,
    /// Replaces the generic tip for unknown locations.
    pub tip_fallback: Option<String>,
}
