//! Cost aggregation for evolution chains.
//!
//! Sums what a chain costs across its tiers and classifies the result into a
//! [`CostLevel`].
//!
//! # Cost Model
//!
//! - **Currency**: the sum of every tier's `currency_cost`, tier 1 included.
//! - **Tokens**: the sum of every tier's `token_cost`. Tokens are a separate
//!   premium currency and are never folded into the grand total.
//! - **Materials**: each normalized material is valued at
//!   `quantity * PriceTable::price(rarity)`. Materials without a catalog
//!   entry are valued at 0 and reported in [`CostSummary::lookup_misses`].
//!
//! `grand_total = currency_total + material_monetary_total`. All arithmetic
//! saturates, so adding a tier can never decrease the grand total.

use evoplan_core::{EvolutionChain, MaterialCatalog, Rarity, ResolvedTier};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

// ---------------------------------------------------------------------------
// Price table
// ---------------------------------------------------------------------------

/// Unit price of one material of each rarity. Prices must not decrease as
/// rarity rises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceTable {
    pub common: u64,
    pub uncommon: u64,
    pub rare: u64,
    pub epic: u64,
    pub legendary: u64,
    pub mythic: u64,
}

impl Default for PriceTable {
    fn default() -> Self {
        Self {
            common: 100,
            uncommon: 500,
            rare: 2_000,
            epic: 10_000,
            legendary: 50_000,
            mythic: 250_000,
        }
    }
}

/// Errors from validating a [`PriceTable`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PriceTableError {
    #[error("{higher} price ({higher_price}) is below {lower} price ({lower_price})")]
    NonMonotonic {
        lower: Rarity,
        lower_price: u64,
        higher: Rarity,
        higher_price: u64,
    },
}

impl PriceTable {
    pub fn price(&self, rarity: Rarity) -> u64 {
        match rarity {
            Rarity::Common => self.common,
            Rarity::Uncommon => self.uncommon,
            Rarity::Rare => self.rare,
            Rarity::Epic => self.epic,
            Rarity::Legendary => self.legendary,
            Rarity::Mythic => self.mythic,
        }
    }

    /// Check that prices never decrease with rarity.
    pub fn validate(&self) -> Result<(), PriceTableError> {
        for pair in Rarity::ALL.windows(2) {
            let (lower, higher) = (pair[0], pair[1]);
            if self.price(higher) < self.price(lower) {
                return Err(PriceTableError::NonMonotonic {
                    lower,
                    lower_price: self.price(lower),
                    higher,
                    higher_price: self.price(higher),
                });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Cost level
// ---------------------------------------------------------------------------

/// Qualitative bucket for a grand total. Lower bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostLevel {
    /// Below 10,000.
    Trivial,
    /// 10,000 up to 100,000.
    Easy,
    /// 100,000 up to 500,000.
    Medium,
    /// 500,000 up to 1,000,000.
    Hard,
    /// 1,000,000 and above.
    Extreme,
}

impl CostLevel {
    pub const EASY_THRESHOLD: u64 = 10_000;
    pub const MEDIUM_THRESHOLD: u64 = 100_000;
    pub const HARD_THRESHOLD: u64 = 500_000;
    pub const EXTREME_THRESHOLD: u64 = 1_000_000;

    pub fn from_total(grand_total: u64) -> Self {
        match grand_total {
            t if t >= Self::EXTREME_THRESHOLD => CostLevel::Extreme,
            t if t >= Self::HARD_THRESHOLD => CostLevel::Hard,
            t if t >= Self::MEDIUM_THRESHOLD => CostLevel::Medium,
            t if t >= Self::EASY_THRESHOLD => CostLevel::Easy,
            _ => CostLevel::Trivial,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CostLevel::Trivial => "trivial",
            CostLevel::Easy => "easy",
            CostLevel::Medium => "medium",
            CostLevel::Hard => "hard",
            CostLevel::Extreme => "extreme",
        }
    }
}

impl fmt::Display for CostLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// What a single tier adds to the bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierCost {
    pub tier: u32,
    pub currency: u64,
    pub tokens: u64,
    pub materials: u64,
    /// Grand total of tiers `1..=tier`.
    pub running_total: u64,
}

/// Aggregated cost of a chain or a prefix of it. Recomputed on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CostSummary {
    pub currency_total: u64,
    pub token_total: u64,
    pub material_monetary_total: u64,
    pub grand_total: u64,
    pub cost_level: CostLevel,
    /// Per-tier breakdown, tier 1 first.
    pub tiers: Vec<TierCost>,
    /// Material names with no catalog entry, in first-seen order.
    pub lookup_misses: Vec<String>,
}

// ---------------------------------------------------------------------------
// Aggregator
// ---------------------------------------------------------------------------

/// Prices evolution chains against a material catalog.
pub struct CostAggregator<'a, M: ?Sized> {
    materials: &'a M,
    prices: PriceTable,
}

impl<'a, M: MaterialCatalog + ?Sized> CostAggregator<'a, M> {
    pub fn new(materials: &'a M, prices: PriceTable) -> Self {
        Self { materials, prices }
    }

    /// Cost of the whole chain.
    pub fn aggregate(&self, chain: &EvolutionChain) -> CostSummary {
        self.aggregate_tiers(chain.tiers())
    }

    /// Cost of reaching `tier` from the base form: tiers `1..=tier`.
    pub fn aggregate_through(&self, chain: &EvolutionChain, tier: u32) -> CostSummary {
        self.aggregate_tiers(chain.prefix(tier))
    }

    /// Cost of an arbitrary run of tiers.
    pub fn aggregate_tiers(&self, tiers: &[ResolvedTier]) -> CostSummary {
        let mut currency_total: u64 = 0;
        let mut token_total: u64 = 0;
        let mut material_total: u64 = 0;
        let mut breakdown = Vec::with_capacity(tiers.len());
        let mut lookup_misses: Vec<String> = Vec::new();

        for tier in tiers {
            let requirements = &tier.tier.requirements;
            let mut tier_materials: u64 = 0;

            for m in &tier.materials {
                match self.materials.material(&m.name) {
                    Some(meta) => {
                        let line = self.prices.price(meta.rarity).saturating_mul(u64::from(m.quantity));
                        tier_materials = tier_materials.saturating_add(line);
                    }
                    None => {
                        if !lookup_misses.contains(&m.name) {
                            warn!(material = %m.name, tier = tier.number(), "no catalog entry, pricing at 0");
                            lookup_misses.push(m.name.clone());
                        }
                    }
                }
            }

            currency_total = currency_total.saturating_add(requirements.currency_cost);
            token_total = token_total.saturating_add(u64::from(requirements.token_cost));
            material_total = material_total.saturating_add(tier_materials);

            breakdown.push(TierCost {
                tier: tier.number(),
                currency: requirements.currency_cost,
                tokens: u64::from(requirements.token_cost),
                materials: tier_materials,
                running_total: currency_total.saturating_add(material_total),
            });
        }

        let grand_total = currency_total.saturating_add(material_total);
        CostSummary {
            currency_total,
            token_total,
            material_monetary_total: material_total,
            grand_total,
            cost_level: CostLevel::from_total(grand_total),
            tiers: breakdown,
            lookup_misses,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use evoplan_core::EvolutionChainResolver;
    use evoplan_core::test_utils::*;

    fn chain(unit_id: &str) -> EvolutionChain {
        let catalog = fixture_catalog();
        EvolutionChainResolver::new(&catalog, &catalog)
            .resolve(unit_id)
            .unwrap()
    }

    // -----------------------------------------------------------------------
    // Cost levels
    // -----------------------------------------------------------------------

    #[test]
    fn cost_level_boundaries() {
        assert_eq!(CostLevel::from_total(0), CostLevel::Trivial);
        assert_eq!(CostLevel::from_total(9_999), CostLevel::Trivial);
        assert_eq!(CostLevel::from_total(10_000), CostLevel::Easy);
        assert_eq!(CostLevel::from_total(99_999), CostLevel::Easy);
        assert_eq!(CostLevel::from_total(100_000), CostLevel::Medium);
        assert_eq!(CostLevel::from_total(499_999), CostLevel::Medium);
        assert_eq!(CostLevel::from_total(500_000), CostLevel::Hard);
        assert_eq!(CostLevel::from_total(999_999), CostLevel::Hard);
        assert_eq!(CostLevel::from_total(1_000_000), CostLevel::Extreme);
        assert_eq!(CostLevel::from_total(u64::MAX), CostLevel::Extreme);
    }

    #[test]
    fn cost_level_labels() {
        assert_eq!(CostLevel::from_total(999_999).as_str(), "hard");
        assert_eq!(format!("{}", CostLevel::Extreme), "extreme");
        assert_eq!(serde_json::to_string(&CostLevel::Trivial).unwrap(), "\"trivial\"");
    }

    // -----------------------------------------------------------------------
    // Price table
    // -----------------------------------------------------------------------

    #[test]
    fn default_prices_are_monotonic() {
        let prices = PriceTable::default();
        assert!(prices.validate().is_ok());
        assert!(prices.price(Rarity::Common) < prices.price(Rarity::Mythic));
    }

    #[test]
    fn non_monotonic_prices_rejected() {
        let prices = PriceTable {
            epic: 100,
            ..PriceTable::default()
        };
        assert_eq!(
            prices.validate(),
            Err(PriceTableError::NonMonotonic {
                lower: Rarity::Rare,
                lower_price: 2_000,
                higher: Rarity::Epic,
                higher_price: 100,
            })
        );
    }

    #[test]
    fn flat_prices_are_allowed() {
        let prices = PriceTable {
            common: 10,
            uncommon: 10,
            rare: 10,
            epic: 10,
            legendary: 10,
            mythic: 10,
        };
        assert!(prices.validate().is_ok());
    }

    // -----------------------------------------------------------------------
    // Aggregation
    // -----------------------------------------------------------------------

    #[test]
    fn aqua_disciple_totals() {
        let catalog = fixture_catalog();
        let summary = CostAggregator::new(&catalog, PriceTable::default()).aggregate(&chain(AQUA_DISCIPLE));

        assert_eq!(summary.currency_total, 4_500);
        assert_eq!(summary.token_total, 50);
        // Tier 2: 3 Common + 1 Uncommon + 1 Rare = 300 + 500 + 2,000.
        // Tier 3: 2 Epic + 1 Legendary + 1 Mythic + 5 Common
        //       = 20,000 + 50,000 + 250,000 + 500.
        assert_eq!(summary.material_monetary_total, 323_300);
        assert_eq!(summary.grand_total, 327_800);
        assert_eq!(summary.cost_level, CostLevel::Medium);
        assert!(summary.lookup_misses.is_empty());
    }

    #[test]
    fn tier_breakdown_runs_forward() {
        let catalog = fixture_catalog();
        let summary = CostAggregator::new(&catalog, PriceTable::default()).aggregate(&chain(AQUA_DISCIPLE));

        let running: Vec<u64> = summary.tiers.iter().map(|t| t.running_total).collect();
        assert_eq!(running, vec![800, 5_100, 327_800]);
        assert_eq!(summary.tiers[2].tokens, 50);
        assert_eq!(summary.tiers[1].materials, 2_800);
    }

    #[test]
    fn tokens_stay_out_of_grand_total() {
        let catalog = fixture_catalog();
        let summary = CostAggregator::new(&catalog, PriceTable::default()).aggregate(&chain(AQUA_DISCIPLE));
        assert_eq!(
            summary.grand_total,
            summary.currency_total + summary.material_monetary_total
        );
    }

    #[test]
    fn aggregate_through_prefixes() {
        let catalog = fixture_catalog();
        let aggregator = CostAggregator::new(&catalog, PriceTable::default());
        let chain = chain(AQUA_DISCIPLE);

        let base = aggregator.aggregate_through(&chain, 1);
        assert_eq!(base.grand_total, 800);
        assert_eq!(base.cost_level, CostLevel::Trivial);

        let mid = aggregator.aggregate_through(&chain, 2);
        assert_eq!(mid.currency_total, 2_300);
        assert_eq!(mid.grand_total, 5_100);

        assert_eq!(aggregator.aggregate_through(&chain, 3), aggregator.aggregate(&chain));
    }

    #[test]
    fn empty_prefix_is_zero() {
        let catalog = fixture_catalog();
        let summary = CostAggregator::new(&catalog, PriceTable::default()).aggregate_tiers(&[]);
        assert_eq!(summary.grand_total, 0);
        assert_eq!(summary.cost_level, CostLevel::Trivial);
        assert!(summary.tiers.is_empty());
    }

    #[test]
    fn missing_metadata_costs_nothing_and_is_reported() {
        let catalog = fixture_catalog();
        let summary = CostAggregator::new(&catalog, PriceTable::default()).aggregate(&chain(EMBER_SCOUT));

        assert_eq!(
            summary.lookup_misses,
            vec![PHANTOM_ASH.to_string(), "Cinder Shard x0".to_string()]
        );
        // Fire Essence x10 (Common) + Demon Blood (Rare).
        assert_eq!(summary.material_monetary_total, 10 * 100 + 2_000);
        assert_eq!(summary.currency_total, 4_700);
        assert_eq!(summary.token_total, 20);
    }

    #[test]
    fn deterministic() {
        let catalog = fixture_catalog();
        let aggregator = CostAggregator::new(&catalog, PriceTable::default());
        let chain = chain(EMBER_SCOUT);
        assert_eq!(aggregator.aggregate(&chain), aggregator.aggregate(&chain));
    }

    #[test]
    fn custom_prices_apply() {
        let catalog = fixture_catalog();
        let prices = PriceTable {
            common: 1,
            uncommon: 1,
            rare: 1,
            epic: 1,
            legendary: 1,
            mythic: 1,
        };
        let summary = CostAggregator::new(&catalog, prices).aggregate(&chain(AQUA_DISCIPLE));
        // One unit of price per material unit: 5 + 9.
        assert_eq!(summary.material_monetary_total, 14);
    }
}
