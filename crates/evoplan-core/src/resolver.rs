//! Unit id to normalized evolution chain.

use serde::Serialize;
use tracing::warn;

use crate::catalog::{EvolutionCatalog, UnitCatalog};
use crate::diagnostics::Diagnostic;
use crate::material::{MaterialRequirement, ParsedMaterial};
use crate::model::{EvolutionTier, Unit};

// ---------------------------------------------------------------------------
// Resolved chain
// ---------------------------------------------------------------------------

/// A tier together with its parsed material list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedTier {
    pub tier: EvolutionTier,

    /// Normalized materials, in the order the table lists them.
    pub materials: Vec<MaterialRequirement>,
}

impl ResolvedTier {
    pub fn number(&self) -> u32 {
        self.tier.tier_number
    }

    /// Sum of quantities for this tier.
    pub fn material_quantity(&self) -> u64 {
        crate::material::total_quantity(&self.materials)
    }
}

/// A unit's full evolution chain with every material string normalized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvolutionChain {
    pub unit: Unit,
    tiers: Vec<ResolvedTier>,
    #[serde(skip)]
    fallbacks: Vec<Diagnostic>,
}

impl EvolutionChain {
    /// Parse every tier's raw material strings. Fallbacks are logged and
    /// kept as diagnostics.
    pub fn from_tiers(unit: Unit, tiers: &[EvolutionTier]) -> Self {
        let mut fallbacks = Vec::new();
        let tiers = tiers
            .iter()
            .map(|tier| {
                let materials = tier
                    .requirements
                    .raw_materials
                    .iter()
                    .map(|raw| {
                        let parsed = ParsedMaterial::parse(raw);
                        if parsed.is_fallback() {
                            warn!(
                                unit = %unit.id,
                                tier = tier.tier_number,
                                raw = %raw,
                                "material string did not parse, using quantity 1"
                            );
                            fallbacks.push(Diagnostic::MaterialParseFallback {
                                tier: tier.tier_number,
                                raw: raw.trim().to_string(),
                            });
                        }
                        parsed.into_requirement()
                    })
                    .collect();
                ResolvedTier {
                    tier: tier.clone(),
                    materials,
                }
            })
            .collect();

        Self {
            unit,
            tiers,
            fallbacks,
        }
    }

    pub fn unit_id(&self) -> &str {
        &self.unit.id
    }

    /// All tiers, tier 1 first.
    pub fn tiers(&self) -> &[ResolvedTier] {
        &self.tiers
    }

    pub fn tier(&self, number: u32) -> Option<&ResolvedTier> {
        self.tiers.iter().find(|t| t.number() == number)
    }

    /// Tiers `1..=through`. Clamped to the chain length.
    pub fn prefix(&self, through: u32) -> &[ResolvedTier] {
        let end = (through as usize).min(self.tiers.len());
        &self.tiers[..end]
    }

    /// The highest tier number in the chain.
    pub fn final_tier(&self) -> u32 {
        self.tiers.last().map_or(0, ResolvedTier::number)
    }

    /// Every material across all tiers, with repeated names merged into one
    /// entry whose quantity is the sum. Order is first appearance.
    pub fn combined_materials(&self) -> Vec<MaterialRequirement> {
        combine(self.tiers.iter().flat_map(|t| t.materials.iter()))
    }

    /// Parse fallbacks encountered while building this chain.
    pub fn parse_fallbacks(&self) -> &[Diagnostic] {
        &self.fallbacks
    }
}

/// Merge requirements with equal names, summing quantities. Keeps the
/// first-appearance order of names.
pub fn combine<'a>(materials: impl IntoIterator<Item = &'a MaterialRequirement>) -> Vec<MaterialRequirement> {
    let mut combined: Vec<MaterialRequirement> = Vec::new();
    for m in materials {
        match combined.iter_mut().find(|c| c.name == m.name) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(m.quantity),
            None => combined.push(m.clone()),
        }
    }
    combined
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

/// Looks up a unit's evolution chain and normalizes it.
pub struct EvolutionChainResolver<'a, U: ?Sized, E: ?Sized> {
    units: &'a U,
    evolutions: &'a E,
}

impl<'a, U, E> EvolutionChainResolver<'a, U, E>
where
    U: UnitCatalog + ?Sized,
    E: EvolutionCatalog + ?Sized,
{
    pub fn new(units: &'a U, evolutions: &'a E) -> Self {
        Self { units, evolutions }
    }

    /// Returns `None` when the unit is unknown, cannot evolve, or has no
    /// tiers. That is the common case and not an error.
    pub fn resolve(&self, unit_id: &str) -> Option<EvolutionChain> {
        let unit = self.units.unit(unit_id)?;
        if !unit.can_evolve {
            return None;
        }
        let tiers = self.evolutions.tiers(unit_id)?;
        if tiers.is_empty() {
            return None;
        }
        Some(EvolutionChain::from_tiers(unit.clone(), tiers))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use std::collections::HashMap;

    #[test]
    fn resolves_three_tier_chain() {
        let catalog = fixture_catalog();
        let chain = EvolutionChainResolver::new(&catalog, &catalog)
            .resolve(AQUA_DISCIPLE)
            .unwrap();

        assert_eq!(chain.unit_id(), AQUA_DISCIPLE);
        assert_eq!(chain.tiers().len(), 3);
        assert_eq!(chain.final_tier(), 3);
        assert!(chain.tier(1).unwrap().materials.is_empty());

        let t2 = chain.tier(2).unwrap();
        assert_eq!(
            t2.materials,
            vec![
                MaterialRequirement::new(WATER_ESSENCE, 3),
                MaterialRequirement::new(TRAINING_MANUAL, 1),
                MaterialRequirement::new(DEMON_BLOOD, 1),
            ]
        );
        assert_eq!(t2.material_quantity(), 5);
        assert!(chain.parse_fallbacks().is_empty());
    }

    #[test]
    fn locked_unit_is_not_found() {
        let catalog = fixture_catalog();
        let resolver = EvolutionChainResolver::new(&catalog, &catalog);
        assert!(resolver.resolve(VILLAGE_GUARD).is_none());
    }

    #[test]
    fn unit_without_chain_is_not_found() {
        let catalog = fixture_catalog();
        let resolver = EvolutionChainResolver::new(&catalog, &catalog);
        assert!(resolver.resolve(WANDERING_MONK).is_none());
    }

    #[test]
    fn unknown_unit_is_not_found() {
        let catalog = fixture_catalog();
        let resolver = EvolutionChainResolver::new(&catalog, &catalog);
        assert!(resolver.resolve("no-such-unit").is_none());
        assert!(resolver.resolve("").is_none());
    }

    #[test]
    fn empty_tier_list_is_not_found() {
        let mut units = HashMap::new();
        units.insert("hero".to_string(), unit("hero", true));
        let mut chains: HashMap<String, Vec<EvolutionTier>> = HashMap::new();
        chains.insert("hero".to_string(), Vec::new());

        let resolver = EvolutionChainResolver::new(&units, &chains);
        assert!(resolver.resolve("hero").is_none());
    }

    #[test]
    fn fallbacks_are_recorded_per_tier() {
        let catalog = fixture_catalog();
        let chain = EvolutionChainResolver::new(&catalog, &catalog)
            .resolve(EMBER_SCOUT)
            .unwrap();
        assert_eq!(
            chain.parse_fallbacks(),
            &[Diagnostic::MaterialParseFallback {
                tier: 2,
                raw: "Cinder Shard x0".to_string()
            }]
        );
        assert!(
            chain
                .tier(2)
                .unwrap()
                .materials
                .contains(&MaterialRequirement::new("Cinder Shard x0", 1))
        );
    }

    #[test]
    fn combined_materials_merge_repeated_names() {
        let catalog = fixture_catalog();
        let chain = EvolutionChainResolver::new(&catalog, &catalog)
            .resolve(EMBER_SCOUT)
            .unwrap();
        let combined = chain.combined_materials();

        let fire: Vec<_> = combined.iter().filter(|m| m.name == FIRE_ESSENCE).collect();
        assert_eq!(fire.len(), 1);
        assert_eq!(fire[0].quantity, 10);
        assert_eq!(combined[0].name, FIRE_ESSENCE);

        let per_tier: u64 = chain.tiers().iter().map(ResolvedTier::material_quantity).sum();
        assert_eq!(crate::material::total_quantity(&combined), per_tier);
    }

    #[test]
    fn prefix_is_clamped() {
        let catalog = fixture_catalog();
        let chain = EvolutionChainResolver::new(&catalog, &catalog)
            .resolve(AQUA_DISCIPLE)
            .unwrap();
        assert!(chain.prefix(0).is_empty());
        assert_eq!(chain.prefix(2).len(), 2);
        assert_eq!(chain.prefix(99).len(), 3);
    }
}
