//! Read-only static data repositories.
//!
//! The planning modules only ever see the three lookup traits below, so
//! tests can substitute a plain `HashMap` or any fixture type for the real
//! catalog. [`Catalog`] is the production implementation: built once through
//! [`CatalogBuilder`], validated, then frozen.

use std::collections::HashMap;

use crate::material::ParsedMaterial;
use crate::model::{EvolutionTier, MaterialMetadata, Unit};

// ---------------------------------------------------------------------------
// Repository traits
// ---------------------------------------------------------------------------

/// Unit id to unit record.
pub trait UnitCatalog: Sync {
    fn unit(&self, id: &str) -> Option<&Unit>;
}

/// Unit id to its evolution tiers, tier 1 first.
pub trait EvolutionCatalog: Sync {
    fn tiers(&self, unit_id: &str) -> Option<&[EvolutionTier]>;
}

/// Material name to material metadata.
pub trait MaterialCatalog: Sync {
    fn material(&self, name: &str) -> Option<&MaterialMetadata>;
}

impl UnitCatalog for HashMap<String, Unit> {
    fn unit(&self, id: &str) -> Option<&Unit> {
        self.get(id)
    }
}

impl EvolutionCatalog for HashMap<String, Vec<EvolutionTier>> {
    fn tiers(&self, unit_id: &str) -> Option<&[EvolutionTier]> {
        self.get(unit_id).map(Vec::as_slice)
    }
}

impl MaterialCatalog for HashMap<String, MaterialMetadata> {
    fn material(&self, name: &str) -> Option<&MaterialMetadata> {
        self.get(name)
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Structural problems in the static tables. Any of these means the data is
/// corrupt; they are raised by [`CatalogBuilder::build`] and never per
/// request.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate unit id '{0}'")]
    DuplicateUnit(String),

    #[error("duplicate material '{0}'")]
    DuplicateMaterial(String),

    #[error("unit '{0}' has more than one evolution chain")]
    DuplicateChain(String),

    #[error("evolution chain references unknown unit '{0}'")]
    UnknownUnit(String),

    #[error("evolution chain for unit '{0}' has no tiers")]
    EmptyChain(String),

    #[error("unit '{unit}': expected tier {expected}, found tier {found}")]
    NonConsecutiveTier { unit: String, expected: u32, found: u32 },

    #[error("unit '{unit}' tier {tier}: stat multiplier must be positive, got {value}")]
    InvalidStatMultiplier { unit: String, tier: u32, value: f64 },

    #[error("unit '{unit}' tier {tier}: minimum level must be at least 1")]
    InvalidMinLevel { unit: String, tier: u32 },

    #[error("unit '{unit}' tier {tier}: empty material string")]
    EmptyMaterialString { unit: String, tier: u32 },

    #[error("material '{name}': drop rate must be in (0, 100], got {value}")]
    InvalidDropRate { name: String, value: f64 },

    #[error("material '{0}' has no source locations")]
    NoSourceLocations(String),
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Collects static tables, then validates and freezes them into a [`Catalog`].
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    units: Vec<Unit>,
    chains: Vec<(String, Vec<EvolutionTier>)>,
    materials: Vec<MaterialMetadata>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_unit(&mut self, unit: Unit) -> &mut Self {
        self.units.push(unit);
        self
    }

    /// Register the evolution tiers for `unit_id`, tier 1 first.
    pub fn add_chain(&mut self, unit_id: impl Into<String>, tiers: Vec<EvolutionTier>) -> &mut Self {
        self.chains.push((unit_id.into(), tiers));
        self
    }

    pub fn add_material(&mut self, material: MaterialMetadata) -> &mut Self {
        self.materials.push(material);
        self
    }

    /// Validate every table and freeze the catalog.
    pub fn build(self) -> Result<Catalog, CatalogError> {
        let mut units = HashMap::with_capacity(self.units.len());
        for unit in self.units {
            if units.contains_key(&unit.id) {
                return Err(CatalogError::DuplicateUnit(unit.id));
            }
            units.insert(unit.id.clone(), unit);
        }

        let mut materials = HashMap::with_capacity(self.materials.len());
        for material in self.materials {
            validate_material(&material)?;
            if materials.contains_key(&material.name) {
                return Err(CatalogError::DuplicateMaterial(material.name));
            }
            materials.insert(material.name.clone(), material);
        }

        let mut chains = HashMap::with_capacity(self.chains.len());
        for (unit_id, tiers) in self.chains {
            if !units.contains_key(&unit_id) {
                return Err(CatalogError::UnknownUnit(unit_id));
            }
            if chains.contains_key(&unit_id) {
                return Err(CatalogError::DuplicateChain(unit_id));
            }
            validate_chain(&unit_id, &tiers)?;
            chains.insert(unit_id, tiers);
        }

        Ok(Catalog {
            units,
            chains,
            materials,
        })
    }
}

fn validate_material(material: &MaterialMetadata) -> Result<(), CatalogError> {
    let rate = material.drop_rate_percent;
    if !(rate.is_finite() && rate > 0.0 && rate <= 100.0) {
        return Err(CatalogError::InvalidDropRate {
            name: material.name.clone(),
            value: rate,
        });
    }
    if material.source_locations.is_empty() {
        return Err(CatalogError::NoSourceLocations(material.name.clone()));
    }
    Ok(())
}

fn validate_chain(unit_id: &str, tiers: &[EvolutionTier]) -> Result<(), CatalogError> {
    if tiers.is_empty() {
        return Err(CatalogError::EmptyChain(unit_id.to_string()));
    }

    for (expected, tier) in (1u32..).zip(tiers) {
        if tier.tier_number != expected {
            return Err(CatalogError::NonConsecutiveTier {
                unit: unit_id.to_string(),
                expected,
                found: tier.tier_number,
            });
        }
        let multiplier = tier.stat_multiplier;
        if !(multiplier.is_finite() && multiplier > 0.0) {
            return Err(CatalogError::InvalidStatMultiplier {
                unit: unit_id.to_string(),
                tier: expected,
                value: multiplier,
            });
        }
        if tier.requirements.min_level == 0 {
            return Err(CatalogError::InvalidMinLevel {
                unit: unit_id.to_string(),
                tier: expected,
            });
        }
        // Unparseable counts are recovered at resolve time; only a string
        // with no name at all is unrecoverable.
        for raw in &tier.requirements.raw_materials {
            if let ParsedMaterial::Unparsed { raw: trimmed } = ParsedMaterial::parse(raw)
                && trimmed.is_empty()
            {
                return Err(CatalogError::EmptyMaterialString {
                    unit: unit_id.to_string(),
                    tier: expected,
                });
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Frozen catalog
// ---------------------------------------------------------------------------

/// Immutable catalog of units, evolution chains, and materials. Frozen
/// after [`CatalogBuilder::build`]. Safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    units: HashMap<String, Unit>,
    chains: HashMap<String, Vec<EvolutionTier>>,
    materials: HashMap<String, MaterialMetadata>,
}

impl Catalog {
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    pub fn chain_count(&self) -> usize {
        self.chains.len()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// Ids of units with a registered chain and `can_evolve` set, sorted.
    pub fn evolvable_unit_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .units
            .values()
            .filter(|u| u.can_evolve && self.chains.contains_key(&u.id))
            .map(|u| u.id.as_str())
            .collect();
        ids.sort_unstable();
        ids
    }
}

impl UnitCatalog for Catalog {
    fn unit(&self, id: &str) -> Option<&Unit> {
        self.units.get(id)
    }
}

impl EvolutionCatalog for Catalog {
    fn tiers(&self, unit_id: &str) -> Option<&[EvolutionTier]> {
        self.chains.get(unit_id).map(Vec::as_slice)
    }
}

impl MaterialCatalog for Catalog {
    fn material(&self, name: &str) -> Option<&MaterialMetadata> {
        self.materials.get(name)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
