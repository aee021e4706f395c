//! Acquisition route planning.
//!
//! Turns a material list into an ordered sequence of [`RouteStep`]s, one per
//! farming location.
//!
//! # Ordering Rules
//!
//! 1. Every material is assigned to its primary source, the first entry of
//!    its catalog `source_locations`. Materials with no catalog entry go to
//!    [`UNKNOWN_SOURCE`]. Alternative sources never create extra steps; they
//!    are listed on the step for information only.
//! 2. Materials are sorted by rarity, rarest first. The sort is stable, so
//!    equal rarities keep their input order. Uncatalogued materials rank
//!    below Common.
//! 3. Steps appear in the order their location is first reached while
//!    walking the sorted list. The location holding the rarest material is
//!    therefore always visited first.

use evoplan_core::{MaterialCatalog, MaterialMetadata, MaterialRequirement};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BTreeMap;
use tracing::debug;

/// Location label for materials without catalog metadata.
pub const UNKNOWN_SOURCE: &str = "Unknown Source";

/// Tip used for locations the tip table does not know.
pub const GENERIC_TIP: &str = "Adjust strategy based on material rarity.";

// ---------------------------------------------------------------------------
// Tip table
// ---------------------------------------------------------------------------

/// Advisory tips keyed by location label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TipTable {
    tips: BTreeMap<String, String>,
    fallback: String,
}

impl Default for TipTable {
    fn default() -> Self {
        let tips = [
            (
                "Story Mode",
                "Replay cleared story stages on auto; early chapters cost the least stamina.",
            ),
            (
                "Daily Dungeon",
                "Run the daily dungeon before reset; bonus drops rotate by weekday.",
            ),
            (
                "Raid Boss",
                "Join raid parties during boosted windows; rare drops come from the final phase.",
            ),
            (
                "Challenge Tower",
                "Take first-clear rewards on new floors before farming repeat floors.",
            ),
            (
                "Event Shop",
                "Spend event currency on limited materials before the shop rotates.",
            ),
            (
                UNKNOWN_SOURCE,
                "No known farming location; watch event and shop rotations.",
            ),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            tips,
            fallback: GENERIC_TIP.to_string(),
        }
    }
}

impl TipTable {
    /// A table with no location tips, only the generic fallback.
    pub fn empty() -> Self {
        Self {
            tips: BTreeMap::new(),
            fallback: GENERIC_TIP.to_string(),
        }
    }

    /// Add or replace the tip for `location`.
    pub fn insert(&mut self, location: impl Into<String>, tip: impl Into<String>) {
        self.tips.insert(location.into(), tip.into());
    }

    pub fn set_fallback(&mut self, tip: impl Into<String>) {
        self.fallback = tip.into();
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn len(&self) -> usize {
        self.tips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tips.is_empty()
    }

    /// Tip for `location`, or the fallback.
    pub fn tip_for(&self, location: &str) -> &str {
        self.tips.get(location).map_or(self.fallback.as_str(), String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Route plan
// ---------------------------------------------------------------------------

/// Non-primary locations that also drop a material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlternativeSource {
    pub material: String,
    pub sources: Vec<String>,
}

/// One stop on the route: a location and everything to farm there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteStep {
    /// 1-indexed position in the route.
    pub step: usize,
    pub location_label: String,
    /// Rarest first.
    pub materials: Vec<MaterialRequirement>,
    pub advisory_tip: String,
    pub alternatives: Vec<AlternativeSource>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoutePlan {
    pub steps: Vec<RouteStep>,
}

impl RoutePlan {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Sum of quantities over every step.
    pub fn total_quantity(&self) -> u64 {
        self.steps
            .iter()
            .map(|s| evoplan_core::material::total_quantity(&s.materials))
            .sum()
    }

    /// The step that farms `material`.
    pub fn step_for(&self, material: &str) -> Option<&RouteStep> {
        self.steps
            .iter()
            .find(|s| s.materials.iter().any(|m| m.name == material))
    }

    /// Location labels in visiting order.
    pub fn locations(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.location_label.as_str()).collect()
    }
}

// ---------------------------------------------------------------------------
// Planner
// ---------------------------------------------------------------------------

pub struct RoutePlanner<'a, M: ?Sized> {
    materials: &'a M,
    tips: &'a TipTable,
}

impl<'a, M: MaterialCatalog + ?Sized> RoutePlanner<'a, M> {
    pub fn new(materials: &'a M, tips: &'a TipTable) -> Self {
        Self { materials, tips }
    }

    pub fn plan(&self, materials: &[MaterialRequirement]) -> RoutePlan {
        let mut ordered: Vec<(&MaterialRequirement, Option<&MaterialMetadata>)> = materials
            .iter()
            .map(|m| (m, self.materials.material(&m.name)))
            .collect();
        // Stable: equal rarities keep input order. `None` sorts below every
        // rarity, so uncatalogued materials come last.
        ordered.sort_by_key(|(_, meta)| Reverse(meta.map(|m| m.rarity)));

        let mut steps: Vec<RouteStep> = Vec::new();
        for (requirement, meta) in ordered {
            let label = meta
                .and_then(MaterialMetadata::primary_source)
                .unwrap_or(UNKNOWN_SOURCE);
            if meta.is_none() {
                debug!(material = %requirement.name, "routing uncatalogued material to {UNKNOWN_SOURCE}");
            }

            let index = match steps.iter().position(|s| s.location_label == label) {
                Some(i) => i,
                None => {
                    steps.push(RouteStep {
                        step: steps.len() + 1,
                        location_label: label.to_string(),
                        materials: Vec::new(),
                        advisory_tip: self.tips.tip_for(label).to_string(),
                        alternatives: Vec::new(),
                    });
                    steps.len() - 1
                }
            };

            let step = &mut steps[index];
            step.materials.push(requirement.clone());
            if let Some(meta) = meta {
                let alternatives = meta.alternative_sources();
                if !alternatives.is_empty() {
                    step.alternatives.push(AlternativeSource {
                        material: requirement.name.clone(),
                        sources: alternatives.to_vec(),
                    });
                }
            }
        }

        RoutePlan { steps }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
