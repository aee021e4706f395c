//! The planning facade: resolver, cost, farming, and route in one call.

use evoplan_core::diagnostics::push_unique;
use evoplan_core::{Diagnostic, EvolutionCatalog, EvolutionChain, EvolutionChainResolver, MaterialCatalog, UnitCatalog};
use evoplan_cost::{CostAggregator, CostSummary};
use evoplan_data::PlannerConfig;
use evoplan_farming::{FarmingEfficiencyScorer, FarmingReport};
use evoplan_route::RoutePlanner;
use tracing::debug;

use crate::result::{EvolutionPlan, EvolutionPlanResult};

/// Plans evolutions against one set of catalogs and tunables.
///
/// Holds only shared references, so a planner is cheap to build per request
/// and can be shared across threads.
pub struct EvolutionPlanner<'a, C: ?Sized> {
    catalog: &'a C,
    config: &'a PlannerConfig,
}

impl<'a, C> EvolutionPlanner<'a, C>
where
    C: UnitCatalog + EvolutionCatalog + MaterialCatalog + ?Sized,
{
    pub fn new(catalog: &'a C, config: &'a PlannerConfig) -> Self {
        Self { catalog, config }
    }

    /// Resolve the unit's chain without pricing it.
    pub fn resolve(&self, unit_id: &str) -> Option<EvolutionChain> {
        EvolutionChainResolver::new(self.catalog, self.catalog).resolve(unit_id)
    }

    /// Build the full plan for `unit_id`.
    pub fn plan(&self, unit_id: &str) -> EvolutionPlanResult {
        let Some(chain) = self.resolve(unit_id) else {
            debug!(unit_id, "no evolution data");
            return EvolutionPlanResult::NoEvolutionData {
                unit_id: unit_id.to_string(),
            };
        };

        let materials = chain.combined_materials();
        let (cost_summary, farming_report) = self.cost_and_farming(&chain, &materials);
        let route_plan = RoutePlanner::new(self.catalog, &self.config.tips).plan(&materials);

        let mut diagnostics = Vec::new();
        for fallback in chain.parse_fallbacks() {
            push_unique(&mut diagnostics, fallback.clone());
        }
        for name in &cost_summary.lookup_misses {
            push_unique(
                &mut diagnostics,
                Diagnostic::MetadataMiss {
                    material: name.clone(),
                },
            );
        }

        debug!(
            unit_id,
            tiers = chain.tiers().len(),
            materials = materials.len(),
            steps = route_plan.len(),
            grand_total = cost_summary.grand_total,
            diagnostics = diagnostics.len(),
            "assembled evolution plan"
        );

        EvolutionPlanResult::Plan(Box::new(EvolutionPlan {
            chain,
            materials,
            cost_summary,
            farming_report,
            route_plan,
            diagnostics,
        }))
    }

    /// Cost of evolving `unit_id` from its base form up to `tier`, or `None`
    /// when the unit has no evolution data. Tiers past the last one are
    /// clamped to the full chain.
    pub fn cost_through(&self, unit_id: &str, tier: u32) -> Option<CostSummary> {
        let chain = self.resolve(unit_id)?;
        Some(CostAggregator::new(self.catalog, self.config.prices).aggregate_through(&chain, tier))
    }

    #[cfg(not(feature = "parallel"))]
    fn cost_and_farming(
        &self,
        chain: &EvolutionChain,
        materials: &[evoplan_core::MaterialRequirement],
    ) -> (CostSummary, FarmingReport) {
        let cost = CostAggregator::new(self.catalog, self.config.prices).aggregate(chain);
        let farming = FarmingEfficiencyScorer::new(self.catalog, self.config.farming).score(materials);
        (cost, farming)
    }

    #[cfg(feature = "parallel")]
    fn cost_and_farming(
        &self,
        chain: &EvolutionChain,
        materials: &[evoplan_core::MaterialRequirement],
    ) -> (CostSummary, FarmingReport) {
        rayon::join(
            || CostAggregator::new(self.catalog, self.config.prices).aggregate(chain),
            || FarmingEfficiencyScorer::new(self.catalog, self.config.farming).score(materials),
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
