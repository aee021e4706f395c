//! The planner's output.

use evoplan_core::{Diagnostic, EvolutionChain, MaterialRequirement};
use evoplan_cost::CostSummary;
use evoplan_farming::FarmingReport;
use evoplan_route::RoutePlan;
use serde::Serialize;

/// Outcome of planning one unit. Immutable once produced.
///
/// Serializes with a `kind` tag, so the UI layer can switch on
/// `"NoEvolutionData"` or `"Plan"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum EvolutionPlanResult {
    /// The unit is unknown, cannot evolve, or has no tiers. Not an error.
    NoEvolutionData { unit_id: String },
    Plan(Box<EvolutionPlan>),
}

impl EvolutionPlanResult {
    pub fn is_plan(&self) -> bool {
        matches!(self, Self::Plan(_))
    }

    pub fn plan(&self) -> Option<&EvolutionPlan> {
        match self {
            Self::Plan(plan) => Some(plan),
            Self::NoEvolutionData { .. } => None,
        }
    }

    pub fn into_plan(self) -> Option<EvolutionPlan> {
        match self {
            Self::Plan(plan) => Some(*plan),
            Self::NoEvolutionData { .. } => None,
        }
    }

    /// The unit this result was computed for.
    pub fn unit_id(&self) -> &str {
        match self {
            Self::NoEvolutionData { unit_id } => unit_id,
            Self::Plan(plan) => plan.chain.unit_id(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvolutionPlan {
    pub chain: EvolutionChain,
    /// All tiers' materials with equal names merged, first appearance first.
    pub materials: Vec<MaterialRequirement>,
    pub cost_summary: CostSummary,
    pub farming_report: FarmingReport,
    pub route_plan: RoutePlan,
    /// Non-fatal issues recovered while planning, deduplicated.
    pub diagnostics: Vec<Diagnostic>,
}
