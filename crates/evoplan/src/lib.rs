//! evoplan -- evolution planning for gacha-style unit rosters.
//!
//! Given a unit id and the static game tables, [`EvolutionPlanner::plan`]
//! produces one immutable [`EvolutionPlanResult`]: either the unit has no
//! evolution path, or a full [`EvolutionPlan`] with the normalized chain,
//! the combined material list, an aggregated cost, a farming effort
//! estimate, and an ordered acquisition route.
//!
//! ```rust,ignore
//! let data = evoplan::load_game_data(Path::new("data/sample"))?;
//! let planner = EvolutionPlanner::new(&data.catalog, &data.config);
//! if let EvolutionPlanResult::Plan(plan) = planner.plan("aqua-disciple") {
//!     println!("{} ({})", plan.cost_summary.grand_total, plan.cost_summary.cost_level);
//! }
//! ```
//!
//! Planning is pure and synchronous. Callers that plan off the UI thread
//! use a [`SelectionTracker`] to drop results for units that are no longer
//! selected.
//!
//! # Features
//!
//! - `parallel`: cost aggregation and farming scoring run on the rayon pool
//!   via `rayon::join`. Results are identical either way.

pub mod planner;
pub mod result;
pub mod selection;

pub use planner::EvolutionPlanner;
pub use result::{EvolutionPlan, EvolutionPlanResult};
pub use selection::{SelectionTicket, SelectionTracker};

pub use evoplan_core::{
    Catalog, CatalogBuilder, CatalogError, Diagnostic, EvolutionCatalog, EvolutionChain, EvolutionChainResolver,
    EvolutionTier, MaterialCatalog, MaterialMetadata, MaterialRequirement, Rarity, Requirements, Unit, UnitCatalog,
};
pub use evoplan_cost::{CostAggregator, CostLevel, CostSummary, PriceTable, TierCost};
pub use evoplan_data::{DataLoadError, GameData, PlannerConfig, PlannerConfigError, load_game_data};
pub use evoplan_farming::{EfficiencyLevel, FarmingConfig, FarmingEfficiencyScorer, FarmingReport, MaterialEffort};
pub use evoplan_route::{RoutePlan, RoutePlanner, RouteStep, TipTable};
