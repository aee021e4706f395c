//! Planner tunables: prices, farming constants, and route tips.

use evoplan_cost::{PriceTable, PriceTableError};
use evoplan_farming::{FarmingConfig, FarmingConfigError};
use evoplan_route::TipTable;
use serde::Serialize;
use std::path::Path;

use crate::loader::{DataLoadError, deserialize_file};
use crate::schema::PlannerData;

/// Everything the planner can be tuned with. `Default` gives the built-in
/// values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlannerConfig {
    pub prices: PriceTable,
    pub farming: FarmingConfig,
    pub tips: TipTable,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlannerConfigError {
    #[error("invalid price table: {0}")]
    Prices(#[from] PriceTableError),

    #[error("invalid farming config: {0}")]
    Farming(#[from] FarmingConfigError),
}

impl PlannerConfig {
    pub fn validate(&self) -> Result<(), PlannerConfigError> {
        self.prices.validate()?;
        self.farming.validate()?;
        Ok(())
    }

    /// Apply a parsed planner file over the defaults.
    pub fn from_data(data: PlannerData) -> Self {
        let mut tips = TipTable::default();
        for (location, tip) in data.tips {
            tips.insert(location, tip);
        }
        if let Some(fallback) = data.tip_fallback {
            tips.set_fallback(fallback);
        }
        Self {
            prices: data.prices,
            farming: data.farming,
            tips,
        }
    }
}

/// Load, merge, and validate a planner file.
pub(crate) fn load_planner_config(path: &Path) -> Result<PlannerConfig, DataLoadError> {
    let data: PlannerData = deserialize_file(path)?;
    let config = PlannerConfig::from_data(data);
    config.validate().map_err(|source| DataLoadError::InvalidConfig {
        file: path.to_path_buf(),
        source,
    })?;
    Ok(config)
}
