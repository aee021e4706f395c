//! Farming effort estimation for a material list.
//!
//! Scores how tractable it is to farm a set of materials and estimates how
//! many runs and hours it takes.
//!
//! # Scoring
//!
//! Each catalogued material contributes a difficulty of
//! `weight(rarity) * quantity / (drop_rate_percent / 100)`. The efficiency
//! score is `100 - 10 * log10(total_difficulty)`, clamped into `[0, 100]`.
//! A total difficulty of zero (nothing to farm, or nothing catalogued) is
//! the maximum score; the logarithm is never evaluated for it.
//!
//! # Time Estimate
//!
//! Runs per material are `ceil(quantity / (drop_rate_percent / 100))`.
//! Uncatalogued materials contribute no difficulty but still count one run
//! per unit, as if they always dropped. Hours are
//! `ceil(runs * minutes_per_run / 60)`.

use evoplan_core::{MaterialCatalog, MaterialRequirement, Rarity};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Difficulty weight per rarity. Must be positive and non-decreasing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RarityWeights {
    pub common: f64,
    pub uncommon: f64,
    pub rare: f64,
    pub epic: f64,
    pub legendary: f64,
    pub mythic: f64,
}

impl Default for RarityWeights {
    fn default() -> Self {
        Self {
            common: 1.0,
            uncommon: 1.5,
            rare: 2.0,
            epic: 3.0,
            legendary: 5.0,
            mythic: 10.0,
        }
    }
}

impl RarityWeights {
    pub fn weight(&self, rarity: Rarity) -> f64 {
        match rarity {
            Rarity::Common => self.common,
            Rarity::Uncommon => self.uncommon,
            Rarity::Rare => self.rare,
            Rarity::Epic => self.epic,
            Rarity::Legendary => self.legendary,
            Rarity::Mythic => self.mythic,
        }
    }
}

/// Tunables for the scorer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FarmingConfig {
    /// Wall-clock minutes one farming run takes.
    pub minutes_per_run: u32,

    pub weights: RarityWeights,
}

impl Default for FarmingConfig {
    fn default() -> Self {
        Self {
            minutes_per_run: 3,
            weights: RarityWeights::default(),
        }
    }
}

/// Errors from validating a [`FarmingConfig`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FarmingConfigError {
    #[error("minutes per run must be at least 1")]
    ZeroMinutesPerRun,

    #[error("{rarity} weight must be positive, got {value}")]
    InvalidWeight { rarity: Rarity, value: f64 },

    #[error("{higher} weight is below {lower} weight")]
    NonMonotonicWeights { lower: Rarity, higher: Rarity },
}

impl FarmingConfig {
    pub fn validate(&self) -> Result<(), FarmingConfigError> {
        if self.minutes_per_run == 0 {
            return Err(FarmingConfigError::ZeroMinutesPerRun);
        }
        for rarity in Rarity::ALL {
            let value = self.weights.weight(rarity);
            if !(value.is_finite() && value > 0.0) {
                return Err(FarmingConfigError::InvalidWeight { rarity, value });
            }
        }
        for pair in Rarity::ALL.windows(2) {
            if self.weights.weight(pair[1]) < self.weights.weight(pair[0]) {
                return Err(FarmingConfigError::NonMonotonicWeights {
                    lower: pair[0],
                    higher: pair[1],
                });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Efficiency level
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EfficiencyLevel {
    Hard,
    Medium,
    Good,
    Excellent,
}

impl EfficiencyLevel {
    /// `>= 80` excellent, `>= 60` good, `>= 40` medium, otherwise hard.
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            EfficiencyLevel::Excellent
        } else if score >= 60.0 {
            EfficiencyLevel::Good
        } else if score >= 40.0 {
            EfficiencyLevel::Medium
        } else {
            EfficiencyLevel::Hard
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EfficiencyLevel::Hard => "hard",
            EfficiencyLevel::Medium => "medium",
            EfficiencyLevel::Good => "good",
            EfficiencyLevel::Excellent => "excellent",
        }
    }
}

impl fmt::Display for EfficiencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Effort estimate for one material.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialEffort {
    pub name: String,
    pub quantity: u32,
    /// 0 when the material has no catalog entry.
    pub difficulty: f64,
    pub runs: u64,
    /// Whether catalog metadata was available.
    pub metered: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FarmingReport {
    /// Always within `[0, 100]`.
    pub efficiency_score: f64,
    pub efficiency_level: EfficiencyLevel,
    pub total_difficulty: f64,
    pub estimated_runs: u64,
    pub estimated_hours: u64,
    pub estimated_time_label: String,
    /// Per-material breakdown, input order.
    pub materials: Vec<MaterialEffort>,
}

// ---------------------------------------------------------------------------
// Formulas
// ---------------------------------------------------------------------------

/// Score for a total difficulty. Zero or less maps to 100.
pub fn efficiency_score(total_difficulty: f64) -> f64 {
    if total_difficulty <= 0.0 || total_difficulty.is_nan() {
        return 100.0;
    }
    (100.0 - 10.0 * total_difficulty.log10()).clamp(0.0, 100.0)
}

/// Expected runs to collect `quantity` units at `drop_rate_percent`.
pub fn runs_for(quantity: u32, drop_rate_percent: f64) -> u64 {
    // quantity * 100 / rate keeps whole-percent rates exact.
    (f64::from(quantity) * 100.0 / drop_rate_percent).ceil() as u64
}

/// Hours needed for `runs` runs, rounded up.
pub fn estimated_hours(runs: u64, minutes_per_run: u32) -> u64 {
    runs.saturating_mul(u64::from(minutes_per_run)).div_ceil(60)
}

/// `"0 hours"`, `"1 hour"`, `"6 hours"`.
pub fn time_label(hours: u64) -> String {
    if hours == 1 {
        "1 hour".to_string()
    } else {
        format!("{hours} hours")
    }
}

// ---------------------------------------------------------------------------
// Scorer
// ---------------------------------------------------------------------------

pub struct FarmingEfficiencyScorer<'a, M: ?Sized> {
    materials: &'a M,
    config: FarmingConfig,
}

impl<'a, M: MaterialCatalog + ?Sized> FarmingEfficiencyScorer<'a, M> {
    pub fn new(materials: &'a M, config: FarmingConfig) -> Self {
        Self { materials, config }
    }

    pub fn score(&self, materials: &[MaterialRequirement]) -> FarmingReport {
        let mut total_difficulty = 0.0;
        let mut estimated_runs: u64 = 0;
        let mut efforts = Vec::with_capacity(materials.len());

        for m in materials {
            let effort = match self.materials.material(&m.name) {
                Some(meta) => {
                    let rate = meta.drop_rate_percent;
                    MaterialEffort {
                        name: m.name.clone(),
                        quantity: m.quantity,
                        difficulty: self.config.weights.weight(meta.rarity) * f64::from(m.quantity) * 100.0
                            / rate,
                        runs: runs_for(m.quantity, rate),
                        metered: true,
                    }
                }
                None => {
                    debug!(material = %m.name, "unmetered material, assuming one run per unit");
                    MaterialEffort {
                        name: m.name.clone(),
                        quantity: m.quantity,
                        difficulty: 0.0,
                        runs: u64::from(m.quantity),
                        metered: false,
                    }
                }
            };
            total_difficulty += effort.difficulty;
            estimated_runs = estimated_runs.saturating_add(effort.runs);
            efforts.push(effort);
        }

        let score = efficiency_score(total_difficulty);
        let hours = estimated_hours(estimated_runs, self.config.minutes_per_run);
        FarmingReport {
            efficiency_score: score,
            efficiency_level: EfficiencyLevel::from_score(score),
            total_difficulty,
            estimated_runs,
            estimated_hours: hours,
            estimated_time_label: time_label(hours),
            materials: efforts,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
