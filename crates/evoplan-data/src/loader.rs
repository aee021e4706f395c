//! Loading pipeline: reads data files and builds the catalog.
//!
//! A data directory holds `units`, `evolutions`, and `materials` files
//! (required) and a `planner` file (optional). Each may be RON, JSON, or
//! TOML; in TOML the list lives under a top-level key named after the file.
//! Cross-references and duplicates are checked once, by
//! [`CatalogBuilder::build`]; everything that makes the tables unusable is
//! reported here, before any per-unit planning happens.

use evoplan_core::diagnostics::push_unique;
use evoplan_core::material::parse_requirement;
use evoplan_core::{
    Catalog, CatalogBuilder, CatalogError, Diagnostic, EvolutionTier, MaterialMetadata, Requirements, Unit,
};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::{PlannerConfig, PlannerConfigError, load_planner_config};
use crate::schema::{EvolutionData, MaterialData, TierData, UnitData};

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur during data loading.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// A required data file was not found in the given directory.
    #[error("required file '{file}' not found in {dir}")]
    MissingRequired { file: String, dir: PathBuf },

    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// Two files with the same base name but different formats exist.
    #[error("conflicting formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// The planner file parsed but its values are unusable.
    #[error("invalid planner config in {file}: {source}")]
    InvalidConfig {
        file: PathBuf,
        source: PlannerConfigError,
    },

    /// The tables resolved but violate a catalog invariant.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// File discovery
// ===========================================================================

/// Scan a directory for a data file with the given base name (without extension).
///
/// Looks for `{base_name}.ron`, `{base_name}.toml`, and `{base_name}.json`.
/// Returns `Ok(None)` if no file is found, or `Err(ConflictingFormats)` if
/// multiple formats exist for the same base name.
pub fn find_data_file(dir: &Path, base_name: &str) -> Result<Option<PathBuf>, DataLoadError> {
    let extensions = ["ron", "toml", "json"];
    let mut found: Option<PathBuf> = None;

    for ext in &extensions {
        let candidate = dir.join(format!("{base_name}.{ext}"));
        if candidate.exists() {
            if let Some(ref existing) = found {
                return Err(DataLoadError::ConflictingFormats {
                    a: existing.clone(),
                    b: candidate,
                });
            }
            found = Some(candidate);
        }
    }

    Ok(found)
}

/// Like [`find_data_file`], but returns an error if no file is found.
pub fn require_data_file(dir: &Path, base_name: &str) -> Result<PathBuf, DataLoadError> {
    find_data_file(dir, base_name)?.ok_or_else(|| DataLoadError::MissingRequired {
        file: base_name.to_string(),
        dir: dir.to_path_buf(),
    })
}

// ===========================================================================
// Deserialization
// ===========================================================================

fn parse_error(path: &Path, detail: impl ToString) -> DataLoadError {
    DataLoadError::Parse {
        file: path.to_path_buf(),
        detail: detail.to_string(),
    }
}

/// Read a file and deserialize it according to its format (detected from extension).
pub fn deserialize_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        Format::Ron => ron::from_str(&content).map_err(|e| parse_error(path, e)),
        Format::Json => serde_json::from_str(&content).map_err(|e| parse_error(path, e)),
        Format::Toml => toml::from_str(&content).map_err(|e| parse_error(path, e)),
    }
}

/// Deserialize a list from a file. For TOML files, extracts the array at the
/// given `toml_key` from a top-level table. For RON and JSON, deserializes
/// directly as `Vec<T>`.
pub fn deserialize_list<T: DeserializeOwned>(path: &Path, toml_key: &str) -> Result<Vec<T>, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        Format::Ron => ron::from_str(&content).map_err(|e| parse_error(path, e)),
        Format::Json => serde_json::from_str(&content).map_err(|e| parse_error(path, e)),
        Format::Toml => {
            let table: toml::Value = toml::from_str(&content).map_err(|e| parse_error(path, e))?;
            let array = table
                .get(toml_key)
                .ok_or_else(|| parse_error(path, format!("missing key '{toml_key}' in TOML file")))?
                .clone();
            array.try_into().map_err(|e: toml::de::Error| parse_error(path, e))
        }
    }
}

// ===========================================================================
// Loading pipeline
// ===========================================================================

/// Everything loaded from a data directory.
#[derive(Debug, Clone)]
pub struct GameData {
    pub catalog: Catalog,
    pub config: PlannerConfig,
    /// Non-fatal table inconsistencies found while loading.
    pub load_warnings: Vec<Diagnostic>,
}

/// Load and validate every table in `dir`.
pub fn load_game_data(dir: &Path) -> Result<GameData, DataLoadError> {
    let mut builder = CatalogBuilder::new();
    let mut load_warnings = Vec::new();

    let units_path = require_data_file(dir, "units")?;
    let units: Vec<UnitData> = deserialize_list(&units_path, "units")?;
    for u in units {
        builder.add_unit(Unit {
            id: u.id,
            name: u.name,
            rarity: u.rarity,
            element: u.element,
            can_evolve: u.can_evolve,
        });
    }

    let materials_path = require_data_file(dir, "materials")?;
    let materials: Vec<MaterialData> = deserialize_list(&materials_path, "materials")?;
    for m in materials {
        builder.add_material(MaterialMetadata {
            name: m.name,
            rarity: m.rarity,
            drop_rate_percent: m.drop_rate,
            source_locations: m.sources,
            monetary_cost: m.cost,
        });
    }

    let evolutions_path = require_data_file(dir, "evolutions")?;
    let evolutions: Vec<EvolutionData> = deserialize_list(&evolutions_path, "evolutions")?;
    for e in evolutions {
        for tier in &e.tiers {
            if let Some(mismatch) = check_declared_count(&e.unit, tier) {
                push_unique(&mut load_warnings, mismatch);
            }
        }
        let tiers = e.tiers.into_iter().map(resolve_tier).collect();
        builder.add_chain(e.unit, tiers);
    }

    let catalog = builder.build()?;

    let config = match find_data_file(dir, "planner")? {
        Some(path) => load_planner_config(&path)?,
        None => {
            debug!(dir = %dir.display(), "no planner file, using defaults");
            PlannerConfig::default()
        }
    };

    info!(
        units = catalog.unit_count(),
        chains = catalog.chain_count(),
        materials = catalog.material_count(),
        warnings = load_warnings.len(),
        "loaded game data from {}",
        dir.display()
    );

    Ok(GameData {
        catalog,
        config,
        load_warnings,
    })
}

fn resolve_tier(data: TierData) -> EvolutionTier {
    EvolutionTier {
        tier_number: data.tier,
        display_name: data.name,
        stat_multiplier: data.stat_multiplier,
        requirements: Requirements {
            min_level: data.min_level,
            currency_cost: data.currency_cost,
            token_cost: data.token_cost,
            raw_materials: data.materials,
        },
    }
}

/// Compare a tier's declared material count with the recomputed one. The
/// recomputed count wins; a mismatch only produces a warning.
fn check_declared_count(unit: &str, tier: &TierData) -> Option<Diagnostic> {
    let declared = tier.declared_materials?;
    let recomputed: u64 = tier
        .materials
        .iter()
        .map(|raw| u64::from(parse_requirement(raw).quantity))
        .sum();
    if declared == recomputed {
        return None;
    }
    warn!(
        unit,
        tier = tier.tier,
        declared,
        recomputed,
        "declared material count disagrees with requirements, using recomputed count"
    );
    Some(Diagnostic::DeclaredCountMismatch {
        unit: unit.to_string(),
        tier: tier.tier,
        declared,
        recomputed,
    })
}

// ===========================================================================
// Tests
// ===========================================================================
