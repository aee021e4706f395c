pub mod config;
pub mod loader;
pub mod schema;

pub use config::{PlannerConfig, PlannerConfigError};
pub use loader::{DataLoadError, GameData, load_game_data};
