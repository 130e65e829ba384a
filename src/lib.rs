pub mod config;
pub mod core;
pub mod domain;
pub mod scene;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};

pub use core::{etl::TowerEngine, pipeline::StandardsPipeline};
pub use domain::model::{GradeGroup, MaterialTier, PlacedBlock, Record, TowerPlan};
pub use scene::{BlockInspector, World};
pub use utils::error::{EtlError, Result};
