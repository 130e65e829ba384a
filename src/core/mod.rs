pub mod classifier;
pub mod etl;
pub mod evaluator;
pub mod layout;
pub mod pipeline;
pub mod spawner;
pub mod tower;

pub use crate::domain::model::{PlacedBlock, Record, TowerPlan};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
