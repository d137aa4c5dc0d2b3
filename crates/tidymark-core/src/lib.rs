//! Tidymark Core — category taxonomy, classifier stage trait, errors, configuration.

pub mod config;
pub mod error;
pub mod stage;
pub mod taxonomy;

pub use config::EngineConfig;
pub use error::{Error, Result};
pub use stage::CategoryStage;
pub use taxonomy::{names_overlap, Category, CategoryId, Taxonomy, DEFAULT_CATEGORY_NAME};
