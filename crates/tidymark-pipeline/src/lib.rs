//! Tidymark Pipeline — turns post text into a category id.
//!
//! Stages run in order until one decides. The statistical scorer always
//! decides, so the pipeline's answer is total: every text gets a category
//! from the supplied taxonomy.

pub mod pipeline;
pub mod types;

pub use pipeline::CategorizationPipeline;
pub use types::*;
