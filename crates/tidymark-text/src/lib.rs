//! Tidymark Text — local, deterministic categorization.
//!
//! Normalizes post bodies, derives per-category keyword lists from a fixed
//! topic table, and scores text against every category with TF-IDF plus
//! keyword and heuristic boosts. No network I/O happens here.

pub mod keywords;
pub mod normalize;
pub mod scorer;
pub mod stage;
pub mod tfidf;

pub use keywords::{keyword_sets, CategoryKeywordIndex};
pub use normalize::normalize;
pub use scorer::{ScoredCategory, StatisticalScorer};
pub use tfidf::TfIdfIndex;
