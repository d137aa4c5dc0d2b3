//! Remote category classification through an external LLM.
//!
//! The adapter builds a prompt from the taxonomy, sends it to a chat
//! completion API and maps the free-text answer back to a category id.
//! Every failure is absorbed here and reported as "unresolved" (`None`).

pub mod adapter;
pub mod config;
pub mod parse;
pub mod prompt;
pub mod providers;
pub mod types;

pub use adapter::RemoteClassifier;
pub use config::ClassifierConfig;
pub use providers::{CompletionBackend, HttpCompletionBackend};
pub use types::*;
