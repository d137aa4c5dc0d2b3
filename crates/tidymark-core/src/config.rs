//! Engine tuning knobs shared by the remote adapter and the pipeline.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};

pub const DEFAULT_BATCH_SIZE: usize = 10;
pub const DEFAULT_CHUNK_DELAY_MS: u64 = 500;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Batch and timeout settings for remote classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Texts per remote request in batch mode.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Minimum spacing between successive chunk requests.
    #[serde(default = "default_chunk_delay_ms")]
    pub chunk_delay_ms: u64,
    /// Per-request timeout for the remote service.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}
fn default_chunk_delay_ms() -> u64 {
    DEFAULT_CHUNK_DELAY_MS
}
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            chunk_delay_ms: DEFAULT_CHUNK_DELAY_MS,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl EngineConfig {
    /// Apply `TIDYMARK_*` environment overrides on top of `self`.
    ///
    /// Unparseable values are ignored with a warning.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(v) = env_number("TIDYMARK_BATCH_SIZE") {
            self.batch_size = v as usize;
        }
        if let Some(v) = env_number("TIDYMARK_CHUNK_DELAY_MS") {
            self.chunk_delay_ms = v;
        }
        if let Some(v) = env_number("TIDYMARK_TIMEOUT_SECS") {
            self.request_timeout_secs = v;
        }
        self
    }

    /// Reject settings the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::Config("batch_size must be at least 1".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(Error::Config("request_timeout_secs must be at least 1".into()));
        }
        Ok(())
    }

    pub fn chunk_delay(&self) -> Duration {
        Duration::from_millis(self.chunk_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn env_number(key: &str) -> Option<u64> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("Ignoring {}={:?}: not a number", key, raw);
            None
        }
    }
}
