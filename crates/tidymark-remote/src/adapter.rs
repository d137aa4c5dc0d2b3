//! Remote classifier adapter: prompt → completion → category id.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tidymark_core::{CategoryId, CategoryStage, EngineConfig, Error, Result, Taxonomy};
use tracing::{debug, info, warn};

use crate::parse::{first_line, parse_batch};
use crate::prompt::{batch_prompt, single_prompt};
use crate::providers::{CompletionBackend, HttpCompletionBackend};
use crate::types::ProviderSelection;

const SINGLE_MAX_TOKENS: usize = 50;
const BATCH_TOKENS_PER_TEXT: usize = 40;

/// Classifies texts by asking an external model.
///
/// `None` results mean "unresolved": the model answer was unusable or the
/// call failed. Errors never leave this type.
///
/// Successive requests, single or batch, start at least `chunk_delay` apart.
pub struct RemoteClassifier {
    backend: Arc<dyn CompletionBackend>,
    taxonomy: Arc<Taxonomy>,
    batch_size: usize,
    chunk_delay: Duration,
    timeout: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RemoteClassifier {
    pub fn new(backend: Arc<dyn CompletionBackend>, taxonomy: Arc<Taxonomy>, engine: &EngineConfig) -> Self {
        Self {
            backend,
            taxonomy,
            batch_size: engine.batch_size.max(1),
            chunk_delay: engine.chunk_delay(),
            timeout: engine.request_timeout(),
            last_request: Mutex::new(None),
        }
    }

    /// Adapter over the HTTP backend for a resolved provider.
    pub fn for_provider(
        selection: ProviderSelection,
        taxonomy: Arc<Taxonomy>,
        engine: &EngineConfig,
    ) -> Result<Self> {
        engine.validate()?;
        info!(
            "Remote classifier using {} ({})",
            selection.provider, selection.model
        );
        let backend = HttpCompletionBackend::new(selection, engine.request_timeout())?;
        Ok(Self::new(Arc::new(backend), taxonomy, engine))
    }

    /// Override the per-call deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Single-item classification.
    pub async fn classify_text(&self, text: &str) -> Option<CategoryId> {
        let prompt = single_prompt(&self.taxonomy, text);
        let response = match self.complete(&prompt, SINGLE_MAX_TOKENS).await {
            Ok(r) => r,
            Err(e) => {
                warn!("Remote classification failed: {}", e);
                return None;
            }
        };

        debug!("Remote model response: {:?}", response);
        let candidate = first_line(&response)?;
        let resolved = self.taxonomy.resolve_name(candidate);
        match resolved {
            Some(id) => debug!("Mapped '{}' to category {}", candidate, id),
            None => debug!("No category matches '{}', leaving unresolved", candidate),
        }
        resolved
    }

    /// Batch classification. One slot per input text, in input order.
    ///
    /// Texts are sent in chunks of `batch_size`. A failed chunk leaves only
    /// its own slots unresolved.
    pub async fn classify_texts(&self, texts: &[String]) -> Vec<Option<CategoryId>> {
        let mut results = Vec::with_capacity(texts.len());

        for (n, chunk) in texts.chunks(self.batch_size).enumerate() {
            match self.classify_chunk(chunk).await {
                Ok(slots) => results.extend(slots),
                Err(e) => {
                    warn!(
                        "Remote batch chunk {} ({} texts) failed: {}",
                        n,
                        chunk.len(),
                        e
                    );
                    results.extend(std::iter::repeat(None).take(chunk.len()));
                }
            }
        }

        let resolved = results.iter().filter(|r| r.is_some()).count();
        info!(
            "Remote batch resolved {}/{} texts",
            resolved,
            texts.len()
        );
        results
    }

    async fn classify_chunk(&self, chunk: &[String]) -> Result<Vec<Option<CategoryId>>> {
        let prompt = batch_prompt(&self.taxonomy, chunk);
        let response = self
            .complete(&prompt, BATCH_TOKENS_PER_TEXT * chunk.len() + 32)
            .await?;
        debug!("Remote batch response: {:?}", response);

        Ok(parse_batch(&response, chunk.len())
            .into_iter()
            .map(|name| name.and_then(|n| self.taxonomy.resolve_name(&n)))
            .collect())
    }

    /// Wait until `chunk_delay` has passed since the previous request started.
    async fn pace(&self) {
        if self.chunk_delay.is_zero() {
            return;
        }
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            tokio::time::sleep_until(previous + self.chunk_delay).await;
        }
        *last = Some(Instant::now());
    }

    async fn complete(&self, prompt: &str, max_tokens: usize) -> Result<String> {
        self.pace().await;
        tokio::time::timeout(self.timeout, self.backend.complete(prompt, max_tokens))
            .await
            .map_err(|_| Error::Http(format!("timed out after {:?}", self.timeout)))?
    }
}

#[async_trait]
impl CategoryStage for RemoteClassifier {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn classify(&self, text: &str) -> Option<CategoryId> {
        self.classify_text(text).await
    }

    async fn classify_batch(&self, texts: &[String]) -> Result<Vec<Option<CategoryId>>> {
        Ok(self.classify_texts(texts).await)
    }
}
