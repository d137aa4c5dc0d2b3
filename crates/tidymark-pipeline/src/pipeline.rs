//! Ordered classifier chain with single and batch entry points.

use std::sync::Arc;

use tidymark_core::{CategoryId, CategoryStage, Error, Result, Taxonomy};
use tidymark_remote::{ClassifierConfig, RemoteClassifier};
use tidymark_text::StatisticalScorer;
use tracing::{debug, info, warn};

use crate::types::{Categorization, RecategorizeItem, RecategorizeSummary, DEFAULT_METHOD};

/// Categorization chain over one taxonomy.
///
/// Stages are tried in order; the first that returns a category id from the
/// taxonomy wins. Built chains end with the statistical scorer.
pub struct CategorizationPipeline {
    taxonomy: Arc<Taxonomy>,
    stages: Vec<Arc<dyn CategoryStage>>,
}

impl CategorizationPipeline {
    /// Chain of explicit stages. At least one stage is required.
    pub fn from_stages(taxonomy: Arc<Taxonomy>, stages: Vec<Arc<dyn CategoryStage>>) -> Result<Self> {
        if stages.is_empty() {
            return Err(Error::Config("pipeline needs at least one stage".into()));
        }
        let names: Vec<&str> = stages.iter().map(|s| s.name()).collect();
        debug!("Categorization chain: {}", names.join(" → "));
        Ok(Self { taxonomy, stages })
    }

    /// Local scoring only.
    pub fn statistical_only(taxonomy: Taxonomy) -> Self {
        let taxonomy = Arc::new(taxonomy);
        let scorer: Arc<dyn CategoryStage> = Arc::new(StatisticalScorer::new(taxonomy.clone()));
        Self {
            taxonomy,
            stages: vec![scorer],
        }
    }

    /// `remote` first, the statistical scorer as fallback.
    pub fn with_remote(taxonomy: Arc<Taxonomy>, remote: Arc<dyn CategoryStage>) -> Self {
        let scorer: Arc<dyn CategoryStage> = Arc::new(StatisticalScorer::new(taxonomy.clone()));
        Self {
            taxonomy,
            stages: vec![remote, scorer],
        }
    }

    /// Build the chain a configuration allows.
    ///
    /// Without any configured API key the chain is statistical only.
    pub fn from_config(taxonomy: Taxonomy, config: &ClassifierConfig) -> Result<Self> {
        config.engine.validate()?;
        let Some(selection) = config.resolve_provider() else {
            warn!("No classifier API key configured. Using statistical categorization only.");
            return Ok(Self::statistical_only(taxonomy));
        };

        let taxonomy = Arc::new(taxonomy);
        let remote = RemoteClassifier::for_provider(selection, taxonomy.clone(), &config.engine)?;
        Ok(Self::with_remote(taxonomy, Arc::new(remote)))
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Category id for one text. Always a member of the taxonomy.
    pub async fn categorize(&self, text: &str) -> CategoryId {
        self.categorize_detailed(text).await.category_id
    }

    /// Category id, name and deciding stage for one text.
    pub async fn categorize_detailed(&self, text: &str) -> Categorization {
        for stage in &self.stages {
            match stage.classify(text).await {
                Some(id) if self.taxonomy.contains(id) => {
                    debug!("Stage '{}' assigned category {}", stage.name(), id);
                    return self.categorization(id, stage.name());
                }
                Some(id) => {
                    warn!("Stage '{}' returned unknown category {}, ignoring", stage.name(), id);
                }
                None => debug!("Stage '{}' unresolved, trying next", stage.name()),
            }
        }
        self.categorization(self.taxonomy.default_category_id(), DEFAULT_METHOD)
    }

    /// Category ids for many texts, same length and order as `texts`.
    ///
    /// The first stage sees the whole batch. Every slot it leaves unresolved
    /// goes through the full single-item chain. If the batch call fails
    /// outright, every text does.
    pub async fn categorize_batch(&self, texts: &[String]) -> Vec<CategoryId> {
        if texts.is_empty() {
            return Vec::new();
        }

        let first = &self.stages[0];
        let initial = match first.classify_batch(texts).await {
            Ok(slots) if slots.len() == texts.len() => slots,
            Ok(slots) => {
                warn!(
                    "Stage '{}' returned {} results for {} texts, retrying individually",
                    first.name(),
                    slots.len(),
                    texts.len()
                );
                vec![None; texts.len()]
            }
            Err(e) => {
                warn!("Batch classification by '{}' failed: {}. Retrying individually", first.name(), e);
                vec![None; texts.len()]
            }
        };

        let mut results = Vec::with_capacity(texts.len());
        let mut retried = 0usize;
        for (text, slot) in texts.iter().zip(initial) {
            match slot.filter(|id| self.taxonomy.contains(*id)) {
                Some(id) => results.push(id),
                None => {
                    retried += 1;
                    results.push(self.categorize(text).await);
                }
            }
        }

        info!(
            "Categorized {} texts ({} by '{}' batch, {} individually)",
            texts.len(),
            texts.len() - retried,
            first.name(),
            retried
        );
        results
    }

    /// Re-run every stored item and tally the outcome per category.
    pub async fn recategorize(&self, items: &[RecategorizeItem]) -> RecategorizeSummary {
        let texts: Vec<String> = items.iter().map(|i| i.text.clone()).collect();
        let assignments = self.categorize_batch(&texts).await;

        let mut summary = RecategorizeSummary {
            total: items.len(),
            categorized: self.taxonomy.iter().map(|c| (c.id, 0)).collect(),
            ..RecategorizeSummary::default()
        };

        for (item, &id) in items.iter().zip(&assignments) {
            if item.current != Some(id) {
                summary.updated += 1;
            }
            *summary.categorized.entry(id).or_insert(0) += 1;
        }
        summary.assignments = assignments;

        info!(
            "Recategorized {} items, {} changed",
            summary.total, summary.updated
        );
        summary
    }

    fn categorization(&self, id: CategoryId, method: &'static str) -> Categorization {
        let category_name = self
            .taxonomy
            .get(id)
            .map(|c| c.name.clone())
            .unwrap_or_default();
        Categorization {
            category_id: id,
            category_name,
            method,
        }
    }
}
