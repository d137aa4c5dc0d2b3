//! The statistical scorer as the terminal link of a categorization chain.

use async_trait::async_trait;
use tidymark_core::{CategoryId, CategoryStage, Result};

use crate::scorer::StatisticalScorer;

#[async_trait]
impl CategoryStage for StatisticalScorer {
    fn name(&self) -> &'static str {
        "statistical"
    }

    /// Never unresolved: blank or signal-free text maps to the default category.
    async fn classify(&self, text: &str) -> Option<CategoryId> {
        Some(self.score(text))
    }

    async fn classify_batch(&self, texts: &[String]) -> Result<Vec<Option<CategoryId>>> {
        Ok(texts.iter().map(|t| Some(self.score(t))).collect())
    }
}
