//! Classifier stage trait shared by every link of the categorization chain.

use async_trait::async_trait;

use crate::error::Result;
use crate::taxonomy::CategoryId;

/// One classifier in the categorization chain.
///
/// `None` means the stage could not decide and the next stage should try.
#[async_trait]
pub trait CategoryStage: Send + Sync {
    /// Short stable name used in logs and categorization reports.
    fn name(&self) -> &'static str;

    async fn classify(&self, text: &str) -> Option<CategoryId>;

    /// Classify many texts at once. The result has one slot per input, in order.
    ///
    /// An `Err` means the whole batch failed; callers retry item by item.
    async fn classify_batch(&self, texts: &[String]) -> Result<Vec<Option<CategoryId>>> {
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            out.push(self.classify(text).await);
        }
        Ok(out)
    }
}
