//! Pipeline result types.

use std::collections::BTreeMap;

use serde::Serialize;
use tidymark_core::CategoryId;

/// Method reported when no stage decided.
pub const DEFAULT_METHOD: &str = "default";

/// A categorization with the category name and the stage that decided it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Categorization {
    pub category_id: CategoryId,
    pub category_name: String,
    /// Stage name (`"remote"`, `"statistical"`) or `"default"`.
    pub method: &'static str,
}

/// One stored bookmark to re-run through the pipeline.
#[derive(Debug, Clone)]
pub struct RecategorizeItem {
    pub current: Option<CategoryId>,
    pub text: String,
}

/// Outcome of a recategorization run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecategorizeSummary {
    pub total: usize,
    /// Items whose category changed (or had none before).
    pub updated: usize,
    /// Items per category after the run; every taxonomy id is present.
    pub categorized: BTreeMap<CategoryId, usize>,
    /// New category per input item, in input order.
    pub assignments: Vec<CategoryId>,
}
