//! Category taxonomy supplied by the bookmark store.
//!
//! A taxonomy is immutable for the duration of a categorization run. All
//! name lookups are case-insensitive.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Stable category identifier as stored by the caller.
pub type CategoryId = i64;

/// Name of the conventional fallback category.
pub const DEFAULT_CATEGORY_NAME: &str = "Uncategorized";

/// A user-defined bookmark category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Category {
    pub fn new(id: CategoryId, name: impl Into<String>, description: Option<&str>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.map(str::to_string),
        }
    }

    /// Description text, empty when none was supplied.
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

/// The full, ordered set of categories available for assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Taxonomy {
    categories: Vec<Category>,
    default_id: CategoryId,
}

impl Taxonomy {
    /// Build a taxonomy. Fails on an empty list or duplicate ids.
    pub fn new(categories: Vec<Category>) -> Result<Self> {
        let first = categories
            .first()
            .ok_or_else(|| Error::Taxonomy("taxonomy must contain at least one category".into()))?;

        let mut seen = HashSet::new();
        for category in &categories {
            if !seen.insert(category.id) {
                return Err(Error::Taxonomy(format!(
                    "duplicate category id {}",
                    category.id
                )));
            }
        }

        let default_id = categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(DEFAULT_CATEGORY_NAME))
            .map(|c| c.id)
            .unwrap_or(first.id);

        Ok(Self {
            categories,
            default_id,
        })
    }

    /// Parse a taxonomy from a JSON array of `{id, name, description}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let categories: Vec<Category> = serde_json::from_str(json)?;
        Self::new(categories)
    }

    /// The standard bookmark categories shipped with the application.
    pub fn builtin() -> Self {
        let categories = vec![
            Category::new(1, "Content Ideas", Some("Ideas and inspiration for creating content")),
            Category::new(2, "Automation Tools", Some("Tools, apps and scripts that save time")),
            Category::new(3, "Interesting Reads", Some("Articles, threads and stories worth reading")),
            Category::new(4, "Career Tips", Some("Advice on jobs, interviews and professional growth")),
            Category::new(5, "Job Opportunities", Some("Open roles, hiring posts and gigs")),
            Category::new(6, "Good Quotes", Some("Memorable quotes and sayings")),
            Category::new(7, "Knowledge/Trivia", Some("Facts, trivia and general knowledge")),
            Category::new(8, DEFAULT_CATEGORY_NAME, Some("Everything else")),
        ];
        Self {
            categories,
            default_id: 8,
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Category> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn get(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: CategoryId) -> bool {
        self.get(id).is_some()
    }

    /// The "Uncategorized" category, or the first category when none is named so.
    pub fn default_category_id(&self) -> CategoryId {
        self.default_id
    }

    /// Exact, case-insensitive name match.
    pub fn find_by_name(&self, name: &str) -> Option<&Category> {
        let needle = name.to_lowercase();
        self.categories
            .iter()
            .find(|c| c.name.to_lowercase() == needle)
    }

    /// Substring match in either direction, case-insensitive.
    pub fn find_by_partial_name(&self, name: &str) -> Option<&Category> {
        let needle = name.to_lowercase();
        self.categories.iter().find(|c| {
            let own = c.name.to_lowercase();
            own.contains(&needle) || needle.contains(&own)
        })
    }

    /// Map a free-text category name (e.g. a model answer) to an id.
    ///
    /// Exact matches win over partial ones. Blank names never resolve.
    pub fn resolve_name(&self, name: &str) -> Option<CategoryId> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        self.find_by_name(name)
            .or_else(|| self.find_by_partial_name(name))
            .map(|c| c.id)
    }

    /// First category whose name equals, contains, or is contained by `label`.
    pub fn match_label(&self, label: &str) -> Option<&Category> {
        let label = label.to_lowercase();
        self.categories.iter().find(|c| names_overlap(&c.name.to_lowercase(), &label))
    }
}

/// Fuzzy name rule shared by keyword indexing and score boosts.
///
/// Both arguments must already be lowercase.
pub fn names_overlap(category_name: &str, label: &str) -> bool {
    category_name == label || category_name.contains(label) || label.contains(category_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Taxonomy {
        Taxonomy::new(vec![
            Category::new(3, "Good Quotes", None),
            Category::new(7, "Career Tips", Some("jobs and interviews")),
            Category::new(9, "uncategorized", None),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_taxonomy_rejected() {
        assert!(matches!(Taxonomy::new(vec![]), Err(Error::Taxonomy(_))));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = Taxonomy::new(vec![
            Category::new(1, "A", None),
            Category::new(1, "B", None),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_default_is_uncategorized_case_insensitive() {
        assert_eq!(sample().default_category_id(), 9);
    }

    #[test]
    fn test_default_falls_back_to_first() {
        let taxonomy = Taxonomy::new(vec![
            Category::new(5, "Misc", None),
            Category::new(6, "Other", None),
        ])
        .unwrap();
        assert_eq!(taxonomy.default_category_id(), 5);
    }

    #[test]
    fn test_resolve_name_exact_then_partial() {
        let taxonomy = sample();
        assert_eq!(taxonomy.resolve_name("career tips"), Some(7));
        assert_eq!(taxonomy.resolve_name("Quotes"), Some(3));
        assert_eq!(taxonomy.resolve_name("Career Tips and Tricks"), Some(7));
        assert_eq!(taxonomy.resolve_name("Recipes"), None);
        assert_eq!(taxonomy.resolve_name("   "), None);
    }

    #[test]
    fn test_match_label() {
        let taxonomy = sample();
        assert_eq!(taxonomy.match_label("quotes").map(|c| c.id), Some(3));
        assert_eq!(taxonomy.match_label("career tips").map(|c| c.id), Some(7));
        assert!(taxonomy.match_label("job opportunities").is_none());
    }

    #[test]
    fn test_from_json() {
        let taxonomy = Taxonomy::from_json(
            r#"[{"id": 1, "name": "Quotes", "description": null}, {"id": 2, "name": "Uncategorized"}]"#,
        )
        .unwrap();
        assert_eq!(taxonomy.len(), 2);
        assert_eq!(taxonomy.default_category_id(), 2);
        assert_eq!(taxonomy.get(1).unwrap().description_text(), "");
    }

    #[test]
    fn test_builtin() {
        let taxonomy = Taxonomy::builtin();
        assert_eq!(taxonomy.len(), 8);
        assert_eq!(taxonomy.default_category_id(), 8);
        assert_eq!(taxonomy.find_by_name("good quotes").map(|c| c.id), Some(6));
    }
}
