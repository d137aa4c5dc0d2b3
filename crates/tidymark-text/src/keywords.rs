//! Topic keyword table and its projection onto a category taxonomy.

use std::collections::HashMap;

use tidymark_core::{names_overlap, CategoryId, Taxonomy};

/// Topic label → keyword substrings. Order matters: the first overlapping
/// topic wins when a category is indexed.
const KEYWORD_SETS: &[(&str, &[&str])] = &[
    ("quotes", &[
        "\"", "\u{201c}", "\u{201d}", "said ", "says ", "quote", "quotes", "saying", "wisdom",
        "inspirational", "motivational", "words", "phrase", "proverb", "famous", "speech",
        "cited", "told", "statement", "words of wisdom",
    ]),
    ("automation tools", &[
        "tool", "automation", "script", "app ", "platform", "software", "bot", "workflow",
        "efficiency", "productivity", "code", "programming", "tech",
    ]),
    ("career tips", &[
        "job", "career", "work", "interview", "resume", "hire", "hiring", "professional",
        "promotion", "workplace", "skills", "networking", "leadership", "management", "salary",
        "negotiation", "job search", "cv", "linkedin", "professional development", "mentorship",
        "coaching",
    ]),
    ("interesting reads", &[
        "read", "article", "blog", "post", "interesting", "fascinating", "story", "book",
        "novel", "publication", "magazine", "journal",
    ]),
    ("content ideas", &[
        "idea", "content", "blog", "post", "article", "write", "writing", "topic", "inspiration",
        "creative", "create", "concept",
    ]),
    ("job opportunities", &[
        "hiring", "looking for", "seeking", "recruiting", "job opening", "position available",
        "we are hiring", "join our team", "apply now", "intern", "internship", "full-time",
        "part-time", "remote", "on-site", "contract", "freelance", "opportunity", "vacancy",
        "talent", "candidate", "role", "dm me", "send resume", "cv", "portfolio", "opening",
        "job search", "employment", "work opportunity", "join us",
    ]),
    ("general knowledge", &[
        "fact", "trivia", "knowledge", "learn", "know", "education", "history", "science",
        "culture", "information", "data", "study", "research", "discover", "interesting fact",
        "did you know",
    ]),
];

/// The static topic table.
pub fn keyword_sets() -> &'static [(&'static str, &'static [&'static str])] {
    KEYWORD_SETS
}

/// True if the lowercase `haystack` contains any of `keywords`.
pub fn contains_any(haystack_lower: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| haystack_lower.contains(&kw.to_lowercase()))
}

/// Per-category keyword lists derived from [`keyword_sets`].
///
/// Must be rebuilt whenever the taxonomy changes.
#[derive(Debug, Clone)]
pub struct CategoryKeywordIndex {
    by_category: HashMap<CategoryId, Vec<String>>,
}

impl CategoryKeywordIndex {
    /// Assign each category the first topic whose label overlaps its name,
    /// or its own lowercased name when none does.
    pub fn derive(taxonomy: &Taxonomy) -> Self {
        let by_category = taxonomy
            .iter()
            .map(|category| {
                let name = category.name.to_lowercase();
                let keywords = keyword_sets()
                    .iter()
                    .find(|(label, _)| names_overlap(&name, label))
                    .map(|(_, kws)| kws.iter().map(|k| k.to_string()).collect())
                    .unwrap_or_else(|| vec![name.clone()]);
                (category.id, keywords)
            })
            .collect();

        Self { by_category }
    }

    pub fn keywords(&self, id: CategoryId) -> &[String] {
        self.by_category.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Token/keyword overlap in either direction.
    pub fn token_matches(&self, id: CategoryId, token: &str) -> bool {
        self.keywords(id)
            .iter()
            .any(|kw| kw.contains(token) || token.contains(kw.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tidymark_core::Category;

    #[test]
    fn test_derive_exact_and_substring() {
        let taxonomy = Taxonomy::new(vec![
            Category::new(1, "Career Tips", None),
            Category::new(2, "Good Quotes", None),
            Category::new(3, "Knowledge", None),
            Category::new(4, "Recipes", None),
        ])
        .unwrap();
        let index = CategoryKeywordIndex::derive(&taxonomy);

        assert!(index.keywords(1).iter().any(|k| k == "interview"));
        assert!(index.keywords(2).iter().any(|k| k == "proverb"));
        // "general knowledge" contains "knowledge"
        assert!(index.keywords(3).iter().any(|k| k == "trivia"));
        assert_eq!(index.keywords(4), &["recipes".to_string()]);
        assert!(index.keywords(99).is_empty());
    }

    #[test]
    fn test_token_matches_both_directions() {
        let taxonomy = Taxonomy::new(vec![Category::new(1, "Interesting Reads", None)]).unwrap();
        let index = CategoryKeywordIndex::derive(&taxonomy);
        assert!(index.token_matches(1, "reading"));
        assert!(index.token_matches(1, "boo"));
        assert!(!index.token_matches(1, "zebra"));
    }

    #[test]
    fn test_topic_table_order() {
        let labels: Vec<&str> = keyword_sets().iter().map(|(label, _)| *label).collect();
        assert_eq!(labels.len(), 7);
        assert_eq!(labels[0], "quotes");
        assert_eq!(labels[6], "general knowledge");
        assert!(keyword_sets()[0].1.contains(&"\u{201c}"));
    }

    #[test]
    fn test_contains_any() {
        assert!(contains_any("we are hiring now", &["hiring"]));
        assert!(!contains_any("nothing here", &["hiring", "job"]));
    }
}
