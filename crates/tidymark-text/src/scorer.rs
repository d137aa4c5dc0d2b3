//! Statistical category scorer — the always-available local classifier.
//!
//! Scoring runs in two passes. The token pass sums, per category, a keyword
//! overlap bonus and the token's TF-IDF weight. The boost pass inspects the
//! raw text for topic keywords, quotation marks and length.

use std::sync::Arc;

use serde::Serialize;
use tidymark_core::{CategoryId, Taxonomy};
use tracing::debug;

use crate::keywords::{contains_any, keyword_sets, CategoryKeywordIndex};
use crate::normalize::normalize;
use crate::tfidf::TfIdfIndex;

const KEYWORD_TOKEN_BONUS: f64 = 1.0;
const TOPIC_BOOST: f64 = 3.0;
const QUOTE_BOOST: f64 = 5.0;
const LONG_TEXT_BOOST: f64 = 2.0;
const LONG_TEXT_CHARS: usize = 500;

const QUOTE_MARKS: &[char] = &['"', '\u{201c}', '\u{201d}'];
const LONG_READ_HINTS: &[&str] = &["read", "article", "interesting"];

/// A category and its accumulated score for one text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredCategory {
    pub category_id: CategoryId,
    pub score: f64,
}

/// TF-IDF + keyword scorer built once per taxonomy.
///
/// Immutable after construction, so one instance can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct StatisticalScorer {
    taxonomy: Arc<Taxonomy>,
    keywords: CategoryKeywordIndex,
    tfidf: TfIdfIndex,
}

impl StatisticalScorer {
    pub fn new(taxonomy: Arc<Taxonomy>) -> Self {
        let keywords = CategoryKeywordIndex::derive(&taxonomy);
        let mut tfidf = TfIdfIndex::new();

        for category in taxonomy.iter() {
            tfidf.add_document(&format!("{} {}", category.name, category.description_text()));
            let joined = keywords.keywords(category.id).join(" ");
            if !joined.is_empty() {
                // Added twice so keyword overlap outweighs the short description.
                tfidf.add_document(&joined);
                tfidf.add_document(&joined);
            }
        }

        debug!(
            "Built statistical scorer: {} categories, {} documents",
            taxonomy.len(),
            tfidf.len()
        );

        Self {
            taxonomy,
            keywords,
            tfidf,
        }
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Pick a category for `text`. Total: falls back to the default category.
    pub fn score(&self, text: &str) -> CategoryId {
        match self.best(text) {
            Some(best) => best.category_id,
            None => self.taxonomy.default_category_id(),
        }
    }

    /// Highest positive score, ties broken by lowest category id.
    ///
    /// `None` when the text normalizes to nothing or nothing scored above zero.
    pub fn best(&self, text: &str) -> Option<ScoredCategory> {
        let best = self
            .scores(text)
            .into_iter()
            .filter(|s| s.score > 0.0)
            .fold(None, |best: Option<ScoredCategory>, candidate| match best {
                Some(b)
                    if b.score > candidate.score
                        || (b.score == candidate.score && b.category_id < candidate.category_id) =>
                {
                    Some(b)
                }
                _ => Some(candidate),
            });

        if let Some(b) = &best {
            let name = self.taxonomy.get(b.category_id).map(|c| c.name.as_str()).unwrap_or("?");
            debug!("Statistical scorer picked {} (score {:.3})", name, b.score);
        }
        best
    }

    /// Final per-category scores in taxonomy order. Empty for blank text.
    pub fn scores(&self, text: &str) -> Vec<ScoredCategory> {
        let tokens = normalize(text);
        if tokens.is_empty() {
            return Vec::new();
        }
        let mut scores = self.token_scores(&tokens);
        self.apply_boosts(text, &mut scores);
        scores
    }

    fn token_scores(&self, tokens: &[String]) -> Vec<ScoredCategory> {
        self.taxonomy
            .iter()
            .enumerate()
            .map(|(position, category)| {
                let score = tokens
                    .iter()
                    .map(|token| {
                        let bonus = if self.keywords.token_matches(category.id, token) {
                            KEYWORD_TOKEN_BONUS
                        } else {
                            0.0
                        };
                        // Document lookup by category position, kept for
                        // compatibility with previously assigned categories.
                        bonus + self.tfidf.tf_idf(token, position)
                    })
                    .sum();
                ScoredCategory {
                    category_id: category.id,
                    score,
                }
            })
            .collect()
    }

    fn apply_boosts(&self, text: &str, scores: &mut [ScoredCategory]) {
        let lower = text.to_lowercase();

        for (label, keywords) in keyword_sets() {
            if !contains_any(&lower, keywords) {
                continue;
            }
            if let Some(category) = self.taxonomy.match_label(label) {
                debug!("Keyword match for topic '{}' → {}", label, category.name);
                add(scores, category.id, TOPIC_BOOST);
            }
        }

        if text.contains(QUOTE_MARKS) {
            if let Some(category) = self.taxonomy.match_label("quotes") {
                debug!("Quotation marks detected, boosting {}", category.name);
                add(scores, category.id, QUOTE_BOOST);
            }
        }

        let length = text.chars().count();
        if length > LONG_TEXT_CHARS {
            let reads = self.taxonomy.iter().find(|c| {
                let name = c.name.to_lowercase();
                LONG_READ_HINTS.iter().any(|hint| name.contains(hint))
            });
            if let Some(category) = reads {
                debug!("Long text ({} chars), boosting {}", length, category.name);
                add(scores, category.id, LONG_TEXT_BOOST);
            }
        }
    }
}

fn add(scores: &mut [ScoredCategory], id: CategoryId, amount: f64) {
    if let Some(entry) = scores.iter_mut().find(|s| s.category_id == id) {
        entry.score += amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tidymark_core::Category;

    fn scorer(categories: Vec<Category>) -> StatisticalScorer {
        StatisticalScorer::new(Arc::new(Taxonomy::new(categories).unwrap()))
    }

    fn quotes_taxonomy() -> StatisticalScorer {
        scorer(vec![
            Category::new(1, "Quotes", Some("")),
            Category::new(2, "Uncategorized", Some("")),
        ])
    }

    #[test]
    fn test_quote_resolves_to_quotes() {
        let s = quotes_taxonomy();
        assert_eq!(s.score("\"Do or do not, there is no try.\""), 1);
    }

    #[test]
    fn test_curly_quotes_boost() {
        let s = quotes_taxonomy();
        assert_eq!(s.score("\u{201c}Stay hungry\u{201d}"), 1);
    }

    #[test]
    fn test_blank_text_returns_default() {
        let s = quotes_taxonomy();
        assert_eq!(s.score(""), 2);
        assert_eq!(s.score("   "), 2);
        assert!(s.best("  ").is_none());
    }

    #[test]
    fn test_default_is_first_without_uncategorized() {
        let s = scorer(vec![Category::new(5, "Misc", None)]);
        assert_eq!(s.score(""), 5);
        assert_eq!(s.score("zzz qqq"), 5);
    }

    #[test]
    fn test_no_signal_returns_default() {
        let s = scorer(vec![
            Category::new(1, "Recipes", None),
            Category::new(2, "Uncategorized", None),
        ]);
        assert_eq!(s.score("lorem ipsum"), 2);
    }

    #[test]
    fn test_hiring_post() {
        let s = StatisticalScorer::new(Arc::new(Taxonomy::builtin()));
        assert_eq!(s.score("We are hiring a remote backend engineer, apply now"), 5);
    }

    #[test]
    fn test_long_text_boost() {
        let s = scorer(vec![
            Category::new(1, "Uncategorized", None),
            Category::new(2, "Interesting Reads", None),
        ]);
        let short = "lorem ipsum ".repeat(4);
        let long = "lorem ipsum ".repeat(50);
        assert!(long.chars().count() > 500);
        assert_eq!(s.score(&short), 1);
        assert_eq!(s.score(&long), 2);
    }

    #[test]
    fn test_tie_breaks_to_lowest_id() {
        let s = scorer(vec![
            Category::new(9, "Alpha", None),
            Category::new(4, "Alpha Two", None),
            Category::new(1, "Uncategorized", None),
        ]);
        // "alpha" overlaps both own-name keyword lists and both TF-IDF slots
        let scores = s.scores("alpha");
        let nine = scores.iter().find(|x| x.category_id == 9).unwrap().score;
        let four = scores.iter().find(|x| x.category_id == 4).unwrap().score;
        assert_eq!(nine, four);
        assert_eq!(s.score("alpha"), 4);
    }

    #[test]
    fn test_deterministic() {
        let s = StatisticalScorer::new(Arc::new(Taxonomy::builtin()));
        let text = "Great blog post about automation scripts for your workflow";
        assert_eq!(s.score(text), s.score(text));
        assert_eq!(s.scores(text), s.scores(text));
    }

    #[test]
    fn test_result_always_in_taxonomy() {
        let s = StatisticalScorer::new(Arc::new(Taxonomy::builtin()));
        for text in ["", "x", "\"", "🚀🚀", "job job job", &"a".repeat(900)] {
            assert!(s.taxonomy().contains(s.score(text)));
        }
    }
}
