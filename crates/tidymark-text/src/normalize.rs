//! Lowercasing tokenizer with English stopword removal.

use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Common English function words dropped before scoring.
pub const STOPWORDS: &[&str] = &[
    "a", "about", "after", "all", "also", "am", "an", "and", "another", "any", "are", "as",
    "at", "be", "because", "been", "before", "being", "between", "both", "but", "by", "came",
    "can", "come", "could", "did", "do", "each", "for", "from", "get", "got", "had", "has",
    "have", "he", "her", "here", "him", "himself", "his", "how", "i", "if", "in", "into", "is",
    "it", "like", "make", "many", "me", "might", "more", "most", "much", "must", "my", "never",
    "now", "of", "on", "only", "or", "other", "our", "out", "over", "said", "same", "see",
    "should", "since", "some", "still", "such", "take", "than", "that", "the", "their", "them",
    "then", "there", "these", "they", "this", "those", "through", "to", "too", "under", "up",
    "very", "was", "way", "we", "well", "were", "what", "where", "which", "while", "who",
    "with", "would", "you", "your",
];

static STOPWORD_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| STOPWORDS.iter().copied().collect());

pub fn is_stopword(token: &str) -> bool {
    STOPWORD_SET.contains(token)
}

/// Lowercase, split on every non-alphanumeric run, drop empties and stopwords.
///
/// An empty result means the text carries no usable signal.
pub fn normalize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty() && !is_stopword(token))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_punctuation_and_case() {
        assert_eq!(
            normalize("\"Do or do NOT, there is no try.\""),
            vec!["not", "no", "try"]
        );
    }

    #[test]
    fn test_emoji_and_hashtags_split() {
        assert_eq!(normalize("Ship it🚀#rustlang"), vec!["ship", "rustlang"]);
    }

    #[test]
    fn test_blank_input() {
        assert!(normalize("").is_empty());
        assert!(normalize("   \n\t").is_empty());
        assert!(normalize("the and of").is_empty());
    }
}
