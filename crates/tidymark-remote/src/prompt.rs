//! Prompt construction for single and batch classification.

use tidymark_core::Taxonomy;

fn category_list(taxonomy: &Taxonomy) -> String {
    taxonomy
        .iter()
        .map(|c| format!("- {}: {}", c.name, c.description_text()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Ask for exactly one category name.
pub fn single_prompt(taxonomy: &Taxonomy, text: &str) -> String {
    format!(
        "You are a bookmark categorization assistant. Given the following text, \
categorize it into one of these categories:\n\n{}\n\nText to categorize: \"{}\"\n\n\
Respond with ONLY the category name, nothing else.",
        category_list(taxonomy),
        text
    )
}

/// Ask for one JSON object covering every numbered text.
pub fn batch_prompt(taxonomy: &Taxonomy, texts: &[String]) -> String {
    let numbered = texts
        .iter()
        .enumerate()
        .map(|(i, t)| format!("{}. \"{}\"", i + 1, t.replace('\n', " ")))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a bookmark categorization assistant. Categorize each of the following \
{} texts into one of these categories:\n\n{}\n\nTexts to categorize:\n{}\n\n\
Respond with ONLY a JSON object of the form \
{{\"results\": [{{\"index\": 1, \"category\": \"<category name>\"}}]}} \
containing one entry per text, using the text numbers above as indices.",
        texts.len(),
        category_list(taxonomy),
        numbered
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tidymark_core::Category;

    fn taxonomy() -> Taxonomy {
        Taxonomy::new(vec![
            Category::new(1, "Quotes", Some("Memorable sayings")),
            Category::new(2, "Uncategorized", None),
        ])
        .unwrap()
    }

    #[test]
    fn test_single_prompt_lists_categories() {
        let prompt = single_prompt(&taxonomy(), "hello world");
        assert!(prompt.contains("- Quotes: Memorable sayings"));
        assert!(prompt.contains("- Uncategorized: "));
        assert!(prompt.contains("Text to categorize: \"hello world\""));
    }

    #[test]
    fn test_batch_prompt_numbers_texts() {
        let texts = vec!["first\npost".to_string(), "second".to_string()];
        let prompt = batch_prompt(&taxonomy(), &texts);
        assert!(prompt.contains("1. \"first post\""));
        assert!(prompt.contains("2. \"second\""));
        assert!(prompt.contains("{\"results\": [{\"index\": 1"));
    }
}
