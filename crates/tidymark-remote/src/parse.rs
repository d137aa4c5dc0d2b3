//! Best-effort parsing of model answers.
//!
//! Models are asked for a bare category name (single mode) or a JSON object
//! (batch mode) but routinely wrap answers in code fences, prose or numbered
//! lists. Nothing here fails: unusable parts simply become `None`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static CODE_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"```[A-Za-z0-9_-]*").unwrap());
static ORDINAL_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)\s*[.)]\s*").unwrap());

/// First non-empty line of a single-mode answer.
pub fn first_line(response: &str) -> Option<&str> {
    response.lines().map(str::trim).find(|line| !line.is_empty())
}

/// Category names for a chunk of `len` texts, one slot per text.
///
/// Tries the structured `{"results": [...]}` form first and falls back to
/// reading one name per line.
pub fn parse_batch(response: &str, len: usize) -> Vec<Option<String>> {
    let cleaned = strip_code_fences(response);
    parse_structured(&cleaned, len).unwrap_or_else(|| parse_lines(&cleaned, len))
}

pub fn strip_code_fences(response: &str) -> String {
    CODE_FENCE.replace_all(response, "").into_owned()
}

/// Parse the outermost `{...}` span. `None` if there is no usable object.
pub fn parse_structured(response: &str, len: usize) -> Option<Vec<Option<String>>> {
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    if end < start {
        return None;
    }
    let value: Value = serde_json::from_str(&response[start..=end]).ok()?;
    let results = value.get("results")?.as_array()?;

    let mut slots = vec![None; len];
    for entry in results {
        let Some(index) = entry.get("index").and_then(Value::as_u64) else {
            continue;
        };
        let index = index as usize;
        if index == 0 || index > len {
            continue;
        }
        if let Some(category) = entry.get("category").and_then(Value::as_str) {
            let category = category.trim();
            if !category.is_empty() {
                slots[index - 1] = Some(category.to_string());
            }
        }
    }
    Some(slots)
}

/// One name per line. A `"N. "` prefix picks slot `N`; unnumbered lines
/// fill the slot after the previous one.
pub fn parse_lines(response: &str, len: usize) -> Vec<Option<String>> {
    let mut slots = vec![None; len];
    let mut next = 0usize;

    for line in response.lines().map(str::trim).filter(|line| !line.is_empty()) {
        let (slot, name) = match ORDINAL_PREFIX.captures(line) {
            Some(caps) => {
                let Some(n) = caps[1].parse::<usize>().ok().filter(|n| (1..=len).contains(n)) else {
                    continue;
                };
                (n - 1, line[caps[0].len()..].trim())
            }
            None => (next, line),
        };
        if slot >= len {
            continue;
        }
        if !name.is_empty() {
            slots[slot] = Some(name.to_string());
        }
        next = slot + 1;
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_line() {
        assert_eq!(first_line("\n  Career Tips  \nbecause it mentions jobs"), Some("Career Tips"));
        assert_eq!(first_line("   \n\n"), None);
    }

    #[test]
    fn test_plain_json() {
        let answer = r#"{"results": [{"index": 2, "category": "Quotes"}, {"index": 1, "category": "Career Tips"}]}"#;
        assert_eq!(
            parse_batch(answer, 2),
            vec![Some("Career Tips".to_string()), Some("Quotes".to_string())]
        );
    }

    #[test]
    fn test_fenced_json_with_prose() {
        let answer = "Sure! Here you go:\n```json\n{\"results\": [{\"index\": 1, \"category\": \"Quotes\"}]}\n```\nLet me know.";
        assert_eq!(parse_batch(answer, 2), vec![Some("Quotes".to_string()), None]);
    }

    #[test]
    fn test_bad_indices_ignored() {
        let answer = r#"{"results": [
            {"index": 0, "category": "A"},
            {"index": 9, "category": "B"},
            {"index": "two", "category": "C"},
            {"index": -1, "category": "D"},
            {"category": "E"},
            {"index": 3, "category": "Quotes"}
        ]}"#;
        assert_eq!(parse_batch(answer, 3), vec![None, None, Some("Quotes".to_string())]);
    }

    #[test]
    fn test_line_fallback() {
        let answer = "1. Quotes\n2) Career Tips\n\nJob Opportunities";
        assert_eq!(
            parse_batch(answer, 4),
            vec![
                Some("Quotes".to_string()),
                Some("Career Tips".to_string()),
                Some("Job Opportunities".to_string()),
                None,
            ]
        );
    }

    #[test]
    fn test_numbered_lines_keep_their_slot() {
        let answer = "1. Quotes\n\n3. Career Tips\n4.\n5) Job Opportunities\n9. Recipes";
        assert_eq!(
            parse_lines(answer, 5),
            vec![
                Some("Quotes".to_string()),
                None,
                Some("Career Tips".to_string()),
                None,
                Some("Job Opportunities".to_string()),
            ]
        );
    }

    #[test]
    fn test_unnumbered_line_follows_numbered_one() {
        let answer = "2. Quotes\nCareer Tips\nExtra line";
        assert_eq!(
            parse_lines(answer, 3),
            vec![None, Some("Quotes".to_string()), Some("Career Tips".to_string())]
        );
    }

    #[test]
    fn test_broken_json_falls_back_to_lines() {
        let answer = "{\"results\": [\n1. Quotes";
        let slots = parse_batch(answer, 2);
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0], Some("Quotes".to_string()));
        assert_eq!(slots[1], None);
    }

    #[test]
    fn test_empty_answer() {
        assert_eq!(parse_batch("", 3), vec![None, None, None]);
        assert!(parse_batch("", 0).is_empty());
    }
}
