//! Quantity extraction
//!
//! Finds a count written just before a food keyword, e.g. "3 eggs" or
//! "two tacos". Digits are tried before spelled-out numbers.

use regex::Regex;

/// Spelled-out quantities understood before a keyword
const NUMBER_WORDS: [(&str, u32); 10] = [
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
];

/// Quantity used when no count precedes the keyword
pub const DEFAULT_QUANTITY: u32 = 1;

/// Extract the quantity immediately preceding `keyword` in `text`
///
/// The quantity token must start on a word boundary and be separated from
/// the keyword by whitespace. Returns [`DEFAULT_QUANTITY`] when no usable
/// count is found; a zero or out-of-range count counts as not found.
pub fn extract_quantity(text: &str, keyword: &str) -> u32 {
    let escaped = regex::escape(keyword);
    let words = NUMBER_WORDS
        .iter()
        .map(|(word, _)| *word)
        .collect::<Vec<_>>()
        .join("|");

    let patterns = [
        format!(r"(?i)\b([0-9]+)\s+{}", escaped),
        format!(r"(?i)\b({})\s+{}", words, escaped),
    ];

    for pattern in &patterns {
        let re = match Regex::new(pattern) {
            Ok(re) => re,
            Err(e) => {
                tracing::warn!("Skipping quantity pattern '{}': {}", pattern, e);
                continue;
            }
        };

        if let Some(token) = re.captures(text).and_then(|caps| caps.get(1)) {
            if let Some(quantity) = parse_quantity(token.as_str()) {
                return quantity;
            }
            tracing::warn!(
                "Ignoring unusable quantity '{}' before '{}'",
                token.as_str(),
                keyword
            );
        }
    }

    DEFAULT_QUANTITY
}

/// Parse a digit string or number word into a positive count
fn parse_quantity(token: &str) -> Option<u32> {
    let lower = token.to_lowercase();
    if let Some((_, n)) = NUMBER_WORDS.iter().find(|(word, _)| *word == lower) {
        return Some(*n);
    }
    lower.parse::<u32>().ok().filter(|n| *n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_quantity() {
        assert_eq!(extract_quantity("3 eggs", "eggs"), 3);
        assert_eq!(extract_quantity("3 eggs", "egg"), 3);
        assert_eq!(extract_quantity("coffee and 12 almonds", "almonds"), 12);
    }

    #[test]
    fn test_word_quantity() {
        assert_eq!(extract_quantity("two eggs and toast", "eggs"), 2);
        assert_eq!(extract_quantity("ten nuggets", "nuggets"), 10);
        assert_eq!(extract_quantity("Five Tacos", "tacos"), 5);
    }

    #[test]
    fn test_default_when_missing() {
        assert_eq!(extract_quantity("banana", "banana"), 1);
        assert_eq!(extract_quantity("eggs 3", "eggs"), 1);
        assert_eq!(extract_quantity("3eggs", "eggs"), 1);
    }

    #[test]
    fn test_requires_word_boundary() {
        // "often" ends in "ten" but is not a quantity
        assert_eq!(extract_quantity("often eggs", "eggs"), 1);
        assert_eq!(extract_quantity("b12 eggs", "eggs"), 1);
    }

    #[test]
    fn test_multiple_whitespace_between() {
        assert_eq!(extract_quantity("4   pancakes", "pancakes"), 4);
    }

    #[test]
    fn test_first_mention_wins() {
        assert_eq!(extract_quantity("2 eggs then 3 eggs", "eggs"), 2);
    }

    #[test]
    fn test_digits_preferred_over_words() {
        assert_eq!(extract_quantity("two toast and 4 toast", "toast"), 4);
    }

    #[test]
    fn test_zero_and_overflow_fall_back() {
        assert_eq!(extract_quantity("0 eggs", "eggs"), 1);
        assert_eq!(extract_quantity("99999999999 eggs", "eggs"), 1);
        assert_eq!(extract_quantity("0 eggs or three eggs", "eggs"), 3);
    }

    #[test]
    fn test_keyword_with_regex_metacharacters() {
        assert_eq!(extract_quantity("2 c++ cookies", "c++ cookies"), 2);
    }
}
