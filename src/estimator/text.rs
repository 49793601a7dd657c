//! Meal text normalization

/// Lowercase, trim, and collapse whitespace runs into a single space
pub fn normalize_text(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_basic() {
        assert_eq!(normalize_text("  Grilled   CHICKEN\tBreast \n"), "grilled chicken breast");
    }

    #[test]
    fn test_normalize_empty_and_blank() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text(" \t\r\n "), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_text("Two  Eggs\nand TOAST");
        assert_eq!(normalize_text(&once), once);
    }
}
