//! Query normalization shared by every front end.

/// Characters dropped from a query before it is split into words.
const STRIPPED: &[char] = &['?', '!'];

/// Normalize free-form query text into matcher words.
///
/// Drops question and exclamation marks, lowercases, and splits on whitespace.
#[must_use]
pub fn tokenize_query(text: &str) -> Vec<String> {
    text.replace(STRIPPED, "")
        .to_lowercase()
        .split_whitespace()
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_and_case() {
        assert_eq!(
            tokenize_query("When was Ada Lovelace born?"),
            vec!["when", "was", "ada", "lovelace", "born"]
        );
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(tokenize_query("  bye \t !"), vec!["bye"]);
        assert!(tokenize_query("   ").is_empty());
    }
}
