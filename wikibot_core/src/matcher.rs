//! Single-pass token matcher.
//!
//! The matcher walks the pattern and the source with two cursors and never
//! backtracks. A `%` that is not the last token stops consuming words when it
//! reaches its anchor, the literal right after it in the pattern. Which
//! occurrence of the anchor counts is decided by [`AnchorSearch`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::pattern::{Pattern, PatternError, Token};

/// Where a non-terminal `%` stops consuming words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorSearch {
    /// Stop at the first occurrence of the anchor literal.
    ///
    /// `x % z` against `x y z z z` reports no match: `%` stops at the first
    /// `z`, the `z` literal consumes it, and the trailing `z z` is left over.
    #[default]
    First,
    /// Stop at the last occurrence of the anchor literal.
    ///
    /// `x % z` against `x y z z z` captures `y z z`.
    Last,
}

impl AnchorSearch {
    fn find<S: AsRef<str>>(self, anchor: &str, words: &[S]) -> Option<usize> {
        match self {
            Self::First => words.iter().position(|w| w.as_ref() == anchor),
            Self::Last => words.iter().rposition(|w| w.as_ref() == anchor),
        }
    }
}

impl fmt::Display for AnchorSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => f.write_str("first"),
            Self::Last => f.write_str("last"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Matcher {
    anchor_search: AnchorSearch,
}

impl Matcher {
    #[must_use]
    pub const fn new(anchor_search: AnchorSearch) -> Self {
        Self { anchor_search }
    }

    #[must_use]
    pub const fn anchor_search(&self) -> AnchorSearch {
        self.anchor_search
    }

    /// Match `source` against `pattern`.
    ///
    /// Returns `None` when they do not match, otherwise one substitution per
    /// wildcard in pattern order. `Some(vec![])` is a successful match of a
    /// pattern without wildcards.
    #[must_use]
    pub fn matches<S: AsRef<str>>(&self, pattern: &Pattern, source: &[S]) -> Option<Vec<String>> {
        let tokens = pattern.tokens();
        let mut captures = Vec::with_capacity(pattern.wildcard_count());
        let mut sind = 0;

        for (pind, token) in tokens.iter().enumerate() {
            match token {
                Token::Literal(word) => {
                    if source.get(sind)?.as_ref() != word {
                        return None;
                    }
                    sind += 1;
                }
                Token::AnyWord => {
                    captures.push(source.get(sind)?.as_ref().to_string());
                    sind += 1;
                }
                Token::AnySeq => {
                    let rest = source.get(sind..)?;
                    let taken = match tokens.get(pind + 1) {
                        None => rest.len(),
                        // Pattern::new guarantees a literal follows a non-terminal `%`.
                        Some(next) => self.anchor_search.find(next.as_literal()?, rest)?,
                    };
                    captures.push(join_words(&rest[..taken]));
                    sind += taken;
                }
            }
        }

        (sind == source.len()).then_some(captures)
    }
}

fn join_words<S: AsRef<str>>(words: &[S]) -> String {
    words
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Match with the default first-anchor search.
#[must_use]
pub fn match_tokens<S: AsRef<str>>(pattern: &Pattern, source: &[S]) -> Option<Vec<String>> {
    Matcher::default().matches(pattern, source)
}

/// Match source-form pattern words (`_`, `%`, literals) against `source`.
///
/// # Errors
/// Returns a [`PatternError`] if the pattern words are malformed.
pub fn match_words<P, S>(pattern: &[P], source: &[S]) -> Result<Option<Vec<String>>, PatternError>
where
    P: AsRef<str>,
    S: AsRef<str>,
{
    let pattern = Pattern::from_words(pattern)?;
    Ok(match_tokens(&pattern, source))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(pattern: &str, source: &str) -> Option<Vec<String>> {
        let Ok(pattern) = pattern.parse::<Pattern>() else {
            panic!("invalid test pattern: {pattern}");
        };
        let source: Vec<&str> = source.split_whitespace().collect();
        match_tokens(&pattern, &source)
    }

    fn last(pattern: &str, source: &str) -> Option<Vec<String>> {
        let Ok(pattern) = pattern.parse::<Pattern>() else {
            panic!("invalid test pattern: {pattern}");
        };
        let source: Vec<&str> = source.split_whitespace().collect();
        Matcher::new(AnchorSearch::Last).matches(&pattern, &source)
    }

    fn some(items: &[&str]) -> Option<Vec<String>> {
        Some(items.iter().map(ToString::to_string).collect())
    }

    #[test]
    fn test_literals() {
        assert_eq!(m("x y z", "x y z"), some(&[]));
        assert_eq!(m("x z z", "x y z"), None);
        assert_eq!(m("x y", "x y z"), None);
        assert_eq!(m("x y z z", "x y z"), None);
    }

    #[test]
    fn test_literals_are_case_sensitive() {
        assert_eq!(m("When", "when"), None);
    }

    #[test]
    fn test_any_word() {
        assert_eq!(m("x _ z", "x y z"), some(&["y"]));
        assert_eq!(m("x _ _", "x y z"), some(&["y", "z"]));
        assert_eq!(m("x _", "x"), None);
    }

    #[test]
    fn test_single_any_word_needs_exactly_one_word() {
        assert_eq!(m("_", "x"), some(&["x"]));
        assert_eq!(m("_", "x y"), None);
        assert_eq!(m("_", ""), None);
    }

    #[test]
    fn test_any_seq() {
        assert_eq!(m("%", "x y z"), some(&["x y z"]));
        assert_eq!(m("x % z", "x y z"), some(&["y"]));
        assert_eq!(m("% z", "x y z"), some(&["x y"]));
        assert_eq!(m("x % y", "x y z"), None);
        assert_eq!(m("x % y z", "x y z"), some(&[""]));
        assert_eq!(m("x y z %", "x y z"), some(&[""]));
        assert_eq!(m("_ %", "x y z"), some(&["x", "y z"]));
        assert_eq!(m("_ _ _ %", "x y z"), some(&["x", "y", "z", ""]));
    }

    #[test]
    fn test_lone_any_seq_matches_empty_source() {
        assert_eq!(m("%", ""), some(&[""]));
    }

    #[test]
    fn test_empty_pattern() {
        assert_eq!(m("", ""), some(&[]));
        assert_eq!(m("", "x"), None);
    }

    #[test]
    fn test_missing_anchor_is_no_match() {
        assert_eq!(m("x % z", "x y w"), None);
        assert_eq!(m("% z", ""), None);
    }

    #[test]
    fn test_first_anchor_gap_is_preserved() {
        assert_eq!(m("x % z", "x y z z z"), None);
        assert_eq!(m("x % z", "x y z z"), None);
    }

    #[test]
    fn test_last_anchor_closes_gap() {
        assert_eq!(last("x % z", "x y z z z"), some(&["y z z"]));
        assert_eq!(last("x % z", "x y z z"), some(&["y z"]));
        assert_eq!(last("x % z", "x y z"), some(&["y"]));
        assert_eq!(last("when was % added to the us", "when was ohio added to the us"), some(&["ohio"]));
    }

    #[test]
    fn test_last_anchor_can_overshoot() {
        // The rightmost `z` leaves nothing for the trailing `_`.
        assert_eq!(last("% z _", "a z b z"), None);
        assert_eq!(m("% z _", "a z b"), some(&["a", "b"]));
    }

    #[test]
    fn test_anchor_search_display_matches_config_names() {
        assert_eq!(AnchorSearch::First.to_string(), "first");
        assert_eq!(AnchorSearch::Last.to_string(), "last");
    }

    #[test]
    fn test_match_words() {
        assert_eq!(match_words(&["x", "%", "z"], &["x", "y", "z"]), Ok(some(&["y"])));
        assert!(match_words(&["%", "_"], &["x"]).is_err());
    }

    #[test]
    fn test_repeatable() {
        let first = m("when was % born", "when was ada lovelace born");
        let second = m("when was % born", "when was ada lovelace born");
        assert_eq!(first, second);
        assert_eq!(first, some(&["ada lovelace"]));
    }
}
