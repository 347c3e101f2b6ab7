//! Pattern tokens and validated patterns.
//!
//! A pattern is written as whitespace-separated words where `_` stands for
//! exactly one word and `%` for any run of words (possibly none). Every other
//! word is a literal that must appear verbatim in the query.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Source form of the single-word wildcard.
pub const ANY_WORD: &str = "_";

/// Source form of the multi-word wildcard.
pub const ANY_SEQ: &str = "%";

/// One element of a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// Must equal the source word exactly (case-sensitive).
    Literal(String),
    /// Captures exactly one source word.
    AnyWord,
    /// Captures zero or more consecutive source words.
    AnySeq,
}

impl Token {
    /// Classify a source-form word.
    #[must_use]
    pub fn parse(word: &str) -> Self {
        match word {
            ANY_WORD => Self::AnyWord,
            ANY_SEQ => Self::AnySeq,
            other => Self::Literal(other.to_string()),
        }
    }

    #[must_use]
    pub const fn is_wildcard(&self) -> bool {
        matches!(self, Self::AnyWord | Self::AnySeq)
    }

    /// The literal text, if this is a literal token.
    #[must_use]
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Self::Literal(word) => Some(word),
            Self::AnyWord | Self::AnySeq => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(word) => f.write_str(word),
            Self::AnyWord => f.write_str(ANY_WORD),
            Self::AnySeq => f.write_str(ANY_SEQ),
        }
    }
}

/// Errors raised while building a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("empty token at position {0}")]
    EmptyToken(usize),

    #[error("token at position {position} contains whitespace: {token:?}")]
    Whitespace { position: usize, token: String },

    /// A non-terminal `%` needs a literal after it to know where to stop.
    #[error("'%' at position {position} must be followed by a literal word, found '{found}'")]
    MissingAnchor { position: usize, found: Token },

    #[error("literal at position {position} is the wildcard '{token}'")]
    ReservedLiteral { position: usize, token: String },
}

/// An immutable, validated sequence of tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Pattern {
    tokens: Vec<Token>,
}

impl Pattern {
    /// Build a pattern from already classified tokens.
    ///
    /// # Errors
    /// Returns [`PatternError::MissingAnchor`] when `%` is directly followed by
    /// another wildcard, and [`PatternError::EmptyToken`] /
    /// [`PatternError::Whitespace`] for literals that could never match a
    /// tokenized word. A literal spelled `_` or `%` is
    /// [`PatternError::ReservedLiteral`], since it would print as a wildcard.
    pub fn new(tokens: Vec<Token>) -> Result<Self, PatternError> {
        for (position, token) in tokens.iter().enumerate() {
            if let Token::Literal(word) = token {
                if word.is_empty() {
                    return Err(PatternError::EmptyToken(position));
                }
                if word.chars().any(char::is_whitespace) {
                    return Err(PatternError::Whitespace {
                        position,
                        token: word.clone(),
                    });
                }
                if word == ANY_WORD || word == ANY_SEQ {
                    return Err(PatternError::ReservedLiteral {
                        position,
                        token: word.clone(),
                    });
                }
            }
        }

        for (position, pair) in tokens.windows(2).enumerate() {
            if pair[0] == Token::AnySeq && pair[1].is_wildcard() {
                return Err(PatternError::MissingAnchor {
                    position,
                    found: pair[1].clone(),
                });
            }
        }

        Ok(Self { tokens })
    }

    /// Build a pattern from source-form words (`_` and `%` are wildcards).
    ///
    /// # Errors
    /// See [`Pattern::new`].
    pub fn from_words<I, S>(words: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(
            words
                .into_iter()
                .map(|w| Token::parse(w.as_ref()))
                .collect(),
        )
    }

    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of substitutions a successful match produces.
    #[must_use]
    pub fn wildcard_count(&self) -> usize {
        self.tokens.iter().filter(|t| t.is_wildcard()).count()
    }
}

impl FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_words(s.split_whitespace())
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}
