use std::fmt;

use thiserror::Error;
use tracing::debug;

use super::Action;
use crate::pattern::{Pattern, PatternError};

#[derive(Debug, Error)]
#[error("rule {index} '{pattern}' is malformed: {source}")]
pub struct RuleError {
    pub index: usize,
    pub pattern: String,
    #[source]
    pub source: PatternError,
}

/// A pattern paired with the action it triggers.
pub struct Rule {
    pattern: Pattern,
    action: Box<dyn Action>,
}

impl Rule {
    #[must_use]
    pub fn new(pattern: Pattern, action: Box<dyn Action>) -> Self {
        Self { pattern, action }
    }

    #[must_use]
    pub const fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    #[must_use]
    pub fn action(&self) -> &dyn Action {
        self.action.as_ref()
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("pattern", &self.pattern.to_string())
            .field("action", &self.action.name())
            .finish()
    }
}

/// Ordered rules; earlier rules take priority.
#[derive(Debug, Default)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    #[must_use]
    pub fn builder() -> RuleTableBuilder {
        RuleTableBuilder::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Collects rules in declaration order and validates their patterns.
#[derive(Default)]
pub struct RuleTableBuilder {
    entries: Vec<(String, Result<Pattern, PatternError>, Box<dyn Action>)>,
}

impl RuleTableBuilder {
    /// Append a rule written in source form, e.g. `"when was % born"`.
    #[must_use]
    pub fn rule<A: Action + 'static>(mut self, pattern: &str, action: A) -> Self {
        self.entries
            .push((pattern.to_string(), pattern.parse(), Box::new(action)));
        self
    }

    /// Finish the table, failing on the first malformed pattern.
    pub fn build(self) -> Result<RuleTable, RuleError> {
        let mut rules = Vec::with_capacity(self.entries.len());
        for (index, (text, pattern, action)) in self.entries.into_iter().enumerate() {
            let pattern = pattern.map_err(|source| RuleError {
                index,
                pattern: text,
                source,
            })?;
            debug!("Registering rule {index}: '{pattern}' -> {}", action.name());
            rules.push(Rule::new(pattern, action));
        }
        Ok(RuleTable { rules })
    }
}
