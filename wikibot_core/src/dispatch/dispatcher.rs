//! Routes a tokenized query to the first rule whose pattern matches it.

use tracing::{debug, info};

use super::{ActionError, ActionOutcome, Rule, RuleTable};
use crate::matcher::{AnchorSearch, Matcher};

pub struct Dispatcher {
    table: RuleTable,
    matcher: Matcher,
}

impl Dispatcher {
    #[must_use]
    pub fn new(table: RuleTable) -> Self {
        Self {
            table,
            matcher: Matcher::default(),
        }
    }

    #[must_use]
    pub const fn with_matcher(mut self, matcher: Matcher) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.table.iter()
    }

    /// Where a non-terminal `%` stops for this dispatcher.
    #[must_use]
    pub const fn anchor_search(&self) -> AnchorSearch {
        self.matcher.anchor_search()
    }

    /// Try every rule in order and run the action of the first match.
    ///
    /// An empty answer list becomes [`ActionOutcome::no_answers`]; a query no
    /// rule matches becomes [`ActionOutcome::not_understood`]. Action errors and
    /// [`ActionOutcome::Terminate`] are returned as the action produced them.
    pub async fn dispatch<S>(&self, query: &[S]) -> Result<ActionOutcome, ActionError>
    where
        S: AsRef<str> + Sync,
    {
        for (index, rule) in self.table.iter().enumerate() {
            let Some(captures) = self.matcher.matches(rule.pattern(), query) else {
                debug!("Rule {index} '{}' did not match", rule.pattern());
                continue;
            };

            info!(
                "Rule {index} '{}' matched, running {} with {} substitution(s)",
                rule.pattern(),
                rule.action().name(),
                captures.len()
            );

            return match rule.action().run(captures).await? {
                ActionOutcome::Values(values) if values.is_empty() => {
                    debug!("Action {} returned no values", rule.action().name());
                    Ok(ActionOutcome::no_answers())
                }
                outcome => Ok(outcome),
            };
        }

        info!("No rule matched a query of {} word(s)", query.len());
        Ok(ActionOutcome::not_understood())
    }
}
