//! Built-in actions and the default rule table.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};
use wikibot_core::{Action, ActionError, ActionOutcome, RuleTable, Terminate};

use crate::fields::{self, FieldDef, FieldLookup};
use crate::infobox::first_infobox_text;
use crate::wiki::PageSource;

/// How an action turns its substitutions into a page subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    /// The first substitution.
    First,
    /// All substitutions joined with spaces.
    Joined,
}

impl Subject {
    fn pick(self, action: &str, captures: Vec<String>) -> Result<String, ActionError> {
        match self {
            Self::Joined => Ok(captures.join(" ")),
            Self::First => {
                let got = captures.len();
                captures.into_iter().next().ok_or(ActionError::Arity {
                    action: action.to_string(),
                    expected: 1,
                    got,
                })
            }
        }
    }
}

/// Looks up one infobox field on the page named by the substitutions.
pub struct InfoboxAction {
    field: FieldLookup,
    subject: Subject,
    pages: Arc<dyn PageSource>,
}

impl InfoboxAction {
    #[must_use]
    pub fn new(field: FieldLookup, subject: Subject, pages: Arc<dyn PageSource>) -> Self {
        Self {
            field,
            subject,
            pages,
        }
    }
}

#[async_trait]
impl Action for InfoboxAction {
    fn name(&self) -> &str {
        self.field.name()
    }

    async fn run(&self, captures: Vec<String>) -> Result<ActionOutcome, ActionError> {
        let subject = self.subject.pick(self.name(), captures)?;
        if subject.is_empty() {
            debug!("Empty subject for {}, nothing to look up", self.name());
            return Ok(ActionOutcome::Values(Vec::new()));
        }

        info!("Looking up {} of '{subject}'", self.name());

        let html = self
            .pages
            .page_html(&subject)
            .await
            .map_err(ActionError::Retrieval)?
            .ok_or_else(|| {
                ActionError::lookup_failed(self.name(), format!("no page found for '{subject}'"))
            })?;

        let text = first_infobox_text(&html)
            .ok_or_else(|| ActionError::lookup_failed(self.name(), "page has no infobox"))?;

        let value = self.field.find(&text)?;
        debug!("{} of '{subject}' is '{value}'", self.name());
        Ok(ActionOutcome::value(value))
    }
}

fn infobox_action(
    def: &FieldDef,
    subject: Subject,
    pages: &Arc<dyn PageSource>,
) -> anyhow::Result<InfoboxAction> {
    Ok(InfoboxAction::new(def.build()?, subject, Arc::clone(pages)))
}

/// The bot's rules, in priority order.
pub fn default_rules(pages: &Arc<dyn PageSource>) -> anyhow::Result<RuleTable> {
    let table = RuleTable::builder()
        .rule(
            "when was % born",
            infobox_action(&fields::birth_date(), Subject::Joined, pages)?,
        )
        .rule(
            "what is the polar radius of %",
            infobox_action(&fields::polar_radius(), Subject::First, pages)?,
        )
        .rule(
            "when was % founded",
            infobox_action(&fields::date_founded(), Subject::First, pages)?,
        )
        .rule(
            "when did % die",
            infobox_action(&fields::death_date(), Subject::First, pages)?,
        )
        .rule(
            "when was % added to the us",
            infobox_action(&fields::admission_date(), Subject::First, pages)?,
        )
        .rule("bye", Terminate)
        .build()?;

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_pick() {
        let captures = vec!["ada".to_string(), "lovelace".to_string()];
        assert!(matches!(Subject::Joined.pick("x", captures.clone()), Ok(ref s) if s == "ada lovelace"));
        assert!(matches!(Subject::First.pick("x", captures), Ok(ref s) if s == "ada"));
        assert!(matches!(
            Subject::First.pick("x", Vec::new()),
            Err(ActionError::Arity { expected: 1, got: 0, .. })
        ));
    }
}
