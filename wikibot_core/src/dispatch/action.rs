use async_trait::async_trait;
use thiserror::Error;

/// Reply used when a rule matched but its action found nothing.
pub const NO_ANSWERS: &str = "No answers";

/// Reply used when no rule matched the query.
pub const NOT_UNDERSTOOD: &str = "I don't understand";

/// What an action hands back to the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Answers to print, one per line.
    Values(Vec<String>),
    /// End the interactive session.
    Terminate,
}

impl ActionOutcome {
    #[must_use]
    pub fn value(value: impl Into<String>) -> Self {
        Self::Values(vec![value.into()])
    }

    #[must_use]
    pub fn no_answers() -> Self {
        Self::value(NO_ANSWERS)
    }

    #[must_use]
    pub fn not_understood() -> Self {
        Self::value(NOT_UNDERSTOOD)
    }

    #[must_use]
    pub const fn is_terminate(&self) -> bool {
        matches!(self, Self::Terminate)
    }
}

#[derive(Debug, Error)]
pub enum ActionError {
    /// The page was retrieved but the requested field is not on it.
    #[error("lookup failed: {field} unavailable ({reason})")]
    LookupFailed { field: String, reason: String },

    #[error("action '{action}' expected {expected} substitution(s), got {got}")]
    Arity {
        action: String,
        expected: usize,
        got: usize,
    },

    #[error("retrieval failed: {0}")]
    Retrieval(#[source] anyhow::Error),
}

impl ActionError {
    #[must_use]
    pub fn lookup_failed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::LookupFailed {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Handler invoked with the substitutions of a matched pattern.
#[async_trait]
pub trait Action: Send + Sync {
    fn name(&self) -> &str;
    async fn run(&self, captures: Vec<String>) -> Result<ActionOutcome, ActionError>;
}

/// Adapts a synchronous closure into an [`Action`].
pub struct FnAction<F> {
    name: String,
    func: F,
}

impl<F> FnAction<F>
where
    F: Fn(Vec<String>) -> Result<ActionOutcome, ActionError> + Send + Sync,
{
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

#[async_trait]
impl<F> Action for FnAction<F>
where
    F: Fn(Vec<String>) -> Result<ActionOutcome, ActionError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, captures: Vec<String>) -> Result<ActionOutcome, ActionError> {
        (self.func)(captures)
    }
}

/// Ends the session regardless of its substitutions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Terminate;

#[async_trait]
impl Action for Terminate {
    fn name(&self) -> &'static str {
        "bye"
    }

    async fn run(&self, _captures: Vec<String>) -> Result<ActionOutcome, ActionError> {
        Ok(ActionOutcome::Terminate)
    }
}
