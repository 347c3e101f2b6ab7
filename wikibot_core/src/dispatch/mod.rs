mod action;
mod dispatcher;
mod table;

pub use action::{Action, ActionError, ActionOutcome, FnAction, NO_ANSWERS, NOT_UNDERSTOOD, Terminate};
pub use dispatcher::Dispatcher;
pub use table::{Rule, RuleError, RuleTable, RuleTableBuilder};
