#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

pub mod dispatch;
pub mod matcher;
pub mod pattern;
pub mod util;

pub use dispatch::{
    Action, ActionError, ActionOutcome, Dispatcher, FnAction, NO_ANSWERS, NOT_UNDERSTOOD, Rule,
    RuleError, RuleTable, RuleTableBuilder, Terminate,
};
pub use matcher::{AnchorSearch, Matcher, match_tokens, match_words};
pub use pattern::{Pattern, PatternError, Token};
pub use util::tokenize_query;
