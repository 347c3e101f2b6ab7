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

pub mod actions;
pub mod fields;
pub mod infobox;
pub mod wiki;

// Re-export tool types for convenience
pub use actions::{InfoboxAction, Subject, default_rules};
pub use fields::{BuildError, FieldDef, FieldLookup, default_fields};
pub use infobox::{clean_text, first_infobox_html, first_infobox_text, html_to_text};
pub use wiki::{PageSource, WikiClient, WikiConfig};
