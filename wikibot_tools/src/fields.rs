//! Labeled infobox fields pulled out of cleaned infobox text.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;
use wikibot_core::ActionError;

/// Error type for field building.
#[derive(Debug)]
pub enum BuildError {
    /// The regex pattern is invalid.
    Regex(String),

    /// The pattern lacks the capture group holding the answer.
    MissingGroup { field: String, group: String },
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Regex(e) => write!(f, "invalid regex: {e}"),
            Self::MissingGroup { field, group } => {
                write!(f, "pattern for '{field}' has no capture group named '{group}'")
            }
        }
    }
}

impl std::error::Error for BuildError {}

impl From<regex::Error> for BuildError {
    fn from(err: regex::Error) -> Self {
        Self::Regex(err.to_string())
    }
}

/// Definition of a single infobox field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDef {
    /// Human-readable field name, also the action name.
    pub name: String,

    /// Regex run case-insensitively with `.` matching newlines.
    pub pattern: String,

    /// Named capture group holding the answer.
    pub group: String,

    /// Reason reported when the page has no such field.
    pub missing: String,
}

impl FieldDef {
    fn new(name: &str, pattern: &str, group: &str, missing: &str) -> Self {
        Self {
            name: name.to_string(),
            pattern: pattern.to_string(),
            group: group.to_string(),
            missing: missing.to_string(),
        }
    }

    /// Compile into a [`FieldLookup`].
    pub fn build(&self) -> Result<FieldLookup, BuildError> {
        let regex = RegexBuilder::new(&self.pattern)
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()?;

        if !regex.capture_names().flatten().any(|n| n == self.group) {
            return Err(BuildError::MissingGroup {
                field: self.name.clone(),
                group: self.group.clone(),
            });
        }

        Ok(FieldLookup {
            def: self.clone(),
            regex,
        })
    }
}

/// A compiled field definition.
#[derive(Debug, Clone)]
pub struct FieldLookup {
    def: FieldDef,
    regex: Regex,
}

impl FieldLookup {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.def.name
    }

    /// Extract the field from cleaned infobox text.
    pub fn find(&self, text: &str) -> Result<String, ActionError> {
        let value = self
            .regex
            .captures(text)
            .and_then(|caps| caps.name(&self.def.group))
            .map(|m| m.as_str().trim().to_string());

        value.ok_or_else(|| {
            debug!("Field '{}' not found in {} chars of infobox text", self.def.name, text.len());
            ActionError::lookup_failed(&self.def.name, &self.def.missing)
        })
    }
}

pub fn birth_date() -> FieldDef {
    FieldDef::new(
        "birth date",
        r"(?:Born\D*)(?P<birth>\d{4}-\d{2}-\d{2})",
        "birth",
        "page infobox has no birth information in YYYY-MM-DD format",
    )
}

pub fn polar_radius() -> FieldDef {
    FieldDef::new(
        "polar radius",
        r"(?:Polar radius.*?)(?: ?[\d]+ )?(?P<radius>[\d,.]+)(?:.*?)km",
        "radius",
        "page infobox has no polar radius information",
    )
}

pub fn date_founded() -> FieldDef {
    FieldDef::new(
        "date founded",
        r"Founded[\s]*(?P<date_founded>([\w]+[\s]+[\d]+,[\s]*[\d]+))",
        "date_founded",
        "page infobox has no founding date information",
    )
}

pub fn death_date() -> FieldDef {
    FieldDef::new(
        "death date",
        r"Died[\s]*(?P<date>([\w]+[\s]+[\d]+,[\s]*[\d]+))",
        "date",
        "page infobox has no death date information",
    )
}

pub fn admission_date() -> FieldDef {
    FieldDef::new(
        "admission date",
        r"Admission to Union[\s]*(?P<date>([\w]+[\s]+[\d]+,[\s]*[\d]+))",
        "date",
        "page infobox has no admission to union information",
    )
}

/// Every built-in field, in rule order.
#[must_use]
pub fn default_fields() -> Vec<FieldDef> {
    vec![
        birth_date(),
        polar_radius(),
        date_founded(),
        death_date(),
        admission_date(),
    ]
}
