//! Error types for the triage engine.
//!
//! Classification itself is total and never fails. These errors come from
//! loading rule tables and configuration, and from input validation done
//! on behalf of the calling request handler.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TriageError {
    #[error("Complaint description must not be empty")]
    EmptyDescription,

    #[error("Rule '{rule}' declares no keywords")]
    EmptyKeywords { rule: String },

    #[error("Rule '{rule}' contains a blank keyword")]
    BlankKeyword { rule: String },

    #[error("Default rule '{rule}' must not declare keywords")]
    DefaultHasKeywords { rule: String },

    #[error("Rule '{rule}' has base confidence {value}, expected 0.0..={max}")]
    ConfidenceOutOfRange { rule: String, value: f64, max: f64 },

    #[error("Rule '{rule}' has a blank '{field}' field")]
    BlankField { rule: String, field: &'static str },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TriageError {
    /// Stable machine-readable code, used in batch error records.
    pub fn code(&self) -> &'static str {
        match self {
            TriageError::EmptyDescription => "empty_description",
            TriageError::EmptyKeywords { .. } => "empty_keywords",
            TriageError::BlankKeyword { .. } => "blank_keyword",
            TriageError::DefaultHasKeywords { .. } => "default_has_keywords",
            TriageError::ConfidenceOutOfRange { .. } => "confidence_out_of_range",
            TriageError::BlankField { .. } => "blank_field",
            TriageError::Io(_) => "io",
            TriageError::Toml(_) => "toml",
            TriageError::TomlEncode(_) => "toml_encode",
            TriageError::Json(_) => "json",
        }
    }

    /// True for errors caused by the caller's input rather than configuration.
    pub fn is_validation(&self) -> bool {
        matches!(self, TriageError::EmptyDescription)
    }
}

pub type Result<T> = std::result::Result<T, TriageError>;
