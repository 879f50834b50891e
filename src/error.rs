//! Feed model error types

use thiserror::Error;

use crate::version::SpecVersion;

/// Message carried by every "element does not exist in this version" failure
pub const UNSUPPORTED_VERSION_MESSAGE: &str = "element not supported in this version";

/// A violated requirement reported by `validate`
///
/// Identifies the offending element by tag and, when the violation is tied to
/// a single child or attribute, the field that broke the rule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("<{element}>{}: {message}", field_suffix(.field))]
pub struct ValidationError {
    /// Tag of the element that failed (e.g. `enclosure`, `channel`)
    pub element: String,
    /// Child element or attribute that violated a rule, if any
    pub field: Option<String>,
    /// Human-readable description of the violation
    pub message: String,
}

impl ValidationError {
    /// Create a violation tied to a specific field
    pub fn new(
        element: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            element: element.into(),
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// A required field is absent
    pub fn missing(element: impl Into<String>, field: impl Into<String>) -> Self {
        Self::new(element, field, "required field is missing")
    }

    /// The element does not exist in the requested spec version
    pub fn unsupported(element: impl Into<String>, version: SpecVersion) -> Self {
        Self {
            element: element.into(),
            field: None,
            message: format!("{UNSUPPORTED_VERSION_MESSAGE} ({version})"),
        }
    }

    /// Whether this violation is the version gate rather than a field rule
    pub fn is_unsupported_version(&self) -> bool {
        self.field.is_none() && self.message.starts_with(UNSUPPORTED_VERSION_MESSAGE)
    }
}

fn field_suffix(field: &Option<String>) -> String {
    field.as_deref().map(|f| format!(" {f}")).unwrap_or_default()
}

/// Feed parsing, validation and serialization errors
#[derive(Error, Debug)]
pub enum FeedError {
    /// Malformed date/time text, malformed XML or an unrecognized document root
    #[error("Format error: {0}")]
    Format(String),

    /// A required field is missing or a content rule is violated
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// API misuse detected at construction time
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO error while writing serialized output
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FeedError {
    /// The validation failure, if this error is one
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            FeedError::Validation(err) => Some(err),
            _ => None,
        }
    }

    /// Whether this error is the "element not supported in this version" gate
    pub fn is_unsupported_version(&self) -> bool {
        self.as_validation()
            .is_some_and(ValidationError::is_unsupported_version)
    }
}

/// Result type alias using FeedError
pub type Result<T> = std::result::Result<T, FeedError>;
