//! Error types for the domain layer.

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// A single violated invariant on an aggregate field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must have at least {min} characters")]
    TooShort { field: String, min: usize },

    #[error("Field '{field}' must have at most {max} characters")]
    TooLong { field: String, max: usize },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates a minimum length validation error.
    pub fn too_short(field: impl Into<String>, min: usize) -> Self {
        ValidationError::TooShort {
            field: field.into(),
            min,
        }
    }

    /// Creates a maximum length validation error.
    pub fn too_long(field: impl Into<String>, max: usize) -> Self {
        ValidationError::TooLong {
            field: field.into(),
            max,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns the name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::TooShort { field, .. }
            | ValidationError::TooLong { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

/// Collects every violated rule before failing, so callers see all of them at once.
#[derive(Debug, Default)]
pub struct Notification {
    errors: Vec<ValidationError>,
}

impl Notification {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Records an error for a required text field that is blank or outside `min..=max` chars.
    pub fn check_length(&mut self, field: &str, value: &str, min: usize, max: usize) {
        let len = value.chars().count();
        if min > 0 && value.trim().is_empty() {
            self.add(ValidationError::empty_field(field));
        } else if len < min {
            self.add(ValidationError::too_short(field, min));
        } else if len > max {
            self.add(ValidationError::too_long(field, max));
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Fails with `ValidationFailed` when anything was recorded.
    pub fn into_result(self, aggregate: &'static str) -> Result<(), DomainError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(DomainError::ValidationFailed {
                aggregate,
                errors: self.errors,
            })
        }
    }
}

/// Stable error codes for the transport layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NotFound,
    ValidationFailed,
    RelatedAggregateNotFound,
    UpstreamFailure,
    Cancelled,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::RelatedAggregateNotFound => "RELATED_AGGREGATE_NOT_FOUND",
            ErrorCode::UpstreamFailure => "UPSTREAM_FAILURE",
            ErrorCode::Cancelled => "CANCELLED",
        };
        write!(f, "{}", s)
    }
}

/// Error returned by every catalog operation.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{aggregate} '{id}' not found")]
    NotFound { aggregate: &'static str, id: String },

    #[error("{aggregate} validation failed: {}", join_messages(.errors))]
    ValidationFailed {
        aggregate: &'static str,
        errors: Vec<ValidationError>,
    },

    #[error("Related {aggregate} id(s) not found: {}", .ids.join(", "))]
    RelatedAggregateNotFound {
        aggregate: &'static str,
        ids: Vec<String>,
    },

    #[error("{collaborator} failed: {source}")]
    UpstreamFailure {
        collaborator: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("Operation cancelled")]
    Cancelled,
}

impl DomainError {
    /// Creates a not-found error for the given aggregate and id.
    pub fn not_found(aggregate: &'static str, id: impl fmt::Display) -> Self {
        DomainError::NotFound {
            aggregate,
            id: id.to_string(),
        }
    }

    /// Creates a validation error for a single field.
    pub fn validation(aggregate: &'static str, error: ValidationError) -> Self {
        DomainError::ValidationFailed {
            aggregate,
            errors: vec![error],
        }
    }

    /// Wraps a collaborator failure, keeping the cause as the error source.
    pub fn upstream(
        collaborator: impl Into<String>,
        source: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        DomainError::UpstreamFailure {
            collaborator: collaborator.into(),
            source: source.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::NotFound { .. } => ErrorCode::NotFound,
            DomainError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            DomainError::RelatedAggregateNotFound { .. } => ErrorCode::RelatedAggregateNotFound,
            DomainError::UpstreamFailure { .. } => ErrorCode::UpstreamFailure,
            DomainError::Cancelled => ErrorCode::Cancelled,
        }
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("name");
        assert_eq!(format!("{}", err), "Field 'name' cannot be empty");
    }

    #[test]
    fn notification_reports_every_error() {
        let mut notification = Notification::new();
        notification.check_length("name", "ab", 3, 255);
        notification.check_length("description", "", 1, 4000);

        let err = notification.into_result("Video").unwrap_err();
        match err {
            DomainError::ValidationFailed { aggregate, errors } => {
                assert_eq!(aggregate, "Video");
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0], ValidationError::too_short("name", 3));
                assert_eq!(errors[1].field(), "description");
            }
            other => panic!("Expected ValidationFailed, got {other:?}"),
        }
    }

    #[test]
    fn notification_without_errors_is_ok() {
        let mut notification = Notification::new();
        notification.check_length("name", "Drama", 3, 255);
        assert!(!notification.has_errors());
        assert!(notification.into_result("Category").is_ok());
    }

    #[test]
    fn related_not_found_lists_every_id() {
        let err = DomainError::RelatedAggregateNotFound {
            aggregate: "Category",
            ids: vec!["a".into(), "b".into()],
        };
        assert_eq!(err.to_string(), "Related Category id(s) not found: a, b");
        assert_eq!(err.code(), ErrorCode::RelatedAggregateNotFound);
    }

    #[test]
    fn upstream_failure_preserves_source() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err = DomainError::upstream("storage", io);

        assert_eq!(err.to_string(), "storage failed: disk full");
        assert!(StdError::source(&err).is_some());
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::NotFound), "NOT_FOUND");
        assert_eq!(format!("{}", ErrorCode::UpstreamFailure), "UPSTREAM_FAILURE");
    }
}
