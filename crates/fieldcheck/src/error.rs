//! Error types for verification.

use crate::constraint::ConstraintKind;
use crate::report::ReportSummary;
use thiserror::Error;

/// Errors that abort a verification call.
///
/// A verification either completes and returns a [`Report`](crate::Report)
/// or fails with one of these; partial reports are never returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VerifyError {
    /// The requested field is not declared on the subject's type.
    #[error("no field named '{field}' on {subject}")]
    NoSuchField {
        /// Name of the subject type (or schema)
        subject: String,
        /// The field name that was looked up
        field: String,
    },

    /// The subject refused to produce the current value of a field.
    #[error("cannot read field '{field}': {reason}")]
    Access {
        /// The field that could not be read
        field: String,
        /// Why the read was refused
        reason: String,
    },

    /// The active registry has no checker bound to a recognised constraint kind.
    #[error("no checker available for @{kind}")]
    CheckerConstruction {
        /// The constraint kind without a checker
        kind: ConstraintKind,
    },

    /// `passed_all` was asked of a report without evaluations.
    #[error("there are no evaluations to inspect; check that the subject declares constraints")]
    EmptyReport,

    /// The subject was verified and at least one constraint did not hold.
    #[error("{subject} failed verification: {} of {} constraint(s) not satisfied", .summary.failed(), .summary.evaluations.len())]
    Rejected {
        /// Name of the subject type
        subject: String,
        /// Owned copy of the report that rejected the subject
        summary: ReportSummary,
    },
}

impl VerifyError {
    /// Create a [`VerifyError::NoSuchField`].
    pub fn no_such_field(subject: impl Into<String>, field: impl Into<String>) -> Self {
        Self::NoSuchField {
            subject: subject.into(),
            field: field.into(),
        }
    }

    /// Create a [`VerifyError::Access`].
    pub fn access(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Access {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while assembling a [`Registry`](crate::Registry).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Two checkers were registered for the same constraint kind.
    #[error("a checker for @{0} is already registered")]
    DuplicateChecker(ConstraintKind),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, VerifyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_such_field_display() {
        let error = VerifyError::no_such_field("Account", "nonexistentField");
        assert_eq!(
            error.to_string(),
            "no field named 'nonexistentField' on Account"
        );
    }

    #[test]
    fn checker_construction_display() {
        let error = VerifyError::CheckerConstruction {
            kind: ConstraintKind::MaxSize,
        };
        assert_eq!(error.to_string(), "no checker available for @MaxSize");
    }

    #[test]
    fn access_display() {
        let error = VerifyError::access("age", "subject is not a JSON object");
        assert_eq!(
            error.to_string(),
            "cannot read field 'age': subject is not a JSON object"
        );
    }

    #[test]
    fn duplicate_checker_display() {
        let error = RegistryError::DuplicateChecker(ConstraintKind::NotNull);
        assert_eq!(
            error.to_string(),
            "a checker for @NotNull is already registered"
        );
    }
}
