//! # fieldcheck
//!
//! Declarative runtime verification of field constraints. Fields carry
//! constraint declarations; at runtime every constraint is checked against
//! the field's current value and the outcomes are collected into a
//! [`Report`].
//!
//! ## Example
//!
//! ```rust
//! use fieldcheck::prelude::*;
//!
//! #[derive(Verify)]
//! struct Person {
//!     #[verify(interval(min = 10.0, max = 100.0))]
//!     age: i32,
//!
//!     #[verify(not_null, max_size = 12)]
//!     nickname: Option<String>,
//! }
//!
//! let person = Person { age: 9, nickname: None };
//! let report = person.verify()?;
//!
//! assert!(!report.passed_all()?);
//! assert_eq!(
//!     report.to_string(),
//!     "'age' (9) has NOT been verified by @Interval(10.0, 100.0)\r\n\
//!      'nickname' has NOT been verified by @NotNull\r\n\
//!      'nickname' has NOT been verified by @MaxSize(12)\r\n"
//! );
//! # Ok::<(), fieldcheck::VerifyError>(())
//! ```
//!
//! ## Constraints
//!
//! - `interval(min = X, max = Y)` - number within `[X, Y]`
//! - `max = X` / `min = X` - number at most / at least `X`
//! - `max_size = N` / `min_size = N` - text length or element count bound
//! - `not_null` - `Option` field holds a value
//!
//! ## Report format
//!
//! One line per evaluation, each terminated by `\r\n`:
//!
//! ```text
//! 'age' (101) has NOT been verified by @Interval(10.0, 100.0)
//! 'name' has been verified by @MaxSize(3)
//! ```

pub mod checkers;
mod config;
mod constraint;
mod dynamic;
mod engine;
mod error;
mod inspect;
mod registry;
mod report;
mod value;
mod verify;

#[cfg(test)]
mod tests;

pub use checkers::Checker;
pub use config::{EmptyReportPolicy, NumericMode, VerifierConfig};
#[cfg(feature = "config")]
pub use config::{load_dotenv, ConfigError, ENV_PREFIX};
pub use constraint::{Annotation, Constraint, ConstraintKind};
pub use dynamic::{JsonSubject, Schema};
pub use engine::Verifier;
pub use error::{RegistryError, Result, VerifyError};
pub use inspect::Inspect;
pub use registry::{Registry, RegistryBuilder};
pub use report::{Evaluation, EvaluationSummary, Report, ReportSummary};
pub use value::{FieldCategory, FieldDescriptor, FieldSnapshot, FieldValue, IntoNumber, Number};
pub use verify::Verify;

// Derive macro, same name as the trait
pub use fieldcheck_macros::Verify;

/// Verify every constrained field of `subject` with the default verifier.
pub fn verify<S: Inspect + ?Sized>(subject: &S) -> Result<Report> {
    Verifier::shared().verify(subject)
}

/// Verify one declared field of `subject` with the default verifier.
pub fn verify_field<S: Inspect + ?Sized>(subject: &S, field: &FieldDescriptor) -> Result<Report> {
    Verifier::shared().verify_field(subject, field)
}

/// Verify the field of `subject` named `name` with the default verifier.
pub fn verify_field_named<S: Inspect + ?Sized>(subject: &S, name: &str) -> Result<Report> {
    Verifier::shared().verify_field_named(subject, name)
}

/// Prelude module for verification
pub mod prelude {
    pub use crate::config::{EmptyReportPolicy, NumericMode, VerifierConfig};
    pub use crate::constraint::Constraint;
    pub use crate::engine::Verifier;
    pub use crate::error::VerifyError;
    pub use crate::report::Report;
    pub use crate::verify::Verify;
    pub use fieldcheck_macros::Verify;
}
