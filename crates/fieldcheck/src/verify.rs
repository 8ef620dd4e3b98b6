//! Verification trait and utilities.

use crate::engine::Verifier;
use crate::error::{Result, VerifyError};
use crate::inspect::Inspect;
use crate::report::Report;

/// Trait for verifiable types.
///
/// Implemented for every [`Inspect`] type, so `#[derive(Verify)]` is all a
/// struct needs. The methods use the shared default [`Verifier`].
///
/// ## Example
///
/// ```rust
/// use fieldcheck::prelude::*;
///
/// #[derive(Verify)]
/// struct CreateUser {
///     #[verify(min_size = 3, max_size = 20)]
///     username: String,
///
///     #[verify(interval(min = 18, max = 120))]
///     age: u8,
/// }
///
/// let user = CreateUser {
///     username: "ab".to_string(),
///     age: 25,
/// };
///
/// let report = user.verify().unwrap();
/// assert!(!report.passed_all().unwrap());
/// assert!(matches!(user.verified(), Err(VerifyError::Rejected { .. })));
/// ```
pub trait Verify: Inspect {
    /// Verify every constrained field.
    fn verify(&self) -> Result<Report> {
        Verifier::shared().verify(self)
    }

    /// Verify the field named `name`.
    fn verify_field_named(&self, name: &str) -> Result<Report> {
        Verifier::shared().verify_field_named(self, name)
    }

    /// Verify and return the value if every constraint holds, an error
    /// carrying the report summary otherwise.
    fn verified(self) -> Result<Self>
    where
        Self: Sized,
    {
        let report = Verify::verify(&self)?;
        if report.passed_all()? {
            return Ok(self);
        }
        let summary = report.summary();
        Err(VerifyError::Rejected {
            subject: self.subject_name().to_string(),
            summary,
        })
    }
}

// Blanket implementation for all types that implement Inspect
impl<T: Inspect + ?Sized> Verify for T {}
