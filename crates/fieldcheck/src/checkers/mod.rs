//! Checkers: one per constraint kind.
//!
//! A checker is a pure function of the field value and the constraint
//! declaration. Checkers never fail; a value that cannot satisfy the
//! constraint (wrong category, absent) simply does not pass.

mod numeric;
mod size;

pub use numeric::{IntervalChecker, MaxChecker, MinChecker};
pub use size::{MaxSizeChecker, MinSizeChecker};

use crate::constraint::{Constraint, ConstraintKind};
use crate::value::FieldValue;
use std::fmt::Debug;

/// Checks one kind of constraint.
///
/// ## Example
///
/// ```rust
/// use fieldcheck::{Checker, Constraint, ConstraintKind, FieldValue};
///
/// #[derive(Debug)]
/// struct LenientNotNull;
///
/// impl Checker for LenientNotNull {
///     fn kind(&self) -> ConstraintKind {
///         ConstraintKind::NotNull
///     }
///
///     fn check(&self, _value: &FieldValue<'_>, _constraint: &Constraint) -> bool {
///         true
///     }
/// }
/// ```
pub trait Checker: Debug + Send + Sync {
    /// The constraint kind this checker is bound to.
    fn kind(&self) -> ConstraintKind;

    /// Evaluate `constraint` against `value`.
    ///
    /// Called only with constraints of [`kind`](Self::kind); a constraint of
    /// another kind evaluates to `false`.
    fn check(&self, value: &FieldValue<'_>, constraint: &Constraint) -> bool;
}

/// Fails only for absent values.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotNullChecker;

impl Checker for NotNullChecker {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::NotNull
    }

    fn check(&self, value: &FieldValue<'_>, constraint: &Constraint) -> bool {
        matches!(constraint, Constraint::NotNull) && !value.is_null()
    }
}
