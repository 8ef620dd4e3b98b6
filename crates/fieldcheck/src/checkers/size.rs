//! Size bound checkers: MaxSize and MinSize.
//!
//! Texts are measured in characters, sequences (arrays, slices, vectors,
//! sets, maps) in elements. Values without a size pass; absent values fail.

use super::Checker;
use crate::constraint::{Constraint, ConstraintKind};
use crate::value::FieldValue;

fn size_of(value: &FieldValue<'_>) -> Option<Option<i64>> {
    if value.is_null() {
        return None;
    }
    Some(
        value
            .size()
            .map(|len| i64::try_from(len).unwrap_or(i64::MAX)),
    )
}

/// Text or sequence must not be longer than the declared bound.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxSizeChecker;

impl Checker for MaxSizeChecker {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::MaxSize
    }

    fn check(&self, value: &FieldValue<'_>, constraint: &Constraint) -> bool {
        let Constraint::MaxSize { value: max } = constraint else {
            return false;
        };
        match size_of(value) {
            None => false,
            Some(None) => true,
            Some(Some(len)) => len <= *max,
        }
    }
}

/// Text or sequence must not be shorter than the declared bound.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinSizeChecker;

impl Checker for MinSizeChecker {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::MinSize
    }

    fn check(&self, value: &FieldValue<'_>, constraint: &Constraint) -> bool {
        let Constraint::MinSize { value: min } = constraint else {
            return false;
        };
        match size_of(value) {
            None => false,
            Some(None) => true,
            Some(Some(len)) => len >= *min,
        }
    }
}
