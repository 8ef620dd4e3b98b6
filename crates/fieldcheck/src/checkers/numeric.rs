//! Numeric bound checkers: Min, Max and Interval.

use super::Checker;
use crate::config::NumericMode;
use crate::constraint::{Constraint, ConstraintKind};
use crate::value::{FieldValue, Number};

/// Whether `number` lies within the optional bounds under `mode`.
///
/// Canonical compares once in `f64`, so NaN never passes. Legacy compares
/// every one of [`Number::legacy_views`] and fails as soon as one view is
/// below `min` or above `max`; a NaN view is neither.
fn holds(mode: NumericMode, number: Number, min: Option<f64>, max: Option<f64>) -> bool {
    match mode {
        NumericMode::Canonical => {
            let v = number.as_f64();
            min.map_or(true, |min| v >= min) && max.map_or(true, |max| v <= max)
        }
        NumericMode::Legacy => number.legacy_views().iter().all(|&v| {
            let below = min.is_some_and(|min| v < min);
            let above = max.is_some_and(|max| v > max);
            !below && !above
        }),
    }
}

/// Value must be at least the declared minimum.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinChecker {
    pub mode: NumericMode,
}

impl MinChecker {
    pub fn new(mode: NumericMode) -> Self {
        Self { mode }
    }
}

impl Checker for MinChecker {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::Min
    }

    fn check(&self, value: &FieldValue<'_>, constraint: &Constraint) -> bool {
        let (Constraint::Min { value: min }, Some(number)) = (constraint, value.as_number())
        else {
            return false;
        };
        holds(self.mode, number, Some(*min), None)
    }
}

/// Value must be at most the declared maximum.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxChecker {
    pub mode: NumericMode,
}

impl MaxChecker {
    pub fn new(mode: NumericMode) -> Self {
        Self { mode }
    }
}

impl Checker for MaxChecker {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::Max
    }

    fn check(&self, value: &FieldValue<'_>, constraint: &Constraint) -> bool {
        let (Constraint::Max { value: max }, Some(number)) = (constraint, value.as_number())
        else {
            return false;
        };
        holds(self.mode, number, None, Some(*max))
    }
}

/// Value must lie within the declared closed interval.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntervalChecker {
    pub mode: NumericMode,
}

impl IntervalChecker {
    pub fn new(mode: NumericMode) -> Self {
        Self { mode }
    }
}

impl Checker for IntervalChecker {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::Interval
    }

    fn check(&self, value: &FieldValue<'_>, constraint: &Constraint) -> bool {
        let (Constraint::Interval { min, max }, Some(number)) = (constraint, value.as_number())
        else {
            return false;
        };
        holds(self.mode, number, Some(*min), Some(*max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(i: i64) -> FieldValue<'static> {
        FieldValue::Number(Number::Int(i))
    }

    fn float(f: f64) -> FieldValue<'static> {
        FieldValue::Number(Number::Float(f))
    }

    #[test]
    fn interval_is_inclusive() {
        let checker = IntervalChecker::default();
        let interval = Constraint::Interval {
            min: 10.0,
            max: 100.0,
        };

        assert!(checker.check(&int(10), &interval));
        assert!(checker.check(&int(100), &interval));
        assert!(!checker.check(&int(9), &interval));
        assert!(!checker.check(&int(101), &interval));
        assert!(checker.check(&float(99.5), &interval));
        assert!(!checker.check(&float(100.01), &interval));
    }

    #[test]
    fn min_and_max_bounds() {
        let min = MinChecker::default();
        let max = MaxChecker::default();

        assert!(min.check(&int(10), &Constraint::Min { value: 10.0 }));
        assert!(!min.check(&int(5), &Constraint::Min { value: 10.0 }));
        assert!(max.check(&int(100), &Constraint::Max { value: 100.0 }));
        assert!(!max.check(&int(101), &Constraint::Max { value: 100.0 }));
        assert!(max.check(
            &FieldValue::Number(Number::UInt(u64::MAX)),
            &Constraint::Max { value: f64::INFINITY }
        ));
    }

    #[test]
    fn null_and_non_numeric_values_fail() {
        let min = MinChecker::default();
        let interval = IntervalChecker::default();

        assert!(!min.check(&FieldValue::Null, &Constraint::Min { value: 0.0 }));
        assert!(!min.check(&FieldValue::Text("5"), &Constraint::Min { value: 0.0 }));
        assert!(!min.check(&FieldValue::Bool(true), &Constraint::Min { value: 0.0 }));
        assert!(!interval.check(
            &FieldValue::Sequence(3),
            &Constraint::Interval { min: 0.0, max: 5.0 }
        ));
    }

    #[test]
    fn nan_fails_canonical_bounds() {
        let min = MinChecker::default();
        assert!(!min.check(&float(f64::NAN), &Constraint::Min { value: 0.0 }));
    }

    #[test]
    fn legacy_mode_fails_on_narrowing() {
        let canonical = MinChecker::new(NumericMode::Canonical);
        let legacy = MinChecker::new(NumericMode::Legacy);
        let min = Constraint::Min { value: 100.0 };

        // 200 wraps to -56 as a byte
        assert!(canonical.check(&int(200), &min));
        assert!(!legacy.check(&int(200), &min));

        // 10.5 truncates to 10 as an int
        let interval = Constraint::Interval {
            min: 10.25,
            max: 20.0,
        };
        assert!(IntervalChecker::new(NumericMode::Canonical).check(&float(10.5), &interval));
        assert!(!IntervalChecker::new(NumericMode::Legacy).check(&float(10.5), &interval));
    }

    #[test]
    fn legacy_mode_agrees_for_small_integers() {
        let legacy = IntervalChecker::new(NumericMode::Legacy);
        let interval = Constraint::Interval {
            min: 10.0,
            max: 100.0,
        };

        assert!(legacy.check(&int(10), &interval));
        assert!(legacy.check(&int(100), &interval));
        assert!(!legacy.check(&int(9), &interval));
        assert!(!legacy.check(&int(101), &interval));
    }

    #[test]
    fn wrong_constraint_kind_fails() {
        assert!(!MinChecker::default().check(&int(1), &Constraint::Max { value: 5.0 }));
        assert!(!MaxChecker::default().check(&int(1), &Constraint::NotNull));
    }
}
