//! Property tests across checkers, reports and the engine.

use crate::checkers::{
    Checker, IntervalChecker, MaxChecker, MaxSizeChecker, MinChecker, MinSizeChecker,
};
use crate::config::{EmptyReportPolicy, NumericMode};
use crate::constraint::Constraint;
use crate::dynamic::{JsonSubject, Schema};
use crate::report::{Evaluation, Report};
use crate::value::{FieldCategory, FieldDescriptor, FieldValue, Number};
use proptest::prelude::*;
use serde_json::json;

fn bounds_strategy() -> impl Strategy<Value = (f64, f64)> {
    (-1_000.0f64..1_000.0, -1_000.0f64..1_000.0)
        .prop_map(|(a, b)| if a <= b { (a, b) } else { (b, a) })
}

fn number_strategy() -> impl Strategy<Value = Number> {
    prop_oneof![
        (-2_000i64..2_000).prop_map(Number::Int),
        (0u64..2_000).prop_map(Number::UInt),
        (-2_000.0f64..2_000.0).prop_map(Number::Float),
    ]
}

fn report_with(outcomes: &[bool], constraint: Constraint) -> Report {
    let mut report = Report::new(EmptyReportPolicy::Reject);
    for (index, passed) in outcomes.iter().enumerate() {
        report.push(Evaluation::new(format!("f{index}"), None, constraint, *passed));
    }
    report
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Interval is inclusive on both ends
    #[test]
    fn interval_agrees_with_direct_comparison(
        number in number_strategy(),
        (min, max) in bounds_strategy(),
    ) {
        let value = FieldValue::Number(number);
        let constraint = Constraint::Interval { min, max };
        let expected = min <= number.as_f64() && number.as_f64() <= max;

        prop_assert_eq!(
            IntervalChecker::new(NumericMode::Canonical).check(&value, &constraint),
            expected
        );
    }

    #[test]
    fn min_and_max_agree_with_direct_comparison(
        number in number_strategy(),
        bound in -2_000.0f64..2_000.0,
    ) {
        let value = FieldValue::Number(number);
        let x = number.as_f64();

        prop_assert_eq!(
            MinChecker::new(NumericMode::Canonical).check(&value, &Constraint::Min { value: bound }),
            x >= bound
        );
        prop_assert_eq!(
            MaxChecker::new(NumericMode::Canonical).check(&value, &Constraint::Max { value: bound }),
            x <= bound
        );
    }

    // Within the byte range every legacy view is exact
    #[test]
    fn legacy_matches_canonical_for_small_integers(
        n in -128i64..=127,
        (min, max) in (-128i64..=127, -128i64..=127)
            .prop_map(|(a, b)| (a.min(b) as f64, a.max(b) as f64)),
    ) {
        let value = FieldValue::Number(Number::Int(n));
        let constraint = Constraint::Interval { min, max };

        prop_assert_eq!(
            IntervalChecker::new(NumericMode::Legacy).check(&value, &constraint),
            IntervalChecker::new(NumericMode::Canonical).check(&value, &constraint)
        );
    }

    // Legacy can only be stricter than canonical
    #[test]
    fn legacy_never_accepts_what_canonical_rejects(
        number in number_strategy(),
        (min, max) in bounds_strategy(),
    ) {
        let value = FieldValue::Number(number);
        let constraint = Constraint::Interval { min, max };

        if IntervalChecker::new(NumericMode::Legacy).check(&value, &constraint) {
            prop_assert!(IntervalChecker::new(NumericMode::Canonical).check(&value, &constraint));
        }
    }

    #[test]
    fn size_bounds_count_characters(text in "\\PC{0,20}", bound in -1i64..25) {
        let value = FieldValue::Text(&text);
        let len = text.chars().count() as i64;

        prop_assert_eq!(
            MaxSizeChecker.check(&value, &Constraint::MaxSize { value: bound }),
            len <= bound
        );
        prop_assert_eq!(
            MinSizeChecker.check(&value, &Constraint::MinSize { value: bound }),
            len >= bound
        );
    }

    #[test]
    fn passed_all_is_conjunction(outcomes in prop::collection::vec(any::<bool>(), 1..20)) {
        let report = report_with(&outcomes, Constraint::NotNull);

        prop_assert_eq!(report.passed_all(), Ok(outcomes.iter().all(|passed| *passed)));
        prop_assert_eq!(
            report.failures().count(),
            outcomes.iter().filter(|passed| !**passed).count()
        );
    }

    #[test]
    fn merge_is_concatenation(
        left in prop::collection::vec(any::<bool>(), 0..10),
        right in prop::collection::vec(any::<bool>(), 0..10),
    ) {
        let mut merged = report_with(&left, Constraint::NotNull);
        let other = report_with(&right, Constraint::MaxSize { value: 1 });
        let expected: Vec<_> = merged
            .evaluations()
            .iter()
            .chain(other.evaluations())
            .cloned()
            .collect();

        merged.merge(other);

        prop_assert_eq!(merged.evaluations(), expected.as_slice());
    }

    #[test]
    fn merge_is_associative(
        a in prop::collection::vec(any::<bool>(), 0..6),
        b in prop::collection::vec(any::<bool>(), 0..6),
        c in prop::collection::vec(any::<bool>(), 0..6),
    ) {
        let build = |outcomes: &[bool], constraint: Constraint| report_with(outcomes, constraint);

        let mut left = build(&a, Constraint::NotNull);
        left.merge(build(&b, Constraint::Max { value: 1.0 }));
        left.merge(build(&c, Constraint::Min { value: 1.0 }));

        let mut tail = build(&b, Constraint::Max { value: 1.0 });
        tail.merge(build(&c, Constraint::Min { value: 1.0 }));
        let mut right = build(&a, Constraint::NotNull);
        right.merge(tail);

        prop_assert_eq!(left, right);
    }

    // One evaluation per declared constraint, in declaration order
    #[test]
    fn report_lists_every_constraint(
        ages in prop::collection::vec(-50i64..150, 1..8),
        bounds in bounds_strategy(),
    ) {
        let (min, max) = bounds;
        let mut schema = Schema::new("Batch");
        let mut object = serde_json::Map::new();
        for (index, age) in ages.iter().enumerate() {
            let name = format!("age{index}");
            schema = schema.field(
                FieldDescriptor::new(name.clone(), FieldCategory::Numeric)
                    .constraint(Constraint::Min { value: min })
                    .constraint(Constraint::Max { value: max }),
            );
            object.insert(name, json!(age));
        }
        let value = serde_json::Value::Object(object);

        let report = crate::verify(&JsonSubject::new(&schema, &value)).unwrap();

        prop_assert_eq!(report.len(), ages.len() * 2);
        for (index, age) in ages.iter().enumerate() {
            let name = format!("age{index}");
            let evaluations: Vec<_> = report.for_field(&name).collect();
            prop_assert_eq!(evaluations.len(), 2);
            prop_assert_eq!(evaluations[0].passed(), *age as f64 >= min);
            prop_assert_eq!(evaluations[1].passed(), *age as f64 <= max);
            let display = age.to_string();
            prop_assert_eq!(evaluations[0].value(), Some(display.as_str()));
        }
    }
}
