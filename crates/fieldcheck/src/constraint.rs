//! Constraint declarations attached to fields.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// A constraint declared on a field.
///
/// Declarations are fixed when the field is declared (by `#[derive(Verify)]`
/// or by a [`Schema`](crate::Schema)) and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Constraint {
    /// Value must lie in `[min, max]`
    Interval { min: f64, max: f64 },
    /// Value must be at most `value`
    Max { value: f64 },
    /// Value must be at least `value`
    Min { value: f64 },
    /// Length of a text or sequence must be at most `value`
    MaxSize { value: i64 },
    /// Length of a text or sequence must be at least `value`
    MinSize { value: i64 },
    /// Value must be present
    NotNull,
}

/// The kind of a [`Constraint`], without its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    Interval,
    Max,
    Min,
    MaxSize,
    MinSize,
    NotNull,
}

impl ConstraintKind {
    /// Every supported kind, in registry order.
    pub const ALL: [ConstraintKind; 6] = [
        ConstraintKind::Interval,
        ConstraintKind::Max,
        ConstraintKind::Min,
        ConstraintKind::MaxSize,
        ConstraintKind::MinSize,
        ConstraintKind::NotNull,
    ];

    /// Display name, as used in reports (`@Interval`, `@MaxSize`, ...).
    pub fn name(self) -> &'static str {
        match self {
            ConstraintKind::Interval => "Interval",
            ConstraintKind::Max => "Max",
            ConstraintKind::Min => "Min",
            ConstraintKind::MaxSize => "MaxSize",
            ConstraintKind::MinSize => "MinSize",
            ConstraintKind::NotNull => "NotNull",
        }
    }

    /// Attribute keyword used by `#[verify(...)]`.
    pub fn keyword(self) -> &'static str {
        match self {
            ConstraintKind::Interval => "interval",
            ConstraintKind::Max => "max",
            ConstraintKind::Min => "min",
            ConstraintKind::MaxSize => "max_size",
            ConstraintKind::MinSize => "min_size",
            ConstraintKind::NotNull => "not_null",
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Constraint {
    /// The kind of this constraint.
    pub fn kind(&self) -> ConstraintKind {
        match self {
            Constraint::Interval { .. } => ConstraintKind::Interval,
            Constraint::Max { .. } => ConstraintKind::Max,
            Constraint::Min { .. } => ConstraintKind::Min,
            Constraint::MaxSize { .. } => ConstraintKind::MaxSize,
            Constraint::MinSize { .. } => ConstraintKind::MinSize,
            Constraint::NotNull => ConstraintKind::NotNull,
        }
    }

    /// Parameter list as rendered in reports.
    ///
    /// `(min, max)` for intervals, `(value)` for the single-bound kinds and
    /// nothing for `NotNull`.
    pub fn parameters(&self) -> String {
        match self {
            Constraint::Interval { min, max } => format!("({min:?}, {max:?})"),
            Constraint::Max { value } | Constraint::Min { value } => format!("({value:?})"),
            Constraint::MaxSize { value } | Constraint::MinSize { value } => format!("({value})"),
            Constraint::NotNull => String::new(),
        }
    }

    /// Render the constraint in its attribute form.
    pub fn pretty_print(&self) -> String {
        let keyword = self.kind().keyword();
        match self {
            Constraint::Interval { min, max } => {
                format!("#[verify({keyword}(min = {min:?}, max = {max:?}))]")
            }
            Constraint::Max { value } | Constraint::Min { value } => {
                format!("#[verify({keyword} = {value:?})]")
            }
            Constraint::MaxSize { value } | Constraint::MinSize { value } => {
                format!("#[verify({keyword} = {value})]")
            }
            Constraint::NotNull => format!("#[verify({keyword})]"),
        }
    }

    /// Parse a constraint from its attribute form.
    ///
    /// This is the inverse of [`pretty_print`](Self::pretty_print). Bounds
    /// must be finite and an interval's `min` must not exceed its `max`,
    /// as for `#[derive(Verify)]`.
    pub fn parse(s: &str) -> Option<Self> {
        let inner = s.trim().strip_prefix("#[verify(")?.strip_suffix(")]")?.trim();

        if inner == "not_null" {
            return Some(Constraint::NotNull);
        }

        if let Some(args) = inner
            .strip_prefix("interval(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let min = Self::parse_bound(Self::extract_param(args, "min")?)?;
            let max = Self::parse_bound(Self::extract_param(args, "max")?)?;
            return (min <= max).then_some(Constraint::Interval { min, max });
        }

        let (keyword, value) = inner.split_once('=')?;
        let value = value.trim();
        match keyword.trim() {
            "max" => Some(Constraint::Max {
                value: Self::parse_bound(value)?,
            }),
            "min" => Some(Constraint::Min {
                value: Self::parse_bound(value)?,
            }),
            "max_size" => Some(Constraint::MaxSize {
                value: value.parse().ok()?,
            }),
            "min_size" => Some(Constraint::MinSize {
                value: value.parse().ok()?,
            }),
            _ => None,
        }
    }

    fn parse_bound(s: &str) -> Option<f64> {
        s.parse::<f64>().ok().filter(|bound| bound.is_finite())
    }

    fn extract_param<'s>(s: &'s str, param: &str) -> Option<&'s str> {
        s.split(',').find_map(|part| {
            let (key, value) = part.split_once('=')?;
            (key.trim() == param).then(|| value.trim())
        })
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}{}", self.kind(), self.parameters())
    }
}

/// One annotation on a field.
///
/// Fields may carry annotations unrelated to verification (`#[serde(...)]`
/// and the like). They are kept so the field's annotation list is complete,
/// and the verifier skips them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Annotation {
    /// A constraint the verifier understands
    Constraint(Constraint),
    /// Any other annotation, by name
    Other(Cow<'static, str>),
}

impl Annotation {
    /// The constraint carried by this annotation, if any.
    pub fn as_constraint(&self) -> Option<&Constraint> {
        match self {
            Annotation::Constraint(constraint) => Some(constraint),
            Annotation::Other(_) => None,
        }
    }
}

impl From<Constraint> for Annotation {
    fn from(constraint: Constraint) -> Self {
        Annotation::Constraint(constraint)
    }
}
