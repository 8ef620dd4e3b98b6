//! Field metadata and the values read from fields at verification time.

use crate::constraint::{Annotation, Constraint};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Declared type category of a field.
///
/// Checkers branch on the value they receive, the category only decides
/// whether a display value is captured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldCategory {
    /// Integer and floating point primitives
    Numeric,
    /// `bool`
    Boolean,
    /// `char`
    Character,
    /// Strings and string slices
    Text,
    /// Anything with a length: arrays, slices, vectors, sets, maps
    Sequence,
    /// Everything else
    #[default]
    Other,
}

impl FieldCategory {
    /// Whether values of this category are primitives.
    pub fn is_primitive(self) -> bool {
        matches!(
            self,
            FieldCategory::Numeric | FieldCategory::Boolean | FieldCategory::Character
        )
    }
}

/// Static description of one field: its name, category and annotations.
///
/// `#[derive(Verify)]` emits these as `static` tables; a [`Schema`](crate::Schema)
/// holds owned ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name
    pub name: Cow<'static, str>,
    /// Declared type category
    #[serde(default)]
    pub category: FieldCategory,
    /// Whether the declared type is optional (`Option<T>`, nullable column)
    #[serde(default)]
    pub optional: bool,
    /// Annotations in declaration order
    #[serde(default)]
    pub annotations: Cow<'static, [Annotation]>,
}

impl FieldDescriptor {
    /// Create a descriptor without annotations.
    pub fn new(name: impl Into<Cow<'static, str>>, category: FieldCategory) -> Self {
        Self {
            name: name.into(),
            category,
            optional: false,
            annotations: Cow::Borrowed(&[]),
        }
    }

    /// Mark the field as optional.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Append a constraint annotation.
    pub fn constraint(self, constraint: Constraint) -> Self {
        self.annotation(Annotation::Constraint(constraint))
    }

    /// Append any annotation.
    pub fn annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.to_mut().push(annotation);
        self
    }

    /// The constraints declared on this field, in declaration order.
    pub fn constraints(&self) -> impl Iterator<Item = &Constraint> + '_ {
        self.annotations.iter().filter_map(Annotation::as_constraint)
    }
}

/// A numeric field value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    Int(i64),
    UInt(u64),
    Float(f64),
    /// An `f32`, kept narrow so it displays as written
    Float32(f32),
}

impl Number {
    /// The value widened (or rounded) to `f64`.
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::UInt(u) => u as f64,
            Number::Float(f) => f,
            Number::Float32(f) => f64::from(f),
        }
    }

    /// The value under the six representations double, float, int, long,
    /// byte and short, each widened back to `f64` for comparison.
    ///
    /// Floats narrow to integers by saturating (NaN becomes 0); integers
    /// narrow to smaller integers by wrapping; float to byte/short goes
    /// through int first.
    pub fn legacy_views(self) -> [f64; 6] {
        match self {
            Number::Float32(f) => Number::Float(f64::from(f)).legacy_views(),
            Number::Float(f) => {
                let int = f as i32;
                [
                    f,
                    f64::from(f as f32),
                    f64::from(int),
                    f as i64 as f64,
                    f64::from(int as i8),
                    f64::from(int as i16),
                ]
            }
            Number::Int(i) => [
                i as f64,
                f64::from(i as f32),
                f64::from(i as i32),
                i as f64,
                f64::from(i as i8),
                f64::from(i as i16),
            ],
            Number::UInt(u) => [
                u as f64,
                f64::from(u as f32),
                f64::from(u as i32),
                u as i64 as f64,
                f64::from(u as i8),
                f64::from(u as i16),
            ],
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{i}"),
            Number::UInt(u) => write!(f, "{u}"),
            Number::Float(x) => write!(f, "{x:?}"),
            Number::Float32(x) => write!(f, "{x:?}"),
        }
    }
}

/// Conversion of primitive numbers into [`Number`].
///
/// Used by code generated from `#[derive(Verify)]`; implemented for every
/// primitive numeric type and for references to them.
pub trait IntoNumber {
    /// Convert to a [`Number`].
    fn into_number(&self) -> Number;
}

macro_rules! impl_into_number {
    ($variant:ident as $wide:ty: $($ty:ty),*) => {
        $(
            impl IntoNumber for $ty {
                fn into_number(&self) -> Number {
                    Number::$variant(<$wide>::from(*self))
                }
            }
        )*
    };
}

impl_into_number!(Int as i64: i8, i16, i32, i64);
impl_into_number!(UInt as u64: u8, u16, u32, u64);
impl_into_number!(Float as f64: f64);
impl_into_number!(Float32 as f32: f32);

impl IntoNumber for isize {
    fn into_number(&self) -> Number {
        i64::try_from(*self).map_or(Number::Float(*self as f64), Number::Int)
    }
}

impl IntoNumber for usize {
    fn into_number(&self) -> Number {
        u64::try_from(*self).map_or(Number::Float(*self as f64), Number::UInt)
    }
}

impl IntoNumber for i128 {
    fn into_number(&self) -> Number {
        i64::try_from(*self)
            .map(Number::Int)
            .or_else(|_| u64::try_from(*self).map(Number::UInt))
            .unwrap_or(Number::Float(*self as f64))
    }
}

impl IntoNumber for u128 {
    fn into_number(&self) -> Number {
        u64::try_from(*self).map_or(Number::Float(*self as f64), Number::UInt)
    }
}

impl<T: IntoNumber + ?Sized> IntoNumber for &T {
    fn into_number(&self) -> Number {
        (**self).into_number()
    }
}

/// The current value of a field, as seen by checkers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// Absent value (`None`, JSON `null`, missing key)
    Null,
    Number(Number),
    Bool(bool),
    Char(char),
    Text(&'a str),
    /// A sized container, by element count
    Sequence(usize),
    /// A present value the verifier cannot look into
    Other,
}

impl FieldValue<'_> {
    /// Whether the value is absent.
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Length of a text (in characters) or sequence (in elements).
    pub fn size(&self) -> Option<usize> {
        match self {
            FieldValue::Text(s) => Some(s.chars().count()),
            FieldValue::Sequence(len) => Some(*len),
            _ => None,
        }
    }

    /// The numeric value, if any.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => f.write_str("null"),
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Char(c) => write!(f, "{c}"),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Sequence(len) => write!(f, "[{len} element(s)]"),
            FieldValue::Other => f.write_str("<opaque>"),
        }
    }
}

/// A field's name, declared category and current value, read once per
/// verification of that field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSnapshot<'a> {
    pub name: &'a str,
    pub category: FieldCategory,
    pub optional: bool,
    pub value: FieldValue<'a>,
}

impl<'a> FieldSnapshot<'a> {
    /// Capture a value read from `field`.
    pub fn new(field: &'a FieldDescriptor, value: FieldValue<'a>) -> Self {
        Self {
            name: &field.name,
            category: field.category,
            optional: field.optional,
            value,
        }
    }

    /// String form of the value, only for non-optional primitive fields.
    pub fn display_value(&self) -> Option<String> {
        if self.category.is_primitive() && !self.optional && !self.value.is_null() {
            Some(self.value.to_string())
        } else {
            None
        }
    }
}
