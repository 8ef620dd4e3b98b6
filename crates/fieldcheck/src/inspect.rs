//! The introspection capability the verifier needs from a subject.

use crate::error::Result;
use crate::value::{FieldDescriptor, FieldValue};

/// Field-level introspection of a value.
///
/// Implement this (usually via `#[derive(Verify)]`) to make a type
/// verifiable. Implementations expose the static field table of the type
/// and read the current value of one of its fields.
///
/// ## Example
///
/// ```rust
/// use fieldcheck::{Constraint, FieldCategory, FieldDescriptor, FieldValue, Inspect, Number};
/// use fieldcheck::VerifyError;
///
/// struct Percentage(u8);
///
/// impl Inspect for Percentage {
///     fn subject_name(&self) -> &str {
///         "Percentage"
///     }
///
///     fn fields(&self) -> &[FieldDescriptor] {
///         static FIELDS: std::sync::OnceLock<Vec<FieldDescriptor>> = std::sync::OnceLock::new();
///         FIELDS.get_or_init(|| {
///             vec![FieldDescriptor::new("0", FieldCategory::Numeric)
///                 .constraint(Constraint::Interval { min: 0.0, max: 100.0 })]
///         })
///     }
///
///     fn read(&self, field: &FieldDescriptor) -> Result<FieldValue<'_>, VerifyError> {
///         match &*field.name {
///             "0" => Ok(FieldValue::Number(Number::UInt(u64::from(self.0)))),
///             other => Err(VerifyError::no_such_field("Percentage", other)),
///         }
///     }
/// }
///
/// let report = fieldcheck::verify(&Percentage(42)).unwrap();
/// assert!(report.passed_all().unwrap());
/// ```
pub trait Inspect {
    /// Name used in errors and logs.
    fn subject_name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Declared fields in declaration order.
    fn fields(&self) -> &[FieldDescriptor];

    /// Read the current value of `field`.
    fn read(&self, field: &FieldDescriptor) -> Result<FieldValue<'_>>;

    /// Look up a declared field by name.
    fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields().iter().find(|field| field.name == name)
    }
}

impl<T: Inspect + ?Sized> Inspect for &T {
    fn subject_name(&self) -> &str {
        (**self).subject_name()
    }

    fn fields(&self) -> &[FieldDescriptor] {
        (**self).fields()
    }

    fn read(&self, field: &FieldDescriptor) -> Result<FieldValue<'_>> {
        (**self).read(field)
    }
}

impl<T: Inspect + ?Sized> Inspect for Box<T> {
    fn subject_name(&self) -> &str {
        (**self).subject_name()
    }

    fn fields(&self) -> &[FieldDescriptor] {
        (**self).fields()
    }

    fn read(&self, field: &FieldDescriptor) -> Result<FieldValue<'_>> {
        (**self).read(field)
    }
}
