//! Verification of JSON data against a runtime schema.
//!
//! A [`Schema`] is the field table of a subject that has no Rust struct.
//! Schemas are plain serde data and can be loaded from JSON:
//!
//! ```rust
//! use fieldcheck::{JsonSubject, Schema};
//! use serde_json::json;
//!
//! let schema = Schema::from_json(r#"{
//!     "name": "Order",
//!     "fields": [
//!         {
//!             "name": "quantity",
//!             "category": "numeric",
//!             "annotations": [{ "type": "interval", "min": 1.0, "max": 99.0 }]
//!         },
//!         {
//!             "name": "items",
//!             "category": "sequence",
//!             "annotations": ["serde", { "type": "min_size", "value": 1 }]
//!         }
//!     ]
//! }"#)?;
//!
//! let order = json!({ "quantity": 3, "items": ["apple"] });
//! let report = fieldcheck::verify(&JsonSubject::new(&schema, &order))?;
//! assert!(report.passed_all()?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::error::{Result, VerifyError};
use crate::inspect::Inspect;
use crate::value::{FieldDescriptor, FieldValue, Number};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Named, ordered list of field descriptors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Subject name used in errors and logs
    pub name: String,
    /// Fields in declaration order
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl Schema {
    /// Create a schema without fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field.
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Parse a schema from its JSON form.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Declared fields.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }
}

/// A JSON value viewed through a [`Schema`].
#[derive(Debug, Clone, Copy)]
pub struct JsonSubject<'s, 'v> {
    schema: &'s Schema,
    value: &'v Value,
}

impl<'s, 'v> JsonSubject<'s, 'v> {
    /// Pair `value` with the schema describing it.
    pub fn new(schema: &'s Schema, value: &'v Value) -> Self {
        Self { schema, value }
    }

    /// The schema.
    pub fn schema(&self) -> &'s Schema {
        self.schema
    }

    /// The wrapped value.
    pub fn value(&self) -> &'v Value {
        self.value
    }
}

fn json_number(number: &serde_json::Number) -> Number {
    if let Some(i) = number.as_i64() {
        Number::Int(i)
    } else if let Some(u) = number.as_u64() {
        Number::UInt(u)
    } else {
        Number::Float(number.as_f64().unwrap_or(f64::NAN))
    }
}

impl Inspect for JsonSubject<'_, '_> {
    fn subject_name(&self) -> &str {
        &self.schema.name
    }

    fn fields(&self) -> &[FieldDescriptor] {
        &self.schema.fields
    }

    fn read(&self, field: &FieldDescriptor) -> Result<FieldValue<'_>> {
        let Value::Object(object) = self.value else {
            return Err(VerifyError::access(
                &*field.name,
                "subject is not a JSON object",
            ));
        };

        Ok(match object.get(&*field.name) {
            None | Some(Value::Null) => FieldValue::Null,
            Some(Value::Bool(b)) => FieldValue::Bool(*b),
            Some(Value::Number(n)) => FieldValue::Number(json_number(n)),
            Some(Value::String(s)) => FieldValue::Text(s),
            Some(Value::Array(items)) => FieldValue::Sequence(items.len()),
            Some(Value::Object(entries)) => FieldValue::Sequence(entries.len()),
        })
    }
}
