//! The verification engine: walks a subject's fields and runs checkers.

use crate::config::VerifierConfig;
use crate::constraint::Annotation;
use crate::error::{Result, VerifyError};
use crate::inspect::Inspect;
use crate::registry::Registry;
use crate::report::{Evaluation, Report};
use crate::value::{FieldDescriptor, FieldSnapshot};
use std::sync::OnceLock;
use tracing::{debug, trace};

static DEFAULT_VERIFIER: OnceLock<Verifier<'static>> = OnceLock::new();

/// Runs the checkers of a [`Registry`] against the fields of a subject.
///
/// A verifier holds no mutable state; one instance can serve any number of
/// callers. Each call builds and returns its own [`Report`], owned by the
/// caller.
///
/// ## Example
///
/// ```rust
/// use fieldcheck::{NumericMode, Verifier, VerifierConfig, Verify};
///
/// #[derive(Verify)]
/// struct Sensor {
///     #[verify(interval(min = 0, max = 100))]
///     reading: f64,
/// }
///
/// let verifier = Verifier::from_config(VerifierConfig::default().numeric_mode(NumericMode::Legacy));
/// let report = verifier.verify(&Sensor { reading: 42.5 }).unwrap();
/// assert!(report.passed_all().unwrap());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Verifier<'r> {
    registry: &'r Registry,
    config: VerifierConfig,
}

impl Default for Verifier<'static> {
    fn default() -> Self {
        Self::from_config(VerifierConfig::default())
    }
}

impl Verifier<'static> {
    /// A verifier with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// A verifier using the standard registry for `config.numeric_mode`.
    pub fn from_config(config: VerifierConfig) -> Self {
        Self {
            registry: Registry::standard(config.numeric_mode),
            config,
        }
    }

    /// The process-wide verifier with the default configuration.
    pub fn shared() -> &'static Verifier<'static> {
        DEFAULT_VERIFIER.get_or_init(Verifier::default)
    }
}

impl<'r> Verifier<'r> {
    /// A verifier using a custom registry.
    ///
    /// `config.numeric_mode` only selects standard registries and has no
    /// effect here.
    pub fn with_registry(registry: &'r Registry, config: VerifierConfig) -> Self {
        Self { registry, config }
    }

    /// The registry checkers are looked up in.
    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// The active configuration.
    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Verify every constraint on every field of `subject`.
    ///
    /// Fields are visited in declaration order and their reports merged in
    /// that order. The first error aborts the whole call.
    pub fn verify<S>(&self, subject: &S) -> Result<Report>
    where
        S: Inspect + ?Sized,
    {
        let subject_name = subject.subject_name();
        debug!(subject = subject_name, "verifying subject");

        let mut report = Report::new(self.config.empty_report);
        for field in subject.fields() {
            report.merge(self.verify_field(subject, field)?);
        }

        debug!(
            subject = subject_name,
            evaluations = report.len(),
            failed = report.failures().count(),
            "verified subject"
        );
        Ok(report)
    }

    /// Verify the constraints declared on one field of `subject`.
    ///
    /// Annotations that are not constraints are skipped. A constraint whose
    /// kind has no checker in the registry fails with
    /// [`VerifyError::CheckerConstruction`].
    pub fn verify_field<S>(&self, subject: &S, field: &FieldDescriptor) -> Result<Report>
    where
        S: Inspect + ?Sized,
    {
        let mut report = Report::new(self.config.empty_report);

        let mut constraints = Vec::with_capacity(field.annotations.len());
        for annotation in field.annotations.iter() {
            match annotation {
                Annotation::Constraint(constraint) => {
                    let kind = constraint.kind();
                    let checker = self
                        .registry
                        .checker(kind)
                        .ok_or(VerifyError::CheckerConstruction { kind })?;
                    constraints.push((constraint, checker));
                }
                Annotation::Other(name) => {
                    trace!(field = %field.name, annotation = %name, "skipping foreign annotation");
                }
            }
        }

        if constraints.is_empty() {
            return Ok(report);
        }

        let snapshot = self.snapshot(subject, field)?;
        let display = snapshot.display_value();
        for (constraint, checker) in constraints {
            let passed = checker.check(&snapshot.value, constraint);
            trace!(
                field = snapshot.name,
                constraint = %constraint,
                passed,
                "evaluated constraint"
            );
            report.push(Evaluation::new(
                field.name.clone(),
                display.clone(),
                *constraint,
                passed,
            ));
        }

        Ok(report)
    }

    /// Resolve `name` to a declared field of `subject`, then verify it.
    pub fn verify_field_named<S>(&self, subject: &S, name: &str) -> Result<Report>
    where
        S: Inspect + ?Sized,
    {
        let field = subject
            .field(name)
            .ok_or_else(|| VerifyError::no_such_field(subject.subject_name(), name))?;
        self.verify_field(subject, field)
    }

    /// Read the current value of `field` from `subject`.
    pub fn snapshot<'a, S>(&self, subject: &'a S, field: &'a FieldDescriptor) -> Result<FieldSnapshot<'a>>
    where
        S: Inspect + ?Sized,
    {
        let value = subject.read(field)?;
        Ok(FieldSnapshot::new(field, value))
    }
}
