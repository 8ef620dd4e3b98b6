//! Mapping from constraint kind to the checker responsible for it.
//!
//! The standard registries are built once per process and never mutated.

use crate::checkers::{
    Checker, IntervalChecker, MaxChecker, MaxSizeChecker, MinChecker, MinSizeChecker,
    NotNullChecker,
};
use crate::config::NumericMode;
use crate::constraint::ConstraintKind;
use crate::error::RegistryError;
use std::collections::HashMap;
use std::sync::OnceLock;

static CANONICAL: OnceLock<Registry> = OnceLock::new();
static LEGACY: OnceLock<Registry> = OnceLock::new();

/// Immutable table of checkers, keyed by constraint kind.
#[derive(Debug, Default)]
pub struct Registry {
    checkers: HashMap<ConstraintKind, Box<dyn Checker>>,
}

impl Registry {
    /// The process-wide registry covering all six kinds under `mode`.
    pub fn standard(mode: NumericMode) -> &'static Registry {
        let cell = match mode {
            NumericMode::Canonical => &CANONICAL,
            NumericMode::Legacy => &LEGACY,
        };
        cell.get_or_init(|| {
            tracing::debug!(?mode, "initializing standard checker registry");
            Self::with_standard_checkers(mode)
        })
    }

    /// Start assembling a custom registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    fn with_standard_checkers(mode: NumericMode) -> Self {
        let checkers: [Box<dyn Checker>; 6] = [
            Box::new(IntervalChecker::new(mode)),
            Box::new(MaxChecker::new(mode)),
            Box::new(MinChecker::new(mode)),
            Box::new(MaxSizeChecker),
            Box::new(MinSizeChecker),
            Box::new(NotNullChecker),
        ];
        Self {
            checkers: checkers
                .into_iter()
                .map(|checker| (checker.kind(), checker))
                .collect(),
        }
    }

    /// The checker bound to `kind`, if any.
    pub fn checker(&self, kind: ConstraintKind) -> Option<&dyn Checker> {
        self.checkers.get(&kind).map(|checker| checker.as_ref())
    }

    /// Whether a checker is bound to `kind`.
    pub fn contains(&self, kind: ConstraintKind) -> bool {
        self.checkers.contains_key(&kind)
    }

    /// Bound kinds, in registry order.
    pub fn kinds(&self) -> Vec<ConstraintKind> {
        let mut kinds: Vec<_> = self.checkers.keys().copied().collect();
        kinds.sort();
        kinds
    }

    /// Number of bound kinds.
    pub fn len(&self) -> usize {
        self.checkers.len()
    }

    /// Whether no kind is bound.
    pub fn is_empty(&self) -> bool {
        self.checkers.is_empty()
    }
}

/// Builder for custom registries.
///
/// ## Example
///
/// ```rust
/// use fieldcheck::checkers::{MaxSizeChecker, NotNullChecker};
/// use fieldcheck::{ConstraintKind, Registry};
///
/// let registry = Registry::builder()
///     .register(NotNullChecker)?
///     .register(MaxSizeChecker)?
///     .build();
///
/// assert!(registry.contains(ConstraintKind::NotNull));
/// assert!(!registry.contains(ConstraintKind::Interval));
/// # Ok::<(), fieldcheck::RegistryError>(())
/// ```
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    checkers: HashMap<ConstraintKind, Box<dyn Checker>>,
}

impl RegistryBuilder {
    /// Bind `checker` to its kind. Binding a kind twice is an error.
    pub fn register<C: Checker + 'static>(mut self, checker: C) -> Result<Self, RegistryError> {
        let kind = checker.kind();
        if self.checkers.contains_key(&kind) {
            return Err(RegistryError::DuplicateChecker(kind));
        }
        self.checkers.insert(kind, Box::new(checker));
        Ok(self)
    }

    /// Bind the standard checkers for every kind not bound yet.
    pub fn with_defaults(mut self, mode: NumericMode) -> Self {
        for (kind, checker) in Registry::with_standard_checkers(mode).checkers {
            self.checkers.entry(kind).or_insert(checker);
        }
        self
    }

    /// Finish the registry.
    pub fn build(self) -> Registry {
        Registry {
            checkers: self.checkers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::Constraint;
    use crate::value::{FieldValue, Number};

    #[test]
    fn standard_registry_is_total() {
        for mode in [NumericMode::Canonical, NumericMode::Legacy] {
            let registry = Registry::standard(mode);
            assert_eq!(registry.kinds(), ConstraintKind::ALL.to_vec());
            for kind in ConstraintKind::ALL {
                assert_eq!(registry.checker(kind).map(|c| c.kind()), Some(kind));
            }
        }
    }

    #[test]
    fn standard_registry_is_shared() {
        let first = Registry::standard(NumericMode::Canonical);
        let second = Registry::standard(NumericMode::Canonical);
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn standard_registries_differ_by_mode() {
        let value = FieldValue::Number(Number::Int(200));
        let min = Constraint::Min { value: 100.0 };

        let canonical = Registry::standard(NumericMode::Canonical)
            .checker(ConstraintKind::Min)
            .unwrap();
        let legacy = Registry::standard(NumericMode::Legacy)
            .checker(ConstraintKind::Min)
            .unwrap();

        assert!(canonical.check(&value, &min));
        assert!(!legacy.check(&value, &min));
    }

    #[test]
    fn builder_rejects_duplicates() {
        let result = Registry::builder()
            .register(NotNullChecker)
            .unwrap()
            .register(NotNullChecker);

        assert_eq!(
            result.unwrap_err(),
            RegistryError::DuplicateChecker(ConstraintKind::NotNull)
        );
    }

    #[test]
    fn builder_with_defaults_keeps_custom_checkers() {
        #[derive(Debug)]
        struct AlwaysPass;

        impl Checker for AlwaysPass {
            fn kind(&self) -> ConstraintKind {
                ConstraintKind::Max
            }

            fn check(&self, _value: &FieldValue<'_>, _constraint: &Constraint) -> bool {
                true
            }
        }

        let registry = Registry::builder()
            .register(AlwaysPass)
            .unwrap()
            .with_defaults(NumericMode::Canonical)
            .build();

        assert_eq!(registry.len(), 6);
        let max = registry.checker(ConstraintKind::Max).unwrap();
        assert!(max.check(
            &FieldValue::Number(Number::Int(1_000)),
            &Constraint::Max { value: 1.0 }
        ));
    }

    #[test]
    fn partial_registry() {
        let registry = Registry::builder()
            .register(MaxSizeChecker)
            .unwrap()
            .build();

        assert!(registry.contains(ConstraintKind::MaxSize));
        assert!(registry.checker(ConstraintKind::MinSize).is_none());
        assert!(!registry.is_empty());
    }
}
