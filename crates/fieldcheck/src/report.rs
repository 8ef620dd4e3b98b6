//! Verification reports.

use crate::config::EmptyReportPolicy;
use crate::constraint::Constraint;
use crate::error::{Result, VerifyError};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Line separator used by the textual report.
const LINE_END: &str = "\r\n";

/// Outcome of one checker run against one field.
///
/// Field names of derived types stay borrowed from their static field
/// table, so an evaluation never borrows the verified value.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    field: Cow<'static, str>,
    value: Option<String>,
    constraint: Constraint,
    passed: bool,
}

impl Evaluation {
    pub(crate) fn new(
        field: impl Into<Cow<'static, str>>,
        value: Option<String>,
        constraint: Constraint,
        passed: bool,
    ) -> Self {
        Self {
            field: field.into(),
            value,
            constraint,
            passed,
        }
    }

    /// Name of the verified field.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// String form of the value, captured for primitive fields only.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// The constraint that was evaluated.
    pub fn constraint(&self) -> &Constraint {
        &self.constraint
    }

    /// Whether the value satisfied the constraint.
    pub fn passed(&self) -> bool {
        self.passed
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' ", self.field)?;
        if let Some(value) = &self.value {
            write!(f, "({value}) ")?;
        }
        let verdict = if self.passed {
            "has been verified"
        } else {
            "has NOT been verified"
        };
        write!(f, "{verdict} by {}", self.constraint)
    }
}

/// Ordered, append-only list of evaluations produced by one verification.
///
/// Evaluations appear in the order fields and their constraints are
/// declared. A report is owned by the caller and outlives the subject it
/// was produced from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    evaluations: Vec<Evaluation>,
    policy: EmptyReportPolicy,
}

impl Report {
    /// Create an empty report.
    pub fn new(policy: EmptyReportPolicy) -> Self {
        Self {
            evaluations: Vec::new(),
            policy,
        }
    }

    pub(crate) fn push(&mut self, evaluation: Evaluation) {
        self.evaluations.push(evaluation);
    }

    /// Append the evaluations of `other`, keeping both orders.
    pub fn merge(&mut self, other: Report) {
        self.evaluations.extend(other.evaluations);
    }

    /// Whether every evaluation passed.
    ///
    /// On a report without evaluations this fails with
    /// [`VerifyError::EmptyReport`], unless the report was produced under
    /// [`EmptyReportPolicy::Pass`].
    pub fn passed_all(&self) -> Result<bool> {
        if self.evaluations.is_empty() {
            return match self.policy {
                EmptyReportPolicy::Reject => {
                    tracing::warn!("passed_all called on a report without evaluations");
                    Err(VerifyError::EmptyReport)
                }
                EmptyReportPolicy::Pass => Ok(true),
            };
        }
        Ok(self.evaluations.iter().all(Evaluation::passed))
    }

    /// All evaluations, in discovery order.
    pub fn evaluations(&self) -> &[Evaluation] {
        &self.evaluations
    }

    /// Evaluations that did not pass.
    pub fn failures(&self) -> impl Iterator<Item = &Evaluation> + '_ {
        self.evaluations.iter().filter(|e| !e.passed)
    }

    /// Evaluations of the field named `field`.
    pub fn for_field<'r>(
        &'r self,
        field: &'r str,
    ) -> impl Iterator<Item = &'r Evaluation> + 'r {
        self.evaluations.iter().filter(move |e| e.field == field)
    }

    /// Number of evaluations.
    pub fn len(&self) -> usize {
        self.evaluations.len()
    }

    /// Whether the report holds no evaluations.
    pub fn is_empty(&self) -> bool {
        self.evaluations.is_empty()
    }

    /// The empty report policy this report answers `passed_all` with.
    pub fn policy(&self) -> EmptyReportPolicy {
        self.policy
    }

    /// Owned, serializable copy of the report.
    pub fn summary(&self) -> ReportSummary {
        let passed = if self.evaluations.is_empty() {
            self.policy == EmptyReportPolicy::Pass
        } else {
            self.evaluations.iter().all(Evaluation::passed)
        };
        ReportSummary {
            passed,
            evaluations: self
                .evaluations
                .iter()
                .map(|e| EvaluationSummary {
                    field: e.field.to_string(),
                    value: e.value.clone(),
                    constraint: e.constraint,
                    passed: e.passed,
                })
                .collect(),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for evaluation in &self.evaluations {
            write!(f, "{evaluation}{LINE_END}")?;
        }
        Ok(())
    }
}

/// Owned form of a [`Report`], for logging and JSON output.
///
/// `passed` is `false` for an empty report under the strict policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub passed: bool,
    pub evaluations: Vec<EvaluationSummary>,
}

impl ReportSummary {
    /// Number of failed evaluations.
    pub fn failed(&self) -> usize {
        self.evaluations.iter().filter(|e| !e.passed).count()
    }
}

/// Owned form of an [`Evaluation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSummary {
    pub field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub constraint: Constraint,
    pub passed: bool,
}
