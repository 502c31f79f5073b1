//! Step outcomes, diagnostics and run reports.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::options::ImputeMethod;

/// A non-fatal condition raised by a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The step's column is not in the table; the step did nothing.
    MissingColumn { column: String },
    /// The imputation method name was not recognized.
    UnknownImputeMethod {
        method: String,
        fallback: ImputeMethod,
    },
    /// No numeric value to compute the fill statistic from.
    EmptyStatistic { column: String, method: ImputeMethod },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingColumn { column } => {
                write!(f, "column '{column}' not found in the table")
            }
            Self::UnknownImputeMethod { method, fallback } => {
                write!(f, "invalid imputation method '{method}', using {fallback}")
            }
            Self::EmptyStatistic { column, method } => {
                write!(
                    f,
                    "column '{column}' has no numeric values to compute a {method}, left unchanged"
                )
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Applied,
    Skipped,
}

impl StepStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::Skipped => "skipped",
        }
    }
}

/// What one step did to the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOutcome {
    pub status: StepStatus,
    pub rows_removed: usize,
    pub cells_changed: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl StepOutcome {
    pub fn applied() -> Self {
        Self {
            status: StepStatus::Applied,
            rows_removed: 0,
            cells_changed: 0,
            diagnostics: Vec::new(),
        }
    }

    /// The step left the table untouched for the given reason.
    pub fn skipped(diagnostic: Diagnostic) -> Self {
        Self {
            status: StepStatus::Skipped,
            rows_removed: 0,
            cells_changed: 0,
            diagnostics: vec![diagnostic],
        }
    }

    #[must_use]
    pub fn with_rows_removed(mut self, rows: usize) -> Self {
        self.rows_removed = rows;
        self
    }

    #[must_use]
    pub fn with_cells_changed(mut self, cells: usize) -> Self {
        self.cells_changed = cells;
        self
    }

    #[must_use]
    pub fn with_diagnostic(mut self, diagnostic: Diagnostic) -> Self {
        self.diagnostics.push(diagnostic);
        self
    }

    pub fn is_skipped(&self) -> bool {
        self.status == StepStatus::Skipped
    }
}

/// Outcome of one named step within a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    pub step: String,
    pub outcome: StepOutcome,
}

/// Summary of a full pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanReport {
    pub rows_before: usize,
    pub rows_after: usize,
    pub columns_before: usize,
    pub columns_after: usize,
    pub steps: Vec<StepReport>,
}

impl CleanReport {
    pub fn rows_removed(&self) -> usize {
        self.rows_before.saturating_sub(self.rows_after)
    }

    pub fn step(&self, name: &str) -> Option<&StepReport> {
        self.steps.iter().find(|report| report.step == name)
    }

    /// Every diagnostic paired with the step that raised it.
    pub fn diagnostics(&self) -> impl Iterator<Item = (&str, &Diagnostic)> {
        self.steps.iter().flat_map(|report| {
            report
                .outcome
                .diagnostics
                .iter()
                .map(move |diagnostic| (report.step.as_str(), diagnostic))
        })
    }

    pub fn skipped_steps(&self) -> Vec<&str> {
        self.steps
            .iter()
            .filter(|report| report.outcome.is_skipped())
            .map(|report| report.step.as_str())
            .collect()
    }
}
