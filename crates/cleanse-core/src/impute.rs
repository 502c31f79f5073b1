//! Statistic-based filling of absent cells.

use std::cmp::Ordering;

use cleanse_model::{Cell, Diagnostic, ImputeMethod, Result, StepOutcome, StepStatus, Table};

use crate::skip_missing_column;

/// Compute `method` over `values`. Returns `None` for an empty slice.
///
/// The median of an even count is the mean of the two middle values. The mode
/// is the most frequent value, and the smallest of them when several tie.
pub fn compute_statistic(values: &[f64], method: ImputeMethod) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let stat = match method {
        ImputeMethod::Mean => sorted.iter().sum::<f64>() / sorted.len() as f64,
        ImputeMethod::Median => {
            let mid = sorted.len() / 2;
            if sorted.len().is_multiple_of(2) {
                (sorted[mid - 1] + sorted[mid]) / 2.0
            } else {
                sorted[mid]
            }
        }
        ImputeMethod::Mode => mode_of_sorted(&sorted),
    };
    Some(stat)
}

fn mode_of_sorted(sorted: &[f64]) -> f64 {
    let mut best = sorted[0];
    let mut best_run = 0;
    let mut run_start = 0;
    for idx in 1..=sorted.len() {
        let run_ended = idx == sorted.len()
            || sorted[idx].total_cmp(&sorted[run_start]) != Ordering::Equal;
        if run_ended {
            let run = idx - run_start;
            // Strictly greater keeps the earliest, i.e. smallest, value on ties.
            if run > best_run {
                best_run = run;
                best = sorted[run_start];
            }
            run_start = idx;
        }
    }
    best
}

/// Fill every absent cell in `column` with a statistic of its numeric cells.
///
/// `method` is a raw name: anything other than `mean`, `median` or `mode`
/// falls back to the median and records [`Diagnostic::UnknownImputeMethod`].
/// Text cells are neither counted nor replaced. When the column has no numeric
/// value to work from it is left untouched and the step is skipped with
/// [`Diagnostic::EmptyStatistic`].
pub fn impute_missing(table: &mut Table, column: &str, method: &str) -> Result<StepOutcome> {
    let Some(cells) = table.cells_mut(column) else {
        return Ok(skip_missing_column("impute_missing", column));
    };

    let mut diagnostics = Vec::new();
    let resolved = ImputeMethod::from_name(method).unwrap_or_else(|| {
        let fallback = ImputeMethod::default();
        let diagnostic = Diagnostic::UnknownImputeMethod {
            method: method.to_string(),
            fallback,
        };
        tracing::warn!(column, "{diagnostic}");
        diagnostics.push(diagnostic);
        fallback
    });

    let values: Vec<f64> = cells
        .iter()
        .filter_map(Cell::as_f64)
        .filter(|value| !value.is_nan())
        .collect();
    let Some(stat) = compute_statistic(&values, resolved) else {
        let diagnostic = Diagnostic::EmptyStatistic {
            column: column.to_string(),
            method: resolved,
        };
        tracing::warn!(column, "{diagnostic}");
        diagnostics.push(diagnostic);
        return Ok(StepOutcome {
            status: StepStatus::Skipped,
            diagnostics,
            ..StepOutcome::applied()
        });
    };

    let mut filled = 0;
    for cell in cells.iter_mut().filter(|cell| is_absent(cell)) {
        *cell = Cell::Float(stat);
        filled += 1;
    }
    tracing::debug!(column, method = %resolved, stat, filled, "imputed absent cells");

    Ok(diagnostics.into_iter().fold(
        StepOutcome::applied().with_cells_changed(filled),
        StepOutcome::with_diagnostic,
    ))
}

fn is_absent(cell: &Cell) -> bool {
    match cell {
        Cell::Null => true,
        Cell::Float(value) => value.is_nan(),
        _ => false,
    }
}
