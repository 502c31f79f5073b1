//! Cleaning steps and the pipeline that runs them.
//!
//! Each step is a free function over `&mut Table` returning a
//! [`StepOutcome`]. [`CleaningPipeline`] runs steps in order and stops at the
//! first fatal error; [`clean`] runs the customer dataset's fixed sequence.

pub mod impute;
pub mod pipeline;
pub mod rows;
pub mod structure;
pub mod values;

use cleanse_model::{Diagnostic, StepOutcome};

pub use impute::{compute_statistic, impute_missing};
pub use pipeline::{
    CleaningPipeline, CleaningStep, CoerceToIntegerStep, DropDuplicateRowsStep,
    DropEmptyRowsStep, DropRowsMissingStep, ImputeMissingStep, NormalizeColumnNamesStep,
    ParsePercentagesStep, RemapCategoricalStep, RenameColumnStep, SplitComplaintCountStep,
    StandardizeGenderStep, build_default_pipeline, build_pipeline, clean, clean_with_config,
};
pub use rows::{drop_duplicate_rows, drop_empty_rows, drop_rows_missing};
pub use structure::{normalize_column_name, normalize_column_names, rename_column};
pub use values::{
    coerce_to_integer, parse_percentage, parse_percentages, remap_categorical,
    split_complaint_count, standardize_gender,
};

/// Report a step that found no column to work on.
pub(crate) fn skip_missing_column(step: &str, column: &str) -> StepOutcome {
    let diagnostic = Diagnostic::MissingColumn {
        column: column.to_string(),
    };
    tracing::warn!(step, column, "{diagnostic}");
    StepOutcome::skipped(diagnostic)
}
