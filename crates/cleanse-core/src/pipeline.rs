//! Cleaning pipeline with ordered step execution.
//!
//! Each step implements [`CleaningStep`] and runs against the same table in
//! the order it was added. The first fatal error stops the run; the table
//! keeps whatever the completed steps did to it.
//!
//! # Standard Pipeline Order
//!
//! 1. **normalize_column_names** - Lowercase identifiers, spaces to underscores
//! 2. **rename_column** - `st` to `state`
//! 3. **drop_empty_rows** / **drop_duplicate_rows** - Row hygiene
//! 4. **drop_rows_missing** - Rows without a `gender`
//! 5. **parse_percentages** / **impute_missing** - `customer_lifetime_value`
//! 6. **standardize_gender** - `Female` to `F`
//! 7. **remap_state** / **remap_education** / **remap_vehicle_class**
//! 8. **split_complaint_count** - `1/5/00` to `5`
//! 9. **coerce_to_integer** - `income`
//!
//! # Example
//!
//! ```ignore
//! use cleanse_core::pipeline::build_default_pipeline;
//!
//! let pipeline = build_default_pipeline();
//! let report = pipeline.execute(&mut table)?;
//! ```

use cleanse_model::{
    CategoricalMapping, CleanError, CleanReport, CleaningConfig, Result, StepOutcome, StepReport,
    Table,
};

use crate::{impute, rows, structure, values};

/// A single step in the cleaning pipeline.
pub trait CleaningStep: Send + Sync {
    /// Run this step against the table, in place.
    fn execute(&self, table: &mut Table) -> Result<StepOutcome>;

    /// Name used in logs and reports.
    fn step_name(&self) -> &str;
}

/// An ordered pipeline of cleaning steps.
pub struct CleaningPipeline {
    steps: Vec<Box<dyn CleaningStep>>,
}

impl Default for CleaningPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl CleaningPipeline {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Add a step to the end of the pipeline.
    #[must_use]
    pub fn add_step(mut self, step: Box<dyn CleaningStep>) -> Self {
        self.steps.push(step);
        self
    }

    /// Insert a step at a specific position, clamped to the pipeline length.
    #[must_use]
    pub fn insert_step(mut self, index: usize, step: Box<dyn CleaningStep>) -> Self {
        let index = index.min(self.steps.len());
        self.steps.insert(index, step);
        self
    }

    /// Remove every step with the given name.
    #[must_use]
    pub fn remove_step(mut self, step_name: &str) -> Self {
        self.steps.retain(|s| s.step_name() != step_name);
        self
    }

    /// List step names in execution order.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.step_name()).collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Execute all steps in order.
    ///
    /// A failing step is reported as [`CleanError::Step`] carrying its name.
    pub fn execute(&self, table: &mut Table) -> Result<CleanReport> {
        let span = tracing::info_span!("clean", rows = table.height(), columns = table.width());
        let _guard = span.enter();

        let mut report = CleanReport {
            rows_before: table.height(),
            columns_before: table.width(),
            ..CleanReport::default()
        };
        for step in &self.steps {
            let name = step.step_name();
            let outcome = step.execute(table).map_err(|source| {
                tracing::error!(step = name, error = %source, "cleaning step failed");
                CleanError::Step {
                    step: name.to_string(),
                    source: Box::new(source),
                }
            })?;
            tracing::debug!(
                step = name,
                status = outcome.status.as_str(),
                rows_removed = outcome.rows_removed,
                cells_changed = outcome.cells_changed,
                rows = table.height(),
                "step finished"
            );
            report.steps.push(StepReport {
                step: name.to_string(),
                outcome,
            });
        }
        report.rows_after = table.height();
        report.columns_after = table.width();

        tracing::info!(
            rows_before = report.rows_before,
            rows_after = report.rows_after,
            steps = report.steps.len(),
            skipped = report.skipped_steps().len(),
            "cleaning finished"
        );
        Ok(report)
    }
}

// ============================================================================
// Standard Cleaning Steps
// ============================================================================

/// Lowercase every identifier and replace spaces with underscores.
pub struct NormalizeColumnNamesStep;

impl CleaningStep for NormalizeColumnNamesStep {
    fn execute(&self, table: &mut Table) -> Result<StepOutcome> {
        structure::normalize_column_names(table)
    }

    fn step_name(&self) -> &str {
        "normalize_column_names"
    }
}

pub struct RenameColumnStep {
    pub from: String,
    pub to: String,
}

impl CleaningStep for RenameColumnStep {
    fn execute(&self, table: &mut Table) -> Result<StepOutcome> {
        structure::rename_column(table, &self.from, &self.to)
    }

    fn step_name(&self) -> &str {
        "rename_column"
    }
}

pub struct DropEmptyRowsStep;

impl CleaningStep for DropEmptyRowsStep {
    fn execute(&self, table: &mut Table) -> Result<StepOutcome> {
        rows::drop_empty_rows(table)
    }

    fn step_name(&self) -> &str {
        "drop_empty_rows"
    }
}

pub struct DropDuplicateRowsStep;

impl CleaningStep for DropDuplicateRowsStep {
    fn execute(&self, table: &mut Table) -> Result<StepOutcome> {
        rows::drop_duplicate_rows(table)
    }

    fn step_name(&self) -> &str {
        "drop_duplicate_rows"
    }
}

/// Drop rows with no value in a required column.
pub struct DropRowsMissingStep {
    pub column: String,
}

impl CleaningStep for DropRowsMissingStep {
    fn execute(&self, table: &mut Table) -> Result<StepOutcome> {
        rows::drop_rows_missing(table, &self.column)
    }

    fn step_name(&self) -> &str {
        "drop_rows_missing"
    }
}

pub struct ParsePercentagesStep {
    pub column: String,
}

impl CleaningStep for ParsePercentagesStep {
    fn execute(&self, table: &mut Table) -> Result<StepOutcome> {
        values::parse_percentages(table, &self.column)
    }

    fn step_name(&self) -> &str {
        "parse_percentages"
    }
}

pub struct ImputeMissingStep {
    pub column: String,
    /// Raw method name, resolved when the step runs.
    pub method: String,
}

impl CleaningStep for ImputeMissingStep {
    fn execute(&self, table: &mut Table) -> Result<StepOutcome> {
        impute::impute_missing(table, &self.column, &self.method)
    }

    fn step_name(&self) -> &str {
        "impute_missing"
    }
}

pub struct StandardizeGenderStep {
    pub column: String,
}

impl CleaningStep for StandardizeGenderStep {
    fn execute(&self, table: &mut Table) -> Result<StepOutcome> {
        values::standardize_gender(table, &self.column)
    }

    fn step_name(&self) -> &str {
        "standardize_gender"
    }
}

/// Lookup remap for one column, named `remap_<column>`.
pub struct RemapCategoricalStep {
    name: String,
    mapping: CategoricalMapping,
}

impl RemapCategoricalStep {
    pub fn new(mapping: CategoricalMapping) -> Self {
        Self {
            name: format!("remap_{}", mapping.column),
            mapping,
        }
    }
}

impl CleaningStep for RemapCategoricalStep {
    fn execute(&self, table: &mut Table) -> Result<StepOutcome> {
        values::remap_categorical(table, &self.mapping)
    }

    fn step_name(&self) -> &str {
        &self.name
    }
}

pub struct SplitComplaintCountStep {
    pub column: String,
}

impl CleaningStep for SplitComplaintCountStep {
    fn execute(&self, table: &mut Table) -> Result<StepOutcome> {
        values::split_complaint_count(table, &self.column)
    }

    fn step_name(&self) -> &str {
        "split_complaint_count"
    }
}

pub struct CoerceToIntegerStep {
    pub column: String,
}

impl CleaningStep for CoerceToIntegerStep {
    fn execute(&self, table: &mut Table) -> Result<StepOutcome> {
        values::coerce_to_integer(table, &self.column)
    }

    fn step_name(&self) -> &str {
        "coerce_to_integer"
    }
}

/// Build the cleaning pipeline for a configuration.
pub fn build_pipeline(config: &CleaningConfig) -> CleaningPipeline {
    let mut pipeline = CleaningPipeline::new();
    if config.normalize_names {
        pipeline = pipeline.add_step(Box::new(NormalizeColumnNamesStep));
    }
    pipeline = pipeline
        .add_step(Box::new(RenameColumnStep {
            from: config.rename.from.clone(),
            to: config.rename.to.clone(),
        }))
        .add_step(Box::new(DropEmptyRowsStep))
        .add_step(Box::new(DropDuplicateRowsStep))
        .add_step(Box::new(DropRowsMissingStep {
            column: config.required_column.clone(),
        }))
        .add_step(Box::new(ParsePercentagesStep {
            column: config.percentage_column.clone(),
        }))
        .add_step(Box::new(ImputeMissingStep {
            column: config.impute.column.clone(),
            method: config.impute.method.clone(),
        }))
        .add_step(Box::new(StandardizeGenderStep {
            column: config.gender_column.clone(),
        }));
    for mapping in &config.categorical {
        pipeline = pipeline.add_step(Box::new(RemapCategoricalStep::new(mapping.clone())));
    }
    pipeline
        .add_step(Box::new(SplitComplaintCountStep {
            column: config.complaints_column.clone(),
        }))
        .add_step(Box::new(CoerceToIntegerStep {
            column: config.integer_column.clone(),
        }))
}

/// Build the pipeline for the customer dataset's default rules.
pub fn build_default_pipeline() -> CleaningPipeline {
    build_pipeline(&CleaningConfig::default())
}

/// Run the default cleaning sequence on `table`.
pub fn clean(table: &mut Table) -> Result<CleanReport> {
    build_default_pipeline().execute(table)
}

/// Run the cleaning sequence described by `config` on `table`.
pub fn clean_with_config(table: &mut Table, config: &CleaningConfig) -> Result<CleanReport> {
    build_pipeline(config).execute(table)
}
