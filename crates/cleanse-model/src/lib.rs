//! Data model for the customer cleaning pipeline.
//!
//! Holds the in-memory [`Table`], the step configuration structs, step
//! outcomes with their diagnostics, and the fatal [`CleanError`]. Nothing in
//! this crate performs I/O.

pub mod error;
pub mod options;
pub mod outcome;
pub mod table;

pub use error::{CleanError, Result};
pub use options::{
    CategoricalMapping, CleaningConfig, ColumnRename, DEFAULT_COMPLAINTS_COLUMN,
    DEFAULT_GENDER_COLUMN, DEFAULT_IMPUTE_COLUMN, DEFAULT_IMPUTE_METHOD, DEFAULT_INTEGER_COLUMN,
    DEFAULT_PERCENTAGE_COLUMN, DEFAULT_REQUIRED_COLUMN, ImputeConfig, ImputeMethod,
};
pub use outcome::{CleanReport, Diagnostic, StepOutcome, StepReport, StepStatus};
pub use table::{Cell, Column, Table, TableError, format_numeric};
