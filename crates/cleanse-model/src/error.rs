use thiserror::Error;

use crate::table::TableError;

/// Fatal errors. Any of these aborts a pipeline run.
#[derive(Debug, Error)]
pub enum CleanError {
    /// A step that cannot run without its column did not find it.
    #[error("column '{column}' not found")]
    ColumnNotFound { column: String },

    /// Several identifiers would end up with the same name.
    #[error("columns {sources:?} all map to identifier '{target}'")]
    ColumnCollision { target: String, sources: Vec<String> },

    /// A value could not be read as a number.
    #[error("cannot parse {value} as a number in column '{column}' at row {row}")]
    Parse {
        column: String,
        row: usize,
        value: String,
    },

    /// A delimited value has too few fields.
    #[error(
        "{value} in column '{column}' at row {row} has no field {index} when split on '{delimiter}'"
    )]
    MissingField {
        column: String,
        row: usize,
        value: String,
        index: usize,
        delimiter: char,
    },

    /// A value could not be cast to an integer.
    #[error("cannot convert {value} to an integer in column '{column}' at row {row}")]
    Conversion {
        column: String,
        row: usize,
        value: String,
    },

    #[error(transparent)]
    Table(#[from] TableError),

    /// A pipeline step failed; the table keeps the effects of earlier steps.
    #[error("step '{step}' failed: {source}")]
    Step {
        step: String,
        #[source]
        source: Box<CleanError>,
    },
}

impl CleanError {
    pub fn column_not_found(column: impl Into<String>) -> Self {
        Self::ColumnNotFound {
            column: column.into(),
        }
    }

    /// The error underneath any `Step` wrappers.
    pub fn root(&self) -> &CleanError {
        match self {
            Self::Step { source, .. } => source.root(),
            other => other,
        }
    }

    /// Name of the failing step, when raised by a pipeline.
    pub fn step_name(&self) -> Option<&str> {
        match self {
            Self::Step { step, .. } => Some(step),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CleanError>;
