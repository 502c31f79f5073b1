//! In-memory table model.
//!
//! A [`Table`] is an ordered list of named [`Column`]s of equal length. Rows
//! have no stored index: a row is addressed by its position, so positions are
//! always contiguous and zero-based, including right after rows are removed.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single cell value.
///
/// Columns carry no enforced type, so one column may hold a mix of variants.
/// `Null` is the absent marker and is distinct from `Text("")` and from zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Cell {
    #[default]
    Null,
    Text(String),
    Int(i64),
    Float(f64),
}

impl Cell {
    /// Build a text cell.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrow the text payload, if this is a text cell.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Numeric value of an `Int` or `Float` cell. Text is never parsed here.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            Self::Null | Self::Text(_) => None,
        }
    }

    /// Human-readable rendering for error messages (`null`, `'text'`, `12.5`).
    pub fn describe(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Text(value) => format!("'{value}'"),
            Self::Int(value) => value.to_string(),
            Self::Float(value) => format_numeric(*value),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Text(value) => f.write_str(value),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => f.write_str(&format_numeric(*value)),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Formats a floating-point number without trailing zeros after the decimal point.
///
/// Integer-valued floats like `40.0` are formatted as `"40"`, not `"4"`.
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.');
        if trimmed.is_empty() || trimmed == "-" {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    } else {
        s
    }
}

/// A named column of cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub cells: Vec<Cell>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: impl IntoIterator<Item = Cell>) -> Self {
        Self {
            name: name.into(),
            cells: cells.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn null_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_null()).count()
    }
}

/// Structural errors raised by [`Table`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// A column does not have as many cells as the first column.
    #[error("column '{column}' has {found} cells, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    /// Two columns share one identifier.
    #[error("duplicate column identifier '{0}'")]
    DuplicateColumn(String),

    /// A row mask does not cover every row.
    #[error("row mask has {found} entries, table has {expected} rows")]
    MaskLength { expected: usize, found: usize },

    /// A rename list does not cover every column.
    #[error("expected {expected} column names, got {found}")]
    NameCount { expected: usize, found: usize },
}

/// An ordered collection of equally long, uniquely named columns.
///
/// Serializes as a list of columns. Deserializing goes through [`Table::new`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Column>", into = "Vec<Column>")]
pub struct Table {
    columns: Vec<Column>,
}

impl TryFrom<Vec<Column>> for Table {
    type Error = TableError;

    fn try_from(columns: Vec<Column>) -> Result<Self, Self::Error> {
        Self::new(columns)
    }
}

impl From<Table> for Vec<Column> {
    fn from(table: Table) -> Self {
        table.into_columns()
    }
}

impl Table {
    /// Build a table, checking that column lengths agree and names are unique.
    pub fn new(columns: Vec<Column>) -> Result<Self, TableError> {
        let mut seen = BTreeSet::new();
        let expected = columns.first().map_or(0, Column::len);
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(TableError::DuplicateColumn(column.name.clone()));
            }
            if column.len() != expected {
                return Err(TableError::LengthMismatch {
                    column: column.name.clone(),
                    expected,
                    found: column.len(),
                });
            }
        }
        Ok(Self { columns })
    }

    /// Build a table from row-major data.
    ///
    /// Short rows are padded with `Null`; extra cells are a length error.
    pub fn from_rows<S: AsRef<str>>(names: &[S], rows: Vec<Vec<Cell>>) -> Result<Self, TableError> {
        let mut columns: Vec<Column> = names
            .iter()
            .map(|name| Column::new(name.as_ref(), Vec::with_capacity(rows.len())))
            .collect();
        for row in rows {
            if row.len() > columns.len() {
                return Err(TableError::LengthMismatch {
                    column: format!("row of {} cells", row.len()),
                    expected: columns.len(),
                    found: row.len(),
                });
            }
            let mut cells = row.into_iter();
            for column in &mut columns {
                column.cells.push(cells.next().unwrap_or_default());
            }
        }
        Self::new(columns)
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.height() == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Borrow a column's cells for in-place edits. The slice cannot change length.
    pub fn cells_mut(&mut self, name: &str) -> Option<&mut [Cell]> {
        self.columns
            .iter_mut()
            .find(|c| c.name == name)
            .map(|c| c.cells.as_mut_slice())
    }

    /// Cells of one row, in column order.
    pub fn row(&self, idx: usize) -> Option<Vec<&Cell>> {
        if idx >= self.height() {
            return None;
        }
        Some(self.columns.iter().map(|c| &c.cells[idx]).collect())
    }

    /// Rename `from` to `to`.
    ///
    /// Returns `Ok(false)` when `from` is not present. Renaming onto another
    /// existing identifier is a [`TableError::DuplicateColumn`].
    pub fn rename_column(&mut self, from: &str, to: &str) -> Result<bool, TableError> {
        let Some(idx) = self.position(from) else {
            return Ok(false);
        };
        if from != to && self.has_column(to) {
            return Err(TableError::DuplicateColumn(to.to_string()));
        }
        self.columns[idx].name = to.to_string();
        Ok(true)
    }

    /// Replace every column identifier at once.
    pub fn set_column_names(&mut self, names: Vec<String>) -> Result<(), TableError> {
        if names.len() != self.columns.len() {
            return Err(TableError::NameCount {
                expected: self.columns.len(),
                found: names.len(),
            });
        }
        let mut seen = BTreeSet::new();
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(TableError::DuplicateColumn(name.clone()));
            }
        }
        for (column, name) in self.columns.iter_mut().zip(names) {
            column.name = name;
        }
        Ok(())
    }

    /// Keep the rows whose mask entry is `true`; returns the number removed.
    pub fn retain_rows(&mut self, keep: &[bool]) -> Result<usize, TableError> {
        let height = self.height();
        if keep.len() != height {
            return Err(TableError::MaskLength {
                expected: height,
                found: keep.len(),
            });
        }
        for column in &mut self.columns {
            let mut flags = keep.iter();
            column
                .cells
                .retain(|_| flags.next().copied().unwrap_or(true));
        }
        Ok(height - self.height())
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }
}
