//! Polars value conversion helpers.
//!
//! Helpers for moving single values between Polars `AnyValue`s and table
//! [`Cell`]s, and for picking the Polars dtype a column of cells is written as.

use cleanse_model::Cell;
use polars::prelude::{AnyValue, Column, NamedFrom, Series};

/// Converts a Polars AnyValue to a cell.
///
/// Integers become `Int` (a `u64` too large for `i64` becomes `Float`), floats
/// become `Float`, strings become `Text`. Booleans and temporal values are
/// kept as their text rendering.
pub fn any_to_cell(value: AnyValue<'_>) -> Cell {
    match value {
        AnyValue::Null => Cell::Null,
        AnyValue::Int8(v) => Cell::Int(i64::from(v)),
        AnyValue::Int16(v) => Cell::Int(i64::from(v)),
        AnyValue::Int32(v) => Cell::Int(i64::from(v)),
        AnyValue::Int64(v) => Cell::Int(v),
        AnyValue::UInt8(v) => Cell::Int(i64::from(v)),
        AnyValue::UInt16(v) => Cell::Int(i64::from(v)),
        AnyValue::UInt32(v) => Cell::Int(i64::from(v)),
        AnyValue::UInt64(v) => i64::try_from(v).map_or(Cell::Float(v as f64), Cell::Int),
        AnyValue::Float32(v) => Cell::Float(f64::from(v)),
        AnyValue::Float64(v) => Cell::Float(v),
        AnyValue::String(s) => Cell::text(s),
        AnyValue::StringOwned(s) => Cell::text(s.as_str()),
        AnyValue::Boolean(b) => Cell::text(b.to_string()),
        other => Cell::text(other.to_string()),
    }
}

/// Storage type chosen for a column of cells on export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Int,
    Float,
    Text,
}

/// Pick the narrowest Polars-friendly kind that holds every cell.
///
/// Only integers (or absent) is `Int`; any mix of integers and floats is
/// `Float`; anything holding text, or nothing at all, is `Text`.
pub fn column_kind(cells: &[Cell]) -> CellKind {
    let mut kind = None;
    for cell in cells {
        kind = match (kind, cell) {
            (_, Cell::Null) => kind,
            (_, Cell::Text(_)) => return CellKind::Text,
            (None | Some(CellKind::Int), Cell::Int(_)) => Some(CellKind::Int),
            (_, Cell::Int(_) | Cell::Float(_)) => Some(CellKind::Float),
        };
    }
    kind.unwrap_or(CellKind::Text)
}

/// Build a Polars column from cells, typed by [`column_kind`].
///
/// Text columns render numbers through the cell's `Display`, so `200.0`
/// becomes `"200"` next to strings.
pub fn cells_to_column(name: &str, cells: &[Cell]) -> Column {
    let series = match column_kind(cells) {
        CellKind::Int => {
            let values: Vec<Option<i64>> = cells
                .iter()
                .map(|cell| match cell {
                    Cell::Int(v) => Some(*v),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), values)
        }
        CellKind::Float => {
            let values: Vec<Option<f64>> = cells.iter().map(Cell::as_f64).collect();
            Series::new(name.into(), values)
        }
        CellKind::Text => {
            let values: Vec<Option<String>> = cells
                .iter()
                .map(|cell| (!cell.is_null()).then(|| cell.to_string()))
                .collect();
            Series::new(name.into(), values)
        }
    };
    series.into()
}
