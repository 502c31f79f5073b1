//! Row hygiene steps.
//!
//! Removing rows never leaves gaps: a table addresses rows by position, so the
//! surviving rows are renumbered from zero as a side effect of the removal.

use std::collections::BTreeSet;

use cleanse_model::{Cell, CleanError, Column, Result, StepOutcome, Table};

/// Remove rows in which every cell is absent.
pub fn drop_empty_rows(table: &mut Table) -> Result<StepOutcome> {
    let mut keep = vec![false; table.height()];
    for column in table.columns() {
        for (flag, cell) in keep.iter_mut().zip(&column.cells) {
            if !cell.is_null() {
                *flag = true;
            }
        }
    }
    let removed = table.retain_rows(&keep)?;
    Ok(StepOutcome::applied().with_rows_removed(removed))
}

/// Remove rows equal to an earlier row, keeping the first occurrence.
///
/// Absent equals absent. Numbers compare by value, so `Int(1)` and
/// `Float(1.0)` are the same; text compares exactly.
pub fn drop_duplicate_rows(table: &mut Table) -> Result<StepOutcome> {
    let keep = first_occurrence_mask(table.columns(), table.height());
    let removed = table.retain_rows(&keep)?;
    Ok(StepOutcome::applied().with_rows_removed(removed))
}

/// Remove rows whose cell in `column` is absent.
pub fn drop_rows_missing(table: &mut Table, column: &str) -> Result<StepOutcome> {
    let keep: Vec<bool> = table
        .column(column)
        .ok_or_else(|| CleanError::column_not_found(column))?
        .cells
        .iter()
        .map(|cell| !cell.is_null())
        .collect();
    let removed = table.retain_rows(&keep)?;
    Ok(StepOutcome::applied().with_rows_removed(removed))
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum CellKey<'a> {
    Null,
    Int(i64),
    Float(u64),
    Text(&'a str),
}

fn cell_key(cell: &Cell) -> CellKey<'_> {
    match cell {
        Cell::Null => CellKey::Null,
        Cell::Text(value) => CellKey::Text(value),
        Cell::Int(value) => CellKey::Int(*value),
        Cell::Float(value) => float_key(*value),
    }
}

fn float_key(value: f64) -> CellKey<'static> {
    if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 {
        CellKey::Int(value as i64)
    } else if value.is_nan() {
        CellKey::Float(f64::NAN.to_bits())
    } else {
        CellKey::Float(value.to_bits())
    }
}

fn first_occurrence_mask(columns: &[Column], height: usize) -> Vec<bool> {
    let mut seen = BTreeSet::new();
    let mut keep = Vec::with_capacity(height);
    for idx in 0..height {
        let key: Vec<CellKey<'_>> = columns
            .iter()
            .map(|column| cell_key(&column.cells[idx]))
            .collect();
        keep.push(seen.insert(key));
    }
    keep
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customers() -> Table {
        Table::from_rows(
            &["customer", "gender", "income"],
            vec![
                vec![Cell::from("A1"), Cell::from("F"), Cell::Int(100)],
                vec![Cell::Null, Cell::Null, Cell::Null],
                vec![Cell::from("A1"), Cell::from("F"), Cell::Int(100)],
                vec![Cell::from("B2"), Cell::Null, Cell::Float(100.0)],
                vec![Cell::Null, Cell::Null, Cell::Null],
                vec![Cell::from("B2"), Cell::Null, Cell::Int(100)],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_drop_empty_rows() {
        let mut table = customers();
        let outcome = drop_empty_rows(&mut table).unwrap();

        assert_eq!(outcome.rows_removed, 2);
        assert_eq!(table.height(), 4);
        assert_eq!(table.row(1).unwrap()[0], &Cell::from("A1"));
    }

    #[test]
    fn test_drop_empty_rows_keeps_partially_filled() {
        let mut table = Table::from_rows(
            &["a", "b", "c"],
            vec![vec![Cell::Null, Cell::Null, Cell::from("")]],
        )
        .unwrap();
        drop_empty_rows(&mut table).unwrap();
        assert_eq!(table.height(), 1);
    }

    #[test]
    fn test_drop_duplicate_rows() {
        let mut table = customers();
        let outcome = drop_duplicate_rows(&mut table).unwrap();

        // Second all-null row, repeated A1 row, and B2 with Int(100) == Float(100.0)
        assert_eq!(outcome.rows_removed, 3);
        assert_eq!(table.height(), 3);
        assert_eq!(table.row(2).unwrap()[2], &Cell::Float(100.0));
    }

    #[test]
    fn test_drop_duplicate_rows_distinguishes_null_from_empty_text() {
        let mut table = Table::from_rows(
            &["a"],
            vec![vec![Cell::Null], vec![Cell::from("")], vec![Cell::Int(0)]],
        )
        .unwrap();
        let outcome = drop_duplicate_rows(&mut table).unwrap();
        assert_eq!(outcome.rows_removed, 0);
    }

    #[test]
    fn test_drop_rows_missing() {
        let mut table = customers();
        let outcome = drop_rows_missing(&mut table, "gender").unwrap();

        assert_eq!(outcome.rows_removed, 4);
        assert_eq!(table.height(), 2);
        assert!(table.column("gender").unwrap().cells.iter().all(|c| !c.is_null()));
    }

    #[test]
    fn test_drop_rows_missing_requires_column() {
        let mut table = customers();
        let err = drop_rows_missing(&mut table, "state").unwrap_err();
        assert!(matches!(err, CleanError::ColumnNotFound { column } if column == "state"));
        assert_eq!(table.height(), 6);
    }
}
