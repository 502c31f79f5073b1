//! Value normalization steps.
//!
//! Every step here computes all of its replacements before writing any of
//! them, so a step that fails part way leaves its column as it found it.

use cleanse_model::{Cell, CategoricalMapping, CleanError, Result, StepOutcome, Table};

use crate::skip_missing_column;

/// Read a percentage or plain number.
///
/// `"12.5%"` becomes `0.125`; `" 200 "` becomes `200.0`. Returns `None` when
/// the remaining text is not a number.
pub fn parse_percentage(raw: &str) -> Option<f64> {
    if raw.contains('%') {
        let stripped = raw.replace('%', "");
        stripped.trim().parse::<f64>().ok().map(|v| v / 100.0)
    } else {
        raw.trim().parse::<f64>().ok()
    }
}

/// Turn percentage strings and numeric strings in `column` into floats.
///
/// Values that read as NaN (`"nan"`, `"NaN%"`) are stored as `Null`.
pub fn parse_percentages(table: &mut Table, column: &str) -> Result<StepOutcome> {
    let cells = table
        .cells_mut(column)
        .ok_or_else(|| CleanError::column_not_found(column))?;

    let mut updates = Vec::new();
    for (row, cell) in cells.iter().enumerate() {
        let parsed = match cell {
            Cell::Null => continue,
            Cell::Float(value) if !value.is_nan() => continue,
            Cell::Float(value) => *value,
            Cell::Int(value) => *value as f64,
            Cell::Text(raw) => parse_percentage(raw).ok_or_else(|| CleanError::Parse {
                column: column.to_string(),
                row,
                value: cell.describe(),
            })?,
        };
        let parsed = if parsed.is_nan() {
            Cell::Null
        } else {
            Cell::Float(parsed)
        };
        updates.push((row, parsed));
    }
    Ok(apply_updates(cells, updates))
}

/// Reduce each text value in `column` to its first character, uppercased.
pub fn standardize_gender(table: &mut Table, column: &str) -> Result<StepOutcome> {
    let Some(cells) = table.cells_mut(column) else {
        return Ok(skip_missing_column("standardize_gender", column));
    };

    let mut updates = Vec::new();
    for (row, cell) in cells.iter().enumerate() {
        let Cell::Text(value) = cell else { continue };
        let Some(first) = value.chars().next() else {
            continue;
        };
        let initial: String = first.to_uppercase().collect();
        if initial != *value {
            updates.push((row, Cell::Text(initial)));
        }
    }
    Ok(apply_updates(cells, updates))
}

/// Replace text values found in the mapping; everything else passes through.
pub fn remap_categorical(table: &mut Table, mapping: &CategoricalMapping) -> Result<StepOutcome> {
    let Some(cells) = table.cells_mut(&mapping.column) else {
        return Ok(skip_missing_column("remap_categorical", &mapping.column));
    };

    let mut changed = 0;
    for cell in cells.iter_mut() {
        if let Cell::Text(raw) = cell
            && let Some(canonical) = mapping.lookup(raw)
            && canonical != raw.as_str()
        {
            *cell = Cell::text(canonical);
            changed += 1;
        }
    }
    Ok(StepOutcome::applied().with_cells_changed(changed))
}

/// Replace `a/b/...` strings with the integer in their second field.
///
/// Text of one character or less, numbers and absent cells are left alone.
pub fn split_complaint_count(table: &mut Table, column: &str) -> Result<StepOutcome> {
    let cells = table
        .cells_mut(column)
        .ok_or_else(|| CleanError::column_not_found(column))?;

    let mut updates = Vec::new();
    for (row, cell) in cells.iter().enumerate() {
        let Cell::Text(raw) = cell else { continue };
        if raw.chars().count() <= 1 {
            continue;
        }
        let field = raw.split('/').nth(1).ok_or_else(|| CleanError::MissingField {
            column: column.to_string(),
            row,
            value: cell.describe(),
            index: 1,
            delimiter: '/',
        })?;
        let count = field.trim().parse::<i64>().map_err(|_| CleanError::Parse {
            column: column.to_string(),
            row,
            value: format!("'{field}'"),
        })?;
        updates.push((row, Cell::Int(count)));
    }
    Ok(apply_updates(cells, updates))
}

/// Cast every cell in `column` to an integer.
///
/// Floats are truncated toward zero. Absent cells, text that is not an
/// integer, and floats outside the `i64` range fail the step.
pub fn coerce_to_integer(table: &mut Table, column: &str) -> Result<StepOutcome> {
    let cells = table
        .cells_mut(column)
        .ok_or_else(|| CleanError::column_not_found(column))?;

    let mut updates = Vec::new();
    for (row, cell) in cells.iter().enumerate() {
        let converted = match cell {
            Cell::Int(_) => continue,
            Cell::Float(value) => float_to_i64(*value),
            Cell::Text(raw) => raw.trim().parse::<i64>().ok(),
            Cell::Null => None,
        };
        let value = converted.ok_or_else(|| CleanError::Conversion {
            column: column.to_string(),
            row,
            value: cell.describe(),
        })?;
        updates.push((row, Cell::Int(value)));
    }
    Ok(apply_updates(cells, updates))
}

fn float_to_i64(value: f64) -> Option<i64> {
    let truncated = value.trunc();
    if truncated.is_finite() && truncated >= i64::MIN as f64 && truncated < i64::MAX as f64 {
        Some(truncated as i64)
    } else {
        None
    }
}

fn apply_updates(cells: &mut [Cell], updates: Vec<(usize, Cell)>) -> StepOutcome {
    let changed = updates.len();
    for (row, cell) in updates {
        cells[row] = cell;
    }
    StepOutcome::applied().with_cells_changed(changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cleanse_model::{Column, Diagnostic};

    fn single(name: &str, cells: Vec<Cell>) -> Table {
        Table::new(vec![Column::new(name, cells)]).unwrap()
    }

    fn cells<'a>(table: &'a Table, name: &str) -> &'a [Cell] {
        &table.column(name).unwrap().cells
    }

    #[test]
    fn test_parse_percentage() {
        assert_eq!(parse_percentage("12.5%"), Some(0.125));
        assert_eq!(parse_percentage(" 10 % "), Some(0.1));
        assert_eq!(parse_percentage("200"), Some(200.0));
        assert_eq!(parse_percentage("abc%"), None);
        assert_eq!(parse_percentage(""), None);
    }

    #[test]
    fn test_parse_percentages() {
        let mut table = single(
            "clv",
            vec![
                Cell::from("12.5%"),
                Cell::from("200"),
                Cell::Null,
                Cell::Int(7),
                Cell::Float(3.5),
            ],
        );
        let outcome = parse_percentages(&mut table, "clv").unwrap();

        assert_eq!(outcome.cells_changed, 3);
        assert_eq!(
            cells(&table, "clv"),
            &[
                Cell::Float(0.125),
                Cell::Float(200.0),
                Cell::Null,
                Cell::Float(7.0),
                Cell::Float(3.5),
            ]
        );
    }

    #[test]
    fn test_parse_percentages_stores_nan_as_null() {
        let mut table = single(
            "clv",
            vec![Cell::from("nan"), Cell::from("NaN%"), Cell::Float(f64::NAN), Cell::from("5")],
        );
        let outcome = parse_percentages(&mut table, "clv").unwrap();

        assert_eq!(outcome.cells_changed, 4);
        assert_eq!(
            cells(&table, "clv"),
            &[Cell::Null, Cell::Null, Cell::Null, Cell::Float(5.0)]
        );
    }

    #[test]
    fn test_parse_percentages_fails_without_partial_writes() {
        let mut table = single("clv", vec![Cell::from("10%"), Cell::from("n/a")]);
        let err = parse_percentages(&mut table, "clv").unwrap_err();

        assert!(matches!(err, CleanError::Parse { row: 1, .. }));
        assert_eq!(cells(&table, "clv")[0], Cell::from("10%"));
    }

    #[test]
    fn test_parse_percentages_requires_column() {
        let mut table = single("other", vec![]);
        assert!(matches!(
            parse_percentages(&mut table, "clv"),
            Err(CleanError::ColumnNotFound { .. })
        ));
    }

    #[test]
    fn test_standardize_gender() {
        let mut table = single(
            "gender",
            vec![
                Cell::from("Female"),
                Cell::from("male"),
                Cell::from("M"),
                Cell::from(""),
                Cell::Null,
                Cell::Int(1),
            ],
        );
        let outcome = standardize_gender(&mut table, "gender").unwrap();

        assert_eq!(outcome.cells_changed, 2);
        assert_eq!(
            cells(&table, "gender"),
            &[
                Cell::from("F"),
                Cell::from("M"),
                Cell::from("M"),
                Cell::from(""),
                Cell::Null,
                Cell::Int(1),
            ]
        );
    }

    #[test]
    fn test_standardize_gender_missing_column_is_skipped() {
        let mut table = single("sex", vec![Cell::from("female")]);
        let outcome = standardize_gender(&mut table, "gender").unwrap();

        assert!(outcome.is_skipped());
        assert!(matches!(
            outcome.diagnostics.as_slice(),
            [Diagnostic::MissingColumn { column }] if column == "gender"
        ));
        assert_eq!(cells(&table, "sex")[0], Cell::from("female"));
    }

    #[test]
    fn test_remap_categorical() {
        let mut table = single(
            "state",
            vec![
                Cell::from("AZ"),
                Cell::from("Cali"),
                Cell::from("Oregon"),
                Cell::from("az"),
                Cell::Null,
            ],
        );
        let outcome = remap_categorical(&mut table, &CategoricalMapping::state()).unwrap();

        assert_eq!(outcome.cells_changed, 2);
        assert_eq!(
            cells(&table, "state"),
            &[
                Cell::from("Arizona"),
                Cell::from("California"),
                Cell::from("Oregon"),
                Cell::from("az"),
                Cell::Null,
            ]
        );
    }

    #[test]
    fn test_remap_categorical_missing_column_is_skipped() {
        let mut table = single("state", vec![Cell::from("Luxury SUV")]);
        let outcome = remap_categorical(&mut table, &CategoricalMapping::vehicle_class()).unwrap();
        assert!(outcome.is_skipped());
    }

    #[test]
    fn test_split_complaint_count() {
        let mut table = single(
            "complaints",
            vec![
                Cell::from("1/5/00"),
                Cell::from("0"),
                Cell::Null,
                Cell::Int(2),
                Cell::from("1/0/00"),
            ],
        );
        split_complaint_count(&mut table, "complaints").unwrap();

        assert_eq!(
            cells(&table, "complaints"),
            &[
                Cell::Int(5),
                Cell::from("0"),
                Cell::Null,
                Cell::Int(2),
                Cell::Int(0),
            ]
        );
    }

    #[test]
    fn test_split_complaint_count_missing_field() {
        let mut table = single("complaints", vec![Cell::from("15")]);
        let err = split_complaint_count(&mut table, "complaints").unwrap_err();
        assert!(matches!(err, CleanError::MissingField { index: 1, .. }));
    }

    #[test]
    fn test_split_complaint_count_non_integer_field() {
        let mut table = single("complaints", vec![Cell::from("1/x/00")]);
        let err = split_complaint_count(&mut table, "complaints").unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot parse 'x' as a number in column 'complaints' at row 0"
        );
    }

    #[test]
    fn test_coerce_to_integer() {
        let mut table = single(
            "income",
            vec![
                Cell::Int(10),
                Cell::Float(48_767.9),
                Cell::from(" 300 "),
                Cell::Float(-2.5),
            ],
        );
        let outcome = coerce_to_integer(&mut table, "income").unwrap();

        assert_eq!(outcome.cells_changed, 3);
        assert_eq!(
            cells(&table, "income"),
            &[Cell::Int(10), Cell::Int(48_767), Cell::Int(300), Cell::Int(-2)]
        );
    }

    #[test]
    fn test_coerce_to_integer_rejects_absent_and_text() {
        let mut table = single("income", vec![Cell::Int(1), Cell::Null]);
        let err = coerce_to_integer(&mut table, "income").unwrap_err();
        assert!(matches!(err, CleanError::Conversion { row: 1, .. }));

        let mut table = single("income", vec![Cell::from("12.5")]);
        assert!(coerce_to_integer(&mut table, "income").is_err());

        let mut table = single("income", vec![Cell::Float(f64::NAN)]);
        assert!(coerce_to_integer(&mut table, "income").is_err());
    }
}
