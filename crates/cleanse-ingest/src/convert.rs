use cleanse_model::{Column, Table};
use polars::prelude::DataFrame;

use crate::error::Result;
use crate::polars_utils::{any_to_cell, cells_to_column};

/// Copy a DataFrame into a table, keeping column order and names.
pub fn table_from_dataframe(df: &DataFrame) -> Result<Table> {
    let mut columns = Vec::with_capacity(df.width());
    for col in df.get_columns() {
        let mut cells = Vec::with_capacity(col.len());
        for idx in 0..col.len() {
            cells.push(any_to_cell(col.get(idx)?));
        }
        columns.push(Column::new(col.name().as_str(), cells));
    }
    Ok(Table::new(columns)?)
}

/// Copy a table into a DataFrame.
///
/// Each column is typed on its own: integer-only columns become `Int64`,
/// numeric columns `Float64`, and everything else `String`.
pub fn table_to_dataframe(table: &Table) -> Result<DataFrame> {
    let columns = table
        .columns()
        .iter()
        .map(|column| cells_to_column(&column.name, &column.cells))
        .collect();
    Ok(DataFrame::new(columns)?)
}
