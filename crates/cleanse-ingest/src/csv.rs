//! CSV file reading and writing.

use std::fs::File;
use std::path::Path;

use cleanse_model::Table;
use polars::prelude::{CsvReadOptions, CsvWriter, DataFrame, SerReader, SerWriter};

use crate::convert::{table_from_dataframe, table_to_dataframe};
use crate::error::{IngestError, Result};

fn check_readable(path: &Path) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    if metadata.len() == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Reads a CSV file with a single header row into a Polars DataFrame.
///
/// Column types are inferred from the whole file; empty fields load as null.
pub fn read_csv_frame(path: &Path) -> Result<DataFrame> {
    check_readable(path)?;

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Reads a CSV file into a table.
pub fn read_csv_table(path: &Path) -> Result<Table> {
    let df = read_csv_frame(path)?;
    let table = table_from_dataframe(&df)?;
    tracing::info!(
        path = %path.display(),
        rows = table.height(),
        columns = table.width(),
        "loaded CSV"
    );
    Ok(table)
}

/// Writes a table to `path` as CSV with a header row, replacing any existing file.
pub fn write_csv_table(table: &Table, path: &Path) -> Result<()> {
    let mut df = table_to_dataframe(table)?;
    let file = File::create(path).map_err(|e| IngestError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    CsvWriter::new(file)
        .include_header(true)
        .finish(&mut df)
        .map_err(|e| IngestError::CsvWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    tracing::debug!(
        path = %path.display(),
        rows = table.height(),
        columns = table.width(),
        "wrote CSV"
    );
    Ok(())
}
