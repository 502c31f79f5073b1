//! Table ingestion and export.
//!
//! Loads CSV files through Polars and converts the resulting `DataFrame` into
//! the untyped [`Table`](cleanse_model::Table) the cleaning steps work on, and
//! back again for writing.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use cleanse_ingest::{read_csv_table, write_csv_table};
//!
//! let mut table = read_csv_table(Path::new("marketing_customer_analysis.csv"))?;
//! cleanse_core::clean(&mut table)?;
//! write_csv_table(&table, Path::new("cleaned.csv"))?;
//! ```

mod convert;
mod csv;
mod error;
pub mod polars_utils;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading/Writing ===
pub use csv::{read_csv_frame, read_csv_table, write_csv_table};

// === DataFrame Conversion ===
pub use convert::{table_from_dataframe, table_to_dataframe};
