//! Integration tests for CSV table loading and writing.

use std::io::Write;

use cleanse_ingest::{read_csv_frame, read_csv_table, table_from_dataframe, write_csv_table};
use cleanse_model::{Cell, Table};
use tempfile::{NamedTempFile, TempDir};

const CUSTOMERS: &str = "\
Customer,ST,GENDER,Education,Customer Lifetime Value,Income,Number of Open Complaints,Vehicle Class
RB50392,Washington,,Master,,0,1/0/00,Four-Door Car
QZ44356,Arizona,F,Bachelor,697953.59%,0,1/0/00,Four-Door Car
AI49188,Nevada,F,Bachelor,1288743.17%,48767,1/0/00,Two-Door Car
,,,,,,,
GA49547,WA,Male,High School or Below,,36357,1/2/00,Sports Car
";

fn customers_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(CUSTOMERS.as_bytes()).expect("write csv");
    file
}

#[test]
fn reads_customer_export() {
    let file = customers_file();
    let table = read_csv_table(file.path()).expect("read csv");

    assert_eq!(table.height(), 5);
    assert_eq!(table.width(), 8);
    let empty_row = table.row(3).expect("row 3");
    assert!(empty_row.iter().all(|cell| cell.is_null()));

    let income = &table.column("Income").expect("income").cells;
    assert_eq!(income[2], Cell::Int(48767));
    let complaints = &table.column("Number of Open Complaints").expect("complaints").cells;
    assert_eq!(complaints[4], Cell::from("1/2/00"));
}

#[test]
fn frame_and_table_agree() {
    let file = customers_file();
    let df = read_csv_frame(file.path()).expect("read frame");
    let table = table_from_dataframe(&df).expect("convert");

    assert_eq!(df.height(), table.height());
    assert_eq!(df.width(), table.width());
}

#[test]
fn written_table_reads_back_with_same_cells() {
    let table = Table::from_rows(
        &["customer", "gender", "customer_lifetime_value", "income", "number_of_open_complaints"],
        vec![
            vec!["QZ44356".into(), "F".into(), Cell::Float(6979.5359), Cell::Int(0), Cell::Int(0)],
            vec!["GA49547".into(), "M".into(), Cell::Float(7645.8618), Cell::Int(36357), Cell::Int(2)],
        ],
    )
    .expect("valid table");
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("cleaned.csv");

    write_csv_table(&table, &path).expect("write csv");
    let reread = read_csv_table(&path).expect("read csv");

    assert_eq!(reread, table);
}

#[test]
fn mixed_column_is_written_as_text() {
    let table = Table::from_rows(
        &["number_of_open_complaints"],
        vec![vec![Cell::Int(5)], vec!["0".into()]],
    )
    .expect("valid table");
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("mixed.csv");

    write_csv_table(&table, &path).expect("write csv");
    let written = std::fs::read_to_string(&path).expect("read back");

    assert_eq!(written, "number_of_open_complaints\n5\n0\n");
}
