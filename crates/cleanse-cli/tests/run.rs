//! Integration tests for file-level cleaning runs.

use std::path::{Path, PathBuf};

use cleanse_cli::run::{CleanOptions, load_config, run_clean};
use cleanse_ingest::read_csv_table;
use cleanse_model::{Cell, ImputeMethod};
use tempfile::TempDir;

const SAMPLE: &str = "\
ST,GENDER,Customer Lifetime Value,Income,Number of Open Complaints
WA,female,10%,100,1/2/00
AZ,M,200,200,0
,,,,
";

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write fixture");
    path
}

fn options(input: &Path) -> CleanOptions {
    CleanOptions {
        input: input.to_path_buf(),
        ..CleanOptions::default()
    }
}

#[test]
fn clean_writes_default_output() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_file(&dir, "customers.csv", SAMPLE);

    let run = run_clean(&options(&input)).expect("run succeeds");

    let output = run.output.expect("output written");
    assert_eq!(output, dir.path().join("customers_cleaned.csv"));
    let written = std::fs::read_to_string(&output).expect("read output");
    assert_eq!(
        written.lines().next(),
        Some("state,gender,customer_lifetime_value,income,number_of_open_complaints")
    );

    let cleaned = read_csv_table(&output).expect("reload output");
    assert_eq!(cleaned.height(), 2);
    let row = cleaned.row(0).expect("row 0");
    assert_eq!(row[0], &Cell::from("Washington"));
    assert_eq!(row[1], &Cell::from("F"));
    assert_eq!(row[2], &Cell::Float(0.1));
    assert_eq!(row[4], &Cell::Int(2));
}

#[test]
fn clean_report_lists_every_step() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_file(&dir, "customers.csv", SAMPLE);

    let run = run_clean(&CleanOptions {
        dry_run: true,
        ..options(&input)
    })
    .expect("run succeeds");

    let lines: Vec<String> = run
        .report
        .steps
        .iter()
        .map(|s| {
            format!(
                "{} {} removed={} changed={}",
                s.step,
                s.outcome.status.as_str(),
                s.outcome.rows_removed,
                s.outcome.cells_changed
            )
        })
        .collect();
    insta::assert_debug_snapshot!(lines, @r#"
    [
        "normalize_column_names applied removed=0 changed=0",
        "rename_column applied removed=0 changed=0",
        "drop_empty_rows applied removed=1 changed=0",
        "drop_duplicate_rows applied removed=0 changed=0",
        "drop_rows_missing applied removed=0 changed=0",
        "parse_percentages applied removed=0 changed=2",
        "impute_missing applied removed=0 changed=0",
        "standardize_gender applied removed=0 changed=1",
        "remap_state applied removed=0 changed=2",
        "remap_education skipped removed=0 changed=0",
        "remap_vehicle_class skipped removed=0 changed=0",
        "split_complaint_count applied removed=0 changed=1",
        "coerce_to_integer applied removed=0 changed=0",
    ]
    "#);
}

#[test]
fn dry_run_writes_nothing() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_file(&dir, "customers.csv", SAMPLE);

    let run = run_clean(&CleanOptions {
        dry_run: true,
        ..options(&input)
    })
    .expect("run succeeds");

    assert!(run.output.is_none());
    assert!(!dir.path().join("customers_cleaned.csv").exists());
    assert_eq!(run.report.rows_after, 2);
}

#[test]
fn failed_step_writes_nothing() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_file(
        &dir,
        "customers.csv",
        "ST,GENDER,Customer Lifetime Value,Income\nWA,F,10%,100\n",
    );
    let output = dir.path().join("out.csv");

    let err = run_clean(&CleanOptions {
        output: Some(output.clone()),
        ..options(&input)
    })
    .unwrap_err();

    let message = format!("{err:#}");
    assert!(message.contains("step 'split_complaint_count' failed"), "{message}");
    assert!(!output.exists());
}

#[test]
fn config_file_overrides_defaults() {
    let dir = TempDir::new().expect("temp dir");
    let config_path = write_file(
        &dir,
        "config.json",
        r#"{"impute": {"method": "mode"}, "categorical": []}"#,
    );

    let config = load_config(Some(&config_path)).expect("load config");

    assert_eq!(ImputeMethod::from_name(&config.impute.method), Some(ImputeMethod::Mode));
    assert!(config.categorical.is_empty());
    assert_eq!(config.integer_column, "income");
}

#[test]
fn invalid_config_is_reported() {
    let dir = TempDir::new().expect("temp dir");
    let config_path = write_file(&dir, "config.json", "{ not json");

    let err = load_config(Some(&config_path)).unwrap_err();
    assert!(format!("{err:#}").starts_with("parse config"));
}

#[test]
fn impute_method_override_reaches_pipeline() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_file(
        &dir,
        "customers.csv",
        "GENDER,Customer Lifetime Value,Income,Number of Open Complaints\n\
         F,1,10,0\n\
         M,,20,0\n\
         F,3,30,0\n\
         M,3,40,0\n",
    );

    let run = run_clean(&CleanOptions {
        impute_method: Some("average".to_string()),
        dry_run: true,
        ..options(&input)
    })
    .expect("run succeeds");

    let diagnostics: Vec<String> = run
        .report
        .diagnostics()
        .filter(|(step, _)| *step == "impute_missing")
        .map(|(_, d)| d.to_string())
        .collect();
    assert_eq!(
        diagnostics,
        vec!["invalid imputation method 'average', using median".to_string()]
    );
}
