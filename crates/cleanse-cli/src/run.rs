//! File-level cleaning run: load, clean, write.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, info_span};

use cleanse_core::clean_with_config;
use cleanse_ingest::{read_csv_table, write_csv_table};
use cleanse_model::{CleanReport, CleaningConfig};

/// Inputs for one cleaning run.
#[derive(Debug, Clone, Default)]
pub struct CleanOptions {
    pub input: PathBuf,
    /// Output CSV path; defaults to `<input stem>_cleaned.csv` next to the input.
    pub output: Option<PathBuf>,
    /// JSON file with a partial [`CleaningConfig`].
    pub config: Option<PathBuf>,
    /// Overrides the configured imputation method.
    pub impute_method: Option<String>,
    /// Clean in memory only.
    pub dry_run: bool,
}

/// Result of a successful run.
#[derive(Debug)]
pub struct CleanRun {
    pub input: PathBuf,
    /// Where the cleaned table was written; `None` on a dry run.
    pub output: Option<PathBuf>,
    pub report: CleanReport,
}

/// Load a configuration file, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<CleaningConfig> {
    let Some(path) = path else {
        return Ok(CleaningConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse config {}", path.display()))
}

/// Default output path for an input file.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "table".to_string());
    input.with_file_name(format!("{stem}_cleaned.csv"))
}

/// Load `options.input`, run the cleaning pipeline, and write the result.
///
/// Nothing is written when a step fails.
pub fn run_clean(options: &CleanOptions) -> Result<CleanRun> {
    let span = info_span!("run", input = %options.input.display());
    let _guard = span.enter();

    let mut config = load_config(options.config.as_deref())?;
    if let Some(method) = &options.impute_method {
        config = config.with_impute_method(method.clone());
    }

    let mut table = read_csv_table(&options.input)
        .with_context(|| format!("load {}", options.input.display()))?;
    let report = clean_with_config(&mut table, &config)
        .with_context(|| format!("clean {}", options.input.display()))?;

    let output = if options.dry_run {
        info!("dry run, output not written");
        None
    } else {
        let path = options
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(&options.input));
        write_csv_table(&table, &path).with_context(|| format!("write {}", path.display()))?;
        info!(output = %path.display(), rows = table.height(), "wrote cleaned table");
        Some(path)
    };

    Ok(CleanRun {
        input: options.input.clone(),
        output,
        report,
    })
}
