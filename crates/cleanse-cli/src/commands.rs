use anyhow::{Context, Result};
use comfy_table::Table;

use cleanse_cli::run::{CleanOptions, CleanRun, load_config, run_clean};
use cleanse_core::build_pipeline;

use crate::cli::{CleanArgs, ReportFormatArg, StepsArgs};
use crate::summary::{apply_table_style, header_cell, print_summary};

pub fn run_steps(args: &StepsArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let pipeline = build_pipeline(&config);
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Step")]);
    apply_table_style(&mut table);
    for (idx, name) in pipeline.step_names().into_iter().enumerate() {
        table.add_row(vec![(idx + 1).to_string(), name.to_string()]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_clean_command(args: &CleanArgs) -> Result<CleanRun> {
    let options = CleanOptions {
        input: args.input.clone(),
        output: args.output.clone(),
        config: args.config.clone(),
        impute_method: args.impute_method.clone(),
        dry_run: args.dry_run,
    };
    let run = run_clean(&options)?;
    match args.report {
        ReportFormatArg::Table => print_summary(&run),
        ReportFormatArg::Json => {
            let json =
                serde_json::to_string_pretty(&run.report).context("serialize run report")?;
            println!("{json}");
        }
    }
    Ok(run)
}
