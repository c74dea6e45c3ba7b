//! Runs the MovieLens-1M pipeline with the fixed default layout: reads `ml-1m/*.dat` and writes
//! `processed_movielens_data.csv` to the current directory.
//!
//! Logging goes through `tracing`; set `RUST_LOG` (e.g. `RUST_LOG=debug`) to change the level.
//! Exits with status 1 if any stage fails.

use std::process::ExitCode;

use movielens_etl::config::PipelineConfig;
use movielens_etl::pipeline::{PipelineReport, TracingObserver, run_pipeline};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_report(report: &PipelineReport) {
    println!("\nFirst {} merged rows:", report.preview.row_count());
    println!("{}", report.column_names.join(","));
    for row in &report.preview.rows {
        let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
        println!("{}", cells.join(","));
    }
    println!("\nMerged shape: ({}, {})", report.rows, report.columns);
    println!("\nSaved to: {}", report.output_path.display());
    println!("File size: {:.2} MB", report.file_size_mb());
}

fn main() -> ExitCode {
    init_logging();

    match run_pipeline(&PipelineConfig::default(), &TracingObserver) {
        Ok(report) => {
            print_report(&report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
