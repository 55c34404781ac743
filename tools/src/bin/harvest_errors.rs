//! `harvest-errors`: extract compiler diagnostics into one flat table.
//!
//! Walks the source roots for compiler-output JSON files and appends one row
//! per diagnostic record to DEST.
//!
//! Usage: `harvest-errors DEST SRC...`
//! Invoked with no arguments, prints usage and exits non-zero.

use std::path::PathBuf;
use std::process::ExitCode;

use bytecanon_pipeline::diagnostics::harvest_diagnostics;
use bytecanon_pipeline::driver::{ErrorPolicy, RunOptions};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Extract compiler errors.
#[derive(Debug, Parser)]
#[command(name = "harvest-errors", version, arg_required_else_help = true)]
struct Args {
    /// CSV file for the diagnostics table (created, must not exist).
    #[arg(value_name = "DEST")]
    destination: PathBuf,

    /// Directories with compiler-output JSON files.
    #[arg(value_name = "SRC", required = true)]
    sources: Vec<PathBuf>,

    /// Log and skip malformed artifact files instead of aborting.
    #[arg(long)]
    skip_malformed: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let options = RunOptions {
        on_file_error: if args.skip_malformed {
            ErrorPolicy::SkipAndLog
        } else {
            ErrorPolicy::Fail
        },
    };

    match harvest_diagnostics(&args.destination, &args.sources, options) {
        Ok(summary) => {
            tracing::info!(
                files = summary.files_seen,
                rows = summary.rows_written,
                skipped = summary.files_skipped,
                "harvest complete"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("harvest-errors: {e}");
            ExitCode::FAILURE
        }
    }
}
