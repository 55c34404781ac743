//! `zero-meta`: replace bytecode metadata sections with zero bytes.
//!
//! Walks the source roots for compiler-output JSON files, canonicalizes each
//! contract's creation and runtime bytecode, writes one hex file per
//! distinct canonical digest into DEST, and appends the artifact → output
//! mapping to FILE.
//!
//! Usage: `zero-meta DEST FILE SRC...`
//! Invoked with no arguments, prints usage and exits non-zero.

use std::path::PathBuf;
use std::process::ExitCode;

use bytecanon_kernel::solc::SolcAuxdata;
use bytecanon_pipeline::driver::{canonicalize_corpus, ErrorPolicy, RunOptions};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Replace metadata sections by zero bytes.
#[derive(Debug, Parser)]
#[command(name = "zero-meta", version, arg_required_else_help = true)]
struct Args {
    /// Directory for contracts with zeroed metadata (must exist).
    #[arg(value_name = "DEST")]
    destination: PathBuf,

    /// CSV file mapping input to output contracts (created, must not exist).
    #[arg(value_name = "FILE")]
    mapping: PathBuf,

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

    match canonicalize_corpus(
        &SolcAuxdata,
        &args.destination,
        &args.mapping,
        &args.sources,
        options,
    ) {
        Ok(summary) => {
            tracing::info!(
                files = summary.files_seen,
                records = summary.records_written,
                skipped = summary.files_skipped,
                "run complete"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("zero-meta: {e}");
            ExitCode::FAILURE
        }
    }
}
