//! Compiler-diagnostic harvesting: the walk-and-flatten side job.
//!
//! One output row per diagnostic record across all artifact files. This path
//! shares the error taxonomy and the directory walk with the core pipeline
//! but none of its invariants: field presence is the only validation, and a
//! file without an `errors` array contributes zero rows.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::warn;

use crate::driver::{ErrorPolicy, RunOptions};
use crate::error::PipelineError;
use crate::mapping::create_new;
use crate::walk::artifact_files;

/// Outcome counters for one harvest run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HarvestSummary {
    /// Artifact files discovered and attempted.
    pub files_seen: usize,
    /// Diagnostic rows written.
    pub rows_written: usize,
    /// Files dropped under [`ErrorPolicy::SkipAndLog`].
    pub files_skipped: usize,
}

/// Flatten every diagnostic record under `sources` into the table at
/// `dest_csv`, one row per record:
/// `sourceFile, component, errorCode, message, severity, type`.
///
/// `errorCode` is optional in the input and becomes an empty column when
/// absent; the other fields are required.
///
/// # Errors
///
/// [`PipelineError::OutputAlreadyExists`] before any processing when
/// `dest_csv` exists. Afterwards, the first error of any kind under
/// [`ErrorPolicy::Fail`], or the first non-file-scoped error under
/// [`ErrorPolicy::SkipAndLog`].
pub fn harvest_diagnostics(
    dest_csv: &Path,
    sources: &[PathBuf],
    options: RunOptions,
) -> Result<HarvestSummary, PipelineError> {
    let mut table = csv::Writer::from_writer(create_new(dest_csv)?);
    let mut summary = HarvestSummary::default();

    for source in sources {
        for file in artifact_files(source) {
            let path = file?;
            summary.files_seen += 1;
            match harvest_file(&mut table, &path) {
                Ok(rows) => summary.rows_written += rows,
                Err(e)
                    if options.on_file_error == ErrorPolicy::SkipAndLog
                        && e.is_file_scoped() =>
                {
                    warn!(file = %path.display(), error = %e, "skipping malformed artifact file");
                    summary.files_skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    table.flush().map_err(|e| PipelineError::Io {
        detail: format!("flush diagnostics table: {e}"),
    })?;
    Ok(summary)
}

/// Flatten one file's diagnostics. All rows are validated before any is
/// written, so a malformed file contributes nothing.
fn harvest_file(table: &mut csv::Writer<File>, path: &Path) -> Result<usize, PipelineError> {
    let raw = std::fs::read(path).map_err(|e| PipelineError::Io {
        detail: format!("read {}: {e}", path.display()),
    })?;
    let root: Value = serde_json::from_slice(&raw).map_err(|e| PipelineError::JsonParse {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;

    let diagnostics = match root.get("errors") {
        None => return Ok(0),
        Some(v) => v
            .as_array()
            .ok_or_else(|| PipelineError::MissingField {
                path: path.to_path_buf(),
                field: "errors",
            })?,
    };

    let source_file = path.display().to_string();
    let mut rows = Vec::with_capacity(diagnostics.len());
    for record in diagnostics {
        rows.push([
            source_file.clone(),
            required_str(path, record, "component")?.to_string(),
            record
                .get("errorCode")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            required_str(path, record, "message")?.to_string(),
            required_str(path, record, "severity")?.to_string(),
            required_str(path, record, "type")?.to_string(),
        ]);
    }

    for row in &rows {
        table.write_record(row).map_err(|e| PipelineError::Io {
            detail: format!("diagnostic row from {}: {e}", path.display()),
        })?;
    }
    Ok(rows.len())
}

/// Read a required string field from one diagnostic record.
fn required_str<'a>(
    path: &Path,
    record: &'a Value,
    field: &'static str,
) -> Result<&'a str, PipelineError> {
    record
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| PipelineError::MissingField {
            path: path.to_path_buf(),
            field,
        })
}
