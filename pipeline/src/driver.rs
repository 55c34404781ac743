//! Pipeline driver: walks input roots and runs every artifact file through
//! read → tag → canonicalize → digest → record.
//!
//! Strictly sequential: files are discovered and processed one at a time in
//! walk order. All per-file validation (JSON parse, shape, fields, tags, hex
//! decode of both blobs) completes before the first write for a file, so a
//! rejected file contributes no rows and no canonical files.

use std::path::{Path, PathBuf};

use bytecanon_kernel::canon::CanonicalizerV1;
use bytecanon_kernel::code::CodeKind;
use serde_json::Value;
use tracing::{debug, warn};

use crate::artifact::read_artifact;
use crate::error::PipelineError;
use crate::mapping::{MappingRow, MappingWriter};
use crate::tags::NameTags;
use crate::walk::artifact_files;

/// What to do when a single input file fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Abort the whole run on the first error.
    #[default]
    Fail,
    /// Log file-scoped errors and continue with the next file. Resource
    /// errors (output collision, missing destination, I/O) abort regardless.
    SkipAndLog,
}

/// Run configuration beyond the input/output paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Per-file error policy.
    pub on_file_error: ErrorPolicy,
}

/// Outcome counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Artifact files discovered and attempted.
    pub files_seen: usize,
    /// Mapping rows written (two per accepted file).
    pub records_written: usize,
    /// Files dropped under [`ErrorPolicy::SkipAndLog`].
    pub files_skipped: usize,
}

/// Canonicalize every artifact under `sources` into `dest_dir`, recording
/// the mapping in `mapping_path`.
///
/// The mapping table is exclusive-created before any input is read. Each
/// accepted file contributes exactly two rows (creation + runtime) and up to
/// two canonical files.
///
/// # Errors
///
/// [`PipelineError::OutputAlreadyExists`] or
/// [`PipelineError::DestinationNotADirectory`] before any processing.
/// Afterwards, the first error of any kind under [`ErrorPolicy::Fail`], or
/// the first non-file-scoped error under [`ErrorPolicy::SkipAndLog`].
pub fn canonicalize_corpus(
    canon: &impl CanonicalizerV1,
    dest_dir: &Path,
    mapping_path: &Path,
    sources: &[PathBuf],
    options: RunOptions,
) -> Result<RunSummary, PipelineError> {
    let mut writer = MappingWriter::create(mapping_path, dest_dir)?;
    let mut summary = RunSummary::default();

    for source in sources {
        for file in artifact_files(source) {
            let path = file?;
            summary.files_seen += 1;
            match process_artifact_file(canon, &mut writer, &path) {
                Ok(rows) => summary.records_written += rows,
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

    writer.finish()?;
    Ok(summary)
}

/// Process one artifact file into two mapping rows and canonical files.
fn process_artifact_file(
    canon: &impl CanonicalizerV1,
    writer: &mut MappingWriter,
    path: &Path,
) -> Result<usize, PipelineError> {
    let raw = std::fs::read(path).map_err(|e| PipelineError::Io {
        detail: format!("read {}: {e}", path.display()),
    })?;
    let root: Value = serde_json::from_slice(&raw).map_err(|e| PipelineError::JsonParse {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;

    let artifact = read_artifact(path, &root)?;
    let tags = NameTags::parse(&artifact.qualified_name)?;
    let creation = decode_bytecode(path, CodeKind::Creation, &artifact.creation_hex)?;
    let runtime = decode_bytecode(path, CodeKind::Runtime, &artifact.runtime_hex)?;

    let mut rows = 0;
    for (kind, original) in [(CodeKind::Creation, creation), (CodeKind::Runtime, runtime)] {
        let canonical = canon.canonicalize(&original);
        let row = MappingRow::build(
            &artifact.qualified_name,
            kind,
            &original,
            &canonical.bytes,
            &tags,
        );
        debug!(
            file = %path.display(),
            kind = %kind,
            out = %row.canonical_file_name,
            "recorded"
        );
        writer.record(&row, &canonical.bytes)?;
        rows += 1;
    }
    Ok(rows)
}

/// Decode one bytecode hex field.
fn decode_bytecode(path: &Path, kind: CodeKind, hex_text: &str) -> Result<Vec<u8>, PipelineError> {
    hex::decode(hex_text).map_err(|e| PipelineError::BadBytecodeHex {
        path: path.to_path_buf(),
        kind,
        detail: e.to_string(),
    })
}
