//! Typed pipeline errors.
//!
//! Every variant aborts the run under the default
//! [`crate::driver::ErrorPolicy::Fail`] policy. File-scoped variants --
//! everything that condemns a single input file -- may instead be skipped
//! under `SkipAndLog`; resource variants never are.

use std::path::PathBuf;

use bytecanon_kernel::code::CodeKind;

use crate::tags::TAG_COUNT;

/// Failure anywhere in the pipeline or the diagnostics harvester.
#[derive(Debug)]
pub enum PipelineError {
    /// An input file is not valid JSON.
    JsonParse { path: PathBuf, detail: String },
    /// The artifact does not contain exactly one source unit.
    UnitCount { path: PathBuf, count: usize },
    /// The single source unit does not contain exactly one contract.
    ContractCount { path: PathBuf, count: usize },
    /// A required JSON key is absent or has the wrong type.
    MissingField { path: PathBuf, field: &'static str },
    /// A bytecode field is not valid hex text.
    BadBytecodeHex {
        path: PathBuf,
        kind: CodeKind,
        detail: String,
    },
    /// A qualified contract name does not split into exactly [`TAG_COUNT`] tags.
    MalformedName { name: String, parts: usize },
    /// Exclusive create of an output table failed because the path exists.
    OutputAlreadyExists { path: PathBuf },
    /// The canonical-file destination is not an existing directory.
    DestinationNotADirectory { path: PathBuf },
    /// Filesystem failure.
    Io { detail: String },
}

impl PipelineError {
    /// Whether this error condemns a single input file rather than the run's
    /// output resources. Only file-scoped errors are skippable under
    /// [`crate::driver::ErrorPolicy::SkipAndLog`].
    #[must_use]
    pub fn is_file_scoped(&self) -> bool {
        matches!(
            self,
            Self::JsonParse { .. }
                | Self::UnitCount { .. }
                | Self::ContractCount { .. }
                | Self::MissingField { .. }
                | Self::BadBytecodeHex { .. }
                | Self::MalformedName { .. }
        )
    }
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::JsonParse { path, detail } => {
                write!(f, "invalid JSON in {}: {detail}", path.display())
            }
            Self::UnitCount { path, count } => {
                write!(
                    f,
                    "expected exactly one source unit in {}, found {count}",
                    path.display()
                )
            }
            Self::ContractCount { path, count } => {
                write!(
                    f,
                    "expected exactly one contract in {}, found {count}",
                    path.display()
                )
            }
            Self::MissingField { path, field } => {
                write!(f, "missing field \"{field}\" in {}", path.display())
            }
            Self::BadBytecodeHex { path, kind, detail } => {
                write!(
                    f,
                    "invalid {kind} bytecode hex in {}: {detail}",
                    path.display()
                )
            }
            Self::MalformedName { name, parts } => {
                write!(
                    f,
                    "qualified name \"{name}\" splits into {parts} tags, expected {TAG_COUNT}"
                )
            }
            Self::OutputAlreadyExists { path } => {
                write!(f, "output file already exists: {}", path.display())
            }
            Self::DestinationNotADirectory { path } => {
                write!(f, "destination is not a directory: {}", path.display())
            }
            Self::Io { detail } => write!(f, "I/O error: {detail}"),
        }
    }
}

impl std::error::Error for PipelineError {}
