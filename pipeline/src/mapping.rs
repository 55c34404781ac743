//! Mapping-table and canonical-file persistence.
//!
//! The writer is the sole owner of the run's two durable resources: the
//! append-only CSV mapping table and the canonical-bytecode directory. Both
//! are acquired in [`MappingWriter::create`] and released when the writer is
//! finished or dropped. Rows are never rewritten; an interrupted run leaves a
//! valid prefix of rows on disk.

use std::fs::File;
use std::path::{Path, PathBuf};

use bytecanon_kernel::code::{canonical_file_name, CodeKind};
use bytecanon_kernel::digest::{content_digest, ContentDigest};

use crate::error::PipelineError;
use crate::tags::NameTags;

/// One row of the mapping table: a single (artifact, kind) pair.
///
/// Many rows may share `canonical_file_name` / `canonical_digest` when their
/// canonicalized bytecode is byte-identical. That is the deduplication
/// outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingRow {
    /// The contract's qualified name.
    pub name: String,
    /// Which of the two blobs this row records.
    pub kind: CodeKind,
    /// `{canonical_digest}[.rt].hex`.
    pub canonical_file_name: String,
    /// Digest of the bytecode as compiled.
    pub original_digest: ContentDigest,
    /// Digest of the bytecode after metadata blanking.
    pub canonical_digest: ContentDigest,
    /// The six name tags, verbatim.
    pub tags: NameTags,
}

impl MappingRow {
    /// Assemble the row for one bytecode blob and its canonical form.
    #[must_use]
    pub fn build(
        name: &str,
        kind: CodeKind,
        original: &[u8],
        canonical: &[u8],
        tags: &NameTags,
    ) -> Self {
        let canonical_digest = content_digest(canonical);
        Self {
            name: name.to_string(),
            kind,
            canonical_file_name: canonical_file_name(&canonical_digest, kind),
            original_digest: content_digest(original),
            canonical_digest,
            tags: tags.clone(),
        }
    }

    /// The CSV field vector, in table column order:
    /// `name, isRuntime, canonicalFileName, originalDigest, canonicalDigest,
    /// tagSetDisplay, tag1..tag6`.
    #[must_use]
    pub fn fields(&self) -> Vec<String> {
        let mut fields = vec![
            self.name.clone(),
            self.kind.is_runtime().to_string(),
            self.canonical_file_name.clone(),
            self.original_digest.as_str().to_string(),
            self.canonical_digest.as_str().to_string(),
            self.tags.display_set(),
        ];
        fields.extend(self.tags.fields().iter().cloned());
        fields
    }
}

/// Append-only writer for the mapping table plus the canonical-file
/// directory.
#[derive(Debug)]
pub struct MappingWriter {
    table: csv::Writer<File>,
    dest: PathBuf,
}

impl MappingWriter {
    /// Acquire the run's output resources.
    ///
    /// The mapping table is opened with exclusive create, so a pre-existing
    /// file fails the run before any input is processed. The destination
    /// directory must already exist.
    ///
    /// # Errors
    ///
    /// [`PipelineError::DestinationNotADirectory`],
    /// [`PipelineError::OutputAlreadyExists`], or [`PipelineError::Io`].
    pub fn create(mapping_path: &Path, dest_dir: &Path) -> Result<Self, PipelineError> {
        if !dest_dir.is_dir() {
            return Err(PipelineError::DestinationNotADirectory {
                path: dest_dir.to_path_buf(),
            });
        }
        let file = create_new(mapping_path)?;
        Ok(Self {
            table: csv::Writer::from_writer(file),
            dest: dest_dir.to_path_buf(),
        })
    }

    /// Append one row and write the canonical hex file.
    ///
    /// The canonical file is overwritten when it already exists. Its content
    /// is a pure function of its name (the digest plus the kind marker), so
    /// a rewrite is byte-identical.
    ///
    /// # Errors
    ///
    /// [`PipelineError::Io`] on either write.
    pub fn record(&mut self, row: &MappingRow, canonical: &[u8]) -> Result<(), PipelineError> {
        self.table
            .write_record(row.fields())
            .map_err(|e| PipelineError::Io {
                detail: format!("mapping row for {}: {e}", row.name),
            })?;

        let path = self.dest.join(&row.canonical_file_name);
        std::fs::write(&path, hex::encode(canonical)).map_err(|e| PipelineError::Io {
            detail: format!("write {}: {e}", path.display()),
        })
    }

    /// Flush and close the mapping table.
    ///
    /// # Errors
    ///
    /// [`PipelineError::Io`] when the flush fails.
    pub fn finish(mut self) -> Result<(), PipelineError> {
        self.table.flush().map_err(|e| PipelineError::Io {
            detail: format!("flush mapping table: {e}"),
        })
    }
}

/// Open `path` for writing with exclusive create.
pub(crate) fn create_new(path: &Path) -> Result<File, PipelineError> {
    File::options()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::AlreadyExists {
                PipelineError::OutputAlreadyExists {
                    path: path.to_path_buf(),
                }
            } else {
                PipelineError::Io {
                    detail: format!("create {}: {e}", path.display()),
                }
            }
        })
}
