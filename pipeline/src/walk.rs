//! Source-tree traversal shared by both entry points.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::PipelineError;

/// Yield every `*.json` file under `root`, recursively, in walk order.
///
/// Walk order is filesystem-dependent and not guaranteed stable across runs
/// or platforms. Traversal failures surface as [`PipelineError::Io`].
pub(crate) fn artifact_files(
    root: &Path,
) -> impl Iterator<Item = Result<PathBuf, PipelineError>> + '_ {
    WalkDir::new(root).into_iter().filter_map(|entry| {
        match entry {
            Ok(e) if e.file_type().is_file()
                && e.path().extension().is_some_and(|ext| ext == "json") =>
            {
                Some(Ok(e.into_path()))
            }
            Ok(_) => None,
            Err(err) => Some(Err(PipelineError::Io {
                detail: format!("walk {}: {err}", root.display()),
            })),
        }
    })
}
