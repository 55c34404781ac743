//! Bytecode kinds and canonical output naming.

use crate::digest::ContentDigest;

/// Which of a contract's two bytecode blobs a value refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeKind {
    /// Constructor code executed once at deployment.
    Creation,
    /// Code that remains on-chain after deployment.
    Runtime,
}

impl CodeKind {
    /// True for deployed/runtime code.
    #[must_use]
    pub fn is_runtime(self) -> bool {
        matches!(self, Self::Runtime)
    }

    /// The file-name marker: `".rt"` for runtime code, empty for creation.
    #[must_use]
    pub fn marker(self) -> &'static str {
        match self {
            Self::Creation => "",
            Self::Runtime => ".rt",
        }
    }
}

impl std::fmt::Display for CodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Creation => "creation",
            Self::Runtime => "runtime",
        })
    }
}

/// Derive the canonical output file name for a digest/kind pair.
///
/// Format: `{digest}[.rt].hex`. Two blobs of different kinds may share a
/// canonical digest (e.g. two contracts whose deployed code coincides), so
/// the name always encodes the kind explicitly rather than relying on the
/// digest to disambiguate.
#[must_use]
pub fn canonical_file_name(digest: &ContentDigest, kind: CodeKind) -> String {
    format!("{}{}.hex", digest.as_str(), kind.marker())
}
