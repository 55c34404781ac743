//! Content digests for bytecode blobs.
//!
//! A digest is the 128-bit MD5 of the raw bytes, rendered as 32 lowercase hex
//! characters. The corpus is built from trusted compiler output, so the
//! digest only has to separate blobs that genuinely differ, not resist an
//! adversary.
//!
//! **Exactly one place defines content addressing**: both the original and
//! the canonical form of every blob go through [`content_digest`].

use md5::{Digest, Md5};

/// A 128-bit content digest in fixed-width lowercase hex form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentDigest {
    hex: String,
}

impl ContentDigest {
    /// The 32-character lowercase hex digest.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.hex
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.hex)
    }
}

/// Compute the content digest of a byte slice.
///
/// Deterministic: the same bytes always produce the same digest.
#[must_use]
pub fn content_digest(data: &[u8]) -> ContentDigest {
    let mut hasher = Md5::new();
    hasher.update(data);
    ContentDigest {
        hex: hex::encode(hasher.finalize()),
    }
}
