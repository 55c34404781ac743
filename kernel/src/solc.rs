//! Trailing CBOR auxdata detection for solc-style bytecode.
//!
//! solc appends a CBOR-encoded metadata blob to emitted bytecode and encodes
//! the blob's length in the final two bytes (big-endian). The blob carries
//! build provenance (source hash, compiler version), not executed logic, so
//! blanking it collapses semantically identical builds onto one canonical
//! form.

use crate::canon::{CanonicalCode, CanonicalizerV1};

/// Canonicalizer for bytecode with a solc trailing-CBOR metadata section.
///
/// The whole trailing region -- CBOR blob plus the two length bytes -- is
/// overwritten with zeros, so a canonical blob ends in a zero length field
/// and a second pass detects nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolcAuxdata;

impl CanonicalizerV1 for SolcAuxdata {
    fn canonicalize(&self, code: &[u8]) -> CanonicalCode {
        match find_auxdata(code) {
            Some(offset) => {
                let mut bytes = code.to_vec();
                bytes[offset..].fill(0);
                CanonicalCode {
                    bytes,
                    auxdata_offset: Some(offset),
                }
            }
            None => CanonicalCode {
                bytes: code.to_vec(),
                auxdata_offset: None,
            },
        }
    }
}

/// Locate the start of the trailing auxdata region, if one is present.
///
/// The final two bytes encode the CBOR blob length `L`; the region spans the
/// last `L + 2` bytes. The candidate must fit inside the code and its first
/// byte must be a CBOR map header (major type 5), which is how solc frames
/// the blob. Anything else is treated as "no region".
fn find_auxdata(code: &[u8]) -> Option<usize> {
    if code.len() < 2 {
        return None;
    }
    let len = usize::from(u16::from_be_bytes([
        code[code.len() - 2],
        code[code.len() - 1],
    ]));
    if len == 0 || len + 2 > code.len() {
        return None;
    }
    let offset = code.len() - len - 2;
    // CBOR major type 5 (map) in the high three bits.
    if code[offset] >> 5 != 5 {
        return None;
    }
    Some(offset)
}
