//! Bytecanon Kernel: content addressing and bytecode canonicalization.
//!
//! # API Surface
//!
//! The kernel exposes three concerns:
//!
//! - [`digest::content_digest`] -- the one place that defines content addressing
//! - [`code::canonical_file_name`] -- stable output naming for a digest/kind pair
//! - [`canon::CanonicalizerV1`] -- the metadata-blanking contract, with the
//!   shipped [`solc::SolcAuxdata`] implementation beside it
//!
//! # Module Dependency Direction
//!
//! `digest` ← `code`; `canon` ← `solc`. One-way only. The kernel imports no
//! internal crate and performs no I/O.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod canon;
pub mod code;
pub mod digest;
pub mod solc;
