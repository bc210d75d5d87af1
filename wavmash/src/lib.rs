//! # wavmash
//!
//! Command-line collage assembler for WAV corpora. Scans a folder for WAV
//! files, pulls a random segment from each, and concatenates them into one
//! 16-bit output file; alternatively scrambles a single file's chunks by a
//! golden-ratio permutation.
//!
//! The numeric pipeline lives in `wavmash-core`; this crate provides the
//! file-system collaborators (scanner, codec) and the CLI orchestration.

pub mod codec;
pub mod pipeline;
pub mod scanner;
