//! Timestamp utilities behind the grouped extension.
//!
//! Modules include:
//! - `calendar`: local/UTC conversion, business days and month arithmetic
//! - `series`: zoned timestamp sequences and input normalization
//! - `infer`: infer the canonical step of a sequence
//! - `future`: generate timestamps past the end of a sequence
/// Calendar primitives shared by inference and generation.
pub mod calendar;
/// Future timestamp generation.
pub mod future;
/// Frequency inference and delta statistics.
pub mod infer;
/// Timestamp sequences and accepted inputs.
pub mod series;
