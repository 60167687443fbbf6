//! Error taxonomy for the entropy/ISAAC/façade pipeline.
//!
//! One flat enum covers every failure kind the pipeline can raise, in the
//! style the rest of the corpus uses for subsystem errors: a `thiserror`
//! derive with one `#[error("...")]` variant per failure.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RngError {
    #[error("invalid option: bits must be a power of two in [64, 8192], got {0}")]
    InvalidOption(u32),

    #[error("no entropy source available (nonblocking={nonblocking})")]
    NoEntropySource { nonblocking: bool },

    #[error("entropy read from {source_name} failed: {reason}")]
    EntropyReadError { source_name: String, reason: String },

    #[error("string_from called with an empty bag")]
    EmptyBag,

    #[error("range {0} exceeds 2^32")]
    RangeTooLarge(u64),

    #[error("seed exceeds 256 words (got {0})")]
    InvalidSeed(usize),
}
