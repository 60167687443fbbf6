//! A small CSPRNG library built on the ISAAC stream generator.
//!
//! [`SecureRng`] is the user-facing handle: construct one from platform
//! entropy, then draw raw bytes, hex strings, 32-bit words, or characters
//! sampled uniformly from a caller-supplied alphabet. Internally it is
//! [`IsaacEngine`] (the generator) seeded once by [`EntropyProvider`] (the
//! platform entropy source), after which the provider is dropped and all
//! further output comes from the deterministic engine.
//!
//! A single handle is not safe to mutate from more than one thread at once;
//! construct one handle per thread, or reach for [`global`] if a
//! process-wide handle behind a mutex is good enough.

#![allow(clippy::upper_case_acronyms)]

pub mod diagnostics;
pub mod entropy;
pub mod error;
pub mod isaac;
pub mod secure_rng;

pub use entropy::{EntropyProvider, EntropySource};
pub use error::RngError;
pub use isaac::IsaacEngine;
pub use secure_rng::{global, secure_random_bytes, SecureRng, SecureRngOptions};
