//! [`SecureRng`]: the user-facing handle layering byte-packing, hex
//! encoding, and unbiased ranged sampling on top of an [`IsaacEngine`]
//! seeded once from [`EntropyProvider`].

use crate::entropy::{EntropyOptions, EntropyProvider};
use crate::error::RngError;
use crate::isaac::IsaacEngine;
use std::sync::Mutex;

/// Construction options for [`SecureRng`].
#[derive(Debug, Clone, Copy)]
pub struct SecureRngOptions {
    /// Seed width in bits. Must be a power of two in `[64, 8192]`.
    /// Defaults to 256.
    pub bits: Option<u32>,
    /// Forwarded to [`EntropyProvider`]. Defaults to `true`.
    pub nonblocking: bool,
}

impl Default for SecureRngOptions {
    fn default() -> Self {
        Self {
            bits: None,
            nonblocking: true,
        }
    }
}

const MIN_BITS: u32 = 64;
const MAX_BITS: u32 = 8192;
const DEFAULT_BITS: u32 = 256;

/// A seeded, self-contained CSPRNG handle.
///
/// Not safe to share across threads for concurrent mutation: construct one
/// handle per thread, or use [`global`] for a mutex-guarded process-wide
/// instance.
#[derive(Debug)]
pub struct SecureRng {
    bits: u32,
    engine: IsaacEngine,
}

impl SecureRng {
    /// Draws `bits/32` words from platform entropy and seeds a fresh ISAAC
    /// engine with them.
    pub fn new(options: SecureRngOptions) -> Result<Self, RngError> {
        let bits = options.bits.unwrap_or(DEFAULT_BITS);
        if !(MIN_BITS..=MAX_BITS).contains(&bits) || !bits.is_power_of_two() {
            return Err(RngError::InvalidOption(bits));
        }

        let provider = EntropyProvider::new(EntropyOptions {
            nonblocking: options.nonblocking,
        })?;
        let words = provider.random_words((bits / 32) as usize)?;
        let engine = IsaacEngine::new(&words)?;

        tracing::info!(bits, source = provider.source_name(), "seeded SecureRng");
        Ok(Self { bits, engine })
    }

    /// The declared seed width in bits.
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// The next raw 32-bit engine output.
    pub fn irand(&mut self) -> u32 {
        self.engine.next_u32()
    }

    /// `n` bytes of output: `n/4` full little-endian words, then an
    /// optional 16-bit middle-byte chunk, then an optional trailing byte,
    /// in that order.
    pub fn bytes(&mut self, n: usize) -> Vec<u8> {
        let mut out = Vec::with_capacity(n);

        for _ in 0..(n / 4) {
            out.extend_from_slice(&self.irand().to_le_bytes());
        }

        let remainder = n % 4;
        if remainder & 0b10 != 0 {
            let word = self.irand();
            let middle = ((word >> 8) & 0xFFFF) as u16;
            out.extend_from_slice(&middle.to_le_bytes());
        }
        if remainder & 0b01 != 0 {
            let word = self.irand();
            out.push((word & 0xFF) as u8);
        }

        out
    }

    /// `bytes(n)` encoded as `2n` lowercase hex digits.
    pub fn bytes_hex(&mut self, n: usize) -> String {
        self.bytes(n)
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect()
    }

    /// `n` octets, each an independent uniform sample from `bag`. Fails
    /// with [`RngError::EmptyBag`] if `bag` is empty.
    ///
    /// The result is a byte sequence, not a `String`: a `bag` need not be
    /// valid UTF-8, and sampling one octet at a time from a multi-byte
    /// `bag` entry would not respect character boundaries anyway.
    pub fn string_from(&mut self, bag: &[u8], n: usize) -> Result<Vec<u8>, RngError> {
        if bag.is_empty() {
            return Err(RngError::EmptyBag);
        }
        let indices = self.ranged_randoms(bag.len() as u64, n)?;
        Ok(indices.into_iter().map(|i| bag[i as usize]).collect())
    }

    /// Draws `count` values uniformly from `[0, range)` by rejection
    /// sampling against the smallest power-of-two divisor `>= range`.
    /// Fails with [`RngError::RangeTooLarge`] if `range` is zero or exceeds
    /// `2^32`.
    pub fn ranged_randoms(&mut self, range: u64, count: usize) -> Result<Vec<u32>, RngError> {
        const MAX_RANGE: u64 = 1u64 << 32;
        if range == 0 || range > MAX_RANGE {
            return Err(RngError::RangeTooLarge(range));
        }

        let mut divisor: u64 = 0;
        let mut n = 0u32;
        while n <= 32 && divisor < range {
            divisor = 1u64 << n;
            n += 1;
        }

        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            loop {
                let candidate = (self.irand() as u64) % divisor;
                if candidate < range {
                    out.push(candidate as u32);
                    break;
                }
            }
        }
        Ok(out)
    }
}

lazy_static::lazy_static! {
    static ref GLOBAL_RNG: Mutex<SecureRng> = Mutex::new(
        SecureRng::new(SecureRngOptions::default())
            .expect("failed to initialize global SecureRng")
    );
}

/// A process-wide [`SecureRng`] behind a mutex, for callers who would
/// rather not thread a handle through their own code. Constructing your
/// own handle per thread is still the default recommendation (see §5).
pub fn global() -> &'static Mutex<SecureRng> {
    &GLOBAL_RNG
}

/// Fills `dest` using the global handle.
pub fn secure_random_bytes(dest: &mut [u8]) {
    let mut rng = GLOBAL_RNG.lock().unwrap();
    let bytes = rng.bytes(dest.len());
    dest.copy_from_slice(&bytes);
}

#[cfg(test)]
#[path = "secure_rng_tests.rs"]
mod secure_rng_tests;
