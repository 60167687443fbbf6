//! FIPS 140-1 §4.11.1 statistical test suite, run against live output.
//!
//! Exercises the tests through the public API only: a freshly seeded
//! `SecureRng`, drawing one fixed-size sample, must pass all four tests.

use isaac_secure_rng::diagnostics::{fips_140_1, SAMPLE_BYTES};
use isaac_secure_rng::{SecureRng, SecureRngOptions};

#[test]
fn p9_default_seeded_rng_passes_all_four_tests() {
    let mut rng = SecureRng::new(SecureRngOptions::default()).unwrap();
    let sample = rng.bytes(SAMPLE_BYTES);
    let report = fips_140_1(&sample);
    assert!(report.all_passed(), "{:?}", report);
}

/// A narrower, 64-bit seed should behave no differently once seeded: the
/// engine always refills to the same 256-word internal state regardless of
/// how few seed words fed it.
#[test]
fn minimum_seed_width_still_passes() {
    let mut rng = SecureRng::new(SecureRngOptions {
        bits: Some(64),
        nonblocking: true,
    })
    .unwrap();
    let sample = rng.bytes(SAMPLE_BYTES);
    let report = fips_140_1(&sample);
    assert!(report.all_passed(), "{:?}", report);
}
