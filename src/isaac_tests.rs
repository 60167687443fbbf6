use super::*;

/// S1: seed of 256 zeros, first four outputs. Pinned against a reference
/// run of the exact mixing/refill pseudocode this module implements.
#[test]
fn s1_zero_seed_first_four_outputs() {
    let mut engine = IsaacEngine::new(&[0u32; 256]).unwrap();
    let outputs = [
        engine.next_u32(),
        engine.next_u32(),
        engine.next_u32(),
        engine.next_u32(),
    ];
    assert_eq!(
        outputs,
        [0x182600f3, 0x300b4a8d, 0x301b6622, 0xb08acd21]
    );
}

/// P1: determinism. Two engines from the same seed produce the same stream.
#[test]
fn p1_determinism() {
    let seed: Vec<u32> = (0..37u32).map(|i| i.wrapping_mul(2654435761u32)).collect();
    let mut e1 = IsaacEngine::new(&seed).unwrap();
    let mut e2 = IsaacEngine::new(&seed).unwrap();
    for _ in 0..1000 {
        assert_eq!(e1.next_u32(), e2.next_u32());
    }
}

/// P2: a short seed is equivalent to the same seed right-padded with zeros.
#[test]
fn p2_seed_padding() {
    let short = [1u32, 2, 3, 4, 5];
    let mut padded = [0u32; 256];
    padded[..5].copy_from_slice(&short);

    let mut e1 = IsaacEngine::new(&short).unwrap();
    let mut e2 = IsaacEngine::new(&padded).unwrap();
    for _ in 0..300 {
        assert_eq!(e1.next_u32(), e2.next_u32());
    }
}

/// Seeds longer than 256 words are rejected.
#[test]
fn invalid_seed_too_long() {
    let seed = vec![0u32; 257];
    let err = IsaacEngine::new(&seed).unwrap_err();
    assert!(matches!(err, RngError::InvalidSeed(257)));
}

/// P10: exactly 256 draws triggers one refill, 257 triggers a second.
#[test]
fn p10_refill_boundary() {
    let mut engine = IsaacEngine::new(&[0u32; 256]).unwrap();
    for _ in 0..255 {
        engine.next_u32();
    }
    assert_eq!(engine.cnt, 1);
    engine.next_u32();
    assert_eq!(engine.cnt, 0, "256th draw exhausts the buffer without refilling yet");
    engine.next_u32();
    assert_eq!(
        engine.cnt, 255,
        "257th draw triggers a refill and consumes one word from it"
    );
}

/// P3: output is always a valid u32 (tautological in a typed language, but
/// documents the invariant and exercises many refills).
#[test]
fn p3_output_width_many_refills() {
    let mut engine = IsaacEngine::new(&[42u32]).unwrap();
    for _ in 0..(256 * 5) {
        let _: u32 = engine.next_u32();
    }
}

#[test]
fn rng_core_next_u64_matches_two_u32_draws() {
    use rand_core::RngCore;

    let seed = [7u32, 8, 9];
    let mut via_u64 = IsaacEngine::new(&seed).unwrap();
    let mut via_u32 = IsaacEngine::new(&seed).unwrap();

    let combined = via_u64.next_u64();
    let lo = via_u32.next_u32() as u64;
    let hi = via_u32.next_u32() as u64;
    assert_eq!(combined, lo | (hi << 32));
}
