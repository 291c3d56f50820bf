// 🎲 Seed Derivation - Deterministic pseudo-randomness
// Rolling string hash for the run seed and the sine-based channel generator

// ============================================================================
// SEED HASH
// ============================================================================

/// Hash text into a positive, nonzero seed.
///
/// Walks the UTF-16 code units of `text` with `h = h * 31 + unit` in
/// wrapping 32-bit signed arithmetic, then returns `|h| + 1`.
/// `i32::MIN` has no positive i32 counterpart, hence the widening.
pub fn hash_seed(text: &str) -> u64 {
    let mut h: i32 = 0;
    for unit in text.encode_utf16() {
        h = h.wrapping_mul(31).wrapping_add(unit as i32);
    }
    (h as i64).unsigned_abs() + 1
}

/// Seed for one run: the citizen name with the wall-clock millis appended.
pub fn seed_for(name: &str, timestamp_ms: i64) -> u64 {
    hash_seed(&format!("{}{}", name, timestamp_ms))
}

// ============================================================================
// CHANNEL GENERATOR
// ============================================================================

/// Pseudo-random value in [0, 1) for a (seed, channel) pair.
///
/// `x = sin(seed + channel * 57.13) * 10000`, result is the fractional part
/// of `x` (taken with `floor`, so negative `x` still lands in [0, 1)).
pub fn random_from_seed(seed: u64, channel: u32) -> f64 {
    let x = (seed as f64 + channel as f64 * 57.13).sin() * 10000.0;
    let frac = x - x.floor();
    // x - floor(x) can round up to exactly 1.0 for tiny negative x
    if frac >= 1.0 {
        0.0
    } else {
        frac
    }
}

// ============================================================================
// ARITHMETIC HELPERS
// ============================================================================

/// Round half up toward positive infinity (`2.5 -> 3`, `-2.5 -> -2`).
///
/// `f64::round` rounds half away from zero, which disagrees on negative ties.
pub fn js_round(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

// ============================================================================
// TESTS
// ============================================================================
