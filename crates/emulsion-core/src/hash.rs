//! Deterministic hashing and seeded value streams.
//!
//! Every stochastic effect in the pipeline must be reproducible: the same
//! seed inputs yield bit-identical output across runs and platforms. These
//! helpers avoid `std` hashers (randomized per process) and external RNG
//! crates in favor of fixed-constant integer mixing.

const FNV_OFFSET: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// FNV-1a hash of a byte string.
#[inline]
pub fn hash_bytes(bytes: &[u8]) -> u32 {
    let mut h = FNV_OFFSET;
    for &b in bytes {
        h ^= b as u32;
        h = h.wrapping_mul(FNV_PRIME);
    }
    h
}

/// Hashes a string key together with a signed numeric salt.
///
/// This is the `perAsset` seed derivation: it depends only on the key and
/// salt, never on render-time state.
#[inline]
pub fn hash_seed(key: &str, salt: i64) -> u32 {
    let mut h = hash_bytes(key.as_bytes());
    h = fold(h, salt as u64);
    h
}

/// Folds an extra 64-bit value into an existing hash.
#[inline]
pub fn fold(seed: u32, value: u64) -> u32 {
    let mut h = seed;
    h = h.wrapping_mul(FNV_PRIME) ^ (value as u32);
    h = h.wrapping_mul(FNV_PRIME) ^ ((value >> 32) as u32);
    h
}

/// Hashes pixel coordinates (plus a lane index) under a seed.
///
/// The lane separates independent noise channels drawn at the same
/// coordinate, e.g. chromatic grain's R/G/B lanes.
#[inline]
pub fn hash_coords(seed: u32, x: i32, y: i32, lane: i32) -> u32 {
    let mut h = seed.wrapping_add(FNV_OFFSET);
    h = h.wrapping_mul(FNV_PRIME) ^ (x as u32);
    h = h.wrapping_mul(FNV_PRIME) ^ (y as u32);
    h = h.wrapping_mul(FNV_PRIME) ^ (lane as u32);
    // Final avalanche so low-entropy coordinates spread across all bits.
    h ^= h >> 15;
    h = h.wrapping_mul(0x2c1b_3c6d);
    h ^= h >> 12;
    h
}

/// Maps a hash to a float in [0, 1).
#[inline]
pub fn to_unit(h: u32) -> f32 {
    // 24 mantissa bits keep the conversion exact.
    (h >> 8) as f32 * (1.0 / 16_777_216.0)
}

/// SplitMix64 sequence for drawing a bounded series of values from one seed.
///
/// Used where an effect needs a handful of correlated draws (e.g. placing
/// light leaks and scratches) rather than one value per coordinate.
#[derive(Debug, Clone)]
pub struct SeedStream {
    state: u64,
}

impl SeedStream {
    /// Creates a stream from a 32-bit seed.
    pub fn new(seed: u32) -> Self {
        // Widen by self-concatenation so distinct 32-bit seeds land in
        // distinct 64-bit orbits.
        Self {
            state: (seed as u64) << 32 | seed as u64,
        }
    }

    /// Next raw 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    /// Next value in [0, 1).
    pub fn next_unit(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 * (1.0 / 16_777_216.0)
    }

    /// Next value in [lo, hi).
    pub fn next_range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.next_unit()
    }
}
