//! Seeded sequence generator
//!
//! A 31-bit linear congruential generator seeded from a string. The state
//! is kept in integers end to end so every platform produces the same
//! sequence for the same seed.

use jp_core::fold_hash;

/// Derive a generator seed from text (usually the round id).
///
/// Never returns 0: a zero seed is replaced with 1.
pub fn seed_from(text: &str) -> u32 {
    match fold_hash(text).unsigned_abs() {
        0 => 1,
        seed => seed,
    }
}

/// `seed = (seed * 1103515245 + 12345) mod 2^31`
#[derive(Debug, Clone)]
pub struct SeededLcg {
    state: u64,
}

impl SeededLcg {
    pub const MULTIPLIER: u64 = 1_103_515_245;
    pub const INCREMENT: u64 = 12_345;
    const MASK: u64 = 0x7FFF_FFFF;

    pub fn new(seed: u32) -> Self {
        let seed = if seed == 0 { 1 } else { seed };
        Self { state: seed as u64 }
    }

    /// Seeded directly from text
    pub fn from_text(text: &str) -> Self {
        Self::new(seed_from(text))
    }

    /// Advance and return the next value in `[0, 2^31)`
    #[inline]
    pub fn next_u31(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
            & Self::MASK;
        self.state as u32
    }

    /// Advance and map to `[0, bound)` as `floor(state / 2^31 * bound)`
    #[inline]
    pub fn next_index(&mut self, bound: usize) -> usize {
        let value = self.next_u31() as u64;
        ((value * bound as u64) >> 31) as usize
    }
}

/// In-place Fisher–Yates shuffle driven by [`SeededLcg`]
pub fn shuffle<T>(items: &mut [T], seed: u32) {
    let mut rng = SeededLcg::new(seed);
    for i in (1..items.len()).rev() {
        let j = rng.next_index(i + 1);
        items.swap(i, j);
    }
}
