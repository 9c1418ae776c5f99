//! Deterministic random source for layout generation.
//!
//! `RomuTrio64` drives every shuffle and selection in the crate. It is seeded
//! through `SplitMix64`, which the RomuTrio authors recommend for expanding a
//! single 64-bit seed into the three state words. Not cryptographic.

use crate::consts::DEFAULT_SEED;

/// SplitMix64, used here only to derive `RomuTrio64` state from a seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    const INCREMENT: u64 = 0x9E37_79B9_7F4A_7C15;
    const WARMUP_ROUNDS: usize = 5;

    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn seed(&mut self, seed: u64) {
        self.state = seed;
    }

    #[inline(always)]
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(Self::INCREMENT);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    pub fn warmup(&mut self) {
        for _ in 0..Self::WARMUP_ROUNDS {
            self.next_u64();
        }
    }
}

/// RomuTrio64: three rotated, subtractive 64-bit state words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomuTrio64 {
    x: u64,
    y: u64,
    z: u64,
}

pub type Prng = RomuTrio64;

impl RomuTrio64 {
    const MULTIPLIER: u64 = 15_241_094_284_759_029_579;
    const WARMUP_ROUNDS: usize = 11;

    pub fn new(seed: u64) -> Self {
        let mut prng = Self { x: 0, y: 0, z: 0 };
        prng.seed(seed);
        prng
    }

    /// Resets the state deterministically from `seed`, warmup included.
    pub fn seed(&mut self, seed: u64) {
        let mut init = SplitMix64::new(seed);
        init.warmup();
        self.x = init.next_u64();
        self.y = init.next_u64();
        self.z = init.next_u64();
        for _ in 0..Self::WARMUP_ROUNDS {
            self.next_u64();
        }
    }

    #[inline(always)]
    pub fn next_u64(&mut self) -> u64 {
        let (xp, yp, zp) = (self.x, self.y, self.z);
        self.x = Self::MULTIPLIER.wrapping_mul(zp);
        self.y = yp.wrapping_sub(xp).rotate_left(12);
        self.z = zp.wrapping_sub(yp).rotate_left(44);
        xp
    }

    /// Uniform `f64` in [0, 1) from the upper 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform integer in `[0, bound)`.
    ///
    /// Rejection sampling keeps the draw free of modulo bias, which matters
    /// for the uniformity of `shuffle`.
    #[inline(always)]
    pub fn below(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0, "below() requires a non-empty range");
        let range = bound as u64;
        if range.is_power_of_two() {
            return (self.next_u64() & (range - 1)) as usize;
        }
        let threshold = range.wrapping_neg() % range;
        loop {
            let r = self.next_u64();
            if r >= threshold {
                return (r % range) as usize;
            }
        }
    }

    /// Fisher-Yates shuffle.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.below(i + 1);
            items.swap(i, j);
        }
    }
}

impl Default for RomuTrio64 {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}
