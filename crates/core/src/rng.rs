//! RNG module - deterministic randomness for generation and AI
//!
//! Every random decision in the simulation (room sizes, cave noise, spawn
//! shuffles, shooter aggro rolls) draws from one of these, so a level and the
//! behavior of its actors are fully reproducible from a seed.

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Derive an independent stream, e.g. one per level.
    pub fn derive(seed: u32, salt: u32) -> Self {
        let mut rng = Self::new(seed ^ salt.wrapping_mul(0x9E37_79B9));
        // Discard a few outputs so nearby seeds decorrelate.
        for _ in 0..4 {
            rng.next_u32();
        }
        rng
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max). Returns 0 when `max == 0`.
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        // High bits of an LCG are far better distributed than the low ones.
        (self.next_u32() >> 8) % max
    }

    /// Uniform float in [0, 1).
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Bernoulli trial with probability `p`.
    pub fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }

    /// Uniform integer in [lo, hi]. Returns `lo` when the range is empty.
    pub fn range_inclusive(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        lo + self.next_range((hi - lo + 1) as u32) as i32
    }

    /// Pick from `(item, weight)` pairs. Returns `None` if all weights are zero.
    pub fn pick_weighted<T: Copy>(&mut self, pool: &[(T, u32)]) -> Option<T> {
        let total: u32 = pool.iter().map(|&(_, w)| w).sum();
        if total == 0 {
            return None;
        }
        let mut roll = self.next_range(total);
        for &(item, w) in pool {
            if roll < w {
                return Some(item);
            }
            roll -= w;
        }
        None
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}
