//! Deterministic RNG: xorshift64* with fixed constants.
//!
//! All generation MUST draw from this generator, and draw order is part of
//! the artifact contract: reordering calls changes the artifact. No library
//! or platform RNG is used anywhere in the pipeline, so any conforming
//! reimplementation can reproduce the stream bit-for-bit from the constants
//! written here.
//!
//! Transition function (Vigna's xorshift64*):
//!
//! ```text
//! x ^= x >> 12;  x ^= x << 25;  x ^= x >> 27;
//! output = x.wrapping_mul(0x2545_F491_4F6C_DD1D)
//! ```
//!
//! Floats in [0,1) take the top 53 bits of the output divided by 2^53.

/// Multiplier applied to the raw xorshift state to produce output.
const OUTPUT_MULTIPLIER: u64 = 0x2545_F491_4F6C_DD1D;

/// Mixed into every seed so the all-zero state (a xorshift fixed point) is
/// unreachable while seed 0 stays a valid, ordinary input.
const SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// Deterministic pseudorandom sequence generator.
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Create a generator from a 64-bit seed. Seed 0 is valid; the same
    /// fixed mixing constant is applied to every seed.
    pub fn new(seed: u64) -> Self {
        Self {
            state: (seed ^ SEED_MIX) | (1 << 63),
        }
    }

    /// Advance the state and return the next raw 64-bit output.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(OUTPUT_MULTIPLIER)
    }

    /// Next float in [0, 1).
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Next float in [min, max).
    #[inline]
    pub fn range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Uniform pick from a non-empty slice.
    #[inline]
    pub fn pick<'a, T>(&mut self, options: &'a [T]) -> &'a T {
        debug_assert!(!options.is_empty());
        let index = (self.next_f64() * options.len() as f64) as usize;
        // next_f64 < 1.0, so index < len; min guards the degenerate rounding.
        &options[index.min(options.len() - 1)]
    }

    /// True with the given probability.
    #[inline]
    pub fn chance(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }
}
