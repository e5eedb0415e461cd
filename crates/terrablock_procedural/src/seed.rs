//! # Seed Generator
//!
//! Deterministic scalar stream for reproducible worlds.
//!
//! ## Determinism Guarantee
//!
//! The Nth call to `random()` after constructing with seed S always returns
//! the same value, on any platform. Everything random in generation is drawn
//! from this stream in a fixed order.

/// Linear congruential generator (Numerical Recipes constants).
///
/// `state = (state * 1664525 + 1013904223) mod 2^32`, output `state / 2^32`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedGenerator {
    /// Current LCG state.
    state: u32,
}

impl SeedGenerator {
    /// LCG multiplier.
    const MULTIPLIER: u32 = 1_664_525;
    /// LCG increment.
    const INCREMENT: u32 = 1_013_904_223;
    /// 2^32 as a float divisor.
    const MODULUS: f64 = 4_294_967_296.0;

    /// Creates a new generator from a seed.
    #[inline]
    #[must_use]
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Returns the next value in `[0, 1)`.
    #[inline]
    pub fn random(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
        f64::from(self.state) / Self::MODULUS
    }
}
