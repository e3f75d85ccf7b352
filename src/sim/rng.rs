//! Seeded random source (Mulberry32)
//!
//! The whole sim draws from one 32-bit-state generator so that a run is
//! reproducible from its seed alone: same seed, byte-identical obstacle
//! sequence, on every platform. Kept deliberately tiny; the crate-level
//! `rand` dependency is only used to pick a default seed for casual runs.

use serde::{Deserialize, Serialize};

/// Deterministic string -> seed hash (xmur3 finalizer over UTF-16 units).
///
/// Lets a calendar date string produce the same daily-challenge seed on
/// every client, independent of platform string hashing.
pub fn hash_seed(input: &str) -> u32 {
    let units: Vec<u16> = input.encode_utf16().collect();
    let mut h: u32 = 1_779_033_703 ^ units.len() as u32;
    for unit in units {
        h = (h ^ u32::from(unit)).wrapping_mul(3_432_918_353);
        h = h.rotate_left(13);
    }
    h = (h ^ (h >> 16)).wrapping_mul(2_246_822_507);
    h = (h ^ (h >> 13)).wrapping_mul(3_266_489_909);
    h ^ (h >> 16)
}

/// Mulberry32 PRNG: single `u32` of state, full 2^32 period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Seed from an arbitrary string via [`hash_seed`].
    pub fn from_str_seed(input: &str) -> Self {
        Self::new(hash_seed(input))
    }

    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Uniform draw in `[0, 1)`.
    ///
    /// Uses the top 24 bits so the result is exactly representable in f32
    /// and strictly below 1.0.
    pub fn next(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 * (1.0 / 16_777_216.0)
    }

    /// Uniform draw in `[min, max)`.
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.next()
    }

    /// Uniform integer draw in `[min, max]`, both ends inclusive.
    pub fn int_inclusive(&mut self, min: i32, max: i32) -> i32 {
        let v = self.range(min as f32, (max + 1) as f32).floor() as i32;
        v.min(max)
    }
}
