//! Two kinds of randomness
//!
//! [`DeterministicSeeded`] produces values that must be identical on every call
//! for the same seed (series shapes, "minutes ago" labels, CVSS scores).
//! [`CosmeticRandom`] wraps a real RNG and is only used where reproducibility
//! does not matter (bubble jitter, log/trace sampling).

use crate::metrics::hash::seed_of;
use rand::rngs::{StdRng, ThreadRng};
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng, SeedableRng};

fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Stateless, seed-addressed pseudo-random values.
///
/// Every method is a pure function of `(seed, index)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeterministicSeeded {
    seed: u64,
}

impl DeterministicSeeded {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from an entity identifier
    pub fn from_id(id: &str) -> Self {
        Self::new(seed_of(id))
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// A sibling stream, shifted by `delta`
    pub fn offset(&self, delta: u64) -> Self {
        Self::new(self.seed.wrapping_add(delta))
    }

    /// Uniform value in `[0, 1)`
    pub fn unit(&self, index: u64) -> f64 {
        let z = splitmix64(self.seed ^ splitmix64(index));
        (z >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform value in `[-1, 1)`
    pub fn signed(&self, index: u64) -> f64 {
        self.unit(index) * 2.0 - 1.0
    }

    /// Uniform value in `[lo, hi)`
    pub fn range(&self, index: u64, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.unit(index)
    }

    /// Uniform integer in `[lo, hi]`
    pub fn int_range(&self, index: u64, lo: u64, hi: u64) -> u64 {
        if hi <= lo {
            return lo;
        }
        let span = (hi - lo + 1) as f64;
        (lo + (self.unit(index) * span) as u64).min(hi)
    }

    pub fn pick<'a, T>(&self, index: u64, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        items.get(self.int_range(index, 0, items.len() as u64 - 1) as usize)
    }
}

/// Per-call randomness for purely visual or sampling decisions
#[derive(Debug, Clone)]
pub struct CosmeticRandom<R = ThreadRng> {
    rng: R,
}

impl CosmeticRandom<ThreadRng> {
    pub fn new() -> Self {
        Self { rng: thread_rng() }
    }
}

impl Default for CosmeticRandom<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl CosmeticRandom<StdRng> {
    /// Reproducible stream, for tests and benchmarks
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> CosmeticRandom<R> {
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Uniform value in `[-amplitude, amplitude]`
    pub fn jitter(&mut self, amplitude: f64) -> f64 {
        let a = amplitude.abs();
        if a == 0.0 || !a.is_finite() {
            return 0.0;
        }
        self.rng.gen_range(-a..=a)
    }

    /// `true` with probability `p` (clamped to `[0, 1]`)
    pub fn chance(&mut self, p: f64) -> bool {
        let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
        self.rng.gen_bool(p)
    }

    /// Uniform index in `0..n`; `n` must be non-zero
    pub fn below(&mut self, n: usize) -> usize {
        self.rng.gen_range(0..n.max(1))
    }

    pub fn range(&mut self, lo: u64, hi_inclusive: u64) -> u64 {
        if hi_inclusive <= lo {
            return lo;
        }
        self.rng.gen_range(lo..=hi_inclusive)
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}
