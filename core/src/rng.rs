//! Injected randomness.
//!
//! RULE: The engine never touches a platform RNG. Every draw goes through
//! a `RandomSource` handed in by the caller, so a seeded run replays
//! exactly and tests can script every draw.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// A source of uniform floats in [0.0, 1.0).
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;

    /// Pick an index in [0, n). Equivalent to `floor(next_f64() * n)`.
    fn next_index(&mut self, n: usize) -> usize {
        assert!(n > 0, "n must be > 0");
        let idx = (self.next_f64() * n as f64).floor() as usize;
        idx.min(n - 1)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// Seeded production RNG. Same seed, same game.
pub struct GameRng {
    inner: Pcg64Mcg,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }
}

impl RandomSource for GameRng {
    fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
/// Used by tests and by anything that needs a hand-picked day.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "scripted source needs at least one value");
        Self { values, cursor: 0 }
    }

    /// Always returns `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws taken so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f64(&mut self) -> f64 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
