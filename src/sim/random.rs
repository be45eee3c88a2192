//! Injectable randomness
//!
//! Widgets never reach for a global RNG. Production code passes a seeded
//! PCG stream; tests pass a scripted sequence and assert exact outcomes.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of uniform samples in `[0, 1)`
pub trait RandomSource {
    fn next_unit(&mut self) -> f32;

    /// Uniform index in `0..len` (`len` must be non-zero)
    fn pick(&mut self, len: usize) -> usize {
        ((self.next_unit() * len as f32) as usize).min(len.saturating_sub(1))
    }
}

/// Seeded PCG32 stream
#[derive(Debug, Clone)]
pub struct SeededRandom {
    pub seed: u64,
    rng: Pcg32,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

/// Replays a fixed list of samples, cycling when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f32>,
    cursor: usize,
}

impl ScriptedRandom {
    /// Samples are clamped into `[0, 1)`; an empty script always yields 0
    pub fn new(values: impl IntoIterator<Item = f32>) -> Self {
        let values = values
            .into_iter()
            .map(|v| v.clamp(0.0, 1.0 - f32::EPSILON))
            .collect();
        Self { values, cursor: 0 }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_is_deterministic() {
        let mut a = SeededRandom::new(42);
        let mut b = SeededRandom::new(42);
        for _ in 0..16 {
            let x = a.next_unit();
            assert_eq!(x, b.next_unit());
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn test_scripted_cycles() {
        let mut r = ScriptedRandom::new([0.25, 0.75]);
        assert_eq!(r.next_unit(), 0.25);
        assert_eq!(r.next_unit(), 0.75);
        assert_eq!(r.next_unit(), 0.25);
    }

    #[test]
    fn test_pick_stays_in_range() {
        let mut r = ScriptedRandom::new([0.0, 0.5, 1.0]);
        assert_eq!(r.pick(5), 0);
        assert_eq!(r.pick(5), 2);
        assert_eq!(r.pick(5), 4);
    }
}
