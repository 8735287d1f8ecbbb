use fastrand::Rng;
use std::collections::VecDeque;

/// Every random decision in the simulation is drawn through this trait.
pub trait RandomSource {
    /// Uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f32;

    /// Uniform value in `[min, min + spread)`.
    fn range(&mut self, min: f32, spread: f32) -> f32 {
        self.next_unit() * spread + min
    }

    fn pick_index(&mut self, len: usize) -> usize {
        let index = (self.next_unit() * len as f32).floor() as usize;
        index.min(len.saturating_sub(1))
    }

    /// Bernoulli trial that succeeds with `probability`.
    fn chance(&mut self, probability: f32) -> bool {
        self.next_unit() < probability
    }
}

#[derive(Debug, Clone)]
pub struct FastRandSource {
    rng: Rng,
}

impl FastRandSource {
    pub fn new() -> Self {
        Self { rng: Rng::new() }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Rng::with_seed(seed),
        }
    }
}

impl Default for FastRandSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for FastRandSource {
    fn next_unit(&mut self) -> f32 {
        self.rng.f32()
    }
}

/// Replays a fixed sequence, then keeps returning `fallback`.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: VecDeque<f32>,
    fallback: f32,
}

impl ScriptedRandom {
    pub fn new(values: impl IntoIterator<Item = f32>) -> Self {
        Self::with_fallback(values, 0.99)
    }

    pub fn with_fallback(values: impl IntoIterator<Item = f32>, fallback: f32) -> Self {
        Self {
            values: values.into_iter().collect(),
            fallback,
        }
    }

    /// Every draw returns `value`.
    pub fn constant(value: f32) -> Self {
        Self {
            values: VecDeque::new(),
            fallback: value,
        }
    }

    pub fn push(&mut self, value: f32) {
        self.values.push_back(value);
    }

    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f32 {
        self.values.pop_front().unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_source_replays_then_falls_back() {
        let mut rng = ScriptedRandom::with_fallback([0.1, 0.7], 0.5);
        assert_eq!(rng.next_unit(), 0.1);
        assert_eq!(rng.remaining(), 1);
        assert_eq!(rng.next_unit(), 0.7);
        assert_eq!(rng.next_unit(), 0.5);
        assert_eq!(rng.next_unit(), 0.5);
    }

    #[test]
    fn helpers_map_unit_values() {
        let mut rng = ScriptedRandom::new([0.5, 0.99, 0.0, 0.3]);
        assert_eq!(rng.range(50.0, 700.0), 400.0);
        assert_eq!(rng.pick_index(4), 3);
        assert!(rng.chance(0.002));
        assert!(!rng.chance(0.3));
    }

    #[test]
    fn seeded_fastrand_is_reproducible_and_in_range() {
        let mut a = FastRandSource::with_seed(7);
        let mut b = FastRandSource::with_seed(7);
        for _ in 0..100 {
            let value = a.next_unit();
            assert!((0.0..1.0).contains(&value));
            assert_eq!(value, b.next_unit());
        }
    }
}
