use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::foundation::error::{WarpError, WarpResult};

/// Source of uniform random values in `[0, 1)`.
///
/// Every generator draws through this trait so tests can replay fixed sequences.
pub trait UniformSource {
    /// Next value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

impl<U: UniformSource + ?Sized> UniformSource for &mut U {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

impl<U: UniformSource + ?Sized> UniformSource for Box<U> {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// `StdRng`-backed source, seeded explicitly or from OS entropy.
#[derive(Clone, Debug)]
pub struct SeededSource {
    rng: StdRng,
}

impl SeededSource {
    /// Deterministic source for a fixed seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Non-deterministic source seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl UniformSource for SeededSource {
    fn next_unit(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }
}

/// Replays a fixed list of values, wrapping around at the end.
#[derive(Clone, Debug)]
pub struct SequenceSource {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceSource {
    /// Build a sequence; every value must lie in `[0, 1)`.
    pub fn new(values: impl Into<Vec<f64>>) -> WarpResult<Self> {
        let values = values.into();
        if values.is_empty() {
            return Err(WarpError::validation("SequenceSource needs at least one value"));
        }
        if let Some(bad) = values.iter().find(|v| !(0.0..1.0).contains(*v)) {
            return Err(WarpError::validation(format!(
                "SequenceSource value {bad} is outside [0, 1)"
            )));
        }
        Ok(Self { values, cursor: 0 })
    }

    /// Number of values drawn so far (not wrapped).
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl UniformSource for SequenceSource {
    fn next_unit(&mut self) -> f64 {
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/random.rs"]
mod tests;
