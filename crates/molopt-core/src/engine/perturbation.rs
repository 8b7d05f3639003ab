use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PerturbationError {
    #[error("Perturbation magnitude must be finite and non-zero, got {0}")]
    InvalidMagnitude(f64),
}

/// Source of the random perturbation vectors `delta_k`.
///
/// Every call returns a fresh vector whose components are independent, have
/// mean zero and are never exactly zero, because the gradient estimate divides
/// by each of them. Any `FnMut() -> Vec<f64>` closure is a perturbation.
pub trait Perturbation {
    fn sample(&mut self) -> Vec<f64>;
}

impl<F> Perturbation for F
where
    F: FnMut() -> Vec<f64>,
{
    #[inline]
    fn sample(&mut self) -> Vec<f64> {
        self()
    }
}

/// Symmetric Bernoulli (Rademacher) perturbation: each of the `dimension`
/// components is `-magnitude` or `+magnitude` with equal probability.
#[derive(Debug, Clone)]
pub struct Bernoulli<R = StdRng> {
    magnitude: f64,
    dimension: usize,
    rng: R,
}

impl Bernoulli<StdRng> {
    /// Bernoulli perturbation seeded from system entropy.
    pub fn new(magnitude: f64, dimension: usize) -> Result<Self, PerturbationError> {
        Self::with_rng(magnitude, dimension, StdRng::from_entropy())
    }

    /// Bernoulli perturbation with a reproducible sequence.
    pub fn seeded(magnitude: f64, dimension: usize, seed: u64) -> Result<Self, PerturbationError> {
        Self::with_rng(magnitude, dimension, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Bernoulli<R> {
    pub fn with_rng(magnitude: f64, dimension: usize, rng: R) -> Result<Self, PerturbationError> {
        if magnitude == 0.0 || !magnitude.is_finite() {
            return Err(PerturbationError::InvalidMagnitude(magnitude));
        }
        Ok(Self {
            magnitude,
            dimension,
            rng,
        })
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }
}

impl<R: Rng> Perturbation for Bernoulli<R> {
    fn sample(&mut self) -> Vec<f64> {
        let magnitude = self.magnitude;
        (0..self.dimension)
            .map(|_| {
                if self.rng.gen_bool(0.5) {
                    magnitude
                } else {
                    -magnitude
                }
            })
            .collect()
    }
}
