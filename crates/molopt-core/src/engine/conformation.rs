use super::error::{EngineError, ObjectiveError};
use super::loss::LossFunction;
use super::objective::Objective;
use crate::core::forcefield::energy::{EnergyCalculator, EnergyError};
use crate::core::models::topology::Topology;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal, NormalError};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone, Copy)]
pub enum NoiseError {
    #[error("Noise standard deviation must be finite and non-negative, got {0}")]
    InvalidStdDev(f64),

    #[error("Failed to build the noise distribution: {0}")]
    Distribution(#[from] NormalError),
}

/// Bonded energy of a molecular topology as a function of its flattened
/// coordinates, optionally observed through additive Gaussian noise.
///
/// `theta` is `[x0, y0, z0, x1, y1, z1, ...]`. The deterministic part is the
/// total bonded energy; the noise part is drawn from `N(0, sigma^2)` on every
/// evaluation, or is zero when no noise is configured.
#[derive(Debug, Clone)]
pub struct ConformationLoss {
    topology: Topology,
    noise: Option<Normal<f64>>,
    rng: StdRng,
}

impl ConformationLoss {
    /// `noise_std_dev == 0` disables the noise term. Negative or non-finite
    /// values are rejected.
    pub fn new(
        topology: Topology,
        noise_std_dev: f64,
        seed: Option<u64>,
    ) -> Result<Self, EngineError> {
        if !noise_std_dev.is_finite() || noise_std_dev < 0.0 {
            return Err(NoiseError::InvalidStdDev(noise_std_dev).into());
        }
        let noise = if noise_std_dev == 0.0 {
            None
        } else {
            Some(Normal::new(0.0, noise_std_dev).map_err(NoiseError::from)?)
        };
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            topology,
            noise,
            rng,
        })
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn is_noisy(&self) -> bool {
        self.noise.is_some()
    }

    /// Noise-free energy, with the geometry error when it is undefined.
    pub fn try_loss(&self, theta: &[f64]) -> Result<f64, EnergyError> {
        EnergyCalculator::calculate_from_coordinates(&self.topology, theta).map(|e| e.total())
    }
}

impl LossFunction for ConformationLoss {
    /// `NaN` where the energy is undefined; use [`ConformationLoss::try_loss`]
    /// to get the reason.
    fn loss(&self, theta: &[f64]) -> f64 {
        self.try_loss(theta).unwrap_or(f64::NAN)
    }

    fn epsilon(&mut self, _theta: &[f64]) -> f64 {
        match &self.noise {
            Some(normal) => normal.sample(&mut self.rng),
            None => 0.0,
        }
    }
}

/// Unlike [`LossObjective`](super::loss::LossObjective), undefined energies end
/// the run instead of feeding `NaN` into the gradient.
impl Objective for ConformationLoss {
    fn evaluate(&mut self, theta: &[f64]) -> Result<f64, ObjectiveError> {
        let loss = self.try_loss(theta)?;
        Ok(loss + self.epsilon(theta))
    }
}
