use super::config::ConfigError;
use super::conformation::NoiseError;
use super::perturbation::PerturbationError;
use crate::core::forcefield::energy::EnergyError;
use crate::core::models::system::SystemError;
use thiserror::Error;

/// Error type returned by user-supplied objective functions.
pub type ObjectiveError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum SpsaError {
    #[error("Dimension mismatch in {context}: expected {expected} components, found {found}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Perturbation component {index} is zero; the gradient estimate divides by it")]
    ZeroPerturbationComponent { index: usize },

    #[error("Perturbation size c_k is zero; the gradient estimate divides by it")]
    ZeroPerturbationScale,

    #[error("Objective evaluation failed: {source}")]
    Objective {
        #[source]
        source: ObjectiveError,
    },
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid perturbation distribution: {0}")]
    Perturbation(#[from] PerturbationError),

    #[error("Optimization failed: {0}")]
    Spsa(#[from] SpsaError),

    #[error("Energy evaluation failed: {0}")]
    Energy(#[from] EnergyError),

    #[error("Molecular system error: {0}")]
    System(#[from] SystemError),

    #[error("Invalid noise model: {0}")]
    Noise(#[from] NoiseError),
}
