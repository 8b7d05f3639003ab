use super::error::ObjectiveError;
use super::objective::Objective;

/// An objective split into a deterministic part `L(theta)` and a noise part
/// `epsilon(theta)`, observed together as `y(theta) = L(theta) + epsilon(theta)`.
///
/// Keeping the parts separate lets the noise-free loss be inspected while the
/// optimizer only ever sees the noisy measurement.
pub trait LossFunction {
    /// Deterministic component `L(theta)`.
    fn loss(&self, theta: &[f64]) -> f64;

    /// Stochastic component `epsilon(theta)`.
    fn epsilon(&mut self, theta: &[f64]) -> f64;

    /// Observed value `y(theta) = L(theta) + epsilon(theta)`.
    fn y(&mut self, theta: &[f64]) -> f64 {
        self.loss(theta) + self.epsilon(theta)
    }
}

/// Exposes `y` of a [`LossFunction`] as an [`Objective`].
#[derive(Debug, Clone)]
pub struct LossObjective<L>(pub L);

impl<L: LossFunction> LossObjective<L> {
    pub fn into_inner(self) -> L {
        self.0
    }
}

impl<L: LossFunction> Objective for LossObjective<L> {
    #[inline]
    fn evaluate(&mut self, theta: &[f64]) -> Result<f64, ObjectiveError> {
        Ok(self.0.y(theta))
    }
}
