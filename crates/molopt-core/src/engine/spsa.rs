use super::constraint::{Constraint, Identity};
use super::error::SpsaError;
use super::gradient::estimate_gk;
use super::objective::Objective;
use super::perturbation::Perturbation;
use super::progress::{Progress, ProgressReporter};
use std::iter::{FusedIterator, Zip};
use tracing::{debug, trace, warn};

/// The SPSA driver: an [`Iterator`] over successive parameter estimates.
///
/// Each call to `next` performs one iteration:
///
/// 1. take the next `(a_k, c_k)` pair from the two schedules (in lockstep),
/// 2. estimate the gradient with [`estimate_gk`],
/// 3. step `theta[i] - a_k * g_k[i]`,
/// 4. project the result with the constraint (identity by default),
/// 5. yield the new estimate, which also becomes the running state.
///
/// The driver never stops by itself while both schedules are infinite; use
/// [`Iterator::take`] or simply stop pulling. If either schedule runs out the
/// iterator ends without error. A failed iteration yields its error once and
/// fuses the iterator, leaving [`Spsa::theta`] at the last successful estimate.
///
/// ```ignore
/// use molopt::engine::{perturbation::Bernoulli, schedule, spsa::Spsa};
///
/// let objective = |theta: &[f64]| theta[0] * theta[0];
/// let estimates = Spsa::new(
///     objective,
///     vec![10.0],
///     schedule::standard_ak(0.5, 10.0, 0.602),
///     schedule::standard_ck(0.5, 0.101),
///     Bernoulli::new(1.0, 1)?,
/// );
/// let last = estimates.take(1000).last().unwrap()?;
/// ```
pub struct Spsa<'r, O, A, C, D, P = Identity> {
    objective: O,
    theta: Vec<f64>,
    schedules: Zip<A, C>,
    delta: D,
    constraint: P,
    iteration: usize,
    finished: bool,
    reporter: Option<&'r ProgressReporter<'r>>,
}

impl<O, A, C, D> Spsa<'static, O, A, C, D>
where
    A: Iterator<Item = f64>,
    C: Iterator<Item = f64>,
{
    /// Creates a driver starting from `t0`, which fixes the dimension of the run.
    pub fn new<IA, IC>(objective: O, t0: Vec<f64>, a: IA, c: IC, delta: D) -> Self
    where
        IA: IntoIterator<Item = f64, IntoIter = A>,
        IC: IntoIterator<Item = f64, IntoIter = C>,
    {
        Self {
            objective,
            theta: t0,
            schedules: a.into_iter().zip(c),
            delta,
            constraint: Identity,
            iteration: 0,
            finished: false,
            reporter: None,
        }
    }
}

impl<'r, O, A, C, D, P> Spsa<'r, O, A, C, D, P> {
    /// Replaces the projection applied after every update.
    pub fn with_constraint<Q>(self, constraint: Q) -> Spsa<'r, O, A, C, D, Q> {
        Spsa {
            objective: self.objective,
            theta: self.theta,
            schedules: self.schedules,
            delta: self.delta,
            constraint,
            iteration: self.iteration,
            finished: self.finished,
            reporter: self.reporter,
        }
    }

    /// Reports a [`Progress::Step`] event after every successful iteration.
    pub fn with_reporter<'s>(self, reporter: &'s ProgressReporter<'s>) -> Spsa<'s, O, A, C, D, P> {
        Spsa {
            objective: self.objective,
            theta: self.theta,
            schedules: self.schedules,
            delta: self.delta,
            constraint: self.constraint,
            iteration: self.iteration,
            finished: self.finished,
            reporter: Some(reporter),
        }
    }

    /// The most recent estimate (`t0` before the first iteration).
    pub fn theta(&self) -> &[f64] {
        &self.theta
    }

    /// Number of completed iterations.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn dimension(&self) -> usize {
        self.theta.len()
    }

    /// Consumes the driver and returns the objective, e.g. to inspect its state.
    pub fn into_objective(self) -> O {
        self.objective
    }
}

impl<O, A, C, D, P> Spsa<'_, O, A, C, D, P>
where
    O: Objective,
    D: Perturbation,
    P: Constraint,
{
    fn step(&mut self, ak: f64, ck: f64) -> Result<Vec<f64>, SpsaError> {
        let gk = estimate_gk(&mut self.objective, &self.theta, &mut self.delta, ck)?;

        let updated: Vec<f64> = self
            .theta
            .iter()
            .zip(&gk)
            .map(|(t, g)| t - ak * g)
            .collect();
        let projected = self.constraint.project(updated);
        if projected.len() != self.theta.len() {
            return Err(SpsaError::DimensionMismatch {
                context: "constraint output",
                expected: self.theta.len(),
                found: projected.len(),
            });
        }

        self.iteration += 1;
        self.theta.clone_from(&projected);
        trace!(iteration = self.iteration, ak, ck, "Completed SPSA iteration.");
        if let Some(reporter) = self.reporter {
            reporter.report(Progress::Step {
                iteration: self.iteration,
                step_size: ak,
                perturbation_size: ck,
            });
        }
        Ok(projected)
    }
}

impl<O, A, C, D, P> Iterator for Spsa<'_, O, A, C, D, P>
where
    O: Objective,
    A: Iterator<Item = f64>,
    C: Iterator<Item = f64>,
    D: Perturbation,
    P: Constraint,
{
    type Item = Result<Vec<f64>, SpsaError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let Some((ak, ck)) = self.schedules.next() else {
            debug!(
                iterations = self.iteration,
                "Gain schedules exhausted, ending SPSA run."
            );
            self.finished = true;
            return None;
        };

        match self.step(ak, ck) {
            Ok(theta) => Some(Ok(theta)),
            Err(e) => {
                warn!(
                    iteration = self.iteration + 1,
                    error = %e,
                    "SPSA iteration failed; keeping the last successful estimate."
                );
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

impl<O, A, C, D, P> FusedIterator for Spsa<'_, O, A, C, D, P>
where
    O: Objective,
    A: Iterator<Item = f64>,
    C: Iterator<Item = f64>,
    D: Perturbation,
    P: Constraint,
{
}
