use crate::engine::config::SpsaConfig;
use crate::engine::constraint::Constraint;
use crate::engine::error::EngineError;
use crate::engine::objective::Objective;
use crate::engine::perturbation::Bernoulli;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::schedule::{standard_ak, standard_ck};
use crate::engine::spsa::Spsa;
use tracing::{debug, info, instrument};

#[derive(Debug, Clone, PartialEq)]
pub struct MinimizationResult {
    pub theta: Vec<f64>,
    pub iterations: usize,
}

/// Runs `config.max_iterations` SPSA iterations from `t0`.
///
/// The gain sequences are the standard schedules built from `config`, and the
/// perturbations are Bernoulli `±perturbation_magnitude`, seeded from
/// `config.seed` when present.
#[instrument(skip_all, name = "minimize_workflow")]
pub fn run<O, P>(
    objective: O,
    t0: Vec<f64>,
    config: &SpsaConfig,
    constraint: P,
    reporter: &ProgressReporter,
) -> Result<MinimizationResult, EngineError>
where
    O: Objective,
    P: Constraint,
{
    let dimension = t0.len();
    let delta = match config.seed {
        Some(seed) => Bernoulli::seeded(config.perturbation_magnitude, dimension, seed)?,
        None => Bernoulli::new(config.perturbation_magnitude, dimension)?,
    };
    info!(
        dimension,
        iterations = config.max_iterations,
        seed = ?config.seed,
        "Starting SPSA minimization."
    );
    debug!(
        a = config.a,
        big_a = config.big_a,
        alpha = config.alpha,
        c = config.c,
        gamma = config.gamma,
        "Gain schedule parameters."
    );

    let step_sizes =
        standard_ak(config.a, config.big_a, config.alpha).take(config.max_iterations);
    let perturbation_sizes = standard_ck(config.c, config.gamma);

    reporter.report(Progress::TaskStart {
        total_steps: config.max_iterations as u64,
    });
    let mut driver = Spsa::new(objective, t0, step_sizes, perturbation_sizes, delta)
        .with_constraint(constraint)
        .with_reporter(reporter);
    let outcome = driver.by_ref().try_for_each(|estimate| estimate.map(drop));
    reporter.report(Progress::TaskFinish);
    outcome?;

    info!(
        iterations = driver.iteration(),
        "SPSA minimization finished."
    );
    Ok(MinimizationResult {
        theta: driver.theta().to_vec(),
        iterations: driver.iteration(),
    })
}
