use super::error::SpsaError;
use super::objective::Objective;
use super::perturbation::Perturbation;
use tracing::{instrument, trace};

/// One simultaneous-perturbation estimate of the gradient of `objective` at
/// `theta`.
///
/// Draws a single perturbation `delta_k`, evaluates the objective at
/// `theta + ck * delta_k` and `theta - ck * delta_k` (in that order), and returns
///
/// ```text
/// g_k[i] = (y_plus - y_minus) / (2 * ck * delta_k[i])
/// ```
///
/// The estimate is a single noisy sample; convergence comes from the decaying
/// schedules of the caller, not from the accuracy of one call.
///
/// # Errors
///
/// Validation happens before the objective is called:
///
/// * [`SpsaError::DimensionMismatch`] if `delta_k` does not match `theta` in length.
/// * [`SpsaError::ZeroPerturbationComponent`] if any `delta_k[i]` is zero.
/// * [`SpsaError::ZeroPerturbationScale`] if `ck` is zero.
///
/// Objective failures are returned as [`SpsaError::Objective`] with the original
/// error as the source.
#[instrument(level = "trace", skip_all, fields(ck = ck, dimension = theta.len()))]
pub fn estimate_gk<O, D>(
    objective: &mut O,
    theta: &[f64],
    delta: &mut D,
    ck: f64,
) -> Result<Vec<f64>, SpsaError>
where
    O: Objective + ?Sized,
    D: Perturbation + ?Sized,
{
    let delta_k = delta.sample();
    if delta_k.len() != theta.len() {
        return Err(SpsaError::DimensionMismatch {
            context: "perturbation vector",
            expected: theta.len(),
            found: delta_k.len(),
        });
    }
    if let Some(index) = delta_k.iter().position(|&d| d == 0.0) {
        return Err(SpsaError::ZeroPerturbationComponent { index });
    }
    if ck == 0.0 {
        return Err(SpsaError::ZeroPerturbationScale);
    }

    let theta_plus: Vec<f64> = theta
        .iter()
        .zip(&delta_k)
        .map(|(t, d)| t + ck * d)
        .collect();
    let theta_minus: Vec<f64> = theta
        .iter()
        .zip(&delta_k)
        .map(|(t, d)| t - ck * d)
        .collect();

    let y_plus = objective
        .evaluate(&theta_plus)
        .map_err(|source| SpsaError::Objective { source })?;
    let y_minus = objective
        .evaluate(&theta_minus)
        .map_err(|source| SpsaError::Objective { source })?;
    trace!(y_plus, y_minus, "Evaluated perturbed objective pair.");

    let difference = y_plus - y_minus;
    Ok(delta_k
        .iter()
        .map(|d| difference / (2.0 * ck * d))
        .collect())
}
