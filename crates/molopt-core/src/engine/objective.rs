use super::error::ObjectiveError;

/// The scalar function `y(theta)` minimized by SPSA.
///
/// Evaluations may be randomized: two calls with the same `theta` are allowed to
/// return different values. Failures are returned to the driver untouched and
/// end the run.
pub trait Objective {
    fn evaluate(&mut self, theta: &[f64]) -> Result<f64, ObjectiveError>;
}

impl<F> Objective for F
where
    F: FnMut(&[f64]) -> f64,
{
    #[inline]
    fn evaluate(&mut self, theta: &[f64]) -> Result<f64, ObjectiveError> {
        Ok(self(theta))
    }
}

/// Adapts a closure returning `Result` into an [`Objective`].
///
/// ```ignore
/// let objective = Fallible(|theta: &[f64]| -> Result<f64, std::io::Error> { Ok(theta[0]) });
/// ```
pub struct Fallible<F>(pub F);

impl<F, E> Objective for Fallible<F>
where
    F: FnMut(&[f64]) -> Result<f64, E>,
    E: Into<ObjectiveError>,
{
    #[inline]
    fn evaluate(&mut self, theta: &[f64]) -> Result<f64, ObjectiveError> {
        (self.0)(theta).map_err(Into::into)
    }
}
