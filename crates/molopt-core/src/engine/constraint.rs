use super::config::Bounds;

/// Projection applied to every updated estimate, after the gradient step.
///
/// Implementations receive the freshly computed vector by value and return the
/// projected one; the output must keep the input's length. Any
/// `FnMut(Vec<f64>) -> Vec<f64>` closure is a constraint.
pub trait Constraint {
    fn project(&mut self, theta: Vec<f64>) -> Vec<f64>;
}

impl<F> Constraint for F
where
    F: FnMut(Vec<f64>) -> Vec<f64>,
{
    #[inline]
    fn project(&mut self, theta: Vec<f64>) -> Vec<f64> {
        self(theta)
    }
}

/// The default projection: returns its input unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

impl Constraint for Identity {
    #[inline]
    fn project(&mut self, theta: Vec<f64>) -> Vec<f64> {
        theta
    }
}

/// Clips every component into `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxConstraint {
    bounds: Bounds,
}

impl BoxConstraint {
    pub fn new(bounds: Bounds) -> Self {
        Self { bounds }
    }
}

impl Constraint for BoxConstraint {
    fn project(&mut self, mut theta: Vec<f64>) -> Vec<f64> {
        for t in theta.iter_mut() {
            *t = t.clamp(self.bounds.lower, self.bounds.upper);
        }
        theta
    }
}

/// `None` behaves like [`Identity`].
impl<C: Constraint> Constraint for Option<C> {
    #[inline]
    fn project(&mut self, theta: Vec<f64>) -> Vec<f64> {
        match self {
            Some(constraint) => constraint.project(theta),
            None => theta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> BoxConstraint {
        BoxConstraint::new(Bounds::new(0.0, 1.0).unwrap())
    }

    #[test]
    fn identity_returns_input_unchanged() {
        assert_eq!(Identity.project(vec![-5.0, 0.5, 9.0]), vec![-5.0, 0.5, 9.0]);
    }

    #[test]
    fn box_constraint_clips_each_component() {
        let projected = unit_box().project(vec![-0.5, 0.25, 1.5]);
        assert_eq!(projected, vec![0.0, 0.25, 1.0]);
    }

    #[test]
    fn optional_constraint_is_identity_when_absent() {
        let mut absent: Option<BoxConstraint> = None;
        assert_eq!(absent.project(vec![2.0]), vec![2.0]);

        let mut present = Some(unit_box());
        assert_eq!(present.project(vec![2.0]), vec![1.0]);
    }

    #[test]
    fn closures_are_constraints() {
        let mut round = |theta: Vec<f64>| theta.into_iter().map(f64::round).collect::<Vec<_>>();
        assert_eq!(round.project(vec![0.4, 1.6]), vec![0.0, 2.0]);
    }
}
