//! Gain sequences in Spall's standard form.
//!
//! Both schedules are infinite iterators that compute each value from the
//! iteration counter on demand. They can only be restarted by constructing a new
//! one (or by cloning an unconsumed one).

use std::iter::FusedIterator;

/// Step-size sequence `a_k = a / (k + 1 + A)^alpha`, `k = 0, 1, 2, ...`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardAk {
    a: f64,
    big_a: f64,
    alpha: f64,
    k: u64,
}

/// Perturbation-size sequence `c_k = c / (k + 1)^gamma`, `k = 0, 1, 2, ...`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardCk {
    c: f64,
    gamma: f64,
    k: u64,
}

pub fn standard_ak(a: f64, big_a: f64, alpha: f64) -> StandardAk {
    StandardAk {
        a,
        big_a,
        alpha,
        k: 0,
    }
}

pub fn standard_ck(c: f64, gamma: f64) -> StandardCk {
    StandardCk { c, gamma, k: 0 }
}

impl StandardAk {
    #[inline]
    fn value_at(&self, k: u64) -> f64 {
        self.a / (k as f64 + 1.0 + self.big_a).powf(self.alpha)
    }
}

impl StandardCk {
    #[inline]
    fn value_at(&self, k: u64) -> f64 {
        self.c / (k as f64 + 1.0).powf(self.gamma)
    }
}

impl Iterator for StandardAk {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let value = self.value_at(self.k);
        self.k += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }

    fn nth(&mut self, n: usize) -> Option<f64> {
        self.k += n as u64;
        self.next()
    }
}

impl Iterator for StandardCk {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let value = self.value_at(self.k);
        self.k += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }

    fn nth(&mut self, n: usize) -> Option<f64> {
        self.k += n as u64;
        self.next()
    }
}

impl FusedIterator for StandardAk {}
impl FusedIterator for StandardCk {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_ak_with_unit_parameters_is_harmonic() {
        let mut ak = standard_ak(1.0, 0.0, 1.0);
        assert_eq!(ak.next(), Some(1.0));
        assert_eq!(standard_ak(1.0, 0.0, 1.0).nth(9), Some(0.1));
    }

    #[test]
    fn standard_ck_with_unit_parameters_is_harmonic() {
        let mut ck = standard_ck(1.0, 1.0);
        assert_eq!(ck.next(), Some(1.0));
        assert_eq!(ck.next(), Some(0.5));
    }

    #[test]
    fn nth_matches_stepping_one_value_at_a_time() {
        let stepped: Vec<f64> = standard_ak(0.5, 10.0, 0.602).take(8).collect();
        assert_eq!(standard_ak(0.5, 10.0, 0.602).nth(7), Some(stepped[7]));

        let stepped: Vec<f64> = standard_ck(0.5, 0.101).take(5).collect();
        assert_eq!(standard_ck(0.5, 0.101).nth(4), Some(stepped[4]));
    }

    #[test]
    fn stability_constant_shifts_the_step_size_sequence() {
        let a0 = standard_ak(2.0, 3.0, 1.0).next().unwrap();
        assert_eq!(a0, 0.5);
    }

    #[test]
    fn schedules_decay_monotonically_and_stay_positive() {
        let ak: Vec<f64> = standard_ak(0.5, 10.0, 0.602).take(1000).collect();
        let ck: Vec<f64> = standard_ck(0.5, 0.101).take(1000).collect();
        for values in [&ak, &ck] {
            assert!(values.iter().all(|&v| v > 0.0));
            assert!(values.windows(2).all(|w| w[1] < w[0]));
        }
    }

    #[test]
    fn schedules_are_unbounded() {
        assert_eq!(standard_ak(1.0, 0.0, 1.0).size_hint(), (usize::MAX, None));
        assert_eq!(standard_ck(1.0, 1.0).size_hint(), (usize::MAX, None));
        assert!(standard_ck(1.0, 1.0).nth(1_000_000).is_some());
    }

    #[test]
    fn clone_snapshots_the_counter() {
        let mut ck = standard_ck(1.0, 1.0);
        ck.next();
        let mut restarted = ck;
        assert_eq!(ck.next(), restarted.next());
    }
}
