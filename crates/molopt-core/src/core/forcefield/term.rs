use std::ops::{Add, AddAssign};

/// Bonded energy split by interaction kind, in kJ/mol.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnergyTerm {
    pub bond: f64,
    pub angle: f64,
    pub dihedral: f64,
}

impl EnergyTerm {
    pub fn new(bond: f64, angle: f64, dihedral: f64) -> Self {
        Self {
            bond,
            angle,
            dihedral,
        }
    }

    #[inline]
    pub fn total(&self) -> f64 {
        self.bond + self.angle + self.dihedral
    }
}

impl Add for EnergyTerm {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            bond: self.bond + rhs.bond,
            angle: self.angle + rhs.angle,
            dihedral: self.dihedral + rhs.dihedral,
        }
    }
}

impl AddAssign for EnergyTerm {
    fn add_assign(&mut self, rhs: Self) {
        self.bond += rhs.bond;
        self.angle += rhs.angle;
        self.dihedral += rhs.dihedral;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_energy_term_with_specified_values() {
        let term = EnergyTerm::new(1.0, 2.0, 3.0);
        assert_eq!(term.bond, 1.0);
        assert_eq!(term.angle, 2.0);
        assert_eq!(term.dihedral, 3.0);
    }

    #[test]
    fn total_returns_sum_of_all_terms() {
        let term = EnergyTerm::new(1.5, -2.0, 0.5);
        assert_eq!(term.total(), 0.0);
    }

    #[test]
    fn add_sums_each_field_correctly() {
        let a = EnergyTerm::new(1.0, 2.0, 3.0);
        let b = EnergyTerm::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, EnergyTerm::new(5.0, 7.0, 9.0));
    }

    #[test]
    fn add_assign_accumulates_each_field_correctly() {
        let mut a = EnergyTerm::new(1.0, 2.0, 3.0);
        a += EnergyTerm::new(4.0, 5.0, 6.0);
        assert_eq!(a, EnergyTerm::new(5.0, 7.0, 9.0));
    }

    #[test]
    fn default_initializes_all_fields_to_zero() {
        let term = EnergyTerm::default();
        assert_eq!(term, EnergyTerm::new(0.0, 0.0, 0.0));
        assert_eq!(term.total(), 0.0);
    }
}
