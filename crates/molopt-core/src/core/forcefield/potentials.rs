use std::f64::consts::PI;

/// `k * (x - x0)^2`, shared by bond stretching and angle bending.
#[inline]
pub fn harmonic(value: f64, equilibrium: f64, force_constant: f64) -> f64 {
    let displacement = value - equilibrium;
    force_constant * displacement * displacement
}

#[inline]
pub fn fourier_dihedral(phi: f64, coefficients: &[f64]) -> f64 {
    coefficients
        .iter()
        .enumerate()
        .map(|(i, f)| f * (1.0 + ((i + 1) as f64 * phi).cos()))
        .sum()
}

/// Ryckaert-Bellemans series in the polymer convention, `psi = phi - 180°`.
#[inline]
pub fn ryckaert_bellemans(phi: f64, coefficients: &[f64]) -> f64 {
    let cos_psi = (phi - PI).cos();
    let mut power = 1.0;
    let mut energy = 0.0;
    for c in coefficients {
        energy += c * power;
        power *= cos_psi;
    }
    energy
}
