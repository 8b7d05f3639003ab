use crate::core::utils::geometry;
use nalgebra::Point3;

/// Represents an atom of a molecular system.
///
/// Only what the bonded energy terms need is stored: an identifying name and the
/// Cartesian position. Coordinates are in nanometers.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The name of the atom (e.g., "C1", "HA").
    pub name: String,
    /// The 3D coordinates of the atom in nanometers.
    pub position: Point3<f64>,
}

impl Atom {
    /// Creates a new `Atom` with the given name and position.
    pub fn new(name: &str, position: Point3<f64>) -> Self {
        Self {
            name: name.to_string(),
            position,
        }
    }

    /// Distance between two atoms.
    #[inline]
    pub fn distance(i: &Atom, j: &Atom) -> f64 {
        geometry::distance(&i.position, &j.position)
    }

    /// Bond angle `i-j-k` in radians, `None` if two of the atoms coincide.
    #[inline]
    pub fn angle(i: &Atom, j: &Atom, k: &Atom) -> Option<f64> {
        geometry::angle(&i.position, &j.position, &k.position)
    }

    /// Torsion angle `i-j-k-l` in radians, `None` if `j` and `k` coincide.
    #[inline]
    pub fn dihedral(i: &Atom, j: &Atom, k: &Atom, l: &Atom) -> Option<f64> {
        geometry::dihedral(&i.position, &j.position, &k.position, &l.position)
    }
}
