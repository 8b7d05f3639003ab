use super::atom::Atom;
use super::topology::{Angle, Bond, Dihedral, Topology};
use nalgebra::Point3;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SystemError {
    #[error("{term} term references atom index {index}, but the system has only {num_atoms} atoms")]
    AtomIndexOutOfRange {
        term: &'static str,
        index: usize,
        num_atoms: usize,
    },
    #[error("Coordinate vector has {found} components, expected {expected} (3 per atom)")]
    CoordinateLength { expected: usize, found: usize },
}

/// Represents a molecular system: an ordered list of atoms and the bonded terms
/// acting between them.
///
/// Every term in the topology is guaranteed to reference existing atoms; the
/// constructors and `add_*` methods validate indices on insertion. The order of
/// atoms defines the layout of the flat coordinate vector used as the
/// optimization parameter (`[x0, y0, z0, x1, y1, z1, ...]`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MolecularSystem {
    atoms: Vec<Atom>,
    topology: Topology,
}

impl MolecularSystem {
    /// Creates a new, empty molecular system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a system from its parts, validating every topology index.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::AtomIndexOutOfRange`] for the first term that
    /// references a missing atom.
    pub fn from_parts(atoms: Vec<Atom>, topology: Topology) -> Result<Self, SystemError> {
        let num_atoms = atoms.len();
        for bond in &topology.bonds {
            check_indices("Bond", &bond.atoms, num_atoms)?;
        }
        for angle in &topology.angles {
            check_indices("Angle", &angle.atoms, num_atoms)?;
        }
        for dihedral in &topology.dihedrals {
            check_indices("Dihedral", &dihedral.atoms, num_atoms)?;
        }
        Ok(Self { atoms, topology })
    }

    /// Appends an atom and returns its index.
    pub fn add_atom(&mut self, atom: Atom) -> usize {
        self.atoms.push(atom);
        self.atoms.len() - 1
    }

    pub fn add_bond(&mut self, bond: Bond) -> Result<(), SystemError> {
        check_indices("Bond", &bond.atoms, self.atoms.len())?;
        self.topology.bonds.push(bond);
        Ok(())
    }

    pub fn add_angle(&mut self, angle: Angle) -> Result<(), SystemError> {
        check_indices("Angle", &angle.atoms, self.atoms.len())?;
        self.topology.angles.push(angle);
        Ok(())
    }

    pub fn add_dihedral(&mut self, dihedral: Dihedral) -> Result<(), SystemError> {
        check_indices("Dihedral", &dihedral.atoms, self.atoms.len())?;
        self.topology.dihedrals.push(dihedral);
        Ok(())
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn num_atoms(&self) -> usize {
        self.atoms.len()
    }

    /// Flattens all atom positions into `[x0, y0, z0, x1, y1, z1, ...]`.
    pub fn coordinates(&self) -> Vec<f64> {
        self.atoms
            .iter()
            .flat_map(|atom| [atom.position.x, atom.position.y, atom.position.z])
            .collect()
    }

    /// Overwrites all atom positions from a flat coordinate vector.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::CoordinateLength`] if `coordinates` does not hold
    /// exactly three components per atom; the system is left unchanged.
    pub fn set_coordinates(&mut self, coordinates: &[f64]) -> Result<(), SystemError> {
        let expected = self.atoms.len() * 3;
        if coordinates.len() != expected {
            return Err(SystemError::CoordinateLength {
                expected,
                found: coordinates.len(),
            });
        }
        for (atom, xyz) in self.atoms.iter_mut().zip(coordinates.chunks_exact(3)) {
            atom.position = Point3::new(xyz[0], xyz[1], xyz[2]);
        }
        Ok(())
    }
}

fn check_indices(term: &'static str, indices: &[usize], num_atoms: usize) -> Result<(), SystemError> {
    match indices.iter().find(|&&index| index >= num_atoms) {
        Some(&index) => Err(SystemError::AtomIndexOutOfRange {
            term,
            index,
            num_atoms,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::topology::DihedralPotential;

    fn two_atom_system() -> MolecularSystem {
        let mut system = MolecularSystem::new();
        system.add_atom(Atom::new("A", Point3::new(1.0, 2.0, 3.0)));
        system.add_atom(Atom::new("B", Point3::new(4.0, 5.0, 6.0)));
        system
    }

    #[test]
    fn add_atom_returns_sequential_indices() {
        let mut system = MolecularSystem::new();
        assert_eq!(system.add_atom(Atom::new("A", Point3::origin())), 0);
        assert_eq!(system.add_atom(Atom::new("B", Point3::origin())), 1);
        assert_eq!(system.num_atoms(), 2);
        assert_eq!(system.atom(1).unwrap().name, "B");
        assert!(system.atom(2).is_none());
    }

    #[test]
    fn coordinates_are_flattened_in_atom_order() {
        let system = two_atom_system();
        assert_eq!(system.coordinates(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn set_coordinates_updates_every_atom() {
        let mut system = two_atom_system();
        system
            .set_coordinates(&[0.0, 0.1, 0.2, 0.3, 0.4, 0.5])
            .unwrap();
        assert_eq!(system.atoms()[0].position, Point3::new(0.0, 0.1, 0.2));
        assert_eq!(system.atoms()[1].position, Point3::new(0.3, 0.4, 0.5));
    }

    #[test]
    fn set_coordinates_rejects_wrong_length_and_leaves_system_unchanged() {
        let mut system = two_atom_system();
        let before = system.clone();
        let result = system.set_coordinates(&[0.0; 5]);
        assert_eq!(
            result,
            Err(SystemError::CoordinateLength {
                expected: 6,
                found: 5
            })
        );
        assert_eq!(system, before);
    }

    #[test]
    fn add_bond_validates_atom_indices() {
        let mut system = two_atom_system();
        assert!(system.add_bond(Bond::new([0, 1], 1.0, 1.0)).is_ok());
        assert_eq!(
            system.add_bond(Bond::new([0, 2], 1.0, 1.0)),
            Err(SystemError::AtomIndexOutOfRange {
                term: "Bond",
                index: 2,
                num_atoms: 2
            })
        );
        assert_eq!(system.topology().bonds.len(), 1);
    }

    #[test]
    fn add_angle_and_dihedral_validate_atom_indices() {
        let mut system = two_atom_system();
        assert!(system.add_angle(Angle::new([0, 1, 3], 1.0, 1.0)).is_err());
        assert!(
            system
                .add_dihedral(Dihedral::new(
                    [0, 1, 0, 5],
                    DihedralPotential::Fourier(vec![1.0])
                ))
                .is_err()
        );
        assert!(system.topology().is_empty());
    }

    #[test]
    fn from_parts_rejects_dangling_indices() {
        let atoms = vec![Atom::new("A", Point3::origin())];
        let topology = Topology {
            angles: vec![Angle::new([0, 0, 4], 1.0, 1.0)],
            ..Topology::default()
        };
        let result = MolecularSystem::from_parts(atoms, topology);
        assert!(matches!(
            result,
            Err(SystemError::AtomIndexOutOfRange {
                term: "Angle",
                index: 4,
                ..
            })
        ));
    }
}
