use super::potentials;
use super::term::EnergyTerm;
use crate::core::models::system::MolecularSystem;
use crate::core::models::topology::{DihedralPotential, Topology};
use crate::core::utils::geometry;
use nalgebra::Point3;
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Error, PartialEq)]
pub enum EnergyError {
    #[error("Atom index {index} is out of range for a coordinate vector of {num_atoms} atoms")]
    MissingAtom { index: usize, num_atoms: usize },

    #[error("{term} over atoms {atoms:?} is undefined because two of its atoms coincide")]
    DegenerateGeometry {
        term: &'static str,
        atoms: Vec<usize>,
    },
}

pub struct EnergyCalculator;

impl EnergyCalculator {
    /// Bonded energy of a system at its current coordinates.
    pub fn calculate(system: &MolecularSystem) -> Result<EnergyTerm, EnergyError> {
        Self::calculate_from_coordinates(system.topology(), &system.coordinates())
    }

    /// Bonded energy of `topology` evaluated at a flat coordinate vector
    /// `[x0, y0, z0, x1, ...]`.
    ///
    /// This is the form used inside objective functions, where the coordinates
    /// are the optimizer's parameter vector and no system needs to be rebuilt.
    pub fn calculate_from_coordinates(
        topology: &Topology,
        coordinates: &[f64],
    ) -> Result<EnergyTerm, EnergyError> {
        let positions = Positions::new(coordinates);
        let mut energy = EnergyTerm::default();

        for bond in &topology.bonds {
            let [i, j] = bond.atoms;
            let r = geometry::distance(&positions.get(i)?, &positions.get(j)?);
            energy.bond += potentials::harmonic(r, bond.equilibrium_length, bond.force_constant);
        }

        for angle in &topology.angles {
            let [i, j, k] = angle.atoms;
            let theta = geometry::angle(&positions.get(i)?, &positions.get(j)?, &positions.get(k)?)
                .ok_or_else(|| EnergyError::DegenerateGeometry {
                    term: "Angle",
                    atoms: angle.atoms.to_vec(),
                })?;
            energy.angle +=
                potentials::harmonic(theta, angle.equilibrium_angle, angle.force_constant);
        }

        for dihedral in &topology.dihedrals {
            let [i, j, k, l] = dihedral.atoms;
            let phi = geometry::dihedral(
                &positions.get(i)?,
                &positions.get(j)?,
                &positions.get(k)?,
                &positions.get(l)?,
            )
            .ok_or_else(|| EnergyError::DegenerateGeometry {
                term: "Dihedral",
                atoms: dihedral.atoms.to_vec(),
            })?;
            energy.dihedral += match &dihedral.potential {
                DihedralPotential::Fourier(f) => potentials::fourier_dihedral(phi, f),
                DihedralPotential::RyckaertBellemans(c) => potentials::ryckaert_bellemans(phi, c),
            };
        }

        trace!(
            bond = energy.bond,
            angle = energy.angle,
            dihedral = energy.dihedral,
            "Evaluated bonded energy."
        );
        Ok(energy)
    }
}

struct Positions<'a> {
    coordinates: &'a [f64],
}

impl<'a> Positions<'a> {
    fn new(coordinates: &'a [f64]) -> Self {
        Self { coordinates }
    }

    #[inline]
    fn get(&self, index: usize) -> Result<Point3<f64>, EnergyError> {
        self.coordinates
            .get(3 * index..3 * index + 3)
            .map(|xyz| Point3::new(xyz[0], xyz[1], xyz[2]))
            .ok_or(EnergyError::MissingAtom {
                index,
                num_atoms: self.coordinates.len() / 3,
            })
    }
}
