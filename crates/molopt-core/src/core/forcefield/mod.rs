//! # Force Field Module
//!
//! Bonded molecular mechanics energy terms used to build objective functions over
//! atomic coordinates.
//!
//! ## Overview
//!
//! The module evaluates the intramolecular (bonded) energy of a
//! [`MolecularSystem`](crate::core::models::system::MolecularSystem):
//!
//! - **Bond stretching** with a harmonic potential
//! - **Angle bending** with a harmonic potential
//! - **Torsions** with Fourier or Ryckaert-Bellemans series
//!
//! Energies are in kJ/mol, lengths in nm, angles in radians.
//!
//! ## Key Components
//!
//! - [`term`] - Per-kind energy aggregation and reporting
//! - [`energy`] - Evaluation of a topology over a flat coordinate vector
//!
//! ## Usage
//!
//! ```ignore
//! use molopt::core::forcefield::energy::EnergyCalculator;
//!
//! let energy = EnergyCalculator::calculate(&system)?;
//! println!("total = {:.4} kJ/mol", energy.total());
//! ```

pub mod energy;
pub(crate) mod potentials;
pub mod term;
