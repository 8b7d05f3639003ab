//! # Core Models Module
//!
//! Data structures describing a molecular system for the purpose of building
//! objective functions over its coordinates.
//!
//! ## Key Components
//!
//! - [`atom`] - Named atom with a Cartesian position
//! - [`topology`] - Bonded interactions (bonds, angles, dihedrals) between atoms
//! - [`system`] - Atoms and topology together, with conversion to and from a flat
//!   coordinate vector
//!
//! ## Usage
//!
//! ```ignore
//! use molopt::core::models::{atom::Atom, system::MolecularSystem, topology::Bond};
//!
//! let mut system = MolecularSystem::new();
//! let a = system.add_atom(Atom::new("C1", Point3::new(0.0, 0.0, 0.0)));
//! let b = system.add_atom(Atom::new("C2", Point3::new(0.16, 0.0, 0.0)));
//! system.add_bond(Bond::new([a, b], 2.5e5, 0.153))?;
//! let theta = system.coordinates();
//! ```

pub mod atom;
pub mod system;
pub mod topology;
