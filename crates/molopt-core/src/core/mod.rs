//! # Core Module
//!
//! Stateless building blocks for molecular objectives.
//!
//! - **Molecular Representation** ([`models`]) - Atoms, bonded topology and systems
//! - **Energy Calculations** ([`forcefield`]) - Bonded potentials and energy aggregation
//! - **Geometry** ([`utils`]) - Distance, angle and dihedral primitives

pub mod forcefield;
pub mod models;
pub mod utils;
