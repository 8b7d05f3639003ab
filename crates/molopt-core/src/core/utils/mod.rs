//! Geometric primitives over Cartesian coordinates.

pub mod geometry;
