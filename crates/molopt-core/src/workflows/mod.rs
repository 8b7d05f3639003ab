//! # Workflows Module
//!
//! High-level procedures that wire configuration, gain schedules, perturbations
//! and the SPSA driver together.
//!
//! ## Overview
//!
//! Workflows are the entry points for callers who do not want to assemble an
//! [`Spsa`](crate::engine::spsa::Spsa) driver by hand. Each one validates its
//! inputs, reports progress through a
//! [`ProgressReporter`](crate::engine::progress::ProgressReporter), and returns a
//! plain result struct.
//!
//! ## Architecture
//!
//! - **Minimization** ([`minimize`]) - A fixed-length SPSA run of any
//!   [`Objective`](crate::engine::objective::Objective) with standard schedules
//!   and seeded Bernoulli perturbations.
//! - **Relaxation** ([`relax`]) - Minimizes the bonded energy of a
//!   [`MolecularSystem`](crate::core::models::system::MolecularSystem) over its
//!   flattened Cartesian coordinates and writes the result back.

pub mod minimize;
pub mod relax;
