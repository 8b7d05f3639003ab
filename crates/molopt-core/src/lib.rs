//! # molopt Core Library
//!
//! A gradient-free stochastic optimizer (Simultaneous Perturbation Stochastic
//! Approximation, SPSA) together with the geometric primitives and bonded energy
//! terms needed to build physically motivated objectives for molecular structures.
//!
//! ## Architectural Philosophy
//!
//! The library keeps the same three-layer split used throughout:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Atom`, `Topology`,
//!   `MolecularSystem`), geometry helpers and the bonded potentials.
//!
//! - **[`engine`]: The Logic Core.** The SPSA machinery: lazily generated gain
//!   schedules, perturbation distributions, the loss-function contract, the
//!   two-sided gradient estimator and the `Spsa` driver, which is a plain
//!   [`Iterator`] over parameter vectors.
//!
//! - **[`workflows`]: The Public API.** Ties configuration, schedules and the
//!   driver together into complete procedures such as relaxing the geometry of a
//!   molecular system.

pub mod core;
pub mod engine;
pub mod workflows;
