//! # Engine Module
//!
//! The SPSA (Simultaneous Perturbation Stochastic Approximation) engine.
//!
//! ## Overview
//!
//! SPSA minimizes a scalar objective `y(theta)` without gradients. Every iteration
//! draws one random perturbation direction, evaluates the objective on both sides
//! of the current estimate, and takes a step along the resulting gradient
//! estimate. Step size `a_k` and perturbation size `c_k` decay along two lazily
//! generated schedules.
//!
//! ## Architecture
//!
//! - **Schedules** ([`schedule`]) - Infinite `a_k` / `c_k` iterators in standard form
//! - **Perturbations** ([`perturbation`]) - Random ± vectors, e.g. [`perturbation::Bernoulli`]
//! - **Objectives** ([`objective`], [`loss`]) - The scalar function being minimized and
//!   its split into deterministic and noise parts
//! - **Gradient Estimation** ([`gradient`]) - Two-sided simultaneous perturbation estimate
//! - **Projection** ([`constraint`]) - Mapping updated estimates back into a feasible set
//! - **Driver** ([`spsa`]) - The [`Iterator`] that ties everything together
//! - **Configuration** ([`config`]) - Hyperparameters with validated builders
//! - **Progress Monitoring** ([`progress`]) - Optional per-iteration callbacks
//! - **Error Handling** ([`error`]) - Engine-level error types
//!
//! ## Key Capabilities
//!
//! - **Lazy evaluation**: nothing happens until the caller pulls the next estimate
//! - **Caller-controlled termination**: the driver never stops on its own while
//!   both schedules are infinite, and stops cleanly as soon as either runs out
//! - **Pass-through failures**: objective errors surface unchanged as the error source

pub mod config;
pub mod conformation;
pub mod constraint;
pub mod error;
pub mod gradient;
pub mod loss;
pub mod objective;
pub mod perturbation;
pub mod progress;
pub mod schedule;
pub mod spsa;
