//! Differential Evolution (DE).
//!
//! A population-based optimizer for continuous problems. Each generation,
//! every population member competes against a trial vector built by
//! perturbing a random member with the scaled difference of two others
//! (DE/rand/1), mixing in the member's own coordinates (binomial crossover)
//! and repairing the result. The trial survives only if strictly better.
//!
//! # Key Types
//!
//! - [`DeProblem`]: problem definition (initialization, repair, evaluation)
//! - [`DeConfig`]: population size, generations, `F`, `CR`, seed
//! - [`DeRunner`]: executes the generation loop
//! - [`DeResult`]: best candidate and run statistics
//!
//! # References
//!
//! - Storn & Price (1997), "Differential Evolution – A Simple and Efficient
//!   Heuristic for Global Optimization over Continuous Spaces"
//! - Price, Storn & Lampinen (2005), *Differential Evolution: A Practical
//!   Approach to Global Optimization*

mod config;
mod operators;
mod runner;
mod types;

pub use config::DeConfig;
pub use runner::{DeResult, DeRunner, GenerationStats};
pub use types::DeProblem;
