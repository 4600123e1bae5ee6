//! Core trait for Differential Evolution.

use rand::Rng;

use crate::error::Result;

/// Defines a real-valued DE problem with repair.
///
/// The user supplies initialization, repair and evaluation. The DE framework
/// handles mutation, crossover, greedy selection and best tracking.
///
/// # Minimization
///
/// DE minimizes `evaluate`. For maximization, negate the value.
///
/// # Thread Safety
///
/// `DeProblem` must be `Send + Sync` because the runner may process
/// population slots in parallel using rayon.
pub trait DeProblem: Send + Sync {
    /// Number of decision variables per candidate.
    fn dimension(&self) -> usize;

    /// Creates the starting population.
    ///
    /// Errors here abort the run before any generation executes.
    fn initial_population<R: Rng + ?Sized>(&self, size: usize, rng: &mut R) -> Result<Vec<Vec<f64>>>;

    /// Maps an arbitrary vector onto the feasible (or near-feasible) region.
    ///
    /// Called on every mutant and every trial. Must not change the length.
    fn repair(&self, candidate: &[f64]) -> Vec<f64>;

    /// Objective value. Lower is better.
    fn evaluate(&self, candidate: &[f64]) -> f64;

    /// Called at the end of each generation with the best fitness so far.
    ///
    /// The default implementation is a no-op.
    fn on_generation(&self, _generation: usize, _best_fitness: f64) {}
}
