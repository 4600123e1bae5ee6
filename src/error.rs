//! Error types for economic dispatch optimization.
//!
//! Every configuration problem is reported before the first generation runs.
//! The fitness evaluator and the repairer are total functions and never fail.

use thiserror::Error;

/// Errors that can occur while building a dispatch system or running the
/// optimizer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    /// The system has no generating units.
    #[error("dispatch system has no generating units")]
    EmptySystem,

    /// A unit's lower output bound exceeds its upper bound.
    #[error("invalid bounds for unit {unit}: p_min ({p_min}) > p_max ({p_max})")]
    InvalidBounds {
        /// Index of the offending unit
        unit: usize,
        /// Lower output bound
        p_min: f64,
        /// Upper output bound
        p_max: f64,
    },

    /// A cost coefficient is NaN or infinite.
    #[error("invalid cost coefficients for unit {unit}: a = {a}, b = {b}, c = {c}")]
    InvalidCostCoefficients {
        /// Index of the offending unit
        unit: usize,
        /// Quadratic coefficient
        a: f64,
        /// Linear coefficient
        b: f64,
        /// Fixed cost
        c: f64,
    },

    /// A prohibited zone is malformed (`lo > hi` or non-finite edges).
    #[error("invalid prohibited zone {zone} for unit {unit}: [{lo}, {hi}]")]
    InvalidZone {
        /// Index of the offending unit
        unit: usize,
        /// Position of the zone in the unit's zone list
        zone: usize,
        /// Lower zone edge
        lo: f64,
        /// Upper zone edge
        hi: f64,
    },

    /// Prohibited zones cover the unit's whole output range.
    #[error("unit {unit} has no feasible output: prohibited zones cover [p_min, p_max]")]
    NoFeasibleRegion {
        /// Index of the offending unit
        unit: usize,
    },

    /// Rejection sampling could not find an output outside the prohibited zones.
    #[error("no feasible output sampled for unit {unit} after {attempts} attempts")]
    SamplingExhausted {
        /// Index of the offending unit
        unit: usize,
        /// Number of draws made before giving up
        attempts: usize,
    },

    /// Total demand is negative or not finite.
    #[error("invalid total demand: {demand}")]
    InvalidDemand {
        /// The rejected demand value
        demand: f64,
    },

    /// DE needs the target plus three distinct donors.
    #[error("population size ({pop_size}) must be >= 4")]
    PopulationTooSmall {
        /// The rejected population size
        pop_size: usize,
    },

    /// The run must execute at least one generation.
    #[error("max_generations must be at least 1")]
    ZeroGenerations,

    /// Mutation factor is outside `[0, 2]`.
    #[error("invalid mutation factor: {factor} (must be in [0, 2])")]
    InvalidMutationFactor {
        /// The rejected factor
        factor: f64,
    },

    /// Crossover rate is outside `[0, 1]`.
    #[error("invalid crossover rate: {rate} (must be in [0, 1])")]
    InvalidCrossoverRate {
        /// The rejected rate
        rate: f64,
    },

    /// An initializer returned the wrong number of candidates.
    #[error("population size mismatch: expected {expected}, got {got}")]
    PopulationSizeMismatch {
        /// Configured population size
        expected: usize,
        /// Number of candidates produced
        got: usize,
    },

    /// A problem produced a candidate of the wrong length.
    #[error("candidate dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Number of decision variables the problem declares
        expected: usize,
        /// Length of the offending candidate
        got: usize,
    },

    /// No trial ever improved on the `+inf` sentinel.
    #[error("no improving solution found after {generations} generations")]
    ConvergenceFailure {
        /// Number of generations executed
        generations: usize,
    },
}

/// A specialized `Result` type for dispatch operations.
pub type Result<T> = std::result::Result<T, DispatchError>;

impl DispatchError {
    /// Returns `true` if the error was raised before the search started.
    pub fn is_configuration_error(&self) -> bool {
        !self.is_convergence_failure()
    }

    /// Returns `true` if the run completed without recording any solution.
    pub fn is_convergence_failure(&self) -> bool {
        matches!(self, DispatchError::ConvergenceFailure { .. })
    }
}
