//! DE configuration.
//!
//! [`DeConfig`] holds the fixed hyperparameters of a run.

use crate::error::{DispatchError, Result};

/// Configuration for Differential Evolution.
///
/// `F` and `CR` stay constant for the whole run; there is no early stopping,
/// so every run executes exactly `max_generations` generations.
///
/// # Defaults
///
/// ```
/// use u_dispatch::de::DeConfig;
///
/// let config = DeConfig::default();
/// assert_eq!(config.population_size, 25);
/// assert_eq!(config.max_generations, 300);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_dispatch::de::DeConfig;
///
/// let config = DeConfig::default()
///     .with_population_size(40)
///     .with_mutation_factor(0.6)
///     .with_crossover_rate(0.9)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct DeConfig {
    /// Number of candidates per generation. Must be at least 4.
    pub population_size: usize,

    /// Number of generations to run.
    pub max_generations: usize,

    /// Mutation scale `F` applied to the difference vector, in `[0, 2]`.
    pub mutation_factor: f64,

    /// Crossover rate `CR`, in `[0, 1]`.
    ///
    /// Probability that a coordinate of the trial comes from the mutant.
    /// One coordinate always comes from the mutant regardless.
    pub crossover_rate: f64,

    /// Whether to process population slots in parallel using rayon.
    ///
    /// Each slot draws from its own RNG stream, so results are identical
    /// either way for a given seed.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for DeConfig {
    fn default() -> Self {
        Self {
            population_size: 25,
            max_generations: 300,
            mutation_factor: 0.5,
            crossover_rate: 0.8,
            parallel: false,
            seed: None,
        }
    }
}

impl DeConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the mutation factor `F`.
    pub fn with_mutation_factor(mut self, f: f64) -> Self {
        self.mutation_factor = f;
        self
    }

    /// Sets the crossover rate `CR`.
    pub fn with_crossover_rate(mut self, cr: f64) -> Self {
        self.crossover_rate = cr;
        self
    }

    /// Enables or disables parallel slot processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 4 {
            return Err(DispatchError::PopulationTooSmall {
                pop_size: self.population_size,
            });
        }
        if self.max_generations == 0 {
            return Err(DispatchError::ZeroGenerations);
        }
        if !(0.0..=2.0).contains(&self.mutation_factor) {
            return Err(DispatchError::InvalidMutationFactor {
                factor: self.mutation_factor,
            });
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(DispatchError::InvalidCrossoverRate {
                rate: self.crossover_rate,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DeConfig::default();
        assert_eq!(config.population_size, 25);
        assert_eq!(config.max_generations, 300);
        assert!((config.mutation_factor - 0.5).abs() < 1e-12);
        assert!((config.crossover_rate - 0.8).abs() < 1e-12);
        assert!(!config.parallel);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = DeConfig::default()
            .with_population_size(50)
            .with_max_generations(10)
            .with_mutation_factor(0.7)
            .with_crossover_rate(0.3)
            .with_parallel(true)
            .with_seed(9);
        assert_eq!(config.population_size, 50);
        assert_eq!(config.max_generations, 10);
        assert!((config.mutation_factor - 0.7).abs() < 1e-12);
        assert!((config.crossover_rate - 0.3).abs() < 1e-12);
        assert!(config.parallel);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn test_validate_ok() {
        assert!(DeConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_population_too_small() {
        let config = DeConfig::default().with_population_size(3);
        assert_eq!(
            config.validate(),
            Err(DispatchError::PopulationTooSmall { pop_size: 3 })
        );
    }

    #[test]
    fn test_validate_zero_generations() {
        let config = DeConfig::default().with_max_generations(0);
        assert_eq!(config.validate(), Err(DispatchError::ZeroGenerations));
    }

    #[test]
    fn test_validate_rates() {
        assert!(DeConfig::default().with_mutation_factor(2.5).validate().is_err());
        assert!(DeConfig::default().with_mutation_factor(f64::NAN).validate().is_err());
        assert!(DeConfig::default().with_crossover_rate(-0.1).validate().is_err());
        assert!(DeConfig::default().with_crossover_rate(1.0).validate().is_ok());
    }
}
