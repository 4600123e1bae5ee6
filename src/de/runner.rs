//! DE generation loop.
//!
//! [`DeRunner`] drives a run from the initial population through a fixed
//! number of generations:
//! mutation → repair → crossover → repair → greedy selection → repeat.

use super::config::DeConfig;
use super::operators::{binomial_crossover, mutant_rand1};
use super::types::DeProblem;
use crate::error::{DispatchError, Result};
use crate::random::{create_rng, split_rng};
use rand::rngs::StdRng;
use rayon::prelude::*;

/// Result of a DE run.
#[derive(Debug, Clone)]
pub struct DeResult {
    /// Best candidate found during the entire run.
    pub best: Vec<f64>,

    /// Fitness of `best`.
    pub best_fitness: f64,

    /// Number of generations executed.
    pub generations: usize,

    /// Number of times the global best was replaced.
    pub improvements: usize,

    /// Best fitness at the end of each generation.
    ///
    /// Entries are `+inf` until the first accepted trial. JSON has no
    /// infinity, so [`DispatchSolution`](crate::dispatch::DispatchSolution)
    /// writes those entries as `null`.
    pub fitness_history: Vec<f64>,
}

/// Progress snapshot passed to the generation callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    /// 1-based generation number.
    pub generation: usize,

    /// Best fitness found so far (`+inf` if none yet).
    pub best_fitness: f64,

    /// Trials that replaced their target in this generation.
    pub accepted_trials: usize,
}

/// Outcome of processing one population slot.
struct SlotOutcome {
    /// The accepted trial and its fitness, if it beat the target.
    accepted: Option<(Vec<f64>, f64)>,
}

/// Executes Differential Evolution.
///
/// # Usage
///
/// ```ignore
/// let problem = MyProblem::new();
/// let config = DeConfig::default().with_seed(42);
/// let result = DeRunner::run(&problem, &config)?;
/// println!("Best fitness: {}", result.best_fitness);
/// ```
pub struct DeRunner;

impl DeRunner {
    /// Runs DE optimization.
    pub fn run<P: DeProblem>(problem: &P, config: &DeConfig) -> Result<DeResult> {
        Self::run_with_callback(problem, config, |_| {})
    }

    /// Runs DE and reports progress after every generation.
    ///
    /// # Errors
    ///
    /// Configuration errors (invalid `config`, failed initialization, wrong
    /// candidate length) are returned before the first generation.
    /// [`DispatchError::ConvergenceFailure`] is returned if no trial was ever
    /// accepted.
    pub fn run_with_callback<P, F>(
        problem: &P,
        config: &DeConfig,
        mut on_generation: F,
    ) -> Result<DeResult>
    where
        P: DeProblem,
        F: FnMut(&GenerationStats),
    {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = create_rng(seed);
        let dim = problem.dimension();

        // 1. Initialize
        let mut population = problem.initial_population(config.population_size, &mut rng)?;
        if population.len() != config.population_size {
            return Err(DispatchError::PopulationSizeMismatch {
                expected: config.population_size,
                got: population.len(),
            });
        }
        if let Some(bad) = population.iter().find(|c| c.len() != dim) {
            return Err(DispatchError::DimensionMismatch {
                expected: dim,
                got: bad.len(),
            });
        }
        let mut fitness: Vec<f64> = population.iter().map(|c| problem.evaluate(c)).collect();

        tracing::info!(
            seed,
            dimension = dim,
            population_size = config.population_size,
            max_generations = config.max_generations,
            "starting differential evolution"
        );

        // 2. Evolve
        let mut best: Option<Vec<f64>> = None;
        let mut best_fitness = f64::INFINITY;
        let mut improvements = 0usize;
        let mut fitness_history = Vec::with_capacity(config.max_generations);

        for gen in 0..config.max_generations {
            let mut slot_rngs: Vec<StdRng> = (0..config.population_size)
                .map(|_| split_rng(&mut rng))
                .collect();

            let outcomes: Vec<SlotOutcome> = if config.parallel {
                slot_rngs
                    .par_iter_mut()
                    .enumerate()
                    .map(|(i, slot_rng)| evolve_slot(problem, config, &population, &fitness, i, slot_rng))
                    .collect()
            } else {
                slot_rngs
                    .iter_mut()
                    .enumerate()
                    .map(|(i, slot_rng)| evolve_slot(problem, config, &population, &fitness, i, slot_rng))
                    .collect()
            };

            // Every slot has read the old population; build the next one.
            let mut accepted_trials = 0usize;
            let mut next_population = Vec::with_capacity(config.population_size);
            let mut next_fitness = Vec::with_capacity(config.population_size);
            for ((target, target_fitness), outcome) in
                population.into_iter().zip(fitness).zip(outcomes)
            {
                match outcome.accepted {
                    Some((trial, trial_fitness)) => {
                        accepted_trials += 1;
                        if trial_fitness < best_fitness {
                            best = Some(trial.clone());
                            best_fitness = trial_fitness;
                            improvements += 1;
                        }
                        next_population.push(trial);
                        next_fitness.push(trial_fitness);
                    }
                    None => {
                        next_population.push(target);
                        next_fitness.push(target_fitness);
                    }
                }
            }
            population = next_population;
            fitness = next_fitness;

            fitness_history.push(best_fitness);

            let stats = GenerationStats {
                generation: gen + 1,
                best_fitness,
                accepted_trials,
            };
            tracing::debug!(
                generation = stats.generation,
                best_fitness,
                accepted_trials,
                "generation complete"
            );
            problem.on_generation(stats.generation, best_fitness);
            on_generation(&stats);
        }

        // 3. Done
        let best = best.ok_or(DispatchError::ConvergenceFailure {
            generations: config.max_generations,
        })?;

        tracing::info!(best_fitness, improvements, "differential evolution finished");

        Ok(DeResult {
            best,
            best_fitness,
            generations: config.max_generations,
            improvements,
            fitness_history,
        })
    }
}

/// Mutation, crossover and selection for slot `i`.
///
/// Reads only the frozen population; the caller decides what to keep.
fn evolve_slot<P: DeProblem>(
    problem: &P,
    config: &DeConfig,
    population: &[Vec<f64>],
    fitness: &[f64],
    i: usize,
    rng: &mut StdRng,
) -> SlotOutcome {
    let mutant = problem.repair(&mutant_rand1(i, population, config.mutation_factor, rng));
    let trial = problem.repair(&binomial_crossover(
        &population[i],
        &mutant,
        config.crossover_rate,
        rng,
    ));
    let trial_fitness = problem.evaluate(&trial);

    SlotOutcome {
        accepted: (trial_fitness < fitness[i]).then_some((trial, trial_fitness)),
    }
}

// ============================================================================
// Tests
// ============================================================================
