//! Economic dispatch as a DE problem.
//!
//! [`DispatchProblem`] wires the fitness evaluator, repairer and population
//! initializer into [`DeProblem`]; [`solve`] runs it and reports the
//! allocation.

use rand::Rng;

use crate::de::{DeConfig, DeProblem, DeRunner, GenerationStats};
use crate::error::Result;
use crate::fitness::FitnessEvaluator;
use crate::init::PopulationInitializer;
use crate::model::DispatchSystem;
use crate::repair::SolutionRepairer;
use crate::tolerance::Tolerances;

/// Economic dispatch with prohibited zones, ready for [`DeRunner`].
#[derive(Debug, Clone, Copy)]
pub struct DispatchProblem<'a> {
    system: &'a DispatchSystem,
    evaluator: FitnessEvaluator<'a>,
    repairer: SolutionRepairer<'a>,
    initializer: PopulationInitializer<'a>,
}

impl<'a> DispatchProblem<'a> {
    /// Uses the default tolerances.
    pub fn new(system: &'a DispatchSystem) -> Self {
        Self::with_tolerances(system, Tolerances::default())
    }

    /// Uses custom tolerances for fitness, repair and sampling.
    pub fn with_tolerances(system: &'a DispatchSystem, tolerances: Tolerances) -> Self {
        Self {
            system,
            evaluator: FitnessEvaluator::new(system, tolerances),
            repairer: SolutionRepairer::new(system, tolerances),
            initializer: PopulationInitializer::new(system, tolerances),
        }
    }

    /// The system being dispatched.
    pub fn system(&self) -> &'a DispatchSystem {
        self.system
    }

    /// The fitness evaluator.
    pub fn evaluator(&self) -> &FitnessEvaluator<'a> {
        &self.evaluator
    }

    /// The repairer.
    pub fn repairer(&self) -> &SolutionRepairer<'a> {
        &self.repairer
    }
}

impl DeProblem for DispatchProblem<'_> {
    fn dimension(&self) -> usize {
        self.system.unit_count()
    }

    fn initial_population<R: Rng + ?Sized>(&self, size: usize, rng: &mut R) -> Result<Vec<Vec<f64>>> {
        self.initializer.initialize(size, rng)
    }

    fn repair(&self, candidate: &[f64]) -> Vec<f64> {
        self.repairer.repair(candidate)
    }

    fn evaluate(&self, candidate: &[f64]) -> f64 {
        self.evaluator.evaluate(candidate)
    }
}

/// Final allocation of a dispatch run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DispatchSolution {
    /// Output per unit (MW), in unit order.
    pub outputs: Vec<f64>,
    /// Fitness of `outputs`: fuel cost plus any demand penalty.
    pub total_cost: f64,
    /// Fuel cost alone.
    pub fuel_cost: f64,
    /// `Σ outputs`.
    pub total_output: f64,
    /// `|total_output − demand|`.
    pub demand_mismatch: f64,
    /// Mismatch allowed before the demand penalty applies.
    pub demand_tolerance: f64,
    /// Generations executed.
    pub generations: usize,
    /// Best fitness after each generation.
    ///
    /// `+inf` entries (no accepted trial yet) are written as `null` and read
    /// back as `+inf`.
    #[cfg_attr(feature = "serde", serde(with = "history_serde"))]
    pub fitness_history: Vec<f64>,
}

impl DispatchSolution {
    /// Returns `true` if total output is within the demand tolerance.
    pub fn meets_demand(&self) -> bool {
        self.demand_mismatch <= self.demand_tolerance
    }
}

#[cfg(feature = "serde")]
mod history_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(history: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
        history
            .iter()
            .map(|f| f.is_finite().then_some(*f))
            .collect::<Vec<_>>()
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
        let entries = Vec::<Option<f64>>::deserialize(deserializer)?;
        Ok(entries
            .into_iter()
            .map(|f| f.unwrap_or(f64::INFINITY))
            .collect())
    }
}

/// Solves `system` with default tolerances.
///
/// # Errors
///
/// Configuration errors abort before the first generation;
/// [`DispatchError::ConvergenceFailure`](crate::error::DispatchError::ConvergenceFailure)
/// is returned if the run never accepted a trial.
///
/// # Examples
///
/// ```
/// use u_dispatch::de::DeConfig;
/// use u_dispatch::dispatch::solve;
/// use u_dispatch::model::DispatchSystem;
///
/// let system = DispatchSystem::six_unit_reference();
/// let config = DeConfig::default().with_max_generations(50).with_seed(7);
/// let solution = solve(&system, &config).unwrap();
/// assert_eq!(solution.outputs.len(), 6);
/// ```
pub fn solve(system: &DispatchSystem, config: &DeConfig) -> Result<DispatchSolution> {
    solve_with_callback(&DispatchProblem::new(system), config, |_| {})
}

/// Solves a prepared problem, reporting progress after each generation.
pub fn solve_with_callback<F>(
    problem: &DispatchProblem<'_>,
    config: &DeConfig,
    on_generation: F,
) -> Result<DispatchSolution>
where
    F: FnMut(&GenerationStats),
{
    let result = DeRunner::run_with_callback(problem, config, on_generation)?;
    let evaluator = problem.evaluator();

    Ok(DispatchSolution {
        total_cost: result.best_fitness,
        fuel_cost: evaluator.fuel_cost(&result.best),
        total_output: result.best.iter().sum(),
        demand_mismatch: evaluator.demand_mismatch(&result.best),
        demand_tolerance: evaluator.tolerances().demand_tolerance,
        generations: result.generations,
        fitness_history: result.fitness_history,
        outputs: result.best,
    })
}
