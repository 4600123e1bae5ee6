//! Fitness evaluation: fuel cost plus a soft demand penalty.
//!
//! Demand is a soft constraint. A candidate off demand by more than the
//! tolerance pays `penalty_weight × |mismatch|`, which lets the search pass
//! through infeasible regions while selection still prefers balanced
//! allocations.

use crate::model::DispatchSystem;
use crate::tolerance::Tolerances;

/// Maps a candidate allocation to a scalar cost. Lower is better.
#[derive(Debug, Clone, Copy)]
pub struct FitnessEvaluator<'a> {
    system: &'a DispatchSystem,
    tolerances: Tolerances,
}

impl<'a> FitnessEvaluator<'a> {
    /// Creates an evaluator for `system`.
    pub fn new(system: &'a DispatchSystem, tolerances: Tolerances) -> Self {
        Self { system, tolerances }
    }

    /// Tolerances used for the penalty.
    pub fn tolerances(&self) -> &Tolerances {
        &self.tolerances
    }

    /// Total fuel cost plus demand penalty.
    pub fn evaluate(&self, candidate: &[f64]) -> f64 {
        self.fuel_cost(candidate) + self.penalty(candidate)
    }

    /// `Σ a_i·P_i² + b_i·P_i + c_i` over all units.
    pub fn fuel_cost(&self, candidate: &[f64]) -> f64 {
        self.system
            .generators()
            .iter()
            .zip(candidate)
            .map(|(g, &p)| g.cost(p))
            .sum()
    }

    /// `|Σ P_i − demand|`.
    pub fn demand_mismatch(&self, candidate: &[f64]) -> f64 {
        (candidate.iter().sum::<f64>() - self.system.total_demand()).abs()
    }

    /// Penalty term; zero while the mismatch is within tolerance.
    pub fn penalty(&self, candidate: &[f64]) -> f64 {
        let mismatch = self.demand_mismatch(candidate);
        if mismatch > self.tolerances.demand_tolerance {
            self.tolerances.penalty_weight * mismatch
        } else {
            0.0
        }
    }
}
