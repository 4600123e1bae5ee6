//! Feasibility repair for candidate allocations.
//!
//! Repair runs in two phases:
//!
//! 1. **Unit limits**: clamp each output into `[p_min, p_max]`, then push it
//!    out of any prohibited zone it falls in, towards the nearer edge plus a
//!    small margin.
//! 2. **Demand rebalancing**: if total output misses demand by more than the
//!    tolerance, scale every output by `demand / total` and clamp again.
//!
//! Bounds always hold on the result. Zone avoidance and exact demand are best
//! effort: the phase-2 clamp can leave a mismatch, and scaled outputs are not
//! re-checked against zones. The fitness penalty takes care of the remainder
//! through selection.

use crate::model::{DispatchSystem, Generator};
use crate::tolerance::Tolerances;

/// Maps any real vector onto a (near-)feasible allocation.
#[derive(Debug, Clone, Copy)]
pub struct SolutionRepairer<'a> {
    system: &'a DispatchSystem,
    tolerances: Tolerances,
}

impl<'a> SolutionRepairer<'a> {
    /// Creates a repairer for `system`.
    pub fn new(system: &'a DispatchSystem, tolerances: Tolerances) -> Self {
        Self { system, tolerances }
    }

    /// Applies both phases.
    pub fn repair(&self, candidate: &[f64]) -> Vec<f64> {
        let mut repaired = self.enforce_unit_limits(candidate);
        self.rebalance(&mut repaired);
        repaired
    }

    /// Phase 1: bounds, then prohibited zones in declaration order.
    ///
    /// A pushed output is not re-checked against zones already visited, so
    /// overlapping or adjacent zones may leave it inside another zone.
    pub fn enforce_unit_limits(&self, candidate: &[f64]) -> Vec<f64> {
        self.system
            .generators()
            .iter()
            .zip(candidate)
            .map(|(g, &p)| self.repair_unit(g, p))
            .collect()
    }

    /// Phase 2: proportional scaling towards demand, then a final clamp.
    ///
    /// Leaves the candidate untouched when it is already within tolerance or
    /// when its total output is not positive.
    pub fn rebalance(&self, candidate: &mut [f64]) {
        let demand = self.system.total_demand();
        let total: f64 = candidate.iter().sum();
        if (total - demand).abs() <= self.tolerances.demand_tolerance || total <= 0.0 {
            return;
        }

        let factor = demand / total;
        for (p, g) in candidate.iter_mut().zip(self.system.generators()) {
            *p = g.clamp(*p * factor);
        }
    }

    fn repair_unit(&self, g: &Generator, p: f64) -> f64 {
        let margin = self.tolerances.zone_margin;
        let mut p = g.clamp(p);
        for zone in &g.zones {
            if !zone.contains(p) {
                continue;
            }
            let below = zone.lo - margin;
            let above = zone.hi + margin;
            let prefer_below = p - zone.lo < zone.hi - p;
            p = match (below >= g.p_min, above <= g.p_max) {
                (true, true) => {
                    if prefer_below {
                        below
                    } else {
                        above
                    }
                }
                (true, false) => below,
                (false, true) => above,
                (false, false) => p,
            };
        }
        p
    }
}
