//! Constraint-handling constants.
//!
//! The demand tolerance, penalty weight and zone margin are kept here so they
//! can be tuned without touching the fitness, repair or sampling logic.

/// Allowed absolute gap between total output and demand before a penalty applies (MW).
pub const DEMAND_TOLERANCE: f64 = 1e-3;

/// Penalty per MW of demand mismatch.
pub const PENALTY_WEIGHT: f64 = 1e6;

/// Distance a repaired output is placed outside a prohibited zone edge (MW).
pub const ZONE_MARGIN: f64 = 1e-3;

/// Draws allowed per unit when sampling an output outside the prohibited zones.
pub const MAX_SAMPLING_ATTEMPTS: usize = 10_000;

/// Tolerances shared by the fitness evaluator, repairer and initializer.
///
/// # Examples
///
/// ```
/// use u_dispatch::tolerance::Tolerances;
///
/// let tol = Tolerances::default()
///     .with_penalty_weight(1e4)
///     .with_max_sampling_attempts(500);
/// assert_eq!(tol.max_sampling_attempts, 500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tolerances {
    /// See [`DEMAND_TOLERANCE`].
    pub demand_tolerance: f64,
    /// See [`PENALTY_WEIGHT`].
    pub penalty_weight: f64,
    /// See [`ZONE_MARGIN`].
    pub zone_margin: f64,
    /// See [`MAX_SAMPLING_ATTEMPTS`].
    pub max_sampling_attempts: usize,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            demand_tolerance: DEMAND_TOLERANCE,
            penalty_weight: PENALTY_WEIGHT,
            zone_margin: ZONE_MARGIN,
            max_sampling_attempts: MAX_SAMPLING_ATTEMPTS,
        }
    }
}

impl Tolerances {
    /// Sets the demand tolerance (MW, clamped to non-negative).
    pub fn with_demand_tolerance(mut self, tol: f64) -> Self {
        self.demand_tolerance = tol.max(0.0);
        self
    }

    /// Sets the penalty per MW of mismatch (clamped to non-negative).
    pub fn with_penalty_weight(mut self, weight: f64) -> Self {
        self.penalty_weight = weight.max(0.0);
        self
    }

    /// Sets the zone push-out margin (MW, clamped to non-negative).
    pub fn with_zone_margin(mut self, margin: f64) -> Self {
        self.zone_margin = margin.max(0.0);
        self
    }

    /// Sets the sampling budget per unit (at least one draw).
    pub fn with_max_sampling_attempts(mut self, attempts: usize) -> Self {
        self.max_sampling_attempts = attempts.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let tol = Tolerances::default();
        assert!((tol.demand_tolerance - 1e-3).abs() < 1e-15);
        assert!((tol.penalty_weight - 1e6).abs() < 1e-6);
        assert!((tol.zone_margin - 1e-3).abs() < 1e-15);
        assert_eq!(tol.max_sampling_attempts, 10_000);
    }

    #[test]
    fn test_builder_clamps() {
        let tol = Tolerances::default()
            .with_demand_tolerance(-1.0)
            .with_penalty_weight(-5.0)
            .with_zone_margin(-0.1)
            .with_max_sampling_attempts(0);
        assert_eq!(tol.demand_tolerance, 0.0);
        assert_eq!(tol.penalty_weight, 0.0);
        assert_eq!(tol.zone_margin, 0.0);
        assert_eq!(tol.max_sampling_attempts, 1);
    }
}
