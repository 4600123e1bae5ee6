//! Initial population construction.

use rand::Rng;

use crate::error::{DispatchError, Result};
use crate::model::{DispatchSystem, Generator};
use crate::tolerance::Tolerances;

/// Builds a starting population of near-feasible allocations.
///
/// Each unit's output is drawn uniformly from `[p_min, p_max]`, redrawing
/// while it lands in a prohibited zone. The leftover demand is then spread
/// evenly over all units and each output is clamped back into its bounds.
/// That last step does not re-check zones.
#[derive(Debug, Clone, Copy)]
pub struct PopulationInitializer<'a> {
    system: &'a DispatchSystem,
    tolerances: Tolerances,
}

impl<'a> PopulationInitializer<'a> {
    /// Creates an initializer for `system`.
    pub fn new(system: &'a DispatchSystem, tolerances: Tolerances) -> Self {
        Self { system, tolerances }
    }

    /// Creates `size` candidates.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::SamplingExhausted`] if some unit produced no
    /// output outside its zones within `max_sampling_attempts` draws.
    pub fn initialize<R: Rng + ?Sized>(&self, size: usize, rng: &mut R) -> Result<Vec<Vec<f64>>> {
        (0..size).map(|_| self.create_candidate(rng)).collect()
    }

    /// Creates one candidate.
    pub fn create_candidate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<f64>> {
        let generators = self.system.generators();
        let mut remaining = self.system.total_demand();
        let mut candidate = Vec::with_capacity(generators.len());

        for (unit, g) in generators.iter().enumerate() {
            let p = self.sample_unit(unit, g, rng)?;
            remaining -= p;
            candidate.push(p);
        }

        let adjustment = remaining / generators.len() as f64;
        for (p, g) in candidate.iter_mut().zip(generators) {
            *p = g.clamp(*p + adjustment);
        }
        Ok(candidate)
    }

    /// Rejection-samples one output for `g`.
    fn sample_unit<R: Rng + ?Sized>(&self, unit: usize, g: &Generator, rng: &mut R) -> Result<f64> {
        let attempts = self.tolerances.max_sampling_attempts;
        for _ in 0..attempts {
            let p = rng.random_range(g.p_min..=g.p_max);
            if !g.in_prohibited_zone(p) {
                return Ok(p);
            }
        }
        Err(DispatchError::SamplingExhausted { unit, attempts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_population_size_and_bounds() {
        let system = DispatchSystem::six_unit_reference();
        let init = PopulationInitializer::new(&system, Tolerances::default());
        let mut rng = create_rng(7);
        let pop = init.initialize(25, &mut rng).unwrap();

        assert_eq!(pop.len(), 25);
        for candidate in &pop {
            assert_eq!(candidate.len(), 6);
            for (p, g) in candidate.iter().zip(system.generators()) {
                assert!(g.p_min <= *p && *p <= g.p_max);
            }
        }
    }

    #[test]
    fn test_spreads_remaining_demand() {
        // Two [0, 100] units serving 100 MW: each adjusted output is
        // (100 + p1 - p2) / 2, which never needs clamping.
        let system = DispatchSystem::new(
            vec![
                Generator::new(0.0, 1.0, 0.0, 0.0, 100.0),
                Generator::new(0.0, 1.0, 0.0, 0.0, 100.0),
            ],
            100.0,
        )
        .unwrap();
        let init = PopulationInitializer::new(&system, Tolerances::default());
        let mut rng = create_rng(1);
        for _ in 0..20 {
            let c = init.create_candidate(&mut rng).unwrap();
            let total: f64 = c.iter().sum();
            assert!((total - 100.0).abs() < 1e-9, "total {total}");
        }
    }

    #[test]
    fn test_deterministic_with_seed() {
        let system = DispatchSystem::six_unit_reference();
        let init = PopulationInitializer::new(&system, Tolerances::default());
        let a = init.initialize(10, &mut create_rng(42)).unwrap();
        let b = init.initialize(10, &mut create_rng(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_covered_unit_exhausts_sampling() {
        // Validation would reject this unit, so call the sampler directly.
        let system = DispatchSystem::new(vec![Generator::new(0.0, 1.0, 0.0, 0.0, 100.0)], 10.0)
            .unwrap();
        let blocked = Generator::new(0.0, 1.0, 0.0, 0.0, 100.0).with_zone(0.0, 100.0);
        let init = PopulationInitializer::new(
            &system,
            Tolerances::default().with_max_sampling_attempts(50),
        );
        let mut rng = create_rng(3);
        assert_eq!(
            init.sample_unit(4, &blocked, &mut rng),
            Err(DispatchError::SamplingExhausted {
                unit: 4,
                attempts: 50
            })
        );
    }

    #[test]
    fn test_narrow_gap_exhausts_small_budget() {
        let system = DispatchSystem::new(
            vec![Generator::new(0.0, 1.0, 0.0, 0.0, 100.0)
                .with_zone(0.0, 49.999_999_9)
                .with_zone(50.0, 100.0)],
            10.0,
        )
        .unwrap();
        let init = PopulationInitializer::new(
            &system,
            Tolerances::default().with_max_sampling_attempts(10),
        );
        let err = init.initialize(5, &mut create_rng(9)).unwrap_err();
        assert!(err.is_configuration_error());
        assert!(matches!(err, DispatchError::SamplingExhausted { unit: 0, .. }));
    }
}
