//! System configuration: the unit table plus total demand.

use super::generator::Generator;
use crate::error::{DispatchError, Result};

/// An ordered set of generating units and the demand they must serve.
///
/// The unit order defines the index alignment of every candidate vector.
/// Construction validates the configuration, so a `DispatchSystem` in hand
/// is always safe to optimize. Deserialization goes through
/// [`new`](Self::new) as well.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawDispatchSystem")
)]
pub struct DispatchSystem {
    generators: Vec<Generator>,
    total_demand: f64,
}

/// Unchecked wire form of [`DispatchSystem`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawDispatchSystem {
    generators: Vec<Generator>,
    total_demand: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawDispatchSystem> for DispatchSystem {
    type Error = DispatchError;

    fn try_from(raw: RawDispatchSystem) -> Result<Self> {
        Self::new(raw.generators, raw.total_demand)
    }
}

impl DispatchSystem {
    /// Builds a validated system.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if there are no units, a unit has
    /// inverted bounds, non-finite cost coefficients or malformed zones, a
    /// unit has no feasible output, or the demand is negative or not finite.
    pub fn new(generators: Vec<Generator>, total_demand: f64) -> Result<Self> {
        let system = Self {
            generators,
            total_demand,
        };
        system.validate()?;
        Ok(system)
    }

    /// Re-checks the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.generators.is_empty() {
            return Err(DispatchError::EmptySystem);
        }
        if !self.total_demand.is_finite() || self.total_demand < 0.0 {
            return Err(DispatchError::InvalidDemand {
                demand: self.total_demand,
            });
        }
        for (unit, g) in self.generators.iter().enumerate() {
            g.validate(unit)?;
        }

        let (min_total, max_total) = self.capacity();
        if self.total_demand < min_total || self.total_demand > max_total {
            tracing::warn!(
                demand = self.total_demand,
                min_total,
                max_total,
                "total demand lies outside the combined output range; the demand penalty cannot reach zero"
            );
        }
        Ok(())
    }

    /// The unit table, in candidate index order.
    pub fn generators(&self) -> &[Generator] {
        &self.generators
    }

    /// Total demand (MW).
    pub fn total_demand(&self) -> f64 {
        self.total_demand
    }

    /// Number of units, i.e. the candidate dimension.
    pub fn unit_count(&self) -> usize {
        self.generators.len()
    }

    /// Combined `(Σ p_min, Σ p_max)`.
    pub fn capacity(&self) -> (f64, f64) {
        self.generators
            .iter()
            .fold((0.0, 0.0), |(lo, hi), g| (lo + g.p_min, hi + g.p_max))
    }

    /// Six-unit test system with prohibited zones serving 1263 MW.
    ///
    /// Cost coefficients in $/MW²h, $/MWh and $/h.
    pub fn six_unit_reference() -> Self {
        let generators = vec![
            Generator::new(0.007, 7.0, 240.0, 100.0, 500.0)
                .with_zones([(210.0, 240.0), (350.0, 380.0)]),
            Generator::new(0.0095, 10.0, 200.0, 50.0, 200.0)
                .with_zones([(90.0, 110.0), (140.0, 160.0)]),
            Generator::new(0.009, 8.5, 220.0, 80.0, 300.0)
                .with_zones([(150.0, 170.0), (210.0, 240.0)]),
            Generator::new(0.009, 11.0, 200.0, 50.0, 150.0)
                .with_zones([(80.0, 90.0), (110.0, 120.0)]),
            Generator::new(0.008, 10.5, 220.0, 50.0, 200.0)
                .with_zones([(90.0, 110.0), (140.0, 150.0)]),
            Generator::new(0.0075, 12.0, 190.0, 50.0, 120.0),
        ];
        Self {
            generators,
            total_demand: 1263.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_system_is_valid() {
        let system = DispatchSystem::six_unit_reference();
        assert!(system.validate().is_ok());
        assert_eq!(system.unit_count(), 6);
        assert_eq!(system.total_demand(), 1263.0);
        assert!(system.generators()[5].zones.is_empty());
    }

    #[test]
    fn test_capacity() {
        let (lo, hi) = DispatchSystem::six_unit_reference().capacity();
        assert!((lo - 380.0).abs() < 1e-9);
        assert!((hi - 1470.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_system() {
        assert_eq!(
            DispatchSystem::new(Vec::new(), 100.0),
            Err(DispatchError::EmptySystem)
        );
    }

    #[test]
    fn test_invalid_demand() {
        let units = vec![Generator::new(0.0, 1.0, 0.0, 0.0, 10.0)];
        assert!(matches!(
            DispatchSystem::new(units.clone(), -1.0),
            Err(DispatchError::InvalidDemand { .. })
        ));
        assert!(matches!(
            DispatchSystem::new(units, f64::NAN),
            Err(DispatchError::InvalidDemand { .. })
        ));
    }

    #[test]
    fn test_unit_error_reports_index() {
        let units = vec![
            Generator::new(0.0, 1.0, 0.0, 0.0, 10.0),
            Generator::new(0.0, 1.0, 0.0, 20.0, 10.0),
        ];
        assert!(matches!(
            DispatchSystem::new(units, 15.0),
            Err(DispatchError::InvalidBounds { unit: 1, .. })
        ));
    }

    #[test]
    fn test_nan_cost_coefficient_is_rejected() {
        let units = vec![
            Generator::new(0.01, 1.0, 0.0, 0.0, 100.0),
            Generator::new(f64::NAN, 1.0, 0.0, 0.0, 100.0),
        ];
        assert!(matches!(
            DispatchSystem::new(units, 50.0),
            Err(DispatchError::InvalidCostCoefficients { unit: 1, .. })
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_validates() {
        let json = r#"{
            "generators": [{"a": 0.01, "b": 1.0, "c": 0.0, "p_min": 200.0, "p_max": 100.0}],
            "total_demand": 150.0
        }"#;
        let err = serde_json::from_str::<DispatchSystem>(json).unwrap_err();
        let expected = DispatchError::InvalidBounds {
            unit: 0,
            p_min: 200.0,
            p_max: 100.0,
        };
        assert!(err.to_string().contains(&expected.to_string()), "{err}");
    }

    #[test]
    fn test_unreachable_demand_is_accepted() {
        let units = vec![Generator::new(0.0, 1.0, 0.0, 0.0, 10.0)];
        assert!(DispatchSystem::new(units, 50.0).is_ok());
    }
}
