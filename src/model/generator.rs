//! Generating unit description.

use crate::error::{DispatchError, Result};

/// A closed output interval `[lo, hi]` a unit must avoid.
///
/// Typical causes are shaft vibration bands or steam valve operation limits.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProhibitedZone {
    /// Lower edge (inclusive).
    pub lo: f64,
    /// Upper edge (inclusive).
    pub hi: f64,
}

impl ProhibitedZone {
    /// Creates a zone covering `[lo, hi]`.
    pub fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    /// Returns `true` if `p` lies inside the closed interval.
    pub fn contains(&self, p: f64) -> bool {
        self.lo <= p && p <= self.hi
    }

    /// Width of the zone.
    pub fn width(&self) -> f64 {
        self.hi - self.lo
    }
}

impl From<(f64, f64)> for ProhibitedZone {
    fn from((lo, hi): (f64, f64)) -> Self {
        Self::new(lo, hi)
    }
}

/// A thermal generating unit with a quadratic fuel-cost curve.
///
/// Fuel cost at output `P` is `a·P² + b·P + c`. Output must stay inside
/// `[p_min, p_max]` and outside every prohibited zone.
///
/// # Examples
///
/// ```
/// use u_dispatch::model::Generator;
///
/// let unit = Generator::new(0.007, 7.0, 240.0, 100.0, 500.0)
///     .with_zone(210.0, 240.0)
///     .with_zone(350.0, 380.0);
///
/// assert!(unit.in_prohibited_zone(225.0));
/// assert!((unit.cost(100.0) - 1010.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Generator {
    /// Quadratic cost coefficient.
    pub a: f64,
    /// Linear cost coefficient.
    pub b: f64,
    /// Fixed cost.
    pub c: f64,
    /// Minimum output (MW).
    pub p_min: f64,
    /// Maximum output (MW).
    pub p_max: f64,
    /// Prohibited zones, checked in declaration order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub zones: Vec<ProhibitedZone>,
}

impl Generator {
    /// Creates a unit without prohibited zones.
    pub fn new(a: f64, b: f64, c: f64, p_min: f64, p_max: f64) -> Self {
        Self {
            a,
            b,
            c,
            p_min,
            p_max,
            zones: Vec::new(),
        }
    }

    /// Appends a prohibited zone `[lo, hi]`.
    pub fn with_zone(mut self, lo: f64, hi: f64) -> Self {
        self.zones.push(ProhibitedZone::new(lo, hi));
        self
    }

    /// Replaces the prohibited zones.
    pub fn with_zones<Z: Into<ProhibitedZone>>(mut self, zones: impl IntoIterator<Item = Z>) -> Self {
        self.zones = zones.into_iter().map(Into::into).collect();
        self
    }

    /// Fuel cost at output `p`.
    pub fn cost(&self, p: f64) -> f64 {
        self.a * p * p + self.b * p + self.c
    }

    /// Returns `true` if `p` falls inside any prohibited zone.
    pub fn in_prohibited_zone(&self, p: f64) -> bool {
        self.zones.iter().any(|z| z.contains(p))
    }

    /// Clamps `p` into `[p_min, p_max]`.
    pub fn clamp(&self, p: f64) -> f64 {
        p.clamp(self.p_min, self.p_max)
    }

    /// Length of `[p_min, p_max]` not covered by any prohibited zone.
    ///
    /// Overlapping zones are merged and zones are clipped to the bounds
    /// before measuring.
    pub fn feasible_width(&self) -> f64 {
        let mut clipped: Vec<(f64, f64)> = self
            .zones
            .iter()
            .map(|z| (z.lo.max(self.p_min), z.hi.min(self.p_max)))
            .filter(|(lo, hi)| lo <= hi)
            .collect();
        clipped.sort_by(|x, y| x.0.total_cmp(&y.0));

        let mut covered = 0.0;
        let mut merged: Option<(f64, f64)> = None;
        for (lo, hi) in clipped {
            merged = match merged {
                Some((mlo, mhi)) if lo <= mhi => Some((mlo, mhi.max(hi))),
                Some((mlo, mhi)) => {
                    covered += mhi - mlo;
                    Some((lo, hi))
                }
                None => Some((lo, hi)),
            };
        }
        if let Some((mlo, mhi)) = merged {
            covered += mhi - mlo;
        }

        (self.p_max - self.p_min - covered).max(0.0)
    }

    /// Returns `true` if some output in `[p_min, p_max]` avoids every zone.
    ///
    /// A fixed-output unit (`p_min == p_max`) is feasible when that single
    /// point is outside all zones; otherwise the uncovered length must be
    /// positive.
    pub fn has_feasible_output(&self) -> bool {
        if self.p_min == self.p_max {
            !self.in_prohibited_zone(self.p_min)
        } else {
            self.feasible_width() > 0.0
        }
    }

    /// Checks cost coefficients, bounds, zones and feasibility. `unit` is
    /// used in error reports.
    pub fn validate(&self, unit: usize) -> Result<()> {
        if !(self.a.is_finite() && self.b.is_finite() && self.c.is_finite()) {
            return Err(DispatchError::InvalidCostCoefficients {
                unit,
                a: self.a,
                b: self.b,
                c: self.c,
            });
        }
        if !self.p_min.is_finite() || !self.p_max.is_finite() || self.p_min > self.p_max {
            return Err(DispatchError::InvalidBounds {
                unit,
                p_min: self.p_min,
                p_max: self.p_max,
            });
        }
        for (zone, z) in self.zones.iter().enumerate() {
            if !z.lo.is_finite() || !z.hi.is_finite() || z.lo > z.hi {
                return Err(DispatchError::InvalidZone {
                    unit,
                    zone,
                    lo: z.lo,
                    hi: z.hi,
                });
            }
        }
        if !self.has_feasible_output() {
            return Err(DispatchError::NoFeasibleRegion { unit });
        }
        Ok(())
    }
}
