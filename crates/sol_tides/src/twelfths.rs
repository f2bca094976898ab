//! Two-point water level from one known high and one known low.
//!
//! The level follows half a cosine period between the two reference
//! tides, which reproduces the mariner's rule of twelfths (1, 2, 3, 3, 2,
//! 1 twelfths of the range per sixth of the interval). Outside the
//! reference interval the same sinusoid keeps running, so the model
//! extrapolates a regular tide with period twice the reference spacing.

use std::f64::consts::PI;

use sol_time::UniversalTime;

use crate::error::TideError;
use crate::harmonic::WaterLevelCalculator;
use crate::tide_types::Tide;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleOfTwelfthsWaterLevelCalculator {
    first: Tide,
    second: Tide,
}

impl RuleOfTwelfthsWaterLevelCalculator {
    /// Build from two reference tides at distinct instants.
    pub fn new(first: Tide, second: Tide) -> Result<Self, TideError> {
        for h in [first.height, second.height] {
            if !h.is_finite() {
                return Err(TideError::InvalidHeight(h));
            }
        }
        if first.time.hours_since(second.time) == 0.0 {
            return Err(TideError::EqualTimestamps);
        }
        Ok(Self { first, second })
    }

    pub fn first(&self) -> Tide {
        self.first
    }

    pub fn second(&self) -> Tide {
        self.second
    }

    /// Duration of a full tidal cycle implied by the two references.
    pub fn period_hours(&self) -> f64 {
        2.0 * self.second.time.hours_since(self.first.time).abs()
    }
}

impl WaterLevelCalculator for RuleOfTwelfthsWaterLevelCalculator {
    fn height(&self, ut: UniversalTime) -> f64 {
        let span = self.second.time.hours_since(self.first.time);
        let elapsed = ut.hours_since(self.first.time);
        let mean = (self.first.height + self.second.height) / 2.0;
        let half_range = (self.first.height - self.second.height) / 2.0;
        mean + half_range * (PI * elapsed / span).cos()
    }
}
