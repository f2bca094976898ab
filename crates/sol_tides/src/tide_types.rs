//! Value types shared by the tide models and searches.

use sol_time::UniversalTime;

use crate::constituent::TideConstituent;
use crate::error::TideError;

/// One constituent of a station's harmonic table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TidalHarmonic {
    pub constituent: TideConstituent,
    /// Amplitude in the station's height unit.
    pub amplitude: f64,
    /// Greenwich phase lag κ in degrees.
    pub phase: f64,
}

impl TidalHarmonic {
    pub const fn new(constituent: TideConstituent, amplitude: f64, phase: f64) -> Self {
        Self { constituent, amplitude, phase }
    }

    pub fn validate(&self) -> Result<(), TideError> {
        if !self.amplitude.is_finite() || self.amplitude < 0.0 {
            return Err(TideError::InvalidAmplitude {
                constituent: self.constituent,
                amplitude: self.amplitude,
            });
        }
        if !self.phase.is_finite() {
            return Err(TideError::InvalidPhase {
                constituent: self.constituent,
                phase: self.phase,
            });
        }
        Ok(())
    }
}

/// A high or low water.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tide {
    pub time: UniversalTime,
    pub is_high: bool,
    pub height: f64,
}

impl Tide {
    pub const fn high(time: UniversalTime, height: f64) -> Self {
        Self { time, is_high: true, height }
    }

    pub const fn low(time: UniversalTime, height: f64) -> Self {
        Self { time, is_high: false, height }
    }
}

/// Strength of the tidal range from the phase of the Moon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TidalRange {
    /// Near new or full Moon: largest range.
    Spring,
    /// Near first or third quarter: smallest range.
    Neap,
    #[default]
    Normal,
}
