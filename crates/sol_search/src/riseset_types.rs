//! Types for rise, set and transit search.

use sol_time::UniversalTime;

/// Altitude threshold family for the Sun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TwilightMode {
    /// Upper limb on the horizon: refraction plus semi-diameter.
    #[default]
    Actual,
    /// Centre 6° below the horizon.
    Civil,
    /// Centre 12° below the horizon.
    Nautical,
    /// Centre 18° below the horizon.
    Astronomical,
}

impl TwilightMode {
    /// Threshold altitude of the Sun's centre in degrees.
    pub fn altitude_deg(self) -> f64 {
        match self {
            Self::Actual => -0.8333,
            Self::Civil => -6.0,
            Self::Nautical => -12.0,
            Self::Astronomical => -18.0,
        }
    }
}

/// Threshold for the Moon's centre: parallax minus semi-diameter and refraction.
pub const MOON_STANDARD_ALTITUDE_DEG: f64 = 0.125;

/// Events of one civil day. Any field is `None` when it does not happen.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RiseSetTransitTimes {
    /// First upward crossing of the threshold.
    pub rise: Option<UniversalTime>,
    /// Upper meridian passage, if the body is above the threshold there.
    pub transit: Option<UniversalTime>,
    /// First downward crossing of the threshold.
    pub set: Option<UniversalTime>,
}

impl RiseSetTransitTimes {
    /// No crossing either way: the body stays on one side all day.
    pub fn is_circumpolar_or_hidden(&self) -> bool {
        self.rise.is_none() && self.set.is_none()
    }
}

/// A closed interval of time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    pub start: UniversalTime,
    pub end: UniversalTime,
}

impl TimeWindow {
    /// Length in hours.
    pub fn duration_hours(&self) -> f64 {
        self.end.hours_since(self.start)
    }

    /// Whether `ut` lies within the window, ends included.
    pub fn contains(&self, ut: UniversalTime) -> bool {
        ut >= self.start && ut <= self.end
    }
}

/// Tuning for the rise/set/transit search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiseSetConfig {
    /// Add standard refraction to the sampled altitude.
    pub with_refraction: bool,
    /// Sample topocentric rather than geocentric altitude.
    pub with_parallax: bool,
    /// Altitude samples per day (default 24). Must be even.
    pub samples_per_day: usize,
    /// Half-width of the parabola used to polish each crossing, minutes (default 10).
    pub refine_window_minutes: f64,
}

impl Default for RiseSetConfig {
    fn default() -> Self {
        Self {
            with_refraction: false,
            with_parallax: false,
            samples_per_day: 24,
            refine_window_minutes: 10.0,
        }
    }
}

impl RiseSetConfig {
    /// Default sampling with refraction applied.
    pub fn refracted() -> Self {
        Self {
            with_refraction: true,
            ..Self::default()
        }
    }

    /// Validate the configuration.
    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        if self.samples_per_day < 4 || self.samples_per_day % 2 != 0 {
            return Err("samples_per_day must be an even number of at least 4");
        }
        if self.samples_per_day > 1440 {
            return Err("samples_per_day must not exceed 1440");
        }
        if !self.refine_window_minutes.is_finite() || self.refine_window_minutes <= 0.0 {
            return Err("refine_window_minutes must be positive");
        }
        Ok(())
    }

    pub(crate) fn step_days(&self) -> f64 {
        1.0 / self.samples_per_day as f64
    }
}
