//! Sky coordinate value types.
//!
//! Constructors normalize their inputs: longitudes and right ascension to
//! [0, 360), azimuth to [0, 360), latitudes, declination and altitude
//! clamped to [-90, 90].

use sol_time::{normalize_360, wrap};

/// Earth-centred equatorial position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquatorialCoordinate {
    /// Declination in degrees, [-90, 90].
    pub declination_deg: f64,
    /// Right ascension in degrees, [0, 360).
    pub right_ascension_deg: f64,
    /// Whether the position already includes nutation and aberration.
    pub apparent: bool,
}

impl EquatorialCoordinate {
    /// Create a normalized equatorial coordinate.
    pub fn new(declination_deg: f64, right_ascension_deg: f64, apparent: bool) -> Self {
        Self {
            declination_deg: declination_deg.clamp(-90.0, 90.0),
            right_ascension_deg: normalize_360(right_ascension_deg),
            apparent,
        }
    }

    /// Create from right ascension in hours.
    pub fn from_hours(declination_deg: f64, right_ascension_hours: f64, apparent: bool) -> Self {
        Self::new(declination_deg, right_ascension_hours * 15.0, apparent)
    }

    /// Right ascension in hours, [0, 24).
    pub fn right_ascension_hours(&self) -> f64 {
        self.right_ascension_deg / 15.0
    }

    /// Hour angle in hours for a local sidereal time, wrapped to [0, 24).
    pub fn hour_angle_hours(&self, local_sidereal_hours: f64) -> f64 {
        wrap(local_sidereal_hours - self.right_ascension_hours(), 0.0, 24.0)
    }
}

/// Position referred to the ecliptic plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EclipticCoordinate {
    /// Ecliptic latitude in degrees, [-90, 90].
    pub latitude_deg: f64,
    /// Ecliptic longitude in degrees, [0, 360).
    pub longitude_deg: f64,
}

impl EclipticCoordinate {
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Self {
        Self {
            latitude_deg: latitude_deg.clamp(-90.0, 90.0),
            longitude_deg: normalize_360(longitude_deg),
        }
    }
}

/// Observer-relative position.
///
/// Azimuth is measured from true north, increasing eastward
/// (N = 0°, E = 90°, S = 180°, W = 270°).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizonCoordinate {
    /// Azimuth in degrees, [0, 360).
    pub azimuth_deg: f64,
    /// Altitude above the horizon in degrees, [-90, 90].
    pub altitude_deg: f64,
}

impl HorizonCoordinate {
    pub fn new(azimuth_deg: f64, altitude_deg: f64) -> Self {
        Self {
            azimuth_deg: normalize_360(azimuth_deg),
            altitude_deg: altitude_deg.clamp(-90.0, 90.0),
        }
    }

    /// Zenith distance in degrees.
    pub fn zenith_deg(&self) -> f64 {
        90.0 - self.altitude_deg
    }

    /// Great-circle angle to another horizon position, in degrees.
    pub fn angular_distance_to(&self, other: &HorizonCoordinate) -> f64 {
        let (z1, z2) = (self.zenith_deg().to_radians(), other.zenith_deg().to_radians());
        let da = (self.azimuth_deg - other.azimuth_deg).to_radians();
        (z1.cos() * z2.cos() + z1.sin() * z2.sin() * da.cos())
            .clamp(-1.0, 1.0)
            .acos()
            .to_degrees()
    }
}
