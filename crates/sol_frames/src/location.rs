//! Observer location on the Earth's surface.
//!
//! Great-circle distance uses the haversine formula on a spherical Earth;
//! initial bearing uses the forward azimuth formula.

use sol_time::normalize_360;

/// Mean Earth radius in metres used for great-circle distance.
pub const EARTH_MEAN_RADIUS_M: f64 = 6_371_200.0;

/// Geographic location. Latitude north positive, longitude east positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoLocation {
    /// Geodetic latitude in degrees, [-90, 90].
    pub latitude_deg: f64,
    /// Longitude in degrees, [-180, 180].
    pub longitude_deg: f64,
}

impl GeoLocation {
    pub const fn new(latitude_deg: f64, longitude_deg: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
        }
    }

    /// The point at latitude 0, longitude 0.
    pub const ZERO: GeoLocation = GeoLocation::new(0.0, 0.0);

    /// Check that both angles are finite and in range.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.latitude_deg.is_finite() || self.latitude_deg.abs() > 90.0 {
            return Err("latitude must be within [-90, 90] degrees");
        }
        if !self.longitude_deg.is_finite() || self.longitude_deg.abs() > 180.0 {
            return Err("longitude must be within [-180, 180] degrees");
        }
        Ok(())
    }

    pub fn is_northern_hemisphere(&self) -> bool {
        self.latitude_deg >= 0.0
    }

    /// The diametrically opposite point on the globe.
    pub fn antipode(&self) -> GeoLocation {
        let lon = if self.longitude_deg <= 0.0 {
            self.longitude_deg + 180.0
        } else {
            self.longitude_deg - 180.0
        };
        GeoLocation::new(-self.latitude_deg, lon)
    }

    /// Great-circle distance to `other` in metres.
    pub fn distance_to(&self, other: &GeoLocation) -> f64 {
        let (phi1, phi2) = (self.latitude_deg.to_radians(), other.latitude_deg.to_radians());
        let dphi = phi2 - phi1;
        let dlambda = (other.longitude_deg - self.longitude_deg).to_radians();

        let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).max(0.0).sqrt());
        EARTH_MEAN_RADIUS_M * c
    }

    /// Initial great-circle bearing to `other`, degrees clockwise from north in [0, 360).
    pub fn bearing_to(&self, other: &GeoLocation) -> f64 {
        let (phi1, phi2) = (self.latitude_deg.to_radians(), other.latitude_deg.to_radians());
        let dlambda = (other.longitude_deg - self.longitude_deg).to_radians();

        let y = dlambda.sin() * phi2.cos();
        let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * dlambda.cos();
        normalize_360(y.atan2(x).to_degrees())
    }
}
