//! Low-precision solar position.
//!
//! Geometric mean longitude and mean anomaly as polynomials in T, the
//! equation of the centre, and a combined nutation/aberration correction
//! give the apparent longitude to about 0.01°. Positions are evaluated in
//! Terrestrial Time (UT + ΔT); distance uses UT directly.
//!
//! Source: Meeus, *Astronomical Algorithms*, Ch. 25 ("low accuracy" method).

use sol_frames::{EquatorialCoordinate, equatorial_to_ecliptic};
use sol_frames::obliquity::mean_obliquity_at;
use sol_time::{UniversalTime, cos_deg, delta_t_days, normalize_360, polynomial, sin_deg};

use crate::locator::CelestialLocator;

/// Semi-major axis of Earth's orbit used for the distance, in km.
const SEMI_MAJOR_AXIS_KM: f64 = 1.495_985e8;

/// Astronomical unit in km.
pub const AU_KM: f64 = 149_597_870.7;

/// Solar semidiameter at 1 AU, in arcseconds.
const SEMIDIAMETER_1AU_ARCSEC: f64 = 959.63;

/// The Sun as seen from the centre of the Earth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SunLocator;

impl SunLocator {
    /// Mean anomaly M in degrees for Julian centuries `t`.
    pub fn mean_anomaly_deg(t: f64) -> f64 {
        normalize_360(polynomial(
            t,
            &[357.529_109_2, 35_999.050_290_9, -0.000_153_6, 1.0 / 24_490_000.0],
        ))
    }

    /// Geometric mean longitude L₀ in degrees.
    fn mean_longitude_deg(t: f64) -> f64 {
        normalize_360(polynomial(t, &[280.466_46, 36_000.769_83, 0.000_303_2]))
    }

    /// Equation of the centre C in degrees.
    fn equation_of_center_deg(t: f64) -> f64 {
        let m = Self::mean_anomaly_deg(t);
        polynomial(t, &[1.914_602, -0.004_817, -0.000_014]) * sin_deg(m)
            + polynomial(t, &[0.019_993, -0.000_101]) * sin_deg(2.0 * m)
            + 0.000_289 * sin_deg(3.0 * m)
    }

    fn eccentricity(t: f64) -> f64 {
        polynomial(t, &[0.016_751_04, -0.000_041_8, -0.000_000_126])
    }

    /// Apparent longitude λ and the matching corrected obliquity, degrees.
    fn apparent_longitude_and_obliquity(t: f64) -> (f64, f64) {
        let omega = polynomial(t, &[125.04, -1_934.136]);
        let true_longitude = Self::mean_longitude_deg(t) + Self::equation_of_center_deg(t);
        let lambda = true_longitude - 0.005_69 - 0.004_78 * sin_deg(omega);
        let epsilon = mean_obliquity_at(t) + 0.002_56 * cos_deg(omega);
        (lambda, epsilon)
    }

    /// True anomaly ν in degrees at `ut`.
    pub fn true_anomaly_deg(ut: UniversalTime) -> f64 {
        let t = ut.julian_centuries();
        Self::mean_anomaly_deg(t) + Self::equation_of_center_deg(t)
    }

    /// Apparent ecliptic (solar) longitude in degrees, [0, 360).
    ///
    /// This is the longitude used for seasons and meteor-shower windows.
    pub fn solar_longitude_deg(&self, ut: UniversalTime) -> f64 {
        equatorial_to_ecliptic(&self.coordinates(ut), ut).longitude_deg
    }

    /// Earth–Sun distance in km.
    pub fn distance(&self, ut: UniversalTime) -> f64 {
        let t = ut.julian_centuries();
        let e = Self::eccentricity(t);
        let nu = Self::true_anomaly_deg(ut);
        SEMI_MAJOR_AXIS_KM * (1.0 - e * e) / (1.0 + e * cos_deg(nu))
    }

    /// Apparent angular diameter in degrees.
    pub fn angular_diameter(&self, ut: UniversalTime) -> f64 {
        let au = self.distance(ut) / AU_KM;
        2.0 * SEMIDIAMETER_1AU_ARCSEC / (3600.0 * au)
    }
}

impl CelestialLocator for SunLocator {
    fn coordinates(&self, ut: UniversalTime) -> EquatorialCoordinate {
        let tt = ut.plus_days(delta_t_days(ut.year()));
        let (lambda, epsilon) = Self::apparent_longitude_and_obliquity(tt.julian_centuries());

        let ra = (cos_deg(epsilon) * sin_deg(lambda)).atan2(cos_deg(lambda)).to_degrees();
        let dec = (sin_deg(epsilon) * sin_deg(lambda))
            .clamp(-1.0, 1.0)
            .asin()
            .to_degrees();

        EquatorialCoordinate::new(dec, ra, true)
    }

    fn distance_km(&self, ut: UniversalTime) -> Option<f64> {
        Some(self.distance(ut))
    }

    fn angular_diameter_deg(&self, ut: UniversalTime) -> Option<f64> {
        Some(self.angular_diameter(ut))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn meeus_25a_position() {
        // 1992-10-13 0h UT, evaluated at UT + ΔT.
        let ut = UniversalTime::from_jd(2_448_908.5);
        let eq = SunLocator.coordinates(ut);
        assert_abs_diff_eq!(eq.declination_deg, -7.785_303_5, epsilon = 1e-4);
        assert_abs_diff_eq!(eq.right_ascension_deg, 198.381_404, epsilon = 1e-4);
        assert!(eq.apparent);
    }

    #[test]
    fn distance_near_perihelion_and_aphelion() {
        let january = UniversalTime::from_calendar(2021, 1, 3, 0.0).unwrap();
        let july = UniversalTime::from_calendar(2021, 7, 5, 0.0).unwrap();
        let near = SunLocator.distance(january);
        let far = SunLocator.distance(july);
        assert!((near - 147.1e6).abs() < 0.2e6, "perihelion {near}");
        assert!((far - 152.1e6).abs() < 0.2e6, "aphelion {far}");
    }

    #[test]
    fn angular_diameter_about_half_degree() {
        let ut = UniversalTime::from_calendar(2021, 4, 1, 0.0).unwrap();
        let d = SunLocator.angular_diameter(ut);
        assert!((0.52..0.55).contains(&d), "diameter {d}");
    }

    #[test]
    fn solar_longitude_at_equinox() {
        // March equinox 2021-03-20 09:37 UTC.
        let ut = UniversalTime::from_calendar(2021, 3, 20, 9.0 + 37.0 / 60.0).unwrap();
        let lon = SunLocator.solar_longitude_deg(ut);
        let off = if lon > 180.0 { lon - 360.0 } else { lon };
        assert!(off.abs() < 0.03, "solar longitude {lon}");
    }
}
