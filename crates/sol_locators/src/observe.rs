//! Observer-relative views of any [`CelestialLocator`].
//!
//! Geocentric position → optional topocentric parallax → horizon frame →
//! optional refraction. The order matters: refraction acts on the
//! altitude an observer actually sees, so it is always applied last.

use sol_frames::{
    GeoLocation, HorizonCoordinate, apply_parallax, apply_refraction, equatorial_to_horizon,
    local_apparent_sidereal_hours,
};
use sol_time::{UniversalTime, cos_deg, sin_deg, tan_deg};

use crate::locator::CelestialLocator;

/// Corrections applied when viewing a body from the ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ObservationOptions {
    /// Lift the altitude by standard atmospheric refraction.
    pub with_refraction: bool,
    /// Shift to topocentric coordinates using the body's distance.
    pub with_parallax: bool,
}

impl ObservationOptions {
    /// Geometric position, no corrections.
    pub const GEOMETRIC: Self = Self {
        with_refraction: false,
        with_parallax: false,
    };

    /// Refraction and parallax both applied.
    pub const APPARENT: Self = Self {
        with_refraction: true,
        with_parallax: true,
    };
}

/// Horizon position of `locator` seen from `location` at `ut`.
///
/// Parallax is skipped for bodies without a distance.
pub fn horizon_position<L: CelestialLocator + ?Sized>(
    locator: &L,
    ut: UniversalTime,
    location: &GeoLocation,
    options: ObservationOptions,
) -> HorizonCoordinate {
    let lst = local_apparent_sidereal_hours(ut, location.longitude_deg);
    let mut equatorial = locator.coordinates(ut);

    if options.with_parallax {
        if let Some(distance) = locator.distance_km(ut) {
            equatorial = apply_parallax(&equatorial, distance, lst, location.latitude_deg);
        }
    }

    let horizon = equatorial_to_horizon(&equatorial, lst, location.latitude_deg);
    if options.with_refraction {
        apply_refraction(&horizon)
    } else {
        horizon
    }
}

/// Altitude in degrees.
pub fn altitude_deg<L: CelestialLocator + ?Sized>(
    locator: &L,
    ut: UniversalTime,
    location: &GeoLocation,
    options: ObservationOptions,
) -> f64 {
    horizon_position(locator, ut, location, options).altitude_deg
}

/// Azimuth in degrees from true north, eastward.
///
/// Refraction never moves the azimuth, so only the parallax flag matters.
pub fn azimuth_deg<L: CelestialLocator + ?Sized>(
    locator: &L,
    ut: UniversalTime,
    location: &GeoLocation,
    with_parallax: bool,
) -> f64 {
    let options = ObservationOptions {
        with_refraction: false,
        with_parallax,
    };
    horizon_position(locator, ut, location, options).azimuth_deg
}

/// Parallactic angle in degrees (Meeus Eq. 14.1).
///
/// Angle between the direction to the zenith and to the north celestial
/// pole at the body's position; negative before transit.
pub fn parallactic_angle_deg<L: CelestialLocator + ?Sized>(
    locator: &L,
    ut: UniversalTime,
    location: &GeoLocation,
) -> f64 {
    let equatorial = locator.coordinates(ut);
    let lst = local_apparent_sidereal_hours(ut, location.longitude_deg);
    let h = equatorial.hour_angle_hours(lst) * 15.0;
    let dec = equatorial.declination_deg;

    sin_deg(h)
        .atan2(tan_deg(location.latitude_deg) * cos_deg(dec) - sin_deg(dec) * cos_deg(h))
        .to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sol_frames::EquatorialCoordinate;

    struct Fixed {
        dec: f64,
        ra: f64,
        distance: Option<f64>,
    }

    impl CelestialLocator for Fixed {
        fn coordinates(&self, _ut: UniversalTime) -> EquatorialCoordinate {
            EquatorialCoordinate::new(self.dec, self.ra, false)
        }

        fn distance_km(&self, _ut: UniversalTime) -> Option<f64> {
            self.distance
        }
    }

    fn ut() -> UniversalTime {
        UniversalTime::from_jd(2_459_000.5)
    }

    #[test]
    fn refraction_lifts_only_altitude() {
        let body = Fixed { dec: 10.0, ra: 40.0, distance: None };
        let here = GeoLocation::new(45.0, 10.0);
        let plain = horizon_position(&body, ut(), &here, ObservationOptions::GEOMETRIC);
        let refracted = horizon_position(
            &body,
            ut(),
            &here,
            ObservationOptions { with_refraction: true, with_parallax: false },
        );
        assert!(refracted.altitude_deg >= plain.altitude_deg);
        assert_eq!(refracted.azimuth_deg, plain.azimuth_deg);
    }

    #[test]
    fn parallax_lowers_a_near_body() {
        let near = Fixed { dec: 10.0, ra: 40.0, distance: Some(380_000.0) };
        let far = Fixed { dec: 10.0, ra: 40.0, distance: None };
        let here = GeoLocation::new(45.0, 10.0);
        let options = ObservationOptions { with_refraction: false, with_parallax: true };
        let a_near = altitude_deg(&near, ut(), &here, options);
        let a_far = altitude_deg(&far, ut(), &here, options);
        assert!(a_near < a_far, "near {a_near}, far {a_far}");
        assert!(a_far - a_near < 1.1);
    }

    #[test]
    fn parallactic_angle_zero_on_meridian() {
        let here = GeoLocation::new(40.0, 0.0);
        let lst = local_apparent_sidereal_hours(ut(), here.longitude_deg);
        let body = Fixed { dec: 5.0, ra: lst * 15.0, distance: None };
        assert!(parallactic_angle_deg(&body, ut(), &here).abs() < 1e-6);
    }
}
