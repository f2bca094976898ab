//! The position-provider capability shared by every body.

use sol_frames::EquatorialCoordinate;
use sol_time::UniversalTime;

/// A body whose geocentric position is a pure function of time.
///
/// Implementors are stateless. Searches take `&dyn CelestialLocator` or a
/// generic `L: CelestialLocator` and never assume a particular body.
pub trait CelestialLocator {
    /// Geocentric equatorial position at `ut`.
    fn coordinates(&self, ut: UniversalTime) -> EquatorialCoordinate;

    /// Geocentric distance in km, if the body has a meaningful one.
    fn distance_km(&self, _ut: UniversalTime) -> Option<f64> {
        None
    }

    /// Apparent angular diameter in degrees, if known.
    fn angular_diameter_deg(&self, _ut: UniversalTime) -> Option<f64> {
        None
    }
}

impl<L: CelestialLocator + ?Sized> CelestialLocator for &L {
    fn coordinates(&self, ut: UniversalTime) -> EquatorialCoordinate {
        (**self).coordinates(ut)
    }

    fn distance_km(&self, ut: UniversalTime) -> Option<f64> {
        (**self).distance_km(ut)
    }

    fn angular_diameter_deg(&self, ut: UniversalTime) -> Option<f64> {
        (**self).angular_diameter_deg(ut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    impl CelestialLocator for Fixed {
        fn coordinates(&self, _ut: UniversalTime) -> EquatorialCoordinate {
            EquatorialCoordinate::new(12.0, 34.0, false)
        }
    }

    #[test]
    fn defaults_are_absent() {
        let ut = UniversalTime::from_jd(2_451_545.0);
        assert!(Fixed.distance_km(ut).is_none());
        assert!(Fixed.angular_diameter_deg(ut).is_none());
    }

    #[test]
    fn references_forward() {
        let ut = UniversalTime::from_jd(2_451_545.0);
        let dynamic: &dyn CelestialLocator = &Fixed;
        assert_eq!((&dynamic).coordinates(ut).declination_deg, 12.0);
    }
}
