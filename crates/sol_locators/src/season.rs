//! Astronomical seasons from the Sun's apparent longitude.

use sol_frames::GeoLocation;

/// Meteorological-style season name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

/// Equinoxes and solstices, named for the northern hemisphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrbitalPosition {
    SpringEquinox,
    SummerSolstice,
    AutumnalEquinox,
    WinterSolstice,
}

impl OrbitalPosition {
    /// Solar longitude at which this position is reached, degrees.
    pub fn solar_longitude_deg(self) -> f64 {
        match self {
            Self::SpringEquinox => 0.0,
            Self::SummerSolstice => 90.0,
            Self::AutumnalEquinox => 180.0,
            Self::WinterSolstice => 270.0,
        }
    }
}

/// Season for a solar longitude at `location`; mirrored south of the equator.
pub fn season_from_solar_longitude(solar_longitude_deg: f64, location: &GeoLocation) -> Season {
    let lon = sol_time::normalize_360(solar_longitude_deg);
    let north = location.is_northern_hemisphere();
    let pick = |n: Season, s: Season| if north { n } else { s };

    if lon >= OrbitalPosition::WinterSolstice.solar_longitude_deg() {
        pick(Season::Winter, Season::Summer)
    } else if lon >= OrbitalPosition::AutumnalEquinox.solar_longitude_deg() {
        pick(Season::Fall, Season::Spring)
    } else if lon >= OrbitalPosition::SummerSolstice.solar_longitude_deg() {
        pick(Season::Summer, Season::Winter)
    } else {
        pick(Season::Spring, Season::Fall)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hemispheres_mirror() {
        let north = GeoLocation::new(40.0, 0.0);
        let south = GeoLocation::new(-40.0, 0.0);
        assert_eq!(season_from_solar_longitude(10.0, &north), Season::Spring);
        assert_eq!(season_from_solar_longitude(10.0, &south), Season::Fall);
        assert_eq!(season_from_solar_longitude(120.0, &north), Season::Summer);
        assert_eq!(season_from_solar_longitude(200.0, &south), Season::Spring);
        assert_eq!(season_from_solar_longitude(300.0, &north), Season::Winter);
        assert_eq!(season_from_solar_longitude(-10.0, &south), Season::Summer);
    }
}
