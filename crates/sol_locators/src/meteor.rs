//! Annual meteor showers and their radiants.
//!
//! A radiant is treated as fixed on the sky, so its locator is constant in
//! time. Activity is keyed to the Sun's apparent longitude, which repeats
//! each year to within a fraction of a day.

use sol_frames::EquatorialCoordinate;
use sol_time::{UniversalTime, delta_angle, normalize_360};

use crate::locator::CelestialLocator;

/// Major annual meteor showers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeteorShower {
    Quadrantids,
    Lyrids,
    EtaAquariids,
    DeltaAquariids,
    Perseids,
    Orionids,
    Leonids,
    Geminids,
    Ursids,
}

/// Every shower in calendar order of peak.
pub const ALL_METEOR_SHOWERS: [MeteorShower; 9] = [
    MeteorShower::Quadrantids,
    MeteorShower::Lyrids,
    MeteorShower::EtaAquariids,
    MeteorShower::DeltaAquariids,
    MeteorShower::Perseids,
    MeteorShower::Orionids,
    MeteorShower::Leonids,
    MeteorShower::Geminids,
    MeteorShower::Ursids,
];

/// Static table entry.
struct ShowerData {
    name: &'static str,
    /// Radiant right ascension as (hours, minutes).
    radiant_ra_hm: (f64, f64),
    radiant_dec_deg: f64,
    /// Solar longitude of peak activity, degrees.
    peak_solar_longitude: f64,
    /// Active solar-longitude window `[start, end]`, may wrap past 360°.
    active: (f64, f64),
    /// Zenithal hourly rate at peak.
    zhr: u32,
}

#[rustfmt::skip]
const SHOWERS: [ShowerData; 9] = [
    ShowerData { name: "Quadrantids",     radiant_ra_hm: (15.0, 20.0), radiant_dec_deg: 49.7,  peak_solar_longitude: 283.15, active: (276.0, 291.0), zhr: 110 },
    ShowerData { name: "Lyrids",          radiant_ra_hm: (18.0, 10.0), radiant_dec_deg: 33.3,  peak_solar_longitude: 32.32,  active: (24.0, 40.0),   zhr: 18 },
    ShowerData { name: "Eta Aquariids",   radiant_ra_hm: (22.0, 30.0), radiant_dec_deg: -1.0,  peak_solar_longitude: 45.5,   active: (29.0, 67.0),   zhr: 50 },
    ShowerData { name: "Delta Aquariids", radiant_ra_hm: (22.0, 42.0), radiant_dec_deg: -16.3, peak_solar_longitude: 127.0,  active: (110.0, 150.0), zhr: 25 },
    ShowerData { name: "Perseids",        radiant_ra_hm: (3.0, 13.0),  radiant_dec_deg: 58.0,  peak_solar_longitude: 140.0,  active: (115.0, 151.0), zhr: 100 },
    ShowerData { name: "Orionids",        radiant_ra_hm: (6.0, 21.0),  radiant_dec_deg: 15.6,  peak_solar_longitude: 208.0,  active: (189.0, 225.0), zhr: 20 },
    ShowerData { name: "Leonids",         radiant_ra_hm: (10.0, 17.0), radiant_dec_deg: 21.6,  peak_solar_longitude: 235.27, active: (224.0, 248.0), zhr: 15 },
    ShowerData { name: "Geminids",        radiant_ra_hm: (7.0, 24.0),  radiant_dec_deg: 32.3,  peak_solar_longitude: 262.2,  active: (252.0, 268.0), zhr: 150 },
    ShowerData { name: "Ursids",          radiant_ra_hm: (14.0, 36.0), radiant_dec_deg: 75.3,  peak_solar_longitude: 270.7,  active: (265.0, 274.0), zhr: 10 },
];

impl MeteorShower {
    fn data(self) -> &'static ShowerData {
        &SHOWERS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.data().name
    }

    /// Case-insensitive lookup ignoring spaces, e.g. `"eta aquariids"`.
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted: String = name.chars().filter(|c| !c.is_whitespace()).collect();
        ALL_METEOR_SHOWERS.into_iter().find(|s| {
            let own: String = s.name().chars().filter(|c| !c.is_whitespace()).collect();
            own.eq_ignore_ascii_case(&wanted)
        })
    }

    /// Fixed radiant position.
    pub fn radiant(self) -> EquatorialCoordinate {
        let (h, m) = self.data().radiant_ra_hm;
        EquatorialCoordinate::from_hours(self.data().radiant_dec_deg, h + m / 60.0, false)
    }

    /// Solar longitude at peak activity, degrees.
    pub fn peak_solar_longitude(self) -> f64 {
        self.data().peak_solar_longitude
    }

    /// Active solar-longitude window `(start, end)` in degrees.
    pub fn active_solar_longitudes(self) -> (f64, f64) {
        self.data().active
    }

    /// Approximate length of the active window in days.
    pub fn active_days(self) -> f64 {
        let (start, end) = self.data().active;
        // The Sun advances ~0.9856° per day.
        normalize_360(end - start) / 0.985_6
    }

    /// Zenithal hourly rate at peak.
    pub fn zenithal_hourly_rate(self) -> u32 {
        self.data().zhr
    }

    /// Whether the shower is active at this solar longitude.
    pub fn is_active(self, solar_longitude_deg: f64) -> bool {
        let (start, end) = self.data().active;
        let lon = normalize_360(solar_longitude_deg);
        if start <= end {
            (start..=end).contains(&lon)
        } else {
            lon >= start || lon <= end
        }
    }

    /// Signed degrees from `solar_longitude_deg` to the peak longitude.
    pub fn degrees_to_peak(self, solar_longitude_deg: f64) -> f64 {
        delta_angle(solar_longitude_deg, self.peak_solar_longitude())
    }
}

/// Constant-position locator for a shower radiant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeteorShowerLocator {
    shower: MeteorShower,
}

impl MeteorShowerLocator {
    pub fn new(shower: MeteorShower) -> Self {
        Self { shower }
    }

    pub fn shower(&self) -> MeteorShower {
        self.shower
    }
}

impl CelestialLocator for MeteorShowerLocator {
    fn coordinates(&self, _ut: UniversalTime) -> EquatorialCoordinate {
        self.shower.radiant()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn table_order_matches_enum() {
        for (i, shower) in ALL_METEOR_SHOWERS.iter().enumerate() {
            assert_eq!(*shower as usize, i);
        }
    }

    #[test]
    fn perseid_radiant() {
        let radiant = MeteorShower::Perseids.radiant();
        assert_abs_diff_eq!(radiant.right_ascension_deg, 48.25, epsilon = 1e-9);
        assert_abs_diff_eq!(radiant.declination_deg, 58.0, epsilon = 1e-9);
    }

    #[test]
    fn quadrantid_window_spans_year_boundary() {
        let q = MeteorShower::Quadrantids;
        assert!(q.is_active(283.0));
        assert!(!q.is_active(300.0));
        assert!(!q.is_active(10.0));
    }

    #[test]
    fn peaks_lie_inside_windows() {
        for shower in ALL_METEOR_SHOWERS {
            assert!(shower.is_active(shower.peak_solar_longitude()), "{shower:?}");
            assert!(shower.active_days() > 5.0 && shower.active_days() < 45.0);
        }
    }

    #[test]
    fn distance_to_peak_is_signed_and_wraps() {
        let q = MeteorShower::Quadrantids;
        assert_abs_diff_eq!(q.degrees_to_peak(280.15), 3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(q.degrees_to_peak(285.15), -2.0, epsilon = 1e-9);
        let lyrids = MeteorShower::Lyrids;
        assert_abs_diff_eq!(lyrids.degrees_to_peak(352.32), 40.0, epsilon = 1e-9);
    }

    #[test]
    fn geminids_are_the_richest() {
        let best = ALL_METEOR_SHOWERS
            .into_iter()
            .max_by_key(|s| s.zenithal_hourly_rate());
        assert_eq!(best, Some(MeteorShower::Geminids));
        assert_eq!(MeteorShower::Perseids.zenithal_hourly_rate(), 100);
    }

    #[test]
    fn names_round_trip() {
        assert_eq!(MeteorShower::from_name("eta aquariids"), Some(MeteorShower::EtaAquariids));
        assert_eq!(MeteorShower::from_name("Geminids"), Some(MeteorShower::Geminids));
        assert_eq!(MeteorShower::from_name("Draconids"), None);
    }

    #[test]
    fn radiant_is_time_independent() {
        let locator = MeteorShowerLocator::new(MeteorShower::Leonids);
        let a = locator.coordinates(UniversalTime::from_jd(2_451_545.0));
        let b = locator.coordinates(UniversalTime::from_jd(2_460_000.0));
        assert_eq!(a, b);
        assert!(locator.distance_km(UniversalTime::from_jd(2_451_545.0)).is_none());
    }
}
