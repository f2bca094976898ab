//! Bright navigational stars.
//!
//! Catalogue positions are J2000 mean places. The locator precesses them to
//! the date of observation (Meeus Ch. 21, rigorous method) and ignores
//! proper motion, nutation and aberration. Stars have no useful distance.

use sol_frames::EquatorialCoordinate;
use sol_time::{UniversalTime, cos_deg, jd_to_centuries, normalize_360, polynomial, sin_deg};

use crate::locator::CelestialLocator;

/// Above this declination, |δ| is taken from the arc cosine, which stays
/// well conditioned near the pole.
const NEAR_POLE_DEG: f64 = 89.0;

const ARCSEC_PER_DEG: f64 = 3600.0;

/// The brightest stars plus Polaris.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Star {
    Sirius,
    Canopus,
    Rigil,
    Arcturus,
    Vega,
    Rigel,
    Procyon,
    Achernar,
    Betelgeuse,
    Hadar,
    Altair,
    Acrux,
    Aldebaran,
    Antares,
    Spica,
    Pollux,
    Fomalhaut,
    Deneb,
    Mimosa,
    Regulus,
    Adhara,
    Castor,
    Shaula,
    Gacrux,
    Bellatrix,
    Elnath,
    Miaplacidus,
    Alnilam,
    Alnair,
    Alnitak,
    Alioth,
    Dubhe,
    Mirfak,
    Wezen,
    Regor,
    Sargas,
    KausAustralis,
    Avior,
    Alkaid,
    Menkalinan,
    Atria,
    Alhena,
    Peacock,
    Alsephina,
    Mirzam,
    Polaris,
    Alphard,
    Hamal,
    Diphda,
}

/// Every catalogued star, brightest first.
pub const ALL_STARS: [Star; 49] = [
    Star::Sirius,
    Star::Canopus,
    Star::Rigil,
    Star::Arcturus,
    Star::Vega,
    Star::Rigel,
    Star::Procyon,
    Star::Achernar,
    Star::Betelgeuse,
    Star::Hadar,
    Star::Altair,
    Star::Acrux,
    Star::Aldebaran,
    Star::Antares,
    Star::Spica,
    Star::Pollux,
    Star::Fomalhaut,
    Star::Deneb,
    Star::Mimosa,
    Star::Regulus,
    Star::Adhara,
    Star::Castor,
    Star::Shaula,
    Star::Gacrux,
    Star::Bellatrix,
    Star::Elnath,
    Star::Miaplacidus,
    Star::Alnilam,
    Star::Alnair,
    Star::Alnitak,
    Star::Alioth,
    Star::Dubhe,
    Star::Mirfak,
    Star::Wezen,
    Star::Regor,
    Star::Sargas,
    Star::KausAustralis,
    Star::Avior,
    Star::Alkaid,
    Star::Menkalinan,
    Star::Atria,
    Star::Alhena,
    Star::Peacock,
    Star::Alsephina,
    Star::Mirzam,
    Star::Polaris,
    Star::Alphard,
    Star::Hamal,
    Star::Diphda,
];

struct StarData {
    name: &'static str,
    /// J2000 right ascension as (hours, minutes, seconds).
    ra_hms: (f64, f64, f64),
    /// J2000 declination as (degrees, arcminutes, arcseconds); the sign of
    /// the degrees applies to the whole angle.
    dec_dms: (f64, f64, f64),
}

#[rustfmt::skip]
const STARS: [StarData; 49] = [
    StarData { name: "Sirius",         ra_hms: (6.0, 45.0, 8.92),   dec_dms: (-16.0, 42.0, 58.0) },
    StarData { name: "Canopus",        ra_hms: (6.0, 23.0, 57.11),  dec_dms: (-52.0, 41.0, 44.4) },
    StarData { name: "Rigil",          ra_hms: (14.0, 39.0, 36.49), dec_dms: (-60.0, 50.0, 2.4) },
    StarData { name: "Arcturus",       ra_hms: (14.0, 15.0, 39.67), dec_dms: (19.0, 10.0, 56.7) },
    StarData { name: "Vega",           ra_hms: (18.0, 36.0, 56.34), dec_dms: (38.0, 47.0, 1.3) },
    StarData { name: "Rigel",          ra_hms: (5.0, 14.0, 32.27),  dec_dms: (-8.0, 12.0, 5.9) },
    StarData { name: "Procyon",        ra_hms: (7.0, 39.0, 18.12),  dec_dms: (5.0, 13.0, 30.0) },
    StarData { name: "Achernar",       ra_hms: (1.0, 37.0, 42.85),  dec_dms: (-57.0, 14.0, 12.3) },
    StarData { name: "Betelgeuse",     ra_hms: (5.0, 55.0, 10.31),  dec_dms: (7.0, 24.0, 25.4) },
    StarData { name: "Hadar",          ra_hms: (14.0, 3.0, 49.41),  dec_dms: (-60.0, 22.0, 22.9) },
    StarData { name: "Altair",         ra_hms: (19.0, 50.0, 47.0),  dec_dms: (8.0, 52.0, 6.0) },
    StarData { name: "Acrux",          ra_hms: (12.0, 26.0, 35.9),  dec_dms: (-63.0, 5.0, 56.7) },
    StarData { name: "Aldebaran",      ra_hms: (4.0, 35.0, 55.24),  dec_dms: (16.0, 30.0, 33.5) },
    StarData { name: "Antares",        ra_hms: (16.0, 29.0, 24.46), dec_dms: (-26.0, 25.0, 55.2) },
    StarData { name: "Spica",          ra_hms: (13.0, 25.0, 11.58), dec_dms: (-11.0, 9.0, 40.7) },
    StarData { name: "Pollux",         ra_hms: (7.0, 45.0, 18.95),  dec_dms: (28.0, 1.0, 34.3) },
    StarData { name: "Fomalhaut",      ra_hms: (22.0, 57.0, 39.05), dec_dms: (-29.0, 37.0, 20.1) },
    StarData { name: "Deneb",          ra_hms: (20.0, 41.0, 25.92), dec_dms: (45.0, 16.0, 49.3) },
    StarData { name: "Mimosa",         ra_hms: (12.0, 47.0, 43.27), dec_dms: (-59.0, 41.0, 19.6) },
    StarData { name: "Regulus",        ra_hms: (10.0, 8.0, 28.1),   dec_dms: (12.0, 18.0, 23.0) },
    StarData { name: "Adhara",         ra_hms: (6.0, 58.0, 37.55),  dec_dms: (-28.0, 58.0, 19.5) },
    StarData { name: "Castor",         ra_hms: (7.0, 34.0, 35.87),  dec_dms: (31.0, 53.0, 17.8) },
    StarData { name: "Shaula",         ra_hms: (17.0, 33.0, 36.52), dec_dms: (-37.0, 6.0, 13.8) },
    StarData { name: "Gacrux",         ra_hms: (12.0, 31.0, 9.96),  dec_dms: (-57.0, 6.0, 47.6) },
    StarData { name: "Bellatrix",      ra_hms: (5.0, 25.0, 7.86),   dec_dms: (6.0, 20.0, 58.9) },
    StarData { name: "Elnath",         ra_hms: (5.0, 26.0, 17.51),  dec_dms: (28.0, 36.0, 26.8) },
    StarData { name: "Miaplacidus",    ra_hms: (9.0, 13.0, 11.98),  dec_dms: (-69.0, 43.0, 1.9) },
    StarData { name: "Alnilam",        ra_hms: (5.0, 36.0, 12.81),  dec_dms: (-1.0, 12.0, 6.9) },
    StarData { name: "Alnair",         ra_hms: (22.0, 8.0, 13.98),  dec_dms: (-46.0, 57.0, 39.5) },
    StarData { name: "Alnitak",        ra_hms: (5.0, 40.0, 45.53),  dec_dms: (-1.0, 56.0, 33.3) },
    StarData { name: "Alioth",         ra_hms: (12.0, 54.0, 1.75),  dec_dms: (55.0, 57.0, 35.4) },
    StarData { name: "Dubhe",          ra_hms: (11.0, 3.0, 43.67),  dec_dms: (61.0, 45.0, 3.7) },
    StarData { name: "Mirfak",         ra_hms: (3.0, 24.0, 19.37),  dec_dms: (49.0, 51.0, 40.2) },
    StarData { name: "Wezen",          ra_hms: (7.0, 8.0, 23.48),   dec_dms: (-26.0, 23.0, 35.5) },
    StarData { name: "Regor",          ra_hms: (8.0, 9.0, 31.95),   dec_dms: (-47.0, 20.0, 11.7) },
    StarData { name: "Sargas",         ra_hms: (17.0, 37.0, 19.13), dec_dms: (-42.0, 59.0, 52.2) },
    StarData { name: "Kaus Australis", ra_hms: (18.0, 24.0, 10.32), dec_dms: (-34.0, 23.0, 4.6) },
    StarData { name: "Avior",          ra_hms: (8.0, 22.0, 30.84),  dec_dms: (-59.0, 32.0, 34.1) },
    StarData { name: "Alkaid",         ra_hms: (13.0, 47.0, 32.44), dec_dms: (49.0, 18.0, 47.8) },
    StarData { name: "Menkalinan",     ra_hms: (5.0, 59.0, 31.72),  dec_dms: (44.0, 56.0, 50.8) },
    StarData { name: "Atria",          ra_hms: (16.0, 48.0, 39.0),  dec_dms: (-69.0, 1.0, 39.8) },
    StarData { name: "Alhena",         ra_hms: (6.0, 37.0, 42.7),   dec_dms: (16.0, 23.0, 57.4) },
    StarData { name: "Peacock",        ra_hms: (20.0, 25.0, 38.86), dec_dms: (-56.0, 44.0, 6.3) },
    StarData { name: "Alsephina",      ra_hms: (8.0, 44.0, 42.23),  dec_dms: (-54.0, 42.0, 31.8) },
    StarData { name: "Mirzam",         ra_hms: (6.0, 22.0, 41.99),  dec_dms: (-17.0, 57.0, 21.3) },
    StarData { name: "Polaris",        ra_hms: (2.0, 31.0, 49.09),  dec_dms: (89.0, 15.0, 50.8) },
    StarData { name: "Alphard",        ra_hms: (9.0, 27.0, 35.24),  dec_dms: (-8.0, 39.0, 31.0) },
    StarData { name: "Hamal",          ra_hms: (2.0, 7.0, 10.41),   dec_dms: (23.0, 27.0, 44.7) },
    StarData { name: "Diphda",         ra_hms: (0.0, 43.0, 35.37),  dec_dms: (-17.0, 59.0, 11.8) },
];

impl Star {
    fn data(self) -> &'static StarData {
        &STARS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.data().name
    }

    /// Case-insensitive lookup ignoring spaces, e.g. `"kaus australis"`.
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted: String = name.chars().filter(|c| !c.is_whitespace()).collect();
        ALL_STARS.into_iter().find(|s| {
            let own: String = s.name().chars().filter(|c| !c.is_whitespace()).collect();
            own.eq_ignore_ascii_case(&wanted)
        })
    }

    /// Mean place at the J2000.0 epoch.
    pub fn j2000(self) -> EquatorialCoordinate {
        let (h, m, s) = self.data().ra_hms;
        let (d, am, asec) = self.data().dec_dms;
        let magnitude = d.abs() + am / 60.0 + asec / ARCSEC_PER_DEG;
        let declination = if d.is_sign_negative() { -magnitude } else { magnitude };
        EquatorialCoordinate::from_hours(declination, h + m / 60.0 + s / 3600.0, false)
    }
}

/// Precess a J2000 mean place to the epoch `t` Julian centuries later.
pub fn precess_from_j2000(position: &EquatorialCoordinate, t: f64) -> EquatorialCoordinate {
    let zeta = polynomial(t, &[0.0, 2306.2181, 0.301_88, 0.017_998]) / ARCSEC_PER_DEG;
    let z = polynomial(t, &[0.0, 2306.2181, 1.094_68, 0.018_203]) / ARCSEC_PER_DEG;
    let theta = polynomial(t, &[0.0, 2004.3109, -0.426_65, -0.041_833]) / ARCSEC_PER_DEG;

    let dec = position.declination_deg;
    let ra = position.right_ascension_deg + zeta;

    let a = cos_deg(dec) * sin_deg(ra);
    let b = cos_deg(theta) * cos_deg(dec) * cos_deg(ra) - sin_deg(theta) * sin_deg(dec);
    let c = sin_deg(theta) * cos_deg(dec) * cos_deg(ra) + cos_deg(theta) * sin_deg(dec);

    let right_ascension = normalize_360(a.atan2(b).to_degrees() + z);
    let declination = if dec.abs() > NEAR_POLE_DEG {
        a.hypot(b).acos().to_degrees().copysign(dec)
    } else {
        c.asin().to_degrees()
    };
    EquatorialCoordinate::new(declination, right_ascension, false)
}

/// Locator for a catalogued star, precessed to the date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarLocator {
    star: Star,
}

impl StarLocator {
    pub fn new(star: Star) -> Self {
        Self { star }
    }

    pub fn star(&self) -> Star {
        self.star
    }
}

impl CelestialLocator for StarLocator {
    fn coordinates(&self, ut: UniversalTime) -> EquatorialCoordinate {
        precess_from_j2000(&self.star.j2000(), jd_to_centuries(ut.jd()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use sol_time::{J2000_JD, hours_to_deg};

    #[test]
    fn table_order_matches_enum() {
        for (i, star) in ALL_STARS.iter().enumerate() {
            assert_eq!(*star as usize, i);
        }
    }

    #[test]
    fn names_round_trip_loosely() {
        assert_eq!(Star::from_name("kaus australis"), Some(Star::KausAustralis));
        assert_eq!(Star::from_name("SIRIUS"), Some(Star::Sirius));
        assert_eq!(Star::from_name("Sol"), None);
        for star in ALL_STARS {
            assert_eq!(Star::from_name(star.name()), Some(star));
        }
    }

    #[test]
    fn sign_applies_to_whole_declination() {
        let alnilam = Star::Alnilam.j2000();
        assert_abs_diff_eq!(
            alnilam.declination_deg,
            -(1.0 + 12.0 / 60.0 + 6.9 / 3600.0),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            alnilam.right_ascension_deg,
            hours_to_deg(5.0 + 36.0 / 60.0 + 12.81 / 3600.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn no_precession_at_j2000() {
        let locator = StarLocator::new(Star::Vega);
        let eq = locator.coordinates(UniversalTime::from_jd(J2000_JD));
        let mean = Star::Vega.j2000();
        assert_abs_diff_eq!(eq.declination_deg, mean.declination_deg, epsilon = 1e-9);
        assert_abs_diff_eq!(eq.right_ascension_deg, mean.right_ascension_deg, epsilon = 1e-9);
        assert_eq!(locator.distance_km(UniversalTime::from_jd(J2000_JD)), None);
    }

    #[test]
    fn theta_persei_precession() {
        // Meeus 21.b: θ Persei, J2000 mean place precessed to 2028 Nov 13.19 TD.
        let mean = EquatorialCoordinate::new(49.227_75, 41.054_063, false);
        let t = jd_to_centuries(2_462_088.69);
        let eq = precess_from_j2000(&mean, t);
        assert_abs_diff_eq!(eq.right_ascension_deg, 41.547_214, epsilon = 1e-5);
        assert_abs_diff_eq!(eq.declination_deg, 49.348_483, epsilon = 1e-5);
    }

    #[test]
    fn polaris_stays_near_the_pole() {
        let locator = StarLocator::new(Star::Polaris);
        let eq = locator.coordinates(UniversalTime::from_jd(J2000_JD + 25.0 * 365.25));
        // Polaris is still closing on the pole.
        assert!(eq.declination_deg > Star::Polaris.j2000().declination_deg);
        assert!(eq.declination_deg < 90.0);
        assert!(eq.right_ascension_deg > 37.0 && eq.right_ascension_deg < 60.0, "{eq:?}");
    }
}
