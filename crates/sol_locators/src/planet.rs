//! Planet positions from fixed J2000 orbital elements.
//!
//! Each planet moves on a fixed Keplerian ellipse whose mean longitude
//! advances linearly in time. Kepler's equation is solved by Newton
//! iteration for the true anomaly; the heliocentric position is then
//! projected onto the ecliptic, referred to the Earth, and rotated to
//! equatorial coordinates. Good to about half a degree against a full
//! ephemeris.
//!
//! Source: J. L. Lawrence, *Celestial Calculations* (2019), Ch. 8.

use sol_frames::{EclipticCoordinate, EquatorialCoordinate, ecliptic_to_equatorial_at};
use sol_time::{
    J2000_JD, UniversalTime, cos_deg, normalize_360, polynomial, sin_deg, tan_deg, wrap,
};

use crate::locator::CelestialLocator;
use crate::sun::AU_KM;

/// Days in a tropical year.
const TROPICAL_YEAR_DAYS: f64 = 365.242_191;

/// Newton iteration cap for Kepler's equation.
const KEPLER_MAX_ITERATIONS: usize = 30;

/// Convergence threshold on the eccentric anomaly, radians.
const KEPLER_TOLERANCE: f64 = 1e-12;

/// Orbital and physical elements at epoch J2000.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PlanetElements {
    order: u8,
    /// Sidereal period in tropical years.
    orbital_period_years: f64,
    eccentricity: f64,
    /// Semi-major axis, AU.
    semi_major_axis_au: f64,
    /// Angular diameter at 1 AU, arcseconds.
    angular_diameter_1au_arcsec: f64,
    /// Visual magnitude at 1 AU from both Sun and Earth.
    visual_magnitude: f64,
    inclination_deg: f64,
    /// Mean longitude at epoch.
    longitude_at_epoch_deg: f64,
    /// Longitude of perihelion.
    longitude_of_perihelion_deg: f64,
    /// Longitude of the ascending node.
    ascending_node_deg: f64,
}

/// Major planets. Earth is included as the reference body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Planet {
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

/// Every planet in order from the Sun.
pub const ALL_PLANETS: [Planet; 8] = [
    Planet::Mercury,
    Planet::Venus,
    Planet::Earth,
    Planet::Mars,
    Planet::Jupiter,
    Planet::Saturn,
    Planet::Uranus,
    Planet::Neptune,
];

#[rustfmt::skip]
const MERCURY: PlanetElements = PlanetElements {
    order: 1, orbital_period_years: 0.240_847,
    eccentricity: 0.205_636, semi_major_axis_au: 0.387_099_3,
    angular_diameter_1au_arcsec: 6.74, visual_magnitude: -0.42,
    inclination_deg: 7.004_979, longitude_at_epoch_deg: 252.250_324,
    longitude_of_perihelion_deg: 77.457_796, ascending_node_deg: 48.330_766,
};

#[rustfmt::skip]
const VENUS: PlanetElements = PlanetElements {
    order: 2, orbital_period_years: 0.615_197,
    eccentricity: 0.006_776_7, semi_major_axis_au: 0.723_336,
    angular_diameter_1au_arcsec: 16.92, visual_magnitude: -4.40,
    inclination_deg: 3.394_676, longitude_at_epoch_deg: 181.979_100,
    longitude_of_perihelion_deg: 131.602_467, ascending_node_deg: 76.679_843,
};

#[rustfmt::skip]
const EARTH: PlanetElements = PlanetElements {
    order: 3, orbital_period_years: 1.000_017,
    eccentricity: 0.016_711_2, semi_major_axis_au: 1.000_003,
    angular_diameter_1au_arcsec: 0.0, visual_magnitude: 0.0,
    inclination_deg: -0.000_015, longitude_at_epoch_deg: 100.464_572,
    longitude_of_perihelion_deg: 102.937_682, ascending_node_deg: 0.0,
};

#[rustfmt::skip]
const MARS: PlanetElements = PlanetElements {
    order: 4, orbital_period_years: 1.880_848,
    eccentricity: 0.093_394, semi_major_axis_au: 1.523_710,
    angular_diameter_1au_arcsec: 9.36, visual_magnitude: -1.52,
    inclination_deg: 1.849_691, longitude_at_epoch_deg: -4.553_432,
    longitude_of_perihelion_deg: -23.943_630, ascending_node_deg: 49.559_539,
};

#[rustfmt::skip]
const JUPITER: PlanetElements = PlanetElements {
    order: 5, orbital_period_years: 11.862_615,
    eccentricity: 0.048_393, semi_major_axis_au: 5.202_887,
    angular_diameter_1au_arcsec: 196.74, visual_magnitude: -9.40,
    inclination_deg: 1.304_397_5, longitude_at_epoch_deg: 34.396_441,
    longitude_of_perihelion_deg: 14.728_480, ascending_node_deg: 100.473_909,
};

#[rustfmt::skip]
const SATURN: PlanetElements = PlanetElements {
    order: 6, orbital_period_years: 29.447_498,
    eccentricity: 0.053_862, semi_major_axis_au: 9.536_676,
    angular_diameter_1au_arcsec: 165.60, visual_magnitude: -8.88,
    inclination_deg: 2.485_992, longitude_at_epoch_deg: 49.954_244,
    longitude_of_perihelion_deg: 92.598_878, ascending_node_deg: 113.662_424,
};

#[rustfmt::skip]
const URANUS: PlanetElements = PlanetElements {
    order: 7, orbital_period_years: 84.016_846,
    eccentricity: 0.047_257_4, semi_major_axis_au: 19.189_165,
    angular_diameter_1au_arcsec: 65.80, visual_magnitude: -7.19,
    inclination_deg: 0.772_638, longitude_at_epoch_deg: 313.232_810,
    longitude_of_perihelion_deg: 170.954_276, ascending_node_deg: 74.016_925,
};

#[rustfmt::skip]
const NEPTUNE: PlanetElements = PlanetElements {
    order: 8, orbital_period_years: 164.791_32,
    eccentricity: 0.008_590, semi_major_axis_au: 30.069_923,
    angular_diameter_1au_arcsec: 62.20, visual_magnitude: -6.87,
    inclination_deg: 1.770_043, longitude_at_epoch_deg: -55.120_030,
    longitude_of_perihelion_deg: 44.964_762, ascending_node_deg: 131.784_226,
};

impl Planet {
    fn elements(self) -> &'static PlanetElements {
        match self {
            Self::Mercury => &MERCURY,
            Self::Venus => &VENUS,
            Self::Earth => &EARTH,
            Self::Mars => &MARS,
            Self::Jupiter => &JUPITER,
            Self::Saturn => &SATURN,
            Self::Uranus => &URANUS,
            Self::Neptune => &NEPTUNE,
        }
    }

    /// Position from the Sun, 1 = Mercury.
    pub fn order(self) -> u8 {
        self.elements().order
    }

    /// Name for display and command-line lookup.
    pub fn name(self) -> &'static str {
        match self {
            Self::Mercury => "Mercury",
            Self::Venus => "Venus",
            Self::Earth => "Earth",
            Self::Mars => "Mars",
            Self::Jupiter => "Jupiter",
            Self::Saturn => "Saturn",
            Self::Uranus => "Uranus",
            Self::Neptune => "Neptune",
        }
    }

    /// Case-insensitive lookup by name.
    pub fn from_name(name: &str) -> Option<Self> {
        ALL_PLANETS
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name.trim()))
    }
}

/// Heliocentric ecliptic position: latitude and longitude in degrees,
/// radius vector in AU.
#[derive(Debug, Clone, Copy)]
struct Heliocentric {
    latitude_deg: f64,
    longitude_deg: f64,
    radius_au: f64,
}

fn heliocentric(planet: Planet, ut: UniversalTime) -> Heliocentric {
    let el = planet.elements();
    let days = ut.jd() - J2000_JD;
    let daily_motion = 360.0 / (TROPICAL_YEAR_DAYS * el.orbital_period_years);

    let mean_anomaly = normalize_360(polynomial(
        days,
        &[el.longitude_at_epoch_deg - el.longitude_of_perihelion_deg, daily_motion],
    ));
    let true_anomaly = true_anomaly_deg(mean_anomaly, el.eccentricity);

    let longitude = normalize_360(true_anomaly + el.longitude_of_perihelion_deg);
    let latitude = (sin_deg(longitude - el.ascending_node_deg) * sin_deg(el.inclination_deg))
        .clamp(-1.0, 1.0)
        .asin()
        .to_degrees();
    let radius = el.semi_major_axis_au * (1.0 - el.eccentricity * el.eccentricity)
        / (1.0 + el.eccentricity * cos_deg(true_anomaly));

    Heliocentric {
        latitude_deg: latitude,
        longitude_deg: longitude,
        radius_au: radius,
    }
}

/// True anomaly in degrees from mean anomaly `m_deg` and eccentricity `e`.
///
/// Solves `E − e·sin E = M` by Newton's method, then
/// `tan(ν/2) = √((1+e)/(1−e))·tan(E/2)`.
pub fn true_anomaly_deg(m_deg: f64, e: f64) -> f64 {
    let m = m_deg.to_radians();
    let mut ecc_anomaly = if e < 0.8 { m } else { std::f64::consts::PI };
    let mut converged = false;
    for _ in 0..KEPLER_MAX_ITERATIONS {
        let step = (ecc_anomaly - e * ecc_anomaly.sin() - m) / (1.0 - e * ecc_anomaly.cos());
        ecc_anomaly -= step;
        if step.abs() < KEPLER_TOLERANCE {
            converged = true;
            break;
        }
    }
    if !converged {
        log::warn!("Kepler solve did not converge for M = {m_deg}°, e = {e}");
    }
    let nu = 2.0 * (((1.0 + e) / (1.0 - e)).sqrt() * (ecc_anomaly / 2.0).tan()).atan();
    normalize_360(nu.to_degrees())
}

/// A planet as seen from the centre of the Earth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanetLocator {
    planet: Planet,
}

impl PlanetLocator {
    pub fn new(planet: Planet) -> Self {
        Self { planet }
    }

    pub fn planet(&self) -> Planet {
        self.planet
    }

    /// Geocentric ecliptic position given both heliocentric positions.
    fn geocentric(&self, body: &Heliocentric, earth: &Heliocentric) -> EclipticCoordinate {
        let el = self.planet.elements();
        let node = el.ascending_node_deg;

        // Longitude projected onto the ecliptic, l′.
        let projected = normalize_360(
            node + (sin_deg(body.longitude_deg - node) * cos_deg(el.inclination_deg))
                .atan2(cos_deg(body.longitude_deg - node))
                .to_degrees(),
        );
        let projected_radius = body.radius_au * cos_deg(body.latitude_deg);
        let (r, big_r, l_earth) = (projected_radius, earth.radius_au, earth.longitude_deg);

        let longitude = if self.planet.order() <= Planet::Earth.order() {
            180.0
                + l_earth
                + (r * sin_deg(l_earth - projected))
                    .atan2(big_r - r * cos_deg(l_earth - projected))
                    .to_degrees()
        } else {
            projected
                + (big_r * sin_deg(projected - l_earth))
                    .atan2(r - big_r * cos_deg(l_earth - projected))
                    .to_degrees()
        };
        let longitude = normalize_360(longitude);

        let latitude = (r * tan_deg(body.latitude_deg) * sin_deg(longitude - projected))
            .atan2(big_r * sin_deg(projected - l_earth))
            .to_degrees();

        EclipticCoordinate::new(wrap(latitude, -90.0, 90.0), longitude)
    }

    /// Earth–planet distance in AU.
    fn distance_between(body: &Heliocentric, earth: &Heliocentric) -> f64 {
        let (r, big_r) = (body.radius_au, earth.radius_au);
        (big_r * big_r + r * r
            - 2.0 * big_r * r * cos_deg(body.longitude_deg - earth.longitude_deg))
        .max(0.0)
        .sqrt()
    }

    /// Earth–planet distance in AU.
    pub fn distance_au(&self, ut: UniversalTime) -> f64 {
        let body = heliocentric(self.planet, ut);
        let earth = heliocentric(Planet::Earth, ut);
        Self::distance_between(&body, &earth)
    }

    /// Apparent angular diameter in arcseconds.
    pub fn angular_diameter_arcsec(&self, ut: UniversalTime) -> f64 {
        self.planet.elements().angular_diameter_1au_arcsec / self.distance_au(ut)
    }

    /// Apparent visual magnitude.
    ///
    /// Uses the illuminated fraction `(1 + cos(λ − l))/2` as the phase
    /// correction; a fully dark phase returns `f64::INFINITY`.
    pub fn magnitude(&self, ut: UniversalTime) -> f64 {
        let body = heliocentric(self.planet, ut);
        let earth = heliocentric(Planet::Earth, ut);
        let geocentric = self.geocentric(&body, &earth);
        let distance = Self::distance_between(&body, &earth);

        let phase = (1.0 + cos_deg(geocentric.longitude_deg - body.longitude_deg)) / 2.0;
        if phase <= 0.0 {
            return f64::INFINITY;
        }
        self.planet.elements().visual_magnitude
            + 5.0 * ((body.radius_au * distance) / phase.sqrt()).log10()
    }
}

impl CelestialLocator for PlanetLocator {
    fn coordinates(&self, ut: UniversalTime) -> EquatorialCoordinate {
        let body = heliocentric(self.planet, ut);
        let earth = heliocentric(Planet::Earth, ut);
        ecliptic_to_equatorial_at(&self.geocentric(&body, &earth), ut)
    }

    fn distance_km(&self, ut: UniversalTime) -> Option<f64> {
        Some(self.distance_au(ut) * AU_KM)
    }

    fn angular_diameter_deg(&self, ut: UniversalTime) -> Option<f64> {
        Some(self.angular_diameter_arcsec(ut) / 3600.0)
    }
}
