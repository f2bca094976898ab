//! Geocentric Moon from the truncated ELP-2000/82 series.
//!
//! Longitude and distance come from the 60 periodic terms of Meeus Table
//! 47.A, latitude from the 60 terms of Table 47.B, plus the additive
//! Venus, Jupiter and flattening terms A1–A3. Accuracy is about 10″ in
//! longitude and 4″ in latitude. The series is evaluated in Terrestrial
//! Time (UT + ΔT), the same time scale the Sun uses.
//!
//! Phase angle and illumination follow Meeus Ch. 48 (Eq. 48.4), the bright
//! limb Eq. 48.5, lunation numbers Meeus Ch. 49.

use sol_frames::{
    EclipticCoordinate, EquatorialCoordinate, GeoLocation, ecliptic_to_equatorial,
    nutation_in_longitude_deg, true_obliquity_deg,
};
use sol_time::{
    UniversalTime, cos_deg, delta_t_days, frac, normalize_360, normalize_to_pm180, polynomial,
    sin_deg,
};

use crate::locator::CelestialLocator;
use crate::observe::{ObservationOptions, altitude_deg, parallactic_angle_deg};
use crate::sun::SunLocator;

/// Mean geocentric distance term of the series, km.
const MEAN_DISTANCE_KM: f64 = 385_000.56;

/// Distance at or below which a full Moon counts as a super moon, km.
pub const SUPER_MOON_DISTANCE_KM: f64 = 360_000.0;

/// Earth equatorial radius used for the horizontal parallax, km.
const EARTH_RADIUS_KM: f64 = 6378.14;

/// Lunations per year at J2000, Meeus Eq. 49.2.
const LUNATIONS_PER_YEAR: f64 = 12.3685;

/// Half-width of the principal phases (new, quarters, full) in degrees.
const PRINCIPAL_HALF_WIDTH: f64 = 5.625;

/// Table 47.A rows: `[D, M, M', F, Σl coefficient, Σr coefficient]`.
///
/// Σl is in 1e-6 degrees, Σr in metres.
#[rustfmt::skip]
static LONGITUDE_DISTANCE_TERMS: [[f64; 6]; 60] = [
    [ 0.0,  0.0,  1.0,  0.0, 6288774.0, -20905355.0],
    [ 2.0,  0.0, -1.0,  0.0, 1274027.0, -3699111.0],
    [ 2.0,  0.0,  0.0,  0.0,  658314.0, -2955968.0],
    [ 0.0,  0.0,  2.0,  0.0,  213618.0, -569925.0],
    [ 0.0,  1.0,  0.0,  0.0, -185116.0,   48888.0],
    [ 0.0,  0.0,  0.0,  2.0, -114332.0,   -3149.0],
    [ 2.0,  0.0, -2.0,  0.0,   58793.0,  246158.0],
    [ 2.0, -1.0, -1.0,  0.0,   57066.0, -152138.0],
    [ 2.0,  0.0,  1.0,  0.0,   53322.0, -170733.0],
    [ 2.0, -1.0,  0.0,  0.0,   45758.0, -204586.0],
    [ 0.0,  1.0, -1.0,  0.0,  -40923.0, -129620.0],
    [ 1.0,  0.0,  0.0,  0.0,  -34720.0,  108743.0],
    [ 0.0,  1.0,  1.0,  0.0,  -30383.0,  104755.0],
    [ 2.0,  0.0,  0.0, -2.0,   15327.0,   10321.0],
    [ 0.0,  0.0,  1.0,  2.0,  -12528.0,       0.0],
    [ 0.0,  0.0,  1.0, -2.0,   10980.0,   79661.0],
    [ 4.0,  0.0, -1.0,  0.0,   10675.0,  -34782.0],
    [ 0.0,  0.0,  3.0,  0.0,   10034.0,  -23210.0],
    [ 4.0,  0.0, -2.0,  0.0,    8548.0,  -21636.0],
    [ 2.0,  1.0, -1.0,  0.0,   -7888.0,   24208.0],
    [ 2.0,  1.0,  0.0,  0.0,   -6766.0,   30824.0],
    [ 1.0,  0.0, -1.0,  0.0,   -5163.0,   -8379.0],
    [ 1.0,  1.0,  0.0,  0.0,    4987.0,  -16675.0],
    [ 2.0, -1.0,  1.0,  0.0,    4036.0,  -12831.0],
    [ 2.0,  0.0,  2.0,  0.0,    3994.0,  -10445.0],
    [ 4.0,  0.0,  0.0,  0.0,    3861.0,  -11650.0],
    [ 2.0,  0.0, -3.0,  0.0,    3665.0,   14403.0],
    [ 0.0,  1.0, -2.0,  0.0,   -2689.0,   -7003.0],
    [ 2.0,  0.0, -1.0,  2.0,   -2602.0,       0.0],
    [ 2.0, -1.0, -2.0,  0.0,    2390.0,   10056.0],
    [ 1.0,  0.0,  1.0,  0.0,   -2348.0,    6322.0],
    [ 2.0, -2.0,  0.0,  0.0,    2236.0,   -9884.0],
    [ 0.0,  1.0,  2.0,  0.0,   -2120.0,    5751.0],
    [ 0.0,  2.0,  0.0,  0.0,   -2069.0,       0.0],
    [ 2.0, -2.0, -1.0,  0.0,    2048.0,   -4950.0],
    [ 2.0,  0.0,  1.0, -2.0,   -1773.0,    4130.0],
    [ 2.0,  0.0,  0.0,  2.0,   -1595.0,       0.0],
    [ 4.0, -1.0, -1.0,  0.0,    1215.0,   -3958.0],
    [ 0.0,  0.0,  2.0,  2.0,   -1110.0,       0.0],
    [ 3.0,  0.0, -1.0,  0.0,    -892.0,    3258.0],
    [ 2.0,  1.0,  1.0,  0.0,    -810.0,    2616.0],
    [ 4.0, -1.0, -2.0,  0.0,     759.0,   -1897.0],
    [ 0.0,  2.0, -1.0,  0.0,    -713.0,   -2117.0],
    [ 2.0,  2.0, -1.0,  0.0,    -700.0,    2354.0],
    [ 2.0,  1.0, -2.0,  0.0,     691.0,       0.0],
    [ 2.0, -1.0,  0.0, -2.0,     596.0,       0.0],
    [ 4.0,  0.0,  1.0,  0.0,     549.0,   -1423.0],
    [ 0.0,  0.0,  4.0,  0.0,     537.0,   -1117.0],
    [ 4.0, -1.0,  0.0,  0.0,     520.0,   -1571.0],
    [ 1.0,  0.0, -2.0,  0.0,    -487.0,   -1739.0],
    [ 2.0,  1.0,  0.0, -2.0,    -399.0,       0.0],
    [ 0.0,  0.0,  2.0, -2.0,    -381.0,   -4421.0],
    [ 1.0,  1.0,  1.0,  0.0,     351.0,       0.0],
    [ 3.0,  0.0, -2.0,  0.0,    -340.0,       0.0],
    [ 4.0,  0.0, -3.0,  0.0,     330.0,       0.0],
    [ 2.0, -1.0,  2.0,  0.0,     327.0,       0.0],
    [ 0.0,  2.0,  1.0,  0.0,    -323.0,    1165.0],
    [ 1.0,  1.0, -1.0,  0.0,     299.0,       0.0],
    [ 2.0,  0.0,  3.0,  0.0,     294.0,       0.0],
    [ 2.0,  0.0, -1.0, -2.0,       0.0,    8752.0],
];

/// Table 47.B rows: `[D, M, M', F, Σb coefficient]`, Σb in 1e-6 degrees.
#[rustfmt::skip]
static LATITUDE_TERMS: [[f64; 5]; 60] = [
    [ 0.0,  0.0,  0.0,  1.0, 5128122.0],
    [ 0.0,  0.0,  1.0,  1.0,  280602.0],
    [ 0.0,  0.0,  1.0, -1.0,  277693.0],
    [ 2.0,  0.0,  0.0, -1.0,  173237.0],
    [ 2.0,  0.0, -1.0,  1.0,   55413.0],
    [ 2.0,  0.0, -1.0, -1.0,   46271.0],
    [ 2.0,  0.0,  0.0,  1.0,   32573.0],
    [ 0.0,  0.0,  2.0,  1.0,   17198.0],
    [ 2.0,  0.0,  1.0, -1.0,    9266.0],
    [ 0.0,  0.0,  2.0, -1.0,    8822.0],
    [ 2.0, -1.0,  0.0, -1.0,    8216.0],
    [ 2.0,  0.0, -2.0, -1.0,    4324.0],
    [ 2.0,  0.0,  1.0,  1.0,    4200.0],
    [ 2.0,  1.0,  0.0, -1.0,   -3359.0],
    [ 2.0, -1.0, -1.0,  1.0,    2463.0],
    [ 2.0, -1.0,  0.0,  1.0,    2211.0],
    [ 2.0, -1.0, -1.0, -1.0,    2065.0],
    [ 0.0,  1.0, -1.0, -1.0,   -1870.0],
    [ 4.0,  0.0, -1.0, -1.0,    1828.0],
    [ 0.0,  1.0,  0.0,  1.0,   -1794.0],
    [ 0.0,  0.0,  0.0,  3.0,   -1749.0],
    [ 0.0,  1.0, -1.0,  1.0,   -1565.0],
    [ 1.0,  0.0,  0.0,  1.0,   -1491.0],
    [ 0.0,  1.0,  1.0,  1.0,   -1475.0],
    [ 0.0,  1.0,  1.0, -1.0,   -1410.0],
    [ 0.0,  1.0,  0.0, -1.0,   -1344.0],
    [ 1.0,  0.0,  0.0, -1.0,   -1335.0],
    [ 0.0,  0.0,  3.0,  1.0,    1107.0],
    [ 4.0,  0.0,  0.0, -1.0,    1021.0],
    [ 4.0,  0.0, -1.0,  1.0,     833.0],
    [ 0.0,  0.0,  1.0, -3.0,     777.0],
    [ 4.0,  0.0, -2.0,  1.0,     671.0],
    [ 2.0,  0.0,  0.0, -3.0,     607.0],
    [ 2.0,  0.0,  2.0, -1.0,     596.0],
    [ 2.0, -1.0,  1.0, -1.0,     491.0],
    [ 2.0,  0.0, -2.0,  1.0,    -451.0],
    [ 0.0,  0.0,  3.0, -1.0,     439.0],
    [ 2.0,  0.0,  2.0,  1.0,     422.0],
    [ 2.0,  0.0, -3.0, -1.0,     421.0],
    [ 2.0,  1.0, -1.0,  1.0,    -366.0],
    [ 2.0,  1.0,  0.0,  1.0,    -351.0],
    [ 4.0,  0.0,  0.0,  1.0,     331.0],
    [ 2.0, -1.0,  1.0,  1.0,     315.0],
    [ 2.0, -2.0,  0.0, -1.0,     302.0],
    [ 0.0,  0.0,  1.0,  3.0,    -283.0],
    [ 2.0,  1.0,  1.0, -1.0,    -229.0],
    [ 1.0,  1.0,  0.0, -1.0,     223.0],
    [ 1.0,  1.0,  0.0,  1.0,     223.0],
    [ 0.0,  1.0, -2.0, -1.0,    -220.0],
    [ 2.0,  1.0, -1.0, -1.0,    -220.0],
    [ 1.0,  0.0,  1.0,  1.0,    -185.0],
    [ 2.0, -1.0, -2.0, -1.0,     181.0],
    [ 0.0,  1.0,  2.0,  1.0,    -177.0],
    [ 4.0,  0.0, -2.0, -1.0,     176.0],
    [ 4.0, -1.0, -1.0, -1.0,     166.0],
    [ 1.0,  0.0,  1.0, -1.0,    -164.0],
    [ 4.0,  0.0,  1.0, -1.0,     132.0],
    [ 1.0,  0.0, -1.0, -1.0,    -119.0],
    [ 4.0, -1.0,  0.0, -1.0,     115.0],
    [ 2.0, -2.0,  0.0,  1.0,     107.0],
];

/// Lunar mean arguments for Julian centuries `t`, degrees.
#[derive(Debug, Clone, Copy)]
struct LunarArguments {
    /// L′, mean longitude.
    mean_longitude: f64,
    /// D, mean elongation.
    elongation: f64,
    /// M, Sun's mean anomaly.
    sun_anomaly: f64,
    /// M′, Moon's mean anomaly.
    moon_anomaly: f64,
    /// F, argument of latitude.
    latitude_argument: f64,
    /// E, eccentricity factor of Earth's orbit.
    eccentricity: f64,
}

impl LunarArguments {
    fn at(t: f64) -> Self {
        Self {
            mean_longitude: normalize_360(polynomial(
                t,
                &[218.316_447_7, 481_267.881_234_21, -0.001_578_6, 1.0 / 538_841.0, -1.0 / 65_194_000.0],
            )),
            elongation: normalize_360(polynomial(
                t,
                &[297.850_192_1, 445_267.111_403_4, -0.001_881_9, 1.0 / 545_868.0, -1.0 / 113_065_000.0],
            )),
            sun_anomaly: SunLocator::mean_anomaly_deg(t),
            moon_anomaly: normalize_360(polynomial(
                t,
                &[134.963_396_4, 477_198.867_505_5, 0.008_741_4, 1.0 / 69_699.0, -1.0 / 14_712_000.0],
            )),
            latitude_argument: normalize_360(polynomial(
                t,
                &[93.272_095_0, 483_202.017_523_3, -0.003_653_9, -1.0 / 3_526_000.0, 1.0 / 863_310_000.0],
            )),
            eccentricity: polynomial(t, &[1.0, -0.002_516, -0.000_007_5]),
        }
    }

    /// Argument `D·d + M·m + M′·m′ + F·f` and its eccentricity weight.
    fn term(&self, d: f64, m: f64, mp: f64, f: f64) -> (f64, f64) {
        let angle = d * self.elongation
            + m * self.sun_anomaly
            + mp * self.moon_anomaly
            + f * self.latitude_argument;
        let weight = match m.abs() as u8 {
            1 => self.eccentricity,
            2 => self.eccentricity * self.eccentricity,
            _ => 1.0,
        };
        (angle, weight)
    }
}

/// The eight named phases of the lunar cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoonTruePhase {
    New,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    Full,
    WaningGibbous,
    ThirdQuarter,
    WaningCrescent,
}

impl MoonTruePhase {
    /// Classify a phase angle (0 = new, 180 = full) in degrees.
    ///
    /// Principal phases span ±5.625° around their exact angle; the
    /// intermediate phases fill the gaps.
    pub fn from_phase_angle(angle_deg: f64) -> Self {
        let a = normalize_360(angle_deg);
        let h = PRINCIPAL_HALF_WIDTH;
        if a >= 360.0 - h || a <= h {
            Self::New
        } else if a < 90.0 - h {
            Self::WaxingCrescent
        } else if a <= 90.0 + h {
            Self::FirstQuarter
        } else if a < 180.0 - h {
            Self::WaxingGibbous
        } else if a <= 180.0 + h {
            Self::Full
        } else if a < 270.0 - h {
            Self::WaningGibbous
        } else if a <= 270.0 + h {
            Self::ThirdQuarter
        } else {
            Self::WaningCrescent
        }
    }

    /// Fractional part of the lunation number `k` for this phase.
    pub fn lunation_offset(self) -> f64 {
        match self {
            Self::New => 0.0,
            Self::WaxingCrescent => 0.125,
            Self::FirstQuarter => 0.25,
            Self::WaxingGibbous => 0.375,
            Self::Full => 0.5,
            Self::WaningGibbous => 0.625,
            Self::ThirdQuarter => 0.75,
            Self::WaningCrescent => 0.875,
        }
    }
}

/// Phase of the Moon at an instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonPhase {
    pub phase: MoonTruePhase,
    /// Phase angle in degrees: 0 new, 90 first quarter, 180 full.
    pub angle_deg: f64,
    /// Illuminated fraction of the disc, percent.
    pub illumination: f64,
}

/// The Moon as seen from the centre of the Earth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoonLocator;

impl MoonLocator {
    /// Apparent ecliptic position: longitude includes nutation.
    pub fn ecliptic_position(&self, ut: UniversalTime) -> EclipticCoordinate {
        let tt = terrestrial(ut);
        let t = tt.julian_centuries();
        let args = LunarArguments::at(t);

        let a1 = normalize_360(119.75 + 131.849 * t);
        let a2 = normalize_360(53.09 + 479_264.290 * t);
        let a3 = normalize_360(313.45 + 481_266.484 * t);

        let mut sum_l = 0.0;
        for row in &LONGITUDE_DISTANCE_TERMS {
            let (angle, weight) = args.term(row[0], row[1], row[2], row[3]);
            sum_l += row[4] * weight * sin_deg(angle);
        }

        let mut sum_b = 0.0;
        for row in &LATITUDE_TERMS {
            let (angle, weight) = args.term(row[0], row[1], row[2], row[3]);
            sum_b += row[4] * weight * sin_deg(angle);
        }

        let lp = args.mean_longitude;
        let f = args.latitude_argument;
        let mp = args.moon_anomaly;

        sum_l += 3958.0 * sin_deg(a1) + 1962.0 * sin_deg(lp - f) + 318.0 * sin_deg(a2);
        sum_b += -2235.0 * sin_deg(lp)
            + 382.0 * sin_deg(a3)
            + 175.0 * sin_deg(a1 - f)
            + 175.0 * sin_deg(a1 + f)
            + 127.0 * sin_deg(lp - mp)
            - 115.0 * sin_deg(lp + mp);

        let longitude = lp + sum_l / 1e6 + nutation_in_longitude_deg(tt);
        EclipticCoordinate::new(sum_b / 1e6, longitude)
    }

    /// Earth–Moon centre distance in km.
    pub fn distance(&self, ut: UniversalTime) -> f64 {
        let args = LunarArguments::at(terrestrial(ut).julian_centuries());
        let mut sum_r = 0.0;
        for row in &LONGITUDE_DISTANCE_TERMS {
            let (angle, weight) = args.term(row[0], row[1], row[2], row[3]);
            sum_r += row[5] * weight * cos_deg(angle);
        }
        MEAN_DISTANCE_KM + sum_r / 1000.0
    }

    /// Angular diameter in degrees, including the topocentric
    /// augmentation for the Moon's altitude at 0°N 0°E.
    pub fn angular_diameter(&self, ut: UniversalTime) -> f64 {
        let distance = self.distance(ut);
        let semidiameter_arcsec = 358_743_400.0 / distance;
        let sin_parallax = EARTH_RADIUS_KM / distance;

        let options = ObservationOptions {
            with_refraction: true,
            with_parallax: false,
        };
        let altitude = altitude_deg(self, ut, &GeoLocation::ZERO, options);

        let augmented = semidiameter_arcsec * (1.0 + sin_deg(altitude) * sin_parallax);
        2.0 * augmented / 3600.0
    }

    /// Phase angle, named phase and illumination at `ut`.
    pub fn phase(&self, ut: UniversalTime) -> MoonPhase {
        let args = LunarArguments::at(terrestrial(ut).julian_centuries());
        let (d, m, mp) = (args.elongation, args.sun_anomaly, args.moon_anomaly);

        let incidence = 180.0 - d - 6.289 * sin_deg(mp) + 2.100 * sin_deg(m)
            - 1.274 * sin_deg(2.0 * d - mp)
            - 0.658 * sin_deg(2.0 * d)
            - 0.214 * sin_deg(2.0 * mp)
            - 0.110 * sin_deg(d);

        let angle = normalize_360(incidence + 180.0);
        let illumination = (1.0 + cos_deg(angle - 180.0)) / 2.0 * 100.0;

        MoonPhase {
            phase: MoonTruePhase::from_phase_angle(angle),
            angle_deg: angle,
            illumination,
        }
    }

    /// Position angle of the bright limb's midpoint, degrees east of the
    /// celestial north point (Meeus Eq. 48.5), in [0, 360).
    pub fn bright_limb_angle_deg(&self, ut: UniversalTime) -> f64 {
        let sun = SunLocator.coordinates(ut);
        let moon = self.coordinates(ut);
        let (d0, d) = (sun.declination_deg, moon.declination_deg);
        let da = sun.right_ascension_deg - moon.right_ascension_deg;

        let chi = (cos_deg(d0) * sin_deg(da))
            .atan2(sin_deg(d0) * cos_deg(d) - cos_deg(d0) * sin_deg(d) * cos_deg(da))
            .to_degrees();
        normalize_360(chi)
    }

    /// Tilt of the lit side as seen from `location`: the bright-limb angle
    /// measured clockwise from the top of the disc (the zenith direction),
    /// in (-180, 180].
    pub fn tilt_deg(&self, ut: UniversalTime, location: &GeoLocation) -> f64 {
        normalize_to_pm180(self.bright_limb_angle_deg(ut) - parallactic_angle_deg(self, ut, location))
    }

    /// Whether the Moon is full and within [`SUPER_MOON_DISTANCE_KM`].
    pub fn is_super_moon(&self, ut: UniversalTime) -> bool {
        self.phase(ut).phase == MoonTruePhase::Full && self.distance(ut) <= SUPER_MOON_DISTANCE_KM
    }
}

impl CelestialLocator for MoonLocator {
    fn coordinates(&self, ut: UniversalTime) -> EquatorialCoordinate {
        ecliptic_to_equatorial(&self.ecliptic_position(ut), true_obliquity_deg(terrestrial(ut)))
    }

    fn distance_km(&self, ut: UniversalTime) -> Option<f64> {
        Some(self.distance(ut))
    }

    fn angular_diameter_deg(&self, ut: UniversalTime) -> Option<f64> {
        Some(self.angular_diameter(ut))
    }
}

fn terrestrial(ut: UniversalTime) -> UniversalTime {
    ut.plus_days(delta_t_days(ut.year()))
}

/// Lunation number `k` of the next occurrence of `phase` at or after `ut`.
///
/// `k = 0` is the new Moon of 2000-01-06; the fractional part selects the
/// phase. Feed the result to the Meeus Ch. 49 phase and Ch. 54 eclipse
/// series.
pub fn next_phase_k(ut: UniversalTime, phase: MoonTruePhase) -> f64 {
    let k = (ut.decimal_year() - 2000.0) * LUNATIONS_PER_YEAR;
    let offset = phase.lunation_offset();
    if frac(k) > offset {
        k.floor() + 1.0 + offset
    } else {
        k.floor() + offset
    }
}
