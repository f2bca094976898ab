//! Rotations between equatorial, ecliptic and horizon frames.
//!
//! Sources: Meeus, *Astronomical Algorithms*, Eqs. 13.1–13.6 (ecliptic and
//! horizontal transforms); aberration-plus-nutation longitude correction
//! from Meeus Ch. 25 (`0.00569° + 0.00478°·sin Ω`).

use sol_time::{
    UniversalTime, apparent_sidereal_time_hours, cos_deg, local_sidereal_time_hours, polynomial,
    sin_deg,
};

use crate::coords::{EclipticCoordinate, EquatorialCoordinate, HorizonCoordinate};
use crate::location::GeoLocation;
use crate::nutation::nutation;
use crate::obliquity::{mean_obliquity_deg, true_obliquity_deg};

/// Below this magnitude both azimuth atan2 arguments count as zero.
const AZIMUTH_DEGENERATE: f64 = 1e-12;

/// Rotate an ecliptic position to equatorial using obliquity `obliquity_deg`.
///
/// The result is flagged non-apparent; callers that fold nutation and
/// aberration into the longitude set the flag themselves.
pub fn ecliptic_to_equatorial(
    ecliptic: &EclipticCoordinate,
    obliquity_deg: f64,
) -> EquatorialCoordinate {
    let (lat, lon, e) = (ecliptic.latitude_deg, ecliptic.longitude_deg, obliquity_deg);

    let ra = (sin_deg(lon) * cos_deg(e) * cos_deg(lat) - sin_deg(lat) * sin_deg(e))
        .atan2(cos_deg(lon) * cos_deg(lat))
        .to_degrees();
    let dec = (sin_deg(lat) * cos_deg(e) + cos_deg(lat) * sin_deg(e) * sin_deg(lon))
        .clamp(-1.0, 1.0)
        .asin()
        .to_degrees();

    EquatorialCoordinate::new(dec, ra, false)
}

/// Rotate an ecliptic position to equatorial using the true obliquity at `ut`.
pub fn ecliptic_to_equatorial_at(
    ecliptic: &EclipticCoordinate,
    ut: UniversalTime,
) -> EquatorialCoordinate {
    ecliptic_to_equatorial(ecliptic, true_obliquity_deg(ut))
}

/// Rotate an equatorial position to ecliptic using the true obliquity at `ut`.
///
/// For apparent coordinates the longitude gains the aberration and
/// nutation correction `0.00569° + 0.00478°·sin Ω`, so that an apparent
/// solar position maps back onto its apparent longitude.
pub fn equatorial_to_ecliptic(
    equatorial: &EquatorialCoordinate,
    ut: UniversalTime,
) -> EclipticCoordinate {
    let e = true_obliquity_deg(ut);
    let (dec, ra) = (equatorial.declination_deg, equatorial.right_ascension_deg);

    let lat = (sin_deg(dec) * cos_deg(e) - cos_deg(dec) * sin_deg(e) * sin_deg(ra))
        .clamp(-1.0, 1.0)
        .asin()
        .to_degrees();
    let mut lon = (sin_deg(ra) * cos_deg(e) * cos_deg(dec) + sin_deg(dec) * sin_deg(e))
        .atan2(cos_deg(ra) * cos_deg(dec))
        .to_degrees();

    if equatorial.apparent {
        lon += apparent_longitude_correction_deg(ut);
    }

    EclipticCoordinate::new(lat, lon)
}

/// Aberration plus nutation correction to ecliptic longitude, in degrees.
pub fn apparent_longitude_correction_deg(ut: UniversalTime) -> f64 {
    let omega = polynomial(ut.julian_centuries(), &[125.04, -1_934.136]);
    0.00569 + 0.00478 * sin_deg(omega)
}

/// Obliquity used with apparent solar longitudes: ε₀ + 0.00256°·cos Ω.
pub fn apparent_solar_obliquity_deg(ut: UniversalTime) -> f64 {
    let omega = polynomial(ut.julian_centuries(), &[125.04, -1_934.136]);
    mean_obliquity_deg(ut) + 0.00256 * cos_deg(omega)
}

/// Greenwich apparent sidereal time in hours.
pub fn greenwich_apparent_sidereal_hours(ut: UniversalTime) -> f64 {
    let n = nutation(ut);
    apparent_sidereal_time_hours(ut, n.longitude_deg, mean_obliquity_deg(ut) + n.obliquity_deg)
}

/// Local apparent sidereal time in hours for an east longitude.
pub fn local_apparent_sidereal_hours(ut: UniversalTime, longitude_deg: f64) -> f64 {
    local_sidereal_time_hours(greenwich_apparent_sidereal_hours(ut), longitude_deg)
}

/// Equatorial → horizon for a local sidereal time and observer latitude.
///
/// `H = LST − α`, `sin h = sin φ sin δ + cos φ cos δ cos H`,
/// `A = atan2(sin H, cos H sin φ − tan δ cos φ) + 180°`.
///
/// The tangent is multiplied through by `cos δ` so the pole of the sky is
/// finite. When both atan2 arguments vanish (observer at a pole looking at
/// the celestial pole, or similar) the azimuth falls back to 0.
pub fn equatorial_to_horizon(
    equatorial: &EquatorialCoordinate,
    local_sidereal_hours: f64,
    latitude_deg: f64,
) -> HorizonCoordinate {
    let h = equatorial.hour_angle_hours(local_sidereal_hours) * 15.0;
    let (dec, lat) = (equatorial.declination_deg, latitude_deg);

    let altitude = (sin_deg(lat) * sin_deg(dec) + cos_deg(lat) * cos_deg(dec) * cos_deg(h))
        .clamp(-1.0, 1.0)
        .asin()
        .to_degrees();

    let y = sin_deg(h) * cos_deg(dec);
    let x = cos_deg(h) * sin_deg(lat) * cos_deg(dec) - sin_deg(dec) * cos_deg(lat);
    let azimuth = if !x.is_finite()
        || !y.is_finite()
        || (x.abs() < AZIMUTH_DEGENERATE && y.abs() < AZIMUTH_DEGENERATE)
    {
        0.0
    } else {
        y.atan2(x).to_degrees() + 180.0
    };

    HorizonCoordinate::new(azimuth, altitude)
}

/// Equatorial → horizon for an instant and observer.
pub fn equatorial_to_horizon_at(
    equatorial: &EquatorialCoordinate,
    ut: UniversalTime,
    location: &GeoLocation,
) -> HorizonCoordinate {
    let lst = local_apparent_sidereal_hours(ut, location.longitude_deg);
    equatorial_to_horizon(equatorial, lst, location.latitude_deg)
}

/// Horizon → equatorial, the inverse of [`equatorial_to_horizon`].
pub fn horizon_to_equatorial(
    horizon: &HorizonCoordinate,
    local_sidereal_hours: f64,
    latitude_deg: f64,
) -> EquatorialCoordinate {
    let (az, alt, lat) = (horizon.azimuth_deg, horizon.altitude_deg, latitude_deg);

    let dec = (sin_deg(lat) * sin_deg(alt) + cos_deg(lat) * cos_deg(alt) * cos_deg(az))
        .clamp(-1.0, 1.0)
        .asin()
        .to_degrees();

    let y = -sin_deg(az) * cos_deg(alt) * cos_deg(lat);
    let x = sin_deg(alt) - sin_deg(lat) * sin_deg(dec);
    let hour_angle = if x.abs() < AZIMUTH_DEGENERATE && y.abs() < AZIMUTH_DEGENERATE {
        0.0
    } else {
        y.atan2(x).to_degrees()
    };

    EquatorialCoordinate::new(dec, local_sidereal_hours * 15.0 - hour_angle, false)
}
