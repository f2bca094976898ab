//! Clear-sky solar irradiance from a simple air-mass model.
//!
//! Extraterrestrial irradiance 1.353 kW/m² varies ±3.3 % with the Earth–Sun
//! distance; the atmosphere passes `0.7^(AM^0.678)` of it, where the air
//! mass AM is `1 / sin(altitude)`.
//!
//! Source: Meinel & Meinel, *Applied Solar Energy* (1976), air-mass fit.

use sol_frames::GeoLocation;
use sol_time::{UniversalTime, cos_deg, sin_deg};

use crate::observe::{ObservationOptions, horizon_position};
use crate::sun::SunLocator;

/// Solar constant used by the model, kW/m².
const SOLAR_CONSTANT_KW: f64 = 1.353;

/// Irradiance on a surface facing the Sun, kW/m².
///
/// Zero while the Sun is below the horizon.
pub fn solar_radiation(ut: UniversalTime, location: &GeoLocation, options: ObservationOptions) -> f64 {
    let altitude = horizon_position(&SunLocator, ut, location, options).altitude_deg;
    direct_irradiance(ut, altitude)
}

/// Irradiance on a panel tilted `tilt_deg` from horizontal whose surface
/// normal points toward azimuth `facing_deg`, kW/m².
///
/// Never negative: a panel facing away from the Sun receives nothing.
pub fn solar_radiation_on_surface(
    ut: UniversalTime,
    location: &GeoLocation,
    tilt_deg: f64,
    facing_deg: f64,
    options: ObservationOptions,
) -> f64 {
    let sun = horizon_position(&SunLocator, ut, location, options);
    let incident = direct_irradiance(ut, sun.altitude_deg);
    if incident == 0.0 {
        return 0.0;
    }

    let alt = sun.altitude_deg;
    let cos_incidence = cos_deg(alt) * sin_deg(tilt_deg) * cos_deg(facing_deg - sun.azimuth_deg)
        + sin_deg(alt) * cos_deg(tilt_deg);
    (incident * cos_incidence).max(0.0)
}

fn direct_irradiance(ut: UniversalTime, altitude_deg: f64) -> f64 {
    if altitude_deg <= 0.0 {
        return 0.0;
    }
    let air_mass = 1.0 / sin_deg(altitude_deg);
    let day = ut.day_of_year() as f64;
    let extraterrestrial = (1.0 + 0.033 * cos_deg(360.0 * (day - 2.0) / 365.0)) * SOLAR_CONSTANT_KW;
    extraterrestrial * 0.7_f64.powf(air_mass.powf(0.678))
}
