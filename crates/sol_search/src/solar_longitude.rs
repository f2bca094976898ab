//! When does the Sun reach a given apparent longitude.
//!
//! A coarse daily scan finds the day the Sun is within a degree of the
//! target, then a fixed-point step `jd += 58·sin(target − λ)` (Meeus
//! Ch. 27) converges on the instant.

use sol_frames::GeoLocation;
use sol_locators::{Season, SunLocator, season_from_solar_longitude};
use sol_time::{UniversalTime, delta_angle, normalize_360, sin_deg};

/// Days scanned before giving up; one year always contains every longitude.
const MAX_SCAN_DAYS: u32 = 366;

/// Scan stops once the Sun is this close to the target, degrees.
const SCAN_TOLERANCE_DEG: f64 = 1.0;

const MAX_REFINE_ITERATIONS: u32 = 20;

/// Converged once a step is this small, days.
const REFINE_TOLERANCE_DAYS: f64 = 1e-5;

/// Days per radian of solar longitude, roughly.
const DAYS_PER_RADIAN: f64 = 58.0;

/// First instant at or after `after` when the Sun's apparent longitude is `longitude_deg`.
///
/// An instant less than a day before `after` may be returned when the
/// Sun is already within a degree of the target at `after`.
pub fn next_time_at_solar_longitude(after: UniversalTime, longitude_deg: f64) -> UniversalTime {
    let target = normalize_360(longitude_deg);
    let sun = SunLocator;

    let mut jd = after.jd();
    let mut scanned = false;
    for day in 0..MAX_SCAN_DAYS {
        let candidate = after.plus_days(day as f64);
        if delta_angle(target, sun.solar_longitude_deg(candidate)).abs() < SCAN_TOLERANCE_DEG {
            jd = candidate.jd();
            scanned = true;
            break;
        }
    }
    if !scanned {
        log::warn!("solar longitude {target} not bracketed within {MAX_SCAN_DAYS} days");
    }

    for iteration in 1..=MAX_REFINE_ITERATIONS {
        let lambda = sun.solar_longitude_deg(UniversalTime::from_jd(jd));
        let correction = DAYS_PER_RADIAN * sin_deg(target - lambda);
        jd += correction;
        if correction.abs() <= REFINE_TOLERANCE_DAYS {
            log::debug!("solar longitude {target} reached in {iteration} iteration(s)");
            return UniversalTime::from_jd(jd);
        }
    }

    log::warn!("solar longitude {target} did not converge in {MAX_REFINE_ITERATIONS} iterations");
    UniversalTime::from_jd(jd)
}

/// Season at `ut` for the observer's hemisphere.
pub fn season_at(ut: UniversalTime, location: &GeoLocation) -> Season {
    season_from_solar_longitude(SunLocator.solar_longitude_deg(ut), location)
}
