//! Julian Day ↔ calendar conversions.
//!
//! Gregorian calendar from 1582-10-15 onward, Julian calendar before.
//! Civil time is treated as continuous (no leap seconds).
//!
//! Source: Meeus, *Astronomical Algorithms* (2nd ed.), Ch. 7.

/// Julian Day of the J2000.0 epoch (2000-01-01 12:00).
pub const J2000_JD: f64 = 2_451_545.0;

/// Days in a Julian century.
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Seconds in a day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Julian Day of the Unix epoch (1970-01-01 00:00 UTC).
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// First Julian Day of the Gregorian calendar (1582-10-15 00:00).
const GREGORIAN_START_JD: f64 = 2_299_160.5;

/// Julian Day from a calendar date with fractional day.
///
/// `day` carries the time of day as a fraction, so 12:00 on the 1st is
/// `1.5`. Dates before 1582-10-15 are read as Julian-calendar dates.
pub fn calendar_to_jd(year: i32, month: u32, day: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year as f64 - 1.0, month as f64 + 12.0)
    } else {
        (year as f64, month as f64)
    };

    let julian = (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day - 1524.5;
    if julian < GREGORIAN_START_JD {
        return julian;
    }

    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    julian + b
}

/// Calendar date `(year, month, day_with_fraction)` from a Julian Day.
pub fn jd_to_calendar(jd: f64) -> (i32, u32, f64) {
    let shifted = jd + 0.5;
    let z = shifted.floor();
    let f = shifted - z;

    let a = if z < 2_299_161.0 {
        z
    } else {
        let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
        z + 1.0 + alpha - (alpha / 4.0).floor()
    };

    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = b - d - (30.6001 * e).floor() + f;
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };

    (year as i32, month as u32, day)
}

/// Julian centuries since J2000.0: `T = (JD − 2451545) / 36525`.
#[inline]
pub fn jd_to_centuries(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_CENTURY
}

/// Julian Day from Julian centuries since J2000.0.
#[inline]
pub fn centuries_to_jd(t: f64) -> f64 {
    t * DAYS_PER_CENTURY + J2000_JD
}

/// Whether `year` is a leap year in the calendar in force that year.
pub fn is_leap_year(year: i32) -> bool {
    if year < 1583 {
        return year.rem_euclid(4) == 0;
    }
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Day of year (1-based) for a calendar date.
pub fn day_of_year(year: i32, month: u32, day: u32) -> u32 {
    let k = if is_leap_year(year) { 1 } else { 2 };
    let m = month as i64;
    let n = (275 * m / 9) - k * ((m + 9) / 12) + day as i64 - 30;
    n as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn j2000_epoch() {
        assert_abs_diff_eq!(calendar_to_jd(2000, 1, 1.5), J2000_JD, epsilon = 1e-9);
    }

    #[test]
    fn meeus_examples() {
        // Meeus 7.a and 7.b
        assert_abs_diff_eq!(calendar_to_jd(1957, 10, 4.81), 2_436_116.31, epsilon = 1e-6);
        assert_abs_diff_eq!(calendar_to_jd(333, 1, 27.5), 1_842_713.0, epsilon = 1e-6);
        assert_abs_diff_eq!(calendar_to_jd(1987, 6, 19.5), 2_446_966.0, epsilon = 1e-6);
        assert_abs_diff_eq!(calendar_to_jd(-4712, 1, 1.5), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn gregorian_switchover_is_continuous() {
        let last_julian = calendar_to_jd(1582, 10, 4.0);
        let first_gregorian = calendar_to_jd(1582, 10, 15.0);
        assert_abs_diff_eq!(first_gregorian - last_julian, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn inverse_conversion() {
        for &(y, m, d) in &[(1957, 10, 4.81), (333, 1, 27.5), (2024, 2, 29.25), (1600, 12, 31.0)] {
            let (yy, mm, dd) = jd_to_calendar(calendar_to_jd(y, m, d));
            assert_eq!((yy, mm), (y, m));
            assert_abs_diff_eq!(dd, d, epsilon = 1e-6);
        }
    }

    #[test]
    fn centuries_at_epoch() {
        assert_eq!(jd_to_centuries(J2000_JD), 0.0);
        assert_abs_diff_eq!(jd_to_centuries(J2000_JD + DAYS_PER_CENTURY), 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(centuries_to_jd(jd_to_centuries(2_460_000.25)), 2_460_000.25, epsilon = 1e-8);
    }

    #[test]
    fn leap_years() {
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2024));
        assert!(is_leap_year(1500));
    }

    #[test]
    fn day_of_year_examples() {
        assert_eq!(day_of_year(1978, 11, 14), 318);
        assert_eq!(day_of_year(1988, 4, 22), 113);
        assert_eq!(day_of_year(2021, 1, 1), 1);
    }
}
