//! `UniversalTime`, the independent variable of every series in the workspace.
//!
//! A thin `Copy` wrapper over a UT Julian Day. Civil timestamps enter and
//! leave through `chrono`; civil dates are interpreted against a
//! `FixedOffset` since the engine carries no time-zone database.

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, TimeZone, Utc};

use crate::error::TimeError;
use crate::julian::{
    SECONDS_PER_DAY, UNIX_EPOCH_JD, calendar_to_jd, day_of_year, jd_to_calendar, jd_to_centuries,
};

/// An instant on the Universal Time axis, stored as a Julian Day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniversalTime {
    jd: f64,
}

impl UniversalTime {
    /// Wrap a UT Julian Day.
    pub const fn from_jd(jd: f64) -> Self {
        Self { jd }
    }

    /// Build from calendar fields in UT.
    ///
    /// `hours` is the fractional time of day in [0, 24).
    pub fn from_calendar(year: i32, month: u32, day: u32, hours: f64) -> Result<Self, TimeError> {
        if NaiveDate::from_ymd_opt(year, month, day).is_none() {
            return Err(TimeError::InvalidDate { year, month, day });
        }
        if !(0.0..24.0).contains(&hours) {
            return Err(TimeError::InvalidTimeOfDay(hours));
        }
        Ok(Self::from_jd(calendar_to_jd(year, month, day as f64 + hours / 24.0)))
    }

    /// Build from a UTC timestamp.
    pub fn from_utc(datetime: &DateTime<Utc>) -> Self {
        let seconds = datetime.timestamp() as f64
            + datetime.timestamp_subsec_nanos() as f64 / 1e9;
        Self::from_jd(UNIX_EPOCH_JD + seconds / SECONDS_PER_DAY)
    }

    /// Build from a timestamp in any zone.
    pub fn from_datetime<Tz: TimeZone>(datetime: &DateTime<Tz>) -> Self {
        Self::from_utc(&datetime.with_timezone(&Utc))
    }

    /// Local midnight that starts `date` in the zone `offset`.
    pub fn start_of_local_day(date: NaiveDate, offset: FixedOffset) -> Self {
        let jd_midnight = calendar_to_jd(date.year(), date.month(), date.day() as f64);
        Self::from_jd(jd_midnight - offset.local_minus_utc() as f64 / SECONDS_PER_DAY)
    }

    /// Julian Day (UT).
    #[inline]
    pub fn jd(self) -> f64 {
        self.jd
    }

    /// Julian centuries since J2000.0.
    #[inline]
    pub fn julian_centuries(self) -> f64 {
        jd_to_centuries(self.jd)
    }

    /// Calendar date `(year, month, day_with_fraction)` in UT.
    pub fn calendar(self) -> (i32, u32, f64) {
        jd_to_calendar(self.jd)
    }

    /// Calendar year in UT.
    pub fn year(self) -> i32 {
        self.calendar().0
    }

    /// Day of year (1-based) in UT.
    pub fn day_of_year(self) -> u32 {
        let (y, m, d) = self.calendar();
        day_of_year(y, m, d.floor() as u32)
    }

    /// Fractional hours since UT midnight.
    pub fn hours_of_day(self) -> f64 {
        let (_, _, d) = self.calendar();
        (d - d.floor()) * 24.0
    }

    /// Year with the elapsed part of the year as a fraction.
    pub fn decimal_year(self) -> f64 {
        let day = self.day_of_year() as f64 + self.hours_of_day() / 24.0;
        self.year() as f64 + day / 365.25
    }

    /// 00:00 UT on 1 January of this instant's year.
    pub fn start_of_year(self) -> Self {
        Self::from_jd(calendar_to_jd(self.year(), 1, 1.0))
    }

    /// Shift by a number of days (may be negative).
    #[inline]
    pub fn plus_days(self, days: f64) -> Self {
        Self::from_jd(self.jd + days)
    }

    /// Shift by a number of hours (may be negative).
    #[inline]
    pub fn plus_hours(self, hours: f64) -> Self {
        self.plus_days(hours / 24.0)
    }

    /// Days elapsed from `earlier` to `self`.
    #[inline]
    pub fn days_since(self, earlier: Self) -> f64 {
        self.jd - earlier.jd
    }

    /// Hours elapsed from `earlier` to `self`.
    #[inline]
    pub fn hours_since(self, earlier: Self) -> f64 {
        self.days_since(earlier) * 24.0
    }

    /// The UTC timestamp of this instant, rounded to the millisecond.
    pub fn to_utc(self) -> Result<DateTime<Utc>, TimeError> {
        let millis = ((self.jd - UNIX_EPOCH_JD) * SECONDS_PER_DAY * 1000.0).round();
        if !millis.is_finite() || millis.abs() > i64::MAX as f64 {
            return Err(TimeError::OutOfRange(self.jd));
        }
        DateTime::from_timestamp_millis(millis as i64).ok_or(TimeError::OutOfRange(self.jd))
    }

    /// The civil timestamp of this instant in a fixed zone.
    pub fn to_offset(self, offset: FixedOffset) -> Result<DateTime<FixedOffset>, TimeError> {
        Ok(self.to_utc()?.with_timezone(&offset))
    }

    /// The civil date containing this instant in a fixed zone.
    ///
    /// Goes through the millisecond-rounded timestamp so that a local
    /// midnight built by [`Self::start_of_local_day`] maps back to its own
    /// date.
    pub fn local_date(self, offset: FixedOffset) -> Result<NaiveDate, TimeError> {
        Ok(self.to_offset(offset)?.date_naive())
    }
}

impl PartialOrd for UniversalTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.jd.partial_cmp(&other.jd)
    }
}

impl From<DateTime<Utc>> for UniversalTime {
    fn from(value: DateTime<Utc>) -> Self {
        Self::from_utc(&value)
    }
}

impl Display for UniversalTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.to_utc() {
            Ok(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%SZ")),
            Err(_) => write!(f, "JD {:.6}", self.jd),
        }
    }
}

/// Parse a UTC offset such as `Z`, `+05:30`, `-0400` or `+09`.
pub fn parse_utc_offset(text: &str) -> Result<FixedOffset, TimeError> {
    let invalid = || TimeError::InvalidOffset(text.to_string());
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).ok_or_else(invalid);
    }

    let (sign, rest) = match trimmed.split_at_checked(1) {
        Some(("+", rest)) => (1, rest),
        Some(("-", rest)) => (-1, rest),
        _ => return Err(invalid()),
    };

    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    let (hh, mm) = match digits.len() {
        2 => (&digits[..2], "0"),
        4 => (&digits[..2], &digits[2..]),
        _ => return Err(invalid()),
    };
    let hours: i32 = hh.parse().map_err(|_| invalid())?;
    let minutes: i32 = mm.parse().map_err(|_| invalid())?;
    if hours > 18 || minutes > 59 {
        return Err(invalid());
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::Timelike;

    #[test]
    fn from_calendar_j2000() {
        let ut = UniversalTime::from_calendar(2000, 1, 1, 12.0).unwrap();
        assert_abs_diff_eq!(ut.jd(), 2_451_545.0, epsilon = 1e-9);
        assert_abs_diff_eq!(ut.julian_centuries(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn from_calendar_rejects_bad_fields() {
        assert!(matches!(
            UniversalTime::from_calendar(2021, 2, 30, 0.0),
            Err(TimeError::InvalidDate { .. })
        ));
        assert!(matches!(
            UniversalTime::from_calendar(2021, 2, 3, 24.0),
            Err(TimeError::InvalidTimeOfDay(_))
        ));
    }

    #[test]
    fn utc_conversion_inverts() {
        let dt = Utc.with_ymd_and_hms(2021, 11, 19, 9, 3, 27).unwrap();
        let ut = UniversalTime::from_utc(&dt);
        assert_eq!(ut.to_utc().unwrap(), dt);
    }

    #[test]
    fn unix_epoch() {
        let dt = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(UniversalTime::from_utc(&dt).jd(), UNIX_EPOCH_JD);
    }

    #[test]
    fn zoned_input_uses_its_offset() {
        let tz = FixedOffset::west_opt(4 * 3600).unwrap();
        let local = tz.with_ymd_and_hms(2020, 9, 12, 8, 0, 0).unwrap();
        let ut = UniversalTime::from_datetime(&local);
        assert_eq!(ut.to_utc().unwrap().hour(), 12);
    }

    #[test]
    fn start_of_local_day_shifts_by_offset() {
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        let date = NaiveDate::from_ymd_opt(2020, 12, 21).unwrap();
        let ut = UniversalTime::start_of_local_day(date, tz);
        let expected = Utc.with_ymd_and_hms(2020, 12, 21, 5, 0, 0).unwrap();
        assert_eq!(ut.to_utc().unwrap(), expected);
        assert_eq!(ut.local_date(tz).unwrap(), date);
    }

    #[test]
    fn calendar_accessors() {
        let ut = UniversalTime::from_calendar(2021, 3, 1, 18.0).unwrap();
        assert_eq!(ut.year(), 2021);
        assert_eq!(ut.day_of_year(), 60);
        assert_abs_diff_eq!(ut.hours_of_day(), 18.0, epsilon = 1e-6);
        assert_abs_diff_eq!(ut.decimal_year(), 2021.0 + 60.75 / 365.25, epsilon = 1e-8);
        let start = ut.start_of_year();
        assert_eq!(start.calendar(), (2021, 1, 1.0));
    }

    #[test]
    fn arithmetic_and_ordering() {
        let a = UniversalTime::from_jd(2_459_000.0);
        let b = a.plus_hours(36.0);
        assert!(b > a);
        assert_abs_diff_eq!(b.days_since(a), 1.5, epsilon = 1e-12);
        assert_abs_diff_eq!(b.hours_since(a), 36.0, epsilon = 1e-9);
    }

    #[test]
    fn display_is_iso() {
        let ut = UniversalTime::from_calendar(2021, 11, 19, 7.5).unwrap();
        assert_eq!(ut.to_string(), "2021-11-19T07:30:00Z");
    }

    #[test]
    fn offsets_parse() {
        assert_eq!(parse_utc_offset("Z").unwrap().local_minus_utc(), 0);
        assert_eq!(parse_utc_offset("+05:30").unwrap().local_minus_utc(), 19_800);
        assert_eq!(parse_utc_offset("-0400").unwrap().local_minus_utc(), -14_400);
        assert_eq!(parse_utc_offset("+09").unwrap().local_minus_utc(), 32_400);
        assert!(parse_utc_offset("05:00").is_err());
        assert!(parse_utc_offset("+25:00").is_err());
        assert!(parse_utc_offset("+ab:cd").is_err());
    }
}
