//! Golden-value integration tests for rise/set/transit search.
//!
//! Reference times are published almanac values (minute precision) for
//! New York, London, Prague, Tyumen and eastern Greenland. Grazing polar
//! cases are checked against the geometric horizon; the rest with
//! refraction applied where the almanac includes it.

use chrono::{FixedOffset, NaiveDate, TimeZone};
use sol_frames::GeoLocation;
use sol_locators::{MoonLocator, SunLocator};
use sol_search::{
    MOON_STANDARD_ALTITUDE_DEG, RiseSetConfig, RiseSetTransitTimes, TwilightMode,
    above_horizon_window, daylight_length, moon_events, sun_events,
};
use sol_time::UniversalTime;

const NYC: GeoLocation = GeoLocation::new(40.7128, -74.006);
const GREENLAND: GeoLocation = GeoLocation::new(76.7667, -18.6667);
const LONDON: GeoLocation = GeoLocation::new(51.5, -0.13);
const PRAGUE: GeoLocation = GeoLocation::new(50.087_778, 14.420_556);
const TYUMEN: GeoLocation = GeoLocation::new(57.163, 65.549);

fn offset(hours: i32) -> FixedOffset {
    FixedOffset::east_opt(hours * 3600).expect("valid offset")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn local(y: i32, m: u32, d: u32, hh: u32, mm: u32, tz: i32) -> UniversalTime {
    let dt = offset(tz)
        .with_ymd_and_hms(y, m, d, hh, mm, 0)
        .single()
        .expect("unambiguous local time");
    UniversalTime::from_datetime(&dt)
}

/// Expected local `HH:MM` on the fixture date, or `None`.
type Expected = Option<(u32, u32)>;

fn check(
    label: &str,
    actual: Option<UniversalTime>,
    expected: Expected,
    day: NaiveDate,
    tz: i32,
    tolerance_min: f64,
) {
    use chrono::Datelike;
    match (actual, expected) {
        (None, None) => {}
        (Some(a), Some((hh, mm))) => {
            let e = local(day.year(), day.month(), day.day(), hh, mm, tz);
            let diff = a.hours_since(e).abs() * 60.0;
            assert!(diff <= tolerance_min, "{label}: got {a}, expected {hh:02}:{mm:02}, off {diff:.1} min");
        }
        (a, e) => panic!("{label}: got {a:?}, expected {e:?}"),
    }
}

fn check_events(
    label: &str,
    events: RiseSetTransitTimes,
    expected: [Expected; 3],
    day: NaiveDate,
    tz: i32,
    tolerance_min: f64,
) {
    check(&format!("{label} rise"), events.rise, expected[0], day, tz, tolerance_min);
    check(&format!("{label} transit"), events.transit, expected[1], day, tz, tolerance_min);
    check(&format!("{label} set"), events.set, expected[2], day, tz, tolerance_min);
}

// ---------------------------------------------------------------------------
// Sun
// ---------------------------------------------------------------------------

#[test]
fn sun_events_geometric_horizon() {
    let cases: [(&str, GeoLocation, NaiveDate, i32, [Expected; 3]); 9] = [
        ("nyc 2020-09-12", NYC, date(2020, 9, 12), -4, [Some((6, 34)), Some((12, 52)), Some((19, 9))]),
        ("nyc 2020-09-22", NYC, date(2020, 9, 22), -4, [Some((6, 44)), Some((12, 48)), Some((18, 52))]),
        ("nyc 2020-03-21", NYC, date(2020, 3, 21), -4, [Some((6, 57)), Some((13, 2)), Some((19, 10))]),
        ("nyc 2020-12-21", NYC, date(2020, 12, 21), -5, [Some((7, 15)), Some((11, 54)), Some((16, 32))]),
        ("nyc 2020-06-21", NYC, date(2020, 6, 21), -4, [Some((5, 25)), Some((12, 58)), Some((20, 31))]),
        ("greenland 2020-06-04", GREENLAND, date(2020, 6, 4), 0, [None, Some((13, 13)), None]),
        ("greenland 2020-11-01", GREENLAND, date(2020, 11, 1), 0, [None, None, None]),
        ("london 2020-10-29", LONDON, date(2020, 10, 29), 1, [Some((7, 48)), Some((12, 44)), Some((17, 39))]),
        ("london 2020-10-30", LONDON, date(2020, 10, 30), 0, [Some((6, 50)), Some((11, 44)), Some((16, 37))]),
    ];
    let config = RiseSetConfig::default();
    for (label, location, day, tz, expected) in cases {
        let events = sun_events(day, offset(tz), &location, TwilightMode::Actual, &config)
            .expect("search should succeed");
        check_events(label, events, expected, day, tz, 2.5);
    }
}

#[test]
fn sun_events_with_refraction() {
    let cases: [(&str, GeoLocation, NaiveDate, i32, [Expected; 3]); 3] = [
        ("greenland 2020-10-30", GREENLAND, date(2020, 10, 30), 0, [Some((12, 5)), Some((12, 58)), Some((13, 49))]),
        ("tyumen 2023-04-25", TYUMEN, date(2023, 4, 25), 5, [Some((5, 2)), Some((12, 35)), Some((20, 10))]),
        ("prague 2022-12-27", PRAGUE, date(2022, 12, 27), 1, [Some((8, 0)), Some((12, 3)), Some((16, 8))]),
    ];
    let config = RiseSetConfig::refracted();
    for (label, location, day, tz, expected) in cases {
        let events = sun_events(day, offset(tz), &location, TwilightMode::Actual, &config)
            .expect("search should succeed");
        check_events(label, events, expected, day, tz, 2.0);
    }
}

#[test]
fn sun_equinox_at_null_island() {
    let day = date(2021, 3, 20);
    let events =
        sun_events(day, offset(0), &GeoLocation::ZERO, TwilightMode::Actual, &RiseSetConfig::default())
            .expect("search should succeed");
    check_events(
        "equator",
        events,
        [Some((6, 4)), Some((12, 7)), Some((18, 11))],
        day,
        0,
        1.0,
    );
}

// ---------------------------------------------------------------------------
// Moon
// ---------------------------------------------------------------------------

#[test]
fn moon_events_geometric() {
    let cases: [(&str, GeoLocation, NaiveDate, i32, [Expected; 3]); 5] = [
        ("nyc 2020-09-12", NYC, date(2020, 9, 12), -4, [Some((0, 46)), Some((8, 34)), Some((16, 21))]),
        ("nyc 2020-09-11", NYC, date(2020, 9, 11), -4, [None, Some((7, 39)), Some((15, 27))]),
        ("nyc 2020-09-24", NYC, date(2020, 9, 24), -4, [Some((15, 1)), Some((19, 38)), None]),
        ("greenland 2020-09-11", GREENLAND, date(2020, 9, 11), 0, [None, Some((7, 53)), None]),
        ("nyc 2021-02-28", NYC, date(2021, 2, 28), -5, [Some((19, 29)), Some((1, 1)), Some((7, 35))]),
    ];
    let config = RiseSetConfig::default();
    for (label, location, day, tz, expected) in cases {
        let events = moon_events(day, offset(tz), &location, &config).expect("search should succeed");
        check_events(label, events, expected, day, tz, 3.0);
    }
}

// ---------------------------------------------------------------------------
// Daylight and above-horizon windows
// ---------------------------------------------------------------------------

#[test]
fn daylight_lengths() {
    let cases: [(GeoLocation, NaiveDate, i32, f64); 7] = [
        (NYC, date(2021, 4, 3), -4, 12.0 + 47.0 / 60.0),
        (NYC, date(2021, 3, 13), -5, 11.0 + 50.0 / 60.0),
        (NYC, date(2021, 3, 14), -5, 11.0 + 53.0 / 60.0),
        (GREENLAND, date(2021, 1, 10), 0, 0.0),
        (GREENLAND, date(2021, 2, 17), 0, 4.0 + 38.0 / 60.0),
        (GREENLAND, date(2021, 4, 22), 0, 22.0 + 42.0 / 60.0),
        (GREENLAND, date(2021, 5, 22), 0, 24.0),
    ];
    let config = RiseSetConfig::default();
    for (location, day, tz, expected) in cases {
        let hours = daylight_length(day, offset(tz), &location, TwilightMode::Actual, &config)
            .expect("search should succeed");
        let diff = (hours - expected).abs() * 60.0;
        assert!(diff <= 2.0, "{day} at {location:?}: {hours:.3} h, expected {expected:.3} h");
    }
}

#[test]
fn sun_above_horizon_windows() {
    // (at, expected start, expected end); all NYC at −04:00.
    let cases = [
        (local(2020, 9, 12, 12, 0, -4), local(2020, 9, 12, 6, 34, -4), local(2020, 9, 12, 19, 9, -4)),
        (local(2020, 9, 12, 0, 0, -4), local(2020, 9, 11, 6, 33, -4), local(2020, 9, 11, 19, 11, -4)),
        (local(2020, 9, 12, 2, 0, -4), local(2020, 9, 12, 6, 34, -4), local(2020, 9, 12, 19, 9, -4)),
        (local(2020, 9, 12, 20, 0, -4), local(2020, 9, 12, 6, 34, -4), local(2020, 9, 12, 19, 9, -4)),
    ];
    let config = RiseSetConfig::default();
    let threshold = TwilightMode::Actual.altitude_deg();
    for (at, start, end) in cases {
        let window = above_horizon_window(&SunLocator, at, offset(-4), &NYC, threshold, &config)
            .expect("search should succeed")
            .expect("sun has a window");
        assert!(window.start.hours_since(start).abs() * 60.0 <= 1.0, "at {at}: start {}", window.start);
        assert!(window.end.hours_since(end).abs() * 60.0 <= 1.0, "at {at}: end {}", window.end);
    }
}

#[test]
fn sun_above_horizon_polar() {
    let config = RiseSetConfig::default();
    let threshold = TwilightMode::Actual.altitude_deg();

    let midnight_sun = local(2020, 6, 4, 12, 0, 0);
    let window = above_horizon_window(&SunLocator, midnight_sun, offset(0), &GREENLAND, threshold, &config)
        .expect("search should succeed")
        .expect("sun is up all day");
    assert!(window.start.hours_since(local(2020, 6, 4, 0, 0, 0)).abs() < 1e-6);
    assert!((window.duration_hours() - 24.0).abs() < 1e-6);

    let polar_night = local(2020, 11, 1, 12, 0, 0);
    let window = above_horizon_window(&SunLocator, polar_night, offset(0), &GREENLAND, threshold, &config)
        .expect("search should succeed");
    assert!(window.is_none());
}

#[test]
fn moon_above_horizon_windows() {
    let config = RiseSetConfig::default();
    let cases = [
        (local(2020, 9, 11, 17, 0, -4), local(2020, 9, 10, 23, 55, -4), local(2020, 9, 11, 15, 27, -4)),
        (local(2020, 9, 12, 12, 0, -4), local(2020, 9, 12, 0, 46, -4), local(2020, 9, 12, 16, 21, -4)),
    ];
    for (at, start, end) in cases {
        let window = above_horizon_window(
            &MoonLocator,
            at,
            offset(-4),
            &NYC,
            MOON_STANDARD_ALTITUDE_DEG,
            &config,
        )
        .expect("search should succeed")
        .expect("moon has a window");
        assert!(window.start.hours_since(start).abs() * 60.0 <= 3.0, "at {at}: start {}", window.start);
        assert!(window.end.hours_since(end).abs() * 60.0 <= 3.0, "at {at}: end {}", window.end);
    }
}
