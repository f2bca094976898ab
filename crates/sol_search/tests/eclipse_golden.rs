//! Golden-value integration tests for lunar eclipse search.
//!
//! Observer near Boston (42° N, 70° W). Contact times are the published
//! umbral contacts (U1/U4 for partial, U2/U3 for total) in UTC.

use sol_frames::GeoLocation;
use sol_search::{
    EclipseConfig, EclipseVisibility, LunarEclipse, LunarEclipseKind, next_lunar_eclipse,
};
use sol_time::UniversalTime;

const BOSTON: GeoLocation = GeoLocation::new(42.0, -70.0);

fn utc(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> UniversalTime {
    UniversalTime::from_calendar(y, m, d, hh as f64 + mm as f64 / 60.0).expect("valid date")
}

fn find(after: UniversalTime, kind: LunarEclipseKind) -> LunarEclipse {
    next_lunar_eclipse(after, &BOSTON, kind, &EclipseConfig::default())
        .expect("search should succeed")
        .expect("an eclipse should be found")
}

fn assert_near(label: &str, actual: UniversalTime, expected: UniversalTime, minutes: f64) {
    let diff = actual.hours_since(expected).abs() * 60.0;
    assert!(diff <= minutes, "{label}: got {actual}, expected {expected}, off {diff:.1} min");
}

#[test]
fn partial_eclipse_2021_nov_19() {
    let eclipse = find(utc(2021, 8, 29, 0, 0), LunarEclipseKind::Partial);
    assert_eq!(eclipse.kind, LunarEclipseKind::Partial);
    assert_near("start", eclipse.start, utc(2021, 11, 19, 7, 18), 2.0);
    assert_near("maximum", eclipse.maximum, utc(2021, 11, 19, 9, 3), 2.0);
    assert_near("end", eclipse.end, utc(2021, 11, 19, 10, 47), 2.0);
    assert!((eclipse.magnitude - 0.974).abs() < 0.01, "magnitude {}", eclipse.magnitude);
    assert!((eclipse.obscuration - 0.991).abs() < 0.01, "obscuration {}", eclipse.obscuration);
}

#[test]
fn total_eclipse_2022_may_16_found_as_partial() {
    let eclipse = find(utc(2021, 12, 1, 10, 47), LunarEclipseKind::Partial);
    assert_near("start", eclipse.start, utc(2022, 5, 16, 2, 28), 2.0);
    assert_near("maximum", eclipse.maximum, utc(2022, 5, 16, 4, 11), 2.0);
    assert_near("end", eclipse.end, utc(2022, 5, 16, 5, 54), 2.0);
    assert!((eclipse.magnitude - 1.413).abs() < 0.01, "magnitude {}", eclipse.magnitude);
    assert!((eclipse.obscuration - 1.0).abs() < 1e-9);
}

#[test]
fn small_partial_eclipse_2024_sep_18() {
    let eclipse = find(utc(2023, 1, 1, 0, 0), LunarEclipseKind::Partial);
    assert_near("start", eclipse.start, utc(2024, 9, 18, 2, 13), 2.0);
    assert_near("end", eclipse.end, utc(2024, 9, 18, 3, 15), 2.0);
    assert!((eclipse.magnitude - 0.078).abs() < 0.01, "magnitude {}", eclipse.magnitude);
    assert!((eclipse.obscuration - 0.035).abs() < 0.01, "obscuration {}", eclipse.obscuration);
}

#[test]
fn total_phase_2022_may_16() {
    let eclipse = find(utc(2021, 8, 29, 0, 0), LunarEclipseKind::Total);
    assert_eq!(eclipse.kind, LunarEclipseKind::Total);
    assert_near("start", eclipse.start, utc(2022, 5, 16, 3, 29), 2.0);
    assert_near("end", eclipse.end, utc(2022, 5, 16, 4, 53), 2.0);
    assert!(eclipse.magnitude >= 1.0);
}

#[test]
fn eclipse_in_progress_is_returned() {
    let during = find(utc(2021, 11, 19, 9, 0), LunarEclipseKind::Partial);
    assert_near("start", during.start, utc(2021, 11, 19, 7, 18), 2.0);
}

#[test]
fn eclipse_after_its_end_moves_on() {
    let next = find(utc(2021, 11, 19, 11, 0), LunarEclipseKind::Partial);
    assert_near("maximum", next.maximum, utc(2022, 5, 16, 4, 11), 2.0);
}

#[test]
fn contact_visibility_never_loses_a_maximum_visible_eclipse() {
    let config = EclipseConfig {
        visibility: EclipseVisibility::AnyContact,
        ..EclipseConfig::default()
    };
    let eclipse = next_lunar_eclipse(utc(2021, 8, 29, 0, 0), &BOSTON, LunarEclipseKind::Partial, &config)
        .expect("search should succeed")
        .expect("an eclipse should be found");
    assert!(eclipse.maximum <= utc(2021, 11, 19, 10, 0));
}

#[test]
fn capped_search_returns_none() {
    // One candidate only, starting right after the November 2021 eclipse.
    let config = EclipseConfig { max_lunations: 1, ..EclipseConfig::default() };
    let result = next_lunar_eclipse(utc(2021, 11, 20, 0, 0), &BOSTON, LunarEclipseKind::Total, &config)
        .expect("search should succeed");
    assert!(result.is_none());
}
