//! Rise, set and transit search over one civil day.
//!
//! Altitude minus the threshold is sampled from local midnight at a fixed
//! step and every other sample is taken as the centre of a three-point
//! parabola; its roots inside the triple bracket the crossings, and each
//! is polished by one more parabola centred on it. Transit is where the
//! local hour angle passes through zero going westward.
//!
//! Absence is never an error: a body that stays up or down all day yields
//! `None` fields.

use chrono::{Days, FixedOffset, NaiveDate};
use sol_frames::{GeoLocation, local_apparent_sidereal_hours};
use sol_locators::{
    CelestialLocator, MeteorShower, MeteorShowerLocator, MoonLocator, ObservationOptions, Planet,
    PlanetLocator, SunLocator, altitude_deg,
};
use sol_time::{UniversalTime, normalize_to_pm180};

use crate::error::SearchError;
use crate::riseset_types::{
    MOON_STANDARD_ALTITUDE_DEG, RiseSetConfig, RiseSetTransitTimes, TimeWindow, TwilightMode,
};
use crate::root::{crossings, refine_root};

/// Half-width of the parabola polishing a transit, days.
const TRANSIT_REFINE_HALF_DAYS: f64 = 5.0 / 1440.0;

/// Hour-angle jumps larger than this between samples are the ±180° wrap.
const MAX_HOUR_ANGLE_STEP_DEG: f64 = 90.0;

/// Days examined by [`next_rise`] and [`next_set`], starting with the current one.
const NEXT_EVENT_LOOKAHEAD_DAYS: u64 = 2;

/// A body that will rise within this many hours counts as rising "now".
const NEXT_RISE_OFFSET_HOURS: f64 = 6.0;

/// Rise, transit and set of `locator` on the civil `date` in zone `offset`.
///
/// `threshold_deg` is the altitude of the body's centre that counts as the
/// horizon.
pub fn rise_set_transit<L: CelestialLocator + ?Sized>(
    locator: &L,
    date: NaiveDate,
    offset: FixedOffset,
    location: &GeoLocation,
    threshold_deg: f64,
    config: &RiseSetConfig,
) -> Result<RiseSetTransitTimes, SearchError> {
    check_inputs(location, config)?;
    let start = UniversalTime::start_of_local_day(date, offset);
    Ok(events_from(locator, start, location, threshold_deg, config))
}

/// Sun events for a twilight mode.
pub fn sun_events(
    date: NaiveDate,
    offset: FixedOffset,
    location: &GeoLocation,
    mode: TwilightMode,
    config: &RiseSetConfig,
) -> Result<RiseSetTransitTimes, SearchError> {
    rise_set_transit(&SunLocator, date, offset, location, mode.altitude_deg(), config)
}

/// Moon events.
pub fn moon_events(
    date: NaiveDate,
    offset: FixedOffset,
    location: &GeoLocation,
    config: &RiseSetConfig,
) -> Result<RiseSetTransitTimes, SearchError> {
    rise_set_transit(
        &MoonLocator,
        date,
        offset,
        location,
        MOON_STANDARD_ALTITUDE_DEG,
        config,
    )
}

/// Planet events against the geometric horizon.
pub fn planet_events(
    planet: Planet,
    date: NaiveDate,
    offset: FixedOffset,
    location: &GeoLocation,
    config: &RiseSetConfig,
) -> Result<RiseSetTransitTimes, SearchError> {
    rise_set_transit(&PlanetLocator::new(planet), date, offset, location, 0.0, config)
}

/// Rise, culmination and set of a shower radiant.
pub fn meteor_shower_events(
    shower: MeteorShower,
    date: NaiveDate,
    offset: FixedOffset,
    location: &GeoLocation,
    config: &RiseSetConfig,
) -> Result<RiseSetTransitTimes, SearchError> {
    rise_set_transit(
        &MeteorShowerLocator::new(shower),
        date,
        offset,
        location,
        0.0,
        config,
    )
}

/// First rise strictly after `after`, looking at its local day and the next.
pub fn next_rise<L: CelestialLocator + ?Sized>(
    locator: &L,
    after: UniversalTime,
    offset: FixedOffset,
    location: &GeoLocation,
    threshold_deg: f64,
    config: &RiseSetConfig,
) -> Result<Option<UniversalTime>, SearchError> {
    next_event(locator, after, offset, location, threshold_deg, config, |e| e.rise)
}

/// First set strictly after `after`, looking at its local day and the next.
pub fn next_set<L: CelestialLocator + ?Sized>(
    locator: &L,
    after: UniversalTime,
    offset: FixedOffset,
    location: &GeoLocation,
    threshold_deg: f64,
    config: &RiseSetConfig,
) -> Result<Option<UniversalTime>, SearchError> {
    next_event(locator, after, offset, location, threshold_deg, config, |e| e.set)
}

/// Whether the body's centre is above the horizon at `ut`.
pub fn is_up<L: CelestialLocator + ?Sized>(
    locator: &L,
    ut: UniversalTime,
    location: &GeoLocation,
    config: &RiseSetConfig,
) -> bool {
    altitude_deg(locator, ut, location, options(config)) > 0.0
}

/// Hours of daylight on the civil `date`, in [0, 24].
///
/// Polar day counts 24 h and polar night 0. When the Sun sets before it
/// rises the two partial spans at either end of the day are added.
pub fn daylight_length(
    date: NaiveDate,
    offset: FixedOffset,
    location: &GeoLocation,
    mode: TwilightMode,
    config: &RiseSetConfig,
) -> Result<f64, SearchError> {
    check_inputs(location, config)?;
    let threshold = mode.altitude_deg();
    let start = UniversalTime::start_of_local_day(date, offset);
    let end = start.plus_days(1.0);

    let rise = next_rise(&SunLocator, start, offset, location, threshold, config)?;
    let set = next_set(&SunLocator, start, offset, location, threshold, config)?;

    let hours = match (rise, set) {
        (Some(r), Some(s)) if s > r => s.hours_since(r),
        (None, None) => {
            if is_up(&SunLocator, start, location, config) {
                24.0
            } else {
                0.0
            }
        }
        (Some(r), None) => end.hours_since(r),
        (None, Some(s)) => s.hours_since(start),
        (Some(r), Some(s)) => s.hours_since(start) + end.hours_since(r),
    };
    Ok(hours.clamp(0.0, 24.0))
}

/// The span the body is (or is about to be) above the horizon around `at`.
///
/// While up: last rise to next set. While down and rising within six
/// hours: next rise to next set. Otherwise the most recent span. Missing
/// ends fall back to the edges of the local day; `None` when the body has
/// neither risen nor set in the three days around `at`.
pub fn above_horizon_window<L: CelestialLocator + ?Sized>(
    locator: &L,
    at: UniversalTime,
    offset: FixedOffset,
    location: &GeoLocation,
    threshold_deg: f64,
    config: &RiseSetConfig,
) -> Result<Option<TimeWindow>, SearchError> {
    check_inputs(location, config)?;
    let today = at.local_date(offset)?;
    let day_start = UniversalTime::start_of_local_day(today, offset);
    let day_end = day_start.plus_days(1.0);

    let mut rises = Vec::with_capacity(3);
    let mut sets = Vec::with_capacity(3);
    for day in [-1.0, 0.0, 1.0] {
        let events = events_from(locator, day_start.plus_days(day), location, threshold_deg, config);
        rises.extend(events.rise);
        sets.extend(events.set);
    }

    let last_rise = closest_past(at, &rises);
    let next_rise = closest_future(at, &rises);
    let last_set = closest_past(at, &sets);
    let next_set = closest_future(at, &sets);

    if is_up(locator, at, location, config) {
        return Ok(Some(TimeWindow {
            start: last_rise.unwrap_or(day_start),
            end: next_set.unwrap_or(day_end),
        }));
    }

    match next_rise {
        Some(rise) if rise.hours_since(at) <= NEXT_RISE_OFFSET_HOURS => Ok(Some(TimeWindow {
            start: rise,
            end: next_set.unwrap_or(day_end),
        })),
        _ if last_rise.is_none() && last_set.is_none() => Ok(None),
        _ => Ok(Some(TimeWindow {
            start: last_rise.unwrap_or(day_start),
            end: last_set.unwrap_or(day_end),
        })),
    }
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

pub(crate) fn check_inputs(
    location: &GeoLocation,
    config: &RiseSetConfig,
) -> Result<(), SearchError> {
    config.validate().map_err(SearchError::InvalidConfig)?;
    location.validate().map_err(SearchError::InvalidLocation)
}

fn options(config: &RiseSetConfig) -> ObservationOptions {
    ObservationOptions {
        with_refraction: config.with_refraction,
        with_parallax: config.with_parallax,
    }
}

/// Events of the day starting at `start`. Inputs are assumed valid.
pub(crate) fn events_from<L: CelestialLocator + ?Sized>(
    locator: &L,
    start: UniversalTime,
    location: &GeoLocation,
    threshold_deg: f64,
    config: &RiseSetConfig,
) -> RiseSetTransitTimes {
    let observe = options(config);
    let above = |jd: f64| {
        altitude_deg(locator, UniversalTime::from_jd(jd), location, observe) - threshold_deg
    };

    let step = config.step_days();
    let found = crossings(
        &above,
        start.jd(),
        config.samples_per_day,
        step,
        config.refine_window_minutes / 1440.0,
    );
    let rise = found.iter().find(|c| c.rising).map(|c| UniversalTime::from_jd(c.jd));
    let set = found.iter().find(|c| !c.rising).map(|c| UniversalTime::from_jd(c.jd));

    let transit = transit_from(locator, start, location, config.samples_per_day, step)
        .filter(|jd| above(*jd) >= 0.0)
        .map(UniversalTime::from_jd);

    log::trace!(
        "events from {start}: rise {:?}, transit {:?}, set {:?}",
        rise.map(|t| t.jd()),
        transit.map(|t| t.jd()),
        set.map(|t| t.jd())
    );
    RiseSetTransitTimes { rise, transit, set }
}

/// First upward zero of the local hour angle in `[start, start + 1 day]`.
fn transit_from<L: CelestialLocator + ?Sized>(
    locator: &L,
    start: UniversalTime,
    location: &GeoLocation,
    samples: usize,
    step: f64,
) -> Option<f64> {
    let hour_angle = |jd: f64| {
        let ut = UniversalTime::from_jd(jd);
        let lst = local_apparent_sidereal_hours(ut, location.longitude_deg);
        normalize_to_pm180(lst * 15.0 - locator.coordinates(ut).right_ascension_deg)
    };

    let mut prev = hour_angle(start.jd());
    for i in 1..=samples {
        let t1 = start.jd() + i as f64 * step;
        let cur = hour_angle(t1);
        if prev < 0.0 && cur >= 0.0 && cur - prev < MAX_HOUR_ANGLE_STEP_DEG {
            let guess = t1 - step + step * (-prev / (cur - prev));
            return Some(refine_root(&hour_angle, guess, TRANSIT_REFINE_HALF_DAYS));
        }
        prev = cur;
    }
    None
}

fn next_event<L, F>(
    locator: &L,
    after: UniversalTime,
    offset: FixedOffset,
    location: &GeoLocation,
    threshold_deg: f64,
    config: &RiseSetConfig,
    pick: F,
) -> Result<Option<UniversalTime>, SearchError>
where
    L: CelestialLocator + ?Sized,
    F: Fn(&RiseSetTransitTimes) -> Option<UniversalTime>,
{
    check_inputs(location, config)?;
    let first = after.local_date(offset)?;
    for days in 0..NEXT_EVENT_LOOKAHEAD_DAYS {
        let Some(date) = first.checked_add_days(Days::new(days)) else {
            break;
        };
        let start = UniversalTime::start_of_local_day(date, offset);
        let event = pick(&events_from(locator, start, location, threshold_deg, config));
        if let Some(t) = event.filter(|t| *t > after) {
            return Ok(Some(t));
        }
    }
    Ok(None)
}

/// Latest instant at or before `at`.
pub(crate) fn closest_past(at: UniversalTime, times: &[UniversalTime]) -> Option<UniversalTime> {
    times
        .iter()
        .copied()
        .filter(|t| *t <= at)
        .max_by(|a, b| a.jd().total_cmp(&b.jd()))
}

/// Earliest instant at or after `at`.
pub(crate) fn closest_future(at: UniversalTime, times: &[UniversalTime]) -> Option<UniversalTime> {
    times
        .iter()
        .copied()
        .filter(|t| *t >= at)
        .min_by(|a, b| a.jd().total_cmp(&b.jd()))
}
