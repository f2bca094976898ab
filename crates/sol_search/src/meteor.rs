//! Meteor-shower peak search.
//!
//! A shower peaks when the Sun reaches its peak longitude. The observable
//! peak is that instant pulled into the nearest astronomical night and
//! clipped to the time the radiant is above the horizon.

use chrono::{FixedOffset, NaiveDate};
use sol_frames::GeoLocation;
use sol_locators::{
    ALL_METEOR_SHOWERS, MeteorShower, MeteorShowerLocator, ObservationOptions, SunLocator,
    altitude_deg,
};
use sol_time::UniversalTime;

use crate::error::SearchError;
use crate::riseset::{closest_future, closest_past, events_from};
use crate::riseset_types::{RiseSetConfig, RiseSetTransitTimes, TimeWindow, TwilightMode};
use crate::solar_longitude::next_time_at_solar_longitude;

/// Showers whose peak longitude is further than this from the Sun at
/// local midnight cannot peak that day.
const SAME_DAY_LONGITUDE_DEG: f64 = 2.0;

/// Radiant altitude scan step when there is no usable transit, days.
const NIGHT_SCAN_STEP_DAYS: f64 = 5.0 / 1440.0;

/// When a shower is best observed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeteorShowerPeak {
    pub shower: MeteorShower,
    /// Dark time with the radiant up, start.
    pub start: UniversalTime,
    /// Best single instant: radiant highest within the window.
    pub peak: UniversalTime,
    /// Dark time with the radiant up, end.
    pub end: UniversalTime,
}

/// Next observable peak of `shower` at or after `after`.
///
/// `None` when the radiant never clears the horizon during the night
/// nearest the peak, or there is no astronomical night.
pub fn next_meteor_shower_peak(
    shower: MeteorShower,
    after: UniversalTime,
    offset: FixedOffset,
    location: &GeoLocation,
) -> Result<Option<MeteorShowerPeak>, SearchError> {
    location.validate().map_err(SearchError::InvalidLocation)?;
    peak_from(shower, after, offset, location)
}

/// The shower, if any, whose observable peak falls on the civil `date`.
pub fn meteor_shower_on(
    date: NaiveDate,
    offset: FixedOffset,
    location: &GeoLocation,
) -> Result<Option<MeteorShowerPeak>, SearchError> {
    location.validate().map_err(SearchError::InvalidLocation)?;
    let start = UniversalTime::start_of_local_day(date, offset);
    let longitude = SunLocator.solar_longitude_deg(start);

    for shower in ALL_METEOR_SHOWERS {
        if shower.degrees_to_peak(longitude).abs() > SAME_DAY_LONGITUDE_DEG {
            continue;
        }
        let Some(peak) = peak_from(shower, start, offset, location)? else {
            continue;
        };
        if peak.peak.local_date(offset)? == date {
            return Ok(Some(peak));
        }
        log::debug!("{} peaks on {}, not {date}", shower.name(), peak.peak);
    }
    Ok(None)
}

/// Showers active at `ut`, in calendar order of peak.
pub fn active_meteor_showers(ut: UniversalTime) -> Vec<MeteorShower> {
    let longitude = SunLocator.solar_longitude_deg(ut);
    ALL_METEOR_SHOWERS
        .into_iter()
        .filter(|s| s.is_active(longitude))
        .collect()
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

fn peak_from(
    shower: MeteorShower,
    after: UniversalTime,
    offset: FixedOffset,
    location: &GeoLocation,
) -> Result<Option<MeteorShowerPeak>, SearchError> {
    let config = RiseSetConfig::default();
    let radiant = MeteorShowerLocator::new(shower);
    let solar_peak = next_time_at_solar_longitude(after, shower.peak_solar_longitude());

    let mut rises = Vec::with_capacity(3);
    let mut transits = Vec::with_capacity(3);
    let mut sets = Vec::with_capacity(3);
    for day in [-1.0, 0.0, 1.0] {
        let start = local_day_start(solar_peak.plus_days(day), offset)?;
        let events = events_from(&radiant, start, location, 0.0, &config);
        // A radiant that never crosses the horizon has no usable transit either.
        if events.is_circumpolar_or_hidden() {
            continue;
        }
        rises.extend(events.rise);
        transits.extend(events.transit);
        sets.extend(events.set);
    }

    let transit = transits
        .iter()
        .copied()
        .min_by(|a, b| a.days_since(solar_peak).abs().total_cmp(&b.days_since(solar_peak).abs()));
    let anchor = transit.unwrap_or(solar_peak);

    let Some(night) = closest_night(anchor, offset, location)? else {
        log::debug!("{}: no astronomical night near {anchor}", shower.name());
        return Ok(None);
    };

    let Some(transit) = transit else {
        return Ok(highest_in(&radiant, night, location).map(|peak| MeteorShowerPeak {
            shower,
            start: night.start,
            peak,
            end: night.end,
        }));
    };

    let rise = closest_past(anchor, &rises).unwrap_or(night.start);
    let set = closest_future(anchor, &sets).unwrap_or(night.end);
    let start = if rise > night.start { rise } else { night.start };
    let end = if set < night.end { set } else { night.end };
    if start > end {
        log::debug!("{}: radiant down all night", shower.name());
        return Ok(None);
    }

    let peak = if transit < start {
        start
    } else if transit > end {
        end
    } else {
        transit
    };
    Ok(Some(MeteorShowerPeak { shower, start, peak, end }))
}

/// Instant of greatest radiant altitude in `night`, if it is ever above the horizon.
fn highest_in(
    radiant: &MeteorShowerLocator,
    night: TimeWindow,
    location: &GeoLocation,
) -> Option<UniversalTime> {
    let steps = (night.end.days_since(night.start) / NIGHT_SCAN_STEP_DAYS).ceil().max(0.0) as usize;
    let (best_time, best_altitude) = (0..steps)
        .map(|i| night.start.plus_days(i as f64 * NIGHT_SCAN_STEP_DAYS))
        .map(|t| (t, altitude_deg(radiant, t, location, ObservationOptions::GEOMETRIC)))
        .fold((night.start, f64::NEG_INFINITY), |best, cur| {
            if cur.1 > best.1 { cur } else { best }
        });
    (best_altitude >= 0.0).then_some(best_time)
}

/// Astronomical night nearest `at`: last night or tonight, whichever is closer.
///
/// In continuous darkness the whole local day counts; in continuous
/// twilight or daylight there is no night.
fn closest_night(
    at: UniversalTime,
    offset: FixedOffset,
    location: &GeoLocation,
) -> Result<Option<TimeWindow>, SearchError> {
    let config = RiseSetConfig::default();
    let threshold = TwilightMode::Astronomical.altitude_deg();
    let today_start = local_day_start(at, offset)?;
    let sun_on = |start: UniversalTime| -> RiseSetTransitTimes {
        events_from(&SunLocator, start, location, threshold, &config)
    };

    let yesterday = sun_on(today_start.plus_days(-1.0));
    let today = sun_on(today_start);
    let tomorrow = sun_on(today_start.plus_days(1.0));

    let (Some(dusk_before), Some(dawn), Some(dusk), Some(dawn_after)) =
        (yesterday.set, today.rise, today.set, tomorrow.rise)
    else {
        let sun_altitude = altitude_deg(&SunLocator, at, location, ObservationOptions::GEOMETRIC);
        let dark = sun_altitude <= threshold;
        return Ok((dark && today.rise.is_none()).then(|| TimeWindow {
            start: today_start,
            end: today_start.plus_days(1.0),
        }));
    };

    let last_night = TimeWindow { start: dusk_before, end: dawn };
    let tonight = TimeWindow { start: dusk, end: dawn_after };
    if at.days_since(last_night.end).abs() < at.days_since(tonight.start).abs() {
        Ok(Some(last_night))
    } else {
        Ok(Some(tonight))
    }
}

fn local_day_start(ut: UniversalTime, offset: FixedOffset) -> Result<UniversalTime, SearchError> {
    Ok(UniversalTime::start_of_local_day(ut.local_date(offset)?, offset))
}
