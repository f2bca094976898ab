//! Tide statistics driven by the Moon: spring/neap classification and the
//! lunitidal interval between a Moon transit and the following high water.

use chrono::{Offset, Utc};
use log::debug;
use sol_frames::GeoLocation;
use sol_locators::{MoonLocator, MoonTruePhase};
use sol_search::{RiseSetConfig, moon_events};
use sol_time::UniversalTime;

use crate::error::TideError;
use crate::tide_types::TidalRange;

/// Days of Moon phase history consulted by [`tidal_range`].
const RANGE_LOOKBACK_DAYS: u32 = 3;

const HALF_DAY_HOURS: f64 = 12.0;

/// Spring, neap or normal range at `ut`.
///
/// Spring tides follow new and full Moon, neap tides the quarters, each
/// with a lag of up to [`RANGE_LOOKBACK_DAYS`] days.
pub fn tidal_range(ut: UniversalTime) -> TidalRange {
    for days_back in 0..=RANGE_LOOKBACK_DAYS {
        let phase = MoonLocator.phase(ut.plus_days(-f64::from(days_back))).phase;
        match phase {
            MoonTruePhase::New | MoonTruePhase::Full => return TidalRange::Spring,
            MoonTruePhase::FirstQuarter | MoonTruePhase::ThirdQuarter => return TidalRange::Neap,
            _ => {}
        }
    }
    TidalRange::Normal
}

/// Hours from the last upper or lower Moon transit to `high_tide`,
/// reduced to at most 12 h.
///
/// Pass a low-water time to get the low-water interval instead. `None`
/// when no transit precedes the tide in the three UTC days around it.
pub fn lunitidal_interval(
    high_tide: UniversalTime,
    location: &GeoLocation,
) -> Result<Option<f64>, TideError> {
    let Some(transit) = last_transit(high_tide, location)? else {
        return Ok(None);
    };
    Ok(Some(wrap_half_day(high_tide.hours_since(transit))))
}

/// Mean of [`lunitidal_interval`] over several tides, in hours.
///
/// Tides for which no interval exists are skipped; `None` if none remain.
pub fn mean_lunitidal_interval(
    high_tides: &[UniversalTime],
    location: &GeoLocation,
) -> Result<Option<f64>, TideError> {
    let mut intervals = Vec::with_capacity(high_tides.len());
    for &tide in high_tides {
        if let Some(hours) = lunitidal_interval(tide, location)? {
            intervals.push(hours);
        }
    }
    Ok(mean_interval(&intervals))
}

/// Average of intervals that may straddle the 12 h wrap.
///
/// When the set holds both long (> 8 h) and short (< 4 h) intervals the
/// short ones are taken as belonging to the next half day before
/// averaging.
pub(crate) fn mean_interval(intervals: &[f64]) -> Option<f64> {
    if intervals.is_empty() {
        return None;
    }
    let straddles = intervals.iter().any(|&h| h > 8.0) && intervals.iter().any(|&h| h < 4.0);
    let total: f64 = intervals
        .iter()
        .map(|&h| if straddles && h < 4.0 { h + HALF_DAY_HOURS } else { h })
        .sum();
    let mean = wrap_half_day(total / intervals.len() as f64);
    debug!("mean lunitidal interval {mean:.2} h from {} tides", intervals.len());
    Some(mean)
}

fn wrap_half_day(mut hours: f64) -> f64 {
    while hours > HALF_DAY_HOURS {
        hours -= HALF_DAY_HOURS;
    }
    hours
}

/// Latest Moon transit at or before `time`, over the meridian of
/// `location` or of its antipode.
fn last_transit(
    time: UniversalTime,
    location: &GeoLocation,
) -> Result<Option<UniversalTime>, TideError> {
    let transits = moon_transits_between(time.plus_days(-1.0), time.plus_days(1.0), location)?;
    Ok(transits.into_iter().rev().find(|t| *t <= time))
}

/// Upper and lower Moon transits on every UTC day touching `[start, end]`,
/// in time order.
///
/// Lower transits are upper transits over the antipode.
pub(crate) fn moon_transits_between(
    start: UniversalTime,
    end: UniversalTime,
    location: &GeoLocation,
) -> Result<Vec<UniversalTime>, TideError> {
    let utc = Utc.fix();
    let config = RiseSetConfig::default();
    let first = start.local_date(utc)?;
    let last = end.local_date(utc)?;

    let mut transits = Vec::new();
    for meridian in [*location, location.antipode()] {
        for date in first.iter_days().take_while(|d| *d <= last) {
            transits.extend(moon_events(date, utc, &meridian, &config)?.transit);
        }
    }
    transits.sort_by(|a, b| a.jd().total_cmp(&b.jd()));
    Ok(transits)
}
