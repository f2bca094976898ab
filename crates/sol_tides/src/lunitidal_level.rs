//! Water level paced by the Moon alone.
//!
//! High water falls a fixed lunitidal interval after every upper and lower
//! Moon transit. Low water falls its own interval after each transit when
//! one is given, otherwise halfway between consecutive highs. Between two
//! neighbouring tides the level follows a rule-of-twelfths arc from +1 at
//! high water to -1 at low water.

use log::{debug, warn};
use sol_frames::GeoLocation;
use sol_search::SearchError;
use sol_time::UniversalTime;

use crate::error::TideError;
use crate::harmonic::WaterLevelCalculator;
use crate::lunitidal::moon_transits_between;
use crate::tide_types::Tide;
use crate::twelfths::RuleOfTwelfthsWaterLevelCalculator;

/// Relative height of high water; low water is its negative.
const HIGH_WATER_LEVEL: f64 = 1.0;

/// Transit lookup padding before the earliest query, days. Covers a full
/// day of interval plus one tidal cycle.
const LOOKBACK_DAYS: f64 = 2.0;

/// Transit lookup padding after the latest query, days.
const LOOKAHEAD_DAYS: f64 = 1.0;

/// Longest batch served from a single transit table, days. Wider batches
/// are answered one instant at a time.
const MAX_BATCH_DAYS: f64 = 400.0;

const DAY_HOURS: f64 = 24.0;

/// Normalised tide curve built from Moon transits and lunitidal intervals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LunitidalWaterLevelCalculator {
    high_interval_hours: f64,
    low_interval_hours: Option<f64>,
    location: GeoLocation,
}

impl LunitidalWaterLevelCalculator {
    /// High water `high_interval_hours` after each transit at `location`.
    pub fn new(high_interval_hours: f64, location: GeoLocation) -> Result<Self, TideError> {
        validate_interval(high_interval_hours)?;
        location
            .validate()
            .map_err(|e| TideError::Search(SearchError::InvalidLocation(e)))?;
        Ok(Self {
            high_interval_hours,
            low_interval_hours: None,
            location,
        })
    }

    /// Place low water `hours` after each transit instead of midway
    /// between highs.
    pub fn with_low_interval(mut self, hours: f64) -> Result<Self, TideError> {
        validate_interval(hours)?;
        self.low_interval_hours = Some(hours);
        Ok(self)
    }

    pub fn high_interval_hours(&self) -> f64 {
        self.high_interval_hours
    }

    pub fn low_interval_hours(&self) -> Option<f64> {
        self.low_interval_hours
    }

    pub fn location(&self) -> &GeoLocation {
        &self.location
    }

    /// Predicted high and low waters from the transits covering
    /// `[start, end]`, in time order.
    fn tides_around(&self, start: UniversalTime, end: UniversalTime) -> Vec<Tide> {
        let transits = match moon_transits_between(
            start.plus_days(-LOOKBACK_DAYS),
            end.plus_days(LOOKAHEAD_DAYS),
            &self.location,
        ) {
            Ok(transits) => transits,
            Err(e) => {
                warn!("no moon transits around {start}..{end}: {e}");
                return Vec::new();
            }
        };

        let mut tides: Vec<Tide> = transits
            .iter()
            .map(|t| Tide::high(t.plus_hours(self.high_interval_hours), HIGH_WATER_LEVEL))
            .collect();
        if let Some(low) = self.low_interval_hours {
            tides.extend(
                transits
                    .iter()
                    .map(|t| Tide::low(t.plus_hours(low), -HIGH_WATER_LEVEL)),
            );
        }
        tides.sort_by(|a, b| a.time.jd().total_cmp(&b.time.jd()));
        debug!("{} predicted tides from {} transits", tides.len(), transits.len());
        tides
    }
}

impl WaterLevelCalculator for LunitidalWaterLevelCalculator {
    fn height(&self, ut: UniversalTime) -> f64 {
        level_among(&self.tides_around(ut, ut), ut)
    }

    fn heights(&self, times: &[UniversalTime]) -> Vec<f64> {
        let (Some(first), Some(last)) = (
            times.iter().copied().min_by(|a, b| a.jd().total_cmp(&b.jd())),
            times.iter().copied().max_by(|a, b| a.jd().total_cmp(&b.jd())),
        ) else {
            return Vec::new();
        };
        let span = last.days_since(first);
        if span.is_nan() || span > MAX_BATCH_DAYS {
            return times.iter().map(|&t| self.height(t)).collect();
        }
        let tides = self.tides_around(first, last);
        times.iter().map(|&t| level_among(&tides, t)).collect()
    }
}

fn validate_interval(hours: f64) -> Result<(), TideError> {
    if hours.is_finite() && (0.0..DAY_HOURS).contains(&hours) {
        Ok(())
    } else {
        Err(TideError::InvalidInterval(hours))
    }
}

/// Level at `ut` on the arc between the tides either side of it; 0 when
/// `ut` is not bracketed.
fn level_among(tides: &[Tide], ut: UniversalTime) -> f64 {
    let next = tides.partition_point(|t| t.time <= ut);
    if next == 0 || next == tides.len() {
        return 0.0;
    }
    let (before, after) = (tides[next - 1], tides[next]);

    let (from, to) = if before.is_high == after.is_high {
        // Two highs (or two lows) in a row: the opposite tide sits midway.
        let midpoint = before
            .time
            .plus_days(after.time.days_since(before.time) / 2.0);
        let between = Tide {
            time: midpoint,
            is_high: !before.is_high,
            height: -before.height,
        };
        if midpoint <= ut { (between, after) } else { (before, between) }
    } else {
        (before, after)
    };

    match RuleOfTwelfthsWaterLevelCalculator::new(from, to) {
        Ok(arc) => arc.height(ut),
        Err(_) => from.height,
    }
}
