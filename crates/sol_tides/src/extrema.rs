//! High and low water search over a time window.

use log::{debug, trace, warn};
use sol_time::UniversalTime;

use crate::harmonic::WaterLevelCalculator;
use crate::tide_types::Tide;

/// Sampling step of the extremum scan, minutes.
pub const EXTREMA_STEP_MINUTES: f64 = 10.0;

/// Longest window [`tides_between`] will scan; later ends are clipped.
pub const MAX_SPAN_DAYS: f64 = 366.0;

/// Alternating high and low waters in `[start, end]`, in time order.
///
/// The level is sampled every [`EXTREMA_STEP_MINUTES`]; each local
/// extremum is refined with a parabola through its neighbouring samples.
/// Consecutive extrema of the same kind (shallow double tides) collapse
/// to the more extreme one. Returns an empty list when `end <= start`.
/// Windows longer than [`MAX_SPAN_DAYS`] are cut short at that length.
pub fn tides_between<C>(calculator: &C, start: UniversalTime, end: UniversalTime) -> Vec<Tide>
where
    C: WaterLevelCalculator + ?Sized,
{
    let span_days = end.days_since(start);
    if span_days.is_nan() || span_days <= 0.0 {
        return Vec::new();
    }
    let end = if span_days > MAX_SPAN_DAYS {
        let clipped = start.plus_days(MAX_SPAN_DAYS);
        warn!("tide window {start}..{end} longer than {MAX_SPAN_DAYS} days, stopping at {clipped}");
        clipped
    } else {
        end
    };

    let step_hours = EXTREMA_STEP_MINUTES / 60.0;
    let span_minutes = end.hours_since(start) * 60.0;
    // One extra sample each side so extrema at the window edges are seen.
    let steps = (span_minutes / EXTREMA_STEP_MINUTES).ceil() as usize + 2;
    let times: Vec<UniversalTime> = (0..=steps)
        .map(|i| start.plus_hours((i as f64 - 1.0) * step_hours))
        .collect();
    let heights = calculator.heights(&times);

    let mut tides: Vec<Tide> = Vec::new();
    for i in 1..times.len().saturating_sub(1) {
        let (ym, y0, yp) = (heights[i - 1], heights[i], heights[i + 1]);
        let is_high = if y0 > ym && y0 >= yp {
            true
        } else if y0 < ym && y0 <= yp {
            false
        } else {
            continue;
        };

        let time = times[i].plus_hours(vertex_offset(ym, y0, yp) * step_hours);
        let tide = Tide { time, is_high, height: calculator.height(time) };
        trace!("tide extremum {tide:?}");
        push_alternating(&mut tides, tide);
    }

    tides.retain(|t| t.time >= start && t.time <= end);
    debug!("{} tides between {start} and {end}", tides.len());
    tides
}

/// Abscissa of the vertex of the parabola through `(-1, ym)`, `(0, y0)`,
/// `(1, yp)`, clamped to [-1, 1].
fn vertex_offset(ym: f64, y0: f64, yp: f64) -> f64 {
    let curvature = ym - 2.0 * y0 + yp;
    if curvature == 0.0 {
        return 0.0;
    }
    ((ym - yp) / (2.0 * curvature)).clamp(-1.0, 1.0)
}

fn push_alternating(tides: &mut Vec<Tide>, tide: Tide) {
    match tides.last_mut() {
        Some(last) if last.is_high == tide.is_high => {
            let more_extreme = if tide.is_high {
                tide.height > last.height
            } else {
                tide.height < last.height
            };
            if more_extreme {
                *last = tide;
            }
        }
        _ => tides.push(tide),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constituent::TideConstituent;
    use crate::harmonic::HarmonicWaterLevelCalculator;
    use crate::tide_types::TidalHarmonic;
    use crate::twelfths::RuleOfTwelfthsWaterLevelCalculator;

    fn ut(d: u32, h: f64) -> UniversalTime {
        UniversalTime::from_calendar(2022, 1, d, h).expect("valid date")
    }

    #[test]
    fn semidiurnal_cosine_extrema() {
        let calc = HarmonicWaterLevelCalculator::new(vec![TidalHarmonic::new(
            TideConstituent::S2,
            1.5,
            60.0,
        )])
        .expect("valid");
        let tides = tides_between(&calc, ut(1, 0.0), ut(2, 0.0));
        let expected = [(2.0, true), (8.0, false), (14.0, true), (20.0, false)];
        assert_eq!(tides.len(), expected.len(), "{tides:?}");
        for (tide, (hour, high)) in tides.iter().zip(expected) {
            assert_eq!(tide.is_high, high);
            let minutes = tide.time.hours_since(ut(1, hour)).abs() * 60.0;
            assert!(minutes < 0.5, "{tide:?}");
            assert!((tide.height.abs() - 1.5).abs() < 1e-6);
        }
    }

    #[test]
    fn refines_between_samples() {
        let calc = RuleOfTwelfthsWaterLevelCalculator::new(
            Tide::high(ut(1, 1.0 + 7.0 / 60.0), 3.0),
            Tide::low(ut(1, 7.0 + 20.0 / 60.0), 0.5),
        )
        .expect("valid references");
        let tides = tides_between(&calc, ut(1, 0.0), ut(1, 12.0));
        assert_eq!(tides.len(), 2, "{tides:?}");
        assert!(tides[0].is_high && !tides[1].is_high);
        assert!(tides[0].time.hours_since(ut(1, 1.0 + 7.0 / 60.0)).abs() * 60.0 < 0.5);
        assert!(tides[1].time.hours_since(ut(1, 7.0 + 20.0 / 60.0)).abs() * 60.0 < 0.5);
    }

    #[test]
    fn extremum_on_window_edge_is_kept() {
        let calc = RuleOfTwelfthsWaterLevelCalculator::new(Tide::high(ut(1, 6.0), 1.0), Tide::low(ut(1, 12.0), -1.0))
            .expect("valid references");
        // Both extrema sit within one sample step of the window edges.
        let tides = tides_between(&calc, ut(1, 5.95), ut(1, 12.05));
        assert_eq!(tides.len(), 2, "{tides:?}");
    }

    #[test]
    fn empty_window() {
        let calc = HarmonicWaterLevelCalculator::new(Vec::new()).expect("valid");
        assert!(tides_between(&calc, ut(2, 0.0), ut(1, 0.0)).is_empty());
        assert!(tides_between(&calc, ut(1, 0.0), ut(1, 12.0)).is_empty());
    }

    #[test]
    fn far_end_is_clipped_to_the_span_limit() {
        let calc = HarmonicWaterLevelCalculator::new(vec![TidalHarmonic::new(
            TideConstituent::S2,
            1.0,
            0.0,
        )])
        .expect("valid");
        let start = ut(1, 0.0);
        let tides = tides_between(&calc, start, UniversalTime::from_jd(1e15));
        let last = tides.last().expect("tides in the clipped window");
        assert!(last.time.days_since(start) <= MAX_SPAN_DAYS);
        // S2 has four extrema a day.
        assert!(tides.len() >= 4 * 365, "{}", tides.len());
        assert!(tides_between(&calc, start, UniversalTime::from_jd(f64::INFINITY)).len() >= 4 * 365);
        assert!(tides_between(&calc, start, UniversalTime::from_jd(f64::NAN)).is_empty());
    }

    #[test]
    fn same_kind_extrema_collapse() {
        let mut tides = Vec::new();
        push_alternating(&mut tides, Tide::high(ut(1, 1.0), 1.0));
        push_alternating(&mut tides, Tide::high(ut(1, 2.0), 1.4));
        push_alternating(&mut tides, Tide::low(ut(1, 8.0), -1.0));
        push_alternating(&mut tides, Tide::low(ut(1, 9.0), -0.8));
        assert_eq!(tides.len(), 2);
        assert_eq!(tides[0].height, 1.4);
        assert_eq!(tides[1].height, -1.0);
    }
}
