//! Harmonic water-level synthesis.
//!
//! The height at time `t` is
//!
//! ```text
//! h(t) = Σ f·A·cos(ω·t + (V0 + u) − κ)
//! ```
//!
//! where `t` is hours since 00:00 UT on 1 January of the instant's year,
//! `ω` the constituent speed, `f` and `V0 + u` the yearly astronomical
//! arguments and `A`, `κ` the station's amplitude and Greenwich phase.

use std::collections::HashSet;

use sol_time::{UniversalTime, cos_deg};

use crate::astronomical::AstronomicalArguments;
use crate::error::TideError;
use crate::tide_types::TidalHarmonic;

/// Anything that can report a water level at an instant.
pub trait WaterLevelCalculator {
    /// Height relative to the model datum at `ut`.
    fn height(&self, ut: UniversalTime) -> f64;

    /// Heights at each of `times`, in order.
    ///
    /// Models with per-call setup cost override this to share the setup
    /// across a batch.
    fn heights(&self, times: &[UniversalTime]) -> Vec<f64> {
        times.iter().map(|&t| self.height(t)).collect()
    }
}

impl<T: WaterLevelCalculator + ?Sized> WaterLevelCalculator for &T {
    fn height(&self, ut: UniversalTime) -> f64 {
        (**self).height(ut)
    }

    fn heights(&self, times: &[UniversalTime]) -> Vec<f64> {
        (**self).heights(times)
    }
}

/// Water level synthesised from a station's harmonic constants.
///
/// A single [`height`](WaterLevelCalculator::height) query computes the
/// astronomical arguments for the instant's UT year; batch queries through
/// [`heights`](WaterLevelCalculator::heights) compute them once per year.
/// The model holds no state beyond its table and is usable across years.
#[derive(Debug, Clone, PartialEq)]
pub struct HarmonicWaterLevelCalculator {
    harmonics: Vec<TidalHarmonic>,
}

impl HarmonicWaterLevelCalculator {
    /// Validate and wrap a harmonic table.
    ///
    /// Rejects negative or non-finite amplitudes, non-finite phases and
    /// constituents listed twice. An empty table is a flat zero level.
    pub fn new(harmonics: Vec<TidalHarmonic>) -> Result<Self, TideError> {
        let mut seen = HashSet::with_capacity(harmonics.len());
        for harmonic in &harmonics {
            harmonic.validate()?;
            if !seen.insert(harmonic.constituent) {
                return Err(TideError::DuplicateConstituent(harmonic.constituent));
            }
        }
        Ok(Self { harmonics })
    }

    pub fn harmonics(&self) -> &[TidalHarmonic] {
        &self.harmonics
    }

    /// Height using arguments already computed for the instant's year.
    pub fn height_with(&self, args: &AstronomicalArguments, ut: UniversalTime) -> f64 {
        let hours = ut.hours_since(args.start());
        self.harmonics
            .iter()
            .map(|h| {
                let c = h.constituent;
                let angle =
                    c.speed_deg_per_hour() * hours + args.equilibrium_argument_deg(c) - h.phase;
                args.node_factor(c) * h.amplitude * cos_deg(angle)
            })
            .sum()
    }
}

impl WaterLevelCalculator for HarmonicWaterLevelCalculator {
    fn height(&self, ut: UniversalTime) -> f64 {
        let args = AstronomicalArguments::for_year(ut.year());
        self.height_with(&args, ut)
    }

    fn heights(&self, times: &[UniversalTime]) -> Vec<f64> {
        let mut args: Option<AstronomicalArguments> = None;
        let mut out = Vec::with_capacity(times.len());
        for &ut in times {
            let year = ut.year();
            let current = match args {
                Some(a) if a.year() == year => a,
                _ => {
                    let a = AstronomicalArguments::for_year(year);
                    args = Some(a);
                    a
                }
            };
            out.push(self.height_with(&current, ut));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constituent::TideConstituent;
    use approx::assert_abs_diff_eq;

    fn ut(y: i32, m: u32, d: u32, h: f64) -> UniversalTime {
        UniversalTime::from_calendar(y, m, d, h).expect("valid date")
    }

    #[test]
    fn empty_table_is_flat() {
        let calc = HarmonicWaterLevelCalculator::new(Vec::new()).expect("valid");
        assert_abs_diff_eq!(calc.height(ut(2022, 3, 1, 5.0)), 0.0);
    }

    #[test]
    fn solar_constituent_is_a_plain_cosine() {
        // S2 has V0 + u = 0 and f = 1: height = A·cos(30°·t − κ).
        let calc = HarmonicWaterLevelCalculator::new(vec![TidalHarmonic::new(
            TideConstituent::S2,
            2.0,
            60.0,
        )])
        .expect("valid");
        assert_abs_diff_eq!(calc.height(ut(2022, 1, 1, 2.0)), 2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(calc.height(ut(2022, 1, 1, 8.0)), -2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(calc.height(ut(2022, 5, 17, 5.0)), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn amplitude_bounds_height() {
        let harmonics = vec![
            TidalHarmonic::new(TideConstituent::M2, 1.0, 10.0),
            TidalHarmonic::new(TideConstituent::K1, 0.5, 200.0),
        ];
        let calc = HarmonicWaterLevelCalculator::new(harmonics).expect("valid");
        let args = AstronomicalArguments::for_year(2023);
        let bound = args.node_factor(TideConstituent::M2) + 0.5 * args.node_factor(TideConstituent::K1);
        for i in 0..200 {
            let h = calc.height(ut(2023, 4, 1, 0.0).plus_hours(i as f64 * 0.7));
            assert!(h.abs() <= bound + 1e-9, "{h}");
        }
    }

    #[test]
    fn batch_heights_match_single_queries_across_new_year() {
        let harmonics = vec![
            TidalHarmonic::new(TideConstituent::M2, 1.2, 35.0),
            TidalHarmonic::new(TideConstituent::O1, 0.3, 120.0),
            TidalHarmonic::new(TideConstituent::SA, 0.1, 250.0),
        ];
        let calc = HarmonicWaterLevelCalculator::new(harmonics).expect("valid");
        let start = ut(2021, 12, 31, 20.0);
        let times: Vec<UniversalTime> = (0..48).map(|i| start.plus_hours(i as f64 * 0.25)).collect();
        let batch = calc.heights(&times);
        assert_eq!(batch.len(), times.len());
        for (&t, h) in times.iter().zip(batch) {
            assert_abs_diff_eq!(h, calc.height(t), epsilon = 1e-12);
        }
    }

    #[test]
    fn rejects_bad_tables() {
        let duplicate = vec![
            TidalHarmonic::new(TideConstituent::M2, 1.0, 0.0),
            TidalHarmonic::new(TideConstituent::M2, 0.5, 10.0),
        ];
        assert_eq!(
            HarmonicWaterLevelCalculator::new(duplicate),
            Err(TideError::DuplicateConstituent(TideConstituent::M2))
        );
        let negative = vec![TidalHarmonic::new(TideConstituent::O1, -1.0, 0.0)];
        assert!(matches!(
            HarmonicWaterLevelCalculator::new(negative),
            Err(TideError::InvalidAmplitude { .. })
        ));
    }
}
