//! Lunar eclipse search over full Moons.
//!
//! Candidates are full Moons whose argument of latitude F puts the Moon
//! near a node (|sin F| ≤ 0.36). For each, the Meeus Ch. 54 series give
//! the instant of greatest eclipse, the least distance γ of the Moon's
//! centre from the shadow axis, and the umbral radius. Contact times are
//! the crossings of the centre distance through the shadow boundary,
//! found by the same bracket-and-parabola routine as rise/set.
//!
//! The search is inclusive: an eclipse still in progress at `after` is
//! returned.
//!
//! Source: Meeus, *Astronomical Algorithms*, 2nd ed., Ch. 54.

use sol_frames::GeoLocation;
use sol_locators::{MoonLocator, MoonTruePhase, ObservationOptions, altitude_deg, next_phase_k};
use sol_time::{UniversalTime, cos_deg, delta_t_days, normalize_360, polynomial, sin_deg};

use crate::eclipse_types::{EclipseConfig, EclipseVisibility, LunarEclipse, LunarEclipseKind};
use crate::error::SearchError;
use crate::root::crossings;

/// Lunations per Julian century in the Ch. 49 `T = k / 1236.85` relation.
const LUNATIONS_PER_CENTURY: f64 = 1236.85;

/// No eclipse is possible when |sin F| exceeds this.
const NODE_LIMIT_SIN_F: f64 = 0.36;

/// Bound on full Moons skipped while looking for the next eclipse season.
const MAX_SEASON_SKIP: u32 = 12;

/// Start this many days before `after` so an eclipse in progress is seen.
const LOOKBACK_DAYS: f64 = 20.0;

/// Jump past a rejected maximum by this many days.
const ADVANCE_DAYS: f64 = 10.0;

/// Half-width of the contact search around greatest eclipse, hours.
const CONTACT_SPAN_HOURS: f64 = 4.0;
const CONTACT_STEP_MINUTES: f64 = 5.0;
const CONTACT_REFINE_MINUTES: f64 = 2.5;

/// Umbral radius at the Moon's distance is this minus `u`, in Earth radii.
const UMBRA_RADIUS: f64 = 0.7403;
/// Lunar radius in Earth radii.
const MOON_RADIUS: f64 = 0.2725;

// ---------------------------------------------------------------------------
// Periodic term tables (Meeus 54, full Moon)
// ---------------------------------------------------------------------------

/// Correction to the time of mean full Moon.
/// (coefficient ×1e-4 days, multiply by E, M, M', F1, A1, Ω)
#[rustfmt::skip]
const TIME_TERMS: [(f64, bool, f64, f64, f64, f64, f64); 16] = [
    (-4065.0, false, 0.0,  1.0, 0.0,  0.0, 0.0),
    ( 1727.0, true,  1.0,  0.0, 0.0,  0.0, 0.0),
    (  161.0, false, 0.0,  2.0, 0.0,  0.0, 0.0),
    (  -97.0, false, 0.0,  0.0, 2.0,  0.0, 0.0),
    (   73.0, true, -1.0,  1.0, 0.0,  0.0, 0.0),
    (  -50.0, true,  1.0,  1.0, 0.0,  0.0, 0.0),
    (  -23.0, false, 0.0,  1.0, -2.0, 0.0, 0.0),
    (   21.0, true,  2.0,  0.0, 0.0,  0.0, 0.0),
    (   12.0, false, 0.0,  1.0, 2.0,  0.0, 0.0),
    (    6.0, true,  1.0,  2.0, 0.0,  0.0, 0.0),
    (   -4.0, false, 0.0,  3.0, 0.0,  0.0, 0.0),
    (   -3.0, true,  1.0,  0.0, 2.0,  0.0, 0.0),
    (    3.0, false, 0.0,  0.0, 0.0,  1.0, 0.0),
    (   -2.0, true,  1.0,  0.0, -2.0, 0.0, 0.0),
    (   -2.0, true, -1.0,  2.0, 0.0,  0.0, 0.0),
    (   -2.0, false, 0.0,  0.0, 0.0,  0.0, 1.0),
];

/// P series (coefficient ×1e-4, multiply by E, M, M', F1).
#[rustfmt::skip]
const P_TERMS: [(f64, bool, f64, f64, f64); 7] = [
    ( 2070.0, true,  1.0, 0.0, 0.0),
    (   24.0, true,  2.0, 0.0, 0.0),
    ( -392.0, false, 0.0, 1.0, 0.0),
    (  116.0, false, 0.0, 2.0, 0.0),
    (  -73.0, true,  1.0, 1.0, 0.0),
    (   67.0, true, -1.0, 1.0, 0.0),
    (  118.0, false, 0.0, 0.0, 2.0),
];

/// Q series, cosine terms (coefficient ×1e-4, multiply by E, M, M').
#[rustfmt::skip]
const Q_TERMS: [(f64, bool, f64, f64); 6] = [
    (52207.0, false, 0.0, 0.0),
    (  -48.0, true,  1.0, 0.0),
    (   20.0, true,  2.0, 0.0),
    (-3299.0, false, 0.0, 1.0),
    (  -60.0, true,  1.0, 1.0),
    (   41.0, true, -1.0, 1.0),
];

// ---------------------------------------------------------------------------
// Candidate geometry
// ---------------------------------------------------------------------------

/// Shadow geometry of one full Moon near a node.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    maximum: UniversalTime,
    /// γ: least distance of the Moon's centre from the shadow axis, Earth radii.
    gamma: f64,
    /// Enlargement of the shadow cones.
    u: f64,
    /// Hourly motion of the Moon relative to the shadow, Earth radii.
    n: f64,
}

impl Candidate {
    fn umbral_magnitude(&self) -> f64 {
        (1.0128 - self.u - self.gamma.abs()) / 0.545
    }

    /// Centre distance at which the eclipse of `kind` begins or ends.
    fn contact_distance(&self, kind: LunarEclipseKind) -> f64 {
        match kind {
            LunarEclipseKind::Partial => 1.0128 - self.u,
            LunarEclipseKind::Total => 0.4678 - self.u,
        }
    }

    fn reaches(&self, kind: LunarEclipseKind) -> bool {
        let magnitude = self.umbral_magnitude();
        match kind {
            LunarEclipseKind::Partial => magnitude >= 0.0,
            LunarEclipseKind::Total => magnitude >= 1.0,
        }
    }

    /// Centre distance minus `threshold` at `jd`, on a straight-line track.
    fn separation(&self, jd: f64, threshold: f64) -> f64 {
        let hours = (jd - self.maximum.jd()) * 24.0;
        self.gamma.hypot(self.n * hours) - threshold
    }

    /// Closed-form half-duration in hours, or `None` if the boundary is never reached.
    fn half_duration_hours(&self, threshold: f64) -> Option<f64> {
        let d = threshold * threshold - self.gamma * self.gamma;
        (d >= 0.0).then(|| d.sqrt() / self.n)
    }

    fn obscuration(&self) -> f64 {
        let covered = circle_intersection(self.gamma.abs(), MOON_RADIUS, UMBRA_RADIUS - self.u);
        (covered / (std::f64::consts::PI * MOON_RADIUS * MOON_RADIUS)).clamp(0.0, 1.0)
    }
}

/// First full Moon at or after lunation `k` that falls in an eclipse season.
fn candidate_at(k_start: f64) -> Option<Candidate> {
    let mut k = k_start;
    for _ in 0..=MAX_SEASON_SKIP {
        let t = k / LUNATIONS_PER_CENTURY;
        let f = normalize_360(polynomial(
            t,
            &[160.7108, 0.0, -0.001_611_8, -0.000_002_27, 0.000_000_011],
        ) + 390.670_502_84 * k);
        if sin_deg(f).abs() <= NODE_LIMIT_SIN_F {
            return Some(geometry(k, t, f));
        }
        k += 1.0;
    }
    None
}

fn geometry(k: f64, t: f64, f: f64) -> Candidate {
    let mean_jde = 2_451_550.097_66
        + 29.530_588_861 * k
        + polynomial(t, &[0.0, 0.0, 0.000_154_37, -0.000_000_150, 0.000_000_000_73]);
    let m = normalize_360(
        2.5534 + 29.105_356_7 * k + polynomial(t, &[0.0, 0.0, -0.000_001_4, -0.000_000_11]),
    );
    let mp = normalize_360(
        201.5643
            + 385.816_935_28 * k
            + polynomial(t, &[0.0, 0.0, 0.010_758_2, 0.000_012_38, -0.000_000_058]),
    );
    let omega = normalize_360(
        124.7746 - 1.563_755_88 * k + polynomial(t, &[0.0, 0.0, 0.002_067_2, 0.000_002_15]),
    );
    let e = polynomial(t, &[1.0, -0.002_516, -0.000_007_4]);
    let f1 = f - 0.026_65 * sin_deg(omega);
    let a1 = 299.77 + 0.107_408 * k - 0.009_173 * t * t;

    let scale = |uses_e: bool| if uses_e { e } else { 1.0 };

    let correction: f64 = TIME_TERMS
        .iter()
        .map(|&(c, ue, cm, cmp, cf, ca, co)| {
            c * 1e-4 * scale(ue) * sin_deg(cm * m + cmp * mp + cf * f1 + ca * a1 + co * omega)
        })
        .sum();
    let p: f64 = P_TERMS
        .iter()
        .map(|&(c, ue, cm, cmp, cf)| c * 1e-4 * scale(ue) * sin_deg(cm * m + cmp * mp + cf * f1))
        .sum();
    let q: f64 = Q_TERMS
        .iter()
        .map(|&(c, ue, cm, cmp)| c * 1e-4 * scale(ue) * cos_deg(cm * m + cmp * mp))
        .sum();

    let w = cos_deg(f1).abs();
    let gamma = (p * cos_deg(f1) + q * sin_deg(f1)) * (1.0 - 0.0048 * w);
    let u = 0.0059 + 0.0046 * e * cos_deg(m) - 0.0182 * cos_deg(mp) + 0.0004 * cos_deg(2.0 * mp)
        - 0.0005 * cos_deg(m + mp);
    let n = 0.5458 + 0.04 * cos_deg(mp);

    let jde = mean_jde + correction;
    let maximum = UniversalTime::from_jd(jde - delta_t_days(UniversalTime::from_jd(jde).year()));

    Candidate { maximum, gamma, u, n }
}

/// Area of the lens shared by circles of radii `r0`, `r1` with centres `d` apart.
fn circle_intersection(d: f64, r0: f64, r1: f64) -> f64 {
    if d >= r0 + r1 {
        return 0.0;
    }
    if d <= (r0 - r1).abs() {
        let r = r0.min(r1);
        return std::f64::consts::PI * r * r;
    }
    let a = r0 * r0 * ((d * d + r0 * r0 - r1 * r1) / (2.0 * d * r0)).clamp(-1.0, 1.0).acos();
    let b = r1 * r1 * ((d * d + r1 * r1 - r0 * r0) / (2.0 * d * r1)).clamp(-1.0, 1.0).acos();
    let c = 0.5 * ((-d + r0 + r1) * (d + r0 - r1) * (d - r0 + r1) * (d + r0 + r1)).max(0.0).sqrt();
    a + b - c
}

/// Start and end of the phase bounded by `threshold`.
fn contacts(candidate: &Candidate, threshold: f64) -> Option<(UniversalTime, UniversalTime)> {
    let span = CONTACT_SPAN_HOURS / 24.0;
    let step = CONTACT_STEP_MINUTES / 1440.0;
    let steps = (2.0 * span / step).round() as usize;
    let max_jd = candidate.maximum.jd();

    let distance = |jd: f64| candidate.separation(jd, threshold);
    let found = crossings(&distance, max_jd - span, steps, step, CONTACT_REFINE_MINUTES / 1440.0);

    let start = found.iter().rev().find(|c| !c.rising && c.jd <= max_jd).map(|c| c.jd);
    let end = found.iter().find(|c| c.rising && c.jd >= max_jd).map(|c| c.jd);

    match (start, end) {
        (Some(s), Some(e)) => Some((UniversalTime::from_jd(s), UniversalTime::from_jd(e))),
        _ => {
            let half = candidate.half_duration_hours(threshold)?;
            log::debug!("contact crossings not bracketed, using half-duration {half:.3} h");
            Some((candidate.maximum.plus_hours(-half), candidate.maximum.plus_hours(half)))
        }
    }
}

// ---------------------------------------------------------------------------
// Public search
// ---------------------------------------------------------------------------

/// Next lunar eclipse of `kind` visible from `location` that has not ended by `after`.
///
/// Returns `Ok(None)` when `config.max_lunations` candidates pass without
/// a visible eclipse.
pub fn next_lunar_eclipse(
    after: UniversalTime,
    location: &GeoLocation,
    kind: LunarEclipseKind,
    config: &EclipseConfig,
) -> Result<Option<LunarEclipse>, SearchError> {
    config.validate().map_err(SearchError::InvalidConfig)?;
    location.validate().map_err(SearchError::InvalidLocation)?;

    let moon_up = |ut: UniversalTime| {
        altitude_deg(&MoonLocator, ut, location, ObservationOptions::GEOMETRIC) > 0.0
    };

    let mut cursor = after.plus_days(-LOOKBACK_DAYS);
    for attempt in 0..config.max_lunations {
        let k = next_phase_k(cursor, MoonTruePhase::Full);
        let Some(candidate) = candidate_at(k) else {
            log::warn!("no eclipse season within {MAX_SEASON_SKIP} lunations of k = {k}");
            return Ok(None);
        };
        cursor = candidate.maximum.plus_days(ADVANCE_DAYS);

        let magnitude = candidate.umbral_magnitude();
        if !candidate.reaches(kind) {
            log::debug!(
                "candidate {attempt} at {}: magnitude {magnitude:.3} too small for {kind:?}",
                candidate.maximum
            );
            continue;
        }

        let Some((start, end)) = contacts(&candidate, candidate.contact_distance(kind)) else {
            continue;
        };
        if end <= after {
            log::debug!("candidate {attempt} at {} ended before the search start", candidate.maximum);
            continue;
        }

        let visible = match config.visibility {
            EclipseVisibility::AtMaximum => moon_up(candidate.maximum),
            EclipseVisibility::AnyContact => moon_up(start) || moon_up(end),
        };
        if !visible {
            log::debug!("candidate {attempt} at {} is below the horizon", candidate.maximum);
            continue;
        }

        log::debug!(
            "eclipse at {} after {} candidate(s), magnitude {magnitude:.3}",
            candidate.maximum,
            attempt + 1
        );
        return Ok(Some(LunarEclipse {
            kind,
            start,
            maximum: candidate.maximum,
            end,
            magnitude,
            obscuration: candidate.obscuration(),
        }));
    }

    log::warn!(
        "no visible {kind:?} lunar eclipse within {} candidate lunations",
        config.max_lunations
    );
    Ok(None)
}
