//! Bracket-and-parabola root finding on sampled functions of time.
//!
//! Every search in this crate reduces to "where does a smooth scalar
//! function of time cross zero". The function is sampled on a regular grid;
//! each consecutive triple of samples is fitted with a parabola whose roots
//! inside the triple locate crossings, and each crossing is then polished
//! with one more parabola centred on it.
//!
//! Source: Meeus, *Astronomical Algorithms*, Ch. 3 (interpolation from
//! three tabular values).

/// Parabola `y = a·x² + b·x + c` through samples at `x = −1, 0, +1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Parabola {
    a: f64,
    b: f64,
    c: f64,
}

impl Parabola {
    /// Fit through `(−1, y_minus)`, `(0, y_zero)`, `(+1, y_plus)`.
    pub(crate) fn through(y_minus: f64, y_zero: f64, y_plus: f64) -> Self {
        Self {
            a: 0.5 * (y_plus + y_minus) - y_zero,
            b: 0.5 * (y_plus - y_minus),
            c: y_zero,
        }
    }

    /// Abscissa and value of the vertex, or `None` for a straight line.
    pub(crate) fn extremum(&self) -> Option<(f64, f64)> {
        if self.a == 0.0 {
            return None;
        }
        let x = -self.b / (2.0 * self.a);
        Some((x, (self.a * x + self.b) * x + self.c))
    }

    /// Roots within `[−1, 1]`, ascending.
    ///
    /// A degenerate (linear) fit yields its single root when in range.
    pub(crate) fn roots(&self) -> Vec<f64> {
        let in_range = |x: f64| (-1.0..=1.0).contains(&x);

        if self.a == 0.0 {
            if self.b == 0.0 {
                return Vec::new();
            }
            let x = -self.c / self.b;
            return if in_range(x) { vec![x] } else { Vec::new() };
        }

        let discriminant = self.b * self.b - 4.0 * self.a * self.c;
        if discriminant < 0.0 {
            return Vec::new();
        }
        let vertex = -self.b / (2.0 * self.a);
        let dx = 0.5 * discriminant.sqrt() / self.a.abs();
        [vertex - dx, vertex + dx]
            .into_iter()
            .filter(|x| in_range(*x))
            .collect()
    }

    /// Slope `dy/dx` at `x`.
    pub(crate) fn slope(&self, x: f64) -> f64 {
        2.0 * self.a * x + self.b
    }
}

/// A sign change of the sampled function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Crossing {
    /// Julian Day of the crossing.
    pub(crate) jd: f64,
    /// The function goes from negative to positive.
    pub(crate) rising: bool,
}

/// Zero crossings of `f` over `steps` intervals of `step_days` from `start_jd`.
///
/// Samples are fitted in non-overlapping triples (so `steps` should be
/// even); each root is refined with a parabola of half-width
/// `refine_half_days` centred on it. Crossings come back in time order.
pub(crate) fn crossings<F>(
    f: &F,
    start_jd: f64,
    steps: usize,
    step_days: f64,
    refine_half_days: f64,
) -> Vec<Crossing>
where
    F: Fn(f64) -> f64,
{
    let samples: Vec<f64> = (0..=steps).map(|i| f(start_jd + i as f64 * step_days)).collect();
    let mut found = Vec::new();

    for centre in (1..steps).step_by(2) {
        let fit = Parabola::through(samples[centre - 1], samples[centre], samples[centre + 1]);
        for x in fit.roots() {
            let guess = start_jd + (centre as f64 + x) * step_days;
            found.push(Crossing {
                jd: refine_root(f, guess, refine_half_days),
                rising: fit.slope(x) > 0.0,
            });
        }
    }

    log::trace!("{} crossing(s) over {steps} samples from JD {start_jd}", found.len());
    found.sort_by(|a, b| a.jd.total_cmp(&b.jd));
    found
}

/// Polish a root estimate with one parabola of half-width `half_days`.
///
/// Keeps the estimate when the local fit has no root in range.
pub(crate) fn refine_root<F>(f: &F, jd: f64, half_days: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    let fit = Parabola::through(f(jd - half_days), f(jd), f(jd + half_days));
    fit.roots()
        .into_iter()
        .min_by(|a, b| a.abs().total_cmp(&b.abs()))
        .map_or(jd, |x| jd + x * half_days)
}
