//! Polynomial evaluation and degree-based angle helpers.
//!
//! Every astronomical series in the workspace works in degrees, so the
//! trigonometric wrappers here take and return degrees.

/// Evaluate `c0 + c1·t + c2·t² + …` by Horner's rule.
///
/// An empty coefficient slice evaluates to 0.
pub fn polynomial(t: f64, coefs: &[f64]) -> f64 {
    coefs.iter().rev().fold(0.0, |acc, c| acc * t + c)
}

/// Wrap `value` into the half-open range `[min, max)`.
///
/// Uses Euclidean remainder so negative inputs land inside the range.
/// A degenerate range (`max <= min`) returns `min`.
pub fn wrap(value: f64, min: f64, max: f64) -> f64 {
    let range = max - min;
    if range <= 0.0 || !range.is_finite() {
        return min;
    }
    let wrapped = (value - min).rem_euclid(range) + min;
    // rem_euclid can round up to exactly `range` for tiny negative inputs.
    if wrapped >= max { min } else { wrapped }
}

/// Normalize an angle to [0, 360).
pub fn normalize_360(deg: f64) -> f64 {
    wrap(deg, 0.0, 360.0)
}

/// Normalize an angle to [-180, 180).
pub fn normalize_to_pm180(deg: f64) -> f64 {
    wrap(deg, -180.0, 180.0)
}

/// Signed shortest rotation from `from` to `to`, in [-180, 180).
pub fn delta_angle(from: f64, to: f64) -> f64 {
    normalize_to_pm180(to - from)
}

/// Sine of an angle in degrees.
#[inline]
pub fn sin_deg(deg: f64) -> f64 {
    deg.to_radians().sin()
}

/// Cosine of an angle in degrees.
#[inline]
pub fn cos_deg(deg: f64) -> f64 {
    deg.to_radians().cos()
}

/// Tangent of an angle in degrees.
#[inline]
pub fn tan_deg(deg: f64) -> f64 {
    deg.to_radians().tan()
}

/// Convert hours (0..24) to degrees (0..360).
#[inline]
pub fn hours_to_deg(hours: f64) -> f64 {
    hours * 15.0
}

/// Convert degrees to hours.
#[inline]
pub fn deg_to_hours(deg: f64) -> f64 {
    deg / 15.0
}

/// Fractional part of `x`, always in [0, 1).
pub fn frac(x: f64) -> f64 {
    x - x.floor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn polynomial_horner() {
        assert_eq!(polynomial(2.0, &[1.0, 2.0, 3.0]), 1.0 + 4.0 + 12.0);
        assert_eq!(polynomial(5.0, &[]), 0.0);
        assert_eq!(polynomial(0.0, &[7.5, 100.0]), 7.5);
    }

    #[test]
    fn wrap_negative_and_large() {
        assert_abs_diff_eq!(wrap(-10.0, 0.0, 360.0), 350.0, epsilon = 1e-12);
        assert_abs_diff_eq!(wrap(725.0, 0.0, 360.0), 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(wrap(360.0, 0.0, 360.0), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(wrap(25.0, 0.0, 24.0), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn wrap_range_and_idempotence() {
        let mut x = -2000.0;
        while x < 2000.0 {
            let w = wrap(x, 0.0, 360.0);
            assert!((0.0..360.0).contains(&w), "wrap({x}) = {w}");
            assert_eq!(wrap(w, 0.0, 360.0), w);
            x += 7.3;
        }
    }

    #[test]
    fn wrap_tiny_negative_stays_in_range() {
        let w = wrap(-1e-18, 0.0, 360.0);
        assert!((0.0..360.0).contains(&w));
    }

    #[test]
    fn wrap_degenerate_range() {
        assert_eq!(wrap(12.0, 5.0, 5.0), 5.0);
    }

    #[test]
    fn pm180() {
        assert_abs_diff_eq!(normalize_to_pm180(190.0), -170.0, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_to_pm180(-190.0), 170.0, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_to_pm180(45.0), 45.0, epsilon = 1e-12);
    }

    #[test]
    fn delta_angle_short_way() {
        assert_abs_diff_eq!(delta_angle(350.0, 10.0), 20.0, epsilon = 1e-12);
        assert_abs_diff_eq!(delta_angle(10.0, 350.0), -20.0, epsilon = 1e-12);
    }

    #[test]
    fn degree_trig() {
        assert_abs_diff_eq!(sin_deg(30.0), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(cos_deg(60.0), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(tan_deg(45.0), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn frac_of_negative() {
        assert_abs_diff_eq!(frac(-0.25), 0.75, epsilon = 1e-12);
        assert_abs_diff_eq!(frac(3.5), 0.5, epsilon = 1e-12);
    }
}
