//! Nutation in longitude (Δψ) and obliquity (Δε).
//!
//! 63-term lunisolar series, accurate to about 0.5″ in Δψ and 0.1″ in Δε,
//! well below what the low-precision locators need.
//!
//! Source: Meeus, *Astronomical Algorithms* (2nd ed.), Ch. 22, Table 22.A
//! (derived from the IAU 1980 theory of nutation). Public domain.

use sol_time::{UniversalTime, normalize_360, polynomial, sin_deg, cos_deg};

/// Coefficient units are 0.0001″; this converts a summed series to degrees.
const UNITS_TO_DEG: f64 = 1.0 / 36_000_000.0;

/// Nutation angles at an instant, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nutation {
    /// Δψ, nutation in longitude.
    pub longitude_deg: f64,
    /// Δε, nutation in obliquity.
    pub obliquity_deg: f64,
}

/// Fundamental arguments `[D, M, M', F, Ω]` in degrees for Julian centuries `t`.
///
/// - `D`  = mean elongation of the Moon from the Sun
/// - `M`  = mean anomaly of the Sun
/// - `M'` = mean anomaly of the Moon
/// - `F`  = Moon's argument of latitude
/// - `Ω`  = longitude of the Moon's ascending node
pub fn fundamental_arguments(t: f64) -> [f64; 5] {
    [
        polynomial(t, &[297.850_36, 445_267.111_480, -0.001_914_2, 1.0 / 189_474.0]),
        polynomial(t, &[357.527_72, 35_999.050_340, -0.000_160_3, -1.0 / 300_000.0]),
        polynomial(t, &[134.962_98, 477_198.867_398, 0.008_697_2, 1.0 / 56_250.0]),
        polynomial(t, &[93.271_91, 483_202.017_538, -0.003_682_5, 1.0 / 327_270.0]),
        lunar_ascending_node_deg(t),
    ]
    .map(normalize_360)
}

/// Mean longitude of the Moon's ascending node, in degrees (not normalized).
pub fn lunar_ascending_node_deg(t: f64) -> f64 {
    polynomial(t, &[125.044_52, -1_934.136_261, 0.002_070_8, 1.0 / 450_000.0])
}

/// Table 22.A rows: `[D, M, M', F, Ω, ψ_sin, ψ_sin·T, ε_cos, ε_cos·T]`.
#[rustfmt::skip]
static NUTATION_TERMS: [[f64; 9]; 63] = [
    //  D     M     M'    F     Ω      ψ sin      ψ·T     ε cos     ε·T
    [  0.0,   0.0,   0.0,   0.0,   1.0,  -171996.0,  -174.2,  92025.0,    8.9],
    [ -2.0,   0.0,   0.0,   2.0,   2.0,   -13187.0,    -1.6,   5736.0,   -3.1],
    [  0.0,   0.0,   0.0,   2.0,   2.0,    -2274.0,    -0.2,    977.0,   -0.5],
    [  0.0,   0.0,   0.0,   0.0,   2.0,     2062.0,     0.2,   -895.0,    0.5],
    [  0.0,   1.0,   0.0,   0.0,   0.0,     1426.0,    -3.4,     54.0,   -0.1],
    [  0.0,   0.0,   1.0,   0.0,   0.0,      712.0,     0.1,     -7.0,    0.0],
    [ -2.0,   1.0,   0.0,   2.0,   2.0,     -517.0,     1.2,    224.0,   -0.6],
    [  0.0,   0.0,   0.0,   2.0,   1.0,     -386.0,    -0.4,    200.0,    0.0],
    [  0.0,   0.0,   1.0,   2.0,   2.0,     -301.0,     0.0,    129.0,   -0.1],
    [ -2.0,  -1.0,   0.0,   2.0,   2.0,      217.0,    -0.5,    -95.0,    0.3],
    [ -2.0,   0.0,   1.0,   0.0,   0.0,     -158.0,     0.0,      0.0,    0.0],
    [ -2.0,   0.0,   0.0,   2.0,   1.0,      129.0,     0.1,    -70.0,    0.0],
    [  0.0,   0.0,  -1.0,   2.0,   2.0,      123.0,     0.0,    -53.0,    0.0],
    [  2.0,   0.0,   0.0,   0.0,   0.0,       63.0,     0.0,      0.0,    0.0],
    [  0.0,   0.0,   1.0,   0.0,   1.0,       63.0,     0.1,    -33.0,    0.0],
    [  2.0,   0.0,  -1.0,   2.0,   2.0,      -59.0,     0.0,     26.0,    0.0],
    [  0.0,   0.0,  -1.0,   0.0,   1.0,      -58.0,    -0.1,     32.0,    0.0],
    [  0.0,   0.0,   1.0,   2.0,   1.0,      -51.0,     0.0,     27.0,    0.0],
    [ -2.0,   0.0,   2.0,   0.0,   0.0,       48.0,     0.0,      0.0,    0.0],
    [  0.0,   0.0,  -2.0,   2.0,   1.0,       46.0,     0.0,    -24.0,    0.0],
    [  2.0,   0.0,   0.0,   2.0,   2.0,      -38.0,     0.0,     16.0,    0.0],
    [  0.0,   0.0,   2.0,   2.0,   2.0,      -31.0,     0.0,     13.0,    0.0],
    [  0.0,   0.0,   2.0,   0.0,   0.0,       29.0,     0.0,      0.0,    0.0],
    [ -2.0,   0.0,   1.0,   2.0,   2.0,       29.0,     0.0,    -12.0,    0.0],
    [  0.0,   0.0,   0.0,   2.0,   0.0,       26.0,     0.0,      0.0,    0.0],
    [ -2.0,   0.0,   0.0,   2.0,   0.0,      -22.0,     0.0,      0.0,    0.0],
    [  0.0,   0.0,  -1.0,   2.0,   1.0,       21.0,     0.0,    -10.0,    0.0],
    [  0.0,   2.0,   0.0,   0.0,   0.0,       17.0,    -0.1,      0.0,    0.0],
    [  2.0,   0.0,  -1.0,   0.0,   1.0,       16.0,     0.0,     -8.0,    0.0],
    [ -2.0,   2.0,   0.0,   2.0,   2.0,      -16.0,     0.1,      7.0,    0.0],
    [  0.0,   1.0,   0.0,   0.0,   1.0,      -15.0,     0.0,      9.0,    0.0],
    [ -2.0,   0.0,   1.0,   0.0,   1.0,      -13.0,     0.0,      7.0,    0.0],
    [  0.0,  -1.0,   0.0,   0.0,   1.0,      -12.0,     0.0,      6.0,    0.0],
    [  0.0,   0.0,   2.0,  -2.0,   0.0,       11.0,     0.0,      0.0,    0.0],
    [  2.0,   0.0,  -1.0,   2.0,   1.0,      -10.0,     0.0,      5.0,    0.0],
    [  2.0,   0.0,   1.0,   2.0,   2.0,       -8.0,     0.0,      3.0,    0.0],
    [  0.0,   1.0,   0.0,   2.0,   2.0,        7.0,     0.0,     -3.0,    0.0],
    [ -2.0,   1.0,   1.0,   0.0,   0.0,       -7.0,     0.0,      0.0,    0.0],
    [  0.0,  -1.0,   0.0,   2.0,   2.0,       -7.0,     0.0,      3.0,    0.0],
    [  2.0,   0.0,   0.0,   2.0,   1.0,       -7.0,     0.0,      3.0,    0.0],
    [  2.0,   0.0,   1.0,   0.0,   0.0,        6.0,     0.0,      0.0,    0.0],
    [ -2.0,   0.0,   2.0,   2.0,   2.0,        6.0,     0.0,     -3.0,    0.0],
    [ -2.0,   0.0,   1.0,   2.0,   1.0,        6.0,     0.0,     -3.0,    0.0],
    [  2.0,   0.0,  -2.0,   0.0,   1.0,       -6.0,     0.0,      3.0,    0.0],
    [  2.0,   0.0,   0.0,   0.0,   1.0,       -6.0,     0.0,      3.0,    0.0],
    [  0.0,  -1.0,   1.0,   0.0,   0.0,        5.0,     0.0,      0.0,    0.0],
    [ -2.0,  -1.0,   0.0,   2.0,   1.0,       -5.0,     0.0,      3.0,    0.0],
    [ -2.0,   0.0,   0.0,   0.0,   1.0,       -5.0,     0.0,      3.0,    0.0],
    [  0.0,   0.0,   2.0,   2.0,   1.0,       -5.0,     0.0,      3.0,    0.0],
    [ -2.0,   0.0,   2.0,   0.0,   1.0,        4.0,     0.0,      0.0,    0.0],
    [ -2.0,   1.0,   0.0,   2.0,   1.0,        4.0,     0.0,      0.0,    0.0],
    [  0.0,   0.0,   1.0,  -2.0,   0.0,        4.0,     0.0,      0.0,    0.0],
    [ -1.0,   0.0,   1.0,   0.0,   0.0,       -4.0,     0.0,      0.0,    0.0],
    [ -2.0,   1.0,   0.0,   0.0,   0.0,       -4.0,     0.0,      0.0,    0.0],
    [  1.0,   0.0,   0.0,   0.0,   0.0,       -4.0,     0.0,      0.0,    0.0],
    [  0.0,   0.0,   1.0,   2.0,   0.0,        3.0,     0.0,      0.0,    0.0],
    [  0.0,   0.0,  -2.0,   2.0,   2.0,       -3.0,     0.0,      0.0,    0.0],
    [ -1.0,  -1.0,   1.0,   0.0,   0.0,       -3.0,     0.0,      0.0,    0.0],
    [  0.0,   1.0,   1.0,   0.0,   0.0,       -3.0,     0.0,      0.0,    0.0],
    [  0.0,  -1.0,   1.0,   2.0,   2.0,       -3.0,     0.0,      0.0,    0.0],
    [  2.0,  -1.0,  -1.0,   2.0,   2.0,       -3.0,     0.0,      0.0,    0.0],
    [  0.0,   0.0,   3.0,   2.0,   2.0,       -3.0,     0.0,      0.0,    0.0],
    [  2.0,  -1.0,   0.0,   2.0,   2.0,       -3.0,     0.0,      0.0,    0.0],
];

/// Compute Δψ and Δε at a given instant.
pub fn nutation(ut: UniversalTime) -> Nutation {
    let t = ut.julian_centuries();
    let args = fundamental_arguments(t);

    let mut dpsi = 0.0;
    let mut deps = 0.0;
    for row in &NUTATION_TERMS {
        let arg: f64 = row[..5].iter().zip(args.iter()).map(|(n, a)| n * a).sum();
        dpsi += (row[5] + row[6] * t) * sin_deg(arg);
        deps += (row[7] + row[8] * t) * cos_deg(arg);
    }

    Nutation {
        longitude_deg: dpsi * UNITS_TO_DEG,
        obliquity_deg: deps * UNITS_TO_DEG,
    }
}

/// Δψ in degrees.
pub fn nutation_in_longitude_deg(ut: UniversalTime) -> f64 {
    nutation(ut).longitude_deg
}

/// Δε in degrees.
pub fn nutation_in_obliquity_deg(ut: UniversalTime) -> f64 {
    nutation(ut).obliquity_deg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meeus_22a() {
        // 1987-04-10 0h TD: Δψ = −3.788″, Δε = +9.443″
        let ut = UniversalTime::from_calendar(1987, 4, 10, 0.0).unwrap();
        let n = nutation(ut);
        assert!((n.longitude_deg * 3600.0 + 3.788).abs() < 0.01, "Δψ = {}″", n.longitude_deg * 3600.0);
        assert!((n.obliquity_deg * 3600.0 - 9.443).abs() < 0.01, "Δε = {}″", n.obliquity_deg * 3600.0);
    }

    #[test]
    fn bounded_amplitude() {
        let mut jd = 2_440_000.5;
        while jd < 2_470_000.0 {
            let n = nutation(UniversalTime::from_jd(jd));
            assert!(n.longitude_deg.abs() < 20.0 / 3600.0);
            assert!(n.obliquity_deg.abs() < 11.0 / 3600.0);
            jd += 97.3;
        }
    }

    #[test]
    fn node_regresses() {
        let a = lunar_ascending_node_deg(0.0);
        let b = lunar_ascending_node_deg(0.01);
        assert!(b < a, "node should move westward");
    }

    #[test]
    fn arguments_normalized() {
        for a in fundamental_arguments(1.7) {
            assert!((0.0..360.0).contains(&a));
        }
    }
}
