//! Yearly astronomical arguments: equilibrium argument `V0 + u` and node
//! factor `f` for each constituent.
//!
//! `V0` is evaluated at 00:00 UT on 1 January. The nodal corrections `f`
//! and `u` vary slowly with the lunar node (18.6-year cycle) and are
//! evaluated once at mid-year, 2 July 00:00 UT.
//!
//! Sources: P. Schureman, *Manual of Harmonic Analysis and Prediction of
//! Tides* (1958), eqs. 73-78, 197, 215, 227, 235; mean longitudes from
//! Meeus, *Astronomical Algorithms* 2nd ed., Ch. 22 and 47.

use sol_time::{J2000_JD, UniversalTime, calendar_to_jd, normalize_360, polynomial};

use crate::constituent::TideConstituent;

// ---------------------------------------------------------------------------
// Mean longitudes
// ---------------------------------------------------------------------------

/// Mean longitudes in degrees, normalised to [0, 360).
#[derive(Debug, Clone, Copy, PartialEq)]
struct MeanLongitudes {
    /// Moon.
    s: f64,
    /// Sun.
    h: f64,
    /// Lunar perigee.
    p: f64,
    /// Lunar ascending node.
    n: f64,
    /// Solar perigee.
    p1: f64,
}

impl MeanLongitudes {
    fn at(ut: UniversalTime) -> Self {
        let t = (ut.jd() - J2000_JD) / 36_525.0;
        Self {
            s: normalize_360(polynomial(t, &[218.316_447_7, 481_267.881_234_21, -0.001_578_6])),
            h: normalize_360(polynomial(t, &[280.466_46, 36_000.769_83, 0.000_303_2])),
            p: normalize_360(polynomial(t, &[83.353_246_5, 4_069.013_728_7, -0.010_320_0])),
            n: normalize_360(polynomial(t, &[125.044_52, -1_934.136_261, 0.002_070_8])),
            p1: normalize_360(polynomial(t, &[282.937_35, 1.719_46, 0.000_46])),
        }
    }

    /// Equilibrium argument of `constituent` at this instant's 00:00 UT.
    fn equilibrium_argument(&self, constituent: TideConstituent) -> f64 {
        // Mean solar hour angle from lower transit is 180° at midnight UT.
        let values = [180.0, self.s, self.h, self.p, self.n, self.p1];
        let sum: f64 = constituent
            .doodson_multipliers()
            .iter()
            .zip(values)
            .map(|(&m, v)| f64::from(m) * v)
            .sum();
        sum + constituent.argument_offset_deg()
    }
}

// ---------------------------------------------------------------------------
// Nodal corrections
// ---------------------------------------------------------------------------

/// Node factor and nodal angle (degrees) of the five parent terms:
/// M2, O1, K1, K2, L2.
#[derive(Debug, Clone, Copy, PartialEq)]
struct NodalTerms {
    f: [f64; 5],
    u: [f64; 5],
}

impl NodalTerms {
    fn from_longitudes(lon: &MeanLongitudes) -> Self {
        let n = lon.n.to_radians();

        let i = (0.913_694_997 - 0.035_692_561 * n.cos()).acos();
        let nu = (0.089_683_888 * n.sin() / i.sin()).asin();
        let xi = n - 2.0 * (0.644_12 * (n / 2.0).tan()).atan() - nu;

        let sin_2i = (2.0 * i).sin();
        let sin2_i = i.sin().powi(2);
        let nu_prime = (sin_2i * nu.sin()).atan2(sin_2i * nu.cos() + 0.3347);
        let two_nu_second = (sin2_i * (2.0 * nu).sin()).atan2(sin2_i * (2.0 * nu).cos() + 0.0727);

        let f_m2 = (i / 2.0).cos().powi(4) / 0.9154;
        let u_m2 = 2.0 * xi - 2.0 * nu;

        let f_o1 = i.sin() * (i / 2.0).cos().powi(2) / 0.3800;
        let u_o1 = 2.0 * xi - nu;

        let f_k1 = (0.8965 * sin_2i.powi(2) + 0.6001 * sin_2i * nu.cos() + 0.1006).sqrt();
        let u_k1 = -nu_prime;

        let f_k2 = (19.0444 * sin2_i.powi(2) + 2.7702 * sin2_i * (2.0 * nu).cos() + 0.0981).sqrt();
        let u_k2 = -two_nu_second;

        // L2 depends on the perigee through P = p - ξ.
        let big_p = lon.p.to_radians() - xi;
        let t2 = (i / 2.0).tan().powi(2);
        let r_inv = (1.0 - 12.0 * t2 * (2.0 * big_p).cos() + 36.0 * t2 * t2).sqrt();
        let r = ((2.0 * big_p).sin() / (1.0 / (6.0 * t2) - (2.0 * big_p).cos())).atan();
        let f_l2 = f_m2 * r_inv;
        let u_l2 = u_m2 - r;

        Self {
            f: [f_m2, f_o1, f_k1, f_k2, f_l2],
            u: [u_m2, u_o1, u_k1, u_k2, u_l2].map(f64::to_degrees),
        }
    }

    fn factor(&self, constituent: TideConstituent) -> f64 {
        constituent
            .nodal_powers()
            .iter()
            .zip(self.f)
            .map(|(&e, f)| f.powi(i32::from(e.unsigned_abs())))
            .product()
    }

    fn angle(&self, constituent: TideConstituent) -> f64 {
        constituent
            .nodal_powers()
            .iter()
            .zip(self.u)
            .map(|(&e, u)| f64::from(e) * u)
            .sum()
    }
}

// ---------------------------------------------------------------------------
// Public surface
// ---------------------------------------------------------------------------

/// Astronomical arguments for one calendar year (UT).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AstronomicalArguments {
    year: i32,
    start: UniversalTime,
    start_longitudes: MeanLongitudes,
    nodal: NodalTerms,
}

impl AstronomicalArguments {
    pub fn for_year(year: i32) -> Self {
        let start = UniversalTime::from_jd(calendar_to_jd(year, 1, 1.0));
        let mid_year = UniversalTime::from_jd(calendar_to_jd(year, 7, 2.0));
        Self {
            year,
            start,
            start_longitudes: MeanLongitudes::at(start),
            nodal: NodalTerms::from_longitudes(&MeanLongitudes::at(mid_year)),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// 00:00 UT on 1 January, the epoch of the equilibrium arguments.
    pub fn start(&self) -> UniversalTime {
        self.start
    }

    /// `V0 + u` in degrees, normalised to [0, 360).
    pub fn equilibrium_argument_deg(&self, constituent: TideConstituent) -> f64 {
        normalize_360(
            self.start_longitudes.equilibrium_argument(constituent)
                + self.nodal.angle(constituent),
        )
    }

    /// Node factor `f` (dimensionless, near 1).
    pub fn node_factor(&self, constituent: TideConstituent) -> f64 {
        self.nodal.factor(constituent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constituent::ALL_CONSTITUENTS;
    use crate::constituent::TideConstituent::*;

    fn angle_diff(a: f64, b: f64) -> f64 {
        sol_time::normalize_to_pm180(a - b).abs()
    }

    /// Published 2022 values (Fisheries and Oceans Canada node factor and
    /// equilibrium argument tables).
    #[test]
    fn year_2022_matches_published_tables() {
        let args = AstronomicalArguments::for_year(2022);
        let cases = [
            (M2, 0.975, 45.013, 0.5),
            (N2, 0.978, 46.36, 0.5),
            (K1, 1.081, 3.577, 1.5),
            (O1, 1.140, 44.031, 1.5),
            (P1, 1.0, 348.805, 1.0),
            (K2, 1.214, 186.65, 2.0),
        ];
        for (c, f, v, tol) in cases {
            assert!((args.node_factor(c) - f).abs() < 0.015, "{c} f = {}", args.node_factor(c));
            let got = args.equilibrium_argument_deg(c);
            assert!(angle_diff(got, v) < tol, "{c} V0+u = {got}, expected {v}");
        }
    }

    #[test]
    fn compound_terms_follow_parents() {
        let args = AstronomicalArguments::for_year(2021);
        let f_m2 = args.node_factor(M2);
        approx::assert_abs_diff_eq!(args.node_factor(M4), f_m2 * f_m2, epsilon = 1e-12);
        approx::assert_abs_diff_eq!(args.node_factor(M8), f_m2.powi(4), epsilon = 1e-12);
        approx::assert_abs_diff_eq!(args.node_factor(MSF), f_m2, epsilon = 1e-12);
        approx::assert_abs_diff_eq!(
            args.node_factor(MK3),
            f_m2 * args.node_factor(K1),
            epsilon = 1e-12
        );
        approx::assert_abs_diff_eq!(args.node_factor(Q1), args.node_factor(O1), epsilon = 1e-12);
        for c in [S2, S4, S6, S1, SA, SSA, T2, R2, P1, Z0] {
            approx::assert_abs_diff_eq!(args.node_factor(c), 1.0, epsilon = 1e-12);
        }
        // Solar constituents carry no nodal angle.
        approx::assert_abs_diff_eq!(args.equilibrium_argument_deg(S2), 0.0, epsilon = 1e-9);
        approx::assert_abs_diff_eq!(args.equilibrium_argument_deg(Z0), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn node_factors_stay_near_unity() {
        for year in 1990..2030 {
            let args = AstronomicalArguments::for_year(year);
            for c in ALL_CONSTITUENTS {
                let f = args.node_factor(c);
                assert!(f.is_finite() && (0.5..2.0).contains(&f), "{year} {c}: {f}");
                let v = args.equilibrium_argument_deg(c);
                assert!((0.0..360.0).contains(&v), "{year} {c}: {v}");
            }
        }
    }

    #[test]
    fn start_is_new_year_midnight() {
        let args = AstronomicalArguments::for_year(2021);
        assert_eq!(args.year(), 2021);
        approx::assert_abs_diff_eq!(args.start().jd(), 2_459_215.5, epsilon = 1e-9);
    }
}
