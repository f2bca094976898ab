//! Obliquity of the ecliptic.
//!
//! Source: Laskar (1986) polynomial as given in Meeus, *Astronomical
//! Algorithms*, Eq. 22.3. Valid to 0.01″ over 1000 years around J2000 and a
//! few arcseconds over 10 000 years.

use sol_time::{UniversalTime, polynomial};

use crate::nutation::nutation_in_obliquity_deg;

/// Laskar coefficients in arcseconds, in powers of `U = T/100`.
#[rustfmt::skip]
const LASKAR_ARCSEC: [f64; 11] = [
    84_381.448, -4_680.93, -1.55, 1_999.25, -51.38, -249.67,
    -39.05, 7.12, 27.87, 5.79, 2.45,
];

/// Mean obliquity ε₀ in degrees for Julian centuries `t`.
pub fn mean_obliquity_at(t: f64) -> f64 {
    polynomial(t / 100.0, &LASKAR_ARCSEC) / 3600.0
}

/// Mean obliquity ε₀ in degrees.
pub fn mean_obliquity_deg(ut: UniversalTime) -> f64 {
    mean_obliquity_at(ut.julian_centuries())
}

/// True obliquity ε = ε₀ + Δε, in degrees.
pub fn true_obliquity_deg(ut: UniversalTime) -> f64 {
    mean_obliquity_deg(ut) + nutation_in_obliquity_deg(ut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn j2000_value() {
        assert!((mean_obliquity_at(0.0) - 23.439_291_1).abs() < 1e-6);
    }

    #[test]
    fn meeus_22a() {
        let ut = UniversalTime::from_calendar(1987, 4, 10, 0.0).unwrap();
        assert!((mean_obliquity_deg(ut) - 23.440_946_3).abs() < 1e-5);
        assert!((true_obliquity_deg(ut) - 23.443_569_4).abs() < 1e-5);
    }
}
