//! Reference frames and observer corrections.
//!
//! This crate provides:
//! - Nutation in longitude and obliquity, mean and true obliquity
//! - Equatorial, ecliptic and horizon coordinate types
//! - Frame rotations and apparent sidereal time
//! - Atmospheric refraction and diurnal parallax
//! - Observer location with great-circle helpers

pub mod coords;
pub mod location;
pub mod nutation;
pub mod obliquity;
pub mod parallax;
pub mod refraction;
pub mod transform;

pub use coords::{EclipticCoordinate, EquatorialCoordinate, HorizonCoordinate};
pub use location::GeoLocation;
pub use nutation::{Nutation, nutation, nutation_in_longitude_deg, nutation_in_obliquity_deg};
pub use obliquity::{mean_obliquity_deg, true_obliquity_deg};
pub use parallax::apply_parallax;
pub use refraction::{apply_refraction, refraction_deg};
pub use transform::{
    ecliptic_to_equatorial, ecliptic_to_equatorial_at, equatorial_to_ecliptic,
    equatorial_to_horizon, equatorial_to_horizon_at, greenwich_apparent_sidereal_hours,
    horizon_to_equatorial, local_apparent_sidereal_hours,
};
