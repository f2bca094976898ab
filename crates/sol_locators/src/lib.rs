//! Low-precision position providers for the Sun, Moon, planets, bright
//! stars and meteor-shower radiants.
//!
//! This crate provides:
//! - The [`CelestialLocator`] capability: geocentric equatorial position,
//!   distance and angular size as pure functions of [`UniversalTime`]
//! - Sun (Meeus Ch. 25), Moon (Meeus Ch. 47) and planet (Lawrence Ch. 8)
//!   locators
//! - Moon phase, illumination, bright-limb tilt and super-moon classification
//! - Bright stars precessed from their J2000 mean places
//! - Meteor-shower radiants with their active solar-longitude windows
//! - Observer helpers: horizon position with optional refraction/parallax,
//!   parallactic angle, clear-sky solar radiation and seasons
//!
//! [`UniversalTime`]: sol_time::UniversalTime

pub mod locator;
pub mod meteor;
pub mod moon;
pub mod observe;
pub mod planet;
pub mod radiation;
pub mod season;
pub mod star;
pub mod sun;

pub use locator::CelestialLocator;
pub use meteor::{ALL_METEOR_SHOWERS, MeteorShower, MeteorShowerLocator};
pub use moon::{MoonLocator, MoonPhase, MoonTruePhase, SUPER_MOON_DISTANCE_KM, next_phase_k};
pub use observe::{
    ObservationOptions, altitude_deg, azimuth_deg, horizon_position, parallactic_angle_deg,
};
pub use planet::{ALL_PLANETS, Planet, PlanetLocator};
pub use radiation::{solar_radiation, solar_radiation_on_surface};
pub use season::{OrbitalPosition, Season, season_from_solar_longitude};
pub use star::{ALL_STARS, Star, StarLocator, precess_from_j2000};
pub use sun::SunLocator;
