//! Celestial event search engine: rise/set/transit, lunar eclipses,
//! solar-longitude crossings and meteor-shower peaks.
//!
//! This crate provides:
//! - Rise, set and transit times of any locator against any altitude
//!   threshold, with Sun twilight modes and Moon/planet/radiant wrappers
//! - Next rise/set, daylight length and above-horizon windows
//! - Lunar eclipse search (partial or total) filtered by visibility
//! - The instant the Sun reaches a given apparent longitude, and seasons
//! - Meteor-shower peaks clipped to the astronomical night
//!
//! All searches are bounded. Events that do not happen come back as
//! `None`; only invalid inputs produce a [`SearchError`].

pub mod eclipse;
pub mod eclipse_types;
pub mod error;
pub mod meteor;
pub mod riseset;
pub mod riseset_types;
pub(crate) mod root;
pub mod solar_longitude;

pub use eclipse::next_lunar_eclipse;
pub use eclipse_types::{EclipseConfig, EclipseVisibility, LunarEclipse, LunarEclipseKind};
pub use error::SearchError;
pub use meteor::{
    MeteorShowerPeak, active_meteor_showers, meteor_shower_on, next_meteor_shower_peak,
};
pub use riseset::{
    above_horizon_window, daylight_length, is_up, meteor_shower_events, moon_events, next_rise,
    next_set, planet_events, rise_set_transit, sun_events,
};
pub use riseset_types::{
    MOON_STANDARD_ALTITUDE_DEG, RiseSetConfig, RiseSetTransitTimes, TimeWindow, TwilightMode,
};
pub use solar_longitude::{next_time_at_solar_longitude, season_at};
