//! Observer and tide-station files.
//!
//! ```toml
//! [location]
//! latitude = 40.7006
//! longitude = -74.0142
//! offset = "-05:00"
//!
//! [[harmonics]]
//! constituent = "M2"
//! amplitude = 1.66
//! phase = 2.3
//! ```
//!
//! Observer files need only `[location]`; station files need only
//! `[[harmonics]]`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use sol_frames::GeoLocation;
use sol_tides::{TidalHarmonic, TideConstituent};

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteFile {
    #[serde(default)]
    pub location: Option<LocationSection>,
    #[serde(default)]
    pub harmonics: Vec<HarmonicEntry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocationSection {
    pub latitude: f64,
    pub longitude: f64,
    /// Civil UTC offset such as `"+01:00"`.
    #[serde(default)]
    pub offset: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HarmonicEntry {
    pub constituent: String,
    pub amplitude: f64,
    /// Greenwich phase lag, degrees.
    pub phase: f64,
}

impl SiteFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn location(&self) -> Option<GeoLocation> {
        self.location
            .as_ref()
            .map(|l| GeoLocation::new(l.latitude, l.longitude))
    }

    pub fn offset(&self) -> Option<&str> {
        self.location.as_ref().and_then(|l| l.offset.as_deref())
    }

    /// Harmonic table with constituent names resolved.
    pub fn harmonics(&self) -> Result<Vec<TidalHarmonic>> {
        self.harmonics
            .iter()
            .map(|h| {
                let constituent = TideConstituent::from_name(&h.constituent)
                    .ok_or_else(|| anyhow!("unknown tide constituent '{}'", h.constituent))?;
                Ok(TidalHarmonic::new(constituent, h.amplitude, h.phase))
            })
            .collect()
    }
}
