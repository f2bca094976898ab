//! Types for lunar eclipse search.

use sol_time::UniversalTime;

/// Which umbral phase the search must reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LunarEclipseKind {
    /// Any umbral contact; a total eclipse also qualifies.
    #[default]
    Partial,
    /// The Moon wholly inside the umbra.
    Total,
}

/// When a candidate counts as visible from the observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EclipseVisibility {
    /// The Moon is above the horizon at greatest eclipse.
    #[default]
    AtMaximum,
    /// The Moon is above the horizon at either contact.
    AnyContact,
}

/// A lunar eclipse as seen from one location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LunarEclipse {
    /// Kind the search was asked for.
    pub kind: LunarEclipseKind,
    /// First contact with the shadow boundary for `kind`.
    pub start: UniversalTime,
    /// Greatest eclipse.
    pub maximum: UniversalTime,
    /// Last contact with the shadow boundary for `kind`.
    pub end: UniversalTime,
    /// Umbral magnitude: fraction of the lunar diameter inside the umbra.
    pub magnitude: f64,
    /// Fraction of the lunar disc area covered by the umbra at maximum, [0, 1].
    pub obscuration: f64,
}

impl LunarEclipse {
    /// Duration of the searched phase in hours.
    pub fn duration_hours(&self) -> f64 {
        self.end.hours_since(self.start)
    }
}

/// Configuration for lunar eclipse search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EclipseConfig {
    /// Candidate eclipse seasons examined before giving up (default 50).
    pub max_lunations: u32,
    pub visibility: EclipseVisibility,
}

impl Default for EclipseConfig {
    fn default() -> Self {
        Self {
            max_lunations: 50,
            visibility: EclipseVisibility::AtMaximum,
        }
    }
}

impl EclipseConfig {
    /// Validate the configuration.
    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        if self.max_lunations == 0 {
            return Err("max_lunations must be > 0");
        }
        if self.max_lunations > 10_000 {
            return Err("max_lunations must not exceed 10000");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = EclipseConfig::default();
        assert_eq!(c.max_lunations, 50);
        assert_eq!(c.visibility, EclipseVisibility::AtMaximum);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_zero_lunations() {
        let c = EclipseConfig { max_lunations: 0, ..EclipseConfig::default() };
        assert!(c.validate().is_err());
    }
}
