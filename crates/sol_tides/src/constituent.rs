//! Tide constituents: angular speeds, equilibrium arguments and the
//! nodal parents each one takes its corrections from.
//!
//! Equilibrium arguments follow Schureman's notation: `T` is the hour
//! angle of the mean Sun counted from lower transit, `s`, `h`, `p`, `N`
//! and `p1` the mean longitudes of the Moon, Sun, lunar perigee, lunar
//! ascending node and solar perigee.
//!
//! Source: P. Schureman, *Manual of Harmonic Analysis and Prediction of
//! Tides*, US Coast and Geodetic Survey SP 98 (1958), Table 2.

use std::fmt;

/// Hourly rates of `T, s, h, p, N, p1` in degrees.
pub(crate) const ARGUMENT_RATES_DEG_PER_HOUR: [f64; 6] = [
    15.0,
    0.549_016_5,
    0.041_068_6,
    0.004_641_8,
    -0.002_206_4,
    0.000_002_0,
];

/// A harmonic constituent of the tide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(clippy::upper_case_acronyms)]
pub enum TideConstituent {
    M2,
    S2,
    N2,
    K1,
    M4,
    O1,
    M6,
    MK3,
    S4,
    MN4,
    NU2,
    S6,
    MU2,
    TwoN2,
    LAM2,
    S1,
    SSA,
    SA,
    MSF,
    RHO,
    Q1,
    T2,
    R2,
    P1,
    TwoSM2,
    L2,
    TwoMK3,
    K2,
    M8,
    MS4,
    Z0,
}

/// All constituents in table order.
pub const ALL_CONSTITUENTS: [TideConstituent; 31] = [
    TideConstituent::M2,
    TideConstituent::S2,
    TideConstituent::N2,
    TideConstituent::K1,
    TideConstituent::M4,
    TideConstituent::O1,
    TideConstituent::M6,
    TideConstituent::MK3,
    TideConstituent::S4,
    TideConstituent::MN4,
    TideConstituent::NU2,
    TideConstituent::S6,
    TideConstituent::MU2,
    TideConstituent::TwoN2,
    TideConstituent::LAM2,
    TideConstituent::S1,
    TideConstituent::SSA,
    TideConstituent::SA,
    TideConstituent::MSF,
    TideConstituent::RHO,
    TideConstituent::Q1,
    TideConstituent::T2,
    TideConstituent::R2,
    TideConstituent::P1,
    TideConstituent::TwoSM2,
    TideConstituent::L2,
    TideConstituent::TwoMK3,
    TideConstituent::K2,
    TideConstituent::M8,
    TideConstituent::MS4,
    TideConstituent::Z0,
];

struct ConstituentData {
    name: &'static str,
    speed_deg_per_hour: f64,
    /// Multipliers of `T, s, h, p, N, p1`.
    arguments: [i8; 6],
    /// Constant added to the equilibrium argument, degrees.
    offset_deg: f64,
    /// Powers of the M2, O1, K1, K2 and L2 nodal terms.
    nodal: [i8; 5],
}

#[rustfmt::skip]
const CONSTITUENTS: [ConstituentData; 31] = [
    ConstituentData { name: "M2",   speed_deg_per_hour: 28.984_104_2,  arguments: [2, -2, 2, 0, 0, 0],  offset_deg: 0.0,   nodal: [1, 0, 0, 0, 0] },
    ConstituentData { name: "S2",   speed_deg_per_hour: 30.0,          arguments: [2, 0, 0, 0, 0, 0],   offset_deg: 0.0,   nodal: [0, 0, 0, 0, 0] },
    ConstituentData { name: "N2",   speed_deg_per_hour: 28.439_729_5,  arguments: [2, -3, 2, 1, 0, 0],  offset_deg: 0.0,   nodal: [1, 0, 0, 0, 0] },
    ConstituentData { name: "K1",   speed_deg_per_hour: 15.041_068_6,  arguments: [1, 0, 1, 0, 0, 0],   offset_deg: -90.0, nodal: [0, 0, 1, 0, 0] },
    ConstituentData { name: "M4",   speed_deg_per_hour: 57.968_208_4,  arguments: [4, -4, 4, 0, 0, 0],  offset_deg: 0.0,   nodal: [2, 0, 0, 0, 0] },
    ConstituentData { name: "O1",   speed_deg_per_hour: 13.943_035_6,  arguments: [1, -2, 1, 0, 0, 0],  offset_deg: 90.0,  nodal: [0, 1, 0, 0, 0] },
    ConstituentData { name: "M6",   speed_deg_per_hour: 86.952_312_7,  arguments: [6, -6, 6, 0, 0, 0],  offset_deg: 0.0,   nodal: [3, 0, 0, 0, 0] },
    ConstituentData { name: "MK3",  speed_deg_per_hour: 44.025_172_9,  arguments: [3, -2, 3, 0, 0, 0],  offset_deg: -90.0, nodal: [1, 0, 1, 0, 0] },
    ConstituentData { name: "S4",   speed_deg_per_hour: 60.0,          arguments: [4, 0, 0, 0, 0, 0],   offset_deg: 0.0,   nodal: [0, 0, 0, 0, 0] },
    ConstituentData { name: "MN4",  speed_deg_per_hour: 57.423_833_7,  arguments: [4, -5, 4, 1, 0, 0],  offset_deg: 0.0,   nodal: [2, 0, 0, 0, 0] },
    ConstituentData { name: "NU2",  speed_deg_per_hour: 28.512_583_1,  arguments: [2, -3, 4, -1, 0, 0], offset_deg: 0.0,   nodal: [1, 0, 0, 0, 0] },
    ConstituentData { name: "S6",   speed_deg_per_hour: 90.0,          arguments: [6, 0, 0, 0, 0, 0],   offset_deg: 0.0,   nodal: [0, 0, 0, 0, 0] },
    ConstituentData { name: "MU2",  speed_deg_per_hour: 27.968_208_4,  arguments: [2, -4, 4, 0, 0, 0],  offset_deg: 0.0,   nodal: [2, 0, 0, 0, 0] },
    ConstituentData { name: "2N2",  speed_deg_per_hour: 27.895_354_8,  arguments: [2, -4, 2, 2, 0, 0],  offset_deg: 0.0,   nodal: [1, 0, 0, 0, 0] },
    ConstituentData { name: "LAM2", speed_deg_per_hour: 29.455_625_3,  arguments: [2, -1, 0, 1, 0, 0],  offset_deg: 180.0, nodal: [1, 0, 0, 0, 0] },
    ConstituentData { name: "S1",   speed_deg_per_hour: 15.0,          arguments: [1, 0, 0, 0, 0, 0],   offset_deg: 0.0,   nodal: [0, 0, 0, 0, 0] },
    ConstituentData { name: "SSA",  speed_deg_per_hour: 0.082_137_3,   arguments: [0, 0, 2, 0, 0, 0],   offset_deg: 0.0,   nodal: [0, 0, 0, 0, 0] },
    ConstituentData { name: "SA",   speed_deg_per_hour: 0.041_068_6,   arguments: [0, 0, 1, 0, 0, 0],   offset_deg: 0.0,   nodal: [0, 0, 0, 0, 0] },
    ConstituentData { name: "MSF",  speed_deg_per_hour: 1.015_895_8,   arguments: [0, 2, -2, 0, 0, 0],  offset_deg: 0.0,   nodal: [-1, 0, 0, 0, 0] },
    ConstituentData { name: "RHO",  speed_deg_per_hour: 13.471_514_5,  arguments: [1, -3, 3, -1, 0, 0], offset_deg: 90.0,  nodal: [1, 0, -1, 0, 0] },
    ConstituentData { name: "Q1",   speed_deg_per_hour: 13.398_660_9,  arguments: [1, -3, 1, 1, 0, 0],  offset_deg: 90.0,  nodal: [0, 1, 0, 0, 0] },
    ConstituentData { name: "T2",   speed_deg_per_hour: 29.958_933_3,  arguments: [2, 0, -1, 0, 0, 1],  offset_deg: 0.0,   nodal: [0, 0, 0, 0, 0] },
    ConstituentData { name: "R2",   speed_deg_per_hour: 30.041_066_7,  arguments: [2, 0, 1, 0, 0, -1],  offset_deg: 180.0, nodal: [0, 0, 0, 0, 0] },
    ConstituentData { name: "P1",   speed_deg_per_hour: 14.958_931_4,  arguments: [1, 0, -1, 0, 0, 0],  offset_deg: 90.0,  nodal: [0, 0, 0, 0, 0] },
    ConstituentData { name: "2SM2", speed_deg_per_hour: 31.015_895_8,  arguments: [2, 2, -2, 0, 0, 0],  offset_deg: 0.0,   nodal: [-1, 0, 0, 0, 0] },
    ConstituentData { name: "L2",   speed_deg_per_hour: 29.528_478_9,  arguments: [2, -1, 2, -1, 0, 0], offset_deg: 180.0, nodal: [0, 0, 0, 0, 1] },
    ConstituentData { name: "2MK3", speed_deg_per_hour: 42.927_139_8,  arguments: [3, -4, 3, 0, 0, 0],  offset_deg: 90.0,  nodal: [1, 1, 0, 0, 0] },
    ConstituentData { name: "K2",   speed_deg_per_hour: 30.082_137_3,  arguments: [2, 0, 2, 0, 0, 0],   offset_deg: 0.0,   nodal: [0, 0, 0, 1, 0] },
    ConstituentData { name: "M8",   speed_deg_per_hour: 115.936_416_6, arguments: [8, -8, 8, 0, 0, 0],  offset_deg: 0.0,   nodal: [4, 0, 0, 0, 0] },
    ConstituentData { name: "MS4",  speed_deg_per_hour: 58.984_104_2,  arguments: [4, -2, 2, 0, 0, 0],  offset_deg: 0.0,   nodal: [1, 0, 0, 0, 0] },
    ConstituentData { name: "Z0",   speed_deg_per_hour: 0.0,           arguments: [0, 0, 0, 0, 0, 0],   offset_deg: 0.0,   nodal: [0, 0, 0, 0, 0] },
];

impl TideConstituent {
    fn data(self) -> &'static ConstituentData {
        &CONSTITUENTS[self as usize]
    }

    /// Standard abbreviation, e.g. `"M2"` or `"2MK3"`.
    pub fn name(self) -> &'static str {
        self.data().name
    }

    /// Case-insensitive lookup by abbreviation.
    pub fn from_name(name: &str) -> Option<Self> {
        ALL_CONSTITUENTS
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Angular speed in degrees per hour.
    pub fn speed_deg_per_hour(self) -> f64 {
        self.data().speed_deg_per_hour
    }

    /// Multipliers of `T, s, h, p, N, p1` in the equilibrium argument.
    pub fn doodson_multipliers(self) -> [i8; 6] {
        self.data().arguments
    }

    pub(crate) fn argument_offset_deg(self) -> f64 {
        self.data().offset_deg
    }

    pub(crate) fn nodal_powers(self) -> [i8; 5] {
        self.data().nodal
    }
}

impl fmt::Display for TideConstituent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
