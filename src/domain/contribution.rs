//! Percentage contribution of one ticker to its sector's volume.

use serde::{Serialize, Serializer};
use std::fmt;

/// Shown when the sector volume is zero.
pub const UNDEFINED_LABEL: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contribution {
    Percent(f64),
    /// Sector volume was zero.
    Undefined,
}

impl Contribution {
    pub fn compute(latest_volume: u64, sector_volume: u64) -> Self {
        if sector_volume == 0 {
            return Contribution::Undefined;
        }
        Contribution::Percent(latest_volume as f64 / sector_volume as f64 * 100.0)
    }

    pub fn percent(&self) -> Option<f64> {
        match self {
            Contribution::Percent(p) => Some(*p),
            Contribution::Undefined => None,
        }
    }
}

impl fmt::Display for Contribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Contribution::Percent(p) => write!(f, "{p:.5}%"),
            Contribution::Undefined => f.write_str(UNDEFINED_LABEL),
        }
    }
}

impl Serialize for Contribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
