//! House cusps and house placement.
//!
//! A longitude belongs to house `i` when it lies in `[cusp[i], cusp[i+1])`,
//! with the interval unwrapped across 0° where the next cusp is smaller.

use crate::zodiac::normalize_degrees;
use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const HOUSE_COUNT: usize = 12;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HouseError {
    #[error("Expected 12 house cusps, got {count}")]
    MalformedCusps { count: usize },
    #[error("No house contains longitude {longitude}; cusps are degenerate")]
    NoMatchingHouse { longitude: f64 },
}

/// House cusp longitudes, index 0 holding the cusp of house 1.
///
/// Construction does not validate the count; placement falls back to
/// house 1 when fewer than twelve cusps are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HouseCusps(Vec<f64>);

impl HouseCusps {
    pub fn new(cusps: Vec<f64>) -> Self {
        Self(cusps.into_iter().map(normalize_degrees).collect())
    }

    pub fn is_complete(&self) -> bool {
        self.0.len() >= HOUSE_COUNT
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Cusp of a house numbered 1..=12
    pub fn cusp(&self, house: u8) -> Option<f64> {
        let index = usize::from(house).checked_sub(1)?;
        self.0.get(index).copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Iterate `(house_number, cusp)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (u8, f64)> + '_ {
        self.0
            .iter()
            .enumerate()
            .map(|(i, &cusp)| ((i + 1) as u8, cusp))
    }
}

impl From<[f64; HOUSE_COUNT]> for HouseCusps {
    fn from(cusps: [f64; HOUSE_COUNT]) -> Self {
        Self::new(cusps.to_vec())
    }
}

/// Where a longitude falls among the houses
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HousePlacement {
    /// House number 1..=12
    pub house: u8,
    /// Degrees past the house's starting cusp
    pub degree_in_house: f64,
}

impl HousePlacement {
    const FALLBACK: HousePlacement = HousePlacement {
        house: 1,
        degree_in_house: 0.0,
    };
}

/// Strict placement: reports malformed or degenerate cusps as errors.
pub fn try_locate(longitude: f64, cusps: &HouseCusps) -> Result<HousePlacement, HouseError> {
    if !cusps.is_complete() {
        return Err(HouseError::MalformedCusps { count: cusps.len() });
    }
    let cusps = cusps.as_slice();
    let longitude = normalize_degrees(longitude);

    for i in 0..HOUSE_COUNT {
        let start = cusps[i];
        let mut end = cusps[(i + 1) % HOUSE_COUNT];
        let mut lon = longitude;

        if end < start {
            end += 360.0;
            if lon < start {
                lon += 360.0;
            }
        }

        if start <= lon && lon < end {
            return Ok(HousePlacement {
                house: (i + 1) as u8,
                degree_in_house: normalize_degrees(longitude - start),
            });
        }
    }

    Err(HouseError::NoMatchingHouse { longitude })
}

/// Place a longitude, degrading to house 1 / 0° on bad cusp data.
pub fn locate(longitude: f64, cusps: &HouseCusps) -> HousePlacement {
    match try_locate(longitude, cusps) {
        Ok(placement) => placement,
        Err(e) => {
            warn!("{}; placing {:.4}° in house 1", e, longitude);
            HousePlacement::FALLBACK
        }
    }
}
