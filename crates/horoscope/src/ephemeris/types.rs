use crate::houses::HOUSE_COUNT;
use crate::points::PointId;
use crate::zodiac::normalize_degrees;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Invalid house system: {system}. Valid systems: {valid:?}")]
    InvalidHouseSystem { system: String, valid: Vec<String> },
    #[error("Failed to calculate position for {point} at JD {jd_ut}: {message}")]
    CalculationFailed {
        point: PointId,
        jd_ut: f64,
        message: String,
    },
    #[error("House calculation failed: {message}")]
    HouseCalculationFailed { message: String },
    #[error("Ephemeris backend unavailable: {message}")]
    Unavailable { message: String },
}

/// Longitude and daily motion of one body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    /// Longitude in degrees (0-360)
    pub longitude: f64,
    /// Speed in longitude (degrees per day)
    pub speed: f64,
}

/// House cusps and angles for a time and place
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseFrame {
    /// Cusps of houses 1..12
    pub cusps: [f64; HOUSE_COUNT],
    pub ascendant: f64,
    pub midheaven: f64,
    pub vertex: f64,
}

impl HouseFrame {
    pub fn descendant(&self) -> f64 {
        normalize_degrees(self.ascendant + 180.0)
    }

    pub fn imum_coeli(&self) -> f64 {
        normalize_degrees(self.midheaven + 180.0)
    }

    /// Longitude of a house-derived angle; `None` for any other point
    pub fn angle(&self, point: PointId) -> Option<f64> {
        match point {
            PointId::Ascendant => Some(self.ascendant),
            PointId::Descendant => Some(self.descendant()),
            PointId::Midheaven => Some(self.midheaven),
            PointId::ImumCoeli => Some(self.imum_coeli()),
            PointId::Vertex => Some(self.vertex),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseSystem {
    #[default]
    Placidus,
    WholeSign,
    Koch,
    Equal,
    Regiomontanus,
    Campanus,
    Alcabitius,
    Morinus,
}

/// House system mapping
const HOUSE_SYSTEMS: &[(&str, HouseSystem, u8)] = &[
    ("placidus", HouseSystem::Placidus, b'P'),
    ("whole_sign", HouseSystem::WholeSign, b'W'),
    ("koch", HouseSystem::Koch, b'K'),
    ("equal", HouseSystem::Equal, b'E'),
    ("regiomontanus", HouseSystem::Regiomontanus, b'R'),
    ("campanus", HouseSystem::Campanus, b'C'),
    ("alcabitius", HouseSystem::Alcabitius, b'A'),
    ("morinus", HouseSystem::Morinus, b'M'),
];

impl HouseSystem {
    fn entry(self) -> &'static (&'static str, HouseSystem, u8) {
        // every variant has a row
        HOUSE_SYSTEMS
            .iter()
            .find(|(_, system, _)| *system == self)
            .unwrap_or(&HOUSE_SYSTEMS[0])
    }

    pub fn name(self) -> &'static str {
        self.entry().0
    }

    /// One-byte code understood by the Swiss Ephemeris
    pub fn code(self) -> u8 {
        self.entry().2
    }
}

impl FromStr for HouseSystem {
    type Err = EphemerisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace([' ', '-'], "_");
        HOUSE_SYSTEMS
            .iter()
            .find(|(name, _, _)| *name == key)
            .map(|(_, system, _)| *system)
            .ok_or_else(|| EphemerisError::InvalidHouseSystem {
                system: s.to_string(),
                valid: HOUSE_SYSTEMS.iter().map(|(name, _, _)| name.to_string()).collect(),
            })
    }
}

impl fmt::Display for HouseSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Source of raw positions and house frames.
///
/// Implementations must be safe to query concurrently once constructed.
pub trait EphemerisProvider {
    /// Longitude and speed of a body at a Julian day (UT)
    fn position(&self, jd_ut: f64, point: PointId) -> Result<BodyPosition, EphemerisError>;

    /// House cusps and angles at a Julian day (TT) and location
    fn houses(
        &self,
        jd_tt: f64,
        latitude: f64,
        longitude: f64,
        system: HouseSystem,
    ) -> Result<HouseFrame, EphemerisError>;
}

impl<T: EphemerisProvider + ?Sized> EphemerisProvider for &T {
    fn position(&self, jd_ut: f64, point: PointId) -> Result<BodyPosition, EphemerisError> {
        (**self).position(jd_ut, point)
    }

    fn houses(
        &self,
        jd_tt: f64,
        latitude: f64,
        longitude: f64,
        system: HouseSystem,
    ) -> Result<HouseFrame, EphemerisError> {
        (**self).houses(jd_tt, latitude, longitude, system)
    }
}

/// Provider answering from precomputed values, whatever the time or place.
#[derive(Debug, Clone)]
pub struct StaticEphemeris {
    positions: HashMap<PointId, BodyPosition>,
    frame: HouseFrame,
    available: bool,
}

impl StaticEphemeris {
    pub fn new(frame: HouseFrame) -> Self {
        Self {
            positions: HashMap::new(),
            frame,
            available: true,
        }
    }

    pub fn with_position(mut self, point: PointId, longitude: f64, speed: f64) -> Self {
        self.positions.insert(
            point,
            BodyPosition {
                longitude: normalize_degrees(longitude),
                speed,
            },
        );
        self
    }

    /// Make every query fail, as a dead backend would
    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }
}

impl EphemerisProvider for StaticEphemeris {
    fn position(&self, jd_ut: f64, point: PointId) -> Result<BodyPosition, EphemerisError> {
        if !self.available {
            return Err(EphemerisError::Unavailable {
                message: "static ephemeris disabled".to_string(),
            });
        }
        self.positions
            .get(&point)
            .copied()
            .ok_or_else(|| EphemerisError::CalculationFailed {
                point,
                jd_ut,
                message: "no position recorded".to_string(),
            })
    }

    fn houses(
        &self,
        _jd_tt: f64,
        _latitude: f64,
        _longitude: f64,
        _system: HouseSystem,
    ) -> Result<HouseFrame, EphemerisError> {
        if !self.available {
            return Err(EphemerisError::HouseCalculationFailed {
                message: "static ephemeris disabled".to_string(),
            });
        }
        Ok(self.frame)
    }
}
