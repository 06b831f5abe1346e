use crate::aspects::Aspect;
use crate::ephemeris::{EphemerisError, HouseFrame, HouseSystem};
use crate::houses::{self, HouseCusps};
use crate::points::{Point, PointId, ResolveError, UnknownPoint};
use crate::time::TimeContext;
use crate::zodiac::ZodiacPosition;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Chart-level failures. Anything else degrades a single point instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error(transparent)]
    UnknownPoint(#[from] UnknownPoint),
    #[error("Unknown house system: {0}")]
    UnknownHouseSystem(String),
    #[error("Dependency cycle between points: {0}")]
    DependencyCycle(String),
    #[error("Ephemeris backend unavailable: {0}")]
    BackendUnavailable(String),
}

impl ChartError {
    /// Bad input rather than a backend problem
    pub fn is_configuration(&self) -> bool {
        !matches!(self, ChartError::BackendUnavailable(_))
    }
}

impl From<ResolveError> for ChartError {
    fn from(e: ResolveError) -> Self {
        match e {
            ResolveError::UnknownPoint(unknown) => ChartError::UnknownPoint(unknown),
            cycle @ ResolveError::DependencyCycle { .. } => {
                ChartError::DependencyCycle(cycle.to_string())
            }
        }
    }
}

impl From<EphemerisError> for ChartError {
    fn from(e: EphemerisError) -> Self {
        match e {
            EphemerisError::InvalidHouseSystem { system, .. } => {
                ChartError::UnknownHouseSystem(system)
            }
            other => ChartError::BackendUnavailable(other.to_string()),
        }
    }
}

/// Inputs for one chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartRequest {
    pub time: TimeContext,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub house_system: HouseSystem,
    /// Point names as supplied by the caller
    pub points: Vec<String>,
}

impl ChartRequest {
    pub fn new<S: Into<String>>(
        time: TimeContext,
        latitude: f64,
        longitude: f64,
        points: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            time,
            latitude,
            longitude,
            house_system: HouseSystem::default(),
            points: points.into_iter().map(Into::into).collect(),
        }
    }

    pub fn with_house_system(mut self, house_system: HouseSystem) -> Self {
        self.house_system = house_system;
        self
    }
}

/// A point placed in the chart's houses
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacedPoint {
    pub longitude: f64,
    pub speed: f64,
    pub house: u8,
    pub degree_in_house: f64,
    pub retrograde: bool,
    pub zodiac: ZodiacPosition,
}

impl PlacedPoint {
    pub fn place(point: &Point, cusps: &HouseCusps) -> Self {
        let placement = houses::locate(point.longitude, cusps);
        Self {
            longitude: point.longitude,
            speed: point.speed,
            house: placement.house,
            degree_in_house: placement.degree_in_house,
            retrograde: point.is_retrograde(),
            zodiac: ZodiacPosition::from_longitude(point.longitude),
        }
    }
}

/// The house frame's own angles, kept whether or not they were requested
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartAngles {
    pub ascendant: f64,
    pub midheaven: f64,
    pub vertex: f64,
}

impl From<&HouseFrame> for ChartAngles {
    fn from(frame: &HouseFrame) -> Self {
        Self {
            ascendant: frame.ascendant,
            midheaven: frame.midheaven,
            vertex: frame.vertex,
        }
    }
}

/// A computed chart, restricted to the requested points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartResult {
    pub time: TimeContext,
    pub latitude: f64,
    pub longitude: f64,
    pub house_system: HouseSystem,
    pub cusps: HouseCusps,
    pub angles: ChartAngles,
    pub points: BTreeMap<PointId, PlacedPoint>,
    pub aspects: Vec<Aspect>,
    /// Set when the Part of Fortune was computed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_day_chart: Option<bool>,
}

impl ChartResult {
    pub fn point(&self, id: PointId) -> Option<&PlacedPoint> {
        self.points.get(&id)
    }

    /// Points in canonical order, as aspect/overlay input
    pub fn point_list(&self) -> Vec<Point> {
        self.points
            .iter()
            .map(|(&id, placed)| Point {
                id,
                longitude: placed.longitude,
                speed: placed.speed,
            })
            .collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
