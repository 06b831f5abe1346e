use crate::points::PointId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The eleven aspect kinds, in ascending order of exact angle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectKind {
    Conjunction,
    Semisextile,
    Semisquare,
    Sextile,
    Quintile,
    Square,
    Trine,
    Sesquiquadrate,
    Biquintile,
    Quincunx,
    Opposition,
}

/// (kind, exact angle, orb) sorted by exact angle.
///
/// Detection scans this table front to back and stops at the first fit.
pub const ASPECT_TABLE: [(AspectKind, f64, f64); 11] = [
    (AspectKind::Conjunction, 0.0, 8.0),
    (AspectKind::Semisextile, 30.0, 3.0),
    (AspectKind::Semisquare, 45.0, 3.0),
    (AspectKind::Sextile, 60.0, 5.0),
    (AspectKind::Quintile, 72.0, 2.5),
    (AspectKind::Square, 90.0, 6.0),
    (AspectKind::Trine, 120.0, 6.0),
    (AspectKind::Sesquiquadrate, 135.0, 3.0),
    (AspectKind::Biquintile, 144.0, 2.5),
    (AspectKind::Quincunx, 150.0, 4.0),
    (AspectKind::Opposition, 180.0, 8.0),
];

impl AspectKind {
    fn entry(self) -> &'static (AspectKind, f64, f64) {
        &ASPECT_TABLE[self as usize]
    }

    /// Exact angle in degrees
    pub fn exact_angle(self) -> f64 {
        self.entry().1
    }

    /// Maximum deviation from the exact angle
    pub fn orb(self) -> f64 {
        self.entry().2
    }

    pub fn name(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "conjunction",
            AspectKind::Semisextile => "semisextile",
            AspectKind::Semisquare => "semisquare",
            AspectKind::Sextile => "sextile",
            AspectKind::Quintile => "quintile",
            AspectKind::Square => "square",
            AspectKind::Trine => "trine",
            AspectKind::Sesquiquadrate => "sesquiquadrate",
            AspectKind::Biquintile => "biquintile",
            AspectKind::Quincunx => "quincunx",
            AspectKind::Opposition => "opposition",
        }
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether an aspect is tightening toward exact or loosening away from it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionPhase {
    Applying,
    Separating,
}

/// Core aspect information, independent of which points form it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectCore {
    pub kind: AspectKind,
    /// Deviation from the exact angle
    pub orb: f64,
    /// `None` when neither point moves, or both are fixed points
    pub phase: Option<MotionPhase>,
}

/// An aspect between two named points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aspect {
    pub from: PointId,
    pub to: PointId,
    pub kind: AspectKind,
    pub orb: f64,
    pub phase: Option<MotionPhase>,
}

impl Aspect {
    pub fn new(from: PointId, to: PointId, core: AspectCore) -> Self {
        Self {
            from,
            to,
            kind: core.kind,
            orb: core.orb,
            phase: core.phase,
        }
    }

    /// Whether the aspect joins these two points, in either order
    pub fn involves(&self, a: PointId, b: PointId) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }

    /// Within 0.1° of exact
    pub fn is_exact(&self) -> bool {
        self.orb < 0.1
    }
}
