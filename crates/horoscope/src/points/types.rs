use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Broad class of a chart point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointCategory {
    /// Planet, luminary or asteroid that moves along the ecliptic
    Body,
    /// House-derived angle (Ascendant, Midheaven, ...)
    Angle,
    /// Lunar node
    Node,
    /// Arithmetic lot derived from other points
    Lot,
}

/// Every point the engine knows how to place.
///
/// Declaration order is the canonical output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PointId {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    Chiron,
    Ceres,
    Pallas,
    Juno,
    Vesta,
    Eros,
    Lilith,
    Psyche,
    Pholus,
    NorthNode,
    SouthNode,
    Ascendant,
    Descendant,
    Midheaven,
    ImumCoeli,
    Vertex,
    PartOfFortune,
}

/// A point with its ecliptic position and daily motion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub id: PointId,
    /// Ecliptic longitude in degrees, [0, 360)
    pub longitude: f64,
    /// Degrees per day; negative when retrograde
    pub speed: f64,
}

impl Point {
    pub fn new(id: PointId, longitude: f64, speed: f64) -> Self {
        Self {
            id,
            longitude: crate::zodiac::normalize_degrees(longitude),
            speed,
        }
    }

    pub fn category(&self) -> PointCategory {
        self.id.category()
    }

    pub fn is_retrograde(&self) -> bool {
        self.id.can_retrograde() && self.speed < 0.0
    }
}

/// Static description of a point
#[derive(Debug, Clone, Copy)]
pub struct PointDefinition {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub category: PointCategory,
    /// Whether the body can show retrograde (negative) motion
    pub can_retrograde: bool,
    /// Angles, nodes and lots: points that do not move on their own
    pub is_fixed: bool,
    /// Swiss Ephemeris body number, `None` for house-derived or synthetic points
    pub ephemeris_code: Option<i32>,
    /// Points that must be calculated before this one
    pub depends_on: &'static [PointId],
}

const fn body(
    name: &'static str,
    aliases: &'static [&'static str],
    can_retrograde: bool,
    code: i32,
) -> PointDefinition {
    PointDefinition {
        name,
        aliases,
        category: PointCategory::Body,
        can_retrograde,
        is_fixed: false,
        ephemeris_code: Some(code),
        depends_on: &[],
    }
}

const fn angle(
    name: &'static str,
    aliases: &'static [&'static str],
    depends_on: &'static [PointId],
) -> PointDefinition {
    PointDefinition {
        name,
        aliases,
        category: PointCategory::Angle,
        can_retrograde: false,
        is_fixed: true,
        ephemeris_code: None,
        depends_on,
    }
}

// Swiss Ephemeris numbered asteroids start here
const AST_OFFSET: i32 = 10000;

static SUN: PointDefinition = body("Sun", &["sun"], false, 0);
static MOON: PointDefinition = body("Moon", &["moon"], false, 1);
static MERCURY: PointDefinition = body("Mercury", &["mercury"], true, 2);
static VENUS: PointDefinition = body("Venus", &["venus"], true, 3);
static MARS: PointDefinition = body("Mars", &["mars"], true, 4);
static JUPITER: PointDefinition = body("Jupiter", &["jupiter"], true, 5);
static SATURN: PointDefinition = body("Saturn", &["saturn"], true, 6);
static URANUS: PointDefinition = body("Uranus", &["uranus"], true, 7);
static NEPTUNE: PointDefinition = body("Neptune", &["neptune"], true, 8);
static PLUTO: PointDefinition = body("Pluto", &["pluto"], true, 9);
static CHIRON: PointDefinition = body("Chiron", &["chiron"], true, 15);
static CERES: PointDefinition = body("Ceres", &["ceres"], true, 17);
static PALLAS: PointDefinition = body("Pallas", &["pallas"], true, 18);
static JUNO: PointDefinition = body("Juno", &["juno"], true, 19);
static VESTA: PointDefinition = body("Vesta", &["vesta"], true, 20);
static EROS: PointDefinition = body("Eros", &["eros"], true, AST_OFFSET + 433);
static LILITH: PointDefinition = body("Lilith", &["lilith", "black_moon"], true, 12);
static PSYCHE: PointDefinition = body("Psyche", &["psyche"], true, AST_OFFSET + 16);
static PHOLUS: PointDefinition = body("Pholus", &["pholus"], true, 16);

static NORTH_NODE: PointDefinition = PointDefinition {
    name: "North Node",
    aliases: &["north_node", "nn"],
    category: PointCategory::Node,
    can_retrograde: false,
    is_fixed: true,
    // mean node
    ephemeris_code: Some(10),
    depends_on: &[],
};

static SOUTH_NODE: PointDefinition = PointDefinition {
    name: "South Node",
    aliases: &["south_node", "sn"],
    category: PointCategory::Node,
    can_retrograde: false,
    is_fixed: true,
    ephemeris_code: None,
    depends_on: &[PointId::NorthNode],
};

static ASCENDANT: PointDefinition = angle("Ascendant", &["asc", "ac"], &[]);
static DESCENDANT: PointDefinition =
    angle("Descendant", &["desc", "dsc", "dc"], &[PointId::Ascendant]);
static MIDHEAVEN: PointDefinition = angle("Midheaven", &["mc"], &[PointId::Ascendant]);
static IMUM_COELI: PointDefinition =
    angle("Imum Coeli", &["ic", "imum_coeli"], &[PointId::Ascendant]);
static VERTEX: PointDefinition = angle("Vertex", &["vertex", "vx"], &[PointId::Ascendant]);

static PART_OF_FORTUNE: PointDefinition = PointDefinition {
    name: "Part of Fortune",
    aliases: &["part_of_fortune", "pof", "fortune"],
    category: PointCategory::Lot,
    can_retrograde: false,
    is_fixed: true,
    ephemeris_code: None,
    depends_on: &[PointId::Sun, PointId::Moon, PointId::Ascendant],
};

/// Pairs that are opposite by construction and never form an aspect
const STRUCTURAL_OPPOSITES: &[(PointId, PointId)] = &[
    (PointId::Ascendant, PointId::Descendant),
    (PointId::Midheaven, PointId::ImumCoeli),
    (PointId::NorthNode, PointId::SouthNode),
];

impl PointId {
    pub const ALL: [PointId; 27] = [
        PointId::Sun,
        PointId::Moon,
        PointId::Mercury,
        PointId::Venus,
        PointId::Mars,
        PointId::Jupiter,
        PointId::Saturn,
        PointId::Uranus,
        PointId::Neptune,
        PointId::Pluto,
        PointId::Chiron,
        PointId::Ceres,
        PointId::Pallas,
        PointId::Juno,
        PointId::Vesta,
        PointId::Eros,
        PointId::Lilith,
        PointId::Psyche,
        PointId::Pholus,
        PointId::NorthNode,
        PointId::SouthNode,
        PointId::Ascendant,
        PointId::Descendant,
        PointId::Midheaven,
        PointId::ImumCoeli,
        PointId::Vertex,
        PointId::PartOfFortune,
    ];

    /// The ten classical planets plus the North Node
    pub const BASE: [PointId; 11] = [
        PointId::Sun,
        PointId::Moon,
        PointId::Mercury,
        PointId::Venus,
        PointId::Mars,
        PointId::Jupiter,
        PointId::Saturn,
        PointId::Uranus,
        PointId::Neptune,
        PointId::Pluto,
        PointId::NorthNode,
    ];

    pub fn definition(self) -> &'static PointDefinition {
        match self {
            PointId::Sun => &SUN,
            PointId::Moon => &MOON,
            PointId::Mercury => &MERCURY,
            PointId::Venus => &VENUS,
            PointId::Mars => &MARS,
            PointId::Jupiter => &JUPITER,
            PointId::Saturn => &SATURN,
            PointId::Uranus => &URANUS,
            PointId::Neptune => &NEPTUNE,
            PointId::Pluto => &PLUTO,
            PointId::Chiron => &CHIRON,
            PointId::Ceres => &CERES,
            PointId::Pallas => &PALLAS,
            PointId::Juno => &JUNO,
            PointId::Vesta => &VESTA,
            PointId::Eros => &EROS,
            PointId::Lilith => &LILITH,
            PointId::Psyche => &PSYCHE,
            PointId::Pholus => &PHOLUS,
            PointId::NorthNode => &NORTH_NODE,
            PointId::SouthNode => &SOUTH_NODE,
            PointId::Ascendant => &ASCENDANT,
            PointId::Descendant => &DESCENDANT,
            PointId::Midheaven => &MIDHEAVEN,
            PointId::ImumCoeli => &IMUM_COELI,
            PointId::Vertex => &VERTEX,
            PointId::PartOfFortune => &PART_OF_FORTUNE,
        }
    }

    pub fn name(self) -> &'static str {
        self.definition().name
    }

    pub fn category(self) -> PointCategory {
        self.definition().category
    }

    pub fn can_retrograde(self) -> bool {
        self.definition().can_retrograde
    }

    pub fn is_fixed(self) -> bool {
        self.definition().is_fixed
    }

    /// Bodies whose motion makes applying/separating meaningful
    pub fn is_moving(self) -> bool {
        self.can_retrograde() || matches!(self, PointId::Sun | PointId::Moon)
    }

    pub fn ephemeris_code(self) -> Option<i32> {
        self.definition().ephemeris_code
    }

    pub fn depends_on(self) -> &'static [PointId] {
        self.definition().depends_on
    }

    /// True for Ascendant/Descendant, Midheaven/Imum Coeli and North/South Node
    /// in either order.
    pub fn is_structural_opposite(self, other: PointId) -> bool {
        STRUCTURAL_OPPOSITES
            .iter()
            .any(|&(a, b)| (a == self && b == other) || (a == other && b == self))
    }

    /// Parse a point name or alias, ignoring case and surrounding whitespace.
    pub fn from_name(name: &str) -> Result<Self, UnknownPoint> {
        let key = name.trim().to_lowercase();
        POINTS_BY_NAME
            .get(key.as_str())
            .copied()
            .ok_or_else(|| UnknownPoint {
                name: name.to_string(),
            })
    }
}

lazy_static! {
    static ref POINTS_BY_NAME: HashMap<String, PointId> = {
        let mut map = HashMap::new();
        for point in PointId::ALL {
            let definition = point.definition();
            map.insert(definition.name.to_lowercase(), point);
            for alias in definition.aliases {
                map.insert(alias.to_string(), point);
            }
        }
        map
    };
}

/// A point name that matches no known point
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown point name: {name}")]
pub struct UnknownPoint {
    pub name: String,
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<PointId> for String {
    fn from(point: PointId) -> Self {
        point.name().to_string()
    }
}

impl TryFrom<String> for PointId {
    type Error = UnknownPoint;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        PointId::from_name(&value)
    }
}

impl std::str::FromStr for PointId {
    type Err = UnknownPoint;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PointId::from_name(s)
    }
}
