//! Chart geometry: house placement, aspects, derived points and
//! multi-chart composition over raw ephemeris positions.

pub mod aspects;
pub mod chart;
pub mod composer;
pub mod config;
pub mod derived;
pub mod ephemeris;
pub mod houses;
pub mod points;
pub mod time;
pub mod zodiac;

pub use aspects::{Aspect, AspectCalculator, AspectKind, MotionPhase};
pub use chart::{compute_chart, ChartAssembler, ChartError, ChartRequest, ChartResult, PlacedPoint};
pub use composer::{
    composite_chart, house_overlay, interchart_aspects, ChartComparison, CompositeChart,
    HouseOverlay,
};
pub use config::{load_settings, EngineSettings};
pub use derived::{circular_midpoint, PartOfFortune};
pub use ephemeris::{EphemerisError, EphemerisProvider, HouseFrame, HouseSystem, StaticEphemeris};
pub use houses::{HouseCusps, HousePlacement};
pub use points::{Point, PointId, PointSelection, ResolveError};
pub use time::TimeContext;
pub use zodiac::{ZodiacPosition, ZodiacSign};

#[cfg(feature = "swisseph")]
pub use ephemeris::SwissEphemerisAdapter;
