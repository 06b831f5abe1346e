//! Relating two charts: cross-chart aspects, house overlays and the
//! midpoint composite.

use crate::aspects::{Aspect, AspectCalculator};
use crate::chart::{ChartAngles, ChartResult, PlacedPoint};
use crate::derived::circular_midpoint;
use crate::houses::{self, HouseCusps};
use crate::points::{Point, PointId, PointSelection, ResolveError};
use crate::zodiac::ZodiacPosition;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aspects from every point of `a` to every point of `b`
pub fn interchart_aspects(a: &ChartResult, b: &ChartResult) -> Vec<Aspect> {
    AspectCalculator::new().compute_between(&a.point_list(), &b.point_list())
}

/// One point projected into another chart's houses
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseOverlay {
    pub point: PointId,
    pub longitude: f64,
    pub zodiac: ZodiacPosition,
    pub retrograde: bool,
    pub house: u8,
    pub degree_in_house: f64,
}

/// Locate each point inside a foreign set of cusps
pub fn house_overlay(points: &[Point], cusps: &HouseCusps) -> Vec<HouseOverlay> {
    points
        .iter()
        .map(|p| {
            let placement = houses::locate(p.longitude, cusps);
            HouseOverlay {
                point: p.id,
                longitude: p.longitude,
                zodiac: ZodiacPosition::from_longitude(p.longitude),
                retrograde: p.is_retrograde(),
                house: placement.house,
                degree_in_house: placement.degree_in_house,
            }
        })
        .collect()
}

/// Everything relating two charts, in both directions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartComparison {
    pub aspects: Vec<Aspect>,
    /// A's points in B's houses
    pub a_in_b: Vec<HouseOverlay>,
    /// B's points in A's houses
    pub b_in_a: Vec<HouseOverlay>,
}

impl ChartComparison {
    /// Synastry between two natal charts, or transits (`b`) against a
    /// natal chart (`a`).
    pub fn between(a: &ChartResult, b: &ChartResult) -> Self {
        let a_points = a.point_list();
        let b_points = b.point_list();
        let comparison = Self {
            aspects: AspectCalculator::new().compute_between(&a_points, &b_points),
            a_in_b: house_overlay(&a_points, &b.cusps),
            b_in_a: house_overlay(&b_points, &a.cusps),
        };
        debug!(
            "Compared charts: {} cross aspects",
            comparison.aspects.len()
        );
        comparison
    }
}

/// A midpoint chart. It has no moment of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeChart {
    pub latitude: f64,
    pub longitude: f64,
    pub cusps: HouseCusps,
    pub angles: ChartAngles,
    pub points: BTreeMap<PointId, PlacedPoint>,
    pub aspects: Vec<Aspect>,
}

impl CompositeChart {
    pub fn point(&self, id: PointId) -> Option<&PlacedPoint> {
        self.points.get(&id)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Build the midpoint composite of two charts.
///
/// Cusps and angles are midpointed from the source house frames. Other
/// points appear only when requested and present in both charts. Houses
/// and aspects are then computed from the composite alone.
pub fn composite_chart<S: AsRef<str>>(
    a: &ChartResult,
    b: &ChartResult,
    requested: &[S],
) -> Result<CompositeChart, ResolveError> {
    let selection = PointSelection::from_names(requested)?;

    let cusps = if a.cusps.is_complete() && b.cusps.is_complete() {
        HouseCusps::new(
            a.cusps
                .as_slice()
                .iter()
                .zip(b.cusps.as_slice())
                .map(|(&ca, &cb)| circular_midpoint(ca, cb))
                .collect(),
        )
    } else {
        warn!(
            "Composite cusps skipped: source charts have {} and {} cusps",
            a.cusps.len(),
            b.cusps.len()
        );
        HouseCusps::new(Vec::new())
    };

    let angles = ChartAngles {
        ascendant: circular_midpoint(a.angles.ascendant, b.angles.ascendant),
        midheaven: circular_midpoint(a.angles.midheaven, b.angles.midheaven),
        vertex: circular_midpoint(a.angles.vertex, b.angles.vertex),
    };

    let mut composite_points = Vec::new();
    for &id in selection.requested() {
        let longitude = match composite_angle(id, a, b, &angles) {
            Some(angle) => angle,
            None => match (a.point(id), b.point(id)) {
                (Some(pa), Some(pb)) => circular_midpoint(pa.longitude, pb.longitude),
                _ => {
                    debug!("{} missing from a source chart; left out of composite", id);
                    continue;
                }
            },
        };
        composite_points.push(Point::new(id, longitude, 0.0));
    }

    let aspects = AspectCalculator::new().compute_within(&composite_points);
    let points = composite_points
        .iter()
        .map(|p| (p.id, PlacedPoint::place(p, &cusps)))
        .collect();

    Ok(CompositeChart {
        latitude: (a.latitude + b.latitude) / 2.0,
        longitude: geographic_midpoint(a.longitude, b.longitude),
        cusps,
        angles,
        points,
        aspects,
    })
}

/// Circular midpoint kept in the signed -180..=180 geographic range
fn geographic_midpoint(a: f64, b: f64) -> f64 {
    let mid = circular_midpoint(a, b);
    if mid > 180.0 {
        mid - 360.0
    } else {
        mid
    }
}

/// Angles are midpointed from each chart's own frame, never from the
/// other composite points.
fn composite_angle(
    id: PointId,
    a: &ChartResult,
    b: &ChartResult,
    angles: &ChartAngles,
) -> Option<f64> {
    match id {
        PointId::Ascendant => Some(angles.ascendant),
        PointId::Midheaven => Some(angles.midheaven),
        PointId::Vertex => Some(angles.vertex),
        PointId::Descendant => Some(circular_midpoint(
            a.angles.ascendant + 180.0,
            b.angles.ascendant + 180.0,
        )),
        PointId::ImumCoeli => Some(circular_midpoint(
            a.angles.midheaven + 180.0,
            b.angles.midheaven + 180.0,
        )),
        _ => None,
    }
}
