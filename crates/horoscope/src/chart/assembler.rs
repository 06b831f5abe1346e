//! Builds a chart from an ephemeris backend and a point request.

use crate::aspects::{Aspect, AspectCalculator};
use crate::chart::types::{ChartAngles, ChartError, ChartRequest, ChartResult, PlacedPoint};
use crate::derived::PartOfFortune;
use crate::ephemeris::{EphemerisError, EphemerisProvider, HouseFrame, HouseSystem};
use crate::houses::HouseCusps;
use crate::points::{Point, PointId, PointSelection};
use crate::time::TimeContext;
use log::{debug, error, info, warn};
use std::collections::BTreeMap;

/// Chart computation over a borrowed ephemeris backend
pub struct ChartAssembler<'a, E: EphemerisProvider + ?Sized> {
    ephemeris: &'a E,
    calculator: AspectCalculator,
}

impl<'a, E: EphemerisProvider + ?Sized> ChartAssembler<'a, E> {
    pub fn new(ephemeris: &'a E) -> Self {
        Self {
            ephemeris,
            calculator: AspectCalculator::new(),
        }
    }

    /// Compute the chart described by `request`
    pub fn compute(&self, request: &ChartRequest) -> Result<ChartResult, ChartError> {
        let selection = PointSelection::from_names(&request.points)?;
        self.compute_selection(request, &selection)
    }

    /// Compute with an already resolved selection
    pub fn compute_selection(
        &self,
        request: &ChartRequest,
        selection: &PointSelection,
    ) -> Result<ChartResult, ChartError> {
        let time = request.time;
        debug!(
            "Computing chart at JD {} ({}, {}) with {} houses",
            time.jd_ut, request.latitude, request.longitude, request.house_system
        );

        let frame = self
            .ephemeris
            .houses(
                time.jd_tt,
                request.latitude,
                request.longitude,
                request.house_system,
            )
            .map_err(|e| {
                error!("House calculation failed: {}", e);
                ChartError::from(e)
            })?;
        let cusps = HouseCusps::from(frame.cusps);

        debug!(
            "Internal-only points: {:?}",
            selection.internal_only().collect::<Vec<_>>()
        );
        let mut calculated = self.body_positions(time, selection)?;
        add_south_node(&mut calculated, selection);
        add_angles(&mut calculated, &frame, selection);

        let mut is_day_chart = None;
        if selection.needs(PointId::PartOfFortune) {
            match PartOfFortune::from_lookup(|id| calculated.get(&id).map(|p| p.longitude)) {
                Some(pof) => {
                    calculated.insert(
                        PointId::PartOfFortune,
                        Point::new(PointId::PartOfFortune, pof.longitude, 0.0),
                    );
                    is_day_chart = Some(pof.is_day_chart);
                }
                None => warn!("Part of Fortune skipped: Sun, Moon or Ascendant missing"),
            }
        }

        // Internal-only points are dropped before aspects and placement
        let visible: Vec<Point> = calculated
            .values()
            .filter(|p| selection.is_requested(p.id))
            .copied()
            .collect();

        let aspects: Vec<Aspect> = self.calculator.compute_within(&visible);
        let points: BTreeMap<PointId, PlacedPoint> = visible
            .iter()
            .map(|p| (p.id, PlacedPoint::place(p, &cusps)))
            .collect();

        info!(
            "Chart computed: {} points, {} aspects",
            points.len(),
            aspects.len()
        );

        Ok(ChartResult {
            time,
            latitude: request.latitude,
            longitude: request.longitude,
            house_system: request.house_system,
            cusps,
            angles: ChartAngles::from(&frame),
            points,
            aspects,
            is_day_chart,
        })
    }

    /// Query every ephemeris body in the calculation set.
    ///
    /// A failed body defaults to 0° with no motion. An unavailable backend
    /// fails the chart.
    fn body_positions(
        &self,
        time: TimeContext,
        selection: &PointSelection,
    ) -> Result<BTreeMap<PointId, Point>, ChartError> {
        let mut positions = BTreeMap::new();
        for &id in selection.calculation() {
            if id.ephemeris_code().is_none() {
                continue;
            }
            let point = match self.ephemeris.position(time.jd_ut, id) {
                Ok(pos) => Point::new(id, pos.longitude, pos.speed),
                Err(e @ EphemerisError::Unavailable { .. }) => {
                    error!("Ephemeris backend unavailable: {}", e);
                    return Err(ChartError::from(e));
                }
                Err(e) => {
                    warn!("Position for {} defaulted to 0: {}", id, e);
                    Point::new(id, 0.0, 0.0)
                }
            };
            positions.insert(id, point);
        }
        Ok(positions)
    }
}

fn add_south_node(calculated: &mut BTreeMap<PointId, Point>, selection: &PointSelection) {
    if !selection.needs(PointId::SouthNode) {
        return;
    }
    if let Some(north) = calculated.get(&PointId::NorthNode).copied() {
        calculated.insert(
            PointId::SouthNode,
            Point::new(PointId::SouthNode, north.longitude + 180.0, -north.speed),
        );
    }
}

fn add_angles(
    calculated: &mut BTreeMap<PointId, Point>,
    frame: &HouseFrame,
    selection: &PointSelection,
) {
    for &id in selection.calculation() {
        if let Some(longitude) = frame.angle(id) {
            calculated.insert(id, Point::new(id, longitude, 0.0));
        }
    }
}

/// Compute a chart with the default house system
pub fn compute_chart<E, S>(
    ephemeris: &E,
    jd_ut: f64,
    jd_tt: f64,
    latitude: f64,
    longitude: f64,
    points: &[S],
) -> Result<ChartResult, ChartError>
where
    E: EphemerisProvider + ?Sized,
    S: AsRef<str>,
{
    let request = ChartRequest {
        time: TimeContext::new(jd_ut, jd_tt),
        latitude,
        longitude,
        house_system: HouseSystem::default(),
        points: points.iter().map(|s| s.as_ref().to_string()).collect(),
    };
    ChartAssembler::new(ephemeris).compute(&request)
}
