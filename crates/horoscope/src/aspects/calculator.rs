use crate::aspects::types::{Aspect, AspectCore, AspectKind, MotionPhase, ASPECT_TABLE};
use crate::points::Point;
use crate::zodiac::normalize_degrees;
use std::cmp::Ordering;

/// Look-ahead used to classify applying/separating: one hour, in days
const MOTION_STEP_DAYS: f64 = 1.0 / 24.0;

/// Deviation changes smaller than this count as no change
const MOTION_EPSILON: f64 = 1e-9;

/// Aspect calculator
#[derive(Debug, Clone, Copy)]
pub struct AspectCalculator;

impl AspectCalculator {
    /// Create a new aspect calculator
    pub fn new() -> Self {
        Self
    }

    /// Detect the aspect between two points, if any.
    ///
    /// No pair is excluded here; `compute_within` drops the pairs that are
    /// opposite by construction inside one chart.
    pub fn detect(&self, p1: &Point, p2: &Point) -> Option<Aspect> {
        let track_motion = (p1.id.is_moving() || p2.id.is_moving())
            && !(p1.id.is_fixed() && p2.id.is_fixed());

        self.calculate_aspect(p1.longitude, p2.longitude, p1.speed, p2.speed, track_motion)
            .map(|core| Aspect::new(p1.id, p2.id, core))
    }

    /// Calculate the aspect between two longitudes.
    ///
    /// Kinds are tried in ascending exact-angle order and the first one
    /// within orb wins, even if a later kind would fit more tightly.
    pub fn calculate_aspect(
        &self,
        lon1: f64,
        lon2: f64,
        speed1: f64,
        speed2: f64,
        track_motion: bool,
    ) -> Option<AspectCore> {
        let separation = angular_separation(lon1, lon2);

        let kind = candidate_kinds(separation).next()?;
        let exact_angle = kind.exact_angle();

        let deviation = (separation - exact_angle).abs();
        let phase = if track_motion {
            Some(self.motion_phase(lon1, lon2, speed1, speed2, exact_angle, deviation))
        } else {
            None
        };

        Some(AspectCore {
            kind,
            orb: deviation,
            phase,
        })
    }

    /// Project both points forward one hour and compare the deviation
    /// from exact.
    fn motion_phase(
        &self,
        lon1: f64,
        lon2: f64,
        speed1: f64,
        speed2: f64,
        exact_angle: f64,
        current_deviation: f64,
    ) -> MotionPhase {
        let next1 = normalize_degrees(lon1 + speed1 * MOTION_STEP_DAYS);
        let next2 = normalize_degrees(lon2 + speed2 * MOTION_STEP_DAYS);
        let next_deviation = (angular_separation(next1, next2) - exact_angle).abs();

        if next_deviation > current_deviation + MOTION_EPSILON {
            MotionPhase::Separating
        } else {
            // shrinking, or unchanged within epsilon
            MotionPhase::Applying
        }
    }

    /// All aspects among one set of points (each unordered pair once).
    ///
    /// Ascendant/Descendant, Midheaven/Imum Coeli and North/South Node are
    /// opposite by construction within a chart and are skipped.
    pub fn compute_within(&self, points: &[Point]) -> Vec<Aspect> {
        let mut aspects = Vec::new();
        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                if points[i].id.is_structural_opposite(points[j].id) {
                    continue;
                }
                if let Some(aspect) = self.detect(&points[i], &points[j]) {
                    aspects.push(aspect);
                }
            }
        }
        sort_aspects(&mut aspects);
        aspects
    }

    /// All aspects from each point of `a` to each point of `b`.
    ///
    /// Same-named points and structurally opposite names are paired like
    /// any other: across two charts their longitudes are independent.
    pub fn compute_between(&self, a: &[Point], b: &[Point]) -> Vec<Aspect> {
        let mut aspects = Vec::new();
        for p1 in a {
            for p2 in b {
                if let Some(aspect) = self.detect(p1, p2) {
                    aspects.push(aspect);
                }
            }
        }
        sort_aspects(&mut aspects);
        aspects
    }
}

impl Default for AspectCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Smallest angle between two longitudes, in [0, 180]
pub fn angular_separation(lon1: f64, lon2: f64) -> f64 {
    let raw = (lon1 - lon2).abs().rem_euclid(360.0);
    raw.min(360.0 - raw)
}

/// Order by exact angle, then by orb; stable for ties.
pub fn sort_aspects(aspects: &mut [Aspect]) {
    aspects.sort_by(|a, b| {
        a.kind
            .exact_angle()
            .partial_cmp(&b.kind.exact_angle())
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.orb.partial_cmp(&b.orb).unwrap_or(Ordering::Equal))
    });
}

/// Kinds whose orb window contains the given separation, in table order
pub fn candidate_kinds(separation: f64) -> impl Iterator<Item = AspectKind> {
    ASPECT_TABLE
        .iter()
        .filter(move |(_, angle, orb)| (separation - angle).abs() <= *orb)
        .map(|&(kind, _, _)| kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::points::PointId;

    #[test]
    fn test_separation_wraps() {
        assert!((angular_separation(350.0, 10.0) - 20.0).abs() < 1e-9);
        assert!((angular_separation(10.0, 350.0) - 20.0).abs() < 1e-9);
        assert!((angular_separation(0.0, 180.0) - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_gap_between_windows_is_no_aspect() {
        let calc = AspectCalculator::new();
        let core = calc.calculate_aspect(0.0, 42.5, 0.0, 0.0, false).unwrap();
        assert_eq!(core.kind, AspectKind::Semisquare);
        assert!((core.orb - 2.5).abs() < 1e-9);

        // 5° past sesquiquadrate, 4° short of biquintile
        assert!(calc.calculate_aspect(0.0, 140.0, 0.0, 0.0, false).is_none());
    }

    #[test]
    fn test_overlapping_windows_report_first_kind() {
        // biquintile (144 +/- 2.5) and quincunx (150 +/- 4) overlap on 146..146.5
        let kinds: Vec<_> = candidate_kinds(146.2).collect();
        assert_eq!(kinds, vec![AspectKind::Biquintile, AspectKind::Quincunx]);

        let calc = AspectCalculator::new();
        let core = calc.calculate_aspect(10.0, 156.2, 0.0, 0.0, false).unwrap();
        assert_eq!(core.kind, AspectKind::Biquintile);
    }

    #[test]
    fn test_fixed_pair_has_no_phase() {
        let calc = AspectCalculator::new();
        let asc = Point::new(PointId::Ascendant, 10.0, 0.0);
        let mc = Point::new(PointId::Midheaven, 100.0, 0.0);
        let aspect = calc.detect(&asc, &mc).unwrap();
        assert_eq!(aspect.kind, AspectKind::Square);
        assert_eq!(aspect.phase, None);
    }

    #[test]
    fn test_moon_approaching_sun_is_applying() {
        let calc = AspectCalculator::new();
        let sun = Point::new(PointId::Sun, 100.0, 1.0);
        let moon = Point::new(PointId::Moon, 95.0, 13.0);
        let aspect = calc.detect(&sun, &moon).unwrap();
        assert_eq!(aspect.kind, AspectKind::Conjunction);
        assert_eq!(aspect.phase, Some(MotionPhase::Applying));
    }

    #[test]
    fn test_moon_leaving_sun_is_separating() {
        let calc = AspectCalculator::new();
        let sun = Point::new(PointId::Sun, 100.0, 1.0);
        let moon = Point::new(PointId::Moon, 105.0, 13.0);
        let aspect = calc.detect(&sun, &moon).unwrap();
        assert_eq!(aspect.phase, Some(MotionPhase::Separating));
    }

    #[test]
    fn test_no_relative_motion_counts_as_applying() {
        let calc = AspectCalculator::new();
        let sun = Point::new(PointId::Sun, 100.0, 1.0);
        let venus = Point::new(PointId::Venus, 160.0, 1.0);
        let aspect = calc.detect(&sun, &venus).unwrap();
        assert_eq!(aspect.kind, AspectKind::Sextile);
        assert_eq!(aspect.phase, Some(MotionPhase::Applying));
    }

    #[test]
    fn test_node_pair_skipped_within_one_chart() {
        let calc = AspectCalculator::new();
        let north = Point::new(PointId::NorthNode, 40.0, -0.05);
        let south = Point::new(PointId::SouthNode, 220.0, 0.05);
        assert!(calc.compute_within(&[north, south]).is_empty());
    }

    #[test]
    fn test_node_pair_kept_across_charts() {
        let calc = AspectCalculator::new();
        let north = Point::new(PointId::NorthNode, 10.0, -0.05);
        let south = Point::new(PointId::SouthNode, 12.0, 0.05);
        let aspects = calc.compute_between(&[north], &[south]);
        assert_eq!(aspects.len(), 1);
        assert_eq!(aspects[0].kind, AspectKind::Conjunction);
        assert!((aspects[0].orb - 2.0).abs() < 1e-9);
    }
}
