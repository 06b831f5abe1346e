use approx::assert_abs_diff_eq;
use horoscope::aspects::{angular_separation, AspectKind};
use horoscope::chart::{compute_chart, ChartResult};
use horoscope::composer::{composite_chart, house_overlay, interchart_aspects, ChartComparison};
use horoscope::ephemeris::{HouseFrame, StaticEphemeris};
use horoscope::points::{PointId, ResolveError};

const JD: f64 = 2_451_545.0;

fn equal_frame(ascendant: f64, midheaven: f64, vertex: f64) -> HouseFrame {
    let mut cusps = [0.0; 12];
    for (i, cusp) in cusps.iter_mut().enumerate() {
        *cusp = (ascendant + i as f64 * 30.0) % 360.0;
    }
    HouseFrame {
        cusps,
        ascendant,
        midheaven,
        vertex,
    }
}

const NAMES: [&str; 6] = ["Sun", "Moon", "Venus", "Ascendant", "Descendant", "Midheaven"];

/// Cusps from 10°, Sun 100°, Moon 300°, Venus 50°
fn chart_a() -> ChartResult {
    let eph = StaticEphemeris::new(equal_frame(10.0, 280.0, 190.0))
        .with_position(PointId::Sun, 100.0, 1.0)
        .with_position(PointId::Moon, 300.0, 13.0)
        .with_position(PointId::Venus, 50.0, -0.6);
    compute_chart(&eph, JD, JD, 40.0, -77.0, &NAMES).unwrap()
}

/// Cusps from 350°, Sun 225°, Venus 62°, no Moon requested
fn chart_b() -> ChartResult {
    let eph = StaticEphemeris::new(equal_frame(350.0, 260.0, 170.0))
        .with_position(PointId::Sun, 225.0, 1.0)
        .with_position(PointId::Venus, 62.0, 1.1);
    compute_chart(
        &eph,
        JD + 3000.0,
        JD + 3000.0,
        50.0,
        -73.0,
        &["Sun", "Venus", "Ascendant", "Descendant", "Midheaven"],
    )
    .unwrap()
}

#[test]
fn test_interchart_aspects_cross_pairs_only() {
    let a = chart_a();
    let b = chart_b();
    let aspects = interchart_aspects(&a, &b);

    // Sun 100 / Sun 225: trine, orb 5
    let sun_trine = aspects
        .iter()
        .find(|x| x.from == PointId::Sun && x.to == PointId::Sun)
        .unwrap();
    assert_eq!(sun_trine.kind, AspectKind::Trine);
    assert_abs_diff_eq!(sun_trine.orb, 5.0, epsilon = 1e-9);

    // Every aspect runs from chart A to chart B
    for aspect in &aspects {
        assert!(a.points.contains_key(&aspect.from));
        assert!(b.points.contains_key(&aspect.to));
    }
    // A's Moon has no partner in B
    assert!(!aspects.iter().any(|x| x.to == PointId::Moon));
}

#[test]
fn test_interchart_keeps_structurally_opposite_names() {
    // A: North Node 10°, Ascendant 10°. B: North Node 192° (South Node 12°),
    // Ascendant 10° (Descendant 190°).
    let eph_a = StaticEphemeris::new(equal_frame(10.0, 280.0, 190.0))
        .with_position(PointId::NorthNode, 10.0, -0.05);
    let eph_b = StaticEphemeris::new(equal_frame(10.0, 280.0, 190.0))
        .with_position(PointId::NorthNode, 192.0, -0.05);
    let a = compute_chart(&eph_a, JD, JD, 0.0, 0.0, &["North Node", "Ascendant"]).unwrap();
    let b = compute_chart(&eph_b, JD, JD, 0.0, 0.0, &["South Node", "Descendant"]).unwrap();

    let aspects = interchart_aspects(&a, &b);

    let nodes = aspects
        .iter()
        .find(|x| x.from == PointId::NorthNode && x.to == PointId::SouthNode)
        .unwrap();
    assert_eq!(nodes.kind, AspectKind::Conjunction);
    assert_abs_diff_eq!(nodes.orb, 2.0, epsilon = 1e-9);

    let angles = aspects
        .iter()
        .find(|x| x.from == PointId::Ascendant && x.to == PointId::Descendant)
        .unwrap();
    assert_eq!(angles.kind, AspectKind::Opposition);
    assert!(angles.orb < 1e-9);

    assert_eq!(ChartComparison::between(&a, &b).aspects, aspects);
}

#[test]
fn test_house_overlay_uses_foreign_cusps() {
    let a = chart_a();
    let b = chart_b();

    let a_in_b = house_overlay(&a.point_list(), &b.cusps);
    let sun = a_in_b.iter().find(|o| o.point == PointId::Sun).unwrap();
    // B's cusps: 350, 20, 50, 80, 110 ... Sun 100 sits in house 4
    assert_eq!(sun.house, 4);
    assert_abs_diff_eq!(sun.degree_in_house, 20.0, epsilon = 1e-9);

    let venus = a_in_b.iter().find(|o| o.point == PointId::Venus).unwrap();
    assert!(venus.retrograde);
}

#[test]
fn test_comparison_covers_both_directions() {
    let a = chart_a();
    let b = chart_b();
    let comparison = ChartComparison::between(&a, &b);

    assert_eq!(comparison.a_in_b.len(), a.points.len());
    assert_eq!(comparison.b_in_a.len(), b.points.len());
    assert_eq!(comparison.aspects, interchart_aspects(&a, &b));

    // B's Sun 225 in A's houses (10, 40, ... 190, 220): house 8
    let sun = comparison
        .b_in_a
        .iter()
        .find(|o| o.point == PointId::Sun)
        .unwrap();
    assert_eq!(sun.house, 8);
    assert_abs_diff_eq!(sun.degree_in_house, 5.0, epsilon = 1e-9);
}

#[test]
fn test_composite_cusps_are_circular_midpoints() {
    let composite = composite_chart(&chart_a(), &chart_b(), &NAMES).unwrap();

    // 10 and 350 meet at 0, not 180
    let first = composite.cusps.cusp(1).unwrap();
    assert!(angular_separation(first, 0.0) < 1e-9);
    for (house, cusp) in composite.cusps.iter() {
        let expected = (house as f64 - 1.0) * 30.0;
        assert!(angular_separation(cusp, expected) < 1e-9, "house {}", house);
    }
}

#[test]
fn test_composite_angles_are_midpointed_independently() {
    let composite = composite_chart(&chart_a(), &chart_b(), &NAMES).unwrap();

    let asc = composite.point(PointId::Ascendant).unwrap();
    let desc = composite.point(PointId::Descendant).unwrap();
    let mc = composite.point(PointId::Midheaven).unwrap();
    assert!(angular_separation(asc.longitude, 0.0) < 1e-9);
    assert!(angular_separation(desc.longitude, 180.0) < 1e-9);
    assert_abs_diff_eq!(mc.longitude, 270.0, epsilon = 1e-9);
    assert_abs_diff_eq!(composite.angles.vertex, 180.0, epsilon = 1e-9);
}

#[test]
fn test_composite_points_need_both_charts() {
    let composite = composite_chart(&chart_a(), &chart_b(), &NAMES).unwrap();

    // Moon only exists in chart A
    assert!(composite.point(PointId::Moon).is_none());

    let sun = composite.point(PointId::Sun).unwrap();
    assert_abs_diff_eq!(sun.longitude, 162.5, epsilon = 1e-9);
    assert_eq!(sun.speed, 0.0);
    assert!(!sun.retrograde);
    // composite cusps from 0°: 162.5 is 12.5° into house 6
    assert_eq!(sun.house, 6);

    // Venus 50 (retrograde in A) and 62: midpoint 56, never retrograde
    let venus = composite.point(PointId::Venus).unwrap();
    assert_abs_diff_eq!(venus.longitude, 56.0, epsilon = 1e-9);
    assert!(!venus.retrograde);
}

#[test]
fn test_composite_location_and_aspects() {
    let composite = composite_chart(&chart_a(), &chart_b(), &NAMES).unwrap();

    assert_abs_diff_eq!(composite.latitude, 45.0, epsilon = 1e-9);
    assert_abs_diff_eq!(composite.longitude, -75.0, epsilon = 1e-9);

    // Aspects come from composite positions only
    for aspect in &composite.aspects {
        assert!(composite.points.contains_key(&aspect.from));
        assert!(composite.points.contains_key(&aspect.to));
    }
    // Sun 162.5 / Venus 56: 106.5°, nothing
    assert!(!composite
        .aspects
        .iter()
        .any(|x| x.involves(PointId::Sun, PointId::Venus)));
    // Asc 0 / Venus 56: sextile, orb 4
    assert!(composite
        .aspects
        .iter()
        .any(|x| x.involves(PointId::Ascendant, PointId::Venus) && x.kind == AspectKind::Sextile));
    assert!(!composite
        .aspects
        .iter()
        .any(|x| x.involves(PointId::Ascendant, PointId::Descendant)));
}

#[test]
fn test_composite_rejects_unknown_names() {
    let err = composite_chart(&chart_a(), &chart_b(), &["Sun", "Vulcan"]).unwrap_err();
    assert!(matches!(err, ResolveError::UnknownPoint(_)));
}
