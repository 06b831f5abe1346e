use horoscope::ephemeris::{
    EphemerisError, EphemerisProvider, HouseFrame, HouseSystem, StaticEphemeris,
};
use horoscope::points::PointId;

fn frame() -> HouseFrame {
    HouseFrame {
        cusps: [
            15.0, 42.0, 70.0, 101.0, 133.0, 164.0, 195.0, 222.0, 250.0, 281.0, 313.0, 344.0,
        ],
        ascendant: 15.0,
        midheaven: 281.0,
        vertex: 170.0,
    }
}

#[test]
fn test_static_ephemeris_positions() {
    let eph = StaticEphemeris::new(frame()).with_position(PointId::Sun, 370.0, 0.98);

    let sun = eph.position(2_451_545.0, PointId::Sun).unwrap();
    assert!((sun.longitude - 10.0).abs() < 1e-9);
    assert_eq!(sun.speed, 0.98);

    // Unrecorded bodies fail individually
    let err = eph.position(2_451_545.0, PointId::Eros).unwrap_err();
    assert!(matches!(err, EphemerisError::CalculationFailed { point: PointId::Eros, .. }));
}

#[test]
fn test_static_ephemeris_houses_ignore_place() {
    let eph = StaticEphemeris::new(frame());
    let a = eph.houses(2_451_545.0, 10.0, 20.0, HouseSystem::Placidus).unwrap();
    let b = eph.houses(2_460_000.0, -33.9, 151.2, HouseSystem::Koch).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.angle(PointId::Descendant), Some(195.0));
}

#[test]
fn test_provider_through_reference() {
    fn longitude_of<E: EphemerisProvider>(eph: E, point: PointId) -> f64 {
        eph.position(0.0, point).map(|p| p.longitude).unwrap_or(-1.0)
    }
    let eph = StaticEphemeris::new(frame()).with_position(PointId::Moon, 222.0, 13.0);
    assert_eq!(longitude_of(&eph, PointId::Moon), 222.0);
    assert_eq!(longitude_of(&eph, PointId::Mars), -1.0);
}

#[test]
fn test_unavailable_backend() {
    let eph = StaticEphemeris::new(frame())
        .with_position(PointId::Sun, 10.0, 1.0)
        .unavailable();
    assert!(matches!(
        eph.position(0.0, PointId::Sun),
        Err(EphemerisError::Unavailable { .. })
    ));
    assert!(eph.houses(0.0, 0.0, 0.0, HouseSystem::Placidus).is_err());
}

#[cfg(feature = "swisseph")]
#[test]
fn test_swiss_adapter_uses_configured_path() {
    use horoscope::config::{EngineSettings, EPHEMERIS_PATH_ENV};
    use horoscope::ephemeris::SwissEphemerisAdapter;

    // The environment override would win over the settings below
    if std::env::var_os(EPHEMERIS_PATH_ENV).is_some() {
        return;
    }

    let dir = std::env::temp_dir();
    let settings = EngineSettings {
        ephemeris_path: Some(dir.clone()),
        ..EngineSettings::default()
    };
    assert_eq!(settings.resolved_ephemeris_path(), Some(dir.clone()));
    let adapter = SwissEphemerisAdapter::from_settings(&settings).unwrap();
    assert_eq!(adapter.ephemeris_path(), dir.as_path());

    let missing = EngineSettings {
        ephemeris_path: Some(dir.join("no-such-ephemeris-dir")),
        ..EngineSettings::default()
    };
    assert!(matches!(
        SwissEphemerisAdapter::from_settings(&missing),
        Err(EphemerisError::FileNotFound { .. })
    ));
}

#[cfg(feature = "swisseph")]
#[test]
#[ignore] // Requires Swiss Ephemeris files
fn test_swiss_adapter_chart() {
    use horoscope::chart::compute_chart;
    use horoscope::ephemeris::SwissEphemerisAdapter;

    let adapter = SwissEphemerisAdapter::new(None).unwrap();
    let chart = compute_chart(
        &adapter,
        2_451_545.0,
        2_451_545.00074,
        40.7128,
        -74.0060,
        &["Sun", "Moon", "Ascendant", "Part of Fortune"],
    )
    .unwrap();

    assert_eq!(chart.points.len(), 4);
    assert_eq!(chart.cusps.len(), 12);
    // Sun near 280° at J2000
    let sun = chart.point(PointId::Sun).unwrap();
    assert!((sun.longitude - 280.4).abs() < 1.0);
}
