use criterion::{black_box, criterion_group, criterion_main, Criterion};
use horoscope::chart::{ChartAssembler, ChartRequest};
use horoscope::composer::{composite_chart, ChartComparison};
use horoscope::ephemeris::{HouseFrame, StaticEphemeris};
use horoscope::points::PointId;
use horoscope::time::TimeContext;

fn ephemeris(offset: f64) -> StaticEphemeris {
    let mut cusps = [0.0; 12];
    for (i, cusp) in cusps.iter_mut().enumerate() {
        *cusp = (offset + i as f64 * 30.0) % 360.0;
    }
    let frame = HouseFrame {
        cusps,
        ascendant: offset,
        midheaven: (offset + 270.0) % 360.0,
        vertex: (offset + 180.0) % 360.0,
    };
    PointId::ALL
        .iter()
        .filter(|p| p.ephemeris_code().is_some())
        .enumerate()
        .fold(StaticEphemeris::new(frame), |eph, (i, &id)| {
            eph.with_position(id, offset + i as f64 * 23.0, 1.0 - i as f64 * 0.07)
        })
}

fn request() -> ChartRequest {
    let names: Vec<&str> = PointId::ALL.iter().map(|p| p.name()).collect();
    ChartRequest::new(TimeContext::new(2_451_545.0, 2_451_545.0007), 51.5, -0.1, names)
}

fn bench_compute_chart(c: &mut Criterion) {
    let eph = ephemeris(0.0);
    let assembler = ChartAssembler::new(&eph);
    let request = request();

    c.bench_function("compute_chart_all_points", |b| {
        b.iter(|| assembler.compute(black_box(&request)))
    });
}

fn bench_compare_and_composite(c: &mut Criterion) {
    let (eph_a, eph_b) = (ephemeris(0.0), ephemeris(140.0));
    let request = request();
    let (Ok(a), Ok(b)) = (
        ChartAssembler::new(&eph_a).compute(&request),
        ChartAssembler::new(&eph_b).compute(&request),
    ) else {
        return;
    };

    c.bench_function("chart_comparison", |bench| {
        bench.iter(|| ChartComparison::between(black_box(&a), black_box(&b)))
    });
    c.bench_function("composite_chart", |bench| {
        bench.iter(|| {
            composite_chart(
                black_box(&a),
                black_box(&b),
                black_box(request.points.as_slice()),
            )
        })
    });
}

criterion_group!(benches, bench_compute_chart, bench_compare_and_composite);
criterion_main!(benches);
