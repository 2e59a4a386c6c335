//! Criterion benchmarks for window computation and chart compilation.
//! Focus sizes: registry of m entities, m in {0, 100, 1000}.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use geoscript::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_session(m: usize, seed: u64) -> Session {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut s = Session::default();
    for _ in 0..m {
        let at = Ref::xy(rng.gen_range(-100.0..100.0), rng.gen_range(-100.0..100.0));
        if rng.gen_bool(0.5) {
            s.point(&at, None).unwrap();
        } else {
            s.circle(&at, &CircleSpec::Radius(rng.gen_range(0.5..10.0)), None)
                .unwrap();
        }
    }
    s
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    for &m in &[0usize, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("window", m), &m, |b, &m| {
            let s = random_session(m, 44);
            let cfg = s.cfg().clone();
            b.iter(|| {
                geoscript::render::window(s.registry(), cfg.padding, cfg.default_view, None, None)
            })
        });
        group.bench_with_input(BenchmarkId::new("render", m), &m, |b, &m| {
            b.iter_batched(
                || random_session(m, 45),
                |s| {
                    let chart = s.render(None);
                    criterion::black_box(chart.series.len());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_layout);
criterion_main!(benches);
