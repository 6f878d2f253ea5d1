//! Criterion benchmarks for the cascade solver and forward kinematics.
//! Targets are drawn per region so each branch of the cascade is timed.
//! Results: by default under target/criterion.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nalgebra::Vector2;
use twolink::arm::rand::{sample_target, ReplayToken, TargetCfg};
use twolink::arm::{forward, solve, solve_pretested, ArmConfig, DerivedGeometry};

fn targets(g: &DerivedGeometry, scale: f64, n: u64, seed: u64) -> Vec<Vector2<f64>> {
    let cfg = TargetCfg {
        scale,
        boundary_frac: 0.0,
    };
    (0..n)
        .map(|i| sample_target(g, cfg, ReplayToken::new(seed, i)))
        .collect()
}

fn bench_solve(c: &mut Criterion) {
    let g = DerivedGeometry::new(&ArmConfig::default()).expect("demo config is valid");
    let mut group = c.benchmark_group("solve");
    for &scale in &[0.3, 1.0, 2.0] {
        let ts = targets(&g, scale, 1024, 7);
        group.bench_with_input(BenchmarkId::new("cascade", scale), &ts, |b, ts| {
            b.iter(|| {
                for t in ts {
                    black_box(solve(&g, *t));
                }
            })
        });
        group.bench_with_input(BenchmarkId::new("pretested", scale), &ts, |b, ts| {
            b.iter(|| {
                for t in ts {
                    black_box(solve_pretested(&g, *t));
                }
            })
        });
    }
    group.finish();
}

fn bench_forward(c: &mut Criterion) {
    let g = DerivedGeometry::new(&ArmConfig::default()).expect("demo config is valid");
    let sols: Vec<_> = targets(&g, 1.0, 1024, 9)
        .into_iter()
        .map(|t| solve(&g, t))
        .collect();
    c.bench_function("forward", |b| {
        b.iter(|| {
            for s in &sols {
                black_box(forward(&g, s.a0, s.a1));
            }
        })
    });
}

criterion_group!(benches, bench_solve, bench_forward);
criterion_main!(benches);
