//! Benchmarks for curve evaluation and bootstrapping.
//!
//! Run with: cargo bench -p pillar-curves

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use pillar_core::{Frequency, Instrument};
use pillar_curves::bootstrap::{RootMethod, SequentialBootstrapper};
use pillar_curves::{present, Curve, PwFlatCurve};

fn semiannual_curve(pillars: u32) -> PwFlatCurve {
    let times = (1..=pillars).map(|i| f64::from(i) * 0.5).collect();
    let forwards = (0..pillars).map(|i| 0.02 + 0.0005 * f64::from(i)).collect();
    PwFlatCurve::from_pillars(times, forwards).unwrap()
}

fn bond_strip(curve: &PwFlatCurve) -> (Vec<Instrument>, Vec<f64>) {
    let instruments: Vec<Instrument> = curve
        .times()
        .iter()
        .map(|&t| Instrument::fixed_coupon_bond(t, 0.04, Frequency::SemiAnnual).unwrap())
        .collect();
    let prices = instruments
        .iter()
        .map(|inst| present(inst, curve).unwrap())
        .collect();
    (instruments, prices)
}

fn bench_discount(c: &mut Criterion) {
    let curve = semiannual_curve(60);

    c.bench_function("discount_30y_curve", |b| {
        b.iter(|| curve.discount(black_box(17.3)).unwrap())
    });
}

fn bench_bootstrap(c: &mut Criterion) {
    let mut group = c.benchmark_group("bootstrap_bond_strip");
    let curve = semiannual_curve(60);
    let (instruments, prices) = bond_strip(&curve);

    for method in [RootMethod::Brent, RootMethod::Bisection, RootMethod::Hybrid] {
        let bootstrapper = SequentialBootstrapper::new().with_method(method);
        group.bench_with_input(BenchmarkId::from_parameter(method), &method, |b, _| {
            b.iter(|| {
                bootstrapper
                    .bootstrap(black_box(&instruments), black_box(&prices))
                    .unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_discount, bench_bootstrap);
criterion_main!(benches);
