//! Criterion benchmarks for the metric implementations.

use criterion::{criterion_group, criterion_main, Criterion};

use conncalc_core::metric::ConnectivityMetric;
use conncalc_core::registry::{DefaultRegistry, MetricRegistry};
use conncalc_core::settings::ConnectivitySettings;
use conncalc_core::ConnectivityMethod;

fn bench_settings(channels: usize, samples: usize, trials: usize) -> ConnectivitySettings {
    let mut builder = ConnectivitySettings::builder().sampling_freq(256.0);
    for t in 0..trials {
        let rows = (0..channels)
            .map(|ch| {
                (0..samples)
                    .map(|n| {
                        let phase = (ch * 7 + t * 13) as f64 * 0.1;
                        (2.0 * std::f64::consts::PI * 10.0 * n as f64 / 256.0 + phase).sin()
                    })
                    .collect()
            })
            .collect();
        builder = builder.trial(rows);
    }
    builder.build().expect("valid bench settings")
}

fn bench_metrics(c: &mut Criterion) {
    let registry = DefaultRegistry::new();
    let settings = bench_settings(8, 256, 4);

    for method in [
        ConnectivityMethod::Correlation,
        ConnectivityMethod::Coherence,
        ConnectivityMethod::WeightedPhaseLagIndex,
    ] {
        let metric = registry.get(method).expect("known method");
        c.bench_function(&format!("{method} 8ch x 256"), |b| {
            b.iter(|| {
                let mut snapshot = settings.clone();
                metric.compute(&mut snapshot).expect("computation succeeds")
            });
        });
    }
}

fn bench_spectra_cache(c: &mut Criterion) {
    let registry = DefaultRegistry::new();
    let metric = registry
        .get(ConnectivityMethod::PhaseLagIndex)
        .expect("known method");
    let settings = bench_settings(4, 512, 8);

    c.bench_function("PLI 4ch x 512, cold spectra", |b| {
        b.iter(|| {
            let mut snapshot = settings.clone();
            metric.compute(&mut snapshot).expect("computation succeeds")
        });
    });
}

criterion_group!(benches, bench_metrics, bench_spectra_cache);
criterion_main!(benches);
