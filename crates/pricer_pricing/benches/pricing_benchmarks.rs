//! Criterion benchmarks for path generation and payoff evaluation.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pricer_core::types::contract::OptionClass;
use pricer_models::heston::HestonParams;
use pricer_pricing::mc::{generate_heston_paths, price_with_rule, SimulationConfig};
use pricer_pricing::payoff::PayoffRule;

fn bench_simulation(c: &mut Criterion) {
    let params = HestonParams::new(0.04, 1.5, 0.04, 0.3, -0.7).expect("valid params");
    let config = SimulationConfig::builder()
        .n_paths(10_000)
        .n_steps(252)
        .seed(42)
        .build()
        .expect("valid config");

    c.bench_function("generate_paths_10k_252", |b| {
        b.iter(|| generate_heston_paths(&params, black_box(100.0), 0.05, 1.0, &config))
    });

    let batch = generate_heston_paths(&params, 100.0, 0.05, 1.0, &config);
    let rule = PayoffRule::Asian {
        strike: 100.0,
        class: OptionClass::Call,
    };
    c.bench_function("asian_payoff_10k_paths", |b| {
        b.iter(|| price_with_rule(black_box(&batch), 0.05, 1.0, &rule))
    });
}

criterion_group!(benches, bench_simulation);
criterion_main!(benches);
