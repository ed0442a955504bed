//! Criterion benchmarks for full adapter steps over the recording kernel.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use dycore_bench::{perturbed_state, recording_core, reference_config, small_config};
use dycore_core::Tendencies;
use dycore_engine::assemble_tendencies;
use dycore_engine::quantities::{AIR_TEMPERATURE, TENDENCY_QUANTITIES};
use dycore_test_utils::{apply_update, ConstantTendency};

/// Benchmark: assemble the six kernel tendencies on the reference grid,
/// one supplied and five zero-filled.
fn bench_assemble_reference(c: &mut Criterion) {
    let core = recording_core(reference_config());
    let state = perturbed_state(&core, 0);
    let mut tendencies = Tendencies::new();
    let mut heating = state.get(AIR_TEMPERATURE).unwrap().zeros_like();
    heating.data_mut().fill(1.0e-5);
    tendencies.insert(AIR_TEMPERATURE.to_string(), heating);
    c.bench_function("assemble_reference", |b| {
        b.iter(|| black_box(assemble_tendencies(&TENDENCY_QUANTITIES, &state, &tendencies).unwrap()));
    });
}

/// Benchmark: steady stepping on the small grid, output fed back as input.
fn bench_advance_small(c: &mut Criterion) {
    let mut core = recording_core(small_config());
    let mut state = perturbed_state(&core, 1);
    c.bench_function("advance_small_steady", |b| {
        b.iter(|| {
            let (_, update) = core.advance(&state).unwrap();
            apply_update(&mut state, &update);
            black_box(core.last_metrics().total_us);
        });
    });
}

/// Benchmark: steady stepping on the reference grid with constant physics.
fn bench_advance_reference_with_physics(c: &mut Criterion) {
    let core = recording_core(reference_config());
    let mut state = perturbed_state(&core, 2);
    let heating = ConstantTendency::uniform("heating", &state, AIR_TEMPERATURE, 1.0e-5);
    let mut core = core.with_physics(heating);
    c.bench_function("advance_reference_physics", |b| {
        b.iter(|| {
            let (_, update) = core.advance(&state).unwrap();
            apply_update(&mut state, &update);
            black_box(core.step_count());
        });
    });
}

/// Benchmark: every step sees an externally edited state and resynchronizes.
fn bench_advance_resync(c: &mut Criterion) {
    let mut core = recording_core(small_config());
    let states = [perturbed_state(&core, 3), perturbed_state(&core, 4)];
    let mut which = 0;
    c.bench_function("advance_small_resync", |b| {
        b.iter(|| {
            which ^= 1;
            let (_, update) = core.advance(&states[which]).unwrap();
            black_box(update);
        });
    });
}

criterion_group!(
    benches,
    bench_assemble_reference,
    bench_advance_small,
    bench_advance_reference_with_physics,
    bench_advance_resync
);
criterion_main!(benches);
