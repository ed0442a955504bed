//! Criterion micro-benchmarks for the sampled state signature.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use dycore_engine::{StateSignature, TrackedFields, DEFAULT_SIGNATURE_SEED};
use ndarray::{Array2, Array3, ShapeBuilder};

const LON: usize = 198;
const LAT: usize = 94;
const LEV: usize = 28;

struct Fields {
    u: Array3<f64>,
    v: Array3<f64>,
    t: Array3<f64>,
    p: Array3<f64>,
    ps: Array2<f64>,
}

impl Fields {
    fn new() -> Self {
        let shape = (LON, LAT, LEV).f();
        Self {
            u: Array3::from_shape_fn(shape, |(i, j, k)| (i + j + k) as f64),
            v: Array3::from_elem(shape, -1.0),
            t: Array3::from_elem(shape, 250.0),
            p: Array3::from_elem(shape, 5.0e4),
            ps: Array2::from_elem((LON, LAT).f(), 1.0e5),
        }
    }

    fn tracked(&self) -> TrackedFields<'_> {
        TrackedFields {
            eastward_wind: self.u.view(),
            northward_wind: self.v.view(),
            temperature: self.t.view(),
            pressure: self.p.view(),
            surface_pressure: self.ps.view(),
        }
    }
}

/// Benchmark: build the 1000 sample points for the reference grid.
fn bench_signature_new(c: &mut Criterion) {
    c.bench_function("signature_new_reference", |b| {
        b.iter(|| black_box(StateSignature::new(LON, LAT, LEV, DEFAULT_SIGNATURE_SEED)));
    });
}

/// Benchmark: hash the five tracked fields.
fn bench_signature_compute(c: &mut Criterion) {
    let signature = StateSignature::new(LON, LAT, LEV, DEFAULT_SIGNATURE_SEED);
    let fields = Fields::new();
    c.bench_function("signature_compute_reference", |b| {
        b.iter(|| black_box(signature.compute(&fields.tracked())));
    });
}

/// Benchmark: compare against the stored hashes when nothing changed.
fn bench_signature_unchanged(c: &mut Criterion) {
    let mut signature = StateSignature::new(LON, LAT, LEV, DEFAULT_SIGNATURE_SEED);
    let fields = Fields::new();
    signature.store(&fields.tracked());
    c.bench_function("signature_check_unchanged", |b| {
        b.iter(|| black_box(signature.check_and_update(&fields.tracked())));
    });
}

criterion_group!(
    benches,
    bench_signature_new,
    bench_signature_compute,
    bench_signature_unchanged
);
criterion_main!(benches);
