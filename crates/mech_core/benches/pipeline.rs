//! Edit pipeline benchmarks for mech_core.
//!
//! Run with: `cargo bench -p mech_core`

// Benchmark binaries don't need docs on macro-generated functions
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mech_core::armor::optimize;
use mech_core::components::{ComponentId, EngineType, StructureType};
use mech_core::pipeline::{apply_edit, evaluate, Edit};
use mech_test_utils::fixtures::{armed_medium_mech, Workbench};

/// Runs pipeline benchmarks for the mech_core crate.
pub fn pipeline_benchmark(c: &mut Criterion) {
    let workbench = Workbench::new();
    let catalogs = workbench.catalogs();
    let snapshot = armed_medium_mech(&workbench);

    c.bench_function("evaluate_armed_medium", |b| {
        b.iter(|| evaluate(black_box(&snapshot), &catalogs))
    });

    let xl = Edit::SelectComponent(ComponentId::Engine(EngineType::ExtraLight));
    c.bench_function("engine_swap_with_displacement", |b| {
        b.iter(|| apply_edit(black_box(&snapshot), black_box(&xl), &catalogs))
    });

    let endo = Edit::SelectComponent(ComponentId::Structure(StructureType::EndoSteel));
    c.bench_function("endo_steel_slot_generation", |b| {
        b.iter(|| apply_edit(black_box(&snapshot), black_box(&endo), &catalogs))
    });

    c.bench_function("armor_optimize_100t", |b| {
        b.iter(|| optimize(black_box(307), black_box(100)))
    });
}

criterion_group!(benches, pipeline_benchmark);
criterion_main!(benches);
