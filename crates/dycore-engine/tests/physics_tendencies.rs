//! Integration test: contained physics tendencies reach the kernel in
//! kernel variables and are integrated.

use std::time::Duration;

use dycore_core::LabeledArray;
use dycore_engine::quantities::{
    AIR_TEMPERATURE, EASTWARD_WIND, SPECIFIC_HUMIDITY, SURFACE_AIR_PRESSURE,
};
use dycore_engine::{DycoreConfig, DynamicalCore, StepError};
use dycore_physics::{PhysicsError, PhysicsPipeline, UpdateThrottle};
use dycore_test_utils::{
    apply_update, fill_quantity, ConstantTendency, CountingPrognostic, FailingPrognostic,
    RecordingKernel,
};

const DT: f64 = 1200.0;

fn config() -> DycoreConfig {
    DycoreConfig {
        latitude_count: 8,
        longitude_count: 16,
        time_step_seconds: DT,
        ..Default::default()
    }
}

#[test]
fn no_physics_means_zero_tendencies() {
    let kernel = RecordingKernel::new();
    let log = kernel.log();
    let mut core = DynamicalCore::new(config(), Box::new(kernel)).unwrap();
    let state = core.initial_state().unwrap();
    let (_, out) = core.advance(&state).unwrap();

    let log = log.lock();
    let tend = log.tendencies.as_ref().unwrap();
    assert!(tend.u.iter().all(|&v| v == 0.0));
    assert!(tend.virtual_temperature.iter().all(|&v| v == 0.0));
    assert!(tend.tracers.iter().all(|&v| v == 0.0));
    assert_eq!(out.get(AIR_TEMPERATURE), state.get(AIR_TEMPERATURE));
}

#[test]
fn dry_temperature_tendency_is_integrated() {
    let mut core = DynamicalCore::new(config(), Box::new(RecordingKernel::new())).unwrap();
    let state = core.initial_state().unwrap();
    let heating = ConstantTendency::uniform("heating", &state, AIR_TEMPERATURE, 1.0e-4);
    core.set_physics(Some(Box::new(heating)));

    let (_, out) = core.advance(&state).unwrap();
    let t = out.get(AIR_TEMPERATURE).unwrap();
    for &v in t.data().iter() {
        assert!((v - (250.0 + DT * 1.0e-4)).abs() < 1e-9);
    }
    assert_eq!(t.units(), "degK");
    assert_eq!(t.dims(), state.get(AIR_TEMPERATURE).unwrap().dims());
}

#[test]
fn moist_tendencies_use_virtual_temperature() {
    let kernel = RecordingKernel::new();
    let log = kernel.log();
    let core = DynamicalCore::new(config(), Box::new(kernel)).unwrap();
    let fvirt = core.constants().fvirt();
    let mut state = core.initial_state().unwrap();
    fill_quantity(&mut state, SPECIFIC_HUMIDITY, 0.01);

    let physics = PhysicsPipeline::new()
        .with(ConstantTendency::uniform("t", &state, AIR_TEMPERATURE, 2.0e-4))
        .with(ConstantTendency::uniform("q", &state, SPECIFIC_HUMIDITY, 1.0e-8));
    let mut core = core.with_physics(physics);
    core.advance(&state).unwrap();

    let log = log.lock();
    let tv = 250.0 * (1.0 + fvirt * 0.01);
    let expected = 2.0e-4 * (1.0 + fvirt * 0.01) + fvirt * tv * 1.0e-8;
    let pushed = &log.tendencies.as_ref().unwrap().virtual_temperature;
    assert!(pushed.iter().all(|&v| (v - expected).abs() < 1e-15));

    let grid = log.pushed_grid.as_ref().unwrap();
    assert!(grid
        .virtual_temperature
        .iter()
        .all(|&v| (v - tv).abs() < 1e-9));
}

#[test]
fn surface_pressure_tendency_becomes_log_tendency() {
    let kernel = RecordingKernel::new();
    let log = kernel.log();
    let mut core = DynamicalCore::new(config(), Box::new(kernel)).unwrap();
    let state = core.initial_state().unwrap();
    core.set_physics(Some(Box::new(ConstantTendency::uniform(
        "ps",
        &state,
        SURFACE_AIR_PRESSURE,
        -0.01,
    ))));

    let (_, out) = core.advance(&state).unwrap();
    {
        let log = log.lock();
        let pushed = &log.tendencies.as_ref().unwrap().log_surface_pressure;
        assert!(pushed.iter().all(|&v| (v - (-0.01 / 1.0e5)).abs() < 1e-18));
    }
    let ps = out.get(SURFACE_AIR_PRESSURE).unwrap();
    let expected = (1.0e5f64.ln() - DT * 0.01 / 1.0e5).exp();
    assert!(ps.data().iter().all(|&v| (v - expected).abs() < 1e-6));
}

#[test]
fn physics_sees_original_state() {
    let mut core = DynamicalCore::new(config(), Box::new(RecordingKernel::new())).unwrap();
    let counter = CountingPrognostic::new("count");
    let calls = counter.counter();
    core.set_physics(Some(Box::new(counter)));
    let mut state = core.initial_state().unwrap();
    for _ in 0..3 {
        let (_, update) = core.advance(&state).unwrap();
        apply_update(&mut state, &update);
    }
    assert_eq!(calls.load(std::sync::atomic::Ordering::Relaxed), 3);
}

#[test]
fn physics_failure_aborts_step() {
    let mut core = DynamicalCore::new(config(), Box::new(RecordingKernel::new())).unwrap()
        .with_physics(FailingPrognostic::new("radiation", 1));
    let state = core.initial_state().unwrap();
    core.advance(&state).unwrap();
    match core.advance(&state) {
        Err(StepError::Physics(PhysicsError::Failed { name, .. })) => assert_eq!(name, "radiation"),
        other => panic!("expected physics failure, got {other:?}"),
    }
    assert_eq!(core.step_count(), 1);
}

#[test]
fn physics_diagnostics_are_not_returned() {
    let mut core = DynamicalCore::new(config(), Box::new(RecordingKernel::new())).unwrap();
    let state = core.initial_state().unwrap();
    let diag = LabeledArray::zeros(&[16, 8], ["longitude", "latitude"], "W m^-2").unwrap();
    core.set_physics(Some(Box::new(
        ConstantTendency::new("radiation").with_diagnostic("upwelling_longwave_flux", diag),
    )));
    let (diagnostics, out) = core.advance(&state).unwrap();
    assert!(diagnostics.is_empty());
    assert!(!out.contains("upwelling_longwave_flux"));
}

#[test]
fn mis_shaped_tendency_is_rejected() {
    let mut core = DynamicalCore::new(config(), Box::new(RecordingKernel::new())).unwrap();
    let state = core.initial_state().unwrap();
    let wrong = LabeledArray::zeros(&[16, 8], ["longitude", "latitude"], "m s^-2").unwrap();
    core.set_physics(Some(Box::new(
        ConstantTendency::new("bad").with_tendency(EASTWARD_WIND, wrong),
    )));
    assert!(matches!(
        core.advance(&state),
        Err(StepError::Assembly(dycore_engine::AssemblyError::ShapeMismatch { .. }))
    ));
}

#[test]
fn throttled_physics_reuses_cached_tendencies() {
    let mut core = DynamicalCore::new(config(), Box::new(RecordingKernel::new())).unwrap();
    let mut state = core.initial_state().unwrap();
    let counter = CountingPrognostic::new("slow");
    let calls = counter.counter();
    core.set_physics(Some(Box::new(UpdateThrottle::new(
        counter,
        Duration::from_secs(3600),
    ))));

    for step in 0..4u64 {
        state.set_time(Some(Duration::from_secs(step * 1200)));
        let (_, update) = core.advance(&state).unwrap();
        apply_update(&mut state, &update);
    }
    // Recomputed at t = 0 s and t = 3600 s only.
    assert_eq!(calls.load(std::sync::atomic::Ordering::Relaxed), 2);
}
