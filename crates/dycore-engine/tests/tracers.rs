//! Integration test: tracer bundle slot order and extra tracers.

use dycore_engine::quantities::{
    CLOUD_ICE, CLOUD_LIQUID_WATER, OZONE_MOLE_FRACTION, SPECIFIC_HUMIDITY, TRACER_BUNDLE,
};
use dycore_engine::{DycoreConfig, DynamicalCore, TracerSlot};
use dycore_core::State;
use dycore_test_utils::{fill_quantity, ConstantTendency, RecordingKernel};
use ndarray::Axis;

fn config(extra: usize) -> DycoreConfig {
    DycoreConfig {
        latitude_count: 8,
        longitude_count: 16,
        extra_tracer_count: extra,
        ..Default::default()
    }
}

fn moist(core: &DynamicalCore) -> State {
    let mut state = core.initial_state().unwrap();
    fill_quantity(&mut state, SPECIFIC_HUMIDITY, 1.0e-3);
    fill_quantity(&mut state, OZONE_MOLE_FRACTION, 2.0e-6);
    fill_quantity(&mut state, CLOUD_LIQUID_WATER, 3.0);
    fill_quantity(&mut state, CLOUD_ICE, 4.0);
    state
}

#[test]
fn fixed_slots_follow_quantity_order() {
    let kernel = RecordingKernel::new();
    let log = kernel.log();
    let mut core = DynamicalCore::new(config(0), Box::new(kernel)).unwrap();
    let state = moist(&core);
    core.advance(&state).unwrap();

    let log = log.lock();
    let tracers = &log.pushed_grid.as_ref().unwrap().tracers;
    assert_eq!(tracers.len_of(Axis(3)), 4);
    for (slot, expected) in TracerSlot::ALL.into_iter().zip([1.0e-3, 2.0e-6, 3.0, 4.0]) {
        assert!(tracers
            .index_axis(Axis(3), slot.index())
            .iter()
            .all(|&v| v == expected));
    }
}

#[test]
fn slot_order_ignores_state_insertion_order() {
    let kernel = RecordingKernel::new();
    let log = kernel.log();
    let mut core = DynamicalCore::new(config(0), Box::new(kernel)).unwrap();
    let original = moist(&core);

    let mut reversed = State::new();
    reversed.set_time(original.time());
    for name in original.names().collect::<Vec<_>>().into_iter().rev() {
        reversed.insert(name, original.get(name).unwrap().clone());
    }
    core.advance(&reversed).unwrap();

    let log = log.lock();
    let tracers = &log.pushed_grid.as_ref().unwrap().tracers;
    assert!(tracers.index_axis(Axis(3), 0).iter().all(|&v| v == 1.0e-3));
    assert!(tracers.index_axis(Axis(3), 3).iter().all(|&v| v == 4.0));
}

#[test]
fn extra_tracers_pass_through_untouched() {
    let mut core = DynamicalCore::new(config(2), Box::new(RecordingKernel::new())).unwrap();
    let mut state = moist(&core);
    {
        let bundle = state.get_mut(TRACER_BUNDLE).unwrap();
        assert_eq!(bundle.shape()[3], 6);
        let mut data = bundle.data_mut();
        data.index_axis_mut(Axis(3), 4).fill(7.0);
        data.index_axis_mut(Axis(3), 5).fill(-1.5);
    }
    let (_, out) = core.advance(&state).unwrap();

    let bundle = out.get(TRACER_BUNDLE).unwrap().data();
    assert!(bundle.index_axis(Axis(3), 4).iter().all(|&v| v == 7.0));
    assert!(bundle.index_axis(Axis(3), 5).iter().all(|&v| v == -1.5));
    assert!(bundle.index_axis(Axis(3), 1).iter().all(|&v| v == 2.0e-6));
}

#[test]
fn outputs_come_from_post_step_bundle() {
    let mut core = DynamicalCore::new(config(1), Box::new(RecordingKernel::new())).unwrap();
    let state = moist(&core);
    let dt = core.config().time_step_seconds;
    let mut rate = state.get(TRACER_BUNDLE).unwrap().zeros_like();
    rate.data_mut().index_axis_mut(Axis(3), 2).fill(1.0e-3);
    rate.data_mut().index_axis_mut(Axis(3), 4).fill(1.0e-4);
    core.set_physics(Some(Box::new(
        ConstantTendency::new("microphysics").with_tendency(TRACER_BUNDLE, rate),
    )));

    let (_, out) = core.advance(&state).unwrap();
    let liquid = out.get(CLOUD_LIQUID_WATER).unwrap();
    assert!(liquid.data().iter().all(|&v| (v - (3.0 + dt * 1.0e-3)).abs() < 1e-12));
    assert_eq!(liquid.units(), "g m^-2");
    let bundle = out.get(TRACER_BUNDLE).unwrap().data();
    assert!(bundle
        .index_axis(Axis(3), 4)
        .iter()
        .all(|&v| (v - dt * 1.0e-4).abs() < 1e-12));
    let ice = out.get(CLOUD_ICE).unwrap();
    assert!(ice.data().iter().all(|&v| v == 4.0));
}
