//! Properties every simulated flight must satisfy.

use std::{cell::RefCell, rc::Rc};

use approx::assert_abs_diff_eq;
use disc_physics::{
    Calculator, DiscModel, FlightIntegrator, PhysicalState, STEP_DT, ThrowPreset, Tick,
    Trajectory,
};
use nalgebra::Vector3;

fn throws() -> Vec<PhysicalState> {
    vec![
        PhysicalState::default(),
        PhysicalState::thrown(
            Vector3::new(0.0, 1.5, 0.0),
            Vector3::new(12.0, 1.0, 0.0),
            Vector3::y(),
            -40.0,
        ),
        PhysicalState::thrown(
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(10.0, 3.0, -1.0),
            Vector3::new(-0.25, 1.0, 0.1),
            45.0,
        ),
        ThrowPreset::Normal.state(),
        ThrowPreset::Toss.state(),
    ]
}

fn fly(initial: PhysicalState) -> Trajectory {
    FlightIntegrator::new(initial)
        .unwrap()
        .with_time_limit(30.0)
        .run()
        .unwrap()
}

fn fly_incrementally(initial: PhysicalState) -> Trajectory {
    let result = Rc::new(RefCell::new(None));
    let r = result.clone();

    let mut calculator = Calculator::new().with_time_limit(30.0);
    calculator
        .calculate(initial, |_| {}, move |t| *r.borrow_mut() = Some(t))
        .unwrap();
    while calculator.tick().unwrap() != Tick::Done {}

    result.borrow_mut().take().unwrap()
}

#[test]
fn batch_and_incremental_runs_agree() {
    for initial in throws() {
        let batch = fly(initial.clone());
        let incremental = fly_incrementally(initial);
        assert_eq!(batch.len(), incremental.len());
        for (a, b) in batch.iter().zip(&incremental) {
            assert_abs_diff_eq!(a.time, b.time, epsilon = 1e-9);
            assert_abs_diff_eq!(a.position, b.position, epsilon = 1e-9);
            assert_abs_diff_eq!(a.velocity, b.velocity, epsilon = 1e-9);
            assert_abs_diff_eq!(a.up, b.up, epsilon = 1e-9);
            assert_abs_diff_eq!(a.omega, b.omega, epsilon = 1e-9);
        }
        assert_eq!(batch, incremental);
    }
}

#[test]
fn time_strictly_increases() {
    for initial in throws() {
        let trajectory = fly(initial);
        for pair in trajectory.as_slice().windows(2) {
            assert!(pair[0].time < pair[1].time, "{} !< {}", pair[0].time, pair[1].time);
        }
    }
}

#[test]
fn flight_ends_at_first_entry_on_the_ground() {
    for initial in throws() {
        let trajectory = fly(initial);
        let (last, airborne) = trajectory.as_slice().split_last().unwrap();
        assert!(last.height() <= 0.0);
        assert!(!airborne.is_empty());
        assert!(airborne.iter().all(|s| s.height() > 0.0));
    }
}

#[test]
fn disc_frame_stays_orthonormal() {
    for initial in throws() {
        for state in &fly(initial) {
            assert_abs_diff_eq!(state.up.norm(), 1.0, epsilon = 1e-6);
            assert_eq!(state.d3, state.up);
            assert_abs_diff_eq!(state.d1.norm(), 1.0, epsilon = 1e-6);
            assert_abs_diff_eq!(state.d1.dot(&state.d3), 0.0, epsilon = 1e-6);
            assert_abs_diff_eq!(state.d2, state.d3.cross(&state.d1), epsilon = 1e-6);
        }
    }
}

#[test]
fn free_fall_without_aerodynamics() {
    let initial = PhysicalState {
        position: Vector3::new(0.0, 10.0, 0.0),
        velocity: Vector3::zeros(),
        ..Default::default()
    };
    let model = DiscModel::FRISBEE.without_aerodynamics();
    let trajectory = FlightIntegrator::with_model(initial, model)
        .unwrap()
        .run()
        .unwrap();

    let expected = (2.0 * 10.0 / 9.80665_f64).sqrt();
    assert_abs_diff_eq!(trajectory.duration(), expected, epsilon = STEP_DT);

    let landing = trajectory.last().unwrap();
    assert_abs_diff_eq!(landing.position.x, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(landing.position.z, 0.0, epsilon = 1e-12);
    assert_eq!(landing.lift, Vector3::zeros());
    assert_eq!(landing.drag, Vector3::zeros());
}

#[test]
fn dropped_disc_has_no_undefined_values() {
    let initial = PhysicalState {
        position: Vector3::new(0.0, 2.0, 0.0),
        velocity: Vector3::zeros(),
        ..Default::default()
    };
    let trajectory = fly(initial);

    let first = trajectory.first().unwrap();
    assert_eq!(first.lift, Vector3::zeros());
    assert_eq!(first.drag, Vector3::zeros());

    for state in &trajectory {
        let vectors = [
            state.position,
            state.velocity,
            state.up,
            state.omega,
            state.lift,
            state.drag,
            state.force,
            state.torque,
            state.d1,
            state.d2,
        ];
        assert!(
            vectors.iter().flat_map(|v| v.iter()).all(|c| c.is_finite()),
            "non-finite value at t = {}",
            state.time
        );
    }
}

#[test]
fn mirrored_throw_mirrors_the_flight() {
    let throw = |vx| {
        PhysicalState::thrown(
            Vector3::new(0.0, 1.5, 0.0),
            Vector3::new(vx, 2.0, 0.0),
            Vector3::y(),
            -30.0,
        )
    };
    let original = fly(throw(9.0));
    let mirrored = fly(throw(-9.0));

    assert_eq!(original.len(), mirrored.len());
    for (a, b) in original.iter().zip(&mirrored) {
        assert_abs_diff_eq!(a.time, b.time, epsilon = 1e-12);
        assert_abs_diff_eq!(a.position.x, -b.position.x, epsilon = 1e-9);
        assert_abs_diff_eq!(a.position.y, b.position.y, epsilon = 1e-9);
        assert_abs_diff_eq!(a.position.z, -b.position.z, epsilon = 1e-9);
    }
}

#[test]
fn trajectory_serializes_as_a_list_of_states() {
    let trajectory = fly(ThrowPreset::Toss.state());
    let json = serde_json::to_value(&trajectory).unwrap();
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), trajectory.len());
    for key in ["time", "position", "up", "lift", "drag", "force", "torque", "d1", "d2", "d3"] {
        assert!(entries[0].get(key).is_some(), "missing {key}");
    }
}
