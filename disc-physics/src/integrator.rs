//! Fixed-step flight integration.
//!
//! The disc is advanced in micro steps of [`SIM_DT`], fine enough to keep the
//! explicit integration stable at high spin rates. A snapshot is recorded
//! every [`STEP_DT`], which is what a renderer plays back.

use bevy::log::{debug, warn};

use crate::{
    DiscModel, FlightError, PhysicalState, Trajectory,
    aero::{self, DiscFrame},
    attitude,
};

/// Integration time step, s.
pub const SIM_DT: f64 = 1e-4;

/// Interval between recorded snapshots, s.
pub const STEP_DT: f64 = 0.01;

/// Micro steps per recorded snapshot.
pub const MICRO_STEPS_PER_STEP: usize = 100;

/// Factor applied to the stored torque so it shows up at the same scale as
/// the forces. Integration always uses the physical torque.
pub const TORQUE_DISPLAY_SCALE: f64 = 200.0;

/// Outcome of a single recorded step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Still airborne at `time`.
    InFlight { time: f64 },
    /// Reached the ground at `time`. Further steps do nothing.
    Landed { time: f64 },
}

/// Advances one throw from its initial state to the ground.
#[derive(Debug, Clone)]
pub struct FlightIntegrator {
    model: DiscModel,
    /// Simulated seconds after which a still airborne disc is given up on.
    time_limit: Option<f64>,
    /// The working state. Never handed out, only cloned.
    state: PhysicalState,
    entries: Vec<PhysicalState>,
}

impl FlightIntegrator {
    /// Prepare a throw of the standard disc.
    pub fn new(initial: PhysicalState) -> Result<Self, FlightError> {
        Self::with_model(initial, DiscModel::default())
    }

    pub fn with_model(initial: PhysicalState, model: DiscModel) -> Result<Self, FlightError> {
        model.validate()?;
        initial.validate()?;

        let mut state = initial;
        state.up = state.up.normalize();
        state.update_frame();

        Ok(FlightIntegrator {
            model,
            time_limit: None,
            entries: vec![state.clone()],
            state,
        })
    }

    /// Fail with [`FlightError::DidNotConverge`] if the disc is still in the
    /// air after `seconds` of simulated time.
    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit = Some(seconds);
        self
    }

    pub fn model(&self) -> &DiscModel {
        &self.model
    }

    pub fn is_landed(&self) -> bool {
        self.state.height() <= 0.0
    }

    /// Simulated time of the working state.
    pub fn elapsed(&self) -> f64 {
        self.state.time
    }

    /// A copy of the working state.
    pub fn snapshot(&self) -> PhysicalState {
        self.state.clone()
    }

    /// Snapshots recorded so far, starting with the initial state.
    pub fn entries(&self) -> &[PhysicalState] {
        &self.entries
    }

    /// Advance by [`STEP_DT`], or until the disc reaches the ground, and
    /// record the resulting state.
    pub fn step(&mut self) -> Result<Step, FlightError> {
        if self.is_landed() {
            return Ok(Step::Landed {
                time: self.state.time,
            });
        }

        for _ in 0..MICRO_STEPS_PER_STEP {
            self.micro_step();
            if self.is_landed() {
                break;
            }
        }
        self.entries.push(self.state.clone());

        let time = self.state.time;
        if self.is_landed() {
            debug!(
                "disc landed after {:.2} s, {:.2} m from release",
                time,
                (self.state.position - self.entries[0].position).norm()
            );
            return Ok(Step::Landed { time });
        }

        if let Some(limit) = self.time_limit {
            if time >= limit {
                warn!("disc still at {:.2} m after {:.2} s", self.state.height(), time);
                return Err(FlightError::DidNotConverge {
                    elapsed: time,
                    limit,
                });
            }
        }

        Ok(Step::InFlight { time })
    }

    /// Advance the working state by a single [`SIM_DT`].
    fn micro_step(&mut self) {
        let model = &self.model;
        let state = &mut self.state;

        let frame = DiscFrame::new(&state.up, &state.velocity);
        let loads = aero::loads(model, &frame, &state.velocity, &state.omega);

        let mut force = loads.force();
        force.y += model.mass * model.gravity;

        state.omega += attitude::angular_acceleration(model, &frame.d3, &loads.torque) * SIM_DT;
        state.up = attitude::rotate_normal(&frame.d3, &state.omega, SIM_DT);

        // Semi-implicit Euler: the position moves with the updated velocity.
        state.velocity += force / model.mass * SIM_DT;
        state.position += state.velocity * SIM_DT;
        state.time += SIM_DT;

        state.lift = loads.lift;
        state.drag = loads.drag;
        state.force = force;
        state.torque = loads.torque * TORQUE_DISPLAY_SCALE;
        state.update_frame();
    }

    /// Run to the ground in one call.
    pub fn run(self) -> Result<Trajectory, FlightError> {
        self.run_with_progress(|_| {})
    }

    /// Run to the ground in one call, reporting the simulated time after each
    /// recorded step.
    pub fn run_with_progress(
        mut self,
        mut on_progress: impl FnMut(f64),
    ) -> Result<Trajectory, FlightError> {
        loop {
            match self.step()? {
                Step::InFlight { time } => on_progress(time),
                Step::Landed { time } => {
                    on_progress(time);
                    return Ok(self.into_trajectory());
                }
            }
        }
    }

    pub fn into_trajectory(self) -> Trajectory {
        Trajectory::new(self.entries)
    }
}

/// Simulate a throw of the standard disc to the ground.
pub fn run(initial: PhysicalState) -> Result<Trajectory, FlightError> {
    FlightIntegrator::new(initial)?.run()
}
