//! Flight simulation of a spinning disc.
//!
//! A throw starts from a [`PhysicalState`] and is integrated with empirical
//! lift, drag and pitching moment models until the disc reaches the ground,
//! producing a [`Trajectory`] of snapshots every [`STEP_DT`].
//!
//! The world is Y-up and right handed. The ground is the plane `y = 0`.
//!
//! ```no_run
//! use disc_physics::{PhysicalState, run};
//!
//! let trajectory = run(PhysicalState::default())?;
//! println!("landed after {:.2} s", trajectory.duration());
//! # Ok::<(), disc_physics::FlightError>(())
//! ```

extern crate nalgebra as na;

pub mod aero;
pub mod attitude;
mod calculator;
mod error;
mod integrator;
mod model;
mod plugin;
mod preset;
mod state;
mod trajectory;

pub use calculator::{Calculator, Tick};
pub use error::FlightError;
pub use integrator::{
    FlightIntegrator, MICRO_STEPS_PER_STEP, SIM_DT, STEP_DT, Step, TORQUE_DISPLAY_SCALE, run,
};
pub use model::DiscModel;
pub use plugin::{Flight, FlightPlugin, FlightStatus};
pub use preset::ThrowPreset;
pub use state::PhysicalState;
pub use trajectory::{Replay, Trajectory};
