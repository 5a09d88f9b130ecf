//! Incremental flight calculation.
//!
//! A host that must stay responsive (a frame loop, an event loop) cannot block
//! for a whole flight. The [`Calculator`] instead advances one recorded step
//! per [`Calculator::tick`], reports progress through a callback, and hands the
//! finished trajectory to a completion callback.

use bevy::log::debug;

use crate::{DiscModel, FlightError, FlightIntegrator, PhysicalState, Step, Trajectory};

type ProgressFn = Box<dyn FnMut(f64)>;
type DoneFn = Box<dyn FnOnce(Trajectory)>;

/// What a call to [`Calculator::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick {
    /// No calculation in progress.
    Idle,
    /// Advanced one step, the disc is still airborne at `elapsed`.
    Running { elapsed: f64 },
    /// The disc landed and the completion callback has run.
    Done,
}

struct Calculation {
    integrator: FlightIntegrator,
    on_progress: ProgressFn,
    on_done: DoneFn,
}

/// Drives at most one throw at a time, one step per tick.
pub struct Calculator {
    model: DiscModel,
    time_limit: Option<f64>,
    active: Option<Calculation>,
}

impl Calculator {
    pub fn new() -> Self {
        Self::with_model(DiscModel::default())
    }

    pub fn with_model(model: DiscModel) -> Self {
        Calculator {
            model,
            time_limit: None,
            active: None,
        }
    }

    /// Give up on throws still airborne after `seconds` of simulated time.
    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit = Some(seconds);
        self
    }

    /// Start calculating a throw from `initial`.
    ///
    /// Any calculation already in progress is abandoned and its callbacks are
    /// dropped without being called.
    pub fn calculate(
        &mut self,
        initial: PhysicalState,
        on_progress: impl FnMut(f64) + 'static,
        on_done: impl FnOnce(Trajectory) + 'static,
    ) -> Result<(), FlightError> {
        let mut integrator = FlightIntegrator::with_model(initial, self.model)?;
        if let Some(limit) = self.time_limit {
            integrator = integrator.with_time_limit(limit);
        }

        if let Some(previous) = self.active.take() {
            debug!(
                "abandoning throw at {:.2} s for a new one",
                previous.integrator.elapsed()
            );
        }
        self.active = Some(Calculation {
            integrator,
            on_progress: Box::new(on_progress),
            on_done: Box::new(on_done),
        });
        Ok(())
    }

    /// Advance the current calculation by one recorded step.
    ///
    /// An error ends the calculation without calling the completion callback.
    pub fn tick(&mut self) -> Result<Tick, FlightError> {
        let Some(mut calc) = self.active.take() else {
            return Ok(Tick::Idle);
        };

        match calc.integrator.step()? {
            Step::InFlight { time } => {
                (calc.on_progress)(time);
                self.active = Some(calc);
                Ok(Tick::Running { elapsed: time })
            }
            Step::Landed { time } => {
                (calc.on_progress)(time);
                (calc.on_done)(calc.integrator.into_trajectory());
                Ok(Tick::Done)
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Drop the calculation in progress, if any, without calling back.
    pub fn cancel(&mut self) -> bool {
        self.active.take().is_some()
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}
