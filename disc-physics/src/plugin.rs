//! Bevy integration: flights that advance one recorded step per frame.

use bevy::prelude::*;

use crate::{FlightError, FlightIntegrator, PhysicalState, Step, Trajectory};

/// Advances every [`Flight`] once per `Update`.
#[derive(Default)]
pub struct FlightPlugin;

impl Plugin for FlightPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, advance_flights);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlightStatus {
    InFlight { elapsed: f64 },
    Landed { elapsed: f64 },
    Failed(FlightError),
}

/// A throw being calculated on an entity.
///
/// If the entity also has a [`PhysicalState`], it is kept at the latest
/// snapshot for rendering. Inserting a new `Flight` replaces the old one.
#[derive(Component, Debug)]
pub struct Flight {
    integrator: FlightIntegrator,
    status: FlightStatus,
}

impl Flight {
    pub fn new(integrator: FlightIntegrator) -> Self {
        let elapsed = integrator.elapsed();
        let status = if integrator.is_landed() {
            FlightStatus::Landed { elapsed }
        } else {
            FlightStatus::InFlight { elapsed }
        };
        Flight { integrator, status }
    }

    /// A throw of the standard disc.
    pub fn throw(initial: PhysicalState) -> Result<Self, FlightError> {
        Ok(Self::new(FlightIntegrator::new(initial)?))
    }

    pub fn status(&self) -> &FlightStatus {
        &self.status
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self.status, FlightStatus::InFlight { .. })
    }

    /// Advance by one recorded step. Does nothing once landed or failed.
    pub fn advance(&mut self) -> &FlightStatus {
        if self.is_in_flight() {
            self.status = match self.integrator.step() {
                Ok(Step::InFlight { time }) => FlightStatus::InFlight { elapsed: time },
                Ok(Step::Landed { time }) => FlightStatus::Landed { elapsed: time },
                Err(err) => FlightStatus::Failed(err),
            };
        }
        &self.status
    }

    /// The disc as of the latest step.
    pub fn snapshot(&self) -> PhysicalState {
        self.integrator.snapshot()
    }

    /// The finished flight, once landed.
    pub fn trajectory(&self) -> Option<Trajectory> {
        match self.status {
            FlightStatus::Landed { .. } => Some(Trajectory::new(self.integrator.entries().to_vec())),
            _ => None,
        }
    }
}

fn advance_flights(mut flights: Query<(Entity, &mut Flight, Option<&mut PhysicalState>)>) {
    for (entity, mut flight, current) in &mut flights {
        if !flight.is_in_flight() {
            continue;
        }

        match flight.advance() {
            FlightStatus::Landed { elapsed } => {
                info!("{entity:?}: disc landed after {elapsed:.2} s");
            }
            FlightStatus::Failed(err) => {
                warn!("{entity:?}: flight abandoned: {err}");
            }
            FlightStatus::InFlight { .. } => {}
        }

        if let Some(mut current) = current {
            *current = flight.snapshot();
        }
    }
}
