//! The disc at a single instant.

use bevy::ecs::component::Component;
use na::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::{FlightError, aero::DiscFrame};

/// Every quantity of the disc at one instant of a throw.
///
/// Y is up. Snapshots recorded in a trajectory are independent copies, so a
/// renderer can read any field of any entry without touching the integrator.
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicalState {
    /// Seconds since the throw.
    pub time: f64,
    /// Centre of the disc, m.
    pub position: Vector3<f64>,
    /// m/s
    pub velocity: Vector3<f64>,
    /// Disc normal, which is also the spin axis.
    pub up: Vector3<f64>,
    /// Angular velocity, rad/s. Along `up` for a clean throw, it wanders off
    /// as the disc precesses.
    pub omega: Vector3<f64>,
    /// Net moment on the disc, scaled by [`crate::TORQUE_DISPLAY_SCALE`] so it
    /// is visible next to the forces.
    pub torque: Vector3<f64>,
    /// Aerodynamic lift, N.
    pub lift: Vector3<f64>,
    /// Aerodynamic drag, N.
    pub drag: Vector3<f64>,
    /// Lift, drag and gravity, N.
    pub force: Vector3<f64>,
    /// Forward: velocity projected onto the disc plane.
    pub d1: Vector3<f64>,
    /// `d3 x d1`, to the left of the direction of travel.
    pub d2: Vector3<f64>,
    /// Same as `up`.
    pub d3: Vector3<f64>,
}

impl Default for PhysicalState {
    fn default() -> Self {
        let up = Vector3::y();
        let velocity = Vector3::new(1.0, 1.0, 0.0);
        let frame = DiscFrame::new(&up, &velocity);
        PhysicalState {
            time: 0.0,
            position: Vector3::new(0.0, 1.0, 0.0),
            velocity,
            up,
            omega: up,
            torque: Vector3::zeros(),
            lift: Vector3::zeros(),
            drag: Vector3::zeros(),
            force: Vector3::zeros(),
            d1: frame.d1,
            d2: frame.d2,
            d3: frame.d3,
        }
    }
}

impl PhysicalState {
    /// A disc released at `position` with `velocity`, its normal along `up`
    /// and spinning at `spin` rad/s about that normal. Positive spin is
    /// counter-clockwise seen from above.
    pub fn thrown(
        position: Vector3<f64>,
        velocity: Vector3<f64>,
        up: Vector3<f64>,
        spin: f64,
    ) -> Self {
        let up = up.try_normalize(0.0).unwrap_or_else(Vector3::y);
        let mut state = PhysicalState {
            position,
            velocity,
            up,
            omega: up * spin,
            ..Default::default()
        };
        state.update_frame();
        state
    }

    /// Tilt the disc to a new normal, keeping its spin rate.
    pub fn with_up(mut self, up: Vector3<f64>) -> Self {
        let spin = self.spin();
        self.up = up.try_normalize(0.0).unwrap_or(self.up);
        self.omega = self.up * spin;
        self.update_frame();
        self
    }

    /// Replace the angular velocity by a pure spin about `up`.
    pub fn with_spin(mut self, spin: f64) -> Self {
        self.omega = self.up * spin;
        self
    }

    /// Signed spin rate about the disc normal, rad/s.
    pub fn spin(&self) -> f64 {
        self.omega.dot(&self.up)
    }

    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }

    /// Height above the ground. The flight ends once this reaches zero.
    pub fn height(&self) -> f64 {
        self.position.y
    }

    /// Rotation taking the world Y axis onto the disc normal, as applied to a
    /// disc mesh modelled lying flat.
    pub fn orientation(&self) -> UnitQuaternion<f64> {
        UnitQuaternion::rotation_between(&Vector3::y(), &self.up).unwrap_or_else(|| {
            // Upside down: any half turn about a horizontal axis will do.
            UnitQuaternion::from_axis_angle(&Vector3::x_axis(), std::f64::consts::PI)
        })
    }

    /// Recompute `d1`, `d2` and `d3` from the current normal and velocity.
    pub(crate) fn update_frame(&mut self) {
        let frame = DiscFrame::new(&self.up, &self.velocity);
        self.d1 = frame.d1;
        self.d2 = frame.d2;
        self.d3 = frame.d3;
    }

    /// Reject states the integrator cannot advance.
    pub fn validate(&self) -> Result<(), FlightError> {
        let not_finite = |field: &'static str| FlightError::InvalidInitialState {
            field,
            reason: "has a non-finite component",
        };
        if !self.time.is_finite() {
            return Err(not_finite("time"));
        }
        let vectors = [
            ("position", &self.position),
            ("velocity", &self.velocity),
            ("up", &self.up),
            ("omega", &self.omega),
        ];
        for (field, v) in vectors {
            if v.iter().any(|c| !c.is_finite()) {
                return Err(not_finite(field));
            }
        }
        if self.up.norm_squared() == 0.0 {
            return Err(FlightError::InvalidInitialState {
                field: "up",
                reason: "has zero length",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn default_state() {
        let state = PhysicalState::default();
        assert_eq!(state.up, Vector3::y());
        assert_eq!(state.position, Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(state.velocity, Vector3::new(1.0, 1.0, 0.0));
        assert_eq!(state.omega, state.up);
        assert_eq!(state.torque, Vector3::zeros());
        assert_eq!(state.force, Vector3::zeros());
        assert_eq!(state.time, 0.0);
        assert_eq!(state.d3, state.up);
        assert_eq!(state.d1, Vector3::x());
        assert_eq!(state.d2, -Vector3::z());
    }

    #[test]
    fn clones_are_independent() {
        let original = PhysicalState::default();
        let mut copy = original.clone();
        copy.position.y = 5.0;
        copy.velocity *= 2.0;
        copy.time = 1.0;
        assert_eq!(original.position.y, 1.0);
        assert_eq!(original.velocity, Vector3::new(1.0, 1.0, 0.0));
        assert_eq!(original.time, 0.0);
    }

    #[test]
    fn thrown_normalizes_up_and_spins_about_it() {
        let state = PhysicalState::thrown(
            Vector3::new(0.0, 1.5, 0.0),
            Vector3::new(12.0, 2.0, 0.0),
            Vector3::new(0.0, 2.0, 0.0),
            -40.0,
        );
        assert_relative_eq!(state.up.norm(), 1.0);
        assert_relative_eq!(state.omega, Vector3::new(0.0, -40.0, 0.0));
        assert_relative_eq!(state.spin(), -40.0);
        assert_eq!(state.d1, Vector3::x());
    }

    #[test]
    fn tilting_keeps_signed_spin() {
        let state = PhysicalState::default()
            .with_spin(-30.0)
            .with_up(Vector3::new(1.0, 1.0, 0.0));
        assert_relative_eq!(state.up.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(state.spin(), -30.0, epsilon = 1e-12);
        assert_relative_eq!(state.omega.norm(), 30.0, epsilon = 1e-12);
        assert_eq!(state.d3, state.up);
    }

    #[test]
    fn orientation_maps_y_onto_up() {
        let state = PhysicalState::default().with_up(Vector3::new(0.3, 1.0, -0.2));
        let mapped = state.orientation() * Vector3::y();
        assert_abs_diff_eq!(mapped, state.up, epsilon = 1e-12);

        let flipped = PhysicalState::default().with_up(-Vector3::y());
        let mapped = flipped.orientation() * Vector3::y();
        assert_abs_diff_eq!(mapped, -Vector3::y(), epsilon = 1e-12);
    }

    #[test]
    fn rejects_non_finite_components() {
        let mut state = PhysicalState::default();
        state.velocity.x = f64::NAN;
        assert_eq!(
            state.validate(),
            Err(FlightError::InvalidInitialState {
                field: "velocity",
                reason: "has a non-finite component",
            })
        );

        let mut state = PhysicalState::default();
        state.up = Vector3::zeros();
        assert!(matches!(
            state.validate(),
            Err(FlightError::InvalidInitialState { field: "up", .. })
        ));
    }

    #[test]
    fn partial_json_uses_defaults() {
        let state: PhysicalState =
            serde_json::from_str(r#"{"position": [0.0, 2.0, 0.0], "omega": [0.0, 20.0, 0.0]}"#)
                .unwrap();
        assert_eq!(state.position, Vector3::new(0.0, 2.0, 0.0));
        assert_eq!(state.omega, Vector3::new(0.0, 20.0, 0.0));
        assert_eq!(state.velocity, Vector3::new(1.0, 1.0, 0.0));
        assert_eq!(state.up, Vector3::y());
    }
}
