//! Physical description of the disc and the air it flies through.
//!
//! The aerodynamic coefficients come from wind tunnel fits for a standard
//! 175 g ultimate disc. They are empirical, so they are kept exactly as
//! measured.

use na::Vector2;
use serde::{Deserialize, Serialize};

use crate::FlightError;

/// World, disc and aerodynamic constants used by the integrator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscModel {
    /// Vertical gravitational acceleration, m/s^2 (negative is down).
    pub gravity: f64,
    /// kg/m^3, roughly 20°C at sea level.
    pub air_density: f64,
    /// kg
    pub mass: f64,
    /// m
    pub radius: f64,
    /// Height of the rim, m.
    pub rim_height: f64,
    /// Lift coefficient at zero angle of attack.
    pub cl0: f64,
    /// Lift coefficient slope per radian of attack.
    pub cl_alpha: f64,
    /// Drag coefficient at the zero-lift angle.
    pub cd0: f64,
    /// Quadratic drag growth away from the zero-lift angle.
    pub cd_alpha: f64,
    /// Moment of inertia about the spin axis, kg*m^2.
    pub iy: f64,
    /// Moment of inertia about any axis in the disc plane, kg*m^2.
    pub ixz: f64,
}

impl DiscModel {
    pub const FRISBEE: DiscModel = DiscModel {
        gravity: -9.80665,
        air_density: 1.204,
        mass: 0.175,
        radius: 0.1365,
        rim_height: 0.025,
        cl0: -0.19,
        cl_alpha: -2.4,
        cd0: 0.1,
        cd_alpha: 2.0,
        iy: 0.00235,
        ixz: 0.00122,
    };

    /// The same disc with every lift and drag coefficient zeroed, leaving a
    /// body that only feels gravity.
    pub fn without_aerodynamics(self) -> Self {
        DiscModel {
            cl0: 0.0,
            cl_alpha: 0.0,
            cd0: 0.0,
            cd_alpha: 0.0,
            ..self
        }
    }

    /// Angle of minimum drag and zero lift, about -4.5° for the default disc.
    pub fn zero_lift_angle(&self) -> f64 {
        if self.cl_alpha == 0.0 {
            0.0
        } else {
            -self.cl0 / self.cl_alpha
        }
    }

    /// Planform area of the disc face.
    pub fn area(&self) -> f64 {
        std::f64::consts::PI * self.radius * self.radius
    }

    /// Profile of the disc from the centre out to the lip, as (radial, height)
    /// pairs. Rotating it about the spin axis gives the disc surface.
    pub fn contour(&self) -> [Vector2<f64>; 5] {
        let (r, h) = (self.radius, self.rim_height);
        [
            Vector2::new(0.0, 0.0),
            Vector2::new(0.8 * r, 0.0),
            Vector2::new(0.97 * r, -0.32 * h),
            Vector2::new(1.0 * r, -0.72 * h),
            Vector2::new(0.98 * r, -1.0 * h),
        ]
    }

    pub fn validate(&self) -> Result<(), FlightError> {
        let values = [
            self.gravity,
            self.air_density,
            self.mass,
            self.radius,
            self.rim_height,
            self.cl0,
            self.cl_alpha,
            self.cd0,
            self.cd_alpha,
            self.iy,
            self.ixz,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(FlightError::InvalidModel("all constants must be finite"));
        }
        if self.mass <= 0.0 {
            return Err(FlightError::InvalidModel("mass must be positive"));
        }
        if self.radius <= 0.0 {
            return Err(FlightError::InvalidModel("radius must be positive"));
        }
        if self.iy <= 0.0 || self.ixz <= 0.0 {
            return Err(FlightError::InvalidModel(
                "moments of inertia must be positive",
            ));
        }
        Ok(())
    }
}

impl Default for DiscModel {
    fn default() -> Self {
        Self::FRISBEE
    }
}
