//! Rotational motion of the disc.
//!
//! The disc is axially symmetric, so its inertia is fully described by the
//! moment about the spin axis (`Iy`) and the moment about any axis in the disc
//! plane (`Ixz`). Only the normal is tracked. The spin angle about it is
//! invisible to the aerodynamics.

use na::{Unit, UnitQuaternion, Vector3};

use crate::{DiscModel, aero::EPSILON};

/// Angular acceleration produced by `torque` on a disc whose normal is `d3`.
///
/// The torque is split into its component along the spin axis and the
/// remainder in the disc plane, each divided by its own moment of inertia.
pub fn angular_acceleration(
    model: &DiscModel,
    d3: &Vector3<f64>,
    torque: &Vector3<f64>,
) -> Vector3<f64> {
    let spin_torque = d3 * torque.dot(d3);
    let tilt_torque = torque - spin_torque;
    spin_torque / model.iy + tilt_torque / model.ixz
}

/// Turn the disc normal `up` by `omega` for `dt` seconds.
///
/// A disc that is not rotating keeps its orientation.
pub fn rotate_normal(up: &Vector3<f64>, omega: &Vector3<f64>, dt: f64) -> Vector3<f64> {
    if omega.norm() < EPSILON {
        return *up;
    }
    (exp_quat(&(omega * dt)) * up).normalize()
}

/// Exponential map: converts axis-angle vector to unit quaternion.
///
/// Given a 3D vector v = θ * n (where n is unit axis, θ is rotation angle),
/// returns the unit quaternion q representing rotation by θ radians around n.
fn exp_quat(v: &Vector3<f64>) -> UnitQuaternion<f64> {
    let theta = v.norm();
    if theta < EPSILON {
        UnitQuaternion::identity()
    } else {
        UnitQuaternion::from_axis_angle(&Unit::new_normalize(*v), theta)
    }
}
