//! Aerodynamic forces and moments on a spinning disc.
//!
//! Lift and drag follow the linear/quadratic coefficient fits from
//! "Simulation of Frisbee Flight" (Hummel, 2003). The pitching moment is not
//! taken from a fitted coefficient. Instead the centre of pressure (COP) is
//! moved off the centre of mass along the forward axis by a piecewise linear
//! function of the angle of attack:
//!
//! ```text
//!        x (N_MID_ALPHA, N_COP_MAX)
//!       / \
//!      /   \ ALPHA_S       PI/2
//!   --x-----x-|-------------x--
//!   -PI/2    \             /
//!             \           /
//!              \         /
//!               \       /
//!                x (P_MID_ALPHA, P_COP_MAX)
//! ```
//!
//! The COP sits on the centre of mass at +-PI/2 (flying edge on) and at
//! `ALPHA_S`, the angle of stable flight.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use na::Vector3;

use crate::DiscModel;

/// Lengths and dot products below this are treated as zero.
pub const EPSILON: f64 = 1e-10;

/// Angle of attack where the COP coincides with the centre of mass, about -9°.
pub const ALPHA_S: f64 = -0.157079633;

/// Angle of attack of the largest forward COP offset.
pub const N_MID_ALPHA: f64 = ALPHA_S / 2.0 - FRAC_PI_4;

/// Angle of attack of the largest backward COP offset.
pub const P_MID_ALPHA: f64 = ALPHA_S / 2.0 + FRAC_PI_4;

// Spin coupling divisors, either side of ALPHA_S.
const SPIN_COUPLING_BELOW_STALL: f64 = 3_000_000.0;
const SPIN_COUPLING_ABOVE_STALL: f64 = 500_000.0;

/// Orthonormal disc frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscFrame {
    /// Forward, in the disc plane.
    pub d1: Vector3<f64>,
    /// Left, `d3 x d1`.
    pub d2: Vector3<f64>,
    /// Disc normal.
    pub d3: Vector3<f64>,
}

impl DiscFrame {
    pub fn new(up: &Vector3<f64>, velocity: &Vector3<f64>) -> Self {
        let d3 = *up;
        let d1 = forward_vector(&d3, velocity);
        let d2 = d3.cross(&d1);
        DiscFrame { d1, d2, d3 }
    }
}

/// Component of `v` in the plane orthogonal to the unit vector `normal`.
fn project_on_plane(v: &Vector3<f64>, normal: &Vector3<f64>) -> Vector3<f64> {
    v - normal * v.dot(normal)
}

/// Unit vector along `velocity` projected onto the disc plane.
///
/// With no velocity in the plane (flying face first, or not moving at all) the
/// direction is arbitrary but still has to be well defined, so the normal with
/// its components rotated is projected instead.
fn forward_vector(normal: &Vector3<f64>, velocity: &Vector3<f64>) -> Vector3<f64> {
    let forward = project_on_plane(velocity, normal);
    if forward.norm_squared() >= EPSILON {
        return forward.normalize();
    }

    let permuted = Vector3::new(normal.y, normal.z, normal.x);
    let forward = project_on_plane(&permuted, normal);
    if forward.norm_squared() >= EPSILON {
        return forward.normalize();
    }

    // All three components equal, so the permutation is the normal itself.
    normal.cross(&Vector3::x()).normalize()
}

/// Signed angle between the velocity and the disc plane, positive when the
/// disc is moving towards its top face.
pub fn angle_of_attack(d3: &Vector3<f64>, velocity: &Vector3<f64>) -> f64 {
    if velocity.norm_squared() < EPSILON {
        0.0
    } else {
        FRAC_PI_2 - d3.angle(velocity)
    }
}

/// Area of the disc facing the airflow: the face seen at `alpha` plus the rim.
pub fn planform_area(model: &DiscModel, alpha: f64) -> f64 {
    model.area() * alpha.sin().abs() + model.rim_height * model.radius * alpha.cos()
}

/// Signed distance from the centre of mass to the centre of pressure along
/// the forward axis, m.
pub fn cop_offset(radius: f64, alpha: f64) -> f64 {
    let n_cop_max = radius / 20.0;
    let n_slope = n_cop_max / (N_MID_ALPHA + FRAC_PI_2);
    let p_cop_max = radius / -10.0;
    let p_slope = p_cop_max / (P_MID_ALPHA - ALPHA_S);

    if alpha < N_MID_ALPHA {
        (alpha + FRAC_PI_2) * n_slope
    } else if alpha < ALPHA_S {
        (ALPHA_S - alpha) * n_slope
    } else if alpha < P_MID_ALPHA {
        (alpha - ALPHA_S) * p_slope
    } else {
        (FRAC_PI_2 - alpha) * p_slope
    }
}

/// Aerodynamic loads for one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AeroLoads {
    pub alpha: f64,
    pub lift: Vector3<f64>,
    pub drag: Vector3<f64>,
    /// Physical torque, N*m. Not display scaled.
    pub torque: Vector3<f64>,
}

impl AeroLoads {
    pub fn force(&self) -> Vector3<f64> {
        self.lift + self.drag
    }
}

/// Lift, drag and torque on a disc in `frame` moving at `velocity` and
/// spinning at `omega`.
pub fn loads(
    model: &DiscModel,
    frame: &DiscFrame,
    velocity: &Vector3<f64>,
    omega: &Vector3<f64>,
) -> AeroLoads {
    let DiscFrame { d1, d2, d3 } = frame;
    let vsq = velocity.norm_squared();
    let alpha = angle_of_attack(d3, velocity);

    // Dynamic pressure times the area facing the flow.
    let pressure_area = model.air_density * planform_area(model, alpha) * vsq / 2.0;

    let cd = model.cd0 + model.cd_alpha * (alpha - model.zero_lift_angle()).powi(2);
    let heading = velocity.try_normalize(0.0).unwrap_or_else(Vector3::zeros);
    let drag = heading * (-cd * pressure_area);

    // Perpendicular to the velocity: d3 turned towards -d1 by alpha.
    let lift_dir = d3 * alpha.cos() - d1 * alpha.sin();
    let cl = model.cl0 + model.cl_alpha * alpha;
    let lift = lift_dir * (cl * pressure_area);

    let mut torque = d1.cross(&(lift + drag)) * cop_offset(model.radius, alpha);

    // Spin against the passing air rolls the disc.
    torque += if alpha < ALPHA_S {
        omega.cross(d2) * (vsq / SPIN_COUPLING_BELOW_STALL)
    } else {
        d2.cross(omega) * (vsq / SPIN_COUPLING_ABOVE_STALL)
    };

    AeroLoads {
        alpha,
        lift,
        drag,
        torque,
    }
}
