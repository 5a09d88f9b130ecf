//! Named example throws.

use na::Vector3;
use serde::{Deserialize, Serialize};

use crate::PhysicalState;

/// Common throws, all released 1.2 m up, 10 m from the origin along -Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThrowPreset {
    /// Backhand, slightly hyzer.
    Normal,
    /// Overhead, released nearly vertical.
    Hammer,
    /// Thrown hard on edge.
    Knife,
    /// Flat and fast with the disc upside down.
    UpsideDown,
    /// A gentle lob.
    Toss,
}

impl ThrowPreset {
    pub const ALL: [ThrowPreset; 5] = [
        ThrowPreset::Normal,
        ThrowPreset::Hammer,
        ThrowPreset::Knife,
        ThrowPreset::UpsideDown,
        ThrowPreset::Toss,
    ];

    pub fn state(self) -> PhysicalState {
        // (velocity, up, spin) measured in a Z-up frame.
        let (velocity, up, spin) = match self {
            ThrowPreset::Normal => ([10.0, 0.0, 1.0], [-0.3, 0.0, 1.0], -40.0),
            ThrowPreset::Hammer => ([10.0, 0.0, 10.0], [0.3, 1.0, -0.6], 40.0),
            ThrowPreset::Knife => ([10.0, 0.0, 5.0], [-0.1, 1.0, 0.2], 40.0),
            ThrowPreset::UpsideDown => ([15.0, 0.0, 0.0], [0.2, 0.3, -1.0], 40.0),
            ThrowPreset::Toss => ([1.0, 0.0, 1.0], [0.0, 0.0, 1.0], -20.0),
        };
        PhysicalState::thrown(
            z_up_to_y_up([0.0, 10.0, 1.2]),
            z_up_to_y_up(velocity),
            z_up_to_y_up(up),
            spin,
        )
    }
}

/// Rotate a Z-up vector into the Y-up world, keeping it right handed.
fn z_up_to_y_up([x, y, z]: [f64; 3]) -> Vector3<f64> {
    Vector3::new(x, z, -y)
}
