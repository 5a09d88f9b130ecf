//! Recorded flights.

use na::Vector3;
use serde::{Deserialize, Serialize};

use crate::PhysicalState;

/// Snapshots of one throw in increasing time order, from release to the
/// first snapshot at or below the ground.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trajectory {
    entries: Vec<PhysicalState>,
}

impl Trajectory {
    pub(crate) fn new(entries: Vec<PhysicalState>) -> Self {
        Trajectory { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_slice(&self) -> &[PhysicalState] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PhysicalState> {
        self.entries.iter()
    }

    /// The release state.
    pub fn first(&self) -> Option<&PhysicalState> {
        self.entries.first()
    }

    /// The landing state.
    pub fn last(&self) -> Option<&PhysicalState> {
        self.entries.last()
    }

    /// Length of the flight in simulated seconds.
    pub fn duration(&self) -> f64 {
        self.last().map_or(0.0, |s| s.time)
    }

    /// Positions along the flight, e.g. for drawing the flight path.
    pub fn path(&self) -> impl Iterator<Item = &Vector3<f64>> + '_ {
        self.entries.iter().map(|s| &s.position)
    }

    /// The first snapshot at or after `time`, or the landing state once
    /// `time` is past the end of the flight.
    pub fn state_at(&self, time: f64) -> Option<&PhysicalState> {
        let idx = self.entries.partition_point(|s| s.time < time);
        self.entries.get(idx).or_else(|| self.entries.last())
    }

    /// Play the flight back from the start.
    pub fn replay(&self) -> Replay<'_> {
        Replay {
            trajectory: self,
            cursor: 0,
            elapsed: 0.0,
        }
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a PhysicalState;
    type IntoIter = std::slice::Iter<'a, PhysicalState>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Playback cursor over a trajectory, driven by wall clock time.
///
/// The cursor only moves forward, so a renderer stepping it every frame sees
/// the snapshots in flight order.
#[derive(Debug, Clone)]
pub struct Replay<'a> {
    trajectory: &'a Trajectory,
    cursor: usize,
    elapsed: f64,
}

impl<'a> Replay<'a> {
    /// Advance playback by `dt` seconds and return the snapshot to show.
    pub fn advance(&mut self, dt: f64) -> Option<&'a PhysicalState> {
        self.elapsed += dt.max(0.0);
        let trajectory: &'a Trajectory = self.trajectory;
        let entries = trajectory.as_slice();
        while self.cursor + 1 < entries.len() && entries[self.cursor].time < self.elapsed {
            self.cursor += 1;
        }
        entries.get(self.cursor)
    }

    /// Playback time, s.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Whether playback has reached the landing state.
    pub fn is_finished(&self) -> bool {
        self.cursor + 1 >= self.trajectory.len()
    }

    /// Start over from the release state.
    pub fn rewind(&mut self) {
        self.cursor = 0;
        self.elapsed = 0.0;
    }
}
