//! Errors raised by the flight simulation.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlightError {
    /// The initial state cannot be integrated.
    #[error("invalid initial state: {field} {reason}")]
    InvalidInitialState {
        field: &'static str,
        reason: &'static str,
    },

    /// The disc was still in the air when the time limit ran out.
    #[error("disc still airborne after {elapsed:.3} s (limit {limit:.3} s)")]
    DidNotConverge { elapsed: f64, limit: f64 },

    #[error("invalid disc model: {0}")]
    InvalidModel(&'static str),
}
