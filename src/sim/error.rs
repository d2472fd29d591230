//! Simulation errors

use thiserror::Error;

/// Errors raised while building a population.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    /// Rejection sampling could not find a free spot for a body.
    #[error(
        "could not place body {index} after {attempts} attempts ({placed} bodies placed); \
         radius/count leaves no room"
    )]
    PlacementInfeasible {
        index: usize,
        attempts: u32,
        placed: usize,
    },
    /// Population parameters are unusable.
    #[error("invalid population parameters: {0}")]
    InvalidParams(&'static str),
}
