//! Deterministic simulation module
//!
//! Everything that moves a disk lives here. This module must stay pure:
//! - Seeded RNG only
//! - Stable iteration order (population index)
//! - No rendering or platform dependencies

pub mod collision;
pub mod error;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{PairResponse, collide_pair, collide_walls, elastic_response};
pub use error::SimError;
pub use spawn::{PopulationParams, create_population, create_population_with};
pub use state::{Body, PopulationStats};
pub use tick::{frame_interval, step};
