//! Disk Sim - bouncing elastic disks in a 16:9 box
//!
//! Core modules:
//! - `sim`: Deterministic simulation (placement, integration, collisions)
//! - `render`: Draw-instance extraction for an external renderer
//! - `settings`: Run configuration for the headless driver

pub mod render;
pub mod settings;
pub mod sim;

pub use settings::Settings;
pub use sim::{Body, SimError, create_population, step};

/// Simulation constants
pub mod consts {
    /// Horizontal sampling bounds for initial centers
    pub const SPAWN_X_MIN: f32 = -1.6;
    pub const SPAWN_X_MAX: f32 = 1.6;
    /// Vertical sampling bounds for initial centers
    pub const SPAWN_Y_MIN: f32 = -0.9;
    pub const SPAWN_Y_MAX: f32 = 0.9;

    /// Radius bounds, as multipliers of 1/sqrt(count)
    pub const RADIUS_SCALE_MIN: f32 = 0.3;
    pub const RADIUS_SCALE_MAX: f32 = 1.0;

    /// Per-axis bound for initial velocity (units per reference frame)
    pub const MAX_SPAWN_SPEED: f32 = 0.002;

    /// Wall box half-extents (slightly wider than the spawn area)
    pub const WALL_HALF_WIDTH: f32 = 1.77778;
    pub const WALL_HALF_HEIGHT: f32 = 1.0;

    /// Reference frame rate used to turn seconds into frames
    pub const REFERENCE_FPS: f32 = 60.0;

    /// Rejected candidates allowed per body before placement gives up
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 10_000;

    /// Largest population placement will attempt (exhaustive checks are O(count^2))
    pub const MAX_POPULATION: u32 = 100_000;
}
