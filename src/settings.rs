//! Run settings for the headless driver
//!
//! Read from an optional JSON file; any missing field takes its default.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_PLACEMENT_ATTEMPTS, REFERENCE_FPS};
use crate::sim::PopulationParams;

/// Driver settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Population seed
    pub seed: u64,
    /// Number of bodies
    pub count: u32,
    /// Frames to simulate
    pub frames: u32,
    /// Rate of the synthetic clock (frames per second)
    pub frame_rate: f32,
    /// Log a stats report every N frames (0 = never)
    pub report_every: u32,
    /// Rejected candidates allowed per body during placement
    pub max_placement_attempts: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 42,
            count: 20,
            frames: 600,
            frame_rate: REFERENCE_FPS,
            report_every: 60,
            max_placement_attempts: MAX_PLACEMENT_ATTEMPTS,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::debug!("No settings file given, using defaults");
            return Self::default();
        };

        match fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Population parameters derived from these settings
    pub fn population(&self) -> PopulationParams {
        PopulationParams {
            max_attempts: self.max_placement_attempts,
            ..Default::default()
        }
    }

    /// Effective clock rate (non-positive or non-finite values fall back to the reference rate)
    pub fn effective_frame_rate(&self) -> f32 {
        if self.frame_rate.is_finite() && self.frame_rate > 0.0 {
            self.frame_rate
        } else {
            REFERENCE_FPS
        }
    }

    /// Timestamp (seconds) of the given frame on the synthetic clock
    pub fn frame_time(&self, frame: u32) -> f32 {
        frame as f32 / self.effective_frame_rate()
    }
}
