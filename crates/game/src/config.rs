//! Simulation configuration.
//!
//! Every tuning constant of the sandbox lives in [`SimulationConfig`]. The
//! defaults reproduce the stock behavior; a TOML file may override any
//! subset of fields.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tumble_physics::{Capsule, PhysicsConfig};

/// Errors raised while loading or validating a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

/// Game simulation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // ========================================================================
    // Loop
    // ========================================================================
    /// Physics substeps run per rendered frame.
    pub steps_per_frame: u32,

    /// Longest frame time (seconds) the loop will simulate in one frame.
    pub max_frame_time: f32,

    /// Frames between maintenance passes.
    pub maintenance_interval: u64,

    // ========================================================================
    // Player
    // ========================================================================
    /// View positions at or below this height count as out of bounds.
    pub out_of_bounds_y: f32,

    /// Capsule the player starts in and is reset to.
    pub spawn: Capsule,

    /// Yaw change per pixel of pointer drag (radians).
    pub mouse_sensitivity: f32,

    /// Yaw change per pixel of touch drag (radians).
    pub touch_sensitivity: f32,

    // ========================================================================
    // Spheres
    // ========================================================================
    /// Size of the sphere pool.
    pub sphere_count: usize,

    pub sphere_radius: f32,

    /// Where unused spheres wait, far below the level.
    pub parked_position: Vec3,

    // ========================================================================
    // Throwing
    // ========================================================================
    /// Launch speed of an uncharged throw.
    pub throw_base_impulse: f32,

    /// Extra launch speed a fully charged throw approaches.
    pub throw_charge_impulse: f32,

    /// Charge rate (1/millisecond).
    pub throw_charge_rate: f32,

    /// Spawn distance in front of the eye, in player radii.
    pub throw_spawn_offset: f32,

    /// How much of the player's velocity a thrown sphere inherits.
    pub throw_velocity_inheritance: f32,

    // ========================================================================
    // Lights
    // ========================================================================
    /// Point lights farther than this from the view are hidden.
    pub light_visibility_distance: f32,

    /// Player and sphere physics.
    pub physics: PhysicsConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            steps_per_frame: 5,
            max_frame_time: 0.05,
            maintenance_interval: 30,

            out_of_bounds_y: -25.0,
            spawn: Capsule::new(Vec3::new(0.0, 0.35, 0.0), Vec3::new(0.0, 1.0, 0.0), 0.35),
            mouse_sensitivity: 1.0 / 500.0,
            touch_sensitivity: 1.0 / 2500.0,

            sphere_count: 100,
            sphere_radius: 0.2,
            parked_position: Vec3::new(0.0, -100.0, 0.0),

            throw_base_impulse: 15.0,
            throw_charge_impulse: 30.0,
            throw_charge_rate: 0.001,
            throw_spawn_offset: 1.5,
            throw_velocity_inheritance: 2.0,

            light_visibility_distance: 8.0,

            physics: PhysicsConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Parse a configuration from TOML. Missing fields take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.steps_per_frame == 0 {
            return Err(invalid("steps_per_frame", "must be at least 1"));
        }
        if self.maintenance_interval == 0 {
            return Err(invalid("maintenance_interval", "must be at least 1"));
        }
        if self.sphere_count == 0 {
            return Err(invalid("sphere_count", "must be at least 1"));
        }
        if !is_positive(self.max_frame_time) {
            return Err(invalid("max_frame_time", "must be positive"));
        }
        if !is_positive(self.sphere_radius) {
            return Err(invalid("sphere_radius", "must be positive"));
        }
        if !is_positive(self.spawn.radius) {
            return Err(invalid("spawn.radius", "must be positive"));
        }
        if self.spawn.start.y >= self.spawn.end.y {
            return Err(invalid("spawn", "start must be below end"));
        }
        Ok(())
    }

    /// Substep length for a frame that took `elapsed` seconds.
    ///
    /// Long frames are clamped so a stall never produces one huge step.
    /// Negative or NaN elapsed time simulates nothing.
    pub fn substep_delta(&self, elapsed: f32) -> f32 {
        let elapsed = if elapsed.is_nan() { 0.0 } else { elapsed.max(0.0) };
        elapsed.min(self.max_frame_time) / self.steps_per_frame as f32
    }

    /// Launch speed for a throw charged for `held_ms` milliseconds.
    ///
    /// Rises from the base impulse towards base + charge, never reaching it.
    pub fn charge_impulse(&self, held_ms: f32) -> f32 {
        let held_ms = if held_ms.is_nan() { 0.0 } else { held_ms.max(0.0) };
        self.throw_base_impulse
            + self.throw_charge_impulse * (1.0 - (-self.throw_charge_rate * held_ms).exp())
    }
}

fn is_positive(value: f32) -> bool {
    value > 0.0
}

fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

// ============================================================================
// Tests
// ============================================================================
