//! Physics tuning constants.
//!
//! All physics parameters are grouped here for easy tuning. Units are
//! world units (roughly meters) and seconds.

use serde::{Deserialize, Serialize};

/// Configuration for player and sphere physics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    // ========================================================================
    // Shared
    // ========================================================================
    /// Gravity acceleration (units/second²).
    pub gravity: f32,

    // ========================================================================
    // Player
    // ========================================================================
    /// Horizontal speed gained per second of held movement while on the floor.
    pub ground_acceleration: f32,

    /// Horizontal speed gained per second of held movement while airborne.
    pub air_acceleration: f32,

    /// Vertical speed set by a jump from the floor.
    pub jump_velocity: f32,

    /// Exponential damping rate while on the floor (1/second).
    pub ground_damping: f32,

    /// Multiplier on the damping while airborne.
    pub air_damping_scale: f32,

    /// Velocity added by an on-screen direction button.
    pub button_impulse: f32,

    /// Vertical speed set by the on-screen jump button.
    pub button_jump_velocity: f32,

    // ========================================================================
    // Spheres
    // ========================================================================
    /// Exponential damping rate for spheres (1/second).
    pub sphere_damping: f32,

    /// Multiplier on the normal velocity reflected on world contact.
    ///
    /// 1.0 stops the sphere against the surface, 2.0 is a perfect mirror
    /// bounce. The default of 1.5 gives a lively bounce.
    pub world_restitution: f32,

    // ========================================================================
    // Pair resolution
    // ========================================================================
    /// Center distance below which a pair is treated as coincident and
    /// skipped.
    pub contact_epsilon: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 50.0,

            ground_acceleration: 15.0,
            air_acceleration: 8.0,
            jump_velocity: 15.0,
            ground_damping: 4.0,
            air_damping_scale: 0.1,
            button_impulse: 5.0,
            button_jump_velocity: 30.0,

            sphere_damping: 1.5,
            world_restitution: 1.5,

            contact_epsilon: 1e-6,
        }
    }
}

impl PhysicsConfig {
    /// Speed change per step for held movement input.
    ///
    /// Airborne control is weaker so that a jump, once made, mostly follows
    /// its arc.
    pub fn speed_delta(&self, on_floor: bool, delta_time: f32) -> f32 {
        let acceleration = if on_floor {
            self.ground_acceleration
        } else {
            self.air_acceleration
        };
        delta_time * acceleration
    }

    /// Additive player damping factor for one step: `exp(-k·dt) - 1`, scaled
    /// down while airborne.
    pub fn player_damping(&self, on_floor: bool, delta_time: f32) -> f32 {
        let damping = (-self.ground_damping * delta_time).exp() - 1.0;
        if on_floor {
            damping
        } else {
            damping * self.air_damping_scale
        }
    }

    /// Additive sphere damping factor for one step.
    pub fn sphere_damping_factor(&self, delta_time: f32) -> f32 {
        (-self.sphere_damping * delta_time).exp() - 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PhysicsConfig::default();
        assert_eq!(config.gravity, 50.0);
        assert_eq!(config.jump_velocity, 15.0);
        assert_eq!(config.world_restitution, 1.5);
    }

    #[test]
    fn test_speed_delta() {
        let config = PhysicsConfig::default();

        assert!((config.speed_delta(true, 0.01) - 0.15).abs() < 1e-6);
        assert!((config.speed_delta(false, 0.01) - 0.08).abs() < 1e-6);
    }

    #[test]
    fn test_damping_factors() {
        let config = PhysicsConfig::default();
        let dt = 0.01;

        let ground = config.player_damping(true, dt);
        let air = config.player_damping(false, dt);

        assert!((ground - ((-0.04f32).exp() - 1.0)).abs() < 1e-7);
        assert!((air - ground * 0.1).abs() < 1e-7);
        // Damping only ever slows things down
        assert!(ground < 0.0 && air < 0.0 && air > ground);

        let sphere = config.sphere_damping_factor(dt);
        assert!((sphere - ((-0.015f32).exp() - 1.0)).abs() < 1e-7);
    }
}
