//! Dynamic bodies: colliders with a velocity.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::collision::{Capsule, Sphere};

/// The player's physics state.
///
/// There is exactly one player body. It is never destroyed; falling out of
/// the world is handled by resetting its capsule to the spawn pose.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerBody {
    /// Collision volume. The upper endpoint is the eye position.
    pub capsule: Capsule,

    /// Velocity in world space (units/second).
    pub velocity: Vec3,

    /// Whether the last world contact had an upward-facing normal.
    pub on_floor: bool,
}

impl PlayerBody {
    /// Create a player at rest with the given capsule.
    pub fn new(capsule: Capsule) -> Self {
        Self {
            capsule,
            velocity: Vec3::ZERO,
            on_floor: false,
        }
    }

    /// Eye position used as the camera position.
    #[inline]
    pub fn eye_position(&self) -> Vec3 {
        self.capsule.end
    }

    /// Collision radius.
    #[inline]
    pub fn radius(&self) -> f32 {
        self.capsule.radius
    }
}

/// A dynamic sphere (thrown ball).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SphereBody {
    pub collider: Sphere,
    pub velocity: Vec3,
}

impl SphereBody {
    /// A sphere at rest at `center`.
    pub fn at_rest(center: Vec3, radius: f32) -> Self {
        Self {
            collider: Sphere::new(center, radius),
            velocity: Vec3::ZERO,
        }
    }

    /// Reassign this body to a new launch position and velocity.
    pub fn launch(&mut self, center: Vec3, velocity: Vec3) {
        self.collider.center = center;
        self.velocity = velocity;
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        self.collider.center
    }
}
