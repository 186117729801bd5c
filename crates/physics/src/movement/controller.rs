//! Player movement controller.
//!
//! This is the main entry point for player movement. It turns input
//! commands into velocity changes and integrates the player capsule through
//! the collision world.

use glam::Vec3;

use crate::body::PlayerBody;
use crate::collision::WorldCollisionQuery;
use crate::config::PhysicsConfig;

use super::state::{horizontal_forward, horizontal_side, PlayerCommand, ScreenButton};

/// Player movement controller.
///
/// Handles all player movement physics:
/// - Ground and air control
/// - Jumping
/// - Gravity and exponential damping
/// - World collision response
///
/// # Example
///
/// ```ignore
/// let controller = PlayerController::new(PhysicsConfig::default());
/// let mut player = PlayerBody::new(spawn_capsule);
///
/// // Each substep:
/// controller.apply_controls(&mut player, &command, dt);
/// controller.integrate(&mut player, &world, dt);
/// ```
#[derive(Debug, Clone)]
pub struct PlayerController {
    /// Physics configuration.
    pub config: PhysicsConfig,
}

impl PlayerController {
    /// Create a new player controller with the given configuration.
    pub fn new(config: PhysicsConfig) -> Self {
        Self { config }
    }

    /// Create a controller with default configuration.
    pub fn with_default_config() -> Self {
        Self::new(PhysicsConfig::default())
    }

    // ========================================================================
    // Controls
    // ========================================================================

    /// Horizontal velocity change for one substep of held movement input.
    pub fn control_delta(&self, command: &PlayerCommand, on_floor: bool, delta_time: f32) -> Vec3 {
        if !command.has_movement_input() {
            return Vec3::ZERO;
        }

        let speed_delta = self.config.speed_delta(on_floor, delta_time);
        let forward = horizontal_forward(command.view_direction);
        let side = horizontal_side(command.view_direction);

        (forward * command.forward_move + side * command.right_move) * speed_delta
    }

    /// Apply held input to the player's velocity for one substep.
    ///
    /// Jumping only works from the floor and sets (rather than adds to) the
    /// vertical velocity, so holding jump never stacks.
    pub fn apply_controls(&self, player: &mut PlayerBody, command: &PlayerCommand, delta_time: f32) {
        player.velocity += self.control_delta(command, player.on_floor, delta_time);

        if player.on_floor && command.jump {
            player.velocity.y = self.config.jump_velocity;
        }
    }

    /// Apply a tapped on-screen button.
    ///
    /// Button impulses are immediate and ignore floor contact.
    pub fn apply_button(&self, player: &mut PlayerBody, button: ScreenButton, view_direction: Vec3) {
        let impulse = self.config.button_impulse;

        match button {
            ScreenButton::Up => player.velocity += horizontal_forward(view_direction) * impulse,
            ScreenButton::Down => player.velocity -= horizontal_forward(view_direction) * impulse,
            ScreenButton::Left => player.velocity -= horizontal_side(view_direction) * impulse,
            ScreenButton::Right => player.velocity += horizontal_side(view_direction) * impulse,
            ScreenButton::Jump => player.velocity.y = self.config.button_jump_velocity,
        }
    }

    // ========================================================================
    // Integration
    // ========================================================================

    /// Advance the player by one substep.
    ///
    /// Applies gravity when airborne, damping, and the velocity, then
    /// resolves the capsule against the world.
    pub fn integrate<W>(&self, player: &mut PlayerBody, world: &W, delta_time: f32)
    where
        W: WorldCollisionQuery + ?Sized,
    {
        let damping = self.config.player_damping(player.on_floor, delta_time);

        if !player.on_floor {
            player.velocity.y -= self.config.gravity * delta_time;
        }

        player.velocity += player.velocity * damping;

        let delta_position = player.velocity * delta_time;
        player.capsule.translate(delta_position);

        self.resolve_world_collision(player, world);
    }

    /// Push the capsule out of the world and update floor contact.
    ///
    /// An upward-facing contact counts as floor. Any other contact removes
    /// the velocity component into the surface so the player slides along
    /// walls and ceilings instead of sticking.
    pub fn resolve_world_collision<W>(&self, player: &mut PlayerBody, world: &W)
    where
        W: WorldCollisionQuery + ?Sized,
    {
        player.on_floor = false;

        let Some(contact) = world.capsule_intersect(&player.capsule) else {
            return;
        };

        player.on_floor = contact.is_floor();

        if !player.on_floor {
            player.velocity -= contact.normal * contact.normal.dot(player.velocity);
        }

        player.capsule.translate(contact.push_out());
    }
}

// ============================================================================
// Tests
// ============================================================================
