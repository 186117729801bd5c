//! Sphere integration.
//!
//! Spheres fly under gravity, bounce off the static world, and collide with
//! the player and each other through the [`CollisionResolver`].

use glam::Vec3;

use crate::body::{PlayerBody, SphereBody};
use crate::collision::WorldCollisionQuery;
use crate::config::PhysicsConfig;
use crate::resolver::CollisionResolver;

/// Integrates the sphere pool one substep at a time.
#[derive(Debug, Clone)]
pub struct SphereSimulator {
    pub config: PhysicsConfig,
    resolver: CollisionResolver,
}

impl SphereSimulator {
    pub fn new(config: PhysicsConfig) -> Self {
        let resolver = CollisionResolver::new(config.contact_epsilon);
        Self { config, resolver }
    }

    pub fn with_default_config() -> Self {
        Self::new(PhysicsConfig::default())
    }

    /// Advance every sphere by one substep.
    ///
    /// Each sphere moves, resolves against the world, is damped and then
    /// pushed away from the player. Once all spheres have moved, sphere
    /// pairs are resolved and the final centers are written to `transforms`
    /// (slot `i` receives sphere `i`; extra slots on either side are left
    /// alone).
    pub fn integrate<W>(
        &self,
        spheres: &mut [SphereBody],
        player: &mut PlayerBody,
        world: &W,
        delta_time: f32,
        transforms: &mut [Vec3],
    ) where
        W: WorldCollisionQuery + ?Sized,
    {
        let damping = self.config.sphere_damping_factor(delta_time);

        for sphere in spheres.iter_mut() {
            self.step_sphere(sphere, world, delta_time, damping);
            self.resolver.resolve_player_sphere(player, sphere);
        }

        self.resolver.resolve_sphere_sphere(spheres);

        for (slot, sphere) in transforms.iter_mut().zip(spheres.iter()) {
            *slot = sphere.center();
        }
    }

    /// Move a single sphere and resolve it against the world.
    fn step_sphere<W>(&self, sphere: &mut SphereBody, world: &W, delta_time: f32, damping: f32)
    where
        W: WorldCollisionQuery + ?Sized,
    {
        sphere.collider.translate(sphere.velocity * delta_time);

        match world.sphere_intersect(&sphere.collider) {
            Some(contact) => {
                let normal_speed = contact.normal.dot(sphere.velocity);
                sphere.velocity -= contact.normal * normal_speed * self.config.world_restitution;
                sphere.collider.translate(contact.push_out());
            }
            None => {
                sphere.velocity.y -= self.config.gravity * delta_time;
            }
        }

        sphere.velocity += sphere.velocity * damping;
    }
}

// ============================================================================
// Tests
// ============================================================================
