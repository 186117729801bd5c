//! Pairwise collision response between dynamic bodies.
//!
//! Both resolvers use the same response: the velocity components along the
//! contact normal are exchanged between the two bodies, as in a head-on
//! elastic collision between equal masses. Tangential velocity is untouched
//! and there is no angular response.
//!
//! ```text
//!    A ●──►      ◄──● B          A ●◄──      ──►● B
//!        va·n   vb·n      =>        vb·n   va·n
//! ```
//!
//! Overlap is removed by moving the bodies apart along the normal. Pairs
//! whose centers (nearly) coincide have no usable normal and are skipped.

use glam::Vec3;

use crate::body::{PlayerBody, SphereBody};

/// Pairwise elastic collision response.
#[derive(Debug, Clone, Copy)]
pub struct CollisionResolver {
    /// Center distances at or below this are treated as no contact.
    pub epsilon: f32,
}

impl Default for CollisionResolver {
    fn default() -> Self {
        Self { epsilon: 1e-6 }
    }
}

impl CollisionResolver {
    pub fn new(epsilon: f32) -> Self {
        Self { epsilon }
    }

    /// Resolve overlap between the player capsule and one sphere.
    ///
    /// The capsule is sampled at three points (segment start, segment end,
    /// and midpoint), each treated as a sphere of the capsule's radius. Each
    /// overlapping point exchanges normal velocity with the sphere and pushes
    /// the sphere out by half the penetration. Only the sphere is moved; the
    /// player is repositioned by its own world resolution.
    pub fn resolve_player_sphere(&self, player: &mut PlayerBody, sphere: &mut SphereBody) {
        let radius_sum = player.capsule.radius + sphere.collider.radius;
        let radius_sum_sq = radius_sum * radius_sum;

        let samples = [
            player.capsule.start,
            player.capsule.end,
            player.capsule.center(),
        ];

        for point in samples {
            let offset = point - sphere.collider.center;
            let distance_sq = offset.length_squared();
            if distance_sq >= radius_sum_sq {
                continue;
            }

            let distance = distance_sq.sqrt();
            if distance <= self.epsilon {
                continue;
            }

            // Points from the sphere towards the capsule
            let normal = offset / distance;
            exchange_normal_velocity(normal, &mut player.velocity, &mut sphere.velocity);

            let separation = (radius_sum - distance) * 0.5;
            sphere.collider.center -= normal * separation;
        }
    }

    /// Resolve overlap between every unordered pair of spheres.
    ///
    /// O(n²) in the number of spheres, which is fine for the small fixed
    /// pool the sandbox uses.
    pub fn resolve_sphere_sphere(&self, spheres: &mut [SphereBody]) {
        for i in 0..spheres.len() {
            let (head, tail) = spheres.split_at_mut(i + 1);
            let first = &mut head[i];

            for second in tail.iter_mut() {
                self.resolve_sphere_pair(first, second);
            }
        }
    }

    /// Resolve overlap between two spheres. Returns whether they were in
    /// contact.
    pub fn resolve_sphere_pair(&self, first: &mut SphereBody, second: &mut SphereBody) -> bool {
        let radius_sum = first.collider.radius + second.collider.radius;
        let offset = first.collider.center - second.collider.center;
        let distance_sq = offset.length_squared();

        if distance_sq >= radius_sum * radius_sum {
            return false;
        }

        let distance = distance_sq.sqrt();
        if distance <= self.epsilon {
            return false;
        }

        // Points from the second sphere towards the first
        let normal = offset / distance;
        exchange_normal_velocity(normal, &mut first.velocity, &mut second.velocity);

        let separation = (radius_sum - distance) * 0.5;
        first.collider.center += normal * separation;
        second.collider.center -= normal * separation;

        true
    }
}

/// Swap the components of `a` and `b` along `normal`.
#[inline]
fn exchange_normal_velocity(normal: Vec3, a: &mut Vec3, b: &mut Vec3) {
    let a_normal = normal * normal.dot(*a);
    let b_normal = normal * normal.dot(*b);

    *a += b_normal - a_normal;
    *b += a_normal - b_normal;
}

// ============================================================================
// Tests
// ============================================================================
