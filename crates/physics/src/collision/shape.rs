//! Collider shapes and contact results.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A line segment swept by a radius.
///
/// Used as the player's collision volume. The segment is stored in world
/// space; moving the capsule translates both endpoints so the segment length
/// never changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Capsule {
    /// Lower endpoint of the segment (feet).
    pub start: Vec3,
    /// Upper endpoint of the segment (eyes).
    pub end: Vec3,
    /// Radius around the segment.
    pub radius: f32,
}

impl Capsule {
    /// Create a capsule from its segment endpoints and radius.
    pub fn new(start: Vec3, end: Vec3, radius: f32) -> Self {
        Self { start, end, radius }
    }

    /// Midpoint of the segment.
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.start + self.end) * 0.5
    }

    /// Move both endpoints by `offset`.
    #[inline]
    pub fn translate(&mut self, offset: Vec3) {
        self.start += offset;
        self.end += offset;
    }
}

/// A sphere collider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    #[inline]
    pub fn translate(&mut self, offset: Vec3) {
        self.center += offset;
    }
}

/// Result of a collider-vs-world query.
///
/// Moving the queried collider by `normal * depth` takes it out of the
/// world geometry. Produced by a query and consumed immediately.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit push-out direction, pointing away from the world surface.
    pub normal: Vec3,
    /// Penetration depth along `normal` (never negative).
    pub depth: f32,
}

impl Contact {
    /// Build a contact from a total push-out displacement.
    ///
    /// Returns `None` when the displacement is too small to give a
    /// meaningful direction.
    pub fn from_displacement(displacement: Vec3) -> Option<Self> {
        let depth = displacement.length();
        if depth <= Self::MIN_DEPTH {
            return None;
        }
        Some(Self {
            normal: displacement / depth,
            depth,
        })
    }

    /// Displacements shorter than this have no usable direction and are
    /// reported as no contact.
    pub const MIN_DEPTH: f32 = 1e-9;

    /// The displacement that resolves this contact.
    #[inline]
    pub fn push_out(&self) -> Vec3 {
        self.normal * self.depth
    }

    /// Whether the contact surface faces upward (walkable floor).
    #[inline]
    pub fn is_floor(&self) -> bool {
        self.normal.y > 0.0
    }
}
