//! Static collision world.
//!
//! The collision world stores the level geometry and answers capsule/sphere
//! intersection queries against it. It is built once at startup and never
//! mutated while the simulation runs.

use glam::Vec3;
use parry3d::math::{Isometry, Point, Real};
use parry3d::query;
use parry3d::shape::{Ball, Segment, Shape, SharedShape};

use super::shape::{Capsule, Contact, Sphere};

/// Errors raised while building collision geometry.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    #[error("triangle mesh has no triangles")]
    EmptyMesh,

    #[error("triangle index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
}

/// Read-only intersection queries against static geometry.
///
/// This is the seam between the dynamic simulation and whatever spatial
/// index holds the level. A query returns the displacement that takes the
/// collider out of the world, expressed as a unit normal and a depth.
pub trait WorldCollisionQuery {
    /// Intersect a capsule with the world.
    fn capsule_intersect(&self, capsule: &Capsule) -> Option<Contact>;

    /// Intersect a sphere with the world.
    fn sphere_intersect(&self, sphere: &Sphere) -> Option<Contact>;
}

/// A piece of collision geometry in the world.
#[derive(Debug, Clone)]
pub struct CollisionBrush {
    /// Unique identifier for this brush.
    pub id: u32,
    /// The collision shape.
    pub shape: SharedShape,
    /// Position in world space.
    pub transform: Isometry<Real>,
}

/// The collision world containing all static geometry.
///
/// Supports axis-aligned boxes and triangle meshes. Queries push a copy of
/// the collider out of every penetrating brush in turn and report the total
/// displacement, so a collider wedged into a corner is resolved against both
/// walls in a single query.
///
/// # Thread Safety
///
/// The collision world is immutable after construction and can be safely
/// shared across threads.
#[derive(Debug, Default)]
pub struct CollisionWorld {
    brushes: Vec<CollisionBrush>,
    next_id: u32,
}

impl CollisionWorld {
    /// Create an empty collision world.
    pub fn new() -> Self {
        Self {
            brushes: Vec::new(),
            next_id: 0,
        }
    }

    /// Add an axis-aligned box to the world.
    ///
    /// # Arguments
    ///
    /// * `center` - Center position of the box in world space
    /// * `half_extents` - Half-size in each axis (x, y, z)
    pub fn add_box(&mut self, center: Vec3, half_extents: Vec3) -> u32 {
        let shape = SharedShape::cuboid(half_extents.x, half_extents.y, half_extents.z);
        let transform = Isometry::translation(center.x, center.y, center.z);
        self.push_brush(shape, transform)
    }

    /// Add a triangle mesh to the world.
    ///
    /// # Arguments
    ///
    /// * `vertices` - Mesh vertex positions in world space
    /// * `indices` - Triangle indices (3 per triangle)
    pub fn add_triangle_mesh(
        &mut self,
        vertices: &[Vec3],
        indices: &[[u32; 3]],
    ) -> Result<u32, WorldError> {
        if indices.is_empty() {
            return Err(WorldError::EmptyMesh);
        }
        if let Some(&index) = indices
            .iter()
            .flatten()
            .find(|&&i| i as usize >= vertices.len())
        {
            return Err(WorldError::IndexOutOfRange {
                index,
                vertex_count: vertices.len(),
            });
        }

        let points: Vec<Point<Real>> = vertices.iter().map(|v| to_point(*v)).collect();
        let shape = SharedShape::trimesh(points, indices.to_vec());

        log::debug!(
            "added triangle mesh: {} vertices, {} triangles",
            vertices.len(),
            indices.len()
        );

        Ok(self.push_brush(shape, Isometry::identity()))
    }

    /// Get the number of collision brushes.
    pub fn brush_count(&self) -> usize {
        self.brushes.len()
    }

    fn push_brush(&mut self, shape: SharedShape, transform: Isometry<Real>) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.brushes.push(CollisionBrush {
            id,
            shape,
            transform,
        });
        id
    }

    /// Total displacement that takes `shape`, inflated by `margin` and placed
    /// at `origin`, out of all brushes. Each brush sees the shape already
    /// moved out of the previous ones.
    ///
    /// Rounded shapes are queried as their core plus a margin: the core stays
    /// outside the brush for any penetration shallower than the margin, so
    /// the query is a plain closest-points problem rather than a penetration
    /// one.
    fn push_out(&self, shape: &dyn Shape, margin: f32, origin: Vec3) -> Vec3 {
        let mut offset = Vec3::ZERO;

        for brush in &self.brushes {
            let at = origin + offset;
            let position = Isometry::translation(at.x, at.y, at.z);

            if let Ok(Some(contact)) = query::contact(
                &position,
                shape,
                &brush.transform,
                brush.shape.as_ref(),
                margin,
            ) {
                // Distance below the margin means penetration
                let depth = margin - contact.dist;
                if depth > 0.0 {
                    // normal2 points out of the brush, towards the collider
                    let normal = Vec3::new(contact.normal2.x, contact.normal2.y, contact.normal2.z);
                    offset += normal * depth;
                }
            }
        }

        offset
    }
}

impl WorldCollisionQuery for CollisionWorld {
    fn capsule_intersect(&self, capsule: &Capsule) -> Option<Contact> {
        let center = capsule.center();
        let core = Segment::new(
            to_point(capsule.start - center),
            to_point(capsule.end - center),
        );
        Contact::from_displacement(self.push_out(&core, capsule.radius, center))
    }

    fn sphere_intersect(&self, sphere: &Sphere) -> Option<Contact> {
        let shape = Ball::new(sphere.radius);
        Contact::from_displacement(self.push_out(&shape, 0.0, sphere.center))
    }
}

#[inline]
fn to_point(v: Vec3) -> Point<Real> {
    Point::new(v.x, v.y, v.z)
}

// ============================================================================
// Tests
// ============================================================================
