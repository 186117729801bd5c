//! Level loading and management.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tumble_physics::{CollisionWorld, WorldError};

/// Errors raised while building a level.
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("invalid level geometry: {0}")]
    Geometry(#[from] WorldError),
}

/// A level: static collision geometry plus point lights.
///
/// The collision world is read-only once the level is built; only light
/// visibility changes while the simulation runs.
#[derive(Debug)]
pub struct Level {
    /// Level identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Collision world for physics.
    pub collision: CollisionWorld,

    /// Point lights.
    pub lights: Vec<LightSource>,
}

/// A point light in the level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightSource {
    /// Position in world space.
    pub position: Vec3,

    /// Light color (RGB, 0-1).
    pub color: Vec3,

    /// Light intensity.
    pub intensity: f32,

    /// Distance at which the light falls off to nothing.
    pub range: f32,

    /// Whether the light is currently switched on.
    pub visible: bool,
}

impl LightSource {
    /// A white point light, initially hidden.
    pub fn point(position: Vec3, range: f32) -> Self {
        Self {
            position,
            color: Vec3::ONE,
            intensity: 5.0,
            range,
            visible: false,
        }
    }
}

impl Level {
    /// Create an empty level.
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            collision: CollisionWorld::new(),
            lights: Vec::new(),
        }
    }

    /// Build a level from a loaded static mesh.
    ///
    /// `triangles` index into `vertices`. The mesh becomes the level's only
    /// collision geometry.
    pub fn from_mesh(
        id: &str,
        name: &str,
        vertices: &[Vec3],
        triangles: &[[u32; 3]],
    ) -> Result<Self, LevelError> {
        let mut level = Self::new(id, name);
        level.collision.add_triangle_mesh(vertices, triangles)?;

        log::info!(
            "Built level '{}' from mesh: {} vertices, {} triangles",
            level.id,
            vertices.len(),
            triangles.len()
        );

        Ok(level)
    }

    /// Create a simple walled room for development and headless runs.
    ///
    /// The room is 40x40 units with 5 unit walls, a few crates to bounce
    /// spheres off, and the four house lights. The first light starts on.
    pub fn test_room() -> Self {
        let mut level = Self::new("test_room", "Test Room");

        // Floor
        level
            .collision
            .add_box(Vec3::new(0.0, -0.5, 0.0), Vec3::new(20.0, 0.5, 20.0));

        // Walls
        let wall_height = 5.0;
        let wall_thickness = 0.5;
        let room_size = 20.0;

        // North wall
        level.collision.add_box(
            Vec3::new(0.0, wall_height / 2.0, -room_size),
            Vec3::new(room_size, wall_height / 2.0, wall_thickness),
        );

        // South wall
        level.collision.add_box(
            Vec3::new(0.0, wall_height / 2.0, room_size),
            Vec3::new(room_size, wall_height / 2.0, wall_thickness),
        );

        // East wall
        level.collision.add_box(
            Vec3::new(room_size, wall_height / 2.0, 0.0),
            Vec3::new(wall_thickness, wall_height / 2.0, room_size),
        );

        // West wall
        level.collision.add_box(
            Vec3::new(-room_size, wall_height / 2.0, 0.0),
            Vec3::new(wall_thickness, wall_height / 2.0, room_size),
        );

        // Some crates
        level
            .collision
            .add_box(Vec3::new(-6.0, 1.0, -8.0), Vec3::new(1.5, 1.0, 1.5));
        level
            .collision
            .add_box(Vec3::new(8.0, 0.5, -4.0), Vec3::new(1.0, 0.5, 3.0));

        // Lights
        level.lights.push(LightSource::point(Vec3::new(-0.6, 4.0, 0.0), 70.0));
        level.lights.push(LightSource::point(Vec3::new(5.0, 4.0, -6.6), 30.0));
        level.lights.push(LightSource::point(Vec3::new(21.0, 4.0, -2.0), 50.0));
        level.lights.push(LightSource::point(Vec3::new(16.0, 4.0, -12.0), 50.0));
        level.lights[0].visible = true;

        log::info!(
            "Built level '{}': {} brushes, {} lights",
            level.id,
            level.collision.brush_count(),
            level.lights.len()
        );

        level
    }

    /// Switch on exactly the lights within `max_distance` of `view_position`.
    ///
    /// Returns the number of visible lights.
    pub fn update_light_visibility(&mut self, view_position: Vec3, max_distance: f32) -> usize {
        let mut visible = 0;

        for light in &mut self.lights {
            light.visible = light.position.distance(view_position) < max_distance;
            if light.visible {
                visible += 1;
            }
        }

        visible
    }

    pub fn visible_light_count(&self) -> usize {
        self.lights.iter().filter(|light| light.visible).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tumble_physics::{Sphere, WorldCollisionQuery};

    #[test]
    fn test_level_creation() {
        let level = Level::new("test", "Test Level");
        assert_eq!(level.id, "test");
        assert_eq!(level.collision.brush_count(), 0);
        assert!(level.lights.is_empty());
    }

    #[test]
    fn test_test_room() {
        let level = Level::test_room();
        assert!(level.collision.brush_count() > 0);
        assert_eq!(level.lights.len(), 4);
        assert_eq!(level.visible_light_count(), 1);

        // Floor at y=0 under the spawn
        let resting = Sphere::new(Vec3::new(0.0, 0.1, 0.0), 0.2);
        let contact = level.collision.sphere_intersect(&resting).unwrap();
        assert!(contact.is_floor());
    }

    #[test]
    fn test_light_visibility() {
        let mut level = Level::test_room();

        // Standing under the second light
        let visible = level.update_light_visibility(Vec3::new(5.0, 1.0, -6.6), 8.0);
        assert_eq!(visible, 1);
        assert!(!level.lights[0].visible);
        assert!(level.lights[1].visible);

        // Between the first two lights both are in range
        let visible = level.update_light_visibility(Vec3::new(2.0, 1.0, -3.0), 8.0);
        assert_eq!(visible, 2);

        // Far away everything goes dark
        let visible = level.update_light_visibility(Vec3::new(0.0, -40.0, 0.0), 8.0);
        assert_eq!(visible, 0);
    }

    #[test]
    fn test_from_mesh() {
        let vertices = [
            Vec3::new(-10.0, 0.0, -10.0),
            Vec3::new(10.0, 0.0, -10.0),
            Vec3::new(10.0, 0.0, 10.0),
            Vec3::new(-10.0, 0.0, 10.0),
        ];
        let triangles = [[0, 2, 1], [0, 3, 2]];

        let level = Level::from_mesh("mesh", "Mesh", &vertices, &triangles).unwrap();
        assert_eq!(level.collision.brush_count(), 1);

        let err = Level::from_mesh("bad", "Bad", &vertices, &[[0, 1, 9]]).unwrap_err();
        assert!(matches!(
            err,
            LevelError::Geometry(WorldError::IndexOutOfRange { index: 9, .. })
        ));
    }
}
