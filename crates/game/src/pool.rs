//! Fixed-size sphere pool.

use glam::Vec3;
use tumble_physics::SphereBody;

/// A fixed pool of spheres reused round-robin.
///
/// All spheres are created up front, parked out of sight with zero velocity.
/// Launching reuses the slot after the one launched last, so once every
/// sphere is in play the oldest throw is recycled. Spheres are never added
/// or removed after construction.
#[derive(Debug, Clone)]
pub struct SpherePool {
    spheres: Vec<SphereBody>,

    /// Last published center of each sphere, one slot per sphere.
    transforms: Vec<Vec3>,

    /// Slot the next launch will use.
    next: usize,
}

impl SpherePool {
    /// Create `count` spheres of `radius` parked at `parked_position`.
    pub fn new(count: usize, radius: f32, parked_position: Vec3) -> Self {
        Self {
            spheres: vec![SphereBody::at_rest(parked_position, radius); count],
            transforms: vec![parked_position; count],
            next: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.spheres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }

    /// Slot the next launch will reuse.
    pub fn next_index(&self) -> usize {
        self.next
    }

    /// Launch the next sphere in the ring. Returns the slot used, or `None`
    /// for an empty pool.
    pub fn launch(&mut self, center: Vec3, velocity: Vec3) -> Option<usize> {
        let index = self.next;
        self.spheres.get_mut(index)?.launch(center, velocity);
        self.next = (index + 1) % self.spheres.len();
        Some(index)
    }

    pub fn spheres(&self) -> &[SphereBody] {
        &self.spheres
    }

    pub fn get(&self, index: usize) -> Option<&SphereBody> {
        self.spheres.get(index)
    }

    pub fn transforms(&self) -> &[Vec3] {
        &self.transforms
    }

    /// Bodies and their transform slots, borrowed together for integration.
    pub fn bodies_and_transforms(&mut self) -> (&mut [SphereBody], &mut [Vec3]) {
        (&mut self.spheres, &mut self.transforms)
    }
}
