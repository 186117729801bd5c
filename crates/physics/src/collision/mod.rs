//! Collision detection against the static world.
//!
//! # Key Types
//!
//! - [`CollisionWorld`]: The static level geometry, built once at startup
//! - [`WorldCollisionQuery`]: The read-only query seam used by the simulation
//! - [`Capsule`] / [`Sphere`]: Collider shapes
//! - [`Contact`]: Push-out normal and depth returned by a query
//!
//! # Query Algorithm
//!
//! A query places the collider in the world and pushes it out of each
//! penetrating brush in turn. The accumulated displacement is returned as a
//! single contact; applying `normal * depth` leaves the collider touching but
//! not overlapping the geometry.

mod shape;
mod world;

pub use shape::{Capsule, Contact, Sphere};
pub use world::{CollisionBrush, CollisionWorld, WorldCollisionQuery, WorldError};
