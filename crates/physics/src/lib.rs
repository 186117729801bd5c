//! Tumble Physics Engine
//!
//! Substepped physics for a first-person sandbox: a player capsule and a
//! pool of dynamic spheres moving through a static collision world.
//!
//! # Architecture
//!
//! - **Collision**: capsule and sphere queries against the static world,
//!   returning the total push-out contact
//! - **Movement**: player control, gravity, damping and floor contact
//! - **Spheres**: sphere integration and world bounces
//! - **Resolver**: equal-mass elastic response between bodies
//!
//! Each module advances one substep per call; the caller decides how a frame
//! is divided into substeps. Identical inputs produce identical results.

pub mod body;
pub mod collision;
pub mod config;
pub mod movement;
pub mod resolver;
pub mod spheres;

// Re-export commonly used types
pub use body::{PlayerBody, SphereBody};
pub use collision::{
    Capsule, CollisionWorld, Contact, Sphere, WorldCollisionQuery, WorldError,
};
pub use config::PhysicsConfig;
pub use movement::{PlayerCommand, PlayerController, ScreenButton, ViewAngles};
pub use resolver::CollisionResolver;
pub use spheres::SphereSimulator;
