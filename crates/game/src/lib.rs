//! Tumble Game Logic
//!
//! This crate drives the sandbox on top of `tumble-physics`:
//!
//! - Configuration loading and validation
//! - Input events and held key state
//! - The fixed sphere pool
//! - Level geometry and lights
//! - The substepped frame loop
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Simulation                             │
//! │  ┌─────────┐    ┌───────────────────┐    ┌────────────────┐  │
//! │  │ Input   │───►│ Physics substeps  │───►│ TransformSink  │  │
//! │  │ actions │    │ (player, spheres, │    │ (camera,       │  │
//! │  └─────────┘    │  pair resolution) │    │  sphere slots) │  │
//! │                 └───────────────────┘    └────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod input;
pub mod level;
pub mod pool;
pub mod simulation;

// Re-export main types
pub use config::{ConfigError, SimulationConfig};
pub use input::{Action, InputAction, InputState};
pub use level::{Level, LevelError, LightSource};
pub use pool::SpherePool;
pub use simulation::{Simulation, TransformSink};

// Re-export physics types for convenience
pub use tumble_physics::{
    Capsule, CollisionWorld, PhysicsConfig, PlayerBody, ScreenButton, SphereBody, ViewAngles,
};
