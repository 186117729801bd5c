//! Player movement.
//!
//! This module turns held input into player motion:
//!
//! - Ground and air control with different acceleration
//! - Jumping from the floor
//! - Gravity and exponential damping
//! - Sliding along walls after world collision
//!
//! # Design
//!
//! Movement is controlled by the [`PlayerController`], which takes a
//! [`PlayerCommand`] built from the held keys and the current
//! [`ViewAngles`] and advances a [`PlayerBody`](crate::body::PlayerBody)
//! through the collision world.

mod controller;
mod state;

pub use controller::PlayerController;
pub use state::{horizontal_forward, horizontal_side, PlayerCommand, ScreenButton, ViewAngles};
