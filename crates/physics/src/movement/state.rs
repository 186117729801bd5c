//! View orientation and per-step movement commands.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// First-person view orientation.
///
/// Rotation is applied yaw first (around world Y), then pitch (around the
/// rotated X axis). At rest the view looks down -Z.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewAngles {
    /// Looking up/down, radians. Positive looks up.
    pub pitch: f32,
    /// Looking left/right, radians. Positive turns left.
    pub yaw: f32,
}

impl ViewAngles {
    /// Pitch is kept just short of straight up/down so the horizontal
    /// forward vector never degenerates.
    pub const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

    pub fn new(pitch: f32, yaw: f32) -> Self {
        Self { pitch, yaw }
    }

    /// Rotate the view by the given deltas (radians).
    ///
    /// Non-finite deltas are ignored so a bad input event cannot poison the
    /// view.
    pub fn rotate(&mut self, pitch_delta: f32, yaw_delta: f32) {
        if !pitch_delta.is_finite() || !yaw_delta.is_finite() {
            return;
        }

        self.pitch = (self.pitch + pitch_delta).clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);

        // Normalize yaw to -PI..PI
        let yaw = self.yaw + yaw_delta + PI;
        self.yaw = yaw.rem_euclid(TAU) - PI;
    }

    /// Full look direction including pitch (unit length).
    pub fn look_direction(&self) -> Vec3 {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();

        Vec3::new(-sin_yaw * cos_pitch, sin_pitch, -cos_yaw * cos_pitch)
    }
}

/// Forward direction on the horizontal plane for a look direction.
///
/// The vertical component is dropped and the rest renormalized. Looking
/// straight up or down gives zero.
#[inline]
pub fn horizontal_forward(look_direction: Vec3) -> Vec3 {
    Vec3::new(look_direction.x, 0.0, look_direction.z).normalize_or_zero()
}

/// Strafe-right direction for a look direction: forward crossed with world up.
#[inline]
pub fn horizontal_side(look_direction: Vec3) -> Vec3 {
    horizontal_forward(look_direction).cross(Vec3::Y)
}

/// Movement intent for a single substep.
///
/// Built from the held keys and the current view. Forward and strafe add
/// independently, so a diagonal is faster than a straight line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerCommand {
    /// Forward/backward movement: -1, 0 or 1.
    /// Positive = forward, negative = backward.
    pub forward_move: f32,

    /// Strafe movement: -1, 0 or 1.
    /// Positive = right, negative = left.
    pub right_move: f32,

    /// Jump is held.
    pub jump: bool,

    /// Current look direction (unit length).
    pub view_direction: Vec3,
}

impl PlayerCommand {
    /// Check if any movement input is active.
    #[inline]
    pub fn has_movement_input(&self) -> bool {
        self.forward_move != 0.0 || self.right_move != 0.0
    }
}

/// On-screen touch buttons.
///
/// Unlike held keys these apply a one-off velocity change the moment they
/// are tapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScreenButton {
    Up,
    Down,
    Left,
    Right,
    Jump,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_look_direction_at_rest() {
        let view = ViewAngles::default();
        let dir = view.look_direction();
        assert!((dir - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_look_direction_yaw_and_pitch() {
        // Quarter turn left faces -X
        let dir = ViewAngles::new(0.0, FRAC_PI_2).look_direction();
        assert!((dir - Vec3::NEG_X).length() < 1e-6);

        // Looking 45 degrees up
        let dir = ViewAngles::new(PI / 4.0, 0.0).look_direction();
        assert!((dir.y - (PI / 4.0).sin()).abs() < 1e-6);
        assert!((dir.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_rotate_clamps_pitch_and_wraps_yaw() {
        let mut view = ViewAngles::default();
        view.rotate(10.0, 0.0);
        assert_eq!(view.pitch, ViewAngles::PITCH_LIMIT);

        view.rotate(0.0, 3.0 * PI / 2.0);
        assert!((view.yaw - -PI / 2.0).abs() < 1e-5, "yaw={}", view.yaw);
    }

    #[test]
    fn test_rotate_huge_delta_stays_wrapped() {
        let mut view = ViewAngles::default();
        view.rotate(0.0, 2.0e9);

        assert!(view.yaw.is_finite());
        assert!(view.yaw >= -PI && view.yaw <= PI, "yaw={}", view.yaw);

        view.rotate(0.0, -2.0e9);
        assert!(view.yaw >= -PI && view.yaw <= PI, "yaw={}", view.yaw);
    }

    #[test]
    fn test_rotate_ignores_non_finite() {
        let mut view = ViewAngles::new(0.2, 1.0);

        view.rotate(f32::NAN, 0.5);
        view.rotate(0.1, f32::INFINITY);

        assert_eq!(view, ViewAngles::new(0.2, 1.0));
        assert!(view.look_direction().is_finite());
    }

    #[test]
    fn test_horizontal_vectors() {
        let look = Vec3::new(0.0, 0.6, -0.8);
        assert!((horizontal_forward(look) - Vec3::NEG_Z).length() < 1e-6);
        // Facing -Z, right is +X
        assert!((horizontal_side(look) - Vec3::X).length() < 1e-6);

        assert_eq!(horizontal_forward(Vec3::Y), Vec3::ZERO);
    }
}
