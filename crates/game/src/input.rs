//! Player input handling.
//!
//! This module turns discrete input events (key presses, pointer drags,
//! taps) into held state and, once per substep, into commands for the
//! physics system.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tumble_physics::movement::{PlayerCommand, ScreenButton};

/// Held-key actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Forward,
    Backward,
    Left,
    Right,
    Jump,
}

impl Action {
    /// Default keyboard binding, by DOM-style key code (`KeyW`, `Space`, ...).
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "KeyW" => Some(Self::Forward),
            "KeyS" => Some(Self::Backward),
            "KeyA" => Some(Self::Left),
            "KeyD" => Some(Self::Right),
            "Space" => Some(Self::Jump),
            _ => None,
        }
    }
}

/// A single input event delivered to the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputAction {
    KeyDown(Action),
    KeyUp(Action),

    /// Pointer moved while captured (pixels).
    PointerDrag { dx: f32, dy: f32 },

    /// Finger moved across the screen (pixels).
    TouchDrag { dx: f32, dy: f32 },

    /// Pointer button went down; starts charging a throw.
    PointerPressed { time_ms: f64 },

    /// Pointer button went up; throws with the charge since the press.
    PointerReleased { time_ms: f64 },

    /// Throw immediately with an explicit charge time.
    Throw { held_ms: f32 },

    /// On-screen button tapped.
    Button(ScreenButton),
}

/// Held action states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldActions {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl HeldActions {
    pub fn set(&mut self, action: Action, pressed: bool) {
        let slot = match action {
            Action::Forward => &mut self.forward,
            Action::Backward => &mut self.backward,
            Action::Left => &mut self.left,
            Action::Right => &mut self.right,
            Action::Jump => &mut self.jump,
        };
        *slot = pressed;
    }
}

/// Input state accumulated between frames.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputState {
    /// Keys currently held.
    pub held: HeldActions,

    /// Timestamp of the pointer press that is charging a throw.
    pointer_pressed_at: Option<f64>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_action(&mut self, action: Action, pressed: bool) {
        self.held.set(action, pressed);
    }

    /// Start charging a throw.
    pub fn press_pointer(&mut self, time_ms: f64) {
        self.pointer_pressed_at = Some(time_ms);
    }

    /// Finish charging a throw. Returns how long the pointer was held, or
    /// `None` if no press was recorded.
    pub fn release_pointer(&mut self, time_ms: f64) -> Option<f32> {
        let pressed_at = self.pointer_pressed_at.take()?;
        Some((time_ms - pressed_at).max(0.0) as f32)
    }

    /// Whether a throw is currently charging.
    pub fn is_charging(&self) -> bool {
        self.pointer_pressed_at.is_some()
    }

    /// Convert the held keys to a physics command.
    ///
    /// Opposite keys cancel. Forward and strafe are not normalized against
    /// each other.
    pub fn to_command(&self, view_direction: Vec3) -> PlayerCommand {
        let mut cmd = PlayerCommand {
            view_direction,
            ..Default::default()
        };

        // Movement axes
        if self.held.forward {
            cmd.forward_move += 1.0;
        }
        if self.held.backward {
            cmd.forward_move -= 1.0;
        }
        if self.held.right {
            cmd.right_move += 1.0;
        }
        if self.held.left {
            cmd.right_move -= 1.0;
        }

        cmd.jump = self.held.jump;

        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_to_command() {
        let mut input = InputState::new();
        input.set_action(Action::Forward, true);
        input.set_action(Action::Right, true);
        input.set_action(Action::Jump, true);

        let cmd = input.to_command(Vec3::NEG_Z);

        // Diagonal is not normalized
        assert_eq!(cmd.forward_move, 1.0);
        assert_eq!(cmd.right_move, 1.0);
        assert!(cmd.jump);
        assert_eq!(cmd.view_direction, Vec3::NEG_Z);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut input = InputState::new();
        input.set_action(Action::Forward, true);
        input.set_action(Action::Backward, true);

        let cmd = input.to_command(Vec3::NEG_Z);
        assert_eq!(cmd.forward_move, 0.0);
        assert!(!cmd.has_movement_input());

        input.set_action(Action::Forward, false);
        let cmd = input.to_command(Vec3::NEG_Z);
        assert_eq!(cmd.forward_move, -1.0);
    }

    #[test]
    fn test_pointer_charge() {
        let mut input = InputState::new();
        assert_eq!(input.release_pointer(100.0), None);

        input.press_pointer(1000.0);
        assert!(input.is_charging());
        assert_eq!(input.release_pointer(1500.0), Some(500.0));
        assert!(!input.is_charging());

        // Clock going backwards never produces a negative charge
        input.press_pointer(2000.0);
        assert_eq!(input.release_pointer(1000.0), Some(0.0));
    }

    #[test]
    fn test_key_codes() {
        assert_eq!(Action::from_key_code("KeyW"), Some(Action::Forward));
        assert_eq!(Action::from_key_code("Space"), Some(Action::Jump));
        assert_eq!(Action::from_key_code("KeyQ"), None);
    }
}
