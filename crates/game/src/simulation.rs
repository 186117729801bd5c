//! Game simulation - the main loop.
//!
//! Each rendered frame is divided into a fixed number of equal physics
//! substeps. A substep runs player control, player integration and sphere
//! integration in that order. After the substeps a maintenance pass runs
//! every few frames to recover a player that fell out of the level and to
//! switch point lights on or off by distance.

use glam::Vec3;
use tumble_physics::{
    PlayerBody, PlayerController, ScreenButton, SphereSimulator, ViewAngles,
};

use crate::config::{ConfigError, SimulationConfig};
use crate::input::{InputAction, InputState};
use crate::level::Level;
use crate::pool::SpherePool;

/// Receives object positions after each frame.
///
/// Implemented by whatever draws the scene. Positions are pushed, so the
/// receiver never reads simulation state directly.
pub trait TransformSink {
    fn set_camera_position(&mut self, position: Vec3);
    fn set_sphere_position(&mut self, index: usize, position: Vec3);
}

/// The sandbox simulation.
///
/// Owns the player, the sphere pool, the view, the input state and the
/// level. Nothing else mutates them; input arrives through
/// [`Simulation::handle_input`] and positions leave through
/// [`Simulation::present`].
#[derive(Debug)]
pub struct Simulation {
    /// Frames simulated so far.
    pub frame: u64,

    /// Simulation configuration.
    pub config: SimulationConfig,

    /// Current level.
    pub level: Level,

    /// The player.
    pub player: PlayerBody,

    /// First-person view orientation.
    pub view: ViewAngles,

    /// Held keys and pointer charge.
    pub input: InputState,

    spheres: SpherePool,
    player_controller: PlayerController,
    sphere_simulator: SphereSimulator,
}

impl Simulation {
    /// Create a new simulation with the given configuration and level.
    pub fn new(config: SimulationConfig, level: Level) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, level))
    }

    /// Create a simulation with default configuration and the test room.
    pub fn test() -> Self {
        Self::build(SimulationConfig::default(), Level::test_room())
    }

    fn build(config: SimulationConfig, level: Level) -> Self {
        let spheres = SpherePool::new(
            config.sphere_count,
            config.sphere_radius,
            config.parked_position,
        );

        Self {
            frame: 0,
            player: PlayerBody::new(config.spawn),
            view: ViewAngles::default(),
            input: InputState::new(),
            spheres,
            player_controller: PlayerController::new(config.physics.clone()),
            sphere_simulator: SphereSimulator::new(config.physics.clone()),
            level,
            config,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Camera position: the top of the player capsule.
    pub fn view_position(&self) -> Vec3 {
        self.player.eye_position()
    }

    /// Unit look direction.
    pub fn view_direction(&self) -> Vec3 {
        self.view.look_direction()
    }

    pub fn spheres(&self) -> &SpherePool {
        &self.spheres
    }

    // ========================================================================
    // Frame loop
    // ========================================================================

    /// Advance the simulation by one rendered frame that took `elapsed`
    /// seconds.
    pub fn frame(&mut self, elapsed: f32) {
        let delta_time = self.config.substep_delta(elapsed);
        log::trace!("Frame {}: substep {:.5}s", self.frame, delta_time);

        for _ in 0..self.config.steps_per_frame {
            self.substep(delta_time);
        }

        if self.frame % self.config.maintenance_interval.max(1) == 0 {
            self.maintenance();
        }

        self.frame += 1;
    }

    /// Run one physics substep.
    fn substep(&mut self, delta_time: f32) {
        let command = self.input.to_command(self.view.look_direction());

        self.player_controller
            .apply_controls(&mut self.player, &command, delta_time);
        self.player_controller
            .integrate(&mut self.player, &self.level.collision, delta_time);

        let (bodies, transforms) = self.spheres.bodies_and_transforms();
        self.sphere_simulator.integrate(
            bodies,
            &mut self.player,
            &self.level.collision,
            delta_time,
            transforms,
        );
    }

    /// Out-of-bounds recovery and light culling.
    ///
    /// Only the player is recovered. Spheres that leave the level stay lost
    /// until they are thrown again.
    pub fn maintenance(&mut self) {
        if self.view_position().y <= self.config.out_of_bounds_y {
            log::info!(
                "Player out of bounds at {:?}, returning to spawn",
                self.view_position()
            );
            self.reset_player();
        }

        let visible = self
            .level
            .update_light_visibility(self.view_position(), self.config.light_visibility_distance);
        log::trace!("{} lights visible", visible);
    }

    /// Put the player back in the spawn capsule facing the default way.
    ///
    /// Velocity is kept.
    pub fn reset_player(&mut self) {
        self.player.capsule = self.config.spawn;
        self.view = ViewAngles::default();
    }

    // ========================================================================
    // Actions
    // ========================================================================

    /// Throw the next sphere in the pool, charged for `held_ms` milliseconds.
    ///
    /// The sphere appears just in front of the eye and inherits part of the
    /// player's velocity. Returns the pool slot used, or `None` if the pool
    /// is empty.
    pub fn throw_ball(&mut self, held_ms: f32) -> Option<usize> {
        let direction = self.view_direction();
        let impulse = self.config.charge_impulse(held_ms);

        let center = self.player.eye_position()
            + direction * self.player.radius() * self.config.throw_spawn_offset;
        let velocity =
            direction * impulse + self.player.velocity * self.config.throw_velocity_inheritance;

        let index = self.spheres.launch(center, velocity)?;
        log::debug!("Threw sphere {} at {:.2} units/s", index, impulse);
        Some(index)
    }

    /// Apply one input event.
    pub fn handle_input(&mut self, action: InputAction) {
        match action {
            InputAction::KeyDown(action) => self.input.set_action(action, true),
            InputAction::KeyUp(action) => self.input.set_action(action, false),
            InputAction::PointerDrag { dx, dy } => {
                self.rotate_view(dx, dy, self.config.mouse_sensitivity)
            }
            InputAction::TouchDrag { dx, dy } => {
                self.rotate_view(dx, dy, self.config.touch_sensitivity)
            }
            InputAction::PointerPressed { time_ms } => self.input.press_pointer(time_ms),
            InputAction::PointerReleased { time_ms } => {
                if let Some(held_ms) = self.input.release_pointer(time_ms) {
                    self.throw_ball(held_ms);
                }
            }
            InputAction::Throw { held_ms } => {
                self.throw_ball(held_ms);
            }
            InputAction::Button(button) => self.press_button(button),
        }
    }

    fn rotate_view(&mut self, dx: f32, dy: f32, sensitivity: f32) {
        // Dragging right turns right, dragging down looks down
        self.view.rotate(-dy * sensitivity, -dx * sensitivity);
    }

    fn press_button(&mut self, button: ScreenButton) {
        let view_direction = self.view_direction();
        self.player_controller
            .apply_button(&mut self.player, button, view_direction);
    }

    // ========================================================================
    // Output
    // ========================================================================

    /// Push the camera and sphere positions to `sink`.
    pub fn present<S>(&self, sink: &mut S)
    where
        S: TransformSink + ?Sized,
    {
        sink.set_camera_position(self.view_position());

        for (index, position) in self.spheres.transforms().iter().enumerate() {
            sink.set_sphere_position(index, *position);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Action;

    #[derive(Default)]
    struct RecordingSink {
        camera: Option<Vec3>,
        spheres: Vec<(usize, Vec3)>,
    }

    impl TransformSink for RecordingSink {
        fn set_camera_position(&mut self, position: Vec3) {
            self.camera = Some(position);
        }

        fn set_sphere_position(&mut self, index: usize, position: Vec3) {
            self.spheres.push((index, position));
        }
    }

    fn small_simulation(sphere_count: usize) -> Simulation {
        let config = SimulationConfig {
            sphere_count,
            ..Default::default()
        };
        Simulation::new(config, Level::test_room()).unwrap()
    }

    #[test]
    fn test_simulation_creation() {
        let sim = Simulation::test();
        assert_eq!(sim.frame, 0);
        assert_eq!(sim.spheres().len(), 100);
        assert_eq!(sim.view_position(), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(sim.player.velocity, Vec3::ZERO);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SimulationConfig {
            sphere_count: 0,
            ..Default::default()
        };
        assert!(Simulation::new(config, Level::test_room()).is_err());
    }

    #[test]
    fn test_throw_from_eye() {
        let mut sim = small_simulation(4);

        let index = sim.throw_ball(0.0);
        assert_eq!(index, Some(0));

        let sphere = sim.spheres().get(0).unwrap();
        assert!((sphere.center() - Vec3::new(0.0, 1.0, -0.525)).length() < 1e-6);
        assert!((sphere.velocity - Vec3::new(0.0, 0.0, -15.0)).length() < 1e-5);
    }

    #[test]
    fn test_throw_inherits_player_velocity() {
        let mut sim = small_simulation(4);
        sim.player.velocity = Vec3::new(1.0, 0.0, 0.0);

        sim.throw_ball(100_000.0);

        let sphere = sim.spheres().get(0).unwrap();
        assert!((sphere.velocity - Vec3::new(2.0, 0.0, -45.0)).length() < 1e-3);
    }

    #[test]
    fn test_round_robin_slot_reuse() {
        let mut sim = small_simulation(3);

        let slots: Vec<Option<usize>> = (0..4).map(|_| sim.throw_ball(0.0)).collect();

        assert_eq!(slots, vec![Some(0), Some(1), Some(2), Some(0)]);
    }

    #[test]
    fn test_pointer_release_throws_with_charge() {
        let mut sim = small_simulation(4);

        sim.handle_input(InputAction::PointerPressed { time_ms: 1000.0 });
        sim.handle_input(InputAction::PointerReleased { time_ms: 1500.0 });

        let speed = sim.spheres().get(0).unwrap().velocity.length();
        assert!((speed - 26.804).abs() < 1e-2, "speed={}", speed);
        assert_eq!(sim.spheres().next_index(), 1);

        // Release without a press does nothing
        sim.handle_input(InputAction::PointerReleased { time_ms: 2000.0 });
        assert_eq!(sim.spheres().next_index(), 1);
    }

    #[test]
    fn test_out_of_bounds_recovery() {
        let mut sim = small_simulation(4);
        sim.frame(0.0);

        sim.player.capsule.translate(Vec3::new(3.0, -31.0, 2.0));
        sim.player.velocity = Vec3::new(0.0, -20.0, 0.0);
        sim.view = ViewAngles::new(0.5, 1.0);

        // Frames 1..29 have no maintenance pass
        for _ in 1..30 {
            sim.frame(0.0);
        }
        assert_eq!(sim.view_position().y, -30.0);

        // Frame 30 recovers
        sim.frame(0.0);
        assert_eq!(sim.player.capsule, sim.config.spawn);
        assert_eq!(sim.view_position(), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(sim.view, ViewAngles::default());
        // Velocity is not reset
        assert_eq!(sim.player.velocity, Vec3::new(0.0, -20.0, 0.0));
    }

    #[test]
    fn test_no_recovery_above_threshold() {
        let mut sim = small_simulation(4);
        sim.player.capsule.translate(Vec3::new(0.0, -20.0, 0.0));

        sim.frame(0.0);

        assert_eq!(sim.view_position().y, -19.0);
    }

    #[test]
    fn test_light_culling_in_maintenance() {
        let mut sim = small_simulation(4);
        sim.player.capsule.translate(Vec3::new(5.0, 0.0, -6.6));

        sim.frame(0.0);

        assert!(!sim.level.lights[0].visible);
        assert!(sim.level.lights[1].visible);
    }

    #[test]
    fn test_substep_clamp() {
        let mut slow = small_simulation(4);
        let mut clamped = small_simulation(4);
        slow.throw_ball(0.0);
        clamped.throw_ball(0.0);

        slow.frame(2.0);
        clamped.frame(0.05);

        assert_eq!(slow.player.capsule, clamped.player.capsule);
        assert_eq!(slow.spheres().transforms(), clamped.spheres().transforms());
    }

    #[test]
    fn test_determinism() {
        fn run() -> Simulation {
            let mut sim = small_simulation(8);
            sim.handle_input(InputAction::KeyDown(Action::Forward));
            for i in 0..120 {
                if i % 15 == 0 {
                    sim.throw_ball(i as f32 * 10.0);
                }
                if i == 40 {
                    sim.handle_input(InputAction::PointerDrag { dx: 120.0, dy: -30.0 });
                }
                sim.frame(1.0 / 60.0);
            }
            sim
        }

        let a = run();
        let b = run();

        assert_eq!(a.player.capsule, b.player.capsule);
        assert_eq!(a.player.velocity, b.player.velocity);
        assert_eq!(a.spheres().transforms(), b.spheres().transforms());
    }

    #[test]
    fn test_walk_forward() {
        let mut sim = small_simulation(4);
        sim.handle_input(InputAction::KeyDown(Action::Forward));

        for _ in 0..60 {
            sim.frame(1.0 / 60.0);
        }

        let position = sim.view_position();
        assert!(position.z < -1.0, "position={:?}", position);
        assert!(position.y > 0.9, "position={:?}", position);

        sim.handle_input(InputAction::KeyUp(Action::Forward));
        assert!(!sim.input.held.forward);
    }

    #[test]
    fn test_drag_rotates_view() {
        let mut sim = small_simulation(4);

        sim.handle_input(InputAction::PointerDrag { dx: 500.0, dy: 0.0 });
        assert!((sim.view.yaw - -1.0).abs() < 1e-6);

        sim.handle_input(InputAction::TouchDrag { dx: -2500.0, dy: 250.0 });
        assert!(sim.view.yaw.abs() < 1e-6);
        assert!((sim.view.pitch - -0.1).abs() < 1e-6);
    }

    #[test]
    fn test_extreme_drag_is_bounded() {
        let mut sim = small_simulation(4);

        sim.handle_input(InputAction::PointerDrag { dx: -1.0e12, dy: 0.0 });
        assert!(sim.view.yaw.is_finite());
        assert!(sim.view.yaw.abs() <= std::f32::consts::PI);

        let before = sim.view;
        sim.handle_input(InputAction::TouchDrag { dx: f32::NAN, dy: 1.0 });
        assert_eq!(sim.view, before);

        sim.throw_ball(0.0);
        assert!(sim.spheres().get(0).unwrap().velocity.is_finite());
    }

    #[test]
    fn test_screen_jump_button() {
        let mut sim = small_simulation(4);

        sim.handle_input(InputAction::Button(ScreenButton::Jump));
        assert_eq!(sim.player.velocity.y, 30.0);

        sim.frame(1.0 / 60.0);
        assert!(sim.view_position().y > 1.0);
    }

    #[test]
    fn test_present() {
        let mut sim = small_simulation(3);
        sim.throw_ball(0.0);
        sim.frame(1.0 / 60.0);

        let mut sink = RecordingSink::default();
        sim.present(&mut sink);

        assert_eq!(sink.camera, Some(sim.view_position()));
        assert_eq!(sink.spheres.len(), 3);
        assert_eq!(sink.spheres[0].1, sim.spheres().get(0).unwrap().center());
        // Unthrown spheres fall freely below the level
        assert_eq!(sink.spheres[2].0, 2);
        assert!(sink.spheres[2].1.y < -100.0);
    }
}
