//! Tumble - Main Entry Point
//!
//! Runs the sandbox headless: builds the test room, plays a short scripted
//! session (walking, looking around, jumping, throwing) and logs where
//! everything ended up.
//!
//! Usage: `tumble [config.toml]`. Set `RUST_LOG=debug` to see each throw.

use std::error::Error;

use glam::Vec3;
use tumble_game::{
    Action, InputAction, Level, ScreenButton, Simulation, SimulationConfig, TransformSink,
};

/// Frame time of the scripted session.
const FRAME_TIME: f32 = 1.0 / 60.0;

/// Length of the scripted session in frames.
const SESSION_FRAMES: u64 = 600;

/// Last presented positions, standing in for a scene graph.
#[derive(Debug, Default)]
struct SceneSnapshot {
    camera: Vec3,
    spheres: Vec<Vec3>,
}

impl TransformSink for SceneSnapshot {
    fn set_camera_position(&mut self, position: Vec3) {
        self.camera = position;
    }

    fn set_sphere_position(&mut self, index: usize, position: Vec3) {
        if index >= self.spheres.len() {
            self.spheres.resize(index + 1, Vec3::ZERO);
        }
        self.spheres[index] = position;
    }
}

/// Input events for frame `frame` of the scripted session.
fn scripted_input(frame: u64) -> Vec<InputAction> {
    let key = |code: &str, down: bool| {
        Action::from_key_code(code).map(|action| {
            if down {
                InputAction::KeyDown(action)
            } else {
                InputAction::KeyUp(action)
            }
        })
    };

    let time_ms = frame as f64 * FRAME_TIME as f64 * 1000.0;

    match frame {
        0 => key("KeyW", true).into_iter().collect(),
        60 => vec![InputAction::PointerDrag { dx: -150.0, dy: -40.0 }],
        90 => vec![InputAction::PointerPressed { time_ms }],
        120 => vec![InputAction::PointerReleased { time_ms }],
        150 => key("KeyD", true).into_iter().chain(key("Space", true)).collect(),
        160 => key("Space", false).into_iter().collect(),
        200 => key("KeyD", false)
            .into_iter()
            .chain(key("KeyW", false))
            .collect(),
        240 => vec![InputAction::TouchDrag { dx: 900.0, dy: 0.0 }],
        f if (250..450).contains(&f) && f % 20 == 0 => {
            vec![InputAction::Throw { held_ms: (f - 250) as f32 * 5.0 }]
        }
        480 => vec![InputAction::Button(ScreenButton::Jump)],
        _ => Vec::new(),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading config from {}", path);
            SimulationConfig::load(&path)?
        }
        None => SimulationConfig::default(),
    };

    let mut simulation = Simulation::new(config, Level::test_room())?;
    let mut scene = SceneSnapshot::default();

    log::info!(
        "Starting session: {} frames, {} spheres, {} substeps per frame",
        SESSION_FRAMES,
        simulation.spheres().len(),
        simulation.config.steps_per_frame
    );

    for frame in 0..SESSION_FRAMES {
        for action in scripted_input(frame) {
            simulation.handle_input(action);
        }

        simulation.frame(FRAME_TIME);
        simulation.present(&mut scene);
    }

    let in_level = scene
        .spheres
        .iter()
        .filter(|position| position.y > simulation.config.out_of_bounds_y)
        .count();

    log::info!("Camera ended at {:?}", scene.camera);
    log::info!(
        "{} of {} spheres inside the level, {} lights visible",
        in_level,
        scene.spheres.len(),
        simulation.level.visible_light_count()
    );

    Ok(())
}
