//! Headless Skulk runner
//!
//! Loads a level (first argument, else the built-in demo), drives the
//! player with a scripted input track and logs what the guards do.
//!
//! Run with: cargo run --bin skulk -- levels/demo.toml

use skulk_core::{Control, IdGenerator, InputSource, InputState, RigidBodies};
use skulk_game::{spawn_level, ClipLibrary, LevelConfig};
use skulk_physics::PhysicsWorld;

const FRAME_RATE: f64 = 60.0;
const FRAMES: u64 = 900;

/// Held controls as half-open frame ranges
const SCRIPT: &[(u64, u64, Control)] = &[
    (30, 31, Control::CrouchToggle),
    (60, 240, Control::MoveBack),
    (60, 150, Control::MoveLeft),
    (300, 301, Control::CrouchToggle),
    (320, 480, Control::MoveRight),
    (400, 401, Control::Jump),
    (520, 700, Control::MoveBack),
];

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => match LevelConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => {
            log::info!("No level given, running the demo level");
            LevelConfig::demo()
        }
    };

    let mut physics = PhysicsWorld::new(config.physics.clone());
    let ids = IdGenerator::new();
    let mut world = match spawn_level(&config, &mut physics, &ids) {
        Ok(world) => world,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let mut animations = ClipLibrary::new();
    let player = world.player();
    animations.load_rig(player.entity(), &player.instance().template.clips);
    for (_, enemy) in world.enemies() {
        animations.load_rig(enemy.entity(), &enemy.instance().template.clips);
    }

    let mut input = InputState::new();
    for frame in 0..FRAMES {
        for control in Control::ALL {
            let held = SCRIPT
                .iter()
                .any(|&(start, end, c)| c == control && (start..end).contains(&frame));
            match (held, input.is_down(control)) {
                (true, false) => input.press(control),
                (false, true) => input.release(control),
                _ => {}
            }
        }

        let now = frame as f64 / FRAME_RATE;
        world.step(now, &input, &mut physics, &mut animations);
        input.end_frame();
    }

    let state = world.state();
    log::info!(
        "Finished {} frames, alert raised: {}",
        world.frame(),
        state.is_alerted()
    );
    log::info!("Player at {:?}", state.player_position());
    for (_, enemy) in world.enemies() {
        match physics.position(enemy.entity()) {
            Ok(position) => log::info!("{} {:?} at {:?}", enemy.entity(), enemy.state(), position),
            Err(e) => log::warn!("{}: {}", enemy.entity(), e),
        }
    }
}
