//! Headless maze runner.
//!
//! Loads a world config and an input replay, then drives the simulation the
//! way an interactive frontend would: every frame feeds one fixed timestep into
//! `TimeState`, each consumed step moves the player from the held keys, and the
//! padded viewport window is enumerated as a renderer would before drawing.
//!
//! Usage: `maze_game [config.json] [replay.json]`. Either path may be `-` to
//! use the built-in default.

mod replay;

use std::path::{Path, PathBuf};

use maze_core::input::{InputState, Key};
use maze_core::time::TimeState;
use maze_core::{load_config_from_path, Tile, World, WorldConfig};
use replay::{load_replay_from_path, ReplaySequence};

fn optional_path(arg: Option<String>) -> Option<PathBuf> {
    arg.filter(|a| a != "-").map(PathBuf::from)
}

fn load_config(path: Option<&Path>) -> Result<WorldConfig, String> {
    match path {
        Some(path) => {
            let config = load_config_from_path(path)?;
            log::info!("Loaded config '{}'", path.display());
            Ok(config)
        }
        None => {
            log::info!("No config given, using defaults");
            Ok(WorldConfig::default())
        }
    }
}

fn load_replay(path: Option<&Path>) -> Result<ReplaySequence, String> {
    match path {
        Some(path) => {
            let replay = load_replay_from_path(path)?;
            log::info!(
                "Loaded replay '{}' ({} frames)",
                path.display(),
                replay.frames.len()
            );
            Ok(replay)
        }
        None => {
            log::info!("No replay given, running built-in walk");
            Ok(ReplaySequence::builtin())
        }
    }
}

fn run(config: WorldConfig, replay: &ReplaySequence) {
    let mut time = TimeState::new(config.fixed_dt);
    let mut input = InputState::new();
    let mut world = World::new(config);
    let mut blocked_steps = 0u64;
    let mut visible_walls = 0usize;

    for held in replay.expanded_inputs() {
        input.set_held(&held);
        if input.is_just_pressed(Key::Escape) {
            log::info!("Escape pressed, stopping replay.");
            break;
        }

        time.advance(time.fixed_dt);
        while time.should_step() {
            let result = world.step(&input);
            if result.blocked_x || result.blocked_y {
                blocked_steps += 1;
            }
            input.end_frame();
        }

        visible_walls = world
            .visible_tiles()
            .iter()
            .filter(|v| v.tile == Tile::Blocked)
            .count();
    }

    log::info!(
        "Replay finished after {} frames, {} steps ({:.2}s simulated): player at ({}, {}), {} steps hit a wall",
        time.frame_count,
        time.fixed_step_count,
        time.total_time,
        world.player.position.x,
        world.player.position.y,
        blocked_steps
    );
    log::info!(
        "Grid: {} tiles materialized, {} draws, {} walls in last view",
        world.grid.materialized_count(),
        world.grid.draw_count(),
        visible_walls
    );
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Maze runner starting...");

    let mut args = std::env::args().skip(1);
    let config_path = optional_path(args.next());
    let replay_path = optional_path(args.next());

    let config = match load_config(config_path.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            log::error!("{err}");
            std::process::exit(1);
        }
    };
    let replay = match load_replay(replay_path.as_deref()) {
        Ok(replay) => replay,
        Err(err) => {
            log::error!("{err}");
            std::process::exit(1);
        }
    };

    run(config, &replay);
}
