//! Dino Dash Headless Runner
//!
//! Drives the real simulation with a manual clock, a seeded RNG and a simple
//! auto-jump policy, then prints how far each run got. Useful for tuning
//! `~/.dino-dash/config.json` and for spotting regressions in spawn pacing.
//!
//! Usage:
//!   cargo run --bin headless -- [OPTIONS]
//!
//! Options:
//!   --seed N        RNG seed (default: 42)
//!   --frames N      Frame limit per run (default: 36000 = 10 minutes at 60 fps)
//!   --frame-ms F    Simulated frame length in ms (default: 16.67)
//!   --runs N        Number of runs with incrementing seeds (default: 1)
//!   --quiet         Only final summary line

use dino_dash::core::constants::CONFIG_FILE;
use dino_dash::core::{
    FrameTimer, GameConfig, InputEvent, ManualClock, SetupError, Simulation, SimulationState,
    TickEvent,
};
use dino_dash::entities::{Collidable, Obstacle};
use dino_dash::logging;
use dino_dash::render::RecordingSurface;
use dino_dash::storage::MemoryHighScoreStore;
use dino_dash::utils::persistence;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// How far ahead, in ms of scrolling, the autopilot reacts to an obstacle.
const JUMP_LEAD_MS: f64 = 110.0;

// ── CLI Configuration ────────────────────────────────────────────────

struct RunConfig {
    seed: u64,
    frames: u64,
    frame_ms: f64,
    runs: u32,
    quiet: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            frames: 36_000,
            frame_ms: 1000.0 / 60.0,
            runs: 1,
            quiet: false,
        }
    }
}

fn parse_value<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T {
    match args.get(i).and_then(|s| s.parse().ok()) {
        Some(value) => value,
        None => {
            eprintln!("{} requires a number", flag);
            std::process::exit(2);
        }
    }
}

fn parse_args() -> RunConfig {
    let args: Vec<String> = std::env::args().collect();
    let mut config = RunConfig::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                config.seed = parse_value(&args, i, "--seed");
            }
            "--frames" => {
                i += 1;
                config.frames = parse_value(&args, i, "--frames");
            }
            "--frame-ms" => {
                i += 1;
                config.frame_ms = parse_value(&args, i, "--frame-ms");
            }
            "--runs" => {
                i += 1;
                config.runs = parse_value(&args, i, "--runs");
            }
            "--quiet" => config.quiet = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown option: {}", other);
                print_usage();
                std::process::exit(2);
            }
        }
        i += 1;
    }
    config
}

fn print_usage() {
    eprintln!(
        "Dino Dash Headless Runner\n\
         \n\
         Usage: headless [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --seed N        RNG seed (default: 42)\n\
         \x20 --frames N      Frame limit per run (default: 36000)\n\
         \x20 --frame-ms F    Simulated frame length in ms (default: 16.67)\n\
         \x20 --runs N        Number of runs with incrementing seeds (default: 1)\n\
         \x20 --quiet         Only final summary line\n\
         \x20 --help, -h      Show this help"
    );
}

// ── Run Statistics ───────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
struct RunStats {
    seed: u64,
    frames: u64,
    score: u32,
    jumps: u32,
    obstacles: u64,
    final_speed: f64,
    died: bool,
    last_frame_sprites: usize,
}

/// Jump when the nearest obstacle still ahead of the player is about to
/// reach it.
fn should_jump(sim: &Simulation) -> bool {
    let player = sim.player();
    if player.is_jumping() {
        return false;
    }

    let body = player.hitbox();
    let lead = sim.config().scroll_speed * sim.scale().get() * sim.game_speed() * JUMP_LEAD_MS;
    sim.cacti()
        .group()
        .iter()
        .chain(sim.birds().group().iter())
        .filter(|o: &&Obstacle| o.x + o.width > body.x)
        .any(|o| o.x - body.right() <= lead)
}

fn run_once(config: &GameConfig, run: &RunConfig, seed: u64) -> Result<RunStats, SetupError> {
    let mut sim = Simulation::new(
        config.clone(),
        1.0,
        Box::new(MemoryHighScoreStore::default()),
    )?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let clock = ManualClock::new(0.0);
    let mut timer = FrameTimer::new(config.max_frame_delta_ms);
    timer.tick(&clock);

    let mut stats = RunStats {
        seed,
        ..RunStats::default()
    };
    sim.handle_input(InputEvent::StartRequested);

    while stats.frames < run.frames {
        clock.advance(run.frame_ms);
        let delta = timer.tick(&clock).unwrap_or(0.0);
        if sim.state() == SimulationState::Running && should_jump(&sim) {
            sim.handle_input(InputEvent::JumpRequested);
        }

        stats.frames += 1;
        for event in sim.update(delta, &mut rng) {
            match event {
                TickEvent::Jumped => stats.jumps += 1,
                TickEvent::GameOver { .. } => stats.died = true,
                TickEvent::RunStarted | TickEvent::RestartArmed => {}
            }
        }
        if stats.died {
            break;
        }
    }

    let mut surface = RecordingSurface::new();
    sim.draw(&mut surface);

    stats.score = sim.score();
    stats.obstacles = sim.cacti().spawned() + sim.birds().spawned();
    stats.final_speed = sim.game_speed();
    stats.last_frame_sprites = surface.sprites().len();
    Ok(stats)
}

fn main() -> Result<(), SetupError> {
    let run = parse_args();
    logging::init_stderr_logger("warn");

    let config = match persistence::data_path(CONFIG_FILE) {
        Ok(path) => GameConfig::load_or_default(&path),
        Err(_) => GameConfig::default(),
    };
    config.validate()?;

    let mut all = Vec::new();
    for i in 0..run.runs {
        let stats = run_once(&config, &run, run.seed.wrapping_add(u64::from(i)))?;
        if !run.quiet {
            println!(
                "seed {:>6}  score {:>6}  frames {:>6}  jumps {:>4}  obstacles {:>4}  speed {:.3}  sprites {:>3}  {}",
                stats.seed,
                stats.score,
                stats.frames,
                stats.jumps,
                stats.obstacles,
                stats.final_speed,
                stats.last_frame_sprites,
                if stats.died { "died" } else { "survived" }
            );
        }
        all.push(stats);
    }

    let runs = all.len().max(1) as f64;
    let mean = all.iter().map(|s| f64::from(s.score)).sum::<f64>() / runs;
    let best = all.iter().map(|s| s.score).max().unwrap_or(0);
    let deaths = all.iter().filter(|s| s.died).count();
    println!(
        "runs {}  mean score {:.1}  best {}  deaths {}",
        all.len(),
        mean,
        best,
        deaths
    );
    Ok(())
}
