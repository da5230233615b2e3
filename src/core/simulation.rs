//! The orchestrator: owns every entity and the run state machine.
//!
//! One `update` call is one tick. Inputs queued with [`Simulation::handle_input`]
//! are applied at the start of the next tick, never in the middle of one.
//! Everything the frontend should react to (sound, logging, stats) comes back
//! as [`TickEvent`]s.

use super::config::{GameConfig, SpawnerConfig};
use super::error::{ScaleError, SetupError};
use super::scale::ScaleRatio;
use crate::core::clock::sanitize_delta;
use crate::entities::{
    Drawable, Entity, Ground, ObstacleSpawner, Player, ScoreTracker, SpawnerKind,
};
use crate::render::{DrawSurface, Font, Rgb};
use crate::storage::HighScoreStore;
use rand::Rng;
use std::collections::VecDeque;

pub const START_PROMPT: &str = "Press space to start";
pub const GAME_OVER_TEXT: &str = "Game over";

/// Edge-triggered inputs from the outside world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    JumpRequested,
    StartRequested,
}

/// Public view of the run state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationState {
    WaitingToStart,
    Running,
    GameOver,
}

/// Things that happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    RunStarted,
    Jumped,
    /// Death notification. Emitted exactly once per game over.
    GameOver { score: u32, new_high_score: bool },
    /// The grace period ended; a start request now restarts the run.
    RestartArmed,
}

/// Counts frame time down to the moment restarts are accepted.
#[derive(Debug, Clone)]
struct RestartTimer {
    remaining_ms: f64,
}

impl RestartTimer {
    fn new(grace_ms: f64) -> Self {
        Self {
            remaining_ms: grace_ms,
        }
    }

    fn is_armed(&self) -> bool {
        self.remaining_ms <= 0.0
    }

    /// Returns true on the tick the timer arms.
    fn advance(&mut self, delta_ms: f64) -> bool {
        if self.is_armed() {
            return false;
        }
        self.remaining_ms -= delta_ms;
        self.is_armed()
    }
}

/// State machine with per-phase data. The restart timer only exists inside
/// `GameOver`, so leaving the phase drops it.
#[derive(Debug, Clone)]
enum Phase {
    WaitingToStart,
    Running,
    GameOver { restart: RestartTimer },
}

impl Phase {
    fn state(&self) -> SimulationState {
        match self {
            Phase::WaitingToStart => SimulationState::WaitingToStart,
            Phase::Running => SimulationState::Running,
            Phase::GameOver { .. } => SimulationState::GameOver,
        }
    }
}

#[derive(Debug)]
pub struct Simulation {
    config: GameConfig,
    scale: ScaleRatio,
    surface_width: f64,
    surface_height: f64,
    collision_margin: f64,
    game_speed: f64,
    phase: Phase,
    inputs: VecDeque<InputEvent>,
    player: Player,
    ground: Ground,
    cacti: ObstacleSpawner,
    birds: ObstacleSpawner,
    score: ScoreTracker,
}

/// Scale-dependent parts, rebuilt together on every rescale.
struct ScaledParts {
    surface_width: f64,
    surface_height: f64,
    collision_margin: f64,
    player: Player,
    ground: Ground,
    cacti: ObstacleSpawner,
    birds: ObstacleSpawner,
}

impl ScaledParts {
    fn build(config: &GameConfig, scale: ScaleRatio) -> Self {
        let surface_width = scale.apply(config.game_width);
        let surface_height = scale.apply(config.game_height);
        let spawner = |kind: SpawnerKind, spawner_config: &SpawnerConfig| {
            ObstacleSpawner::new(
                kind,
                spawner_config,
                config.scroll_speed,
                scale,
                surface_width,
                surface_height,
            )
        };

        Self {
            surface_width,
            surface_height,
            collision_margin: scale.apply(config.collision_margin),
            player: Player::new(&config.player, scale, surface_height),
            ground: Ground::new(&config.ground, config.scroll_speed, scale, surface_height),
            cacti: spawner(SpawnerKind::Ground, &config.cacti),
            birds: spawner(SpawnerKind::Airborne, &config.birds),
        }
    }
}

impl Simulation {
    /// Validate `config` and build every entity at `scale`. The high score is
    /// read from `store` once, here.
    pub fn new(
        config: GameConfig,
        scale: f64,
        store: Box<dyn HighScoreStore>,
    ) -> Result<Self, SetupError> {
        config.validate()?;
        let scale = ScaleRatio::new(scale)?;
        let parts = ScaledParts::build(&config, scale);
        let score = ScoreTracker::new(
            store,
            config.score_time_unit_ms,
            scale,
            parts.surface_width,
        );

        log::info!(
            "simulation ready: {:.0}x{:.0} at scale {:.3}, high score {}",
            parts.surface_width,
            parts.surface_height,
            scale.get(),
            score.high_score()
        );

        Ok(Self {
            game_speed: config.speed_start,
            config,
            scale,
            surface_width: parts.surface_width,
            surface_height: parts.surface_height,
            collision_margin: parts.collision_margin,
            phase: Phase::WaitingToStart,
            inputs: VecDeque::new(),
            player: parts.player,
            ground: parts.ground,
            cacti: parts.cacti,
            birds: parts.birds,
            score,
        })
    }

    /// Queue an input for the next tick.
    pub fn handle_input(&mut self, input: InputEvent) {
        self.inputs.push_back(input);
    }

    /// Advance one tick by `delta_ms` of frame time.
    pub fn update<R: Rng>(&mut self, delta_ms: f64, rng: &mut R) -> Vec<TickEvent> {
        let dt = sanitize_delta(delta_ms);
        let mut events = Vec::new();

        while let Some(input) = self.inputs.pop_front() {
            self.apply_input(input, &mut events);
        }

        match self.state() {
            SimulationState::WaitingToStart => {}
            SimulationState::Running => self.advance_run(dt, rng, &mut events),
            SimulationState::GameOver => {
                if let Phase::GameOver { restart, .. } = &mut self.phase {
                    if restart.advance(dt) {
                        log::debug!("restart armed");
                        events.push(TickEvent::RestartArmed);
                    }
                }
            }
        }

        events
    }

    fn apply_input(&mut self, input: InputEvent, events: &mut Vec<TickEvent>) {
        match (self.state(), input) {
            (SimulationState::WaitingToStart, InputEvent::StartRequested) => {
                self.start_run(events)
            }
            (SimulationState::Running, InputEvent::JumpRequested) => self.player.request_jump(),
            (SimulationState::GameOver, InputEvent::StartRequested) if self.restart_armed() => {
                self.start_run(events)
            }
            // Anything else is dropped, including restarts during the grace period
            _ => {}
        }
    }

    fn start_run(&mut self, events: &mut Vec<TickEvent>) {
        self.reset();
        self.phase = Phase::Running;
        log::info!("run started");
        events.push(TickEvent::RunStarted);
    }

    fn advance_run<R: Rng>(&mut self, dt: f64, rng: &mut R, events: &mut Vec<TickEvent>) {
        let speed = self.game_speed;
        let was_jumping = self.player.is_jumping();

        self.ground.update(speed, dt);
        self.cacti.update(speed, dt, rng);
        self.birds.update(speed, dt, rng);
        self.player.update(speed, dt);
        self.score.update(dt);
        self.game_speed += dt * self.config.speed_increment;

        if !was_jumping && self.player.is_jumping() {
            events.push(TickEvent::Jumped);
        }

        if self.check_collisions() {
            self.enter_game_over(events);
        }
    }

    /// Cacti first, then birds; stops at the first hit.
    pub fn check_collisions(&self) -> bool {
        self.cacti.collides_with(&self.player, self.collision_margin)
            || self.birds.collides_with(&self.player, self.collision_margin)
    }

    /// Only reachable from `Running`, so each run notifies exactly once.
    fn enter_game_over(&mut self, events: &mut Vec<TickEvent>) {
        self.phase = Phase::GameOver {
            restart: RestartTimer::new(self.config.restart_grace_ms),
        };

        let new_high_score = self.score.set_high_score();
        let score = self.score.score();
        log::info!(
            "game over: score {} (best {}{})",
            score,
            self.score.high_score(),
            if new_high_score { ", new" } else { "" }
        );
        events.push(TickEvent::GameOver {
            score,
            new_high_score,
        });
    }

    /// Reinitialize every owned component and the game speed. The state is
    /// left to the caller.
    pub fn reset(&mut self) {
        self.game_speed = self.config.speed_start;
        self.player.reset();
        self.ground.reset();
        self.cacti.reset();
        self.birds.reset();
        self.score.reset();
    }

    /// Rebuild every scale-dependent entity at `ratio`. Score, speed and
    /// state carry over; live obstacles do not.
    pub fn rescale(&mut self, ratio: f64) -> Result<(), ScaleError> {
        let scale = match ScaleRatio::new(ratio) {
            Ok(scale) => scale,
            Err(e) => {
                log::warn!("{}; keeping scale {:.3}", e, self.scale.get());
                return Err(e);
            }
        };

        let parts = ScaledParts::build(&self.config, scale);
        self.scale = scale;
        self.surface_width = parts.surface_width;
        self.surface_height = parts.surface_height;
        self.collision_margin = parts.collision_margin;
        self.player = parts.player;
        self.ground = parts.ground;
        self.cacti = parts.cacti;
        self.birds = parts.birds;
        self.score.rescale(scale, self.surface_width);

        log::info!(
            "rescaled to {:.3} ({:.0}x{:.0})",
            scale.get(),
            self.surface_width,
            self.surface_height
        );
        Ok(())
    }

    /// Render back to front, then the overlay for the current state.
    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        surface.clear();
        self.ground.draw(surface);
        self.cacti.draw(surface);
        self.birds.draw(surface);
        self.player.draw(surface);
        self.score.draw(surface);

        match self.phase {
            Phase::WaitingToStart => surface.draw_text(
                START_PROMPT,
                self.surface_width / 14.0,
                self.surface_height / 2.0,
                &Font::new(self.scale.apply(40.0), "Verdana"),
                Rgb::GREY,
            ),
            Phase::GameOver { .. } => surface.draw_text(
                GAME_OVER_TEXT,
                self.surface_width / 4.5,
                self.surface_height / 2.0,
                &Font::new(self.scale.apply(70.0), "Verdana"),
                Rgb::GREY,
            ),
            Phase::Running => {}
        }
    }

    pub fn state(&self) -> SimulationState {
        self.phase.state()
    }

    /// True once the game-over grace period has passed.
    pub fn restart_armed(&self) -> bool {
        matches!(&self.phase, Phase::GameOver { restart, .. } if restart.is_armed())
    }

    pub fn game_speed(&self) -> f64 {
        self.game_speed
    }

    pub fn score(&self) -> u32 {
        self.score.score()
    }

    pub fn high_score(&self) -> u32 {
        self.score.high_score()
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn ground(&self) -> &Ground {
        &self.ground
    }

    pub fn cacti(&self) -> &ObstacleSpawner {
        &self.cacti
    }

    pub fn birds(&self) -> &ObstacleSpawner {
        &self.birds
    }

    pub fn scale(&self) -> ScaleRatio {
        self.scale
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn surface_size(&self) -> (f64, f64) {
        (self.surface_width, self.surface_height)
    }

    pub fn pending_inputs(&self) -> usize {
        self.inputs.len()
    }
}
