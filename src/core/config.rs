//! Game configuration.
//!
//! Defaults come from [`constants`](super::constants). A JSON override can
//! live at `~/.dino-dash/config.json`; any field it omits keeps its default.

use super::constants::*;
use super::error::ConfigError;
use crate::entities::obstacles::Species;
use crate::utils::persistence;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One catalog entry: a species and its logical size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeciesSpec {
    pub species: Species,
    pub width: f64,
    pub height: f64,
}

impl SpeciesSpec {
    pub fn new(species: Species, (width, height): (f64, f64)) -> Self {
        Self {
            species,
            width,
            height,
        }
    }
}

/// Player body and jump tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: f64,
    pub height: f64,
    pub x: f64,
    pub baseline_offset: f64,
    pub min_jump_height: f64,
    pub max_jump_height: f64,
    /// Take-off velocity in logical units per ms.
    pub jump_speed: f64,
    /// Velocity lost per ms², before game-speed scaling.
    pub gravity: f64,
    pub run_frame_ms: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            x: PLAYER_X,
            baseline_offset: PLAYER_BASELINE_OFFSET,
            min_jump_height: MIN_JUMP_HEIGHT,
            max_jump_height: MAX_JUMP_HEIGHT,
            jump_speed: JUMP_SPEED,
            gravity: GRAVITY,
            run_frame_ms: RUN_FRAME_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            width: GROUND_WIDTH,
            height: GROUND_HEIGHT,
        }
    }
}

/// Catalog, spacing and placement for one obstacle spawner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnerConfig {
    pub catalog: Vec<SpeciesSpec>,
    pub gap_min: f64,
    pub gap_max: f64,
    /// Distance between the ground and an obstacle's lower edge.
    pub altitudes: Vec<f64>,
    /// Countdown armed by `reset()` before the first obstacle appears.
    pub first_spawn_distance: f64,
    /// Cosmetic frame cycle; zero disables animation.
    pub frame_ms: f64,
}

impl SpawnerConfig {
    pub fn cacti() -> Self {
        Self {
            catalog: vec![
                SpeciesSpec::new(Species::TallCactus, TALL_CACTUS_SIZE),
                SpeciesSpec::new(Species::CactusCluster, CACTUS_CLUSTER_SIZE),
                SpeciesSpec::new(Species::ShortCactus, SHORT_CACTUS_SIZE),
            ],
            gap_min: CACTUS_GAP_MIN,
            gap_max: CACTUS_GAP_MAX,
            altitudes: vec![0.0],
            first_spawn_distance: CACTUS_FIRST_SPAWN,
            frame_ms: 0.0,
        }
    }

    pub fn birds() -> Self {
        Self {
            catalog: vec![
                SpeciesSpec::new(Species::Crow, CROW_SIZE),
                SpeciesSpec::new(Species::Hawk, HAWK_SIZE),
            ],
            gap_min: BIRD_GAP_MIN,
            gap_max: BIRD_GAP_MAX,
            altitudes: vec![BIRD_LOW_ALTITUDE, BIRD_HEAD_ALTITUDE],
            first_spawn_distance: BIRD_FIRST_SPAWN,
            frame_ms: FLAP_FRAME_MS,
        }
    }

    fn validate(&self, spawner: &'static str) -> Result<(), ConfigError> {
        if self.catalog.is_empty() {
            return Err(ConfigError::EmptyCatalog { spawner });
        }
        for entry in &self.catalog {
            if !is_positive(entry.width) || !is_positive(entry.height) {
                return Err(ConfigError::DegenerateSpecies {
                    species: entry.species,
                    width: entry.width,
                    height: entry.height,
                });
            }
        }
        if !is_non_negative(self.gap_min) || !self.gap_max.is_finite() || self.gap_min > self.gap_max
        {
            return Err(ConfigError::GapRange {
                spawner,
                min: self.gap_min,
                max: self.gap_max,
            });
        }
        if self.altitudes.is_empty() {
            return Err(ConfigError::NoAltitudes { spawner });
        }
        for &altitude in &self.altitudes {
            non_negative("altitude", altitude)?;
        }
        non_negative("first_spawn_distance", self.first_spawn_distance)?;
        non_negative("frame_ms", self.frame_ms)?;
        Ok(())
    }
}

/// Complete tuning for one simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub game_width: f64,
    pub game_height: f64,
    pub speed_start: f64,
    /// Game speed gained per ms of running time.
    pub speed_increment: f64,
    /// Scroll speed of ground and obstacles at game speed 1, units per ms.
    pub scroll_speed: f64,
    pub score_time_unit_ms: f64,
    pub collision_margin: f64,
    pub restart_grace_ms: f64,
    pub max_frame_delta_ms: f64,
    pub player: PlayerConfig,
    pub ground: GroundConfig,
    pub cacti: SpawnerConfig,
    pub birds: SpawnerConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            game_width: GAME_WIDTH,
            game_height: GAME_HEIGHT,
            speed_start: GAME_SPEED_START,
            speed_increment: GAME_SPEED_INCREMENT,
            scroll_speed: GROUND_AND_OBSTACLE_SPEED,
            score_time_unit_ms: SCORE_TIME_UNIT_MS,
            collision_margin: COLLISION_MARGIN,
            restart_grace_ms: RESTART_GRACE_MS,
            max_frame_delta_ms: MAX_FRAME_DELTA_MS,
            player: PlayerConfig::default(),
            ground: GroundConfig::default(),
            cacti: SpawnerConfig::cacti(),
            birds: SpawnerConfig::birds(),
        }
    }
}

impl GameConfig {
    /// Check every field a simulation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("game_width", self.game_width)?;
        positive("game_height", self.game_height)?;
        positive("speed_start", self.speed_start)?;
        positive("speed_increment", self.speed_increment)?;
        positive("scroll_speed", self.scroll_speed)?;
        positive("score_time_unit_ms", self.score_time_unit_ms)?;
        non_negative("collision_margin", self.collision_margin)?;
        non_negative("restart_grace_ms", self.restart_grace_ms)?;
        positive("max_frame_delta_ms", self.max_frame_delta_ms)?;

        let p = &self.player;
        positive("player.width", p.width)?;
        positive("player.height", p.height)?;
        non_negative("player.x", p.x)?;
        non_negative("player.baseline_offset", p.baseline_offset)?;
        positive("player.min_jump_height", p.min_jump_height)?;
        positive("player.max_jump_height", p.max_jump_height)?;
        if p.min_jump_height > p.max_jump_height {
            return Err(ConfigError::JumpRange {
                min: p.min_jump_height,
                max: p.max_jump_height,
            });
        }
        positive("player.jump_speed", p.jump_speed)?;
        positive("player.gravity", p.gravity)?;
        positive("player.run_frame_ms", p.run_frame_ms)?;

        positive("ground.width", self.ground.width)?;
        positive("ground.height", self.ground.height)?;

        self.cacti.validate("cactus")?;
        self.birds.validate("bird")?;
        Ok(())
    }

    /// Load the override file, falling back to defaults when it is missing,
    /// unreadable or fails validation.
    pub fn load_or_default(path: &Path) -> Self {
        let config: GameConfig = persistence::load_json_or_default(path);
        match config.validate() {
            Ok(()) => config,
            Err(e) => {
                log::warn!("ignoring {}: {}", path.display(), e);
                GameConfig::default()
            }
        }
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if is_positive(value) {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if is_non_negative(value) {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}
