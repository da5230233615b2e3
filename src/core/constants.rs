// Logical play field. Every size and speed below is in logical units and is
// multiplied by the display scale ratio before it reaches an entity.
pub const GAME_WIDTH: f64 = 800.0;
pub const GAME_HEIGHT: f64 = 200.0;

// Difficulty ramp (speed multiplier, per millisecond of running time)
pub const GAME_SPEED_START: f64 = 1.0;
pub const GAME_SPEED_INCREMENT: f64 = 0.00001;

// Player
pub const PLAYER_WIDTH: f64 = 88.0 / 1.5;
pub const PLAYER_HEIGHT: f64 = 94.0 / 1.5;
pub const PLAYER_X: f64 = 10.0;
/// Gap between the player's feet and the bottom of the surface.
pub const PLAYER_BASELINE_OFFSET: f64 = 1.5;
/// Jump heights are measured from the bottom of the surface.
pub const MIN_JUMP_HEIGHT: f64 = 150.0;
pub const MAX_JUMP_HEIGHT: f64 = GAME_HEIGHT;
pub const JUMP_SPEED: f64 = 0.6;
pub const GRAVITY: f64 = 0.0036;
pub const RUN_FRAME_MS: f64 = 200.0;

// Ground and scrolling
pub const GROUND_WIDTH: f64 = 2400.0;
pub const GROUND_HEIGHT: f64 = 24.0;
pub const GROUND_AND_OBSTACLE_SPEED: f64 = 0.5;

// Cacti: (width, height)
pub const TALL_CACTUS_SIZE: (f64, f64) = (48.0 / 1.5, 100.0 / 1.5);
pub const CACTUS_CLUSTER_SIZE: (f64, f64) = (98.0 / 1.5, 100.0 / 1.5);
pub const SHORT_CACTUS_SIZE: (f64, f64) = (68.0 / 1.5, 70.0 / 1.5);
pub const CACTUS_GAP_MIN: f64 = 250.0;
pub const CACTUS_GAP_MAX: f64 = 1000.0;
pub const CACTUS_FIRST_SPAWN: f64 = 300.0;

// Birds: (width, height), altitude = gap between ground and the bird's belly
pub const CROW_SIZE: (f64, f64) = (80.0 / 1.5, 56.0 / 1.5);
pub const HAWK_SIZE: (f64, f64) = (100.0 / 1.5, 68.0 / 1.5);
pub const BIRD_LOW_ALTITUDE: f64 = 12.0;
pub const BIRD_HEAD_ALTITUDE: f64 = 45.0;
pub const BIRD_GAP_MIN: f64 = 1200.0;
pub const BIRD_GAP_MAX: f64 = 2600.0;
pub const BIRD_FIRST_SPAWN: f64 = 1600.0;
pub const FLAP_FRAME_MS: f64 = 250.0;

// Scoring
pub const SCORE_TIME_UNIT_MS: f64 = 100.0;

// Collision tolerance inset
pub const COLLISION_MARGIN: f64 = 6.0;

// Game over
pub const RESTART_GRACE_MS: f64 = 1000.0;

// Frame clock: longest delta handed to the simulation after a stall
pub const MAX_FRAME_DELTA_MS: f64 = 100.0;

// Frontend
pub const FRAME_BUDGET_MS: u64 = 16;
pub const RESIZE_DEBOUNCE_MS: u64 = 500;
pub const DATA_DIR_NAME: &str = ".dino-dash";
pub const HIGH_SCORE_FILE: &str = "high_score.json";
pub const CONFIG_FILE: &str = "config.json";
pub const LOG_FILE: &str = "dino-dash.log";
