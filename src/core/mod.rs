//! Simulation core: configuration, time, scale and the run state machine.

pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod scale;
pub mod simulation;

pub use clock::{sanitize_delta, FrameTimer, ManualClock, MonotonicClock, TimeSource};
pub use config::{GameConfig, GroundConfig, PlayerConfig, SpawnerConfig, SpeciesSpec};
pub use error::{ConfigError, ScaleError, SetupError};
pub use scale::{compute_scale_ratio, ScaleRatio};
pub use simulation::{InputEvent, Simulation, SimulationState, TickEvent};
