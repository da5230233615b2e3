//! Rendering capability shared by the simulation and its frontends.

pub mod surface;

pub use surface::{DrawCommand, DrawSurface, Font, RecordingSurface, Rgb, RunnerPose, Sprite};
