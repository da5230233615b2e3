//! Terminal rendering: the half-block pixel surface and the game screen.

pub mod game_common;
pub mod pixel_canvas;
pub mod runner_scene;
pub mod sprites;

pub use pixel_canvas::PixelCanvas;
pub use runner_scene::{play_field_pixels, render_runner_scene};
