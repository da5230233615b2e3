//! Dino Dash - endless runner simulation core and terminal frontend.
//!
//! The simulation in [`core`] is frontend-agnostic: it draws through
//! [`render::DrawSurface`], reads its best score through
//! [`storage::HighScoreStore`] and takes randomness as a `rand::Rng`.
//! [`ui`] and [`input`] implement those seams for a terminal.

pub mod build_info;
pub mod core;
pub mod entities;
pub mod input;
pub mod logging;
pub mod render;
pub mod storage;
pub mod ui;
pub mod utils;
