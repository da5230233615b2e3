//! The draw-surface capability the simulation renders through.
//!
//! The simulation never owns a surface: every `draw` call borrows one for the
//! duration of the render pass.

use crate::entities::obstacles::Species;

/// Running animation poses for the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunnerPose {
    Standing,
    StrideLeft,
    StrideRight,
}

/// Every image the simulation knows how to ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Runner(RunnerPose),
    /// Obstacle species plus its cosmetic animation frame.
    Obstacle(Species, u8),
    Ground,
}

/// 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const GREY: Rgb = Rgb(128, 128, 128);
    pub const SCORE: Rgb = Rgb(0x52, 0x52, 0x50);
}

/// Font request. Surfaces that cannot honor the size may ignore it.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub size: f64,
    pub family: &'static str,
}

impl Font {
    pub fn new(size: f64, family: &'static str) -> Self {
        Self { size, family }
    }
}

/// Anything the simulation can draw onto.
pub trait DrawSurface {
    fn clear(&mut self);
    fn draw_image(&mut self, sprite: Sprite, x: f64, y: f64, width: f64, height: f64);
    /// `y` is the text baseline.
    fn draw_text(&mut self, text: &str, x: f64, y: f64, font: &Font, color: Rgb);
}

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Image {
        sprite: Sprite,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Text {
        text: String,
        x: f64,
        y: f64,
        font: Font,
        color: Rgb,
    },
}

/// Surface that remembers what was drawn instead of drawing it.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texts drawn since the last clear, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Sprites drawn since the last clear, in order.
    pub fn sprites(&self) -> Vec<Sprite> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Image { sprite, .. } => Some(*sprite),
                _ => None,
            })
            .collect()
    }
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn draw_image(&mut self, sprite: Sprite, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::Image {
            sprite,
            x,
            y,
            width,
            height,
        });
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, font: &Font, color: Rgb) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            font: font.clone(),
            color,
        });
    }
}
