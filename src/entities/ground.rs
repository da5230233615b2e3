//! Decorative floor strip that scrolls and wraps seamlessly.

use super::hitbox::{Drawable, Entity};
use crate::core::clock::sanitize_delta;
use crate::core::config::GroundConfig;
use crate::core::scale::ScaleRatio;
use crate::render::{DrawSurface, Sprite};

#[derive(Debug, Clone)]
pub struct Ground {
    x: f64,
    y: f64,
    tile_width: f64,
    height: f64,
    /// Surface units per ms at game speed 1.
    speed: f64,
}

impl Ground {
    pub fn new(
        config: &GroundConfig,
        scroll_speed: f64,
        scale: ScaleRatio,
        surface_height: f64,
    ) -> Self {
        let height = scale.apply(config.height);
        Self {
            x: 0.0,
            y: surface_height - height,
            tile_width: scale.apply(config.width),
            height,
            speed: scale.apply(scroll_speed),
        }
    }

    pub fn reset(&mut self) {
        self.x = 0.0;
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn tile_width(&self) -> f64 {
        self.tile_width
    }
}

impl Entity for Ground {
    fn update(&mut self, game_speed: f64, delta_ms: f64) {
        let dt = sanitize_delta(delta_ms);
        self.x -= self.speed * game_speed * dt;
        if self.x <= -self.tile_width {
            // Modulo keeps x in (-tile_width, 0] even after a multi-tile step
            self.x %= self.tile_width;
        }
    }
}

impl Drawable for Ground {
    fn draw(&self, surface: &mut dyn DrawSurface) {
        surface.draw_image(Sprite::Ground, self.x, self.y, self.tile_width, self.height);
        surface.draw_image(
            Sprite::Ground,
            self.x + self.tile_width,
            self.y,
            self.tile_width,
            self.height,
        );
    }
}
