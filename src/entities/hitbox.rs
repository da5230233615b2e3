//! Shared entity contract and forgiving AABB collision.

use crate::render::DrawSurface;

/// Axis-aligned bounding box in surface units. `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Hitbox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Length of the horizontal overlap (negative when apart).
    pub fn overlap_x(&self, other: &Hitbox) -> f64 {
        self.right().min(other.right()) - self.x.max(other.x)
    }

    /// Length of the vertical overlap (negative when apart).
    pub fn overlap_y(&self, other: &Hitbox) -> f64 {
        self.bottom().min(other.bottom()) - self.y.max(other.y)
    }

    /// True when the boxes overlap by more than `margin` on both axes.
    ///
    /// Overlap of exactly `margin` is forgiven.
    pub fn intersects(&self, other: &Hitbox, margin: f64) -> bool {
        self.overlap_x(other) > margin && self.overlap_y(other) > margin
    }
}

/// Something with a box that can be hit.
pub trait Collidable {
    fn hitbox(&self) -> Hitbox;

    fn collides_with(&self, other: &dyn Collidable, margin: f64) -> bool {
        self.hitbox().intersects(&other.hitbox(), margin)
    }
}

/// Something that can blit itself. Drawing must not change state.
pub trait Drawable {
    fn draw(&self, surface: &mut dyn DrawSurface);
}

/// Drawable object advanced once per tick by game speed and frame delta.
pub trait Entity: Drawable {
    fn update(&mut self, game_speed: f64, delta_ms: f64);
}
