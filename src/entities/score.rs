//! Time-driven score counter with a persisted best.

use super::hitbox::Drawable;
use crate::core::clock::sanitize_delta;
use crate::core::scale::ScaleRatio;
use crate::render::{DrawSurface, Font, Rgb};
use crate::storage::HighScoreStore;

pub struct ScoreTracker {
    elapsed_ms: f64,
    time_unit_ms: f64,
    high_score: u32,
    store: Box<dyn HighScoreStore>,
    scale: ScaleRatio,
    surface_width: f64,
}

impl std::fmt::Debug for ScoreTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreTracker")
            .field("elapsed_ms", &self.elapsed_ms)
            .field("score", &self.score())
            .field("high_score", &self.high_score)
            .finish()
    }
}

impl ScoreTracker {
    /// Reads the stored best score once, here.
    pub fn new(
        store: Box<dyn HighScoreStore>,
        time_unit_ms: f64,
        scale: ScaleRatio,
        surface_width: f64,
    ) -> Self {
        let high_score = store.load();
        Self {
            elapsed_ms: 0.0,
            time_unit_ms,
            high_score,
            store,
            scale,
            surface_width,
        }
    }

    pub fn update(&mut self, delta_ms: f64) {
        self.elapsed_ms += sanitize_delta(delta_ms);
    }

    pub fn score(&self) -> u32 {
        (self.elapsed_ms / self.time_unit_ms).floor() as u32
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Record the current score as the best if it beats it. Returns true
    /// when a new best was set.
    pub fn set_high_score(&mut self) -> bool {
        let score = self.score();
        if score <= self.high_score {
            return false;
        }
        self.high_score = score;
        if let Err(e) = self.store.save(score) {
            log::warn!("could not persist high score {}: {}", score, e);
        }
        true
    }

    /// Zero the run. The best score survives.
    pub fn reset(&mut self) {
        self.elapsed_ms = 0.0;
    }

    /// Follow a display rescale; only the drawing position depends on it.
    pub fn rescale(&mut self, scale: ScaleRatio, surface_width: f64) {
        self.scale = scale;
        self.surface_width = surface_width;
    }
}

impl Drawable for ScoreTracker {
    fn draw(&self, surface: &mut dyn DrawSurface) {
        let y = self.scale.apply(20.0);
        let font = Font::new(self.scale.apply(20.0), "serif");
        let score_x = self.surface_width - self.scale.apply(75.0);
        let high_score_x = score_x - self.scale.apply(125.0);

        surface.draw_text(
            &format!("HI {:06}", self.high_score),
            high_score_x,
            y,
            &font,
            Rgb::SCORE,
        );
        surface.draw_text(&format!("{:06}", self.score()), score_x, y, &font, Rgb::SCORE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::*;
    use crate::render::RecordingSurface;
    use crate::storage::MemoryHighScoreStore;
    use std::io;

    fn tracker(best: u32) -> ScoreTracker {
        ScoreTracker::new(
            Box::new(MemoryHighScoreStore::new(best)),
            SCORE_TIME_UNIT_MS,
            ScaleRatio::default(),
            GAME_WIDTH,
        )
    }

    #[test]
    fn test_score_is_floor_of_elapsed_units() {
        let mut t = tracker(0);
        t.update(99.0);
        assert_eq!(t.score(), 0);
        t.update(1.0);
        assert_eq!(t.score(), 1);
        t.update(250.0);
        assert_eq!(t.score(), 3);
    }

    #[test]
    fn test_invalid_delta_does_not_count() {
        let mut t = tracker(0);
        t.update(f64::NAN);
        t.update(-500.0);
        assert_eq!(t.elapsed_ms(), 0.0);
    }

    #[test]
    fn test_high_score_only_grows() {
        let mut t = tracker(10);
        assert_eq!(t.high_score(), 10);

        t.update(500.0); // score 5
        assert!(!t.set_high_score());
        assert_eq!(t.high_score(), 10);

        t.update(1000.0); // score 15
        assert!(t.set_high_score());
        assert_eq!(t.high_score(), 15);
    }

    #[test]
    fn test_equal_score_is_not_a_new_best() {
        let mut t = tracker(3);
        t.update(300.0);
        assert!(!t.set_high_score());
    }

    #[test]
    fn test_reset_keeps_high_score() {
        let mut t = tracker(0);
        t.update(700.0);
        t.set_high_score();
        t.reset();
        assert_eq!(t.score(), 0);
        assert_eq!(t.high_score(), 7);
    }

    struct FailingStore;

    impl HighScoreStore for FailingStore {
        fn load(&self) -> u32 {
            2
        }

        fn save(&mut self, _score: u32) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
        }
    }

    #[test]
    fn test_failed_save_still_updates_memory() {
        let mut t = ScoreTracker::new(
            Box::new(FailingStore),
            SCORE_TIME_UNIT_MS,
            ScaleRatio::default(),
            GAME_WIDTH,
        );
        t.update(1000.0);
        assert!(t.set_high_score());
        assert_eq!(t.high_score(), 10);
    }

    #[test]
    fn test_draw_pads_to_six_digits() {
        let mut t = tracker(123);
        t.update(4500.0);
        let mut surface = RecordingSurface::new();
        t.draw(&mut surface);
        assert_eq!(surface.texts(), vec!["HI 000123", "000045"]);
    }
}
