//! The runner: a fixed-x sprite with a two-state jump machine.

use super::hitbox::{Collidable, Drawable, Entity, Hitbox};
use crate::core::clock::sanitize_delta;
use crate::core::config::PlayerConfig;
use crate::core::scale::ScaleRatio;
use crate::render::{DrawSurface, RunnerPose, Sprite};

/// Vertical movement state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpState {
    Standing,
    /// `cleared_min` turns true once the player has risen to the minimum
    /// jump height; gravity only acts after that.
    Jumping { cleared_min: bool },
}

#[derive(Debug, Clone)]
pub struct Player {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    /// Standing y. The player never sinks below this.
    ground_y: f64,
    /// Highest allowed y (smallest value).
    ceiling_y: f64,
    /// y at which the guaranteed rise ends.
    min_jump_y: f64,
    /// Upward velocity in surface units per ms.
    velocity: f64,
    jump_speed: f64,
    gravity: f64,
    state: JumpState,
    jump_queued: bool,
    run_frame_ms: f64,
    /// Time spent running on the ground, drives the stride animation.
    anim_ms: f64,
}

impl Player {
    pub fn new(config: &PlayerConfig, scale: ScaleRatio, surface_height: f64) -> Self {
        let width = scale.apply(config.width);
        let height = scale.apply(config.height);
        let ground_y = surface_height - height - scale.apply(config.baseline_offset);
        let ceiling_y = (surface_height - scale.apply(config.max_jump_height)).min(ground_y);
        let min_jump_y =
            (surface_height - scale.apply(config.min_jump_height)).clamp(ceiling_y, ground_y);

        Self {
            x: scale.apply(config.x),
            y: ground_y,
            width,
            height,
            ground_y,
            ceiling_y,
            min_jump_y,
            velocity: 0.0,
            jump_speed: scale.apply(config.jump_speed),
            gravity: scale.apply(config.gravity),
            state: JumpState::Standing,
            jump_queued: false,
            run_frame_ms: config.run_frame_ms,
            anim_ms: 0.0,
        }
    }

    /// Queue a jump for the next update. Ignored unless standing by then.
    pub fn request_jump(&mut self) {
        self.jump_queued = true;
    }

    /// Back to standing on the ground with no queued input.
    pub fn reset(&mut self) {
        self.y = self.ground_y;
        self.velocity = 0.0;
        self.state = JumpState::Standing;
        self.jump_queued = false;
        self.anim_ms = 0.0;
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn ground_y(&self) -> f64 {
        self.ground_y
    }

    pub fn ceiling_y(&self) -> f64 {
        self.ceiling_y
    }

    pub fn min_jump_y(&self) -> f64 {
        self.min_jump_y
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn state(&self) -> JumpState {
        self.state
    }

    pub fn is_jumping(&self) -> bool {
        matches!(self.state, JumpState::Jumping { .. })
    }

    pub fn pose(&self) -> RunnerPose {
        if self.is_jumping() || self.anim_ms <= 0.0 {
            return RunnerPose::Standing;
        }
        if (self.anim_ms / self.run_frame_ms) as u64 % 2 == 0 {
            RunnerPose::StrideLeft
        } else {
            RunnerPose::StrideRight
        }
    }

    fn land(&mut self) {
        self.y = self.ground_y;
        self.velocity = 0.0;
        self.state = JumpState::Standing;
    }
}

impl Entity for Player {
    fn update(&mut self, game_speed: f64, delta_ms: f64) {
        let dt = sanitize_delta(delta_ms);

        // A queued jump waits for a tick that actually moves
        if dt > 0.0 && std::mem::take(&mut self.jump_queued) && self.state == JumpState::Standing
        {
            self.state = JumpState::Jumping { cleared_min: false };
            self.velocity = self.jump_speed;
        }

        match self.state {
            JumpState::Standing => {
                self.anim_ms += dt;
            }
            JumpState::Jumping { mut cleared_min } => {
                if cleared_min {
                    self.velocity -= self.gravity * dt * game_speed;
                }
                self.y -= self.velocity * dt;

                if self.y <= self.min_jump_y {
                    cleared_min = true;
                }
                if self.y <= self.ceiling_y {
                    self.y = self.ceiling_y;
                    self.velocity = self.velocity.min(0.0);
                    cleared_min = true;
                }

                if self.y >= self.ground_y {
                    self.land();
                } else {
                    self.state = JumpState::Jumping { cleared_min };
                }
            }
        }
    }
}

impl Drawable for Player {
    fn draw(&self, surface: &mut dyn DrawSurface) {
        surface.draw_image(
            Sprite::Runner(self.pose()),
            self.x,
            self.y,
            self.width,
            self.height,
        );
    }
}

impl Collidable for Player {
    fn hitbox(&self) -> Hitbox {
        Hitbox::new(self.x, self.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::*;
    use crate::render::RecordingSurface;

    fn player() -> Player {
        Player::new(&PlayerConfig::default(), ScaleRatio::default(), GAME_HEIGHT)
    }

    #[test]
    fn test_new_player_stands_on_baseline() {
        let p = player();
        let expected_ground = GAME_HEIGHT - PLAYER_HEIGHT - PLAYER_BASELINE_OFFSET;
        assert!((p.y() - expected_ground).abs() < 1e-9);
        assert_eq!(p.state(), JumpState::Standing);
        assert_eq!(p.x(), PLAYER_X);
        assert_eq!(p.ceiling_y(), 0.0);
        assert_eq!(p.min_jump_y(), GAME_HEIGHT - MIN_JUMP_HEIGHT);
    }

    #[test]
    fn test_scale_applies_to_geometry() {
        let scale = ScaleRatio::new(2.0).unwrap();
        let p = Player::new(&PlayerConfig::default(), scale, GAME_HEIGHT * 2.0);
        let hb = p.hitbox();
        assert!((hb.width - PLAYER_WIDTH * 2.0).abs() < 1e-9);
        assert!((hb.height - PLAYER_HEIGHT * 2.0).abs() < 1e-9);
        assert_eq!(p.x(), PLAYER_X * 2.0);
    }

    #[test]
    fn test_jump_only_from_ground() {
        let mut p = player();
        p.request_jump();
        p.update(1.0, 16.0);
        assert!(p.is_jumping());
        let v = p.velocity();

        // A second request mid-air changes nothing
        p.request_jump();
        p.update(1.0, 0.0);
        assert_eq!(p.velocity(), v);
        assert!(p.is_jumping());
    }

    #[test]
    fn test_no_gravity_before_min_height() {
        let mut p = player();
        p.request_jump();
        p.update(1.0, 10.0);
        assert_eq!(p.velocity(), JUMP_SPEED);
        assert!(p.y() > p.min_jump_y());
        p.update(1.0, 10.0);
        assert_eq!(p.velocity(), JUMP_SPEED);
    }

    #[test]
    fn test_full_jump_returns_exactly_to_ground() {
        let mut p = player();
        let ground = p.ground_y();
        p.request_jump();

        let mut min_y = ground;
        let mut ticks = 0;
        loop {
            p.update(1.0, 16.0);
            ticks += 1;
            min_y = min_y.min(p.y());
            assert!(p.y() <= ground);
            assert!(p.y() >= p.ceiling_y());
            if !p.is_jumping() {
                break;
            }
            assert!(ticks < 1000, "jump never landed");
        }

        assert!(min_y <= p.min_jump_y(), "jump must clear the minimum height");
        assert_eq!(p.y(), ground);
        assert_eq!(p.velocity(), 0.0);
    }

    #[test]
    fn test_ceiling_clamps_and_stops_rise() {
        let mut config = PlayerConfig::default();
        config.jump_speed = 50.0; // absurd take-off
        let mut p = Player::new(&config, ScaleRatio::default(), GAME_HEIGHT);
        p.request_jump();
        p.update(1.0, 16.0);
        assert_eq!(p.y(), p.ceiling_y());
        assert_eq!(p.velocity(), 0.0);

        p.update(1.0, 16.0);
        assert!(p.velocity() < 0.0, "falls after touching the ceiling");
    }

    #[test]
    fn test_huge_delta_lands_without_penetration() {
        let mut p = player();
        p.request_jump();
        p.update(1.0, 16.0);
        // Overshoots the ceiling and is clamped there
        p.update(1.0, 10_000.0);
        assert_eq!(p.y(), p.ceiling_y());
        // Falls far past the ground and is snapped onto it
        p.update(1.0, 10_000.0);
        assert_eq!(p.y(), p.ground_y());
        assert!(!p.is_jumping());
    }

    #[test]
    fn test_invalid_delta_is_no_movement() {
        let mut p = player();
        p.request_jump();
        p.update(1.0, 16.0);
        let y = p.y();
        p.update(1.0, f64::NAN);
        p.update(1.0, -40.0);
        p.update(1.0, f64::INFINITY);
        assert_eq!(p.y(), y);
    }

    #[test]
    fn test_jump_survives_zero_length_tick() {
        let mut p = player();
        p.request_jump();
        p.update(1.0, 0.0);
        p.update(1.0, f64::NAN);
        assert!(!p.is_jumping());
        assert_eq!(p.y(), p.ground_y());

        p.update(1.0, 16.0);
        assert!(p.is_jumping());
        assert!(p.y() < p.ground_y());
    }

    #[test]
    fn test_faster_game_shortens_fall() {
        let airtime = |speed: f64| {
            let mut p = player();
            p.request_jump();
            let mut ticks = 0;
            loop {
                p.update(speed, 16.0);
                ticks += 1;
                if !p.is_jumping() {
                    return ticks;
                }
            }
        };
        assert!(airtime(3.0) < airtime(1.0));
    }

    #[test]
    fn test_reset_restores_standing() {
        let mut p = player();
        p.request_jump();
        p.update(1.0, 50.0);
        p.request_jump();
        p.reset();
        assert_eq!(p.y(), p.ground_y());
        assert_eq!(p.state(), JumpState::Standing);
        p.update(1.0, 16.0);
        assert!(!p.is_jumping(), "queued jump is dropped by reset");
    }

    #[test]
    fn test_stride_animation_and_draw() {
        let mut p = player();
        assert_eq!(p.pose(), RunnerPose::Standing);
        p.update(1.0, 50.0);
        assert_eq!(p.pose(), RunnerPose::StrideLeft);
        p.update(1.0, RUN_FRAME_MS);
        assert_eq!(p.pose(), RunnerPose::StrideRight);

        let mut surface = RecordingSurface::new();
        let before = p.y();
        p.draw(&mut surface);
        assert_eq!(surface.sprites(), vec![Sprite::Runner(RunnerPose::StrideRight)]);
        assert_eq!(p.y(), before);
    }
}
