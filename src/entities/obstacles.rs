//! Obstacles, their FIFO group, and the spawner that feeds it.
//!
//! Cacti and birds share one spawner type; the difference is just the
//! catalog, the spacing window and the set of altitudes.

use super::hitbox::{Collidable, Drawable, Hitbox};
use crate::core::clock::sanitize_delta;
use crate::core::config::SpawnerConfig;
use crate::core::scale::ScaleRatio;
use crate::render::{DrawSurface, Sprite};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Obstacle catalog entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    // Ground obstacles
    TallCactus,
    CactusCluster,
    ShortCactus,
    // Airborne obstacles
    Crow,
    Hawk,
}

impl Species {
    pub fn is_flying(&self) -> bool {
        matches!(self, Self::Crow | Self::Hawk)
    }
}

/// Which lane a spawner feeds. Also fixes the collision priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnerKind {
    Ground,
    Airborne,
}

impl SpawnerKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ground => "cactus",
            Self::Airborne => "bird",
        }
    }
}

/// A single live obstacle in surface units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub species: Species,
}

impl Obstacle {
    /// Fully past the left edge of the surface.
    pub fn is_offscreen(&self) -> bool {
        self.x + self.width < 0.0
    }
}

impl Collidable for Obstacle {
    fn hitbox(&self) -> Hitbox {
        Hitbox::new(self.x, self.y, self.width, self.height)
    }
}

/// Live obstacles in spawn order. New ones join at the tail, expired ones
/// leave from the head; nothing is ever reordered.
#[derive(Debug, Clone, Default)]
pub struct ObstacleGroup {
    obstacles: VecDeque<Obstacle>,
}

impl ObstacleGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, obstacle: Obstacle) {
        self.obstacles.push_back(obstacle);
    }

    /// Move every member left by `distance`.
    pub fn advance(&mut self, distance: f64) {
        for obstacle in &mut self.obstacles {
            obstacle.x -= distance;
        }
    }

    /// Pop expired obstacles off the head. Returns how many were dropped.
    pub fn drop_offscreen(&mut self) -> usize {
        let mut dropped = 0;
        while self.obstacles.front().is_some_and(Obstacle::is_offscreen) {
            self.obstacles.pop_front();
            dropped += 1;
        }
        dropped
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    /// The most recently spawned obstacle.
    pub fn last(&self) -> Option<&Obstacle> {
        self.obstacles.back()
    }

    /// First member that hits `other`, if any.
    pub fn first_hit(&self, other: &dyn Collidable, margin: f64) -> Option<&Obstacle> {
        self.obstacles
            .iter()
            .find(|o| o.collides_with(other, margin))
    }
}

/// A catalog entry already multiplied by the scale ratio.
#[derive(Debug, Clone, Copy)]
struct ScaledSpecies {
    species: Species,
    width: f64,
    height: f64,
}

/// Owns one obstacle group and decides when and where to add to it.
#[derive(Debug, Clone)]
pub struct ObstacleSpawner {
    kind: SpawnerKind,
    catalog: Vec<ScaledSpecies>,
    gap_min: f64,
    gap_max: f64,
    altitudes: Vec<f64>,
    first_spawn_distance: f64,
    frame_ms: f64,
    /// Surface units per ms at game speed 1.
    speed: f64,
    surface_width: f64,
    /// y of the ground line obstacles rest on.
    baseline_y: f64,
    group: ObstacleGroup,
    /// Scroll distance left before the next spawn.
    distance_until_spawn: f64,
    anim_ms: f64,
    spawned: u64,
}

impl ObstacleSpawner {
    /// `config` must already be validated: an empty catalog or altitude list
    /// would leave nothing to spawn.
    pub fn new(
        kind: SpawnerKind,
        config: &SpawnerConfig,
        scroll_speed: f64,
        scale: ScaleRatio,
        surface_width: f64,
        baseline_y: f64,
    ) -> Self {
        let catalog = config
            .catalog
            .iter()
            .map(|entry| ScaledSpecies {
                species: entry.species,
                width: scale.apply(entry.width),
                height: scale.apply(entry.height),
            })
            .collect();

        let first_spawn_distance = scale.apply(config.first_spawn_distance);
        Self {
            kind,
            catalog,
            gap_min: scale.apply(config.gap_min),
            gap_max: scale.apply(config.gap_max),
            altitudes: config.altitudes.iter().map(|&a| scale.apply(a)).collect(),
            first_spawn_distance,
            frame_ms: config.frame_ms,
            speed: scale.apply(scroll_speed),
            surface_width,
            baseline_y,
            group: ObstacleGroup::new(),
            distance_until_spawn: first_spawn_distance,
            anim_ms: 0.0,
            spawned: 0,
        }
    }

    /// Scroll, recycle and maybe spawn.
    pub fn update<R: Rng>(&mut self, game_speed: f64, delta_ms: f64, rng: &mut R) {
        let dt = sanitize_delta(delta_ms);
        let distance = self.speed * game_speed * dt;

        self.group.advance(distance);
        self.group.drop_offscreen();
        self.anim_ms += dt;

        self.distance_until_spawn -= distance;
        if self.distance_until_spawn <= 0.0 {
            self.spawn(rng);
        }
    }

    /// Place one random obstacle at the right edge and re-arm the countdown.
    fn spawn<R: Rng>(&mut self, rng: &mut R) {
        let (Some(entry), Some(&altitude)) = (
            pick(&self.catalog, rng).copied(),
            pick(&self.altitudes, rng),
        ) else {
            return;
        };

        let obstacle = Obstacle {
            x: self.surface_width,
            y: self.baseline_y - altitude - entry.height,
            width: entry.width,
            height: entry.height,
            species: entry.species,
        };
        log::debug!(
            "spawned {:?} at y={:.1} ({} spawner)",
            obstacle.species,
            obstacle.y,
            self.kind.name()
        );
        self.group.push(obstacle);
        self.spawned += 1;

        let gap = if self.gap_max > self.gap_min {
            rng.gen_range(self.gap_min..=self.gap_max)
        } else {
            self.gap_min
        };
        self.distance_until_spawn = entry.width + gap;
    }

    /// Empty the group and re-arm the first spawn.
    pub fn reset(&mut self) {
        self.group.clear();
        self.distance_until_spawn = self.first_spawn_distance;
        self.anim_ms = 0.0;
    }

    pub fn kind(&self) -> SpawnerKind {
        self.kind
    }

    pub fn group(&self) -> &ObstacleGroup {
        &self.group
    }

    pub fn distance_until_spawn(&self) -> f64 {
        self.distance_until_spawn
    }

    /// Total obstacles spawned since construction.
    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    /// Scaled spawn gap window.
    pub fn gap_range(&self) -> (f64, f64) {
        (self.gap_min, self.gap_max)
    }

    pub fn collides_with(&self, other: &dyn Collidable, margin: f64) -> bool {
        self.group.first_hit(other, margin).is_some()
    }

    fn frame(&self) -> u8 {
        if self.frame_ms > 0.0 {
            ((self.anim_ms / self.frame_ms) as u64 % 2) as u8
        } else {
            0
        }
    }
}

impl Drawable for ObstacleSpawner {
    fn draw(&self, surface: &mut dyn DrawSurface) {
        let frame = self.frame();
        for o in self.group.iter() {
            surface.draw_image(
                Sprite::Obstacle(o.species, frame),
                o.x,
                o.y,
                o.width,
                o.height,
            );
        }
    }
}

fn pick<'a, T, R: Rng>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    if items.is_empty() {
        None
    } else {
        Some(&items[rng.gen_range(0..items.len())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::*;
    use crate::render::RecordingSurface;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn obstacle(x: f64, width: f64) -> Obstacle {
        Obstacle {
            x,
            y: 100.0,
            width,
            height: 40.0,
            species: Species::TallCactus,
        }
    }

    fn cacti() -> ObstacleSpawner {
        ObstacleSpawner::new(
            SpawnerKind::Ground,
            &SpawnerConfig::cacti(),
            GROUND_AND_OBSTACLE_SPEED,
            ScaleRatio::default(),
            GAME_WIDTH,
            GAME_HEIGHT,
        )
    }

    fn birds() -> ObstacleSpawner {
        ObstacleSpawner::new(
            SpawnerKind::Airborne,
            &SpawnerConfig::birds(),
            GROUND_AND_OBSTACLE_SPEED,
            ScaleRatio::default(),
            GAME_WIDTH,
            GAME_HEIGHT,
        )
    }

    #[test]
    fn test_obstacle_removed_only_after_fully_offscreen() {
        let mut group = ObstacleGroup::new();
        group.push(obstacle(800.0, 40.0));

        // 840 units puts the trailing edge exactly on the left edge
        group.advance(840.0);
        assert_eq!(group.drop_offscreen(), 0);
        assert_eq!(group.len(), 1);

        group.advance(0.5);
        assert_eq!(group.drop_offscreen(), 1);
        assert!(group.is_empty());
    }

    #[test]
    fn test_group_drops_from_head_only() {
        let mut group = ObstacleGroup::new();
        group.push(obstacle(0.0, 10.0));
        group.push(obstacle(100.0, 10.0));
        group.push(obstacle(300.0, 10.0));

        group.advance(50.0);
        assert_eq!(group.drop_offscreen(), 1);
        let xs: Vec<f64> = group.iter().map(|o| o.x).collect();
        assert_eq!(xs, vec![50.0, 250.0]);
    }

    #[test]
    fn test_species_flying() {
        assert!(Species::Crow.is_flying());
        assert!(Species::Hawk.is_flying());
        assert!(!Species::TallCactus.is_flying());
        assert!(!Species::CactusCluster.is_flying());
        assert!(!Species::ShortCactus.is_flying());
    }

    #[test]
    fn test_first_spawn_after_armed_distance() {
        let mut spawner = cacti();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        // 299 units of travel: not yet
        spawner.update(1.0, 598.0, &mut rng);
        assert!(spawner.group().is_empty());

        spawner.update(1.0, 2.0, &mut rng);
        assert_eq!(spawner.group().len(), 1);
        let o = spawner.group().last().unwrap();
        assert_eq!(o.x, GAME_WIDTH);
        assert!(!o.species.is_flying());
        // Cacti stand on the baseline
        assert!((o.y + o.height - GAME_HEIGHT).abs() < 1e-9);
    }

    #[test]
    fn test_spawn_rearms_with_width_plus_gap() {
        let mut spawner = cacti();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        spawner.update(1.0, 600.0, &mut rng);

        let width = spawner.group().last().unwrap().width;
        let (gap_min, gap_max) = spawner.gap_range();
        let countdown = spawner.distance_until_spawn();
        assert!(countdown >= width + gap_min);
        assert!(countdown <= width + gap_max);
    }

    #[test]
    fn test_successive_spawns_respect_gap() {
        let mut spawner = cacti();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..2000 {
            spawner.update(1.0, 16.0, &mut rng);
            let xs: Vec<(f64, f64)> = spawner.group().iter().map(|o| (o.x, o.width)).collect();
            for pair in xs.windows(2) {
                let (prev_x, prev_w) = pair[0];
                let (next_x, _) = pair[1];
                assert!(next_x - (prev_x + prev_w) >= CACTUS_GAP_MIN - 1e-6);
            }
        }
        assert!(spawner.spawned() > 5);
    }

    #[test]
    fn test_birds_fly_at_configured_altitudes() {
        let mut spawner = birds();
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..20_000 {
            spawner.update(1.0, 16.0, &mut rng);
            for o in spawner.group().iter() {
                assert!(o.species.is_flying());
                let altitude = GAME_HEIGHT - (o.y + o.height);
                assert!(
                    (altitude - BIRD_LOW_ALTITUDE).abs() < 1e-9
                        || (altitude - BIRD_HEAD_ALTITUDE).abs() < 1e-9,
                    "unexpected altitude {}",
                    altitude
                );
            }
        }
        assert!(spawner.spawned() >= 5);
    }

    #[test]
    fn test_spawned_sizes_come_from_scaled_catalog() {
        let scale = ScaleRatio::new(0.5).unwrap();
        let mut spawner = ObstacleSpawner::new(
            SpawnerKind::Ground,
            &SpawnerConfig::cacti(),
            GROUND_AND_OBSTACLE_SPEED,
            scale,
            GAME_WIDTH * 0.5,
            GAME_HEIGHT * 0.5,
        );
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let expected: Vec<(f64, f64)> = [TALL_CACTUS_SIZE, CACTUS_CLUSTER_SIZE, SHORT_CACTUS_SIZE]
            .iter()
            .map(|&(w, h)| (w * 0.5, h * 0.5))
            .collect();
        for _ in 0..5000 {
            spawner.update(1.0, 16.0, &mut rng);
            for o in spawner.group().iter() {
                assert!(o.width > 0.0 && o.height > 0.0);
                assert!(expected
                    .iter()
                    .any(|&(w, h)| (w - o.width).abs() < 1e-9 && (h - o.height).abs() < 1e-9));
            }
        }
        assert!(spawner.spawned() > 0);
    }

    #[test]
    fn test_reset_clears_and_rearms() {
        let mut spawner = cacti();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        while spawner.group().is_empty() {
            spawner.update(1.0, 16.0, &mut rng);
        }

        spawner.reset();
        assert!(spawner.group().is_empty());
        assert_eq!(spawner.distance_until_spawn(), CACTUS_FIRST_SPAWN);
    }

    #[test]
    fn test_invalid_delta_freezes_spawner() {
        let mut spawner = cacti();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        spawner.update(1.0, f64::NAN, &mut rng);
        spawner.update(1.0, -1000.0, &mut rng);
        assert_eq!(spawner.distance_until_spawn(), CACTUS_FIRST_SPAWN);
        assert!(spawner.group().is_empty());
    }

    #[test]
    fn test_collision_against_group() {
        let mut spawner = cacti();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        spawner.update(1.0, 600.0, &mut rng);
        let o = *spawner.group().last().unwrap();

        let overlapping = obstacle(o.x + 1.0, 40.0);
        let overlapping = Obstacle {
            y: o.y + 1.0,
            ..overlapping
        };
        assert!(spawner.collides_with(&overlapping, 0.0));

        let far = obstacle(-500.0, 10.0);
        assert!(!spawner.collides_with(&far, 0.0));
    }

    #[test]
    fn test_bird_wings_flap() {
        let mut spawner = birds();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        spawner.update(1.0, 3200.0, &mut rng);
        assert_eq!(spawner.group().len(), 1);

        let frame_of = |s: &ObstacleSpawner| {
            let mut surface = RecordingSurface::new();
            s.draw(&mut surface);
            match surface.sprites()[0] {
                Sprite::Obstacle(_, frame) => frame,
                other => panic!("unexpected sprite {:?}", other),
            }
        };
        let first = frame_of(&spawner);
        spawner.update(1.0, FLAP_FRAME_MS, &mut rng);
        assert_ne!(frame_of(&spawner), first);
    }
}
