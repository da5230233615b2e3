//! Game objects owned by the simulation.

pub mod ground;
pub mod hitbox;
pub mod obstacles;
pub mod player;
pub mod score;

pub use ground::Ground;
pub use hitbox::{Collidable, Drawable, Entity, Hitbox};
pub use obstacles::{Obstacle, ObstacleGroup, ObstacleSpawner, SpawnerKind, Species};
pub use player::{JumpState, Player};
pub use score::ScoreTracker;
