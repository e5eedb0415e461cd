//! # Player Controller
//!
//! Kinematic player body driven by the collision system.
//!
//! ```text
//! Falling --(ground contact while moving down)--> Grounded
//! Grounded --(jump, or nothing underfoot)--> Falling
//! any --(toggle)--> Flying --(toggle)--> Falling
//! ```
//!
//! Flying suspends gravity and ground detection. Collisions still apply.

use terrablock_procedural::ChunkStore;
use terrablock_shared::Vec3;
use tracing::debug;

use crate::config::PhysicsConfig;
use crate::physics::{CollisionResult, CollisionSystem};

/// Movement state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MovementMode {
    /// In the air, under gravity.
    #[default]
    Falling,
    /// Standing on a solid block.
    Grounded,
    /// Free vertical movement, no gravity.
    Flying,
}

/// Input for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MovementInput {
    /// Horizontal wish direction in world space. Y is ignored; normalized internally.
    pub direction: Vec3,
    /// Move up while flying.
    pub ascend: bool,
    /// Move down while flying.
    pub descend: bool,
}

impl MovementInput {
    /// No input.
    pub const IDLE: Self = Self {
        direction: Vec3::ZERO,
        ascend: false,
        descend: false,
    };

    /// Horizontal movement only.
    #[must_use]
    pub const fn walk(direction: Vec3) -> Self {
        Self {
            direction,
            ascend: false,
            descend: false,
        }
    }
}

/// Player body with movement state.
#[derive(Clone, Debug)]
pub struct PlayerController {
    /// Feet position.
    pub position: Vec3,
    /// Velocity in blocks per second.
    pub velocity: Vec3,
    mode: MovementMode,
    config: PhysicsConfig,
    collision: CollisionSystem,
}

impl PlayerController {
    /// Creates a falling player at `position`.
    #[must_use]
    pub fn new(position: Vec3, config: PhysicsConfig) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            mode: MovementMode::Falling,
            config,
            collision: CollisionSystem::new(),
        }
    }

    /// Replaces the collision system.
    #[must_use]
    pub fn with_collision(mut self, collision: CollisionSystem) -> Self {
        self.collision = collision;
        self
    }

    /// Current movement state.
    #[must_use]
    pub const fn mode(&self) -> MovementMode {
        self.mode
    }

    /// Physics settings.
    #[must_use]
    pub const fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Returns true when standing on the ground.
    #[must_use]
    pub fn is_grounded(&self) -> bool {
        self.mode == MovementMode::Grounded
    }

    /// Starts a jump. Only possible from the ground.
    pub fn jump(&mut self) -> bool {
        if self.mode != MovementMode::Grounded {
            return false;
        }
        self.velocity.y = self.config.jump_velocity;
        self.mode = MovementMode::Falling;
        true
    }

    /// Switches flying on or off. Vertical velocity is cleared either way.
    pub fn toggle_flying(&mut self) {
        self.mode = if self.mode == MovementMode::Flying {
            MovementMode::Falling
        } else {
            MovementMode::Flying
        };
        self.velocity.y = 0.0;
        debug!("Movement mode -> {:?}", self.mode);
    }

    /// Teleports the player and resets velocity.
    pub fn respawn(&mut self, position: Vec3) {
        self.position = position;
        self.velocity = Vec3::ZERO;
        if self.mode != MovementMode::Flying {
            self.mode = MovementMode::Falling;
        }
    }

    /// Advances the body by `dt` seconds against the blocks in `store`.
    pub fn step(&mut self, input: &MovementInput, dt: f32, store: &ChunkStore) -> CollisionResult {
        let wish = Vec3::new(input.direction.x, 0.0, input.direction.z).normalize_or_zero()
            * self.config.walk_speed;
        self.velocity.x = wish.x;
        self.velocity.z = wish.z;

        if self.mode == MovementMode::Flying {
            self.velocity.y = match (input.ascend, input.descend) {
                (true, false) => self.config.fly_speed,
                (false, true) => -self.config.fly_speed,
                _ => 0.0,
            };
        } else {
            self.velocity.y -= self.config.weight() * dt;
            self.velocity.y = self.velocity.y.max(-self.config.terminal_velocity);
        }

        let intended = self.position + self.velocity * dt;
        let result = self
            .collision
            .resolve(intended, self.velocity, self.config.body(), store);

        self.position = result.position;
        self.velocity = result.velocity;
        if self.mode != MovementMode::Flying {
            self.mode = if result.is_on_ground {
                MovementMode::Grounded
            } else {
                MovementMode::Falling
            };
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use terrablock_procedural::{Block, BlockRegistry, BlockType, ChunkSize};

    const DT: f32 = 1.0 / 60.0;

    fn floor_store() -> ChunkStore {
        let registry = BlockRegistry::standard();
        let mut store = ChunkStore::new(ChunkSize::new(8, 8).unwrap());
        for x in 0..8 {
            for z in 0..8 {
                store.set(x, 0, z, registry.block(BlockType::Stone)).unwrap();
                for y in 1..8 {
                    store.set(x, y, z, Block::AIR).unwrap();
                }
            }
        }
        store
    }

    fn settle(player: &mut PlayerController, store: &ChunkStore) {
        for _ in 0..120 {
            player.step(&MovementInput::IDLE, DT, store);
        }
    }

    #[test]
    fn test_falls_and_lands() {
        let store = floor_store();
        let mut player = PlayerController::new(Vec3::new(4.0, 5.0, 4.0), PhysicsConfig::default());
        assert_eq!(player.mode(), MovementMode::Falling);
        settle(&mut player, &store);
        assert!(player.is_grounded());
        assert!((player.position.y - 1.0).abs() < 0.01, "feet at {}", player.position.y);
    }

    #[test]
    fn test_jump_only_from_ground() {
        let store = floor_store();
        let mut player = PlayerController::new(Vec3::new(4.0, 5.0, 4.0), PhysicsConfig::default());
        assert!(!player.jump(), "Cannot jump while falling");

        settle(&mut player, &store);
        assert!(player.jump());
        assert_eq!(player.mode(), MovementMode::Falling);
        assert_eq!(player.velocity.y, 8.0);

        player.step(&MovementInput::IDLE, DT, &store);
        assert!(player.position.y > 1.0, "Moved up after jumping");
        assert_eq!(player.mode(), MovementMode::Falling);
    }

    #[test]
    fn test_flying_ignores_gravity() {
        let store = floor_store();
        let mut player = PlayerController::new(Vec3::new(4.0, 4.0, 4.0), PhysicsConfig::default());
        player.toggle_flying();
        assert_eq!(player.mode(), MovementMode::Flying);

        for _ in 0..30 {
            player.step(&MovementInput::IDLE, DT, &store);
        }
        assert!((player.position.y - 4.0).abs() < 1e-5, "Hovering at {}", player.position.y);

        let up = MovementInput {
            ascend: true,
            ..MovementInput::IDLE
        };
        player.step(&up, DT, &store);
        assert!(player.position.y > 4.0);
        assert_eq!(player.mode(), MovementMode::Flying);
    }

    #[test]
    fn test_flying_still_collides() {
        let store = floor_store();
        let mut player = PlayerController::new(Vec3::new(4.0, 1.1, 4.0), PhysicsConfig::default());
        player.toggle_flying();
        let down = MovementInput {
            descend: true,
            ..MovementInput::IDLE
        };
        for _ in 0..30 {
            player.step(&down, DT, &store);
        }
        assert!(player.position.y > 0.99, "Stopped by the floor at {}", player.position.y);
        assert_eq!(player.mode(), MovementMode::Flying, "No grounding while flying");
    }

    #[test]
    fn test_toggle_flying_clears_vertical_velocity() {
        let mut player = PlayerController::new(Vec3::ZERO, PhysicsConfig::default());
        player.velocity.y = -12.0;
        player.toggle_flying();
        assert_eq!(player.velocity.y, 0.0);
        player.toggle_flying();
        assert_eq!(player.mode(), MovementMode::Falling);
    }

    #[test]
    fn test_walk_speed() {
        let store = floor_store();
        let mut player = PlayerController::new(Vec3::new(2.0, 1.5, 2.0), PhysicsConfig::default());
        settle(&mut player, &store);
        let start = player.position;
        player.step(&MovementInput::walk(Vec3::new(3.0, 0.0, 0.0)), DT, &store);
        let moved = player.position.x - start.x;
        assert!((moved - 5.0 * DT).abs() < 1e-4, "moved {moved}");
        assert!(player.is_grounded());
    }

    #[test]
    fn test_respawn_resets_body() {
        let store = floor_store();
        let mut player = PlayerController::new(Vec3::new(4.0, 5.0, 4.0), PhysicsConfig::default());
        settle(&mut player, &store);
        player.respawn(Vec3::new(3.0, 6.0, 3.0));
        assert_eq!(player.velocity, Vec3::ZERO);
        assert_eq!(player.mode(), MovementMode::Falling);
    }
}
