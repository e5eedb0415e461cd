//! # TERRABLOCK
//!
//! Voxel world core: one procedurally generated chunk and a player that
//! walks, jumps and flies through it with AABB collision.
//!
//! ## Crates
//!
//! - `terrablock_shared`: `Vec3` and default constants
//! - `terrablock_procedural`: seeded noise, block storage, terrain, visibility, snapshots
//! - `terrablock` (this crate): collision, player controller, world config
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use terrablock::{
//!     BlockRegistry, Chunk, ChunkCoord, MovementInput, PlayerController, Vec3, WorldConfig,
//! };
//!
//! let config = WorldConfig::default();
//! let mut chunk = Chunk::new(
//!     config.chunk,
//!     ChunkCoord::new(0, 0),
//!     config.generation,
//!     Arc::new(BlockRegistry::standard()),
//! );
//! chunk.generate();
//!
//! let mut player = PlayerController::new(Vec3::new(32.0, 20.0, 32.0), config.physics);
//! for _ in 0..240 {
//!     player.step(&MovementInput::IDLE, 1.0 / 60.0, chunk.store());
//! }
//! assert!(player.is_grounded());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod physics;
pub mod player;

pub use config::{ConfigError, PhysicsConfig, WorldConfig};
pub use physics::{Aabb, BodyShape, CollisionCandidate, CollisionResult, CollisionSystem};
pub use player::{MovementInput, MovementMode, PlayerController};

pub use terrablock_procedural::{
    Block, BlockFace, BlockRegistry, BlockType, Chunk, ChunkCoord, ChunkSize, ChunkStore,
    GenerationParams, GenerationStats, NoiseField, SeedGenerator, TerrainGenerator,
    TerrainParams, Visibility, WorldError, WorldResult,
};
pub use terrablock_shared::Vec3;
