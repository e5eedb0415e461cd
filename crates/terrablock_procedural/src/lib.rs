//! # TERRABLOCK Procedural Generation
//!
//! Deterministic world generation for a single voxel chunk.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same seed and parameters always produce the same chunk
//! 2. **Non-incremental**: A parameter change clears and regenerates the whole chunk
//! 3. **Data only**: No rendering objects; meshers read through `Chunk` and `Visibility`
//!
//! ## Core Components
//!
//! - `SeedGenerator`: LCG scalar stream from an integer seed
//! - `NoiseField`: 2D/3D simplex noise seeded from a `SeedGenerator`
//! - `BlockRegistry`: Block kinds and their physical metadata
//! - `ChunkStore`: Bounded dense block storage
//! - `TerrainGenerator`: Height-field pass followed by ore placement
//! - `Visibility`: Exposure test used to cull invisible blocks
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use terrablock_procedural::{BlockRegistry, Chunk, ChunkCoord, ChunkSize, GenerationParams};
//!
//! let size = ChunkSize::new(16, 16).unwrap();
//! let mut chunk = Chunk::new(
//!     size,
//!     ChunkCoord::new(0, 0),
//!     GenerationParams::default(),
//!     Arc::new(BlockRegistry::standard()),
//! );
//! chunk.generate();
//!
//! assert!(chunk.get_block(0, 0, 0).is_some());
//! assert!(chunk.get_block(-1, 0, 0).is_none());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod block;
pub mod chunk;
pub mod error;
pub mod noise;
pub mod params;
pub mod seed;
pub mod snapshot;
pub mod storage;
pub mod terrain;
pub mod visibility;

pub use block::{Block, BlockRegistry, BlockType};
pub use chunk::{Chunk, ChunkCoord, ChunkSize};
pub use error::{WorldError, WorldResult};
pub use noise::NoiseField;
pub use params::{GenerationParams, TerrainParams};
pub use seed::SeedGenerator;
pub use snapshot::{SnapshotHeader, SNAPSHOT_MAGIC, SNAPSHOT_VERSION};
pub use storage::ChunkStore;
pub use terrain::{GenerationStats, TerrainGenerator};
pub use visibility::{BlockFace, Visibility};
