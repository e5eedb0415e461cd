//! # Chunk System
//!
//! A chunk is a fixed `width x height x width` region owning one
//! `ChunkStore`, the parameters it was generated from, and its position on
//! the chunk grid.
//!
//! ## Lifecycle
//!
//! Constructed empty, filled by `generate()`, read continuously, and wholly
//! replaced (clear + generate) whenever its parameters change. There are no
//! incremental updates.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use terrablock_shared::{DEFAULT_CHUNK_HEIGHT, DEFAULT_CHUNK_WIDTH};

use crate::block::{Block, BlockRegistry, BlockType};
use crate::error::{WorldError, WorldResult};
use crate::params::GenerationParams;
use crate::storage::ChunkStore;
use crate::terrain::{GenerationStats, TerrainGenerator};
use crate::visibility::Visibility;

/// Chunk coordinate (identifies a chunk in the world grid).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkCoord {
    /// X coordinate (in chunks, not blocks).
    pub x: i32,
    /// Z coordinate (in chunks, not blocks).
    pub z: i32,
}

impl ChunkCoord {
    /// Creates a new chunk coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Converts world block coordinates to the owning chunk.
    #[inline]
    #[must_use]
    pub fn from_block_pos(block_x: i32, block_z: i32, width: u32) -> Self {
        let w = i32::try_from(width).unwrap_or(i32::MAX).max(1);
        Self {
            x: block_x.div_euclid(w),
            z: block_z.div_euclid(w),
        }
    }

    /// World block coordinates of the chunk's corner, as noise-domain values.
    #[inline]
    #[must_use]
    pub fn world_origin(self, width: u32) -> (f64, f64) {
        let w = f64::from(width);
        (f64::from(self.x) * w, f64::from(self.z) * w)
    }
}

/// Chunk dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkSize {
    /// Width and depth, in blocks.
    pub width: u32,
    /// Height, in blocks.
    pub height: u32,
}

impl ChunkSize {
    /// Largest accepted width or height. Keeps coordinates inside `i32`.
    pub const MAX_EXTENT: u32 = 4096;

    /// Creates a validated chunk size.
    ///
    /// # Errors
    ///
    /// Returns `WorldError::InvalidChunkSize` if either dimension is zero or
    /// larger than `MAX_EXTENT`.
    pub fn new(width: u32, height: u32) -> WorldResult<Self> {
        let size = Self { width, height };
        size.validate()?;
        Ok(size)
    }

    /// Checks that both dimensions are in range.
    ///
    /// # Errors
    ///
    /// Returns `WorldError::InvalidChunkSize` on a zero or oversized dimension.
    pub fn validate(&self) -> WorldResult<()> {
        let in_range = |v: u32| (1..=Self::MAX_EXTENT).contains(&v);
        if in_range(self.width) && in_range(self.height) {
            Ok(())
        } else {
            Err(WorldError::InvalidChunkSize {
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Number of cells.
    #[inline]
    #[must_use]
    pub const fn volume(&self) -> usize {
        self.width as usize * self.width as usize * self.height as usize
    }
}

impl Default for ChunkSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_CHUNK_WIDTH,
            height: DEFAULT_CHUNK_HEIGHT,
        }
    }
}

/// A chunk of world data.
#[derive(Clone, Debug)]
pub struct Chunk {
    origin: ChunkCoord,
    params: GenerationParams,
    store: ChunkStore,
    registry: Arc<BlockRegistry>,
}

impl Chunk {
    /// Creates a new empty chunk. Call `generate()` to fill it.
    #[must_use]
    pub fn new(
        size: ChunkSize,
        origin: ChunkCoord,
        params: GenerationParams,
        registry: Arc<BlockRegistry>,
    ) -> Self {
        Self {
            origin,
            params,
            store: ChunkStore::new(size),
            registry,
        }
    }

    /// Builds a chunk around existing storage.
    pub(crate) fn from_parts(
        store: ChunkStore,
        origin: ChunkCoord,
        params: GenerationParams,
        registry: Arc<BlockRegistry>,
    ) -> Self {
        Self {
            origin,
            params,
            store,
            registry,
        }
    }

    /// Chunk dimensions.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> ChunkSize {
        self.store.size()
    }

    /// Position on the chunk grid.
    #[inline]
    #[must_use]
    pub const fn origin(&self) -> ChunkCoord {
        self.origin
    }

    /// Current generation parameters.
    #[inline]
    #[must_use]
    pub const fn params(&self) -> &GenerationParams {
        &self.params
    }

    /// Registry blocks are drawn from.
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    /// Read access to the block data.
    #[inline]
    #[must_use]
    pub const fn store(&self) -> &ChunkStore {
        &self.store
    }

    /// Gets a block at local coordinates. `None` outside the chunk or when unset.
    #[inline]
    #[must_use]
    pub fn get_block(&self, x: i32, y: i32, z: i32) -> Option<Block> {
        self.store.get(x, y, z)
    }

    /// Places a block of the given kind.
    ///
    /// # Errors
    ///
    /// Returns `WorldError::OutOfBounds` if the coordinate is outside the chunk.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, block_type: BlockType) -> WorldResult<()> {
        let block = self.registry.block(block_type);
        self.store.set(x, y, z, block)
    }

    /// Returns true if a block is set at the coordinate.
    #[inline]
    #[must_use]
    pub fn has_block(&self, x: i32, y: i32, z: i32) -> bool {
        self.store.has(x, y, z)
    }

    /// Removes a block. Returns true if one was present.
    pub fn delete_block(&mut self, x: i32, y: i32, z: i32) -> bool {
        self.store.delete(x, y, z)
    }

    /// Returns true if the block at the coordinate has an exposed face.
    #[must_use]
    pub fn is_block_visible(&self, x: i32, y: i32, z: i32) -> bool {
        self.visibility().is_exposed(x, y, z)
    }

    /// Visibility queries over this chunk.
    #[must_use]
    pub fn visibility(&self) -> Visibility<'_> {
        Visibility::new(&self.store)
    }

    /// Fills the chunk from its current parameters.
    pub fn generate(&mut self) -> GenerationStats {
        TerrainGenerator::new(self.params, &self.registry).generate(&mut self.store, self.origin)
    }

    /// Resets every cell to empty.
    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Clears and regenerates with the current parameters.
    pub fn regenerate(&mut self) -> GenerationStats {
        self.clear();
        self.generate()
    }

    /// Replaces the parameters and regenerates the whole chunk.
    pub fn set_params(&mut self, params: GenerationParams) -> GenerationStats {
        self.params = params;
        self.regenerate()
    }

    /// Number of set cells per block kind.
    #[must_use]
    pub fn block_counts(&self) -> BTreeMap<BlockType, usize> {
        let mut counts = BTreeMap::new();
        for (_, block) in self.store.iter() {
            *counts.entry(block.block_type).or_insert(0) += 1;
        }
        counts
    }

    /// Y of the highest solid block in a column, if any.
    #[must_use]
    pub fn surface_height(&self, x: i32, z: i32) -> Option<i32> {
        let top = i32::try_from(self.store.height()).ok()?;
        (0..top).rev().find(|&y| self.store.is_solid(x, y, z))
    }
}
