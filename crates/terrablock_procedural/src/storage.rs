//! # Chunk Storage
//!
//! Dense, bounded block storage for a single chunk. Every cell is either
//! unset or holds a `Block`. Coordinates are local to the chunk.
//!
//! ## Memory Layout
//!
//! Cells are stored in a flat vector, indexed `x + w * (z + w * y)`, so a
//! horizontal layer is contiguous. A 64x32x64 chunk is 131072 cells.

use crate::block::{Block, BlockType};
use crate::chunk::ChunkSize;
use crate::error::{WorldError, WorldResult};

/// Bounded dense block storage.
#[derive(Clone, Debug, PartialEq)]
pub struct ChunkStore {
    width: u32,
    height: u32,
    cells: Vec<Option<Block>>,
}

impl ChunkStore {
    /// Creates an empty store. All cells start unset.
    #[must_use]
    pub fn new(size: ChunkSize) -> Self {
        Self {
            width: size.width,
            height: size.height,
            cells: vec![None; size.volume()],
        }
    }

    /// Chunk width (and depth).
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Chunk height.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Size of this store.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> ChunkSize {
        ChunkSize {
            width: self.width,
            height: self.height,
        }
    }

    /// Returns true if `(x, y, z)` lies inside the chunk.
    #[inline]
    #[must_use]
    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        self.index(x, y, z).is_some()
    }

    #[inline]
    fn index(&self, x: i32, y: i32, z: i32) -> Option<usize> {
        let x = u32::try_from(x).ok()?;
        let y = u32::try_from(y).ok()?;
        let z = u32::try_from(z).ok()?;
        if x >= self.width || y >= self.height || z >= self.width {
            return None;
        }
        let w = self.width as usize;
        Some(x as usize + w * (z as usize + w * y as usize))
    }

    /// Gets the block at a coordinate.
    ///
    /// Returns `None` for unset cells and for coordinates outside the chunk.
    #[inline]
    #[must_use]
    pub fn get(&self, x: i32, y: i32, z: i32) -> Option<Block> {
        self.index(x, y, z).and_then(|i| self.cells[i])
    }

    /// Stores a block at a coordinate, overwriting any previous value.
    ///
    /// # Errors
    ///
    /// Returns `WorldError::OutOfBounds` if the coordinate lies outside the
    /// chunk. The store is left untouched in that case.
    pub fn set(&mut self, x: i32, y: i32, z: i32, block: Block) -> WorldResult<()> {
        let Some(i) = self.index(x, y, z) else {
            return Err(WorldError::OutOfBounds {
                x,
                y,
                z,
                width: self.width,
                height: self.height,
            });
        };
        self.cells[i] = Some(block);
        Ok(())
    }

    /// Returns true if the cell is set.
    #[inline]
    #[must_use]
    pub fn has(&self, x: i32, y: i32, z: i32) -> bool {
        self.get(x, y, z).is_some()
    }

    /// Unsets a cell. Returns true if a value was removed.
    pub fn delete(&mut self, x: i32, y: i32, z: i32) -> bool {
        match self.index(x, y, z) {
            Some(i) => self.cells[i].take().is_some(),
            None => false,
        }
    }

    /// Unsets every cell.
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Returns true if the cell holds a solid block.
    #[inline]
    #[must_use]
    pub fn is_solid(&self, x: i32, y: i32, z: i32) -> bool {
        self.get(x, y, z).is_some_and(|b| b.is_solid)
    }

    /// Counts the cells holding a given kind.
    #[must_use]
    pub fn count_of(&self, block_type: BlockType) -> usize {
        self.cells
            .iter()
            .filter(|c| c.is_some_and(|b| b.block_type == block_type))
            .count()
    }

    /// Iterates over set cells as `([x, y, z], block)`.
    pub fn iter(&self) -> impl Iterator<Item = ([i32; 3], Block)> + '_ {
        let w = self.width as usize;
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            let block = (*cell)?;
            let x = i % w;
            let z = (i / w) % w;
            let y = i / (w * w);
            // Dimensions are u32, so every component fits in i32 for sane sizes.
            Some(([x as i32, y as i32, z as i32], block))
        })
    }

    /// Raw cells, in storage order.
    pub(crate) fn cells(&self) -> &[Option<Block>] {
        &self.cells
    }

    /// Mutable raw cells, in storage order.
    pub(crate) fn cells_mut(&mut self) -> &mut [Option<Block>] {
        &mut self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockRegistry;

    fn store(width: u32, height: u32) -> ChunkStore {
        ChunkStore::new(ChunkSize { width, height })
    }

    #[test]
    fn test_new_store_is_empty() {
        let s = store(4, 4);
        assert!(s.iter().next().is_none());
        assert!(!s.has(0, 0, 0));
        assert_eq!(s.get(3, 3, 3), None);
    }

    #[test]
    fn test_set_then_get() {
        let registry = BlockRegistry::standard();
        let mut s = store(4, 4);
        let stone = registry.block(BlockType::Stone);
        s.set(1, 2, 3, stone).unwrap();
        assert_eq!(s.get(1, 2, 3), Some(stone));
        assert!(s.has(1, 2, 3));
        assert!(s.is_solid(1, 2, 3));
    }

    #[test]
    fn test_out_of_bounds_reads_are_none() {
        let s = store(4, 4);
        for (x, y, z) in [(-1, 0, 0), (0, -1, 0), (0, 0, -1), (4, 0, 0), (0, 4, 0), (0, 0, 4)] {
            assert_eq!(s.get(x, y, z), None, "({x}, {y}, {z}) should read as none");
            assert!(!s.has(x, y, z));
        }
    }

    #[test]
    fn test_out_of_bounds_write_is_rejected() {
        let mut s = store(4, 4);
        let before = s.clone();
        let err = s.set(4, 0, 0, Block::AIR).unwrap_err();
        assert!(matches!(err, WorldError::OutOfBounds { x: 4, .. }));
        assert_eq!(s, before, "Rejected write must not mutate the store");
    }

    #[test]
    fn test_delete_reports_removal() {
        let mut s = store(2, 2);
        s.set(0, 0, 0, Block::AIR).unwrap();
        assert!(s.delete(0, 0, 0));
        assert!(!s.delete(0, 0, 0), "Second delete finds nothing");
        assert!(!s.delete(-5, 0, 0));
    }

    #[test]
    fn test_air_is_set_but_not_solid() {
        let mut s = store(2, 2);
        s.set(1, 1, 1, Block::AIR).unwrap();
        assert!(s.has(1, 1, 1));
        assert!(!s.is_solid(1, 1, 1));
    }

    #[test]
    fn test_iter_reports_coordinates() {
        let registry = BlockRegistry::standard();
        let mut s = store(3, 5);
        s.set(2, 4, 1, registry.block(BlockType::Dirt)).unwrap();
        let cells: Vec<_> = s.iter().collect();
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].0, [2, 4, 1]);
        assert_eq!(s.count_of(BlockType::Dirt), 1);
    }

    #[test]
    fn test_clear() {
        let mut s = store(2, 2);
        s.set(0, 1, 0, Block::AIR).unwrap();
        s.clear();
        assert!(s.iter().next().is_none());
    }
}
