//! # Block Visibility
//!
//! A block is exposed when at least one of its six neighbours is air, unset,
//! or outside the chunk. Chunk edges always count as open since neighbouring
//! chunks are not consulted.
//!
//! Everything here is a pure function of the store contents and is
//! recomputed on every call.

use std::collections::BTreeMap;

use crate::block::BlockType;
use crate::storage::ChunkStore;

/// One of the six axis-aligned faces of a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockFace {
    /// +X.
    East,
    /// -X.
    West,
    /// +Y.
    Top,
    /// -Y.
    Bottom,
    /// +Z.
    South,
    /// -Z.
    North,
}

impl BlockFace {
    /// All faces, in the order used by `Visibility::exposed_faces`.
    pub const ALL: [Self; 6] = [
        Self::East,
        Self::West,
        Self::Top,
        Self::Bottom,
        Self::South,
        Self::North,
    ];

    /// Offset to the neighbour across this face.
    #[inline]
    #[must_use]
    pub const fn offset(self) -> [i32; 3] {
        match self {
            Self::East => [1, 0, 0],
            Self::West => [-1, 0, 0],
            Self::Top => [0, 1, 0],
            Self::Bottom => [0, -1, 0],
            Self::South => [0, 0, 1],
            Self::North => [0, 0, -1],
        }
    }

    /// Position in `ALL`.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Exposure queries over a chunk store.
#[derive(Clone, Copy, Debug)]
pub struct Visibility<'a> {
    store: &'a ChunkStore,
}

impl<'a> Visibility<'a> {
    /// Wraps a store.
    #[must_use]
    pub const fn new(store: &'a ChunkStore) -> Self {
        Self { store }
    }

    /// True if the cell holds a non-air block.
    fn is_occupied(&self, x: i32, y: i32, z: i32) -> bool {
        self.store.get(x, y, z).is_some_and(|b| !b.is_air())
    }

    /// True if a neighbour cell lets a face show: air, unset or out of bounds.
    fn is_open(&self, x: i32, y: i32, z: i32) -> bool {
        !self.is_occupied(x, y, z)
    }

    /// Returns true if the block at the coordinate has at least one visible face.
    ///
    /// Air, unset and out-of-bounds coordinates are never exposed.
    #[must_use]
    pub fn is_exposed(&self, x: i32, y: i32, z: i32) -> bool {
        self.is_occupied(x, y, z) && self.exposed_faces(x, y, z).iter().any(|&open| open)
    }

    /// Per-face exposure, in `BlockFace::ALL` order.
    ///
    /// All false when the cell itself is empty.
    #[must_use]
    pub fn exposed_faces(&self, x: i32, y: i32, z: i32) -> [bool; 6] {
        let mut faces = [false; 6];
        if !self.is_occupied(x, y, z) {
            return faces;
        }
        for face in BlockFace::ALL {
            let [dx, dy, dz] = face.offset();
            faces[face.index()] = self.is_open(x + dx, y + dy, z + dz);
        }
        faces
    }

    /// Returns true if the given face of the block is visible.
    #[must_use]
    pub fn is_face_exposed(&self, x: i32, y: i32, z: i32, face: BlockFace) -> bool {
        self.exposed_faces(x, y, z)[face.index()]
    }

    /// Exposed block coordinates grouped by kind, one batch per kind.
    #[must_use]
    pub fn visible_blocks(&self) -> BTreeMap<BlockType, Vec<[i32; 3]>> {
        let mut batches: BTreeMap<BlockType, Vec<[i32; 3]>> = BTreeMap::new();
        for ([x, y, z], block) in self.store.iter() {
            if self.is_exposed(x, y, z) {
                batches.entry(block.block_type).or_default().push([x, y, z]);
            }
        }
        batches
    }

    /// Number of exposed blocks.
    #[must_use]
    pub fn count_exposed(&self) -> usize {
        self.store
            .iter()
            .filter(|([x, y, z], _)| self.is_exposed(*x, *y, *z))
            .count()
    }
}
