//! # Blocks
//!
//! Block kinds are a closed enumeration. Physical metadata (solidity, ore
//! placement parameters) lives in a `BlockRegistry` table keyed by kind, not
//! in per-kind types.

use serde::{Deserialize, Serialize};

/// Block kinds in the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum BlockType {
    /// Empty space. The universal default.
    Air = 0,
    /// Soil below the surface layer.
    Dirt = 1,
    /// Single surface layer of every column.
    Grass = 2,
    /// Deep ground.
    Stone = 3,
    /// Common ore.
    CoalOre = 4,
    /// Rarer ore.
    IronOre = 5,
}

impl BlockType {
    /// Number of block kinds.
    pub const COUNT: usize = 6;

    /// Every kind, in id order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Air,
        Self::Dirt,
        Self::Grass,
        Self::Stone,
        Self::CoalOre,
        Self::IronOre,
    ];

    /// Returns the stable numeric id used in snapshots.
    #[inline]
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Converts from a numeric id.
    #[must_use]
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Self::Air),
            1 => Some(Self::Dirt),
            2 => Some(Self::Grass),
            3 => Some(Self::Stone),
            4 => Some(Self::CoalOre),
            5 => Some(Self::IronOre),
            _ => None,
        }
    }

    /// Returns true for kinds placed by the resource pass.
    #[inline]
    #[must_use]
    pub const fn is_ore(self) -> bool {
        matches!(self, Self::CoalOre | Self::IronOre)
    }
}

/// A block value: a kind plus the metadata the registry assigns to it.
///
/// Blocks have no identity; two blocks of the same kind from the same
/// registry compare equal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Block {
    /// Kind of this block.
    pub block_type: BlockType,
    /// Whether the block participates in collision.
    pub is_solid: bool,
    /// Per-axis factor applied to world coordinates before 3D noise sampling.
    pub scale: [f64; 3],
    /// Minimum noise value required to place this block.
    pub scarcity: f64,
}

impl Block {
    /// Air block (empty).
    pub const AIR: Self = Self::plain(BlockType::Air, false);

    /// Creates a block with neutral placement parameters.
    #[must_use]
    pub const fn plain(block_type: BlockType, is_solid: bool) -> Self {
        Self {
            block_type,
            is_solid,
            scale: [1.0, 1.0, 1.0],
            scarcity: 0.0,
        }
    }

    /// Creates an ore block.
    #[must_use]
    pub const fn ore(block_type: BlockType, scale: [f64; 3], scarcity: f64) -> Self {
        Self {
            block_type,
            is_solid: true,
            scale,
            scarcity,
        }
    }

    /// Returns true if this is an air block.
    #[inline]
    #[must_use]
    pub fn is_air(self) -> bool {
        self.block_type == BlockType::Air
    }
}

impl Default for Block {
    fn default() -> Self {
        Self::AIR
    }
}

/// Read-only catalog of block kinds.
///
/// Constructed explicitly and passed to whatever needs it; there is no
/// global instance.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockRegistry {
    /// One entry per kind, indexed by `BlockType::id`.
    blocks: [Block; BlockType::COUNT],
    /// Ore kinds in placement order. Later entries overwrite earlier ones.
    ore_order: Vec<BlockType>,
}

impl BlockRegistry {
    /// Coal: low frequency, admits the top of the noise range.
    pub const COAL: Block = Block::ore(BlockType::CoalOre, [0.1, 0.1, 0.1], 0.65);
    /// Iron: tighter veins, higher threshold.
    pub const IRON: Block = Block::ore(BlockType::IronOre, [0.15, 0.15, 0.15], 0.8);

    /// Creates the standard block table.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            blocks: [
                Block::AIR,
                Block::plain(BlockType::Dirt, true),
                Block::plain(BlockType::Grass, true),
                Block::plain(BlockType::Stone, true),
                Self::COAL,
                Self::IRON,
            ],
            ore_order: vec![BlockType::CoalOre, BlockType::IronOre],
        }
    }

    /// Returns the block value for a kind.
    #[inline]
    #[must_use]
    pub fn block(&self, block_type: BlockType) -> Block {
        self.blocks[usize::from(block_type.id())]
    }

    /// Returns true if blocks of this kind are solid.
    #[inline]
    #[must_use]
    pub fn is_solid(&self, block_type: BlockType) -> bool {
        self.block(block_type).is_solid
    }

    /// Ore kinds in placement priority order (last wins).
    #[must_use]
    pub fn ores(&self) -> &[BlockType] {
        &self.ore_order
    }

    /// Returns a copy of this registry with different placement parameters
    /// for one ore kind.
    ///
    /// Non-ore kinds are returned unchanged; they are never placed by noise.
    #[must_use]
    pub fn with_ore_params(mut self, block_type: BlockType, scale: [f64; 3], scarcity: f64) -> Self {
        if block_type.is_ore() {
            self.blocks[usize::from(block_type.id())] = Block::ore(block_type, scale, scarcity);
        }
        self
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
