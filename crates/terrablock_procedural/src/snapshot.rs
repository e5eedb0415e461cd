//! # Chunk Snapshots
//!
//! Binary persistence for a chunk: enough to reproduce it from its
//! parameters, or to restore an edited chunk exactly.
//!
//! ## Format
//!
//! ```text
//! [SnapshotHeader: 56 bytes, native-endian POD]
//! [LZ4 block, size-prepended: one byte per cell in storage order]
//! ```
//!
//! Cell bytes are `BlockType::id`, or `0xFF` for an unset cell. Blocks are
//! rebuilt through a `BlockRegistry` on load, so ore parameters are not
//! stored.

use std::path::Path;
use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use lz4_flex::block::decompress_into;
use lz4_flex::compress_prepend_size;
use tracing::{info, warn};

use crate::block::{BlockRegistry, BlockType};
use crate::chunk::{Chunk, ChunkCoord, ChunkSize};
use crate::error::{WorldError, WorldResult};
use crate::params::{GenerationParams, TerrainParams};
use crate::storage::ChunkStore;

/// Magic bytes at the start of every snapshot.
pub const SNAPSHOT_MAGIC: [u8; 4] = *b"TBCK";

/// Current format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Cell byte for an unset cell.
const UNSET: u8 = 0xFF;

/// Fixed-size snapshot header.
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct SnapshotHeader {
    /// Must equal `SNAPSHOT_MAGIC`.
    pub magic: [u8; 4],
    /// Format version.
    pub version: u32,
    /// Chunk width/depth.
    pub width: u32,
    /// Chunk height.
    pub height: u32,
    /// Grid X of the chunk.
    pub origin_x: i32,
    /// Grid Z of the chunk.
    pub origin_z: i32,
    /// Generation seed.
    pub seed: u32,
    /// Padding to align the float fields.
    pub reserved: u32,
    /// Terrain noise scale.
    pub scale: f64,
    /// Terrain amplitude.
    pub amplitude: f64,
    /// Terrain offset.
    pub offset: f64,
}

impl SnapshotHeader {
    /// Serialized header length.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    fn for_chunk(chunk: &Chunk) -> Self {
        let size = chunk.size();
        let params = chunk.params();
        Self {
            magic: SNAPSHOT_MAGIC,
            version: SNAPSHOT_VERSION,
            width: size.width,
            height: size.height,
            origin_x: chunk.origin().x,
            origin_z: chunk.origin().z,
            seed: params.seed,
            reserved: 0,
            scale: params.terrain.scale,
            amplitude: params.terrain.amplitude,
            offset: params.terrain.offset,
        }
    }

    fn params(&self) -> GenerationParams {
        GenerationParams::new(
            self.seed,
            TerrainParams {
                scale: self.scale,
                amplitude: self.amplitude,
                offset: self.offset,
            },
        )
    }
}

impl Chunk {
    /// Serializes the chunk into snapshot bytes.
    #[must_use]
    pub fn to_snapshot_bytes(&self) -> Vec<u8> {
        let header = SnapshotHeader::for_chunk(self);
        let cells: Vec<u8> = self
            .store()
            .cells()
            .iter()
            .map(|cell| cell.map_or(UNSET, |b| b.block_type.id()))
            .collect();
        let body = compress_prepend_size(&cells);

        let mut out = Vec::with_capacity(SnapshotHeader::SIZE + body.len());
        out.extend_from_slice(bytemuck::bytes_of(&header));
        out.extend_from_slice(&body);
        out
    }

    /// Restores a chunk from snapshot bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are truncated, carry the wrong magic or
    /// version, fail to decompress, or hold an unknown block id.
    pub fn from_snapshot_bytes(bytes: &[u8], registry: Arc<BlockRegistry>) -> WorldResult<Self> {
        let Some(header_bytes) = bytes.get(..SnapshotHeader::SIZE) else {
            return Err(WorldError::CorruptSnapshot(format!(
                "{} bytes is shorter than the header",
                bytes.len()
            )));
        };
        let header: SnapshotHeader = bytemuck::pod_read_unaligned(header_bytes);

        if header.magic != SNAPSHOT_MAGIC {
            return Err(WorldError::CorruptSnapshot("bad magic".to_string()));
        }
        if header.version != SNAPSHOT_VERSION {
            return Err(WorldError::UnsupportedSnapshotVersion(header.version));
        }
        let size = ChunkSize::new(header.width, header.height)?;

        let cells = decompress_cells(&bytes[SnapshotHeader::SIZE..], size.volume())?;

        let mut store = ChunkStore::new(size);
        for (slot, &id) in store.cells_mut().iter_mut().zip(&cells) {
            *slot = match id {
                UNSET => None,
                _ => {
                    let kind = BlockType::from_id(id).ok_or_else(|| {
                        WorldError::CorruptSnapshot(format!("unknown block id {id}"))
                    })?;
                    Some(registry.block(kind))
                }
            };
        }

        Ok(Self::from_parts(
            store,
            ChunkCoord::new(header.origin_x, header.origin_z),
            header.params(),
            registry,
        ))
    }

    /// Saves the chunk to a snapshot file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be written.
    pub fn save_compressed(&self, path: &Path) -> WorldResult<()> {
        let bytes = self.to_snapshot_bytes();
        std::fs::write(path, &bytes)?;
        info!(
            "Saved chunk [{},{}] to {} ({} bytes)",
            self.origin().x,
            self.origin().z,
            path.display(),
            bytes.len()
        );
        Ok(())
    }

    /// Loads a chunk from a snapshot file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or its contents are rejected.
    pub fn load_compressed(path: &Path, registry: Arc<BlockRegistry>) -> WorldResult<Self> {
        let bytes = std::fs::read(path)?;
        match Self::from_snapshot_bytes(&bytes, registry) {
            Ok(chunk) => {
                info!(
                    "Loaded chunk [{},{}] from {}",
                    chunk.origin().x,
                    chunk.origin().z,
                    path.display()
                );
                Ok(chunk)
            }
            Err(e) => {
                warn!("Rejected snapshot {}: {}", path.display(), e);
                Err(e)
            }
        }
    }
}

/// Decompresses a size-prepended body into exactly `volume` cells.
///
/// The stored length is checked before anything is allocated.
fn decompress_cells(body: &[u8], volume: usize) -> WorldResult<Vec<u8>> {
    let Some(prefix) = body.get(..4).and_then(|p| <[u8; 4]>::try_from(p).ok()) else {
        return Err(WorldError::CorruptSnapshot(
            "body is shorter than its size prefix".to_string(),
        ));
    };
    let block = &body[4..];
    let stored = u32::from_le_bytes(prefix) as usize;
    if stored != volume {
        return Err(WorldError::SnapshotSizeMismatch {
            expected: volume,
            actual: stored,
        });
    }

    let mut cells = vec![0u8; volume];
    let written = decompress_into(block, &mut cells)
        .map_err(|e| WorldError::CorruptSnapshot(e.to_string()))?;
    if written != volume {
        return Err(WorldError::SnapshotSizeMismatch {
            expected: volume,
            actual: written,
        });
    }
    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generated() -> Chunk {
        let mut chunk = Chunk::new(
            ChunkSize::new(8, 16).unwrap(),
            ChunkCoord::new(3, -2),
            GenerationParams::default(),
            Arc::new(BlockRegistry::standard()),
        );
        chunk.generate();
        chunk
    }

    #[test]
    fn test_header_has_no_padding() {
        assert_eq!(SnapshotHeader::SIZE, 56);
    }

    #[test]
    fn test_bytes_restore_edited_chunk() {
        let mut chunk = generated();
        chunk.set_block(0, 15, 0, BlockType::IronOre).unwrap();
        chunk.delete_block(1, 0, 1);

        let restored =
            Chunk::from_snapshot_bytes(&chunk.to_snapshot_bytes(), Arc::new(BlockRegistry::standard()))
                .unwrap();

        assert_eq!(restored.store(), chunk.store());
        assert_eq!(restored.origin(), chunk.origin());
        assert_eq!(restored.params(), chunk.params());
    }

    #[test]
    fn test_truncated_bytes_rejected() {
        let bytes = generated().to_snapshot_bytes();
        let err = Chunk::from_snapshot_bytes(&bytes[..10], Arc::new(BlockRegistry::standard()));
        assert!(matches!(err, Err(WorldError::CorruptSnapshot(_))));
    }

    #[test]
    fn test_wrong_version_rejected() {
        let mut bytes = generated().to_snapshot_bytes();
        bytes[4..8].copy_from_slice(&99u32.to_ne_bytes());
        let err = Chunk::from_snapshot_bytes(&bytes, Arc::new(BlockRegistry::standard()));
        assert!(matches!(err, Err(WorldError::UnsupportedSnapshotVersion(99))));
    }

    #[test]
    fn test_oversized_length_prefix_rejected_before_decoding() {
        let mut bytes = generated().to_snapshot_bytes();
        let prefix = SnapshotHeader::SIZE..SnapshotHeader::SIZE + 4;
        bytes[prefix].copy_from_slice(&u32::MAX.to_le_bytes());

        let err = Chunk::from_snapshot_bytes(&bytes, Arc::new(BlockRegistry::standard()));
        assert!(
            matches!(
                err,
                Err(WorldError::SnapshotSizeMismatch {
                    expected: 1024,
                    actual,
                }) if actual == u32::MAX as usize
            ),
            "Claimed length must be checked against the chunk volume"
        );
    }

    #[test]
    fn test_short_body_rejected() {
        let mut bytes = generated().to_snapshot_bytes();
        bytes.truncate(SnapshotHeader::SIZE + 2);
        let err = Chunk::from_snapshot_bytes(&bytes, Arc::new(BlockRegistry::standard()));
        assert!(matches!(err, Err(WorldError::CorruptSnapshot(_))));
    }

    #[test]
    fn test_bad_magic_rejected() {
        let mut bytes = generated().to_snapshot_bytes();
        bytes[0] = b'X';
        let err = Chunk::from_snapshot_bytes(&bytes, Arc::new(BlockRegistry::standard()));
        assert!(matches!(err, Err(WorldError::CorruptSnapshot(_))));
    }
}
