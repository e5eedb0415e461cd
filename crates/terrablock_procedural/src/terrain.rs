//! # Terrain Generation
//!
//! Fills a `ChunkStore` in two passes:
//!
//! 1. **Height field**: one 2D noise sample per column gives the surface
//!    height `h`. Cells below `h - 1` are soil or stone, `h - 1` is grass,
//!    everything above is air. No caves, no overhangs.
//! 2. **Resources**: every buried cell (neither air nor grass) is tested
//!    against each ore's 3D noise threshold, in registry order. A later ore
//!    overwrites an earlier one at the same cell.
//!
//! The generator owns its random stream and noise field. Two generators built
//! from the same parameters produce identical chunks.

use tracing::debug;

use crate::block::{Block, BlockRegistry, BlockType};
use crate::chunk::ChunkCoord;
use crate::noise::NoiseField;
use crate::params::GenerationParams;
use crate::seed::SeedGenerator;
use crate::storage::ChunkStore;

/// Layers directly below the grass that are mostly dirt.
pub const SOIL_DEPTH: i32 = 3;

/// Chance that a soil cell is stone instead of dirt.
pub const SOIL_STONE_CHANCE: f64 = 0.1;

/// Per-type block counts produced by one generation run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerationStats {
    /// Cells set to a ground type by the height pass.
    pub ground: usize,
    /// Cells set to grass.
    pub grass: usize,
    /// Cells set to air.
    pub air: usize,
    /// Cells overwritten by the resource pass, indexed by `BlockType::id`.
    pub ores: [usize; BlockType::COUNT],
}

impl GenerationStats {
    /// Total cells overwritten by the resource pass.
    #[must_use]
    pub fn ore_total(&self) -> usize {
        self.ores.iter().sum()
    }
}

/// Two-pass terrain generator for one parameter set.
#[derive(Clone, Debug)]
pub struct TerrainGenerator<'a> {
    params: GenerationParams,
    registry: &'a BlockRegistry,
    noise: NoiseField,
    /// Stream state right after the noise field consumed its draws.
    soil_rng: SeedGenerator,
}

impl<'a> TerrainGenerator<'a> {
    /// Creates a generator. Seeds the noise field from `params.seed`.
    #[must_use]
    pub fn new(params: GenerationParams, registry: &'a BlockRegistry) -> Self {
        let mut rng = SeedGenerator::new(params.seed);
        let noise = NoiseField::new(&mut rng);
        Self {
            params,
            registry,
            noise,
            soil_rng: rng,
        }
    }

    /// Parameters this generator was built from.
    #[must_use]
    pub const fn params(&self) -> &GenerationParams {
        &self.params
    }

    /// Surface height of the column at world block coordinates.
    ///
    /// The grass layer sits at `column_height - 1`. Non-finite parameters
    /// yield a height of zero.
    #[must_use]
    pub fn column_height(&self, world_x: f64, world_z: f64) -> i32 {
        let t = self.params.terrain;
        let raw = self.noise.sample2(world_x * t.scale, world_z * t.scale) * t.amplitude + t.offset;
        // Float-to-int casts saturate; NaN becomes 0.
        raw.floor() as i32
    }

    /// Generates terrain into `store` for a chunk at `origin`.
    ///
    /// The store is overwritten cell by cell; callers that want a clean
    /// regeneration clear it first.
    pub fn generate(&self, store: &mut ChunkStore, origin: ChunkCoord) -> GenerationStats {
        debug!(
            "Generating chunk [{},{}] seed={} size={}x{}",
            origin.x,
            origin.z,
            self.params.seed,
            store.width(),
            store.height()
        );

        let mut stats = GenerationStats::default();
        self.height_pass(store, origin, &mut stats);
        self.resource_pass(store, origin, &mut stats);

        debug!(
            "Chunk [{},{}] done: ground={} grass={} air={} ore={}",
            origin.x,
            origin.z,
            stats.ground,
            stats.grass,
            stats.air,
            stats.ore_total()
        );
        stats
    }

    fn height_pass(&self, store: &mut ChunkStore, origin: ChunkCoord, stats: &mut GenerationStats) {
        let mut rng = self.soil_rng.clone();
        let width = store.width() as i32;
        let height = store.height() as i32;
        let (base_x, base_z) = origin.world_origin(store.width());

        let dirt = self.registry.block(BlockType::Dirt);
        let stone = self.registry.block(BlockType::Stone);
        let grass = self.registry.block(BlockType::Grass);
        let air = self.registry.block(BlockType::Air);

        for x in 0..width {
            for z in 0..width {
                let h = self.column_height(base_x + f64::from(x), base_z + f64::from(z));
                for y in 0..height {
                    let block = if y < h.saturating_sub(1) {
                        stats.ground += 1;
                        if h - 1 - y > SOIL_DEPTH || rng.random() < SOIL_STONE_CHANCE {
                            stone
                        } else {
                            dirt
                        }
                    } else if y == h.saturating_sub(1) {
                        stats.grass += 1;
                        grass
                    } else {
                        stats.air += 1;
                        air
                    };
                    write(store, x, y, z, block);
                }
            }
        }
    }

    fn resource_pass(&self, store: &mut ChunkStore, origin: ChunkCoord, stats: &mut GenerationStats) {
        let width = store.width() as i32;
        let height = store.height() as i32;
        let (base_x, base_z) = origin.world_origin(store.width());

        for y in 0..height {
            for z in 0..width {
                for x in 0..width {
                    let Some(current) = store.get(x, y, z) else {
                        continue;
                    };
                    if matches!(current.block_type, BlockType::Air | BlockType::Grass) {
                        continue;
                    }

                    let wx = base_x + f64::from(x);
                    let wy = f64::from(y);
                    let wz = base_z + f64::from(z);
                    let mut placed = None;
                    for &kind in self.registry.ores() {
                        let ore = self.registry.block(kind);
                        let v = self
                            .noise
                            .sample3(wx * ore.scale[0], wy * ore.scale[1], wz * ore.scale[2]);
                        if v > ore.scarcity {
                            placed = Some(ore);
                        }
                    }

                    if let Some(ore) = placed {
                        stats.ores[usize::from(ore.block_type.id())] += 1;
                        write(store, x, y, z, ore);
                    }
                }
            }
        }
    }
}

#[inline]
fn write(store: &mut ChunkStore, x: i32, y: i32, z: i32, block: Block) {
    // Loop bounds come from the store itself.
    if store.set(x, y, z, block).is_err() {
        debug!("Skipped out-of-range cell ({}, {}, {})", x, y, z);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::ChunkSize;
    use crate::params::TerrainParams;

    fn flat(offset: f64) -> GenerationParams {
        GenerationParams::new(
            0,
            TerrainParams {
                scale: 0.0,
                amplitude: 0.0,
                offset,
            },
        )
    }

    fn no_ores() -> BlockRegistry {
        BlockRegistry::standard()
            .with_ore_params(BlockType::CoalOre, [1.0, 1.0, 1.0], 2.0)
            .with_ore_params(BlockType::IronOre, [1.0, 1.0, 1.0], 2.0)
    }

    fn store(width: u32, height: u32) -> ChunkStore {
        ChunkStore::new(ChunkSize::new(width, height).unwrap())
    }

    #[test]
    fn test_flat_column_height_equals_offset() {
        let registry = BlockRegistry::standard();
        let generator = TerrainGenerator::new(flat(2.0), &registry);
        for x in 0..8 {
            assert_eq!(generator.column_height(f64::from(x), 3.0), 2);
        }
    }

    #[test]
    fn test_height_rule_layers() {
        let registry = no_ores();
        let generator = TerrainGenerator::new(GenerationParams::default(), &registry);
        let mut s = store(16, 32);
        generator.generate(&mut s, ChunkCoord::new(0, 0));

        for x in 0..16 {
            for z in 0..16 {
                let h = generator.column_height(f64::from(x), f64::from(z));
                for y in 0..32 {
                    let kind = s.get(x, y, z).unwrap().block_type;
                    if y < h - 1 {
                        assert!(
                            matches!(kind, BlockType::Dirt | BlockType::Stone),
                            "({x},{y},{z}) below surface is {kind:?}"
                        );
                    } else if y == h - 1 {
                        assert_eq!(kind, BlockType::Grass, "({x},{y},{z}) should be grass");
                    } else {
                        assert_eq!(kind, BlockType::Air, "({x},{y},{z}) should be air");
                    }
                }
            }
        }
    }

    #[test]
    fn test_deep_ground_is_stone() {
        let registry = no_ores();
        let generator = TerrainGenerator::new(flat(20.0), &registry);
        let mut s = store(4, 24);
        generator.generate(&mut s, ChunkCoord::new(0, 0));
        // Grass at 19, soil 16..=18, stone below.
        for y in 0..15 {
            assert_eq!(s.get(1, y, 1).unwrap().block_type, BlockType::Stone);
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let registry = BlockRegistry::standard();
        let params = GenerationParams::default();
        let mut a = store(16, 32);
        let mut b = store(16, 32);
        TerrainGenerator::new(params, &registry).generate(&mut a, ChunkCoord::new(2, -1));
        TerrainGenerator::new(params, &registry).generate(&mut b, ChunkCoord::new(2, -1));
        assert_eq!(a, b);

        let generator = TerrainGenerator::new(params, &registry);
        let mut c = store(16, 32);
        generator.generate(&mut c, ChunkCoord::new(2, -1));
        let mut d = store(16, 32);
        generator.generate(&mut d, ChunkCoord::new(2, -1));
        assert_eq!(c, d, "Reusing a generator must not change its output");
    }

    #[test]
    fn test_ores_only_replace_buried_cells() {
        let registry = BlockRegistry::standard()
            .with_ore_params(BlockType::CoalOre, [0.3, 0.3, 0.3], 0.0);
        let generator = TerrainGenerator::new(flat(12.0), &registry);
        let mut s = store(16, 16);
        let stats = generator.generate(&mut s, ChunkCoord::new(0, 0));

        assert!(stats.ore_total() > 0, "A zero threshold should place some ore");
        for ([_, y, _], block) in s.iter() {
            if block.block_type.is_ore() {
                assert!(y < 11, "Ore at y={y} is not buried");
            }
        }
    }

    #[test]
    fn test_later_ore_wins() {
        // Both ores admit every noise value above -2, so iron (later) takes every buried cell.
        let registry = BlockRegistry::standard()
            .with_ore_params(BlockType::CoalOre, [0.2, 0.2, 0.2], -2.0)
            .with_ore_params(BlockType::IronOre, [0.2, 0.2, 0.2], -2.0);
        let generator = TerrainGenerator::new(flat(5.0), &registry);
        let mut s = store(4, 8);
        generator.generate(&mut s, ChunkCoord::new(0, 0));
        assert_eq!(s.count_of(BlockType::CoalOre), 0);
        assert_eq!(s.count_of(BlockType::IronOre), 4 * 4 * 4);
    }

    #[test]
    fn test_degenerate_parameters_do_not_panic() {
        let registry = BlockRegistry::standard();
        for terrain in [
            TerrainParams {
                scale: f64::NAN,
                amplitude: 1.0,
                offset: 1.0,
            },
            TerrainParams {
                scale: 1.0,
                amplitude: f64::INFINITY,
                offset: 0.0,
            },
            TerrainParams {
                scale: -3.0,
                amplitude: -5.0,
                offset: -100.0,
            },
            TerrainParams {
                scale: 1e300,
                amplitude: 1e300,
                offset: 1e300,
            },
        ] {
            let generator = TerrainGenerator::new(GenerationParams::new(7, terrain), &registry);
            let mut s = store(4, 4);
            generator.generate(&mut s, ChunkCoord::new(0, 0));
            assert_eq!(s.iter().count(), 64, "Every cell is written");
        }
    }
}
