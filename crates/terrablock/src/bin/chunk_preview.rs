//! # Chunk Preview
//!
//! Headless world check: generates one chunk, reports what it contains and
//! where a player dropped at its center comes to rest.
//!
//! Usage: `chunk_preview [CONFIG] [SNAPSHOT]` (see `--help`)
//!
//! Set `RUST_LOG=debug` to see generation and collision logs.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use terrablock::{
    BlockRegistry, Chunk, ChunkCoord, MovementInput, PlayerController, Vec3, WorldConfig,
};
use tracing::{error, info};

/// Simulation tick (seconds).
const DT: f32 = 1.0 / 60.0;

/// Ticks to let the player settle.
const SETTLE_TICKS: usize = 600;

/// Generate one chunk and drop a player on it
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// World config (TOML). Defaults are used when omitted.
    config: Option<PathBuf>,

    /// Write a compressed snapshot of the generated chunk here
    snapshot: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = match args.config.as_deref() {
        Some(path) => match WorldConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => WorldConfig::default(),
    };

    info!("===========================================");
    info!("TERRABLOCK - chunk preview");
    info!("===========================================");
    info!(
        "Chunk {}x{}x{}, seed {}, scale {}, amplitude {}, offset {}",
        config.chunk.width,
        config.chunk.height,
        config.chunk.width,
        config.generation.seed,
        config.generation.terrain.scale,
        config.generation.terrain.amplitude,
        config.generation.terrain.offset
    );

    let mut chunk = Chunk::new(
        config.chunk,
        ChunkCoord::new(0, 0),
        config.generation,
        Arc::new(BlockRegistry::standard()),
    );
    chunk.generate();

    for (kind, count) in chunk.block_counts() {
        info!("  {:?}: {}", kind, count);
    }
    let visible = chunk.visibility().visible_blocks();
    let visible_total: usize = visible.values().map(Vec::len).sum();
    info!(
        "Visible blocks: {} in {} batches",
        visible_total,
        visible.len()
    );

    let center = (config.chunk.width / 2) as i32;
    let spawn_y = chunk
        .surface_height(center, center)
        .map_or(config.chunk.height as f32, |y| (y + 1) as f32 + 1.0);
    let spawn = Vec3::new(center as f32 + 0.5, spawn_y, center as f32 + 0.5);

    let mut player = PlayerController::new(spawn, config.physics);
    for _ in 0..SETTLE_TICKS {
        player.step(&MovementInput::IDLE, DT, chunk.store());
        if player.is_grounded() {
            break;
        }
    }
    info!(
        "Player dropped at ({:.2}, {:.2}, {:.2}) rests at ({:.3}, {:.3}, {:.3}), {:?}",
        spawn.x,
        spawn.y,
        spawn.z,
        player.position.x,
        player.position.y,
        player.position.z,
        player.mode()
    );

    if let Some(path) = args.snapshot {
        if let Err(e) = chunk.save_compressed(&path) {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
