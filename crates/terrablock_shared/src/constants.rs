//! # World & Physics Constants
//!
//! Defaults baked into the core. Every value here can be overridden at
//! runtime through the config types; these are only the fallbacks.

// =============================================================================
// CHUNK DIMENSIONS
// =============================================================================

/// Default chunk width and depth in blocks.
pub const DEFAULT_CHUNK_WIDTH: u32 = 64;

/// Default chunk height in blocks.
pub const DEFAULT_CHUNK_HEIGHT: u32 = 32;

// =============================================================================
// PLAYER BODY
// =============================================================================

/// Player half-width (blocks).
pub const PLAYER_RADIUS: f32 = 0.5;

/// Player height, feet to head (blocks).
pub const PLAYER_HEIGHT: f32 = 2.0;

/// Player mass. Gravity is scaled by it.
pub const PLAYER_MASS: f32 = 2.5;

// =============================================================================
// KINEMATICS
// =============================================================================

/// Gravity acceleration (blocks per second squared, before mass scaling).
pub const GRAVITY: f32 = 9.81;

/// Upward velocity applied by a jump (blocks per second).
pub const JUMP_VELOCITY: f32 = 8.0;

/// Horizontal walking speed (blocks per second).
pub const WALK_SPEED: f32 = 5.0;

/// Vertical speed while flying (blocks per second).
pub const FLY_SPEED: f32 = 10.0;

/// Terminal fall velocity (blocks per second).
///
/// Keeps a single tick's displacement under one block at 60 Hz.
pub const TERMINAL_VELOCITY: f32 = 50.0;

// =============================================================================
// COLLISION TOLERANCES
// =============================================================================

/// Amount the player box is shrunk on each axis before collision checks.
pub const COLLISION_PADDING: f32 = 0.01;

/// Extra distance added when pushing the player out of a block.
pub const COLLISION_EPSILON: f32 = 0.001;
