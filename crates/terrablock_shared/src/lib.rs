//! # TERRABLOCK Shared
//!
//! Common types used by the world core and by whatever renders it.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on a rendering or windowing crate.
//! The host renderer converts `Vec3` into its own vector type at the boundary.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod math;

pub use constants::{
    COLLISION_EPSILON, COLLISION_PADDING, DEFAULT_CHUNK_HEIGHT, DEFAULT_CHUNK_WIDTH, GRAVITY,
    FLY_SPEED, JUMP_VELOCITY, PLAYER_HEIGHT, PLAYER_MASS, PLAYER_RADIUS, TERMINAL_VELOCITY,
    WALK_SPEED,
};
pub use math::{Axis, Vec3};
