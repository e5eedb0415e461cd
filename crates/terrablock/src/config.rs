//! # World Configuration
//!
//! One TOML document configures a world: chunk dimensions, generation
//! parameters and player physics. Every table is optional.
//!
//! ```toml
//! [chunk]
//! width = 32
//! height = 32
//!
//! [generation]
//! seed = 4242
//!
//! [generation.terrain]
//! scale = 0.05
//! amplitude = 5.0
//! offset = 10.0
//!
//! [physics]
//! gravity = 9.81
//! jump_velocity = 8.0
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use terrablock_procedural::{ChunkSize, GenerationParams, WorldError};
use terrablock_shared::constants::{
    FLY_SPEED, GRAVITY, JUMP_VELOCITY, PLAYER_HEIGHT, PLAYER_MASS, PLAYER_RADIUS,
    TERMINAL_VELOCITY, WALK_SPEED,
};
use thiserror::Error;
use tracing::warn;

use crate::physics::BodyShape;

/// Errors raised while loading a world configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Config is not valid TOML or has mistyped fields.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config parsed but holds values the world cannot use.
    #[error("invalid config: {0}")]
    Invalid(#[from] WorldError),

    /// A physics value is out of range.
    #[error("invalid physics setting {field}: {value}")]
    InvalidPhysics {
        /// Offending field.
        field: &'static str,
        /// Its value.
        value: f32,
    },
}

/// Player movement tuning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravity acceleration before mass scaling.
    pub gravity: f32,
    /// Player mass; gravity is multiplied by it.
    pub mass: f32,
    /// Upward velocity set by a jump.
    pub jump_velocity: f32,
    /// Horizontal speed.
    pub walk_speed: f32,
    /// Vertical speed while flying.
    pub fly_speed: f32,
    /// Largest downward speed.
    pub terminal_velocity: f32,
    /// Player half-width.
    pub player_radius: f32,
    /// Player height.
    pub player_height: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            mass: PLAYER_MASS,
            jump_velocity: JUMP_VELOCITY,
            walk_speed: WALK_SPEED,
            fly_speed: FLY_SPEED,
            terminal_velocity: TERMINAL_VELOCITY,
            player_radius: PLAYER_RADIUS,
            player_height: PLAYER_HEIGHT,
        }
    }
}

impl PhysicsConfig {
    /// Player volume described by this config.
    #[must_use]
    pub const fn body(&self) -> BodyShape {
        BodyShape::new(self.player_radius, self.player_height)
    }

    /// Downward acceleration applied each second while not flying.
    #[must_use]
    pub fn weight(&self) -> f32 {
        self.gravity * self.mass
    }

    /// Checks that body dimensions are positive and all values finite.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidPhysics` naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("gravity", self.gravity),
            ("mass", self.mass),
            ("jump_velocity", self.jump_velocity),
            ("walk_speed", self.walk_speed),
            ("fly_speed", self.fly_speed),
            ("terminal_velocity", self.terminal_velocity),
            ("player_radius", self.player_radius),
            ("player_height", self.player_height),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::InvalidPhysics { field, value });
            }
        }
        for (field, value) in [
            ("player_radius", self.player_radius),
            ("player_height", self.player_height),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::InvalidPhysics { field, value });
            }
        }
        Ok(())
    }
}

/// Complete world configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Chunk dimensions.
    pub chunk: ChunkSize,
    /// Terrain generation parameters.
    pub generation: GenerationParams,
    /// Player physics.
    pub physics: PhysicsConfig,
}

impl WorldConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not parse or holds unusable values.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are rejected.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source).map_err(|e| {
            warn!("Rejected config {}: {}", path.display(), e);
            e
        })
    }

    /// Checks chunk size and physics values.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.chunk.validate()?;
        self.physics.validate()
    }

    /// Serializes to TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if a value cannot be represented in TOML.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = WorldConfig::from_toml_str("").unwrap();
        assert_eq!(config, WorldConfig::default());
        assert_eq!(config.chunk.width, 64);
        assert_eq!(config.chunk.height, 32);
        assert_eq!(config.physics.mass, 2.5);
    }

    #[test]
    fn test_partial_tables() {
        let config = WorldConfig::from_toml_str(
            "[chunk]\nwidth = 16\n\n[generation.terrain]\noffset = 4.0\n\n[physics]\njump_velocity = 6.0\n",
        )
        .unwrap();
        assert_eq!(config.chunk.width, 16);
        assert_eq!(config.chunk.height, 32);
        assert_eq!(config.generation.terrain.offset, 4.0);
        assert_eq!(config.generation.terrain.amplitude, 5.0);
        assert_eq!(config.physics.jump_velocity, 6.0);
    }

    #[test]
    fn test_zero_chunk_rejected() {
        let err = WorldConfig::from_toml_str("[chunk]\nwidth = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(WorldError::InvalidChunkSize { .. })));
    }

    #[test]
    fn test_bad_physics_rejected() {
        let err = WorldConfig::from_toml_str("[physics]\nplayer_height = -1.0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidPhysics {
                field: "player_height",
                ..
            }
        ));
    }

    #[test]
    fn test_mistyped_field_is_parse_error() {
        let err = WorldConfig::from_toml_str("[generation]\nseed = \"x\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = WorldConfig::default();
        config.generation.seed = 99;
        let text = config.to_toml_string().unwrap();
        assert_eq!(WorldConfig::from_toml_str(&text).unwrap(), config);
    }
}
