//! # Generation Parameters
//!
//! The parameter object a chunk is generated from. Every field has a
//! default, so a partial TOML table is accepted.

use serde::{Deserialize, Serialize};

use crate::error::WorldResult;

/// Height-field parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainParams {
    /// Noise frequency. World coordinates are multiplied by this before sampling.
    pub scale: f64,
    /// Noise output multiplier.
    pub amplitude: f64,
    /// Height added after scaling.
    pub offset: f64,
}

impl TerrainParams {
    /// Default noise frequency.
    pub const DEFAULT_SCALE: f64 = 0.05;
    /// Default amplitude.
    pub const DEFAULT_AMPLITUDE: f64 = 5.0;
    /// Default base height.
    pub const DEFAULT_OFFSET: f64 = 10.0;
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            scale: Self::DEFAULT_SCALE,
            amplitude: Self::DEFAULT_AMPLITUDE,
            offset: Self::DEFAULT_OFFSET,
        }
    }
}

/// Everything that determines a chunk's generated contents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParams {
    /// World seed.
    pub seed: u32,
    /// Height-field parameters.
    pub terrain: TerrainParams,
}

impl GenerationParams {
    /// Creates parameters from a seed and terrain settings.
    #[must_use]
    pub const fn new(seed: u32, terrain: TerrainParams) -> Self {
        Self { seed, terrain }
    }

    /// Parses parameters from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `WorldError::Config` if the document is not valid TOML or a
    /// field has the wrong type.
    pub fn from_toml_str(source: &str) -> WorldResult<Self> {
        Ok(toml::from_str(source)?)
    }
}
