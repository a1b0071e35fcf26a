//! Clump world configuration.
//!
//! The values here are fixed for the lifetime of a [`ClumpWorld`](crate::clump::ClumpWorld);
//! they can be loaded from JSON so tools and the demo binary share one source.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::error::Error;
use super::types::Result;

/// Density ceiling for every cell.
pub const MAX_WEIGHT: f32 = 4.0;
/// Isosurface threshold: cells strictly above this are solid.
pub const SURFACE: f32 = 0.5;
/// World units per grid cell.
pub const CELL_SIZE: f32 = 0.5;
/// Cells per side of a clump grid.
pub const GRID_SIZE: usize = 64;
/// Extra reach of the cut falloff toward the brush center.
pub const CUT_BIAS: f32 = 2.0;

/// How many disconnected regions are split off per processing pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitPolicy {
    /// Split only the last region found; the recursive passes peel off the rest.
    #[default]
    PeelLast,
    /// Split every region after the first in a single pass.
    AllButFirst,
}

/// Coherent-noise parameters for first-time field generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseParams {
    pub seed: u32,
    pub scale: f32,     // Noise frequency across the whole grid
    pub magnitude: f32, // Multiplier on the [0, 1] noise sample
    pub fill: f32,      // Bias added after scaling
    pub offset: Vec2,   // Sample-space offset (moves the pattern)
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            seed: 0,
            scale: 4.0,
            magnitude: 6.0,
            fill: -1.0,
            offset: Vec2::ZERO,
        }
    }
}

/// Configuration shared by every clump in a world.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClumpConfig {
    /// Cells per side (N x N grid)
    pub grid_size: usize,
    /// Density ceiling; also the minimum mass a clump needs to survive
    pub max_weight: f32,
    /// Solid threshold
    pub surface: f32,
    /// World units per cell
    pub cell_size: f32,
    /// Cut falloff bias
    pub cut_bias: f32,
    /// Region splitting behavior
    pub split_policy: SplitPolicy,
    /// Initial generation noise
    pub noise: NoiseParams,
}

impl Default for ClumpConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            max_weight: MAX_WEIGHT,
            surface: SURFACE,
            cell_size: CELL_SIZE,
            cut_bias: CUT_BIAS,
            split_policy: SplitPolicy::default(),
            noise: NoiseParams::default(),
        }
    }
}

impl ClumpConfig {
    /// Default config with a different grid size.
    pub fn with_grid_size(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Mass below which a clump is destroyed.
    pub fn min_mass(&self) -> f32 {
        self.max_weight
    }

    /// Check that the values describe a usable grid.
    pub fn validate(&self) -> Result<()> {
        if self.grid_size < 2 {
            return Err(Error::InvalidConfig(format!(
                "grid_size must be at least 2, got {}",
                self.grid_size
            )));
        }
        if !(self.max_weight.is_finite() && self.max_weight > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "max_weight must be positive, got {}",
                self.max_weight
            )));
        }
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "cell_size must be positive, got {}",
                self.cell_size
            )));
        }
        if !(self.surface >= 0.0 && self.surface < self.max_weight) {
            return Err(Error::InvalidConfig(format!(
                "surface must lie in [0, {}), got {}",
                self.max_weight, self.surface
            )));
        }
        if !self.cut_bias.is_finite() {
            return Err(Error::InvalidConfig("cut_bias must be finite".to_string()));
        }
        Ok(())
    }

    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Write the config as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }
}
