//! Run configuration
//!
//! Everything a `World` needs to know that is not part of the map itself.
//! Missing JSON fields fall back to the defaults in `crate::consts`.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::Rect;

/// How `Bullet::deflect` interprets its angle argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeflectMode {
    /// The angle replaces the bullet heading outright
    #[default]
    Absolute,
    /// The angle is a surface normal; the incoming heading is mirrored about it
    Relative,
}

impl DeflectMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeflectMode::Absolute => "absolute",
            DeflectMode::Relative => "relative",
        }
    }
}

/// Simulation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Edge length of a map tile
    pub tile_size: f32,
    /// Visible area; bullets leaving it are removed
    pub viewport: Rect,
    /// Deflection interpretation
    pub deflect_mode: DeflectMode,
    /// Maximum retained timeline depth per bullet (None = unbounded)
    pub timeline_cap: Option<usize>,
    /// Radius of the reflect/deflect field around an actor
    pub reflect_radius: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            tile_size: TILE_SIZE,
            viewport: Rect::new(0.0, 0.0, VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
            deflect_mode: DeflectMode::Absolute,
            timeline_cap: None,
            reflect_radius: REFLECT_RADIUS,
        }
    }
}

impl SimConfig {
    /// Create a default config with the given seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Parse and validate a config from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        log::info!(
            "Loaded config: seed={}, tile={}, deflect={}",
            config.seed,
            config.tile_size,
            config.deflect_mode.as_str()
        );
        Ok(config)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tile_size <= 0.0 || !self.tile_size.is_finite() {
            return Err(ConfigError::InvalidTileSize(self.tile_size));
        }
        let v = self.viewport;
        Rect::checked(v.x, v.y, v.width, v.height)?;
        if self.reflect_radius < 0.0 {
            return Err(ConfigError::NegativeRadius(self.reflect_radius));
        }
        Ok(())
    }
}
