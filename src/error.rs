//! Construction-time validation errors
//!
//! Simulation steps never fail; everything that can be wrong is caught when a
//! bullet, group, map or config is built.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("spawn cadence must be positive, got {0}")]
    InvalidCadence(i64),

    #[error("radius must be non-negative, got {0}")]
    NegativeRadius(f32),

    #[error("size must be non-negative, got {width}x{height}")]
    NegativeSize { width: f32, height: f32 },

    #[error("tile size must be positive, got {0}")]
    InvalidTileSize(f32),

    #[error("unknown angle mode {0:?} (expected fixed, radial or random)")]
    UnknownAngleMode(String),

    #[error("unknown bullet style {0:?} (expected circular, directional or vector)")]
    UnknownBulletStyle(String),

    #[error("bullet count must be non-negative, got {0}")]
    NegativeBulletCount(i64),

    #[error("loop count must be -1 (forever) or non-negative, got {0}")]
    InvalidLoopCount(i64),

    #[error("bullet group {0:?} has no bullet definition")]
    MissingBullet(String),

    #[error("map has no layers")]
    EmptyMap,

    #[error("layer {layer} row {row} has {found} cells, expected {expected}")]
    RaggedLayer {
        layer: usize,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
