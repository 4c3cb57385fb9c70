//! Barrage - a deterministic bullet pattern simulation core
//!
//! Core modules:
//! - `sim`: Tick-driven simulation (bullets, bullet groups, spawners, actions, map collision)
//! - `patterns`: Data-driven bullet and bullet group definitions
//! - `config`: Run configuration
//! - `error`: Construction-time validation errors

pub mod config;
pub mod error;
pub mod patterns;
pub mod sim;

pub use config::{DeflectMode, SimConfig};
pub use error::ConfigError;

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    /// Edge length of a map tile in world units
    pub const TILE_SIZE: f32 = 16.0;

    /// Default visible viewport
    pub const VIEWPORT_WIDTH: f32 = 640.0;
    pub const VIEWPORT_HEIGHT: f32 = 480.0;

    /// Radius of the field around an actor in which reflect/deflect take effect
    pub const REFLECT_RADIUS: f32 = 24.0;

    /// Player character defaults
    pub const PLAYER_RADIUS: f32 = 6.0;
    pub const PLAYER_SPEED: f32 = 2.0;

    /// Collision grid layer probed by map collision queries
    pub const COLLISION_LAYER: usize = 0;
}

/// Unit vector pointing along `angle`
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Angle of the direction from `from` toward `to`
#[inline]
pub fn angle_toward(from: Vec2, to: Vec2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}
