//! Data-driven bullet patterns
//!
//! Definitions are loaded from JSON. Every field is optional so an enemy can
//! override just a few values of a shared base definition; anything still
//! missing after merging falls back to a default when the group is built.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sim::bullet::{Bullet, BulletStyle, Rgba, WHITE};
use crate::sim::group::{AngleMode, BulletGroup, LoopCount};

/// Default bullet radius when a definition leaves it out
pub const DEFAULT_RADIUS: f32 = 3.0;

/// Bullet tunables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BulletDef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bullet_type: Option<String>,
    /// RGB or RGBA
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Vec<u8>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acceleration: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accel_accel: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_speed: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_speed: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angular_velocity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aim_time: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aim_delay: Option<u32>,
}

impl BulletDef {
    /// Fields set here win, the rest come from `base`
    pub fn merged_over(&self, base: &BulletDef) -> BulletDef {
        BulletDef {
            bullet_type: self.bullet_type.clone().or_else(|| base.bullet_type.clone()),
            color: self.color.clone().or_else(|| base.color.clone()),
            radius: self.radius.or(base.radius),
            speed: self.speed.or(base.speed),
            acceleration: self.acceleration.or(base.acceleration),
            accel_accel: self.accel_accel.or(base.accel_accel),
            min_speed: self.min_speed.or(base.min_speed),
            max_speed: self.max_speed.or(base.max_speed),
            angular_velocity: self.angular_velocity.or(base.angular_velocity),
            aim_time: self.aim_time.or(base.aim_time),
            aim_delay: self.aim_delay.or(base.aim_delay),
        }
    }

    /// Build a template bullet at `pos`
    pub fn build(&self, pos: Vec2) -> Result<Bullet, ConfigError> {
        let style = match &self.bullet_type {
            Some(s) => BulletStyle::parse(s)?,
            None => BulletStyle::Circular,
        };
        let bullet = Bullet::new(pos, self.radius.unwrap_or(DEFAULT_RADIUS))?
            .with_style(style, self.rgba())
            .with_motion(self.speed.unwrap_or(0.0), 0.0)
            .with_acceleration(
                self.acceleration.unwrap_or(0.0),
                self.accel_accel.unwrap_or(0.0),
            )
            .with_speed_limits(
                self.min_speed.unwrap_or(0.0),
                self.max_speed.unwrap_or(f32::INFINITY),
            )
            .with_angular_velocity(self.angular_velocity.unwrap_or(0.0))
            .with_aim(self.aim_delay.unwrap_or(0), self.aim_time.unwrap_or(0));
        Ok(bullet)
    }

    fn rgba(&self) -> Rgba {
        match self.color.as_deref() {
            Some([r, g, b]) => [*r, *g, *b, 255],
            Some([r, g, b, a, ..]) => [*r, *g, *b, *a],
            _ => WHITE,
        }
    }
}

/// Emitter settings plus the bullet it stamps out
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BulletGroupDef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// "fixed", "radial" or "random"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bullet_count: Option<i64>,
    /// Initial countdown; equal to spawn_rate means "fire on the first tick"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_spawned_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spawn_rate: Option<i64>,
    /// -1 loops forever
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loop_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bullet: Option<BulletDef>,
}

impl BulletGroupDef {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a JSON array of group definitions
    pub fn list_from_json(json: &str) -> Result<Vec<Self>, ConfigError> {
        let defs: Vec<Self> = serde_json::from_str(json)?;
        log::info!("Loaded {} bullet group definitions", defs.len());
        Ok(defs)
    }

    fn name(&self) -> String {
        self.alias.clone().unwrap_or_else(|| "<unnamed>".to_string())
    }

    /// Fields set here win, the rest come from `base`; bullets merge field by field
    pub fn merged_over(&self, base: &BulletGroupDef) -> BulletGroupDef {
        let bullet = match (&self.bullet, &base.bullet) {
            (Some(over), Some(under)) => Some(over.merged_over(under)),
            (over, under) => over.clone().or_else(|| under.clone()),
        };
        BulletGroupDef {
            alias: self.alias.clone().or_else(|| base.alias.clone()),
            angle: self.angle.clone().or_else(|| base.angle.clone()),
            bullet_count: self.bullet_count.or(base.bullet_count),
            last_spawned_at: self.last_spawned_at.or(base.last_spawned_at),
            spawn_rate: self.spawn_rate.or(base.spawn_rate),
            loop_count: self.loop_count.or(base.loop_count),
            bullet,
        }
    }

    /// Build a validated group whose bullets start at `pos`
    pub fn build(&self, pos: Vec2, seed: u64) -> Result<BulletGroup, ConfigError> {
        let template = self
            .bullet
            .as_ref()
            .ok_or_else(|| ConfigError::MissingBullet(self.name()))?
            .build(pos)?;

        let mode = match &self.angle {
            Some(s) => AngleMode::parse(s)?,
            None => AngleMode::Fixed,
        };

        let rate = self.spawn_rate.unwrap_or(1);
        let cadence = u32::try_from(rate)
            .ok()
            .filter(|c| *c > 0)
            .ok_or(ConfigError::InvalidCadence(rate))?;

        let count = self.bullet_count.unwrap_or(1);
        let batch_size =
            u32::try_from(count).map_err(|_| ConfigError::NegativeBulletCount(count))?;

        let loops = LoopCount::from_raw(self.loop_count.unwrap_or(-1))?;
        let countdown = self.last_spawned_at.unwrap_or(0).clamp(0, u32::MAX as i64) as u32;

        Ok(BulletGroup::new(template, mode, cadence, batch_size, loops, seed)?
            .with_countdown(countdown))
    }
}

fn preset(
    alias: &str,
    angle: AngleMode,
    bullet_count: i64,
    spawn_rate: i64,
    bullet: BulletDef,
) -> BulletGroupDef {
    BulletGroupDef {
        alias: Some(alias.to_string()),
        angle: Some(angle.as_str().to_string()),
        bullet_count: Some(bullet_count),
        last_spawned_at: Some(spawn_rate),
        spawn_rate: Some(spawn_rate),
        loop_count: Some(-1),
        bullet: Some(bullet),
    }
}

/// The stock spawner loadout: a homing accelerating burst, a delayed-homing
/// spiral and a random spray. Every group fires on its first tick.
pub fn default_loadout() -> Vec<BulletGroupDef> {
    vec![
        preset(
            "blue",
            AngleMode::Radial,
            5,
            25,
            BulletDef {
                bullet_type: Some(BulletStyle::Directional.as_str().to_string()),
                color: Some(vec![0, 0, 255, 255]),
                radius: Some(3.0),
                speed: Some(1.0),
                acceleration: Some(0.05),
                accel_accel: Some(0.0),
                min_speed: Some(0.0),
                max_speed: Some(15.0),
                angular_velocity: Some(0.0),
                aim_time: Some(5),
                aim_delay: Some(15),
            },
        ),
        preset(
            "purple",
            AngleMode::Radial,
            12,
            100,
            BulletDef {
                bullet_type: Some(BulletStyle::Vector.as_str().to_string()),
                color: Some(vec![255, 0, 255, 255]),
                radius: Some(4.0),
                speed: Some(5.0),
                acceleration: Some(0.0),
                accel_accel: Some(0.0),
                min_speed: Some(0.0),
                max_speed: Some(100.0),
                angular_velocity: Some(0.1),
                aim_time: Some(10),
                aim_delay: Some(75),
            },
        ),
        preset(
            "yellow",
            AngleMode::Random,
            12,
            5,
            BulletDef {
                bullet_type: Some(BulletStyle::Circular.as_str().to_string()),
                color: Some(vec![255, 255, 0, 255]),
                radius: Some(3.0),
                speed: Some(5.0),
                max_speed: Some(100.0),
                ..Default::default()
            },
        ),
    ]
}
