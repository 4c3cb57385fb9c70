//! Timed bullet emitters
//!
//! A `BulletGroup` stamps out batches of bullets from a template bullet every
//! `cadence` ticks, spreading their headings according to an `AngleMode`,
//! until its loop budget runs out.

use std::f32::consts::TAU;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::action::Action;
use super::bullet::Bullet;
use crate::error::ConfigError;

/// How headings are assigned within a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    /// Every bullet heads along angle 0
    #[default]
    Fixed,
    /// Bullet i of n heads along 2π·i/n
    Radial,
    /// Each bullet gets an independent uniform heading in [0, 2π)
    Random,
}

impl AngleMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AngleMode::Fixed => "fixed",
            AngleMode::Radial => "radial",
            AngleMode::Random => "random",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.to_lowercase().as_str() {
            "fixed" => Ok(AngleMode::Fixed),
            "radial" => Ok(AngleMode::Radial),
            "random" => Ok(AngleMode::Random),
            _ => Err(ConfigError::UnknownAngleMode(s.to_string())),
        }
    }
}

/// Remaining spawn events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoopCount {
    Forever,
    Times(u32),
}

impl LoopCount {
    /// Interpret the definition-file convention: -1 means forever
    pub fn from_raw(raw: i64) -> Result<Self, ConfigError> {
        match raw {
            -1 => Ok(LoopCount::Forever),
            n if n >= 0 => u32::try_from(n)
                .map(LoopCount::Times)
                .map_err(|_| ConfigError::InvalidLoopCount(raw)),
            _ => Err(ConfigError::InvalidLoopCount(raw)),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, LoopCount::Times(0))
    }
}

/// A timed emitter producing batches from one template bullet
#[derive(Debug, Clone)]
pub struct BulletGroup {
    template: Bullet,
    mode: AngleMode,
    cadence: u32,
    since_last_spawn: u32,
    batch_size: u32,
    loops: LoopCount,
    rng: Pcg32,
}

impl BulletGroup {
    /// `cadence` is the number of ticks between spawns and must be positive.
    /// `seed` drives the random angle mode.
    pub fn new(
        template: Bullet,
        mode: AngleMode,
        cadence: u32,
        batch_size: u32,
        loops: LoopCount,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        if cadence == 0 {
            return Err(ConfigError::InvalidCadence(0));
        }
        Ok(Self {
            template,
            mode,
            cadence,
            since_last_spawn: 0,
            batch_size,
            loops,
            rng: Pcg32::seed_from_u64(seed),
        })
    }

    /// Pre-charge the countdown; `cadence - 1` or more fires on the first update
    pub fn with_countdown(mut self, ticks: u32) -> Self {
        self.since_last_spawn = ticks;
        self
    }

    pub fn template(&self) -> &Bullet {
        &self.template
    }

    pub fn mode(&self) -> AngleMode {
        self.mode
    }

    pub fn cadence(&self) -> u32 {
        self.cadence
    }

    pub fn batch_size(&self) -> u32 {
        self.batch_size
    }

    pub fn loops(&self) -> LoopCount {
        self.loops
    }

    pub fn is_exhausted(&self) -> bool {
        self.loops.is_exhausted()
    }

    /// Advance one tick. An exhausted group does nothing.
    pub fn update(&mut self) -> Vec<Action> {
        if self.loops.is_exhausted() {
            return Vec::new();
        }

        self.since_last_spawn = self.since_last_spawn.saturating_add(1);
        if self.since_last_spawn < self.cadence {
            return Vec::new();
        }
        self.since_last_spawn = 0;

        if let LoopCount::Times(n) = &mut self.loops {
            *n -= 1;
            if *n == 0 {
                log::debug!(
                    "Bullet group ({}, {} per batch) exhausted",
                    self.mode.as_str(),
                    self.batch_size
                );
            }
        }

        vec![Action::SpawnBullets(self.spawn_batch())]
    }

    fn spawn_batch(&mut self) -> Vec<Bullet> {
        let n = self.batch_size;
        (0..n)
            .map(|i| {
                let angle = match self.mode {
                    AngleMode::Fixed => 0.0,
                    AngleMode::Radial => TAU * i as f32 / n as f32,
                    AngleMode::Random => self.rng.random_range(0.0..TAU),
                };
                self.template.from_template(angle)
            })
            .collect()
    }
}
