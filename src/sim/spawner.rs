//! Stationary bullet spawners
//!
//! A spawner is an actor in name only: it never moves, never collides and
//! ignores every mutating capability except `update`.

use glam::Vec2;

use super::action::Action;
use super::actor::{Actor, ActorId, ActorKind, ImpulseSet, PlayerId};
use super::group::BulletGroup;
use super::shape::{Circle, Rect, Shape};
use crate::error::ConfigError;
use crate::patterns::{self, BulletGroupDef};

/// Derive a per-group RNG seed so groups on one spawner draw independent streams
pub fn group_seed(seed: u64, index: usize) -> u64 {
    seed ^ (index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

#[derive(Debug, Clone)]
pub struct Spawner {
    id: ActorId,
    shape: Circle,
    groups: Vec<BulletGroup>,
}

impl Spawner {
    pub fn new(id: ActorId, pos: Vec2, groups: Vec<BulletGroup>) -> Self {
        Self {
            id,
            shape: Circle::new(pos, 0.0),
            groups,
        }
    }

    /// Build a spawner at `pos` from group definitions
    pub fn from_defs(
        id: ActorId,
        pos: Vec2,
        defs: &[BulletGroupDef],
        seed: u64,
    ) -> Result<Self, ConfigError> {
        let groups = defs
            .iter()
            .enumerate()
            .map(|(i, def)| def.build(pos, group_seed(seed, i)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(id, pos, groups))
    }

    /// Spawner carrying the built-in pattern loadout
    pub fn with_default_loadout(id: ActorId, pos: Vec2, seed: u64) -> Result<Self, ConfigError> {
        Self::from_defs(id, pos, &patterns::default_loadout(), seed)
    }

    pub fn groups(&self) -> &[BulletGroup] {
        &self.groups
    }

    /// True once every group has spent its loops
    pub fn is_exhausted(&self) -> bool {
        self.groups.iter().all(BulletGroup::is_exhausted)
    }
}

impl Actor for Spawner {
    fn id(&self) -> ActorId {
        self.id
    }

    fn kind(&self) -> ActorKind {
        ActorKind::Spawner
    }

    fn shape(&self) -> Shape {
        Shape::Circle(self.shape)
    }

    fn bounds(&self) -> Rect {
        Rect::ZERO
    }

    fn position(&self) -> Vec2 {
        self.shape.center
    }

    fn set_position(&mut self, _pos: Vec2) {}

    fn set_size(&mut self, _radius: f32) {}

    fn player(&self) -> Option<PlayerId> {
        None
    }

    fn set_player(&mut self, _player: Option<PlayerId>) {}

    fn set_impulses(&mut self, _impulses: ImpulseSet) {}

    /// Update every group, keeping their actions in group order
    fn update(&mut self) -> Vec<Action> {
        self.groups.iter_mut().flat_map(BulletGroup::update).collect()
    }
}
