//! Side-effect requests returned by simulation objects
//!
//! Bullets, groups and actors never touch the world directly. They return
//! `Action`s and the owning orchestrator applies them after the whole tick
//! has been collected.

use glam::Vec2;

use super::actor::ActorKind;
use super::bullet::Bullet;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Move the emitting actor by a delta
    Move { delta: Vec2 },
    /// Reflect bullets in the field centered at the emitter's position plus `offset`
    Reflect { offset: Vec2 },
    /// Deflect bullets; a missing offset means the emitter's own position,
    /// a missing angle means "push radially away from the field center"
    Deflect {
        offset: Option<Vec2>,
        angle: Option<f32>,
    },
    /// Absorb bullets touching the emitter this tick
    Shield,
    /// Insert freshly created bullets into the world
    SpawnBullets(Vec<Bullet>),
    /// Bind the nearest actor of this kind as the emitting bullet's target
    FindNearestActor(ActorKind),
}

impl Action {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Action::Move { .. } => "move",
            Action::Reflect { .. } => "reflect",
            Action::Deflect { .. } => "deflect",
            Action::Shield => "shield",
            Action::SpawnBullets(_) => "spawn_bullets",
            Action::FindNearestActor(_) => "find_nearest_actor",
        }
    }
}
