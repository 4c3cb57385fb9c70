//! Actor capability interface and the player-controlled actor
//!
//! Spawners and player characters share the `Actor` trait so the world can
//! keep them in one collection. Bullets refer to actors only by `ActorId`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::action::Action;
use super::shape::{Circle, Rect, Shape};
use crate::consts::{PLAYER_RADIUS, PLAYER_SPEED};

/// Stable, non-owning handle to an actor in a world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub u32);

/// Handle to whoever controls an actor (local or remote)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

/// Actor categories a lookup can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    Player,
    Spawner,
}

/// What the controlling player wants the actor to do this tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ImpulseSet {
    /// Desired movement direction (normalized before use)
    pub movement: Vec2,
    /// Reflect nearby bullets back along their history
    pub reflect: bool,
    /// Deflect nearby bullets toward this heading
    pub deflect: Option<f32>,
    /// Absorb touching bullets
    pub shield: bool,
}

impl ImpulseSet {
    pub fn is_idle(&self) -> bool {
        self.movement == Vec2::ZERO && !self.reflect && self.deflect.is_none() && !self.shield
    }
}

/// Capabilities every world actor exposes
pub trait Actor: std::fmt::Debug {
    fn id(&self) -> ActorId;
    fn kind(&self) -> ActorKind;
    fn shape(&self) -> Shape;
    fn bounds(&self) -> Rect;
    fn position(&self) -> Vec2;
    fn set_position(&mut self, pos: Vec2);
    fn set_size(&mut self, radius: f32);
    fn player(&self) -> Option<PlayerId>;
    fn set_player(&mut self, player: Option<PlayerId>);
    fn set_impulses(&mut self, impulses: ImpulseSet);
    /// Advance one tick
    fn update(&mut self) -> Vec<Action>;
}

/// A player-controlled circle
#[derive(Debug, Clone)]
pub struct PlayerCharacter {
    id: ActorId,
    shape: Circle,
    player: Option<PlayerId>,
    impulses: ImpulseSet,
    /// Distance covered per tick of movement
    pub speed: f32,
}

impl PlayerCharacter {
    pub fn new(id: ActorId, pos: Vec2) -> Self {
        Self {
            id,
            shape: Circle::new(pos, PLAYER_RADIUS),
            player: None,
            impulses: ImpulseSet::default(),
            speed: PLAYER_SPEED,
        }
    }

    pub fn impulses(&self) -> ImpulseSet {
        self.impulses
    }
}

impl Actor for PlayerCharacter {
    fn id(&self) -> ActorId {
        self.id
    }

    fn kind(&self) -> ActorKind {
        ActorKind::Player
    }

    fn shape(&self) -> Shape {
        Shape::Circle(self.shape)
    }

    fn bounds(&self) -> Rect {
        self.shape.bounds()
    }

    fn position(&self) -> Vec2 {
        self.shape.center
    }

    fn set_position(&mut self, pos: Vec2) {
        self.shape.center = pos;
    }

    fn set_size(&mut self, radius: f32) {
        self.shape.radius = radius.max(0.0);
    }

    fn player(&self) -> Option<PlayerId> {
        self.player
    }

    fn set_player(&mut self, player: Option<PlayerId>) {
        self.player = player;
    }

    fn set_impulses(&mut self, impulses: ImpulseSet) {
        self.impulses = impulses;
    }

    /// Turn the pending impulses into actions; impulses are consumed
    fn update(&mut self) -> Vec<Action> {
        let impulses = std::mem::take(&mut self.impulses);
        let mut actions = Vec::new();

        let dir = impulses.movement.normalize_or_zero();
        if dir != Vec2::ZERO {
            actions.push(Action::Move {
                delta: dir * self.speed,
            });
        }
        if impulses.reflect {
            actions.push(Action::Reflect { offset: Vec2::ZERO });
        }
        if let Some(angle) = impulses.deflect {
            actions.push(Action::Deflect {
                offset: None,
                angle: Some(angle),
            });
        }
        if impulses.shield {
            actions.push(Action::Shield);
        }
        actions
    }
}
