//! Reference orchestrator
//!
//! Owns the map, the actors and the live bullets, and applies the actions
//! they return. One call to `tick` advances every entity exactly once:
//!
//! 1. actors update in storage order (spawners, player characters)
//! 2. live bullets update
//! 3. bullet actions apply (target lookups bind for the next tick)
//! 4. actor actions apply (movement against the map, reflect/deflect fields,
//!    shields, spawned bullets are queued)
//! 5. bullets that left the viewport, hit a wall or hit a player are flagged
//! 6. queued bullets are appended and flagged bullets removed

use glam::Vec2;

use super::action::Action;
use super::actor::{Actor, ActorId, ActorKind, ImpulseSet, PlayerCharacter, PlayerId};
use super::bullet::{Bullet, TargetLookup};
use super::map::{MapDef, TileMap};
use super::shape::{Circle, Rect, Shape};
use super::spawner::{Spawner, group_seed};
use crate::angle_toward;
use crate::config::SimConfig;
use crate::error::ConfigError;
use crate::patterns::{self, BulletGroupDef};

/// Something noteworthy that happened during the last tick
#[derive(Debug, Clone, PartialEq)]
pub enum WorldEvent {
    BulletsSpawned { spawner: ActorId, count: usize },
    PlayerHit { actor: ActorId },
    BulletAbsorbed { actor: ActorId },
}

/// Target lookup over the world's actor list
struct ActorTargets<'a>(&'a [Box<dyn Actor>]);

impl TargetLookup for ActorTargets<'_> {
    fn target_bounds(&self, id: ActorId) -> Option<Rect> {
        self.0.iter().find(|a| a.id() == id).map(|a| a.bounds())
    }
}

pub struct World {
    config: SimConfig,
    map: TileMap,
    actors: Vec<Box<dyn Actor>>,
    bullets: Vec<Bullet>,
    /// Player start position
    start: Vec2,
    time_ticks: u64,
    next_id: u32,
    events: Vec<WorldEvent>,
}

impl World {
    pub fn new(config: SimConfig, map: TileMap) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            map,
            actors: Vec::new(),
            bullets: Vec::new(),
            start: Vec2::ZERO,
            time_ticks: 0,
            next_id: 1,
            events: Vec::new(),
        })
    }

    /// Build the map and place every actor it lists
    pub fn from_map_def(config: SimConfig, def: &MapDef) -> Result<Self, ConfigError> {
        let map = def.build_with_tile_size(config.tile_size)?;
        let mut world = Self::new(config, map)?;
        world.start = def.start_position(world.config.tile_size);

        for actor in &def.actors {
            let pos = world.map.cell_to_world(actor.spawn[0], actor.spawn[1]);
            match actor.kind.as_str() {
                "spawner" => {
                    let defs = match &actor.groups {
                        Some(groups) => groups.clone(),
                        None => patterns::default_loadout(),
                    };
                    world.add_spawner(pos, &defs)?;
                }
                other => log::warn!("Skipping unknown actor type {:?}", other),
            }
        }

        log::info!(
            "World ready: {} actors, seed {}",
            world.actors.len(),
            world.config.seed
        );
        Ok(world)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn map(&self) -> &TileMap {
        &self.map
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn start(&self) -> Vec2 {
        self.start
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    /// Insert a bullet directly (it first updates on the next tick)
    pub fn push_bullet(&mut self, bullet: Bullet) {
        self.bullets.push(bullet);
    }

    /// Events produced by the last tick
    pub fn events(&self) -> &[WorldEvent] {
        &self.events
    }

    pub fn actors(&self) -> impl Iterator<Item = &(dyn Actor + 'static)> {
        self.actors.iter().map(|a| &**a)
    }

    pub fn actor(&self, id: ActorId) -> Option<&dyn Actor> {
        self.actors.iter().find(|a| a.id() == id).map(|a| &**a)
    }

    fn actor_index(&self, id: ActorId) -> Option<usize> {
        self.actors.iter().position(|a| a.id() == id)
    }

    /// Allocate an id and store the actor built with it
    pub fn insert_actor<A: Actor + 'static>(&mut self, build: impl FnOnce(ActorId) -> A) -> ActorId {
        let id = ActorId(self.next_id);
        self.next_id += 1;
        self.actors.push(Box::new(build(id)));
        id
    }

    pub fn add_spawner(
        &mut self,
        pos: Vec2,
        defs: &[BulletGroupDef],
    ) -> Result<ActorId, ConfigError> {
        let id = ActorId(self.next_id);
        let spawner = Spawner::from_defs(id, pos, defs, group_seed(self.config.seed, id.0 as usize))?;
        self.next_id += 1;
        self.actors.push(Box::new(spawner));
        Ok(id)
    }

    /// Player character at the map start
    pub fn add_player(&mut self, player: Option<PlayerId>) -> ActorId {
        let start = self.start;
        self.insert_actor(|id| {
            let mut pc = PlayerCharacter::new(id, start);
            pc.set_player(player);
            pc
        })
    }

    /// Drop an actor; bullets targeting it will look for a new target
    pub fn remove_actor(&mut self, id: ActorId) -> bool {
        let before = self.actors.len();
        self.actors.retain(|a| a.id() != id);
        self.actors.len() != before
    }

    pub fn set_impulses(&mut self, id: ActorId, impulses: ImpulseSet) -> bool {
        match self.actors.iter_mut().find(|a| a.id() == id) {
            Some(actor) => {
                actor.set_impulses(impulses);
                true
            }
            None => false,
        }
    }

    /// Nearest actor of `kind` to `pos`, by bounds center; ties go to the earliest stored
    pub fn find_nearest(&self, kind: ActorKind, pos: Vec2) -> Option<ActorId> {
        self.actors
            .iter()
            .filter(|a| a.kind() == kind)
            .min_by(|a, b| {
                let da = a.bounds().center().distance_squared(pos);
                let db = b.bounds().center().distance_squared(pos);
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|a| a.id())
    }

    /// Advance the whole world by one tick
    pub fn tick(&mut self) {
        self.events.clear();
        self.time_ticks += 1;

        let mut actor_actions = Vec::new();
        for actor in self.actors.iter_mut() {
            let actions = actor.update();
            if !actions.is_empty() {
                actor_actions.push((actor.id(), actions));
            }
        }

        let targets = ActorTargets(&self.actors);
        let mut bullet_actions = Vec::new();
        for (i, bullet) in self.bullets.iter_mut().enumerate() {
            let actions = bullet.update(&targets);
            if !actions.is_empty() {
                bullet_actions.push((i, actions));
            }
        }

        for (i, actions) in bullet_actions {
            for action in actions {
                self.apply_bullet_action(i, action);
            }
        }

        let mut spawned = Vec::new();
        let mut shielded = Vec::new();
        for (id, actions) in actor_actions {
            for action in actions {
                self.apply_actor_action(id, action, &mut spawned, &mut shielded);
            }
        }

        self.resolve_contacts(&shielded);

        self.bullets.extend(spawned);
        let before = self.bullets.len();
        self.bullets.retain(|b| !b.destroyed);
        let removed = before - self.bullets.len();

        if removed > 0 || !self.events.is_empty() {
            log::debug!(
                "Tick {}: {} bullets live, {} removed, {} events",
                self.time_ticks,
                self.bullets.len(),
                removed,
                self.events.len()
            );
        }
    }

    fn apply_bullet_action(&mut self, index: usize, action: Action) {
        match action {
            Action::FindNearestActor(kind) => {
                let pos = self.bullets[index].position();
                let target = self.find_nearest(kind, pos);
                self.bullets[index].set_target(target);
            }
            other => log::debug!("Ignoring {} action from a bullet", other.name()),
        }
    }

    fn apply_actor_action(
        &mut self,
        id: ActorId,
        action: Action,
        spawned: &mut Vec<Bullet>,
        shielded: &mut Vec<ActorId>,
    ) {
        match action {
            Action::SpawnBullets(mut bullets) => {
                for b in &mut bullets {
                    b.timeline_cap = b.timeline_cap.or(self.config.timeline_cap);
                }
                self.events.push(WorldEvent::BulletsSpawned {
                    spawner: id,
                    count: bullets.len(),
                });
                spawned.extend(bullets);
            }
            Action::Shield => shielded.push(id),
            Action::FindNearestActor(_) => {
                log::debug!("Ignoring find_nearest_actor from actor {:?}", id);
            }
            Action::Move { delta } => {
                let Some(idx) = self.actor_index(id) else { return };
                let actor = &mut self.actors[idx];
                let moved = actor.shape().translated(delta);
                if !self.map.collides(&moved) {
                    let pos = actor.position() + delta;
                    actor.set_position(pos);
                }
            }
            Action::Reflect { offset } => {
                let Some(field) = self.field(id, offset) else { return };
                for b in self.bullets.iter_mut().filter(|b| !b.destroyed) {
                    if field.collides(&b.collision_shape()) {
                        b.reflect();
                    }
                }
            }
            Action::Deflect { offset, angle } => {
                let Some(field) = self.field(id, offset.unwrap_or(Vec2::ZERO)) else {
                    return;
                };
                let center = field.position();
                let mode = self.config.deflect_mode;
                for b in self.bullets.iter_mut().filter(|b| !b.destroyed) {
                    if field.collides(&b.collision_shape()) {
                        let angle = angle.unwrap_or_else(|| angle_toward(center, b.position()));
                        b.deflect_with(mode, angle);
                    }
                }
            }
        }
    }

    /// Reflect/deflect field around an actor
    fn field(&self, id: ActorId, offset: Vec2) -> Option<Shape> {
        let actor = self.actor(id)?;
        Some(Shape::Circle(Circle::new(
            actor.position() + offset,
            self.config.reflect_radius,
        )))
    }

    fn resolve_contacts(&mut self, shielded: &[ActorId]) {
        let viewport = self.config.viewport;
        for bullet in self.bullets.iter_mut().filter(|b| !b.destroyed) {
            let shape = bullet.collision_shape();
            if bullet.out_of_bounds(&viewport) || self.map.collides(&shape) {
                bullet.destroyed = true;
                continue;
            }

            // Reflected and deflected bullets no longer threaten players
            let harmless = bullet.is_reflected() || bullet.is_deflected();
            for actor in self.actors.iter().filter(|a| a.kind() == ActorKind::Player) {
                if !actor.shape().collides(&shape) {
                    continue;
                }
                let id = actor.id();
                if shielded.contains(&id) {
                    bullet.destroyed = true;
                    self.events.push(WorldEvent::BulletAbsorbed { actor: id });
                    break;
                }
                if !harmless {
                    bullet.destroyed = true;
                    self.events.push(WorldEvent::PlayerHit { actor: id });
                    break;
                }
            }
        }
    }
}
