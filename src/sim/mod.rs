//! Deterministic simulation module
//!
//! All pattern logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one `tick` per frame)
//! - Seeded RNG only (one stream per bullet group)
//! - Stable iteration order (insertion order of actors and bullets)
//! - No rendering or platform dependencies

pub mod action;
pub mod actor;
pub mod bullet;
pub mod group;
pub mod map;
pub mod shape;
pub mod spawner;
pub mod world;

pub use action::Action;
pub use actor::{Actor, ActorId, ActorKind, ImpulseSet, PlayerCharacter, PlayerId};
pub use bullet::{Bullet, BulletStyle, NoTargets, Rgba, Snapshot, TargetLookup, WHITE};
pub use group::{AngleMode, BulletGroup, LoopCount};
pub use map::{ActorDef, Cell, Layer, MapDef, TileMap, WALL};
pub use shape::{Circle, Rect, Shape};
pub use spawner::{Spawner, group_seed};
pub use world::{World, WorldEvent};
