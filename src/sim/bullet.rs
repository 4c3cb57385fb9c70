//! A single projectile
//!
//! Each tick a bullet integrates speed/acceleration/jerk along its heading,
//! records a snapshot of itself, and optionally homes in on a target actor.
//! A reflected bullet instead walks its snapshot timeline backwards until it
//! is exhausted, then resumes forward flight from the oldest snapshot.

use std::collections::{HashMap, VecDeque};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::action::Action;
use super::actor::{ActorId, ActorKind};
use super::shape::{Circle, Rect, Shape};
use crate::config::DeflectMode;
use crate::error::ConfigError;
use crate::{angle_toward, heading};

/// How a bullet is drawn; has no effect on physics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulletStyle {
    /// Plain dot
    #[default]
    Circular,
    /// Chevrons on both ends
    Directional,
    /// Chevron on the leading edge
    Vector,
}

impl BulletStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            BulletStyle::Circular => "circular",
            BulletStyle::Directional => "directional",
            BulletStyle::Vector => "vector",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.to_lowercase().as_str() {
            "circular" => Ok(BulletStyle::Circular),
            "directional" => Ok(BulletStyle::Directional),
            "vector" => Ok(BulletStyle::Vector),
            _ => Err(ConfigError::UnknownBulletStyle(s.to_string())),
        }
    }
}

/// RGBA color
pub type Rgba = [u8; 4];

pub const WHITE: Rgba = [255, 255, 255, 255];

/// One recorded tick of a bullet's flight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub pos: Vec2,
    pub speed: f32,
    pub angle: f32,
    pub acceleration: f32,
    pub aim_delay: u32,
    pub aim_duration: u32,
}

/// Resolves a target handle to the target's current bounds
pub trait TargetLookup {
    /// `None` if the actor no longer exists
    fn target_bounds(&self, id: ActorId) -> Option<Rect>;
}

impl TargetLookup for HashMap<ActorId, Rect> {
    fn target_bounds(&self, id: ActorId) -> Option<Rect> {
        self.get(&id).copied()
    }
}

/// Lookup with no actors in it
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTargets;

impl TargetLookup for NoTargets {
    fn target_bounds(&self, _id: ActorId) -> Option<Rect> {
        None
    }
}

/// A projectile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub shape: Circle,
    pub style: BulletStyle,
    pub color: Rgba,
    /// Distance per tick
    pub speed: f32,
    /// Heading in radians
    pub angle: f32,
    /// Added to speed every tick
    pub acceleration: f32,
    /// Added to acceleration every tick
    pub jerk: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    /// Added to angle every tick while not homing
    pub angular_velocity: f32,
    /// Ticks before homing may start
    pub aim_delay: u32,
    /// Ticks of homing remaining
    pub aim_duration: u32,
    /// Maximum retained timeline depth (None = unbounded)
    pub timeline_cap: Option<usize>,
    /// Set by the owner when the bullet should be removed
    pub destroyed: bool,
    target: Option<ActorId>,
    reflected: bool,
    deflected: bool,
    hold_for: u32,
    timeline: VecDeque<Snapshot>,
}

impl Bullet {
    /// A motionless bullet with no speed limits
    pub fn new(pos: Vec2, radius: f32) -> Result<Self, ConfigError> {
        Ok(Self {
            shape: Circle::checked(pos, radius)?,
            style: BulletStyle::Circular,
            color: WHITE,
            speed: 0.0,
            angle: 0.0,
            acceleration: 0.0,
            jerk: 0.0,
            min_speed: 0.0,
            max_speed: f32::INFINITY,
            angular_velocity: 0.0,
            aim_delay: 0,
            aim_duration: 0,
            timeline_cap: None,
            destroyed: false,
            target: None,
            reflected: false,
            deflected: false,
            hold_for: 0,
            timeline: VecDeque::new(),
        })
    }

    pub fn with_style(mut self, style: BulletStyle, color: Rgba) -> Self {
        self.style = style;
        self.color = color;
        self
    }

    pub fn with_motion(mut self, speed: f32, angle: f32) -> Self {
        self.speed = speed;
        self.angle = angle;
        self
    }

    pub fn with_acceleration(mut self, acceleration: f32, jerk: f32) -> Self {
        self.acceleration = acceleration;
        self.jerk = jerk;
        self
    }

    pub fn with_speed_limits(mut self, min_speed: f32, max_speed: f32) -> Self {
        self.min_speed = min_speed;
        self.max_speed = max_speed;
        self
    }

    pub fn with_angular_velocity(mut self, angular_velocity: f32) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    /// Wait `delay` ticks, then home in for `duration` ticks
    pub fn with_aim(mut self, delay: u32, duration: u32) -> Self {
        self.aim_delay = delay;
        self.aim_duration = duration;
        self
    }

    pub fn with_timeline_cap(mut self, cap: Option<usize>) -> Self {
        self.timeline_cap = cap;
        self
    }

    /// Fresh copy of this bullet's tunables with a new heading.
    ///
    /// Transient state (timeline, target, flags, hold) is not carried over.
    pub fn from_template(&self, angle: f32) -> Bullet {
        Bullet {
            shape: self.shape,
            style: self.style,
            color: self.color,
            speed: self.speed,
            angle,
            acceleration: self.acceleration,
            jerk: self.jerk,
            min_speed: self.min_speed,
            max_speed: self.max_speed,
            angular_velocity: self.angular_velocity,
            aim_delay: self.aim_delay,
            aim_duration: self.aim_duration,
            timeline_cap: self.timeline_cap,
            destroyed: false,
            target: None,
            reflected: false,
            deflected: false,
            hold_for: 0,
            timeline: VecDeque::new(),
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.shape.center
    }

    pub fn set_position(&mut self, pos: Vec2) {
        self.shape.center = pos;
    }

    pub fn collision_shape(&self) -> Shape {
        Shape::Circle(self.shape)
    }

    pub fn target(&self) -> Option<ActorId> {
        self.target
    }

    /// Bind (or clear) the homing target
    pub fn set_target(&mut self, target: Option<ActorId>) {
        self.target = target;
    }

    pub fn is_reflected(&self) -> bool {
        self.reflected
    }

    pub fn is_deflected(&self) -> bool {
        self.deflected
    }

    pub fn timeline_len(&self) -> usize {
        self.timeline.len()
    }

    pub fn timeline(&self) -> impl Iterator<Item = &Snapshot> {
        self.timeline.iter()
    }

    pub fn hold_for(&self) -> u32 {
        self.hold_for
    }

    /// Freeze the bullet in place for `ticks` updates
    pub fn hold(&mut self, ticks: u32) {
        self.hold_for = ticks;
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            pos: self.shape.center,
            speed: self.speed,
            angle: self.angle,
            acceleration: self.acceleration,
            aim_delay: self.aim_delay,
            aim_duration: self.aim_duration,
        }
    }

    fn record(&mut self) {
        self.timeline.push_back(self.snapshot());
        if let Some(cap) = self.timeline_cap {
            while self.timeline.len() > cap {
                self.timeline.pop_front();
            }
        }
    }

    /// Advance one tick
    pub fn update<T: TargetLookup + ?Sized>(&mut self, targets: &T) -> Vec<Action> {
        // Rewind finished: resume from where the flight was first recorded
        if self.reflected && self.timeline.len() == 1 {
            if let Some(first) = self.timeline.pop_front() {
                self.speed = first.speed;
                self.angle = first.angle;
                self.acceleration = first.acceleration;
                self.aim_delay = first.aim_delay;
                self.aim_duration = first.aim_duration;
            }
        }

        if self.hold_for > 0 {
            self.hold_for -= 1;
            return Vec::new();
        }

        if self.reflected {
            if let Some(prev) = self.timeline.pop_back() {
                self.speed = prev.speed;
                // Travel toward the recorded position, but face the recorded heading
                let pos = self.shape.center;
                if pos.distance_squared(prev.pos) > f32::EPSILON {
                    self.shape.center += heading(angle_toward(pos, prev.pos)) * self.speed;
                }
                self.angle = prev.angle;
                return Vec::new();
            }
            self.reflected = false;
        }

        self.speed += self.acceleration;
        self.acceleration += self.jerk;
        if self.speed < self.min_speed {
            self.speed = self.min_speed;
        }
        if self.speed > self.max_speed {
            self.speed = self.max_speed;
        }
        self.shape.center += heading(self.angle) * self.speed;

        if self.aim_delay > 0 {
            self.aim_delay -= 1;
        }

        self.record();

        if self.aim_delay > 0 || self.aim_duration == 0 {
            self.angle += self.angular_velocity;
            return Vec::new();
        }

        // Homing locks out spin
        self.angular_velocity = 0.0;
        let bounds = self.target.and_then(|id| targets.target_bounds(id));
        match bounds {
            Some(bounds) => {
                self.angle = angle_toward(self.shape.center, bounds.center());
                self.aim_duration -= 1;
                Vec::new()
            }
            None => {
                if let Some(lost) = self.target.take() {
                    log::debug!("Bullet target {:?} is gone, requesting a new one", lost);
                }
                vec![Action::FindNearestActor(ActorKind::Player)]
            }
        }
    }

    /// Start replaying the timeline backwards. No-op if already reflected.
    pub fn reflect(&mut self) {
        if self.reflected {
            return;
        }
        self.aim_duration = 0;
        self.reflected = true;
    }

    /// Replace the heading with `angle`. No-op if already deflected.
    pub fn deflect(&mut self, angle: f32) {
        self.deflect_with(DeflectMode::Absolute, angle);
    }

    /// Deflect using the given interpretation of `angle`.
    ///
    /// `Relative` treats `angle` as the deflecting surface's normal and mirrors
    /// the incoming heading about it; a bullet already moving away from the
    /// surface keeps its heading.
    pub fn deflect_with(&mut self, mode: DeflectMode, angle: f32) {
        if self.deflected {
            return;
        }
        self.aim_duration = 0;
        self.angle = match mode {
            DeflectMode::Absolute => angle,
            DeflectMode::Relative => {
                let dir = heading(self.angle);
                let normal = heading(angle);
                let along = dir.dot(normal);
                if along < 0.0 {
                    let out = dir - 2.0 * along * normal;
                    out.y.atan2(out.x)
                } else {
                    self.angle
                }
            }
        };
        self.deflected = true;
    }

    /// True if the bullet's center lies outside `viewport`
    pub fn out_of_bounds(&self, viewport: &Rect) -> bool {
        !viewport.contains_point(self.shape.center)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    const EPS: f32 = 0.0001;

    fn bullet() -> Bullet {
        Bullet::new(Vec2::ZERO, 3.0).unwrap()
    }

    fn tick(b: &mut Bullet, n: usize) {
        for _ in 0..n {
            b.update(&NoTargets);
        }
    }

    #[test]
    fn test_rejects_negative_radius() {
        assert!(matches!(
            Bullet::new(Vec2::ZERO, -1.0),
            Err(ConfigError::NegativeRadius(_))
        ));
        assert!(Bullet::new(Vec2::ZERO, f32::NAN).is_err());
    }

    #[test]
    fn test_acceleration_clamped_after_add() {
        // add -> clamp -> move: speeds 1,2,3,4,5
        let mut b = bullet().with_acceleration(1.0, 0.0).with_speed_limits(0.0, 5.0);
        tick(&mut b, 5);
        assert!((b.speed - 5.0).abs() < EPS);
        assert!((b.position().x - 15.0).abs() < EPS);
        assert!(b.position().y.abs() < EPS);

        // Clamped from here on
        tick(&mut b, 1);
        assert!((b.speed - 5.0).abs() < EPS);
        assert!((b.position().x - 20.0).abs() < EPS);
    }

    #[test]
    fn test_jerk_grows_acceleration() {
        let mut b = bullet().with_acceleration(0.0, 0.5);
        tick(&mut b, 3);
        // accel: 0 -> 0.5 -> 1.0 -> 1.5, speed: 0 -> 0 -> 0.5 -> 1.5
        assert!((b.acceleration - 1.5).abs() < EPS);
        assert!((b.speed - 1.5).abs() < EPS);
    }

    #[test]
    fn test_min_speed_floor() {
        let mut b = bullet()
            .with_motion(5.0, FRAC_PI_2)
            .with_acceleration(-2.0, 0.0)
            .with_speed_limits(1.0, 10.0);
        tick(&mut b, 4);
        assert!((b.speed - 1.0).abs() < EPS);
        // 3 + 1 + 1 + 1 downward
        assert!((b.position().y - 6.0).abs() < EPS);
    }

    #[test]
    fn test_timeline_grows_each_forward_tick() {
        let mut b = bullet().with_motion(2.0, 0.0);
        for n in 1..=10 {
            b.update(&NoTargets);
            assert_eq!(b.timeline_len(), n);
        }
    }

    #[test]
    fn test_reflection_replays_then_resumes() {
        let mut b = bullet().with_motion(2.0, 0.0);
        let n = 6;
        tick(&mut b, n);
        assert!((b.position().x - 12.0).abs() < EPS);

        b.reflect();
        for remaining in (1..n).rev() {
            b.update(&NoTargets);
            assert!(b.is_reflected());
            assert_eq!(b.timeline_len(), remaining);
        }
        // Walked back to the second recorded position
        assert!((b.position().x - 4.0).abs() < EPS);

        // Last snapshot is consumed by the restore; forward flight resumes
        b.update(&NoTargets);
        assert!(!b.is_reflected());
        assert_eq!(b.timeline_len(), 1);
        assert!((b.angle - 0.0).abs() < EPS);
        assert!((b.position().x - 6.0).abs() < EPS);
    }

    #[test]
    fn test_resume_restores_motion_and_aim_from_oldest_snapshot() {
        let mut b = bullet()
            .with_motion(1.0, 0.0)
            .with_acceleration(0.5, 0.25)
            .with_aim(3, 4);
        // Recorded: (speed, accel, delay) = (1.5, 0.75, 2), (2.25, 1.0, 1), (3.25, 1.25, 0)
        tick(&mut b, 3);
        assert_eq!(b.timeline().next().map(|s| s.aim_delay), Some(2));
        assert_eq!(b.acceleration, 1.25);

        b.reflect();
        assert_eq!(b.aim_duration, 0);
        tick(&mut b, 2);
        assert!(b.is_reflected());
        assert_eq!(b.timeline_len(), 1);

        // Restore (1.5, 0.75, delay 2, duration 4) then one forward step
        let actions = b.update(&NoTargets);
        assert!(actions.is_empty());
        assert!(!b.is_reflected());
        assert_eq!(b.speed, 2.25);
        assert_eq!(b.acceleration, 1.0);
        assert_eq!(b.aim_delay, 1);
        assert_eq!(b.aim_duration, 4);

        // Homing comes back once the restored delay runs out
        let actions = b.update(&NoTargets);
        assert_eq!(actions, vec![Action::FindNearestActor(ActorKind::Player)]);
        assert_eq!(b.aim_duration, 4);
    }

    #[test]
    fn test_replay_keeps_recorded_heading() {
        let mut b = bullet().with_motion(1.0, 0.0).with_angular_velocity(0.1);
        tick(&mut b, 4);
        let recorded: Vec<f32> = b.timeline().map(|s| s.angle).collect();
        b.reflect();
        b.update(&NoTargets);
        assert!((b.angle - recorded[3]).abs() < EPS);
        b.update(&NoTargets);
        assert!((b.angle - recorded[2]).abs() < EPS);
    }

    #[test]
    fn test_reflect_is_idempotent() {
        let mut once = bullet().with_motion(1.0, 0.3).with_aim(0, 5);
        tick(&mut once, 3);
        let mut twice = once.clone();
        once.reflect();
        twice.reflect();
        twice.reflect();
        assert_eq!(once, twice);
        assert_eq!(once.aim_duration, 0);
    }

    #[test]
    fn test_deflect_is_idempotent_and_absolute() {
        let mut b = bullet().with_motion(1.0, 0.3).with_aim(0, 5);
        b.deflect(PI);
        assert!((b.angle - PI).abs() < EPS);
        assert_eq!(b.aim_duration, 0);
        assert!(b.is_deflected());

        let before = b.clone();
        b.deflect(0.5);
        assert_eq!(b, before);
    }

    #[test]
    fn test_relative_deflect_mirrors_incoming_heading() {
        // Moving right into a wall facing left
        let mut b = bullet().with_motion(1.0, 0.0);
        b.deflect_with(DeflectMode::Relative, PI);
        assert!(b.angle.cos() < -0.999);

        // 45 degrees down-right off a floor facing up
        let mut b = bullet().with_motion(1.0, PI / 4.0);
        b.deflect_with(DeflectMode::Relative, -FRAC_PI_2);
        assert!((b.angle - (-PI / 4.0)).abs() < EPS);

        // Already moving away from the surface
        let mut b = bullet().with_motion(1.0, 0.0);
        b.deflect_with(DeflectMode::Relative, 0.0);
        assert!(b.angle.abs() < EPS);
        assert!(b.is_deflected());
    }

    #[test]
    fn test_hold_freezes_motion() {
        let mut b = bullet().with_motion(3.0, 0.0);
        b.hold(2);
        tick(&mut b, 2);
        assert_eq!(b.position(), Vec2::ZERO);
        assert_eq!(b.timeline_len(), 0);
        assert_eq!(b.hold_for(), 0);
        tick(&mut b, 1);
        assert!((b.position().x - 3.0).abs() < EPS);
    }

    #[test]
    fn test_spin_until_aim_delay_expires() {
        let mut b = bullet()
            .with_motion(1.0, 0.0)
            .with_angular_velocity(0.25)
            .with_aim(2, 3);

        let actions = b.update(&NoTargets);
        assert!(actions.is_empty());
        assert!((b.angle - 0.25).abs() < EPS);

        // Delay hits zero this tick: homing takes over
        let actions = b.update(&NoTargets);
        assert_eq!(actions, vec![Action::FindNearestActor(ActorKind::Player)]);
        assert_eq!(b.angular_velocity, 0.0);
        assert!((b.angle - 0.25).abs() < EPS);
        // No target, no aim spent
        assert_eq!(b.aim_duration, 3);
    }

    #[test]
    fn test_homing_points_at_target_center() {
        let target = ActorId(7);
        let mut lookup = HashMap::new();
        lookup.insert(target, Rect::new(96.0, 96.0, 8.0, 8.0));

        let mut b = bullet().with_motion(1.0, 0.0).with_aim(0, 2);
        b.set_target(Some(target));

        b.update(&lookup);
        let expected = angle_toward(b.position(), Vec2::new(100.0, 100.0));
        assert!((b.angle - expected).abs() < EPS);
        assert_eq!(b.aim_duration, 1);

        b.update(&lookup);
        assert_eq!(b.aim_duration, 0);

        // Homing over: heading now only changes by spin (which is zero)
        let angle = b.angle;
        b.update(&lookup);
        assert!((b.angle - angle).abs() < EPS);
    }

    #[test]
    fn test_homing_locks_out_angular_velocity() {
        let target = ActorId(1);
        let mut lookup = HashMap::new();
        lookup.insert(target, Rect::new(0.0, 50.0, 2.0, 2.0));

        let mut b = bullet()
            .with_motion(1.0, 0.0)
            .with_angular_velocity(1.0)
            .with_aim(0, 10);
        b.set_target(Some(target));
        for _ in 0..10 {
            b.update(&lookup);
            assert_eq!(b.angular_velocity, 0.0);
            let expected = angle_toward(b.position(), Vec2::new(1.0, 51.0));
            assert!((b.angle - expected).abs() < EPS);
        }
        assert_eq!(b.aim_duration, 0);
    }

    #[test]
    fn test_lost_target_is_requested_again() {
        let mut b = bullet().with_motion(1.0, 0.0).with_aim(0, 4);
        b.set_target(Some(ActorId(99)));
        let actions = b.update(&NoTargets);
        assert_eq!(actions, vec![Action::FindNearestActor(ActorKind::Player)]);
        assert_eq!(b.target(), None);
        assert_eq!(b.aim_duration, 4);
    }

    #[test]
    fn test_reflect_cancels_homing() {
        let mut b = bullet().with_motion(1.0, 0.0).with_aim(0, 10);
        b.reflect();
        assert_eq!(b.aim_duration, 0);
        // Empty timeline: reflection ends immediately and the bullet flies on
        let actions = b.update(&NoTargets);
        assert!(actions.is_empty());
        assert!(!b.is_reflected());
        assert!((b.position().x - 1.0).abs() < EPS);
    }

    #[test]
    fn test_template_copy_resets_transient_state() {
        let mut template = bullet()
            .with_style(BulletStyle::Vector, [255, 0, 255, 255])
            .with_motion(5.0, 1.0)
            .with_acceleration(0.1, 0.01)
            .with_speed_limits(1.0, 9.0)
            .with_angular_velocity(0.2)
            .with_aim(3, 4)
            .with_timeline_cap(Some(8));
        tick(&mut template, 3);
        template.reflect();
        template.deflect(2.0);
        template.hold(5);
        template.set_target(Some(ActorId(3)));
        template.destroyed = true;

        let copy = template.from_template(0.75);
        assert_eq!(copy.angle, 0.75);
        assert_eq!(copy.style, BulletStyle::Vector);
        assert_eq!(copy.color, [255, 0, 255, 255]);
        assert_eq!(copy.speed, template.speed);
        assert_eq!(copy.jerk, 0.01);
        assert_eq!(copy.max_speed, 9.0);
        assert_eq!(copy.timeline_cap, Some(8));
        assert_eq!(copy.timeline_len(), 0);
        assert_eq!(copy.hold_for(), 0);
        assert_eq!(copy.target(), None);
        assert!(!copy.is_reflected() && !copy.is_deflected() && !copy.destroyed);
    }

    #[test]
    fn test_timeline_cap_shortens_replay() {
        // Bounded history trades replay depth for memory on long flights
        let mut capped = bullet().with_motion(1.0, 0.0).with_timeline_cap(Some(3));
        let mut unbounded = bullet().with_motion(1.0, 0.0);
        tick(&mut capped, 10);
        tick(&mut unbounded, 10);
        assert_eq!(capped.timeline_len(), 3);
        assert_eq!(unbounded.timeline_len(), 10);

        capped.reflect();
        unbounded.reflect();
        tick(&mut capped, 3);
        tick(&mut unbounded, 3);
        assert!(!capped.is_reflected());
        assert!(unbounded.is_reflected());
    }

    #[test]
    fn test_out_of_bounds() {
        let viewport = Rect::new(0.0, 0.0, 100.0, 100.0);
        let mut b = Bullet::new(Vec2::new(50.0, 50.0), 2.0).unwrap();
        assert!(!b.out_of_bounds(&viewport));
        b.set_position(Vec2::new(-1.0, 50.0));
        assert!(b.out_of_bounds(&viewport));
        b.set_position(Vec2::new(50.0, 100.5));
        assert!(b.out_of_bounds(&viewport));
    }

    proptest! {
        #[test]
        fn prop_speed_stays_clamped(
            speed in -20.0f32..20.0,
            accel in -3.0f32..3.0,
            jerk in -0.5f32..0.5,
            min in 0.0f32..5.0,
            span in 0.0f32..10.0,
            ticks in 1usize..60,
        ) {
            let max = min + span;
            let mut b = bullet()
                .with_motion(speed, 0.0)
                .with_acceleration(accel, jerk)
                .with_speed_limits(min, max);
            for _ in 0..ticks {
                b.update(&NoTargets);
                prop_assert!(b.speed >= min && b.speed <= max);
            }
        }

        #[test]
        fn prop_reflect_twice_equals_once(ticks in 0usize..20, angle in -PI..PI) {
            let mut once = bullet().with_motion(1.5, angle).with_aim(1, 3);
            tick(&mut once, ticks);
            let mut twice = once.clone();
            once.reflect();
            twice.reflect();
            twice.reflect();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_forward_ticks_fill_timeline_and_replay_drains_it(n in 1usize..40) {
            let mut b = bullet().with_motion(1.0, 0.5);
            tick(&mut b, n);
            prop_assert_eq!(b.timeline_len(), n);
            b.reflect();
            for _ in 0..n - 1 {
                b.update(&NoTargets);
                prop_assert!(b.is_reflected());
            }
            b.update(&NoTargets);
            prop_assert!(!b.is_reflected());
        }
    }
}
