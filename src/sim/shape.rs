//! Minimal 2D shapes and intersection tests
//!
//! Circles are positioned by their center, rectangles by their top-left
//! corner (screen coordinates, y grows downward).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A circle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    /// Unchecked; `radius` must be non-negative
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Rejects negative or NaN radii
    pub fn checked(center: Vec2, radius: f32) -> Result<Self, ConfigError> {
        if !(radius >= 0.0) {
            return Err(ConfigError::NegativeRadius(radius));
        }
        Ok(Self::new(center, radius))
    }

    /// Axis-aligned bounding box
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.radius,
            self.center.y - self.radius,
            self.radius * 2.0,
            self.radius * 2.0,
        )
    }

    pub fn intersects_circle(&self, other: &Circle) -> bool {
        let reach = self.radius + other.radius;
        self.center.distance_squared(other.center) < reach * reach
    }

    /// Closest-point test against an axis-aligned rectangle
    pub fn intersects_rect(&self, rect: &Rect) -> bool {
        let closest = self.center.clamp(rect.min(), rect.max());
        self.center.distance_squared(closest) < self.radius * self.radius
    }
}

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Unchecked; `width` and `height` must be non-negative
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rejects negative or NaN extents
    pub fn checked(x: f32, y: f32, width: f32, height: f32) -> Result<Self, ConfigError> {
        if !(width >= 0.0) || !(height >= 0.0) {
            return Err(ConfigError::NegativeSize { width, height });
        }
        Ok(Self::new(x, y, width, height))
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y + self.height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Edges count as inside
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    pub fn intersects_rect(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

/// Any collidable shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle(Circle),
    Rect(Rect),
}

impl Shape {
    /// Reference point used for grid lookups (circle center, rectangle origin)
    pub fn position(&self) -> Vec2 {
        match self {
            Shape::Circle(c) => c.center,
            Shape::Rect(r) => r.min(),
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Circle(c) => c.bounds(),
            Shape::Rect(r) => *r,
        }
    }

    /// Same shape moved by `delta`
    pub fn translated(&self, delta: Vec2) -> Shape {
        match self {
            Shape::Circle(c) => Shape::Circle(Circle::new(c.center + delta, c.radius)),
            Shape::Rect(r) => Shape::Rect(Rect::new(r.x + delta.x, r.y + delta.y, r.width, r.height)),
        }
    }

    pub fn collides(&self, other: &Shape) -> bool {
        match (self, other) {
            (Shape::Circle(a), Shape::Circle(b)) => a.intersects_circle(b),
            (Shape::Circle(c), Shape::Rect(r)) | (Shape::Rect(r), Shape::Circle(c)) => {
                c.intersects_rect(r)
            }
            (Shape::Rect(a), Shape::Rect(b)) => a.intersects_rect(b),
        }
    }
}

impl From<Circle> for Shape {
    fn from(c: Circle) -> Self {
        Shape::Circle(c)
    }
}

impl From<Rect> for Shape {
    fn from(r: Rect) -> Self {
        Shape::Rect(r)
    }
}
