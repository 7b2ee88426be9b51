// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Circles and the boundary proxies they are placed against.
//!
//! Placement anchors come in three kinds:
//! - [`Circle`]: a placed disc, or the undrawn inner wall of an annulus
//! - [`Outside`]: the outer wall of an annulus (circle of radius `r` at the origin)
//! - [`ThetaRay`]: the angular wall of a segment, a ray at angle `theta`
//!   running from `r0` out to `r1`
//!
//! A packing run owns all of its anchors in a [`ShapeArena`]. A circle built by
//! the tangency solver records the [`ShapeId`]s it was built against in
//! `touching`; those ids only have meaning inside the arena that built it.

use crate::geometry::constants::EPS;
use crate::geometry::point::{polar_distance, Point};

/// Index of a shape in its [`ShapeArena`].
pub type ShapeId = usize;

/// A disc of radius `r`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub r: f64,

    /// Element order of the conjugacy class; `None` for walls.
    pub order: Option<u64>,

    pub center: Point,

    /// The anchors this circle was constructed tangent to.
    pub touching: [Option<ShapeId>; 2],
}

impl Circle {
    pub fn new(r: f64, order: Option<u64>, center: Point) -> Self {
        debug_assert!(r > 0.0, "circle radius must be positive: {}", r);
        Self {
            r,
            order,
            center,
            touching: [None, None],
        }
    }

    /// The inner wall of an annulus: a circle of radius `r0` at the origin.
    pub fn wall(r0: f64) -> Self {
        Self::new(r0, None, Point::ORIGIN)
    }

    pub fn with_touching(mut self, a: ShapeId, b: ShapeId) -> Self {
        self.touching = [Some(a), Some(b)];
        self
    }

    /// Forget the construction anchors (they refer to a discarded arena).
    pub fn detached(mut self) -> Self {
        self.touching = [None, None];
        self
    }

    /// Distance of the center from the origin.
    pub fn radial(&self) -> f64 {
        self.center.radius()
    }

    pub fn theta(&self) -> f64 {
        self.center.theta()
    }

    pub fn is_touching(&self, id: ShapeId) -> bool {
        self.touching.contains(&Some(id))
    }

    /// Whether the whole disc lies in the annulus `[r0, r1]`.
    pub fn in_annulus(&self, r0: f64, r1: f64) -> bool {
        let radial = self.radial();
        radial >= r0 + self.r - EPS && radial <= r1 - self.r + EPS
    }

    /// Signed gap between the boundaries of two circles.
    pub fn distance_to_circle(&self, other: &Circle) -> f64 {
        self.center.distance(&other.center) - self.r - other.r
    }

    /// Signed gap from this circle to `shape`.
    ///
    /// Against a [`ThetaRay`] the value is the unsigned distance from the
    /// center to the ray, ignoring this circle's radius.
    pub fn distance(&self, shape: &Shape) -> f64 {
        match shape {
            Shape::Circle(other) => self.distance_to_circle(other),
            Shape::Outside(outside) => outside.distance(self),
            Shape::Ray(ray) => ray.distance(self),
        }
    }

    pub fn overlaps(&self, shape: &Shape) -> bool {
        self.distance(shape) < 0.0
    }
}

/// The outer wall of an annulus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outside {
    pub r: f64,
}

impl Outside {
    pub fn new(r: f64) -> Self {
        Self { r }
    }

    /// Room left between `circle` and this wall; negative means it pokes out.
    pub fn distance(&self, circle: &Circle) -> f64 {
        self.r - circle.radial() - circle.r
    }
}

/// The angular wall of a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThetaRay {
    pub r0: f64,
    pub r1: f64,
    pub theta: f64,
}

impl ThetaRay {
    pub fn new(r0: f64, r1: f64, theta: f64) -> Self {
        Self { r0, r1, theta }
    }

    /// Distance from the center of `circle` to the ray starting at radius `r0`.
    pub fn distance(&self, circle: &Circle) -> f64 {
        let radial = circle.radial();
        let delta = circle.theta() - self.theta;
        if radial * delta.cos() >= self.r0 {
            // Foot of the perpendicular lands on the ray.
            radial * delta.sin().abs()
        } else {
            polar_distance(radial, circle.theta(), self.r0, self.theta)
        }
    }
}

/// Any placement anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle(Circle),
    Outside(Outside),
    Ray(ThetaRay),
}

impl Shape {
    pub fn as_circle(&self) -> Option<&Circle> {
        match self {
            Shape::Circle(circle) => Some(circle),
            _ => None,
        }
    }
}

impl From<Circle> for Shape {
    fn from(circle: Circle) -> Self {
        Shape::Circle(circle)
    }
}

impl From<Outside> for Shape {
    fn from(outside: Outside) -> Self {
        Shape::Outside(outside)
    }
}

impl From<ThetaRay> for Shape {
    fn from(ray: ThetaRay) -> Self {
        Shape::Ray(ray)
    }
}

/// Owner of every anchor in one packing run.
#[derive(Debug, Clone, Default)]
pub struct ShapeArena {
    shapes: Vec<Shape>,
}

impl ShapeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, shape: impl Into<Shape>) -> ShapeId {
        self.shapes.push(shape.into());
        self.shapes.len() - 1
    }

    /// # Panics
    ///
    /// Panics if `id` was not handed out by this arena.
    pub fn get(&self, id: ShapeId) -> &Shape {
        &self.shapes[id]
    }

    pub fn circle(&self, id: ShapeId) -> Option<&Circle> {
        self.shapes.get(id).and_then(Shape::as_circle)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
