/*
 * Point Module
 *
 * A small f64 2D vector used for positions, velocities and forces, plus the
 * toroidal domain that turns raw differences into shortest displacements.
 * The simulation core keeps its own double precision type; nannou's f32
 * vectors are only used at the drawing boundary.
 */

use std::ops::{Add, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    // Build a vector of the given length pointing along `angle` (radians)
    pub fn from_polar(length: f64, angle: f64) -> Self {
        Self::new(length * angle.cos(), length * angle.sin())
    }

    // Euclidean length
    pub fn magnitude(self) -> f64 {
        self.x.hypot(self.y)
    }

    // Euclidean distance, ignoring wraparound
    pub fn distance(self, other: Point) -> f64 {
        (self - other).magnitude()
    }

    pub fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    // z component of the 3D cross product; positive when `other` is
    // counter-clockwise from `self`
    pub fn cross(self, other: Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, c: f64) -> Point {
        Point::new(self.x * c, self.y * c)
    }
}

impl Mul<Point> for f64 {
    type Output = Point;

    fn mul(self, p: Point) -> Point {
        p * self
    }
}

impl Div<f64> for Point {
    type Output = Point;

    // Dividing by zero is a programmer error, never a silent infinity
    fn div(self, c: f64) -> Point {
        assert!(c != 0.0, "division of a point by zero");
        Point::new(self.x / c, self.y / c)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl std::iter::Sum for Point {
    fn sum<I: Iterator<Item = Point>>(iter: I) -> Point {
        iter.fold(Point::ZERO, |acc, p| acc + p)
    }
}

/// Rectangular domain `[0, width) × [0, height)` whose edges wrap around.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Torus {
    pub width: f64,
    pub height: f64,
}

impl Torus {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Shortest displacement `to - from` on the wrapped plane.
    ///
    /// Each axis is shifted by one extent when the raw difference is longer
    /// than half of it.
    pub fn relative_position(&self, from: Point, to: Point) -> Point {
        Point::new(
            shortest_delta(to.x - from.x, self.width),
            shortest_delta(to.y - from.y, self.height),
        )
    }

    pub fn toroidal_distance(&self, p: Point, q: Point) -> f64 {
        self.relative_position(p, q).magnitude()
    }

    // Largest distance two points can have on this torus
    pub fn max_distance(&self) -> f64 {
        (self.width / 2.0).hypot(self.height / 2.0)
    }

    // Bring a point back into [0, width) × [0, height)
    pub fn wrap(&self, p: Point) -> Point {
        Point::new(wrap_axis(p.x, self.width), wrap_axis(p.y, self.height))
    }

    pub fn contains(&self, p: Point) -> bool {
        (0.0..self.width).contains(&p.x) && (0.0..self.height).contains(&p.y)
    }
}

#[inline]
fn shortest_delta(delta: f64, extent: f64) -> f64 {
    let half = extent / 2.0;
    if delta > half {
        delta - extent
    } else if delta < -half {
        delta + extent
    } else {
        delta
    }
}

#[inline]
fn wrap_axis(value: f64, extent: f64) -> f64 {
    // rem_euclid can round up to `extent` for tiny negative inputs
    let wrapped = value.rem_euclid(extent);
    if wrapped >= extent {
        0.0
    } else {
        wrapped
    }
}
