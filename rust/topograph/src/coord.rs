// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Coordinate and envelope value types.
//!
//! A [`Coordinate`] may carry a `z` ordinate, but every topological
//! comparison in this crate is 2D: equality, ordering and hashing only look
//! at `x` and `y`.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use nalgebra::Point2;

/// An immutable 2D point with an optional, topologically inert `z`.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub z: Option<f64>,
}

impl Coordinate {
    /// Creates a 2D coordinate.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    /// Creates a coordinate carrying a `z` value.
    pub const fn with_z(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }

    /// Returns `true` if both coordinates have the same `x` and `y`.
    pub fn equals_2d(&self, other: &Coordinate) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// Orders coordinates by `x`, then `y`.
    pub fn compare_2d(&self, other: &Coordinate) -> Ordering {
        CoordKey::from(*self).cmp(&CoordKey::from(*other))
    }

    /// Euclidean distance in the plane.
    pub fn distance(&self, other: &Coordinate) -> f64 {
        (self.to_point2() - other.to_point2()).norm()
    }

    /// Returns this coordinate as a nalgebra point (dropping `z`).
    pub fn to_point2(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.equals_2d(other)
    }
}

impl From<Point2<f64>> for Coordinate {
    fn from(p: Point2<f64>) -> Self {
        Coordinate::new(p.x, p.y)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((x, y): (f64, f64)) -> Self {
        Coordinate::new(x, y)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.z {
            Some(z) => write!(f, "({}, {}, {})", self.x, self.y, z),
            None => write!(f, "({}, {})", self.x, self.y),
        }
    }
}

/// Totally ordered, hashable 2D key for a coordinate.
///
/// `-0.0` is folded into `0.0` so the key agrees with `f64` equality.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CoordKey {
    x: f64,
    y: f64,
}

impl From<Coordinate> for CoordKey {
    fn from(c: Coordinate) -> Self {
        Self {
            x: c.x + 0.0,
            y: c.y + 0.0,
        }
    }
}

impl PartialEq for CoordKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CoordKey {}

impl PartialOrd for CoordKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CoordKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.x
            .total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
    }
}

impl Hash for CoordKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.to_bits().hash(state);
        self.y.to_bits().hash(state);
    }
}

/// Axis-aligned bounding box.
///
/// An envelope built from no points is empty; empty envelopes intersect
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Envelope {
    /// Creates an empty envelope.
    pub fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    /// Envelope of two corner points, in any order.
    pub fn of_points(a: &Coordinate, b: &Coordinate) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    /// Envelope of every coordinate in `coords`.
    pub fn from_coords(coords: &[Coordinate]) -> Self {
        let mut env = Self::empty();
        for c in coords {
            env.expand_to_include(c);
        }
        env
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x
    }

    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    pub fn width(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max_x - self.min_x
        }
    }

    pub fn height(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max_y - self.min_y
        }
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Grows the envelope to include `c`.
    pub fn expand_to_include(&mut self, c: &Coordinate) {
        self.min_x = self.min_x.min(c.x);
        self.min_y = self.min_y.min(c.y);
        self.max_x = self.max_x.max(c.x);
        self.max_y = self.max_y.max(c.y);
    }

    /// Grows the envelope to include another envelope.
    pub fn expand_to_include_envelope(&mut self, other: &Envelope) {
        if other.is_empty() {
            return;
        }
        self.min_x = self.min_x.min(other.min_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_x = self.max_x.max(other.max_x);
        self.max_y = self.max_y.max(other.max_y);
    }

    /// Returns `true` if the two envelopes share at least one point.
    pub fn intersects(&self, other: &Envelope) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        !(other.min_x > self.max_x
            || other.max_x < self.min_x
            || other.min_y > self.max_y
            || other.max_y < self.min_y)
    }

    /// Returns `true` if `c` lies inside or on the envelope.
    pub fn contains_point(&self, c: &Coordinate) -> bool {
        c.x >= self.min_x && c.x <= self.max_x && c.y >= self.min_y && c.y <= self.max_y
    }

    /// Returns `true` if `other` lies entirely inside or on this envelope.
    pub fn contains(&self, other: &Envelope) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        other.min_x >= self.min_x
            && other.max_x <= self.max_x
            && other.min_y >= self.min_y
            && other.max_y <= self.max_y
    }

    /// Same as [`contains`](Self::contains): boundaries count as covered.
    pub fn covers(&self, other: &Envelope) -> bool {
        self.contains(other)
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self::empty()
    }
}

/// Returns `true` if `q` lies in the bounding box of segment `p1`-`p2`.
pub(crate) fn in_segment_box(p1: &Coordinate, p2: &Coordinate, q: &Coordinate) -> bool {
    q.x >= p1.x.min(p2.x) && q.x <= p1.x.max(p2.x) && q.y >= p1.y.min(p2.y) && q.y <= p1.y.max(p2.y)
}

/// Returns `true` if the bounding boxes of segments `p1`-`p2` and `q1`-`q2` intersect.
pub(crate) fn segment_boxes_intersect(
    p1: &Coordinate,
    p2: &Coordinate,
    q1: &Coordinate,
    q2: &Coordinate,
) -> bool {
    Envelope::of_points(p1, p2).intersects(&Envelope::of_points(q1, q2))
}
