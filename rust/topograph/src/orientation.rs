// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Robust orientation predicates and ring classification.
//!
//! All words describing turning direction (clockwise, left, right) use a
//! y-down frame: x grows to the east and y grows *down*, as on a screen or a
//! raster. In that frame the ring `(0,0) (10,0) (10,10) (0,10)` runs
//! clockwise.
//!
//! The orientation test first tries a floating-point filter and falls back
//! to double-double arithmetic when the filter cannot certify the sign, so
//! the answer is exact for all finite inputs whose differences do not
//! overflow.

use nalgebra::Vector2;

use crate::coord::{in_segment_box, Coordinate};
use crate::label::Location;

/// Relative error bound of the floating-point orientation filter.
const DP_SAFE_EPSILON: f64 = 1e-15;

/// Turning direction of three points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Clockwise,
    Collinear,
    CounterClockwise,
}

impl Orientation {
    /// Reverses the turning direction.
    pub fn reverse(self) -> Self {
        match self {
            Orientation::Clockwise => Orientation::CounterClockwise,
            Orientation::CounterClockwise => Orientation::Clockwise,
            Orientation::Collinear => Orientation::Collinear,
        }
    }
}

/// Winding direction of a closed ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Winding {
    Clockwise,
    CounterClockwise,
}

/// Orientation of `q` relative to the directed segment `p1` -> `p2`.
pub fn orientation_index(p1: &Coordinate, p2: &Coordinate, q: &Coordinate) -> Orientation {
    let sign = match orientation_filter(p1, p2, q) {
        Some(sign) => sign,
        None => orientation_dd(p1, p2, q),
    };
    from_sign(sign)
}

fn from_sign(sign: i32) -> Orientation {
    match sign {
        s if s > 0 => Orientation::Clockwise,
        s if s < 0 => Orientation::CounterClockwise,
        _ => Orientation::Collinear,
    }
}

fn signum(v: f64) -> i32 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

/// Fast determinant sign, or `None` when round-off could flip it.
fn orientation_filter(pa: &Coordinate, pb: &Coordinate, pc: &Coordinate) -> Option<i32> {
    let detleft = (pa.x - pc.x) * (pb.y - pc.y);
    let detright = (pa.y - pc.y) * (pb.x - pc.x);
    let det = detleft - detright;

    let detsum = if detleft > 0.0 {
        if detright <= 0.0 {
            return Some(signum(det));
        }
        detleft + detright
    } else if detleft < 0.0 {
        if detright >= 0.0 {
            return Some(signum(det));
        }
        -detleft - detright
    } else {
        return Some(signum(det));
    };

    let errbound = DP_SAFE_EPSILON * detsum;
    if det >= errbound || -det >= errbound {
        return Some(signum(det));
    }
    None
}

fn orientation_dd(p1: &Coordinate, p2: &Coordinate, q: &Coordinate) -> i32 {
    let dx1 = DoubleDouble::diff(p2.x, p1.x);
    let dy1 = DoubleDouble::diff(p2.y, p1.y);
    let dx2 = DoubleDouble::diff(q.x, p2.x);
    let dy2 = DoubleDouble::diff(q.y, p2.y);
    dx1.mul(dy2).sub(dy1.mul(dx2)).signum()
}

/// Unevaluated sum `hi + lo` carrying roughly 106 bits of precision.
#[derive(Debug, Clone, Copy)]
struct DoubleDouble {
    hi: f64,
    lo: f64,
}

fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let bb = s - a;
    let err = (a - (s - bb)) + (b - bb);
    (s, err)
}

fn quick_two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let err = b - (s - a);
    (s, err)
}

fn two_prod(a: f64, b: f64) -> (f64, f64) {
    let p = a * b;
    let err = a.mul_add(b, -p);
    (p, err)
}

impl DoubleDouble {
    /// Exact `a - b`.
    fn diff(a: f64, b: f64) -> Self {
        let (hi, lo) = two_sum(a, -b);
        Self { hi, lo }
    }

    fn add(self, other: Self) -> Self {
        let (s, e) = two_sum(self.hi, other.hi);
        let e = e + self.lo + other.lo;
        let (hi, lo) = quick_two_sum(s, e);
        Self { hi, lo }
    }

    fn neg(self) -> Self {
        Self {
            hi: -self.hi,
            lo: -self.lo,
        }
    }

    fn sub(self, other: Self) -> Self {
        self.add(other.neg())
    }

    fn mul(self, other: Self) -> Self {
        let (p, e) = two_prod(self.hi, other.hi);
        let e = e + (self.hi * other.lo + self.lo * other.hi);
        let (hi, lo) = quick_two_sum(p, e);
        Self { hi, lo }
    }

    fn signum(self) -> i32 {
        match signum(self.hi) {
            0 => signum(self.lo),
            s => s,
        }
    }
}

/// Quadrant of a non-zero direction vector.
///
/// Quadrants are numbered counter-clockwise starting at east:
/// 0 covers east through up, 1 up (exclusive) through west, 2 west
/// (exclusive) up to down, 3 down through just short of east.
pub fn quadrant(dx: f64, dy: f64) -> u8 {
    if dx >= 0.0 {
        if dy <= 0.0 {
            0
        } else {
            3
        }
    } else if dy <= 0.0 {
        1
    } else {
        2
    }
}

/// Shoelace area of a ring; positive for rings that wind clockwise.
///
/// Accepts open or closed point lists. Returns 0 for fewer than 3 points.
pub fn signed_area(ring: &[Coordinate]) -> f64 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }
    let x0 = ring[0].x;
    let mut sum = 0.0;
    for i in 1..n - 1 {
        let x = ring[i].x - x0;
        let y1 = ring[i + 1].y;
        let y2 = ring[i - 1].y;
        sum += x * (y1 - y2);
    }
    // Closing term for rings given without a repeated end point.
    if !ring[0].equals_2d(&ring[n - 1]) {
        let x = ring[n - 1].x - x0;
        sum += x * (ring[0].y - ring[n - 2].y);
    }
    sum / 2.0
}

/// Winding of a ring, or `None` when the ring has no area.
pub fn ring_winding(ring: &[Coordinate]) -> Option<Winding> {
    let area = signed_area(ring);
    if area > 0.0 {
        Some(Winding::Clockwise)
    } else if area < 0.0 {
        Some(Winding::CounterClockwise)
    } else {
        None
    }
}

/// Returns `true` if the ring winds counter-clockwise.
pub fn is_ccw(ring: &[Coordinate]) -> bool {
    ring_winding(ring) == Some(Winding::CounterClockwise)
}

/// Location of `p` relative to a closed ring, by ray crossing.
///
/// Points on the ring are `Boundary`. The ring must be closed.
pub fn locate_in_ring(p: &Coordinate, ring: &[Coordinate]) -> Location {
    let mut crossings = 0usize;
    for w in ring.windows(2) {
        let (p1, p2) = (&w[0], &w[1]);
        if p1.x < p.x && p2.x < p.x {
            continue;
        }
        if p.equals_2d(p2) {
            return Location::Boundary;
        }
        if p1.y == p.y && p2.y == p.y {
            let (min_x, max_x) = (p1.x.min(p2.x), p1.x.max(p2.x));
            if p.x >= min_x && p.x <= max_x {
                return Location::Boundary;
            }
            continue;
        }
        let straddles = (p1.y > p.y && p2.y <= p.y) || (p2.y > p.y && p1.y <= p.y);
        if !straddles {
            continue;
        }
        let mut orient = orientation_index(p1, p2, p);
        if orient == Orientation::Collinear {
            return Location::Boundary;
        }
        if p2.y < p1.y {
            orient = orient.reverse();
        }
        if orient == Orientation::Clockwise {
            crossings += 1;
        }
    }
    if crossings % 2 == 1 {
        Location::Interior
    } else {
        Location::Exterior
    }
}

/// Returns `true` if `p` lies inside or on the closed ring.
pub fn is_in_ring(p: &Coordinate, ring: &[Coordinate]) -> bool {
    locate_in_ring(p, ring) != Location::Exterior
}

/// Returns `true` if `p` lies on the segment `a`-`b`.
pub fn is_on_segment(p: &Coordinate, a: &Coordinate, b: &Coordinate) -> bool {
    orientation_index(a, b, p) == Orientation::Collinear && in_segment_box(a, b, p)
}

/// Returns `true` if `p` lies on any segment of the line.
pub fn is_on_line(p: &Coordinate, line: &[Coordinate]) -> bool {
    line.windows(2).any(|w| is_on_segment(p, &w[0], &w[1]))
}

/// Euclidean distance from `p` to the segment `a`-`b`.
pub fn point_segment_distance(p: &Coordinate, a: &Coordinate, b: &Coordinate) -> f64 {
    let ab: Vector2<f64> = b.to_point2() - a.to_point2();
    let ap: Vector2<f64> = p.to_point2() - a.to_point2();
    let len2 = ab.norm_squared();
    if len2 == 0.0 {
        return ap.norm();
    }
    let t = (ap.dot(&ab) / len2).clamp(0.0, 1.0);
    (ap - ab * t).norm()
}

/// Copies `coords` dropping consecutive points equal in 2D.
pub fn remove_repeated_points(coords: &[Coordinate]) -> Vec<Coordinate> {
    let mut out: Vec<Coordinate> = Vec::with_capacity(coords.len());
    for c in coords {
        if out.last().map_or(true, |last| !last.equals_2d(c)) {
            out.push(*c);
        }
    }
    out
}

/// Returns `true` if some pair of consecutive points is equal in 2D.
pub fn has_repeated_points(coords: &[Coordinate]) -> bool {
    coords.windows(2).any(|w| w[0].equals_2d(&w[1]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn c(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    fn square() -> Vec<Coordinate> {
        vec![c(0.0, 0.0), c(10.0, 0.0), c(10.0, 10.0), c(0.0, 10.0), c(0.0, 0.0)]
    }

    #[test]
    fn orientation_basic() {
        let a = c(0.0, 0.0);
        let b = c(10.0, 0.0);
        // y grows downward: (5, 5) is below the eastward segment, i.e. to its right.
        assert_eq!(orientation_index(&a, &b, &c(5.0, 5.0)), Orientation::Clockwise);
        assert_eq!(orientation_index(&a, &b, &c(5.0, -5.0)), Orientation::CounterClockwise);
        assert_eq!(orientation_index(&a, &b, &c(20.0, 0.0)), Orientation::Collinear);
    }

    #[test]
    fn orientation_near_degenerate_is_consistent() {
        let p1 = c(0.1, 0.1);
        let p2 = c(0.3, 0.3);
        let q = c(0.7, 0.7);
        // Mathematically collinear only in reals; whatever the exact sign is,
        // the cyclic rotations must agree.
        let a = orientation_index(&p1, &p2, &q);
        let b = orientation_index(&p2, &q, &p1);
        let d = orientation_index(&q, &p1, &p2);
        assert_eq!(a, b);
        assert_eq!(b, d);
        assert_eq!(orientation_index(&p2, &p1, &q), a.reverse());
    }

    #[test]
    fn orientation_large_magnitudes() {
        let p1 = c(1e15, 1e15);
        let p2 = c(1e15 + 2.0, 1e15 + 2.0);
        assert_eq!(
            orientation_index(&p1, &p2, &c(1e15 + 4.0, 1e15 + 4.0)),
            Orientation::Collinear
        );
        assert_eq!(
            orientation_index(&p1, &p2, &c(1e15 + 4.0, 1e15 + 6.0)),
            Orientation::Clockwise
        );
    }

    #[test]
    fn double_double_exact_difference() {
        let d = DoubleDouble::diff(1e16, 1.0);
        assert_eq!(d.hi + d.lo, 1e16 - 1.0);
        assert_eq!(DoubleDouble::diff(1.0, 1.0).signum(), 0);
    }

    #[test]
    fn quadrants() {
        assert_eq!(quadrant(1.0, 0.0), 0);
        assert_eq!(quadrant(1.0, -1.0), 0);
        assert_eq!(quadrant(0.0, -1.0), 0);
        assert_eq!(quadrant(-1.0, -1.0), 1);
        assert_eq!(quadrant(-1.0, 0.0), 1);
        assert_eq!(quadrant(-1.0, 1.0), 2);
        assert_eq!(quadrant(0.0, 1.0), 3);
        assert_eq!(quadrant(1.0, 1.0), 3);
    }

    #[test]
    fn square_is_clockwise_shell_orientation() {
        let ring = square();
        assert_relative_eq!(signed_area(&ring), 100.0);
        assert_eq!(ring_winding(&ring), Some(Winding::Clockwise));
        assert!(!is_ccw(&ring));

        let reversed: Vec<_> = ring.iter().rev().copied().collect();
        assert_eq!(ring_winding(&reversed), Some(Winding::CounterClockwise));
        assert!(is_ccw(&reversed));
    }

    #[test]
    fn signed_area_open_ring() {
        let open = &square()[..4];
        assert_relative_eq!(signed_area(open), 100.0);
    }

    #[test]
    fn flat_ring_has_no_winding() {
        let ring = vec![c(0.0, 0.0), c(5.0, 0.0), c(10.0, 0.0), c(0.0, 0.0)];
        assert_eq!(ring_winding(&ring), None);
    }

    #[test]
    fn locate_point_in_square() {
        let ring = square();
        assert_eq!(locate_in_ring(&c(5.0, 5.0), &ring), Location::Interior);
        assert_eq!(locate_in_ring(&c(15.0, 5.0), &ring), Location::Exterior);
        assert_eq!(locate_in_ring(&c(-1.0, 5.0), &ring), Location::Exterior);
        assert_eq!(locate_in_ring(&c(10.0, 5.0), &ring), Location::Boundary);
        assert_eq!(locate_in_ring(&c(5.0, 0.0), &ring), Location::Boundary);
        assert_eq!(locate_in_ring(&c(0.0, 0.0), &ring), Location::Boundary);
    }

    #[test]
    fn locate_ray_through_vertex() {
        // The ray from (2, 5) passes exactly through the vertex (5, 5).
        let diamond = vec![c(5.0, 0.0), c(10.0, 5.0), c(5.0, 10.0), c(0.0, 5.0), c(5.0, 0.0)];
        assert_eq!(locate_in_ring(&c(2.0, 5.0), &diamond), Location::Interior);
        assert_eq!(locate_in_ring(&c(-2.0, 5.0), &diamond), Location::Exterior);
        assert!(is_in_ring(&c(5.0, 5.0), &diamond));
    }

    #[test]
    fn on_segment() {
        let a = c(0.0, 0.0);
        let b = c(4.0, 4.0);
        assert!(is_on_segment(&c(2.0, 2.0), &a, &b));
        assert!(is_on_segment(&b, &a, &b));
        assert!(!is_on_segment(&c(5.0, 5.0), &a, &b));
        assert!(is_on_line(&c(4.0, 2.0), &[a, b, c(4.0, 0.0)]));
    }

    #[test]
    fn segment_distance() {
        let a = c(0.0, 0.0);
        let b = c(10.0, 0.0);
        assert_relative_eq!(point_segment_distance(&c(5.0, 3.0), &a, &b), 3.0);
        assert_relative_eq!(point_segment_distance(&c(13.0, 4.0), &a, &b), 5.0);
        assert_relative_eq!(point_segment_distance(&c(3.0, 4.0), &a, &a), 5.0);
    }

    #[test]
    fn repeated_points_removed() {
        let pts = vec![c(0.0, 0.0), c(0.0, 0.0), c(1.0, 0.0), c(1.0, 0.0), c(1.0, 1.0)];
        assert!(has_repeated_points(&pts));
        let cleaned = remove_repeated_points(&pts);
        assert_eq!(cleaned, vec![c(0.0, 0.0), c(1.0, 0.0), c(1.0, 1.0)]);
        assert!(!has_repeated_points(&cleaned));
    }
}
