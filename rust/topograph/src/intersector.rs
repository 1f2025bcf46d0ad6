// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Segment intersection.
//!
//! [`LineIntersector`] classifies how two segments meet using only the
//! robust orientation predicate; a coordinate is computed only for proper
//! crossings. [`SegmentIntersector`] feeds those results into the
//! intersection lists of the edges being noded.

use crate::coord::{in_segment_box, segment_boxes_intersect, Coordinate};
use crate::edge::Edge;
use crate::orientation::{orientation_index, point_segment_distance, Orientation};

/// How two segments intersect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntersectionKind {
    #[default]
    NoIntersection,
    /// A single point.
    Point,
    /// A collinear overlap, reported by its two end points.
    Collinear,
}

/// Computes the intersection of two segments.
///
/// The result of the last call to [`compute`](Self::compute) is kept and
/// queried through the accessors.
#[derive(Debug, Clone, Default)]
pub struct LineIntersector {
    kind: IntersectionKind,
    input: [[Coordinate; 2]; 2],
    points: [Coordinate; 2],
    proper: bool,
}

impl LineIntersector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intersects segment `p1`-`p2` with segment `q1`-`q2`.
    pub fn compute(
        &mut self,
        p1: &Coordinate,
        p2: &Coordinate,
        q1: &Coordinate,
        q2: &Coordinate,
    ) -> IntersectionKind {
        self.input = [[*p1, *p2], [*q1, *q2]];
        self.proper = false;
        self.kind = self.compute_kind(p1, p2, q1, q2);
        self.kind
    }

    fn compute_kind(
        &mut self,
        p1: &Coordinate,
        p2: &Coordinate,
        q1: &Coordinate,
        q2: &Coordinate,
    ) -> IntersectionKind {
        if !segment_boxes_intersect(p1, p2, q1, q2) {
            return IntersectionKind::NoIntersection;
        }

        let pq1 = orientation_index(p1, p2, q1);
        let pq2 = orientation_index(p1, p2, q2);
        if pq1 != Orientation::Collinear && pq1 == pq2 {
            return IntersectionKind::NoIntersection;
        }
        let qp1 = orientation_index(q1, q2, p1);
        let qp2 = orientation_index(q1, q2, p2);
        if qp1 != Orientation::Collinear && qp1 == qp2 {
            return IntersectionKind::NoIntersection;
        }

        let collinear = [pq1, pq2, qp1, qp2]
            .iter()
            .all(|o| *o == Orientation::Collinear);
        if collinear {
            return self.compute_collinear(p1, p2, q1, q2);
        }

        if [pq1, pq2, qp1, qp2].contains(&Orientation::Collinear) {
            // An endpoint of one segment lies on the other. Copy it exactly.
            self.points[0] = if p1.equals_2d(q1) || p1.equals_2d(q2) {
                *p1
            } else if p2.equals_2d(q1) || p2.equals_2d(q2) {
                *p2
            } else if pq1 == Orientation::Collinear {
                *q1
            } else if pq2 == Orientation::Collinear {
                *q2
            } else if qp1 == Orientation::Collinear {
                *p1
            } else {
                *p2
            };
        } else {
            self.proper = true;
            self.points[0] = proper_intersection(p1, p2, q1, q2);
        }
        IntersectionKind::Point
    }

    fn compute_collinear(
        &mut self,
        p1: &Coordinate,
        p2: &Coordinate,
        q1: &Coordinate,
        q2: &Coordinate,
    ) -> IntersectionKind {
        let q1_in_p = in_segment_box(p1, p2, q1);
        let q2_in_p = in_segment_box(p1, p2, q2);
        let p1_in_q = in_segment_box(q1, q2, p1);
        let p2_in_q = in_segment_box(q1, q2, p2);

        let (a, b, single) = if q1_in_p && q2_in_p {
            (*q1, *q2, false)
        } else if p1_in_q && p2_in_q {
            (*p1, *p2, false)
        } else if q1_in_p && p1_in_q {
            (*q1, *p1, q1.equals_2d(p1) && !q2_in_p && !p2_in_q)
        } else if q1_in_p && p2_in_q {
            (*q1, *p2, q1.equals_2d(p2) && !q2_in_p && !p1_in_q)
        } else if q2_in_p && p1_in_q {
            (*q2, *p1, q2.equals_2d(p1) && !q1_in_p && !p2_in_q)
        } else if q2_in_p && p2_in_q {
            (*q2, *p2, q2.equals_2d(p2) && !q1_in_p && !p1_in_q)
        } else {
            return IntersectionKind::NoIntersection;
        };
        self.points = [a, b];
        if single {
            IntersectionKind::Point
        } else {
            IntersectionKind::Collinear
        }
    }

    pub fn kind(&self) -> IntersectionKind {
        self.kind
    }

    pub fn has_intersection(&self) -> bool {
        self.kind != IntersectionKind::NoIntersection
    }

    /// Number of intersection points (0, 1 or 2).
    pub fn intersection_count(&self) -> usize {
        match self.kind {
            IntersectionKind::NoIntersection => 0,
            IntersectionKind::Point => 1,
            IntersectionKind::Collinear => 2,
        }
    }

    pub fn intersection(&self, i: usize) -> Coordinate {
        self.points[i]
    }

    /// Returns `true` if the segments cross at a point interior to both.
    pub fn is_proper(&self) -> bool {
        self.has_intersection() && self.proper
    }

    /// Returns `true` if some intersection point is not an endpoint of
    /// input segment `segment` (0 or 1).
    pub fn is_interior_intersection(&self, segment: usize) -> bool {
        let [a, b] = &self.input[segment];
        self.points[..self.intersection_count()]
            .iter()
            .any(|p| !p.equals_2d(a) && !p.equals_2d(b))
    }

    /// Distance of intersection `i` along input segment `segment`.
    pub fn edge_distance(&self, segment: usize, i: usize) -> f64 {
        let [p0, p1] = &self.input[segment];
        compute_edge_distance(&self.points[i], p0, p1)
    }
}

/// Computes the crossing point of two properly intersecting segments.
///
/// The computation is centred on the overlap of the two bounding boxes to
/// limit cancellation. If the result falls outside either segment's box
/// (possible through round-off), the input endpoint closest to the other
/// segment is used instead.
fn proper_intersection(p1: &Coordinate, p2: &Coordinate, q1: &Coordinate, q2: &Coordinate) -> Coordinate {
    let candidate = centred_intersection(p1, p2, q1, q2);
    match candidate {
        Some(pt) if in_segment_box(p1, p2, &pt) && in_segment_box(q1, q2, &pt) => pt,
        _ => nearest_endpoint(p1, p2, q1, q2),
    }
}

fn centred_intersection(
    p1: &Coordinate,
    p2: &Coordinate,
    q1: &Coordinate,
    q2: &Coordinate,
) -> Option<Coordinate> {
    let int_min_x = p1.x.min(p2.x).max(q1.x.min(q2.x));
    let int_max_x = p1.x.max(p2.x).min(q1.x.max(q2.x));
    let int_min_y = p1.y.min(p2.y).max(q1.y.min(q2.y));
    let int_max_y = p1.y.max(p2.y).min(q1.y.max(q2.y));
    let mid_x = (int_min_x + int_max_x) / 2.0;
    let mid_y = (int_min_y + int_max_y) / 2.0;

    let (p1x, p1y) = (p1.x - mid_x, p1.y - mid_y);
    let (p2x, p2y) = (p2.x - mid_x, p2.y - mid_y);
    let (q1x, q1y) = (q1.x - mid_x, q1.y - mid_y);
    let (q2x, q2y) = (q2.x - mid_x, q2.y - mid_y);

    // Homogeneous line equations of both segments.
    let px = p1y - p2y;
    let py = p2x - p1x;
    let pw = p1x * p2y - p2x * p1y;
    let qx = q1y - q2y;
    let qy = q2x - q1x;
    let qw = q1x * q2y - q2x * q1y;

    let x = py * qw - qy * pw;
    let y = qx * pw - px * qw;
    let w = px * qy - qx * py;

    let x_int = x / w;
    let y_int = y / w;
    if !x_int.is_finite() || !y_int.is_finite() {
        return None;
    }
    Some(Coordinate::new(x_int + mid_x, y_int + mid_y))
}

fn nearest_endpoint(p1: &Coordinate, p2: &Coordinate, q1: &Coordinate, q2: &Coordinate) -> Coordinate {
    let candidates = [
        (*p1, point_segment_distance(p1, q1, q2)),
        (*p2, point_segment_distance(p2, q1, q2)),
        (*q1, point_segment_distance(q1, p1, p2)),
        (*q2, point_segment_distance(q2, p1, p2)),
    ];
    let mut best = candidates[0];
    for c in &candidates[1..] {
        if c.1 < best.1 {
            best = *c;
        }
    }
    best.0
}

/// Distance of `p` along the segment `p0`-`p1`, measured on the dominant
/// axis.
///
/// This is not the Euclidean distance but it is monotonic along the segment
/// and exact for points equal to either endpoint, which is all that
/// ordering intersections needs.
pub fn compute_edge_distance(p: &Coordinate, p0: &Coordinate, p1: &Coordinate) -> f64 {
    let dx = (p1.x - p0.x).abs();
    let dy = (p1.y - p0.y).abs();
    if p.equals_2d(p0) {
        return 0.0;
    }
    if p.equals_2d(p1) {
        return dx.max(dy);
    }
    let pdx = (p.x - p0.x).abs();
    let pdy = (p.y - p0.y).abs();
    let dist = if dx > dy { pdx } else { pdy };
    if dist == 0.0 {
        // p differs from p0 but projects onto it on the dominant axis.
        pdx.max(pdy)
    } else {
        dist
    }
}

/// A segment of an edge in a slice of edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SegmentRef {
    pub edge: usize,
    pub segment: usize,
}

/// Records the intersections between edge segments in the edges'
/// intersection lists.
#[derive(Debug, Default)]
pub struct SegmentIntersector {
    li: LineIntersector,
    record_isolated: bool,
    tests: usize,
    intersections: usize,
    proper_intersections: usize,
    has_intersection: bool,
    proper_point: Option<Coordinate>,
}

impl SegmentIntersector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the isolated flag of edges that meet.
    pub fn with_record_isolated(mut self, record: bool) -> Self {
        self.record_isolated = record;
        self
    }

    /// Intersects two segments and records any non-trivial intersection in
    /// both edges.
    pub fn add_intersections(&mut self, edges: &mut [Edge], a: SegmentRef, b: SegmentRef) {
        if a == b {
            return;
        }
        self.tests += 1;
        let (p00, p01) = segment(&edges[a.edge], a.segment);
        let (p10, p11) = segment(&edges[b.edge], b.segment);
        self.li.compute(&p00, &p01, &p10, &p11);
        if !self.li.has_intersection() {
            return;
        }
        if self.record_isolated {
            edges[a.edge].set_isolated(false);
            edges[b.edge].set_isolated(false);
        }
        self.intersections += 1;
        if self.is_trivial_intersection(edges, a, b) {
            return;
        }
        self.has_intersection = true;
        edges[a.edge].add_intersections(&self.li, a.segment, 0);
        edges[b.edge].add_intersections(&self.li, b.segment, 1);
        if self.li.is_proper() {
            self.proper_intersections += 1;
            self.proper_point = Some(self.li.intersection(0));
        }
    }

    /// The shared vertex of two adjacent segments of one edge (including
    /// the closing vertex of a closed edge) is not a real intersection.
    fn is_trivial_intersection(&self, edges: &[Edge], a: SegmentRef, b: SegmentRef) -> bool {
        if a.edge != b.edge || self.li.intersection_count() != 1 {
            return false;
        }
        if a.segment.abs_diff(b.segment) == 1 {
            return true;
        }
        let edge = &edges[a.edge];
        if edge.is_closed() {
            let max_segment = edge.num_points() - 2;
            let (lo, hi) = (a.segment.min(b.segment), a.segment.max(b.segment));
            if lo == 0 && hi == max_segment {
                return true;
            }
        }
        false
    }

    /// Number of segment pairs tested.
    pub fn test_count(&self) -> usize {
        self.tests
    }

    /// Number of intersecting segment pairs, trivial ones included.
    pub fn intersection_count(&self) -> usize {
        self.intersections
    }

    pub fn proper_intersection_count(&self) -> usize {
        self.proper_intersections
    }

    pub fn has_intersection(&self) -> bool {
        self.has_intersection
    }

    pub fn has_proper_intersection(&self) -> bool {
        self.proper_intersections > 0
    }

    /// The last proper intersection point found.
    pub fn proper_intersection_point(&self) -> Option<Coordinate> {
        self.proper_point
    }
}

fn segment(edge: &Edge, i: usize) -> (Coordinate, Coordinate) {
    let pts = edge.coordinates();
    (pts[i], pts[i + 1])
}
