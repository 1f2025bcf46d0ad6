// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Undirected edges of the planar graph.

use crate::component::{ComponentFlags, GraphComponent};
use crate::coord::{Coordinate, Envelope};
use crate::depth::Depth;
use crate::edge_intersection::EdgeIntersectionList;
use crate::error::{Error, Result};
use crate::intersector::LineIntersector;
use crate::label::{Label, Position};
use crate::matrix::{Dimension, IntersectionMatrix};

/// A polyline of at least two points carrying a label.
///
/// Equality ignores direction: an edge equals its own reversal. Edges are
/// cut by [`split`](Edge::split) into fresh child edges and never change
/// their coordinates afterwards.
#[derive(Debug, Clone)]
pub struct Edge {
    coords: Vec<Coordinate>,
    env: Envelope,
    label: Label,
    depth: Depth,
    intersections: EdgeIntersectionList,
    flags: ComponentFlags,
    isolated: bool,
}

impl Edge {
    /// Creates an edge. Fails if `coords` has fewer than two points.
    pub fn new(coords: Vec<Coordinate>, label: Label) -> Result<Self> {
        if coords.len() < 2 {
            return Err(Error::TooFewPoints {
                expected: 2,
                found: coords.len(),
            });
        }
        let env = Envelope::from_coords(&coords);
        Ok(Self {
            coords,
            env,
            label,
            depth: Depth::new(),
            intersections: EdgeIntersectionList::new(),
            flags: ComponentFlags::default(),
            isolated: true,
        })
    }

    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coords
    }

    pub fn coordinate_at(&self, i: usize) -> Coordinate {
        self.coords[i]
    }

    pub fn num_points(&self) -> usize {
        self.coords.len()
    }

    /// Segment index under which the last point is recorded.
    pub fn max_segment_index(&self) -> usize {
        self.coords.len() - 1
    }

    /// Bounding box of all points.
    pub fn envelope(&self) -> &Envelope {
        &self.env
    }

    pub fn depth(&self) -> &Depth {
        &self.depth
    }

    pub fn depth_mut(&mut self) -> &mut Depth {
        &mut self.depth
    }

    pub fn intersections(&self) -> &EdgeIntersectionList {
        &self.intersections
    }

    pub fn set_isolated(&mut self, isolated: bool) {
        self.isolated = isolated;
    }

    pub fn is_closed(&self) -> bool {
        self.coords[0].equals_2d(&self.coords[self.coords.len() - 1])
    }

    /// An area edge that went out and straight back, e.g. `a b a`.
    pub fn is_collapsed(&self) -> bool {
        self.label.is_area() && self.coords.len() == 3 && self.coords[0].equals_2d(&self.coords[2])
    }

    /// The line edge that replaces a collapsed edge.
    pub fn collapsed_edge(&self) -> Result<Edge> {
        Edge::new(vec![self.coords[0], self.coords[1]], self.label.line_label())
    }

    /// Returns `true` if both edges have the same points in the same order.
    pub fn is_pointwise_equal(&self, other: &Edge) -> bool {
        self.coords.len() == other.coords.len()
            && self
                .coords
                .iter()
                .zip(&other.coords)
                .all(|(a, b)| a.equals_2d(b))
    }

    /// Records every intersection found by `li` on segment `segment_index`
    /// of this edge. `input` selects which of the intersector's two
    /// segments belongs to this edge.
    pub fn add_intersections(&mut self, li: &LineIntersector, segment_index: usize, input: usize) {
        for i in 0..li.intersection_count() {
            self.add_intersection(li, segment_index, input, i);
        }
    }

    /// Records intersection `int_index` of `li`.
    ///
    /// A point equal to the next vertex is normalized onto the following
    /// segment with distance zero, so each vertex has one canonical
    /// position.
    pub fn add_intersection(
        &mut self,
        li: &LineIntersector,
        segment_index: usize,
        input: usize,
        int_index: usize,
    ) {
        let pt = li.intersection(int_index);
        let mut seg = segment_index;
        let mut dist = li.edge_distance(input, int_index);
        let next = seg + 1;
        if next < self.coords.len() && pt.equals_2d(&self.coords[next]) {
            seg = next;
            dist = 0.0;
        }
        tracing::trace!(x = pt.x, y = pt.y, segment = seg, dist, "Edge intersection");
        self.intersections.add(pt, seg, dist);
    }

    /// Cuts the edge at its intersections. The children inherit the label.
    pub fn split(&mut self) -> Result<Vec<Edge>> {
        self.intersections.split_edges(&self.coords, &self.label)
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        let n = self.coords.len();
        if n != other.coords.len() {
            return false;
        }
        let mut forward = true;
        let mut reverse = true;
        for i in 0..n {
            forward &= self.coords[i].equals_2d(&other.coords[i]);
            reverse &= self.coords[i].equals_2d(&other.coords[n - 1 - i]);
            if !forward && !reverse {
                return false;
            }
        }
        true
    }
}

impl GraphComponent for Edge {
    fn label(&self) -> &Label {
        &self.label
    }

    fn label_mut(&mut self) -> &mut Label {
        &mut self.label
    }

    fn flags(&self) -> &ComponentFlags {
        &self.flags
    }

    fn flags_mut(&mut self) -> &mut ComponentFlags {
        &mut self.flags
    }

    fn coordinate(&self) -> Coordinate {
        self.coords[0]
    }

    fn is_isolated(&self) -> bool {
        self.isolated
    }

    fn compute_im(&self, im: &mut IntersectionMatrix) {
        let label = &self.label;
        im.set_at_least_if_valid(label.on(0), label.on(1), Dimension::Curve);
        if label.is_area() {
            for side in [Position::Left, Position::Right] {
                im.set_at_least_if_valid(
                    label.get_location(0, side),
                    label.get_location(1, side),
                    Dimension::Surface,
                );
            }
        }
    }
}
