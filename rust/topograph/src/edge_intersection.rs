// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Points at which an edge is cut, ordered along the edge.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::coord::Coordinate;
use crate::edge::Edge;
use crate::error::{Error, Result};
use crate::label::Label;

/// A point on an edge, located by segment index and distance along that
/// segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeIntersection {
    pub coord: Coordinate,
    pub segment_index: usize,
    pub dist: f64,
}

impl EdgeIntersection {
    pub fn new(coord: Coordinate, segment_index: usize, dist: f64) -> Self {
        Self {
            coord,
            segment_index,
            dist,
        }
    }

    /// Orders by segment index, then distance.
    pub fn compare(&self, other: &EdgeIntersection) -> Ordering {
        PositionKey::new(self.segment_index, self.dist)
            .cmp(&PositionKey::new(other.segment_index, other.dist))
    }

    /// Returns `true` if this is the first or the last point of an edge
    /// whose last point has segment index `max_segment_index`.
    pub fn is_end_point(&self, max_segment_index: usize) -> bool {
        (self.segment_index == 0 && self.dist == 0.0) || self.segment_index == max_segment_index
    }
}

/// Position along an edge with a total order on the distance.
#[derive(Debug, Clone, Copy)]
struct PositionKey {
    segment_index: usize,
    dist: f64,
}

impl PositionKey {
    fn new(segment_index: usize, dist: f64) -> Self {
        Self {
            segment_index,
            // Fold -0.0 into 0.0.
            dist: dist + 0.0,
        }
    }
}

impl PartialEq for PositionKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PositionKey {}

impl PartialOrd for PositionKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PositionKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.segment_index
            .cmp(&other.segment_index)
            .then_with(|| self.dist.total_cmp(&other.dist))
    }
}

/// The ordered, duplicate-free set of intersections of one edge.
#[derive(Debug, Clone, Default)]
pub struct EdgeIntersectionList {
    entries: BTreeMap<PositionKey, EdgeIntersection>,
}

impl EdgeIntersectionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an intersection, returning the stored entry. An existing entry
    /// at the same position is kept and returned unchanged.
    pub fn add(&mut self, coord: Coordinate, segment_index: usize, dist: f64) -> &EdgeIntersection {
        self.entries
            .entry(PositionKey::new(segment_index, dist))
            .or_insert_with(|| EdgeIntersection::new(coord, segment_index, dist))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Intersections in edge order.
    pub fn iter(&self) -> impl Iterator<Item = &EdgeIntersection> {
        self.entries.values()
    }

    /// Returns `true` if some intersection lies at `pt`.
    pub fn is_intersection(&self, pt: &Coordinate) -> bool {
        self.iter().any(|ei| ei.coord.equals_2d(pt))
    }

    /// Adds entries for the first and last point of `coords`.
    pub fn add_endpoints(&mut self, coords: &[Coordinate]) {
        let Some(last) = coords.len().checked_sub(1) else {
            return;
        };
        self.add(coords[0], 0, 0.0);
        self.add(coords[last], last, 0.0);
    }

    /// Splits the parent edge at every intersection, in order.
    ///
    /// The endpoints are added first, so the children always cover the
    /// whole parent.
    pub fn split_edges(&mut self, coords: &[Coordinate], label: &Label) -> Result<Vec<Edge>> {
        self.add_endpoints(coords);
        let points: Vec<EdgeIntersection> = self.entries.values().copied().collect();
        let mut out = Vec::with_capacity(points.len().saturating_sub(1));
        for pair in points.windows(2) {
            out.push(create_split_edge(coords, label, &pair[0], &pair[1])?);
        }
        Ok(out)
    }
}

/// Builds the child edge between two consecutive intersections.
fn create_split_edge(
    coords: &[Coordinate],
    label: &Label,
    ei0: &EdgeIntersection,
    ei1: &EdgeIntersection,
) -> Result<Edge> {
    if ei1.segment_index >= coords.len() {
        return Err(Error::topology(
            ei1.coord,
            "intersection segment index past the end of the edge",
        ));
    }
    let last_seg_start = coords[ei1.segment_index];
    // An end intersection sitting exactly on the start vertex of its segment
    // is already included as that vertex.
    let use_int_pt1 = ei1.dist > 0.0 || !ei1.coord.equals_2d(&last_seg_start);

    let mut pts = Vec::with_capacity(ei1.segment_index - ei0.segment_index + 2);
    pts.push(ei0.coord);
    pts.extend_from_slice(&coords[ei0.segment_index + 1..=ei1.segment_index]);
    if use_int_pt1 {
        pts.push(ei1.coord);
    }
    Edge::new(pts, *label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::GraphComponent;
    use crate::label::Location;
    use proptest::prelude::*;

    fn c(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    #[test]
    fn add_returns_existing_entry() {
        let mut list = EdgeIntersectionList::new();
        list.add(c(1.0, 0.0), 0, 1.0);
        let existing = *list.add(c(99.0, 99.0), 0, 1.0);
        assert_eq!(existing.coord, c(1.0, 0.0));
        assert_eq!(list.len(), 1);
        list.add(c(2.0, 0.0), 0, 2.0);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn negative_zero_distance_is_zero() {
        let mut list = EdgeIntersectionList::new();
        list.add(c(0.0, 0.0), 2, 0.0);
        list.add(c(0.0, 0.0), 2, -0.0);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn endpoints_added_once() {
        let coords = vec![c(0.0, 0.0), c(5.0, 0.0), c(10.0, 0.0)];
        let mut list = EdgeIntersectionList::new();
        list.add_endpoints(&coords);
        list.add_endpoints(&coords);
        assert_eq!(list.len(), 2);
        let segs: Vec<usize> = list.iter().map(|e| e.segment_index).collect();
        assert_eq!(segs, vec![0, 2]);
    }

    #[test]
    fn split_at_interior_point() {
        let coords = vec![c(0.0, 0.0), c(10.0, 0.0), c(10.0, 10.0)];
        let mut list = EdgeIntersectionList::new();
        list.add(c(4.0, 0.0), 0, 4.0);
        let label = Label::line(0, Location::Interior);
        let parts = list.split_edges(&coords, &label).unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].coordinates(), &[c(0.0, 0.0), c(4.0, 0.0)]);
        assert_eq!(parts[1].coordinates(), &[c(4.0, 0.0), c(10.0, 0.0), c(10.0, 10.0)]);
        assert_eq!(*parts[1].label(), label);
    }

    #[test]
    fn split_at_vertex_omits_duplicate() {
        let coords = vec![c(0.0, 0.0), c(10.0, 0.0), c(10.0, 10.0)];
        let mut list = EdgeIntersectionList::new();
        list.add(c(10.0, 0.0), 1, 0.0);
        let parts = list
            .split_edges(&coords, &Label::line(0, Location::Interior))
            .unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].coordinates(), &[c(0.0, 0.0), c(10.0, 0.0)]);
        assert_eq!(parts[1].coordinates(), &[c(10.0, 0.0), c(10.0, 10.0)]);
    }

    #[test]
    fn split_coverage_reconstructs_parent() {
        let coords = vec![c(0.0, 0.0), c(10.0, 0.0), c(10.0, 10.0), c(0.0, 10.0)];
        let mut list = EdgeIntersectionList::new();
        list.add(c(3.0, 0.0), 0, 3.0);
        list.add(c(10.0, 0.0), 1, 0.0);
        list.add(c(10.0, 5.0), 1, 5.0);
        list.add(c(6.0, 10.0), 2, 4.0);
        let parts = list
            .split_edges(&coords, &Label::line(0, Location::Interior))
            .unwrap();
        assert_eq!(parts.len(), 5);

        let mut rebuilt: Vec<Coordinate> = parts[0].coordinates().to_vec();
        for p in &parts[1..] {
            assert_eq!(rebuilt.last(), p.coordinates().first());
            rebuilt.extend_from_slice(&p.coordinates()[1..]);
        }
        let original: Vec<Coordinate> = rebuilt
            .iter()
            .copied()
            .filter(|p| coords.contains(p))
            .collect();
        assert_eq!(original, coords);
        assert_eq!(rebuilt.first(), coords.first());
        assert_eq!(rebuilt.last(), coords.last());
    }

    #[test]
    fn split_rejects_segment_index_past_end() {
        let coords = vec![c(0.0, 0.0), c(10.0, 0.0), c(10.0, 10.0)];
        let mut list = EdgeIntersectionList::new();
        list.add(c(5.0, 0.0), 7, 0.0);
        let err = list
            .split_edges(&coords, &Label::line(0, Location::Interior))
            .unwrap_err();
        assert!(matches!(err, Error::Topology { coord, .. } if coord == c(5.0, 0.0)));
    }

    proptest! {
        #[test]
        fn split_children_rebuild_parent(
            n in 2usize..7,
            cuts in prop::collection::vec((0usize..6, 0u32..10), 0..20)
        ) {
            // Zigzag so that no three consecutive vertices are collinear.
            let coords: Vec<Coordinate> = (0..n)
                .map(|i| c(10.0 * i as f64, if i % 2 == 1 { 10.0 } else { 0.0 }))
                .collect();
            let mut list = EdgeIntersectionList::new();
            let mut cut_points = std::collections::BTreeMap::new();
            for (seg, t) in cuts {
                let seg = seg % (n - 1);
                let (a, b) = (coords[seg], coords[seg + 1]);
                let f = f64::from(t) / 10.0;
                let p = c(a.x + (b.x - a.x) * f, a.y + (b.y - a.y) * f);
                list.add(p, seg, a.distance(&b) * f);
                cut_points.insert((seg, t), p);
            }

            let mut expected = Vec::new();
            for (s, vertex) in coords.iter().enumerate().take(n - 1) {
                expected.push(*vertex);
                expected.extend(
                    cut_points
                        .iter()
                        .filter(|((seg, t), _)| *seg == s && *t > 0)
                        .map(|(_, p)| *p),
                );
            }
            expected.push(coords[n - 1]);

            let parts = list
                .split_edges(&coords, &Label::line(0, Location::Interior))
                .unwrap();
            let mut rebuilt: Vec<Coordinate> = parts[0].coordinates().to_vec();
            for part in &parts[1..] {
                prop_assert_eq!(rebuilt.last(), part.coordinates().first());
                rebuilt.extend_from_slice(&part.coordinates()[1..]);
            }
            prop_assert_eq!(rebuilt, expected);
        }

        #[test]
        fn iteration_is_ordered_and_deduplicated(
            entries in prop::collection::vec((0usize..8, 0u8..16), 0..60)
        ) {
            let mut list = EdgeIntersectionList::new();
            let mut distinct = std::collections::BTreeSet::new();
            for (seg, d) in &entries {
                let dist = f64::from(*d) / 4.0;
                let before = list.len();
                list.add(c(0.0, 0.0), *seg, dist);
                if !distinct.insert((*seg, *d)) {
                    prop_assert_eq!(list.len(), before);
                }
            }
            prop_assert_eq!(list.len(), distinct.len());
            let items: Vec<&EdgeIntersection> = list.iter().collect();
            for w in items.windows(2) {
                prop_assert_eq!(w[0].compare(w[1]), Ordering::Less);
            }
        }
    }
}
