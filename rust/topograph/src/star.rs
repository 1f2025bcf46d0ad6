// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The angularly ordered directed edges leaving a node.
//!
//! Walking the star in increasing order turns counter-clockwise around the
//! node. Moving from one outgoing edge to the next crosses the region on
//! the first edge's left, which is the region on the second edge's right;
//! side labelling and ring linking both rely on this.

use std::cmp::Ordering;

use slotmap::SlotMap;

use crate::component::GraphComponent;
use crate::coord::Coordinate;
use crate::directed_edge::{lookup, lookup_mut, DirectedEdgeArena};
use crate::edge::Edge;
use crate::edge_ring::RingPolicy;
use crate::error::{Error, Result};
use crate::keys::{DirectedEdgeKey, EdgeKey, EdgeRingKey};
use crate::label::{Label, Location, Position};

/// Outgoing directed edges of one node, sorted by direction.
#[derive(Debug, Clone, Default)]
pub struct DirectedEdgeStar {
    edges: Vec<DirectedEdgeKey>,
    label: Label,
}

impl DirectedEdgeStar {
    pub fn new() -> Self {
        Self::default()
    }

    /// The directed edges in counter-clockwise order.
    pub fn edges(&self) -> &[DirectedEdgeKey] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Location of the node relative to each operand, as seen from the
    /// incident edges. Set by [`compute_labelling`](Self::compute_labelling).
    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn outgoing_degree(&self) -> usize {
        self.edges.len()
    }

    /// Inserts a directed edge at its angular position. An edge comparing
    /// equal to existing ones goes after them.
    pub fn insert(&mut self, key: DirectedEdgeKey, arena: &DirectedEdgeArena) -> Result<()> {
        let new_end = lookup(arena, key)?.end();
        let (mut lo, mut hi) = (0, self.edges.len());
        while lo < hi {
            let mid = (lo + hi) / 2;
            let mid_end = lookup(arena, self.edges[mid])?.end();
            if mid_end.compare_direction(new_end) == Ordering::Greater {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }
        self.edges.insert(lo, key);
        Ok(())
    }

    /// Number of outgoing edges that belong to `ring` under `policy`.
    pub fn outgoing_degree_in_ring(
        &self,
        arena: &DirectedEdgeArena,
        ring: EdgeRingKey,
        policy: RingPolicy,
    ) -> Result<usize> {
        let mut degree = 0;
        for &k in &self.edges {
            if policy.ring_of(lookup(arena, k)?) == Some(ring) {
                degree += 1;
            }
        }
        Ok(degree)
    }

    /// Completes the labels of the outgoing edges.
    ///
    /// Side locations are propagated around the star for each operand.
    /// Whatever is still unknown afterwards comes from `locate_in_area`
    /// at the node, or is exterior if the operand has a collapsed edge
    /// here. Finally the star's own label is derived from the `On`
    /// locations.
    pub fn compute_labelling<F>(
        &mut self,
        arena: &mut DirectedEdgeArena,
        locate_in_area: F,
    ) -> Result<()>
    where
        F: Fn(usize, &Coordinate) -> Location,
    {
        for geom in 0..2 {
            self.propagate_side_labels(arena, geom)?;
        }

        let mut has_collapse = [false; 2];
        for &k in &self.edges {
            let label = lookup(arena, k)?.label();
            for (geom, flag) in has_collapse.iter_mut().enumerate() {
                if label.is_line(geom) && label.on(geom) == Location::Boundary {
                    *flag = true;
                }
            }
        }

        let mut located: [Option<Location>; 2] = [None; 2];
        for &k in &self.edges {
            let de = lookup_mut(arena, k)?;
            let origin = de.coordinate();
            for geom in 0..2 {
                if !de.label().is_any_null(geom) {
                    continue;
                }
                let loc = if has_collapse[geom] {
                    Location::Exterior
                } else {
                    *located[geom].get_or_insert_with(|| locate_in_area(geom, &origin))
                };
                de.label_mut().set_all_locations_if_null(geom, loc);
            }
        }

        let mut label = Label::default();
        for &k in &self.edges {
            let de_label = lookup(arena, k)?.label();
            for geom in 0..2 {
                let current = label.on(geom);
                let merged = match (de_label.on(geom), current) {
                    (Location::Boundary, _) => Location::Boundary,
                    (Location::Interior, Location::Boundary) => Location::Boundary,
                    (Location::Interior, _) => Location::Interior,
                    (Location::Exterior, Location::None) => Location::Exterior,
                    (_, cur) => cur,
                };
                label.set_location(geom, Position::On, merged);
            }
        }
        self.label = label;
        Ok(())
    }

    fn propagate_side_labels(&self, arena: &mut DirectedEdgeArena, geom: usize) -> Result<()> {
        let mut start = Location::None;
        for &k in &self.edges {
            let label = lookup(arena, k)?.label();
            if label.is_area_for(geom) && label.get_location(geom, Position::Left).is_known() {
                start = label.get_location(geom, Position::Left);
            }
        }
        if !start.is_known() {
            return Ok(());
        }

        let mut current = start;
        for &k in &self.edges {
            let de = lookup_mut(arena, k)?;
            let origin = de.coordinate();
            let label = de.label_mut();
            if !label.on(geom).is_known() {
                label.set_location(geom, Position::On, current);
            }
            if !label.is_area_for(geom) {
                continue;
            }
            let left = label.get_location(geom, Position::Left);
            let right = label.get_location(geom, Position::Right);
            if right.is_known() {
                if right != current {
                    tracing::warn!(x = origin.x, y = origin.y, geom, "Side location conflict");
                    return Err(Error::topology(origin, "side location conflict"));
                }
                if !left.is_known() {
                    return Err(Error::topology(origin, "found single null side"));
                }
                current = left;
            } else {
                if left.is_known() {
                    return Err(Error::topology(origin, "found single null side"));
                }
                label.set_location(geom, Position::Right, current);
                label.set_location(geom, Position::Left, current);
            }
        }
        Ok(())
    }

    /// Fills each edge's missing labels from its reversed twin.
    pub fn merge_sym_labels(&self, arena: &mut DirectedEdgeArena) -> Result<()> {
        for &k in &self.edges {
            let sym = lookup(arena, k)?.sym();
            let sym_label = lookup(arena, sym)?.label().flipped();
            lookup_mut(arena, k)?.label_mut().merge(&sym_label);
        }
        Ok(())
    }

    /// Fills any remaining unknown locations from the node label.
    pub fn update_labelling(&self, arena: &mut DirectedEdgeArena, node_label: &Label) -> Result<()> {
        for &k in &self.edges {
            let label = lookup_mut(arena, k)?.label_mut();
            label.set_all_locations_if_null(0, node_label.on(0));
            label.set_all_locations_if_null(1, node_label.on(1));
        }
        Ok(())
    }

    /// Outgoing edges that are in the result or whose twin is, in star order.
    fn result_area_edges(&self, arena: &DirectedEdgeArena) -> Result<Vec<DirectedEdgeKey>> {
        let mut out = Vec::new();
        for &k in &self.edges {
            let de = lookup(arena, k)?;
            if de.is_in_result() || lookup(arena, de.sym())?.is_in_result() {
                out.push(k);
            }
        }
        Ok(out)
    }

    /// Links each incoming result edge to the next outgoing result edge
    /// counter-clockwise, producing maximal rings.
    pub fn link_result_directed_edges(
        &self,
        arena: &mut DirectedEdgeArena,
        origin: Coordinate,
    ) -> Result<()> {
        let result_edges = self.result_area_edges(arena)?;
        let mut first_out: Option<DirectedEdgeKey> = None;
        let mut incoming: Option<DirectedEdgeKey> = None;

        for &next_out in &result_edges {
            let out = lookup(arena, next_out)?;
            if !out.label().is_area() {
                continue;
            }
            let out_in_result = out.is_in_result();
            let next_in = out.sym();
            if first_out.is_none() && out_in_result {
                first_out = Some(next_out);
            }
            match incoming {
                None => {
                    if lookup(arena, next_in)?.is_in_result() {
                        incoming = Some(next_in);
                    }
                }
                Some(k) if out_in_result => {
                    lookup_mut(arena, k)?.next = Some(next_out);
                    incoming = None;
                }
                Some(_) => {}
            }
        }

        if let Some(k) = incoming {
            let Some(first) = first_out else {
                tracing::warn!(x = origin.x, y = origin.y, "No outgoing result edge");
                return Err(Error::topology(origin, "no outgoing dirEdge found"));
            };
            lookup_mut(arena, k)?.next = Some(first);
        }
        Ok(())
    }

    /// Links the edges of maximal ring `ring` at this node so that each
    /// incoming edge continues on the nearest outgoing edge clockwise,
    /// splitting the maximal ring into minimal rings.
    pub fn link_minimal_directed_edges(
        &self,
        arena: &mut DirectedEdgeArena,
        ring: EdgeRingKey,
        origin: Coordinate,
    ) -> Result<()> {
        let result_edges = self.result_area_edges(arena)?;
        let mut first_out: Option<DirectedEdgeKey> = None;
        let mut incoming: Option<DirectedEdgeKey> = None;

        for &next_out in result_edges.iter().rev() {
            let out = lookup(arena, next_out)?;
            let out_in_ring = out.edge_ring() == Some(ring);
            let next_in = out.sym();
            if first_out.is_none() && out_in_ring {
                first_out = Some(next_out);
            }
            match incoming {
                None => {
                    if lookup(arena, next_in)?.edge_ring() == Some(ring) {
                        incoming = Some(next_in);
                    }
                }
                Some(k) if out_in_ring => {
                    lookup_mut(arena, k)?.next_min = Some(next_out);
                    incoming = None;
                }
                Some(_) => {}
            }
        }

        if let Some(k) = incoming {
            let Some(first) = first_out else {
                return Err(Error::topology(origin, "found null for first outgoing dirEdge"));
            };
            lookup_mut(arena, k)?.next_min = Some(first);
        }
        Ok(())
    }

    /// Links every incoming edge to the next outgoing edge in star
    /// (counter-clockwise) order, regardless of result flags.
    pub fn link_all_directed_edges(&self, arena: &mut DirectedEdgeArena) -> Result<()> {
        let mut prev_out: Option<DirectedEdgeKey> = None;
        let mut first_in: Option<DirectedEdgeKey> = None;
        for &next_out in self.edges.iter().rev() {
            let next_in = lookup(arena, next_out)?.sym();
            if first_in.is_none() {
                first_in = Some(next_in);
            }
            if let Some(prev) = prev_out {
                lookup_mut(arena, next_in)?.next = Some(prev);
            }
            prev_out = Some(next_out);
        }
        if let (Some(first), Some(prev)) = (first_in, prev_out) {
            lookup_mut(arena, first)?.next = Some(prev);
        }
        Ok(())
    }

    /// Marks line edges at this node as covered when they run inside the
    /// result area.
    ///
    /// The starting location is taken from the first result area edge met;
    /// from there the sweep toggles between interior and exterior each time
    /// it crosses a result edge.
    pub fn find_covered_line_edges(
        &self,
        arena: &DirectedEdgeArena,
        edges: &mut SlotMap<EdgeKey, Edge>,
    ) -> Result<()> {
        let mut start = Location::None;
        for &k in &self.edges {
            let out = lookup(arena, k)?;
            if out.is_line_edge() {
                continue;
            }
            if out.is_in_result() {
                start = Location::Interior;
                break;
            }
            if lookup(arena, out.sym())?.is_in_result() {
                start = Location::Exterior;
                break;
            }
        }
        if !start.is_known() {
            return Ok(());
        }

        let mut current = start;
        for &k in &self.edges {
            let out = lookup(arena, k)?;
            if out.is_line_edge() {
                let edge_key = out.edge();
                let edge = edges
                    .get_mut(edge_key)
                    .ok_or(Error::NotFound(edge_key.into()))?;
                edge.set_covered(current == Location::Interior);
            } else {
                if out.is_in_result() {
                    current = Location::Exterior;
                }
                if lookup(arena, out.sym())?.is_in_result() {
                    current = Location::Interior;
                }
            }
        }
        Ok(())
    }
}
