// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Closed walks of directed edges.
//!
//! A ring is traced by following next links from a start directed edge
//! until the walk returns to it. Two link sets exist: the maximal links
//! join result edges into the largest possible rings, the minimal links
//! split those rings at nodes where they touch themselves. [`RingPolicy`]
//! selects which links a walk follows and which ring slot it fills.

use slotmap::SlotMap;

use crate::component::GraphComponent;
use crate::coord::{Coordinate, Envelope};
use crate::directed_edge::{lookup, lookup_mut, DirectedEdge};
use crate::error::{Error, Result};
use crate::graph::PlanarGraph;
use crate::keys::{DirectedEdgeKey, EdgeRingKey};
use crate::label::{Label, Location, Position};
use crate::orientation::{is_ccw, is_in_ring};

/// Which next links a ring walk follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RingPolicy {
    Maximal,
    Minimal,
}

impl RingPolicy {
    pub(crate) fn next_of(self, de: &DirectedEdge) -> Option<DirectedEdgeKey> {
        match self {
            RingPolicy::Maximal => de.next(),
            RingPolicy::Minimal => de.next_min(),
        }
    }

    pub(crate) fn ring_of(self, de: &DirectedEdge) -> Option<EdgeRingKey> {
        match self {
            RingPolicy::Maximal => de.edge_ring(),
            RingPolicy::Minimal => de.min_edge_ring(),
        }
    }

    fn set_ring(self, de: &mut DirectedEdge, ring: Option<EdgeRingKey>) {
        match self {
            RingPolicy::Maximal => de.edge_ring = ring,
            RingPolicy::Minimal => de.min_edge_ring = ring,
        }
    }
}

/// A closed ring traced through the graph.
///
/// Counter-clockwise rings are holes and clockwise rings are shells.
#[derive(Debug, Clone)]
pub struct EdgeRing {
    policy: RingPolicy,
    start: DirectedEdgeKey,
    edges: Vec<DirectedEdgeKey>,
    coords: Vec<Coordinate>,
    env: Envelope,
    label: Label,
    is_hole: bool,
    max_node_degree: usize,
    shell: Option<EdgeRingKey>,
    holes: Vec<EdgeRingKey>,
}

impl EdgeRing {
    fn new(policy: RingPolicy, start: DirectedEdgeKey) -> Self {
        Self {
            policy,
            start,
            edges: Vec::new(),
            coords: Vec::new(),
            env: Envelope::empty(),
            label: Label::default(),
            is_hole: false,
            max_node_degree: 0,
            shell: None,
            holes: Vec::new(),
        }
    }

    pub fn policy(&self) -> RingPolicy {
        self.policy
    }

    pub fn start(&self) -> DirectedEdgeKey {
        self.start
    }

    /// The directed edges of the ring in walk order.
    pub fn edges(&self) -> &[DirectedEdgeKey] {
        &self.edges
    }

    /// The closed point list.
    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coords
    }

    pub fn envelope(&self) -> &Envelope {
        &self.env
    }

    /// For each operand, the location on the ring's right side.
    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn is_hole(&self) -> bool {
        self.is_hole
    }

    pub fn is_shell(&self) -> bool {
        !self.is_hole
    }

    /// Returns `true` if the ring's edges come from a single operand.
    pub fn is_isolated(&self) -> bool {
        self.label.geometry_count() == 1
    }

    /// Twice the largest number of this ring's edges leaving any one of its
    /// nodes. A value above 2 means the ring touches itself.
    pub fn max_node_degree(&self) -> usize {
        self.max_node_degree
    }

    pub fn shell(&self) -> Option<EdgeRingKey> {
        self.shell
    }

    pub fn holes(&self) -> &[EdgeRingKey] {
        &self.holes
    }

    pub fn add_hole(&mut self, hole: EdgeRingKey) {
        self.holes.push(hole);
    }

    /// Returns `true` if `p` is inside or on the ring and not inside any of
    /// its holes.
    pub fn contains_point(&self, p: &Coordinate, rings: &SlotMap<EdgeRingKey, EdgeRing>) -> bool {
        if !self.env.contains_point(p) || !is_in_ring(p, &self.coords) {
            return false;
        }
        !self
            .holes
            .iter()
            .filter_map(|&h| rings.get(h))
            .any(|hole| hole.contains_point(p, rings))
    }

    /// The shell's points followed by the point lists of its holes.
    pub fn to_polygon(
        &self,
        rings: &SlotMap<EdgeRingKey, EdgeRing>,
    ) -> (Vec<Coordinate>, Vec<Vec<Coordinate>>) {
        let holes = self
            .holes
            .iter()
            .filter_map(|&h| rings.get(h))
            .map(|hole| hole.coords.clone())
            .collect();
        (self.coords.clone(), holes)
    }

    fn merge_label(&mut self, de_label: &Label) {
        for geom in 0..2 {
            let loc = de_label.get_location(geom, Position::Right);
            if loc.is_known() && self.label.on(geom) == Location::None {
                self.label.set_location(geom, Position::On, loc);
            }
        }
    }

    fn add_points(&mut self, pts: &[Coordinate], forward: bool, first: bool) {
        let skip = usize::from(!first);
        if forward {
            self.coords.extend_from_slice(&pts[skip..]);
        } else {
            let end = pts.len() - skip;
            self.coords.extend(pts[..end].iter().rev());
        }
    }
}

impl PlanarGraph {
    /// Traces a ring from `start` following the links selected by `policy`.
    ///
    /// Every visited directed edge is assigned to the new ring. The walk
    /// fails with a topology error if a link is missing, if a directed edge
    /// of this ring is met twice, or if an edge without area labels is
    /// reached; the partial ring is discarded.
    pub fn build_edge_ring(
        &mut self,
        start: DirectedEdgeKey,
        policy: RingPolicy,
    ) -> Result<EdgeRingKey> {
        let key = self.rings.insert(EdgeRing::new(policy, start));
        match self.trace_ring(key, start, policy) {
            Ok(ring) => {
                self.rings[key] = ring;
                Ok(key)
            }
            Err(err) => {
                self.rings.remove(key);
                for de in self.directed.values_mut() {
                    if policy.ring_of(de) == Some(key) {
                        policy.set_ring(de, None);
                    }
                }
                Err(err)
            }
        }
    }

    fn trace_ring(
        &mut self,
        key: EdgeRingKey,
        start: DirectedEdgeKey,
        policy: RingPolicy,
    ) -> Result<EdgeRing> {
        let mut ring = EdgeRing::new(policy, start);
        let mut current = start;
        let mut first = true;
        loop {
            let de = lookup(&self.directed, current)?;
            let origin = de.coordinate();
            if policy.ring_of(de) == Some(key) {
                tracing::warn!(x = origin.x, y = origin.y, "Directed edge visited twice");
                return Err(Error::topology(
                    origin,
                    "directed edge visited twice during ring-building",
                ));
            }
            if !de.label().is_area() {
                return Err(Error::topology(origin, "found non-area edge in ring"));
            }
            ring.edges.push(current);
            ring.merge_label(de.label());
            let forward = de.is_forward();
            let next = policy.next_of(de);
            let edge = self
                .edges
                .get(de.edge())
                .ok_or(Error::NotFound(de.edge().into()))?;
            ring.add_points(edge.coordinates(), forward, first);
            first = false;

            policy.set_ring(lookup_mut(&mut self.directed, current)?, Some(key));
            current = next.ok_or_else(|| Error::topology(origin, "found null directed edge"))?;
            if current == start {
                break;
            }
        }

        if ring.coords.len() < 4 {
            return Err(Error::TooFewPoints {
                expected: 4,
                found: ring.coords.len(),
            });
        }
        ring.env = Envelope::from_coords(&ring.coords);
        ring.is_hole = is_ccw(&ring.coords);

        let mut degree = 0;
        for &de in &ring.edges {
            let node = lookup(&self.directed, de)?
                .node()
                .ok_or_else(|| Error::topology(ring.coords[0], "directed edge has no node"))?;
            let star = &self.nodes.get(node)?.star;
            degree = degree.max(star.outgoing_degree_in_ring(&self.directed, key, policy)?);
        }
        ring.max_node_degree = 2 * degree;
        tracing::trace!(
            points = ring.coords.len(),
            hole = ring.is_hole,
            degree = ring.max_node_degree,
            "Built edge ring"
        );
        Ok(ring)
    }

    /// Marks the edges of a ring as part of the result.
    pub fn set_ring_in_result(&mut self, ring: EdgeRingKey) -> Result<()> {
        let edges = self.ring(ring)?.edges.clone();
        for de in edges {
            let edge = lookup(&self.directed, de)?.edge();
            self.edge_mut(edge)?.set_in_result(true);
        }
        Ok(())
    }

    /// Sets the minimal links of every node on a maximal ring.
    pub fn link_minimal_rings(&mut self, ring: EdgeRingKey) -> Result<()> {
        let edges = self.ring(ring)?.edges.clone();
        for de in edges {
            let d = lookup(&self.directed, de)?;
            let origin = d.coordinate();
            let node = d
                .node()
                .ok_or_else(|| Error::topology(origin, "directed edge has no node"))?;
            let node = self.nodes.get(node)?;
            node.star
                .link_minimal_directed_edges(&mut self.directed, ring, origin)?;
        }
        Ok(())
    }

    /// Traces the minimal rings that make up a maximal ring.
    pub fn build_minimal_rings(&mut self, ring: EdgeRingKey) -> Result<Vec<EdgeRingKey>> {
        let edges = self.ring(ring)?.edges.clone();
        let mut out = Vec::new();
        for de in edges {
            if lookup(&self.directed, de)?.min_edge_ring().is_none() {
                out.push(self.build_edge_ring(de, RingPolicy::Minimal)?);
            }
        }
        Ok(out)
    }

    /// Makes `hole` a hole of `shell`.
    pub fn set_ring_shell(&mut self, hole: EdgeRingKey, shell: EdgeRingKey) -> Result<()> {
        self.rings
            .get_mut(hole)
            .ok_or(Error::NotFound(hole.into()))?
            .shell = Some(shell);
        self.rings
            .get_mut(shell)
            .ok_or(Error::NotFound(shell.into()))?
            .add_hole(hole);
        Ok(())
    }

    /// See [`EdgeRing::contains_point`].
    pub fn ring_contains_point(&self, ring: EdgeRingKey, p: &Coordinate) -> Result<bool> {
        Ok(self.ring(ring)?.contains_point(p, &self.rings))
    }

    /// See [`EdgeRing::to_polygon`].
    pub fn ring_polygon(&self, ring: EdgeRingKey) -> Result<(Vec<Coordinate>, Vec<Vec<Coordinate>>)> {
        Ok(self.ring(ring)?.to_polygon(&self.rings))
    }
}
