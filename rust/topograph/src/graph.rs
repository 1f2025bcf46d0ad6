// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planar graph of noded edges.
//!
//! The graph owns every entity in typed arenas:
//! - **Edges** = noded polylines, each with two directed edges
//! - **Nodes** = unique coordinates, each with a star of outgoing directed edges
//! - **Rings** = closed walks of directed edges, built on demand
//!
//! Entities refer to each other by key, so the node / directed edge / ring
//! cycle never becomes an ownership cycle.

use slotmap::{SecondaryMap, SlotMap};

use crate::component::GraphComponent;
use crate::coord::Coordinate;
use crate::directed_edge::{lookup, lookup_mut, DirectedEdge, DirectedEdgeArena};
use crate::edge::Edge;
use crate::edge_ring::EdgeRing;
use crate::error::{Error, Result};
use crate::keys::{DirectedEdgeKey, EdgeKey, EdgeRingKey, NodeKey};
use crate::label::Location;
use crate::node::{Node, NodeMap};

/// A planar graph: edges, their directed edges, nodes and edge rings.
#[derive(Debug, Clone, Default)]
pub struct PlanarGraph {
    pub(crate) edges: SlotMap<EdgeKey, Edge>,
    edge_order: Vec<EdgeKey>,
    pub(crate) directed: DirectedEdgeArena,
    edge_ends: Vec<DirectedEdgeKey>,
    edge_pairs: SecondaryMap<EdgeKey, (DirectedEdgeKey, DirectedEdgeKey)>,
    pub(crate) nodes: NodeMap,
    pub(crate) rings: SlotMap<EdgeRingKey, EdgeRing>,
}

impl PlanarGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the node at `coord`, creating it if absent.
    pub fn add_node(&mut self, coord: Coordinate) -> NodeKey {
        self.nodes.add_node(coord)
    }

    /// Inserts edges with both their directed edges.
    ///
    /// Each directed edge is placed in the star of its origin node; nodes
    /// are created as needed.
    pub fn add_edges(&mut self, edges: impl IntoIterator<Item = Edge>) -> Result<()> {
        for edge in edges {
            let key = self.edges.insert(edge);
            self.edge_order.push(key);

            let edge = &self.edges[key];
            let forward = self.directed.insert(DirectedEdge::new(key, edge, true)?);
            let reverse = self.directed.insert(DirectedEdge::new(key, edge, false)?);
            self.directed[forward].sym = reverse;
            self.directed[reverse].sym = forward;
            self.edge_pairs.insert(key, (forward, reverse));

            for de in [forward, reverse] {
                self.edge_ends.push(de);
                let origin = self.directed[de].coordinate();
                let node = self.nodes.add_node(origin);
                self.directed[de].node = Some(node);
                self.nodes.get_mut(node)?.star.insert(de, &self.directed)?;
            }
        }
        tracing::trace!(
            edges = self.edges.len(),
            nodes = self.nodes.len(),
            "Added edges to planar graph"
        );
        Ok(())
    }

    pub fn find_node(&self, coord: &Coordinate) -> Option<NodeKey> {
        self.nodes.find(coord)
    }

    pub fn node(&self, key: NodeKey) -> Result<&Node> {
        self.nodes.get(key)
    }

    pub fn node_mut(&mut self, key: NodeKey) -> Result<&mut Node> {
        self.nodes.get_mut(key)
    }

    /// Nodes in coordinate order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeKey, &Node)> + '_ {
        self.nodes.iter()
    }

    pub fn edge(&self, key: EdgeKey) -> Result<&Edge> {
        self.edges.get(key).ok_or(Error::NotFound(key.into()))
    }

    pub fn edge_mut(&mut self, key: EdgeKey) -> Result<&mut Edge> {
        self.edges.get_mut(key).ok_or(Error::NotFound(key.into()))
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeKey, &Edge)> + '_ {
        self.edge_order.iter().map(move |&k| (k, &self.edges[k]))
    }

    pub fn directed_edge(&self, key: DirectedEdgeKey) -> Result<&DirectedEdge> {
        lookup(&self.directed, key)
    }

    pub fn directed_edge_mut(&mut self, key: DirectedEdgeKey) -> Result<&mut DirectedEdge> {
        lookup_mut(&mut self.directed, key)
    }

    /// Directed edges in insertion order, forward before reverse.
    pub fn edge_ends(&self) -> &[DirectedEdgeKey] {
        &self.edge_ends
    }

    /// The forward and reverse directed edges of `edge`.
    pub fn directed_edges_of(&self, edge: EdgeKey) -> Option<(DirectedEdgeKey, DirectedEdgeKey)> {
        self.edge_pairs.get(edge).copied()
    }

    pub fn ring(&self, key: EdgeRingKey) -> Result<&EdgeRing> {
        self.rings.get(key).ok_or(Error::NotFound(key.into()))
    }

    pub fn rings(&self) -> impl Iterator<Item = (EdgeRingKey, &EdgeRing)> + '_ {
        self.rings.iter()
    }

    /// The edge whose first segment runs from `p0` to `p1`.
    pub fn find_edge(&self, p0: &Coordinate, p1: &Coordinate) -> Option<EdgeKey> {
        self.edges().find_map(|(k, e)| {
            let pts = e.coordinates();
            (pts[0] == *p0 && pts[1] == *p1).then_some(k)
        })
    }

    /// The edge that starts with segment `p0`-`p1` when read in either
    /// direction.
    pub fn find_edge_in_same_direction(&self, p0: &Coordinate, p1: &Coordinate) -> Option<EdgeKey> {
        self.edges().find_map(|(k, e)| {
            let pts = e.coordinates();
            let n = pts.len();
            let forward = pts[0] == *p0 && pts[1] == *p1;
            let reverse = pts[n - 1] == *p0 && pts[n - 2] == *p1;
            (forward || reverse).then_some(k)
        })
    }

    /// Returns `true` if a node at `coord` lies on the boundary of operand
    /// `geom`.
    pub fn is_boundary_node(&self, geom: usize, coord: &Coordinate) -> bool {
        self.find_node(coord)
            .and_then(|k| self.nodes.get(k).ok())
            .is_some_and(|n| n.label().on(geom) == Location::Boundary)
    }

    /// Links the in-result directed edges at every node into maximal rings.
    pub fn link_result_directed_edges(&mut self) -> Result<()> {
        for (_, node) in self.nodes.iter() {
            node.star
                .link_result_directed_edges(&mut self.directed, node.coordinate())?;
        }
        Ok(())
    }

    /// Links every directed edge at every node, ignoring result flags.
    pub fn link_all_directed_edges(&mut self) -> Result<()> {
        for (_, node) in self.nodes.iter() {
            node.star.link_all_directed_edges(&mut self.directed)?;
        }
        Ok(())
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn directed_edge_count(&self) -> usize {
        self.directed.len()
    }

    pub fn ring_count(&self) -> usize {
        self.rings.len()
    }
}
