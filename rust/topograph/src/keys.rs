// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Key types for arena-based graph storage.
//!
//! Nodes, edges, directed edges and edge rings refer to each other through
//! these keys instead of references, so the cyclic node / directed edge /
//! ring structure never forms an ownership cycle. Keys are created by
//! `slotmap::SlotMap` and stay valid for the lifetime of the graph.

use slotmap::new_key_type;

new_key_type! {
    /// Key for a node (unique coordinate of the planar graph).
    pub struct NodeKey;

    /// Key for an undirected edge (polyline between two nodes).
    pub struct EdgeKey;

    /// Key for one direction of travel along an edge.
    pub struct DirectedEdgeKey;

    /// Key for a closed ring of directed edges.
    pub struct EdgeRingKey;
}

/// A key that can reference any graph entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphKey {
    Node(NodeKey),
    Edge(EdgeKey),
    DirectedEdge(DirectedEdgeKey),
    EdgeRing(EdgeRingKey),
}

impl GraphKey {
    /// Returns the kind of entity this key refers to.
    pub fn kind(&self) -> ComponentKind {
        match self {
            GraphKey::Node(_) => ComponentKind::Node,
            GraphKey::Edge(_) => ComponentKind::Edge,
            GraphKey::DirectedEdge(_) => ComponentKind::DirectedEdge,
            GraphKey::EdgeRing(_) => ComponentKind::EdgeRing,
        }
    }
}

/// Discriminant for graph entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKind {
    Node = 0,
    Edge = 1,
    DirectedEdge = 2,
    EdgeRing = 3,
}

impl ComponentKind {
    /// Returns the kind name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Node => "Node",
            ComponentKind::Edge => "Edge",
            ComponentKind::DirectedEdge => "DirectedEdge",
            ComponentKind::EdgeRing => "EdgeRing",
        }
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<NodeKey> for GraphKey {
    fn from(k: NodeKey) -> Self {
        GraphKey::Node(k)
    }
}

impl From<EdgeKey> for GraphKey {
    fn from(k: EdgeKey) -> Self {
        GraphKey::Edge(k)
    }
}

impl From<DirectedEdgeKey> for GraphKey {
    fn from(k: DirectedEdgeKey) -> Self {
        GraphKey::DirectedEdge(k)
    }
}

impl From<EdgeRingKey> for GraphKey {
    fn from(k: EdgeRingKey) -> Self {
        GraphKey::EdgeRing(k)
    }
}
