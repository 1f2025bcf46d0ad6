// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Graph nodes and the coordinate-keyed node map.

use std::collections::BTreeMap;

use slotmap::SlotMap;

use crate::component::{ComponentFlags, GraphComponent};
use crate::coord::{CoordKey, Coordinate};
use crate::error::{Error, Result};
use crate::keys::NodeKey;
use crate::label::{Label, Location, Position};
use crate::matrix::{Dimension, IntersectionMatrix};
use crate::star::DirectedEdgeStar;

/// A point where edges meet, with the star of edges leaving it.
#[derive(Debug, Clone)]
pub struct Node {
    coord: Coordinate,
    label: Label,
    flags: ComponentFlags,
    pub(crate) star: DirectedEdgeStar,
}

impl Node {
    pub fn new(coord: Coordinate) -> Self {
        Self {
            coord,
            label: Label::default(),
            flags: ComponentFlags::default(),
            star: DirectedEdgeStar::new(),
        }
    }

    pub fn star(&self) -> &DirectedEdgeStar {
        &self.star
    }

    /// Records the node's own location for one operand, merging a boundary
    /// seen twice into the interior (the mod-2 rule for line endpoints).
    pub fn set_on_location_mod2(&mut self, geom: usize) {
        let loc = match self.label.on(geom) {
            Location::Boundary => Location::Interior,
            _ => Location::Boundary,
        };
        self.label.set_location(geom, Position::On, loc);
    }
}

impl GraphComponent for Node {
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
        self.coord
    }

    fn is_isolated(&self) -> bool {
        self.label.geometry_count() == 1
    }

    fn compute_im(&self, im: &mut IntersectionMatrix) {
        im.set_at_least_if_valid(self.label.on(0), self.label.on(1), Dimension::Point);
    }
}

/// Nodes of a graph, unique per coordinate.
///
/// Lookup is by exact `(x, y)`; iteration runs in coordinate order so
/// every walk over the nodes is deterministic.
#[derive(Debug, Clone, Default)]
pub struct NodeMap {
    nodes: SlotMap<NodeKey, Node>,
    by_coord: BTreeMap<CoordKey, NodeKey>,
}

impl NodeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the node at `coord`, creating it if absent.
    pub fn add_node(&mut self, coord: Coordinate) -> NodeKey {
        if let Some(&key) = self.by_coord.get(&CoordKey::from(coord)) {
            return key;
        }
        let key = self.nodes.insert(Node::new(coord));
        self.by_coord.insert(CoordKey::from(coord), key);
        key
    }

    pub fn find(&self, coord: &Coordinate) -> Option<NodeKey> {
        self.by_coord.get(&CoordKey::from(*coord)).copied()
    }

    pub fn get(&self, key: NodeKey) -> Result<&Node> {
        self.nodes.get(key).ok_or(Error::NotFound(key.into()))
    }

    pub fn get_mut(&mut self, key: NodeKey) -> Result<&mut Node> {
        self.nodes.get_mut(key).ok_or(Error::NotFound(key.into()))
    }

    /// Node keys in coordinate order.
    pub fn keys(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.by_coord.values().copied()
    }

    /// Nodes in coordinate order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeKey, &Node)> + '_ {
        self.by_coord.values().map(move |&k| (k, &self.nodes[k]))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
