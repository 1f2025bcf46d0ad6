// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! One direction of travel along an edge.

use slotmap::SlotMap;

use crate::component::{ComponentFlags, GraphComponent};
use crate::coord::Coordinate;
use crate::edge::Edge;
use crate::edge_end::EdgeEnd;
use crate::error::{Error, Result};
use crate::keys::{DirectedEdgeKey, EdgeKey, EdgeRingKey, NodeKey};
use crate::label::{Label, Location, Position};

/// Arena of directed edges.
pub(crate) type DirectedEdgeArena = SlotMap<DirectedEdgeKey, DirectedEdge>;

pub(crate) fn lookup(arena: &DirectedEdgeArena, key: DirectedEdgeKey) -> Result<&DirectedEdge> {
    arena.get(key).ok_or(Error::NotFound(key.into()))
}

pub(crate) fn lookup_mut(
    arena: &mut DirectedEdgeArena,
    key: DirectedEdgeKey,
) -> Result<&mut DirectedEdge> {
    arena.get_mut(key).ok_or(Error::NotFound(key.into()))
}

/// A directed edge: an [`EdgeEnd`] plus the links used to walk rings.
///
/// Each edge has two directed edges, each other's `sym`. The forward one
/// starts at the edge's first point and carries the edge's label as is;
/// the reverse one carries it with sides swapped.
#[derive(Debug, Clone)]
pub struct DirectedEdge {
    end: EdgeEnd,
    forward: bool,
    pub(crate) sym: DirectedEdgeKey,
    pub(crate) next: Option<DirectedEdgeKey>,
    pub(crate) next_min: Option<DirectedEdgeKey>,
    pub(crate) edge_ring: Option<EdgeRingKey>,
    pub(crate) min_edge_ring: Option<EdgeRingKey>,
    pub(crate) node: Option<NodeKey>,
    pub(crate) flags: ComponentFlags,
}

impl DirectedEdge {
    /// Creates the directed edge of `edge` in the given direction. The
    /// `sym` link is filled in by the graph.
    pub fn new(key: EdgeKey, edge: &Edge, forward: bool) -> Result<Self> {
        let pts = edge.coordinates();
        let n = pts.len();
        let end = if forward {
            EdgeEnd::new(key, pts[0], pts[1], *edge.label())?
        } else {
            let label = edge.label().flipped();
            EdgeEnd::new(key, pts[n - 1], pts[n - 2], label)?
        };
        Ok(Self {
            end,
            forward,
            sym: DirectedEdgeKey::default(),
            next: None,
            next_min: None,
            edge_ring: None,
            min_edge_ring: None,
            node: None,
            flags: ComponentFlags::default(),
        })
    }

    pub fn end(&self) -> &EdgeEnd {
        &self.end
    }

    pub fn end_mut(&mut self) -> &mut EdgeEnd {
        &mut self.end
    }

    pub fn edge(&self) -> EdgeKey {
        self.end.edge()
    }

    pub fn label(&self) -> &Label {
        self.end.label()
    }

    pub fn label_mut(&mut self) -> &mut Label {
        self.end.label_mut()
    }

    /// The origin.
    pub fn coordinate(&self) -> Coordinate {
        self.end.coordinate()
    }

    pub fn is_forward(&self) -> bool {
        self.forward
    }

    pub fn sym(&self) -> DirectedEdgeKey {
        self.sym
    }

    pub fn next(&self) -> Option<DirectedEdgeKey> {
        self.next
    }

    pub fn next_min(&self) -> Option<DirectedEdgeKey> {
        self.next_min
    }

    pub fn edge_ring(&self) -> Option<EdgeRingKey> {
        self.edge_ring
    }

    pub fn min_edge_ring(&self) -> Option<EdgeRingKey> {
        self.min_edge_ring
    }

    /// The origin node, once inserted into a graph.
    pub fn node(&self) -> Option<NodeKey> {
        self.node
    }

    pub fn is_in_result(&self) -> bool {
        self.flags.in_result
    }

    pub fn set_in_result(&mut self, in_result: bool) {
        self.flags.in_result = in_result;
    }

    pub fn is_visited(&self) -> bool {
        self.flags.visited
    }

    pub fn set_visited(&mut self, visited: bool) {
        self.flags.visited = visited;
    }

    /// A line edge, or an area edge lying wholly in the exterior of every
    /// area operand it belongs to.
    pub fn is_line_edge(&self) -> bool {
        let label = self.label();
        let is_line = label.is_line(0) || label.is_line(1);
        let exterior_if_area = |geom: usize| {
            !label.is_area_for(geom) || label.all_positions_equal(geom, Location::Exterior)
        };
        is_line && exterior_if_area(0) && exterior_if_area(1)
    }

    /// An area edge with the interior of both operands on both sides.
    pub fn is_interior_area_edge(&self) -> bool {
        let label = self.label();
        (0..2).all(|geom| {
            label.is_area_for(geom)
                && label.get_location(geom, Position::Left) == Location::Interior
                && label.get_location(geom, Position::Right) == Location::Interior
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn c(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    fn key() -> EdgeKey {
        let mut keys: SlotMap<EdgeKey, ()> = SlotMap::with_key();
        keys.insert(())
    }

    #[test]
    fn reverse_direction_flips_label() {
        let label = Label::area(0, Location::Boundary, Location::Exterior, Location::Interior);
        let edge = Edge::new(vec![c(0.0, 0.0), c(5.0, 0.0), c(5.0, 5.0)], label).unwrap();
        let fwd = DirectedEdge::new(key(), &edge, true).unwrap();
        let rev = DirectedEdge::new(key(), &edge, false).unwrap();

        assert_eq!(fwd.coordinate(), c(0.0, 0.0));
        assert_eq!(fwd.end().direction_point(), c(5.0, 0.0));
        assert_eq!(rev.coordinate(), c(5.0, 5.0));
        assert_eq!(rev.end().direction_point(), c(5.0, 0.0));
        assert_eq!(fwd.label().get_location(0, Position::Right), Location::Interior);
        assert_eq!(rev.label().get_location(0, Position::Right), Location::Exterior);
    }

    #[test]
    fn line_and_interior_area_classification() {
        let line = Edge::new(vec![c(0.0, 0.0), c(1.0, 0.0)], Label::line(0, Location::Interior)).unwrap();
        let de = DirectedEdge::new(key(), &line, true).unwrap();
        assert!(de.is_line_edge());
        assert!(!de.is_interior_area_edge());

        let interior = Edge::new(
            vec![c(0.0, 0.0), c(1.0, 0.0)],
            Label::new_area(Location::Interior, Location::Interior, Location::Interior),
        )
        .unwrap();
        let de = DirectedEdge::new(key(), &interior, true).unwrap();
        assert!(de.is_interior_area_edge());
        assert!(!de.is_line_edge());
    }

    #[test]
    fn line_inside_area_is_not_line_edge() {
        let mut label = Label::line(0, Location::Interior);
        label.set_location(1, Position::On, Location::Interior);
        label.set_location(1, Position::Left, Location::Interior);
        label.set_location(1, Position::Right, Location::Interior);
        let edge = Edge::new(vec![c(0.0, 0.0), c(1.0, 0.0)], label).unwrap();
        let de = DirectedEdge::new(key(), &edge, true).unwrap();
        assert!(!de.is_line_edge());
    }
}
