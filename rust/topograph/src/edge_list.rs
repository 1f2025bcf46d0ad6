// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Spatially indexed edge collection with exact duplicate lookup.

use crate::config::TopologyConfig;
use crate::coord::Envelope;
use crate::edge::Edge;
use crate::index::EnvelopeIndex;

/// An ordered list of edges with an envelope index.
///
/// [`add`](EdgeList::add) never deduplicates; callers that want unique
/// edges check [`find_equal_edge`](EdgeList::find_equal_edge) first.
/// Matching is exact, with no tolerance.
#[derive(Debug, Clone)]
pub struct EdgeList {
    edges: Vec<Edge>,
    index: EnvelopeIndex<usize>,
}

impl Default for EdgeList {
    fn default() -> Self {
        Self::new(&TopologyConfig::default(), &Envelope::empty(), 0)
    }
}

impl EdgeList {
    /// Creates a list whose index is sized for `expected` edges inside
    /// `extent`.
    pub fn new(config: &TopologyConfig, extent: &Envelope, expected: usize) -> Self {
        Self {
            edges: Vec::with_capacity(expected),
            index: EnvelopeIndex::with_config(config, extent, expected),
        }
    }

    /// Appends an edge and returns its position.
    pub fn add(&mut self, edge: Edge) -> usize {
        let i = self.edges.len();
        self.index.insert(edge.envelope(), i);
        self.edges.push(edge);
        i
    }

    /// Position of the first edge equal (in either direction) to `edge`.
    pub fn find_equal_edge_index(&self, edge: &Edge) -> Option<usize> {
        self.index
            .query(edge.envelope())
            .into_iter()
            .find(|&i| self.edges[i] == *edge)
    }

    /// The first edge equal (in either direction) to `edge`.
    pub fn find_equal_edge(&self, edge: &Edge) -> Option<&Edge> {
        self.find_equal_edge_index(edge).map(|i| &self.edges[i])
    }

    pub fn get(&self, i: usize) -> Option<&Edge> {
        self.edges.get(i)
    }

    pub fn get_mut(&mut self, i: usize) -> Option<&mut Edge> {
        self.edges.get_mut(i)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Edge> {
        self.edges.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Edge> {
        self.edges.iter_mut()
    }

    pub fn into_edges(self) -> Vec<Edge> {
        self.edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Coordinate;
    use crate::label::{Label, Location};

    fn c(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    fn edge(coords: Vec<Coordinate>) -> Edge {
        Edge::new(coords, Label::line(0, Location::Interior)).unwrap()
    }

    #[test]
    fn finds_pre_existing_match_in_either_direction() {
        let pts = vec![c(0.0, 0.0), c(3.0, 1.0), c(6.0, 0.0)];
        let reversed: Vec<Coordinate> = pts.iter().rev().copied().collect();

        let mut list = EdgeList::default();
        list.add(edge(pts.clone()));
        list.add(edge(reversed));
        assert_eq!(list.len(), 2);

        let probe = edge(pts);
        assert_eq!(list.find_equal_edge_index(&probe), Some(0));
        assert!(list.find_equal_edge(&probe).is_some());
    }

    #[test]
    fn no_match_for_different_edge() {
        let mut list = EdgeList::default();
        list.add(edge(vec![c(0.0, 0.0), c(1.0, 0.0)]));
        assert!(list.find_equal_edge(&edge(vec![c(0.0, 0.0), c(2.0, 0.0)])).is_none());
        assert!(list.find_equal_edge(&edge(vec![c(5.0, 5.0), c(6.0, 5.0)])).is_none());
    }

    #[test]
    fn sized_index_many_edges() {
        let extent = Envelope::of_points(&c(0.0, 0.0), &c(100.0, 100.0));
        let mut list = EdgeList::new(&TopologyConfig::default(), &extent, 100);
        for i in 0..100 {
            let x = f64::from(i);
            list.add(edge(vec![c(x, 0.0), c(x, 100.0)]));
        }
        let probe = edge(vec![c(42.0, 100.0), c(42.0, 0.0)]);
        assert_eq!(list.find_equal_edge_index(&probe), Some(42));
        assert_eq!(list.iter().count(), 100);
    }
}
