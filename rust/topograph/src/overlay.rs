// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Boolean overlay of two operands.
//!
//! The pipeline runs in fixed phases:
//! 1. node every segment against every other one it might touch
//! 2. split edges at their intersections and merge duplicates
//! 3. build the planar graph and label every node and directed edge
//! 4. select the directed edges bounding the result area
//! 5. trace them into rings and collect result lines

use std::cell::RefCell;

use rustc_hash::FxHashMap;

use crate::builder::GraphBuilder;
use crate::component::GraphComponent;
use crate::coord::{CoordKey, Coordinate, Envelope};
use crate::directed_edge::{lookup, lookup_mut};
use crate::edge::Edge;
use crate::edge_list::EdgeList;
use crate::error::{Error, Result};
use crate::graph::PlanarGraph;
use crate::index::EnvelopeIndex;
use crate::intersector::{SegmentIntersector, SegmentRef};
use crate::keys::DirectedEdgeKey;
use crate::label::{Label, Location, Position};
use crate::orientation::locate_in_ring;
use crate::output::RingSet;
use crate::polygon_builder::PolygonBuilder;

/// A boolean set operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OverlayOp {
    Intersection,
    Union,
    Difference,
    SymDifference,
}

impl OverlayOp {
    /// Returns `true` if a point with these locations relative to the two
    /// operands belongs to the result. Boundary counts as interior.
    pub fn is_result_of_op(self, loc0: Location, loc1: Location) -> bool {
        let in0 = matches!(loc0, Location::Interior | Location::Boundary);
        let in1 = matches!(loc1, Location::Interior | Location::Boundary);
        match self {
            OverlayOp::Intersection => in0 && in1,
            OverlayOp::Union => in0 || in1,
            OverlayOp::Difference => in0 && !in1,
            OverlayOp::SymDifference => in0 != in1,
        }
    }

    fn is_result_label(self, label: &Label) -> bool {
        self.is_result_of_op(label.on(0), label.on(1))
    }
}

/// Result of an overlay: area rings plus any line work.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverlayResult {
    pub rings: RingSet,
    pub lines: Vec<Vec<Coordinate>>,
}

impl OverlayResult {
    pub fn is_empty(&self) -> bool {
        self.rings.is_empty() && self.lines.is_empty()
    }
}

/// Computes `op` over the operands in `builder`.
pub fn overlay(builder: &GraphBuilder, op: OverlayOp) -> Result<OverlayResult> {
    let mut graph = build_labelled_graph(builder)?;

    mark_result_area_edges(&mut graph, op)?;
    cancel_duplicate_result_edges(&mut graph)?;

    let mut polygons = PolygonBuilder::new();
    polygons.add(&mut graph)?;
    let rings = RingSet::from_polygons(polygons.polygons(&graph)?);

    let lines = build_lines(&mut graph, &rings, op)?;
    tracing::debug!(
        ?op,
        rings = rings.len(),
        lines = lines.len(),
        "Overlay complete"
    );
    Ok(OverlayResult { rings, lines })
}

/// Nodes and merges the operands' edges and returns the fully labelled
/// planar graph.
pub(crate) fn build_labelled_graph(builder: &GraphBuilder) -> Result<PlanarGraph> {
    let mut edges: Vec<Edge> = builder.edges().to_vec();
    let intersections = compute_intersections(builder, &mut edges);
    tracing::debug!(edges = edges.len(), intersections, "Noded input edges");

    let mut split = Vec::new();
    for edge in &mut edges {
        split.extend(edge.split()?);
    }
    tracing::debug!(count = split.len(), "Split edges");

    let unique = insert_unique_edges(builder, split)?;
    let mut merged = unique.into_edges();
    compute_labels_from_depths(&mut merged);
    let merged = replace_collapsed_edges(merged)?;

    let mut graph = PlanarGraph::new();
    graph.add_edges(merged)?;
    tracing::debug!(
        edges = graph.edge_count(),
        nodes = graph.node_count(),
        "Built planar graph"
    );

    apply_input_node_labels(builder, &mut graph)?;
    compute_labelling(builder, &mut graph)?;
    label_incomplete_nodes(builder, &mut graph)?;
    sync_edge_labels(&mut graph)?;
    Ok(graph)
}

fn compute_intersections(builder: &GraphBuilder, edges: &mut [Edge]) -> usize {
    let geom_of: Vec<usize> = edges
        .iter()
        .map(|e| usize::from(e.label().is_null(0)))
        .collect();

    let mut segments: Vec<(SegmentRef, Envelope)> = Vec::new();
    for (i, edge) in edges.iter().enumerate() {
        let pts = edge.coordinates();
        for s in 0..pts.len() - 1 {
            let seg = SegmentRef { edge: i, segment: s };
            segments.push((seg, Envelope::of_points(&pts[s], &pts[s + 1])));
        }
    }

    let mut index =
        EnvelopeIndex::with_config(builder.config(), builder.envelope(), segments.len());
    for (seg, env) in &segments {
        index.insert(env, *seg);
    }

    let mut self_si = SegmentIntersector::new();
    let mut mutual_si = SegmentIntersector::new().with_record_isolated(true);
    for (a, env) in &segments {
        for b in index.query(env) {
            if b <= *a {
                continue;
            }
            if geom_of[a.edge] == geom_of[b.edge] {
                self_si.add_intersections(edges, *a, b);
            } else {
                mutual_si.add_intersections(edges, *a, b);
            }
        }
    }
    tracing::trace!(
        tests = self_si.test_count() + mutual_si.test_count(),
        proper = self_si.proper_intersection_count() + mutual_si.proper_intersection_count(),
        "Segment intersection"
    );
    self_si.intersection_count() + mutual_si.intersection_count()
}

/// Adds split edges to a fresh list, folding exact duplicates into the
/// first copy: labels merge and depths accumulate.
fn insert_unique_edges(builder: &GraphBuilder, split: Vec<Edge>) -> Result<EdgeList> {
    let mut list = EdgeList::new(builder.config(), builder.envelope(), split.len());
    for edge in split {
        let Some(i) = list.find_equal_edge_index(&edge) else {
            list.add(edge);
            continue;
        };
        let existing = list.get_mut(i).ok_or_else(|| {
            Error::topology(edge.coordinate_at(0), "merged edge index out of range")
        })?;
        let mut incoming = *edge.label();
        if !existing.is_pointwise_equal(&edge) {
            incoming.flip();
        }
        let existing_label = *existing.label();
        let depth = existing.depth_mut();
        if depth.is_null() {
            depth.add(&existing_label);
        }
        depth.add(&incoming);
        existing.label_mut().merge(&incoming);
    }
    tracing::trace!(unique = list.len(), "Merged duplicate edges");
    Ok(list)
}

/// Relabels merged area edges from their depths. An edge with the same
/// depth on both sides for an operand has collapsed to a line for it.
fn compute_labels_from_depths(edges: &mut [Edge]) {
    for edge in edges {
        if edge.depth().is_null() {
            continue;
        }
        edge.depth_mut().normalize();
        let depth = *edge.depth();
        let label = edge.label_mut();
        for geom in 0..2 {
            if label.is_null(geom) || !label.is_area() || depth.is_null_for(geom) {
                continue;
            }
            if depth.delta(geom) == 0 {
                label.to_line(geom);
            } else {
                for side in [Position::Left, Position::Right] {
                    label.set_location(geom, side, depth.location(geom, side));
                }
            }
        }
    }
}

/// Replaces `a b a` area edges by the line `a b`, moved to the end.
fn replace_collapsed_edges(edges: Vec<Edge>) -> Result<Vec<Edge>> {
    let (collapsed, mut kept): (Vec<Edge>, Vec<Edge>) =
        edges.into_iter().partition(Edge::is_collapsed);
    for edge in &collapsed {
        kept.push(edge.collapsed_edge()?);
    }
    Ok(kept)
}

fn apply_input_node_labels(builder: &GraphBuilder, graph: &mut PlanarGraph) -> Result<()> {
    for geom in 0..2 {
        for (coord, loc) in builder.node_locations(geom) {
            if let Some(node) = graph.find_node(&coord) {
                graph
                    .node_mut(node)?
                    .label_mut()
                    .set_location(geom, Position::On, loc);
            }
        }
    }
    Ok(())
}

fn compute_labelling(builder: &GraphBuilder, graph: &mut PlanarGraph) -> Result<()> {
    let cache: RefCell<FxHashMap<(usize, CoordKey), Location>> = RefCell::default();
    let locate_area = |geom: usize, p: &Coordinate| {
        *cache
            .borrow_mut()
            .entry((geom, CoordKey::from(*p)))
            .or_insert_with(|| builder.locate_area(geom, p))
    };

    let keys: Vec<_> = graph.nodes.keys().collect();
    for &key in &keys {
        let node = graph.nodes.get_mut(key)?;
        node.star.compute_labelling(&mut graph.directed, &locate_area)?;
    }
    for &key in &keys {
        graph.nodes.get(key)?.star.merge_sym_labels(&mut graph.directed)?;
    }
    for &key in &keys {
        let node = graph.nodes.get_mut(key)?;
        let star_label = *node.star.label();
        node.label_mut().merge(&star_label);
    }
    Ok(())
}

/// Locates nodes still unknown for an operand and pushes the node labels
/// down to any directed edge still missing locations.
fn label_incomplete_nodes(builder: &GraphBuilder, graph: &mut PlanarGraph) -> Result<()> {
    let keys: Vec<_> = graph.nodes.keys().collect();
    for key in keys {
        let node = graph.nodes.get_mut(key)?;
        let coord = node.coordinate();
        for geom in 0..2 {
            if node.label().is_null(geom) {
                let loc = builder.locate(geom, &coord);
                node.label_mut().set_location(geom, Position::On, loc);
            }
        }
        let label = *node.label();
        node.star.update_labelling(&mut graph.directed, &label)?;
    }
    Ok(())
}

fn sync_edge_labels(graph: &mut PlanarGraph) -> Result<()> {
    let keys: Vec<_> = graph.edges().map(|(k, _)| k).collect();
    for key in keys {
        let (forward, _) = graph
            .directed_edges_of(key)
            .ok_or(Error::NotFound(key.into()))?;
        let label = *lookup(&graph.directed, forward)?.label();
        *graph.edge_mut(key)?.label_mut() = label;
    }
    Ok(())
}

fn mark_result_area_edges(graph: &mut PlanarGraph, op: OverlayOp) -> Result<()> {
    for de in graph.edge_ends().to_vec() {
        let d = lookup_mut(&mut graph.directed, de)?;
        let label = *d.label();
        if label.is_area()
            && !d.is_interior_area_edge()
            && op.is_result_of_op(
                label.get_location(0, Position::Right),
                label.get_location(1, Position::Right),
            )
        {
            d.set_in_result(true);
        }
    }
    Ok(())
}

/// Drops both directions of an edge when both were selected; the edge
/// then lies inside the result.
fn cancel_duplicate_result_edges(graph: &mut PlanarGraph) -> Result<()> {
    for de in graph.edge_ends().to_vec() {
        let d = lookup(&graph.directed, de)?;
        let sym = d.sym();
        if d.is_in_result() && lookup(&graph.directed, sym)?.is_in_result() {
            lookup_mut(&mut graph.directed, de)?.set_in_result(false);
            lookup_mut(&mut graph.directed, sym)?.set_in_result(false);
        }
    }
    Ok(())
}

fn build_lines(graph: &mut PlanarGraph, rings: &RingSet, op: OverlayOp) -> Result<Vec<Vec<Coordinate>>> {
    for (_, node) in graph.nodes.iter() {
        node.star.find_covered_line_edges(&graph.directed, &mut graph.edges)?;
    }

    let ends = graph.edge_ends().to_vec();
    for &de in &ends {
        let d = lookup(&graph.directed, de)?;
        let edge = d.edge();
        let origin = d.coordinate();
        if d.is_line_edge() && !graph.edge(edge)?.is_covered_set() {
            let covered = covered_by_rings(rings, &origin);
            graph.edge_mut(edge)?.set_covered(covered);
        }
    }

    let mut lines = Vec::new();
    for &de in &ends {
        let d = lookup(&graph.directed, de)?;
        let label = *d.label();
        let edge_key = d.edge();
        let edge = graph.edge(edge_key)?;
        let take = if d.is_line_edge() {
            !d.is_visited() && op.is_result_label(&label) && !edge.is_covered()
        } else {
            // Boundary-only touches of the two areas.
            !d.is_visited()
                && !d.is_interior_area_edge()
                && !edge.is_in_result()
                && op == OverlayOp::Intersection
                && op.is_result_label(&label)
        };
        if take {
            lines.push(edge.coordinates().to_vec());
            set_visited_edge(graph, de)?;
            graph.edge_mut(edge_key)?.set_in_result(true);
        }
    }
    Ok(lines)
}

fn set_visited_edge(graph: &mut PlanarGraph, de: DirectedEdgeKey) -> Result<()> {
    let sym = lookup(&graph.directed, de)?.sym();
    lookup_mut(&mut graph.directed, de)?.set_visited(true);
    lookup_mut(&mut graph.directed, sym)?.set_visited(true);
    Ok(())
}

/// Returns `true` if `p` lies inside or on a result polygon.
fn covered_by_rings(rings: &RingSet, p: &Coordinate) -> bool {
    rings.polygons().iter().any(|(shell, holes)| {
        locate_in_ring(p, &shell.coords) != Location::Exterior
            && !holes
                .iter()
                .any(|h| locate_in_ring(p, &h.coords) == Location::Interior)
    })
}
