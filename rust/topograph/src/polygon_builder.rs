// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Assembles result polygons from the in-result directed edges of a graph.

use crate::coord::Coordinate;
use crate::directed_edge::lookup;
use crate::edge_ring::RingPolicy;
use crate::error::{Error, Result};
use crate::graph::PlanarGraph;
use crate::keys::EdgeRingKey;
use crate::orientation::is_in_ring;

/// Shell and hole point lists of one polygon.
pub type PolygonRings = (Vec<Coordinate>, Vec<Vec<Coordinate>>);

/// Builds shells with their holes.
///
/// In-result directed edges are first linked into maximal rings. A maximal
/// ring that passes through one of its nodes more than once is split into
/// minimal rings, of which at most one may be a shell. Holes left without a
/// shell are then assigned to the smallest shell containing them.
#[derive(Debug, Default)]
pub struct PolygonBuilder {
    shells: Vec<EdgeRingKey>,
}

impl PolygonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the result area of `graph`.
    pub fn add(&mut self, graph: &mut PlanarGraph) -> Result<()> {
        graph.link_result_directed_edges()?;
        let maximal = build_maximal_rings(graph)?;

        let mut free_holes = Vec::new();
        let mut rings = Vec::new();
        for ring in maximal {
            if graph.ring(ring)?.max_node_degree() > 2 {
                graph.link_minimal_rings(ring)?;
                let minimal = graph.build_minimal_rings(ring)?;
                match find_shell(graph, &minimal)? {
                    Some(shell) => {
                        for &r in &minimal {
                            if graph.ring(r)?.is_hole() {
                                graph.set_ring_shell(r, shell)?;
                            }
                        }
                        self.shells.push(shell);
                    }
                    None => free_holes.extend(minimal),
                }
            } else {
                rings.push(ring);
            }
        }

        for ring in rings {
            if graph.ring(ring)?.is_hole() {
                free_holes.push(ring);
            } else {
                self.shells.push(ring);
            }
        }

        for hole in free_holes {
            if graph.ring(hole)?.shell().is_some() {
                continue;
            }
            match find_containing_shell(graph, hole, &self.shells)? {
                Some(shell) => graph.set_ring_shell(hole, shell)?,
                None => {
                    let at = graph.ring(hole)?.coordinates()[0];
                    tracing::warn!(x = at.x, y = at.y, "Hole outside every shell");
                    return Err(Error::topology(at, "unable to assign hole to a shell"));
                }
            }
        }

        tracing::debug!(shells = self.shells.len(), rings = graph.ring_count(), "Built polygons");
        Ok(())
    }

    /// The shells found so far, in discovery order.
    pub fn shells(&self) -> &[EdgeRingKey] {
        &self.shells
    }

    /// Point lists of every polygon.
    pub fn polygons(&self, graph: &PlanarGraph) -> Result<Vec<PolygonRings>> {
        self.shells.iter().map(|&s| graph.ring_polygon(s)).collect()
    }
}

fn build_maximal_rings(graph: &mut PlanarGraph) -> Result<Vec<EdgeRingKey>> {
    let mut out = Vec::new();
    for de in graph.edge_ends().to_vec() {
        let d = lookup(&graph.directed, de)?;
        if d.is_in_result() && d.label().is_area() && d.edge_ring().is_none() {
            let ring = graph.build_edge_ring(de, RingPolicy::Maximal)?;
            graph.set_ring_in_result(ring)?;
            out.push(ring);
        }
    }
    tracing::trace!(count = out.len(), "Built maximal rings");
    Ok(out)
}

fn find_shell(graph: &PlanarGraph, rings: &[EdgeRingKey]) -> Result<Option<EdgeRingKey>> {
    let mut shell = None;
    for &r in rings {
        let ring = graph.ring(r)?;
        if ring.is_shell() {
            if shell.is_some() {
                return Err(Error::topology(
                    ring.coordinates()[0],
                    "found two shells in minimal edge ring list",
                ));
            }
            shell = Some(r);
        }
    }
    Ok(shell)
}

/// The smallest shell whose envelope holds the hole's and whose ring holds
/// a point of the hole that is not a vertex of the shell.
fn find_containing_shell(
    graph: &PlanarGraph,
    hole: EdgeRingKey,
    shells: &[EdgeRingKey],
) -> Result<Option<EdgeRingKey>> {
    let hole = graph.ring(hole)?;
    let hole_env = hole.envelope();
    let mut best: Option<EdgeRingKey> = None;
    for &s in shells {
        let shell = graph.ring(s)?;
        let shell_env = shell.envelope();
        if shell_env == hole_env || !shell_env.contains(hole_env) {
            continue;
        }
        let probe = hole
            .coordinates()
            .iter()
            .find(|p| !shell.coordinates().contains(p));
        let Some(probe) = probe else {
            continue;
        };
        if !is_in_ring(probe, shell.coordinates()) {
            continue;
        }
        let smaller = match best {
            None => true,
            Some(b) => graph.ring(b)?.envelope().contains(shell_env),
        };
        if smaller {
            best = Some(s);
        }
    }
    Ok(best)
}
