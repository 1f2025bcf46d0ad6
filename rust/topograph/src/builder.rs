// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Input side of overlay and relate: operand rings and lines.
//!
//! The builder turns each input ring or line into one labelled edge and
//! remembers the operands' polygons and lines for point location. It does
//! not node anything; that happens when an operation runs.

use rustc_hash::FxHashMap;

use crate::config::TopologyConfig;
use crate::coord::{CoordKey, Coordinate, Envelope};
use crate::edge::Edge;
use crate::error::{Error, Result};
use crate::label::{Label, Location};
use crate::matrix::Dimension;
use crate::orientation::{has_repeated_points, is_ccw, is_on_line, locate_in_ring, remove_repeated_points};

/// A polygon of one operand: a shell and its holes.
#[derive(Debug, Clone, Default)]
struct InputPolygon {
    shell: Vec<Coordinate>,
    holes: Vec<Vec<Coordinate>>,
}

impl InputPolygon {
    fn locate(&self, p: &Coordinate) -> Location {
        match locate_in_ring(p, &self.shell) {
            Location::Interior => {}
            other => return other,
        }
        for hole in &self.holes {
            match locate_in_ring(p, hole) {
                Location::Boundary => return Location::Boundary,
                Location::Interior => return Location::Exterior,
                _ => {}
            }
        }
        Location::Interior
    }
}

/// Collects the two operands of an overlay or relate operation.
///
/// Operand indices are `0` and `1`. Rings must be closed; whether a ring is
/// a shell or a hole is stated by the caller, its orientation is free.
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    config: TopologyConfig,
    edges: Vec<Edge>,
    polygons: [Vec<InputPolygon>; 2],
    lines: [Vec<Vec<Coordinate>>; 2],
    node_locations: [FxHashMap<CoordKey, (Coordinate, Location)>; 2],
    env: Envelope,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TopologyConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &TopologyConfig {
        &self.config
    }

    /// Adds a polygon ring of operand `geom`.
    ///
    /// A hole belongs to the most recently added shell of the same operand.
    pub fn add_polygon_ring(&mut self, coords: &[Coordinate], geom: usize, is_shell: bool) -> Result<()> {
        check_geom(geom)?;
        let ring = self.prepare(coords, 4)?;
        let first = ring[0];
        if !first.equals_2d(&ring[ring.len() - 1]) {
            return Err(Error::UnclosedRing(first));
        }

        let (cw_left, cw_right) = if is_shell {
            (Location::Exterior, Location::Interior)
        } else {
            (Location::Interior, Location::Exterior)
        };
        let (left, right) = if is_ccw(&ring) {
            (cw_right, cw_left)
        } else {
            (cw_left, cw_right)
        };

        if is_shell {
            self.polygons[geom].push(InputPolygon {
                shell: ring.clone(),
                holes: Vec::new(),
            });
        } else {
            let polygon = self.polygons[geom]
                .last_mut()
                .ok_or_else(|| Error::topology(first, "hole added before any shell"))?;
            polygon.holes.push(ring.clone());
        }

        self.node_locations[geom]
            .insert(CoordKey::from(first), (first, Location::Boundary));
        self.push_edge(ring, Label::area(geom, Location::Boundary, left, right))
    }

    /// Adds a polygon: a shell and its holes.
    pub fn add_polygon(&mut self, shell: &[Coordinate], holes: &[Vec<Coordinate>], geom: usize) -> Result<()> {
        self.add_polygon_ring(shell, geom, true)?;
        for hole in holes {
            self.add_polygon_ring(hole, geom, false)?;
        }
        Ok(())
    }

    /// Adds an open or closed line of operand `geom`.
    ///
    /// Endpoints are boundary points under the mod-2 rule: an endpoint
    /// shared by an even number of line ends is interior.
    pub fn add_line(&mut self, coords: &[Coordinate], geom: usize) -> Result<()> {
        check_geom(geom)?;
        let line = self.prepare(coords, 2)?;
        let first = line[0];
        let last = line[line.len() - 1];
        for end in [first, last] {
            let entry = self.node_locations[geom]
                .entry(CoordKey::from(end))
                .or_insert((end, Location::None));
            entry.1 = match entry.1 {
                Location::Boundary => Location::Interior,
                _ => Location::Boundary,
            };
        }
        self.lines[geom].push(line.clone());
        self.push_edge(line, Label::line(geom, Location::Interior))
    }

    fn prepare(&self, coords: &[Coordinate], min_points: usize) -> Result<Vec<Coordinate>> {
        let pts = if self.config.remove_repeated_points {
            remove_repeated_points(coords)
        } else {
            if has_repeated_points(coords) {
                let at = coords
                    .windows(2)
                    .find(|w| w[0].equals_2d(&w[1]))
                    .map_or(coords[0], |w| w[0]);
                return Err(Error::DegenerateDirection(at));
            }
            coords.to_vec()
        };
        if pts.len() < min_points {
            return Err(Error::TooFewPoints {
                expected: min_points,
                found: pts.len(),
            });
        }
        Ok(pts)
    }

    fn push_edge(&mut self, coords: Vec<Coordinate>, label: Label) -> Result<()> {
        let edge = Edge::new(coords, label)?;
        self.env.expand_to_include_envelope(edge.envelope());
        self.edges.push(edge);
        Ok(())
    }

    /// Location of `p` relative to the polygons of operand `geom`, ignoring
    /// its lines.
    pub fn locate_area(&self, geom: usize, p: &Coordinate) -> Location {
        let mut loc = Location::Exterior;
        for polygon in &self.polygons[geom] {
            match polygon.locate(p) {
                Location::Interior => return Location::Interior,
                Location::Boundary => loc = Location::Boundary,
                _ => {}
            }
        }
        loc
    }

    /// Location of `p` relative to operand `geom`, lines included.
    ///
    /// A point on the boundary of an odd number of components is on the
    /// boundary; one inside or on any other component is interior.
    pub fn locate(&self, geom: usize, p: &Coordinate) -> Location {
        let mut inside = false;
        let mut boundaries = 0usize;
        let mut tally = |loc: Location| match loc {
            Location::Interior => inside = true,
            Location::Boundary => boundaries += 1,
            _ => {}
        };

        for line in &self.lines[geom] {
            let first = line[0];
            let last = line[line.len() - 1];
            let closed = first.equals_2d(&last);
            if !closed && (p.equals_2d(&first) || p.equals_2d(&last)) {
                tally(Location::Boundary);
            } else if is_on_line(p, line) {
                tally(Location::Interior);
            }
        }
        for polygon in &self.polygons[geom] {
            tally(polygon.locate(p));
        }

        if boundaries % 2 == 1 {
            Location::Boundary
        } else if boundaries > 0 || inside {
            Location::Interior
        } else {
            Location::Exterior
        }
    }

    /// Topological dimension of operand `geom`: surface if it has polygons,
    /// curve if it has only lines, false if it is empty.
    pub fn dimension(&self, geom: usize) -> Dimension {
        if !self.polygons[geom].is_empty() {
            Dimension::Surface
        } else if !self.lines[geom].is_empty() {
            Dimension::Curve
        } else {
            Dimension::False
        }
    }

    /// Bounding box of both operands.
    pub fn envelope(&self) -> &Envelope {
        &self.env
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Input edges in insertion order.
    pub(crate) fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Locations the input assigns to nodes of operand `geom`: ring start
    /// points and line endpoints.
    pub(crate) fn node_locations(&self, geom: usize) -> impl Iterator<Item = (Coordinate, Location)> + '_ {
        self.node_locations[geom].values().copied()
    }
}

fn check_geom(geom: usize) -> Result<()> {
    if geom > 1 {
        return Err(Error::InvalidGeometryIndex(geom));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::GraphComponent;
    use crate::label::Position;

    fn pts(raw: &[(f64, f64)]) -> Vec<Coordinate> {
        raw.iter().map(|&(x, y)| Coordinate::new(x, y)).collect()
    }

    fn square(x0: f64, y0: f64, size: f64) -> Vec<Coordinate> {
        pts(&[
            (x0, y0),
            (x0 + size, y0),
            (x0 + size, y0 + size),
            (x0, y0 + size),
            (x0, y0),
        ])
    }

    #[test]
    fn shell_labels_do_not_depend_on_orientation() {
        let mut builder = GraphBuilder::new();
        let cw = square(0.0, 0.0, 10.0);
        let ccw: Vec<Coordinate> = cw.iter().rev().copied().collect();
        builder.add_polygon_ring(&cw, 0, true).unwrap();
        builder.add_polygon_ring(&ccw, 1, true).unwrap();

        let edges = builder.edges();
        assert_eq!(edges[0].label().get_location(0, Position::Right), Location::Interior);
        assert_eq!(edges[1].label().get_location(1, Position::Left), Location::Interior);
        assert_eq!(builder.dimension(0), Dimension::Surface);
    }

    #[test]
    fn hole_without_shell_is_rejected() {
        let mut builder = GraphBuilder::new();
        let err = builder
            .add_polygon_ring(&square(0.0, 0.0, 1.0), 0, false)
            .unwrap_err();
        assert!(matches!(err, Error::Topology { .. }));
    }

    #[test]
    fn input_validation() {
        let mut builder = GraphBuilder::new();
        assert_eq!(
            builder.add_line(&pts(&[(0.0, 0.0), (1.0, 1.0)]), 2).unwrap_err(),
            Error::InvalidGeometryIndex(2)
        );
        assert_eq!(
            builder
                .add_polygon_ring(&pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]), 0, true)
                .unwrap_err(),
            Error::UnclosedRing(Coordinate::new(0.0, 0.0))
        );
        assert_eq!(
            builder.add_line(&pts(&[(1.0, 1.0), (1.0, 1.0)]), 0).unwrap_err(),
            Error::TooFewPoints { expected: 2, found: 1 }
        );
        assert!(builder.is_empty());
    }

    #[test]
    fn repeated_points_follow_config() {
        let raw = pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);

        let mut lenient = GraphBuilder::new();
        lenient.add_line(&raw, 0).unwrap();
        assert_eq!(lenient.edges()[0].num_points(), 3);

        let mut strict = GraphBuilder::with_config(TopologyConfig {
            remove_repeated_points: false,
            ..TopologyConfig::default()
        });
        assert_eq!(
            strict.add_line(&raw, 0).unwrap_err(),
            Error::DegenerateDirection(Coordinate::new(1.0, 0.0))
        );
    }

    #[test]
    fn area_location_with_holes() {
        let mut builder = GraphBuilder::new();
        builder
            .add_polygon(&square(0.0, 0.0, 10.0), &[square(4.0, 4.0, 2.0)], 0)
            .unwrap();
        let at = |x, y| builder.locate_area(0, &Coordinate::new(x, y));
        assert_eq!(at(1.0, 1.0), Location::Interior);
        assert_eq!(at(5.0, 5.0), Location::Exterior);
        assert_eq!(at(4.0, 5.0), Location::Boundary);
        assert_eq!(at(0.0, 5.0), Location::Boundary);
        assert_eq!(at(11.0, 5.0), Location::Exterior);
        assert_eq!(builder.locate_area(1, &Coordinate::new(1.0, 1.0)), Location::Exterior);
    }

    #[test]
    fn line_endpoints_follow_mod2_rule() {
        let mut builder = GraphBuilder::new();
        builder.add_line(&pts(&[(0.0, 0.0), (5.0, 0.0)]), 1).unwrap();
        builder.add_line(&pts(&[(5.0, 0.0), (5.0, 5.0)]), 1).unwrap();

        let at = |x, y| builder.locate(1, &Coordinate::new(x, y));
        assert_eq!(at(0.0, 0.0), Location::Boundary);
        assert_eq!(at(5.0, 0.0), Location::Interior);
        assert_eq!(at(2.0, 0.0), Location::Interior);
        assert_eq!(at(2.0, 2.0), Location::Exterior);
        assert_eq!(builder.dimension(1), Dimension::Curve);

        let mut nodes: Vec<(Coordinate, Location)> = builder.node_locations(1).collect();
        nodes.sort_by(|a, b| a.0.compare_2d(&b.0));
        assert_eq!(
            nodes,
            vec![
                (Coordinate::new(0.0, 0.0), Location::Boundary),
                (Coordinate::new(5.0, 0.0), Location::Interior),
                (Coordinate::new(5.0, 5.0), Location::Boundary),
            ]
        );
    }
}
