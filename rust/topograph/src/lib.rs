// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Topograph 2D
//!
//! Planar topology graph for overlay and relate of 2D lines and polygons.
//!
//! Input rings and lines of two operands are noded against each other,
//! split at every intersection and merged into a [`PlanarGraph`] whose
//! components carry a [`Label`]: the location of each node, edge and
//! edge side relative to both operands. Walking the directed edges of
//! that graph yields the rings of a boolean [`overlay`]; reading its
//! labels yields the [`IntersectionMatrix`] of [`relate`].
//!
//! Graph entities live in slot maps and refer to each other by key, so the
//! node / directed edge / ring cycle carries no shared ownership.
//!
//! ## Conventions
//!
//! Coordinates are read in a y-down frame. A ring whose vertices run
//! clockwise in that frame is a shell, a counter-clockwise one a hole,
//! and the interior of a result ring always lies on its right.

pub mod builder;
pub mod component;
pub mod config;
pub mod coord;
pub mod depth;
pub mod directed_edge;
pub mod edge;
pub mod edge_end;
pub mod edge_intersection;
pub mod edge_list;
pub mod edge_ring;
pub mod error;
pub mod graph;
pub mod index;
pub mod intersector;
pub mod keys;
pub mod label;
pub mod matrix;
pub mod node;
pub mod orientation;
pub mod output;
pub mod overlay;
pub mod polygon_builder;
pub mod relate;
pub mod star;

pub use builder::GraphBuilder;
pub use component::{ComponentFlags, GraphComponent};
pub use config::TopologyConfig;
pub use coord::{Coordinate, Envelope};
pub use depth::Depth;
pub use directed_edge::DirectedEdge;
pub use edge::Edge;
pub use edge_end::EdgeEnd;
pub use edge_intersection::{EdgeIntersection, EdgeIntersectionList};
pub use edge_list::EdgeList;
pub use edge_ring::{EdgeRing, RingPolicy};
pub use error::{Error, Result};
pub use graph::PlanarGraph;
pub use intersector::{LineIntersector, SegmentIntersector};
pub use keys::{ComponentKind, DirectedEdgeKey, EdgeKey, EdgeRingKey, GraphKey, NodeKey};
pub use label::{Label, Location, Position, TopologyLocation};
pub use matrix::{Dimension, IntersectionMatrix};
pub use node::{Node, NodeMap};
pub use orientation::{Orientation, Winding};
pub use output::{OutputRing, RingKind, RingSet};
pub use overlay::{overlay, OverlayOp, OverlayResult};
pub use polygon_builder::PolygonBuilder;
pub use relate::relate;
pub use star::DirectedEdgeStar;
