// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use topograph2d::{overlay, Coordinate, Error, GraphBuilder, OverlayOp, TopologyConfig};

fn pts(coords: &[(f64, f64)]) -> Vec<Coordinate> {
    coords.iter().map(|&(x, y)| Coordinate::new(x, y)).collect()
}

#[test]
fn unclosed_ring_is_rejected() {
    let mut builder = GraphBuilder::new();
    let err = builder
        .add_polygon_ring(&pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]), 0, true)
        .unwrap_err();
    assert!(matches!(err, Error::UnclosedRing(c) if c == Coordinate::new(0.0, 0.0)));
    assert!(builder.is_empty());
}

#[test]
fn operand_index_out_of_range() {
    let mut builder = GraphBuilder::new();
    let err = builder
        .add_line(&pts(&[(0.0, 0.0), (1.0, 1.0)]), 2)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidGeometryIndex(2)));
}

#[test]
fn collapsed_line_has_too_few_points() {
    let mut builder = GraphBuilder::new();
    let err = builder
        .add_line(&pts(&[(3.0, 3.0), (3.0, 3.0), (3.0, 3.0)]), 0)
        .unwrap_err();
    assert!(matches!(err, Error::TooFewPoints { expected: 2, found: 1 }));
}

#[test]
fn repeated_points_rejected_when_not_removed() {
    let config = TopologyConfig {
        remove_repeated_points: false,
        ..TopologyConfig::default()
    };
    let mut builder = GraphBuilder::with_config(config);
    let err = builder
        .add_line(&pts(&[(0.0, 0.0), (5.0, 0.0), (5.0, 0.0), (5.0, 5.0)]), 0)
        .unwrap_err();
    assert!(matches!(err, Error::DegenerateDirection(c) if c == Coordinate::new(5.0, 0.0)));
}

#[test]
fn repeated_points_removed_by_default() {
    let mut builder = GraphBuilder::new();
    builder
        .add_polygon_ring(
            &pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]),
            0,
            true,
        )
        .unwrap();
    builder
        .add_polygon_ring(
            &pts(&[(5.0, 5.0), (15.0, 5.0), (15.0, 15.0), (5.0, 15.0), (5.0, 5.0)]),
            1,
            true,
        )
        .unwrap();
    let result = overlay(&builder, OverlayOp::Intersection).unwrap();
    assert!((result.rings.area() - 25.0).abs() < 1e-9);
}

#[test]
fn hole_without_shell() {
    let mut builder = GraphBuilder::new();
    let err = builder
        .add_polygon_ring(&pts(&[(2.0, 2.0), (4.0, 2.0), (4.0, 4.0), (2.0, 2.0)]), 1, false)
        .unwrap_err();
    assert!(matches!(err, Error::Topology { ref reason, .. } if reason.contains("shell")));
    assert!(err.coordinate().is_some());
}
