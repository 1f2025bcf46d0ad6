// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use topograph2d::{relate, Coordinate, Dimension, GraphBuilder, IntersectionMatrix};

fn square(x0: f64, y0: f64, size: f64) -> Vec<Coordinate> {
    [
        (x0, y0),
        (x0 + size, y0),
        (x0 + size, y0 + size),
        (x0, y0 + size),
        (x0, y0),
    ]
    .iter()
    .map(|&(x, y)| Coordinate::new(x, y))
    .collect()
}

fn relate_polygons(a: &[Coordinate], b: &[Coordinate]) -> IntersectionMatrix {
    let mut builder = GraphBuilder::new();
    builder.add_polygon(a, &[], 0).unwrap();
    builder.add_polygon(b, &[], 1).unwrap();
    relate(&builder).unwrap()
}

#[test]
fn squares_touching_along_an_edge() {
    let im = relate_polygons(&square(0.0, 0.0, 10.0), &square(10.0, 0.0, 10.0));
    assert_eq!(im.to_string(), "FF2F11212");
    assert!(im.is_touches(Dimension::Surface, Dimension::Surface));
    assert!(im.is_intersects());
    assert!(!im.is_overlaps(Dimension::Surface, Dimension::Surface));
}

#[test]
fn squares_touching_at_a_corner() {
    let im = relate_polygons(&square(0.0, 0.0, 10.0), &square(10.0, 10.0, 10.0));
    assert_eq!(im.to_string(), "FF2F01212");
    assert!(im.is_touches(Dimension::Surface, Dimension::Surface));
}

#[test]
fn relate_is_transposed_when_operands_swap() {
    let a = square(0.0, 0.0, 10.0);
    let b = square(2.0, 2.0, 4.0);
    let ab = relate_polygons(&a, &b);
    let ba = relate_polygons(&b, &a);
    assert_eq!(ab.transpose(), ba);
    assert!(ab.is_covers());
    assert!(ba.is_covered_by());
    assert!(ab.matches("T*****FF*"));
}

#[test]
fn hole_excludes_inner_square() {
    let mut builder = GraphBuilder::new();
    builder
        .add_polygon(&square(0.0, 0.0, 10.0), &[square(2.0, 2.0, 6.0)], 0)
        .unwrap();
    builder.add_polygon(&square(4.0, 4.0, 2.0), &[], 1).unwrap();
    let im = relate(&builder).unwrap();
    assert!(im.is_disjoint());
    assert_eq!(im.to_string(), "FF2FF1212");
}

#[test]
fn crossing_lines_meet_in_a_point() {
    let mut builder = GraphBuilder::new();
    builder
        .add_line(&[Coordinate::new(0.0, 0.0), Coordinate::new(10.0, 10.0)], 0)
        .unwrap();
    builder
        .add_line(&[Coordinate::new(0.0, 10.0), Coordinate::new(10.0, 0.0)], 1)
        .unwrap();
    let im = relate(&builder).unwrap();
    assert_eq!(im.to_string(), "0F1FF0102");
    assert!(im.is_crosses(Dimension::Curve, Dimension::Curve));
}
