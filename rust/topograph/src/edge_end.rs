// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Edge ends and their angular order around a node.

use std::cmp::Ordering;

use nalgebra::Vector2;

use crate::coord::Coordinate;
use crate::error::{Error, Result};
use crate::keys::EdgeKey;
use crate::label::Label;
use crate::orientation::{orientation_index, quadrant, Orientation};

/// The start of an edge seen from one of its endpoints: an origin, a
/// direction point and the label for that direction.
#[derive(Debug, Clone)]
pub struct EdgeEnd {
    edge: EdgeKey,
    p0: Coordinate,
    p1: Coordinate,
    direction: Vector2<f64>,
    quadrant: u8,
    label: Label,
}

impl EdgeEnd {
    /// Creates an edge end from `p0` towards `p1`.
    ///
    /// Coincident points have no direction and are rejected; repeated
    /// points must be removed before edges are built.
    pub fn new(edge: EdgeKey, p0: Coordinate, p1: Coordinate, label: Label) -> Result<Self> {
        let direction = p1.to_point2() - p0.to_point2();
        if direction.x == 0.0 && direction.y == 0.0 {
            return Err(Error::DegenerateDirection(p0));
        }
        Ok(Self {
            edge,
            p0,
            p1,
            direction,
            quadrant: quadrant(direction.x, direction.y),
            label,
        })
    }

    pub fn edge(&self) -> EdgeKey {
        self.edge
    }

    /// The origin.
    pub fn coordinate(&self) -> Coordinate {
        self.p0
    }

    pub fn direction_point(&self) -> Coordinate {
        self.p1
    }

    pub fn direction(&self) -> &Vector2<f64> {
        &self.direction
    }

    pub fn quadrant(&self) -> u8 {
        self.quadrant
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn label_mut(&mut self) -> &mut Label {
        &mut self.label
    }

    /// Angular order of two edge ends sharing an origin.
    ///
    /// Ends sort counter-clockwise from east, first by quadrant and then
    /// by the orientation predicate; no angle is ever computed. Identical
    /// direction vectors compare equal.
    pub fn compare_direction(&self, other: &EdgeEnd) -> Ordering {
        if self.direction == other.direction {
            return Ordering::Equal;
        }
        match self.quadrant.cmp(&other.quadrant) {
            Ordering::Equal => {}
            unequal => return unequal,
        }
        match orientation_index(&other.p0, &other.p1, &self.p1) {
            Orientation::CounterClockwise => Ordering::Greater,
            Orientation::Clockwise => Ordering::Less,
            Orientation::Collinear => Ordering::Equal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use slotmap::SlotMap;

    fn end(dx: f64, dy: f64) -> EdgeEnd {
        let mut keys: SlotMap<EdgeKey, ()> = SlotMap::with_key();
        EdgeEnd::new(
            keys.insert(()),
            Coordinate::new(0.0, 0.0),
            Coordinate::new(dx, dy),
            Label::default(),
        )
        .unwrap()
    }

    #[test]
    fn zero_length_direction_rejected() {
        let origin = Coordinate::new(2.0, 3.0);
        let err = EdgeEnd::new(EdgeKey::default(), origin, origin, Label::default()).unwrap_err();
        assert_eq!(err, Error::DegenerateDirection(origin));
    }

    #[test]
    fn orders_counter_clockwise_from_east() {
        // y grows downward, so "up" is negative y.
        let east = end(1.0, 0.0);
        let north_east = end(1.0, -1.0);
        let north = end(0.0, -1.0);
        let west = end(-1.0, 0.0);
        let south = end(0.0, 1.0);
        let south_east = end(1.0, 1.0);
        let ordered = [&east, &north_east, &north, &west, &south, &south_east];
        for w in ordered.windows(2) {
            assert_eq!(w[0].compare_direction(w[1]), Ordering::Less);
            assert_eq!(w[1].compare_direction(w[0]), Ordering::Greater);
        }
    }

    #[test]
    fn same_quadrant_uses_orientation() {
        let shallow = end(10.0, -1.0);
        let steep = end(1.0, -10.0);
        assert_eq!(shallow.compare_direction(&steep), Ordering::Less);
        assert_eq!(steep.compare_direction(&shallow), Ordering::Greater);
    }

    #[test]
    fn parallel_directions_compare_equal() {
        let a = end(1.0, 2.0);
        let b = end(2.0, 4.0);
        assert_eq!(a.compare_direction(&b), Ordering::Equal);
        assert_eq!(a.compare_direction(&a.clone()), Ordering::Equal);
    }

    fn direction() -> impl Strategy<Value = (f64, f64)> {
        (-1000i32..1000, -1000i32..1000)
            .prop_filter("non-zero direction", |(x, y)| *x != 0 || *y != 0)
            .prop_map(|(x, y)| (f64::from(x) / 7.0, f64::from(y) / 3.0))
    }

    proptest! {
        #[test]
        fn compare_direction_is_a_total_order(
            a in direction(),
            b in direction(),
            c in direction(),
        ) {
            let (ea, eb, ec) = (end(a.0, a.1), end(b.0, b.1), end(c.0, c.1));
            // Antisymmetry.
            prop_assert_eq!(ea.compare_direction(&eb), eb.compare_direction(&ea).reverse());
            // Transitivity, which rules out cycles.
            if ea.compare_direction(&eb) != Ordering::Greater
                && eb.compare_direction(&ec) != Ordering::Greater
            {
                prop_assert_ne!(ea.compare_direction(&ec), Ordering::Greater);
            }
            let mut ends = vec![ea, eb, ec];
            ends.sort_by(|x, y| x.compare_direction(y));
            for w in ends.windows(2) {
                prop_assert_ne!(w[0].compare_direction(&w[1]), Ordering::Greater);
            }
        }
    }
}
