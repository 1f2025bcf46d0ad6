// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Side depths of merged edges.
//!
//! When several input edges coincide they are merged into one graph edge.
//! The depth counts, per operand and side, how many of the merged edges
//! had that side in the interior. After normalizing, a side with depth
//! greater than zero is interior; equal depths on both sides mean the
//! area collapsed onto the edge.

use std::fmt;

use crate::label::{Label, Location, Position};

/// Per-operand, per-side depth counters. `None` means never set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Depth {
    depth: [[Option<i32>; 3]; 2],
}

fn depth_at_location(loc: Location) -> Option<i32> {
    match loc {
        Location::Exterior => Some(0),
        Location::Interior => Some(1),
        _ => None,
    }
}

impl Depth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, geom: usize, pos: Position) -> Option<i32> {
        self.depth[geom][pos as usize]
    }

    pub fn set(&mut self, geom: usize, pos: Position, value: i32) {
        self.depth[geom][pos as usize] = Some(value);
    }

    /// Location implied by the depth of one side.
    pub fn location(&self, geom: usize, pos: Position) -> Location {
        match self.get(geom, pos) {
            Some(d) if d > 0 => Location::Interior,
            Some(_) => Location::Exterior,
            None => Location::None,
        }
    }

    /// Increments a side whose location is interior.
    pub fn add_location(&mut self, geom: usize, pos: Position, loc: Location) {
        if loc == Location::Interior {
            let cell = &mut self.depth[geom][pos as usize];
            *cell = Some(cell.unwrap_or(0) + 1);
        }
    }

    /// Accumulates the side locations of `label`.
    pub fn add(&mut self, label: &Label) {
        for geom in 0..2 {
            for pos in [Position::Left, Position::Right] {
                let Some(d) = depth_at_location(label.get_location(geom, pos)) else {
                    continue;
                };
                let cell = &mut self.depth[geom][pos as usize];
                *cell = Some(cell.map_or(d, |cur| cur + d));
            }
        }
    }

    pub fn is_null(&self) -> bool {
        self.depth.iter().all(|g| g.iter().all(Option::is_none))
    }

    pub fn is_null_for(&self, geom: usize) -> bool {
        self.depth[geom][Position::Left as usize].is_none()
    }

    pub fn is_null_at(&self, geom: usize, pos: Position) -> bool {
        self.get(geom, pos).is_none()
    }

    /// Right depth minus left depth.
    pub fn delta(&self, geom: usize) -> i32 {
        self.get(geom, Position::Right).unwrap_or(0) - self.get(geom, Position::Left).unwrap_or(0)
    }

    /// Reduces each side to 0 or 1 relative to the shallower side.
    pub fn normalize(&mut self) {
        for geom in 0..2 {
            if self.is_null_for(geom) {
                continue;
            }
            let left = self.depth[geom][Position::Left as usize].unwrap_or(0);
            let right = self.depth[geom][Position::Right as usize].unwrap_or(0);
            let min_depth = left.min(right).max(0);
            for pos in [Position::Left, Position::Right] {
                let d = self.depth[geom][pos as usize].unwrap_or(0);
                self.depth[geom][pos as usize] = Some(i32::from(d > min_depth));
            }
        }
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cell = |v: Option<i32>| v.map_or_else(|| "-".to_string(), |d| d.to_string());
        write!(
            f,
            "A: {},{} B: {},{}",
            cell(self.depth[0][1]),
            cell(self.depth[0][2]),
            cell(self.depth[1][1]),
            cell(self.depth[1][2])
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell_label(geom: usize) -> Label {
        Label::area(geom, Location::Boundary, Location::Exterior, Location::Interior)
    }

    #[test]
    fn new_depth_is_null() {
        let d = Depth::new();
        assert!(d.is_null());
        assert_eq!(d.location(0, Position::Left), Location::None);
    }

    #[test]
    fn add_label_sets_sides() {
        let mut d = Depth::new();
        d.add(&shell_label(0));
        assert!(!d.is_null());
        assert!(d.is_null_for(1));
        assert_eq!(d.get(0, Position::Left), Some(0));
        assert_eq!(d.get(0, Position::Right), Some(1));
        assert_eq!(d.delta(0), 1);
    }

    #[test]
    fn opposite_edges_collapse() {
        // Two coincident shell edges of the same operand traversed in
        // opposite directions cancel out.
        let mut d = Depth::new();
        d.add(&shell_label(0));
        d.add(&shell_label(0).flipped());
        assert_eq!(d.delta(0), 0);
        d.normalize();
        assert_eq!(d.location(0, Position::Left), Location::Exterior);
        assert_eq!(d.location(0, Position::Right), Location::Exterior);
    }

    #[test]
    fn repeated_same_direction_normalizes() {
        let mut d = Depth::new();
        d.add(&shell_label(1));
        d.add(&shell_label(1));
        assert_eq!(d.get(1, Position::Right), Some(2));
        d.normalize();
        assert_eq!(d.get(1, Position::Right), Some(1));
        assert_eq!(d.get(1, Position::Left), Some(0));
        assert_eq!(d.location(1, Position::Right), Location::Interior);
    }

    #[test]
    fn add_location_counts_interior() {
        let mut d = Depth::new();
        d.add_location(0, Position::Left, Location::Interior);
        d.add_location(0, Position::Left, Location::Exterior);
        assert_eq!(d.get(0, Position::Left), Some(1));
        assert_eq!(d.to_string(), "A: 1,- B: -,-");
    }
}
