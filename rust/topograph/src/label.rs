// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Topological locations and labels.
//!
//! A [`Label`] records, for each of the two operand geometries, where a
//! graph component lies relative to that geometry. Line-like components
//! only carry an `On` location; area edges also carry the locations to
//! their `Left` and `Right`.

use std::fmt;

/// Location of a point relative to a geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Location {
    Interior,
    Boundary,
    Exterior,
    /// Not yet determined, or not applicable.
    #[default]
    None,
}

impl Location {
    /// Returns `true` unless this is [`Location::None`].
    pub fn is_known(self) -> bool {
        self != Location::None
    }

    /// Single character code: `i`, `b`, `e` or `-`.
    pub fn to_char(self) -> char {
        match self {
            Location::Interior => 'i',
            Location::Boundary => 'b',
            Location::Exterior => 'e',
            Location::None => '-',
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Position relative to a directed edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    On = 0,
    Left = 1,
    Right = 2,
}

impl Position {
    /// Swaps `Left` and `Right`; `On` is unchanged.
    pub fn opposite(self) -> Self {
        match self {
            Position::Left => Position::Right,
            Position::Right => Position::Left,
            Position::On => Position::On,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// The locations of one component relative to one geometry.
///
/// In line form only `On` is meaningful; the area form also tracks the
/// two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TopologyLocation {
    locations: [Location; 3],
    area: bool,
}

impl TopologyLocation {
    pub fn line(on: Location) -> Self {
        Self {
            locations: [on, Location::None, Location::None],
            area: false,
        }
    }

    pub fn area(on: Location, left: Location, right: Location) -> Self {
        Self {
            locations: [on, left, right],
            area: true,
        }
    }

    pub fn get(&self, pos: Position) -> Location {
        if !self.area && pos != Position::On {
            return Location::None;
        }
        self.locations[pos.index()]
    }

    /// Sets a location; setting a side turns a line form into an area form.
    pub fn set(&mut self, pos: Position, loc: Location) {
        if pos != Position::On {
            self.area = true;
        }
        self.locations[pos.index()] = loc;
    }

    pub fn is_area(&self) -> bool {
        self.area
    }

    pub fn is_line(&self) -> bool {
        !self.area
    }

    fn active(&self) -> &[Location] {
        if self.area {
            &self.locations
        } else {
            &self.locations[..1]
        }
    }

    /// Returns `true` if no position has a known location.
    pub fn is_null(&self) -> bool {
        self.active().iter().all(|l| !l.is_known())
    }

    /// Returns `true` if some position has no known location.
    pub fn is_any_null(&self) -> bool {
        self.active().iter().any(|l| !l.is_known())
    }

    pub fn is_equal_on_side(&self, other: &TopologyLocation, pos: Position) -> bool {
        self.get(pos) == other.get(pos)
    }

    pub fn all_positions_equal(&self, loc: Location) -> bool {
        self.active().iter().all(|l| *l == loc)
    }

    pub fn set_all(&mut self, loc: Location) {
        let n = self.active().len();
        self.locations[..n].fill(loc);
    }

    pub fn set_all_if_null(&mut self, loc: Location) {
        let n = self.active().len();
        for l in &mut self.locations[..n] {
            if !l.is_known() {
                *l = loc;
            }
        }
    }

    /// Swaps the side locations of an area form.
    pub fn flip(&mut self) {
        if self.area {
            self.locations.swap(Position::Left.index(), Position::Right.index());
        }
    }

    /// Fills unknown positions from `other`. A line merged with an area
    /// becomes an area.
    pub fn merge(&mut self, other: &TopologyLocation) {
        if other.area && !self.area {
            self.area = true;
            self.locations[1] = Location::None;
            self.locations[2] = Location::None;
        }
        let n = self.active().len();
        for i in 0..n {
            if !self.locations[i].is_known() && i < other.active().len() {
                self.locations[i] = other.locations[i];
            }
        }
    }

    /// Drops the side locations.
    pub fn to_line(&mut self) {
        self.area = false;
        self.locations[1] = Location::None;
        self.locations[2] = Location::None;
    }
}

impl fmt::Display for TopologyLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.area {
            write!(
                f,
                "{}{}{}",
                self.locations[1], self.locations[0], self.locations[2]
            )
        } else {
            write!(f, "{}", self.locations[0])
        }
    }
}

/// Locations of a graph component relative to both operand geometries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Label {
    elt: [TopologyLocation; 2],
}

impl Label {
    /// A line label with the same `On` location for both geometries.
    pub fn new_line(on: Location) -> Self {
        Self {
            elt: [TopologyLocation::line(on); 2],
        }
    }

    /// An area label with the same locations for both geometries.
    pub fn new_area(on: Location, left: Location, right: Location) -> Self {
        Self {
            elt: [TopologyLocation::area(on, left, right); 2],
        }
    }

    /// A line label known only for `geom`.
    pub fn line(geom: usize, on: Location) -> Self {
        let mut label = Self::new_line(Location::None);
        label.elt[geom] = TopologyLocation::line(on);
        label
    }

    /// An area label known only for `geom`.
    pub fn area(geom: usize, on: Location, left: Location, right: Location) -> Self {
        let mut label = Self::new_area(Location::None, Location::None, Location::None);
        label.elt[geom] = TopologyLocation::area(on, left, right);
        label
    }

    pub fn topology_location(&self, geom: usize) -> &TopologyLocation {
        &self.elt[geom]
    }

    pub fn get_location(&self, geom: usize, pos: Position) -> Location {
        self.elt[geom].get(pos)
    }

    /// Shorthand for the `On` location.
    pub fn on(&self, geom: usize) -> Location {
        self.elt[geom].get(Position::On)
    }

    pub fn set_location(&mut self, geom: usize, pos: Position, loc: Location) {
        self.elt[geom].set(pos, loc);
    }

    pub fn set_all_locations(&mut self, geom: usize, loc: Location) {
        self.elt[geom].set_all(loc);
    }

    pub fn set_all_locations_if_null(&mut self, geom: usize, loc: Location) {
        self.elt[geom].set_all_if_null(loc);
    }

    /// Swaps left and right for both geometries.
    pub fn flip(&mut self) {
        self.elt[0].flip();
        self.elt[1].flip();
    }

    /// Returns a copy with sides swapped.
    pub fn flipped(&self) -> Self {
        let mut l = *self;
        l.flip();
        l
    }

    /// Fills unknown locations from `other`, geometry by geometry.
    pub fn merge(&mut self, other: &Label) {
        self.elt[0].merge(&other.elt[0]);
        self.elt[1].merge(&other.elt[1]);
    }

    /// Number of geometries this label knows something about.
    pub fn geometry_count(&self) -> usize {
        self.elt.iter().filter(|e| !e.is_null()).count()
    }

    /// Returns `true` if some geometry has no known location at all.
    pub fn is_partial(&self) -> bool {
        self.geometry_count() < 2
    }

    pub fn is_null(&self, geom: usize) -> bool {
        self.elt[geom].is_null()
    }

    pub fn is_any_null(&self, geom: usize) -> bool {
        self.elt[geom].is_any_null()
    }

    /// Returns `true` if either geometry is in area form.
    pub fn is_area(&self) -> bool {
        self.elt[0].is_area() || self.elt[1].is_area()
    }

    pub fn is_area_for(&self, geom: usize) -> bool {
        self.elt[geom].is_area()
    }

    pub fn is_line(&self, geom: usize) -> bool {
        self.elt[geom].is_line()
    }

    pub fn is_equal_on_side(&self, other: &Label, pos: Position) -> bool {
        self.elt[0].is_equal_on_side(&other.elt[0], pos)
            && self.elt[1].is_equal_on_side(&other.elt[1], pos)
    }

    pub fn all_positions_equal(&self, geom: usize, loc: Location) -> bool {
        self.elt[geom].all_positions_equal(loc)
    }

    /// Converts the geometry's locations to line form.
    pub fn to_line(&mut self, geom: usize) {
        self.elt[geom].to_line();
    }

    /// A line label keeping only the `On` location of each geometry.
    pub fn line_label(&self) -> Label {
        Label {
            elt: [
                TopologyLocation::line(self.on(0)),
                TopologyLocation::line(self.on(1)),
            ],
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A:{} B:{}", self.elt[0], self.elt[1])
    }
}
