// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! DE-9IM intersection matrix.
//!
//! Rows index the interior, boundary and exterior of operand 0; columns
//! those of operand 1. Each cell holds the largest dimension of the
//! intersection of the two point sets.

use std::fmt;

use crate::label::Location;

/// Dimension of a point set, ordered `False < Point < Curve < Surface`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dimension {
    /// Empty set.
    #[default]
    False,
    Point,
    Curve,
    Surface,
}

impl Dimension {
    pub fn to_char(self) -> char {
        match self {
            Dimension::False => 'F',
            Dimension::Point => '0',
            Dimension::Curve => '1',
            Dimension::Surface => '2',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'F' | 'f' => Some(Dimension::False),
            '0' => Some(Dimension::Point),
            '1' => Some(Dimension::Curve),
            '2' => Some(Dimension::Surface),
            _ => None,
        }
    }

    /// Returns `true` for any non-empty dimension.
    pub fn is_true(self) -> bool {
        self != Dimension::False
    }

    /// Tests this dimension against one pattern symbol
    /// (`T`, `F`, `*`, `0`, `1`, `2`).
    pub fn matches(self, symbol: char) -> bool {
        match symbol {
            '*' => true,
            'T' | 't' => self.is_true(),
            other => Dimension::from_char(other) == Some(self),
        }
    }
}

fn index(loc: Location) -> Option<usize> {
    match loc {
        Location::Interior => Some(0),
        Location::Boundary => Some(1),
        Location::Exterior => Some(2),
        Location::None => None,
    }
}

/// A 3x3 DE-9IM matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IntersectionMatrix {
    cells: [[Dimension; 3]; 3],
}

impl IntersectionMatrix {
    /// An all-`False` matrix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a matrix from a 9 character dimension string such as
    /// `"212101212"`.
    pub fn from_dimensions(s: &str) -> Option<Self> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 9 {
            return None;
        }
        let mut m = Self::new();
        for (i, c) in chars.into_iter().enumerate() {
            m.cells[i / 3][i % 3] = Dimension::from_char(c)?;
        }
        Some(m)
    }

    /// The cell for `row` of operand 0 and `col` of operand 1.
    /// `Location::None` reads as `False`.
    pub fn get(&self, row: Location, col: Location) -> Dimension {
        match (index(row), index(col)) {
            (Some(r), Some(c)) => self.cells[r][c],
            _ => Dimension::False,
        }
    }

    pub fn set(&mut self, row: Location, col: Location, dim: Dimension) {
        if let (Some(r), Some(c)) = (index(row), index(col)) {
            self.cells[r][c] = dim;
        }
    }

    /// Raises a cell to `dim` if it is currently lower.
    pub fn set_at_least(&mut self, row: Location, col: Location, dim: Dimension) {
        if let (Some(r), Some(c)) = (index(row), index(col)) {
            if self.cells[r][c] < dim {
                self.cells[r][c] = dim;
            }
        }
    }

    /// Like [`set_at_least`](Self::set_at_least), but does nothing unless
    /// both locations are known.
    pub fn set_at_least_if_valid(&mut self, row: Location, col: Location, dim: Dimension) {
        if row.is_known() && col.is_known() {
            self.set_at_least(row, col, dim);
        }
    }

    pub fn set_all(&mut self, dim: Dimension) {
        for row in &mut self.cells {
            row.fill(dim);
        }
    }

    /// Swaps the roles of the two operands.
    pub fn transpose(&self) -> Self {
        let mut t = *self;
        for r in 0..3 {
            for c in 0..3 {
                t.cells[r][c] = self.cells[c][r];
            }
        }
        t
    }

    /// Tests the matrix against a 9 symbol pattern. Patterns of the wrong
    /// length never match.
    pub fn matches(&self, pattern: &str) -> bool {
        let symbols: Vec<char> = pattern.chars().collect();
        if symbols.len() != 9 {
            return false;
        }
        symbols
            .iter()
            .enumerate()
            .all(|(i, s)| self.cells[i / 3][i % 3].matches(*s))
    }

    fn ii(&self) -> Dimension {
        self.cells[0][0]
    }

    pub fn is_disjoint(&self) -> bool {
        self.cells[0][0] == Dimension::False
            && self.cells[0][1] == Dimension::False
            && self.cells[1][0] == Dimension::False
            && self.cells[1][1] == Dimension::False
    }

    pub fn is_intersects(&self) -> bool {
        !self.is_disjoint()
    }

    pub fn is_within(&self) -> bool {
        self.ii().is_true()
            && self.cells[0][2] == Dimension::False
            && self.cells[1][2] == Dimension::False
    }

    pub fn is_contains(&self) -> bool {
        self.ii().is_true()
            && self.cells[2][0] == Dimension::False
            && self.cells[2][1] == Dimension::False
    }

    pub fn is_covers(&self) -> bool {
        let touches_interior_or_boundary = self.cells[0][0].is_true()
            || self.cells[0][1].is_true()
            || self.cells[1][0].is_true()
            || self.cells[1][1].is_true();
        touches_interior_or_boundary
            && self.cells[2][0] == Dimension::False
            && self.cells[2][1] == Dimension::False
    }

    pub fn is_covered_by(&self) -> bool {
        self.transpose().is_covers()
    }

    /// Topological equality of operands with dimensions `dim_a` and `dim_b`.
    pub fn is_equals(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        dim_a == dim_b && self.is_within() && self.is_contains()
    }

    /// The operands share boundary points but no interior points.
    pub fn is_touches(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        if dim_a == Dimension::Point && dim_b == Dimension::Point {
            return false;
        }
        self.ii() == Dimension::False
            && (self.cells[0][1].is_true() || self.cells[1][0].is_true() || self.cells[1][1].is_true())
    }

    /// The interiors intersect with the same dimension as the operands and
    /// each operand has points outside the other.
    pub fn is_overlaps(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        if dim_a != dim_b {
            return false;
        }
        let interiors = if dim_a == Dimension::Curve {
            self.ii() == Dimension::Curve
        } else {
            self.ii().is_true()
        };
        interiors && self.cells[0][2].is_true() && self.cells[2][0].is_true()
    }

    pub fn is_crosses(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        match (dim_a, dim_b) {
            (Dimension::Curve, Dimension::Curve) => self.ii() == Dimension::Point,
            (a, b) if a < b => self.ii().is_true() && self.cells[0][2].is_true(),
            (a, b) if a > b => self.ii().is_true() && self.cells[2][0].is_true(),
            _ => false,
        }
    }
}

impl fmt::Display for IntersectionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for d in row {
                write!(f, "{}", d.to_char())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_at_least_only_raises() {
        let mut m = IntersectionMatrix::new();
        m.set_at_least(Location::Interior, Location::Interior, Dimension::Curve);
        m.set_at_least(Location::Interior, Location::Interior, Dimension::Point);
        assert_eq!(m.get(Location::Interior, Location::Interior), Dimension::Curve);
        m.set_at_least_if_valid(Location::None, Location::Interior, Dimension::Surface);
        assert_eq!(m.to_string(), "1FFFFFFFF");
    }

    #[test]
    fn display_and_parse() {
        let m = IntersectionMatrix::from_dimensions("212101212").unwrap();
        assert_eq!(m.to_string(), "212101212");
        assert!(IntersectionMatrix::from_dimensions("21210121").is_none());
        assert!(IntersectionMatrix::from_dimensions("21210121X").is_none());
    }

    #[test]
    fn pattern_matching() {
        let m = IntersectionMatrix::from_dimensions("212101212").unwrap();
        assert!(m.matches("T*T***T**"));
        assert!(m.matches("2********"));
        assert!(!m.matches("F********"));
        assert!(!m.matches("T*T"));
    }

    #[test]
    fn overlapping_squares_predicates() {
        let m = IntersectionMatrix::from_dimensions("212101212").unwrap();
        assert!(m.is_intersects());
        assert!(m.is_overlaps(Dimension::Surface, Dimension::Surface));
        assert!(!m.is_within());
        assert!(!m.is_contains());
        assert!(!m.is_touches(Dimension::Surface, Dimension::Surface));
    }

    #[test]
    fn containment_predicates() {
        // A small square strictly inside a larger one, seen from the small one.
        let m = IntersectionMatrix::from_dimensions("2FF1FF212").unwrap();
        assert!(m.is_within());
        assert!(m.is_covered_by());
        assert!(m.transpose().is_contains());
        assert!(m.transpose().is_covers());
        assert!(!m.is_equals(Dimension::Surface, Dimension::Surface));
    }

    #[test]
    fn disjoint_and_touches() {
        let disjoint = IntersectionMatrix::from_dimensions("FF2FF1212").unwrap();
        assert!(disjoint.is_disjoint());
        let touching = IntersectionMatrix::from_dimensions("FF2F11212").unwrap();
        assert!(touching.is_touches(Dimension::Surface, Dimension::Surface));
        assert!(!touching.is_disjoint());
    }

    #[test]
    fn equal_squares() {
        let m = IntersectionMatrix::from_dimensions("2FFF1FFF2").unwrap();
        assert!(m.is_equals(Dimension::Surface, Dimension::Surface));
        assert!(!m.is_equals(Dimension::Surface, Dimension::Curve));
    }

    #[test]
    fn transpose_swaps_rows_and_columns() {
        let m = IntersectionMatrix::from_dimensions("012FFF21F").unwrap();
        assert_eq!(m.transpose().to_string(), "0F21F12FF");
    }
}
