// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Result rings handed back to callers.

use crate::coord::Coordinate;
use crate::orientation::signed_area;
use crate::polygon_builder::PolygonRings;

/// Whether a ring bounds a polygon from outside or inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RingKind {
    Shell,
    Hole,
}

/// A closed result ring.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutputRing {
    /// Closed point list, first point repeated at the end.
    pub coords: Vec<Coordinate>,
    pub kind: RingKind,
    /// For a hole, the index of its shell in the owning [`RingSet`].
    pub shell: Option<usize>,
}

impl OutputRing {
    /// Unsigned enclosed area.
    pub fn area(&self) -> f64 {
        signed_area(&self.coords).abs()
    }
}

/// Shells and holes of an area result, each hole pointing at its shell.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RingSet {
    rings: Vec<OutputRing>,
}

impl RingSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_polygons(polygons: Vec<PolygonRings>) -> Self {
        let mut rings = Vec::new();
        for (shell, holes) in polygons {
            let shell_index = rings.len();
            rings.push(OutputRing {
                coords: shell,
                kind: RingKind::Shell,
                shell: None,
            });
            rings.extend(holes.into_iter().map(|coords| OutputRing {
                coords,
                kind: RingKind::Hole,
                shell: Some(shell_index),
            }));
        }
        Self { rings }
    }

    pub fn rings(&self) -> &[OutputRing] {
        &self.rings
    }

    pub fn len(&self) -> usize {
        self.rings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    pub fn shells(&self) -> impl Iterator<Item = &OutputRing> + '_ {
        self.rings.iter().filter(|r| r.kind == RingKind::Shell)
    }

    pub fn holes(&self) -> impl Iterator<Item = &OutputRing> + '_ {
        self.rings.iter().filter(|r| r.kind == RingKind::Hole)
    }

    /// Each shell with its holes.
    pub fn polygons(&self) -> Vec<(&OutputRing, Vec<&OutputRing>)> {
        self.rings
            .iter()
            .enumerate()
            .filter(|(_, r)| r.kind == RingKind::Shell)
            .map(|(i, shell)| {
                let holes = self.rings.iter().filter(|r| r.shell == Some(i)).collect();
                (shell, holes)
            })
            .collect()
    }

    /// Every ring's points as a line.
    pub fn boundary(&self) -> Vec<Vec<Coordinate>> {
        self.rings.iter().map(|r| r.coords.clone()).collect()
    }

    /// Total area: shells minus holes.
    pub fn area(&self) -> f64 {
        self.rings
            .iter()
            .map(|r| match r.kind {
                RingKind::Shell => r.area(),
                RingKind::Hole => -r.area(),
            })
            .sum()
    }
}
