// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Grid index over envelopes.
//!
//! Items are hashed into every square cell their envelope overlaps. Queries
//! return the candidates sharing a cell with the query envelope; callers
//! still run their exact test on each candidate. Items spanning more than
//! a configured number of cells are kept in an overflow list that every
//! query scans, so one huge envelope cannot blow up the grid.

use rustc_hash::FxHashMap;

use crate::config::TopologyConfig;
use crate::coord::Envelope;

/// A spatial hash grid keyed by envelope.
#[derive(Debug, Clone)]
pub struct EnvelopeIndex<T> {
    cell_size: f64,
    max_cells: usize,
    grid: FxHashMap<(i64, i64), Vec<T>>,
    oversized: Vec<T>,
    len: usize,
}

impl<T: Copy + Ord> EnvelopeIndex<T> {
    /// Creates an index with square cells of side `cell_size`.
    pub fn new(cell_size: f64, max_cells: usize) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            1.0
        };
        Self {
            cell_size,
            max_cells: max_cells.max(1),
            grid: FxHashMap::default(),
            oversized: Vec::new(),
            len: 0,
        }
    }

    /// Creates an index sized for `count` items spread over `extent`.
    pub fn with_config(config: &TopologyConfig, extent: &Envelope, count: usize) -> Self {
        let cell = config.resolve_cell_size(extent.width(), extent.height(), count);
        Self::new(cell, config.max_index_cells_per_edge)
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of items in the overflow list.
    pub fn oversized_len(&self) -> usize {
        self.oversized.len()
    }

    pub fn insert(&mut self, env: &Envelope, item: T) {
        self.len += 1;
        match self.cell_range(env) {
            Some(range) if range.cell_count() <= self.max_cells as u64 => {
                for cx in range.x0..=range.x1 {
                    for cy in range.y0..=range.y1 {
                        self.grid.entry((cx, cy)).or_default().push(item);
                    }
                }
            }
            _ => self.oversized.push(item),
        }
    }

    /// Items whose cells overlap `env`, in ascending order without
    /// duplicates.
    pub fn query(&self, env: &Envelope) -> Vec<T> {
        let mut out: Vec<T> = self.oversized.clone();
        if let Some(range) = self.cell_range(env) {
            if range.cell_count() > self.grid.len() as u64 {
                // Cheaper to walk the occupied cells.
                for ((cx, cy), items) in &self.grid {
                    if range.contains(*cx, *cy) {
                        out.extend_from_slice(items);
                    }
                }
            } else {
                for cx in range.x0..=range.x1 {
                    for cy in range.y0..=range.y1 {
                        if let Some(items) = self.grid.get(&(cx, cy)) {
                            out.extend_from_slice(items);
                        }
                    }
                }
            }
        }
        out.sort_unstable();
        out.dedup();
        out
    }

    fn cell_of(&self, v: f64) -> i64 {
        // `as` saturates on overflow and maps NaN to 0.
        (v / self.cell_size).floor() as i64
    }

    fn cell_range(&self, env: &Envelope) -> Option<CellRange> {
        if env.is_empty() {
            return None;
        }
        Some(CellRange {
            x0: self.cell_of(env.min_x()),
            y0: self.cell_of(env.min_y()),
            x1: self.cell_of(env.max_x()),
            y1: self.cell_of(env.max_y()),
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct CellRange {
    x0: i64,
    y0: i64,
    x1: i64,
    y1: i64,
}

impl CellRange {
    fn cell_count(&self) -> u64 {
        let nx = self.x1.abs_diff(self.x0).saturating_add(1);
        let ny = self.y1.abs_diff(self.y0).saturating_add(1);
        nx.saturating_mul(ny)
    }

    fn contains(&self, cx: i64, cy: i64) -> bool {
        cx >= self.x0 && cx <= self.x1 && cy >= self.y0 && cy <= self.y1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Coordinate;

    fn env(x0: f64, y0: f64, x1: f64, y1: f64) -> Envelope {
        Envelope::of_points(&Coordinate::new(x0, y0), &Coordinate::new(x1, y1))
    }

    #[test]
    fn query_finds_overlapping_cells() {
        let mut index = EnvelopeIndex::new(1.0, 64);
        index.insert(&env(0.0, 0.0, 0.5, 0.5), 0usize);
        index.insert(&env(5.0, 5.0, 6.0, 6.0), 1);
        index.insert(&env(0.2, 0.2, 2.5, 0.4), 2);
        assert_eq!(index.len(), 3);
        assert_eq!(index.query(&env(0.1, 0.1, 0.2, 0.2)), vec![0, 2]);
        assert_eq!(index.query(&env(5.5, 5.5, 5.6, 5.6)), vec![1]);
        assert!(index.query(&env(20.0, 20.0, 21.0, 21.0)).is_empty());
    }

    #[test]
    fn items_spanning_cells_are_reported_once() {
        let mut index = EnvelopeIndex::new(1.0, 64);
        index.insert(&env(0.0, 0.0, 3.5, 3.5), 7usize);
        assert_eq!(index.query(&env(0.0, 0.0, 4.0, 4.0)), vec![7]);
    }

    #[test]
    fn large_envelopes_go_to_overflow() {
        let mut index = EnvelopeIndex::new(1.0, 4);
        index.insert(&env(0.0, 0.0, 100.0, 100.0), 1usize);
        index.insert(&env(0.0, 0.0, 0.5, 0.5), 2);
        assert_eq!(index.oversized_len(), 1);
        assert_eq!(index.query(&env(50.0, 50.0, 50.5, 50.5)), vec![1]);
        assert_eq!(index.query(&env(0.0, 0.0, 0.1, 0.1)), vec![1, 2]);
    }

    #[test]
    fn huge_query_walks_occupied_cells() {
        let mut index = EnvelopeIndex::new(1.0, 64);
        index.insert(&env(-3.0, -3.0, -2.5, -2.5), 0usize);
        index.insert(&env(1e9, 1e9, 1e9, 1e9), 1);
        let all = index.query(&env(-1e12, -1e12, 1e12, 1e12));
        assert_eq!(all, vec![0, 1]);
    }

    #[test]
    fn bad_cell_size_falls_back() {
        let index: EnvelopeIndex<usize> = EnvelopeIndex::new(f64::NAN, 0);
        assert_eq!(index.cell_size(), 1.0);
        assert!(index.is_empty());
    }

    #[test]
    fn sized_from_config() {
        let cfg = TopologyConfig::default();
        let index: EnvelopeIndex<usize> = EnvelopeIndex::with_config(&cfg, &env(0.0, 0.0, 100.0, 50.0), 4);
        assert_eq!(index.cell_size(), 50.0);
    }
}
