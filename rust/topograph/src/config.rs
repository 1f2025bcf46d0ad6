// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tunables for graph construction.

/// Configuration for building and overlaying planar graphs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TopologyConfig {
    /// Cell size of the edge spatial index. `None` derives it from the
    /// extent and count of the indexed edges.
    pub index_cell_size: Option<f64>,
    /// Edges covering more index cells than this are kept in an
    /// always-scanned overflow bucket instead of being rasterized.
    pub max_index_cells_per_edge: usize,
    /// Drop consecutive coincident input points before building edges.
    /// When disabled such input is rejected.
    pub remove_repeated_points: bool,
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            index_cell_size: None,
            max_index_cells_per_edge: 64,
            remove_repeated_points: true,
        }
    }
}

impl TopologyConfig {
    /// Cell size to use for `extent_width` x `extent_height` data holding
    /// `item_count` items. Aims for a handful of items per cell.
    pub(crate) fn resolve_cell_size(
        &self,
        extent_width: f64,
        extent_height: f64,
        item_count: usize,
    ) -> f64 {
        if let Some(size) = self.index_cell_size {
            if size.is_finite() && size > 0.0 {
                return size;
            }
        }
        let span = extent_width.max(extent_height);
        if !span.is_finite() || span <= 0.0 {
            return 1.0;
        }
        let per_side = (item_count.max(1) as f64).sqrt().ceil();
        span / per_side
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = TopologyConfig::default();
        assert_eq!(cfg.index_cell_size, None);
        assert_eq!(cfg.max_index_cells_per_edge, 64);
        assert!(cfg.remove_repeated_points);
    }

    #[test]
    fn explicit_cell_size_wins() {
        let cfg = TopologyConfig {
            index_cell_size: Some(2.5),
            ..Default::default()
        };
        assert_eq!(cfg.resolve_cell_size(100.0, 100.0, 10), 2.5);
    }

    #[test]
    fn derived_cell_size_from_extent() {
        let cfg = TopologyConfig::default();
        assert_eq!(cfg.resolve_cell_size(100.0, 40.0, 16), 25.0);
        assert_eq!(cfg.resolve_cell_size(0.0, 0.0, 3), 1.0);
    }
}
