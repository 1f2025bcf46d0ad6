// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for planar graph construction and overlay.

use crate::coord::Coordinate;
use crate::keys::GraphKey;

/// Result type alias for topology operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or walking a planar graph.
///
/// None of these are transient. They describe inconsistent input (unsnapped
/// coordinates, repeated points, bad labels) and the operation that raised
/// them cannot be retried without fixing that input upstream.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The graph is malformed at `coord`.
    #[error("topology error at {coord}: {reason}")]
    Topology { coord: Coordinate, reason: String },

    /// An edge end whose direction point equals its origin.
    #[error("edge end at {0} has a zero-length direction")]
    DegenerateDirection(Coordinate),

    /// A label without a location for one operand reached an
    /// intersection-matrix update.
    #[error("found partial label at {0}")]
    PartialLabel(Coordinate),

    /// A sequence had too few distinct points.
    #[error("expected at least {expected} points, found {found}")]
    TooFewPoints { expected: usize, found: usize },

    /// Operand index outside `0..=1`.
    #[error("invalid geometry index {0}, expected 0 or 1")]
    InvalidGeometryIndex(usize),

    /// An input ring whose first point differs from its last.
    #[error("ring starting at {0} is not closed")]
    UnclosedRing(Coordinate),

    /// A graph key that no longer resolves.
    #[error("graph entity not found: {0:?}")]
    NotFound(GraphKey),
}

impl Error {
    pub(crate) fn topology(coord: Coordinate, reason: impl Into<String>) -> Self {
        Error::Topology {
            coord,
            reason: reason.into(),
        }
    }

    /// The coordinate the error refers to, if it carries one.
    pub fn coordinate(&self) -> Option<Coordinate> {
        match self {
            Error::Topology { coord, .. } => Some(*coord),
            Error::DegenerateDirection(c) | Error::PartialLabel(c) | Error::UnclosedRing(c) => {
                Some(*c)
            }
            Error::TooFewPoints { .. } | Error::InvalidGeometryIndex(_) | Error::NotFound(_) => {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topology_error_message_names_coordinate() {
        let err = Error::topology(Coordinate::new(1.0, 2.0), "no outgoing edge");
        assert_eq!(err.to_string(), "topology error at (1, 2): no outgoing edge");
        assert_eq!(err.coordinate(), Some(Coordinate::new(1.0, 2.0)));
    }

    #[test]
    fn count_errors_have_no_coordinate() {
        let err = Error::TooFewPoints {
            expected: 2,
            found: 1,
        };
        assert_eq!(err.coordinate(), None);
        assert_eq!(err.to_string(), "expected at least 2 points, found 1");
    }
}
