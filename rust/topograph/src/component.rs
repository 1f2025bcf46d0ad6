// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Behaviour shared by labelled graph components (edges and nodes).

use crate::coord::Coordinate;
use crate::error::{Error, Result};
use crate::label::Label;
use crate::matrix::IntersectionMatrix;

/// Flags mutated while walking the graph.
///
/// All flags start cleared. `covered` stays `None` until a coverage
/// decision has been made for the component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComponentFlags {
    pub in_result: bool,
    pub covered: Option<bool>,
    pub visited: bool,
}

/// A labelled component of a planar graph.
pub trait GraphComponent {
    fn label(&self) -> &Label;

    fn label_mut(&mut self) -> &mut Label;

    fn flags(&self) -> &ComponentFlags;

    fn flags_mut(&mut self) -> &mut ComponentFlags;

    /// A representative coordinate, used in error reports.
    fn coordinate(&self) -> Coordinate;

    /// Returns `true` if the component touches only one operand.
    fn is_isolated(&self) -> bool;

    /// Writes this component's contribution into `im`. Only called with a
    /// complete label.
    fn compute_im(&self, im: &mut IntersectionMatrix);

    /// Updates `im` from this component's label.
    fn update_im(&self, im: &mut IntersectionMatrix) -> Result<()> {
        if self.label().is_partial() {
            return Err(Error::PartialLabel(self.coordinate()));
        }
        self.compute_im(im);
        Ok(())
    }

    fn is_in_result(&self) -> bool {
        self.flags().in_result
    }

    fn set_in_result(&mut self, in_result: bool) {
        self.flags_mut().in_result = in_result;
    }

    /// Returns `true` only if coverage was decided and is positive.
    fn is_covered(&self) -> bool {
        self.flags().covered == Some(true)
    }

    fn is_covered_set(&self) -> bool {
        self.flags().covered.is_some()
    }

    fn set_covered(&mut self, covered: bool) {
        self.flags_mut().covered = Some(covered);
    }

    fn is_visited(&self) -> bool {
        self.flags().visited
    }

    fn set_visited(&mut self, visited: bool) {
        self.flags_mut().visited = visited;
    }
}
