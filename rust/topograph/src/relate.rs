// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! DE-9IM relationship of the two operands.

use crate::builder::GraphBuilder;
use crate::component::GraphComponent;
use crate::error::Result;
use crate::label::Location;
use crate::matrix::{Dimension, IntersectionMatrix};
use crate::overlay::build_labelled_graph;

/// Computes the intersection matrix of operand 0 against operand 1.
///
/// Every edge and node of the labelled graph contributes the dimension of
/// the locations it joins. The exteriors of two bounded operands always
/// meet in an area.
pub fn relate(builder: &GraphBuilder) -> Result<IntersectionMatrix> {
    let graph = build_labelled_graph(builder)?;

    let mut im = IntersectionMatrix::new();
    im.set(Location::Exterior, Location::Exterior, Dimension::Surface);
    for (_, edge) in graph.edges() {
        edge.update_im(&mut im)?;
    }
    for (_, node) in graph.nodes() {
        node.update_im(&mut im)?;
    }
    tracing::debug!(matrix = %im, "Computed intersection matrix");
    Ok(im)
}
