use super::{graph::OverlayGraph, label::OverlayLabel};
use crate::{core::traits::Real, geometry::Coord};

/// Extracts the points of an intersection which are not part of any result edge, such as
/// where two areas touch at a vertex or two lines cross.
pub struct IntersectionPointBuilder<'g, T>
where
    T: Real,
{
    graph: &'g OverlayGraph<T>,
    allow_collapse_lines: bool,
}

impl<'g, T> IntersectionPointBuilder<'g, T>
where
    T: Real,
{
    pub fn new(graph: &'g OverlayGraph<T>, is_strict: bool) -> Self {
        IntersectionPointBuilder {
            graph,
            allow_collapse_lines: !is_strict,
        }
    }

    pub fn points(&self) -> Vec<Coord<T>> {
        self.graph
            .node_edges()
            .into_iter()
            .filter(|&node_edge| self.is_result_point(node_edge))
            .map(|node_edge| self.graph.orig(node_edge))
            .collect()
    }

    /// A node is a result point when edges of both inputs meet there and none of its edges are
    /// in the result.
    fn is_result_point(&self, node_edge: usize) -> bool {
        let mut is_edge_of = [false; 2];
        for e in self.graph.around(node_edge) {
            if self.graph.is_in_result(e) {
                return false;
            }
            let label = self.graph.label(e);
            for (index, found) in is_edge_of.iter_mut().enumerate() {
                *found |= self.is_edge_of(label, index);
            }
        }
        is_edge_of[0] && is_edge_of[1]
    }

    fn is_edge_of(&self, label: &OverlayLabel, index: usize) -> bool {
        if !self.allow_collapse_lines && label.is_boundary_collapse() {
            return false;
        }
        label.is_boundary(index) || label.is_line_of(index)
    }
}
