use super::{
    graph::{EdgeId, OverlayGraph},
    label::OverlayLabel,
    OverlayOp,
};
use crate::{
    core::traits::Real,
    geometry::{Coord, LineString, Location},
};

/// Extracts the result lines from a labelled graph.
///
/// Lines are formed from edges which are linear in the result and are not covered by the
/// result area. Chains of edges meeting at degree 2 nodes are merged into single lines.
pub struct LineBuilder<'g, T>
where
    T: Real,
{
    graph: &'g mut OverlayGraph<T>,
    op: OverlayOp,
    has_result_area: bool,
    area_index: Option<usize>,
    allow_collapse_lines: bool,
    allow_mixed_result: bool,
}

impl<'g, T> LineBuilder<'g, T>
where
    T: Real,
{
    /// `area_index` is the input which is an area, if any. A non strict overlay keeps lines
    /// formed by collapsed area boundaries and lines where two areas touch.
    pub fn new(
        graph: &'g mut OverlayGraph<T>,
        op: OverlayOp,
        has_result_area: bool,
        area_index: Option<usize>,
        is_strict: bool,
    ) -> Self {
        LineBuilder {
            graph,
            op,
            has_result_area,
            area_index,
            allow_collapse_lines: !is_strict,
            allow_mixed_result: !is_strict,
        }
    }

    pub fn lines(mut self) -> Vec<LineString<T>> {
        self.mark_result_lines();
        self.add_result_lines()
    }

    fn mark_result_lines(&mut self) {
        for e in self.graph.edges().step_by(2) {
            // edges of the result area are never also result lines
            if self.graph.is_in_result_either(e) {
                continue;
            }
            if self.is_result_line(self.graph.label(e)) {
                self.graph.mark_in_result_line(e);
            }
        }
    }

    fn is_result_line(&self, label: &OverlayLabel) -> bool {
        // an area boundary alone is only ever part of a result area
        if label.is_boundary_singleton() {
            return false;
        }
        if !self.allow_collapse_lines && label.is_boundary_collapse() {
            return false;
        }
        if label.is_interior_collapse() {
            return false;
        }
        if self.op != OverlayOp::Intersection {
            if label.is_collapse_and_not_part_interior() {
                return false;
            }
            if self.has_result_area
                && self
                    .area_index
                    .is_some_and(|index| label.is_line_in_area(index))
            {
                return false;
            }
        }
        if self.allow_mixed_result
            && self.op == OverlayOp::Intersection
            && label.is_boundary_touch()
        {
            return true;
        }
        self.op.is_result_of_op(
            Some(effective_location(label, 0)),
            Some(effective_location(label, 1)),
        )
    }

    fn add_result_lines(&mut self) -> Vec<LineString<T>> {
        let mut lines = Vec::new();
        // lines ending at a node first, then whatever is left forms rings
        for e in self.graph.edges() {
            if self.is_unvisited_line(e) && self.degree_of_lines(e) != 2 {
                lines.push(self.build_line(e));
            }
        }
        for e in self.graph.edges() {
            if self.is_unvisited_line(e) {
                lines.push(self.build_line(e));
            }
        }
        lines
    }

    fn is_unvisited_line(&self, e: EdgeId) -> bool {
        self.graph.is_in_result_line(e) && !self.graph.is_visited(e)
    }

    /// Merge the chain of result line edges starting at `start`, stopping at a node or when a
    /// ring closes. The line runs in the direction of the edge coordinates of `start`.
    fn build_line(&mut self, start: EdgeId) -> LineString<T> {
        let mut pts: Vec<Coord<T>> = vec![self.graph.orig(start)];
        let mut e = start;
        loop {
            self.graph.mark_visited_both(e);
            self.graph.add_coordinates(e, &mut pts);
            let sym = OverlayGraph::<T>::sym(e);
            if self.degree_of_lines(sym) != 2 {
                break;
            }
            match self.next_line_edge_unvisited(sym) {
                Some(next) => e = next,
                None => break,
            }
        }
        if !OverlayGraph::<T>::is_forward(start) {
            pts.reverse();
        }
        LineString::new(pts)
    }

    fn next_line_edge_unvisited(&self, node: EdgeId) -> Option<EdgeId> {
        self.graph
            .around(node)
            .skip(1)
            .find(|&e| !self.graph.is_visited(e) && self.graph.is_in_result_line(e))
    }

    fn degree_of_lines(&self, node: EdgeId) -> usize {
        self.graph
            .around(node)
            .filter(|&e| self.graph.is_in_result_line(e))
            .count()
    }
}

/// Location of a linear edge as seen by the operation. Lines and collapses count as interior
/// of their input.
fn effective_location(label: &OverlayLabel, index: usize) -> Location {
    if label.is_collapse(index) || label.is_line_of(index) {
        return Location::Interior;
    }
    label.line_location(index).unwrap_or(Location::Exterior)
}
