//! Computes the location of every graph edge relative to both inputs and marks the edges
//! forming the boundary of the result area.
use super::{
    graph::{EdgeId, OverlayGraph},
    input::InputGeometry,
    label::Position,
    OverlayOp,
};
use crate::{
    core::traits::Real,
    error::{OverlayError, OverlayResult},
    geometry::Location,
};
use std::collections::VecDeque;

pub struct OverlayLabeller<'g, 'i, 'a, T>
where
    T: Real,
{
    graph: &'g mut OverlayGraph<T>,
    input: &'i InputGeometry<'a, T>,
}

impl<'g, 'i, 'a, T> OverlayLabeller<'g, 'i, 'a, T>
where
    T: Real,
{
    pub fn new(graph: &'g mut OverlayGraph<T>, input: &'i InputGeometry<'a, T>) -> Self {
        OverlayLabeller { graph, input }
    }

    /// Compute every unknown edge location.
    ///
    /// Areal locations are propagated around nodes first, then known line locations flood
    /// across connected linear edges. Collapses take the location implied by their ring role,
    /// and whatever is left is not connected to the input and is located by point in polygon.
    pub fn compute_labelling(&mut self) -> OverlayResult<()> {
        let nodes = self.graph.node_edges();
        self.label_area_node_edges(&nodes)?;
        self.label_connected_linear_edges();
        self.label_collapsed_edges();
        self.label_connected_linear_edges();
        self.label_disconnected_edges();
        Ok(())
    }

    fn label_area_node_edges(&mut self, nodes: &[EdgeId]) -> OverlayResult<()> {
        for &node_edge in nodes {
            self.propagate_area_locations(node_edge, 0)?;
            if self.input.has_edges(1) {
                self.propagate_area_locations(node_edge, 1)?;
            }
        }
        Ok(())
    }

    /// Walk the edges around a node counter clockwise, carrying the area location across each
    /// boundary edge and assigning it to the non-boundary edges in between.
    fn propagate_area_locations(&mut self, node_edge: EdgeId, index: usize) -> OverlayResult<()> {
        if !self.input.is_area(index) || self.graph.degree(node_edge) == 1 {
            return Ok(());
        }
        let Some(e_start) = self.find_propagation_start_edge(node_edge, index) else {
            return Ok(());
        };

        let mut curr_loc = self.side_location(e_start, index, Position::Left)?;
        let mut e = self.graph.onext(e_start);
        while e != e_start {
            let is_forward = OverlayGraph::<T>::is_forward(e);
            let label = self.graph.label_mut(e);
            if !label.is_boundary(index) {
                label.set_location_line(index, curr_loc);
            } else {
                let loc_right = label.location(index, Position::Right, is_forward);
                if loc_right != Some(curr_loc) {
                    let (x, y) = self.graph.orig(e).to_f64_pair();
                    return Err(OverlayError::noding_at("side location conflict", x, y));
                }
                curr_loc = self.side_location(e, index, Position::Left)?;
            }
            e = self.graph.onext(e);
        }
        Ok(())
    }

    fn side_location(&self, e: EdgeId, index: usize, position: Position) -> OverlayResult<Location> {
        self.graph
            .label(e)
            .location(index, position, OverlayGraph::<T>::is_forward(e))
            .ok_or_else(|| {
                let (x, y) = self.graph.orig(e).to_f64_pair();
                OverlayError::topology_at("found single null side", x, y)
            })
    }

    fn find_propagation_start_edge(&self, node_edge: EdgeId, index: usize) -> Option<EdgeId> {
        self.graph
            .around(node_edge)
            .find(|&e| self.graph.label(e).is_boundary(index))
    }

    fn label_connected_linear_edges(&mut self) {
        self.propagate_linear_locations(0);
        if self.input.has_edges(1) {
            self.propagate_linear_locations(1);
        }
    }

    /// Flood known line locations across linear edges which do not have one yet.
    fn propagate_linear_locations(&mut self, index: usize) {
        let mut stack: VecDeque<EdgeId> = self
            .graph
            .edges()
            .filter(|&e| {
                let label = self.graph.label(e);
                label.is_linear_of(index) && !label.is_line_location_unknown(index)
            })
            .collect();
        if stack.is_empty() {
            return;
        }

        let is_input_line = self.input.is_line(index);
        while let Some(line_edge) = stack.pop_front() {
            self.propagate_linear_location_at_node(line_edge, index, is_input_line, &mut stack);
        }
    }

    fn propagate_linear_location_at_node(
        &mut self,
        node_edge: EdgeId,
        index: usize,
        is_input_line: bool,
        stack: &mut VecDeque<EdgeId>,
    ) {
        let Some(line_loc) = self.graph.label(node_edge).line_location(index) else {
            return;
        };
        // a line input only spreads its exterior, being on the line is never inherited
        if is_input_line && line_loc != Location::Exterior {
            return;
        }

        let mut e = self.graph.onext(node_edge);
        while e != node_edge {
            let label = self.graph.label_mut(e);
            if label.is_line_location_unknown(index) {
                label.set_location_line(index, line_loc);
                // the origin of e has been scanned, continue from its far end
                stack.push_front(OverlayGraph::<T>::sym(e));
            }
            e = self.graph.onext(e);
        }
    }

    fn label_collapsed_edges(&mut self) {
        for e in self.graph.edges() {
            for index in 0..2 {
                let label = self.graph.label_mut(e);
                if label.is_line_location_unknown(index) && label.is_collapse(index) {
                    label.set_location_collapse(index);
                }
            }
        }
    }

    fn label_disconnected_edges(&mut self) {
        for e in self.graph.edges() {
            for index in 0..2 {
                if self.graph.label(e).is_line_location_unknown(index) {
                    self.label_disconnected_edge(e, index);
                }
            }
        }
    }

    /// An edge with no connection to input `index` lies entirely inside or outside it.
    fn label_disconnected_edge(&mut self, e: EdgeId, index: usize) {
        if !self.input.is_area(index) {
            // an interior location would have been known when the edge was created
            self.graph.label_mut(e).set_location_all(index, Location::Exterior);
            return;
        }
        let loc = self.locate_edge_both_ends(e, index);
        self.graph.label_mut(e).set_location_all(index, loc);
    }

    /// Interior only if neither end is exterior, which tolerates ends moved by rounding.
    fn locate_edge_both_ends(&self, e: EdgeId, index: usize) -> Location {
        let loc_orig = self.input.locate_point_in_area(index, &self.graph.orig(e));
        let loc_dest = self.input.locate_point_in_area(index, &self.graph.dest(e));
        if loc_orig != Location::Exterior && loc_dest != Location::Exterior {
            Location::Interior
        } else {
            Location::Exterior
        }
    }

    /// Mark every half-edge whose right side is in the result area.
    pub fn mark_result_area_edges(&mut self, op: OverlayOp) {
        for e in self.graph.edges() {
            let is_forward = OverlayGraph::<T>::is_forward(e);
            let label = self.graph.label(e);
            if label.is_boundary_either()
                && op.is_result_of_op(
                    label.location_boundary_or_line(0, Position::Right, is_forward),
                    label.location_boundary_or_line(1, Position::Right, is_forward),
                )
            {
                self.graph.mark_in_result_area(e);
            }
        }
    }

    /// An edge with the result area on both sides is interior to the result.
    pub fn unmark_duplicate_edges_from_result_area(&mut self) {
        for e in self.graph.edges() {
            if self.graph.is_in_result_area_both(e) {
                self.graph.unmark_from_result_area_both(e);
            }
        }
    }
}
