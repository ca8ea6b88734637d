//! Maximal rings: rings of result area edges which may touch themselves at nodes. They are
//! split into minimal rings, which never self touch, before building polygons.
use super::{
    edge_ring::OverlayEdgeRing,
    graph::{EdgeId, OverlayGraph},
};
use crate::{
    core::traits::Real,
    error::{OverlayError, OverlayResult},
};

fn error_at<T: Real>(graph: &OverlayGraph<T>, e: EdgeId, message: &str) -> OverlayError {
    let (x, y) = graph.orig(e).to_f64_pair();
    OverlayError::topology_at(message, x, y)
}

/// Link the result area edges at the origin of `node_edge` into maximal rings.
///
/// Scanning counter clockwise, each incoming result edge is linked to the next outgoing result
/// edge. The node edge is outgoing, so the scan starts just after it to make it the last edge
/// considered.
pub fn link_result_area_max_ring_at_node<T>(
    graph: &mut OverlayGraph<T>,
    node_edge: EdgeId,
) -> OverlayResult<()>
where
    T: Real,
{
    let end_out = graph.onext(node_edge);
    let mut curr_out = end_out;
    let mut curr_result_in: Option<EdgeId> = None;
    loop {
        match curr_result_in {
            // a linked edge means the node has already been processed
            Some(e_in) if graph.next_result_max(e_in).is_some() => return Ok(()),
            Some(e_in) => {
                if graph.is_in_result_area(curr_out) {
                    graph.set_next_result_max(e_in, curr_out);
                    curr_result_in = None;
                }
            }
            None => {
                let curr_in = OverlayGraph::<T>::sym(curr_out);
                if graph.is_in_result_area(curr_in) {
                    curr_result_in = Some(curr_in);
                }
            }
        }
        curr_out = graph.onext(curr_out);
        if curr_out == end_out {
            break;
        }
    }
    if curr_result_in.is_some() {
        return Err(error_at(graph, node_edge, "no outgoing edge found"));
    }
    Ok(())
}

#[derive(Debug, Copy, Clone)]
pub struct MaximalEdgeRing {
    id: usize,
    start: EdgeId,
}

impl MaximalEdgeRing {
    /// Follow the maximal ring links from `start`, claiming every edge for ring `id`.
    pub fn new<T>(graph: &mut OverlayGraph<T>, start: EdgeId, id: usize) -> OverlayResult<Self>
    where
        T: Real,
    {
        let mut e = start;
        loop {
            if graph.max_edge_ring(e) == Some(id) {
                return Err(error_at(graph, e, "ring edge visited twice in maximal edge ring"));
            }
            let Some(next) = graph.next_result_max(e) else {
                let (x, y) = graph.dest(e).to_f64_pair();
                return Err(OverlayError::topology_at("ring edge missing", x, y));
            };
            graph.set_max_edge_ring(e, id);
            e = next;
            if e == start {
                break;
            }
        }
        Ok(MaximalEdgeRing { id, start })
    }

    /// Split the maximal ring into minimal rings, appending them to `rings`. Returns the indexes
    /// of the new rings.
    pub fn build_minimal_rings<T>(
        &self,
        graph: &mut OverlayGraph<T>,
        rings: &mut Vec<OverlayEdgeRing<T>>,
    ) -> OverlayResult<Vec<usize>>
    where
        T: Real,
    {
        self.link_minimal_rings(graph)?;

        let mut result = Vec::new();
        let mut e = self.start;
        loop {
            if graph.edge_ring(e).is_none() {
                let ring_id = rings.len();
                rings.push(OverlayEdgeRing::new(graph, e, ring_id)?);
                result.push(ring_id);
            }
            e = self.next_max(graph, e)?;
            if e == self.start {
                break;
            }
        }
        Ok(result)
    }

    fn next_max<T: Real>(&self, graph: &OverlayGraph<T>, e: EdgeId) -> OverlayResult<EdgeId> {
        graph
            .next_result_max(e)
            .ok_or_else(|| error_at(graph, e, "ring edge missing"))
    }

    fn link_minimal_rings<T: Real>(&self, graph: &mut OverlayGraph<T>) -> OverlayResult<()> {
        let mut e = self.start;
        loop {
            self.link_min_ring_edges_at_node(graph, e)?;
            e = self.next_max(graph, e)?;
            if e == self.start {
                break;
            }
        }
        Ok(())
    }

    /// Link the edges of this maximal ring at the origin of `node_edge` so each incoming edge
    /// is followed by the next outgoing edge clockwise, which splits off minimal rings.
    fn link_min_ring_edges_at_node<T: Real>(
        &self,
        graph: &mut OverlayGraph<T>,
        node_edge: EdgeId,
    ) -> OverlayResult<()> {
        let end_out = node_edge;
        let mut curr_max_ring_out = Some(end_out);
        let mut curr_out = graph.onext(end_out);
        loop {
            if self.is_already_linked(graph, OverlayGraph::<T>::sym(curr_out)) {
                return Ok(());
            }
            curr_max_ring_out = match curr_max_ring_out {
                None => self.select_max_out_edge(graph, curr_out),
                Some(max_out) => self.link_max_in_edge(graph, curr_out, max_out),
            };
            curr_out = graph.onext(curr_out);
            if curr_out == end_out {
                break;
            }
        }
        if curr_max_ring_out.is_some() {
            return Err(error_at(graph, node_edge, "unmatched edge found during min-ring linking"));
        }
        Ok(())
    }

    fn is_already_linked<T: Real>(&self, graph: &OverlayGraph<T>, e: EdgeId) -> bool {
        graph.max_edge_ring(e) == Some(self.id) && graph.next_result(e).is_some()
    }

    fn select_max_out_edge<T: Real>(&self, graph: &OverlayGraph<T>, curr_out: EdgeId) -> Option<EdgeId> {
        if graph.max_edge_ring(curr_out) == Some(self.id) {
            Some(curr_out)
        } else {
            None
        }
    }

    /// Returns `None` once the in edge is linked, so the scan looks for the next out edge.
    fn link_max_in_edge<T: Real>(
        &self,
        graph: &mut OverlayGraph<T>,
        curr_out: EdgeId,
        max_out: EdgeId,
    ) -> Option<EdgeId> {
        let curr_in = OverlayGraph::<T>::sym(curr_out);
        if graph.max_edge_ring(curr_in) != Some(self.id) {
            return Some(max_out);
        }
        graph.set_next_result(curr_in, max_out);
        None
    }
}
