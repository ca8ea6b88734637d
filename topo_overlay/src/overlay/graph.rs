//! Half-edge graph of the noded, merged overlay edges.
//!
//! Edges live in an arena addressed by index. Every edge is stored as a pair of half-edges with
//! ids `2 * k` (running along the edge coordinates) and `2 * k + 1` (running against them), so
//! the symmetric half-edge of `e` is `e ^ 1`. Around each node the half-edges sharing that node
//! as origin form a circular list ordered counter clockwise by outgoing direction.
use super::label::OverlayLabel;
use crate::{
    algorithm::orientation_index,
    core::traits::Real,
    geometry::{push_distinct, Coord, CoordKey},
};
use std::{cmp::Ordering, collections::BTreeMap};

/// Identifier of a half-edge in an [OverlayGraph].
pub type EdgeId = usize;

/// Mutable per half-edge state used while extracting the result.
#[derive(Debug, Copy, Clone, Default)]
struct EdgeState {
    in_result_area: bool,
    in_result_line: bool,
    visited: bool,
    next_result: Option<EdgeId>,
    next_result_max: Option<EdgeId>,
    edge_ring: Option<usize>,
    max_edge_ring: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct OverlayGraph<T>
where
    T: Real,
{
    edge_pts: Vec<Vec<Coord<T>>>,
    labels: Vec<OverlayLabel>,
    onext: Vec<EdgeId>,
    state: Vec<EdgeState>,
    node_map: BTreeMap<CoordKey<T>, EdgeId>,
}

impl<T> Default for OverlayGraph<T>
where
    T: Real,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Quadrant of a direction vector, counter clockwise from the positive x axis.
fn quadrant<T>(dx: T, dy: T) -> u8
where
    T: Real,
{
    match (dx >= T::zero(), dy >= T::zero()) {
        (true, true) => 0,
        (false, true) => 1,
        (false, false) => 2,
        (true, false) => 3,
    }
}

impl<T> OverlayGraph<T>
where
    T: Real,
{
    pub fn new() -> Self {
        OverlayGraph {
            edge_pts: Vec::new(),
            labels: Vec::new(),
            onext: Vec::new(),
            state: Vec::new(),
            node_map: BTreeMap::new(),
        }
    }

    /// Add an edge with at least 2 distinct points, returning the forward half-edge.
    pub fn add_edge(&mut self, pts: Vec<Coord<T>>, label: OverlayLabel) -> EdgeId {
        let e = self.onext.len();
        self.edge_pts.push(pts);
        self.labels.push(label);
        // a lone half-edge is its own origin neighbour
        self.onext.push(e);
        self.onext.push(e + 1);
        self.state.push(EdgeState::default());
        self.state.push(EdgeState::default());
        self.insert(e);
        self.insert(e + 1);
        e
    }

    fn insert(&mut self, e: EdgeId) {
        let key = CoordKey(self.orig(e));
        match self.node_map.get(&key) {
            Some(&node_edge) => self.insert_at_node(node_edge, e),
            None => {
                self.node_map.insert(key, e);
            }
        }
    }

    fn insert_at_node(&mut self, node_edge: EdgeId, e: EdgeId) {
        if self.onext[node_edge] == node_edge {
            self.insert_after(node_edge, e);
            return;
        }
        let prev = self.insertion_edge(node_edge, e);
        self.insert_after(prev, e);
    }

    /// Finds the half-edge after which `e_add` lies in counter clockwise order.
    fn insertion_edge(&self, node_edge: EdgeId, e_add: EdgeId) -> EdgeId {
        let mut e_prev = node_edge;
        loop {
            let e_next = self.onext[e_prev];
            let next_vs_prev = self.compare_angular(e_next, e_prev);
            // general case, e_add lies between e_prev and e_next
            if next_vs_prev == Ordering::Greater
                && self.compare_angular(e_add, e_prev) != Ordering::Less
                && self.compare_angular(e_add, e_next) != Ordering::Greater
            {
                return e_prev;
            }
            // e_next wraps past the positive x axis, e_add lies in the gap across it
            if next_vs_prev != Ordering::Greater
                && (self.compare_angular(e_add, e_next) != Ordering::Greater
                    || self.compare_angular(e_add, e_prev) != Ordering::Less)
            {
                return e_prev;
            }
            e_prev = e_next;
            if e_prev == node_edge {
                // a consistent ordering always has an insertion point
                return node_edge;
            }
        }
    }

    fn insert_after(&mut self, this: EdgeId, e: EdgeId) {
        let save = self.onext[this];
        self.onext[this] = e;
        self.onext[e] = save;
    }

    /// Compares outgoing directions of two half-edges with a common origin: quadrant first,
    /// then orientation. Greater means further counter clockwise from the positive x axis.
    pub fn compare_angular(&self, e1: EdgeId, e2: EdgeId) -> Ordering {
        let o1 = self.orig(e1);
        let d1 = self.direction_pt(e1);
        let d2 = self.direction_pt(e2);
        let (dx1, dy1) = (d1.x - o1.x, d1.y - o1.y);
        let o2 = self.orig(e2);
        let (dx2, dy2) = (d2.x - o2.x, d2.y - o2.y);
        if dx1 == dx2 && dy1 == dy2 {
            return Ordering::Equal;
        }
        let q1 = quadrant(dx1, dy1);
        let q2 = quadrant(dx2, dy2);
        if q1 != q2 {
            return q1.cmp(&q2);
        }
        // e1 is greater if it is counter clockwise of e2
        orientation_index(&o2, &d2, &d1).as_i32().cmp(&0)
    }

    #[inline]
    pub fn sym(e: EdgeId) -> EdgeId {
        e ^ 1
    }

    /// `true` if the half-edge runs in the direction of the underlying edge coordinates.
    #[inline]
    pub fn is_forward(e: EdgeId) -> bool {
        e & 1 == 0
    }

    #[inline]
    pub fn onext(&self, e: EdgeId) -> EdgeId {
        self.onext[e]
    }

    pub fn edge_count(&self) -> usize {
        self.onext.len()
    }

    /// All half-edges in insertion order.
    pub fn edges(&self) -> std::ops::Range<EdgeId> {
        0..self.onext.len()
    }

    /// One outgoing half-edge for every node, ordered by node coordinate.
    pub fn node_edges(&self) -> Vec<EdgeId> {
        self.node_map.values().copied().collect()
    }

    pub fn node_edge(&self, c: &Coord<T>) -> Option<EdgeId> {
        self.node_map.get(&CoordKey(*c)).copied()
    }

    /// Coordinates of the underlying edge.
    pub fn coords(&self, e: EdgeId) -> &[Coord<T>] {
        &self.edge_pts[e / 2]
    }

    pub fn orig(&self, e: EdgeId) -> Coord<T> {
        let pts = self.coords(e);
        if Self::is_forward(e) {
            pts[0]
        } else {
            pts[pts.len() - 1]
        }
    }

    pub fn dest(&self, e: EdgeId) -> Coord<T> {
        self.orig(Self::sym(e))
    }

    /// Second vertex along the half-edge, which gives its outgoing direction.
    pub fn direction_pt(&self, e: EdgeId) -> Coord<T> {
        let pts = self.coords(e);
        if Self::is_forward(e) {
            pts[1]
        } else {
            pts[pts.len() - 2]
        }
    }

    pub fn label(&self, e: EdgeId) -> &OverlayLabel {
        &self.labels[e / 2]
    }

    pub fn label_mut(&mut self, e: EdgeId) -> &mut OverlayLabel {
        &mut self.labels[e / 2]
    }

    /// Number of half-edges leaving the origin of `e`.
    pub fn degree(&self, e: EdgeId) -> usize {
        self.around(e).count()
    }

    /// Iterates the half-edges around the origin of `e`, starting at `e`.
    pub fn around(&self, e: EdgeId) -> Around<'_, T> {
        Around {
            graph: self,
            start: e,
            next: Some(e),
        }
    }

    /// Append the coordinates of the half-edge to `pts` in its direction, skipping repeats.
    pub fn add_coordinates(&self, e: EdgeId, pts: &mut Vec<Coord<T>>) {
        let coords = self.coords(e);
        if Self::is_forward(e) {
            for c in coords.iter() {
                push_distinct(pts, *c);
            }
        } else {
            for c in coords.iter().rev() {
                push_distinct(pts, *c);
            }
        }
    }

    pub fn is_in_result_area(&self, e: EdgeId) -> bool {
        self.state[e].in_result_area
    }

    pub fn is_in_result_area_both(&self, e: EdgeId) -> bool {
        self.state[e].in_result_area && self.state[Self::sym(e)].in_result_area
    }

    pub fn mark_in_result_area(&mut self, e: EdgeId) {
        self.state[e].in_result_area = true;
    }

    pub fn unmark_from_result_area_both(&mut self, e: EdgeId) {
        self.state[e].in_result_area = false;
        self.state[Self::sym(e)].in_result_area = false;
    }

    pub fn is_in_result_line(&self, e: EdgeId) -> bool {
        self.state[e].in_result_line
    }

    pub fn mark_in_result_line(&mut self, e: EdgeId) {
        self.state[e].in_result_line = true;
        self.state[Self::sym(e)].in_result_line = true;
    }

    pub fn is_in_result(&self, e: EdgeId) -> bool {
        self.state[e].in_result_area || self.state[e].in_result_line
    }

    pub fn is_in_result_either(&self, e: EdgeId) -> bool {
        self.is_in_result(e) || self.is_in_result(Self::sym(e))
    }

    pub fn is_visited(&self, e: EdgeId) -> bool {
        self.state[e].visited
    }

    pub fn mark_visited_both(&mut self, e: EdgeId) {
        self.state[e].visited = true;
        self.state[Self::sym(e)].visited = true;
    }

    pub fn next_result(&self, e: EdgeId) -> Option<EdgeId> {
        self.state[e].next_result
    }

    pub fn set_next_result(&mut self, e: EdgeId, next: EdgeId) {
        self.state[e].next_result = Some(next);
    }

    pub fn next_result_max(&self, e: EdgeId) -> Option<EdgeId> {
        self.state[e].next_result_max
    }

    pub fn set_next_result_max(&mut self, e: EdgeId, next: EdgeId) {
        self.state[e].next_result_max = Some(next);
    }

    pub fn edge_ring(&self, e: EdgeId) -> Option<usize> {
        self.state[e].edge_ring
    }

    pub fn set_edge_ring(&mut self, e: EdgeId, ring: usize) {
        self.state[e].edge_ring = Some(ring);
    }

    pub fn max_edge_ring(&self, e: EdgeId) -> Option<usize> {
        self.state[e].max_edge_ring
    }

    pub fn set_max_edge_ring(&mut self, e: EdgeId, ring: usize) {
        self.state[e].max_edge_ring = Some(ring);
    }

    /// Half-edges currently marked as part of the result area.
    pub fn result_area_edges(&self) -> Vec<EdgeId> {
        self.edges().filter(|&e| self.is_in_result_area(e)).collect()
    }
}

/// Iterator over the half-edges around a node, see [OverlayGraph::around].
pub struct Around<'a, T>
where
    T: Real,
{
    graph: &'a OverlayGraph<T>,
    start: EdgeId,
    next: Option<EdgeId>,
}

impl<T> Iterator for Around<'_, T>
where
    T: Real,
{
    type Item = EdgeId;

    fn next(&mut self) -> Option<EdgeId> {
        let e = self.next?;
        let n = self.graph.onext(e);
        self.next = if n == self.start { None } else { Some(n) };
        Some(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Coord<f64>> {
        vec![Coord::new(x0, y0), Coord::new(x1, y1)]
    }

    fn star() -> (OverlayGraph<f64>, Vec<EdgeId>) {
        let mut graph = OverlayGraph::new();
        // insert out of angular order
        let ids = vec![
            graph.add_edge(seg(0.0, 0.0, -1.0, -1.0), OverlayLabel::new()),
            graph.add_edge(seg(0.0, 0.0, 1.0, 0.0), OverlayLabel::new()),
            graph.add_edge(seg(0.0, 0.0, 0.0, 1.0), OverlayLabel::new()),
            graph.add_edge(seg(0.0, 0.0, 1.0, -1.0), OverlayLabel::new()),
            graph.add_edge(seg(0.0, 0.0, -1.0, 0.5), OverlayLabel::new()),
            graph.add_edge(seg(0.0, 0.0, 1.0, 1.0), OverlayLabel::new()),
        ];
        (graph, ids)
    }

    #[test]
    fn edges_around_node_are_ccw() {
        let (graph, ids) = star();
        let node = graph.node_edge(&Coord::new(0.0, 0.0)).unwrap();
        assert_eq!(graph.degree(node), 6);

        // start from the edge along the positive x axis
        let order: Vec<EdgeId> = graph.around(ids[1]).collect();
        let expected = vec![ids[1], ids[5], ids[2], ids[4], ids[0], ids[3]];
        assert_eq!(order, expected);
    }

    #[test]
    fn sym_and_direction() {
        let mut graph = OverlayGraph::new();
        let e = graph.add_edge(
            vec![Coord::new(0.0, 0.0), Coord::new(1.0, 0.0), Coord::new(2.0, 1.0)],
            OverlayLabel::new(),
        );
        let s = OverlayGraph::<f64>::sym(e);
        assert!(OverlayGraph::<f64>::is_forward(e));
        assert!(!OverlayGraph::<f64>::is_forward(s));
        assert!(graph.orig(s).equals_2d(&Coord::new(2.0, 1.0)));
        assert!(graph.dest(e).equals_2d(&Coord::new(2.0, 1.0)));
        assert!(graph.direction_pt(s).equals_2d(&Coord::new(1.0, 0.0)));

        let mut pts = Vec::new();
        graph.add_coordinates(s, &mut pts);
        let xy: Vec<(f64, f64)> = pts.iter().map(|c| (c.x, c.y)).collect();
        assert_eq!(xy, vec![(2.0, 1.0), (1.0, 0.0), (0.0, 0.0)]);
        assert_eq!(graph.node_edges().len(), 2);
    }

    #[test]
    fn angular_compare_within_quadrant() {
        let mut graph = OverlayGraph::new();
        let low = graph.add_edge(seg(0.0, 0.0, 2.0, 1.0), OverlayLabel::new());
        let high = graph.add_edge(seg(0.0, 0.0, 1.0, 2.0), OverlayLabel::new());
        assert_eq!(graph.compare_angular(high, low), Ordering::Greater);
        assert_eq!(graph.compare_angular(low, high), Ordering::Less);
        assert_eq!(graph.compare_angular(low, low), Ordering::Equal);
    }

    #[test]
    fn result_marks() {
        let mut graph = OverlayGraph::new();
        let e = graph.add_edge(seg(0.0, 0.0, 1.0, 0.0), OverlayLabel::new());
        let s = OverlayGraph::<f64>::sym(e);
        graph.mark_in_result_line(e);
        assert!(graph.is_in_result_line(s));
        assert!(graph.is_in_result_either(s));
        graph.mark_in_result_area(e);
        graph.mark_in_result_area(s);
        assert!(graph.is_in_result_area_both(e));
        graph.unmark_from_result_area_both(s);
        assert!(!graph.is_in_result_area(e));
        assert_eq!(graph.result_area_edges(), Vec::<EdgeId>::new());
    }
}
