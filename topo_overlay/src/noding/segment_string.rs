use crate::{
    core::traits::Real,
    geometry::{push_distinct, Coord},
};
use std::cmp::Ordering;

/// Octant (0 to 7, counter clockwise from the positive x axis) of the direction `dx`, `dy`.
///
/// Octants give an exact ordering of points along a segment without computing distances.
fn octant<T>(dx: T, dy: T) -> u8
where
    T: Real,
{
    let adx = dx.abs();
    let ady = dy.abs();
    if dx >= T::zero() {
        if dy >= T::zero() {
            if adx >= ady {
                0
            } else {
                1
            }
        } else if adx >= ady {
            7
        } else {
            6
        }
    } else if dy >= T::zero() {
        if adx >= ady {
            3
        } else {
            2
        }
    } else if adx >= ady {
        4
    } else {
        5
    }
}

#[inline]
fn relative_sign<T: PartialOrd>(x0: T, x1: T) -> i32 {
    match x0.partial_cmp(&x1) {
        Some(Ordering::Less) => -1,
        Some(Ordering::Greater) => 1,
        _ => 0,
    }
}

#[inline]
fn compare_value(c0: i32, c1: i32) -> Ordering {
    if c0 != 0 {
        return c0.cmp(&0);
    }
    c1.cmp(&0)
}

/// Compares two points on a segment with the given octant by their position along it.
fn compare_along_segment<T>(octant: u8, p0: &Coord<T>, p1: &Coord<T>) -> Ordering
where
    T: Real,
{
    if p0.equals_2d(p1) {
        return Ordering::Equal;
    }
    let xs = relative_sign(p0.x, p1.x);
    let ys = relative_sign(p0.y, p1.y);
    match octant {
        0 => compare_value(xs, ys),
        1 => compare_value(ys, xs),
        2 => compare_value(ys, -xs),
        3 => compare_value(-xs, ys),
        4 => compare_value(-xs, -ys),
        5 => compare_value(-ys, -xs),
        6 => compare_value(-ys, xs),
        _ => compare_value(xs, -ys),
    }
}

/// A node (split point) on a [SegmentString].
#[derive(Debug, Copy, Clone)]
pub struct SegmentNode<T> {
    pub coord: Coord<T>,
    /// Index of the segment the node lies on (the segment start vertex index).
    pub segment_index: usize,
    /// `false` if the node coincides with the segment start vertex.
    is_interior: bool,
    octant: u8,
}

/// A list of coordinates being noded, plus the tag of the linework it came from and the nodes
/// discovered so far.
#[derive(Debug, Clone)]
pub struct SegmentString<T> {
    coords: Vec<Coord<T>>,
    /// Caller provided tag identifying the source of the linework.
    pub tag: usize,
    nodes: Vec<SegmentNode<T>>,
}

impl<T> SegmentString<T>
where
    T: Real,
{
    pub fn new(coords: Vec<Coord<T>>, tag: usize) -> Self {
        SegmentString {
            coords,
            tag,
            nodes: Vec::new(),
        }
    }

    #[inline]
    pub fn coords(&self) -> &[Coord<T>] {
        &self.coords
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    #[inline]
    pub fn coord(&self, i: usize) -> &Coord<T> {
        &self.coords[i]
    }

    #[inline]
    pub fn segment_count(&self) -> usize {
        self.coords.len().saturating_sub(1)
    }

    pub fn is_closed(&self) -> bool {
        self.coords.len() > 1 && self.coords[0].equals_2d(&self.coords[self.coords.len() - 1])
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn segment_octant(&self, index: usize) -> u8 {
        if index + 1 >= self.coords.len() {
            return 0;
        }
        let p0 = &self.coords[index];
        let p1 = &self.coords[index + 1];
        octant(p1.x - p0.x, p1.y - p0.y)
    }

    /// Adds an intersection node on the segment `segment_index`.
    ///
    /// A node equal to the segment end vertex is recorded on the next segment so that equal
    /// nodes always share a segment index.
    pub fn add_intersection(&mut self, int_pt: Coord<T>, segment_index: usize) {
        let mut normalized_index = segment_index;
        let next_index = segment_index + 1;
        if next_index < self.coords.len() && int_pt.equals_2d(&self.coords[next_index]) {
            normalized_index = next_index;
        }
        self.add_node(int_pt, normalized_index);
    }

    fn add_node(&mut self, coord: Coord<T>, segment_index: usize) {
        let is_interior = !coord.equals_2d(&self.coords[segment_index]);
        let octant = self.segment_octant(segment_index);
        self.nodes.push(SegmentNode {
            coord,
            segment_index,
            is_interior,
            octant,
        });
    }

    fn compare_nodes(a: &SegmentNode<T>, b: &SegmentNode<T>) -> Ordering {
        match a.segment_index.cmp(&b.segment_index) {
            Ordering::Equal => {}
            ord => return ord,
        }
        if a.coord.equals_2d(&b.coord) {
            return Ordering::Equal;
        }
        // the segment start vertex always sorts first
        if !a.is_interior {
            return Ordering::Less;
        }
        if !b.is_interior {
            return Ordering::Greater;
        }
        compare_along_segment(a.octant, &a.coord, &b.coord)
    }

    fn sort_nodes(&mut self) {
        self.nodes.sort_by(Self::compare_nodes);
        self.nodes
            .dedup_by(|a, b| Self::compare_nodes(a, b) == Ordering::Equal);
    }

    /// Collapse nodes are the middle vertex of an A-B-A pattern, either in the vertices or
    /// formed by two equal inserted nodes with a single vertex between them.
    fn add_collapsed_nodes(&mut self) {
        let mut collapsed = Vec::new();
        for (i, w) in self.coords.windows(3).enumerate() {
            if w[0].equals_2d(&w[2]) {
                collapsed.push(i + 1);
            }
        }

        for w in self.nodes.windows(2) {
            let (n0, n1) = (&w[0], &w[1]);
            if !n0.coord.equals_2d(&n1.coord) {
                continue;
            }
            let mut vertices_between = n1.segment_index - n0.segment_index;
            if !n1.is_interior {
                vertices_between = vertices_between.saturating_sub(1);
            }
            if vertices_between == 1 {
                collapsed.push(n0.segment_index + 1);
            }
        }

        for i in collapsed {
            let c = self.coords[i];
            self.add_node(c, i);
        }
    }

    fn prepare_nodes(&mut self) {
        if self.coords.is_empty() {
            return;
        }
        let last = self.coords.len() - 1;
        let (first_pt, last_pt) = (self.coords[0], self.coords[last]);
        self.add_node(first_pt, 0);
        self.add_node(last_pt, last);
        self.sort_nodes();
        self.add_collapsed_nodes();
        self.sort_nodes();
    }

    fn split_coords(&self, n0: &SegmentNode<T>, n1: &SegmentNode<T>) -> Vec<Coord<T>> {
        let mut pts = Vec::with_capacity(n1.segment_index - n0.segment_index + 2);
        pts.push(n0.coord);
        for i in (n0.segment_index + 1)..=n1.segment_index {
            push_distinct(&mut pts, self.coords[i]);
        }
        push_distinct(&mut pts, n1.coord);
        pts
    }

    /// Splits the string at all nodes, returning the pieces in order. Each piece carries the tag
    /// of this string. Pieces that degenerate to a single point are kept with two equal points,
    /// consumers decide whether they are collapses.
    pub fn into_noded_substrings(mut self) -> Vec<SegmentString<T>> {
        if self.coords.len() < 2 {
            return Vec::new();
        }
        self.prepare_nodes();
        let mut result = Vec::with_capacity(self.nodes.len().saturating_sub(1));
        for w in self.nodes.windows(2) {
            let mut pts = self.split_coords(&w[0], &w[1]);
            if pts.len() == 1 {
                pts.push(pts[0]);
            }
            result.push(SegmentString::new(pts, self.tag));
        }
        result
    }

    /// All coordinates of the string with the nodes inserted, without repeated points.
    pub fn noded_coords(&self) -> Vec<Coord<T>> {
        let mut tmp = self.clone();
        if tmp.coords.len() < 2 {
            return tmp.coords;
        }
        tmp.prepare_nodes();
        let mut pts: Vec<Coord<T>> = Vec::with_capacity(tmp.coords.len() + tmp.nodes.len());
        for w in tmp.nodes.windows(2) {
            for c in tmp.split_coords(&w[0], &w[1]) {
                push_distinct(&mut pts, c);
            }
        }
        pts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ss(pts: &[(f64, f64)]) -> SegmentString<f64> {
        SegmentString::new(pts.iter().map(|&(x, y)| Coord::new(x, y)).collect(), 7)
    }

    fn xy(s: &SegmentString<f64>) -> Vec<(f64, f64)> {
        s.coords().iter().map(|c| (c.x, c.y)).collect()
    }

    #[test]
    fn split_at_interior_nodes() {
        let mut s = ss(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        // inserted out of order and duplicated
        s.add_intersection(Coord::new(7.0, 0.0), 0);
        s.add_intersection(Coord::new(3.0, 0.0), 0);
        s.add_intersection(Coord::new(3.0, 0.0), 0);
        s.add_intersection(Coord::new(10.0, 5.0), 1);
        let parts = s.into_noded_substrings();
        assert_eq!(parts.len(), 4);
        assert_eq!(xy(&parts[0]), vec![(0.0, 0.0), (3.0, 0.0)]);
        assert_eq!(xy(&parts[1]), vec![(3.0, 0.0), (7.0, 0.0)]);
        assert_eq!(xy(&parts[2]), vec![(7.0, 0.0), (10.0, 0.0), (10.0, 5.0)]);
        assert_eq!(xy(&parts[3]), vec![(10.0, 5.0), (10.0, 10.0)]);
        assert!(parts.iter().all(|p| p.tag == 7));
    }

    #[test]
    fn node_at_vertex_is_normalized() {
        let mut s = ss(&[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0)]);
        s.add_intersection(Coord::new(5.0, 0.0), 0);
        let parts = s.into_noded_substrings();
        assert_eq!(parts.len(), 2);
        assert_eq!(xy(&parts[0]), vec![(0.0, 0.0), (5.0, 0.0)]);
    }

    #[test]
    fn ordering_along_descending_segment() {
        let mut s = ss(&[(10.0, 10.0), (0.0, 0.0)]);
        s.add_intersection(Coord::new(2.0, 2.0), 0);
        s.add_intersection(Coord::new(8.0, 8.0), 0);
        let pts = s.noded_coords();
        let xy: Vec<_> = pts.iter().map(|c| (c.x, c.y)).collect();
        assert_eq!(xy, vec![(10.0, 10.0), (8.0, 8.0), (2.0, 2.0), (0.0, 0.0)]);
    }

    #[test]
    fn collapse_vertex_becomes_node() {
        let s = ss(&[(0.0, 0.0), (5.0, 0.0), (0.0, 0.0), (0.0, 5.0)]);
        let parts = s.into_noded_substrings();
        // split at the spike tip
        assert_eq!(parts.len(), 2);
        assert_eq!(xy(&parts[0]), vec![(0.0, 0.0), (5.0, 0.0)]);
        assert_eq!(xy(&parts[1]), vec![(5.0, 0.0), (0.0, 0.0), (0.0, 5.0)]);
    }
}
