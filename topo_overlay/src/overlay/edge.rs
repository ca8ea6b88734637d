use super::label::OverlayLabel;
use crate::{
    core::traits::Real,
    error::{OverlayError, OverlayResult},
    geometry::{Coord, CoordKey, Dimension, Location},
};
use std::{cmp::Ordering, collections::BTreeMap};

/// Where a piece of linework came from: which input, the dimension of the input component, and
/// for polygon rings whether it is a hole and the depth change crossing it from left to right.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct EdgeSourceInfo {
    pub index: usize,
    pub dim: Dimension,
    pub is_hole: bool,
    pub depth_delta: i32,
}

impl EdgeSourceInfo {
    pub fn area(index: usize, depth_delta: i32, is_hole: bool) -> Self {
        EdgeSourceInfo {
            index,
            dim: Dimension::Area,
            is_hole,
            depth_delta,
        }
    }

    pub fn line(index: usize) -> Self {
        EdgeSourceInfo {
            index,
            dim: Dimension::Line,
            is_hole: false,
            depth_delta: 0,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct EdgeInput {
    dim: Dimension,
    depth_delta: i32,
    is_hole: bool,
}

impl EdgeInput {
    const NONE: EdgeInput = EdgeInput {
        dim: Dimension::Empty,
        depth_delta: 0,
        is_hole: false,
    };

    fn is_shell(&self) -> bool {
        self.dim == Dimension::Area && !self.is_hole
    }
}

/// A noded piece of linework carrying the accumulated topology of every input edge merged
/// into it.
#[derive(Debug, Clone)]
pub struct Edge<T> {
    pts: Vec<Coord<T>>,
    inputs: [EdgeInput; 2],
}

/// Returns `true` if the noded coordinates do not form a usable edge: fewer than 2 points, or
/// a zero length first or last segment.
pub fn is_collapsed<T>(pts: &[Coord<T>]) -> bool
where
    T: Real,
{
    let n = pts.len();
    if n < 2 {
        return true;
    }
    if pts[0].equals_2d(&pts[1]) {
        return true;
    }
    n > 2 && pts[n - 1].equals_2d(&pts[n - 2])
}

impl<T> Edge<T>
where
    T: Real,
{
    pub fn new(pts: Vec<Coord<T>>, info: &EdgeSourceInfo) -> Self {
        let mut inputs = [EdgeInput::NONE; 2];
        inputs[info.index] = EdgeInput {
            dim: info.dim,
            depth_delta: info.depth_delta,
            is_hole: info.is_hole,
        };
        Edge { pts, inputs }
    }

    pub fn coords(&self) -> &[Coord<T>] {
        &self.pts
    }

    pub fn into_coords(self) -> Vec<Coord<T>> {
        self.pts
    }

    pub fn len(&self) -> usize {
        self.pts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pts.is_empty()
    }

    /// `true` if the edge runs in its canonical direction, i.e. it starts at the
    /// lexicographically smaller end. Ties on the end points are broken by the second points.
    pub fn direction(&self) -> OverlayResult<bool> {
        let n = self.pts.len();
        if n < 2 {
            return Err(OverlayError::topology("edge must have at least 2 points"));
        }
        let cmp = match self.pts[0].compare_2d(&self.pts[n - 1]) {
            Ordering::Equal => self.pts[1].compare_2d(&self.pts[n - 2]),
            other => other,
        };
        match cmp {
            Ordering::Less => Ok(true),
            Ordering::Greater => Ok(false),
            Ordering::Equal => {
                let (x, y) = self.pts[0].to_f64_pair();
                Err(OverlayError::topology_at(
                    "edge direction cannot be determined because endpoints are equal",
                    x,
                    y,
                ))
            }
        }
    }

    /// `true` if `other` runs in the same direction as this edge. Only meaningful for edges with
    /// the same coordinates up to direction.
    pub fn relative_direction(&self, other: &Edge<T>) -> bool {
        self.pts[0].equals_2d(&other.pts[0]) && self.pts[1].equals_2d(&other.pts[1])
    }

    /// Merge the topology of a coincident edge into this one.
    pub fn merge(&mut self, other: &Edge<T>) {
        let flip = if self.relative_direction(other) { 1 } else { -1 };
        for (this, that) in self.inputs.iter_mut().zip(other.inputs.iter()) {
            // a shell in either edge makes the merged edge a shell
            this.is_hole = !(this.is_shell() || that.is_shell());
            if that.dim > this.dim {
                this.dim = that.dim;
            }
            this.depth_delta += flip * that.depth_delta;
        }
    }

    pub fn depth_delta(&self, index: usize) -> i32 {
        self.inputs[index].depth_delta
    }

    pub fn dim(&self, index: usize) -> Dimension {
        self.inputs[index].dim
    }

    /// Initial label built from the merged topology.
    pub fn create_label(&self) -> OverlayLabel {
        let mut label = OverlayLabel::new();
        for (i, input) in self.inputs.iter().enumerate() {
            match input.dim {
                Dimension::Empty | Dimension::Point => label.init_not_part(i),
                Dimension::Line => label.init_line(i),
                Dimension::Area if input.depth_delta == 0 => {
                    label.init_collapse(i, input.is_hole)
                }
                Dimension::Area => label.init_boundary(
                    i,
                    location_left(input.depth_delta),
                    location_right(input.depth_delta),
                    input.is_hole,
                ),
            }
        }
        label
    }
}

fn location_left(depth_delta: i32) -> Location {
    if depth_delta > 0 {
        Location::Exterior
    } else {
        Location::Interior
    }
}

fn location_right(depth_delta: i32) -> Location {
    if depth_delta < 0 {
        Location::Exterior
    } else {
        Location::Interior
    }
}

/// Direction independent key of an edge: the first two points in canonical direction.
#[derive(Debug, Clone)]
struct EdgeKey<T: Real>(CoordKey<T>, CoordKey<T>);

impl<T> PartialEq for EdgeKey<T>
where
    T: Real,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 == other.1
    }
}

impl<T> Eq for EdgeKey<T> where T: Real {}

impl<T> PartialOrd for EdgeKey<T>
where
    T: Real,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for EdgeKey<T>
where
    T: Real,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0).then_with(|| self.1.cmp(&other.1))
    }
}

impl<T> EdgeKey<T>
where
    T: Real,
{
    fn new(edge: &Edge<T>) -> OverlayResult<Self> {
        let pts = edge.coords();
        let n = pts.len();
        let key = if edge.direction()? {
            EdgeKey(CoordKey(pts[0]), CoordKey(pts[1]))
        } else {
            EdgeKey(CoordKey(pts[n - 1]), CoordKey(pts[n - 2]))
        };
        Ok(key)
    }
}

/// Merge coincident edges, keeping the first occurrence of each and folding the topology of
/// the others into it. The order of first occurrences is preserved.
pub fn merge_edges<T>(edges: Vec<Edge<T>>) -> OverlayResult<Vec<Edge<T>>>
where
    T: Real,
{
    let mut merged: Vec<Edge<T>> = Vec::with_capacity(edges.len());
    let mut index_of: BTreeMap<EdgeKey<T>, usize> = BTreeMap::new();

    for edge in edges {
        let key = EdgeKey::new(&edge)?;
        match index_of.get(&key) {
            Some(&i) => {
                let base = &mut merged[i];
                if base.len() != edge.len() {
                    let (x, y) = edge.coords()[0].to_f64_pair();
                    return Err(OverlayError::noding_at(
                        "merge of edges of different sizes",
                        x,
                        y,
                    ));
                }
                base.merge(&edge);
            }
            None => {
                index_of.insert(key, merged.len());
                merged.push(edge);
            }
        }
    }

    Ok(merged)
}
