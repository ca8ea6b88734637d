use super::{
    clip::{LineLimiter, RingClipper},
    edge::{is_collapsed, merge_edges, Edge, EdgeSourceInfo},
    NodingStrategy,
};
use crate::{
    algorithm::is_ccw,
    core::traits::Real,
    error::OverlayResult,
    geometry::{covers, intersects, remove_repeated_points, Coord, Geometry, LineString, Polygon},
    noding::{FloatingNoder, Noder, SegmentString, SnapRoundingNoder},
};
use log::trace;
use static_aabb2d_index::AABB;

/// Lines with more points than this are limited to the clip envelope rather than kept whole.
const MIN_LIMIT_PTS: usize = 20;

/// Extracts the linework of the inputs, nodes it, and merges the noded pieces into unique
/// edges labelled with their source topology.
pub struct EdgeNodingBuilder<T>
where
    T: Real,
{
    strategy: NodingStrategy,
    clip_env: Option<AABB<T>>,
    strings: Vec<SegmentString<T>>,
    infos: Vec<EdgeSourceInfo>,
    has_edges: [bool; 2],
}

impl<T> EdgeNodingBuilder<T>
where
    T: Real,
{
    pub fn new(strategy: NodingStrategy) -> Self {
        EdgeNodingBuilder {
            strategy,
            clip_env: None,
            strings: Vec::new(),
            infos: Vec::new(),
            has_edges: [false; 2],
        }
    }

    /// Restrict the input linework to `clip_env`. The envelope must contain the full result.
    pub fn set_clip_envelope(&mut self, clip_env: AABB<T>) {
        self.clip_env = Some(clip_env);
    }

    /// `true` if noding left at least one edge from input `index`. An input with linework but
    /// no edges has collapsed completely.
    pub fn has_edges_for(&self, index: usize) -> bool {
        self.has_edges[index]
    }

    pub fn build(
        &mut self,
        a: &Geometry<T>,
        b: Option<&Geometry<T>>,
    ) -> OverlayResult<Vec<Edge<T>>> {
        self.add(a, 0);
        if let Some(b) = b {
            self.add(b, 1);
        }
        let strings = std::mem::take(&mut self.strings);
        trace!("noding {} segment strings", strings.len());
        let noded = match self.strategy {
            NodingStrategy::Floating => FloatingNoder::default().compute_nodes(strings)?,
            NodingStrategy::SnapRounding(pm) => SnapRoundingNoder::new(pm).compute_nodes(strings)?,
        };
        let edges = self.create_edges(noded);
        merge_edges(edges)
    }

    fn create_edges(&mut self, strings: Vec<SegmentString<T>>) -> Vec<Edge<T>> {
        let mut edges = Vec::with_capacity(strings.len());
        for ss in strings {
            if is_collapsed(ss.coords()) {
                continue;
            }
            let info = self.infos[ss.tag];
            self.has_edges[info.index] = true;
            edges.push(Edge::new(ss.coords().to_vec(), &info));
        }
        edges
    }

    fn add(&mut self, g: &Geometry<T>, index: usize) {
        if g.is_empty() || self.is_clipped_completely(g.envelope()) {
            return;
        }
        match g {
            Geometry::Polygon(poly) => self.add_polygon(poly, index),
            Geometry::MultiPolygon(polys) => {
                for poly in polys {
                    self.add_polygon(poly, index);
                }
            }
            Geometry::LineString(line) => self.add_line(line, index),
            Geometry::MultiLineString(lines) => {
                for line in lines {
                    self.add_line(line, index);
                }
            }
            Geometry::GeometryCollection(parts) => {
                for part in parts {
                    self.add(part, index);
                }
            }
            // points carry no linework
            Geometry::Point(_) | Geometry::MultiPoint(_) => {}
        }
    }

    fn add_polygon(&mut self, poly: &Polygon<T>, index: usize) {
        self.add_polygon_ring(&poly.exterior, false, index);
        for hole in poly.interiors.iter() {
            // holes are labelled opposite to the shell since the polygon interior is on their
            // other side
            self.add_polygon_ring(hole, true, index);
        }
    }

    fn add_polygon_ring(&mut self, ring: &LineString<T>, is_hole: bool, index: usize) {
        if ring.is_empty() || self.is_clipped_completely(ring.envelope()) {
            return;
        }
        let pts = self.clip_ring(ring);
        // clipping can reduce a ring to a point
        if pts.len() < 2 {
            return;
        }
        let depth_delta = compute_depth_delta(&ring.coords, is_hole);
        self.add_edge(pts, EdgeSourceInfo::area(index, depth_delta, is_hole));
    }

    fn add_line(&mut self, line: &LineString<T>, index: usize) {
        if line.is_empty() || self.is_clipped_completely(line.envelope()) {
            return;
        }
        match self.limit_env(line) {
            Some(env) => {
                for section in LineLimiter::new(env).limit(&line.coords) {
                    self.add_line_pts(section, index);
                }
            }
            None => {
                let pts = remove_repeated_points(&line.coords);
                self.add_line_pts(pts, index);
            }
        }
    }

    fn add_line_pts(&mut self, pts: Vec<Coord<T>>, index: usize) {
        if pts.len() < 2 {
            return;
        }
        self.add_edge(pts, EdgeSourceInfo::line(index));
    }

    fn add_edge(&mut self, pts: Vec<Coord<T>>, info: EdgeSourceInfo) {
        self.strings.push(SegmentString::new(pts, self.infos.len()));
        self.infos.push(info);
    }

    fn is_clipped_completely(&self, env: Option<AABB<T>>) -> bool {
        match (&self.clip_env, env) {
            (Some(clip_env), Some(env)) => !intersects(clip_env, &env),
            _ => false,
        }
    }

    fn clip_ring(&self, ring: &LineString<T>) -> Vec<Coord<T>> {
        match (&self.clip_env, ring.envelope()) {
            (Some(clip_env), Some(env)) if !covers(clip_env, &env) => {
                RingClipper::new(*clip_env).clip(&ring.coords)
            }
            _ => remove_repeated_points(&ring.coords),
        }
    }

    /// Envelope to limit the line to, if it is long enough to be worth limiting.
    fn limit_env(&self, line: &LineString<T>) -> Option<AABB<T>> {
        let clip_env = self.clip_env?;
        if line.len() <= MIN_LIMIT_PTS {
            return None;
        }
        let env = line.envelope()?;
        if covers(&clip_env, &env) {
            return None;
        }
        Some(clip_env)
    }
}

/// Depth change crossing a ring from left to right. Shells are expected clockwise and holes
/// counter clockwise, a ring in that orientation has the area interior on its right.
fn compute_depth_delta<T>(ring: &[Coord<T>], is_hole: bool) -> i32
where
    T: Real,
{
    let ccw = is_ccw(ring);
    let is_oriented = if is_hole { ccw } else { !ccw };
    if is_oriented {
        1
    } else {
        -1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{geometry::Dimension, precision::PrecisionModel};

    fn square(x: f64, y: f64, size: f64) -> Polygon<f64> {
        Polygon::new(
            LineString::from_xy(&[
                (x, y),
                (x + size, y),
                (x + size, y + size),
                (x, y + size),
                (x, y),
            ]),
            vec![],
        )
    }

    #[test]
    fn depth_delta_follows_orientation() {
        let ccw = square(0.0, 0.0, 1.0);
        assert_eq!(compute_depth_delta(&ccw.exterior.coords, false), -1);
        assert_eq!(compute_depth_delta(&ccw.exterior.coords, true), 1);
        let cw = ccw.exterior.reversed();
        assert_eq!(compute_depth_delta(&cw.coords, false), 1);
    }

    #[test]
    fn shared_edge_is_merged() {
        let a = Geometry::Polygon(square(0.0, 0.0, 2.0));
        let b = Geometry::Polygon(square(2.0, 0.0, 2.0));
        let mut builder = EdgeNodingBuilder::new(NodingStrategy::Floating);
        let edges = builder.build(&a, Some(&b)).unwrap();
        // the shared side splits both rings and is merged into a single edge
        assert_eq!(edges.len(), 4);
        let shared = edges
            .iter()
            .filter(|e| e.dim(0) == Dimension::Area && e.dim(1) == Dimension::Area)
            .count();
        assert_eq!(shared, 1);
        assert!(builder.has_edges_for(0));
        assert!(builder.has_edges_for(1));
    }

    #[test]
    fn clipped_input_is_skipped() {
        let a = Geometry::Polygon(square(0.0, 0.0, 2.0));
        let b = Geometry::Polygon(square(100.0, 100.0, 2.0));
        let mut builder = EdgeNodingBuilder::new(NodingStrategy::Floating);
        builder.set_clip_envelope(AABB::new(-1.0, -1.0, 3.0, 3.0));
        let edges = builder.build(&a, Some(&b)).unwrap();
        assert_eq!(edges.len(), 1);
        assert!(!builder.has_edges_for(1));
    }

    #[test]
    fn ring_collapsing_under_snap_rounding_has_no_edges() {
        let a = Geometry::Polygon(square(0.0, 0.0, 10.0));
        let b = Geometry::Polygon(square(3.1, 3.1, 0.2));
        let mut builder = EdgeNodingBuilder::new(NodingStrategy::SnapRounding(PrecisionModel::fixed(1.0)));
        let edges = builder.build(&a, Some(&b)).unwrap();
        assert!(builder.has_edges_for(0));
        assert!(!builder.has_edges_for(1));
        assert_eq!(edges.len(), 1);
    }
}
