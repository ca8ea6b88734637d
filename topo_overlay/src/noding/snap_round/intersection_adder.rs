use crate::{
    core::{math::point_seg_dist, traits::Real},
    geometry::Coord,
    noding::{LineIntersector, SegmentIntersector, SegmentString},
    precision::PrecisionModel,
};

/// Fraction of the grid size within which a vertex is considered near a segment.
const INTERSECTION_NEARNESS_FACTOR: f64 = 100.0;

/// Finds intersection points which must become hot pixels: interior intersections plus vertices
/// lying very close to another segment.
///
/// Intersections are computed at full precision, they are rounded when their hot pixels are
/// created.
///
/// Nodes are added to the strings for every point found so the snapped result keeps them.
#[derive(Debug, Clone)]
pub struct SnapRoundingIntersectionAdder<T> {
    li: LineIntersector<T>,
    nearness_tol: T,
    /// Intersection points found, may contain duplicates.
    pub intersections: Vec<Coord<T>>,
}

impl<T> SnapRoundingIntersectionAdder<T>
where
    T: Real,
{
    pub fn new(precision: PrecisionModel) -> Self {
        let nearness_tol = precision.grid_size() / INTERSECTION_NEARNESS_FACTOR;
        SnapRoundingIntersectionAdder {
            li: LineIntersector::default(),
            nearness_tol: T::from_f64_lossy(nearness_tol),
            intersections: Vec::new(),
        }
    }

    /// Records `p` as an intersection on segment `seg_index` of `ss` if it lies within the
    /// nearness tolerance of the segment interior.
    fn process_near_vertex(
        &mut self,
        p: Coord<T>,
        ss: &mut SegmentString<T>,
        seg_index: usize,
        p0: &Coord<T>,
        p1: &Coord<T>,
    ) {
        // vertices near a segment endpoint are snapped by the endpoint pixel
        if p.distance(p0) < self.nearness_tol || p.distance(p1) < self.nearness_tol {
            return;
        }
        let dist = point_seg_dist(p.xy(), p0.xy(), p1.xy());
        if dist < self.nearness_tol {
            self.intersections.push(p);
            ss.add_intersection(p, seg_index);
        }
    }
}

impl<T> SegmentIntersector<T> for SnapRoundingIntersectionAdder<T>
where
    T: Real,
{
    fn process_intersections(
        &mut self,
        strings: &mut [SegmentString<T>],
        s0: usize,
        i0: usize,
        s1: usize,
        i1: usize,
    ) {
        if s0 == s1 && i0 == i1 {
            return;
        }
        let (p00, p01) = (*strings[s0].coord(i0), *strings[s0].coord(i0 + 1));
        let (p10, p11) = (*strings[s1].coord(i1), *strings[s1].coord(i1 + 1));

        self.li.compute_intersection(&p00, &p01, &p10, &p11);
        if self.li.has_intersection() && self.li.is_interior_intersection() {
            for k in 0..self.li.intersection_num() {
                let p = *self.li.intersection(k);
                self.intersections.push(p);
                strings[s0].add_intersection(p, i0);
                strings[s1].add_intersection(p, i1);
            }
            return;
        }

        self.process_near_vertex(p00, &mut strings[s1], i1, &p10, &p11);
        self.process_near_vertex(p01, &mut strings[s1], i1, &p10, &p11);
        self.process_near_vertex(p10, &mut strings[s0], i0, &p00, &p01);
        self.process_near_vertex(p11, &mut strings[s0], i0, &p00, &p01);
    }
}
