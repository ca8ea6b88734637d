use super::graph::{EdgeId, OverlayGraph};
use crate::{
    algorithm::{is_ccw, locate_point_in_ring},
    core::traits::Real,
    error::{OverlayError, OverlayResult},
    geometry::{covers, envelope_of, Coord, LineString, Location, Polygon},
};
use static_aabb2d_index::AABB;

/// A minimal ring of result edges. Result edges have the result area on their right, so shells
/// run clockwise and holes counter clockwise.
#[derive(Debug, Clone)]
pub struct OverlayEdgeRing<T>
where
    T: Real,
{
    ring: LineString<T>,
    env: AABB<T>,
    is_hole: bool,
    shell: Option<usize>,
    holes: Vec<usize>,
}

impl<T> OverlayEdgeRing<T>
where
    T: Real,
{
    /// Build the ring starting at `start` by following the minimal ring links, claiming every
    /// edge for ring `id`.
    pub fn new(graph: &mut OverlayGraph<T>, start: EdgeId, id: usize) -> OverlayResult<Self> {
        let mut pts: Vec<Coord<T>> = Vec::new();
        let mut e = start;
        loop {
            if graph.edge_ring(e) == Some(id) {
                let (x, y) = graph.orig(e).to_f64_pair();
                return Err(OverlayError::topology_at(
                    "edge visited twice during ring-building",
                    x,
                    y,
                ));
            }
            graph.add_coordinates(e, &mut pts);
            graph.set_edge_ring(e, id);
            let Some(next) = graph.next_result(e) else {
                let (x, y) = graph.dest(e).to_f64_pair();
                return Err(OverlayError::topology_at("found null edge in ring", x, y));
            };
            e = next;
            if e == start {
                break;
            }
        }

        if let Some(first) = pts.first().copied() {
            if pts.last().is_some_and(|last| !last.equals_2d(&first)) {
                pts.push(first);
            }
        }
        let env = match envelope_of(pts.iter()) {
            Some(env) if pts.len() >= 4 => env,
            _ => {
                let (x, y) = graph.orig(start).to_f64_pair();
                return Err(OverlayError::topology_at("ring has too few points", x, y));
            }
        };

        let is_hole = is_ccw(&pts);
        Ok(OverlayEdgeRing {
            ring: LineString::new(pts),
            env,
            is_hole,
            shell: None,
            holes: Vec::new(),
        })
    }

    pub fn is_hole(&self) -> bool {
        self.is_hole
    }

    pub fn shell(&self) -> Option<usize> {
        self.shell
    }

    pub fn coords(&self) -> &[Coord<T>] {
        &self.ring.coords
    }

    pub fn coordinate(&self) -> Coord<T> {
        self.ring.coords[0]
    }

    pub fn envelope(&self) -> &AABB<T> {
        &self.env
    }

    pub fn abs_area(&self) -> T {
        self.ring.signed_area().abs()
    }

    /// `true` if `p` is inside or on this ring.
    pub fn is_in_ring(&self, p: &Coord<T>) -> bool {
        locate_point_in_ring(p, &self.ring.coords) != Location::Exterior
    }

    /// First vertex of this ring which is not a vertex of `other`.
    fn pt_not_in(&self, other: &OverlayEdgeRing<T>) -> Option<Coord<T>> {
        self.ring
            .coords
            .iter()
            .find(|p| !other.ring.coords.iter().any(|q| q.equals_2d(p)))
            .copied()
    }

    /// Finds the shell among `shells` containing this hole. When several do, the one with the
    /// smallest area is chosen, ties going to the earliest.
    pub fn find_edge_ring_containing(
        &self,
        rings: &[OverlayEdgeRing<T>],
        shells: &[usize],
    ) -> Option<usize> {
        let mut result: Option<(usize, T)> = None;
        for &s in shells {
            let shell = &rings[s];
            // the hole envelope cannot equal the shell envelope, this also excludes the hole
            // itself
            if shell.env.min_x == self.env.min_x
                && shell.env.min_y == self.env.min_y
                && shell.env.max_x == self.env.max_x
                && shell.env.max_y == self.env.max_y
            {
                continue;
            }
            if !covers(&shell.env, &self.env) {
                continue;
            }
            let Some(test_pt) = self.pt_not_in(shell) else {
                continue;
            };
            if !shell.is_in_ring(&test_pt) {
                continue;
            }
            let area = shell.abs_area();
            match result {
                Some((_, min_area)) if area >= min_area => {}
                _ => result = Some((s, area)),
            }
        }
        result.map(|(s, _)| s)
    }

    pub fn add_hole(&mut self, hole: usize) {
        self.holes.push(hole);
    }

    pub fn set_shell(&mut self, shell: usize) {
        self.shell = Some(shell);
    }

    /// Polygon of this shell and its holes, oriented with a counter clockwise shell and
    /// clockwise holes.
    pub fn to_polygon(&self, rings: &[OverlayEdgeRing<T>]) -> Polygon<T> {
        let holes = self
            .holes
            .iter()
            .map(|&h| rings[h].ring.reversed())
            .collect();
        Polygon::new(self.ring.reversed(), holes)
    }

    /// Polygon formed by a hole which has no shell.
    pub fn to_free_polygon(&self) -> Polygon<T> {
        Polygon::new(self.ring.clone(), Vec::new())
    }
}
