use super::{
    edge_ring::OverlayEdgeRing,
    graph::OverlayGraph,
    max_ring::{link_result_area_max_ring_at_node, MaximalEdgeRing},
};
use crate::{
    core::traits::Real,
    error::{OverlayError, OverlayResult},
    geometry::Polygon,
};

/// Builds the result polygons from the half-edges marked as the result area boundary.
pub struct PolygonBuilder<T>
where
    T: Real,
{
    rings: Vec<OverlayEdgeRing<T>>,
    shells: Vec<usize>,
    free_holes: Vec<usize>,
    enforce_polygonal: bool,
}

impl<T> PolygonBuilder<T>
where
    T: Real,
{
    /// Link and build every result ring of `graph`.
    ///
    /// With `enforce_polygonal` a hole which no shell contains is an error. Otherwise the hole
    /// becomes a polygon of its own.
    pub fn new(graph: &mut OverlayGraph<T>, enforce_polygonal: bool) -> OverlayResult<Self> {
        let mut builder = PolygonBuilder {
            rings: Vec::new(),
            shells: Vec::new(),
            free_holes: Vec::new(),
            enforce_polygonal,
        };
        builder.build_rings(graph)?;
        Ok(builder)
    }

    pub fn polygons(&self) -> OverlayResult<Vec<Polygon<T>>> {
        let mut result: Vec<Polygon<T>> = self
            .shells
            .iter()
            .map(|&s| self.rings[s].to_polygon(&self.rings))
            .collect();
        for &h in self.free_holes.iter() {
            let hole = &self.rings[h];
            if self.enforce_polygonal {
                return Err(OverlayError::UnassignedHole {
                    location: hole.coordinate().to_f64_pair(),
                });
            }
            result.push(hole.to_free_polygon());
        }
        Ok(result)
    }

    fn build_rings(&mut self, graph: &mut OverlayGraph<T>) -> OverlayResult<()> {
        let result_area_edges = graph.result_area_edges();
        for &e in result_area_edges.iter() {
            link_result_area_max_ring_at_node(graph, e)?;
        }

        let mut max_rings = Vec::new();
        for &e in result_area_edges.iter() {
            if graph.label(e).is_boundary_either() && graph.max_edge_ring(e).is_none() {
                let id = max_rings.len();
                max_rings.push(MaximalEdgeRing::new(graph, e, id)?);
            }
        }

        for max_ring in max_rings.iter() {
            let min_rings = max_ring.build_minimal_rings(graph, &mut self.rings)?;
            self.assign_shells_and_holes(&min_rings)?;
        }
        self.place_free_holes();
        Ok(())
    }

    /// A set of minimal rings split from one maximal ring holds at most one shell, and any
    /// holes among them belong to it.
    fn assign_shells_and_holes(&mut self, min_rings: &[usize]) -> OverlayResult<()> {
        match self.find_single_shell(min_rings)? {
            Some(shell) => {
                self.assign_holes(shell, min_rings);
                self.shells.push(shell);
            }
            None => self.free_holes.extend_from_slice(min_rings),
        }
        Ok(())
    }

    fn find_single_shell(&self, min_rings: &[usize]) -> OverlayResult<Option<usize>> {
        let mut shell = None;
        for &r in min_rings {
            if self.rings[r].is_hole() {
                continue;
            }
            if shell.is_some() {
                let (x, y) = self.rings[r].coordinate().to_f64_pair();
                return Err(OverlayError::topology_at("found two shells in edge ring list", x, y));
            }
            shell = Some(r);
        }
        Ok(shell)
    }

    fn assign_holes(&mut self, shell: usize, min_rings: &[usize]) {
        for &r in min_rings {
            if self.rings[r].is_hole() {
                self.rings[r].set_shell(shell);
                self.rings[shell].add_hole(r);
            }
        }
    }

    /// Place each remaining hole in the smallest shell containing it. Holes left over are kept
    /// as free holes.
    fn place_free_holes(&mut self) {
        let candidates = std::mem::take(&mut self.free_holes);
        for h in candidates {
            if self.rings[h].shell().is_some() {
                continue;
            }
            match self.rings[h].find_edge_ring_containing(&self.rings, &self.shells) {
                Some(shell) => {
                    self.rings[h].set_shell(shell);
                    self.rings[shell].add_hole(h);
                }
                None => self.free_holes.push(h),
            }
        }
    }
}
