//! Single attempt overlay of two geometries using one noding strategy.
//!
//! The linework of the inputs is noded, merged into labelled edges and built into a half-edge
//! graph. Labelling locates every edge against both inputs, after which the result polygons,
//! lines and points are extracted from the edges selected by the operation. Inputs consisting
//! of points skip the graph entirely.
mod clip;
mod edge;
mod edge_ring;
mod elevation;
mod graph;
mod input;
mod label;
mod labeller;
mod line_builder;
mod max_ring;
mod mixed_dims;
mod mixed_points;
mod noding_builder;
mod point_builder;
mod points;
mod polygon_builder;
mod util;

pub use elevation::ElevationModel;
pub use label::{LabelDim, OverlayLabel, Position};
pub(crate) use mixed_dims::overlay_heterogeneous;
pub use util::{is_empty_result, is_result_area_consistent, safe_env};

use self::{
    graph::OverlayGraph, input::InputGeometry, labeller::OverlayLabeller,
    line_builder::LineBuilder, mixed_points::overlay_mixed_points,
    noding_builder::EdgeNodingBuilder, point_builder::IntersectionPointBuilder,
    points::overlay_points, polygon_builder::PolygonBuilder, util::clipping_envelope,
};
use crate::{
    core::traits::Real,
    error::{OverlayError, OverlayResult},
    geometry::{Dimension, Geometry, Location},
    precision::PrecisionModel,
};
use log::trace;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// Boolean set operation computed by an overlay.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum OverlayOp {
    Intersection,
    Union,
    /// Points of the first geometry not in the second.
    Difference,
    SymDifference,
}

impl OverlayOp {
    /// Tests whether a point with the given locations relative to the two inputs is in the
    /// result. A boundary location counts as interior, an unknown location as exterior.
    pub fn is_result_of_op(&self, loc0: Option<Location>, loc1: Option<Location>) -> bool {
        let is_interior = |loc: Option<Location>| {
            matches!(loc, Some(Location::Interior) | Some(Location::Boundary))
        };
        let in0 = is_interior(loc0);
        let in1 = is_interior(loc1);
        match self {
            OverlayOp::Intersection => in0 && in1,
            OverlayOp::Union => in0 || in1,
            OverlayOp::Difference => in0 && !in1,
            OverlayOp::SymDifference => in0 != in1,
        }
    }

    /// Dimension of the result of the operation, used for empty results.
    pub fn result_dimension(&self, dim0: Dimension, dim1: Dimension) -> Dimension {
        match self {
            OverlayOp::Intersection => dim0.min(dim1),
            OverlayOp::Union | OverlayOp::SymDifference => dim0.max(dim1),
            OverlayOp::Difference => dim0,
        }
    }
}

impl fmt::Display for OverlayOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OverlayOp::Intersection => "intersection",
            OverlayOp::Union => "union",
            OverlayOp::Difference => "difference",
            OverlayOp::SymDifference => "symdifference",
        };
        f.write_str(name)
    }
}

/// Options controlling an overlay.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct OverlayOptions {
    /// Strict mode drops the lines and points formed by collapsed area boundaries, and keeps
    /// an intersection with a result area free of lower dimension parts. Lenient mode keeps
    /// them.
    pub strict: bool,
    /// Clip the input linework to the region which can contribute to the result.
    pub optimized: bool,
    /// Check the area of floating precision results against the input areas and fail the
    /// attempt if they disagree.
    pub area_consistency_check: bool,
    /// Fail with [OverlayError::UnassignedHole] when a result hole has no shell. When `false`
    /// such a hole is output as a polygon of its own.
    pub enforce_polygonal: bool,
}

impl OverlayOptions {
    pub fn new() -> Self {
        Self {
            strict: false,
            optimized: true,
            area_consistency_check: true,
            enforce_polygonal: true,
        }
    }
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// How the input linework is noded for one overlay attempt.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum NodingStrategy {
    /// Full precision noding, validated afterwards.
    Floating,
    /// Snap rounding to the grid of the precision model.
    SnapRounding(PrecisionModel),
}

impl NodingStrategy {
    /// Precision model of the noded output.
    pub fn precision(&self) -> PrecisionModel {
        match self {
            NodingStrategy::Floating => PrecisionModel::Floating,
            NodingStrategy::SnapRounding(pm) => *pm,
        }
    }
}

impl fmt::Display for NodingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodingStrategy::Floating => f.write_str("floating"),
            NodingStrategy::SnapRounding(pm) => write!(f, "snap-rounding(grid {})", pm.grid_size()),
        }
    }
}

/// One overlay attempt with a fixed noding strategy. Failures are returned rather than retried,
/// see [crate::robust] for the escalating overlay.
///
/// # Examples
///
/// ```
/// # use topo_overlay::geometry::*;
/// # use topo_overlay::overlay::*;
/// let a = Geometry::Polygon(Polygon::new(
///     LineString::from_xy(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0), (0.0, 0.0)]),
///     vec![],
/// ));
/// let b = Geometry::Polygon(Polygon::new(
///     LineString::from_xy(&[(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0), (1.0, 1.0)]),
///     vec![],
/// ));
/// let result = OverlayNg::new(&a, Some(&b), OverlayOp::Intersection).result().unwrap();
/// assert_eq!(result.area(), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct OverlayNg<'a, T>
where
    T: Real,
{
    a: &'a Geometry<T>,
    b: Option<&'a Geometry<T>>,
    op: OverlayOp,
    strategy: NodingStrategy,
    options: OverlayOptions,
}

impl<'a, T> OverlayNg<'a, T>
where
    T: Real,
{
    /// Overlay of `a` and `b`, or of `a` with itself when `b` is `None` (only meaningful for a
    /// union, which dissolves `a`).
    pub fn new(a: &'a Geometry<T>, b: Option<&'a Geometry<T>>, op: OverlayOp) -> Self {
        OverlayNg {
            a,
            b,
            op,
            strategy: NodingStrategy::Floating,
            options: OverlayOptions::new(),
        }
    }

    pub fn with_strategy(mut self, strategy: NodingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_options(mut self, options: OverlayOptions) -> Self {
        self.options = options;
        self
    }

    pub fn result(&self) -> OverlayResult<Geometry<T>> {
        let pm = self.strategy.precision();
        if is_empty_result(self.op, self.a, self.b, &pm) {
            return Ok(self.empty_result());
        }

        let elevation = ElevationModel::create(self.a, self.b);
        let mut input = InputGeometry::new(self.a, self.b);
        let mut result = match self.b {
            Some(b) if input.is_all_points() => overlay_points(self.op, self.a, b, &pm),
            Some(b) if input.has_points() => overlay_mixed_points(self.op, self.a, b, self.strategy)?,
            // a self overlay of points only removes duplicates
            None if input.has_points() => {
                overlay_points(self.op, self.a, &Geometry::empty(Dimension::Point), &pm)
            }
            _ => self.compute_edge_overlay(&mut input)?,
        };
        elevation.populate_z(&mut result);
        Ok(result)
    }

    fn empty_result(&self) -> Geometry<T> {
        let dim_b = self.b.map_or(Dimension::Empty, |b| b.dimension());
        Geometry::empty(self.op.result_dimension(self.a.dimension(), dim_b))
    }

    fn compute_edge_overlay(&self, input: &mut InputGeometry<'a, T>) -> OverlayResult<Geometry<T>> {
        let pm = self.strategy.precision();
        let mut builder = EdgeNodingBuilder::new(self.strategy);
        if self.options.optimized {
            if let Some(clip_env) = clipping_envelope(self.op, input, &pm) {
                builder.set_clip_envelope(clip_env);
            }
        }
        let edges = builder.build(self.a, self.b)?;
        // an input with no edges left collapsed completely under noding
        input.set_collapsed(0, !builder.has_edges_for(0));
        input.set_collapsed(1, !builder.has_edges_for(1));
        trace!("{} merged edges for {}", edges.len(), self.op);

        let mut graph = OverlayGraph::new();
        for edge in edges {
            let label = edge.create_label();
            graph.add_edge(edge.into_coords(), label);
        }

        let mut labeller = OverlayLabeller::new(&mut graph, input);
        labeller.compute_labelling()?;
        labeller.mark_result_area_edges(self.op);
        labeller.unmark_duplicate_edges_from_result_area();

        let result = self.extract_result(&mut graph, input)?;

        // noding can move vertices enough to invert the labelling of an area
        if pm.is_floating()
            && self.options.area_consistency_check
            && !is_result_area_consistent(self.a, self.b, self.op, &result)
        {
            return Err(OverlayError::topology(
                "result area inconsistent with overlay operation",
            ));
        }
        Ok(result)
    }

    fn extract_result(
        &self,
        graph: &mut OverlayGraph<T>,
        input: &InputGeometry<'a, T>,
    ) -> OverlayResult<Geometry<T>> {
        let strict = self.options.strict;
        let polygons = PolygonBuilder::new(graph, self.options.enforce_polygonal)?.polygons()?;
        let has_result_area = !polygons.is_empty();

        let allow_result_lines = !has_result_area
            || !strict
            || matches!(self.op, OverlayOp::SymDifference | OverlayOp::Union);
        let lines = if allow_result_lines {
            LineBuilder::new(graph, self.op, has_result_area, input.area_index(), strict).lines()
        } else {
            Vec::new()
        };

        // only an intersection of non-point inputs can produce points
        let has_result_components = has_result_area || !lines.is_empty();
        let points = if self.op == OverlayOp::Intersection && (!has_result_components || !strict) {
            IntersectionPointBuilder::new(graph, strict).points()
        } else {
            Vec::new()
        };

        if polygons.is_empty() && lines.is_empty() && points.is_empty() {
            return Ok(self.empty_result());
        }
        Ok(Geometry::build(polygons, lines, points))
    }
}

/// Union of the components of `g` with one another, using a single noding strategy.
pub fn union_self<T>(g: &Geometry<T>, strategy: NodingStrategy) -> OverlayResult<Geometry<T>>
where
    T: Real,
{
    OverlayNg::new(g, None, OverlayOp::Union)
        .with_strategy(strategy)
        .result()
}
