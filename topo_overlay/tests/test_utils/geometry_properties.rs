use static_aabb2d_index::AABB;
use topo_overlay::{Dimension, Geometry, core::traits::FuzzyEq};

/// Fuzzy compare AABB values
pub fn aabb_fuzzy_eq_eps(a: &AABB<f64>, b: &AABB<f64>, eps: f64) -> bool {
    a.min_x.fuzzy_eq_eps(b.min_x, eps)
        && a.min_y.fuzzy_eq_eps(b.min_y, eps)
        && a.max_x.fuzzy_eq_eps(b.max_x, eps)
        && a.max_y.fuzzy_eq_eps(b.max_y, eps)
}

/// Holds a set of properties of a single result component for comparison in tests. Vertex
/// counts are left out since results may carry extra node vertices.
#[derive(Debug, Copy, Clone)]
pub struct ComponentProperties {
    pub dimension: Dimension,
    pub hole_count: usize,
    pub area: f64,
    pub length: f64,
    pub extents: AABB<f64>,
}

impl ComponentProperties {
    // property comparer epsilon
    pub const PROP_CMP_EPS: f64 = 1e-6;

    pub fn new(
        dimension: Dimension,
        hole_count: usize,
        area: f64,
        length: f64,
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
    ) -> Self {
        Self {
            dimension,
            hole_count,
            area,
            length,
            extents: AABB::new(min_x, min_y, max_x, max_y),
        }
    }

    pub fn polygon(hole_count: usize, area: f64, perimeter: f64, extents: [f64; 4]) -> Self {
        let [min_x, min_y, max_x, max_y] = extents;
        Self::new(
            Dimension::Area,
            hole_count,
            area,
            perimeter,
            min_x,
            min_y,
            max_x,
            max_y,
        )
    }

    pub fn line(length: f64, extents: [f64; 4]) -> Self {
        let [min_x, min_y, max_x, max_y] = extents;
        Self::new(Dimension::Line, 0, 0.0, length, min_x, min_y, max_x, max_y)
    }

    pub fn point(x: f64, y: f64) -> Self {
        Self::new(Dimension::Point, 0, 0.0, 0.0, x, y, x, y)
    }

    pub fn fuzzy_eq_eps(&self, other: &Self, eps: f64) -> bool {
        if self.dimension != other.dimension {
            return false;
        }
        if self.hole_count != other.hole_count {
            return false;
        }
        if !self.area.fuzzy_eq_eps(other.area, eps) {
            return false;
        }
        if !self.length.fuzzy_eq_eps(other.length, eps) {
            return false;
        }
        if !aabb_fuzzy_eq_eps(&self.extents, &other.extents, eps) {
            return false;
        }
        true
    }
}

/// Properties of every component of `g`, recursing into collections.
pub fn create_property_set(g: &Geometry<f64>) -> Vec<ComponentProperties> {
    let mut result = Vec::new();
    for p in g.polygons() {
        if let Some(extents) = p.envelope() {
            let perimeter = p.rings().map(|r| r.length()).sum();
            result.push(ComponentProperties {
                dimension: Dimension::Area,
                hole_count: p.interiors.len(),
                area: p.area(),
                length: perimeter,
                extents,
            });
        }
    }
    for l in g.line_strings() {
        if let Some(extents) = l.envelope() {
            result.push(ComponentProperties {
                dimension: Dimension::Line,
                hole_count: 0,
                area: 0.0,
                length: l.length(),
                extents,
            });
        }
    }
    for c in g.points() {
        result.push(ComponentProperties::point(c.x, c.y));
    }
    result
}

pub fn property_sets_match(
    result_set: &[ComponentProperties],
    expected_set: &[ComponentProperties],
) -> bool {
    let mut sets_match = true;
    if result_set.len() != expected_set.len() {
        sets_match = false;
    } else {
        // using simple N^2 comparisons to compare property sets (sets are always relatively small,
        // e.g. N < 10)
        for properties_expected in expected_set {
            let match_count = result_set
                .iter()
                .filter(|properties_result| {
                    properties_expected
                        .fuzzy_eq_eps(properties_result, ComponentProperties::PROP_CMP_EPS)
                })
                .count();

            if match_count != 1 {
                sets_match = false;
                break;
            }
        }
    }

    if !sets_match {
        eprintln!("result:\n{:?}", result_set);
        eprintln!("expected:\n{:?}", expected_set);
    }

    sets_match
}

/// Asserts the components of `g` match the expected properties (in any order).
pub fn assert_properties(g: &Geometry<f64>, expected: &[ComponentProperties]) {
    assert!(
        property_sets_match(&create_property_set(g), expected),
        "result: {}",
        super::to_debug_wkt_str(g)
    );
}
