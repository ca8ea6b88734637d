use topo_overlay::{Coord, Geometry, LineString, Polygon};

fn coord_str(c: &Coord<f64>) -> String {
    format!("{} {}", c.x, c.y)
}

fn seq_str(ls: &LineString<f64>) -> String {
    format!(
        "({})",
        ls.coords.iter().map(coord_str).collect::<Vec<_>>().join(", ")
    )
}

fn polygon_str(p: &Polygon<f64>) -> String {
    format!(
        "({})",
        p.rings().map(seq_str).collect::<Vec<_>>().join(", ")
    )
}

/// Helper function to create a well known text string from a geometry to be used for debugging.
pub fn to_debug_wkt_str(g: &Geometry<f64>) -> String {
    let join = |parts: Vec<String>| {
        if parts.is_empty() {
            " EMPTY".to_string()
        } else {
            format!(" ({})", parts.join(", "))
        }
    };
    match g {
        Geometry::Point(c) => format!("POINT ({})", coord_str(c)),
        Geometry::MultiPoint(pts) => format!(
            "MULTIPOINT{}",
            join(pts.iter().map(|c| format!("({})", coord_str(c))).collect())
        ),
        Geometry::LineString(ls) if ls.is_empty() => "LINESTRING EMPTY".to_string(),
        Geometry::LineString(ls) => format!("LINESTRING {}", seq_str(ls)),
        Geometry::MultiLineString(lines) => {
            format!("MULTILINESTRING{}", join(lines.iter().map(seq_str).collect()))
        }
        Geometry::Polygon(p) if p.is_empty() => "POLYGON EMPTY".to_string(),
        Geometry::Polygon(p) => format!("POLYGON {}", polygon_str(p)),
        Geometry::MultiPolygon(polys) => {
            format!("MULTIPOLYGON{}", join(polys.iter().map(polygon_str).collect()))
        }
        Geometry::GeometryCollection(parts) => format!(
            "GEOMETRYCOLLECTION{}",
            join(parts.iter().map(to_debug_wkt_str).collect())
        ),
    }
}
