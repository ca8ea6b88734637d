use topo_overlay::{
    Coord, Geometry, LineString, OverlayNg, OverlayOp, NodingStrategy, PrecisionModel, overlay,
    polygon, union_self,
};

fn main() {
    env_logger::init();
    polygon_ops();
    line_and_point_ops();
    fixed_precision_ops();
    dissolve_collection();
}

fn describe(label: &str, g: &Geometry<f64>) {
    println!(
        "{label}: dimension {:?}, {} component(s), area {}, length {}",
        g.dimension(),
        g.num_components(),
        g.area(),
        g.length()
    );
}

fn polygon_ops() {
    let a = Geometry::Polygon(polygon![[
        (0.0, 0.0),
        (10.0, 0.0),
        (10.0, 10.0),
        (0.0, 10.0),
        (0.0, 0.0)
    ]]);
    let b = Geometry::Polygon(polygon![[
        (5.0, 5.0),
        (15.0, 5.0),
        (15.0, 15.0),
        (5.0, 15.0),
        (5.0, 5.0)
    ]]);

    for op in [
        OverlayOp::Intersection,
        OverlayOp::Union,
        OverlayOp::Difference,
        OverlayOp::SymDifference,
    ] {
        let result = overlay(&a, Some(&b), op, PrecisionModel::Floating).unwrap();
        describe(&op.to_string(), &result);
    }

    let intersection = overlay(&a, Some(&b), OverlayOp::Intersection, PrecisionModel::Floating)
        .unwrap();
    assert_eq!(intersection.area(), 25.0, "Overlapping quarter should remain");

    let union = overlay(&a, Some(&b), OverlayOp::Union, PrecisionModel::Floating).unwrap();
    assert_eq!(union.area(), 175.0, "Union should count the overlap once");

    // the symmetric difference is two L shapes touching at two corners
    let sym = overlay(&a, Some(&b), OverlayOp::SymDifference, PrecisionModel::Floating).unwrap();
    assert_eq!(sym.area(), 150.0);
    assert_eq!(sym.polygons().len(), 2);

    // a hole is filled by the union with a polygon covering it
    let framed = Geometry::Polygon(polygon![
        [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)],
        [(2.0, 2.0), (2.0, 8.0), (8.0, 8.0), (8.0, 2.0), (2.0, 2.0)],
    ]);
    let plug = Geometry::Polygon(polygon![[
        (1.0, 1.0),
        (9.0, 1.0),
        (9.0, 9.0),
        (1.0, 9.0),
        (1.0, 1.0)
    ]]);
    let filled = overlay(&framed, Some(&plug), OverlayOp::Union, PrecisionModel::Floating).unwrap();
    assert_eq!(filled.area(), 100.0);
    assert!(filled.polygons()[0].interiors.is_empty(), "Hole should be filled");
}

fn line_and_point_ops() {
    let square = Geometry::Polygon(polygon![[
        (0.0, 0.0),
        (4.0, 0.0),
        (4.0, 4.0),
        (0.0, 4.0),
        (0.0, 0.0)
    ]]);
    let line = Geometry::LineString(LineString::from_xy(&[(-2.0, 2.0), (6.0, 2.0)]));

    // only the part of the line inside the square remains
    let clipped = overlay(&line, Some(&square), OverlayOp::Intersection, PrecisionModel::Floating)
        .unwrap();
    describe("line intersection", &clipped);
    assert_eq!(clipped.length(), 4.0);

    // the parts outside remain as two lines
    let outside = overlay(&line, Some(&square), OverlayOp::Difference, PrecisionModel::Floating)
        .unwrap();
    describe("line difference", &outside);
    assert_eq!(outside.line_strings().len(), 2);

    let points = Geometry::MultiPoint(vec![
        Coord::new(1.0, 1.0),
        Coord::new(4.0, 2.0),
        Coord::new(8.0, 8.0),
    ]);
    let inside = overlay(&points, Some(&square), OverlayOp::Intersection, PrecisionModel::Floating)
        .unwrap();
    describe("points inside", &inside);
    assert_eq!(inside.points().len(), 2, "Boundary point counts as covered");
}

fn fixed_precision_ops() {
    let a = Geometry::Polygon(polygon![[
        (0.0, 0.0),
        (10.0, 0.0),
        (10.0, 10.0),
        (0.0, 10.0),
        (0.0, 0.0)
    ]]);
    // nearly touches a, the gap closes on a unit grid
    let b = Geometry::Polygon(polygon![[
        (10.2, 0.0),
        (20.0, 0.0),
        (20.0, 10.0),
        (10.2, 10.0),
        (10.2, 0.0)
    ]]);

    let floating = overlay(&a, Some(&b), OverlayOp::Union, PrecisionModel::Floating).unwrap();
    describe("floating union", &floating);
    assert_eq!(floating.polygons().len(), 2);

    let fixed = overlay(&a, Some(&b), OverlayOp::Union, PrecisionModel::fixed(1.0)).unwrap();
    describe("fixed union", &fixed);
    assert_eq!(fixed.polygons().len(), 1);
    assert_eq!(fixed.area(), 200.0);

    // a single attempt with an explicit noding strategy
    let half_grid = OverlayNg::new(&a, Some(&b), OverlayOp::Union)
        .with_strategy(NodingStrategy::SnapRounding(PrecisionModel::fixed_grid(0.5)))
        .result()
        .unwrap();
    describe("half grid union", &half_grid);
}

fn dissolve_collection() {
    let parts = Geometry::GeometryCollection(vec![
        Geometry::Polygon(polygon![[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0), (0.0, 0.0)]]),
        Geometry::Polygon(polygon![[(2.0, 0.0), (4.0, 0.0), (4.0, 2.0), (2.0, 2.0), (2.0, 0.0)]]),
        Geometry::Point(Coord::new(1.0, 1.0)),
        Geometry::Point(Coord::new(9.0, 9.0)),
    ]);
    let dissolved = union_self(&parts, PrecisionModel::Floating).unwrap();
    describe("dissolved collection", &dissolved);
    assert_eq!(dissolved.polygons().len(), 1, "Shared edge should be dissolved");
    assert_eq!(dissolved.points().len(), 1, "Covered point should be absorbed");
}
