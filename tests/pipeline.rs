//! End-to-end pipeline scenarios: anchor measurements in, routes out.

use aislenav::anchors::{AnchorMap, CoveragePolygon, PairDimension, ScaleTransform, TdoaPair};
use aislenav::core::Point;
use aislenav::pathfinding::RouteFailure;
use aislenav::zones::{Zone, ZoneSource, ZoneType};
use aislenav::{NavPipeline, ZoneGenerationOptions};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn pair(row: u32, source: &str, destination: &str, distance_mm: f32, margin_mm: f32) -> TdoaPair {
    TdoaPair {
        row_number: row,
        source: source.to_string(),
        destination: destination.to_string(),
        dimension: PairDimension::OneD,
        distance_mm,
        margin_mm,
        slot: 0,
    }
}

fn rect_mm(x0: f32, y0: f32, x1: f32, y1: f32) -> Vec<Point> {
    vec![
        Point::new(x0, y0),
        Point::new(x1, y0),
        Point::new(x1, y1),
        Point::new(x0, y1),
    ]
}

/// One aisle (A to B along y=0) ending 200px short of an open travel
/// lane to its east. 10mm per pixel.
struct Warehouse {
    anchors: AnchorMap,
    pairs: Vec<TdoaPair>,
    coverage: Vec<CoveragePolygon>,
    transform: ScaleTransform,
}

impl Warehouse {
    fn new() -> Self {
        let mut anchors = AnchorMap::new();
        anchors.insert("A".to_string(), Point::new(0.0, 0.0));
        anchors.insert("B".to_string(), Point::new(2000.0, 0.0));

        Self {
            anchors,
            pairs: vec![pair(1, "A", "B", 2000.0, 250.0)],
            coverage: vec![CoveragePolygon {
                uid: "lane1".to_string(),
                dimension: PairDimension::TwoD,
                exclusion: false,
                points_mm: rect_mm(2200.0, -500.0, 4000.0, 500.0),
                margin_mm: 0.0,
            }],
            transform: ScaleTransform::new(10.0, Point::ZERO),
        }
    }

    fn generate(&self, options: ZoneGenerationOptions) -> aislenav::ZoneGenerationResult {
        NavPipeline::default().generate_programmatic_zones(
            &self.anchors,
            &self.pairs,
            &self.coverage,
            &self.transform,
            options,
        )
    }
}

#[test]
fn generates_aisle_and_travel_lane() {
    init_logging();
    let warehouse = Warehouse::new();
    let result = warehouse.generate(ZoneGenerationOptions::default());

    assert!(result.errors.is_empty());
    assert_eq!(result.zones.len(), 2);

    let aisle = result
        .zones
        .iter()
        .find(|z| z.zone_type == ZoneType::AislePath)
        .expect("aisle zone");
    let lane = result
        .zones
        .iter()
        .find(|z| z.zone_type == ZoneType::TravelLane)
        .expect("travel lane zone");

    assert_eq!(aisle.source, ZoneSource::Tdoa);
    assert_eq!(lane.source, ZoneSource::Coverage);
    assert_eq!(lane.id, "travel_lane_lane1");

    // 2000mm at 10mm/px = 200px corridor, 25px half-width, extended on
    // the lane side to reach the boundary at x=220.
    assert_eq!(aisle.polygon.len(), 4);
    let max_x = aisle
        .polygon
        .iter()
        .map(|p| p.x)
        .fold(f32::NEG_INFINITY, f32::max);
    assert!(
        (max_x - 220.0).abs() < 1e-2,
        "aisle should be extended to the lane boundary, got {max_x}"
    );
    assert_eq!(
        aisle.metadata.custom.get("end_extension_target").unwrap(),
        "travel_lane_lane1"
    );
}

#[test]
fn aisles_only_generation_skips_lanes() {
    init_logging();
    let warehouse = Warehouse::new();
    let result = warehouse.generate(ZoneGenerationOptions {
        generate_aisles: true,
        generate_travel_lanes: false,
    });

    assert_eq!(result.zones.len(), 1);
    assert_eq!(result.zones[0].zone_type, ZoneType::AislePath);
}

#[test]
fn missing_anchor_reports_error_and_continues() {
    init_logging();
    let mut warehouse = Warehouse::new();
    warehouse.pairs.push(pair(2, "C", "D", 1000.0, 200.0)); // unknown anchors

    let result = warehouse.generate(ZoneGenerationOptions::default());
    assert_eq!(result.errors.len(), 1);
    // The good chain and the travel lane still come through
    assert_eq!(result.zones.len(), 2);
}

#[test]
fn route_through_aisle_into_lane() {
    init_logging();
    let warehouse = Warehouse::new();
    let result = warehouse.generate(ZoneGenerationOptions::default());
    let pipeline = NavPipeline::default();

    // From inside the aisle near its west end to deep inside the lane
    let start = Point::new(10.0, 0.0);
    let end = Point::new(390.0, 0.0);
    let route = pipeline.calculate_route(&result.zones, start, end);

    assert!(route.success, "route failed: {}", route.error_message());
    assert_eq!(route.points.len(), route.segments.len() + 1);
    assert_eq!(route.points[0], start);
    assert_eq!(*route.points.last().unwrap(), end);

    let sum: f32 = route.segments.iter().map(|s| s.distance).sum();
    assert!((route.total_distance - sum).abs() < 1e-3);
    // Straight-line lower bound, plus a sane upper bound
    assert!(route.total_distance >= 380.0);
    assert!(route.total_distance < 600.0);
}

#[test]
fn route_rejects_point_in_blocked_area() {
    init_logging();
    let warehouse = Warehouse::new();
    let mut zones = warehouse.generate(ZoneGenerationOptions::default()).zones;
    zones.push(Zone::new(
        "obstacle",
        ZoneType::BlockedArea,
        vec![
            Point::new(300.0, -20.0),
            Point::new(340.0, -20.0),
            Point::new(340.0, 20.0),
            Point::new(300.0, 20.0),
        ],
        ZoneSource::Ai,
    ));

    let pipeline = NavPipeline::default();
    let route = pipeline.calculate_route(&zones, Point::new(320.0, 0.0), Point::new(10.0, 0.0));
    assert!(!route.success);
    assert_eq!(route.failure, Some(RouteFailure::StartOutsideTravelable));
}

#[test]
fn route_on_empty_zone_set_names_the_reason() {
    init_logging();
    let pipeline = NavPipeline::default();
    let route = pipeline.calculate_route(&[], Point::ZERO, Point::new(100.0, 0.0));
    assert!(!route.success);
    assert!(route.error_message().contains("No travelable zones"));
}

#[test]
fn generation_is_deterministic() {
    init_logging();
    let warehouse = Warehouse::new();
    let first = warehouse.generate(ZoneGenerationOptions::default());
    let second = warehouse.generate(ZoneGenerationOptions::default());
    assert_eq!(first.zones, second.zones);

    let pipeline = NavPipeline::default();
    let a = pipeline.calculate_route(&first.zones, Point::new(10.0, 0.0), Point::new(390.0, 0.0));
    let b = pipeline.calculate_route(&second.zones, Point::new(10.0, 0.0), Point::new(390.0, 0.0));
    assert_eq!(a, b);
}
