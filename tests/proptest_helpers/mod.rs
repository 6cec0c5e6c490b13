#![allow(dead_code)]

use page2osd::osd::Point;
use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

pub fn arb_point() -> impl Strategy<Value = Point> {
    (-10_000i64..100_000, -10_000i64..100_000).prop_map(|(x, y)| Point::new(x, y))
}

pub fn arb_polygon(max_points: usize) -> impl Strategy<Value = Vec<Point>> {
    prop::collection::vec(arb_point(), 1..=max_points)
}

/// Separator runs that PAGE exporters are known to emit between tokens.
pub fn arb_separator() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(" ".to_string()),
        Just("  ".to_string()),
        Just("\t".to_string()),
        Just("\n".to_string()),
        Just(" \n ".to_string()),
    ]
}

/// Render a polygon as a `points` attribute value with the given separators.
pub fn render_points(points: &[Point], separators: &[String]) -> String {
    let mut out = String::new();
    for (idx, point) in points.iter().enumerate() {
        if idx > 0 {
            out.push_str(separators.get(idx % separators.len().max(1)).map_or(" ", String::as_str));
        }
        out.push_str(&format!("{},{}", point.x, point.y));
    }
    out
}

/// A PAGE document with one region per polygon.
pub fn page_with_regions(width: u32, height: u32, polygons: &[Vec<Point>]) -> String {
    let mut regions = String::new();
    for (idx, polygon) in polygons.iter().enumerate() {
        regions.push_str(&format!(
            "<TextRegion id=\"r{idx}\"><Coords points=\"{}\"/></TextRegion>",
            render_points(polygon, &[" ".to_string()])
        ));
    }
    format!(
        "<PcGts><Page imageWidth=\"{width}\" imageHeight=\"{height}\">{regions}</Page></PcGts>"
    )
}
