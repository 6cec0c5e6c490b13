use std::path::Path;

use page2osd::osd::{parse_points, PageImageMeta, Point};
use page2osd::page_xml::{assemble_page_str, from_page_xml_str};
use proptest::prelude::*;

mod proptest_helpers;

proptest! {
    #![proptest_config(proptest_helpers::proptest_config())]

    #[test]
    fn parse_preserves_count_and_order(
        polygon in proptest_helpers::arb_polygon(40),
        separators in prop::collection::vec(proptest_helpers::arb_separator(), 1..5),
    ) {
        let raw = proptest_helpers::render_points(&polygon, &separators);
        let parsed = parse_points(&raw).expect("parse rendered points");

        prop_assert_eq!(parsed.len(), raw.split_whitespace().count());
        prop_assert_eq!(parsed, polygon);
    }

    #[test]
    fn page_without_image_keeps_declared_geometry(
        polygons in prop::collection::vec(proptest_helpers::arb_polygon(8), 0..6),
        width in 1u32..10_000,
        height in 1u32..10_000,
    ) {
        let xml = proptest_helpers::page_with_regions(width, height, &polygons);
        let page = from_page_xml_str(&xml).expect("assemble page");

        prop_assert_eq!((page.width, page.height), (width, height));
        prop_assert_eq!(page.text_regions.len(), polygons.len());
        for (region, polygon) in page.text_regions.iter().zip(&polygons) {
            prop_assert_eq!(&region.points, polygon);
        }
    }

    #[test]
    fn integer_upscale_multiplies_every_point(
        polygon in proptest_helpers::arb_polygon(8),
        factor in 1u32..5,
    ) {
        let (width, height) = (1000u32, 1500u32);
        let xml = proptest_helpers::page_with_regions(width, height, &[polygon.clone()]);
        let assembled = assemble_page_str(
            &xml,
            Path::new("prop.xml"),
            "img.jpg",
            1,
            Some((width * factor, height * factor)),
        )
        .expect("assemble page");

        let expected: Vec<Point> = polygon
            .iter()
            .map(|p| Point::new(p.x * i64::from(factor), p.y * i64::from(factor)))
            .collect();
        prop_assert_eq!(&assembled.page.text_regions[0].points, &expected);
        prop_assert_eq!(
            assembled.meta,
            PageImageMeta::new(width, height, Some((width * factor, height * factor)))
        );
    }
}
