//! Region and line extraction from PAGE XML elements.
//!
//! Elements are matched by local name, so any PAGE schema namespace works.

use roxmltree::Node;

use super::{child_element, is_named, DroppedCounts};
use crate::error::Page2OsdError;
use crate::osd::{parse_points, Point, Polygon, ScaleFactor, TextLine, TextRegion};

const COORDS_TAG: &str = "Coords";
const POINT_TAG: &str = "Point";
const TEXT_LINE_TAG: &str = "TextLine";
const TEXT_EQUIV_TAG: &str = "TextEquiv";
const UNICODE_TAG: &str = "Unicode";

/// Extract a `<TextRegion>` and its `<TextLine>` children.
///
/// Returns `Ok(None)` when the region has no `<Coords>`. A malformed region
/// polygon is an error; a malformed or geometry-less line is dropped (and
/// counted in `dropped`) without affecting its siblings or the region.
pub fn extract_region(
    node: Node<'_, '_>,
    scale: ScaleFactor,
    dropped: &mut DroppedCounts,
) -> Result<Option<TextRegion>, Page2OsdError> {
    let Some(points) = extract_polygon(node, scale)? else {
        return Ok(None);
    };

    let id = element_id(node);
    let text = first_text(node);

    let mut lines = Vec::new();
    for line_node in node
        .children()
        .filter(|child| is_named(*child, TEXT_LINE_TAG))
    {
        match extract_line(line_node, scale) {
            Ok(Some(line)) => lines.push(line),
            Ok(None) => {
                log::debug!(
                    "TextLine '{}' in region '{}' has no Coords; skipped",
                    element_id(line_node),
                    id
                );
            }
            Err(err) => {
                log::warn!(
                    "Dropping TextLine '{}' in region '{}': {}",
                    element_id(line_node),
                    id,
                    err
                );
                dropped.lines += 1;
            }
        }
    }

    Ok(Some(TextRegion::new(id, points, text).with_lines(lines)))
}

/// Extract a single `<TextLine>`.
///
/// Returns `Ok(None)` when the line has no `<Coords>`.
pub fn extract_line(
    node: Node<'_, '_>,
    scale: ScaleFactor,
) -> Result<Option<TextLine>, Page2OsdError> {
    let Some(points) = extract_polygon(node, scale)? else {
        return Ok(None);
    };

    Ok(Some(TextLine::new(element_id(node), points, first_text(node))))
}

fn extract_polygon(
    node: Node<'_, '_>,
    scale: ScaleFactor,
) -> Result<Option<Polygon>, Page2OsdError> {
    let Some(coords) = child_element(node, COORDS_TAG) else {
        return Ok(None);
    };

    let raw = match coords.attribute("points") {
        Some(points) => parse_points(points)?,
        // PAGE 2010 stores vertices as <Point x=".." y=".."/> children.
        None => legacy_points(coords)?,
    };

    if raw.is_empty() {
        return Err(Page2OsdError::PointsParse {
            token: String::new(),
            message: format!("<{COORDS_TAG}> of '{}' has no points", element_id(node)),
        });
    }

    Ok(Some(raw.into_iter().map(|point| scale.apply(point)).collect()))
}

fn legacy_points(coords: Node<'_, '_>) -> Result<Polygon, Page2OsdError> {
    coords
        .children()
        .filter(|child| is_named(*child, POINT_TAG))
        .map(|point| {
            let x = legacy_coordinate(point, "x")?;
            let y = legacy_coordinate(point, "y")?;
            Ok(Point::new(x, y))
        })
        .collect()
}

fn legacy_coordinate(point: Node<'_, '_>, attr: &str) -> Result<i64, Page2OsdError> {
    let raw = point.attribute(attr).unwrap_or_default();
    raw.trim()
        .parse::<i64>()
        .map_err(|_| Page2OsdError::PointsParse {
            token: format!("{attr}=\"{raw}\""),
            message: format!("invalid <{POINT_TAG}> {attr} attribute"),
        })
}

fn element_id(node: Node<'_, '_>) -> String {
    node.attribute("id").unwrap_or_default().to_string()
}

/// First `TextEquiv/Unicode` below `node` in document order, or `""`.
///
/// Word-level `TextEquiv`s precede a line's own in PAGE output, and a
/// region's lines precede its own, so those match first.
fn first_text(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|child| is_named(*child, TEXT_EQUIV_TAG))
        .find_map(unicode_text)
        .unwrap_or_default()
}

fn unicode_text(text_equiv: Node<'_, '_>) -> Option<String> {
    child_element(text_equiv, UNICODE_TAG)
        .map(|unicode| unicode.text().unwrap_or_default().to_string())
}
