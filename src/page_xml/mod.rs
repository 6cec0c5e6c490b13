//! PAGE XML page assembly.
//!
//! A PAGE document describes one scanned page: a `<Page>` element carrying
//! the declared `imageWidth`/`imageHeight`, and nested `<TextRegion>` and
//! `<TextLine>` elements with `<Coords points="x,y x,y ...">` polygons.
//!
//! Assembly either fails for the whole page (missing or invalid `<Page>`) or
//! returns a [`Page`] holding every region that could be extracted. A region
//! whose polygon does not parse is dropped with a warning.

pub mod annotation;
pub mod encoding;

use std::fs;
use std::path::Path;

use roxmltree::{Document, Node};

use crate::error::Page2OsdError;
use crate::osd::{Page, PageImageMeta};

const PAGE_TAG: &str = "Page";
const TEXT_REGION_TAG: &str = "TextRegion";

/// Annotations dropped while assembling a page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DroppedCounts {
    pub regions: usize,
    pub lines: usize,
}

/// A successfully assembled page plus what had to be left out.
#[derive(Clone, Debug)]
pub struct AssembledPage {
    pub page: Page,
    pub meta: PageImageMeta,
    pub dropped: DroppedCounts,
}

/// Read and assemble one PAGE XML file.
///
/// `image` is the viewer-relative URL recorded on the page, and `actual` the
/// real pixel dimensions of that image when they could be read.
pub fn assemble_page(
    xml_path: &Path,
    image: &str,
    page_number: u32,
    actual: Option<(u32, u32)>,
) -> Result<AssembledPage, Page2OsdError> {
    let bytes = fs::read(xml_path).map_err(Page2OsdError::Io)?;
    let xml = encoding::decode_xml(&bytes, xml_path)?;
    assemble_page_str(&xml, xml_path, image, page_number, actual)
}

/// Assemble one page from an in-memory PAGE XML string.
///
/// `path` is only used in error messages.
pub fn assemble_page_str(
    xml: &str,
    path: &Path,
    image: &str,
    page_number: u32,
    actual: Option<(u32, u32)>,
) -> Result<AssembledPage, Page2OsdError> {
    let xml = xml.trim_start_matches('\u{feff}');
    let document = Document::parse(xml).map_err(|source| Page2OsdError::XmlParse {
        path: path.to_path_buf(),
        message: source.to_string(),
    })?;

    let page_node = document
        .descendants()
        .find(|node| is_named(*node, PAGE_TAG))
        .ok_or_else(|| Page2OsdError::Structure {
            path: path.to_path_buf(),
            message: format!("missing <{PAGE_TAG}> element"),
        })?;

    let declared_width = parse_dimension(page_node, "imageWidth", path)?;
    let declared_height = parse_dimension(page_node, "imageHeight", path)?;
    let meta = PageImageMeta::new(declared_width, declared_height, actual);
    let scale = meta.scale();

    log::debug!(
        "{}: declared {}x{}, actual {:?}, scale ({:.4}, {:.4})",
        path.display(),
        declared_width,
        declared_height,
        actual,
        scale.sx,
        scale.sy
    );

    let mut dropped = DroppedCounts::default();
    let mut text_regions = Vec::new();

    for region_node in top_level_regions(page_node) {
        match annotation::extract_region(region_node, scale, &mut dropped) {
            Ok(Some(region)) => text_regions.push(region),
            Ok(None) => {}
            Err(err) => {
                log::warn!(
                    "{}: dropping TextRegion '{}': {}",
                    path.display(),
                    region_node.attribute("id").unwrap_or_default(),
                    err
                );
                dropped.regions += 1;
            }
        }
    }

    let (width, height) = meta.output_dimensions();

    Ok(AssembledPage {
        page: Page {
            page: page_number,
            width,
            height,
            image: image.to_string(),
            text_regions,
        },
        meta,
        dropped,
    })
}

/// Parse PAGE XML from a UTF-8 string, as page 1 with no image.
///
/// This helper is primarily useful for testing/fuzzing parse behavior in-memory.
pub fn from_page_xml_str(xml: &str) -> Result<Page, Page2OsdError> {
    assemble_page_str(xml, Path::new("<memory>"), "", 1, None).map(|assembled| assembled.page)
}

/// Parse PAGE XML from bytes, honouring a BOM or declared encoding.
pub fn from_page_xml_slice(bytes: &[u8]) -> Result<Page, Page2OsdError> {
    let xml = encoding::decode_xml(bytes, Path::new("<memory>"))?;
    from_page_xml_str(&xml)
}

/// Every `<TextRegion>` under `page` that is not nested in another region.
fn top_level_regions<'a, 'input>(
    page: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    page.descendants().filter(|node| {
        is_named(*node, TEXT_REGION_TAG)
            && !node
                .ancestors()
                .skip(1)
                .any(|ancestor| is_named(ancestor, TEXT_REGION_TAG))
    })
}

fn parse_dimension(page: Node<'_, '_>, attr: &str, path: &Path) -> Result<u32, Page2OsdError> {
    let raw = page
        .attribute(attr)
        .ok_or_else(|| Page2OsdError::Structure {
            path: path.to_path_buf(),
            message: format!("missing {attr} attribute on <{PAGE_TAG}>"),
        })?;

    match raw.trim().parse::<u32>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(Page2OsdError::Structure {
            path: path.to_path_buf(),
            message: format!(
                "invalid {attr} value '{raw}' on <{PAGE_TAG}>; expected positive integer"
            ),
        }),
    }
}

pub(crate) fn is_named(node: Node<'_, '_>, tag: &str) -> bool {
    node.is_element() && node.tag_name().name() == tag
}

pub(crate) fn child_element<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &str,
) -> Option<Node<'a, 'input>> {
    node.children().find(|child| is_named(*child, tag))
}
