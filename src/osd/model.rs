//! Output document model for one newspaper issue.
//!
//! These types serialize directly into the `<issue-id>_osd.json` layout
//! consumed by the deep-zoom viewer: an issue holds its pages in page order
//! and a parallel list of tile sources, one per page.

use serde::{Deserialize, Serialize};

use super::point::Polygon;

/// The two annotation levels carried by a PAGE document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnnotationKind {
    TextRegion,
    TextLine,
}

/// A text line nested inside a region.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AnnotationKind,
    pub points: Polygon,
    pub text: String,
}

impl TextLine {
    pub fn new(id: impl Into<String>, points: Polygon, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: AnnotationKind::TextLine,
            points,
            text: text.into(),
        }
    }
}

/// A text region and the lines it owns, in document order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRegion {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AnnotationKind,
    pub points: Polygon,
    pub text: String,
    /// Always serialized, even when empty.
    pub text_lines: Vec<TextLine>,
}

impl TextRegion {
    pub fn new(id: impl Into<String>, points: Polygon, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: AnnotationKind::TextRegion,
            points,
            text: text.into(),
            text_lines: Vec::new(),
        }
    }

    /// Attach lines to this region.
    pub fn with_lines(mut self, lines: Vec<TextLine>) -> Self {
        self.text_lines = lines;
        self
    }
}

/// One scanned page with its rescaled regions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// 1-based page number; the ordering key within an issue.
    pub page: u32,

    /// Actual image width when known, declared width otherwise.
    pub width: u32,

    /// Actual image height when known, declared height otherwise.
    pub height: u32,

    /// Viewer-relative image URL.
    pub image: String,

    pub text_regions: Vec<TextRegion>,
}

/// A tile source entry for the viewer, parallel to [`Page`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileSource {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    pub build_pyramid: bool,
}

impl TileSource {
    /// A plain-image tile source that asks the viewer to build its pyramid.
    pub fn image(url: impl Into<String>) -> Self {
        Self {
            kind: "image".to_string(),
            url: url.into(),
            build_pyramid: true,
        }
    }
}

/// One newspaper issue: the unit written to a single JSON file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: String,
    pub pages: Vec<Page>,
    pub tile_sources: Vec<TileSource>,
}

impl Issue {
    /// Build an issue from pages, sorting them and deriving tile sources 1:1.
    pub fn from_pages(id: impl Into<String>, mut pages: Vec<Page>) -> Self {
        pages.sort_by_key(|page| page.page);
        let tile_sources = pages
            .iter()
            .map(|page| TileSource::image(page.image.clone()))
            .collect();

        Self {
            id: id.into(),
            pages,
            tile_sources,
        }
    }
}
