//! Output model for the deep-zoom viewer document.
//!
//! This module defines the geometry primitives (points, polygons, scale
//! factors) and the issue/page/annotation records that are serialized into
//! one `<issue-id>_osd.json` file per newspaper issue.
//!
//! # Example
//!
//! ```
//! use page2osd::osd::{Issue, Page, Point, TextRegion};
//!
//! let issue = Issue::from_pages(
//!     "Foo_13-04-1944",
//!     vec![Page {
//!         page: 1,
//!         width: 1601,
//!         height: 2477,
//!         image: "Foo/images/Foo_13-04-1944_page-1.jpg".into(),
//!         text_regions: vec![TextRegion::new("r1", vec![Point::new(0, 0)], "")],
//!     }],
//! );
//! assert_eq!(issue.tile_sources.len(), 1);
//! ```

pub mod io_json;
mod model;
mod point;
mod scale;

pub use model::{AnnotationKind, Issue, Page, TextLine, TextRegion, TileSource};
pub use point::{parse_points, Point, Polygon};
pub use scale::{PageImageMeta, ScaleFactor};
