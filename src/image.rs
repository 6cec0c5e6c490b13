//! Page image lookup and dimension reads.
//!
//! Images live in an `images/` directory next to the folder holding the PAGE
//! files, named `<issue-id>_page-<N>.<ext>`. Only the header is read.

use std::path::{Path, PathBuf};

use crate::error::Page2OsdError;

/// The image found (or expected) for one page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedImage {
    /// File name used in the viewer URL.
    pub file_name: String,
    /// On-disk location, when a file was found.
    pub path: Option<PathBuf>,
    /// Actual pixel dimensions, when readable.
    pub dimensions: Option<(u32, u32)>,
}

/// Stem of the image file for a page.
pub fn image_stem(issue_id: &str, page_number: u32) -> String {
    format!("{issue_id}_page-{page_number}")
}

/// The images directory for a source folder: `<parent>/<images_dir_name>`.
pub fn images_dir_for(source_dir: &Path, images_dir_name: &str) -> PathBuf {
    source_dir
        .parent()
        .unwrap_or(source_dir)
        .join(images_dir_name)
}

/// Locate the page image and read its dimensions.
///
/// Never fails: a missing or unreadable image is logged and reported with
/// `dimensions: None`, so the page falls back to its declared dimensions.
pub fn resolve_image(images_dir: &Path, stem: &str, extensions: &[String]) -> ResolvedImage {
    let default_ext = extensions.first().map(String::as_str).unwrap_or("jpg");

    let Some(path) = find_image(images_dir, stem, extensions) else {
        let err = Page2OsdError::ImageNotFound {
            dir: images_dir.to_path_buf(),
            stem: stem.to_string(),
        };
        log::warn!("{err}; using declared dimensions");
        return ResolvedImage {
            file_name: format!("{stem}.{default_ext}"),
            path: None,
            dimensions: None,
        };
    };

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| format!("{stem}.{default_ext}"));

    let dimensions = match read_image_dimensions(&path) {
        Ok(dimensions) => Some(dimensions),
        Err(err) => {
            log::warn!("{err}; using declared dimensions");
            None
        }
    };

    ResolvedImage {
        file_name,
        path: Some(path),
        dimensions,
    }
}

/// Read pixel dimensions from an image header.
pub fn read_image_dimensions(path: &Path) -> Result<(u32, u32), Page2OsdError> {
    let size = imagesize::size(path).map_err(|source| Page2OsdError::ImageDimensionRead {
        path: path.to_path_buf(),
        source,
    })?;

    let (Ok(width), Ok(height)) = (u32::try_from(size.width), u32::try_from(size.height)) else {
        return Err(Page2OsdError::ImageDimensionInvalid {
            path: path.to_path_buf(),
            message: format!("{}x{} does not fit in u32", size.width, size.height),
        });
    };

    if width == 0 || height == 0 {
        return Err(Page2OsdError::ImageDimensionInvalid {
            path: path.to_path_buf(),
            message: format!("zero-sized image {width}x{height}"),
        });
    }

    Ok((width, height))
}

fn find_image(images_dir: &Path, stem: &str, extensions: &[String]) -> Option<PathBuf> {
    extensions
        .iter()
        .flat_map(|ext| [ext.to_ascii_lowercase(), ext.to_ascii_uppercase()])
        .map(|ext| images_dir.join(format!("{stem}.{ext}")))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_bmp(path: &Path, width: u32, height: u32) {
        let row_stride = (width * 3).div_ceil(4) * 4;
        let file_size = 54 + row_stride * height;

        let mut bytes = Vec::with_capacity(file_size as usize);
        bytes.extend_from_slice(b"BM");
        bytes.extend_from_slice(&file_size.to_le_bytes());
        bytes.extend_from_slice(&[0, 0, 0, 0]);
        bytes.extend_from_slice(&54u32.to_le_bytes());
        bytes.extend_from_slice(&40u32.to_le_bytes());
        bytes.extend_from_slice(&(width as i32).to_le_bytes());
        bytes.extend_from_slice(&(height as i32).to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes());
        bytes.extend_from_slice(&24u16.to_le_bytes());
        bytes.resize(file_size as usize, 0);
        fs::write(path, bytes).expect("write bmp");
    }

    fn exts() -> Vec<String> {
        vec!["jpg".to_string(), "png".to_string(), "bmp".to_string()]
    }

    #[test]
    fn images_dir_is_sibling_of_source_folder() {
        assert_eq!(
            images_dir_for(Path::new("/objects/La_Vanguardia/xml"), "images"),
            Path::new("/objects/La_Vanguardia/images")
        );
    }

    #[test]
    fn resolves_existing_image_in_extension_order() {
        let temp = tempfile::tempdir().expect("create temp dir");
        write_bmp(&temp.path().join("Foo_1_page-2.bmp"), 12, 7);

        let resolved = resolve_image(temp.path(), &image_stem("Foo_1", 2), &exts());
        assert_eq!(resolved.file_name, "Foo_1_page-2.bmp");
        assert_eq!(resolved.dimensions, Some((12, 7)));
        assert!(resolved.path.is_some());
    }

    #[test]
    fn missing_image_degrades_to_none() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let resolved = resolve_image(temp.path(), "Foo_1_page-1", &exts());

        assert_eq!(resolved.file_name, "Foo_1_page-1.jpg");
        assert_eq!(resolved.path, None);
        assert_eq!(resolved.dimensions, None);
    }

    #[test]
    fn unreadable_image_degrades_to_none() {
        let temp = tempfile::tempdir().expect("create temp dir");
        fs::write(temp.path().join("Foo_1_page-1.jpg"), b"not an image").expect("write file");

        let resolved = resolve_image(temp.path(), "Foo_1_page-1", &exts());
        assert_eq!(resolved.file_name, "Foo_1_page-1.jpg");
        assert!(resolved.path.is_some());
        assert_eq!(resolved.dimensions, None);
    }
}
