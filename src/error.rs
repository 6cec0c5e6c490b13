use std::path::PathBuf;
use thiserror::Error;

/// The main error type for page2osd operations.
///
/// Variants are grouped by the scope they abort: `Structure` aborts one page,
/// `PointsParse` one annotation, `Naming` one issue, and `ImageDimensionRead`
/// never aborts anything (callers degrade to declared dimensions).
#[derive(Debug, Error)]
pub enum Page2OsdError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse PAGE XML {path}: {message}")]
    XmlParse { path: PathBuf, message: String },

    #[error("Invalid PAGE structure in {path}: {message}")]
    Structure { path: PathBuf, message: String },

    #[error("Invalid coordinate token '{token}': {message}")]
    PointsParse { token: String, message: String },

    #[error("Cannot derive folder name from issue id '{issue_id}': no segment starts with a digit")]
    Naming { issue_id: String },

    #[error("Failed to read image dimensions from {path}: {source}")]
    ImageDimensionRead {
        path: PathBuf,
        #[source]
        source: imagesize::ImageError,
    },

    #[error("Unusable image dimensions in {path}: {message}")]
    ImageDimensionInvalid { path: PathBuf, message: String },

    #[error("No image found for '{stem}' in {dir}")]
    ImageNotFound { dir: PathBuf, stem: String },

    #[error("Failed to parse OSD JSON from {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write OSD JSON to {path}: {source}")]
    JsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Root directory not found: {0}")]
    RootNotFound(PathBuf),

    #[error("No root directory given (pass ROOT, set PAGE2OSD_ROOT, or set `root` in the config)")]
    MissingRoot,

    #[error("Failed while walking {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Duplicate page {page} in issue '{issue_id}'")]
    DuplicatePage { issue_id: String, page: u32 },

    #[error("Deadline exceeded before issue '{issue_id}' could start")]
    DeadlineExceeded { issue_id: String },
}
