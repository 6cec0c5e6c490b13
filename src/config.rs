//! Run configuration.
//!
//! Settings come from an optional YAML file; every field has a default so an
//! empty file (or no file) is valid. CLI flags are applied on top by the
//! caller.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Page2OsdError;

/// How to resolve two page files claiming the same page number in one issue.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Keep the first file in file-name order.
    #[default]
    KeepFirst,
    /// Keep the last file in file-name order.
    KeepLast,
    /// Skip the whole issue.
    Reject,
}

/// Settings for one conversion run.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Root of the directory tree to walk.
    pub root: Option<PathBuf>,

    /// Extensions (without dot) that mark a file as an issue manifest.
    pub manifest_extensions: Vec<String>,

    /// Name of the images directory, a sibling of each source folder.
    pub images_dir: String,

    /// Image extensions to try, in order.
    pub image_extensions: Vec<String>,

    /// Appended to the issue id to name the output file.
    pub output_suffix: String,

    /// Which file wins when two page files share a page number.
    pub duplicate_pages: DuplicatePolicy,

    /// Stop starting new issues after this many seconds.
    pub deadline_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root: None,
            manifest_extensions: vec!["pdf".to_string()],
            images_dir: "images".to_string(),
            image_extensions: vec!["jpg".to_string(), "jpeg".to_string(), "png".to_string()],
            output_suffix: "_osd.json".to_string(),
            duplicate_pages: DuplicatePolicy::default(),
            deadline_secs: None,
        }
    }
}

impl Settings {
    /// Output file name for an issue.
    pub fn output_file_name(&self, issue_id: &str) -> String {
        format!("{issue_id}{}", self.output_suffix)
    }

    /// Extension used in image URLs when no image file is found.
    pub fn default_image_extension(&self) -> &str {
        self.image_extensions
            .first()
            .map(String::as_str)
            .unwrap_or("jpg")
    }
}

/// Load settings from a YAML file.
pub fn load_settings(path: &Path) -> Result<Settings, Page2OsdError> {
    let raw = fs::read_to_string(path).map_err(|source| Page2OsdError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    from_yaml_str(&raw).map_err(|source| Page2OsdError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse settings from a YAML string. Blank input yields the defaults.
pub fn from_yaml_str(raw: &str) -> Result<Settings, serde_yaml::Error> {
    if raw.trim().is_empty() {
        return Ok(Settings::default());
    }
    serde_yaml::from_str(raw)
}
