//! Issue discovery from file-name conventions.
//!
//! A folder holds, per issue, one manifest `<base>.<ext>` (typically the PDF)
//! and page files `<base>_P<N>.xml`. Only issues with both are eligible.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::config::DuplicatePolicy;
use crate::error::Page2OsdError;

static PAGE_FILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(.+)_P(\d+)\.xml$").expect("valid page file regex"));

static FOLDER_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)_\d").expect("valid folder name regex"));

/// What a file name says about its role.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FileKind {
    Manifest { base: String },
    PageFile { base: String, page: u32 },
    Unrecognized,
}

/// One page file of an issue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageFile {
    pub number: u32,
    pub path: PathBuf,
}

/// An issue eligible for conversion: a manifest plus at least one page file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IssueFiles {
    pub id: String,
    pub dir: PathBuf,
    /// Page files in file-name order, duplicates included.
    pub page_files: Vec<PageFile>,
}

impl IssueFiles {
    /// Pages sorted by number with duplicates resolved per `policy`.
    pub fn ordered_pages(&self, policy: DuplicatePolicy) -> Result<Vec<PageFile>, Page2OsdError> {
        let mut by_number: BTreeMap<u32, PageFile> = BTreeMap::new();

        for page_file in &self.page_files {
            if let Some(existing) = by_number.get(&page_file.number) {
                match policy {
                    DuplicatePolicy::KeepFirst => {
                        log::warn!(
                            "Issue '{}': page {} appears twice; keeping {} over {}",
                            self.id,
                            page_file.number,
                            existing.path.display(),
                            page_file.path.display()
                        );
                        continue;
                    }
                    DuplicatePolicy::KeepLast => {
                        log::warn!(
                            "Issue '{}': page {} appears twice; keeping {} over {}",
                            self.id,
                            page_file.number,
                            page_file.path.display(),
                            existing.path.display()
                        );
                    }
                    DuplicatePolicy::Reject => {
                        return Err(Page2OsdError::DuplicatePage {
                            issue_id: self.id.clone(),
                            page: page_file.number,
                        });
                    }
                }
            }
            by_number.insert(page_file.number, page_file.clone());
        }

        Ok(by_number.into_values().collect())
    }
}

/// Classify a file name. Page files are checked before manifests.
pub fn classify(file_name: &str, manifest_extensions: &[String]) -> FileKind {
    if let Some(captures) = PAGE_FILE_RE.captures(file_name) {
        let base = captures[1].to_string();
        return match captures[2].parse::<u32>() {
            Ok(page) => FileKind::PageFile { base, page },
            Err(_) => {
                log::debug!("{file_name}: page number out of range");
                FileKind::Unrecognized
            }
        };
    }

    if let Some((base, ext)) = file_name.rsplit_once('.') {
        let is_manifest = !base.is_empty()
            && manifest_extensions
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed));
        if is_manifest {
            return FileKind::Manifest {
                base: base.to_string(),
            };
        }
    }

    FileKind::Unrecognized
}

/// Derive the folder grouping name: the part of the id before its first
/// `_<digit>` segment, e.g. `La_Vanguardia` from `La_Vanguardia_13-04-1944`.
pub fn folder_name(issue_id: &str) -> Result<String, Page2OsdError> {
    FOLDER_NAME_RE
        .captures(issue_id)
        .map(|captures| captures[1].to_string())
        .ok_or_else(|| Page2OsdError::Naming {
            issue_id: issue_id.to_string(),
        })
}

/// Names of the regular files directly inside `dir`, sorted.
pub fn list_file_names(dir: &Path) -> Result<Vec<String>, Page2OsdError> {
    let mut names = Vec::new();

    for entry in fs::read_dir(dir).map_err(Page2OsdError::Io)? {
        let entry = entry.map_err(Page2OsdError::Io)?;
        if !entry.path().is_file() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => log::debug!("Skipping non-UTF-8 file name {raw:?}"),
        }
    }

    names.sort();
    Ok(names)
}

/// Group classified file names into eligible issues, ordered by id.
pub fn group_issues(
    dir: &Path,
    file_names: &[String],
    manifest_extensions: &[String],
) -> Vec<IssueFiles> {
    let mut manifests: BTreeSet<String> = BTreeSet::new();
    let mut pages: BTreeMap<String, Vec<PageFile>> = BTreeMap::new();

    for name in file_names {
        match classify(name, manifest_extensions) {
            FileKind::Manifest { base } => {
                manifests.insert(base);
            }
            FileKind::PageFile { base, page } => {
                pages.entry(base).or_default().push(PageFile {
                    number: page,
                    path: dir.join(name),
                });
            }
            FileKind::Unrecognized => {}
        }
    }

    for base in pages.keys().filter(|base| !manifests.contains(*base)) {
        log::debug!("{}: page files for '{}' have no manifest", dir.display(), base);
    }

    manifests
        .into_iter()
        .filter_map(|id| {
            let Some(page_files) = pages.remove(&id) else {
                log::debug!("{}: manifest for '{}' has no page files", dir.display(), id);
                return None;
            };
            Some(IssueFiles {
                id,
                dir: dir.to_path_buf(),
                page_files,
            })
        })
        .collect()
}

/// List `dir` and group its files into eligible issues.
pub fn discover_issues(
    dir: &Path,
    manifest_extensions: &[String],
) -> Result<Vec<IssueFiles>, Page2OsdError> {
    let names = list_file_names(dir)?;
    Ok(group_issues(dir, &names, manifest_extensions))
}
