//! Issue building and emission.
//!
//! Walks a directory tree, discovers issues in every folder, assembles their
//! pages and writes one `<issue-id>_osd.json` per issue. Failures are contained
//! at the narrowest scope: a bad page is left out of its issue, a bad issue is
//! skipped, and the run always continues.

pub mod report;

pub use report::{RunCounts, RunEntry, RunEntryCode, RunReport, RunSeverity};

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use walkdir::WalkDir;

use crate::config::Settings;
use crate::discovery::{self, IssueFiles};
use crate::error::Page2OsdError;
use crate::image::{image_stem, images_dir_for, resolve_image};
use crate::osd::io_json::write_issue_json;
use crate::osd::Issue;
use crate::page_xml::assemble_page;

/// Convert every folder under `root`.
///
/// Only a missing root is an error; everything else is logged and recorded
/// in the returned report.
pub fn convert_tree(root: &Path, settings: &Settings) -> Result<RunReport, Page2OsdError> {
    if !root.is_dir() {
        return Err(Page2OsdError::RootNotFound(root.to_path_buf()));
    }

    let deadline = settings
        .deadline_secs
        .map(|secs| Instant::now() + Duration::from_secs(secs));
    let mut report = RunReport::new();

    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(source) => {
                let path = source.path().unwrap_or(root).to_path_buf();
                let err = Page2OsdError::Walk { path, source };
                log::warn!("{err}");
                report.add(RunEntry::warning(RunEntryCode::FolderUnreadable, err.to_string()));
                continue;
            }
        };

        if entry.file_type().is_dir() {
            convert_folder(entry.path(), settings, deadline, &mut report);
        }
    }

    log::info!(
        "Done: {} issue(s) written, {} skipped",
        report.counts.issues_written,
        report.counts.issues_skipped
    );
    Ok(report)
}

/// Convert every eligible issue directly inside `dir`.
pub fn convert_folder(
    dir: &Path,
    settings: &Settings,
    deadline: Option<Instant>,
    report: &mut RunReport,
) {
    report.counts.folders += 1;

    let issues = match discovery::discover_issues(dir, &settings.manifest_extensions) {
        Ok(issues) => issues,
        Err(err) => {
            log::warn!("Cannot list {}: {}", dir.display(), err);
            report.add(RunEntry::warning(
                RunEntryCode::FolderUnreadable,
                format!("{}: {}", dir.display(), err),
            ));
            return;
        }
    };

    for issue in issues {
        if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            let err = Page2OsdError::DeadlineExceeded {
                issue_id: issue.id.clone(),
            };
            log::warn!("{err}");
            report.counts.issues_skipped += 1;
            report.add(RunEntry::warning(RunEntryCode::IssueDeadline, err.to_string()));
            continue;
        }

        match convert_issue(&issue, settings, report) {
            Ok(Some(path)) => {
                log::info!("Generated: {}", path.display());
                report.counts.issues_written += 1;
                report.outputs.push(path);
            }
            Ok(None) => {
                report.counts.issues_skipped += 1;
            }
            Err(err) => {
                log::warn!("Skipping issue '{}': {}", issue.id, err);
                report.counts.issues_skipped += 1;
                report.add(RunEntry::warning(
                    issue_error_code(&err),
                    format!("issue '{}' skipped: {}", issue.id, err),
                ));
            }
        }
    }
}

/// Assemble and write one issue.
///
/// Returns `Ok(None)` when no page could be assembled; nothing is written in
/// that case. Page failures are recorded in `report` and do not stop the
/// remaining pages.
pub fn convert_issue(
    issue: &IssueFiles,
    settings: &Settings,
    report: &mut RunReport,
) -> Result<Option<PathBuf>, Page2OsdError> {
    let folder = discovery::folder_name(&issue.id)?;
    let page_files = issue.ordered_pages(settings.duplicate_pages)?;
    let images_dir = images_dir_for(&issue.dir, &settings.images_dir);

    let mut pages = Vec::with_capacity(page_files.len());
    for page_file in &page_files {
        let image = resolve_image(
            &images_dir,
            &image_stem(&issue.id, page_file.number),
            &settings.image_extensions,
        );
        let url = format!("{folder}/{}/{}", settings.images_dir, image.file_name);

        match assemble_page(&page_file.path, &url, page_file.number, image.dimensions) {
            Ok(assembled) => {
                report.counts.pages_converted += 1;

                if image.dimensions.is_none() {
                    report.counts.pages_unscaled += 1;
                    report.add(RunEntry::info(
                        RunEntryCode::PageUnscaled,
                        format!(
                            "issue '{}' page {}: no readable image, kept declared {}x{}",
                            issue.id,
                            page_file.number,
                            assembled.meta.declared_width,
                            assembled.meta.declared_height
                        ),
                    ));
                }

                let dropped = assembled.dropped;
                if dropped.regions > 0 || dropped.lines > 0 {
                    report.counts.regions_dropped += dropped.regions;
                    report.counts.lines_dropped += dropped.lines;
                    report.add(RunEntry::warning(
                        RunEntryCode::AnnotationsDropped,
                        format!(
                            "issue '{}' page {}: dropped {} region(s), {} line(s)",
                            issue.id, page_file.number, dropped.regions, dropped.lines
                        ),
                    ));
                }

                pages.push(assembled.page);
            }
            Err(err) => {
                log::warn!(
                    "Skipping page {} of issue '{}': {}",
                    page_file.number,
                    issue.id,
                    err
                );
                report.counts.pages_failed += 1;
                report.add(RunEntry::warning(
                    RunEntryCode::PageFailed,
                    format!("issue '{}' page {}: {}", issue.id, page_file.number, err),
                ));
            }
        }
    }

    if pages.is_empty() {
        log::warn!("No pages processed for issue '{}'; nothing written", issue.id);
        report.add(RunEntry::warning(
            RunEntryCode::IssueNoPages,
            format!("issue '{}' skipped: no page could be converted", issue.id),
        ));
        return Ok(None);
    }

    let document = Issue::from_pages(issue.id.clone(), pages);
    let out_path = issue.dir.join(settings.output_file_name(&issue.id));
    write_issue_json(&out_path, &document)?;

    Ok(Some(out_path))
}

fn issue_error_code(err: &Page2OsdError) -> RunEntryCode {
    match err {
        Page2OsdError::Naming { .. } => RunEntryCode::IssueNaming,
        Page2OsdError::DuplicatePage { .. } => RunEntryCode::IssueDuplicatePages,
        _ => RunEntryCode::IssueWriteFailed,
    }
}
