//! page2osd: PAGE XML to deep-zoom viewer JSON.
//!
//! page2osd walks a directory tree of OCR output for scanned newspapers,
//! pairs each issue's manifest with its per-page PAGE XML files, rescales the
//! region and line polygons to the real image size, and writes one
//! `<issue-id>_osd.json` per issue for a deep-zoom image viewer.
//!
//! # Modules
//!
//! - [`osd`]: Output model (issues, pages, regions, lines, tile sources)
//! - [`page_xml`]: PAGE XML parsing and page assembly
//! - [`discovery`]: File-name driven issue discovery
//! - [`image`]: Page image lookup and dimension reads
//! - [`conversion`]: Tree walk, issue building and the run report
//! - [`config`]: Run settings
//! - [`error`]: Error types for page2osd operations

pub mod config;
pub mod conversion;
pub mod discovery;
pub mod error;
pub mod image;
pub mod osd;
pub mod page_xml;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

pub use error::Page2OsdError;

/// The page2osd CLI application.
#[derive(Parser)]
#[command(name = "page2osd")]
#[command(version, about)]
struct Cli {
    /// Root directory to walk. Every folder below it is scanned for issues.
    #[arg(env = "PAGE2OSD_ROOT")]
    root: Option<PathBuf>,

    /// YAML settings file.
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Format of the run report printed on completion.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    report: ReportFormat,

    /// Stop starting new issues after this many seconds.
    #[arg(long)]
    deadline_secs: Option<u64>,

    /// How to handle two files with the same page number in one issue.
    #[arg(long, value_enum)]
    duplicate_pages: Option<config::DuplicatePolicy>,

    /// Only log warnings and errors.
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    quiet: bool,

    /// Log per-file details.
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// Output format for the run report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

/// Run the page2osd CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), Page2OsdError> {
    let cli = Cli::parse();
    init_logging(&cli);

    let mut settings = match &cli.config {
        Some(path) => config::load_settings(path)?,
        None => config::Settings::default(),
    };
    if let Some(root) = cli.root {
        settings.root = Some(root);
    }
    if let Some(secs) = cli.deadline_secs {
        settings.deadline_secs = Some(secs);
    }
    if let Some(policy) = cli.duplicate_pages {
        settings.duplicate_pages = policy;
    }

    let root = settings.root.clone().ok_or(Page2OsdError::MissingRoot)?;
    log::info!("Converting PAGE XML under {}", root.display());

    let report = conversion::convert_tree(&root, &settings)?;

    match cli.report {
        ReportFormat::Json => {
            let json = serde_json::to_string_pretty(&report).map_err(|source| {
                Page2OsdError::JsonWrite {
                    path: PathBuf::from("<stdout>"),
                    source,
                }
            })?;
            println!("{json}");
        }
        ReportFormat::Text => {
            println!("Conversion finished:");
            print!("{}", report);
        }
    }

    // Best-effort batch job: skipped pages and issues do not fail the run.
    Ok(())
}

/// Logs go to stdout alongside the text report, or to stderr when stdout
/// carries the JSON report. `RUST_LOG` overrides the level flags.
fn init_logging(cli: &Cli) {
    let level = if cli.quiet {
        "warn"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    let target = match cli.report {
        ReportFormat::Text => env_logger::Target::Stdout,
        ReportFormat::Json => env_logger::Target::Stderr,
    };

    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(target)
        .format_target(false)
        .format_timestamp(None)
        .try_init();
}
