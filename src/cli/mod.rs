//! # CLI Module
//!
//! Command-line interface for the photo archiver.
//!
//! ## Usage
//! ```bash
//! # Archive an inbox (exiftool must be on PATH)
//! photo-archive run ~/Inbox ~/Pictures/Archive
//!
//! # Preview without copying
//! photo-archive run ~/Inbox ~/Pictures/Archive --dry-run
//!
//! # No exiftool installed: read EXIF in-process
//! photo-archive run ~/Inbox ~/Pictures/Archive --backend builtin
//!
//! # JSON report
//! photo-archive run ~/Inbox ~/Pictures/Archive --output json
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use photo_archiver::core::metadata::{ExifOracle, ExifToolOracle, MetadataOracle};
use photo_archiver::core::pipeline::{ArchiveReport, Pipeline, SkipReason};
use photo_archiver::error::Result;
use photo_archiver::events::{Event, EventChannel, FileEvent, PipelineEvent};
use std::path::{Path, PathBuf};
use std::thread;

/// Photo Archiver - file photos by date, once
#[derive(Parser, Debug)]
#[command(name = "photo-archive")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Copy photos from SOURCE into the dated archive at DESTINATION
    Run {
        /// Directory tree to archive from
        source: PathBuf,

        /// Archive root (created if missing)
        destination: PathBuf,

        /// Metadata backend
        #[arg(short, long, default_value = "exiftool")]
        backend: Backend,

        /// Path to the exiftool executable
        #[arg(long, default_value = "exiftool")]
        exiftool: PathBuf,

        /// Show what would be archived without copying anything
        #[arg(long)]
        dry_run: bool,

        /// Skip hidden files and directories
        #[arg(long)]
        skip_hidden: bool,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Backend {
    /// Run the external exiftool program (default)
    Exiftool,
    /// Read EXIF in-process (fewer formats, no exiftool needed)
    Builtin,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON report for scripting
    Json,
    /// Archived destination paths only
    Minimal,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            source,
            destination,
            backend,
            exiftool,
            dry_run,
            skip_hidden,
            output,
            verbose,
        } => {
            photo_archiver::init_tracing(if verbose {
                "photo_archiver=debug"
            } else {
                "photo_archiver=warn"
            });

            let oracle: Box<dyn MetadataOracle> = match backend {
                Backend::Exiftool => Box::new(ExifToolOracle::new(exiftool)),
                Backend::Builtin => Box::new(ExifOracle::new()),
            };

            let pipeline = Pipeline::builder()
                .source(source)
                .destination(destination)
                .oracle(oracle)
                .dry_run(dry_run)
                .skip_hidden(skip_hidden)
                .build();

            run_archive(&pipeline, output, verbose)
        }
    }
}

fn run_archive(pipeline: &Pipeline, output: OutputFormat, verbose: bool) -> Result<()> {
    let term = Term::stderr();

    if matches!(output, OutputFormat::Pretty) {
        term.write_line(&format!(
            "{} {}",
            style("Photo Archiver").bold().cyan(),
            style(concat!("v", env!("CARGO_PKG_VERSION"))).dim()
        ))
        .ok();
        if pipeline.config().dry_run {
            term.write_line(&format!("{}", style("Dry run: nothing will be copied").yellow()))
                .ok();
        }
        term.write_line("").ok();
    }

    let (sender, receiver) = EventChannel::new();

    // Progress bar for pretty output
    let progress = if matches!(output, OutputFormat::Pretty) {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("█▓░"),
        );
        Some(pb)
    } else {
        None
    };

    let progress_clone = progress.clone();

    // Handle events in a separate thread
    let event_thread = thread::spawn(move || {
        let Some(pb) = progress_clone else {
            // Drain so the sender never blocks on a full channel
            receiver.iter().for_each(drop);
            return;
        };

        for event in receiver.iter() {
            match event {
                Event::Pipeline(PipelineEvent::PhaseChanged { phase }) => {
                    pb.set_message(format!("{}", phase));
                }
                Event::File(FileEvent::Started { total_photos }) => {
                    pb.set_length(total_photos as u64);
                }
                Event::File(FileEvent::Progress(p)) => {
                    pb.set_position(p.completed as u64);
                    if verbose {
                        pb.set_message(
                            p.current_path
                                .file_name()
                                .unwrap_or_default()
                                .to_string_lossy()
                                .into_owned(),
                        );
                    }
                }
                Event::Pipeline(PipelineEvent::Completed { .. })
                | Event::Pipeline(PipelineEvent::Error { .. }) => {
                    pb.finish_and_clear();
                }
                _ => {}
            }
        }
    });

    let result = pipeline.run_with_events(&sender);

    // Drop sender to signal event thread to finish
    drop(sender);
    event_thread.join().ok();

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            term.write_line(&format!("{} {}", style("✗").red().bold(), e)).ok();
            std::process::exit(2);
        }
    };

    match output {
        OutputFormat::Pretty => print_pretty_results(&term, &report, verbose),
        OutputFormat::Json => print_json_results(&report),
        OutputFormat::Minimal => print_minimal_results(&report),
    }

    Ok(())
}

fn print_pretty_results(term: &Term, report: &ArchiveReport, verbose: bool) {
    let summary = &report.summary;

    term.write_line(&format!(
        "{} {}",
        style("✓").green().bold(),
        if report.dry_run { "Dry Run Complete" } else { "Archive Complete" }
    ))
    .ok();
    term.write_line("").ok();

    term.write_line(&format!(
        "  {} photos examined in {:.1}s",
        style(summary.total_photos).cyan(),
        summary.duration_ms as f64 / 1000.0
    ))
    .ok();
    term.write_line(&format!(
        "  {} {}",
        style(summary.archived).green(),
        if report.dry_run { "would be archived" } else { "archived" }
    ))
    .ok();
    term.write_line(&format!("  {} duplicates skipped", style(summary.duplicates).cyan()))
        .ok();

    if summary.target_exists > 0 {
        term.write_line(&format!(
            "  {} skipped, archive name already taken",
            style(summary.target_exists).yellow()
        ))
        .ok();
    }
    if summary.no_date > 0 {
        term.write_line(&format!(
            "  {} without a date (left in place)",
            style(summary.no_date).yellow()
        ))
        .ok();
    }
    if summary.failed > 0 {
        term.write_line(&format!("  {} failed", style(summary.failed).red())).ok();
    }

    term.write_line("").ok();

    if verbose {
        for file in report.archived() {
            if let Some(destination) = file.destination() {
                term.write_line(&format!(
                    "  {} {} -> {}",
                    style("+").green(),
                    display_path(&file.source),
                    display_path(destination)
                ))
                .ok();
            }
        }
    }

    // Undated photos and failures need attention; routine skips only in verbose mode
    for file in report.skipped() {
        let Some(reason) = file.skip_reason() else {
            continue;
        };
        let notable = matches!(reason, SkipReason::NoDate) || reason.is_failure();
        if notable || verbose {
            let marker = if reason.is_failure() {
                style("!").red().to_string()
            } else {
                style("○").dim().to_string()
            };
            term.write_line(&format!(
                "  {} {} ({})",
                marker,
                display_path(&file.source),
                style(reason).dim()
            ))
            .ok();
        }
    }

    for error in &report.scan_errors {
        term.write_line(&format!("  {} {}", style("!").red(), error)).ok();
    }
}

fn print_json_results(report: &ArchiveReport) {
    match serde_json::to_string_pretty(report) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize report: {}", e),
    }
}

fn print_minimal_results(report: &ArchiveReport) {
    for file in report.archived() {
        if let Some(destination) = file.destination() {
            println!("{}", destination.display());
        }
    }
}

/// Shorten paths under the home directory to `~/...`
fn display_path(path: &Path) -> String {
    match dirs::home_dir().and_then(|home| path.strip_prefix(home).ok().map(Path::to_path_buf)) {
        Some(relative) => format!("~/{}", relative.display()),
        None => path.display().to_string(),
    }
}
