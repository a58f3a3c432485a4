//! Pipeline execution implementation.

use super::preconditions::check_preconditions;
use super::types::{summarize, ArchiveReport, FileOutcome, FileRecord, SkipReason};
use crate::core::dedup::{fingerprint, ContentDeduplicator};
use crate::core::metadata::{ExifToolOracle, MetadataOracle};
use crate::core::namer::{ArchiveNamer, DayCounter};
use crate::core::resolver::DateResolver;
use crate::core::scanner::{PhotoFile, PhotoScanner, ScanConfig, WalkDirScanner};
use crate::error::ArchiveError;
use crate::events::{
    null_sender, Event, EventSender, FileEvent, FileProgress, PipelineEvent, PipelinePhase,
    SeedEvent,
};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Configuration for the pipeline
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// Directory tree holding the photos to archive
    pub source: PathBuf,
    /// Archive root
    pub destination: PathBuf,
    /// Decide everything but copy nothing
    pub dry_run: bool,
    /// Traversal settings, used for both the source and the archive
    pub scan_config: ScanConfig,
}

/// Builder for pipeline configuration
pub struct PipelineBuilder {
    config: PipelineConfig,
    oracle: Option<Box<dyn MetadataOracle>>,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
            oracle: None,
        }
    }

    pub fn source(mut self, source: impl Into<PathBuf>) -> Self {
        self.config.source = source.into();
        self
    }

    pub fn destination(mut self, destination: impl Into<PathBuf>) -> Self {
        self.config.destination = destination.into();
        self
    }

    /// Set the metadata backend (defaults to `exiftool` on `PATH`)
    pub fn oracle(mut self, oracle: Box<dyn MetadataOracle>) -> Self {
        self.oracle = Some(oracle);
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.config.dry_run = dry_run;
        self
    }

    /// Set scanner configuration
    pub fn scan_config(mut self, config: ScanConfig) -> Self {
        self.config.scan_config = config;
        self
    }

    /// Skip hidden files and directories
    pub fn skip_hidden(mut self, skip: bool) -> Self {
        self.config.scan_config.skip_hidden = skip;
        self
    }

    /// Build the pipeline
    pub fn build(self) -> Pipeline {
        let oracle = self
            .oracle
            .unwrap_or_else(|| Box::new(ExifToolOracle::default()));

        Pipeline {
            namer: ArchiveNamer::new(self.config.destination.clone()),
            resolver: DateResolver::new(oracle),
            config: self.config,
        }
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Mutable state of one run, owned by the run and lent to each step
#[derive(Debug, Default)]
struct RunContext {
    dedup: ContentDeduplicator,
    counter: DayCounter,
}

/// The archive pipeline
pub struct Pipeline {
    config: PipelineConfig,
    resolver: DateResolver,
    namer: ArchiveNamer,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the pipeline without events
    pub fn run(&self) -> Result<ArchiveReport, ArchiveError> {
        self.run_with_events(&null_sender())
    }

    /// Run the pipeline with event reporting.
    ///
    /// Only failed startup checks return an error. Every per-file problem
    /// is recorded in the report and the run carries on.
    pub fn run_with_events(&self, events: &EventSender) -> Result<ArchiveReport, ArchiveError> {
        let start_time = Instant::now();
        let config = &self.config;

        events.send(Event::Pipeline(PipelineEvent::Started));

        // Phase 1: Startup checks
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Checking,
        }));

        if let Err(failures) = check_preconditions(
            self.resolver.oracle(),
            &config.source,
            &config.destination,
            config.dry_run,
        ) {
            events.send(Event::Pipeline(PipelineEvent::Error {
                message: failures.to_string(),
            }));
            return Err(ArchiveError::Preconditions(failures));
        }

        info!(
            source = %config.source.display(),
            destination = %config.destination.display(),
            dry_run = config.dry_run,
            "starting archive run"
        );

        let mut ctx = RunContext::default();

        // Phase 2: Fingerprint what is already archived
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Seeding,
        }));
        events.send(Event::Seed(SeedEvent::Started {
            root: config.destination.clone(),
        }));

        let known_at_start = ctx.dedup.seed_from(&config.destination, &config.scan_config);

        events.send(Event::Seed(SeedEvent::Completed {
            known_fingerprints: known_at_start,
        }));

        // Phase 3: Scanning
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Scanning,
        }));

        let scanner = WalkDirScanner::new(config.scan_config.clone());
        let scan_result = scanner.scan_with_events(&config.source, events);
        let scan_errors: Vec<String> = scan_result.errors.iter().map(|e| e.to_string()).collect();
        for error in &scan_errors {
            warn!(%error, "traversal problem");
        }

        // Phase 4: Archiving, strictly one file at a time
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Archiving,
        }));

        let total = scan_result.photos.len();
        events.send(Event::File(FileEvent::Started { total_photos: total }));

        let mut files = Vec::with_capacity(total);
        for (i, photo) in scan_result.photos.iter().enumerate() {
            events.send(Event::File(FileEvent::Progress(FileProgress {
                completed: i + 1,
                total,
                current_path: photo.path.clone(),
            })));

            let outcome = self.process(photo, &mut ctx);

            events.send(Event::File(match &outcome {
                FileOutcome::Archived { destination, date } => FileEvent::Archived {
                    source: photo.path.clone(),
                    destination: destination.clone(),
                    date_source: date.source,
                },
                FileOutcome::Skipped { reason } => FileEvent::Skipped {
                    path: photo.path.clone(),
                    reason: reason.clone(),
                },
            }));

            files.push(FileRecord {
                source: photo.path.clone(),
                outcome,
            });
        }

        let summary = summarize(&files, start_time.elapsed().as_millis() as u64);
        info!(
            archived = summary.archived,
            duplicates = summary.duplicates,
            no_date = summary.no_date,
            target_exists = summary.target_exists,
            failed = summary.failed,
            "archive run complete"
        );

        events.send(Event::Pipeline(PipelineEvent::Completed {
            summary: summary.clone(),
        }));

        Ok(ArchiveReport {
            run_id: Uuid::new_v4().to_string(),
            source: config.source.clone(),
            destination: config.destination.clone(),
            dry_run: config.dry_run,
            known_at_start,
            files,
            scan_errors,
            summary,
        })
    }

    /// Take one photo through dedup, dating, naming and copying.
    fn process(&self, photo: &PhotoFile, ctx: &mut RunContext) -> FileOutcome {
        let path = &photo.path;
        let skip = |reason| FileOutcome::Skipped { reason };

        let fp = match fingerprint(path) {
            Ok(fp) => fp,
            Err(e) => {
                warn!(error = %e, "skipping unreadable photo");
                return skip(SkipReason::Unreadable {
                    message: e.to_string(),
                });
            }
        };

        if ctx.dedup.is_known(&fp) {
            debug!(path = %path.display(), fingerprint = %fp, "duplicate content");
            return skip(SkipReason::Duplicate);
        }

        let Some(date) = self.resolver.resolve(path) else {
            info!(path = %path.display(), "no date found, leaving photo in place");
            return skip(SkipReason::NoDate);
        };

        let target = self
            .namer
            .next_path(&date, &photo.extension(), &mut ctx.counter);
        let destination = target.full_path();

        if target.exists() {
            debug!(
                path = %path.display(),
                target = %destination.display(),
                "archive path taken"
            );
            return skip(SkipReason::TargetExists);
        }

        if !self.config.dry_run {
            let copied = target
                .ensure_directory()
                .and_then(|()| fs::copy(path, &destination));
            if let Err(e) = copied {
                warn!(
                    path = %path.display(),
                    target = %destination.display(),
                    error = %e,
                    "copy failed"
                );
                return skip(SkipReason::CopyFailed {
                    message: e.to_string(),
                });
            }
        }

        ctx.dedup.mark_known(fp);
        debug!(
            path = %path.display(),
            target = %destination.display(),
            source = %date.source,
            "archived"
        );

        FileOutcome::Archived { destination, date }
    }
}
