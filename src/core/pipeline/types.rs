//! Types describing what a pipeline run did.

use crate::core::resolver::ResolvedDate;
use crate::events::PipelineSummary;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Why a source photo was not archived
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Same content is already in the archive or was archived this run
    Duplicate,
    /// No metadata tag, directory name or file name yielded a date
    NoDate,
    /// The computed archive path is already taken
    TargetExists,
    /// The source could not be read for fingerprinting
    Unreadable { message: String },
    /// Creating the month directory or copying failed
    CopyFailed { message: String },
}

impl SkipReason {
    /// Whether this skip is a failure rather than expected steady-state
    pub fn is_failure(&self) -> bool {
        matches!(self, SkipReason::Unreadable { .. } | SkipReason::CopyFailed { .. })
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Duplicate => write!(f, "duplicate content"),
            SkipReason::NoDate => write!(f, "no date could be determined"),
            SkipReason::TargetExists => write!(f, "archive path already exists"),
            SkipReason::Unreadable { message } => write!(f, "unreadable: {}", message),
            SkipReason::CopyFailed { message } => write!(f, "copy failed: {}", message),
        }
    }
}

/// What happened to one source photo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Archived {
        destination: PathBuf,
        date: ResolvedDate,
    },
    Skipped {
        reason: SkipReason,
    },
}

/// A source photo and its outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub source: PathBuf,
    pub outcome: FileOutcome,
}

impl FileRecord {
    pub fn destination(&self) -> Option<&PathBuf> {
        match &self.outcome {
            FileOutcome::Archived { destination, .. } => Some(destination),
            FileOutcome::Skipped { .. } => None,
        }
    }

    pub fn skip_reason(&self) -> Option<&SkipReason> {
        match &self.outcome {
            FileOutcome::Archived { .. } => None,
            FileOutcome::Skipped { reason } => Some(reason),
        }
    }
}

/// Result of a pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveReport {
    pub run_id: String,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub dry_run: bool,
    /// Fingerprints found in the archive before the run
    pub known_at_start: usize,
    pub files: Vec<FileRecord>,
    /// Traversal problems (non-fatal)
    pub scan_errors: Vec<String>,
    pub summary: PipelineSummary,
}

impl ArchiveReport {
    pub fn archived(&self) -> impl Iterator<Item = &FileRecord> {
        self.files.iter().filter(|f| f.destination().is_some())
    }

    pub fn skipped(&self) -> impl Iterator<Item = &FileRecord> {
        self.files.iter().filter(|f| f.skip_reason().is_some())
    }
}

/// Tally outcomes into a summary
pub(crate) fn summarize(files: &[FileRecord], duration_ms: u64) -> PipelineSummary {
    let mut summary = PipelineSummary {
        total_photos: files.len(),
        duration_ms,
        ..Default::default()
    };

    for file in files {
        match file.skip_reason() {
            None => summary.archived += 1,
            Some(SkipReason::Duplicate) => summary.duplicates += 1,
            Some(SkipReason::NoDate) => summary.no_date += 1,
            Some(SkipReason::TargetExists) => summary.target_exists += 1,
            Some(reason) if reason.is_failure() => summary.failed += 1,
            Some(_) => {}
        }
    }

    summary
}
