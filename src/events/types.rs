//! Event type definitions for progress reporting.

use crate::core::pipeline::SkipReason;
use crate::core::resolver::DateSource;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted by the archive pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Source and destination traversal
    Scan(ScanEvent),
    /// Fingerprinting of files already in the archive
    Seed(SeedEvent),
    /// Per-file archive decisions
    File(FileEvent),
    /// Pipeline-level events
    Pipeline(PipelineEvent),
}

/// Events during directory traversal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScanEvent {
    /// Traversal of a root has started
    Started { root: PathBuf },
    /// Progress update during traversal
    Progress(ScanProgress),
    /// An eligible photo was found
    PhotoFound { path: PathBuf },
    /// An entry could not be read; traversal continues
    Error { path: PathBuf, message: String },
    /// Traversal completed
    Completed { total_photos: usize },
}

/// Progress information during traversal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanProgress {
    pub directories_scanned: usize,
    pub photos_found: usize,
    pub current_path: PathBuf,
}

/// Events while fingerprinting the existing archive
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SeedEvent {
    Started { root: PathBuf },
    Completed { known_fingerprints: usize },
}

/// Events for individual source photos
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum FileEvent {
    /// Archiving of the source photos has started
    Started { total_photos: usize },
    /// About to process a photo
    Progress(FileProgress),
    /// A photo was copied (or would be, in a dry run)
    Archived {
        source: PathBuf,
        destination: PathBuf,
        date_source: DateSource,
    },
    /// A photo was left alone
    Skipped { path: PathBuf, reason: SkipReason },
}

/// Progress information while archiving
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileProgress {
    /// Photos processed so far, including this one
    pub completed: usize,
    pub total: usize,
    pub current_path: PathBuf,
}

/// Pipeline-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PipelineEvent {
    Started,
    PhaseChanged { phase: PipelinePhase },
    Completed { summary: PipelineSummary },
    /// Startup checks failed; nothing was touched
    Error { message: String },
}

/// Phases of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelinePhase {
    Checking,
    Seeding,
    Scanning,
    Archiving,
}

/// Summary of pipeline results
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineSummary {
    /// Eligible photos found in the source
    pub total_photos: usize,
    pub archived: usize,
    pub duplicates: usize,
    pub no_date: usize,
    pub target_exists: usize,
    /// Unreadable sources and failed copies
    pub failed: usize,
    pub duration_ms: u64,
}

impl std::fmt::Display for PipelinePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelinePhase::Checking => write!(f, "Checking"),
            PipelinePhase::Seeding => write!(f, "Indexing archive"),
            PipelinePhase::Scanning => write!(f, "Scanning"),
            PipelinePhase::Archiving => write!(f, "Archiving"),
        }
    }
}
