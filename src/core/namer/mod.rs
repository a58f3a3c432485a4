//! # Namer Module
//!
//! Maps a resolved date to its place in the archive:
//!
//! ```text
//! DEST_ROOT/YYYY/MM/YYYY-MM-DD_HH-MM_NNN.ext
//! ```
//!
//! `NNN` is a per-calendar-day sequence number. Photos from the same day
//! share one counter whatever their time of day or how their date was
//! resolved. Counters start empty every run and are never persisted.

use crate::core::resolver::ResolvedDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Per-day sequence counters for one run
#[derive(Debug, Default)]
pub struct DayCounter {
    counts: HashMap<String, u32>,
}

impl DayCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// `YYYYMMDD` key for a date
    pub fn key(date: &ResolvedDate) -> String {
        format!("{:04}{:02}{:02}", date.year(), date.month(), date.day())
    }

    /// Increment the counter for the date's day and return the new value
    pub fn next(&mut self, date: &ResolvedDate) -> u32 {
        let count = self.counts.entry(Self::key(date)).or_insert(0);
        *count += 1;
        *count
    }

    /// Current value for the date's day (0 if unused)
    pub fn current(&self, date: &ResolvedDate) -> u32 {
        self.counts.get(&Self::key(date)).copied().unwrap_or(0)
    }
}

/// Destination of one archived photo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivePath {
    /// `DEST_ROOT/YYYY/MM`
    pub directory: PathBuf,
    /// `YYYY-MM-DD_HH-MM_NNN.ext`
    pub filename: String,
}

impl ArchivePath {
    pub fn full_path(&self) -> PathBuf {
        self.directory.join(&self.filename)
    }

    pub fn exists(&self) -> bool {
        self.full_path().exists()
    }

    /// Create the month directory if it is missing
    pub fn ensure_directory(&self) -> io::Result<()> {
        fs::create_dir_all(&self.directory)
    }
}

/// Assigns archive paths below a destination root
#[derive(Debug)]
pub struct ArchiveNamer {
    root: PathBuf,
}

impl ArchiveNamer {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Claim the next sequence number for the date's day and build the
    /// path. The number is consumed even if the caller ends up not writing
    /// the file.
    pub fn next_path(
        &self,
        date: &ResolvedDate,
        extension: &str,
        counter: &mut DayCounter,
    ) -> ArchivePath {
        let sequence = counter.next(date);

        ArchivePath {
            directory: self.directory_for(date),
            filename: Self::filename(date, sequence, extension),
        }
    }

    fn directory_for(&self, date: &ResolvedDate) -> PathBuf {
        self.root
            .join(format!("{:04}", date.year()))
            .join(format!("{:02}", date.month()))
    }

    fn filename(date: &ResolvedDate, sequence: u32, extension: &str) -> String {
        let stem = format!(
            "{:04}-{:02}-{:02}_{:02}-{:02}_{:03}",
            date.year(),
            date.month(),
            date.day(),
            date.hour(),
            date.minute(),
            sequence
        );

        let extension = extension.to_lowercase();
        if extension.is_empty() {
            stem
        } else {
            format!("{}.{}", stem, extension)
        }
    }
}
