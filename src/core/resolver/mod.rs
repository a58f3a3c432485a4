//! # Resolver Module
//!
//! Picks one capture date for a photo by trying, in order:
//! 1. The metadata oracle's tags (`DateTimeOriginal`, `CreateDate`, `FileModifyDate`)
//! 2. A date in the containing directory's path
//! 3. A date in the file name
//!
//! The first source that produces a date wins. No source is retried.

use crate::core::dates::{extract_date, parse_metadata_timestamp};
use crate::core::metadata::{MetadataOracle, MetadataTag};
use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Where a resolved date came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateSource {
    Metadata(MetadataTag),
    DirectoryName,
    FileName,
}

impl fmt::Display for DateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateSource::Metadata(tag) => write!(f, "{}", tag),
            DateSource::DirectoryName => write!(f, "directory name"),
            DateSource::FileName => write!(f, "file name"),
        }
    }
}

/// The capture date chosen for a photo. Carries no timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDate {
    pub datetime: NaiveDateTime,
    pub source: DateSource,
}

impl ResolvedDate {
    pub fn new(datetime: NaiveDateTime, source: DateSource) -> Self {
        Self { datetime, source }
    }

    pub fn year(&self) -> i32 {
        self.datetime.year()
    }

    pub fn month(&self) -> u32 {
        self.datetime.month()
    }

    pub fn day(&self) -> u32 {
        self.datetime.day()
    }

    pub fn hour(&self) -> u32 {
        self.datetime.hour()
    }

    pub fn minute(&self) -> u32 {
        self.datetime.minute()
    }
}

/// Resolves capture dates using a metadata oracle and name-based fallbacks
pub struct DateResolver {
    oracle: Box<dyn MetadataOracle>,
}

impl DateResolver {
    pub fn new(oracle: Box<dyn MetadataOracle>) -> Self {
        Self { oracle }
    }

    /// The oracle consulted first
    pub fn oracle(&self) -> &dyn MetadataOracle {
        self.oracle.as_ref()
    }

    /// Resolve a date for `path`, or `None` if no source yields one
    pub fn resolve(&self, path: &Path) -> Option<ResolvedDate> {
        self.from_metadata(path)
            .or_else(|| {
                let dir = path.parent()?;
                extract_date(&dir.to_string_lossy())
                    .map(|dt| ResolvedDate::new(dt, DateSource::DirectoryName))
            })
            .or_else(|| {
                let name = path.file_name()?;
                extract_date(&name.to_string_lossy())
                    .map(|dt| ResolvedDate::new(dt, DateSource::FileName))
            })
    }

    fn from_metadata(&self, path: &Path) -> Option<ResolvedDate> {
        let record = match self.oracle.extract_tags(path) {
            Ok(record) => record,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "no metadata, falling back to names");
                return None;
            }
        };

        for (tag, raw) in record.candidates() {
            match parse_metadata_timestamp(raw) {
                Some(datetime) => return Some(ResolvedDate::new(datetime, DateSource::Metadata(tag))),
                None => debug!(path = %path.display(), %tag, raw, "unparseable timestamp"),
            }
        }

        None
    }
}
