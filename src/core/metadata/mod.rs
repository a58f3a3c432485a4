//! # Metadata Module
//!
//! Asks a metadata oracle for the timestamp tags of a photo.
//!
//! ## Requested Tags
//! In priority order:
//! - `DateTimeOriginal` - when the shutter fired
//! - `CreateDate` - when the image was digitized
//! - `FileModifyDate` - filesystem modification time
//!
//! ## Backends
//! - [`ExifToolOracle`] - runs the external `exiftool` program
//! - [`ExifOracle`] - reads EXIF in-process, for machines without exiftool
//!
//! Oracle failures are never fatal; callers treat them as "no metadata".

mod embedded;
mod exiftool;

pub use embedded::ExifOracle;
pub use exiftool::ExifToolOracle;

use crate::error::{ConfigError, MetadataError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Timestamp tags requested from the oracle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MetadataTag {
    DateTimeOriginal,
    CreateDate,
    FileModifyDate,
}

impl MetadataTag {
    /// All tags, highest priority first
    pub const PRIORITY: [MetadataTag; 3] = [
        MetadataTag::DateTimeOriginal,
        MetadataTag::CreateDate,
        MetadataTag::FileModifyDate,
    ];

    /// Tag name as the oracle spells it
    pub fn as_str(&self) -> &'static str {
        match self {
            MetadataTag::DateTimeOriginal => "DateTimeOriginal",
            MetadataTag::CreateDate => "CreateDate",
            MetadataTag::FileModifyDate => "FileModifyDate",
        }
    }
}

impl std::fmt::Display for MetadataTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw tag values for one file. Absent tags are simply missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawMetadataRecord {
    values: BTreeMap<MetadataTag, String>,
}

impl RawMetadataRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value, replacing any earlier one for the same tag
    pub fn with(mut self, tag: MetadataTag, value: impl Into<String>) -> Self {
        self.values.insert(tag, value.into());
        self
    }

    /// Raw value for a tag
    pub fn get(&self, tag: MetadataTag) -> Option<&str> {
        self.values.get(&tag).map(String::as_str)
    }

    /// Present values in priority order
    pub fn candidates(&self) -> impl Iterator<Item = (MetadataTag, &str)> + '_ {
        MetadataTag::PRIORITY
            .into_iter()
            .filter_map(|tag| self.get(tag).map(|value| (tag, value)))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Source of embedded timestamp tags.
///
/// Implement this trait to plug in another metadata backend (or a fake one
/// for testing).
pub trait MetadataOracle: Send + Sync {
    /// Read the timestamp tags for a single file
    fn extract_tags(&self, path: &Path) -> Result<RawMetadataRecord, MetadataError>;

    /// Verify the backend can run at all. Called once before a run starts.
    fn check_available(&self) -> Result<(), ConfigError> {
        Ok(())
    }
}
