//! # Scanner Module
//!
//! Discovers eligible photo files under a directory.
//!
//! ## Supported Formats
//! - Raster: JPEG, PNG, GIF, BMP, TIFF, WebP, HEIC/HEIF
//! - Raw: CR2, CR3, NEF, ARW, DNG, ORF, RW2, RAF, SRW, PEF
//!
//! Extensions are matched case-insensitively. Entries are visited in file
//! name order so repeated runs number photos the same way.
//!
//! ## Example
//! ```rust,ignore
//! use photo_archiver::core::scanner::{PhotoScanner, ScanConfig, WalkDirScanner};
//!
//! let scanner = WalkDirScanner::new(ScanConfig::default());
//! let result = scanner.scan(Path::new("/Users/me/Inbox"));
//! ```

mod filter;
mod walker;

pub use filter::ImageFilter;
pub use walker::{ScanConfig, WalkDirScanner};

use crate::error::ScanError;
use crate::events::EventSender;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// An eligible photo file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoFile {
    /// Path to the photo file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
}

impl PhotoFile {
    /// Lowercase extension, as used in archive file names
    pub fn extension(&self) -> String {
        self.path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    }
}

/// Result of a scan operation
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Successfully discovered photos
    pub photos: Vec<PhotoFile>,
    /// Errors that occurred during scanning (non-fatal)
    pub errors: Vec<ScanError>,
}

/// Trait for photo scanners
///
/// Implement this trait to create custom scanners (e.g., for testing).
pub trait PhotoScanner: Send + Sync {
    /// Scan a directory tree and return discovered photos
    fn scan(&self, root: &Path) -> ScanResult;

    /// Scan with progress reporting via events
    fn scan_with_events(&self, root: &Path, events: &EventSender) -> ScanResult;
}
