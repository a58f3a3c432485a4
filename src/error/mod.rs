//! # Error Module
//!
//! Error types for the photo archiver.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, file names, what went wrong
//! - **Per-file errors are recoverable** - only startup checks abort a run
//! - **Recovery hints** - suggest how to fix when possible

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("{0}")]
    Preconditions(PreconditionFailures),
}

/// Every startup check that failed, reported together
#[derive(Debug)]
pub struct PreconditionFailures(pub Vec<ConfigError>);

impl fmt::Display for PreconditionFailures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} startup check(s) failed:", self.0.len())?;
        for failure in &self.0 {
            write!(f, "\n  - {}", failure)?;
        }
        Ok(())
    }
}

/// Configuration problems detected before any file is touched
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Metadata tool not found: {path}. Install exiftool or pass --backend builtin.")]
    ToolNotFound { path: PathBuf },

    #[error("Source directory not found: {path}")]
    SourceNotFound { path: PathBuf },

    #[error("Source path is not a directory: {path}")]
    SourceNotDirectory { path: PathBuf },

    #[error("Destination {path} cannot be created: {source}")]
    DestinationUncreatable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Destination path is not a directory: {path}")]
    DestinationNotDirectory { path: PathBuf },
}

/// Errors that occur during directory traversal
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Permission denied accessing: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Failed to read directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from the metadata oracle. Always recovered as "no metadata".
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Failed to run metadata tool {tool}: {source}")]
    Spawn {
        tool: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Metadata tool produced no output for {path}")]
    EmptyOutput { path: PathBuf },

    #[error("Malformed metadata output for {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },

    #[error("Failed to read metadata from {path}: {reason}")]
    Unreadable { path: PathBuf, reason: String },
}

/// Errors while computing a content fingerprint
#[derive(Error, Debug)]
pub enum FingerprintError {
    #[error("Failed to read {path} for fingerprinting: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, ArchiveError>;
