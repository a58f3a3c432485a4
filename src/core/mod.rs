//! # Core Module
//!
//! The UI-agnostic archiving engine.
//!
//! ## Modules
//! - `dates` - Parses metadata timestamps and dates embedded in names
//! - `metadata` - Queries the metadata oracle for timestamp tags
//! - `resolver` - Chooses one capture date per photo
//! - `dedup` - Content fingerprints and the set of known photos
//! - `namer` - Archive directories and sequence-numbered file names
//! - `scanner` - Discovers eligible photos in directories
//! - `pipeline` - Orchestrates the full workflow

pub mod dates;
pub mod dedup;
pub mod metadata;
pub mod namer;
pub mod pipeline;
pub mod resolver;
pub mod scanner;

// Re-export commonly used types
pub use dedup::{ContentDeduplicator, ContentFingerprint};
pub use metadata::{MetadataOracle, MetadataTag, RawMetadataRecord};
pub use namer::{ArchiveNamer, ArchivePath, DayCounter};
pub use pipeline::{ArchiveReport, Pipeline, SkipReason};
pub use resolver::{DateResolver, DateSource, ResolvedDate};
pub use scanner::PhotoFile;
