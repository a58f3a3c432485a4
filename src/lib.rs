//! # Photo Archiver
//!
//! Copies photos into a dated archive tree, skipping content duplicates.
//!
//! ## How a photo is placed
//! - **Dedup first** - a photo whose bytes are already archived is skipped
//! - **Date from the best source** - embedded metadata, then the folder name, then the file name
//! - **Deterministic names** - `YYYY/MM/YYYY-MM-DD_HH-MM_NNN.ext`, never overwriting
//!
//! ## Architecture
//! The library is split into a core engine (UI-agnostic) and presentation layers:
//! - `core` - The archiving engine
//! - `events` - Event-driven progress reporting
//! - `error` - Error types
//! - `cli` - Command-line interface (binary only)

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{ArchiveError, Result};

/// Initialize tracing for the library
///
/// `RUST_LOG` wins when set; otherwise `default_filter` is used. This
/// should be called by the application entry point (CLI or GUI).
pub fn init_tracing(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global default tracing subscriber");
}
