//! # Pipeline Module
//!
//! Drives a whole archive run:
//!
//! 1. **Check** - oracle, source and destination are usable (all problems reported together)
//! 2. **Seed** - fingerprint every photo already in the archive
//! 3. **Scan** - find eligible photos in the source tree
//! 4. **Archive** - per photo: dedup check, date resolution, naming, existence check, copy
//!
//! Only step 1 can fail the run. Anything that goes wrong with a single
//! photo skips that photo and the run continues.

mod executor;
mod preconditions;
mod types;

pub use executor::{Pipeline, PipelineBuilder, PipelineConfig};
pub use preconditions::check_preconditions;
pub use types::{ArchiveReport, FileOutcome, FileRecord, SkipReason};
