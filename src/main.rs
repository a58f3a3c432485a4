//! # photo-archive CLI
//!
//! Command-line interface for the photo archiver.
//!
//! ## Usage
//! ```bash
//! photo-archive run ~/Inbox ~/Pictures/Archive
//! photo-archive run ~/Inbox ~/Pictures/Archive --dry-run --output json
//! ```

mod cli;

use photo_archiver::Result;

fn main() -> Result<()> {
    cli::run()
}
