//! # Dates Module
//!
//! Turns loosely formatted timestamps into `NaiveDateTime` values.
//!
//! - `parser` - metadata timestamps such as `2023:05:14 10:30:00+02:00`
//! - `text` - dates embedded in directory and file names
//!
//! Timezone offsets are dropped, never converted: a photo taken at 10:30
//! local time is archived as 10:30 regardless of the offset recorded.

mod parser;
mod text;

pub use parser::{parse_metadata_timestamp, parse_permissive};
pub use text::{extract_date, DatePattern};
