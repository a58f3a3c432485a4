//! # Events Module
//!
//! Progress reporting for the archive pipeline.
//!
//! The core emits events through a channel so any front end (CLI today,
//! GUI later) can display progress without the core knowing about it.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         if let Event::File(FileEvent::Skipped { path, reason }) = event {
//!             println!("skipped {}: {}", path.display(), reason);
//!         }
//!     }
//! });
//!
//! pipeline.run_with_events(&sender)?;
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
