//! Directory walking implementation using walkdir.

use super::filter::{is_hidden, ImageFilter};
use super::{PhotoFile, PhotoScanner, ScanResult};
use crate::error::ScanError;
use crate::events::{null_sender, Event, EventSender, ScanEvent, ScanProgress};
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// Configuration for the directory scanner
#[derive(Debug, Clone, Default)]
pub struct ScanConfig {
    /// Whether to skip hidden files and directories
    pub skip_hidden: bool,
}

/// Scanner implementation using the walkdir crate
pub struct WalkDirScanner {
    filter: ImageFilter,
}

impl WalkDirScanner {
    /// Create a new scanner with the given configuration
    pub fn new(config: ScanConfig) -> Self {
        Self {
            filter: ImageFilter::new().with_skip_hidden(config.skip_hidden),
        }
    }

    fn should_descend(&self, entry: &DirEntry) -> bool {
        // The root itself is always walked, even if it is a dot-directory
        entry.depth() == 0
            || !entry.file_type().is_dir()
            || !self.filter.skips_hidden()
            || !is_hidden(entry.path())
    }

    fn walk(&self, root: &Path, events: &EventSender) -> ScanResult {
        let mut result = ScanResult::default();

        if !root.is_dir() {
            let error = ScanError::DirectoryNotFound {
                path: root.to_path_buf(),
            };
            events.send(Event::Scan(ScanEvent::Error {
                path: root.to_path_buf(),
                message: error.to_string(),
            }));
            result.errors.push(error);
            return result;
        }

        let mut directories_scanned = 0;

        let walker = WalkDir::new(root).sort_by_file_name();

        for entry_result in walker.into_iter().filter_entry(|e| self.should_descend(e)) {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().map(|p| p.to_path_buf()).unwrap_or_default();

                    let error = if e.io_error().map(|e| e.kind())
                        == Some(std::io::ErrorKind::PermissionDenied)
                    {
                        ScanError::PermissionDenied { path: path.clone() }
                    } else {
                        ScanError::ReadDirectory {
                            path: path.clone(),
                            source: std::io::Error::other(e.to_string()),
                        }
                    };

                    events.send(Event::Scan(ScanEvent::Error {
                        path,
                        message: error.to_string(),
                    }));
                    result.errors.push(error);
                    continue;
                }
            };

            let path = entry.path();

            if entry.file_type().is_dir() {
                directories_scanned += 1;
                events.send(Event::Scan(ScanEvent::Progress(ScanProgress {
                    directories_scanned,
                    photos_found: result.photos.len(),
                    current_path: path.to_path_buf(),
                })));
                continue;
            }

            if !self.filter.should_include(path) {
                continue;
            }

            match entry.metadata() {
                Ok(metadata) if metadata.is_file() => {
                    events.send(Event::Scan(ScanEvent::PhotoFound {
                        path: path.to_path_buf(),
                    }));
                    result.photos.push(PhotoFile {
                        path: path.to_path_buf(),
                        size: metadata.len(),
                    });
                }
                Ok(_) => {}
                Err(e) => {
                    let error = ScanError::ReadDirectory {
                        path: path.to_path_buf(),
                        source: std::io::Error::other(e.to_string()),
                    };
                    events.send(Event::Scan(ScanEvent::Error {
                        path: path.to_path_buf(),
                        message: error.to_string(),
                    }));
                    result.errors.push(error);
                }
            }
        }

        result
    }
}

impl PhotoScanner for WalkDirScanner {
    fn scan(&self, root: &Path) -> ScanResult {
        self.scan_with_events(root, &null_sender())
    }

    fn scan_with_events(&self, root: &Path, events: &EventSender) -> ScanResult {
        events.send(Event::Scan(ScanEvent::Started {
            root: root.to_path_buf(),
        }));

        let result = self.walk(root, events);

        events.send(Event::Scan(ScanEvent::Completed {
            total_photos: result.photos.len(),
        }));

        result
    }
}
