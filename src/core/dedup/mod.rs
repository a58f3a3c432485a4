//! # Dedup Module
//!
//! Content-addressed duplicate detection.
//!
//! Every file is fingerprinted with SHA-256 over its full byte content,
//! streamed in fixed-size chunks so large RAW files never sit in memory.
//! The set of known fingerprints is seeded from the destination tree and
//! grows as files are archived, so a photo is archived at most once no
//! matter how many copies of it the source holds.

use crate::core::scanner::{PhotoScanner, ScanConfig, WalkDirScanner};
use crate::error::FingerprintError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use tracing::{debug, warn};

const CHUNK_SIZE: usize = 64 * 1024;

/// SHA-256 digest of a file's bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentFingerprint([u8; 32]);

impl ContentFingerprint {
    /// Fingerprint everything `reader` yields
    pub fn from_reader<R: Read>(mut reader: R) -> std::io::Result<Self> {
        let mut hasher = Sha256::new();
        let mut buffer = vec![0u8; CHUNK_SIZE];

        loop {
            match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => hasher.update(&buffer[..n]),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }

        let mut digest = [0u8; 32];
        digest.copy_from_slice(&hasher.finalize());
        Ok(Self(digest))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

impl fmt::Display for ContentFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Fingerprint the file at `path`
pub fn fingerprint(path: &Path) -> Result<ContentFingerprint, FingerprintError> {
    let io_error = |source| FingerprintError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_error)?;
    ContentFingerprint::from_reader(file).map_err(io_error)
}

/// Fingerprints already present at the destination or archived this run
#[derive(Debug, Default)]
pub struct ContentDeduplicator {
    known: HashSet<ContentFingerprint>,
}

impl ContentDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fingerprint every eligible file under `root`.
    ///
    /// Files that cannot be read are logged and left out. Returns the
    /// number of fingerprints added.
    pub fn seed_from(&mut self, root: &Path, config: &ScanConfig) -> usize {
        if !root.is_dir() {
            return 0;
        }

        let scanner = WalkDirScanner::new(config.clone());
        let scan = scanner.scan(root);
        for error in &scan.errors {
            warn!(error = %error, "skipping unreadable destination entry");
        }

        let before = self.known.len();
        for photo in scan.photos {
            match fingerprint(&photo.path) {
                Ok(fp) => {
                    self.known.insert(fp);
                }
                Err(e) => warn!(error = %e, "cannot fingerprint existing archive file"),
            }
        }

        let added = self.known.len() - before;
        debug!(root = %root.display(), added, "seeded known fingerprints");
        added
    }

    pub fn is_known(&self, fingerprint: &ContentFingerprint) -> bool {
        self.known.contains(fingerprint)
    }

    /// Record a fingerprint. Returns `false` if it was already known.
    pub fn mark_known(&mut self, fingerprint: ContentFingerprint) -> bool {
        self.known.insert(fingerprint)
    }

    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }
}
