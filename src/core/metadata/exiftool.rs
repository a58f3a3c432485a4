//! Metadata oracle backed by the external `exiftool` program.

use super::{MetadataOracle, MetadataTag, RawMetadataRecord};
use crate::error::{ConfigError, MetadataError};
use serde_json::{Map, Value};
use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Runs `exiftool -json -DateTimeOriginal -CreateDate -FileModifyDate <file>`
#[derive(Debug, Clone)]
pub struct ExifToolOracle {
    executable: PathBuf,
}

impl ExifToolOracle {
    /// Use the given executable. A bare name such as `exiftool` is looked
    /// up on `PATH`.
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Resolve the executable to an existing file
    pub fn locate(&self) -> Option<PathBuf> {
        if self.executable.components().count() > 1 {
            return self.executable.is_file().then(|| self.executable.clone());
        }

        let search_path = env::var_os("PATH")?;
        env::split_paths(&search_path)
            .map(|dir| dir.join(&self.executable))
            .find(|candidate| candidate.is_file())
    }

    /// Parse exiftool's JSON output: a one-element array of objects keyed
    /// by tag name. Non-string values are ignored.
    fn parse_output(path: &Path, stdout: &[u8]) -> Result<RawMetadataRecord, MetadataError> {
        if stdout.iter().all(u8::is_ascii_whitespace) {
            return Err(MetadataError::EmptyOutput {
                path: path.to_path_buf(),
            });
        }

        let entries: Vec<Map<String, Value>> =
            serde_json::from_slice(stdout).map_err(|e| MetadataError::Malformed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let first = entries.into_iter().next().ok_or_else(|| MetadataError::Malformed {
            path: path.to_path_buf(),
            reason: "empty result array".to_string(),
        })?;

        let mut record = RawMetadataRecord::new();
        for tag in MetadataTag::PRIORITY {
            if let Some(Value::String(value)) = first.get(tag.as_str()) {
                record = record.with(tag, value.as_str());
            }
        }

        Ok(record)
    }
}

impl Default for ExifToolOracle {
    fn default() -> Self {
        Self::new("exiftool")
    }
}

impl MetadataOracle for ExifToolOracle {
    fn extract_tags(&self, path: &Path) -> Result<RawMetadataRecord, MetadataError> {
        let mut command = Command::new(&self.executable);
        command.arg("-json");
        for tag in MetadataTag::PRIORITY {
            command.arg(format!("-{}", tag.as_str()));
        }

        let output = command
            .arg(path)
            .output()
            .map_err(|source| MetadataError::Spawn {
                tool: self.executable.clone(),
                source,
            })?;

        // exiftool exits non-zero for partially readable files but still
        // prints what it found, so the status alone is not decisive.
        if !output.status.success() {
            debug!(path = %path.display(), status = %output.status, "exiftool reported an error");
        }

        Self::parse_output(path, &output.stdout)
    }

    fn check_available(&self) -> Result<(), ConfigError> {
        match self.locate() {
            Some(_) => Ok(()),
            None => Err(ConfigError::ToolNotFound {
                path: self.executable.clone(),
            }),
        }
    }
}
