//! In-process metadata oracle reading EXIF with `kamadak-exif`.
//!
//! Mirrors the exiftool tag names: EXIF `DateTimeDigitized` is reported as
//! `CreateDate`, and the filesystem modification time as `FileModifyDate`
//! (local time with its UTC offset, as exiftool prints it).

use super::{MetadataOracle, MetadataTag, RawMetadataRecord};
use crate::error::MetadataError;
use ::exif::{In, Reader, Tag, Value};
use chrono::{DateTime, Local};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// Reads EXIF timestamps directly from the file
#[derive(Debug, Clone, Default)]
pub struct ExifOracle;

impl ExifOracle {
    pub fn new() -> Self {
        Self
    }
}

impl MetadataOracle for ExifOracle {
    fn extract_tags(&self, path: &Path) -> Result<RawMetadataRecord, MetadataError> {
        let file = File::open(path).map_err(|e| MetadataError::Unreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut record = RawMetadataRecord::new();

        let mut bufreader = BufReader::new(&file);
        match Reader::new().read_from_container(&mut bufreader) {
            Ok(exif) => {
                for (tag, exif_tag) in [
                    (MetadataTag::DateTimeOriginal, Tag::DateTimeOriginal),
                    (MetadataTag::CreateDate, Tag::DateTimeDigitized),
                ] {
                    if let Some(value) = exif
                        .get_field(exif_tag, In::PRIMARY)
                        .and_then(|field| get_string_value(&field.value))
                    {
                        record = record.with(tag, value);
                    }
                }
            }
            Err(e) => {
                debug!(path = %path.display(), error = %e, "no EXIF container");
            }
        }

        if let Ok(modified) = fs::metadata(path).and_then(|m| m.modified()) {
            let local: DateTime<Local> = modified.into();
            record = record.with(
                MetadataTag::FileModifyDate,
                local.format("%Y:%m:%d %H:%M:%S%:z").to_string(),
            );
        }

        Ok(record)
    }
}

/// Helper to extract string from EXIF ASCII value
fn get_string_value(value: &Value) -> Option<String> {
    if let Value::Ascii(ref vec) = value {
        if let Some(bytes) = vec.first() {
            if let Ok(s) = std::str::from_utf8(bytes) {
                let trimmed = s.trim_end_matches('\0').trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn nonexistent_file_is_unreadable() {
        let result = ExifOracle::new().extract_tags(Path::new("/nonexistent/file.jpg"));
        assert!(matches!(result, Err(MetadataError::Unreadable { .. })));
    }

    #[test]
    fn file_without_exif_still_reports_modify_date() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plain.png");
        File::create(&path)
            .unwrap()
            .write_all(b"not really a png")
            .unwrap();

        let record = ExifOracle::new().extract_tags(&path).unwrap();
        assert_eq!(record.get(MetadataTag::DateTimeOriginal), None);
        assert_eq!(record.get(MetadataTag::CreateDate), None);
        assert!(record.get(MetadataTag::FileModifyDate).is_some());
    }

    #[test]
    fn ascii_values_are_trimmed() {
        let value = Value::Ascii(vec![b"2023:05:14 10:30:00\0".to_vec()]);
        assert_eq!(
            get_string_value(&value),
            Some("2023:05:14 10:30:00".to_string())
        );
        assert_eq!(get_string_value(&Value::Ascii(vec![b"  ".to_vec()])), None);
        assert_eq!(get_string_value(&Value::Short(vec![1])), None);
    }
}
