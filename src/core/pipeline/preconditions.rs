//! Startup checks run before any file is touched.

use crate::core::metadata::MetadataOracle;
use crate::error::{ConfigError, PreconditionFailures};
use std::fs;
use std::io;
use std::path::Path;

/// Check the oracle, the source root and the destination root.
///
/// Every failing check is collected so the user can fix them all at once.
/// A missing destination only has to be creatable (its nearest existing
/// ancestor must be a directory). It is created once every check has
/// passed, and never in a dry run, so a failed startup touches nothing.
pub fn check_preconditions(
    oracle: &dyn MetadataOracle,
    source: &Path,
    destination: &Path,
    dry_run: bool,
) -> Result<(), PreconditionFailures> {
    let mut failures = Vec::new();

    if let Err(e) = oracle.check_available() {
        failures.push(e);
    }

    if !source.exists() {
        failures.push(ConfigError::SourceNotFound {
            path: source.to_path_buf(),
        });
    } else if !source.is_dir() {
        failures.push(ConfigError::SourceNotDirectory {
            path: source.to_path_buf(),
        });
    }

    if let Err(e) = check_destination(destination) {
        failures.push(e);
    }

    if !failures.is_empty() {
        return Err(PreconditionFailures(failures));
    }

    if !dry_run && !destination.exists() {
        fs::create_dir_all(destination).map_err(|source| {
            PreconditionFailures(vec![ConfigError::DestinationUncreatable {
                path: destination.to_path_buf(),
                source,
            }])
        })?;
    }

    Ok(())
}

fn check_destination(destination: &Path) -> Result<(), ConfigError> {
    if destination.exists() {
        return if destination.is_dir() {
            Ok(())
        } else {
            Err(ConfigError::DestinationNotDirectory {
                path: destination.to_path_buf(),
            })
        };
    }

    // A relative path's last ancestor is "", which stands for the working directory
    let ancestor = destination
        .ancestors()
        .skip(1)
        .map(|a| if a.as_os_str().is_empty() { Path::new(".") } else { a })
        .find(|a| a.exists());

    let result = match ancestor {
        Some(ancestor) if ancestor.is_dir() => Ok(()),
        Some(ancestor) => Err(io::Error::other(format!(
            "{} is not a directory",
            ancestor.display()
        ))),
        None => Err(io::Error::new(io::ErrorKind::NotFound, "no existing parent directory")),
    };

    result.map_err(|source| ConfigError::DestinationUncreatable {
        path: destination.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::metadata::RawMetadataRecord;
    use crate::error::MetadataError;
    use std::path::PathBuf;
    use tempfile::TempDir;

    struct Oracle {
        available: bool,
    }

    impl MetadataOracle for Oracle {
        fn extract_tags(&self, _path: &Path) -> Result<RawMetadataRecord, MetadataError> {
            Ok(RawMetadataRecord::new())
        }

        fn check_available(&self) -> Result<(), ConfigError> {
            if self.available {
                Ok(())
            } else {
                Err(ConfigError::ToolNotFound {
                    path: PathBuf::from("exiftool"),
                })
            }
        }
    }

    #[test]
    fn all_good_creates_missing_destination() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("archive").join("photos");

        check_preconditions(&Oracle { available: true }, temp.path(), &dest, false).unwrap();
        assert!(dest.is_dir());
    }

    #[test]
    fn dry_run_leaves_missing_destination_alone() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("archive");

        check_preconditions(&Oracle { available: true }, temp.path(), &dest, true).unwrap();
        assert!(!dest.exists());
    }

    #[test]
    fn every_failure_is_reported() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("not_a_dir");
        fs::write(&blocker, b"file").unwrap();

        let failures = check_preconditions(
            &Oracle { available: false },
            &temp.path().join("missing_source"),
            &blocker.join("archive"),
            false,
        )
        .unwrap_err();

        assert_eq!(failures.0.len(), 3);
        assert!(matches!(failures.0[0], ConfigError::ToolNotFound { .. }));
        assert!(matches!(failures.0[1], ConfigError::SourceNotFound { .. }));
        assert!(matches!(failures.0[2], ConfigError::DestinationUncreatable { .. }));
    }

    #[test]
    fn failed_startup_leaves_missing_destination_uncreated() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("archive");

        let failures =
            check_preconditions(&Oracle { available: false }, temp.path(), &dest, false)
                .unwrap_err();

        assert_eq!(failures.0.len(), 1);
        assert!(!dest.exists());

        let failures = check_preconditions(
            &Oracle { available: true },
            &temp.path().join("missing_source"),
            &dest,
            false,
        )
        .unwrap_err();

        assert!(matches!(failures.0[0], ConfigError::SourceNotFound { .. }));
        assert!(!dest.exists());
    }

    #[test]
    fn file_as_source_or_destination_is_rejected() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("photo.jpg");
        fs::write(&file, b"jpeg").unwrap();

        let failures =
            check_preconditions(&Oracle { available: true }, &file, &file, false).unwrap_err();

        assert!(matches!(failures.0[0], ConfigError::SourceNotDirectory { .. }));
        assert!(matches!(failures.0[1], ConfigError::DestinationNotDirectory { .. }));
    }
}
