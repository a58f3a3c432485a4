//! Integration tests for the archive pipeline.
//!
//! These tests run whole archive passes against temporary directories with
//! a scripted metadata oracle, so no exiftool install is needed:
//! - Dating from metadata and from file names
//! - Content deduplication within a run and against the archive
//! - Undatable photos
//! - Startup checks

use assert_fs::prelude::*;
use assert_fs::TempDir;
use photo_archiver::core::metadata::{MetadataOracle, MetadataTag, RawMetadataRecord};
use photo_archiver::core::pipeline::{FileOutcome, Pipeline, SkipReason};
use photo_archiver::core::resolver::DateSource;
use photo_archiver::error::{ArchiveError, ConfigError, MetadataError};
use photo_archiver::events::{Event, EventChannel, FileEvent, PipelineEvent};
use predicates::prelude::*;
use std::collections::HashMap;
use std::path::Path;

/// Oracle that answers from a table keyed by file name and fails otherwise,
/// like exiftool does for a file it cannot read.
#[derive(Default)]
struct ScriptedOracle {
    records: HashMap<String, RawMetadataRecord>,
}

impl ScriptedOracle {
    fn tag(mut self, file_name: &str, tag: MetadataTag, value: &str) -> Self {
        let record = self.records.remove(file_name).unwrap_or_default();
        self.records
            .insert(file_name.to_string(), record.with(tag, value));
        self
    }
}

impl MetadataOracle for ScriptedOracle {
    fn extract_tags(&self, path: &Path) -> Result<RawMetadataRecord, MetadataError> {
        let name = path.file_name().unwrap().to_string_lossy();
        self.records
            .get(&*name)
            .cloned()
            .ok_or_else(|| MetadataError::Malformed {
                path: path.to_path_buf(),
                reason: "not scripted".to_string(),
            })
    }
}

/// Oracle whose tool is never available
struct MissingTool;

impl MetadataOracle for MissingTool {
    fn extract_tags(&self, path: &Path) -> Result<RawMetadataRecord, MetadataError> {
        Err(MetadataError::EmptyOutput {
            path: path.to_path_buf(),
        })
    }

    fn check_available(&self) -> Result<(), ConfigError> {
        Err(ConfigError::ToolNotFound {
            path: "/opt/exiftool/exiftool".into(),
        })
    }
}

fn pipeline(source: &TempDir, dest: &TempDir, oracle: impl MetadataOracle + 'static) -> Pipeline {
    Pipeline::builder()
        .source(source.path())
        .destination(dest.path())
        .oracle(Box::new(oracle))
        .build()
}

#[test]
fn photo_is_named_from_date_time_original() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    source.child("holiday").create_dir_all().unwrap();
    source.child("holiday/photo.JPG").write_binary(b"jpeg bytes").unwrap();

    let oracle = ScriptedOracle::default().tag(
        "photo.JPG",
        MetadataTag::DateTimeOriginal,
        "2023:05:14 10:30:00",
    );
    let report = pipeline(&source, &dest, oracle).run().unwrap();

    let archived = dest.child("2023/05/2023-05-14_10-30_001.jpg");
    archived.assert(predicate::path::is_file());
    archived.assert(predicate::path::eq_file(source.child("holiday/photo.JPG").path()));
    source.child("holiday/photo.JPG").assert(predicate::path::exists());

    assert_eq!(report.summary.archived, 1);
    assert!(matches!(
        &report.archived().next().unwrap().outcome,
        FileOutcome::Archived { date, .. }
            if date.source == DateSource::Metadata(MetadataTag::DateTimeOriginal)
    ));
}

#[test]
fn photo_without_metadata_is_dated_from_its_name() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    source
        .child("IMG_2022-01-09_party.png")
        .write_binary(b"png bytes")
        .unwrap();

    let report = pipeline(&source, &dest, ScriptedOracle::default())
        .run()
        .unwrap();

    dest.child("2022/01/2022-01-09_00-00_001.png")
        .assert(predicate::path::is_file());
    assert_eq!(report.summary.archived, 1);
}

#[test]
fn identical_content_is_archived_once() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    source.child("a/first.jpg").write_binary(b"same bytes").unwrap();
    source.child("b/second_copy.jpeg").write_binary(b"same bytes").unwrap();

    let oracle = ScriptedOracle::default()
        .tag("first.jpg", MetadataTag::DateTimeOriginal, "2021:03:01 09:00:00")
        .tag("second_copy.jpeg", MetadataTag::CreateDate, "2024:12:24 20:00:00");
    let report = pipeline(&source, &dest, oracle).run().unwrap();

    assert_eq!(report.summary.archived, 1);
    assert_eq!(report.summary.duplicates, 1);
    dest.child("2021/03/2021-03-01_09-00_001.jpg")
        .assert(predicate::path::is_file());
    dest.child("2024").assert(predicate::path::missing());
}

#[test]
fn undatable_photo_is_left_uncopied_and_reported() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    source.child("beach.jpg").write_binary(b"no date anywhere").unwrap();

    let report = pipeline(&source, &dest, ScriptedOracle::default())
        .run()
        .unwrap();

    assert_eq!(report.summary.no_date, 1);
    assert_eq!(report.files[0].skip_reason(), Some(&SkipReason::NoDate));
    assert!(report.files[0].source.ends_with("beach.jpg"));
    assert_eq!(std::fs::read_dir(dest.path()).unwrap().count(), 0);
}

#[test]
fn second_run_skips_everything_already_archived() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    source.child("a.jpg").write_binary(b"one").unwrap();
    source.child("b.jpg").write_binary(b"two").unwrap();

    let oracle = || {
        ScriptedOracle::default()
            .tag("a.jpg", MetadataTag::DateTimeOriginal, "2020:06:01 12:00:00")
            .tag("b.jpg", MetadataTag::DateTimeOriginal, "2020:06:01 13:00:00")
    };

    let first = pipeline(&source, &dest, oracle()).run().unwrap();
    assert_eq!(first.summary.archived, 2);

    let second = pipeline(&source, &dest, oracle()).run().unwrap();
    assert_eq!(second.known_at_start, 2);
    assert_eq!(second.summary.archived, 0);
    assert_eq!(second.summary.duplicates, 2);
}

#[test]
fn new_photo_on_rerun_restarts_day_numbering() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    dest.child("2020/06/2020-06-01_12-00_001.jpg")
        .write_binary(b"archived earlier")
        .unwrap();
    dest.child("2020/06/2020-06-01_12-00_002.jpg")
        .write_binary(b"also archived earlier")
        .unwrap();
    source.child("late.jpg").write_binary(b"new photo").unwrap();

    let oracle = ScriptedOracle::default().tag(
        "late.jpg",
        MetadataTag::DateTimeOriginal,
        "2020:06:01 12:00:00",
    );
    let report = pipeline(&source, &dest, oracle).run().unwrap();

    // The counter starts at 001 again, whose name is taken
    assert_eq!(report.files[0].skip_reason(), Some(&SkipReason::TargetExists));
    dest.child("2020/06/2020-06-01_12-00_001.jpg")
        .assert("archived earlier");
    dest.child("2020/06/2020-06-01_12-00_003.jpg")
        .assert(predicate::path::missing());
}

#[test]
fn negative_offset_in_file_modify_date_is_dropped() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    source.child("scan.tif").write_binary(b"tiff").unwrap();

    let oracle = ScriptedOracle::default()
        .tag("scan.tif", MetadataTag::DateTimeOriginal, "0000:00:00 00:00:00")
        .tag("scan.tif", MetadataTag::FileModifyDate, "2019:11:30 22:15:09-05:00");
    pipeline(&source, &dest, oracle).run().unwrap();

    dest.child("2019/11/2019-11-30_22-15_001.tif")
        .assert(predicate::path::is_file());
}

#[test]
fn ineligible_files_are_never_visited() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    source.child("2020-01-01 notes.txt").write_str("notes").unwrap();
    source.child("2020-01-01 clip.mp4").write_binary(b"video").unwrap();

    let report = pipeline(&source, &dest, ScriptedOracle::default())
        .run()
        .unwrap();

    assert!(report.files.is_empty());
}

#[test]
fn hidden_photos_are_archived_by_default() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    source
        .child(".import/IMG_2022-01-09.jpg")
        .write_binary(b"imported")
        .unwrap();
    source
        .child(".IMG_2022-01-10.jpg")
        .write_binary(b"dot file")
        .unwrap();

    let report = pipeline(&source, &dest, ScriptedOracle::default())
        .run()
        .unwrap();

    assert_eq!(report.summary.total_photos, 2);
    assert_eq!(report.summary.archived, 2);
    dest.child("2022/01/2022-01-09_00-00_001.jpg")
        .assert(predicate::path::is_file());
    dest.child("2022/01/2022-01-10_00-00_001.jpg")
        .assert(predicate::path::is_file());
}

#[test]
fn hidden_photos_can_be_skipped() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    source
        .child(".import/IMG_2022-01-09.jpg")
        .write_binary(b"imported")
        .unwrap();
    source
        .child("IMG_2022-01-11.jpg")
        .write_binary(b"visible")
        .unwrap();

    let report = Pipeline::builder()
        .source(source.path())
        .destination(dest.path())
        .oracle(Box::new(ScriptedOracle::default()))
        .skip_hidden(true)
        .build()
        .run()
        .unwrap();

    assert_eq!(report.summary.total_photos, 1);
    dest.child("2022/01/2022-01-11_00-00_001.jpg")
        .assert(predicate::path::is_file());
    dest.child("2022/01/2022-01-09_00-00_001.jpg")
        .assert(predicate::path::missing());
}

#[test]
fn all_startup_problems_are_reported_together() {
    let dest = TempDir::new().unwrap();
    let blocker = dest.child("occupied");
    blocker.write_str("a file, not a directory").unwrap();

    let result = Pipeline::builder()
        .source("/nonexistent/inbox")
        .destination(blocker.path())
        .oracle(Box::new(MissingTool))
        .build()
        .run();

    match result {
        Err(ArchiveError::Preconditions(failures)) => {
            assert_eq!(failures.0.len(), 3);
            let message = failures.to_string();
            assert!(message.contains("/opt/exiftool/exiftool"));
            assert!(message.contains("/nonexistent/inbox"));
            assert!(message.contains("occupied"));
        }
        other => panic!("expected precondition failures, got {:?}", other.map(|r| r.summary)),
    }
}

#[test]
fn events_report_each_decision() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    source.child("IMG_20180704.jpg").write_binary(b"fireworks").unwrap();
    source.child("untitled.jpg").write_binary(b"mystery").unwrap();

    let (sender, receiver) = EventChannel::new();
    pipeline(&source, &dest, ScriptedOracle::default())
        .run_with_events(&sender)
        .unwrap();
    drop(sender);

    let mut archived = 0;
    let mut skipped = Vec::new();
    let mut completed = false;
    for event in receiver.iter() {
        match event {
            Event::File(FileEvent::Archived { date_source, .. }) => {
                assert_eq!(date_source, DateSource::FileName);
                archived += 1;
            }
            Event::File(FileEvent::Skipped { reason, .. }) => skipped.push(reason),
            Event::Pipeline(PipelineEvent::Completed { summary }) => {
                assert_eq!(summary.total_photos, 2);
                completed = true;
            }
            _ => {}
        }
    }

    assert_eq!(archived, 1);
    assert_eq!(skipped, vec![SkipReason::NoDate]);
    assert!(completed);
}
