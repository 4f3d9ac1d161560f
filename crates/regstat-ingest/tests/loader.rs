//! Integration tests for folder loading and caching.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use polars::prelude::{DataFrame, DataType};
use tempfile::TempDir;

use regstat_ingest::{
    CsvFolderSource, DatasetCache, FragmentSource, IngestError, Result, SchemaViolation,
    dataset_schema, load_folder,
};
use regstat_model::Dataset;

/// Counts every list and read call made through it.
#[derive(Default)]
struct CountingSource {
    inner: CsvFolderSource,
    lists: AtomicUsize,
    reads: AtomicUsize,
}

impl CountingSource {
    fn io_calls(&self) -> usize {
        self.lists.load(Ordering::SeqCst) + self.reads.load(Ordering::SeqCst)
    }
}

impl FragmentSource for CountingSource {
    fn list(&self, folder: &Path) -> Result<Vec<PathBuf>> {
        self.lists.fetch_add(1, Ordering::SeqCst);
        self.inner.list(folder)
    }

    fn read(&self, path: &Path) -> Result<DataFrame> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.read(path)
    }
}

fn write_file(dir: &Path, name: &str, contents: &[u8]) {
    std::fs::write(dir.join(name), contents).unwrap();
}

/// UTF-16 content the reader refuses.
const UNREADABLE: &[u8] = &[0xFF, 0xFE, b's', 0x00, b't', 0x00];

#[test]
fn missing_folder_yields_empty_table() {
    let dir = TempDir::new().unwrap();
    let loaded = load_folder(&CsvFolderSource, &dir.path().join("does_not_exist"));

    assert_eq!(loaded.table.height(), 0);
    assert_eq!(loaded.table.width(), 0);
    assert!(loaded.warnings.is_empty());
}

#[test]
fn folder_without_csv_files_yields_empty_table() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "readme.txt", b"not data");

    let loaded = load_folder(&CsvFolderSource, dir.path());

    assert!(loaded.is_empty());
    assert_eq!(loaded.table.width(), 0);
    assert!(loaded.files.is_empty());
}

#[test]
fn valid_files_are_concatenated_and_invalid_files_warned() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "a.csv", b"state,district,bio_age_5_17\nGoa,North Goa,3\nGoa,South Goa,4\n");
    write_file(dir.path(), "b.csv", UNREADABLE);
    write_file(dir.path(), "c.csv", b"state,district,bio_age_5_17\nKerala,Idukki,9\n");
    write_file(dir.path(), "d.csv", UNREADABLE);

    let loaded = load_folder(&CsvFolderSource, dir.path());

    assert_eq!(loaded.row_count(), 3);
    assert_eq!(loaded.files.len(), 2);
    assert_eq!(loaded.warnings.len(), 2);
    assert!(loaded.warnings[0].path.ends_with("b.csv"));
    assert!(matches!(
        loaded.warnings[0].error,
        IngestError::UnsupportedEncoding { .. }
    ));
    assert!(loaded.warnings[1].to_string().starts_with("Failed to load"));
}

#[test]
fn all_failing_folder_yields_empty_table() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "broken.csv", UNREADABLE);

    let loaded = load_folder(&CsvFolderSource, dir.path());

    assert_eq!(loaded.table.height(), 0);
    assert_eq!(loaded.table.width(), 0);
    assert_eq!(loaded.warnings.len(), 1);
}

#[test]
fn fragments_with_different_columns_union() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "1.csv", b"state,age_0_5\nGoa,1\n");
    write_file(dir.path(), "2.csv", b"state,age_5_17\nGoa,2\nGoa,3\n");

    let loaded = load_folder(&CsvFolderSource, dir.path());

    assert_eq!(loaded.row_count(), 3);
    let names: Vec<String> = loaded
        .table
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    assert_eq!(names, vec!["state", "age_0_5", "age_5_17"]);
}

#[test]
fn header_only_file_keeps_numeric_columns_numeric() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "a.csv", b"state,district,age_0_5\n");
    write_file(dir.path(), "b.csv", b"state,district,age_0_5\nGoa,North Goa,9\nGoa,South Goa,10\n");

    let loaded = load_folder(&CsvFolderSource, dir.path());

    assert!(loaded.warnings.is_empty());
    assert_eq!(loaded.row_count(), 2);
    assert_eq!(loaded.table.column("age_0_5").unwrap().dtype(), &DataType::Int64);
    assert_eq!(loaded.table.column("district").unwrap().dtype(), &DataType::String);
}

#[test]
fn cache_reads_each_folder_once() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "a.csv", b"age_0_5\n1\n2\n");
    write_file(dir.path(), "b.csv", b"age_0_5\n3\n");

    let cache = DatasetCache::with_source(CountingSource::default());

    let first = cache.load(dir.path());
    let calls_after_first = cache.source().io_calls();
    let second = cache.load(dir.path());

    assert_eq!(calls_after_first, 3);
    assert_eq!(cache.source().io_calls(), calls_after_first);
    assert!(first.table.equals_missing(&second.table));
    assert_eq!(cache.len(), 1);
}

#[test]
fn cache_remembers_empty_folders() {
    let dir = TempDir::new().unwrap();
    let cache = DatasetCache::with_source(CountingSource::default());

    cache.load(dir.path());
    cache.load(dir.path());

    assert_eq!(cache.source().io_calls(), 1);
}

#[test]
fn invalidate_forces_reload() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "a.csv", b"age_0_5\n1\n");

    let cache = DatasetCache::with_source(CountingSource::default());
    assert_eq!(cache.load(dir.path()).row_count(), 1);

    write_file(dir.path(), "b.csv", b"age_0_5\n5\n");
    // Still cached
    assert_eq!(cache.load(dir.path()).row_count(), 1);

    assert!(cache.invalidate(dir.path()));
    assert!(!cache.invalidate(dir.path()));
    assert_eq!(cache.load(dir.path()).row_count(), 2);
    assert_eq!(cache.source().io_calls(), 5);
}

#[test]
fn clear_empties_cache() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    let cache = DatasetCache::new();

    cache.load(first.path());
    cache.load(second.path());
    assert_eq!(cache.len(), 2);

    cache.clear();
    assert!(cache.is_empty());
    assert!(cache.get(first.path()).is_none());
}

#[test]
fn load_with_schema_reports_violations() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "bio.csv", b"state,bio_age_5_17\nGoa,3\n");

    let cache = DatasetCache::new();
    let err = cache
        .load_with_schema(dir.path(), &dataset_schema(Dataset::Biometric))
        .unwrap_err();

    match err {
        IngestError::SchemaMismatch { violations, .. } => assert_eq!(
            violations,
            vec![SchemaViolation::MissingColumn {
                column: "district".to_string()
            }]
        ),
        other => panic!("unexpected error: {other}"),
    }
    // The table is cached regardless.
    assert!(cache.get(dir.path()).is_some());
}

#[test]
fn load_with_schema_accepts_matching_table() {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "enrol.csv",
        b"state,age_0_5,age_5_17,age_18_greater\nGoa,1,2,3\n",
    );

    let cache = DatasetCache::new();
    let loaded = cache
        .load_with_schema(dir.path(), &dataset_schema(Dataset::Enrolment))
        .unwrap();

    assert_eq!(loaded.row_count(), 1);
}
