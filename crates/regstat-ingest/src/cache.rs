//! Memoized folder loads.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::error::{IngestError, Result};
use crate::loader::{LoadedTable, load_folder};
use crate::schema::DatasetSchema;
use crate::source::{CsvFolderSource, FragmentSource};

/// Loads each folder at most once for the cache's lifetime.
///
/// Entries are keyed by the folder path exactly as given. Two threads missing
/// on the same path at once will both load it; the later insert wins and
/// both results are equivalent.
#[derive(Debug, Default)]
pub struct DatasetCache<S = CsvFolderSource> {
    source: S,
    entries: RwLock<HashMap<PathBuf, Arc<LoadedTable>>>,
}

impl DatasetCache<CsvFolderSource> {
    /// Cache over CSV files on disk.
    pub fn new() -> Self {
        Self::with_source(CsvFolderSource)
    }
}

impl<S: FragmentSource> DatasetCache<S> {
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the table for `folder`, loading it on first use.
    pub fn load(&self, folder: &Path) -> Arc<LoadedTable> {
        if let Some(hit) = self.get(folder) {
            tracing::debug!(folder = %folder.display(), "dataset cache hit");
            return hit;
        }

        let loaded = Arc::new(load_folder(&self.source, folder));
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(folder.to_path_buf(), Arc::clone(&loaded));
        }
        loaded
    }

    /// Loads `folder` and checks it against `schema`.
    ///
    /// The table stays cached even when it fails validation.
    pub fn load_with_schema(
        &self,
        folder: &Path,
        schema: &DatasetSchema,
    ) -> Result<Arc<LoadedTable>> {
        let loaded = self.load(folder);
        let violations = schema.validate(&loaded.table);
        if violations.is_empty() {
            Ok(loaded)
        } else {
            Err(IngestError::SchemaMismatch {
                path: folder.to_path_buf(),
                violations,
            })
        }
    }

    /// Returns the cached table without loading.
    pub fn get(&self, folder: &Path) -> Option<Arc<LoadedTable>> {
        self.entries
            .read()
            .ok()
            .and_then(|entries| entries.get(folder).cloned())
    }

    /// Drops the entry for `folder`; the next `load` reads it again.
    ///
    /// Returns true if an entry was present.
    pub fn invalidate(&self, folder: &Path) -> bool {
        self.entries
            .write()
            .map(|mut entries| entries.remove(folder).is_some())
            .unwrap_or(false)
    }

    /// Drops every entry.
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
