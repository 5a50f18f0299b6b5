use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use super::loader::{load_workload, LoadError, SourceOptions};
use super::model::Workload;

/// Identity of one version of the source file under one set of options.
#[derive(Debug, Clone, PartialEq)]
struct CacheKey {
    path: PathBuf,
    modified: Option<SystemTime>,
    len: u64,
    options: SourceOptions,
}

impl CacheKey {
    fn probe(path: &Path, options: &SourceOptions) -> Result<Self, LoadError> {
        let meta = std::fs::metadata(path).map_err(|source| LoadError::SourceNotFound {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(CacheKey {
            path: path.to_path_buf(),
            modified: meta.modified().ok(),
            len: meta.len(),
            options: options.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// LoadCache
// ---------------------------------------------------------------------------

/// Memoizes the last successful load.
///
/// A hit requires the same path and options and an unchanged modification
/// time and size. The snapshot is handed out as an `Arc`, so a reload
/// replaces it wholesale and holders of the old one keep a consistent view.
#[derive(Debug, Default)]
pub struct LoadCache {
    entry: Option<(CacheKey, Arc<Workload>)>,
}

impl LoadCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached workload or load it from disk.
    pub fn load(&mut self, path: &Path, options: &SourceOptions) -> Result<Arc<Workload>, LoadError> {
        let key = match CacheKey::probe(path, options) {
            Ok(key) => key,
            Err(e) => {
                self.entry = None;
                return Err(e);
            }
        };

        if let Some((cached, workload)) = &self.entry {
            if *cached == key {
                log::debug!("Cache hit for {}", path.display());
                return Ok(Arc::clone(workload));
            }
        }

        match load_workload(path, options) {
            Ok(workload) => {
                let workload = Arc::new(workload);
                self.entry = Some((key, Arc::clone(&workload)));
                Ok(workload)
            }
            Err(e) => {
                self.entry = None;
                Err(e)
            }
        }
    }

    /// Forget the cached snapshot so the next `load` reads the file.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn is_cached(&self, path: &Path) -> bool {
        self.entry
            .as_ref()
            .is_some_and(|(key, _)| key.path == path)
    }
}
