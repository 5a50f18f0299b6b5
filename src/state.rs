use std::path::{Path, PathBuf};
use std::sync::Arc;

use nomina_viewer::config::AppConfig;
use nomina_viewer::data::aggregate::{sort_summaries, summarize, SortKey, TeacherSummary, WorkloadMetrics};
use nomina_viewer::data::cache::LoadCache;
use nomina_viewer::data::filter::{filtered_indices, RowFilter};
use nomina_viewer::data::model::Workload;

use crate::color::ShiftPalette;

/// Which view the central panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Table,
    Cards,
    Chart,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: AppConfig,

    /// Memoized load of the current source file.
    pub cache: LoadCache,

    /// Path of the file currently shown (or last attempted).
    pub source_path: PathBuf,

    /// Loaded snapshot (None until a load succeeds).
    pub workload: Option<Arc<Workload>>,

    /// Search box and shift selection.
    pub filter: RowFilter,

    /// Indices of rows passing the current filter (cached).
    pub visible_indices: Vec<usize>,

    /// Per-teacher totals of the visible rows, in display order.
    pub summaries: Vec<TeacherSummary>,

    pub metrics: WorkloadMetrics,

    pub sort_key: SortKey,
    pub sort_ascending: bool,

    pub view: View,

    /// One colour per distinct shift.
    pub shift_palette: Option<ShiftPalette>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            source_path: config.source_path.clone(),
            config,
            cache: LoadCache::new(),
            workload: None,
            filter: RowFilter::default(),
            visible_indices: Vec::new(),
            summaries: Vec::new(),
            metrics: WorkloadMetrics::default(),
            sort_key: SortKey::File,
            sort_ascending: true,
            view: View::Table,
            shift_palette: None,
            status_message: None,
        }
    }

    /// Load (or re-use the cached) workload at `path`.
    ///
    /// On failure nothing stale stays on screen: the snapshot and every
    /// derived view are cleared and the error becomes the status message.
    pub fn load(&mut self, path: &Path) {
        self.source_path = path.to_path_buf();
        match self.cache.load(path, &self.config.source) {
            Ok(workload) => self.set_workload(workload),
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.workload = None;
                self.visible_indices.clear();
                self.summaries.clear();
                self.metrics = WorkloadMetrics::default();
                self.shift_palette = None;
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Re-read the current source, bypassing the cache.
    pub fn reload(&mut self) {
        self.cache.invalidate();
        let path = self.source_path.clone();
        self.load(&path);
    }

    /// Ingest a loaded snapshot and recompute the derived views.
    pub fn set_workload(&mut self, workload: Arc<Workload>) {
        // Drop selected shifts that the new file does not have.
        self.filter
            .shifts
            .retain(|shift| workload.shifts.contains(shift));
        self.shift_palette = Some(ShiftPalette::new(&workload.shifts));
        self.status_message = (!workload.interleaved.is_empty()).then(|| {
            format!(
                "Warning: {} teacher block(s) are interleaved; filled data may be mixed",
                workload.interleaved.len()
            )
        });
        self.workload = Some(workload);
        self.refilter();
    }

    /// Recompute visible rows, summaries and metrics after a filter change.
    pub fn refilter(&mut self) {
        let Some(workload) = &self.workload else {
            return;
        };
        self.visible_indices = filtered_indices(&workload.rows, &self.filter);
        self.summaries = summarize(self.visible_indices.iter().map(|&i| &workload.rows[i]));
        self.metrics = WorkloadMetrics::from_summaries(&self.summaries);
        sort_summaries(&mut self.summaries, self.sort_key, self.sort_ascending);
    }

    /// Clicking the active column flips direction; a new column sorts ascending.
    pub fn sort_by(&mut self, key: SortKey) {
        if self.sort_key == key {
            self.sort_ascending = !self.sort_ascending;
        } else {
            self.sort_key = key;
            self.sort_ascending = true;
        }
        self.refilter();
    }

    /// Toggle a single shift in the selection.
    pub fn toggle_shift(&mut self, shift: &str) {
        if !self.filter.shifts.remove(shift) {
            self.filter.shifts.insert(shift.to_string());
        }
        self.refilter();
    }

    /// Clear the shift selection (show every shift).
    pub fn clear_shifts(&mut self) {
        self.filter.shifts.clear();
        self.refilter();
    }
}
