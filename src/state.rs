use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::DashboardConfig;
use crate::data::aggregate::{compute_all, AggregateView, Insight};
use crate::data::error::{LoadError, SchemaGap};
use crate::data::filter::{filtered_indices, FilterCriteria, FilterOptions, FilteredView};
use crate::data::loader;
use crate::data::model::{Dataset, DatasetSummary};

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// The one status line shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    fn success(text: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    fn warning(text: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Warning,
            text: text.into(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Session – one dataset and everything derived from it
// ---------------------------------------------------------------------------

/// Insight results in presentation order.
pub type Insights = Vec<(Insight, Result<AggregateView, SchemaGap>)>;

/// A loaded dataset together with all of its derived views.  Built in one go
/// and replaced in one go, so no view can outlive the data it came from.
#[derive(Debug, Clone)]
pub struct Session {
    pub dataset: Dataset,
    /// File name or path the dataset came from.
    pub source: String,
    pub summary: DatasetSummary,
    pub insights: Insights,
    pub options: FilterOptions,
    /// `None` only when some filter column has no values at all.
    pub criteria: Option<FilterCriteria>,
    /// Indices of rows matching `criteria` (cached).
    pub visible_indices: Vec<usize>,
}

impl Session {
    pub fn new(dataset: Dataset, source: String, preview_rows: usize) -> Self {
        let summary = dataset.summary(preview_rows);
        let insights = compute_all(&dataset);
        let options = FilterOptions::from_dataset(&dataset);
        let criteria = options.default_criteria();

        let mut session = Session {
            dataset,
            source,
            summary,
            insights,
            options,
            criteria,
            visible_indices: Vec::new(),
        };
        session.refilter();
        session
    }

    /// Recompute `visible_indices` after a criteria change.
    fn refilter(&mut self) {
        self.visible_indices = match &self.criteria {
            Some(c) => filtered_indices(&self.dataset, c),
            None => Vec::new(),
        };
    }

    pub fn filtered_view(&self) -> FilteredView<'_> {
        FilteredView::from_indices(&self.dataset, self.visible_indices.clone())
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded dataset and its views (None until a file loads).
    pub session: Option<Session>,

    /// Status message shown in the UI.
    pub notice: Option<Notice>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            session: None,
            notice: None,
        }
    }

    /// Startup: try the configured default dataset, otherwise ask for one.
    pub fn load_default(&mut self) {
        let path = self.config.default_dataset.clone();
        match loader::load_default(&path) {
            Ok(Some(dataset)) => {
                self.set_dataset(dataset, path.display().to_string());
                self.notice = Some(Notice::success(format!(
                    "Loaded default dataset {}",
                    path.display()
                )));
            }
            Ok(None) => {
                log::warn!("No dataset at {}", path.display());
                self.notice = Some(Notice::warning("Please upload a CSV file to continue."));
            }
            Err(e) => self.load_failed(&path.display().to_string(), &e),
        }
    }

    /// Load a file chosen by the user.  On failure the current session stays.
    pub fn load_from_path(&mut self, path: &Path) {
        let source = path.display().to_string();
        match loader::load_path(path) {
            Ok(dataset) => {
                self.set_dataset(dataset, source);
                self.notice = None;
            }
            Err(e) => self.load_failed(&source, &e),
        }
    }

    /// Load uploaded bytes, e.g. a file dropped onto the window.
    pub fn load_from_bytes(&mut self, name: &str, bytes: &[u8]) {
        match loader::load_bytes(bytes) {
            Ok(dataset) => {
                self.set_dataset(dataset, name.to_string());
                self.notice = None;
            }
            Err(e) => self.load_failed(name, &e),
        }
    }

    fn load_failed(&mut self, source: &str, err: &LoadError) {
        log::error!("Failed to load {source}: {err}");
        self.notice = Some(Notice::error(format!("Could not load {source}: {err}")));
    }

    /// Ingest a newly loaded dataset; every derived view is rebuilt with it.
    pub fn set_dataset(&mut self, dataset: Dataset, source: String) {
        log::info!(
            "Loaded {} job postings with columns {:?} from {source}",
            dataset.len(),
            dataset.columns
        );
        self.session = Some(Session::new(dataset, source, self.config.preview_rows));
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        if let Some(session) = &mut self.session {
            session.criteria = Some(criteria);
            session.refilter();
        }
    }

    pub fn set_year(&mut self, year: i64) {
        self.update_criteria(|c| c.year = year);
    }

    pub fn set_location(&mut self, location: String) {
        self.update_criteria(|c| c.location = location);
    }

    pub fn set_experience_level(&mut self, level: String) {
        self.update_criteria(|c| c.experience_level = level);
    }

    fn update_criteria(&mut self, edit: impl FnOnce(&mut FilterCriteria)) {
        if let Some(mut criteria) = self.session.as_ref().and_then(|s| s.criteria.clone()) {
            edit(&mut criteria);
            self.set_criteria(criteria);
        }
    }

    /// Write the filtered rows to `path` and report the outcome.
    pub fn export_filtered(&mut self, path: &Path) {
        match self.write_filtered(path) {
            Ok(rows) => {
                log::info!("Exported {rows} rows to {}", path.display());
                self.notice = Some(Notice::success(format!(
                    "Saved {rows} rows to {}",
                    path.display()
                )));
            }
            Err(e) => {
                log::error!("Export failed: {e:#}");
                self.notice = Some(Notice::error(format!("Export failed: {e:#}")));
            }
        }
    }

    fn write_filtered(&self, path: &Path) -> Result<usize> {
        let session = self.session.as_ref().context("no dataset loaded")?;
        let view = session.filtered_view();
        let file =
            File::create(path).with_context(|| format!("creating {}", path.display()))?;
        view.write_csv(BufWriter::new(file))
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(view.len())
    }
}
