use std::path::{Path, PathBuf};

use crate::data::dataset::TabularDataset;
use crate::data::loader;
use crate::error::{AppError, Result};
use crate::processing::filter;
use crate::processing::statistics::{Aggregate, AggregateResult};
use crate::state::theme::Theme;

/// A loaded file: the view on screen and the snapshot taken at load time.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub source: PathBuf,
    pub current: TabularDataset,
    pub original: TabularDataset,
}

impl LoadedTable {
    pub fn file_name(&self) -> String {
        self.source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.source.display().to_string())
    }

    pub fn is_filtered(&self) -> bool {
        self.current != self.original
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOutcome {
    Applied { shown: usize },
    NoMatch,
}

/// All mutable session state. Owned by the app, touched only from the UI thread.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub table: Option<LoadedTable>,
    /// Header clicked most recently.
    pub selected_column: Option<String>,
    /// Contents of the filter text field.
    pub filter_query: String,
    pub theme: Theme,
}

impl AppState {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    pub fn current(&self) -> Option<&TabularDataset> {
        self.table.as_ref().map(|t| &t.current)
    }

    fn table_or_err(&self) -> Result<&LoadedTable> {
        self.table.as_ref().ok_or(AppError::NoData)
    }

    /// Replace the session table with the contents of `path`.
    /// On failure nothing changes.
    pub fn load(&mut self, path: &Path, delimiter: u8) -> Result<&LoadedTable> {
        let dataset = loader::load(path, delimiter)?;

        if self
            .selected_column
            .as_deref()
            .is_some_and(|c| !dataset.has_column(c))
        {
            self.selected_column = None;
        }

        Ok(self.table.insert(LoadedTable {
            source: path.to_path_buf(),
            original: dataset.snapshot(),
            current: dataset,
        }))
    }

    pub fn select_column(&mut self, name: &str) -> Result<()> {
        let table = self.table_or_err()?;
        if !table.current.has_column(name) {
            return Err(AppError::ColumnNotFound { column: name.to_string() });
        }
        self.selected_column = Some(name.to_string());
        Ok(())
    }

    pub fn aggregate(&self, kind: Aggregate) -> Result<AggregateResult> {
        let table = self.table_or_err()?;
        let column = self
            .selected_column
            .as_deref()
            .ok_or(AppError::NoColumnSelected)?;
        kind.compute(&table.current, column)
    }

    /// Narrow the current view to rows matching `filter_query`.
    /// A query matching nothing leaves the view as it was.
    pub fn apply_filter(&mut self) -> Result<FilterOutcome> {
        let table = self.table.as_mut().ok_or(AppError::NoData)?;
        if self.filter_query.is_empty() {
            return Err(AppError::EmptyFilterQuery);
        }

        let filtered = filter::apply(&table.current, &self.filter_query);
        if filtered.is_empty() {
            return Ok(FilterOutcome::NoMatch);
        }
        let shown = filtered.row_count();
        table.current = filtered;
        Ok(FilterOutcome::Applied { shown })
    }

    pub fn reset_filter(&mut self) -> Result<()> {
        let table = self.table.as_mut().ok_or(AppError::NoData)?;
        table.current = filter::reset(&table.original);
        self.filter_query.clear();
        Ok(())
    }
}
