use crate::error::{AppError, Result};

/// An in-memory table: named columns and row-major string cells.
///
/// Every row holds exactly `columns.len()` cells, in column order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TabularDataset {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TabularDataset {
    /// Build a dataset, padding or truncating rows so each matches the header width.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    #[cfg(test)]
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let col = self.column_index(column)?;
        self.rows.get(row).map(|r| r[col].as_str())
    }

    /// All cells of one column, top to bottom.
    pub fn column_values(&self, name: &str) -> Result<Vec<&str>> {
        let col = self.column_index(name).ok_or_else(|| AppError::ColumnNotFound {
            column: name.to_string(),
        })?;
        Ok(self.rows.iter().map(|r| r[col].as_str()).collect())
    }

    /// Same columns, a different selection of rows.
    pub fn with_rows(&self, rows: Vec<Vec<String>>) -> Self {
        Self::new(self.columns.clone(), rows)
    }

    /// A deep, independent copy.
    pub fn snapshot(&self) -> Self {
        self.clone()
    }
}
