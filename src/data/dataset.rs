//! In-memory tabular dataset loaded from one CSV log file

use crate::core::constants::NULL_TOKENS;
use crate::core::error::{LogPulseError, Result};
use std::io::Read;

/// Check whether a raw cell reads as null
pub fn is_null_token(raw: &str) -> bool {
    NULL_TOKENS.contains(&raw)
}

/// A single named column; `None` cells are nulls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    name: String,
    cells: Vec<Option<String>>,
}

impl Column {
    pub fn new<S: Into<String>>(name: S, cells: Vec<Option<String>>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cell at `row`, `None` when null
    pub fn get(&self, row: usize) -> Option<&str> {
        self.cells.get(row).and_then(|cell| cell.as_deref())
    }

    pub fn cells(&self) -> &[Option<String>] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn null_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }
}

/// Ordered rows of one log schema, stored column-wise.
///
/// A dataset is immutable once built. Every analysis borrows it and derives
/// new values; nothing in the crate hands out a mutable reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    name: String,
    columns: Vec<Column>,
    row_count: usize,
}

impl Dataset {
    /// Build a dataset from columns of equal length
    pub fn from_columns<S: Into<String>>(name: S, columns: Vec<Column>) -> Result<Self> {
        let name = name.into();
        let row_count = columns.first().map(Column::len).unwrap_or(0);

        if let Some(ragged) = columns.iter().find(|c| c.len() != row_count) {
            return Err(LogPulseError::InvalidArgument(format!(
                "column '{}' of {} has {} cells, expected {}",
                ragged.name(),
                name,
                ragged.len(),
                row_count
            )));
        }

        Ok(Self {
            name,
            columns,
            row_count,
        })
    }

    /// Parse CSV with a header row
    pub fn from_reader<S: Into<String>, R: Read>(name: S, reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];

        for record in csv_reader.records() {
            let record = record?;
            for (column, field) in cells.iter_mut().zip(record.iter()) {
                if is_null_token(field) {
                    column.push(None);
                } else {
                    column.push(Some(field.to_string()));
                }
            }
        }

        let columns = headers
            .iter()
            .zip(cells)
            .map(|(header, cells)| Column::new(header, cells))
            .collect();

        Self::from_columns(name, columns)
    }

    pub fn from_csv_str<S: Into<String>>(name: S, data: &str) -> Result<Self> {
        Self::from_reader(name, data.as_bytes())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(Column::name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name() == name)
    }

    /// Look up a column by name, failing with `ColumnNotFound`
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| LogPulseError::ColumnNotFound {
                column: name.to_string(),
                dataset: self.name.clone(),
            })
    }

    /// Fail fast on the first name that is not a column of this dataset
    pub fn require_columns<'a, I>(&self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for name in names {
            self.column(name)?;
        }
        Ok(())
    }

    /// All cells of one row, in column order
    pub fn row(&self, index: usize) -> Vec<Option<&str>> {
        self.columns.iter().map(|c| c.get(index)).collect()
    }
}
