use crate::core::error::Result;
use crate::data::dataset::{Column, Dataset};
use serde::Serialize;
use std::fmt;

/// Row predicate over a single column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RowFilter {
    /// Every row matches
    All,
    /// Rows whose cell equals `value`
    Equals { column: String, value: String },
    /// Rows whose cell is one of `values`
    OneOf { column: String, values: Vec<String> },
}

impl RowFilter {
    pub fn equals<C: Into<String>, V: Into<String>>(column: C, value: V) -> Self {
        RowFilter::Equals {
            column: column.into(),
            value: value.into(),
        }
    }

    pub fn one_of<C: Into<String>>(column: C, values: &[&str]) -> Self {
        RowFilter::OneOf {
            column: column.into(),
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    pub fn column(&self) -> Option<&str> {
        match self {
            RowFilter::All => None,
            RowFilter::Equals { column, .. } | RowFilter::OneOf { column, .. } => Some(column),
        }
    }

    /// Resolve the filtered column, failing with `ColumnNotFound`
    pub(crate) fn resolve<'d>(&self, dataset: &'d Dataset) -> Result<Option<&'d Column>> {
        self.column().map(|name| dataset.column(name)).transpose()
    }

    /// Test one cell of the resolved column; nulls never match a value
    pub(crate) fn matches(&self, cell: Option<&str>) -> bool {
        match (self, cell) {
            (RowFilter::All, _) => true,
            (_, None) => false,
            (RowFilter::Equals { value, .. }, Some(cell)) => cell == value,
            (RowFilter::OneOf { values, .. }, Some(cell)) => values.iter().any(|v| v == cell),
        }
    }
}

impl fmt::Display for RowFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowFilter::All => f.write_str("all rows"),
            RowFilter::Equals { column, value } => write!(f, "{column} == {value}"),
            RowFilter::OneOf { column, values } => {
                write!(f, "{column} in [{}]", values.join(", "))
            }
        }
    }
}
