//! Detailed column-by-column profile of a dataset

use crate::core::constants::profile::{MAX_CATEGORICAL_COLUMNS, SAMPLE_ROWS, TOP_VALUES};
use crate::core::error::Result;
use crate::data::dataset::{Column, Dataset};
use crate::summary::correlation::CorrelationMatrix;
use crate::summary::frequency::FrequencyTable;
use crate::summary::numeric::NumericSummary;
use crate::summary::summarizer::Summarizer;
use rustc_hash::FxHashSet;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Integer,
    Float,
    Boolean,
    Text,
    /// Every cell is null
    Empty,
}

impl ColumnType {
    /// Narrowest type every non-null cell parses as
    pub fn infer(column: &Column) -> Self {
        let mut present = column.cells().iter().flatten().map(|c| c.trim()).peekable();
        if present.peek().is_none() {
            return ColumnType::Empty;
        }

        let values: Vec<&str> = present.collect();
        if values.iter().all(|v| v.parse::<i64>().is_ok()) {
            ColumnType::Integer
        } else if values
            .iter()
            .all(|v| v.parse::<f64>().is_ok_and(f64::is_finite))
        {
            ColumnType::Float
        } else if values
            .iter()
            .all(|v| v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("false"))
        {
            ColumnType::Boolean
        } else {
            ColumnType::Text
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }

    pub fn label(self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Boolean => "boolean",
            ColumnType::Text => "text",
            ColumnType::Empty => "empty",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub column_type: ColumnType,
    pub non_null: usize,
    pub null: usize,
    pub unique: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetProfile {
    pub title: String,
    pub description: String,
    pub source: String,
    pub rows: usize,
    pub columns: usize,
    pub missing_cells: usize,
    /// Rows identical to an earlier row
    pub duplicate_rows: usize,
    pub column_info: Vec<ColumnInfo>,
    pub numeric: Vec<NumericSummary>,
    pub top_values: Vec<FrequencyTable>,
    pub header: Vec<String>,
    pub sample: Vec<Vec<Option<String>>>,
    pub correlation: Option<CorrelationMatrix>,
}

impl DatasetProfile {
    pub fn build(dataset: &Dataset, title: &str, description: &str) -> Result<Self> {
        let summarizer = Summarizer::new(dataset);

        let column_info: Vec<ColumnInfo> = dataset
            .columns()
            .iter()
            .map(|column| {
                let null = column.null_count();
                let unique: FxHashSet<&str> = column.cells().iter().flatten().map(String::as_str).collect();
                ColumnInfo {
                    name: column.name().to_string(),
                    column_type: ColumnType::infer(column),
                    non_null: column.len() - null,
                    null,
                    unique: unique.len(),
                }
            })
            .collect();

        let numeric_columns: Vec<&str> = column_info
            .iter()
            .filter(|info| info.column_type.is_numeric())
            .map(|info| info.name.as_str())
            .collect();

        let numeric = numeric_columns
            .iter()
            .map(|column| summarizer.numeric_summary(column))
            .collect::<Result<Vec<_>>>()?;

        let top_values = column_info
            .iter()
            .filter(|info| info.column_type == ColumnType::Text)
            .take(MAX_CATEGORICAL_COLUMNS)
            .map(|info| summarizer.frequency_table(&info.name, Some(TOP_VALUES)))
            .collect::<Result<Vec<_>>>()?;

        let correlation = if numeric_columns.len() > 1 {
            Some(summarizer.correlation_matrix(&numeric_columns)?)
        } else {
            None
        };

        let sample = (0..dataset.row_count().min(SAMPLE_ROWS))
            .map(|row| {
                dataset
                    .row(row)
                    .into_iter()
                    .map(|cell| cell.map(str::to_string))
                    .collect()
            })
            .collect();

        Ok(Self {
            title: title.to_string(),
            description: description.to_string(),
            source: dataset.name().to_string(),
            rows: dataset.row_count(),
            columns: dataset.column_count(),
            missing_cells: column_info.iter().map(|info| info.null).sum(),
            duplicate_rows: duplicate_rows(dataset),
            header: dataset.column_names().map(str::to_string).collect(),
            column_info,
            numeric,
            top_values,
            sample,
            correlation,
        })
    }

    /// Share of cells that are null, `None` for a dataset without cells
    pub fn missing_ratio(&self) -> Option<f64> {
        let cells = self.rows * self.columns;
        (cells > 0).then(|| self.missing_cells as f64 / cells as f64)
    }
}

fn duplicate_rows(dataset: &Dataset) -> usize {
    let mut seen: FxHashSet<Vec<Option<&str>>> = FxHashSet::default();
    (0..dataset.row_count())
        .filter(|&row| !seen.insert(dataset.row(row)))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "user_id,duration_minutes,data_transferred_mb,active,status,note\n\
                       u1,10,1.5,True,OK,\n\
                       u2,20,2.5,False,FAIL,\n\
                       u1,10,1.5,True,OK,\n\
                       u3,,4.0,True,OK,\n";

    fn profile() -> DatasetProfile {
        let dataset = Dataset::from_csv_str("sessions.csv", CSV).unwrap();
        DatasetProfile::build(&dataset, "Sessions", "Session profile").unwrap()
    }

    #[test]
    fn test_overview() {
        let p = profile();

        assert_eq!(p.rows, 4);
        assert_eq!(p.columns, 6);
        assert_eq!(p.missing_cells, 5);
        assert_eq!(p.duplicate_rows, 1);
        assert_eq!(p.source, "sessions.csv");
        assert_eq!(p.missing_ratio(), Some(5.0 / 24.0));
    }

    #[test]
    fn test_column_types() {
        let p = profile();
        let types: Vec<ColumnType> = p.column_info.iter().map(|c| c.column_type).collect();

        assert_eq!(
            types,
            vec![
                ColumnType::Text,
                ColumnType::Integer,
                ColumnType::Float,
                ColumnType::Boolean,
                ColumnType::Text,
                ColumnType::Empty,
            ]
        );
        assert_eq!(p.column_info[0].unique, 3);
        assert_eq!(p.column_info[1].null, 1);
    }

    #[test]
    fn test_non_finite_spellings_are_text() {
        let column = Column::new(
            "x",
            vec![Some("1.5".to_string()), Some("NAN".to_string())],
        );
        assert_eq!(ColumnType::infer(&column), ColumnType::Text);

        let column = Column::new("x", vec![Some("inf".to_string())]);
        assert_eq!(ColumnType::infer(&column), ColumnType::Text);
    }

    #[test]
    fn test_numeric_and_correlation() {
        let p = profile();

        assert_eq!(p.numeric.len(), 2);
        assert_eq!(p.numeric[0].column, "duration_minutes");
        assert_eq!(p.numeric[0].count, 3);

        let correlation = p.correlation.unwrap();
        assert_eq!(correlation.columns, vec!["duration_minutes", "data_transferred_mb"]);
    }

    #[test]
    fn test_top_values_cover_text_columns() {
        let p = profile();
        let columns: Vec<&str> = p.top_values.iter().map(|t| t.column.as_str()).collect();

        assert_eq!(columns, vec!["user_id", "status"]);
        assert_eq!(p.top_values[1].get("OK"), Some(3));
    }

    #[test]
    fn test_sample_rows() {
        let p = profile();

        assert_eq!(p.header.len(), 6);
        assert_eq!(p.sample.len(), 4);
        assert_eq!(p.sample[3][1], None);
        assert_eq!(p.sample[0][0].as_deref(), Some("u1"));
    }

    #[test]
    fn test_empty_dataset_profile() {
        let dataset = Dataset::from_csv_str("empty.csv", "a,b\n").unwrap();
        let p = DatasetProfile::build(&dataset, "Empty", "").unwrap();

        assert_eq!(p.rows, 0);
        assert_eq!(p.duplicate_rows, 0);
        assert_eq!(p.missing_ratio(), None);
        assert!(p.correlation.is_none());
        assert!(p.column_info.iter().all(|c| c.column_type == ColumnType::Empty));
    }
}
