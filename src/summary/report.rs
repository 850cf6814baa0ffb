use crate::core::constants::display::UNDEFINED;
use crate::data::schema::LogKind;
use crate::summary::correlation::CorrelationMatrix;
use crate::summary::frequency::FrequencyTable;
use crate::summary::numeric::NumericSummary;
use crate::summary::profile::DatasetProfile;
use serde::Serialize;
use std::fmt;

/// A single scalar result.
///
/// `Undefined` is the sentinel for statistics that have no value on an
/// empty dataset or subset (a rate over zero rows, the mean of nothing).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MetricValue {
    Count(u64),
    /// Fraction in `[0, 1]`
    Rate(f64),
    Number(f64),
    /// Amount in US dollars
    Currency(f64),
    Undefined,
}

impl MetricValue {
    pub fn count(n: usize) -> Self {
        MetricValue::Count(n as u64)
    }

    pub fn rate(value: Option<f64>) -> Self {
        value.map_or(MetricValue::Undefined, MetricValue::Rate)
    }

    pub fn number(value: Option<f64>) -> Self {
        value.map_or(MetricValue::Undefined, MetricValue::Number)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            MetricValue::Count(n) => Some(n as f64),
            MetricValue::Rate(v) | MetricValue::Number(v) | MetricValue::Currency(v) => Some(v),
            MetricValue::Undefined => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, MetricValue::Undefined)
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            MetricValue::Count(n) => write!(f, "{}", group_thousands(&n.to_string())),
            MetricValue::Rate(v) => write!(f, "{:.1}%", v * 100.0),
            MetricValue::Number(v) => f.write_str(&format_number(v)),
            MetricValue::Currency(v) => {
                let cents = format!("{:.2}", v.abs());
                let (whole, fraction) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));
                let sign = if v < 0.0 { "-" } else { "" };
                write!(f, "{sign}${}.{fraction}", group_thousands(whole))
            }
            MetricValue::Undefined => f.write_str(UNDEFINED),
        }
    }
}

/// Render a plain number: integers without decimals, others with two
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        UNDEFINED.to_string()
    } else if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub key: String,
    pub label: String,
    pub value: MetricValue,
}

impl Metric {
    pub fn new<K: Into<String>, L: Into<String>>(key: K, label: L, value: MetricValue) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedRow {
    pub key: Vec<String>,
    pub sum: f64,
    pub count: usize,
}

/// Sums of a numeric column per distinct key, largest sum first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedTable {
    pub title: String,
    pub group_columns: Vec<String>,
    pub value_column: String,
    /// Human-readable description of the row filter applied first
    pub filter: String,
    pub rows: Vec<GroupedRow>,
}

impl GroupedTable {
    pub fn titled<S: Into<String>>(mut self, title: S) -> Self {
        self.title = title.into();
        self
    }

    /// Summed value for a key, when present
    pub fn sum_for(&self, key: &[&str]) -> Option<f64> {
        self.rows
            .iter()
            .find(|row| row.key.iter().map(String::as_str).eq(key.iter().copied()))
            .map(|row| row.sum)
    }

    pub fn total(&self) -> f64 {
        self.rows.iter().map(|row| row.sum).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Structured result of summarizing one dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricReport {
    pub kind: Option<LogKind>,
    pub title: String,
    pub source: String,
    pub total_rows: usize,
    pub metrics: Vec<Metric>,
    pub frequency_tables: Vec<FrequencyTable>,
    pub numeric_summaries: Vec<NumericSummary>,
    pub grouped_tables: Vec<GroupedTable>,
    pub correlation: Option<CorrelationMatrix>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<DatasetProfile>,
}

impl MetricReport {
    pub fn new<T: Into<String>, S: Into<String>>(title: T, source: S, total_rows: usize) -> Self {
        Self {
            kind: None,
            title: title.into(),
            source: source.into(),
            total_rows,
            metrics: Vec::new(),
            frequency_tables: Vec::new(),
            numeric_summaries: Vec::new(),
            grouped_tables: Vec::new(),
            correlation: None,
            profile: None,
        }
    }

    pub fn push_metric<K: Into<String>, L: Into<String>>(
        &mut self,
        key: K,
        label: L,
        value: MetricValue,
    ) {
        self.metrics.push(Metric::new(key, label, value));
    }

    pub fn metric(&self, key: &str) -> Option<&MetricValue> {
        self.metrics.iter().find(|m| m.key == key).map(|m| &m.value)
    }

    pub fn frequency_table(&self, title: &str) -> Option<&FrequencyTable> {
        self.frequency_tables.iter().find(|t| t.title == title)
    }

    pub fn numeric_summary(&self, column: &str) -> Option<&NumericSummary> {
        self.numeric_summaries.iter().find(|s| s.column == column)
    }

    pub fn grouped_table(&self, title: &str) -> Option<&GroupedTable> {
        self.grouped_tables.iter().find(|t| t.title == title)
    }
}
