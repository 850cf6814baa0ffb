use crate::core::error::{LogPulseError, Result};
use serde::Serialize;

/// Parse a non-null cell as a finite number.
///
/// Spellings such as `NAN` or `inf` that are not null tokens are rejected.
pub fn parse_number(column: &str, raw: &str) -> Result<f64> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(LogPulseError::InvalidValue {
            column: column.to_string(),
            value: raw.to_string(),
            expected: "number",
        }),
    }
}

/// Parse a non-null cell as a flag (`true`/`false`, `1`/`0`, `yes`/`no`)
pub fn parse_flag(column: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(LogPulseError::InvalidValue {
            column: column.to_string(),
            value: raw.to_string(),
            expected: "boolean",
        }),
    }
}

/// Descriptive statistics over the non-null values of one column.
///
/// Every statistic except `count` and `sum` is `None` when the column holds
/// no values. `std` is the sample standard deviation and needs at least two
/// values; quartiles interpolate linearly between closest ranks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub column: String,
    pub count: usize,
    pub sum: f64,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

impl NumericSummary {
    pub fn from_values(column: &str, values: &[f64]) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        // Summing in sorted order makes the result independent of row order
        let sum: f64 = sorted.iter().sum();
        let mean = (count > 0).then(|| sum / count as f64);

        let std = match mean {
            Some(mean) if count > 1 => {
                let squares: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
                Some((squares / (count - 1) as f64).sqrt())
            }
            _ => None,
        };

        Self {
            column: column.to_string(),
            count,
            sum,
            mean,
            std,
            min: sorted.first().copied(),
            q25: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q75: quantile(&sorted, 0.75),
            max: sorted.last().copied(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Linear-interpolated quantile of an ascending slice
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}
