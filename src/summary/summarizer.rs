use crate::core::error::{LogPulseError, Result};
use crate::data::dataset::{Column, Dataset};
use crate::data::schema::ColumnRoles;
use crate::summary::correlation::CorrelationMatrix;
use crate::summary::filter::RowFilter;
use crate::summary::frequency::FrequencyTable;
use crate::summary::numeric::{NumericSummary, parse_flag, parse_number};
use crate::summary::report::{GroupedRow, GroupedTable, MetricReport, MetricValue};
use rustc_hash::{FxHashMap, FxHashSet};

/// Read-only view over a dataset, optionally narrowed to a subset of rows.
///
/// Every operation borrows the dataset and returns a freshly computed value;
/// narrowing with [`Summarizer::filtered`] only records row indices.
#[derive(Debug, Clone)]
pub struct Summarizer<'a> {
    dataset: &'a Dataset,
    rows: Vec<usize>,
}

impl<'a> Summarizer<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self {
            dataset,
            rows: (0..dataset.row_count()).collect(),
        }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// Indices of the rows in this view
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// Narrow the view to rows matching `filter`
    pub fn filtered(&self, filter: &RowFilter) -> Result<Summarizer<'a>> {
        let column = filter.resolve(self.dataset)?;
        let rows = self
            .rows
            .iter()
            .copied()
            .filter(|&row| filter.matches(column.and_then(|c| c.get(row))))
            .collect();

        Ok(Summarizer {
            dataset: self.dataset,
            rows,
        })
    }

    fn cells(&self, column: &str) -> Result<impl Iterator<Item = Option<&'a str>> + '_> {
        let column: &'a Column = self.dataset.column(column)?;
        Ok(self.rows.iter().map(move |&row| column.get(row)))
    }

    pub fn count_total(&self) -> usize {
        self.rows.len()
    }

    pub fn count_where(&self, filter: &RowFilter) -> Result<usize> {
        Ok(self.filtered(filter)?.count_total())
    }

    /// Fraction of rows whose `column` equals `target`; `None` on no rows
    pub fn rate(&self, column: &str, target: &str) -> Result<Option<f64>> {
        let matching = self.cells(column)?.filter(|c| *c == Some(target)).count();
        Ok(self.fraction(matching))
    }

    fn fraction(&self, part: usize) -> Option<f64> {
        match self.count_total() {
            0 => None,
            total => Some(part as f64 / total as f64),
        }
    }

    /// Number of unique non-null values
    pub fn distinct_count(&self, column: &str) -> Result<usize> {
        let distinct: FxHashSet<&str> = self.cells(column)?.flatten().collect();
        Ok(distinct.len())
    }

    /// Parsed cells, `None` for nulls
    pub fn numeric_values(&self, column: &str) -> Result<Vec<Option<f64>>> {
        self.cells(column)?
            .map(|cell| cell.map(|raw| parse_number(column, raw)).transpose())
            .collect()
    }

    pub fn numeric_summary(&self, column: &str) -> Result<NumericSummary> {
        let values: Vec<f64> = self.numeric_values(column)?.into_iter().flatten().collect();
        Ok(NumericSummary::from_values(column, &values))
    }

    pub fn mean(&self, column: &str) -> Result<Option<f64>> {
        Ok(self.numeric_summary(column)?.mean)
    }

    pub fn sum(&self, column: &str) -> Result<f64> {
        Ok(self.numeric_summary(column)?.sum)
    }

    /// Rows whose flag column reads as true
    pub fn true_count(&self, column: &str) -> Result<usize> {
        let mut count = 0;
        for cell in self.cells(column)? {
            if let Some(raw) = cell
                && parse_flag(column, raw)?
            {
                count += 1;
            }
        }
        Ok(count)
    }

    pub fn true_rate(&self, column: &str) -> Result<Option<f64>> {
        let count = self.true_count(column)?;
        Ok(self.fraction(count))
    }

    pub fn frequency_table(&self, column: &str, top_n: Option<usize>) -> Result<FrequencyTable> {
        Ok(FrequencyTable::from_cells(column, self.cells(column)?, top_n))
    }

    /// Sum `value_column` per distinct key of `group_columns` over the rows
    /// matching `filter`.
    ///
    /// Rows with a null in any group column are skipped. A null value adds
    /// nothing to the sum but still counts as a row of its group.
    pub fn grouped_sum(
        &self,
        group_columns: &[&str],
        value_column: &str,
        filter: &RowFilter,
    ) -> Result<GroupedTable> {
        self.grouped_sum_counting(group_columns, value_column, None, filter)
    }

    /// Like [`Summarizer::grouped_sum`], but a row only adds to its group's
    /// count when `count_column` is non-null in that row.
    pub fn grouped_sum_counting(
        &self,
        group_columns: &[&str],
        value_column: &str,
        count_column: Option<&str>,
        filter: &RowFilter,
    ) -> Result<GroupedTable> {
        let subset = self.filtered(filter)?;
        let groups = group_columns
            .iter()
            .map(|name| self.dataset.column(name))
            .collect::<Result<Vec<_>>>()?;
        let values = self.dataset.column(value_column)?;
        let counted = count_column
            .map(|name| self.dataset.column(name))
            .transpose()?;

        let mut positions: FxHashMap<Vec<&str>, usize> = FxHashMap::default();
        let mut accumulated: Vec<(Vec<&str>, Vec<f64>, usize)> = Vec::new();

        for &row in &subset.rows {
            let Some(key) = groups.iter().map(|c| c.get(row)).collect::<Option<Vec<_>>>() else {
                continue;
            };
            let value = values
                .get(row)
                .map(|raw| parse_number(value_column, raw))
                .transpose()?;

            let position = match positions.get(&key) {
                Some(&position) => position,
                None => {
                    positions.insert(key.clone(), accumulated.len());
                    accumulated.push((key, Vec::new(), 0));
                    accumulated.len() - 1
                }
            };
            let entry = &mut accumulated[position];
            entry.1.extend(value);
            if counted.is_none_or(|column| column.get(row).is_some()) {
                entry.2 += 1;
            }
        }

        let mut rows: Vec<GroupedRow> = accumulated
            .into_iter()
            .map(|(key, mut values, count)| {
                values.sort_by(f64::total_cmp);
                GroupedRow {
                    key: key.into_iter().map(str::to_string).collect(),
                    sum: values.iter().sum(),
                    count,
                }
            })
            .collect();
        rows.sort_by(|a, b| b.sum.total_cmp(&a.sum).then_with(|| a.key.cmp(&b.key)));

        Ok(GroupedTable {
            title: format!("{value_column} by {}", group_columns.join(", ")),
            group_columns: group_columns.iter().map(|c| c.to_string()).collect(),
            value_column: value_column.to_string(),
            filter: filter.to_string(),
            rows,
        })
    }

    pub fn correlation_matrix(&self, columns: &[&str]) -> Result<CorrelationMatrix> {
        let series = columns
            .iter()
            .map(|column| self.numeric_values(column))
            .collect::<Result<Vec<_>>>()?;
        Ok(CorrelationMatrix::compute(
            columns.iter().map(|c| c.to_string()).collect(),
            &series,
        ))
    }

    /// Generic report driven entirely by `roles`
    pub fn summarize(&self, roles: &ColumnRoles, top_n: Option<usize>) -> Result<MetricReport> {
        roles.validate().map_err(LogPulseError::Config)?;
        self.dataset.require_columns(roles.referenced_columns())?;

        let name = self.dataset.name();
        let mut report = MetricReport::new(name, name, self.count_total());
        report.push_metric(
            "total_rows",
            "Total records",
            MetricValue::count(self.count_total()),
        );

        if let Some((column, value)) = roles.success_criterion() {
            let label = capitalize(value);
            report.push_metric(
                "success_count",
                format!("{label} records"),
                MetricValue::count(self.count_where(&RowFilter::equals(column, value))?),
            );
            report.push_metric(
                "success_rate",
                format!("{label} rate"),
                MetricValue::rate(self.rate(column, value)?),
            );
        }

        for column in &roles.id_columns {
            report.push_metric(
                format!("distinct_{column}"),
                format!("Unique {column}"),
                MetricValue::count(self.distinct_count(column)?),
            );
        }

        for column in &roles.boolean_columns {
            report.push_metric(
                format!("{column}_count"),
                format!("{column} = true"),
                MetricValue::count(self.true_count(column)?),
            );
            report.push_metric(
                format!("{column}_rate"),
                format!("{column} rate"),
                MetricValue::rate(self.true_rate(column)?),
            );
        }

        for column in &roles.categorical_columns {
            report
                .frequency_tables
                .push(self.frequency_table(column, top_n)?);
        }

        for column in &roles.numeric_columns {
            report.numeric_summaries.push(self.numeric_summary(column)?);
        }

        if roles.numeric_columns.len() >= 2 {
            let columns: Vec<&str> = roles.numeric_columns.iter().map(String::as_str).collect();
            report.correlation = Some(self.correlation_matrix(&columns)?);
        }

        Ok(report)
    }
}

/// `SUCCESS` -> `Success`
fn capitalize(value: &str) -> String {
    let lower = value.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
