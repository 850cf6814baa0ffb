//! Standalone HTML profiling report, one file per log.

use crate::data::schema::LogKind;
use crate::reporting::dashboard::{
    ChartSpec, DashboardError, HtmlDashboard, escape_html, script_json,
};
use crate::summary::profile::DatasetProfile;
use crate::summary::report::{MetricValue, format_number};
use std::fs;
use std::path::{Path, PathBuf};

/// `<index>_profiling_report.html`, numbered from 1 in log order
pub fn report_file_name(kind: LogKind) -> String {
    format!("{}_profiling_report.html", kind.index())
}

pub struct ProfileReport;

impl ProfileReport {
    /// Write the report for `kind` into `output_dir` and return its path
    pub fn write(
        kind: LogKind,
        profile: &DatasetProfile,
        output_dir: &Path,
    ) -> Result<PathBuf, DashboardError> {
        let path = output_dir.join(report_file_name(kind));
        fs::write(&path, Self::render(profile)?)?;
        Ok(path)
    }

    pub fn render(profile: &DatasetProfile) -> Result<String, DashboardError> {
        let charts: Vec<ChartSpec> = profile
            .top_values
            .iter()
            .enumerate()
            .map(|(i, table)| ChartSpec::from_frequency(format!("top-values-{i}"), table))
            .collect();

        let body = format!(
            r#"
            <div class="container">
                <div class="header">
                    <h1>{}</h1>
                    <p>{}</p>
                </div>
                {}
                {}
                {}
                {}
                {}
                {}
            </div>
            "#,
            escape_html(&profile.title),
            escape_html(&profile.description),
            Self::overview(profile),
            Self::column_table(profile),
            Self::describe_section(profile),
            Self::top_values_section(profile),
            Self::sample_table(profile),
            Self::correlation_section(profile),
        );

        HtmlDashboard::page(
            &format!("{} - Profiling Report", profile.title),
            &body,
            &script_json(&charts)?,
        )
    }

    fn overview(profile: &DatasetProfile) -> String {
        let missing = MetricValue::rate(profile.missing_ratio()).to_string();
        let duplicate_style = if profile.duplicate_rows == 0 {
            "success"
        } else {
            "warning"
        };

        format!(
            r#"<div class="stats-grid">{}{}{}{}{}</div>"#,
            HtmlDashboard::generate_stat_card("&#128193;", &profile.source, "Source", "info"),
            HtmlDashboard::generate_stat_card(
                "&#128221;",
                &MetricValue::count(profile.rows).to_string(),
                "Rows",
                "info"
            ),
            HtmlDashboard::generate_stat_card(
                "&#128203;",
                &profile.columns.to_string(),
                "Columns",
                "info"
            ),
            HtmlDashboard::generate_stat_card(
                "&#10067;",
                &format!("{} ({missing})", profile.missing_cells),
                "Missing Cells",
                "info"
            ),
            HtmlDashboard::generate_stat_card(
                "&#128257;",
                &profile.duplicate_rows.to_string(),
                "Duplicate Rows",
                duplicate_style
            ),
        )
    }

    fn column_table(profile: &DatasetProfile) -> String {
        let rows: String = profile
            .column_info
            .iter()
            .map(|info| {
                format!(
                    r#"<tr><td>{}</td><td>{}</td><td class="num">{}</td><td class="num">{}</td><td class="num">{}</td></tr>"#,
                    escape_html(&info.name),
                    info.column_type.label(),
                    info.non_null,
                    info.null,
                    info.unique
                )
            })
            .collect();

        Self::panel(
            "Columns",
            &format!(
                "<table><tr><th>column</th><th>type</th><th>non-null</th><th>null</th><th>unique</th></tr>{rows}</table>"
            ),
        )
    }

    fn describe_section(profile: &DatasetProfile) -> String {
        if profile.numeric.is_empty() {
            return String::new();
        }
        Self::panel(
            "Numeric columns",
            &HtmlDashboard::numeric_table(&profile.numeric),
        )
    }

    fn top_values_section(profile: &DatasetProfile) -> String {
        if profile.top_values.is_empty() {
            return String::new();
        }
        let panels: String = profile
            .top_values
            .iter()
            .enumerate()
            .map(|(i, table)| {
                HtmlDashboard::chart_panel(
                    &format!("top-values-{i}"),
                    &format!(
                        "Top values: {} ({} distinct)",
                        table.column,
                        format_number(table.distinct as f64)
                    ),
                )
            })
            .collect();
        format!(r#"<div class="chart-grid">{panels}</div>"#)
    }

    fn sample_table(profile: &DatasetProfile) -> String {
        let header: String = profile
            .header
            .iter()
            .map(|c| format!("<th>{}</th>", escape_html(c)))
            .collect();
        let rows: String = profile
            .sample
            .iter()
            .map(|row| {
                let cells: String = row
                    .iter()
                    .map(|cell| match cell {
                        Some(value) => format!("<td>{}</td>", escape_html(value)),
                        None => r#"<td class="null">null</td>"#.to_string(),
                    })
                    .collect();
                format!("<tr>{cells}</tr>")
            })
            .collect();

        Self::panel(
            &format!("Sample ({} of {} rows)", profile.sample.len(), profile.rows),
            &format!("<table><tr>{header}</tr>{rows}</table>"),
        )
    }

    fn correlation_section(profile: &DatasetProfile) -> String {
        match profile.correlation {
            Some(ref matrix) => Self::panel("Correlation", &HtmlDashboard::correlation_table(matrix)),
            None => String::new(),
        }
    }

    fn panel(title: &str, content: &str) -> String {
        format!(
            r#"<div class="chart-container"><h3 class="chart-title">{}</h3>{content}</div>"#,
            escape_html(title)
        )
    }
}
