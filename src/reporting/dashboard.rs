use crate::batch::{BatchOutcome, JobFailure};
use crate::config::Config;
use crate::summary::correlation::CorrelationMatrix;
use crate::summary::frequency::FrequencyTable;
use crate::summary::numeric::NumericSummary;
use crate::summary::report::{GroupedTable, MetricReport, MetricValue, format_number};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;

/// Constants for dashboard styling and layout
mod dashboard_constants {
    /// Chart.js CDN URL for rendering charts
    pub const CHART_JS_CDN: &str = "https://cdn.jsdelivr.net/npm/chart.js";

    /// Rate thresholds for styling
    pub const SUCCESS_THRESHOLD: f64 = 0.9;
    pub const WARNING_THRESHOLD: f64 = 0.7;
}

/// Data structure containing all information needed for dashboard generation
#[derive(Debug, Clone)]
pub struct DashboardData {
    /// One report per summarized log
    pub reports: Vec<MetricReport>,
    /// Logs that could not be summarized
    pub failures: Vec<JobFailure>,
    /// Configuration used for the run
    pub config: Config,
    /// Timestamp when the dashboard was generated
    pub timestamp: String,
}

impl DashboardData {
    pub fn from_outcome(outcome: &BatchOutcome<MetricReport>, config: &Config, timestamp: String) -> Self {
        Self {
            reports: outcome.completed.clone(),
            failures: outcome.failures.clone(),
            config: config.clone(),
            timestamp,
        }
    }
}

/// Error type for dashboard generation
#[derive(Debug)]
pub enum DashboardError {
    FileWrite(io::Error),
    Serialization(String),
}

impl std::fmt::Display for DashboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DashboardError::FileWrite(e) => write!(f, "Failed to write dashboard file: {e}"),
            DashboardError::Serialization(e) => write!(f, "Failed to serialize data: {e}"),
        }
    }
}

impl std::error::Error for DashboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DashboardError::FileWrite(e) => Some(e),
            DashboardError::Serialization(_) => None,
        }
    }
}

impl From<io::Error> for DashboardError {
    fn from(e: io::Error) -> Self {
        DashboardError::FileWrite(e)
    }
}

/// Escape text for HTML element and attribute content
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Bar chart handed to Chart.js
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct ChartSpec {
    pub id: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSpec {
    pub(crate) fn from_frequency(id: String, table: &FrequencyTable) -> Self {
        Self {
            id,
            labels: table.entries.iter().map(|e| e.value.clone()).collect(),
            values: table.entries.iter().map(|e| e.count as f64).collect(),
        }
    }

    fn from_grouped(id: String, table: &GroupedTable) -> Self {
        Self {
            id,
            labels: table.rows.iter().map(|r| r.key.join(" / ")).collect(),
            values: table.rows.iter().map(|r| r.sum).collect(),
        }
    }
}

/// JSON that is safe to embed inside a `<script>` element
pub(crate) fn script_json<T: Serialize>(value: &T) -> Result<String, DashboardError> {
    serde_json::to_string(value)
        .map(|json| json.replace("</", "<\\/"))
        .map_err(|e| DashboardError::Serialization(e.to_string()))
}

/// HTML dashboard generator for summarized logs
pub struct HtmlDashboard;

impl HtmlDashboard {
    /// Generate and write an HTML dashboard to the specified path
    pub fn generate_dashboard<P: AsRef<Path>>(
        data: &DashboardData,
        output_path: P,
    ) -> Result<(), DashboardError> {
        let html_content = Self::generate_html_content(data)?;
        fs::write(output_path, html_content)?;
        Ok(())
    }

    /// Generate the complete HTML document content
    fn generate_html_content(data: &DashboardData) -> Result<String, DashboardError> {
        let mut charts = Vec::new();
        let body_content = Self::generate_body_content(data, &mut charts);
        Self::page(
            "Server Log Dashboard - logpulse",
            &body_content,
            &script_json(&charts)?,
        )
    }

    /// Wrap `body` into a full document with styles and chart bootstrap
    pub(crate) fn page(title: &str, body: &str, charts_json: &str) -> Result<String, DashboardError> {
        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{}</title>
    <script src="{}"></script>
    <style>{}</style>
</head>
<body>
    {}
    <script>window.chartSpecs = {};</script>
    <script>{}</script>
</body>
</html>"#,
            escape_html(title),
            dashboard_constants::CHART_JS_CDN,
            Self::generate_css(),
            body,
            charts_json,
            Self::generate_javascript()
        ))
    }

    pub(crate) fn generate_css() -> &'static str {
        r#"
        :root {
            --primary-color: #2563eb;
            --success-color: #059669;
            --warning-color: #d97706;
            --error-color: #dc2626;
            --bg-color: #f8fafc;
            --card-bg: #ffffff;
            --border-color: #e2e8f0;
            --text-primary: #1e293b;
            --text-secondary: #64748b;
        }

        * { margin: 0; padding: 0; box-sizing: border-box; }

        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background-color: var(--bg-color);
            color: var(--text-primary);
            line-height: 1.6;
        }

        .container { max-width: 1200px; margin: 0 auto; padding: 2rem; }

        .header {
            text-align: center;
            margin-bottom: 3rem;
            padding: 2rem;
            background: linear-gradient(135deg, var(--primary-color), #3b82f6);
            color: white;
            border-radius: 12px;
            box-shadow: 0 4px 6px -1px rgba(0, 0, 0, 0.1);
        }

        .header h1 { font-size: 2.5rem; margin-bottom: 0.5rem; font-weight: 700; }
        .header p { font-size: 1.1rem; opacity: 0.9; }

        .stats-grid {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
            gap: 1.5rem;
            margin-bottom: 2rem;
        }

        .stat-card {
            background: var(--card-bg);
            padding: 1.5rem;
            border-radius: 12px;
            border: 1px solid var(--border-color);
            box-shadow: 0 2px 4px -1px rgba(0, 0, 0, 0.06);
        }

        .stat-icon {
            width: 48px;
            height: 48px;
            border-radius: 12px;
            display: flex;
            align-items: center;
            justify-content: center;
            margin-bottom: 1rem;
            font-size: 1.5rem;
        }

        .stat-value { font-size: 1.75rem; font-weight: 700; margin-bottom: 0.5rem; }

        .stat-label {
            color: var(--text-secondary);
            font-size: 0.85rem;
            text-transform: uppercase;
            letter-spacing: 0.5px;
        }

        .success { color: var(--success-color); background-color: #ecfdf5; }
        .warning { color: var(--warning-color); background-color: #fffbeb; }
        .error { color: var(--error-color); background-color: #fef2f2; }
        .info { color: var(--primary-color); background-color: #eff6ff; }

        .log-section { margin-bottom: 3rem; }

        .section-header {
            background: var(--card-bg);
            padding: 1.5rem;
            border-radius: 12px;
            border: 1px solid var(--border-color);
            margin-bottom: 1.5rem;
        }

        .section-title { font-size: 1.5rem; font-weight: 600; color: var(--text-primary); }
        .section-subtitle { font-size: 0.9rem; color: var(--text-secondary); }

        .chart-grid {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(480px, 1fr));
            gap: 1.5rem;
        }

        .chart-container {
            background: var(--card-bg);
            padding: 1.5rem;
            border-radius: 12px;
            border: 1px solid var(--border-color);
            margin-bottom: 1.5rem;
            box-shadow: 0 2px 4px -1px rgba(0, 0, 0, 0.06);
            overflow-x: auto;
        }

        .chart-title { font-size: 1.1rem; font-weight: 600; margin-bottom: 1rem; }

        table { width: 100%; border-collapse: collapse; font-size: 0.9rem; }
        th, td { padding: 0.5rem 0.75rem; border-bottom: 1px solid var(--border-color); text-align: left; }
        th { background: var(--bg-color); font-weight: 600; }
        td.num { text-align: right; font-variant-numeric: tabular-nums; }
        td.null { color: var(--text-secondary); font-style: italic; }

        .failure-item {
            padding: 1rem 1.5rem;
            border-bottom: 1px solid var(--border-color);
            color: var(--error-color);
        }

        .failure-item:last-child { border-bottom: none; }

        @media (max-width: 768px) {
            .container { padding: 1rem; }
            .header h1 { font-size: 2rem; }
            .stats-grid { grid-template-columns: 1fr; }
            .chart-grid { grid-template-columns: 1fr; }
        }
        "#
    }

    /// Generate the main body content of the dashboard
    fn generate_body_content(data: &DashboardData, charts: &mut Vec<ChartSpec>) -> String {
        let header_section = Self::generate_header_section(data);
        let stats_section = Self::generate_stats_section(data);
        let report_sections: String = data
            .reports
            .iter()
            .enumerate()
            .map(|(index, report)| Self::generate_report_section(index, report, charts))
            .collect();
        let failures_section = Self::generate_failures_section(&data.failures);

        format!(
            r#"
            <div class="container">
                {header_section}
                {stats_section}
                {report_sections}
                {failures_section}
            </div>
            "#
        )
    }

    /// Generate the dashboard header section
    fn generate_header_section(data: &DashboardData) -> String {
        format!(
            r#"
            <div class="header">
                <h1>&#128202; Server Log Dashboard</h1>
                <p>Logs from {} &middot; generated on {} by logpulse</p>
            </div>
            "#,
            escape_html(&data.config.data_dir().display().to_string()),
            escape_html(&data.timestamp)
        )
    }

    /// Generate the overview cards
    fn generate_stats_section(data: &DashboardData) -> String {
        let total_records: usize = data.reports.iter().map(|r| r.total_rows).sum();
        let total_logs = data.reports.len() + data.failures.len();
        let failure_style = if data.failures.is_empty() {
            "success"
        } else {
            "error"
        };

        format!(
            r#"
            <div class="stats-grid">
                {}
                {}
                {}
            </div>
            "#,
            Self::generate_stat_card(
                "&#128193;",
                &format!("{}/{}", data.reports.len(), total_logs),
                "Logs Summarized",
                "info"
            ),
            Self::generate_stat_card(
                "&#128221;",
                &MetricValue::count(total_records).to_string(),
                "Total Records",
                "info"
            ),
            Self::generate_stat_card(
                "&#9888;",
                &data.failures.len().to_string(),
                "Failed Logs",
                failure_style
            ),
        )
    }

    /// CSS class for a metric value
    fn metric_style(value: &MetricValue) -> &'static str {
        match *value {
            MetricValue::Rate(rate) if rate >= dashboard_constants::SUCCESS_THRESHOLD => "success",
            MetricValue::Rate(rate) if rate >= dashboard_constants::WARNING_THRESHOLD => "warning",
            MetricValue::Rate(_) => "error",
            _ => "info",
        }
    }

    /// Generate a single statistics card; `icon` is trusted markup
    pub(crate) fn generate_stat_card(icon: &str, value: &str, label: &str, style_class: &str) -> String {
        format!(
            r#"
            <div class="stat-card">
                <div class="stat-icon {}">{}</div>
                <div class="stat-value">{}</div>
                <div class="stat-label">{}</div>
            </div>
            "#,
            style_class,
            icon,
            escape_html(value),
            escape_html(label)
        )
    }

    fn generate_report_section(
        index: usize,
        report: &MetricReport,
        charts: &mut Vec<ChartSpec>,
    ) -> String {
        let cards: String = report
            .metrics
            .iter()
            .map(|metric| {
                Self::generate_stat_card(
                    "&#8226;",
                    &metric.value.to_string(),
                    &metric.label,
                    Self::metric_style(&metric.value),
                )
            })
            .collect();

        let mut panels = String::new();
        for (t, table) in report.frequency_tables.iter().enumerate() {
            let id = format!("chart-{index}-freq-{t}");
            panels.push_str(&Self::chart_panel(&id, &table.title));
            panels.push_str(&Self::frequency_table(table));
            charts.push(ChartSpec::from_frequency(id, table));
        }
        for (t, table) in report.grouped_tables.iter().enumerate() {
            let id = format!("chart-{index}-group-{t}");
            panels.push_str(&Self::chart_panel(
                &id,
                &format!("{} ({})", table.title, table.filter),
            ));
            panels.push_str(&Self::grouped_table(table));
            charts.push(ChartSpec::from_grouped(id, table));
        }
        if !report.numeric_summaries.is_empty() {
            panels.push_str(&format!(
                r#"<div class="chart-container"><h3 class="chart-title">Numeric columns</h3>{}</div>"#,
                Self::numeric_table(&report.numeric_summaries)
            ));
        }
        if let Some(ref matrix) = report.correlation {
            panels.push_str(&format!(
                r#"<div class="chart-container"><h3 class="chart-title">Correlation</h3>{}</div>"#,
                Self::correlation_table(matrix)
            ));
        }

        format!(
            r#"
            <div class="log-section">
                <div class="section-header">
                    <div class="section-title">{}</div>
                    <div class="section-subtitle">{} &middot; {} rows</div>
                </div>
                <div class="stats-grid">{cards}</div>
                <div class="chart-grid">{panels}</div>
            </div>
            "#,
            escape_html(&report.title),
            escape_html(&report.source),
            report.total_rows
        )
    }

    pub(crate) fn chart_panel(id: &str, title: &str) -> String {
        format!(
            r#"
            <div class="chart-container">
                <h3 class="chart-title">{}</h3>
                <canvas id="{}" height="220"></canvas>
            </div>
            "#,
            escape_html(title),
            escape_html(id)
        )
    }

    fn frequency_table(table: &FrequencyTable) -> String {
        let mut rows: String = table
            .entries
            .iter()
            .map(|entry| {
                format!(
                    r#"<tr><td>{}</td><td class="num">{}</td></tr>"#,
                    escape_html(&entry.value),
                    entry.count
                )
            })
            .collect();
        if table.null_count > 0 {
            rows.push_str(&format!(
                r#"<tr><td class="null">null</td><td class="num">{}</td></tr>"#,
                table.null_count
            ));
        }

        format!(
            r#"<div class="chart-container"><table><tr><th>{}</th><th>count</th></tr>{rows}</table></div>"#,
            escape_html(&table.column)
        )
    }

    fn grouped_table(table: &GroupedTable) -> String {
        let mut header: String = table
            .group_columns
            .iter()
            .map(|c| format!("<th>{}</th>", escape_html(c)))
            .collect();
        header.push_str(&format!(
            "<th>{} (sum)</th><th>rows</th>",
            escape_html(&table.value_column)
        ));

        let rows: String = table
            .rows
            .iter()
            .map(|row| {
                let keys: String = row
                    .key
                    .iter()
                    .map(|k| format!("<td>{}</td>", escape_html(k)))
                    .collect();
                format!(
                    r#"<tr>{keys}<td class="num">{}</td><td class="num">{}</td></tr>"#,
                    format_number(row.sum),
                    row.count
                )
            })
            .collect();

        format!(r#"<div class="chart-container"><table><tr>{header}</tr>{rows}</table></div>"#)
    }

    pub(crate) fn numeric_table(summaries: &[NumericSummary]) -> String {
        let cell = |value: Option<f64>| match value {
            Some(v) => format!(r#"<td class="num">{}</td>"#, format_number(v)),
            None => r#"<td class="null">n/a</td>"#.to_string(),
        };
        let rows: String = summaries
            .iter()
            .map(|s| {
                format!(
                    r#"<tr><td>{}</td><td class="num">{}</td>{}{}{}{}{}{}{}</tr>"#,
                    escape_html(&s.column),
                    s.count,
                    cell(s.mean),
                    cell(s.std),
                    cell(s.min),
                    cell(s.q25),
                    cell(s.median),
                    cell(s.q75),
                    cell(s.max)
                )
            })
            .collect();

        format!(
            "<table><tr><th>column</th><th>count</th><th>mean</th><th>std</th><th>min</th>\
             <th>25%</th><th>50%</th><th>75%</th><th>max</th></tr>{rows}</table>"
        )
    }

    pub(crate) fn correlation_table(matrix: &CorrelationMatrix) -> String {
        let header: String = matrix
            .columns
            .iter()
            .map(|c| format!("<th>{}</th>", escape_html(c)))
            .collect();
        let rows: String = matrix
            .columns
            .iter()
            .zip(&matrix.values)
            .map(|(column, values)| {
                let cells: String = values
                    .iter()
                    .map(|&v| {
                        if v.is_nan() {
                            r#"<td class="null">n/a</td>"#.to_string()
                        } else {
                            format!(
                                r#"<td class="num" style="background-color: {}">{v:.2}</td>"#,
                                Self::correlation_color(v)
                            )
                        }
                    })
                    .collect();
                format!("<tr><th>{}</th>{cells}</tr>", escape_html(column))
            })
            .collect();

        format!("<table><tr><th></th>{header}</tr>{rows}</table>")
    }

    /// Blue for positive, red for negative, opacity by magnitude
    fn correlation_color(value: f64) -> String {
        let alpha = value.abs().min(1.0) * 0.6;
        if value >= 0.0 {
            format!("rgba(37, 99, 235, {alpha:.2})")
        } else {
            format!("rgba(220, 38, 38, {alpha:.2})")
        }
    }

    fn generate_failures_section(failures: &[JobFailure]) -> String {
        if failures.is_empty() {
            return String::new();
        }

        let items: String = failures
            .iter()
            .map(|failure| {
                format!(
                    r#"<div class="failure-item"><strong>{}</strong> {} &middot; {}</div>"#,
                    escape_html(failure.kind.key()),
                    escape_html(&failure.path),
                    escape_html(&failure.error)
                )
            })
            .collect();

        format!(
            r#"
            <div class="chart-container">
                <h3 class="chart-title">&#10060; Failed Logs ({})</h3>
                {items}
            </div>
            "#,
            failures.len()
        )
    }

    pub(crate) fn generate_javascript() -> &'static str {
        r#"
        document.addEventListener('DOMContentLoaded', function() {
            if (typeof Chart === 'undefined' || !Array.isArray(window.chartSpecs)) {
                return;
            }
            window.chartSpecs.forEach(function(spec) {
                const ctx = document.getElementById(spec.id);
                if (!ctx) {
                    return;
                }
                new Chart(ctx, {
                    type: 'bar',
                    data: {
                        labels: spec.labels,
                        datasets: [{
                            data: spec.values,
                            backgroundColor: '#2563eb',
                            borderRadius: 4
                        }]
                    },
                    options: {
                        responsive: true,
                        plugins: { legend: { display: false } },
                        scales: { y: { beginAtZero: true } }
                    }
                });
            });
        });
        "#
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::LogKind;
    use crate::summary::report::GroupedRow;
    use std::error::Error;
    use tempfile::NamedTempFile;

    fn create_test_report() -> MetricReport {
        let mut report = MetricReport::new("Service Subscription Analysis", "5_service.csv", 3);
        report.kind = Some(LogKind::Subscription);
        report.push_metric("success_rate", "Active rate", MetricValue::Rate(0.95));
        report.push_metric("monthly_revenue", "Monthly revenue", MetricValue::Currency(17.0));
        report.frequency_tables.push(FrequencyTable::from_cells(
            "service_type",
            [Some("Video"), Some("<Music>")],
            None,
        ));
        report.grouped_tables.push(GroupedTable {
            title: "Revenue by service type".to_string(),
            group_columns: vec!["service_type".to_string()],
            value_column: "monthly_fee_usd".to_string(),
            filter: "subscription_status == ACTIVE".to_string(),
            rows: vec![GroupedRow {
                key: vec!["Video".to_string()],
                sum: 10.0,
                count: 1,
            }],
        });
        report
    }

    fn create_test_dashboard_data() -> DashboardData {
        DashboardData {
            reports: vec![create_test_report()],
            failures: vec![JobFailure {
                kind: LogKind::Auth,
                path: "missing.csv".to_string(),
                error: "File not found: missing.csv".to_string(),
            }],
            config: Config::default(),
            timestamp: "2024-01-01 12:00:00 UTC".to_string(),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_script_json_escapes_closing_tags() {
        let json = script_json(&vec!["</script>"]).unwrap();
        assert!(!json.contains("</script>"));
        assert!(json.contains("<\\/script>"));
    }

    #[test]
    fn test_metric_style() {
        assert_eq!(HtmlDashboard::metric_style(&MetricValue::Rate(0.95)), "success");
        assert_eq!(HtmlDashboard::metric_style(&MetricValue::Rate(0.75)), "warning");
        assert_eq!(HtmlDashboard::metric_style(&MetricValue::Rate(0.1)), "error");
        assert_eq!(HtmlDashboard::metric_style(&MetricValue::Count(3)), "info");
        assert_eq!(HtmlDashboard::metric_style(&MetricValue::Undefined), "info");
    }

    #[test]
    fn test_generate_stat_card_escapes() {
        let card = HtmlDashboard::generate_stat_card("&#8226;", "<b>", "A & B", "info");
        assert!(card.contains("&lt;b&gt;"));
        assert!(card.contains("A &amp; B"));
        assert!(card.contains("&#8226;"));
    }

    #[test]
    fn test_report_section_registers_charts() {
        let mut charts = Vec::new();
        let html = HtmlDashboard::generate_report_section(0, &create_test_report(), &mut charts);

        assert_eq!(charts.len(), 2);
        assert_eq!(charts[0].id, "chart-0-freq-0");
        assert_eq!(charts[0].labels, vec!["Video", "<Music>"]);
        assert_eq!(charts[1].values, vec![10.0]);
        assert!(html.contains(r#"id="chart-0-freq-0""#));
        assert!(html.contains("Revenue by service type (subscription_status == ACTIVE)"));
        assert!(html.contains("$17.00"));
    }

    #[test]
    fn test_frequency_table_is_rendered_without_charts() {
        let table = FrequencyTable::from_cells(
            "device_type",
            [Some("<Mobile>"), Some("Desktop"), Some("<Mobile>"), None],
            None,
        );
        let html = HtmlDashboard::frequency_table(&table);

        assert!(html.contains("<th>device_type</th><th>count</th>"));
        assert!(html.contains(r#"<tr><td>&lt;Mobile&gt;</td><td class="num">2</td></tr>"#));
        assert!(html.contains(r#"<tr><td>Desktop</td><td class="num">1</td></tr>"#));
        assert!(html.contains(r#"<td class="null">null</td><td class="num">1</td>"#));
        assert!(!html.contains("<Mobile>"));
    }

    #[test]
    fn test_correlation_table() {
        let matrix = CorrelationMatrix::compute(
            vec!["a".to_string(), "b".to_string()],
            &[vec![Some(1.0), Some(2.0)], vec![Some(3.0), Some(3.0)]],
        );
        let html = HtmlDashboard::correlation_table(&matrix);

        assert!(html.contains("1.00"));
        assert!(html.contains("n/a"));
    }

    #[test]
    fn test_generate_failures_section() {
        let data = create_test_dashboard_data();
        let html = HtmlDashboard::generate_failures_section(&data.failures);
        assert!(html.contains("Failed Logs (1)"));
        assert!(html.contains("missing.csv"));

        assert!(HtmlDashboard::generate_failures_section(&[]).is_empty());
    }

    #[test]
    fn test_generate_html_content() {
        let html = HtmlDashboard::generate_html_content(&create_test_dashboard_data()).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(dashboard_constants::CHART_JS_CDN));
        assert!(html.contains("window.chartSpecs = ["));
        assert!(html.contains("Service Subscription Analysis"));
        assert!(html.contains("&lt;Music&gt;"));
    }

    #[test]
    fn test_generate_dashboard_file_creation() -> Result<(), Box<dyn std::error::Error>> {
        let temp_file = NamedTempFile::new()?;
        HtmlDashboard::generate_dashboard(&create_test_dashboard_data(), temp_file.path())?;

        let content = std::fs::read_to_string(temp_file.path())?;
        assert!(content.contains("Server Log Dashboard"));
        Ok(())
    }

    #[test]
    fn test_dashboard_error_display_and_source() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let error = DashboardError::from(io_error);
        assert!(error.to_string().contains("Failed to write dashboard file"));
        assert!(error.source().is_some());

        let error = DashboardError::Serialization("bad".to_string());
        assert_eq!(error.to_string(), "Failed to serialize data: bad");
        assert!(error.source().is_none());
    }

    #[test]
    fn test_dashboard_data_from_outcome() {
        let outcome = BatchOutcome {
            completed: vec![create_test_report()],
            failures: vec![],
        };
        let data = DashboardData::from_outcome(&outcome, &Config::default(), "now".to_string());
        assert_eq!(data.reports.len(), 1);
        assert!(data.failures.is_empty());
    }
}
