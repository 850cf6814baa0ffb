//! Output formatting and display logic for logpulse

use crate::batch::{BatchOutcome, JobFailure};
use crate::core::constants::display::{
    ERROR_EMOJI, FILE_EMOJI, METRICS_EMOJI, SUCCESS_EMOJI, UNDEFINED, WARNING_EMOJI,
};
use crate::core::constants::output_formats;
use crate::core::error::Result;
use crate::summary::correlation::CorrelationMatrix;
use crate::summary::frequency::FrequencyTable;
use crate::summary::numeric::NumericSummary;
use crate::summary::profile::DatasetProfile;
use crate::summary::report::{GroupedTable, MetricReport, MetricValue, format_number};
use crate::ui::color::{Colors, colorize, symbol};
use serde::Serialize;
use std::fmt::Write;
use std::path::PathBuf;

const LABEL_WIDTH: usize = 32;
const VALUE_WIDTH: usize = 28;

/// Display summary results based on output format
pub fn display_results(
    outcome: &BatchOutcome<MetricReport>,
    output_format: &str,
    quiet: bool,
) -> Result<()> {
    match output_format {
        output_formats::MINIMAL => print!("{}", render_minimal(outcome)),
        output_formats::JSON => println!("{}", render_json(outcome)?),
        _ => print!("{}", render_text(outcome, quiet)),
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    status: &'static str,
    reports: &'a [MetricReport],
    failures: &'a [JobFailure],
}

/// Reports and failures as pretty-printed JSON
pub fn render_json(outcome: &BatchOutcome<MetricReport>) -> Result<String> {
    let output = JsonOutput {
        status: if outcome.is_success() {
            "success"
        } else {
            "failure"
        },
        reports: &outcome.completed,
        failures: &outcome.failures,
    };
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Plain `key value` lines without colors or emojis
pub fn render_minimal(outcome: &BatchOutcome<MetricReport>) -> String {
    let mut out = String::new();
    for report in &outcome.completed {
        let prefix = report_prefix(report);
        for metric in &report.metrics {
            let _ = writeln!(out, "{prefix}.{} {}", metric.key, minimal_value(&metric.value));
        }
    }
    for failure in &outcome.failures {
        let _ = writeln!(out, "FAILED {} {}", failure.kind, failure.error);
    }
    out
}

fn report_prefix(report: &MetricReport) -> String {
    match report.kind {
        Some(kind) => kind.key().to_string(),
        None => report.source.clone(),
    }
}

fn minimal_value(value: &MetricValue) -> String {
    match *value {
        MetricValue::Count(n) => n.to_string(),
        MetricValue::Rate(v) | MetricValue::Number(v) | MetricValue::Currency(v) => v.to_string(),
        MetricValue::Undefined => UNDEFINED.to_string(),
    }
}

/// Human-readable report with colors and emojis when the terminal allows
pub fn render_text(outcome: &BatchOutcome<MetricReport>, quiet: bool) -> String {
    let mut out = String::new();

    if !quiet {
        for report in &outcome.completed {
            write_report(&mut out, report);
        }
    }

    if outcome.failures.is_empty() {
        if !quiet {
            let _ = writeln!(
                out,
                "{} {}",
                colorize(symbol(SUCCESS_EMOJI, "OK"), Colors::GREEN),
                colorize(
                    &format!("{} log(s) summarized", outcome.completed.len()),
                    Colors::GREEN
                )
            );
        }
    } else {
        let _ = writeln!(
            out,
            "{} {}",
            colorize(symbol(WARNING_EMOJI, "!!"), Colors::RED),
            colorize(
                &format!(
                    "{} of {} log(s) failed",
                    outcome.failures.len(),
                    outcome.total_jobs()
                ),
                Colors::RED
            )
        );
        for failure in &outcome.failures {
            let _ = writeln!(
                out,
                "  {} {} {}",
                colorize(symbol(ERROR_EMOJI, "-"), Colors::RED),
                colorize(failure.kind.key(), Colors::BOLD),
                failure.error
            );
        }
    }
    out
}

fn write_report(out: &mut String, report: &MetricReport) {
    let _ = writeln!(
        out,
        "{} {}",
        symbol(METRICS_EMOJI, "=="),
        colorize(&report.title, Colors::CYAN)
    );
    let _ = writeln!(
        out,
        "   {} {} ({} rows)",
        symbol(FILE_EMOJI, ""),
        colorize(&report.source, Colors::BRIGHT_BLACK),
        report.total_rows
    );

    for metric in &report.metrics {
        let value = metric.value.to_string();
        let value = if metric.value.is_undefined() {
            colorize(&value, Colors::DIM)
        } else {
            colorize(&value, Colors::BRIGHT_WHITE)
        };
        let _ = writeln!(out, "   {:<LABEL_WIDTH$} {value}", metric.label);
    }

    for table in &report.frequency_tables {
        write_frequency_table(out, table, report.total_rows);
    }
    if !report.numeric_summaries.is_empty() {
        write_numeric_summaries(out, &report.numeric_summaries);
    }
    for table in &report.grouped_tables {
        write_grouped_table(out, table);
    }
    if let Some(ref matrix) = report.correlation {
        write_correlation(out, matrix);
    }
    if let Some(ref profile) = report.profile {
        write_profile(out, profile);
    }
    out.push('\n');
}

fn subheading(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n   {}", colorize(title, Colors::YELLOW));
}

fn write_frequency_table(out: &mut String, table: &FrequencyTable, total_rows: usize) {
    subheading(out, &table.title);
    if table.is_empty() {
        let _ = writeln!(out, "     {}", colorize("(no values)", Colors::DIM));
        return;
    }
    for entry in &table.entries {
        let share = match total_rows {
            0 => String::new(),
            rows => format!("{:>6.1}%", entry.count as f64 * 100.0 / rows as f64),
        };
        let _ = writeln!(
            out,
            "     {:<VALUE_WIDTH$} {:>8} {share}",
            entry.value, entry.count
        );
    }
    if table.distinct > table.entries.len() {
        let _ = writeln!(
            out,
            "     {}",
            colorize(
                &format!("... {} more value(s)", table.distinct - table.entries.len()),
                Colors::DIM
            )
        );
    }
}

fn optional(value: Option<f64>) -> String {
    value.map_or_else(|| UNDEFINED.to_string(), format_number)
}

fn write_numeric_summaries(out: &mut String, summaries: &[NumericSummary]) {
    subheading(out, "Numeric columns");
    let _ = writeln!(
        out,
        "     {:<VALUE_WIDTH$} {:>8} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "column", "count", "mean", "std", "min", "median", "max"
    );
    for s in summaries {
        let _ = writeln!(
            out,
            "     {:<VALUE_WIDTH$} {:>8} {:>10} {:>10} {:>10} {:>10} {:>10}",
            s.column,
            s.count,
            optional(s.mean),
            optional(s.std),
            optional(s.min),
            optional(s.median),
            optional(s.max)
        );
    }
}

fn write_grouped_table(out: &mut String, table: &GroupedTable) {
    subheading(out, &format!("{} ({})", table.title, table.filter));
    if table.is_empty() {
        let _ = writeln!(out, "     {}", colorize("(no rows)", Colors::DIM));
        return;
    }
    for row in &table.rows {
        let _ = writeln!(
            out,
            "     {:<VALUE_WIDTH$} {:>12} {:>6} row(s)",
            row.key.join(" / "),
            format_number(row.sum),
            row.count
        );
    }
}

fn write_correlation(out: &mut String, matrix: &CorrelationMatrix) {
    subheading(out, "Correlation");
    let mut header = format!("     {:<VALUE_WIDTH$}", "");
    for column in &matrix.columns {
        let _ = write!(header, " {:>8}", abbreviate(column, 8));
    }
    let _ = writeln!(out, "{header}");

    for (column, row) in matrix.columns.iter().zip(&matrix.values) {
        let mut line = format!("     {column:<VALUE_WIDTH$}");
        for value in row {
            if value.is_nan() {
                let _ = write!(line, " {UNDEFINED:>8}");
            } else {
                let _ = write!(line, " {value:>8.2}");
            }
        }
        let _ = writeln!(out, "{line}");
    }
}

fn abbreviate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        text.chars().take(width - 1).chain(['~']).collect()
    }
}

fn write_profile(out: &mut String, profile: &DatasetProfile) {
    subheading(out, "Profile");
    let missing = profile
        .missing_ratio()
        .map_or_else(|| UNDEFINED.to_string(), |r| format!("{:.1}%", r * 100.0));
    let _ = writeln!(
        out,
        "     {} columns, {} missing cells ({missing}), {} duplicate row(s)",
        profile.columns, profile.missing_cells, profile.duplicate_rows
    );
    for info in &profile.column_info {
        let _ = writeln!(
            out,
            "     {:<VALUE_WIDTH$} {:<8} {:>8} non-null {:>8} null {:>8} unique",
            info.name,
            info.column_type.label(),
            info.non_null,
            info.null,
            info.unique
        );
    }
}

/// Display the paths written by the profile command
pub fn display_profile_results(written: &[PathBuf], failures: &[JobFailure], quiet: bool) {
    if !quiet {
        for path in written {
            println!(
                "{} {}",
                colorize(symbol(SUCCESS_EMOJI, "OK"), Colors::GREEN),
                path.display()
            );
        }
    }
    for failure in failures {
        eprintln!(
            "{} {}: {}",
            colorize(symbol(ERROR_EMOJI, "FAILED"), Colors::RED),
            failure.kind,
            failure.error
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::LogKind;
    use crate::summary::report::{GroupedRow, MetricValue};

    fn outcome() -> BatchOutcome<MetricReport> {
        let mut report = MetricReport::new("User Login Analysis", "1_user_login_log.csv", 4);
        report.kind = Some(LogKind::Login);
        report.push_metric("total_rows", "Total records", MetricValue::count(4));
        report.push_metric("success_rate", "Success rate", MetricValue::Rate(0.75));
        report.push_metric("avg", "Average", MetricValue::Undefined);
        report.frequency_tables.push(FrequencyTable::from_cells(
            "browser",
            [Some("Chrome"), Some("Chrome"), Some("Safari"), None],
            Some(1),
        ));
        report.numeric_summaries.push(NumericSummary::from_values("d", &[1.0, 3.0]));
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
        report.correlation = Some(CorrelationMatrix::compute(
            vec!["a".to_string(), "b".to_string()],
            &[vec![Some(1.0), Some(2.0)], vec![Some(1.0), Some(1.0)]],
        ));

        BatchOutcome {
            completed: vec![report],
            failures: vec![JobFailure {
                kind: LogKind::Auth,
                path: "3_authentication_attempts_log.csv".to_string(),
                error: "File not found: 3_authentication_attempts_log.csv".to_string(),
            }],
        }
    }

    #[test]
    fn test_render_minimal() {
        let text = render_minimal(&outcome());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "login.total_rows 4");
        assert_eq!(lines[1], "login.success_rate 0.75");
        assert_eq!(lines[2], "login.avg n/a");
        assert!(lines[3].starts_with("FAILED auth File not found"));
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&outcome()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["status"], "failure");
        assert_eq!(value["reports"][0]["kind"], "login");
        assert_eq!(value["reports"][0]["metrics"][1]["value"]["value"], 0.75);
        assert!(value["reports"][0]["correlation"]["values"][0][1].is_null());
        assert_eq!(value["failures"][0]["kind"], "auth");
    }

    #[test]
    fn test_render_text() {
        let text = render_text(&outcome(), false);

        assert!(text.contains("User Login Analysis"));
        assert!(text.contains("75.0%"));
        assert!(text.contains("Chrome"));
        assert!(text.contains("... 1 more value(s)"));
        assert!(text.contains("Revenue by service type (subscription_status == ACTIVE)"));
        assert!(text.contains("1 of 2 log(s) failed"));
    }

    #[test]
    fn test_render_text_quiet_only_shows_failures() {
        let text = render_text(&outcome(), true);

        assert!(!text.contains("User Login Analysis"));
        assert!(text.contains("failed"));

        let clean = BatchOutcome::<MetricReport> {
            completed: vec![],
            failures: vec![],
        };
        assert!(render_text(&clean, true).is_empty());
    }

    #[test]
    fn test_abbreviate() {
        assert_eq!(abbreviate("short", 8), "short");
        assert_eq!(abbreviate("duration_minutes", 8), "duratio~");
    }

    #[test]
    fn test_display_functions_dont_panic() {
        display_results(&outcome(), output_formats::TEXT, false).unwrap();
        display_results(&outcome(), output_formats::MINIMAL, false).unwrap();
        display_results(&outcome(), output_formats::JSON, false).unwrap();
        display_profile_results(&[PathBuf::from("1_profiling_report.html")], &[], false);
    }
}
