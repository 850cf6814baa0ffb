//! Domain metrics for each log kind, layered over the generic summary

use crate::core::error::Result;
use crate::data::schema::{ColumnRoles, LogKind};
use crate::summary::filter::RowFilter;
use crate::summary::report::{MetricReport, MetricValue};
use crate::summary::summarizer::Summarizer;

/// Values the analyses match on
pub mod values {
    pub const AUTHENTIC: &str = "AUTHENTIC";
    pub const UNAUTHENTIC: &str = "UNAUTHENTIC";
    pub const ACTIVE: &str = "ACTIVE";
    pub const CRITICAL: &str = "CRITICAL";

    pub const BLANK_REQUEST: &str = "BLANK_REQUEST";
    pub const DOS_ATTACK: &str = "DOS_ATTACK";
    pub const SQL_INJECTION: &str = "SQL_INJECTION";
    pub const XSS_ATTEMPT: &str = "XSS_ATTEMPT";
    pub const NORMAL: &str = "NORMAL";

    pub const ATTACK_EVENTS: [&str; 4] = [BLANK_REQUEST, DOS_ATTACK, SQL_INJECTION, XSS_ATTEMPT];
    pub const ALL_EVENTS: [&str; 5] = [
        BLANK_REQUEST,
        DOS_ATTACK,
        SQL_INJECTION,
        XSS_ATTEMPT,
        NORMAL,
    ];
}

/// Summarize `summarizer` as a log of `kind`
pub fn analyze(
    kind: LogKind,
    summarizer: &Summarizer<'_>,
    roles: &ColumnRoles,
    top_n: Option<usize>,
) -> Result<MetricReport> {
    let mut report = summarizer.summarize(roles, top_n)?;
    report.kind = Some(kind);
    report.title = kind.title().to_string();

    match kind {
        LogKind::Login => {}
        LogKind::Session => session(summarizer, &mut report)?,
        LogKind::Auth => auth(summarizer, &mut report, top_n)?,
        LogKind::Security => security(summarizer, &mut report, top_n)?,
        LogKind::Subscription => subscription(summarizer, &mut report)?,
    }

    Ok(report)
}

fn session(s: &Summarizer<'_>, report: &mut MetricReport) -> Result<()> {
    report.push_metric(
        "avg_duration_minutes",
        "Avg duration (min)",
        MetricValue::number(s.mean("duration_minutes")?),
    );
    report.push_metric(
        "total_data_mb",
        "Total data transferred (MB)",
        MetricValue::Number(s.sum("data_transferred_mb")?),
    );
    report.push_metric(
        "avg_pages_accessed",
        "Avg pages / session",
        MetricValue::number(s.mean("pages_accessed")?),
    );
    Ok(())
}

fn auth(s: &Summarizer<'_>, report: &mut MetricReport, top_n: Option<usize>) -> Result<()> {
    let unauthentic = s.filtered(&RowFilter::equals("auth_result", values::UNAUTHENTIC))?;

    report.push_metric(
        "unauthentic_attempts",
        "Unauthentic attempts",
        MetricValue::count(unauthentic.count_total()),
    );
    report.push_metric(
        "unauthentic_rate",
        "Unauthentic rate",
        MetricValue::rate(s.rate("auth_result", values::UNAUTHENTIC)?),
    );
    report.push_metric(
        "authentic_attempts",
        "Authentic attempts",
        MetricValue::count(s.count_where(&RowFilter::equals("auth_result", values::AUTHENTIC))?),
    );
    report.push_metric(
        "suspicious_ips",
        "Suspicious IPs",
        MetricValue::count(unauthentic.distinct_count("ip_address")?),
    );

    report.frequency_tables.push(
        unauthentic
            .frequency_table("failure_reason", top_n)?
            .titled("Failure reasons (unauthentic)"),
    );
    report.frequency_tables.push(
        unauthentic
            .frequency_table("ip_address", top_n)?
            .titled("Top suspicious IPs"),
    );
    Ok(())
}

fn security(s: &Summarizer<'_>, report: &mut MetricReport, top_n: Option<usize>) -> Result<()> {
    for event in values::ALL_EVENTS {
        report.push_metric(
            format!("events_{}", event.to_lowercase()),
            format!("{event} events"),
            MetricValue::count(s.count_where(&RowFilter::equals("event_type", event))?),
        );
    }

    let blank = s.filtered(&RowFilter::equals("event_type", values::BLANK_REQUEST))?;
    report.push_metric(
        "blank_blocked",
        "Blank requests blocked",
        MetricValue::count(blank.true_count("blocked")?),
    );
    report.push_metric(
        "blank_critical",
        "Blank requests critical",
        MetricValue::count(blank.count_where(&RowFilter::equals("severity", values::CRITICAL))?),
    );
    report.push_metric(
        "blank_block_rate",
        "Blank request block rate",
        MetricValue::rate(blank.true_rate("blocked")?),
    );

    let dos = s.filtered(&RowFilter::equals("event_type", values::DOS_ATTACK))?;
    let rps = dos.numeric_summary("requests_per_second")?;
    report.push_metric(
        "dos_blocked",
        "DOS attacks blocked",
        MetricValue::count(dos.true_count("blocked")?),
    );
    report.push_metric(
        "dos_avg_rps",
        "DOS avg requests/sec",
        MetricValue::number(rps.mean),
    );
    report.push_metric(
        "dos_max_rps",
        "DOS max requests/sec",
        MetricValue::number(rps.max),
    );

    let attacks = s.filtered(&RowFilter::one_of("event_type", &values::ATTACK_EVENTS))?;
    report.frequency_tables.push(
        attacks
            .frequency_table("source_ip", top_n)?
            .titled("Top attacking source IPs"),
    );
    report.frequency_tables.push(
        s.frequency_table("blocked", None)?
            .titled("Blocked vs allowed"),
    );
    Ok(())
}

fn subscription(s: &Summarizer<'_>, report: &mut MetricReport) -> Result<()> {
    let active_filter = RowFilter::equals("subscription_status", values::ACTIVE);
    let active = s.filtered(&active_filter)?;

    report.push_metric(
        "active_subscriptions",
        "Active subscriptions",
        MetricValue::count(active.count_total()),
    );
    report.push_metric(
        "monthly_revenue",
        "Monthly revenue",
        MetricValue::Currency(active.sum("monthly_fee_usd")?),
    );

    report.grouped_tables.push(
        s.grouped_sum(&["service_type"], "monthly_fee_usd", &active_filter)?
            .titled("Revenue by service type"),
    );
    report.grouped_tables.push(
        s.grouped_sum(&["service_name"], "monthly_fee_usd", &active_filter)?
            .titled("Revenue by service name"),
    );
    report.grouped_tables.push(
        s.grouped_sum_counting(
            &["service_type", "service_name"],
            "monthly_fee_usd",
            Some("subscription_id"),
            &RowFilter::All,
        )?
        .titled("Service summary"),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::LogPulseError;
    use crate::data::dataset::Dataset;

    fn run(kind: LogKind, csv: &str) -> Result<MetricReport> {
        let dataset = Dataset::from_csv_str(kind.default_file_name(), csv)?;
        analyze(kind, &Summarizer::new(&dataset), &kind.default_roles(), Some(10))
    }

    const LOGIN: &str = "timestamp,user_id,ip_address,login_status,login_method,device_type,browser\n\
        2024-01-01 10:00,u1,10.0.0.1,SUCCESS,password,Desktop,Chrome\n\
        2024-01-01 10:05,u2,10.0.0.2,SUCCESS,sso,Mobile,Safari\n\
        2024-01-01 10:07,u1,10.0.0.1,FAILED,password,Desktop,Chrome\n\
        2024-01-01 10:09,u3,10.0.0.3,SUCCESS,password,Desktop,Firefox\n";

    const SESSION: &str = "session_id,user_id,duration_minutes,data_transferred_mb,pages_accessed,session_status\n\
        s1,u1,10,1.5,4,COMPLETED\n\
        s2,u2,20,2.5,6,TIMEOUT\n";

    const AUTH: &str = "timestamp,ip_address,auth_result,failure_reason,attempt_count,geolocation\n\
        t1,A,UNAUTHENTIC,BAD_PASSWORD,3,US\n\
        t2,A,UNAUTHENTIC,EXPIRED_TOKEN,1,US\n\
        t3,B,AUTHENTIC,,1,DE\n";

    const SECURITY: &str = "timestamp,source_ip,event_type,severity,requests_per_second,blocked\n\
        t1,1.1.1.1,BLANK_REQUEST,CRITICAL,5,True\n\
        t2,1.1.1.1,BLANK_REQUEST,LOW,2,False\n\
        t3,2.2.2.2,DOS_ATTACK,HIGH,900,True\n\
        t4,3.3.3.3,DOS_ATTACK,HIGH,1100,True\n\
        t5,4.4.4.4,NORMAL,LOW,1,False\n";

    const SUBSCRIPTION: &str = "subscription_id,user_id,service_type,service_name,monthly_fee_usd,subscription_status,auto_renew\n\
        sub1,u1,Video,StreamMax,10,ACTIVE,True\n\
        sub2,u2,Video,StreamMax,5,CANCELLED,False\n\
        sub3,u3,Music,TuneBox,7,ACTIVE,True\n";

    #[test]
    fn test_login() {
        let report = run(LogKind::Login, LOGIN).unwrap();

        assert_eq!(report.kind, Some(LogKind::Login));
        assert_eq!(report.title, "User Login Analysis");
        assert_eq!(report.metric("success_rate"), Some(&MetricValue::Rate(0.75)));
        assert_eq!(report.metric("distinct_user_id"), Some(&MetricValue::Count(3)));
        assert_eq!(
            report.frequency_table("browser").unwrap().get("Chrome"),
            Some(2)
        );
    }

    #[test]
    fn test_session() {
        let report = run(LogKind::Session, SESSION).unwrap();

        assert_eq!(
            report.metric("avg_duration_minutes"),
            Some(&MetricValue::Number(15.0))
        );
        assert_eq!(report.metric("total_data_mb"), Some(&MetricValue::Number(4.0)));
        assert_eq!(
            report.metric("avg_pages_accessed"),
            Some(&MetricValue::Number(5.0))
        );
        assert!(report.correlation.is_some());
    }

    #[test]
    fn test_auth() {
        let report = run(LogKind::Auth, AUTH).unwrap();

        assert_eq!(
            report.metric("unauthentic_attempts"),
            Some(&MetricValue::Count(2))
        );
        assert_eq!(
            report.metric("authentic_attempts"),
            Some(&MetricValue::Count(1))
        );
        assert_eq!(report.metric("suspicious_ips"), Some(&MetricValue::Count(1)));
        assert_eq!(report.metric("distinct_ip_address"), Some(&MetricValue::Count(2)));

        let reasons = report
            .frequency_table("Failure reasons (unauthentic)")
            .unwrap();
        assert_eq!(reasons.total(), 2);
        assert_eq!(
            report.frequency_table("Top suspicious IPs").unwrap().get("A"),
            Some(2)
        );
    }

    #[test]
    fn test_security() {
        let report = run(LogKind::Security, SECURITY).unwrap();

        assert_eq!(
            report.metric("events_blank_request"),
            Some(&MetricValue::Count(2))
        );
        assert_eq!(
            report.metric("events_sql_injection"),
            Some(&MetricValue::Count(0))
        );
        assert_eq!(report.metric("blank_blocked"), Some(&MetricValue::Count(1)));
        assert_eq!(report.metric("blank_critical"), Some(&MetricValue::Count(1)));
        assert_eq!(
            report.metric("blank_block_rate"),
            Some(&MetricValue::Rate(0.5))
        );
        assert_eq!(report.metric("dos_blocked"), Some(&MetricValue::Count(2)));
        assert_eq!(
            report.metric("dos_avg_rps"),
            Some(&MetricValue::Number(1000.0))
        );
        assert_eq!(
            report.metric("dos_max_rps"),
            Some(&MetricValue::Number(1100.0))
        );

        let attackers = report.frequency_table("Top attacking source IPs").unwrap();
        assert_eq!(attackers.get("1.1.1.1"), Some(2));
        assert_eq!(attackers.get("4.4.4.4"), None);
    }

    #[test]
    fn test_security_without_blank_requests() {
        let csv = "timestamp,source_ip,event_type,severity,requests_per_second,blocked\n\
                   t1,1.1.1.1,NORMAL,LOW,1,False\n";
        let report = run(LogKind::Security, csv).unwrap();

        assert_eq!(
            report.metric("blank_block_rate"),
            Some(&MetricValue::Undefined)
        );
        assert_eq!(report.metric("dos_avg_rps"), Some(&MetricValue::Undefined));
    }

    #[test]
    fn test_subscription() {
        let report = run(LogKind::Subscription, SUBSCRIPTION).unwrap();

        assert_eq!(
            report.metric("active_subscriptions"),
            Some(&MetricValue::Count(2))
        );
        assert_eq!(
            report.metric("monthly_revenue"),
            Some(&MetricValue::Currency(17.0))
        );

        let by_type = report.grouped_table("Revenue by service type").unwrap();
        assert_eq!(by_type.sum_for(&["Video"]), Some(10.0));
        assert_eq!(by_type.sum_for(&["Music"]), Some(7.0));
        assert_eq!(by_type.rows[0].key, vec!["Video".to_string()]);

        let summary = report.grouped_table("Service summary").unwrap();
        assert_eq!(summary.sum_for(&["Video", "StreamMax"]), Some(15.0));
        assert_eq!(summary.rows[0].count, 2);
    }

    #[test]
    fn test_service_summary_counts_subscription_ids() {
        let csv = "subscription_id,user_id,service_type,service_name,monthly_fee_usd,subscription_status,auto_renew\n\
            sub1,u1,Video,StreamMax,10,ACTIVE,True\n\
            NaN,u2,Video,StreamMax,5,CANCELLED,False\n";
        let report = run(LogKind::Subscription, csv).unwrap();

        let summary = report.grouped_table("Service summary").unwrap();
        assert_eq!(summary.sum_for(&["Video", "StreamMax"]), Some(15.0));
        assert_eq!(summary.rows[0].count, 1);
    }

    #[test]
    fn test_empty_log_reports_sentinels() {
        let report = run(LogKind::Session, SESSION.lines().next().unwrap()).unwrap();

        assert_eq!(report.total_rows, 0);
        assert_eq!(
            report.metric("avg_duration_minutes"),
            Some(&MetricValue::Undefined)
        );
        assert_eq!(report.metric("total_data_mb"), Some(&MetricValue::Number(0.0)));
    }

    #[test]
    fn test_wrong_schema_is_column_not_found() {
        let result = run(LogKind::Subscription, LOGIN);
        assert!(matches!(result, Err(LogPulseError::ColumnNotFound { .. })));
    }
}
