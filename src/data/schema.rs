//! The five log schemas and their column role configuration

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declarative description of which columns serve which purpose
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnRoles {
    /// Column holding the outcome of each event
    pub status_column: Option<String>,
    /// Value of `status_column` counted as success
    pub success_value: Option<String>,
    /// Identifier columns reported as distinct counts
    pub id_columns: Vec<String>,
    /// Columns summarized numerically
    pub numeric_columns: Vec<String>,
    /// Columns reported as frequency tables
    pub categorical_columns: Vec<String>,
    /// Flag columns reported as true-rates
    pub boolean_columns: Vec<String>,
}

impl ColumnRoles {
    /// Status column and success value, when both are configured
    pub fn success_criterion(&self) -> Option<(&str, &str)> {
        match (&self.status_column, &self.success_value) {
            (Some(column), Some(value)) => Some((column.as_str(), value.as_str())),
            _ => None,
        }
    }

    /// Every column name the roles reference, in declaration order
    pub fn referenced_columns(&self) -> Vec<&str> {
        let mut columns: Vec<&str> = Vec::new();
        let all = self
            .status_column
            .iter()
            .chain(&self.id_columns)
            .chain(&self.numeric_columns)
            .chain(&self.categorical_columns)
            .chain(&self.boolean_columns);

        for column in all {
            if !columns.contains(&column.as_str()) {
                columns.push(column.as_str());
            }
        }
        columns
    }

    /// Check the roles are internally consistent
    pub fn validate(&self) -> Result<(), String> {
        if self.success_value.is_some() && self.status_column.is_none() {
            return Err("success_value is set but status_column is missing".to_string());
        }
        if let Some(empty) = self.referenced_columns().iter().find(|c| c.trim().is_empty()) {
            return Err(format!("column names cannot be blank (got '{empty}')"));
        }
        Ok(())
    }
}

fn names(columns: &[&str]) -> Vec<String> {
    columns.iter().map(|c| c.to_string()).collect()
}

/// One of the five log schemas
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    /// User login attempts
    Login,
    /// Session durations and data transfer
    Session,
    /// Authentication attempts
    Auth,
    /// Security events (blank requests, DOS attacks, ...)
    Security,
    /// Service subscriptions
    Subscription,
}

impl LogKind {
    pub const ALL: [LogKind; 5] = [
        LogKind::Login,
        LogKind::Session,
        LogKind::Auth,
        LogKind::Security,
        LogKind::Subscription,
    ];

    pub fn key(self) -> &'static str {
        match self {
            LogKind::Login => "login",
            LogKind::Session => "session",
            LogKind::Auth => "auth",
            LogKind::Security => "security",
            LogKind::Subscription => "subscription",
        }
    }

    /// 1-based position, used to number report files
    pub fn index(self) -> usize {
        match self {
            LogKind::Login => 1,
            LogKind::Session => 2,
            LogKind::Auth => 3,
            LogKind::Security => 4,
            LogKind::Subscription => 5,
        }
    }

    pub fn default_file_name(self) -> &'static str {
        match self {
            LogKind::Login => "1_user_login_log.csv",
            LogKind::Session => "2_session_duration_log.csv",
            LogKind::Auth => "3_authentication_attempts_log.csv",
            LogKind::Security => "4_security_events_log.csv",
            LogKind::Subscription => "5_service_subscription_log.csv",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            LogKind::Login => "User Login Analysis",
            LogKind::Session => "Session Duration Analysis",
            LogKind::Auth => "Authentication Attempts Analysis",
            LogKind::Security => "Security Events Analysis",
            LogKind::Subscription => "Service Subscription Analysis",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            LogKind::Login => "Analysis of user login attempts on the server",
            LogKind::Session => "Analysis of user session durations and server access patterns",
            LogKind::Auth => "Analysis of authenticated and unauthenticated access attempts",
            LogKind::Security => "Analysis of blank requests, DOS attacks, and security threats",
            LogKind::Subscription => "Analysis of user service subscriptions",
        }
    }

    /// Built-in column roles for this schema
    pub fn default_roles(self) -> ColumnRoles {
        match self {
            LogKind::Login => ColumnRoles {
                status_column: Some("login_status".to_string()),
                success_value: Some("SUCCESS".to_string()),
                id_columns: names(&["user_id", "ip_address"]),
                numeric_columns: vec![],
                categorical_columns: names(&[
                    "login_status",
                    "login_method",
                    "device_type",
                    "browser",
                ]),
                boolean_columns: vec![],
            },
            LogKind::Session => ColumnRoles {
                status_column: None,
                success_value: None,
                id_columns: vec![],
                numeric_columns: names(&[
                    "duration_minutes",
                    "data_transferred_mb",
                    "pages_accessed",
                ]),
                categorical_columns: names(&["session_status"]),
                boolean_columns: vec![],
            },
            LogKind::Auth => ColumnRoles {
                status_column: Some("auth_result".to_string()),
                success_value: Some("AUTHENTIC".to_string()),
                id_columns: names(&["ip_address"]),
                numeric_columns: names(&["attempt_count"]),
                categorical_columns: names(&["auth_result", "failure_reason", "geolocation"]),
                boolean_columns: vec![],
            },
            LogKind::Security => ColumnRoles {
                status_column: None,
                success_value: None,
                id_columns: names(&["source_ip"]),
                numeric_columns: names(&["requests_per_second"]),
                categorical_columns: names(&["event_type", "severity"]),
                boolean_columns: names(&["blocked"]),
            },
            LogKind::Subscription => ColumnRoles {
                status_column: Some("subscription_status".to_string()),
                success_value: Some("ACTIVE".to_string()),
                id_columns: names(&["subscription_id"]),
                numeric_columns: names(&["monthly_fee_usd"]),
                categorical_columns: names(&[
                    "service_type",
                    "service_name",
                    "subscription_status",
                ]),
                boolean_columns: names(&["auto_renew"]),
            },
        }
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
