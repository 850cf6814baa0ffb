use clap::{CommandFactory, Parser};
use logpulse::batch::{BatchOutcome, BatchRunner, Job, JobFailure, SummaryOptions};
use logpulse::config::{CliConfig, Config};
use logpulse::core::constants::output_formats;
use logpulse::data::{DatasetCache, LogKind};
use logpulse::reporting::logging;
use logpulse::reporting::profile_report::report_file_name;
use logpulse::reporting::{DashboardData, HtmlDashboard, ProfileReport};
use logpulse::summary::MetricReport;
use logpulse::ui::completion::print_completions;
use logpulse::ui::output;
use logpulse::ui::{Cli, Commands, ProgressReporter, cli_to_config};

use std::fs;
use std::path::PathBuf;

fn main() {
    let cli = Cli::parse();

    // Handle completion commands first
    if let Some(exit_code) = handle_completion_commands(&cli) {
        std::process::exit(exit_code);
    }

    match run_logpulse_logic(&cli) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Handle completion commands and return exit code if a completion command was processed
pub fn handle_completion_commands(cli: &Cli) -> Option<i32> {
    match cli.command {
        Some(Commands::CompletionGenerate { shell }) => {
            let mut app = Cli::command();
            print_completions(shell, &mut app);
            Some(0)
        }
        _ => None,
    }
}

/// Main logic extracted from main() for testing
pub fn run_logpulse_logic(cli: &Cli) -> Result<i32, Box<dyn std::error::Error>> {
    // Parse CLI arguments into CliConfig using the derive-based CLI
    let cli_config = cli_to_config(cli)?;

    // Load and merge configuration
    let config = load_and_merge_config(&cli_config)?;

    // Setup logging and output settings
    let output_settings = setup_output_settings(&cli_config, &config);
    logging::init_logger(output_settings.verbose, output_settings.quiet);
    logging::log_config_info(&config);

    let jobs = build_jobs(&config, &cli.selected_kinds(), cli_config.input.as_deref());
    let plan: Vec<(LogKind, &PathBuf)> = jobs.iter().map(|job| (job.kind, &job.path)).collect();
    logging::log_job_plan(&plan);

    let mut cache = DatasetCache::new();
    match cli.command {
        Some(Commands::Profile { .. }) => {
            run_profiles(&jobs, &config, &output_settings, &mut cache)
        }
        _ => run_summaries(&jobs, &config, &output_settings, &mut cache),
    }
}

/// Load configuration from file or standard locations and merge with CLI config
pub fn load_and_merge_config(cli_config: &CliConfig) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file).inspect_err(|e| {
            logging::log_error(
                &format!("Could not load config file '{config_file}'"),
                Some(e),
            );
        })?
    } else {
        let (config, warnings) = Config::load_from_standard_locations();
        // The logger is not set up yet
        for warning in warnings {
            eprintln!("Warning: {warning}");
        }
        config
    };

    // Merge CLI arguments with configuration (CLI takes precedence)
    config.merge_with_cli(cli_config);
    config.validate()?;
    Ok(config)
}

/// Settings for output formatting and display
pub struct OutputSettings {
    pub quiet: bool,
    pub verbose: bool,
    pub output_format: String,
    pub show_progress: bool,
}

impl OutputSettings {
    pub fn is_text(&self) -> bool {
        self.output_format == output_formats::TEXT
    }
}

/// Setup output settings based on CLI and config
pub fn setup_output_settings(cli_config: &CliConfig, config: &Config) -> OutputSettings {
    let quiet = cli_config.quiet;
    let verbose = config.verbose.unwrap_or(false);
    let output_format = config.output_format().to_string();
    let show_progress = !quiet && !cli_config.no_progress;

    OutputSettings {
        quiet,
        verbose,
        output_format,
        show_progress,
    }
}

/// One job per selected kind; `input` replaces the path of a single kind
pub fn build_jobs(config: &Config, kinds: &[LogKind], input: Option<&str>) -> Vec<Job> {
    kinds
        .iter()
        .map(|&kind| {
            let path = match input {
                Some(input) if kinds.len() == 1 => PathBuf::from(input),
                _ => config.path_for(kind),
            };
            Job::new(kind, path, config.roles_for(kind))
        })
        .collect()
}

/// Create progress reporter if needed
pub fn create_progress_reporter(output_settings: &OutputSettings) -> Option<ProgressReporter> {
    if output_settings.show_progress && output_settings.is_text() {
        Some(ProgressReporter::new(true))
    } else {
        None
    }
}

/// Summarize every job, print the reports and write the optional dashboard
pub fn run_summaries(
    jobs: &[Job],
    config: &Config,
    output_settings: &OutputSettings,
    cache: &mut DatasetCache,
) -> Result<i32, Box<dyn std::error::Error>> {
    let options = SummaryOptions {
        top_n: Some(config.top_n()),
        include_profile: config.include_profile.unwrap_or(false),
    };

    let mut progress = create_progress_reporter(output_settings);
    let mut runner = BatchRunner::new(cache);
    if let Some(progress) = progress.as_mut() {
        runner = runner.with_progress(progress);
    }
    let outcome = runner.summarize(jobs, options);

    output::display_results(&outcome, &output_settings.output_format, output_settings.quiet)?;

    if let Some(ref dashboard_path) = config.html_dashboard_path {
        write_dashboard(&outcome, config, dashboard_path, output_settings);
    }

    Ok(determine_exit_code(&outcome))
}

/// Generate the HTML dashboard; a write failure is reported but not fatal
pub fn write_dashboard(
    outcome: &BatchOutcome<MetricReport>,
    config: &Config,
    dashboard_path: &str,
    output_settings: &OutputSettings,
) {
    let dashboard_data = DashboardData::from_outcome(
        outcome,
        config,
        chrono::Utc::now()
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string(),
    );

    match HtmlDashboard::generate_dashboard(&dashboard_data, dashboard_path) {
        Ok(()) => {
            if output_settings.is_text() && !output_settings.quiet {
                println!("📊 HTML dashboard generated: {dashboard_path}");
            }
        }
        Err(e) => {
            logging::log_error("Failed to generate HTML dashboard", Some(&e));
            eprintln!("Warning: Failed to generate HTML dashboard: {e}");
        }
    }
}

/// Profile every job and write one HTML report per log into the report directory
pub fn run_profiles(
    jobs: &[Job],
    config: &Config,
    output_settings: &OutputSettings,
    cache: &mut DatasetCache,
) -> Result<i32, Box<dyn std::error::Error>> {
    let report_dir = config.report_dir();
    fs::create_dir_all(&report_dir).inspect_err(|e| {
        logging::log_error(
            &format!("Could not create report directory '{}'", report_dir.display()),
            Some(e),
        );
    })?;

    let mut progress = create_progress_reporter(output_settings);
    let mut runner = BatchRunner::new(cache);
    if let Some(progress) = progress.as_mut() {
        runner = runner.with_progress(progress);
    }
    let outcome = runner.profile(jobs);

    let mut written = Vec::with_capacity(outcome.completed.len());
    let mut failures = outcome.failures;
    for profiled in &outcome.completed {
        match ProfileReport::write(profiled.kind, &profiled.profile, &report_dir) {
            Ok(path) => written.push(path),
            Err(e) => {
                logging::log_error(
                    &format!("Failed to write {} profiling report", profiled.kind),
                    Some(&e),
                );
                failures.push(JobFailure {
                    kind: profiled.kind,
                    path: report_dir
                        .join(report_file_name(profiled.kind))
                        .display()
                        .to_string(),
                    error: e.to_string(),
                });
            }
        }
    }

    output::display_profile_results(&written, &failures, output_settings.quiet);

    Ok(if failures.is_empty() { 0 } else { 1 })
}

/// Exit code 1 when any log failed, 0 otherwise
pub fn determine_exit_code<T>(outcome: &BatchOutcome<T>) -> i32 {
    if outcome.is_success() { 0 } else { 1 }
}

#[cfg(test)]
#[allow(clippy::field_reassign_with_default)] // Test code for clarity
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    const LOGIN: &str = "timestamp,user_id,ip_address,login_status,login_method,device_type,browser\n\
        t1,u1,10.0.0.1,SUCCESS,password,Desktop,Chrome\n\
        t2,u2,10.0.0.2,SUCCESS,sso,Mobile,Safari\n\
        t3,u1,10.0.0.1,FAILED,password,Desktop,Chrome\n\
        t4,u3,10.0.0.3,SUCCESS,password,Desktop,Firefox\n";

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("logpulse").chain(args.iter().copied())).unwrap()
    }

    fn quiet_settings() -> OutputSettings {
        OutputSettings {
            quiet: true,
            verbose: false,
            output_format: output_formats::MINIMAL.to_string(),
            show_progress: false,
        }
    }

    fn config_for(dir: &Path) -> Config {
        let mut config = Config::default();
        config.data_dir = Some(dir.display().to_string());
        config
    }

    #[test]
    fn test_handle_completion_commands_none() {
        let cli = parse(&["login"]);
        assert_eq!(handle_completion_commands(&cli), None);

        let cli = parse(&["profile"]);
        assert_eq!(handle_completion_commands(&cli), None);
    }

    #[test]
    fn test_load_and_merge_config_no_config_flag() {
        let mut cli_config = CliConfig::default();
        cli_config.no_config = true;
        cli_config.top_n = Some(3);

        let config = load_and_merge_config(&cli_config).unwrap();
        assert_eq!(config.top_n, Some(3));
        assert_eq!(config.output_format(), output_formats::TEXT);
    }

    #[test]
    fn test_load_and_merge_config_with_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test_config.toml");
        fs::write(
            &config_path,
            r#"
            data_dir = "logs"
            top_n = 4
            output_format = "json"
            "#,
        )
        .unwrap();

        let mut cli_config = CliConfig::default();
        cli_config.config_file = Some(config_path.to_str().unwrap().to_string());
        cli_config.top_n = Some(2);

        let config = load_and_merge_config(&cli_config).unwrap();
        assert_eq!(config.data_dir, Some("logs".to_string()));
        assert_eq!(config.top_n, Some(2)); // CLI wins
        assert_eq!(config.output_format(), output_formats::JSON);
    }

    #[test]
    fn test_load_and_merge_config_missing_file() {
        let mut cli_config = CliConfig::default();
        cli_config.config_file = Some("/nonexistent/logpulse.toml".to_string());
        assert!(load_and_merge_config(&cli_config).is_err());
    }

    #[test]
    fn test_setup_output_settings() {
        let mut cli_config = CliConfig::default();
        cli_config.no_progress = true;
        let mut config = Config::default();
        config.verbose = Some(true);
        config.output_format = Some(output_formats::JSON.to_string());

        let settings = setup_output_settings(&cli_config, &config);
        assert!(!settings.quiet);
        assert!(settings.verbose);
        assert!(!settings.show_progress);
        assert!(!settings.is_text());
        assert!(create_progress_reporter(&settings).is_none());
    }

    #[test]
    fn test_build_jobs_uses_configured_paths() {
        let config = config_for(Path::new("logs"));
        let jobs = build_jobs(&config, &[LogKind::Login, LogKind::Auth], None);

        assert_eq!(jobs.len(), 2);
        assert_eq!(
            jobs[0].path,
            Path::new("logs").join(LogKind::Login.default_file_name())
        );
        assert_eq!(jobs[1].roles, LogKind::Auth.default_roles());
    }

    #[test]
    fn test_build_jobs_with_input_override() {
        let config = config_for(Path::new("logs"));
        let jobs = build_jobs(&config, &[LogKind::Auth], Some("elsewhere/auth.csv"));

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].path, PathBuf::from("elsewhere/auth.csv"));
    }

    #[test]
    fn test_determine_exit_code() {
        let ok: BatchOutcome<()> = BatchOutcome {
            completed: vec![()],
            failures: vec![],
        };
        assert_eq!(determine_exit_code(&ok), 0);

        let failed: BatchOutcome<()> = BatchOutcome {
            completed: vec![],
            failures: vec![JobFailure {
                kind: LogKind::Login,
                path: "x.csv".to_string(),
                error: "File not found: x.csv".to_string(),
            }],
        };
        assert_eq!(determine_exit_code(&failed), 1);
    }

    #[test]
    fn test_run_summaries_writes_dashboard() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(LogKind::Login.default_file_name()), LOGIN).unwrap();
        let dashboard = temp_dir.path().join("dashboard.html");

        let mut config = config_for(temp_dir.path());
        config.html_dashboard_path = Some(dashboard.display().to_string());
        let jobs = build_jobs(&config, &[LogKind::Login], None);

        let mut cache = DatasetCache::new();
        let exit_code = run_summaries(&jobs, &config, &quiet_settings(), &mut cache).unwrap();

        assert_eq!(exit_code, 0);
        let html = fs::read_to_string(dashboard).unwrap();
        assert!(html.contains("User Login Analysis"));
        assert!(html.contains("75.0%"));
    }

    #[test]
    fn test_run_summaries_missing_log_fails() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(LogKind::Login.default_file_name()), LOGIN).unwrap();

        let config = config_for(temp_dir.path());
        let jobs = build_jobs(&config, &[LogKind::Login, LogKind::Session], None);

        let mut cache = DatasetCache::new();
        let exit_code = run_summaries(&jobs, &config, &quiet_settings(), &mut cache).unwrap();
        assert_eq!(exit_code, 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_run_profiles_writes_reports() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(LogKind::Login.default_file_name()), LOGIN).unwrap();

        let mut config = config_for(temp_dir.path());
        let report_dir = temp_dir.path().join("reports");
        config.report_dir = Some(report_dir.display().to_string());
        let jobs = build_jobs(&config, &[LogKind::Login], None);

        let mut cache = DatasetCache::new();
        let exit_code = run_profiles(&jobs, &config, &quiet_settings(), &mut cache).unwrap();

        assert_eq!(exit_code, 0);
        assert!(report_dir.join("1_profiling_report.html").is_file());
    }
}
