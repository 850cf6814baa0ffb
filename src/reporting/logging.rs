use crate::config::Config;
use crate::data::schema::LogKind;
use log::{debug, error, info, warn};
use std::path::Path;

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Off // Only show structured logs in verbose mode
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    debug!("Logger initialized with level: {level:?}");
}

/// Log configuration information
pub fn log_config_info(config: &Config) {
    let include_profile = config.include_profile.unwrap_or(false);
    let file_overrides = config.files.as_ref().map_or(0, |files| files.len());
    let role_overrides = config.roles.as_ref().map_or(0, |roles| roles.len());

    info!(
        "Configuration: data_dir={}, top_n={}, format={}",
        config.data_dir().display(),
        config.top_n(),
        config.output_format()
    );
    info!("Profile: include={include_profile}");
    info!("Overrides: files={file_overrides}, roles={role_overrides}");
}

/// Log the planned jobs
pub fn log_job_plan<P: AsRef<Path>>(jobs: &[(LogKind, P)]) {
    info!("Processing {} log file(s)", jobs.len());
    for (i, (kind, path)) in jobs.iter().enumerate() {
        debug!("  {}. {kind}: {}", i + 1, path.as_ref().display());
    }
}

/// Log a freshly loaded dataset
pub fn log_dataset_loaded(kind: LogKind, source: &str, rows: usize, columns: usize) {
    info!("Loaded {kind} log {source}: {rows} rows, {columns} columns");
}

/// Log summary completion for one log
pub fn log_summary_complete(kind: LogKind, metrics: usize, duration_ms: u128) {
    info!("Summarized {kind} log: {metrics} metrics ({duration_ms}ms)");
}

/// Log batch completion
pub fn log_batch_complete(succeeded: usize, failed: usize, duration_ms: u128) {
    if failed == 0 {
        info!("✅ Batch complete: {succeeded} log(s) summarized ({duration_ms}ms)");
    } else {
        warn!(
            "❌ Batch complete: {succeeded} log(s) summarized, {failed} failed ({duration_ms}ms)"
        );
    }
}

/// Log dataset cache statistics
pub fn log_cache_stats(hits: usize, misses: usize) {
    debug!("Dataset cache: {hits} hit(s), {misses} miss(es)");
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}

/// Log warning information
pub fn log_warning(message: &str) {
    warn!("{message}");
}
