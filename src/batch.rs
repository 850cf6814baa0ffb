//! Runs summaries and profiles over several log files.
//!
//! Every job loads its file through the caller's [`DatasetCache`]. A job that
//! fails is recorded and the remaining jobs still run.

use crate::core::error::Result;
use crate::data::cache::DatasetCache;
use crate::data::dataset::Dataset;
use crate::data::schema::{ColumnRoles, LogKind};
use crate::reporting::logging::{
    log_batch_complete, log_cache_stats, log_dataset_loaded, log_error, log_summary_complete,
};
use crate::summary::analyses::analyze;
use crate::summary::profile::DatasetProfile;
use crate::summary::report::MetricReport;
use crate::summary::summarizer::Summarizer;
use crate::ui::progress::ProgressReporter;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

/// One log file to process
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub kind: LogKind,
    pub path: PathBuf,
    pub roles: ColumnRoles,
}

impl Job {
    pub fn new<P: Into<PathBuf>>(kind: LogKind, path: P, roles: ColumnRoles) -> Self {
        Self {
            kind,
            path: path.into(),
            roles,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobFailure {
    pub kind: LogKind,
    pub path: String,
    pub error: String,
}

/// Outcome of a batch: one entry per job, in job order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchOutcome<T> {
    pub completed: Vec<T>,
    pub failures: Vec<JobFailure>,
}

impl<T> BatchOutcome<T> {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn total_jobs(&self) -> usize {
        self.completed.len() + self.failures.len()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SummaryOptions {
    pub top_n: Option<usize>,
    pub include_profile: bool,
}

/// Profile of one log, ready to be written out
#[derive(Debug, Clone, PartialEq)]
pub struct ProfiledLog {
    pub kind: LogKind,
    pub profile: DatasetProfile,
}

pub struct BatchRunner<'a> {
    cache: &'a mut DatasetCache,
    progress: Option<&'a mut ProgressReporter>,
}

impl<'a> BatchRunner<'a> {
    pub fn new(cache: &'a mut DatasetCache) -> Self {
        Self {
            cache,
            progress: None,
        }
    }

    pub fn with_progress(mut self, progress: &'a mut ProgressReporter) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Summarize every job
    pub fn summarize(&mut self, jobs: &[Job], options: SummaryOptions) -> BatchOutcome<MetricReport> {
        self.run(jobs, "summarizing", |job, dataset| {
            let started = Instant::now();
            let summarizer = Summarizer::new(dataset);
            let mut report = analyze(job.kind, &summarizer, &job.roles, options.top_n)?;

            if options.include_profile {
                report.profile = Some(DatasetProfile::build(
                    dataset,
                    job.kind.title(),
                    job.kind.description(),
                )?);
            }

            log_summary_complete(
                job.kind,
                report.metrics.len(),
                started.elapsed().as_millis(),
            );
            Ok(report)
        })
    }

    /// Build a profile for every job
    pub fn profile(&mut self, jobs: &[Job]) -> BatchOutcome<ProfiledLog> {
        self.run(jobs, "profiling", |job, dataset| {
            let profile = DatasetProfile::build(dataset, job.kind.title(), job.kind.description())?;
            Ok(ProfiledLog {
                kind: job.kind,
                profile,
            })
        })
    }

    fn run<T, F>(&mut self, jobs: &[Job], label: &str, mut process: F) -> BatchOutcome<T>
    where
        F: FnMut(&Job, &Dataset) -> Result<T>,
    {
        let started = Instant::now();
        let mut outcome = BatchOutcome {
            completed: Vec::with_capacity(jobs.len()),
            failures: Vec::new(),
        };

        if let Some(progress) = self.progress.as_deref_mut() {
            progress.start_jobs(jobs.len(), label);
        }

        for job in jobs {
            if let Some(progress) = self.progress.as_deref() {
                progress.set_current(job.kind.key());
            }

            let result = self.cache.load(&job.path).and_then(|dataset| {
                log_dataset_loaded(
                    job.kind,
                    dataset.name(),
                    dataset.row_count(),
                    dataset.column_count(),
                );
                process(job, &dataset)
            });

            match result {
                Ok(value) => outcome.completed.push(value),
                Err(e) => {
                    log_error(&format!("Failed to process {} log", job.kind), Some(&e));
                    if let Some(progress) = self.progress.as_deref() {
                        progress.log_error(&format!("{}: {e}", job.kind));
                    }
                    outcome.failures.push(JobFailure {
                        kind: job.kind,
                        path: job.path.display().to_string(),
                        error: e.to_string(),
                    });
                }
            }

            if let Some(progress) = self.progress.as_deref() {
                progress.advance();
            }
        }

        if let Some(progress) = self.progress.as_deref() {
            progress.finish_jobs(outcome.completed.len(), jobs.len());
            progress.finish_and_clear();
        }

        log_cache_stats(self.cache.hits(), self.cache.misses());
        log_batch_complete(
            outcome.completed.len(),
            outcome.failures.len(),
            started.elapsed().as_millis(),
        );
        outcome
    }
}
