use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress bar over the jobs of a batch run
pub struct ProgressReporter {
    multi_progress: MultiProgress,
    job_progress: Option<ProgressBar>,
    enabled: bool,
}

impl ProgressReporter {
    pub fn new(enabled: bool) -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            job_progress: None,
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn start_jobs(&mut self, total_jobs: usize, label: &str) {
        if !self.enabled {
            return;
        }

        let pb = self.multi_progress.add(ProgressBar::new(total_jobs as u64));
        let style = ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} logs {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        pb.set_style(style);
        pb.set_message(label.to_string());
        pb.enable_steady_tick(Duration::from_millis(120));
        self.job_progress = Some(pb);
    }

    /// Mark the current job as in progress
    pub fn set_current(&self, message: &str) {
        if let Some(ref pb) = self.job_progress {
            pb.set_message(message.to_string());
        }
    }

    pub fn advance(&self) {
        if let Some(ref pb) = self.job_progress {
            pb.inc(1);
        }
    }

    pub fn finish_jobs(&self, succeeded: usize, total: usize) {
        if let Some(ref pb) = self.job_progress {
            let message = if succeeded == total {
                "✓ All logs processed".to_string()
            } else {
                format!("✓ Done ({succeeded}/{total} succeeded)")
            };
            pb.finish_with_message(message);
        }
    }

    pub fn finish_and_clear(&self) {
        if self.enabled {
            self.multi_progress.clear().unwrap_or(());
        }
    }

    pub fn log_error(&self, message: &str) {
        if self.enabled {
            self.multi_progress
                .println(format!("✗ {message}"))
                .unwrap_or(());
        }
    }
}
