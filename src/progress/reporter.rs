//! Progress reporter implementation
//!
//! Uses indicatif to show a spinner while the document is read and a
//! bar over module directories while they are written.

use super::observer::BuildObserver;
use crate::core::{BuildReport, ModuleDirectory};
use crate::error::SyllabusError;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::path::Path;
use std::time::Duration;

/// Progress reporter for module tree builds
pub struct ProgressReporter {
    /// Module progress bar
    bar: ProgressBar,
}

impl ProgressReporter {
    /// Create a new progress reporter drawing to stderr
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(Self::spinner_style());
        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Create a disabled progress reporter (for quiet mode)
    pub fn disabled() -> Self {
        let bar = ProgressBar::hidden();
        bar.set_draw_target(ProgressDrawTarget::hidden());

        Self { bar }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{prefix:.bold.dim} [{bar:40.cyan/blue}] {pos}/{len} modules {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ")
    }

    /// Switch from the spinner to a bar over `total` modules
    pub fn set_total_modules(&self, total: u64) {
        self.bar.disable_steady_tick();
        self.bar.set_style(Self::bar_style());
        self.bar.set_prefix("Modules");
        self.bar.set_length(total);
        self.bar.set_position(0);
    }

    /// Count one written module
    pub fn increment_modules(&self, name: &str) {
        self.bar.set_message(name.to_string());
        self.bar.inc(1);
    }

    /// Set current status message
    pub fn set_status(&self, msg: &str) {
        self.bar.set_message(msg.to_string());
    }

    /// Finish progress with success message
    pub fn finish_success(&self, message: &str) {
        self.bar.finish_with_message(format!("✓ {}", message));
    }

    /// Finish progress with error message
    pub fn finish_error(&self, message: &str) {
        self.bar.abandon_with_message(format!("✗ {}", message));
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildObserver for ProgressReporter {
    fn on_document_opened(&self, path: &Path) {
        self.set_status(&format!("Reading {}", path.display()));
    }

    fn on_headings_collected(&self, count: usize) {
        self.set_total_modules(count as u64);
    }

    fn on_module_created(&self, module: &ModuleDirectory) {
        self.increment_modules(&module.name);
    }

    fn on_complete(&self, report: &BuildReport) {
        self.finish_success(&format!(
            "{} modules under {}",
            report.modules.len(),
            report.base_dir.display()
        ));
    }

    fn on_error(&self, error: &SyllabusError) {
        self.finish_error(&format!("{} stage failed", error.stage().label()));
    }
}
