//! Observer trait and the tracing / recording implementations

use crate::core::{BuildReport, Heading, ModuleDirectory};
use crate::error::SyllabusError;
use crate::fs::DirectoryStatus;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Receives notifications while a module tree is built.
///
/// Every method has a no-op default so implementations only override
/// what they care about.
pub trait BuildObserver {
    /// The source document was opened successfully
    fn on_document_opened(&self, _path: &Path) {}

    /// A module heading was accepted (`index` counts accepted headings)
    fn on_heading(&self, _index: usize, _heading: &Heading) {}

    /// A heading paragraph was skipped because its text is blank
    fn on_skipped_heading(&self, _style: &str) {}

    /// All headings were collected
    fn on_headings_collected(&self, _count: usize) {}

    /// The base directory is ready
    fn on_base_directory(&self, _path: &Path, _status: DirectoryStatus) {}

    /// A module directory and its README were written
    fn on_module_created(&self, _module: &ModuleDirectory) {}

    /// The build finished
    fn on_complete(&self, _report: &BuildReport) {}

    /// The build failed
    fn on_error(&self, _error: &SyllabusError) {}
}

impl<T: BuildObserver + ?Sized> BuildObserver for Arc<T> {
    fn on_document_opened(&self, path: &Path) {
        (**self).on_document_opened(path)
    }

    fn on_heading(&self, index: usize, heading: &Heading) {
        (**self).on_heading(index, heading)
    }

    fn on_skipped_heading(&self, style: &str) {
        (**self).on_skipped_heading(style)
    }

    fn on_headings_collected(&self, count: usize) {
        (**self).on_headings_collected(count)
    }

    fn on_base_directory(&self, path: &Path, status: DirectoryStatus) {
        (**self).on_base_directory(path, status)
    }

    fn on_module_created(&self, module: &ModuleDirectory) {
        (**self).on_module_created(module)
    }

    fn on_complete(&self, report: &BuildReport) {
        (**self).on_complete(report)
    }

    fn on_error(&self, error: &SyllabusError) {
        (**self).on_error(error)
    }
}

/// Emits every notification as a structured `tracing` event
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl BuildObserver for TracingObserver {
    fn on_document_opened(&self, path: &Path) {
        tracing::info!(path = %path.display(), "Opened syllabus document");
    }

    fn on_heading(&self, index: usize, heading: &Heading) {
        tracing::debug!(index, raw = %heading.raw, module = %heading.sanitized, "Found module heading");
    }

    fn on_skipped_heading(&self, style: &str) {
        tracing::debug!(style, "Skipping blank heading");
    }

    fn on_headings_collected(&self, count: usize) {
        tracing::info!(count, "Collected module headings");
    }

    fn on_base_directory(&self, path: &Path, status: DirectoryStatus) {
        tracing::debug!(path = %path.display(), ?status, "Base directory ready");
    }

    fn on_module_created(&self, module: &ModuleDirectory) {
        tracing::debug!(module = %module.name, readme = %module.readme.display(), "Wrote module README");
    }

    fn on_complete(&self, report: &BuildReport) {
        tracing::info!(
            base_dir = %report.base_dir.display(),
            modules = ?report.modules,
            dry_run = report.dry_run,
            "Directory structure created"
        );
    }

    fn on_error(&self, error: &SyllabusError) {
        tracing::error!(stage = error.stage().label(), "{}", error);
    }
}

/// A notification captured by [`RecordingObserver`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildEvent {
    /// Document opened
    DocumentOpened(PathBuf),
    /// Heading accepted, with its sanitized name
    Heading(String),
    /// Blank heading skipped
    SkippedHeading,
    /// Number of headings collected
    HeadingsCollected(usize),
    /// Base directory ready
    BaseDirectory(PathBuf, DirectoryStatus),
    /// Module written
    ModuleCreated(String),
    /// Build finished with the reported base directory and module names
    Complete {
        /// Base directory
        base_dir: PathBuf,
        /// Module names in document order
        modules: Vec<String>,
    },
    /// Build failed
    Error(String),
}

/// Keeps every notification in memory
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<BuildEvent>>,
}

impl RecordingObserver {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events
    pub fn events(&self) -> Vec<BuildEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Module names from the completion event, if the build completed
    pub fn completed_modules(&self) -> Option<Vec<String>> {
        self.events().into_iter().find_map(|event| match event {
            BuildEvent::Complete { modules, .. } => Some(modules),
            _ => None,
        })
    }

    fn record(&self, event: BuildEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl BuildObserver for RecordingObserver {
    fn on_document_opened(&self, path: &Path) {
        self.record(BuildEvent::DocumentOpened(path.to_path_buf()));
    }

    fn on_heading(&self, _index: usize, heading: &Heading) {
        self.record(BuildEvent::Heading(heading.sanitized.clone()));
    }

    fn on_skipped_heading(&self, _style: &str) {
        self.record(BuildEvent::SkippedHeading);
    }

    fn on_headings_collected(&self, count: usize) {
        self.record(BuildEvent::HeadingsCollected(count));
    }

    fn on_base_directory(&self, path: &Path, status: DirectoryStatus) {
        self.record(BuildEvent::BaseDirectory(path.to_path_buf(), status));
    }

    fn on_module_created(&self, module: &ModuleDirectory) {
        self.record(BuildEvent::ModuleCreated(module.name.clone()));
    }

    fn on_complete(&self, report: &BuildReport) {
        self.record(BuildEvent::Complete {
            base_dir: report.base_dir.clone(),
            modules: report.modules.clone(),
        });
    }

    fn on_error(&self, error: &SyllabusError) {
        self.record(BuildEvent::Error(error.to_string()));
    }
}
