//! Syllabus tree builder
//!
//! Runs a single linear pass: read the document, collect headings,
//! ensure the base directory, then write one module directory with a
//! README per heading. Failures are returned to the caller unchanged;
//! there is no retry and no partial-success result.

use super::heading::{extract_headings, Heading};
use crate::config::BuildConfig;
use crate::document::DocxDocument;
use crate::error::{Result, SyllabusError};
use crate::fs::{ensure_directory, write_file, DirectoryStatus};
use crate::progress::{BuildObserver, ProgressReporter, TracingObserver};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Base directory used when none is given
pub const DEFAULT_BASE_DIR: &str = "Operating_Systems_Project";

/// Name of the placeholder file written into each module directory
pub const README_FILE_NAME: &str = "README.md";

/// Placeholder body written below the module title
const README_BODY: &str = "Content for this module goes here.";

/// Contents of a module README
pub fn readme_content(module_name: &str) -> String {
    format!("# {}\n\n{}\n", module_name, README_BODY)
}

/// README a heading's module directory receives; blank headings have none
pub fn readme_for_heading(text: &str) -> Result<String> {
    Heading::new(text)
        .map(|heading| readme_content(&heading.sanitized))
        .ok_or_else(|| SyllabusError::config("heading text must not be blank"))
}

/// One generated module directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleDirectory {
    /// Sanitized module name
    pub name: String,
    /// Module directory path
    pub path: PathBuf,
    /// README path inside the module directory
    pub readme: PathBuf,
    /// Whether the directory was created or reused (`None` in dry-run mode)
    pub status: Option<DirectoryStatus>,
}

impl ModuleDirectory {
    fn planned(base_dir: &Path, name: &str) -> Self {
        let path = base_dir.join(name);
        let readme = path.join(README_FILE_NAME);
        Self {
            name: name.to_string(),
            path,
            readme,
            status: None,
        }
    }
}

/// Result of a build
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    /// Source document
    pub source: PathBuf,
    /// Base directory holding the modules
    pub base_dir: PathBuf,
    /// Module names in document order, duplicates included
    pub modules: Vec<String>,
    /// Module directories, one per module name
    pub directories: Vec<ModuleDirectory>,
    /// Whether the filesystem was left untouched
    pub dry_run: bool,
    /// When the build finished
    pub generated_at: DateTime<Utc>,
    /// Wall-clock duration in milliseconds
    pub elapsed_ms: u64,
    /// Wall-clock duration
    #[serde(skip)]
    pub duration: Duration,
}

impl BuildReport {
    /// Number of distinct module directories
    pub fn unique_modules(&self) -> usize {
        let mut names: Vec<&str> = self.modules.iter().map(String::as_str).collect();
        names.sort_unstable();
        names.dedup();
        names.len()
    }

    /// Print summary to console
    pub fn print_summary(&self) {
        if self.dry_run {
            println!("\n=== Dry Run: Planned Structure ===");
        } else {
            println!("\n=== Build Summary ===");
        }
        println!("Source:      {}", self.source.display());
        println!("Base dir:    {}", self.base_dir.display());
        println!("Modules:     {} ({} unique)", self.modules.len(), self.unique_modules());
        println!("Duration:    {}", humantime::format_duration(self.duration));

        if !self.directories.is_empty() {
            println!();
            for dir in &self.directories {
                println!("  {}", dir.readme.display());
            }
        }

        println!(
            "\nDirectory structure created under '{}' with modules: {:?}",
            self.base_dir.display(),
            self.modules
        );
    }

    /// Serialize the report as pretty JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Turns syllabus headings into a directory tree
pub struct SyllabusTreeBuilder {
    /// Configuration
    config: BuildConfig,
    /// Notified observers, in registration order
    observers: Vec<Box<dyn BuildObserver>>,
}

impl SyllabusTreeBuilder {
    /// Create a builder that logs through `tracing`
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            observers: vec![Box::new(TracingObserver)],
        }
    }

    /// Create a builder with no observers at all
    pub fn silent(config: BuildConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer
    pub fn with_observer(mut self, observer: impl BuildObserver + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Set progress reporter
    pub fn with_progress(self, progress: ProgressReporter) -> Self {
        self.with_observer(progress)
    }

    /// Builder configuration
    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    fn notify(&self, event: impl Fn(&dyn BuildObserver)) {
        for observer in &self.observers {
            event(observer.as_ref());
        }
    }

    /// Read `source` and return its module headings without touching the
    /// filesystem
    pub fn collect_headings(&self, source: &Path) -> Result<Vec<Heading>> {
        let result = self.read_headings(source);
        if let Err(e) = &result {
            self.notify(|o| o.on_error(e));
        }
        result
    }

    fn read_headings(&self, source: &Path) -> Result<Vec<Heading>> {
        self.config.validate()?;

        let document = DocxDocument::open(source)?;
        self.notify(|o| o.on_document_opened(source));

        let observers = ObserverList(&self.observers);
        extract_headings(document.paragraphs(), &self.config.heading_prefix, &observers)
    }

    /// Build the module tree for `source` under `base_dir`
    pub fn build(&self, source: &Path, base_dir: &Path) -> Result<BuildReport> {
        let start = Instant::now();
        let result = self.run(source, base_dir, start);

        match &result {
            Ok(report) => self.notify(|o| o.on_complete(report)),
            Err(e) => self.notify(|o| o.on_error(e)),
        }

        result
    }

    fn run(&self, source: &Path, base_dir: &Path, start: Instant) -> Result<BuildReport> {
        // create_dir_all("") succeeds, which would scatter modules into the cwd
        if base_dir.as_os_str().is_empty() {
            return Err(SyllabusError::config("base directory must not be empty"));
        }

        let headings = self.read_headings(source)?;
        let modules: Vec<String> = headings.into_iter().map(|h| h.sanitized).collect();

        let mut directories: Vec<ModuleDirectory> = modules
            .iter()
            .map(|name| ModuleDirectory::planned(base_dir, name))
            .collect();

        if !self.config.dry_run {
            let status = ensure_directory(base_dir)?;
            self.notify(|o| o.on_base_directory(base_dir, status));

            for module in &mut directories {
                module.status = Some(ensure_directory(&module.path)?);
                write_file(&module.readme, &readme_content(&module.name))?;
                self.notify(|o| o.on_module_created(&*module));
            }
        }

        let duration = start.elapsed();
        Ok(BuildReport {
            source: source.to_path_buf(),
            base_dir: base_dir.to_path_buf(),
            modules,
            directories,
            dry_run: self.config.dry_run,
            generated_at: Utc::now(),
            elapsed_ms: duration.as_millis() as u64,
            duration,
        })
    }

    /// Build under the configured base directory
    pub fn build_configured(&self, source: &Path) -> Result<BuildReport> {
        let base_dir = self.config.base_dir.clone();
        self.build(source, &base_dir)
    }
}

/// Fans heading notifications out to every registered observer
struct ObserverList<'a>(&'a [Box<dyn BuildObserver>]);

impl BuildObserver for ObserverList<'_> {
    fn on_heading(&self, index: usize, heading: &Heading) {
        for observer in self.0 {
            observer.on_heading(index, heading);
        }
    }

    fn on_skipped_heading(&self, style: &str) {
        for observer in self.0 {
            observer.on_skipped_heading(style);
        }
    }

    fn on_headings_collected(&self, count: usize) {
        for observer in self.0 {
            observer.on_headings_collected(count);
        }
    }
}

/// Build a module tree with default settings
pub fn build_tree(source: &Path, base_dir: &Path) -> Result<BuildReport> {
    SyllabusTreeBuilder::new(BuildConfig::default()).build(source, base_dir)
}
