//! Configuration settings for syllabus-tree
//!
//! Defines the CLI arguments, defaults and the runtime configuration
//! derived from them.

use crate::core::{DEFAULT_BASE_DIR, HEADING_STYLE_PREFIX};
use crate::error::{Result, SyllabusError};
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// syllabus-tree - Scaffold a module directory tree from a syllabus document
#[derive(Parser, Debug, Clone)]
#[command(name = "syllabus-tree")]
#[command(author = "Syllabus Tree Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Turn syllabus headings into a directory tree of modules")]
#[command(long_about = r#"
syllabus-tree reads a .docx syllabus and creates one directory per top-level
heading (paragraph style "Heading 1"), each with a placeholder README.md.

Heading text is sanitized for the filesystem: every character other than
letters, digits, space, underscore and hyphen becomes an underscore.

Examples:
  syllabus-tree syllabus.docx                      # Build under Operating_Systems_Project/
  syllabus-tree syllabus.docx --base-dir OSProj    # Custom base directory
  syllabus-tree syllabus.docx --dry-run            # Show what would be created
  syllabus-tree headings syllabus.docx             # List module names only
"#)]
pub struct CliArgs {
    /// Syllabus document (.docx)
    #[arg(value_name = "SOURCE")]
    pub source: Option<PathBuf>,

    /// Directory under which module directories are created
    #[arg(
        short = 'o',
        long,
        env = "SYLLABUS_TREE_BASE_DIR",
        default_value = DEFAULT_BASE_DIR,
        value_name = "DIR"
    )]
    pub base_dir: PathBuf,

    /// Paragraph style name prefix that marks a module heading
    #[arg(long, default_value = HEADING_STYLE_PREFIX, value_name = "STYLE", global = true)]
    pub heading_prefix: String,

    /// Dry run (show what would be created)
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Show a progress bar while modules are written
    #[arg(short = 'p', long)]
    pub progress: bool,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Output format for reports
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub output_format: OutputFormat,

    /// Log line format
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List the module names a document would produce
    #[command(name = "headings")]
    Headings {
        /// Syllabus document (.docx)
        source: PathBuf,
    },

    /// Print the README written into a module directory
    #[command(name = "readme")]
    Readme {
        /// Module heading text (sanitized before use)
        heading: String,
    },
}

/// Output format for reports
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON format
    Json,
}

/// Log line format
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl CliArgs {
    /// Default log filter directive for the requested verbosity
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Runtime configuration derived from CLI args
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Base directory for module directories
    pub base_dir: PathBuf,
    /// Style name prefix marking a module heading
    pub heading_prefix: String,
    /// Dry run mode
    pub dry_run: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from(DEFAULT_BASE_DIR),
            heading_prefix: HEADING_STYLE_PREFIX.to_string(),
            dry_run: false,
        }
    }
}

impl BuildConfig {
    /// Create config from CLI arguments
    pub fn from_cli(args: &CliArgs) -> Result<Self> {
        let config = Self {
            base_dir: args.base_dir.clone(),
            heading_prefix: args.heading_prefix.clone(),
            dry_run: args.dry_run,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that cannot produce a meaningful tree
    pub fn validate(&self) -> Result<()> {
        if self.heading_prefix.is_empty() {
            return Err(SyllabusError::config("heading prefix must not be empty"));
        }
        if self.base_dir.as_os_str().is_empty() {
            return Err(SyllabusError::config("base directory must not be empty"));
        }
        Ok(())
    }
}
