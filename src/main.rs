//! syllabus-tree CLI - Module directory scaffolding from a syllabus

use clap::Parser;
use syllabus_tree::config::{BuildConfig, CliArgs, Commands, LogFormat, OutputFormat};
use syllabus_tree::core::{readme_for_heading, SyllabusTreeBuilder};
use syllabus_tree::error::{Result, SyllabusError};
use syllabus_tree::progress::ProgressReporter;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() {
    // Parse CLI arguments
    let args = CliArgs::parse();

    init_logging(&args);

    // Handle result
    if let Err(e) = run(args) {
        eprintln!("Error ({} stage): {}", e.stage().label(), e);
        if e.is_permission_error() {
            eprintln!("Hint: check write permissions for the base directory");
        }
        std::process::exit(1);
    }
}

fn init_logging(args: &CliArgs) {
    // RUST_LOG wins over -v/-q
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    match args.log_format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn run(args: CliArgs) -> Result<()> {
    // Handle subcommands
    if let Some(command) = &args.command {
        return handle_command(command, &args);
    }

    let Some(source) = args.source.as_deref() else {
        eprintln!("Usage: syllabus-tree <SOURCE> [--base-dir DIR] [OPTIONS]");
        eprintln!("       syllabus-tree --help for more information");
        eprintln!("       syllabus-tree headings <SOURCE>  - List module names");
        std::process::exit(1);
    };

    // Build configuration
    let config = BuildConfig::from_cli(&args)?;

    // Create progress reporter
    let progress = if args.progress && !args.quiet {
        ProgressReporter::new()
    } else {
        ProgressReporter::disabled()
    };

    let builder = SyllabusTreeBuilder::new(config).with_progress(progress);
    if args.verbose > 0 && !args.quiet {
        print_config(source, builder.config());
    }

    let report = builder.build_configured(source)?;

    match args.output_format {
        OutputFormat::Json => println!("{}", report.to_json().map_err(json_error)?),
        OutputFormat::Text if !args.quiet => report.print_summary(),
        OutputFormat::Text => {}
    }

    Ok(())
}

fn handle_command(command: &Commands, args: &CliArgs) -> Result<()> {
    match command {
        Commands::Headings { source } => cmd_headings(source, args),
        Commands::Readme { heading } => {
            print!("{}", readme_for_heading(heading)?);
            Ok(())
        }
    }
}

fn cmd_headings(source: &Path, args: &CliArgs) -> Result<()> {
    let config = BuildConfig {
        heading_prefix: args.heading_prefix.clone(),
        ..Default::default()
    };
    let headings = SyllabusTreeBuilder::new(config).collect_headings(source)?;

    match args.output_format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&headings).map_err(json_error)?
        ),
        OutputFormat::Text => {
            for heading in &headings {
                if heading.raw == heading.sanitized {
                    println!("{}", heading.sanitized);
                } else {
                    println!("{}  (from \"{}\")", heading.sanitized, heading.raw);
                }
            }
            if !args.quiet {
                println!("\n{} module headings", headings.len());
            }
        }
    }

    Ok(())
}

fn json_error(e: serde_json::Error) -> SyllabusError {
    SyllabusError::config(format!("Failed to serialize report: {}", e))
}

fn print_config(source: &Path, config: &BuildConfig) {
    println!("=== Configuration ===");
    println!("Source:         {}", source.display());
    println!("Base dir:       {}", config.base_dir.display());
    println!("Heading prefix: {:?}", config.heading_prefix);
    println!("Dry run:        {}", config.dry_run);
    println!();
}
