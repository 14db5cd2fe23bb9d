//! progress-report - Markdown progress reports from a task document
//!
//! Reads a hierarchical task document (stages, tasks, subtasks) and
//! writes a Web report, an App report and a Master report.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Any fatal error (missing or malformed input, config, write failure)

mod analysis;
mod cli;
mod config;
mod loader;
mod models;
mod report;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::Args;
use config::{Config, DEFAULT_CONFIG_FILE};
use models::{Document, Platform};
use std::path::Path;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    init_logging(&args);

    info!("progress-report v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(args) {
        error!("Report generation failed: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .progress-report.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(DEFAULT_CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            DEFAULT_CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", DEFAULT_CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", DEFAULT_CONFIG_FILE);
    println!("   Edit it to customize the input path, output directory and report text.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Load the task document and write every report.
fn run(args: Args) -> Result<()> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);
    config.validate()?;

    println!("--- Progress Report Starting ---");

    let input = config.input_path();
    println!("Reading tasks file: {}", input.display());

    let document = loader::load_document(&input)?;
    println!("Tasks file read and parsed successfully.");
    info!(
        "{} stages, {} tasks, {} sub-tasks",
        document.stages.len(),
        document.task_count(),
        document.subtasks().count()
    );

    let settings = config.report_settings();

    if args.dry_run {
        handle_dry_run(&document);
        return Ok(());
    }

    let output_dir = config.output_dir();
    println!("Output directory: {}", output_dir.display());

    let written = report::generate_reports(
        &document,
        &output_dir,
        &config.report_files(),
        &settings,
        Utc::now,
    )?;
    debug!("Wrote {} reports", written.len());

    if let Some(ref summary_path) = args.summary_json {
        let json = report::generate_json_summary(&document, &settings, Utc::now())?;
        std::fs::write(summary_path, json).with_context(|| {
            format!("Failed to write JSON summary to {}", summary_path.display())
        })?;
        println!("Successfully generated {}", summary_path.display());
    }

    println!("\n--- Progress Report Finished ---");
    println!("All progress files generated successfully.");

    Ok(())
}

/// Handle --dry-run: print progress per report, write nothing.
fn handle_dry_run(document: &Document) {
    println!("\n🔍 Dry run: no files will be written.\n");

    for platform in Platform::REPORTED {
        let summary = analysis::summarize(&analysis::filter_by_platform(document, platform));
        print_summary(&platform.to_string(), &summary);
    }
    print_summary("Master", &analysis::summarize(document));

    println!("✅ Dry run complete.");
}

fn print_summary(label: &str, summary: &analysis::ProgressSummary) {
    println!(
        "📊 {}: {} / {} sub-tasks completed ({}%)",
        label,
        summary.overall.completed,
        summary.overall.total,
        summary.overall.percent_label()
    );
    for stage in &summary.stages {
        println!(
            "   - {}: {} / {} ({}%)",
            stage.stage,
            stage.progress.completed,
            stage.progress.total,
            stage.progress.percent_label()
        );
    }
    println!();
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", DEFAULT_CONFIG_FILE);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
