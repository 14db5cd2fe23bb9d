//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::report::bar::MAX_BAR_WIDTH;
use clap::Parser;
use std::path::PathBuf;

/// progress-report - Markdown progress reports from a task document
///
/// Reads a tasks.yaml file (stages, tasks, subtasks) and writes
/// Web_Progress.md, App_Progress.md and Master_Progress.md.
///
/// Examples:
///   progress-report
///   progress-report --input tasks/tasks.yaml
///   progress-report --input tasks.yaml --output-dir docs/progress
///   progress-report --dry-run
///   progress-report --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Task document to read
    ///
    /// Defaults to the config file value, then tasks.yaml.
    #[arg(short, long, value_name = "FILE", env = "PROGRESS_REPORT_INPUT")]
    pub input: Option<PathBuf>,

    /// Directory the reports are written to
    ///
    /// Defaults to the directory containing the task document.
    #[arg(
        short,
        long,
        value_name = "DIR",
        env = "PROGRESS_REPORT_OUTPUT_DIR"
    )]
    pub output_dir: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .progress-report.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Project name used in the report introductions
    #[arg(long, value_name = "NAME")]
    pub project_name: Option<String>,

    /// Progress bar width in characters
    #[arg(long, value_name = "WIDTH")]
    pub bar_width: Option<usize>,

    /// Also write a JSON progress summary to this file
    #[arg(long, value_name = "FILE")]
    pub summary_json: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Dry run: load the task document and print progress without writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Generate a default .progress-report.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(width) = self.bar_width {
            if width == 0 || width > MAX_BAR_WIDTH {
                return Err(format!("Bar width must be between 1 and {}", MAX_BAR_WIDTH));
            }
        }

        if self.dry_run && self.summary_json.is_some() {
            return Err("--summary-json writes a file and cannot be combined with --dry-run"
                .to_string());
        }

        if let Some(ref config) = self.config {
            if !config.is_file() {
                return Err(format!("Config file does not exist: {}", config.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            input: Some(PathBuf::from("tasks.yaml")),
            output_dir: None,
            config: None,
            project_name: None,
            bar_width: None,
            summary_json: None,
            verbose: false,
            quiet: false,
            dry_run: false,
            init_config: false,
        }
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "progress-report",
            "--input",
            "tasks/tasks.yaml",
            "-o",
            "out",
            "--bar-width",
            "20",
            "--dry-run",
        ])
        .unwrap();

        assert_eq!(args.input, Some(PathBuf::from("tasks/tasks.yaml")));
        assert_eq!(args.output_dir, Some(PathBuf::from("out")));
        assert_eq!(args.bar_width, Some(20));
        assert!(args.dry_run);
    }

    #[test]
    fn test_validation_ok() {
        assert!(make_args().validate().is_ok());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_zero_bar_width() {
        let mut args = make_args();
        args.bar_width = Some(0);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_oversized_bar_width() {
        let mut args = make_args();
        args.bar_width = Some(MAX_BAR_WIDTH);
        assert!(args.validate().is_ok());

        args.bar_width = Some(usize::MAX / 2);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_dry_run_with_summary_json() {
        let mut args = make_args();
        args.dry_run = true;
        assert!(args.validate().is_ok());

        args.summary_json = Some(PathBuf::from("progress.json"));
        let err = args.validate().unwrap_err();
        assert!(err.contains("--summary-json"));

        args.dry_run = false;
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_missing_config() {
        let mut args = make_args();
        args.config = Some(PathBuf::from("/nonexistent/.progress-report.toml"));
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
