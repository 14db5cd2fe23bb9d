//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.progress-report.toml` files.

use crate::report::bar::MAX_BAR_WIDTH;
use crate::report::{ReportFiles, ReportSettings};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".progress-report.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Task document settings.
    #[serde(default)]
    pub input: InputConfig,

    /// Output location settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// Task document location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Path of the task document.
    #[serde(default = "default_input_path")]
    pub path: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: default_input_path(),
        }
    }
}

fn default_input_path() -> String {
    "tasks.yaml".to_string()
}

/// Where reports are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output directory. Defaults to the directory holding the task document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,

    /// File name of the Web report.
    #[serde(default = "default_web_file")]
    pub web_file: String,

    /// File name of the App report.
    #[serde(default = "default_app_file")]
    pub app_file: String,

    /// File name of the Master report.
    #[serde(default = "default_master_file")]
    pub master_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: None,
            web_file: default_web_file(),
            app_file: default_app_file(),
            master_file: default_master_file(),
        }
    }
}

fn default_web_file() -> String {
    "Web_Progress.md".to_string()
}

fn default_app_file() -> String {
    "App_Progress.md".to_string()
}

fn default_master_file() -> String {
    "Master_Progress.md".to_string()
}

/// Report rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Project name shown under each report title.
    #[serde(default = "default_project_name")]
    pub project_name: String,

    /// Progress bar width in glyphs.
    #[serde(default = "default_bar_width")]
    pub bar_width: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            project_name: default_project_name(),
            bar_width: default_bar_width(),
        }
    }
}

fn default_project_name() -> String {
    "Stan Store Windsurf".to_string()
}

fn default_bar_width() -> usize {
    crate::report::bar::DEFAULT_BAR_WIDTH
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(DEFAULT_CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref input) = args.input {
            self.input.path = input.display().to_string();
        }
        if let Some(ref dir) = args.output_dir {
            self.output.dir = Some(dir.display().to_string());
        }
        if let Some(width) = args.bar_width {
            self.report.bar_width = width;
        }
        if let Some(ref name) = args.project_name {
            self.report.project_name = name.clone();
        }
    }

    /// Check values the CLI cannot constrain on its own.
    pub fn validate(&self) -> Result<()> {
        if self.report.bar_width == 0 {
            bail!("Progress bar width must be at least 1");
        }
        if self.report.bar_width > MAX_BAR_WIDTH {
            bail!(
                "Progress bar width must be at most {}, got {}",
                MAX_BAR_WIDTH,
                self.report.bar_width
            );
        }
        if self.input.path.trim().is_empty() {
            bail!("Input path must not be empty");
        }
        for name in [
            &self.output.web_file,
            &self.output.app_file,
            &self.output.master_file,
        ] {
            if name.trim().is_empty() {
                bail!("Report file names must not be empty");
            }
        }
        Ok(())
    }

    /// Path of the task document.
    pub fn input_path(&self) -> PathBuf {
        PathBuf::from(&self.input.path)
    }

    /// Directory the reports are written to.
    ///
    /// Falls back to the directory of the task document, or the working
    /// directory when the document path has no parent.
    pub fn output_dir(&self) -> PathBuf {
        match self.output.dir {
            Some(ref dir) => PathBuf::from(dir),
            None => match self.input_path().parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            },
        }
    }

    pub fn report_files(&self) -> ReportFiles {
        ReportFiles {
            web: self.output.web_file.clone(),
            app: self.output.app_file.clone(),
            master: self.output.master_file.clone(),
        }
    }

    /// Rendering settings; the source name is the task document's file name.
    pub fn report_settings(&self) -> ReportSettings {
        let input = self.input_path();
        let source_name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.input.path.clone());

        ReportSettings {
            project_name: self.report.project_name.clone(),
            source_name,
            bar_width: self.report.bar_width,
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
