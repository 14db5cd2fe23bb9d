//! Progress report generation and output.
//!
//! Renders the Web, App and Master reports in that order and writes
//! each one before starting the next.

pub mod bar;
pub mod generator;
pub mod writer;

pub use generator::{
    generate_json_summary, render_master_report, render_platform_report, ReportSettings,
};

use crate::models::{Document, Platform};
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

/// One of the generated documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Web,
    App,
    Master,
}

impl ReportKind {
    /// Generation order.
    pub const ALL: [ReportKind; 3] = [ReportKind::Web, ReportKind::App, ReportKind::Master];

    /// The platform a report is filtered to; `None` for the master report.
    pub fn platform(&self) -> Option<Platform> {
        match self {
            ReportKind::Web => Some(Platform::Web),
            ReportKind::App => Some(Platform::App),
            ReportKind::Master => None,
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportKind::Web => write!(f, "Web"),
            ReportKind::App => write!(f, "App"),
            ReportKind::Master => write!(f, "Master"),
        }
    }
}

/// Output file names for each report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFiles {
    pub web: String,
    pub app: String,
    pub master: String,
}

impl Default for ReportFiles {
    fn default() -> Self {
        Self {
            web: "Web_Progress.md".to_string(),
            app: "App_Progress.md".to_string(),
            master: "Master_Progress.md".to_string(),
        }
    }
}

impl ReportFiles {
    pub fn file_name(&self, kind: ReportKind) -> &str {
        match kind {
            ReportKind::Web => &self.web,
            ReportKind::App => &self.app,
            ReportKind::Master => &self.master,
        }
    }
}

/// Render a single report.
pub fn render_report(
    document: &Document,
    kind: ReportKind,
    settings: &ReportSettings,
    generated_at: DateTime<Utc>,
) -> String {
    match kind.platform() {
        Some(platform) => render_platform_report(document, platform, settings, generated_at),
        None => render_master_report(document, settings, generated_at),
    }
}

/// Render and write every report into `output_dir`.
///
/// `now` is called once per report. Stops at the first write failure.
pub fn generate_reports<F>(
    document: &Document,
    output_dir: &Path,
    files: &ReportFiles,
    settings: &ReportSettings,
    mut now: F,
) -> Result<Vec<PathBuf>>
where
    F: FnMut() -> DateTime<Utc>,
{
    writer::ensure_output_dir(output_dir)?;

    let mut written = Vec::with_capacity(ReportKind::ALL.len());

    for kind in ReportKind::ALL {
        println!("Generating {} progress file...", kind);

        let content = render_report(document, kind, settings, now());
        let path = writer::write_report(output_dir, files.file_name(kind), &content)?;

        info!("{} report: {} bytes", kind, content.len());
        println!("Successfully generated {}", path.display());
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_document;
    use chrono::{Duration, TimeZone};

    const FIXTURE: &str = r#"
stages:
  - stage: "Stage 1: Launch"
    tasks:
      - id: W-1
        name: Landing page
        platform: Web
        subtasks:
          - description: Build hero
            status: Completed
      - id: A-1
        name: App shell
        platform: App
        subtasks:
          - description: Navigation
            status: Not Started
"#;

    fn fixture() -> Document {
        parse_document(FIXTURE, Path::new("tasks.yaml")).unwrap()
    }

    fn clock(start: DateTime<Utc>) -> impl FnMut() -> DateTime<Utc> {
        let mut current = start;
        move || {
            let now = current;
            current += Duration::seconds(1);
            now
        }
    }

    fn strip_timestamp(content: &str) -> String {
        content
            .lines()
            .filter(|line| !line.starts_with("_Last updated:"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_generate_reports_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();

        let written = generate_reports(
            &fixture(),
            dir.path(),
            &ReportFiles::default(),
            &ReportSettings::default(),
            clock(start),
        )
        .unwrap();

        assert_eq!(
            written,
            vec![
                dir.path().join("Web_Progress.md"),
                dir.path().join("App_Progress.md"),
                dir.path().join("Master_Progress.md"),
            ]
        );

        let web = std::fs::read_to_string(&written[0]).unwrap();
        assert!(web.contains("1 / 1 Sub-tasks Completed"));
        assert!(web.contains("100.00%"));
        assert!(web.contains("_Last updated: 2024-01-01 12:00:00 UTC_"));

        let app = std::fs::read_to_string(&written[1]).unwrap();
        assert!(app.contains("0 / 1 Sub-tasks Completed"));
        assert!(app.contains("0.00%"));
        assert!(app.contains("_Last updated: 2024-01-01 12:00:01 UTC_"));

        let master = std::fs::read_to_string(&written[2]).unwrap();
        assert!(master.contains("1 / 2 Sub-tasks Completed"));
        assert!(master.contains("50.00%"));
        assert!(master.contains("_Last updated: 2024-01-01 12:00:02 UTC_"));
    }

    #[test]
    fn test_rerun_differs_only_in_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let document = fixture();
        let files = ReportFiles::default();
        let settings = ReportSettings::default();

        let first_start = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let first = generate_reports(&document, dir.path(), &files, &settings, clock(first_start))
            .unwrap()
            .iter()
            .map(|p| std::fs::read_to_string(p).unwrap())
            .collect::<Vec<_>>();

        let second_start = Utc.with_ymd_and_hms(2024, 3, 9, 8, 15, 0).unwrap();
        let second =
            generate_reports(&document, dir.path(), &files, &settings, clock(second_start))
                .unwrap()
                .iter()
                .map(|p| std::fs::read_to_string(p).unwrap())
                .collect::<Vec<_>>();

        for (a, b) in first.iter().zip(&second) {
            assert_ne!(a, b);
            assert_eq!(strip_timestamp(a), strip_timestamp(b));
        }
    }

    #[test]
    fn test_generate_reports_creates_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("progress");
        let files = ReportFiles {
            web: "web.md".to_string(),
            app: "app.md".to_string(),
            master: "all.md".to_string(),
        };

        generate_reports(
            &Document::default(),
            &output,
            &files,
            &ReportSettings::default(),
            Utc::now,
        )
        .unwrap();

        assert!(output.join("web.md").exists());
        assert!(output.join("app.md").exists());
        let master = std::fs::read_to_string(output.join("all.md")).unwrap();
        assert!(master.contains("0 / 0 Sub-tasks Completed"));
    }

    #[test]
    fn test_report_kind_platform() {
        assert_eq!(ReportKind::Web.platform(), Some(Platform::Web));
        assert_eq!(ReportKind::App.platform(), Some(Platform::App));
        assert_eq!(ReportKind::Master.platform(), None);
        assert_eq!(ReportKind::Master.to_string(), "Master");
    }
}
