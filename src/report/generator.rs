//! Markdown report generation.
//!
//! This module renders the per-platform and master progress reports.
//! Every function here is pure: the generation time is passed in by
//! the caller.

use super::bar::render_bar;
use crate::analysis::{compute_progress, filter_by_platform, summarize, Progress, ProgressSummary};
use crate::models::{Document, Platform, Stage, Task};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Rendering options shared by all reports.
#[derive(Debug, Clone)]
pub struct ReportSettings {
    /// Name used in the explanatory sentence under the title.
    pub project_name: String,
    /// File name of the task document, quoted in the explanatory sentence.
    pub source_name: String,
    /// Width of the progress bars.
    pub bar_width: usize,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            project_name: "Stan Store Windsurf".to_string(),
            source_name: "tasks.yaml".to_string(),
            bar_width: super::bar::DEFAULT_BAR_WIDTH,
        }
    }
}

/// Generate the report for a single platform.
pub fn render_platform_report(
    document: &Document,
    platform: Platform,
    settings: &ReportSettings,
    generated_at: DateTime<Utc>,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("# {} Development Progress\n\n", platform));
    output.push_str(&generate_timestamp_line(generated_at));
    output.push_str(&format!(
        "This document tracks the development progress of the {} platform. It is auto-generated from `{}`.\n\n",
        settings.project_name, settings.source_name
    ));

    let visible = filter_by_platform(document, platform);

    output.push_str("## Platform Progress\n\n");
    output.push_str(&generate_progress_block(
        &compute_progress(visible.subtasks()),
        settings.bar_width,
    ));

    for stage in &visible.stages {
        output.push_str(&generate_stage_section(stage, settings, generate_platform_task));
    }

    output
}

/// Generate the master report covering every task.
pub fn render_master_report(
    document: &Document,
    settings: &ReportSettings,
    generated_at: DateTime<Utc>,
) -> String {
    let mut output = String::new();

    output.push_str("# Master Development Progress\n\n");
    output.push_str(&generate_timestamp_line(generated_at));
    output.push_str(&format!(
        "This document provides a master view of all development tasks for the {} platform. It is auto-generated from `{}`.\n\n",
        settings.project_name, settings.source_name
    ));

    output.push_str("## Overall Progress\n\n");
    output.push_str(&generate_progress_block(
        &compute_progress(document.subtasks()),
        settings.bar_width,
    ));

    for stage in &document.stages {
        output.push_str(&generate_stage_section(stage, settings, generate_master_task));
    }

    output
}

fn generate_timestamp_line(generated_at: DateTime<Utc>) -> String {
    format!(
        "_Last updated: {}_\n\n",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    )
}

/// Count line plus bar.
fn generate_progress_block(progress: &Progress, bar_width: usize) -> String {
    format!(
        "**{} / {} Sub-tasks Completed**\n\n`[{}] {}%`\n\n",
        progress.completed,
        progress.total,
        render_bar(progress.percent, bar_width),
        progress.percent_label()
    )
}

fn generate_stage_section<F>(stage: &Stage, settings: &ReportSettings, render_task: F) -> String
where
    F: Fn(&Task) -> String,
{
    let mut section = String::new();

    section.push_str(&format!("## {}\n\n", stage.name));
    section.push_str(&generate_progress_block(
        &compute_progress(stage.subtasks()),
        settings.bar_width,
    ));

    for task in &stage.tasks {
        section.push_str(&render_task(task));
    }

    section.push_str("---\n\n");

    section
}

fn generate_platform_task(task: &Task) -> String {
    let mut block = format!("### {} (`{}`)\n\n", task.name, task.id);
    block.push_str(&generate_checklist(task));
    block.push('\n');
    block
}

fn generate_master_task(task: &Task) -> String {
    let mut block = format!("### {} {} (`{}`)\n\n", task.marker(), task.name, task.id);

    if task.subtasks.is_empty() {
        block.push_str("_No sub-tasks defined._\n\n");
    } else {
        block.push_str(&generate_checklist(task));
        block.push('\n');
    }

    block
}

fn generate_checklist(task: &Task) -> String {
    task.subtasks
        .iter()
        .map(|s| format!("{} {}\n", s.status.checkbox(), s.description))
        .collect()
}

/// Machine-readable companion to the Markdown reports.
#[derive(Debug, Serialize)]
pub struct JsonSummary {
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub reports: Vec<JsonReportEntry>,
}

#[derive(Debug, Serialize)]
pub struct JsonReportEntry {
    pub report: String,
    #[serde(flatten)]
    pub summary: ProgressSummary,
}

/// Build the progress summary for every report: each platform, then master.
pub fn build_json_summary(
    document: &Document,
    settings: &ReportSettings,
    generated_at: DateTime<Utc>,
) -> JsonSummary {
    let mut reports: Vec<JsonReportEntry> = Platform::REPORTED
        .iter()
        .map(|platform| JsonReportEntry {
            report: platform.to_string(),
            summary: summarize(&filter_by_platform(document, *platform)),
        })
        .collect();

    reports.push(JsonReportEntry {
        report: "Master".to_string(),
        summary: summarize(document),
    });

    JsonSummary {
        generated_at,
        source: settings.source_name.clone(),
        reports,
    }
}

/// Generate a JSON summary.
pub fn generate_json_summary(
    document: &Document,
    settings: &ReportSettings,
    generated_at: DateTime<Utc>,
) -> Result<String> {
    let summary = build_json_summary(document, settings, generated_at);
    serde_json::to_string_pretty(&summary).map_err(Into::into)
}
