//! Progress aggregation and statistics.
//!
//! This module counts completed subtasks at stage, platform and
//! document level.

use crate::models::{Document, Subtask};
use serde::Serialize;

/// Completion counts for a collection of subtasks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    /// Number of completed subtasks.
    pub completed: usize,
    /// Number of subtasks counted.
    pub total: usize,
    /// Completion percentage in `[0, 100]`; `0.0` when `total` is zero.
    pub percent: f64,
}

impl Progress {
    /// Percentage rounded to two decimals, as shown in reports.
    pub fn percent_label(&self) -> String {
        format!("{:.2}", self.percent)
    }
}

/// Count completed subtasks.
pub fn compute_progress<'a, I>(subtasks: I) -> Progress
where
    I: IntoIterator<Item = &'a Subtask>,
{
    let (completed, total) = subtasks
        .into_iter()
        .fold((0, 0), |(completed, total), subtask| {
            let done = usize::from(subtask.status.is_completed());
            (completed + done, total + 1)
        });

    let percent = if total > 0 {
        completed as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    Progress {
        completed,
        total,
        percent,
    }
}

/// Progress of one stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageProgress {
    pub stage: String,
    pub progress: Progress,
}

/// Overall and per-stage progress of a document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSummary {
    pub overall: Progress,
    pub stages: Vec<StageProgress>,
}

/// Summarize a document, stages in document order.
pub fn summarize(document: &Document) -> ProgressSummary {
    ProgressSummary {
        overall: compute_progress(document.subtasks()),
        stages: document
            .stages
            .iter()
            .map(|stage| StageProgress {
                stage: stage.name.clone(),
                progress: compute_progress(stage.subtasks()),
            })
            .collect(),
    }
}
