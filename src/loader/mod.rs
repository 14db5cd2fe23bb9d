//! Task document loading.
//!
//! This module reads `tasks.yaml`, accepts either a root list of stages
//! or a mapping with a `stages` key, and converts raw YAML values into
//! the typed [`Document`] model.

use crate::models::{Document, Platform, Stage, Subtask, SubtaskStatus, Task};
use serde::Deserialize;
use serde_yaml::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised while loading the task document.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("The file '{}' was not found", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing YAML file '{}'", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Unexpected task document structure in '{}': {reason}", .path.display())]
    InvalidStructure { path: PathBuf, reason: String },
}

#[derive(Debug, Deserialize)]
struct RawStage {
    stage: Value,
    tasks: Vec<RawTask>,
}

#[derive(Debug, Deserialize)]
struct RawTask {
    id: Value,
    name: Value,
    #[serde(default)]
    platform: Option<Value>,
    #[serde(default)]
    subtasks: Option<Vec<RawSubtask>>,
}

#[derive(Debug, Deserialize)]
struct RawSubtask {
    description: Value,
    #[serde(default)]
    status: Option<Value>,
}

/// Load and convert the task document at `path`.
pub fn load_document(path: &Path) -> Result<Document, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let document = parse_document(&content, path)?;
    debug!(
        "Loaded {} stages, {} tasks from {}",
        document.stages.len(),
        document.task_count(),
        path.display()
    );

    Ok(document)
}

/// Parse YAML text into a [`Document`]. `path` is only used in errors.
pub fn parse_document(content: &str, path: &Path) -> Result<Document, LoadError> {
    let root: Value = serde_yaml::from_str(content).map_err(|e| LoadError::Malformed {
        path: path.to_path_buf(),
        source: e,
    })?;

    let invalid = |reason: String| LoadError::InvalidStructure {
        path: path.to_path_buf(),
        reason,
    };

    let stages_value = match root {
        Value::Sequence(seq) => Value::Sequence(seq),
        Value::Mapping(mut map) => match map.remove("stages") {
            Some(stages) => stages,
            None => return Ok(Document::default()),
        },
        Value::Null => return Err(invalid("document is empty".to_string())),
        _ => {
            return Err(invalid(
                "expected a list of stages or a mapping with a 'stages' key".to_string(),
            ))
        }
    };

    let raw_stages: Vec<RawStage> =
        serde_yaml::from_value(stages_value).map_err(|e| invalid(e.to_string()))?;

    let stages = raw_stages
        .into_iter()
        .map(convert_stage)
        .collect::<Result<Vec<_>, String>>()
        .map_err(invalid)?;

    Ok(Document { stages })
}

fn convert_stage(raw: RawStage) -> Result<Stage, String> {
    let name = required_text(&raw.stage, "stage name")?;
    let tasks = raw
        .tasks
        .into_iter()
        .map(convert_task)
        .collect::<Result<Vec<_>, String>>()?;

    Ok(Stage { name, tasks })
}

fn convert_task(raw: RawTask) -> Result<Task, String> {
    let name = required_text(&raw.name, "task name")?;
    let id = scalar_text(&raw.id).ok_or_else(|| format!("task '{}' has a non-scalar id", name))?;

    let platform = match raw.platform {
        None | Some(Value::Null) => {
            debug!("Task '{}' has no platform tag", id);
            None
        }
        Some(ref value) => match scalar_text(value) {
            Some(tag) => {
                let platform = Platform::from_tag(&tag);
                if platform.is_none() {
                    warn!(
                        "Task '{}' has unrecognized platform '{}'; it will only appear in the master report",
                        id, tag
                    );
                }
                platform
            }
            None => {
                warn!(
                    "Task '{}' has a non-scalar platform value; it will only appear in the master report",
                    id
                );
                None
            }
        },
    };

    let subtasks = raw
        .subtasks
        .unwrap_or_default()
        .into_iter()
        .map(|s| -> Result<Subtask, String> {
            Ok(Subtask {
                description: required_text(&s.description, "subtask description")?,
                status: SubtaskStatus::from_raw(s.status.as_ref().and_then(Value::as_str)),
            })
        })
        .collect::<Result<Vec<_>, String>>()?;

    Ok(Task {
        id,
        name,
        platform,
        subtasks,
    })
}

fn required_text(value: &Value, what: &str) -> Result<String, String> {
    scalar_text(value).ok_or_else(|| format!("{} must be a scalar, found {:?}", what, value))
}

/// Text form of a YAML scalar (`1.2` becomes `"1.2"`).
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
