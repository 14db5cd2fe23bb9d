//! Data models for the progress reporter.
//!
//! This module contains the in-memory task document: stages holding
//! tasks, tasks holding subtasks. Raw YAML strings are converted into
//! these types once, by the loader, so nothing downstream compares
//! status or platform strings again.

use std::fmt;

/// Platform a task is delivered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Web application
    Web,
    /// Mobile application
    App,
    /// Shared work that counts for every platform
    Both,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Platform {
    /// Platforms that get a dedicated report, in generation order.
    pub const REPORTED: [Platform; 2] = [Platform::Web, Platform::App];

    /// Parse a platform tag. Matching is exact: `"web"` is not `Web`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Web" => Some(Platform::Web),
            "App" => Some(Platform::App),
            "Both" => Some(Platform::Both),
            _ => None,
        }
    }

    /// The tag as written in the task document.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Web => "Web",
            Platform::App => "App",
            Platform::Both => "Both",
        }
    }

    /// Whether a task tagged `tag` belongs in this platform's view.
    ///
    /// A task matches its own platform and `Both`. Untagged tasks match nothing.
    pub fn includes(&self, tag: Option<Platform>) -> bool {
        match tag {
            Some(tag) => tag == *self || tag == Platform::Both,
            None => false,
        }
    }
}

/// Completion state of a subtask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubtaskStatus {
    Completed,
    Pending,
}

impl SubtaskStatus {
    /// Convert a raw status value. Only the exact string `"Completed"` is done.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some("Completed") => SubtaskStatus::Completed,
            _ => SubtaskStatus::Pending,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, SubtaskStatus::Completed)
    }

    /// Markdown task-list checkbox for this status.
    pub fn checkbox(&self) -> &'static str {
        match self {
            SubtaskStatus::Completed => "- [x]",
            SubtaskStatus::Pending => "- [ ]",
        }
    }
}

/// A single checklist item under a task.
#[derive(Debug, Clone, PartialEq)]
pub struct Subtask {
    pub description: String,
    pub status: SubtaskStatus,
}

/// A unit of work with its subtasks.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    /// Identifier shown next to the task name.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Platform tag; `None` when missing or not one of the known tags.
    pub platform: Option<Platform>,
    /// Subtasks in document order.
    pub subtasks: Vec<Subtask>,
}

impl Task {
    /// Heading marker used by the master report.
    pub fn marker(&self) -> &'static str {
        match self.platform {
            Some(Platform::App) => "📱",
            Some(Platform::Web) => "🌐",
            _ => "🚀",
        }
    }
}

/// A named group of tasks.
#[derive(Debug, Clone, PartialEq)]
pub struct Stage {
    pub name: String,
    pub tasks: Vec<Task>,
}

impl Stage {
    /// All subtasks of all tasks in this stage.
    pub fn subtasks(&self) -> impl Iterator<Item = &Subtask> {
        self.tasks.iter().flat_map(|t| t.subtasks.iter())
    }
}

/// The complete task document, stages in display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub stages: Vec<Stage>,
}

impl Document {
    /// All subtasks in the document.
    pub fn subtasks(&self) -> impl Iterator<Item = &Subtask> {
        self.stages.iter().flat_map(|s| s.subtasks())
    }

    /// Number of tasks across all stages.
    pub fn task_count(&self) -> usize {
        self.stages.iter().map(|s| s.tasks.len()).sum()
    }
}
