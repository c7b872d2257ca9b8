//! Snapshot data model: the tagged domain types the grid is computed from.
//!
//! Wire-level shapes (parallel lists, string statuses) live in [`crate::parser`];
//! everything here has already been normalized and is read-only for the
//! lifetime of one page.

use crate::status::TaskStatusCount;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "success", alias = "succeeded")]
    Succeeded,
    #[serde(rename = "failed")]
    Failed,
    #[serde(rename = "system-failed", alias = "system_failed", alias = "timed_out")]
    SystemFailed,
    #[serde(rename = "started", alias = "dispatched")]
    Started,
    #[serde(rename = "undispatched")]
    Undispatched,
    #[serde(rename = "inactive")]
    Inactive,
    #[default]
    #[serde(other)]
    Unknown,
}

impl TaskStatus {
    /// Parses the same spellings the snapshot format accepts.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "success" | "succeeded" => Some(Self::Succeeded),
            "failed" => Some(Self::Failed),
            "system-failed" | "system_failed" | "timed_out" => Some(Self::SystemFailed),
            "started" | "dispatched" => Some(Self::Started),
            "undispatched" => Some(Self::Undispatched),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Succeeded => "success",
            Self::Failed => "failed",
            Self::SystemFailed => "system-failed",
            Self::Started => "started",
            Self::Undispatched => "undispatched",
            Self::Inactive => "inactive",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Deserialize)]
pub struct Task {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub status: TaskStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Deserialize)]
pub struct BuildVariant {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub display_name: String,
}

/// All task results for one (variant, version) pair.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Build {
    pub id: String,
    pub tasks: Vec<Task>,
    /// Computed from `tasks` at load time.
    pub status_count: TaskStatusCount,
}

impl Build {
    pub fn new(id: String, tasks: Vec<Task>) -> Self {
        let status_count = TaskStatusCount::from_tasks(&tasks);
        Self {
            id,
            tasks,
            status_count,
        }
    }
}

/// One underlying commit of a version. `created_at` is `None` when the
/// snapshot carried no usable timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Commit {
    pub id: String,
    pub author: String,
    pub message: String,
    pub revision: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionKind {
    Active(Commit),
    /// A batch of commits that never ran; may hold any number of commits.
    RolledUp(Vec<Commit>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub id: String,
    pub revision_order: i64,
    pub kind: VersionKind,
    /// Author entries the snapshot listed for this version. Pagination
    /// counts these, not the commits kept in `kind`.
    pub authors: usize,
}

impl Version {
    /// One author entry per commit in `kind`.
    pub fn new(id: impl Into<String>, revision_order: i64, kind: VersionKind) -> Self {
        let authors = match &kind {
            VersionKind::Active(_) => 1,
            VersionKind::RolledUp(commits) => commits.len(),
        };
        Self {
            id: id.into(),
            revision_order,
            kind,
            authors,
        }
    }

    pub fn commits(&self) -> &[Commit] {
        match &self.kind {
            VersionKind::Active(commit) => std::slice::from_ref(commit),
            VersionKind::RolledUp(commits) => commits,
        }
    }

    pub fn is_rolled_up(&self) -> bool {
        matches!(self.kind, VersionKind::RolledUp(_))
    }

    /// Number of author entries this column stands for.
    pub fn author_count(&self) -> usize {
        self.authors
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    pub variant: BuildVariant,
    /// Keyed by version id.
    pub builds: HashMap<String, Build>,
}

impl Row {
    pub fn build_for(&self, version_id: &str) -> Option<&Build> {
        self.builds.get(version_id)
    }
}

/// One page of waterfall data plus its pagination counters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    pub project: String,
    pub current_skip: i64,
    pub previous_page_count: i64,
    pub total_versions: i64,
    /// Newest first (descending `revision_order`).
    pub versions: Vec<Version>,
    pub rows: Vec<Row>,
}
