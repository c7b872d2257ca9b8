//! Case-insensitive substring filters for variant and task names.

use crate::model::{Build, BuildVariant, Row, Task, Version};

/// A lowercased needle. Empty matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextFilter {
    needle: String,
}

impl TextFilter {
    pub fn new(text: &str) -> Self {
        Self {
            needle: text.to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches(&self, haystack: &str) -> bool {
        self.needle.is_empty() || haystack.to_lowercase().contains(&self.needle)
    }
}

/// Variant and task filters, composed by AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub variant: TextFilter,
    pub task: TextFilter,
}

impl TaskFilter {
    pub fn new(variant: &str, task: &str) -> Self {
        Self {
            variant: TextFilter::new(variant),
            task: TextFilter::new(task),
        }
    }

    pub fn variant_matches(&self, variant: &BuildVariant) -> bool {
        self.variant.matches(&variant.display_name)
    }

    pub fn task_matches(&self, task: &Task) -> bool {
        self.task.matches(&task.display_name)
    }

    /// Tasks of `build` that pass the task filter, in build order.
    pub fn visible_tasks<'a>(&self, build: &'a Build) -> Vec<&'a Task> {
        build.tasks.iter().filter(|t| self.task_matches(t)).collect()
    }

    /// A row is shown when its variant matches and, with a task filter set,
    /// at least one matching task would be drawn: only builds of active
    /// versions on this page count.
    pub fn row_visible(&self, row: &Row, versions: &[Version]) -> bool {
        if !self.variant_matches(&row.variant) {
            return false;
        }
        self.task.is_empty()
            || versions
                .iter()
                .filter(|v| !v.is_rolled_up())
                .filter_map(|v| row.build_for(&v.id))
                .any(|b| b.tasks.iter().any(|t| self.task_matches(t)))
    }
}
