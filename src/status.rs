//! Per-build task status counts and the fixed category order used by
//! collapsed summary bars.

use crate::model::{Task, TaskStatus};

/// The six summary categories, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCategory {
    Succeeded,
    Started,
    SystemFailed,
    Undispatched,
    Inactive,
    Failed,
}

pub const CATEGORY_ORDER: [StatusCategory; 6] = [
    StatusCategory::Succeeded,
    StatusCategory::Started,
    StatusCategory::SystemFailed,
    StatusCategory::Undispatched,
    StatusCategory::Inactive,
    StatusCategory::Failed,
];

impl StatusCategory {
    pub fn of(status: TaskStatus) -> Option<Self> {
        match status {
            TaskStatus::Succeeded => Some(Self::Succeeded),
            TaskStatus::Started => Some(Self::Started),
            TaskStatus::SystemFailed => Some(Self::SystemFailed),
            TaskStatus::Undispatched => Some(Self::Undispatched),
            TaskStatus::Inactive => Some(Self::Inactive),
            TaskStatus::Failed => Some(Self::Failed),
            TaskStatus::Unknown => None,
        }
    }

    pub fn status(self) -> TaskStatus {
        match self {
            Self::Succeeded => TaskStatus::Succeeded,
            Self::Started => TaskStatus::Started,
            Self::SystemFailed => TaskStatus::SystemFailed,
            Self::Undispatched => TaskStatus::Undispatched,
            Self::Inactive => TaskStatus::Inactive,
            Self::Failed => TaskStatus::Failed,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Succeeded => "success",
            Self::Started => "dispatched",
            Self::SystemFailed => "system-failed",
            Self::Undispatched => "undispatched",
            Self::Inactive => "inactive",
            Self::Failed => "failed",
        }
    }
}

/// Counts keyed by category. System failures are stored under `timed_out`,
/// the field name the server uses for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskStatusCount {
    pub succeeded: usize,
    pub started: usize,
    pub timed_out: usize,
    pub undispatched: usize,
    pub inactive: usize,
    pub failed: usize,
    /// Tasks whose status is outside the six categories. Not part of `total`.
    pub unknown: usize,
}

impl TaskStatusCount {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        aggregate(tasks)
    }

    pub fn get(&self, category: StatusCategory) -> usize {
        match category {
            StatusCategory::Succeeded => self.succeeded,
            StatusCategory::Started => self.started,
            StatusCategory::SystemFailed => self.timed_out,
            StatusCategory::Undispatched => self.undispatched,
            StatusCategory::Inactive => self.inactive,
            StatusCategory::Failed => self.failed,
        }
    }

    fn slot(&mut self, status: TaskStatus) -> &mut usize {
        match status {
            TaskStatus::Succeeded => &mut self.succeeded,
            TaskStatus::Started => &mut self.started,
            TaskStatus::SystemFailed => &mut self.timed_out,
            TaskStatus::Undispatched => &mut self.undispatched,
            TaskStatus::Inactive => &mut self.inactive,
            TaskStatus::Failed => &mut self.failed,
            TaskStatus::Unknown => &mut self.unknown,
        }
    }

    pub fn total(&self) -> usize {
        CATEGORY_ORDER.iter().map(|c| self.get(*c)).sum()
    }
}

/// Counts tasks per status category. Unknown statuses land in `unknown`.
pub fn aggregate<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> TaskStatusCount {
    let mut counts = TaskStatusCount::default();
    for task in tasks {
        *counts.slot(task.status) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(status: TaskStatus) -> Task {
        Task {
            id: format!("t-{status}"),
            display_name: "t".to_string(),
            status,
        }
    }

    #[test]
    fn empty_task_list_is_all_zero() {
        let counts = aggregate(&Vec::<Task>::new());
        assert_eq!(counts, TaskStatusCount::default());
        assert_eq!(counts.total(), 0);
    }

    #[test]
    fn counts_each_category() {
        let tasks = vec![
            task(TaskStatus::Succeeded),
            task(TaskStatus::Succeeded),
            task(TaskStatus::Failed),
            task(TaskStatus::SystemFailed),
            task(TaskStatus::Started),
            task(TaskStatus::Undispatched),
            task(TaskStatus::Inactive),
            task(TaskStatus::Inactive),
        ];
        let counts = aggregate(&tasks);
        assert_eq!(counts.succeeded, 2);
        assert_eq!(counts.failed, 1);
        assert_eq!(counts.timed_out, 1);
        assert_eq!(counts.started, 1);
        assert_eq!(counts.undispatched, 1);
        assert_eq!(counts.inactive, 2);
        assert_eq!(counts.total(), tasks.len());
    }

    #[test]
    fn unknown_status_is_tallied_separately() {
        let tasks = vec![task(TaskStatus::Unknown), task(TaskStatus::Failed)];
        let counts = aggregate(&tasks);
        assert_eq!(counts.unknown, 1);
        assert_eq!(counts.total(), 1);
    }

    #[test]
    fn total_matches_known_task_count() {
        let statuses = [
            TaskStatus::Succeeded,
            TaskStatus::Failed,
            TaskStatus::SystemFailed,
            TaskStatus::Started,
            TaskStatus::Undispatched,
            TaskStatus::Inactive,
        ];
        for n in 0..20 {
            let tasks: Vec<Task> = (0..n).map(|i| task(statuses[i % statuses.len()])).collect();
            assert_eq!(aggregate(&tasks).total(), n, "n = {n}");
        }
    }

    #[test]
    fn system_failed_maps_to_timed_out_slot() {
        let counts = aggregate(&[task(TaskStatus::SystemFailed)]);
        assert_eq!(counts.get(StatusCategory::SystemFailed), 1);
        assert_eq!(counts.timed_out, 1);
    }

    #[test]
    fn category_status_mapping_is_consistent() {
        for category in CATEGORY_ORDER {
            assert_eq!(StatusCategory::of(category.status()), Some(category));
        }
        assert_eq!(StatusCategory::of(TaskStatus::Unknown), None);
    }
}
