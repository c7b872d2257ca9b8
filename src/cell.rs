//! Render decision for one variant/version intersection.
//!
//! A cell is [`CellRender::Inactive`] for rolled-up versions, otherwise it
//! lists its tasks ([`CellRender::Expanded`]) or, in collapsed mode, keeps
//! only attention-worthy tasks and folds the rest into `+N` summary units
//! ([`CellRender::Collapsed`]).

use crate::filter::TaskFilter;
use crate::model::{Build, Task, TaskStatus, Version};
use crate::status::{self, StatusCategory, TaskStatusCount, CATEGORY_ORDER};

/// Statuses kept as individual boxes when collapsed.
pub const DEFAULT_ATTENTION: [TaskStatus; 2] = [TaskStatus::Failed, TaskStatus::SystemFailed];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryUnit {
    pub category: StatusCategory,
    pub count: usize,
}

impl SummaryUnit {
    pub fn label(&self) -> String {
        format!("+{}", self.count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellRender<'a> {
    Inactive,
    Expanded {
        tasks: Vec<&'a Task>,
    },
    Collapsed {
        attention: Vec<&'a Task>,
        summary: Vec<SummaryUnit>,
    },
}

impl CellRender<'_> {
    /// Number of individually drawn task boxes.
    pub fn task_box_count(&self) -> usize {
        match self {
            Self::Inactive => 0,
            Self::Expanded { tasks } => tasks.len(),
            Self::Collapsed { attention, .. } => attention.len(),
        }
    }
}

/// Decides how the cell for `version` × `build` is drawn. `build` is `None`
/// when the row has no build for this version; that renders as an empty cell.
pub fn decide<'a>(
    version: &Version,
    build: Option<&'a Build>,
    collapsed: bool,
    filter: &TaskFilter,
    attention: &[TaskStatus],
) -> CellRender<'a> {
    if version.is_rolled_up() {
        return CellRender::Inactive;
    }

    let tasks: Vec<&'a Task> = build.map(|b| filter.visible_tasks(b)).unwrap_or_default();

    if !collapsed {
        return CellRender::Expanded { tasks };
    }

    let counts = match build {
        Some(b) if filter.task.is_empty() => b.status_count,
        Some(_) => status::aggregate(tasks.iter().copied()),
        None => TaskStatusCount::default(),
    };

    let attention_tasks = tasks
        .into_iter()
        .filter(|t| attention.contains(&t.status))
        .collect();

    CellRender::Collapsed {
        attention: attention_tasks,
        summary: summary_units(&counts, attention),
    }
}

/// Non-zero categories in fixed order, skipping those drawn individually.
pub fn summary_units(counts: &TaskStatusCount, attention: &[TaskStatus]) -> Vec<SummaryUnit> {
    CATEGORY_ORDER
        .iter()
        .filter(|c| !attention.contains(&c.status()))
        .map(|&category| SummaryUnit {
            category,
            count: counts.get(category),
        })
        .filter(|u| u.count > 0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Commit, VersionKind};

    fn active() -> Version {
        Version::new("v1", 2, VersionKind::Active(Commit::default()))
    }

    fn rolled_up() -> Version {
        Version::new(
            "v0",
            1,
            VersionKind::RolledUp(vec![Commit::default(), Commit::default()]),
        )
    }

    fn task(name: &str, status: TaskStatus) -> Task {
        Task {
            id: format!("{name}-id"),
            display_name: name.to_string(),
            status,
        }
    }

    fn mixed_build() -> Build {
        Build::new(
            "b1".to_string(),
            vec![
                task("compile", TaskStatus::Succeeded),
                task("lint", TaskStatus::Failed),
                task("test-unit", TaskStatus::Succeeded),
                task("test-sys", TaskStatus::SystemFailed),
                task("docs", TaskStatus::Undispatched),
                task("bench", TaskStatus::Started),
            ],
        )
    }

    fn active_cell<'a>(build: Option<&'a Build>, collapsed: bool, task: &str) -> CellRender<'a> {
        decide(
            &active(),
            build,
            collapsed,
            &TaskFilter::new("", task),
            &DEFAULT_ATTENTION,
        )
    }

    fn unit(category: StatusCategory, count: usize) -> SummaryUnit {
        SummaryUnit { category, count }
    }

    fn names(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|t| t.display_name.clone()).collect()
    }

    #[test]
    fn rolled_up_is_always_inactive() {
        let build = mixed_build();
        for collapsed in [false, true] {
            for filter in ["", "lint", "nothing"] {
                let cell = decide(
                    &rolled_up(),
                    Some(&build),
                    collapsed,
                    &TaskFilter::new("", filter),
                    &DEFAULT_ATTENTION,
                );
                assert_eq!(cell, CellRender::Inactive);
            }
        }
    }

    #[test]
    fn expanded_keeps_every_task_in_order() {
        let build = mixed_build();
        let cell = active_cell(Some(&build), false, "");
        match cell {
            CellRender::Expanded { tasks } => {
                assert_eq!(
                    names(&tasks),
                    vec!["compile", "lint", "test-unit", "test-sys", "docs", "bench"]
                );
            }
            other => panic!("expected Expanded, got {other:?}"),
        }
    }

    #[test]
    fn expanded_applies_task_filter() {
        let build = mixed_build();
        let cell = active_cell(Some(&build), false, "TEST");
        match cell {
            CellRender::Expanded { tasks } => {
                assert_eq!(names(&tasks), vec!["test-unit", "test-sys"]);
            }
            other => panic!("expected Expanded, got {other:?}"),
        }
    }

    #[test]
    fn collapsed_shows_failures_and_summary() {
        let build = mixed_build();
        let cell = active_cell(Some(&build), true, "");
        match cell {
            CellRender::Collapsed { attention, summary } => {
                assert_eq!(names(&attention), vec!["lint", "test-sys"]);
                assert_eq!(
                    summary,
                    vec![
                        unit(StatusCategory::Succeeded, 2),
                        unit(StatusCategory::Started, 1),
                        unit(StatusCategory::Undispatched, 1),
                    ]
                );
            }
            other => panic!("expected Collapsed, got {other:?}"),
        }
    }

    #[test]
    fn summary_never_repeats_attention_statuses() {
        let counts = TaskStatusCount {
            succeeded: 1,
            started: 1,
            timed_out: 4,
            undispatched: 1,
            inactive: 1,
            failed: 3,
            unknown: 0,
        };
        let units = summary_units(&counts, &DEFAULT_ATTENTION);
        assert!(units
            .iter()
            .all(|u| u.category != StatusCategory::Failed
                && u.category != StatusCategory::SystemFailed));
        let order: Vec<StatusCategory> = units.iter().map(|u| u.category).collect();
        assert_eq!(
            order,
            vec![
                StatusCategory::Succeeded,
                StatusCategory::Started,
                StatusCategory::Undispatched,
                StatusCategory::Inactive,
            ]
        );
    }

    #[test]
    fn summary_follows_category_order_not_count() {
        let counts = TaskStatusCount {
            succeeded: 1,
            inactive: 50,
            started: 7,
            ..Default::default()
        };
        let units = summary_units(&counts, &[]);
        let labels: Vec<String> = units.iter().map(SummaryUnit::label).collect();
        assert_eq!(labels, vec!["+1", "+7", "+50"]);
    }

    #[test]
    fn custom_attention_set_changes_split() {
        let build = mixed_build();
        let attention = [TaskStatus::Undispatched];
        let cell = decide(&active(), Some(&build), true, &TaskFilter::default(), &attention);
        match cell {
            CellRender::Collapsed { attention, summary } => {
                assert_eq!(names(&attention), vec!["docs"]);
                assert!(summary.iter().any(|u| u.category == StatusCategory::Failed));
                assert!(summary.iter().all(|u| u.category != StatusCategory::Undispatched));
            }
            other => panic!("expected Collapsed, got {other:?}"),
        }
    }

    #[test]
    fn collapsed_summary_counts_only_filtered_tasks() {
        let build = mixed_build();
        let cell = active_cell(Some(&build), true, "test");
        match cell {
            CellRender::Collapsed { attention, summary } => {
                assert_eq!(names(&attention), vec!["test-sys"]);
                assert_eq!(
                    summary,
                    vec![unit(StatusCategory::Succeeded, 1)]
                );
            }
            other => panic!("expected Collapsed, got {other:?}"),
        }
    }

    #[test]
    fn missing_build_renders_empty() {
        let cell = active_cell(None, false, "");
        assert_eq!(cell, CellRender::Expanded { tasks: vec![] });
        let cell = active_cell(None, true, "");
        assert_eq!(
            cell,
            CellRender::Collapsed {
                attention: vec![],
                summary: vec![]
            }
        );
        assert_eq!(cell.task_box_count(), 0);
    }
}
