//! Grid assembly: visible rows with one cell decision per version, and the
//! version header band.

use crate::app::ViewState;
use crate::cell::{self, CellRender};
use crate::filter::TaskFilter;
use crate::links;
use crate::model::{BuildVariant, Commit, Snapshot, Version, VersionKind};
use chrono::{DateTime, Utc};

/// Active header messages are cut to this many characters when shortened.
pub const MESSAGE_SHORT_LEN: usize = 35;
pub const HEADER_HASH_LEN: usize = 5;
pub const SUMMARY_HASH_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridView<'a> {
    pub headers: Vec<VersionHeader>,
    pub rows: Vec<RowView<'a>>,
}

impl GridView<'_> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView<'a> {
    pub variant: &'a BuildVariant,
    pub link: String,
    /// One per version, in snapshot order.
    pub cells: Vec<CellRender<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionHeader {
    Active(ActiveHeader),
    RolledUp(RolledUpHeader),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveHeader {
    pub version_id: String,
    pub link: String,
    pub hash: String,
    pub time: String,
    pub author: String,
    pub message: String,
    /// The full message is long enough for a more/less toggle.
    pub expandable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolledUpHeader {
    pub label: String,
    pub commits: Vec<CommitSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSummary {
    pub time: String,
    pub hash: String,
    pub author: String,
    pub message: String,
    pub link: String,
}

/// Builds the visible grid. Versions keep snapshot order; rows keep
/// snapshot order minus those rejected by the filters.
pub fn assemble<'a>(snapshot: &'a Snapshot, view: &ViewState) -> GridView<'a> {
    let filter = TaskFilter::new(&view.variant_filter, &view.task_filter);

    let rows = snapshot
        .rows
        .iter()
        .filter(|row| filter.row_visible(row, &snapshot.versions))
        .map(|row| RowView {
            variant: &row.variant,
            link: links::build_variant(&snapshot.project, &row.variant.id),
            cells: snapshot
                .versions
                .iter()
                .map(|version| {
                    cell::decide(
                        version,
                        row.build_for(&version.id),
                        view.collapsed,
                        &filter,
                        &view.attention,
                    )
                })
                .collect(),
        })
        .collect();

    GridView {
        headers: headers(&snapshot.versions, view.shorten_messages),
        rows,
    }
}

pub fn headers(versions: &[Version], shorten: bool) -> Vec<VersionHeader> {
    versions.iter().map(|v| version_header(v, shorten)).collect()
}

pub fn version_header(version: &Version, shorten: bool) -> VersionHeader {
    match &version.kind {
        VersionKind::Active(commit) => VersionHeader::Active(ActiveHeader {
            version_id: version.id.clone(),
            link: links::version(&version.id),
            hash: truncate_chars(&commit.revision, HEADER_HASH_LEN),
            time: format_time(commit.created_at),
            author: commit.author.clone(),
            message: shorten_message(&commit.message, shorten),
            expandable: commit.message.chars().count() > MESSAGE_SHORT_LEN,
        }),
        VersionKind::RolledUp(commits) => VersionHeader::RolledUp(RolledUpHeader {
            label: rolled_up_label(commits.len()),
            commits: commits.iter().map(commit_summary).collect(),
        }),
    }
}

pub fn rolled_up_label(count: usize) -> String {
    let noun = if count == 1 { "version" } else { "versions" };
    format!("{count} inactive {noun}")
}

fn commit_summary(commit: &Commit) -> CommitSummary {
    CommitSummary {
        time: format_time(commit.created_at),
        hash: truncate_chars(&commit.revision, SUMMARY_HASH_LEN),
        author: commit.author.clone(),
        message: commit.message.clone(),
        link: links::version(&commit.id),
    }
}

/// First `MESSAGE_SHORT_LEN` characters plus `...` when `shorten` is set and
/// the message is longer; otherwise unchanged.
pub fn shorten_message(message: &str, shorten: bool) -> String {
    if shorten && message.chars().count() > MESSAGE_SHORT_LEN {
        let mut short = truncate_chars(message, MESSAGE_SHORT_LEN);
        short.push_str("...");
        short
    } else {
        message.to_string()
    }
}

pub fn truncate_chars(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

/// `5/7/96 01:15 PM` style, in UTC. Blank when unknown.
pub fn format_time(time: Option<DateTime<Utc>>) -> String {
    time.map(|t| t.format("%-m/%-d/%y %I:%M %p").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Build, Row, Task, TaskStatus};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn commit(id: &str, message: &str) -> Commit {
        Commit {
            id: id.to_string(),
            author: "alice".to_string(),
            message: message.to_string(),
            revision: format!("{id}0123456789abcdef"),
            created_at: Some(Utc.with_ymd_and_hms(1996, 5, 7, 13, 15, 0).unwrap()),
        }
    }

    fn active(id: &str, order: i64) -> Version {
        Version::new(id, order, VersionKind::Active(commit(id, "fix things")))
    }

    fn rolled(id: &str, order: i64, n: usize) -> Version {
        Version::new(
            id,
            order,
            VersionKind::RolledUp(
                (0..n).map(|i| commit(&format!("{id}{i}"), "skipped")).collect(),
            ),
        )
    }

    fn row(variant: &str, builds: Vec<(&str, Vec<(&str, TaskStatus)>)>) -> Row {
        Row {
            variant: BuildVariant {
                id: variant.to_lowercase(),
                display_name: variant.to_string(),
            },
            builds: builds
                .iter()
                .map(|(vid, tasks)| {
                    let tasks = tasks
                        .iter()
                        .map(|(name, status)| Task {
                            id: format!("{variant}-{name}"),
                            display_name: name.to_string(),
                            status: *status,
                        })
                        .collect();
                    (vid.to_string(), Build::new(format!("{variant}-{vid}"), tasks))
                })
                .collect(),
        }
    }

    fn snapshot() -> Snapshot {
        Snapshot {
            project: "mci".to_string(),
            current_skip: 0,
            previous_page_count: 0,
            total_versions: 10,
            versions: vec![active("v3", 3), rolled("v2", 2, 2), active("v1", 1)],
            rows: vec![
                row(
                    "Linux",
                    vec![
                        (
                            "v3",
                            vec![("compile", TaskStatus::Succeeded), ("lint", TaskStatus::Failed)],
                        ),
                        ("v1", vec![("compile", TaskStatus::Succeeded)]),
                    ],
                ),
                row("Windows", vec![("v3", vec![("compile", TaskStatus::Started)])]),
            ],
        }
    }

    #[test]
    fn default_view_shows_every_row_and_column() {
        let snap = snapshot();
        let grid = assemble(&snap, &ViewState::default());
        assert_eq!(grid.rows.len(), 2);
        assert_eq!(grid.headers.len(), 3);
        for row in &grid.rows {
            assert_eq!(row.cells.len(), 3);
            assert_eq!(row.cells[1], CellRender::Inactive);
        }
        assert_eq!(grid.rows[0].link, "/build_variant/mci/linux");
    }

    #[test]
    fn variant_filter_excludes_rows() {
        let snap = snapshot();
        let view = ViewState {
            variant_filter: "WIN".to_string(),
            ..ViewState::default()
        };
        let grid = assemble(&snap, &view);
        assert_eq!(grid.rows.len(), 1);
        assert_eq!(grid.rows[0].variant.display_name, "Windows");
    }

    #[test]
    fn task_filter_narrows_rows_and_tasks() {
        let snap = snapshot();
        let view = ViewState {
            task_filter: "lint".to_string(),
            ..ViewState::default()
        };
        let grid = assemble(&snap, &view);
        assert_eq!(grid.rows.len(), 1);
        match &grid.rows[0].cells[0] {
            CellRender::Expanded { tasks } => {
                assert_eq!(tasks.len(), 1);
                assert_eq!(tasks[0].display_name, "lint");
            }
            other => panic!("expected Expanded, got {other:?}"),
        }
        assert_eq!(grid.rows[0].cells[2], CellRender::Expanded { tasks: vec![] });
    }

    #[test]
    fn task_filter_without_matches_yields_empty_grid() {
        let snap = snapshot();
        let view = ViewState {
            task_filter: "no-such-task".to_string(),
            ..ViewState::default()
        };
        let grid = assemble(&snap, &view);
        assert!(grid.is_empty());
        assert_eq!(grid.headers.len(), 3);
    }

    #[test]
    fn task_match_only_in_rolled_up_build_hides_row() {
        let snap = Snapshot {
            versions: vec![active("a", 2), rolled("r", 1, 1)],
            rows: vec![row(
                "Linux",
                vec![
                    ("a", vec![("compile", TaskStatus::Succeeded)]),
                    ("r", vec![("lint", TaskStatus::Failed)]),
                ],
            )],
            ..Snapshot::default()
        };
        let view = ViewState {
            task_filter: "lint".to_string(),
            ..ViewState::default()
        };
        assert!(assemble(&snap, &view).is_empty());
    }

    #[test]
    fn collapse_does_not_change_visible_rows() {
        let snap = snapshot();
        for filter in ["", "lin", "x"] {
            let expanded = ViewState {
                variant_filter: filter.to_string(),
                ..ViewState::default()
            };
            let collapsed = ViewState {
                collapsed: true,
                ..expanded.clone()
            };
            let a: Vec<&str> = assemble(&snap, &expanded)
                .rows
                .iter()
                .map(|r| r.variant.id.as_str())
                .collect();
            let b: Vec<&str> = assemble(&snap, &collapsed)
                .rows
                .iter()
                .map(|r| r.variant.id.as_str())
                .collect();
            assert_eq!(a, b, "filter {filter:?}");
        }
    }

    #[test]
    fn assembly_is_idempotent() {
        let snap = snapshot();
        let view = ViewState {
            collapsed: true,
            task_filter: "c".to_string(),
            ..ViewState::default()
        };
        assert_eq!(assemble(&snap, &view), assemble(&snap, &view));
    }

    #[test]
    fn versions_are_not_resorted() {
        let mut snap = snapshot();
        snap.versions.reverse();
        let grid = assemble(&snap, &ViewState::default());
        match &grid.headers[0] {
            VersionHeader::Active(h) => assert_eq!(h.version_id, "v1"),
            other => panic!("expected Active, got {other:?}"),
        }
    }

    #[test]
    fn active_header_fields() {
        let header = version_header(&active("abc", 1), true);
        let expected = VersionHeader::Active(ActiveHeader {
            version_id: "abc".to_string(),
            link: "/version/abc".to_string(),
            hash: "abc01".to_string(),
            time: "5/7/96 01:15 PM".to_string(),
            author: "alice".to_string(),
            message: "fix things".to_string(),
            expandable: false,
        });
        assert_eq!(header, expected);
    }

    #[test]
    fn rolled_up_header_lists_each_commit() {
        match version_header(&rolled("r", 1, 3), true) {
            VersionHeader::RolledUp(h) => {
                assert_eq!(h.label, "3 inactive versions");
                assert_eq!(h.commits.len(), 3);
                assert_eq!(h.commits[1].hash, "r101234567");
                assert_eq!(h.commits[1].hash.chars().count(), SUMMARY_HASH_LEN);
                assert_eq!(h.commits[1].link, "/version/r1");
            }
            other => panic!("expected RolledUp, got {other:?}"),
        }
    }

    #[test]
    fn rolled_up_label_pluralizes() {
        assert_eq!(rolled_up_label(1), "1 inactive version");
        assert_eq!(rolled_up_label(2), "2 inactive versions");
        assert_eq!(rolled_up_label(0), "0 inactive versions");
    }

    #[test]
    fn long_message_is_shortened() {
        let message = "a".repeat(40);
        let short = shorten_message(&message, true);
        assert_eq!(short, format!("{}...", "a".repeat(35)));
        assert_eq!(shorten_message(&message, false), message);
    }

    #[test]
    fn short_message_is_untouched() {
        let message = "b".repeat(20);
        assert_eq!(shorten_message(&message, true), message);
        assert_eq!(shorten_message(&message, false), message);
    }

    #[test]
    fn exactly_35_chars_is_not_shortened() {
        let message = "c".repeat(35);
        assert_eq!(shorten_message(&message, true), message);
    }

    #[test]
    fn shorten_counts_characters_not_bytes() {
        let message = "é".repeat(40);
        let short = shorten_message(&message, true);
        assert_eq!(short.chars().count(), 38);
    }

    #[test]
    fn header_hash_is_five_chars() {
        assert_eq!(truncate_chars("0123456789", HEADER_HASH_LEN), "01234");
        assert_eq!(truncate_chars("012", HEADER_HASH_LEN), "012");
    }

    #[test]
    fn unknown_time_is_blank() {
        assert_eq!(format_time(None), "");
    }
}
