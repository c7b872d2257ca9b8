//! Controller state: the loaded snapshot, the view state that drives grid
//! assembly, and terminal-only UI state (scroll, edit mode, overlays).

use crate::cell::{CellRender, DEFAULT_ATTENTION};
use crate::grid::{self, GridView, VersionHeader};
use crate::links;
use crate::model::{Snapshot, TaskStatus, VersionKind};
use crate::pagination::{self, PageWindow};
use std::time::Instant;

pub const NOTIFICATION_TTL_SECS: u64 = 5;
/// Below 60 cols the footer switches to short key hints.
pub const NARROW_WIDTH_THRESHOLD: u16 = 60;
pub const ERROR_TTL_SECS: u64 = 10;

/// Everything grid assembly depends on besides the snapshot. Only
/// [`AppState`] mutates it, always by replacing a whole field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub collapsed: bool,
    pub variant_filter: String,
    pub task_filter: String,
    pub shorten_messages: bool,
    /// Statuses kept as individual boxes in collapsed cells.
    pub attention: Vec<TaskStatus>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            collapsed: false,
            variant_filter: String::new(),
            task_filter: String::new(),
            shorten_messages: true,
            attention: DEFAULT_ATTENTION.to_vec(),
        }
    }
}

/// Which filter box, if any, is receiving keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    VariantFilter,
    TaskFilter,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub timestamp: Instant,
}

pub struct DetailOverlay {
    pub title: String,
    pub lines: Vec<(String, String)>,
}

/// Immutable configuration set at startup.
pub struct AppConfig {
    pub project: String,
    pub source: String,
    pub version_string: String,
}

pub struct AppState {
    pub config: AppConfig,
    pub snapshot: Snapshot,
    pub view: ViewState,
    pub page: PageWindow,

    // Navigation
    pub row_offset: usize,
    pub selected_column: usize,
    pub input_mode: InputMode,

    // Transient UI
    pub overlay: Option<DetailOverlay>,
    pub notifications: Vec<Notification>,
    pub error: Option<(String, Instant)>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(config: AppConfig, snapshot: Snapshot, view: ViewState) -> Self {
        let page = PageWindow::compute(
            snapshot.total_versions,
            snapshot.current_skip,
            snapshot.previous_page_count,
            pagination::items_shown(&snapshot.versions),
        );
        Self {
            config,
            snapshot,
            view,
            page,
            row_offset: 0,
            selected_column: 0,
            input_mode: InputMode::Normal,
            overlay: None,
            notifications: Vec::new(),
            error: None,
            should_quit: false,
        }
    }

    /// Recomputed on every call; cheap and side-effect free.
    pub fn grid(&self) -> GridView<'_> {
        grid::assemble(&self.snapshot, &self.view)
    }

    pub fn visible_row_count(&self) -> usize {
        self.grid().rows.len()
    }

    pub fn toggle_collapsed(&mut self) {
        self.view.collapsed = !self.view.collapsed;
    }

    pub fn toggle_shorten_messages(&mut self) {
        self.view.shorten_messages = !self.view.shorten_messages;
    }

    pub fn set_variant_filter(&mut self, filter: String) {
        self.view.variant_filter = filter;
        self.clamp_row_offset();
    }

    pub fn set_task_filter(&mut self, filter: String) {
        self.view.task_filter = filter;
        self.clamp_row_offset();
    }

    pub fn begin_edit(&mut self, mode: InputMode) {
        self.input_mode = mode;
    }

    pub fn end_edit(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn is_editing(&self) -> bool {
        self.input_mode != InputMode::Normal
    }

    /// Current text of the filter being edited.
    pub fn editing_text(&self) -> Option<&str> {
        match self.input_mode {
            InputMode::Normal => None,
            InputMode::VariantFilter => Some(&self.view.variant_filter),
            InputMode::TaskFilter => Some(&self.view.task_filter),
        }
    }

    /// Stores the new full value for the filter being edited.
    fn replace_editing_text(&mut self, text: String) {
        match self.input_mode {
            InputMode::Normal => {}
            InputMode::VariantFilter => self.set_variant_filter(text),
            InputMode::TaskFilter => self.set_task_filter(text),
        }
    }

    pub fn push_filter_char(&mut self, c: char) {
        if let Some(current) = self.editing_text() {
            let mut text = current.to_string();
            text.push(c);
            self.replace_editing_text(text);
        }
    }

    pub fn pop_filter_char(&mut self) {
        if let Some(current) = self.editing_text() {
            let mut text = current.to_string();
            text.pop();
            self.replace_editing_text(text);
        }
    }

    pub fn clear_filter(&mut self) {
        self.replace_editing_text(String::new());
    }

    pub fn scroll_up(&mut self) {
        self.row_offset = self.row_offset.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        let rows = self.visible_row_count();
        if rows > 0 && self.row_offset < rows - 1 {
            self.row_offset += 1;
        }
    }

    fn clamp_row_offset(&mut self) {
        let rows = self.visible_row_count();
        if self.row_offset >= rows {
            self.row_offset = rows.saturating_sub(1);
        }
    }

    pub fn select_left(&mut self) {
        self.selected_column = self.selected_column.saturating_sub(1);
    }

    pub fn select_right(&mut self) {
        let columns = self.snapshot.versions.len();
        if columns > 0 && self.selected_column < columns - 1 {
            self.selected_column += 1;
        }
    }

    pub fn has_detail_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    /// Opens the commit details for the selected version column.
    pub fn open_details(&mut self) {
        let Some(version) = self.snapshot.versions.get(self.selected_column) else {
            return;
        };
        let overlay = match grid::version_header(version, false) {
            VersionHeader::RolledUp(header) => DetailOverlay {
                title: header.label,
                lines: header
                    .commits
                    .into_iter()
                    .flat_map(|c| {
                        [
                            (c.hash, format!("{} - {}", c.time, c.author)),
                            (String::new(), c.message),
                            (String::new(), c.link),
                        ]
                    })
                    .collect(),
            },
            VersionHeader::Active(header) => {
                let revision = match &version.kind {
                    VersionKind::Active(commit) => commit.revision.clone(),
                    VersionKind::RolledUp(_) => String::new(),
                };
                let mut lines = vec![
                    ("Commit".to_string(), revision),
                    ("Author".to_string(), header.author),
                    ("Time".to_string(), header.time),
                    ("Message".to_string(), header.message),
                    ("Link".to_string(), header.link),
                ];
                lines.extend(self.task_lines(self.selected_column));
                DetailOverlay {
                    title: format!("version {}", header.version_id),
                    lines,
                }
            }
        };
        self.overlay = Some(overlay);
    }

    /// One line per drawn task box in `column`, labelled by variant.
    fn task_lines(&self, column: usize) -> Vec<(String, String)> {
        let grid = self.grid();
        let mut lines = Vec::new();
        for row in &grid.rows {
            let tasks = match row.cells.get(column) {
                Some(CellRender::Expanded { tasks }) => tasks,
                Some(CellRender::Collapsed { attention, .. }) => attention,
                Some(CellRender::Inactive) | None => continue,
            };
            for task in tasks {
                lines.push((
                    row.variant.display_name.clone(),
                    format!("{} {} {}", task.display_name, task.status, links::task(&task.id)),
                ));
            }
        }
        lines
    }

    pub fn close_overlay(&mut self) {
        self.overlay = None;
    }

    pub fn newer_url(&self) -> String {
        self.page.newer_url(&self.config.project)
    }

    pub fn older_url(&self) -> String {
        self.page.older_url(&self.config.project)
    }

    /// Returns the target URL, or `None` (with a notice) when disabled.
    pub fn navigate_newer(&mut self) -> Option<String> {
        let url = self.newer_url();
        self.announce_navigation("newer", url)
    }

    pub fn navigate_older(&mut self) -> Option<String> {
        let url = self.older_url();
        self.announce_navigation("older", url)
    }

    fn announce_navigation(&mut self, label: &str, url: String) -> Option<String> {
        if url.is_empty() {
            self.notify(format!("No {label} page"));
            None
        } else {
            self.notify(format!("{label}: {url}"));
            Some(url)
        }
    }

    pub fn notify(&mut self, message: String) {
        self.notifications.push(Notification {
            message,
            timestamp: Instant::now(),
        });
    }

    pub fn prune_notifications(&mut self) {
        self.notifications
            .retain(|n| n.timestamp.elapsed().as_secs() < NOTIFICATION_TTL_SECS);
    }

    pub fn set_error(&mut self, msg: String) {
        self.error = Some((msg, Instant::now()));
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn prune_error(&mut self) {
        if let Some((_, at)) = &self.error {
            if at.elapsed().as_secs() >= ERROR_TTL_SECS {
                self.error = None;
            }
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|(msg, _)| msg.as_str())
    }
}
