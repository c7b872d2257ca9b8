//! Newer/older page targets from the snapshot's skip counters.

use crate::links;
use crate::model::Version;

/// Skip offsets for the two page buttons. `None` means the button is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageWindow {
    pub newer: Option<i64>,
    pub older: Option<i64>,
}

impl PageWindow {
    /// `items_shown` is the number of author entries on the current page.
    pub fn compute(
        total_versions: i64,
        current_skip: i64,
        previous_page_count: i64,
        items_shown: i64,
    ) -> Self {
        let next_skip = current_skip.saturating_add(items_shown.max(0));
        let older = (current_skip >= 0 && next_skip < total_versions).then_some(next_skip);

        let prev_skip = current_skip.saturating_sub(previous_page_count.max(0)).max(0);
        let newer = (current_skip > 0).then_some(prev_skip);

        Self { newer, older }
    }

    /// Empty string when disabled.
    pub fn newer_url(&self, project: &str) -> String {
        self.newer
            .map(|skip| links::waterfall_page(project, skip))
            .unwrap_or_default()
    }

    /// Empty string when disabled.
    pub fn older_url(&self, project: &str) -> String {
        self.older
            .map(|skip| links::waterfall_page(project, skip))
            .unwrap_or_default()
    }
}

/// Sum of author entries across the displayed versions.
pub fn items_shown(versions: &[Version]) -> i64 {
    versions.iter().map(|v| v.author_count() as i64).sum()
}
