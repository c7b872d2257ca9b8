//! Status colors and the task box glyph for the grid widget.

use crate::model::TaskStatus;
use crate::status::StatusCategory;
use ratatui::style::Color;

pub const TASK_GLYPH: &str = "■";

pub fn status_color(status: TaskStatus) -> Color {
    match status {
        TaskStatus::Succeeded => Color::Green,
        TaskStatus::Failed => Color::Red,
        TaskStatus::SystemFailed => Color::Magenta,
        TaskStatus::Started => Color::Yellow,
        TaskStatus::Undispatched => Color::Gray,
        TaskStatus::Inactive => Color::DarkGray,
        TaskStatus::Unknown => Color::White,
    }
}

pub fn category_color(category: StatusCategory) -> Color {
    status_color(category.status())
}
