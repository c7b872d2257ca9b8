//! Centered popup listing the commits or tasks behind one version column.

use crate::app::DetailOverlay;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use super::grid::wrap_width;

const MIN_WIDTH: u16 = 30;

pub fn render(f: &mut Frame, overlay: &DetailOverlay) {
    let area = f.area();
    let width = (area.width * 6 / 10).max(MIN_WIDTH).min(area.width);
    let inner_width = width.saturating_sub(2) as usize;

    let lines = overlay_lines(overlay, inner_width);

    // +2 border +1 bottom hint
    let wanted = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(3);
    let height = wanted.max(5).min(area.height);
    let popup = Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    );

    let block = Block::default()
        .title(format!(" {} ", overlay.title))
        .title_bottom(Line::from(" d/q/Esc close ").centered())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));

    f.render_widget(Clear, popup);
    f.render_widget(Paragraph::new(lines).block(block), popup);
}

/// Label column on the left, values wrapped to the remaining width. A label
/// equal to the one above it is left blank so grouped entries read as one.
fn overlay_lines(overlay: &DetailOverlay, inner_width: usize) -> Vec<Line<'static>> {
    let label_width = overlay
        .lines
        .iter()
        .map(|(l, _)| l.width())
        .max()
        .unwrap_or(0);
    let value_width = inner_width.saturating_sub(label_width + 2).max(1);
    let label_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let mut out = Vec::new();
    let mut previous: Option<&str> = None;
    for (label, value) in &overlay.lines {
        let shown = if previous == Some(label.as_str()) {
            ""
        } else {
            label.as_str()
        };
        previous = Some(label.as_str());

        let mut chunks = wrap_width(value, value_width);
        if chunks.is_empty() {
            chunks.push(String::new());
        }
        for (i, chunk) in chunks.into_iter().enumerate() {
            let text = if i == 0 { shown } else { "" };
            out.push(Line::from(vec![
                Span::styled(format!("{text:>label_width$}  "), label_style),
                Span::styled(chunk, Style::default().fg(Color::White)),
            ]));
        }
    }
    out
}
