use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{AppState, InputMode};

pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
    let narrow = area.width < crate::app::NARROW_WIDTH_THRESHOLD;

    let line = if let Some(text) = state.editing_text() {
        let prompt = match state.input_mode {
            InputMode::TaskFilter => "Filter task: ",
            _ => "Filter variant: ",
        };
        Line::from(vec![
            Span::styled(prompt, Style::default().fg(Color::Yellow)),
            Span::styled(text, Style::default().add_modifier(Modifier::BOLD)),
            Span::styled("▏", Style::default().fg(Color::Yellow)),
            Span::styled(
                "  Enter/Esc done · ^U clear",
                Style::default().fg(Color::DarkGray),
            ),
        ])
    } else if let Some(notif) = state.notifications.last() {
        Line::from(vec![
            Span::styled("★ ", Style::default().fg(Color::Yellow)),
            Span::styled(&notif.message, Style::default().fg(Color::Yellow)),
        ])
    } else {
        hint_line(state, narrow)
    };

    let footer = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(footer, area);
}

fn hint_line(state: &AppState, narrow: bool) -> Line<'static> {
    let hints: &[(&str, &str)] = if state.has_detail_overlay() {
        &[("d/q", "close")]
    } else if narrow {
        &[
            ("jk", "rows"),
            ("hl", "cols"),
            ("c", "coll"),
            ("/", "var"),
            ("t", "task"),
            ("q", "quit"),
        ]
    } else {
        &[
            ("↑↓/jk", "scroll"),
            ("←→/hl", "column"),
            ("d", "details"),
            ("c", "collapse"),
            ("m", "messages"),
            ("/", "variant"),
            ("t", "task"),
            ("q", "quit"),
        ]
    };

    let mut spans: Vec<Span> = Vec::new();
    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(*key, Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(
            format!(" {desc}"),
            Style::default().fg(Color::DarkGray),
        ));
    }

    if !state.has_detail_overlay() {
        for (key, label, enabled) in [
            ("n", "newer", state.page.newer.is_some()),
            ("o", "older", state.page.older.is_some()),
        ] {
            let style = if enabled {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT)
            };
            spans.push(Span::raw(" "));
            spans.push(Span::styled(key, style));
            spans.push(Span::styled(
                format!(" {label}"),
                Style::default().fg(Color::DarkGray),
            ));
        }
    }

    Line::from(spans)
}
