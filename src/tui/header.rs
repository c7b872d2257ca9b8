use crate::app::{AppState, InputMode};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
    let mut spans = vec![
        Span::styled(
            format!(" {} ", state.config.version_string),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("│ "),
        Span::styled(
            &state.config.project,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
    ];

    if state.snapshot.current_skip > 0 {
        spans.push(Span::styled(
            format!(" [skip {}]", state.snapshot.current_skip),
            Style::default().fg(Color::Yellow),
        ));
    }

    if state.view.collapsed {
        spans.push(Span::styled(
            " [collapsed]",
            Style::default().fg(Color::Magenta),
        ));
    }

    for (label, text, mode) in [
        ("variant", &state.view.variant_filter, InputMode::VariantFilter),
        ("task", &state.view.task_filter, InputMode::TaskFilter),
    ] {
        if text.is_empty() && state.input_mode != mode {
            continue;
        }
        let style = if state.input_mode == mode {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Magenta)
        };
        spans.push(Span::styled(format!(" {label}:/{text}/"), style));
    }

    spans.push(Span::styled(
        format!(" {}", state.config.source),
        Style::default().fg(Color::DarkGray),
    ));

    // Error indicator
    if state.error_message().is_some() {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            "!",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    f.render_widget(header, area);
}
