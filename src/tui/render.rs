use crate::app::AppState;
use crate::tui::{detail_overlay, footer, grid, header};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

pub fn render(f: &mut Frame, state: &AppState) {
    let [header_area, grid_area, footer_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(1),
        Constraint::Length(2),
    ])
    .areas(f.area());

    header::render(f, header_area, state);
    grid::render(f, grid_area, state);
    footer::render(f, footer_area, state);

    if let Some(err) = state.error_message() {
        render_error(f, grid_area, err);
    }

    // Drawn last so it sits above the error box
    if let Some(overlay) = &state.overlay {
        detail_overlay::render(f, overlay);
    }
}

/// Three-line error box pinned to the bottom of the grid area.
fn render_error(f: &mut Frame, grid_area: Rect, err: &str) {
    if grid_area.height < 4 || grid_area.width < 4 {
        return;
    }
    let area = Rect {
        x: grid_area.x + 1,
        y: grid_area.bottom() - 3,
        width: grid_area.width - 2,
        height: 3,
    };
    let widget = Paragraph::new(err.to_owned())
        .style(Style::default().fg(Color::Red))
        .block(
            Block::default()
                .title(" Error (Esc to dismiss) ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(widget, area);
}
