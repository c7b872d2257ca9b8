//! Waterfall grid widget: variant names down the left, one fixed-width column
//! per version, header band on top.

use crate::app::AppState;
use crate::cell::CellRender;
use crate::grid::VersionHeader;
use crate::model::TaskStatus;
use crate::tui::style::{category_color, status_color, TASK_GLYPH};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

pub const VARIANT_COL_WIDTH: usize = 20;
pub const VERSION_COL_WIDTH: usize = 24;

/// Lines of spans making up one column of one band.
type ColumnLines = Vec<Vec<Span<'static>>>;

pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
    let grid = state.grid();
    let width = area.width as usize;
    let height = area.height as usize;

    let (first_col, col_count) = visible_columns(width, grid.headers.len(), state.selected_column);
    let columns = first_col..first_col + col_count;

    let mut lines: Vec<Line> = Vec::new();

    // Header band
    let header_blocks: Vec<ColumnLines> = grid.headers[columns.clone()]
        .iter()
        .enumerate()
        .map(|(i, h)| {
            header_block(h, first_col + i == state.selected_column, state.view.shorten_messages)
        })
        .collect();
    let variant_title = vec![vec![Span::styled(
        format!("{:>w$}", "Variant", w = VARIANT_COL_WIDTH - 1),
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )]];
    let header_height = header_blocks.iter().map(Vec::len).max().unwrap_or(0).max(1);
    lines.extend(join_band(&variant_title, &header_blocks, header_height));
    lines.push(Line::styled(
        "─".repeat(width),
        Style::default().fg(Color::DarkGray),
    ));

    if grid.is_empty() {
        let msg = if state.snapshot.rows.is_empty() {
            "Snapshot has no build variants"
        } else {
            "No variants match the current filters"
        };
        lines.push(Line::styled(msg, Style::default().fg(Color::DarkGray)));
    }

    for row in grid.rows.iter().skip(state.row_offset) {
        if lines.len() >= height {
            break;
        }
        let name = vec![vec![Span::styled(
            truncate_width(&row.variant.display_name, VARIANT_COL_WIDTH - 1),
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        )]];
        let cells: Vec<ColumnLines> = row.cells[columns.clone()].iter().map(cell_block).collect();
        let row_height = cells.iter().map(Vec::len).max().unwrap_or(0).max(1);
        lines.extend(join_band(&name, &cells, row_height));
    }

    lines.truncate(height);
    f.render_widget(Paragraph::new(lines), area);
}

/// First visible column and how many fit, keeping `selected` on screen.
pub fn visible_columns(width: usize, total: usize, selected: usize) -> (usize, usize) {
    let fit = (width.saturating_sub(VARIANT_COL_WIDTH) / VERSION_COL_WIDTH).max(1);
    let count = fit.min(total);
    let first = selected.min(total.saturating_sub(1)).saturating_sub(count.saturating_sub(1));
    (first, count)
}

fn header_block(header: &VersionHeader, selected: bool, shortened: bool) -> ColumnLines {
    let inner = VERSION_COL_WIDTH - 1;
    let mut block: ColumnLines = Vec::new();
    let select = if selected {
        Modifier::REVERSED
    } else {
        Modifier::empty()
    };

    match header {
        VersionHeader::Active(h) => {
            block.push(vec![
                Span::styled(
                    h.hash.clone(),
                    Style::default().fg(Color::Cyan).add_modifier(select),
                ),
                Span::styled(
                    truncate_width(&format!(" {}", h.time), inner.saturating_sub(h.hash.width())),
                    Style::default().fg(Color::DarkGray),
                ),
            ]);
            block.push(vec![Span::styled(
                truncate_width(&h.author, inner),
                Style::default().add_modifier(Modifier::BOLD),
            )]);
            let mut message = h.message.clone();
            if h.expandable {
                message.push_str(if shortened { " [more]" } else { " [less]" });
            }
            for chunk in wrap_width(&message, inner) {
                block.push(vec![Span::raw(chunk)]);
            }
        }
        VersionHeader::RolledUp(h) => {
            block.push(vec![Span::styled(
                truncate_width(&h.label, inner),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(select),
            )]);
            if let Some(first) = h.commits.first() {
                block.push(vec![Span::styled(
                    truncate_width(&format!("{} …", first.hash), inner),
                    Style::default().fg(Color::DarkGray),
                )]);
            }
        }
    }
    block
}

fn cell_block(cell: &CellRender<'_>) -> ColumnLines {
    let inner = VERSION_COL_WIDTH - 1;
    match cell {
        CellRender::Inactive => vec![vec![Span::styled(
            "inactive build",
            Style::default().fg(Color::DarkGray),
        )]],
        CellRender::Expanded { tasks } => task_boxes(tasks.iter().map(|t| t.status), inner),
        CellRender::Collapsed { attention, summary } => {
            let mut block = task_boxes(attention.iter().map(|t| t.status), inner);
            let units: Vec<Span<'static>> = summary
                .iter()
                .map(|u| {
                    Span::styled(
                        format!("{} {} ", u.label(), u.category.label()),
                        Style::default().fg(category_color(u.category)),
                    )
                })
                .collect();
            block.extend(wrap_spans(units, inner));
            block
        }
    }
}

fn task_boxes(statuses: impl Iterator<Item = TaskStatus>, width: usize) -> ColumnLines {
    let boxes: Vec<Span<'static>> = statuses
        .map(|s| Span::styled(TASK_GLYPH, Style::default().fg(status_color(s))))
        .collect();
    wrap_spans(boxes, width)
}

/// Packs spans into lines no wider than `width`. Spans are never split.
fn wrap_spans(spans: Vec<Span<'static>>, width: usize) -> ColumnLines {
    let mut block: ColumnLines = Vec::new();
    let mut line: Vec<Span<'static>> = Vec::new();
    let mut used = 0;
    for span in spans {
        let w = span.content.width();
        if used + w > width && !line.is_empty() {
            block.push(std::mem::take(&mut line));
            used = 0;
        }
        used += w;
        line.push(span);
    }
    if !line.is_empty() {
        block.push(line);
    }
    block
}

/// Lays a left block and one block per column side by side, padding each
/// column to its fixed width.
fn join_band(left: &ColumnLines, columns: &[ColumnLines], height: usize) -> Vec<Line<'static>> {
    (0..height)
        .map(|i| {
            let mut spans = Vec::new();
            append_padded(&mut spans, left.get(i), VARIANT_COL_WIDTH);
            for col in columns {
                append_padded(&mut spans, col.get(i), VERSION_COL_WIDTH);
            }
            Line::from(spans)
        })
        .collect()
}

fn append_padded(out: &mut Vec<Span<'static>>, line: Option<&Vec<Span<'static>>>, width: usize) {
    let mut used = 0;
    if let Some(line) = line {
        for span in line {
            used += span.content.width();
            out.push(span.clone());
        }
    }
    out.push(Span::raw(" ".repeat(width.saturating_sub(used))));
}

/// Unicode-width-aware truncation with ellipsis.
pub fn truncate_width(s: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for c in s.chars() {
        let cw = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if width + cw + 1 > max_width {
            result.push('…');
            break;
        }
        result.push(c);
        width += cw;
    }
    result
}

/// Hard-wraps `s` into chunks no wider than `width`.
pub fn wrap_width(s: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    if width == 0 {
        return out;
    }
    let mut current = String::new();
    let mut used = 0;
    for c in s.chars() {
        let cw = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + cw > width && !current.is_empty() {
            out.push(std::mem::take(&mut current));
            used = 0;
        }
        current.push(c);
        used += cw;
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}
