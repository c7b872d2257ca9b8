use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    Quit,
    DismissError,
    ToggleCollapsed,
    ToggleMessages,
    EditVariantFilter,
    EditTaskFilter,
    FilterInput(char),
    FilterBackspace,
    FilterClear,
    FinishEdit,
    ScrollUp,
    ScrollDown,
    ColumnLeft,
    ColumnRight,
    ShowDetails,
    CloseOverlay,
    NewerPage,
    OlderPage,
    None,
}

/// Captures the UI state needed to interpret a key press.
#[derive(Debug, Clone, Default)]
pub struct InputContext {
    pub has_error: bool,
    pub editing: bool,
    pub has_overlay: bool,
}

pub fn map_key(key: KeyEvent, ctx: &InputContext) -> Action {
    if key.kind != KeyEventKind::Press {
        return Action::None;
    }

    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    // Filter box has focus: every printable key is text
    if ctx.editing {
        return match key.code {
            KeyCode::Enter | KeyCode::Esc => Action::FinishEdit,
            KeyCode::Backspace => Action::FilterBackspace,
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Action::FilterClear
            }
            KeyCode::Char(c) => Action::FilterInput(c),
            _ => Action::None,
        };
    }

    if ctx.has_overlay {
        return match key.code {
            KeyCode::Char('q' | 'd') | KeyCode::Esc | KeyCode::Enter => Action::CloseOverlay,
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Esc => {
            if ctx.has_error {
                Action::DismissError
            } else {
                Action::Quit
            }
        }
        KeyCode::Up | KeyCode::Char('k') => Action::ScrollUp,
        KeyCode::Down | KeyCode::Char('j') => Action::ScrollDown,
        KeyCode::Left | KeyCode::Char('h') => Action::ColumnLeft,
        KeyCode::Right | KeyCode::Char('l') => Action::ColumnRight,
        KeyCode::Enter | KeyCode::Char('d') => Action::ShowDetails,
        KeyCode::Char('c') => Action::ToggleCollapsed,
        KeyCode::Char('m') => Action::ToggleMessages,
        KeyCode::Char('/') => Action::EditVariantFilter,
        KeyCode::Char('t') => Action::EditTaskFilter,
        KeyCode::Char('n') => Action::NewerPage,
        KeyCode::Char('o') => Action::OlderPage,
        _ => Action::None,
    }
}
