use waterfall::app;
use waterfall::cli;
use waterfall::events;
use waterfall::input;
use waterfall::parser;
use waterfall::tui;

use app::{AppConfig, AppState, InputMode, ViewState};
use clap::Parser;
use cli::Cli;
use color_eyre::eyre::{eyre, Result, WrapErr};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use events::{AppEvent, EventHandler};
use input::{Action, InputContext};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Read};
use std::path::Path;
use std::time::Duration;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Cli::parse();

    if args.verbose {
        setup_verbose_logging()?;
    }

    let (json, source) = read_snapshot(&args.snapshot)?;
    let snapshot = parser::parse_snapshot(&json)
        .wrap_err_with(|| format!("failed to load snapshot from {source}"))?;
    tracing::info!(
        versions = snapshot.versions.len(),
        rows = snapshot.rows.len(),
        skip = snapshot.current_skip,
        "snapshot loaded from {source}"
    );

    let project = args
        .project
        .clone()
        .unwrap_or_else(|| snapshot.project.clone());
    let view = ViewState {
        collapsed: args.collapsed,
        variant_filter: args.variant_filter.clone(),
        task_filter: args.task_filter.clone(),
        shorten_messages: !args.full_messages,
        attention: args.attention.clone(),
    };
    let config = AppConfig {
        project,
        source,
        version_string: format!(
            "waterfall v{}+{}",
            env!("CARGO_PKG_VERSION"),
            env!("BUILD_NUMBER")
        ),
    };
    let mut state = AppState::new(config, snapshot, view);

    if args.print {
        print!("{}", tui::plain::render_text(&state));
        return Ok(());
    }

    // Setup terminal with panic hook
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let events = EventHandler::new(Duration::from_millis(250));
    let result = run_app(&mut terminal, &mut state, events).await;

    // Restore terminal
    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut AppState,
    mut events: EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|f| tui::render::render(f, state))?;

        let Some(event) = events.next().await else {
            return Ok(());
        };

        match event {
            AppEvent::Key(key) => {
                let ctx = InputContext {
                    has_error: state.error.is_some(),
                    editing: state.is_editing(),
                    has_overlay: state.has_detail_overlay(),
                };
                apply_action(state, input::map_key(key, &ctx));
            }
            AppEvent::Resize => {}
            AppEvent::Tick => {
                state.prune_notifications();
                state.prune_error();
            }
            AppEvent::Error(e) => {
                tracing::error!("{e}");
                state.set_error(e);
            }
        }

        if state.should_quit {
            events.stop();
            return Ok(());
        }
    }
}

fn apply_action(state: &mut AppState, action: Action) {
    match action {
        Action::Quit => state.should_quit = true,
        Action::DismissError => state.clear_error(),
        Action::ToggleCollapsed => state.toggle_collapsed(),
        Action::ToggleMessages => state.toggle_shorten_messages(),
        Action::EditVariantFilter => state.begin_edit(InputMode::VariantFilter),
        Action::EditTaskFilter => state.begin_edit(InputMode::TaskFilter),
        Action::FilterInput(c) => state.push_filter_char(c),
        Action::FilterBackspace => state.pop_filter_char(),
        Action::FilterClear => state.clear_filter(),
        Action::FinishEdit => state.end_edit(),
        Action::ScrollUp => state.scroll_up(),
        Action::ScrollDown => state.scroll_down(),
        Action::ColumnLeft => state.select_left(),
        Action::ColumnRight => state.select_right(),
        Action::ShowDetails => state.open_details(),
        Action::CloseOverlay => state.close_overlay(),
        Action::NewerPage => {
            if let Some(url) = state.navigate_newer() {
                tracing::info!("navigate newer: {url}");
            }
        }
        Action::OlderPage => {
            if let Some(url) = state.navigate_older() {
                tracing::info!("navigate older: {url}");
            }
        }
        Action::None => {}
    }
}

/// Reads the snapshot JSON from `path`, or stdin when it is `-`.
fn read_snapshot(path: &Path) -> Result<(String, String)> {
    if path.as_os_str() == "-" {
        let mut json = String::new();
        io::stdin()
            .read_to_string(&mut json)
            .wrap_err("failed to read snapshot from stdin")?;
        return Ok((json, "stdin".to_string()));
    }
    let json = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read snapshot {}", path.display()))?;
    Ok((json, path.display().to_string()))
}

fn setup_verbose_logging() -> Result<()> {
    let state_dir = state_dir();
    std::fs::create_dir_all(&state_dir)
        .map_err(|e| eyre!("Failed to create log directory {state_dir:?}: {e}"))?;
    let log_path = state_dir.join("debug.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .map_err(|e| eyre!("Failed to open log file {log_path:?}: {e}"))?;
    tracing_subscriber::fmt()
        .with_writer(file)
        .with_ansi(false)
        .init();
    tracing::info!(
        "waterfall v{} starting with verbose logging",
        env!("CARGO_PKG_VERSION")
    );
    Ok(())
}

fn state_dir() -> std::path::PathBuf {
    if let Some(state) = std::env::var_os("XDG_STATE_HOME") {
        std::path::PathBuf::from(state).join("waterfall")
    } else if let Some(home) = std::env::var_os("HOME") {
        std::path::PathBuf::from(home)
            .join(".local")
            .join("state")
            .join("waterfall")
    } else {
        std::path::PathBuf::from("/tmp/waterfall")
    }
}
