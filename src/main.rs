//! Terminal entry point.
//!
//! This module provides the thin integration layer between the `pass_tui`
//! library and the terminal. It loads configuration, initializes logging,
//! opens the vault, wires `AppState` callbacks to the UI event channel and
//! runs the draw/input loop.
//!
//! # Lifecycle
//!
//! 1. **Load**: Read and validate the config file, initialize tracing
//! 2. **Open**: Open the JSON vault and build `AppState`
//! 3. **Wire**: Forward state callbacks as `UiEvent`s over an mpsc channel
//! 4. **Run**: Drain events, draw, poll input every 200ms
//! 5. **Restore**: Leave the alternate screen, including after a panic, and
//!    clear a password still on the clipboard
//!
//! Fatal startup errors are printed to stderr and the process exits with a
//! non-zero status.

use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use pass_tui::app::{connect_events, App, AppState};
use pass_tui::config::{Config, ValidationResult};
use pass_tui::domain::{PassTuiError, Result};
use pass_tui::infrastructure::{paths, SystemClipboard};
use pass_tui::storage::JsonVault;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(200);

type Term = Terminal<CrosstermBackend<Stdout>>;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("pass-tui: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let (config, issues) = Config::load();
    pass_tui::observability::init_tracing(&config);

    let mut app = startup(config, &issues)?;

    let mut terminal = setup_terminal()?;
    install_panic_hook();

    let result = event_loop(&mut terminal, &mut app);

    restore_terminal(&mut terminal);
    app.shutdown();
    tracing::info!("exiting");
    result
}

fn startup(config: Config, issues: &ValidationResult) -> Result<App> {
    let _span = tracing::debug_span!("startup").entered();

    for issue in &issues.errors {
        tracing::warn!(%issue, "config error, using defaults");
    }
    for issue in &issues.warnings {
        tracing::info!(%issue, "config warning");
    }

    let vault_path = paths::vault_file();
    let vault = JsonVault::open(vault_path.clone())
        .map_err(|err| PassTuiError::operation("failed to open vault", err))?;
    tracing::info!(path = %vault_path.display(), "vault opened");

    let state = Arc::new(AppState::new(Arc::new(vault)));
    let events = connect_events(&state);
    // A failed initial load is shown in the status bar rather than aborting.
    let _ = state.load();

    Ok(App::new(
        state,
        events,
        config,
        issues,
        Box::new(SystemClipboard::default()),
    ))
}

/// Enters raw mode and the alternate screen, undoing both if a later step fails.
fn setup_terminal() -> Result<Term> {
    enable_raw_mode().map_err(|e| PassTuiError::Terminal(e.to_string()))?;

    let mut stdout = io::stdout();
    let terminal = execute!(stdout, EnterAlternateScreen, Hide)
        .and_then(|()| Terminal::new(CrosstermBackend::new(stdout)));

    undo_on_error(terminal, || {
        execute!(io::stdout(), LeaveAlternateScreen, Show).ok();
        disable_raw_mode().ok();
    })
}

/// Runs `undo` if `result` failed, converting the error to a terminal error.
fn undo_on_error<T>(result: io::Result<T>, undo: impl FnOnce()) -> Result<T> {
    result.map_err(|e| {
        undo();
        PassTuiError::Terminal(e.to_string())
    })
}

fn restore_terminal(terminal: &mut Term) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen, Show).ok();
    terminal.show_cursor().ok();
}

/// Restores the terminal before the default hook prints the panic message.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        disable_raw_mode().ok();
        execute!(io::stdout(), LeaveAlternateScreen, Show).ok();
        tracing::error!(panic = %info, "panicked");
        default_hook(info);
    }));
}

fn event_loop(terminal: &mut Term, app: &mut App) -> Result<()> {
    loop {
        app.drain_events();
        app.tick();
        terminal.draw(|frame| app.draw(frame))?;

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Resize(width, height) => app.handle_resize(width, height),
                _ => {}
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
