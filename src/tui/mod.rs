//! Terminal front-end for the onboarding wizard
//!
//! Runs the wizard full-screen: landing page, the three form sections,
//! review, and the provisioning outcome.

#[cfg(feature = "tui")]
pub mod app;
#[cfg(feature = "tui")]
pub mod components;
#[cfg(feature = "tui")]
pub mod events;
#[cfg(feature = "tui")]
pub mod screens;
#[cfg(feature = "tui")]
pub mod ui;
#[cfg(feature = "tui")]
pub mod utils;

#[cfg(feature = "tui")]
pub use app::{App, AppState};
#[cfg(feature = "tui")]
pub use events::{Event, EventHandler, SubmissionProcessor};
#[cfg(feature = "tui")]
pub use ui::render_ui;

#[cfg(feature = "tui")]
use crate::config::OnboardingConfig;
#[cfg(feature = "tui")]
use crate::submission::{HttpProvisioner, Submitter};
#[cfg(feature = "tui")]
use crate::Error;
#[cfg(feature = "tui")]
use crossterm::{
    cursor,
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
#[cfg(feature = "tui")]
use ratatui::{backend::CrosstermBackend, Terminal};
#[cfg(feature = "tui")]
use std::io::{self, IsTerminal, Stdout};
#[cfg(feature = "tui")]
use std::sync::atomic::{AtomicBool, Ordering};
#[cfg(feature = "tui")]
use std::time::Duration;

#[cfg(feature = "tui")]
pub type TuiTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Set while the terminal is in raw mode on the alternate screen
#[cfg(feature = "tui")]
static TERMINAL_NEEDS_CLEANUP: AtomicBool = AtomicBool::new(false);

/// Enter raw mode and the alternate screen. Bracketed paste is enabled so
/// that dropped files arrive as one paste event.
#[cfg(feature = "tui")]
pub fn init_terminal() -> Result<TuiTerminal, Error> {
    enable_raw_mode().map_err(Error::Io)?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste).map_err(Error::Io)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(Error::Io)?;
    terminal.hide_cursor().map_err(Error::Io)?;

    TERMINAL_NEEDS_CLEANUP.store(true, Ordering::SeqCst);

    Ok(terminal)
}

/// Restore the terminal. Safe to call more than once.
#[cfg(feature = "tui")]
pub fn restore_terminal(terminal: &mut TuiTerminal) -> Result<(), Error> {
    if TERMINAL_NEEDS_CLEANUP.load(Ordering::SeqCst) {
        disable_raw_mode().map_err(Error::Io)?;
        execute!(
            terminal.backend_mut(),
            DisableBracketedPaste,
            LeaveAlternateScreen
        )
        .map_err(Error::Io)?;
        terminal.show_cursor().map_err(Error::Io)?;

        TERMINAL_NEEDS_CLEANUP.store(false, Ordering::SeqCst);
    }
    Ok(())
}

/// Best-effort restore used from the panic hook
#[cfg(feature = "tui")]
fn emergency_terminal_cleanup() {
    if TERMINAL_NEEDS_CLEANUP.load(Ordering::SeqCst) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        let _ = execute!(io::stdout(), cursor::Show);
        TERMINAL_NEEDS_CLEANUP.store(false, Ordering::SeqCst);
    }
}

/// Install a panic hook that restores the terminal before reporting
#[cfg(feature = "tui")]
pub fn setup_panic_handler() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        emergency_terminal_cleanup();
        original_hook(panic_info);
    }));
}

/// Fail early when stdout is not an interactive terminal
#[cfg(feature = "tui")]
pub fn check_terminal_support() -> Result<(), Error> {
    if !io::stdout().is_terminal() {
        return Err(Error::Io(io::Error::new(
            io::ErrorKind::Unsupported,
            "the onboarding wizard requires a terminal (stdout is not a TTY)",
        )));
    }
    crossterm::terminal::size().map_err(Error::Io)?;
    Ok(())
}

/// Run the wizard until the user exits
#[cfg(feature = "tui")]
pub async fn run_tui(config: OnboardingConfig) -> Result<(), Error> {
    check_terminal_support()?;

    let provisioner = HttpProvisioner::from_config(&config)?;
    let submitter = Submitter::new(provisioner);

    setup_panic_handler();

    let mut terminal = init_terminal().map_err(|e| {
        emergency_terminal_cleanup();
        e
    })?;

    let mut event_handler = EventHandler::new();
    let processor = event_handler.submission_processor(submitter);
    let mut app = App::new(config).with_processor(processor);

    tracing::info!("onboarding wizard started");
    let app_result = run_app_loop(&mut terminal, &mut app, &mut event_handler).await;

    if let Err(restore_error) = restore_terminal(&mut terminal) {
        if app_result.is_ok() {
            return Err(restore_error);
        }
        tracing::error!("failed to restore terminal: {}", restore_error);
    }

    tracing::info!("onboarding wizard exited");
    app_result
}

#[cfg(feature = "tui")]
async fn run_app_loop(
    terminal: &mut TuiTerminal,
    app: &mut App,
    event_handler: &mut EventHandler,
) -> Result<(), Error> {
    let tick_rate = Duration::from_millis(app.config.ui.tick_rate_ms.max(16));

    loop {
        terminal
            .draw(|frame| {
                if let Err(e) = render_ui(frame, app) {
                    app.set_error(format!("Render error: {}", e));
                }
            })
            .map_err(Error::Io)?;

        match tokio::time::timeout(tick_rate, event_handler.next()).await {
            Ok(Ok(event)) => match app.handle_event(event).await {
                Ok(true) => break,
                Ok(false) => {}
                Err(e) => app.set_error(format!("Event handling error: {}", e)),
            },
            Ok(Err(e)) => app.set_error(format!("Event error: {}", e)),
            // No input this tick
            Err(_) => {}
        }

        app.on_tick();

        if app.state.should_quit {
            break;
        }
    }

    Ok(())
}
