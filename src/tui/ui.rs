//! UI Rendering Logic
//!
//! Lays out header, page body and status bar, and hands the body to the
//! screen for the current wizard page.

use crate::tui::app::App;
use crate::tui::components::{header::render_header, status_bar::render_status_bar};
use crate::tui::screens::{
    render_error, render_landing, render_loading, render_review, render_section, render_success,
};
use crate::wizard::Page;
use crate::Error;
use ratatui::{prelude::*, widgets::*};

/// Smallest terminal the form fits in
const MIN_WIDTH: u16 = 80;
const MIN_HEIGHT: u16 = 20;

/// Main UI rendering function
pub fn render_ui(frame: &mut Frame, app: &mut App) -> Result<(), Error> {
    let size = frame.area();

    if size.width < MIN_WIDTH || size.height < MIN_HEIGHT {
        render_size_warning(frame, size);
        return Ok(());
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Page
            Constraint::Length(3), // Status bar
        ])
        .split(size);

    render_header(frame, &app.state, chunks[0]);

    let page = app.wizard().page().clone();
    match &page {
        Page::Landing => render_landing(frame, app, chunks[1]),
        Page::Section(n) => render_section(frame, app, chunks[1], *n),
        Page::Review => render_review(frame, app, chunks[1]),
        Page::Loading => render_loading(frame, app, chunks[1]),
        Page::Success(account) => render_success(frame, account, chunks[1]),
        Page::Error(failure) => render_error(frame, failure, chunks[1]),
    }

    render_status_bar(frame, &app.state, chunks[2]);
    Ok(())
}

fn render_size_warning(frame: &mut Frame, area: Rect) {
    let warning = Paragraph::new(format!(
        "Terminal too small ({}x{}).\nPlease resize to at least {}x{}.",
        area.width, area.height, MIN_WIDTH, MIN_HEIGHT
    ))
    .style(Style::default().fg(Color::Yellow))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::ALL).title("Resize"));
    frame.render_widget(Clear, area);
    frame.render_widget(warning, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OnboardingConfig;
    use crate::wizard::WizardEvent;
    use ratatui::backend::TestBackend;

    fn rendered(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| {
                render_ui(frame, app).unwrap();
            })
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_landing_renders_welcome() {
        let mut app = App::new(OnboardingConfig::default());
        let screen = rendered(&mut app, 100, 30);
        assert!(screen.contains("Clara Onboarding"));
        assert!(screen.contains("get started"));
    }

    #[test]
    fn test_section_renders_fields() {
        let mut app = App::new(OnboardingConfig::default());
        app.state.wizard.apply(WizardEvent::Start);
        let screen = rendered(&mut app, 120, 40);
        assert!(screen.contains("Company Name"));
        assert!(screen.contains("Step 1 of 3"));
    }

    #[test]
    fn test_small_terminal_shows_warning() {
        let mut app = App::new(OnboardingConfig::default());
        let screen = rendered(&mut app, 40, 10);
        assert!(screen.contains("Terminal too small"));
    }
}
