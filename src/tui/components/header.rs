//! Header Component
//!
//! Top bar with the product title, the current page and a progress gauge
//! across the form sections and review.

use crate::tui::app::AppState;
use crate::wizard::{Page, StepStatus};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Paragraph},
};

/// Render the header component
pub fn render_header(f: &mut Frame, app_state: &AppState, area: Rect) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(24), // Title
            Constraint::Min(20),    // Page
            Constraint::Length(30), // Progress
        ])
        .split(area);

    let title = Paragraph::new("Clara Onboarding")
        .style(
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        );
    f.render_widget(title, header_chunks[0]);

    let wizard = &app_state.wizard;
    let page_text = match wizard.page() {
        Page::Section(n) => format!(
            "Step {} of {}: {}",
            n,
            wizard.total_sections(),
            wizard.page().title()
        ),
        page => page.title().to_string(),
    };
    let page = Paragraph::new(page_text)
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        );
    f.render_widget(page, header_chunks[1]);

    let progress = wizard.progress();
    let done = progress
        .steps
        .iter()
        .filter(|step| step.status == StepStatus::Completed)
        .count();
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue))
                .title("Progress"),
        )
        .gauge_style(Style::default().fg(Color::Magenta))
        .ratio(progress.ratio.clamp(0.0, 1.0))
        .label(format!("{}/{}", done, progress.steps.len()));
    f.render_widget(gauge, header_chunks[2]);
}
