//! Review page
//!
//! Read-only summary of everything entered, grouped by section.

use crate::tui::app::App;
use crate::wizard::ReviewSummary;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

/// Lines for the summary, one heading per section
pub fn summary_lines(summary: &ReviewSummary) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for (title, rows) in summary.sections() {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            title,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )));

        for (label, value) in rows {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<16}", label), Style::default().fg(Color::Gray)),
                Span::styled(value, Style::default().fg(Color::White)),
            ]));
        }
    }

    lines
}

pub fn render_review(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(3)])
        .split(area);

    let summary = ReviewSummary::from_state(app.wizard());
    let body = Paragraph::new(Text::from(summary_lines(&summary)))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Review Your Details ")
                .border_style(Style::default().fg(Color::Magenta))
                .padding(Padding::horizontal(1)),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(body, chunks[0]);

    let controls = Paragraph::new(Line::from(vec![
        Span::styled(
            " Enter ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Create my assistant    "),
        Span::styled(
            " e ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Edit details"),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(controls, chunks[1]);
}
