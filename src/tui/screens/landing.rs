//! Landing page

use crate::tui::app::App;
use crate::tui::utils::centered_rect;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
    Frame,
};

pub fn render_landing(frame: &mut Frame, _app: &App, area: Rect) {
    let panel = centered_rect(70, 80, area);
    frame.render_widget(Clear, panel);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Welcome")
        .border_style(Style::default().fg(Color::Magenta))
        .padding(Padding::uniform(1));

    let content = vec![
        Line::from(vec![
            Span::raw("Meet "),
            Span::styled(
                "Clara",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(", the AI receptionist that answers every call."),
        ]),
        Line::from(""),
        Line::from("In three short steps you will tell us about:"),
        Line::from(""),
        Line::from("  1. Your company, website and knowledge base documents"),
        Line::from("  2. Your time zone, business hours and phone number"),
        Line::from("  3. Where to send a summary after each call"),
        Line::from(""),
        Line::from("You can review everything before your assistant is created."),
        Line::from(""),
        Line::from(vec![
            Span::raw("Press "),
            Span::styled(
                "Enter",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" to get started, or "),
            Span::styled(
                "Ctrl+C",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" to exit."),
        ]),
    ];

    let paragraph = Paragraph::new(Text::from(content))
        .block(block)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, panel);
}
