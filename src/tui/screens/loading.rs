//! Loading page shown while the assistant is provisioned

use crate::tui::app::App;
use crate::tui::utils::centered_rect;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Text},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
    Frame,
};

pub const LOADING_QUOTES: [&str; 9] = [
    "Clara is getting her virtual coffee ready... ☕ She's about to become your best front desk assistant!",
    "Fun fact: Clara never calls in sick, never takes lunch breaks, and always answers with a smile! 😊",
    "We're teaching Clara your business so well, she might know it better than you do! 🤓",
    "Clara is practicing her 'professional voice' - she's almost ready to impress your callers! 🎭",
    "Did you know? Clara can handle multiple calls simultaneously without breaking a sweat! 💪",
    "Clara is learning your website faster than a speed reader on espresso! 📚⚡",
    "Almost there! Clara is putting on her customer service cape... 🦸‍♀️",
    "Clara promises to be more reliable than your morning alarm clock! ⏰",
    "Final touches! Clara is rehearsing her 'How may I help you?' - it's going to be perfect! ✨",
];

const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Spinner frame for a point in time
pub fn spinner_frame(time_ms: u128) -> char {
    SPINNER[((time_ms / 100) % SPINNER.len() as u128) as usize]
}

pub fn render_loading(frame: &mut Frame, app: &App, area: Rect) {
    let panel = centered_rect(70, 50, area);
    frame.render_widget(Clear, panel);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Creating Your Assistant ")
        .border_style(Style::default().fg(Color::Magenta))
        .padding(Padding::uniform(1));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(3)])
        .split(inner);

    let elapsed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let spinner = Paragraph::new(format!(
        "{} Setting up your AI receptionist...",
        spinner_frame(elapsed)
    ))
    .style(
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    )
    .alignment(Alignment::Center);
    frame.render_widget(spinner, chunks[0]);

    let quote = LOADING_QUOTES[app.state.quote_index % LOADING_QUOTES.len()];
    let quote = Paragraph::new(Text::from(vec![Line::from(quote)]))
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(quote, chunks[1]);
}
