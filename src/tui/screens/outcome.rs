//! Success and error pages

use crate::submission::{ProvisionedAccount, SubmissionFailure};
use crate::tui::utils::centered_rect;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
    Frame,
};

fn credential_line(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<20}", label), Style::default().fg(Color::Gray)),
        Span::styled(
            value.to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
    ])
}

fn key_hint(key: &str, action: &str, color: Color) -> Vec<Span<'static>> {
    vec![
        Span::styled(
            format!(" {} ", key),
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" {}   ", action)),
    ]
}

pub fn success_lines(account: &ProvisionedAccount) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            "🎉 Your AI receptionist is live!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Clara is ready to answer calls for your business."),
        Line::from(""),
        credential_line("Clara's phone number", &account.phone_number),
        Line::from(""),
        Line::from(Span::styled(
            "Dashboard login",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        credential_line("Email", &account.dashboard_email),
        credential_line("Password", &account.dashboard_password),
        Line::from(""),
        Line::from(Span::styled(
            "Save these credentials now. Forward your business line to Clara's number to go live.",
            Style::default().fg(Color::Yellow),
        )),
    ]
}

pub fn failure_lines(failure: &SubmissionFailure) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            "We couldn't create your assistant.",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(failure.message.clone()),
    ];

    if !failure.tips.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Troubleshooting tips:",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        lines.extend(
            failure
                .tips
                .iter()
                .map(|tip| Line::from(format!("  • {}", tip))),
        );
    }

    lines
}

fn render_panel(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    color: Color,
    body: Vec<Line<'static>>,
    keys: Vec<Span<'static>>,
) {
    let panel = centered_rect(75, 75, area);
    frame.render_widget(Clear, panel);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
        .border_style(Style::default().fg(color))
        .padding(Padding::uniform(1));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(1)])
        .split(inner);

    let paragraph = Paragraph::new(Text::from(body)).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, chunks[0]);

    let controls = Paragraph::new(Line::from(keys)).alignment(Alignment::Center);
    frame.render_widget(controls, chunks[1]);
}

pub fn render_success(frame: &mut Frame, account: &ProvisionedAccount, area: Rect) {
    render_panel(
        frame,
        area,
        "You're All Set",
        Color::Green,
        success_lines(account),
        key_hint("Enter", "Exit", Color::Green),
    );
}

pub fn render_error(frame: &mut Frame, failure: &SubmissionFailure, area: Rect) {
    let mut keys = key_hint("r", "Start over", Color::Yellow);
    keys.extend(key_hint("e", "Edit details", Color::Cyan));
    keys.extend(key_hint("q", "Exit", Color::Red));

    render_panel(
        frame,
        area,
        "Something Went Wrong",
        Color::Red,
        failure_lines(failure),
        keys,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::RemediationCategory;

    fn plain(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_failure_without_tips_has_no_tip_heading() {
        let failure = SubmissionFailure::new("Something odd", RemediationCategory::Unrecognized);
        let text = plain(&failure_lines(&failure));
        assert!(text.contains("Something odd"));
        assert!(!text.contains("Troubleshooting"));
    }

    #[test]
    fn test_success_shows_credentials() {
        let account = ProvisionedAccount {
            phone_number: "+1 (212) 555-0199".to_string(),
            dashboard_email: "acme@company.justclara.ai".to_string(),
            dashboard_password: "acme@321".to_string(),
            company_id: None,
        };
        let text = plain(&success_lines(&account));
        assert!(text.contains("+1 (212) 555-0199"));
        assert!(text.contains("acme@321"));
    }
}
