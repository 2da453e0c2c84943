//! Status Bar Component
//!
//! Bottom bar with the current status or error message, any group notices
//! raised by the wizard, and the keys that work on the current page.

use crate::tui::app::AppState;
use crate::wizard::{Control, FieldKey, FieldKind, Page, WizardState};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

/// Render the status bar component
pub fn render_status_bar(f: &mut Frame, app_state: &AppState, area: Rect) {
    let status_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(45), // Status/message area
            Constraint::Percentage(55), // Help/shortcuts area
        ])
        .split(area);

    render_status_section(f, app_state, status_chunks[0]);
    render_help_section(f, app_state, status_chunks[1]);
}

fn render_status_section(f: &mut Frame, app_state: &AppState, area: Rect) {
    let notices = app_state.wizard.notices();

    if let Some(error) = &app_state.error_message {
        render_message(f, &format!("✗ {}", error), Color::Red, "Error", area);
    } else if !notices.is_empty() {
        render_message(f, &notices.join(" | "), Color::Yellow, "Notice", area);
    } else if let Some(status) = &app_state.status_message {
        render_message(f, status, Color::Blue, "Status", area);
    } else {
        render_message(f, &default_status(app_state), Color::Cyan, "Status", area);
    }
}

fn render_message(f: &mut Frame, message: &str, color: Color, title: &str, area: Rect) {
    let text = Paragraph::new(message.to_string())
        .style(Style::default().fg(color))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(title.to_string()),
        );
    f.render_widget(text, area);
}

fn default_status(app_state: &AppState) -> String {
    let wizard = &app_state.wizard;
    match wizard.page() {
        Page::Section(n) if wizard.can_proceed(*n) => "Ready to continue".to_string(),
        Page::Section(_) => {
            let missing = wizard.errors().len();
            if missing == 0 {
                "Fill in the required fields".to_string()
            } else {
                format!("{} field(s) need attention", missing)
            }
        }
        Page::Loading => "Waiting for the provisioning service...".to_string(),
        page => page.title().to_string(),
    }
}

fn render_help_section(f: &mut Frame, app_state: &AppState, area: Rect) {
    let help = Paragraph::new(context_help(&app_state.wizard))
        .style(Style::default().fg(Color::Gray))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue))
                .title("Keys"),
        );
    f.render_widget(help, area);
}

/// Keys that do something on the current page and focused control
pub fn context_help(wizard: &WizardState) -> String {
    let page_help = match wizard.page() {
        Page::Landing => "Enter:Get started",
        Page::Section(_) => "Tab/↑↓:Move | PgDn:Next | PgUp/Esc:Back",
        Page::Review => "Enter:Create assistant | e:Edit",
        Page::Loading => "Please wait",
        Page::Success(_) => "Enter/q:Exit",
        Page::Error(_) => "r:Start over | e:Edit details | q:Exit",
    };

    let control_help = match wizard.focus() {
        Some(Control::AddEntry(_)) => "Enter:Add",
        Some(Control::Day(_)) => "Space:Toggle day",
        Some(Control::AttachmentPicker) => "Type or drop paths, Enter:Attach",
        Some(Control::Attachment(_)) => "Ctrl+X:Remove",
        Some(Control::Field(key)) => match WizardState::kind_of(key) {
            FieldKind::Toggle => "Space:Toggle",
            FieldKind::Choice(_) => "←→:Choose",
            _ => match key {
                FieldKey::Entry(..) => "Ctrl+X:Remove",
                FieldKey::Named(_) => "",
            },
        },
        None => "",
    };

    if control_help.is_empty() || wizard.page().section().is_none() {
        format!("{} | Ctrl+C:Quit", page_help)
    } else {
        format!("{} | {} | Ctrl+C:Quit", page_help, control_help)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::WizardEvent;

    #[test]
    fn test_context_help_follows_page_and_focus() {
        let mut wizard = WizardState::new();
        assert_eq!(context_help(&wizard), "Enter:Get started | Ctrl+C:Quit");

        wizard.apply(WizardEvent::Start);
        assert!(context_help(&wizard).starts_with("Tab/↑↓:Move"));

        wizard.apply(WizardEvent::Focus(Control::AttachmentPicker));
        assert!(context_help(&wizard).contains("Enter:Attach"));
    }
}
