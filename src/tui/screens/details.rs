//! Form sections
//!
//! Each section is laid out as one list of lines that scrolls to keep the
//! focused control in view. A sidebar shows where the user is in the flow.

use crate::tui::app::App;
use crate::tui::utils::truncate;
use crate::tui::components::forms::{
    button_line, checkbox_span, choice_lines, heading_line, toggle_line, FieldView, VALUE_INDENT,
};
use crate::wizard::attachments::{format_file_size, MAX_FILE_SIZE};
use crate::wizard::fields::{self, BusinessDay, Control, FieldKey};
use crate::wizard::groups::{GroupKind, SMS_PRICING_NOTICE};
use crate::wizard::{StepStatus, WizardState};
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

/// Accumulates the lines of a section and remembers where focus landed
struct FormBuilder<'a> {
    app: &'a App,
    lines: Vec<Line<'static>>,
    focus_line: Option<usize>,
    cursor: Option<(usize, u16)>,
}

impl<'a> FormBuilder<'a> {
    fn new(app: &'a App) -> Self {
        Self {
            app,
            lines: Vec::new(),
            focus_line: None,
            cursor: None,
        }
    }

    fn wizard(&self) -> &'a WizardState {
        self.app.wizard()
    }

    fn is_focused(&self, control: &Control) -> bool {
        self.wizard().focus() == Some(control)
    }

    fn blank(&mut self) {
        self.lines.push(Line::from(""));
    }

    fn heading(&mut self, text: &str) {
        if !self.lines.is_empty() {
            self.blank();
        }
        self.lines.push(heading_line(text));
    }

    fn push(&mut self, lines: Vec<Line<'static>>, focused: bool) {
        if focused {
            self.focus_line = Some(self.lines.len());
        }
        self.lines.extend(lines);
    }

    /// Text field; shows the live edit buffer when it is bound to this key
    fn text_field(&mut self, key: FieldKey, label: &str, placeholder: &str, hint: Option<&str>) {
        let control = Control::Field(key);
        let focused = self.is_focused(&control);
        let bound = self.app.bound_control() == Some(&control);
        let wizard = self.wizard();

        let value = if bound {
            self.app.editor().value()
        } else {
            wizard.text_of(&key)
        };

        let view = FieldView::new(label, value)
            .placeholder(placeholder)
            .required(wizard.is_required(&key))
            .focused(focused)
            .error(wizard.error_for(&key))
            .hint(hint);

        if bound {
            let cursor = self.app.editor().visual_cursor() as u16;
            self.cursor = Some((self.lines.len() + FieldView::VALUE_LINE, cursor));
        }
        self.push(view.lines(), focused);
    }

    fn named_field(&mut self, name: &'static str) {
        let (label, placeholder) = fields::spec(name)
            .map(|spec| (spec.label, spec.placeholder))
            .unwrap_or((name, ""));
        self.text_field(FieldKey::Named(name), label, placeholder, None);
    }

    fn toggle(&mut self, name: &'static str) {
        let control = Control::Field(FieldKey::Named(name));
        let focused = self.is_focused(&control);
        let label = fields::spec(name).map(|spec| spec.label).unwrap_or(name);
        let on = self.wizard().input_flag(name);
        self.push(vec![toggle_line(label, on, focused)], focused);
    }

    fn group(&mut self, kind: GroupKind) {
        let group = self.wizard().group(kind);

        for (position, entry) in group.entries().iter().enumerate() {
            let hint = if group.is_removable(entry.index) {
                Some("Ctrl+X to remove")
            } else {
                None
            };
            self.text_field(
                FieldKey::Entry(kind, entry.index),
                &kind.entry_label(position),
                kind.placeholder(),
                hint,
            );
        }

        let add = Control::AddEntry(kind);
        if group.can_add() {
            let focused = self.is_focused(&add);
            self.push(vec![button_line(kind.add_label(), focused)], focused);
        } else if let Some(max) = kind.capacity() {
            self.lines.push(Line::from(Span::styled(
                format!("  Maximum of {} {} reached", max, kind.label()),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    fn attachments(&mut self) {
        let picker = Control::AttachmentPicker;
        let focused = self.is_focused(&picker);
        let bound = self.app.bound_control() == Some(&picker);
        let value = if bound { self.app.editor().value() } else { "" };
        let label = format!(
            "Add documents (.doc, .docx up to {})",
            format_file_size(MAX_FILE_SIZE)
        );

        let view = FieldView::new(&label, value)
            .placeholder("Drop files here or type a path, then press Enter")
            .focused(focused);
        if bound {
            let cursor = self.app.editor().visual_cursor() as u16;
            self.cursor = Some((self.lines.len() + FieldView::VALUE_LINE, cursor));
        }
        self.push(view.lines(), focused);

        let files = self.wizard().attachments().files();
        if files.is_empty() {
            self.lines.push(Line::from(Span::styled(
                "    No documents attached",
                Style::default().fg(Color::DarkGray),
            )));
        }
        for (position, file) in files.iter().enumerate() {
            let control = Control::Attachment(position);
            let focused = self.is_focused(&control);
            let style = if focused {
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let line = Line::from(vec![
                Span::raw(if focused { "  ▶ " } else { "    " }),
                Span::styled(format!("📄 {}", truncate(&file.name, 48)), style),
                Span::styled(
                    format!("  {}", format_file_size(file.size)),
                    Style::default().fg(Color::DarkGray),
                ),
            ]);
            self.push(vec![line], focused);
        }
    }

    fn time_zone(&mut self) {
        let key = FieldKey::Named(fields::TIME_ZONE);
        let focused = self.is_focused(&Control::Field(key));
        let lines = choice_lines(
            "Time Zone",
            &self.app.time_zone_label(),
            focused,
            self.wizard().error_for(&key),
        );
        self.push(lines, focused);
    }

    fn business_days(&mut self) {
        let wizard = self.wizard();
        let mut spans = vec![Span::raw("    ")];
        let mut focused = false;
        for day in BusinessDay::ALL {
            let day_focused = wizard.focus() == Some(&Control::Day(day));
            focused |= day_focused;
            spans.push(checkbox_span(
                day.label(),
                wizard.business_days().contains(&day),
                day_focused,
            ));
            spans.push(Span::raw(" "));
        }

        self.lines.push(Line::from(Span::styled(
            "  Business Days",
            Style::default().fg(Color::White),
        )));
        self.push(vec![Line::from(spans)], focused);
    }

    fn finish(mut self, section: usize) -> (Vec<Line<'static>>, Option<usize>, Option<(usize, u16)>) {
        let ready = self.wizard().can_proceed(section);
        let last = section == self.wizard().total_sections();
        let next = if last { "Review" } else { "Next" };

        self.blank();
        let mut nav = Vec::new();
        if section > 1 {
            nav.push(Span::styled(
                " PgUp: Previous ",
                Style::default().fg(Color::Gray),
            ));
            nav.push(Span::raw("   "));
        }
        nav.push(Span::styled(
            format!(" PgDn: {} ", next),
            if ready {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            },
        ));
        self.lines.push(Line::from(nav));

        (self.lines, self.focus_line, self.cursor)
    }
}

fn build_section(app: &App, section: usize) -> FormBuilder<'_> {
    let mut form = FormBuilder::new(app);
    match section {
        1 => {
            form.heading("Company");
            form.named_field(fields::COMPANY_NAME);
            form.named_field(fields::OFFICE_ADDRESS);
            form.heading("Websites");
            form.group(GroupKind::Websites);
            form.heading("Knowledge Base");
            form.attachments();
            form.heading("Assistant");
            form.named_field(fields::ASSISTANT_NAME);
        }
        2 => {
            form.heading("Hours");
            form.time_zone();
            form.business_days();
            form.named_field(fields::START_TIME);
            form.named_field(fields::END_TIME);
            form.heading("Phone");
            form.named_field(fields::CONTACT_NUMBER);
        }
        3 => {
            form.heading("Email");
            form.toggle(fields::POST_CALL_EMAIL);
            if app.wizard().input_flag(fields::POST_CALL_EMAIL) {
                form.named_field(fields::PRIMARY_EMAIL);
                form.group(GroupKind::CcEmails);
            }
            form.heading("Text Message");
            form.toggle(fields::POST_CALL_SMS);
            if app.wizard().input_flag(fields::POST_CALL_SMS) {
                form.group(GroupKind::SmsNumbers);
                if app.wizard().group(GroupKind::SmsNumbers).shows_pricing_notice() {
                    form.lines.push(Line::from(Span::styled(
                        format!("  ⚠ {}", SMS_PRICING_NOTICE),
                        Style::default().fg(Color::Yellow),
                    )));
                }
            }
        }
        _ => {}
    }
    form
}

/// First line to draw so that `focus` stays inside a window of `height`
pub fn scroll_offset(focus: Option<usize>, height: usize) -> usize {
    match focus {
        Some(line) if height > 0 && line + 3 > height => line + 3 - height,
        _ => 0,
    }
}

pub fn render_section(frame: &mut Frame, app: &App, area: Rect, section: usize) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(32), Constraint::Min(40)])
        .split(area);

    render_steps(frame, app, chunks[0]);

    let border = if app.is_flashing() {
        Color::Red
    } else {
        Color::Magenta
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", fields::section_title(section)))
        .border_style(Style::default().fg(border))
        .padding(Padding::horizontal(1));
    let inner = block.inner(chunks[1]);
    frame.render_widget(block, chunks[1]);

    let (lines, focus_line, cursor) = build_section(app, section).finish(section);
    let height = inner.height as usize;
    let offset = scroll_offset(focus_line, height);

    let paragraph = Paragraph::new(Text::from(lines)).scroll((offset as u16, 0));
    frame.render_widget(paragraph, inner);

    if let Some((line, column)) = cursor {
        if line >= offset && line - offset < height {
            let x = inner.x + VALUE_INDENT + column;
            if x < inner.x + inner.width {
                frame.set_cursor_position(Position::new(x, inner.y + (line - offset) as u16));
            }
        }
    }
}

fn render_steps(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .wizard()
        .progress()
        .steps
        .into_iter()
        .enumerate()
        .map(|(i, step)| {
            let (icon, style) = match step.status {
                StepStatus::Completed => ("✓", Style::default().fg(Color::Green)),
                StepStatus::Active => (
                    "●",
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ),
                StepStatus::Pending => ("○", Style::default().fg(Color::DarkGray)),
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {} ", icon), style),
                Span::styled(format!("{}. {}", i + 1, step.label), style),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Steps")
            .border_style(Style::default().fg(Color::Blue)),
    );
    frame.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OnboardingConfig;
    use crate::wizard::WizardEvent;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_scroll_offset_keeps_focus_visible() {
        assert_eq!(scroll_offset(None, 10), 0);
        assert_eq!(scroll_offset(Some(4), 10), 0);
        assert_eq!(scroll_offset(Some(12), 10), 5);
    }

    #[test]
    fn test_section_three_hides_disabled_groups() {
        let mut app = App::new(OnboardingConfig::default());
        app.state.wizard.apply(WizardEvent::Toggle(fields::POST_CALL_SMS));
        let (lines, _, _) = build_section(&app, 3).finish(3);
        let text: Vec<String> = lines.iter().map(line_text).collect();

        assert!(text.iter().any(|l| l.contains("Primary Email")));
        assert!(!text.iter().any(|l| l.contains("SMS Number")));
    }

    #[test]
    fn test_pricing_notice_after_second_sms_number() {
        let mut app = App::new(OnboardingConfig::default());
        app.state
            .wizard
            .apply(WizardEvent::AddEntry(GroupKind::SmsNumbers));
        let (lines, _, _) = build_section(&app, 3).finish(3);

        assert!(lines
            .iter()
            .map(line_text)
            .any(|l| l.contains(SMS_PRICING_NOTICE)));
    }
}
