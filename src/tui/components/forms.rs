//! Form Rendering Helpers
//!
//! Sections are drawn as a single scrolling list of lines, so each control
//! is turned into a few `Line`s here. Text fields report which of their
//! lines holds the value so the screen can place the terminal cursor.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Width of the marker drawn before a value line
pub const VALUE_INDENT: u16 = 4;

fn focus_marker(focused: bool) -> Span<'static> {
    if focused {
        Span::styled(
            "▶ ",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::raw("  ")
    }
}

fn label_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}

/// A labelled text field
#[derive(Debug, Clone)]
pub struct FieldView<'a> {
    pub label: &'a str,
    pub value: &'a str,
    pub placeholder: &'a str,
    pub required: bool,
    pub focused: bool,
    pub error: Option<&'a str>,
    /// Trailing hint after the label, e.g. "(Ctrl+X to remove)"
    pub hint: Option<&'a str>,
}

impl<'a> FieldView<'a> {
    pub fn new(label: &'a str, value: &'a str) -> Self {
        Self {
            label,
            value,
            placeholder: "",
            required: false,
            focused: false,
            error: None,
            hint: None,
        }
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }

    pub fn hint(mut self, hint: Option<&'a str>) -> Self {
        self.hint = hint;
        self
    }

    /// Offset of the value line within [`FieldView::lines`]
    pub const VALUE_LINE: usize = 1;

    pub fn lines(&self) -> Vec<Line<'static>> {
        let mut label = vec![
            focus_marker(self.focused),
            Span::styled(self.label.to_string(), label_style(self.focused)),
        ];
        if self.required {
            label.push(Span::styled(" *", Style::default().fg(Color::Red)));
        }
        if let Some(hint) = self.hint {
            label.push(Span::styled(
                format!("  {}", hint),
                Style::default().fg(Color::DarkGray),
            ));
        }

        let border = if self.error.is_some() {
            Color::Red
        } else if self.focused {
            Color::Magenta
        } else {
            Color::DarkGray
        };
        let value = if self.value.is_empty() {
            Span::styled(
                self.placeholder.to_string(),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            Span::raw(self.value.to_string())
        };

        let mut lines = vec![
            Line::from(label),
            Line::from(vec![
                Span::raw("  "),
                Span::styled("│ ", Style::default().fg(border)),
                value,
            ]),
        ];
        if let Some(error) = self.error {
            lines.push(Line::from(Span::styled(
                format!("    {}", error),
                Style::default().fg(Color::Red),
            )));
        }
        lines
    }
}

/// Selector showing the current choice between arrows
pub fn choice_lines(
    label: &str,
    display: &str,
    focused: bool,
    error: Option<&str>,
) -> Vec<Line<'static>> {
    let arrows = if focused { Color::Magenta } else { Color::DarkGray };
    let mut lines = vec![
        Line::from(vec![
            focus_marker(focused),
            Span::styled(label.to_string(), label_style(focused)),
            Span::styled(" *", Style::default().fg(Color::Red)),
        ]),
        Line::from(vec![
            Span::raw("    "),
            Span::styled("◀ ", Style::default().fg(arrows)),
            Span::styled(display.to_string(), Style::default().fg(Color::Cyan)),
            Span::styled(" ▶", Style::default().fg(arrows)),
        ]),
    ];
    if let Some(error) = error {
        lines.push(Line::from(Span::styled(
            format!("    {}", error),
            Style::default().fg(Color::Red),
        )));
    }
    lines
}

/// On/off switch line
pub fn toggle_line(label: &str, on: bool, focused: bool) -> Line<'static> {
    let switch = if on {
        Span::styled(
            "[ ON ]",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled("[OFF ]", Style::default().fg(Color::DarkGray))
    };
    Line::from(vec![
        focus_marker(focused),
        switch,
        Span::raw(" "),
        Span::styled(label.to_string(), label_style(focused)),
    ])
}

/// Checkbox span used for business days
pub fn checkbox_span(label: &str, checked: bool, focused: bool) -> Span<'static> {
    let mark = if checked { "[x]" } else { "[ ]" };
    let mut style = if checked {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Gray)
    };
    if focused {
        style = style.add_modifier(Modifier::REVERSED);
    }
    Span::styled(format!("{} {}", mark, label), style)
}

/// Action line such as "+ Add website"
pub fn button_line(label: &str, focused: bool) -> Line<'static> {
    let style = if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Magenta)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Magenta)
    };
    Line::from(vec![
        focus_marker(focused),
        Span::styled(format!(" {} ", label), style),
    ])
}

/// Section heading inside a form
pub fn heading_line(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    ))
}
