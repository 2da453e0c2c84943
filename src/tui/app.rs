//! Application State Management
//!
//! `App` owns the wizard state and translates terminal events into wizard
//! events. The focused text field is edited through a `tui-input` buffer
//! whose value is pushed into the wizard after every change.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tui_input::{Input, InputRequest};

use crate::config::OnboardingConfig;
use crate::error::Error;
use crate::submission::{RemediationCategory, SubmissionFailure, SubmissionResult};
use crate::tui::events::{Event, SubmissionProcessor};
use crate::tui::screens::loading::LOADING_QUOTES;
use crate::wizard::attachments::{parse_dropped_paths, UploadedFile};
use crate::wizard::fields::{self, Control, FieldKey, FieldKind};
use crate::wizard::{Effect, Page, WizardEvent, WizardState};

/// How long the form border stays highlighted after a blocked "Next"
const ATTENTION_FLASH: Duration = Duration::from_millis(600);

/// Global application state
pub struct AppState {
    /// The onboarding session
    pub wizard: WizardState,
    /// Error messages to display
    pub error_message: Option<String>,
    /// Status message to display
    pub status_message: Option<String>,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Quote shown on the loading page
    pub quote_index: usize,
    /// Highlight the form border until this instant
    pub flash_until: Option<Instant>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            wizard: WizardState::new(),
            error_message: None,
            status_message: None,
            should_quit: false,
            quote_index: 0,
            flash_until: None,
        }
    }
}

/// Main application structure
pub struct App {
    /// Application state
    pub state: AppState,
    /// Configuration
    pub config: OnboardingConfig,
    /// Edit buffer for the focused text control
    editor: Input,
    /// Control the edit buffer is bound to
    bound: Option<Control>,
    quote_started: Instant,
    /// Runs submissions in the background
    processor: Option<SubmissionProcessor>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: OnboardingConfig) -> Self {
        Self {
            state: AppState::default(),
            config,
            editor: Input::default(),
            bound: None,
            quote_started: Instant::now(),
            processor: None,
        }
    }

    /// Attach the processor used when the user confirms
    pub fn with_processor(mut self, processor: SubmissionProcessor) -> Self {
        self.processor = Some(processor);
        self
    }

    pub fn wizard(&self) -> &WizardState {
        &self.state.wizard
    }

    pub fn editor(&self) -> &Input {
        &self.editor
    }

    /// Control currently bound to the edit buffer
    pub fn bound_control(&self) -> Option<&Control> {
        self.bound.as_ref()
    }

    pub fn is_flashing(&self) -> bool {
        self.state
            .flash_until
            .map_or(false, |until| Instant::now() < until)
    }

    pub fn set_status(&mut self, message: String) {
        self.state.status_message = Some(message);
    }

    pub fn set_error(&mut self, message: String) {
        tracing::warn!("{}", message);
        self.state.error_message = Some(message);
    }

    pub fn clear_messages(&mut self) {
        self.state.error_message = None;
        self.state.status_message = None;
    }

    /// Handle an event; returns true when the application should quit
    pub async fn handle_event(&mut self, event: Event) -> Result<bool, Error> {
        match event {
            Event::Quit => self.state.should_quit = true,
            Event::Resize => {}
            Event::SubmissionFinished(result) => {
                self.clear_messages();
                self.dispatch(WizardEvent::SubmissionFinished(result));
            }
            other => self.handle_input(other)?,
        }

        Ok(self.state.should_quit)
    }

    /// Periodic work: rotate the loading quote and expire the highlight
    pub fn on_tick(&mut self) {
        if *self.state.wizard.page() == Page::Loading {
            let interval = Duration::from_secs(self.config.ui.quote_interval_secs.max(1));
            if self.quote_started.elapsed() >= interval {
                self.advance_quote();
            }
        }

        if let Some(until) = self.state.flash_until {
            if Instant::now() >= until {
                self.state.flash_until = None;
            }
        }
    }

    pub fn advance_quote(&mut self) {
        self.state.quote_index = (self.state.quote_index + 1) % LOADING_QUOTES.len();
        self.quote_started = Instant::now();
    }

    /// Apply a wizard event and run whatever it asks for
    fn dispatch(&mut self, event: WizardEvent) {
        if let Some(Effect::Submit) = self.state.wizard.apply(event) {
            self.start_submission();
        }

        if self.state.wizard.needs_attention() {
            self.state.wizard.apply(WizardEvent::AttentionShown);
            self.state.flash_until = Some(Instant::now() + ATTENTION_FLASH);
        }

        self.sync_editor();
    }

    fn start_submission(&mut self) {
        self.state.quote_index = 0;
        self.quote_started = Instant::now();

        match &self.processor {
            Some(processor) => {
                processor.spawn(self.state.wizard.clone());
                self.set_status("Creating your assistant...".to_string());
            }
            None => {
                tracing::error!("no submission processor attached");
                self.state
                    .wizard
                    .apply(WizardEvent::SubmissionFinished(SubmissionResult::Failure(
                        SubmissionFailure::new(
                            "Failed to create agent: provisioning is not configured",
                            RemediationCategory::Connectivity,
                        ),
                    )));
            }
        }
    }

    fn is_text_control(control: &Control) -> bool {
        match control {
            Control::AttachmentPicker => true,
            Control::Field(key) => !matches!(
                WizardState::kind_of(key),
                FieldKind::Toggle | FieldKind::Choice(_)
            ),
            _ => false,
        }
    }

    /// Rebind the edit buffer when focus lands on a different text control
    fn sync_editor(&mut self) {
        let target = self
            .state
            .wizard
            .focus()
            .filter(|control| Self::is_text_control(control))
            .cloned();

        if target != self.bound {
            let value = match &target {
                Some(Control::Field(key)) => self.state.wizard.text_of(key).to_string(),
                _ => String::new(),
            };
            self.editor = Input::default().with_value(value);
            self.bound = target;
        }
    }

    fn handle_input(&mut self, event: Event) -> Result<(), Error> {
        let page = self.state.wizard.page().clone();
        match page {
            Page::Landing => {
                if event == Event::Enter {
                    self.clear_messages();
                    self.dispatch(WizardEvent::Start);
                }
            }
            Page::Section(_) => self.handle_section(event)?,
            Page::Review => match event {
                Event::Enter => self.dispatch(WizardEvent::Confirm),
                Event::Char('e') | Event::Escape => self.dispatch(WizardEvent::EditDetails),
                _ => {}
            },
            Page::Loading => {}
            Page::Success(_) => {
                if matches!(event, Event::Enter | Event::Char('q')) {
                    self.state.should_quit = true;
                }
            }
            Page::Error(_) => match event {
                Event::Char('r') | Event::Enter => {
                    self.clear_messages();
                    self.dispatch(WizardEvent::Retry);
                }
                Event::Char('e') => {
                    self.clear_messages();
                    self.dispatch(WizardEvent::EditDetails);
                }
                Event::Char('q') => self.state.should_quit = true,
                _ => {}
            },
        }
        Ok(())
    }

    fn handle_section(&mut self, event: Event) -> Result<(), Error> {
        if !self.state.wizard.notices().is_empty() {
            self.state.wizard.apply(WizardEvent::DismissNotices);
        }
        self.state.error_message = None;

        let focus = self.state.wizard.focus().cloned();
        let choice = focus.as_ref().and_then(Self::choice_options);

        match event {
            Event::Tab | Event::Down => self.dispatch(WizardEvent::FocusNext),
            Event::BackTab | Event::Up => self.dispatch(WizardEvent::FocusPrevious),
            Event::PageDown => self.dispatch(WizardEvent::Next),
            Event::PageUp | Event::Escape => self.dispatch(WizardEvent::Previous),
            Event::Enter => self.activate(focus, true),
            Event::Char(' ') if self.bound.is_none() => self.activate(focus, false),
            Event::Left | Event::Right if choice.is_some() => {
                if let (Some(Control::Field(key)), Some(options)) = (focus, choice) {
                    self.cycle_choice(key, options, event == Event::Right);
                }
            }
            Event::Ctrl('x') | Event::Ctrl('d') => self.remove_focused(focus),
            Event::Paste(text) => self.handle_paste(text),
            other => self.edit(other),
        }

        Ok(())
    }

    fn choice_options(control: &Control) -> Option<&'static [&'static str]> {
        match control {
            Control::Field(key) => match WizardState::kind_of(key) {
                FieldKind::Choice(options) => Some(options),
                _ => None,
            },
            _ => None,
        }
    }

    /// Enter or Space on the focused control
    fn activate(&mut self, focus: Option<Control>, enter: bool) {
        match focus {
            Some(Control::AddEntry(kind)) => self.dispatch(WizardEvent::AddEntry(kind)),
            Some(Control::Day(day)) => self.dispatch(WizardEvent::ToggleDay(day)),
            Some(Control::Field(FieldKey::Named(name)))
                if WizardState::kind_of(&FieldKey::Named(name)) == FieldKind::Toggle =>
            {
                self.dispatch(WizardEvent::Toggle(name))
            }
            Some(Control::AttachmentPicker) if enter && !self.editor.value().trim().is_empty() => {
                let text = self.editor.value().to_string();
                self.editor = Input::default();
                self.attach_paths(parse_dropped_paths(&text));
            }
            Some(Control::Field(key)) if !enter => {
                if let Some(options) = Self::choice_options(&Control::Field(key)) {
                    self.cycle_choice(key, options, true);
                }
            }
            _ if enter => self.dispatch(WizardEvent::Next),
            _ => {}
        }
    }

    fn cycle_choice(&mut self, key: FieldKey, options: &'static [&'static str], forward: bool) {
        if options.is_empty() {
            return;
        }
        let current = options
            .iter()
            .position(|option| *option == self.state.wizard.text_of(&key));
        let next = match (current, forward) {
            (None, _) => 0,
            (Some(i), true) => (i + 1) % options.len(),
            (Some(i), false) => (i + options.len() - 1) % options.len(),
        };
        self.dispatch(WizardEvent::SetText {
            key,
            value: options[next].to_string(),
        });
    }

    fn remove_focused(&mut self, focus: Option<Control>) {
        match focus {
            Some(Control::Field(FieldKey::Entry(kind, index))) => {
                self.dispatch(WizardEvent::RemoveEntry(kind, index))
            }
            Some(Control::Attachment(position)) => {
                let Some(name) = self
                    .wizard()
                    .attachments()
                    .files()
                    .get(position)
                    .map(|file| file.name.clone())
                else {
                    return;
                };
                self.set_status(format!("Removed {}", name));
                self.dispatch(WizardEvent::RemoveAttachment(name));
            }
            _ => {}
        }
    }

    /// Dropped files arrive as a paste of their paths
    fn handle_paste(&mut self, text: String) {
        let paths = parse_dropped_paths(&text);
        let on_first_section = *self.state.wizard.page() == Page::Section(1);

        if on_first_section && !paths.is_empty() && paths.iter().all(|p| p.is_file()) {
            self.attach_paths(paths);
            return;
        }

        if self.bound.is_some() {
            for c in text.chars().filter(|c| !c.is_control()) {
                self.editor.handle(InputRequest::InsertChar(c));
            }
            self.push_editor_value();
        }
    }

    fn attach_paths(&mut self, paths: Vec<PathBuf>) {
        let mut files = Vec::new();
        let mut unreadable = Vec::new();

        for path in paths {
            match UploadedFile::from_path(&path) {
                Ok(file) => files.push(file),
                Err(e) => unreadable.push(e.to_string()),
            }
        }

        let offered = files.len();
        let before = self.state.wizard.attachments().len();
        self.dispatch(WizardEvent::AttachFiles(files));
        let accepted = self.state.wizard.attachments().len() - before;

        if accepted > 0 {
            self.set_status(format!("Attached {} of {} document(s)", accepted, offered));
        }
        if !unreadable.is_empty() {
            self.set_error(unreadable.join("; "));
        }
    }

    /// Route editing keys to the bound text control
    fn edit(&mut self, event: Event) {
        if self.bound.is_none() {
            return;
        }

        let request = match event {
            Event::Char(c) => InputRequest::InsertChar(c),
            Event::Backspace => InputRequest::DeletePrevChar,
            Event::Delete => InputRequest::DeleteNextChar,
            Event::Left => InputRequest::GoToPrevChar,
            Event::Right => InputRequest::GoToNextChar,
            Event::Home => InputRequest::GoToStart,
            Event::End => InputRequest::GoToEnd,
            Event::Ctrl('u') => InputRequest::DeleteLine,
            _ => return,
        };

        if let Some(changed) = self.editor.handle(request) {
            if changed.value {
                self.push_editor_value();
            }
        }
    }

    fn push_editor_value(&mut self) {
        if let Some(Control::Field(key)) = self.bound.clone() {
            self.dispatch(WizardEvent::SetText {
                key,
                value: self.editor.value().to_string(),
            });
        }
    }

    /// Label shown for the bound time zone choice
    pub fn time_zone_label(&self) -> String {
        let key = self.state.wizard.input_text(fields::TIME_ZONE);
        if key.is_empty() {
            "Select a time zone".to_string()
        } else {
            fields::time_zone_display(key)
        }
    }
}
