//! Event Handling System
//!
//! Terminal input is read on a background task and forwarded over an mpsc
//! channel together with events produced by the asynchronous submission.

use crossterm::event::{self, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::submission::{SubmissionResult, Submitter};
use crate::wizard::WizardState;

/// Application events that can be handled
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Quit the application (Ctrl+C)
    Quit,
    /// Move focus forward
    Tab,
    /// Move focus backward (Shift+Tab)
    BackTab,
    Enter,
    Escape,
    Up,
    Down,
    Left,
    Right,
    /// Character input
    Char(char),
    Backspace,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    /// Ctrl+key combinations
    Ctrl(char),
    /// Bracketed paste, also how terminals deliver dropped files
    Paste(String),
    /// Terminal was resized
    Resize,
    /// The provisioning call has finished
    SubmissionFinished(SubmissionResult),
}

/// Event handler for processing terminal events
pub struct EventHandler {
    /// Receiver for events
    receiver: mpsc::UnboundedReceiver<Event>,
    /// Sender for events produced outside the terminal task
    sender: mpsc::UnboundedSender<Event>,
    /// Handle for the background terminal event processing task
    _terminal_task: tokio::task::JoinHandle<()>,
}

/// Runs the onboarding submission off the UI loop and reports the outcome
#[derive(Clone)]
pub struct SubmissionProcessor {
    event_sender: mpsc::UnboundedSender<Event>,
    submitter: Submitter,
}

impl SubmissionProcessor {
    pub fn new(event_sender: mpsc::UnboundedSender<Event>, submitter: Submitter) -> Self {
        Self {
            event_sender,
            submitter,
        }
    }

    /// Submit a snapshot of the wizard and send back the result
    pub async fn run(&self, state: WizardState) {
        let result = self.submitter.submit(&state).await;
        if self
            .event_sender
            .send(Event::SubmissionFinished(result))
            .is_err()
        {
            tracing::warn!("event channel closed before submission result was delivered");
        }
    }

    /// Spawn the submission as its own task
    pub fn spawn(&self, state: WizardState) -> tokio::task::JoinHandle<()> {
        let processor = self.clone();
        tokio::spawn(async move { processor.run(state).await })
    }
}

impl EventHandler {
    /// Create a new event handler
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();

        // Spawn a task to handle terminal events
        let event_sender = sender.clone();
        let terminal_task = tokio::spawn(async move {
            loop {
                // Poll for events with a timeout to avoid blocking
                if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                    if let Ok(terminal_event) = event::read() {
                        if let Some(app_event) = Self::convert_terminal_event(terminal_event) {
                            if event_sender.send(app_event).is_err() {
                                break; // Channel closed, exit the loop
                            }
                        }
                    }
                }

                // Small delay to prevent high CPU usage
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        });

        Self {
            receiver,
            sender,
            _terminal_task: terminal_task,
        }
    }

    /// Get the next event
    pub async fn next(&mut self) -> Result<Event, Box<dyn std::error::Error + Send + Sync>> {
        self.receiver
            .recv()
            .await
            .ok_or_else(|| "Event channel closed".into())
    }

    /// Convert a terminal event to an application event
    fn convert_terminal_event(terminal_event: event::Event) -> Option<Event> {
        match terminal_event {
            event::Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
                Self::convert_key_event(key_event)
            }
            event::Event::Paste(text) => Some(Event::Paste(text)),
            event::Event::Resize(_, _) => Some(Event::Resize),
            _ => None,
        }
    }

    /// Convert a key event to an application event
    fn convert_key_event(key_event: KeyEvent) -> Option<Event> {
        match key_event {
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => Some(Event::Quit),

            KeyEvent {
                code: KeyCode::Tab,
                modifiers: KeyModifiers::NONE,
                ..
            } => Some(Event::Tab),

            KeyEvent {
                code: KeyCode::BackTab,
                ..
            } => Some(Event::BackTab),

            KeyEvent {
                code: KeyCode::Enter,
                modifiers: KeyModifiers::NONE,
                ..
            } => Some(Event::Enter),

            KeyEvent {
                code: KeyCode::Esc, ..
            } => Some(Event::Escape),

            KeyEvent {
                code: KeyCode::Up, ..
            } => Some(Event::Up),

            KeyEvent {
                code: KeyCode::Down,
                ..
            } => Some(Event::Down),

            KeyEvent {
                code: KeyCode::Left,
                ..
            } => Some(Event::Left),

            KeyEvent {
                code: KeyCode::Right,
                ..
            } => Some(Event::Right),

            KeyEvent {
                code: KeyCode::Backspace,
                ..
            } => Some(Event::Backspace),

            KeyEvent {
                code: KeyCode::Delete,
                ..
            } => Some(Event::Delete),

            KeyEvent {
                code: KeyCode::Home,
                ..
            } => Some(Event::Home),

            KeyEvent {
                code: KeyCode::End, ..
            } => Some(Event::End),

            KeyEvent {
                code: KeyCode::PageUp,
                ..
            } => Some(Event::PageUp),

            KeyEvent {
                code: KeyCode::PageDown,
                ..
            } => Some(Event::PageDown),

            // Ctrl + character combinations
            KeyEvent {
                code: KeyCode::Char(c),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => Some(Event::Ctrl(c)),

            // Character input, including shifted characters
            KeyEvent {
                code: KeyCode::Char(c),
                modifiers,
                ..
            } if modifiers == KeyModifiers::NONE || modifiers == KeyModifiers::SHIFT => {
                Some(Event::Char(c))
            }

            // Ignore other key combinations
            _ => None,
        }
    }

    /// Send an event into the loop
    pub fn send(&self, event: Event) -> Result<(), mpsc::error::SendError<Event>> {
        self.sender.send(event)
    }

    /// Create a processor that reports submission results into this handler
    pub fn submission_processor(&self, submitter: Submitter) -> SubmissionProcessor {
        SubmissionProcessor::new(self.sender.clone(), submitter)
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}
