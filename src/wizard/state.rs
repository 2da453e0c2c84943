//! Wizard state machine
//!
//! All navigation, editing and outcome handling goes through
//! [`WizardState::apply`] (or the by-value [`transition`]). The only side
//! effect the machine asks for is [`Effect::Submit`], which the caller runs
//! and reports back with [`WizardEvent::SubmissionFinished`].

use std::collections::{BTreeMap, BTreeSet};

use crate::submission::{ProvisionedAccount, SubmissionFailure, SubmissionResult};
use crate::wizard::attachments::{AttachmentSet, UploadedFile};
use crate::wizard::fields::{
    self, BusinessDay, Control, FieldKey, FieldKind, FieldValue, Requirement, POST_CALL_EMAIL,
    POST_CALL_SMS, PRIMARY_EMAIL,
};
use crate::wizard::groups::{GroupKind, RepeatableFieldGroup};
use crate::wizard::validation;

pub const TOTAL_SECTIONS: usize = 3;

/// Pages of the wizard
#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    Landing,
    /// Form section, 1-based
    Section(usize),
    Review,
    Loading,
    Success(ProvisionedAccount),
    Error(SubmissionFailure),
}

impl Page {
    pub fn title(&self) -> &'static str {
        match self {
            Page::Landing => "Welcome",
            Page::Section(n) => fields::section_title(*n),
            Page::Review => "Review Your Details",
            Page::Loading => "Creating Your Assistant",
            Page::Success(_) => "You're All Set",
            Page::Error(_) => "Something Went Wrong",
        }
    }

    pub fn section(&self) -> Option<usize> {
        match self {
            Page::Section(n) => Some(*n),
            _ => None,
        }
    }
}

/// Inputs to the state machine
#[derive(Debug, Clone, PartialEq)]
pub enum WizardEvent {
    Start,
    Next,
    Previous,
    /// Submit from the review page
    Confirm,
    /// Back to the last section from review or error
    EditDetails,
    /// Throw everything away and start over
    Retry,
    SetText { key: FieldKey, value: String },
    Blur(FieldKey),
    Toggle(&'static str),
    ToggleDay(BusinessDay),
    Focus(Control),
    FocusNext,
    FocusPrevious,
    AddEntry(GroupKind),
    RemoveEntry(GroupKind, u32),
    AttachFiles(Vec<UploadedFile>),
    RemoveAttachment(String),
    SubmissionFinished(SubmissionResult),
    /// The front-end has shown the invalid-form highlight
    AttentionShown,
    DismissNotices,
}

/// Work the caller must perform after a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Submit,
}

#[derive(Debug, Clone)]
pub struct Transition {
    pub state: WizardState,
    pub effect: Option<Effect>,
}

/// Apply an event to a state, returning the successor and any effect
pub fn transition(mut state: WizardState, event: WizardEvent) -> Transition {
    let effect = state.apply(event);
    Transition { state, effect }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Completed,
    Active,
    Pending,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressStep {
    pub label: &'static str,
    pub status: StepStatus,
}

/// Progress through the sections and review, derived from the page
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    pub steps: Vec<ProgressStep>,
    pub ratio: f64,
}

/// Complete state of one onboarding session
#[derive(Debug, Clone, PartialEq)]
pub struct WizardState {
    page: Page,
    total_sections: usize,
    inputs: BTreeMap<&'static str, FieldValue>,
    form_data: BTreeMap<&'static str, FieldValue>,
    business_days: BTreeSet<BusinessDay>,
    websites: RepeatableFieldGroup,
    cc_emails: RepeatableFieldGroup,
    sms_numbers: RepeatableFieldGroup,
    attachments: AttachmentSet,
    errors: BTreeMap<FieldKey, String>,
    focus: Option<Control>,
    attention: bool,
    notices: Vec<String>,
}

impl Default for WizardState {
    fn default() -> Self {
        let inputs = fields::FIELDS
            .iter()
            .filter_map(|spec| spec.default.map(|d| (spec.name, FieldValue::from(d))))
            .collect();

        Self {
            page: Page::Landing,
            total_sections: TOTAL_SECTIONS,
            inputs,
            form_data: BTreeMap::new(),
            business_days: BusinessDay::WEEKDAYS.into_iter().collect(),
            websites: RepeatableFieldGroup::new(GroupKind::Websites),
            cc_emails: RepeatableFieldGroup::new(GroupKind::CcEmails),
            sms_numbers: RepeatableFieldGroup::new(GroupKind::SmsNumbers),
            attachments: AttachmentSet::new(),
            errors: BTreeMap::new(),
            focus: None,
            attention: false,
            notices: Vec::new(),
        }
    }
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    // ----- accessors -----

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn total_sections(&self) -> usize {
        self.total_sections
    }

    pub fn focus(&self) -> Option<&Control> {
        self.focus.as_ref()
    }

    pub fn needs_attention(&self) -> bool {
        self.attention
    }

    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    pub fn errors(&self) -> &BTreeMap<FieldKey, String> {
        &self.errors
    }

    pub fn error_for(&self, key: &FieldKey) -> Option<&str> {
        self.errors.get(key).map(String::as_str)
    }

    pub fn business_days(&self) -> &BTreeSet<BusinessDay> {
        &self.business_days
    }

    pub fn attachments(&self) -> &AttachmentSet {
        &self.attachments
    }

    pub fn group(&self, kind: GroupKind) -> &RepeatableFieldGroup {
        match kind {
            GroupKind::Websites => &self.websites,
            GroupKind::CcEmails => &self.cc_emails,
            GroupKind::SmsNumbers => &self.sms_numbers,
        }
    }

    fn group_mut(&mut self, kind: GroupKind) -> &mut RepeatableFieldGroup {
        match kind {
            GroupKind::Websites => &mut self.websites,
            GroupKind::CcEmails => &mut self.cc_emails,
            GroupKind::SmsNumbers => &mut self.sms_numbers,
        }
    }

    /// Live text of a named field (empty when unset)
    pub fn input_text(&self, name: &str) -> &str {
        self.inputs
            .get(name)
            .and_then(FieldValue::as_text)
            .unwrap_or("")
    }

    /// Live state of a toggle
    pub fn input_flag(&self, name: &str) -> bool {
        self.inputs
            .get(name)
            .and_then(FieldValue::as_flag)
            .unwrap_or(false)
    }

    /// Live text behind any editable key
    pub fn text_of(&self, key: &FieldKey) -> &str {
        match key {
            FieldKey::Named(name) => self.input_text(name),
            FieldKey::Entry(kind, index) => self.group(*kind).value(*index).unwrap_or(""),
        }
    }

    /// Committed text of a named field, set when its section was completed
    pub fn form_text(&self, name: &str) -> Option<&str> {
        self.form_data.get(name).and_then(FieldValue::as_text)
    }

    pub fn form_flag(&self, name: &str) -> bool {
        self.form_data
            .get(name)
            .and_then(FieldValue::as_flag)
            .unwrap_or(false)
    }

    pub fn form_data(&self) -> &BTreeMap<&'static str, FieldValue> {
        &self.form_data
    }

    // ----- projections -----

    /// Focusable controls of a section, in display order. Controls hidden by
    /// a toggle are left out.
    pub fn controls(&self, section: usize) -> Vec<Control> {
        let mut controls = Vec::new();
        let named = |name: &'static str| Control::Field(FieldKey::Named(name));

        match section {
            1 => {
                controls.push(named(fields::COMPANY_NAME));
                controls.push(named(fields::OFFICE_ADDRESS));
                self.push_group_controls(GroupKind::Websites, &mut controls);
                controls.push(Control::AttachmentPicker);
                controls.extend(
                    self.attachments
                        .files()
                        .iter()
                        .enumerate()
                        .map(|(position, _)| Control::Attachment(position)),
                );
                controls.push(named(fields::ASSISTANT_NAME));
            }
            2 => {
                controls.push(named(fields::TIME_ZONE));
                controls.extend(BusinessDay::ALL.into_iter().map(Control::Day));
                controls.push(named(fields::START_TIME));
                controls.push(named(fields::END_TIME));
                controls.push(named(fields::CONTACT_NUMBER));
            }
            3 => {
                controls.push(named(POST_CALL_EMAIL));
                if self.input_flag(POST_CALL_EMAIL) {
                    controls.push(named(PRIMARY_EMAIL));
                    self.push_group_controls(GroupKind::CcEmails, &mut controls);
                }
                controls.push(named(POST_CALL_SMS));
                if self.input_flag(POST_CALL_SMS) {
                    self.push_group_controls(GroupKind::SmsNumbers, &mut controls);
                }
            }
            _ => {}
        }

        controls
    }

    fn push_group_controls(&self, kind: GroupKind, controls: &mut Vec<Control>) {
        let group = self.group(kind);
        controls.extend(
            group
                .entries()
                .iter()
                .map(|entry| Control::Field(FieldKey::Entry(kind, entry.index))),
        );
        if group.can_add() {
            controls.push(Control::AddEntry(kind));
        }
    }

    pub fn progress(&self) -> Progress {
        let mut labels: Vec<&'static str> = (1..=self.total_sections)
            .map(fields::section_title)
            .collect();
        labels.push("Review");

        let position = match &self.page {
            Page::Landing => 0,
            Page::Section(n) => *n,
            Page::Review => self.total_sections + 1,
            Page::Loading | Page::Success(_) | Page::Error(_) => self.total_sections + 2,
        };

        let steps: Vec<ProgressStep> = labels
            .into_iter()
            .enumerate()
            .map(|(i, label)| {
                let step = i + 1;
                let status = if step < position {
                    StepStatus::Completed
                } else if step == position {
                    StepStatus::Active
                } else {
                    StepStatus::Pending
                };
                ProgressStep { label, status }
            })
            .collect();

        let completed = steps
            .iter()
            .filter(|s| s.status == StepStatus::Completed)
            .count();
        let ratio = completed as f64 / steps.len() as f64;

        Progress { steps, ratio }
    }

    // ----- validation -----

    fn requirement_of(&self, key: &FieldKey) -> Requirement {
        match key {
            FieldKey::Named(name) => fields::spec(name)
                .map(|spec| spec.requirement)
                .unwrap_or(Requirement::Optional),
            FieldKey::Entry(kind, index) => self.group(*kind).requirement(*index),
        }
    }

    /// Input kind behind an editable key
    pub fn kind_of(key: &FieldKey) -> FieldKind {
        match key {
            FieldKey::Named(name) => fields::spec(name)
                .map(|spec| spec.kind)
                .unwrap_or(FieldKind::Text),
            FieldKey::Entry(kind, _) => kind.field_kind(),
        }
    }

    /// Whether a field must be filled in given the current toggles
    pub fn is_required(&self, key: &FieldKey) -> bool {
        match self.requirement_of(key) {
            Requirement::Always => true,
            Requirement::Optional => false,
            Requirement::WhenEnabled(toggle) => self.input_flag(toggle),
        }
    }

    /// Check one field without touching the error map
    pub fn check_field(&self, key: &FieldKey) -> Result<(), String> {
        validation::validate_value(Self::kind_of(key), self.is_required(key), self.text_of(key))
    }

    /// Check one field and record or clear its error
    pub fn validate_field(&mut self, key: FieldKey) -> bool {
        match self.check_field(&key) {
            Ok(()) => {
                self.errors.remove(&key);
                true
            }
            Err(message) => {
                self.errors.insert(key, message);
                false
            }
        }
    }

    /// Validate every required control of a section. On failure the first
    /// invalid control gets focus and the attention flag is raised.
    pub fn validate_section(&mut self, section: usize) -> bool {
        let required: Vec<FieldKey> = self
            .controls(section)
            .iter()
            .filter_map(Control::field_key)
            .filter(|key| self.is_required(key))
            .collect();

        let mut first_invalid = None;
        for key in required {
            if !self.validate_field(key) && first_invalid.is_none() {
                first_invalid = Some(key);
            }
        }

        match first_invalid {
            Some(key) => {
                tracing::debug!(section, ?key, "section validation failed");
                self.focus = Some(Control::Field(key));
                self.attention = true;
                false
            }
            None => true,
        }
    }

    /// Whether the section would pass validation right now
    pub fn can_proceed(&self, section: usize) -> bool {
        self.controls(section)
            .iter()
            .filter_map(Control::field_key)
            .filter(|key| self.is_required(key))
            .all(|key| self.check_field(&key).is_ok())
    }

    // ----- transitions -----

    /// Apply one event in place
    pub fn apply(&mut self, event: WizardEvent) -> Option<Effect> {
        match event {
            WizardEvent::Start => {
                if self.page == Page::Landing {
                    self.enter_section(1);
                }
            }
            WizardEvent::Next => {
                if let Some(section) = self.page.section() {
                    self.next_section(section);
                }
            }
            WizardEvent::Previous => {
                if let Some(section) = self.page.section() {
                    if section > 1 {
                        self.enter_section(section - 1);
                    }
                }
            }
            WizardEvent::Confirm => {
                if self.page == Page::Review {
                    tracing::info!("onboarding confirmed, submitting");
                    self.page = Page::Loading;
                    self.focus = None;
                    return Some(Effect::Submit);
                }
                tracing::debug!(page = ?self.page, "confirm ignored outside review");
            }
            WizardEvent::EditDetails => {
                if matches!(self.page, Page::Review | Page::Error(_)) {
                    self.enter_section(self.total_sections);
                }
            }
            WizardEvent::Retry => {
                if matches!(self.page, Page::Error(_)) {
                    tracing::info!("starting over");
                    *self = Self::new();
                }
            }
            WizardEvent::SetText { key, value } => self.set_text(key, value),
            WizardEvent::Blur(key) => {
                self.validate_field(key);
            }
            WizardEvent::Toggle(name) => self.toggle(name),
            WizardEvent::ToggleDay(day) => {
                if !self.business_days.remove(&day) {
                    self.business_days.insert(day);
                }
            }
            WizardEvent::Focus(control) => self.move_focus(Some(control)),
            WizardEvent::FocusNext => self.step_focus(true),
            WizardEvent::FocusPrevious => self.step_focus(false),
            WizardEvent::AddEntry(kind) => match self.group_mut(kind).add() {
                Ok(index) => {
                    self.focus = Some(Control::Field(FieldKey::Entry(kind, index)));
                }
                Err(e) => self.notices.push(e.to_string()),
            },
            WizardEvent::RemoveEntry(kind, index) => match self.group_mut(kind).remove(index) {
                Ok(_) => {
                    let key = FieldKey::Entry(kind, index);
                    self.errors.remove(&key);
                    if self.focus == Some(Control::Field(key)) {
                        self.focus = Some(Control::AddEntry(kind));
                    }
                }
                Err(e) => self.notices.push(e.to_string()),
            },
            WizardEvent::AttachFiles(files) => {
                let rejected = self.attachments.intake(files);
                self.notices
                    .extend(rejected.into_iter().map(|e| e.to_string()));
            }
            WizardEvent::RemoveAttachment(name) => {
                self.attachments.remove_by_name(&name);
                // Positions shift after removal
                if matches!(self.focus, Some(Control::Attachment(_))) {
                    self.focus = Some(Control::AttachmentPicker);
                }
            }
            WizardEvent::SubmissionFinished(result) => {
                if self.page == Page::Loading {
                    self.page = match result {
                        SubmissionResult::Success(account) => Page::Success(account),
                        SubmissionResult::Failure(failure) => Page::Error(failure),
                    };
                } else {
                    tracing::warn!(page = ?self.page, "submission result arrived outside loading");
                }
            }
            WizardEvent::AttentionShown => self.attention = false,
            WizardEvent::DismissNotices => self.notices.clear(),
        }

        None
    }

    fn enter_section(&mut self, section: usize) {
        self.page = Page::Section(section);
        self.focus = self.controls(section).into_iter().next();
        self.attention = false;
    }

    fn next_section(&mut self, section: usize) {
        if !self.validate_section(section) {
            return;
        }

        self.commit_section(section);

        if section < self.total_sections {
            self.enter_section(section + 1);
        } else {
            self.page = Page::Review;
            self.focus = None;
            self.attention = false;
        }
    }

    /// Copy a section's live named values into the committed form data
    fn commit_section(&mut self, section: usize) {
        for spec in fields::section_fields(section) {
            match self.inputs.get(spec.name) {
                Some(FieldValue::Flag(flag)) => {
                    self.form_data.insert(spec.name, FieldValue::Flag(*flag));
                }
                Some(FieldValue::Text(text)) if !text.trim().is_empty() => {
                    self.form_data
                        .insert(spec.name, FieldValue::Text(text.trim().to_string()));
                }
                _ => {
                    self.form_data.remove(spec.name);
                }
            }
        }
        tracing::debug!(section, fields = self.form_data.len(), "section committed");
    }

    fn set_text(&mut self, key: FieldKey, value: String) {
        match key {
            FieldKey::Named(name) => {
                let Some(spec) = fields::spec(name) else {
                    tracing::warn!(name, "unknown field");
                    return;
                };
                if spec.kind == FieldKind::Toggle {
                    return;
                }
                self.inputs.insert(spec.name, FieldValue::Text(value));
            }
            FieldKey::Entry(kind, index) => {
                if !self.group_mut(kind).set_value(index, value) {
                    return;
                }
            }
        }
        self.validate_field(key);
    }

    fn toggle(&mut self, name: &'static str) {
        let Some(spec) = fields::spec(name) else {
            return;
        };
        if spec.kind != FieldKind::Toggle {
            return;
        }

        let enabled = !self.input_flag(name);
        self.inputs.insert(spec.name, FieldValue::Flag(enabled));

        if !enabled {
            let cleared = match spec.name {
                POST_CALL_EMAIL => {
                    self.inputs
                        .insert(PRIMARY_EMAIL, FieldValue::Text(String::new()));
                    self.errors.remove(&FieldKey::Named(PRIMARY_EMAIL));
                    Some(GroupKind::CcEmails)
                }
                POST_CALL_SMS => Some(GroupKind::SmsNumbers),
                _ => None,
            };

            if let Some(kind) = cleared {
                self.group_mut(kind).clear();
                self.errors
                    .retain(|key, _| !matches!(key, FieldKey::Entry(k, _) if *k == kind));
            }
        }

        // Focus may point at a control that is now hidden
        if let Some(section) = self.page.section() {
            if let Some(focus) = &self.focus {
                if !self.controls(section).contains(focus) {
                    self.focus = Some(Control::Field(FieldKey::Named(spec.name)));
                }
            }
        }
    }

    fn move_focus(&mut self, target: Option<Control>) {
        if let Some(Control::Field(key)) = self.focus.take() {
            self.validate_field(key);
        }
        self.focus = target;
    }

    fn step_focus(&mut self, forward: bool) {
        let Some(section) = self.page.section() else {
            return;
        };
        let controls = self.controls(section);
        if controls.is_empty() {
            return;
        }

        let current = self
            .focus
            .as_ref()
            .and_then(|focus| controls.iter().position(|c| c == focus));

        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => controls.len() - 1,
            (Some(i), true) => (i + 1) % controls.len(),
            (Some(i), false) => (i + controls.len() - 1) % controls.len(),
        };

        self.move_focus(controls.into_iter().nth(next));
    }
}
