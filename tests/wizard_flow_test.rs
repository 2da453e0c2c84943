mod utils;

use clara_onboarding::wizard::fields::{
    self, BusinessDay, Control, POST_CALL_EMAIL, POST_CALL_SMS, PRIMARY_EMAIL,
};
use clara_onboarding::submission::SubmissionPayload;
use clara_onboarding::wizard::{
    transition, Effect, FieldKey, GroupKind, Page, ReviewSummary, WizardEvent, WizardState,
};
use utils::test_utils::{fill_business, fill_company, set, set_named, wizard_at_review};

#[test]
fn test_full_flow_reaches_review_and_submits_once() {
    let state = wizard_at_review("Acme Dental");
    assert_eq!(state.page(), &Page::Review);
    assert_eq!(state.form_text(fields::TIME_ZONE), Some("New_York"));

    let confirmed = transition(state, WizardEvent::Confirm);
    assert_eq!(confirmed.effect, Some(Effect::Submit));
    assert_eq!(confirmed.state.page(), &Page::Loading);

    let again = transition(confirmed.state, WizardEvent::Confirm);
    assert_eq!(again.effect, None, "a second confirm must not resubmit");
}

#[test]
fn test_each_section_blocks_until_valid() {
    let mut state = WizardState::new();
    state.apply(WizardEvent::Start);

    state.apply(WizardEvent::Next);
    assert_eq!(state.page(), &Page::Section(1));

    fill_company(&mut state, "Acme Dental");
    state.apply(WizardEvent::Next);
    assert_eq!(state.page(), &Page::Section(2));

    // Time zone and phone are still missing
    state.apply(WizardEvent::Next);
    assert_eq!(state.page(), &Page::Section(2));
    assert_eq!(
        state.focus(),
        Some(&Control::Field(FieldKey::Named(fields::TIME_ZONE)))
    );

    fill_business(&mut state);
    set_named(&mut state, fields::START_TIME, "9am");
    state.apply(WizardEvent::Next);
    assert_eq!(state.page(), &Page::Section(2));
    assert_eq!(
        state.error_for(&FieldKey::Named(fields::START_TIME)),
        Some("Please enter a time as HH:MM")
    );

    set_named(&mut state, fields::START_TIME, "08:30");
    state.apply(WizardEvent::Next);
    assert_eq!(state.page(), &Page::Section(3));

    state.apply(WizardEvent::Previous);
    assert_eq!(state.page(), &Page::Section(2));
    assert_eq!(state.input_text(fields::CONTACT_NUMBER), "+1 (212) 555-0000");
}

#[test]
fn test_enabled_summaries_block_until_valid() {
    let mut state = WizardState::new();
    state.apply(WizardEvent::Start);
    fill_company(&mut state, "Acme Dental");
    state.apply(WizardEvent::Next);
    fill_business(&mut state);
    state.apply(WizardEvent::Next);
    assert_eq!(state.page(), &Page::Section(3));
    assert!(state.input_flag(POST_CALL_EMAIL));
    assert!(state.input_flag(POST_CALL_SMS));

    let email = FieldKey::Named(PRIMARY_EMAIL);
    let primary_sms = FieldKey::Entry(GroupKind::SmsNumbers, 0);

    // Both recipients empty: focus lands on the first one
    state.apply(WizardEvent::Next);
    assert_eq!(state.page(), &Page::Section(3));
    assert_eq!(state.focus(), Some(&Control::Field(email)));
    assert!(state.needs_attention());
    assert!(state.error_for(&email).is_some());
    assert!(state.error_for(&primary_sms).is_some());

    set(&mut state, email, "owner@");
    state.apply(WizardEvent::Next);
    assert_eq!(state.page(), &Page::Section(3));
    assert_eq!(state.focus(), Some(&Control::Field(email)));

    set(&mut state, email, "owner@acmedental.com");
    state.apply(WizardEvent::Next);
    assert_eq!(state.page(), &Page::Section(3));
    assert_eq!(state.focus(), Some(&Control::Field(primary_sms)));
    assert!(state.error_for(&email).is_none());

    // Turning SMS summaries off drops the requirement on the SMS number
    state.apply(WizardEvent::Toggle(POST_CALL_SMS));
    state.apply(WizardEvent::Next);
    assert_eq!(state.page(), &Page::Review);
}

#[test]
fn test_disabled_summaries_do_not_block() {
    let mut state = WizardState::new();
    state.apply(WizardEvent::Start);
    fill_company(&mut state, "Acme Dental");
    state.apply(WizardEvent::Next);
    fill_business(&mut state);
    state.apply(WizardEvent::Next);

    state.apply(WizardEvent::Toggle(POST_CALL_EMAIL));
    state.apply(WizardEvent::Toggle(fields::POST_CALL_SMS));
    state.apply(WizardEvent::Next);

    assert_eq!(state.page(), &Page::Review);
    let summary = ReviewSummary::from_state(&state);
    assert!(!summary.email_enabled);
    assert_eq!(summary.primary_email, None);
    assert_eq!(summary.sms_numbers, None);
}

#[test]
fn test_review_summary_shows_entered_data() {
    let mut state = WizardState::new();
    state.apply(WizardEvent::Start);
    fill_company(&mut state, "Acme Dental");
    state.apply(WizardEvent::AddEntry(GroupKind::Websites));
    set(
        &mut state,
        FieldKey::Entry(GroupKind::Websites, 1),
        "https://blog.acmedental.com",
    );
    set_named(&mut state, fields::ASSISTANT_NAME, "Ava");
    state.apply(WizardEvent::Next);

    fill_business(&mut state);
    state.apply(WizardEvent::ToggleDay(BusinessDay::Sat));
    state.apply(WizardEvent::Next);

    set_named(&mut state, fields::PRIMARY_EMAIL, "owner@acmedental.com");
    state.apply(WizardEvent::AddEntry(GroupKind::CcEmails));
    set(
        &mut state,
        FieldKey::Entry(GroupKind::CcEmails, 0),
        "frontdesk@acmedental.com",
    );
    set(&mut state, FieldKey::Entry(GroupKind::SmsNumbers, 0), "2125550001");
    state.apply(WizardEvent::Next);
    assert_eq!(state.page(), &Page::Review);

    let summary = ReviewSummary::from_state(&state);
    assert_eq!(summary.company, "Acme Dental");
    assert_eq!(
        summary.websites,
        "https://acmedental.com, https://blog.acmedental.com"
    );
    assert_eq!(summary.assistant, "Ava");
    assert_eq!(summary.time_zone, "New York (Eastern Time)");
    assert_eq!(summary.business_days, "Mon, Tue, Wed, Thu, Fri, Sat");
    assert_eq!(summary.hours, "9:00 AM - 5:00 PM");
    assert_eq!(summary.phone, "+1 (212) 555-0000");
    assert_eq!(
        summary.primary_email.as_deref(),
        Some("owner@acmedental.com")
    );
    assert_eq!(
        summary.cc_emails.as_deref(),
        Some("frontdesk@acmedental.com")
    );
    assert_eq!(summary.sms_numbers.as_deref(), Some("2125550001"));
}

#[test]
fn test_fourth_website_rejected_and_add_reenabled() {
    let mut state = WizardState::new();
    state.apply(WizardEvent::Start);

    state.apply(WizardEvent::AddEntry(GroupKind::Websites));
    state.apply(WizardEvent::AddEntry(GroupKind::Websites));
    assert!(!state.controls(1).contains(&Control::AddEntry(GroupKind::Websites)));

    state.apply(WizardEvent::AddEntry(GroupKind::Websites));
    assert_eq!(state.group(GroupKind::Websites).count(), 3);
    assert_eq!(state.notices(), ["You can add at most 3 websites"]);

    state.apply(WizardEvent::RemoveEntry(GroupKind::Websites, 1));
    state.apply(WizardEvent::RemoveEntry(GroupKind::Websites, 2));
    assert_eq!(state.group(GroupKind::Websites).count(), 1);
    assert!(state.controls(1).contains(&Control::AddEntry(GroupKind::Websites)));
}

#[test]
fn test_edit_details_returns_to_last_section_with_data() {
    let state = wizard_at_review("Acme Dental");
    let edited = transition(state, WizardEvent::EditDetails).state;

    assert_eq!(edited.page(), &Page::Section(3));
    assert_eq!(edited.input_text(fields::PRIMARY_EMAIL), "owner@acmedental.com");
    assert_eq!(edited.form_text(fields::COMPANY_NAME), Some("Acme Dental"));
}

#[test]
fn test_cleared_optional_field_is_not_sent() {
    let mut state = WizardState::new();
    state.apply(WizardEvent::Start);
    fill_company(&mut state, "Acme Dental");
    set_named(&mut state, fields::ASSISTANT_NAME, "Ava");
    state.apply(WizardEvent::Next);
    assert_eq!(state.form_text(fields::ASSISTANT_NAME), Some("Ava"));

    state.apply(WizardEvent::Previous);
    set_named(&mut state, fields::ASSISTANT_NAME, "  ");
    state.apply(WizardEvent::Next);
    assert_eq!(state.form_text(fields::ASSISTANT_NAME), None);

    assert_eq!(SubmissionPayload::from_state(&state).assistant_name, "Clara");
}
