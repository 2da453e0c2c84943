mod utils;

use std::sync::atomic::Ordering;

use clara_onboarding::submission::{
    ProvisionResponse, RemediationCategory, SubmissionResult, Submitter,
};
use clara_onboarding::wizard::fields;
use clara_onboarding::WizardEvent;
use utils::test_utils::{wizard_at_review, RecordingProvisioner};

fn failure(error: &str) -> ProvisionResponse {
    ProvisionResponse {
        success: false,
        error: Some(error.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_payload_built_from_wizard() {
    let provisioner = RecordingProvisioner::new(ProvisionResponse {
        success: true,
        phone_number: Some("+1 (212) 555-0199".to_string()),
        dashboard_email: Some("acme@company.justclara.ai".to_string()),
        dashboard_password: Some("acme@321".to_string()),
        ..Default::default()
    });
    let payloads = provisioner.payloads.clone();
    let submitter = Submitter::new(provisioner);

    let result = submitter.submit(&wizard_at_review("Acme Dental")).await;
    assert!(result.is_success());

    let payloads = payloads.lock().unwrap();
    let payload = &payloads[0];
    assert_eq!(payload.company_name, "Acme Dental");
    assert_eq!(payload.assistant_name, "Clara");
    assert_eq!(payload.timezone, "New_York");
    assert_eq!(
        payload.business_hours,
        "9:00 AM - 5:00 PM, Mon, Tue, Wed, Thu, Fri"
    );
    assert_eq!(payload.website_url, "https://acmedental.com");
    assert_eq!(payload.primary_phone_number, "+1 (212) 555-0000");
    assert_eq!(payload.preferred_area_code, "212");
    assert_eq!(payload.fallback_area_codes.len(), 5);
    assert!(!payload.allow_emergency_transfer);
}

#[tokio::test]
async fn test_long_company_name_never_reaches_endpoint() {
    let provisioner = RecordingProvisioner::new(ProvisionResponse {
        success: true,
        ..Default::default()
    });
    let calls = provisioner.calls.clone();
    let submitter = Submitter::new(provisioner);

    let name = "A".repeat(51);
    let result = submitter.submit(&wizard_at_review(&name)).await;

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    match result {
        SubmissionResult::Failure(failure) => {
            assert_eq!(failure.category, RemediationCategory::NameTooLong);
            assert!(failure.tips[0].contains("51 characters"));
        }
        other => panic!("expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fifty_character_name_is_sent() {
    let provisioner = RecordingProvisioner::new(ProvisionResponse {
        success: true,
        ..Default::default()
    });
    let calls = provisioner.calls.clone();
    let submitter = Submitter::new(provisioner);

    let result = submitter.submit(&wizard_at_review(&"A".repeat(50))).await;
    assert!(result.is_success());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_missing_field_error_gets_tips() {
    let submitter = Submitter::new(RecordingProvisioner::new(failure(
        "Missing required field: company_name",
    )));

    match submitter.submit(&wizard_at_review("Acme Dental")).await {
        SubmissionResult::Failure(failure) => {
            assert_eq!(failure.category, RemediationCategory::MissingField);
            assert_eq!(failure.message, "Missing required field: company_name");
            assert!(!failure.tips.is_empty());
        }
        other => panic!("expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_error_code_wins_over_message() {
    let submitter = Submitter::new(RecordingProvisioner::new(ProvisionResponse {
        success: false,
        error: Some("Missing required field: x".to_string()),
        error_code: Some("phone_number_unavailable".to_string()),
        ..Default::default()
    }));

    match submitter.submit(&wizard_at_review("Acme Dental")).await {
        SubmissionResult::Failure(failure) => {
            assert_eq!(failure.category, RemediationCategory::PhoneUnavailable)
        }
        other => panic!("expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unrecognized_error_has_no_tips() {
    let submitter = Submitter::new(RecordingProvisioner::new(failure("Quota exceeded")));

    match submitter.submit(&wizard_at_review("Acme Dental")).await {
        SubmissionResult::Failure(failure) => {
            assert_eq!(failure.category, RemediationCategory::Unrecognized);
            assert!(failure.tips.is_empty());
        }
        other => panic!("expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_outcome_drives_wizard_to_error_and_back() {
    let submitter = Submitter::new(RecordingProvisioner::new(failure("Quota exceeded")));
    let mut state = wizard_at_review("Acme Dental");
    state.apply(WizardEvent::Confirm);

    let result = submitter.submit(&state).await;
    state.apply(WizardEvent::SubmissionFinished(result));
    assert!(matches!(state.page(), clara_onboarding::Page::Error(_)));

    state.apply(WizardEvent::Retry);
    assert_eq!(state.page(), &clara_onboarding::Page::Landing);
    assert_eq!(state.input_text(fields::COMPANY_NAME), "");
}
