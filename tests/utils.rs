pub mod test_utils {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use clara_onboarding::submission::{ProvisionResponse, Provisioner, SubmissionPayload};
    use clara_onboarding::wizard::fields;
    use clara_onboarding::wizard::{FieldKey, GroupKind, WizardEvent, WizardState};
    use clara_onboarding::Error;

    pub fn set(state: &mut WizardState, key: FieldKey, value: &str) {
        state.apply(WizardEvent::SetText {
            key,
            value: value.to_string(),
        });
    }

    pub fn set_named(state: &mut WizardState, name: &'static str, value: &str) {
        set(state, FieldKey::Named(name), value);
    }

    /// Fill section one with valid data
    pub fn fill_company(state: &mut WizardState, company: &str) {
        set_named(state, fields::COMPANY_NAME, company);
        set_named(state, fields::OFFICE_ADDRESS, "500 Park Ave, New York");
        set(
            state,
            FieldKey::Entry(GroupKind::Websites, 0),
            "https://acmedental.com",
        );
    }

    /// Fill section two with valid data
    pub fn fill_business(state: &mut WizardState) {
        set_named(state, fields::TIME_ZONE, "New_York");
        set_named(state, fields::CONTACT_NUMBER, "+1 (212) 555-0000");
    }

    /// Fill section three with valid data
    pub fn fill_summaries(state: &mut WizardState) {
        set_named(state, fields::PRIMARY_EMAIL, "owner@acmedental.com");
        set(state, FieldKey::Entry(GroupKind::SmsNumbers, 0), "2125550001");
    }

    /// A wizard driven through every section to the review page
    pub fn wizard_at_review(company: &str) -> WizardState {
        let mut state = WizardState::new();
        state.apply(WizardEvent::Start);
        fill_company(&mut state, company);
        state.apply(WizardEvent::Next);
        fill_business(&mut state);
        state.apply(WizardEvent::Next);
        fill_summaries(&mut state);
        state.apply(WizardEvent::Next);
        state
    }

    /// Provisioner that replays a canned response and records every call
    pub struct RecordingProvisioner {
        response: ProvisionResponse,
        pub calls: Arc<AtomicUsize>,
        pub payloads: Arc<Mutex<Vec<SubmissionPayload>>>,
    }

    impl RecordingProvisioner {
        pub fn new(response: ProvisionResponse) -> Self {
            Self {
                response,
                calls: Arc::new(AtomicUsize::new(0)),
                payloads: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    #[async_trait]
    impl Provisioner for RecordingProvisioner {
        async fn provision(&self, payload: &SubmissionPayload) -> Result<ProvisionResponse, Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.payloads.lock().unwrap().push(payload.clone());
            Ok(self.response.clone())
        }
    }
}
