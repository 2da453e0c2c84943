//! Submission of a completed wizard to the provisioning endpoint
//!
//! [`Submitter::submit`] runs the whole flow once: build the payload, apply
//! the local company-name check, call the [`Provisioner`] and turn whatever
//! comes back into a [`SubmissionResult`]. There is no retry.

pub mod client;
pub mod payload;
pub mod remediation;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use client::{HttpProvisioner, ProvisionResponse, Provisioner};
pub use payload::SubmissionPayload;
pub use remediation::RemediationCategory;

use crate::wizard::state::WizardState;

pub const PLACEHOLDER_PHONE_NUMBER: &str = "+1 (555) 000-0000";
pub const PLACEHOLDER_DASHBOARD_EMAIL: &str = "support@company.justclara.ai";
pub const PLACEHOLDER_DASHBOARD_PASSWORD: &str = "company@321";
pub const DEFAULT_FAILURE_MESSAGE: &str = "Failed to complete onboarding";

/// Credentials of a freshly provisioned assistant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionedAccount {
    pub phone_number: String,
    pub dashboard_email: String,
    pub dashboard_password: String,
    pub company_id: Option<String>,
}

/// Why onboarding failed and what the user can do about it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionFailure {
    pub message: String,
    pub category: RemediationCategory,
    pub tips: Vec<String>,
}

impl SubmissionFailure {
    pub fn new(message: impl Into<String>, category: RemediationCategory) -> Self {
        Self {
            message: message.into(),
            category,
            tips: category.tips(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionResult {
    Success(ProvisionedAccount),
    Failure(SubmissionFailure),
}

impl SubmissionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionResult::Success(_))
    }
}

fn company_id_text(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(id) => Some(id),
        other => Some(other.to_string()),
    }
}

/// Turn an endpoint response into an outcome
pub fn interpret(response: ProvisionResponse) -> SubmissionResult {
    if response.success {
        return SubmissionResult::Success(ProvisionedAccount {
            phone_number: response
                .phone_number
                .unwrap_or_else(|| PLACEHOLDER_PHONE_NUMBER.to_string()),
            dashboard_email: response
                .dashboard_email
                .unwrap_or_else(|| PLACEHOLDER_DASHBOARD_EMAIL.to_string()),
            dashboard_password: response
                .dashboard_password
                .unwrap_or_else(|| PLACEHOLDER_DASHBOARD_PASSWORD.to_string()),
            company_id: response.company_id.and_then(company_id_text),
        });
    }

    let message = response
        .error
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string());
    let category = RemediationCategory::classify(response.error_code.as_deref(), &message);

    SubmissionResult::Failure(SubmissionFailure::new(message, category))
}

/// Runs one onboarding submission against a provisioner
#[derive(Clone)]
pub struct Submitter {
    provisioner: Arc<dyn Provisioner>,
}

impl Submitter {
    pub fn new(provisioner: impl Provisioner + 'static) -> Self {
        Self {
            provisioner: Arc::new(provisioner),
        }
    }

    pub fn from_arc(provisioner: Arc<dyn Provisioner>) -> Self {
        Self { provisioner }
    }

    pub async fn submit(&self, state: &WizardState) -> SubmissionResult {
        self.submit_payload(SubmissionPayload::from_state(state)).await
    }

    pub async fn submit_payload(&self, payload: SubmissionPayload) -> SubmissionResult {
        if remediation::company_name_too_long(&payload.company_name) {
            tracing::warn!(
                length = payload.company_name.encode_utf16().count(),
                "company name too long, not contacting endpoint"
            );
            return SubmissionResult::Failure(SubmissionFailure {
                message: remediation::NAME_TOO_LONG_MESSAGE.to_string(),
                category: RemediationCategory::NameTooLong,
                tips: remediation::name_too_long_tips(&payload.company_name),
            });
        }

        match self.provisioner.provision(&payload).await {
            Ok(response) => {
                let result = interpret(response);
                match &result {
                    SubmissionResult::Success(account) => tracing::info!(
                        phone = %account.phone_number,
                        company_id = ?account.company_id,
                        "onboarding succeeded"
                    ),
                    SubmissionResult::Failure(failure) => tracing::warn!(
                        category = ?failure.category,
                        "onboarding rejected: {}",
                        failure.message
                    ),
                }
                result
            }
            Err(e) => {
                tracing::error!("onboarding request failed: {}", e);
                SubmissionResult::Failure(SubmissionFailure::new(
                    format!("Failed to create agent: {}", e),
                    RemediationCategory::Connectivity,
                ))
            }
        }
    }
}
