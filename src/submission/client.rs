//! Provisioning endpoint client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Deserializer, Serialize};

use crate::config::OnboardingConfig;
use crate::error::Error;
use crate::submission::payload::SubmissionPayload;

/// Body returned by the provisioning endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProvisionResponse {
    /// Null, zero or empty flags count as failure
    #[serde(default, deserialize_with = "truthy")]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    /// Machine-readable failure cause, when the server provides one
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub dashboard_email: Option<String>,
    #[serde(default)]
    pub dashboard_password: Option<String>,
    /// Numeric or string id depending on the backend
    #[serde(default)]
    pub company_id: Option<serde_json::Value>,
}

fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;

    Ok(match Value::deserialize(deserializer)? {
        Value::Null => false,
        Value::Bool(flag) => flag,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

/// Something that can provision an assistant from a payload
#[async_trait]
pub trait Provisioner: Send + Sync {
    async fn provision(&self, payload: &SubmissionPayload) -> Result<ProvisionResponse, Error>;
}

/// Provisioner that POSTs JSON over HTTP
#[derive(Debug, Clone)]
pub struct HttpProvisioner {
    client: Client,
    endpoint: Url,
}

impl HttpProvisioner {
    pub fn new(endpoint: Url, timeout: Option<Duration>) -> Result<Self, Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint,
        })
    }

    /// Build a provisioner for the endpoint selected by the configuration
    pub fn from_config(config: &OnboardingConfig) -> Result<Self, Error> {
        let endpoint = config.onboard_url()?;
        let timeout = config.api.request_timeout_secs.map(Duration::from_secs);
        tracing::info!(%endpoint, local = config.use_local_api(), "provisioning endpoint resolved");
        Self::new(endpoint, timeout)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Provisioner for HttpProvisioner {
    async fn provision(&self, payload: &SubmissionPayload) -> Result<ProvisionResponse, Error> {
        tracing::debug!(endpoint = %self.endpoint, company = %payload.company_name, "sending onboarding request");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await?;

        // The body decides the outcome, whatever the status code says
        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(%status, bytes = body.len(), "onboarding response received");

        Ok(serde_json::from_str(&body)?)
    }
}
