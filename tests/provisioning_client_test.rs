mod utils;

use std::net::SocketAddr;

use axum::{http::StatusCode, routing::post, Json, Router};
use clara_onboarding::submission::{
    HttpProvisioner, Provisioner, RemediationCategory, SubmissionPayload, SubmissionResult,
    Submitter,
};
use clara_onboarding::OnboardingConfig;
use serde_json::{json, Value};
use utils::test_utils::wizard_at_review;

/// Serve `router` on an ephemeral loopback port
async fn spawn_stub(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

async fn provisioned(Json(body): Json<Value>) -> Json<Value> {
    let company = body["company_name"].as_str().unwrap_or_default().to_string();
    Json(json!({
        "success": true,
        "phone_number": "+1 (212) 555-0199",
        "dashboard_email": format!("{}@company.justclara.ai", company.to_lowercase()),
        "dashboard_password": "acme@321",
        "company_id": 42
    }))
}

#[tokio::test]
async fn test_loopback_site_uses_local_onboard_route() {
    let addr = spawn_stub(Router::new().route("/onboard", post(provisioned))).await;
    let base = format!("http://{}", addr);
    let config = OnboardingConfig::default()
        .with_site_url(base.clone())
        .with_local_api_url(base);

    let provisioner = HttpProvisioner::from_config(&config).unwrap();
    assert_eq!(provisioner.endpoint().path(), "/onboard");

    let result = Submitter::new(provisioner)
        .submit(&wizard_at_review("Acme"))
        .await;

    match result {
        SubmissionResult::Success(account) => {
            assert_eq!(account.phone_number, "+1 (212) 555-0199");
            assert_eq!(account.dashboard_email, "acme@company.justclara.ai");
            assert_eq!(account.company_id.as_deref(), Some("42"));
        }
        other => panic!("expected success, got {:?}", other),
    }
}

#[tokio::test]
async fn test_error_status_body_is_still_read() {
    let router = Router::new().route(
        "/api/onboard",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "success": false,
                    "error": "Invalid company name",
                    "error_code": "company_name_invalid"
                })),
            )
        }),
    );
    let addr = spawn_stub(router).await;
    let endpoint = format!("http://{}/api/onboard", addr).parse().unwrap();
    let provisioner = HttpProvisioner::new(endpoint, None).unwrap();

    let payload = SubmissionPayload::from_state(&wizard_at_review("Acme"));
    let response = provisioner.provision(&payload).await.unwrap();
    assert!(!response.success);
    assert_eq!(response.error_code.as_deref(), Some("company_name_invalid"));

    match Submitter::new(provisioner).submit_payload(payload).await {
        SubmissionResult::Failure(failure) => {
            assert_eq!(failure.category, RemediationCategory::CompanyName);
            assert_eq!(failure.message, "Invalid company name");
        }
        other => panic!("expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_null_success_flag_keeps_server_message() {
    let router = Router::new().route(
        "/api/onboard",
        post(|| async {
            Json(json!({
                "success": null,
                "error": "Missing required field: company_name"
            }))
        }),
    );
    let addr = spawn_stub(router).await;
    let endpoint = format!("http://{}/api/onboard", addr).parse().unwrap();
    let submitter = Submitter::new(HttpProvisioner::new(endpoint, None).unwrap());

    match submitter.submit(&wizard_at_review("Acme")).await {
        SubmissionResult::Failure(failure) => {
            assert_eq!(failure.category, RemediationCategory::MissingField);
            assert_eq!(failure.message, "Missing required field: company_name");
            assert!(!failure.tips.is_empty());
        }
        other => panic!("expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_a_connectivity_failure() {
    let router = Router::new().route("/api/onboard", post(|| async { "<html>oops</html>" }));
    let addr = spawn_stub(router).await;
    let endpoint = format!("http://{}/api/onboard", addr).parse().unwrap();
    let submitter = Submitter::new(HttpProvisioner::new(endpoint, None).unwrap());

    match submitter.submit(&wizard_at_review("Acme")).await {
        SubmissionResult::Failure(failure) => {
            assert_eq!(failure.category, RemediationCategory::Connectivity);
            assert!(failure.message.starts_with("Failed to create agent:"));
            assert!(!failure.tips.is_empty());
        }
        other => panic!("expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_endpoint_is_a_connectivity_failure() {
    // Bind then drop to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let endpoint = format!("http://{}/api/onboard", addr).parse().unwrap();
    let submitter = Submitter::new(HttpProvisioner::new(endpoint, None).unwrap());

    match submitter.submit(&wizard_at_review("Acme")).await {
        SubmissionResult::Failure(failure) => {
            assert_eq!(failure.category, RemediationCategory::Connectivity)
        }
        other => panic!("expected failure, got {:?}", other),
    }
}
