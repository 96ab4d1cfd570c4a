//! Live server tests
//!
//! Need the lending server running on `BASE_URL`.

use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;

use kashidashi_client::{
    config::{ClientConfig, ServerConfig},
    models::{LoanAction, LoanRequest, SelectOption},
    page::{MemoryPage, Page},
    platform::Platform,
    services::{HttpTransport, RecordingNotifier, ReqwestTransport, SubmissionOutcome},
    App,
};

const BASE_URL: &str = "http://127.0.0.1:5000";

fn transport() -> ReqwestTransport {
    ReqwestTransport::new(&ServerConfig {
        base_url: BASE_URL.to_string(),
        timeout_secs: 30,
    })
    .expect("Failed to build transport")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_add_user_without_name_is_json_error() {
    let client = Client::new();

    let response = client
        .post(format!("{}/add_user", BASE_URL))
        .header("X-Requested-With", "XMLHttpRequest")
        .form(&[("user_name_new", "")])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "missing_name");
}

#[tokio::test]
#[ignore]
async fn test_add_book_without_background_header_redirects() {
    let raw = Client::new()
        .post(format!("{}/add_book", BASE_URL))
        .form(&[("isbn_new", "")])
        .send()
        .await
        .expect("Failed to send request");

    // Redirect is followed to the HTML index page
    assert!(raw.status().is_success());
    let content_type = raw.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));

    let response = transport()
        .post_form("/add_book", &[("isbn_new".to_string(), String::new())])
        .await
        .expect("Failed to send request");
    assert!(response.is_json());
}

#[tokio::test]
#[ignore]
async fn test_add_user_updates_select() {
    let page = Arc::new(
        MemoryPage::new()
            .with_form("/add_user", &[("user_name_new", "Integration Tester")])
            .with_select("user_id", vec![SelectOption::new("0", "placeholder")]),
    );
    let app = App::new(
        &ClientConfig::default(),
        page.clone(),
        Arc::new(transport()),
        Platform::headless(),
        Arc::new(RecordingNotifier::new()),
    );

    let outcome = app.on_user_submit().await;

    let SubmissionOutcome::Created { id, .. } = outcome else {
        panic!("unexpected outcome: {:?}", outcome);
    };
    assert_eq!(page.selected("user_id"), Some(id));
    assert_eq!(page.select_options("user_id").unwrap().len(), 2);
}

#[tokio::test]
#[ignore]
async fn test_loan_with_unknown_user_is_rejected() {
    let notifier = Arc::new(RecordingNotifier::new());
    let app = App::new(
        &ClientConfig::default(),
        Arc::new(MemoryPage::new()),
        Arc::new(transport()),
        Platform::headless(),
        notifier.clone(),
    );

    let reply = app
        .loans()
        .perform(&LoanRequest {
            action: LoanAction::Loan,
            user_id: "-1".to_string(),
            isbn: "0000000000000".to_string(),
            logged_at: None,
        })
        .await
        .expect("Failed to send request");

    assert!(!reply.ok);
    assert_eq!(reply.error.as_deref(), Some("db_error"));
    assert_eq!(notifier.notifications().len(), 1);
}
